use super::classifier::profile_dataset;
use super::recommender::recommend;
use super::tier::select_tier;
use super::types::*;
use crate::models::{DatasetAnalysis, Row};

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    /// Profiles, recommends and picks a rendering tier in one pass.
    ///
    /// When `columns` is empty the first row's keys are used.
    pub fn analyze(&self, rows: &[Row], columns: &[String]) -> DatasetAnalysis {
        let start = std::time::Instant::now();
        tracing::info!("Starting analysis of {} rows", rows.len());

        let columns = if columns.is_empty() {
            header_columns(rows)
        } else {
            columns.to_vec()
        };

        let profile_start = std::time::Instant::now();
        let profiles = profile_dataset(rows, &columns);
        let groups = ColumnGroups::from_profiles(&profiles);
        tracing::info!(
            "Profiled {} columns in {:?}: {} temporal, {} numerical, {} categorical, {} mixed",
            profiles.len(),
            profile_start.elapsed(),
            groups.temporal.len(),
            groups.numerical.len(),
            groups.categorical.len(),
            groups.mixed.len()
        );

        let RecommendationSet {
            recommendations,
            confidence,
        } = recommend(&groups, rows.len());
        let performance = select_tier(rows.len());

        tracing::info!(
            "Analysis completed in {:?} with {} recommendations, tier {:?}",
            start.elapsed(),
            recommendations.len(),
            performance.tier
        );

        DatasetAnalysis {
            row_count: rows.len(),
            columns: profiles,
            recommendations,
            confidence,
            performance,
        }
    }
}

fn header_columns(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}
