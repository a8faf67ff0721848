//! Turns classified columns into ranked chart proposals.
//!
//! Every rule runs independently, so one dataset usually yields several
//! chart kinds. Columns classified as mixed never take part.

use std::cmp::Ordering;

use super::types::*;

const MAX_TREND_SERIES: usize = 3;
const MAX_COMPARISON_CATEGORIES: usize = 2;
const MAX_COMPARISON_MEASURES: usize = 2;
const MAX_CORRELATION_MEASURES: usize = 3;
const LARGE_DATASET_NOTE: &str =
    "Large dataset: sampling and rendering optimizations will be applied";

pub fn recommend(groups: &ColumnGroups, row_count: usize) -> RecommendationSet {
    let mut recommendations = Vec::new();

    time_series(groups, &mut recommendations);
    category_comparison(groups, &mut recommendations);
    distribution(groups, &mut recommendations);
    correlation(groups, &mut recommendations);
    multi_dimensional(groups, &mut recommendations);

    if row_count > LARGE_DATASET_ROWS {
        tracing::debug!(
            "Applying large dataset adjustment for {} rows",
            row_count
        );
        for rec in recommendations
            .iter_mut()
            .filter(|rec| matches!(rec.chart_type, ChartType::Scatter | ChartType::Line))
        {
            rec.confidence *= LARGE_DATASET_PENALTY;
            rec.note = Some(LARGE_DATASET_NOTE.to_string());
        }
    }

    // sort_by is stable, so rule order breaks remaining ties
    recommendations.sort_by(|a, b| {
        b.priority
            .weight()
            .cmp(&a.priority.weight())
            .then_with(|| b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal))
    });

    let confidence = overall_confidence(&recommendations);
    tracing::debug!(
        "Generated {} recommendations with {}% confidence",
        recommendations.len(),
        confidence
    );

    RecommendationSet {
        recommendations,
        confidence,
    }
}

fn overall_confidence(recommendations: &[Recommendation]) -> u8 {
    if recommendations.is_empty() {
        return 0;
    }
    let mean = recommendations.iter().map(|rec| rec.confidence).sum::<f64>()
        / recommendations.len() as f64;
    (mean * 100.0).round().clamp(0.0, 100.0) as u8
}

fn time_series(groups: &ColumnGroups, out: &mut Vec<Recommendation>) {
    for temporal in &groups.temporal {
        for measure in groups.numerical.iter().take(MAX_TREND_SERIES) {
            out.push(Recommendation {
                chart_type: ChartType::Line,
                title: format!("{} Trend Over {}", measure.name, temporal.name),
                description: format!(
                    "Shows how {} changes across {}",
                    measure.name, temporal.name
                ),
                x_axis: temporal.name.clone(),
                y_axis: Some(measure.name.clone()),
                group_by: None,
                size_by: None,
                confidence: 0.95,
                priority: Priority::High,
                reasoning: format!(
                    "{} is temporal and {} is numerical, a natural time series",
                    temporal.name, measure.name
                ),
                note: None,
            });
        }
    }
}

fn category_comparison(groups: &ColumnGroups, out: &mut Vec<Recommendation>) {
    for category in groups.categorical.iter().take(MAX_COMPARISON_CATEGORIES) {
        let few_categories = category.unique_values <= BAR_HIGH_CONFIDENCE_MAX_UNIQUE;
        let (confidence, priority) = if few_categories {
            (0.9, Priority::High)
        } else {
            (0.7, Priority::Medium)
        };

        for measure in groups.numerical.iter().take(MAX_COMPARISON_MEASURES) {
            out.push(Recommendation {
                chart_type: ChartType::Bar,
                title: format!("{} by {}", measure.name, category.name),
                description: format!(
                    "Compares {} across each {} value",
                    measure.name, category.name
                ),
                x_axis: category.name.clone(),
                y_axis: Some(measure.name.clone()),
                group_by: None,
                size_by: None,
                confidence,
                priority,
                reasoning: format!(
                    "{} has {} distinct values to compare {} against",
                    category.name, category.unique_values, measure.name
                ),
                note: None,
            });
        }
    }
}

fn distribution(groups: &ColumnGroups, out: &mut Vec<Recommendation>) {
    let measure = groups.numerical.first();

    for category in groups
        .categorical
        .iter()
        .filter(|c| (PIE_MIN_CATEGORIES..=PIE_MAX_CATEGORIES).contains(&c.unique_values))
    {
        let description = match measure {
            Some(m) => format!("Share of {} per {}", m.name, category.name),
            None => format!("Share of rows per {}", category.name),
        };
        out.push(Recommendation {
            chart_type: ChartType::Pie,
            title: format!("{} Distribution", category.name),
            description,
            x_axis: category.name.clone(),
            y_axis: measure.map(|m| m.name.clone()),
            group_by: None,
            size_by: None,
            confidence: 0.85,
            priority: Priority::Medium,
            reasoning: format!(
                "{} has {} categories, few enough for readable slices",
                category.name, category.unique_values
            ),
            note: None,
        });
    }
}

fn correlation(groups: &ColumnGroups, out: &mut Vec<Recommendation>) {
    let measures: Vec<&ColumnProfile> = groups
        .numerical
        .iter()
        .take(MAX_CORRELATION_MEASURES)
        .collect();

    for (i, x) in measures.iter().enumerate() {
        for y in &measures[i + 1..] {
            out.push(Recommendation {
                chart_type: ChartType::Scatter,
                title: format!("{} vs {}", y.name, x.name),
                description: format!("Explores the relationship between {} and {}", x.name, y.name),
                x_axis: x.name.clone(),
                y_axis: Some(y.name.clone()),
                group_by: None,
                size_by: None,
                confidence: 0.8,
                priority: Priority::Medium,
                reasoning: "Two numerical columns may be correlated".to_string(),
                note: None,
            });
        }
    }
}

fn multi_dimensional(groups: &ColumnGroups, out: &mut Vec<Recommendation>) {
    if let [x, y, size, ..] = groups.numerical.as_slice() {
        out.push(Recommendation {
            chart_type: ChartType::Bubble,
            title: format!("{} vs {} sized by {}", y.name, x.name, size.name),
            description: "Plots three numerical dimensions at once".to_string(),
            x_axis: x.name.clone(),
            y_axis: Some(y.name.clone()),
            group_by: None,
            size_by: Some(size.name.clone()),
            confidence: 0.75,
            priority: Priority::Low,
            reasoning: format!(
                "{} numerical columns allow a multi-dimensional view",
                groups.numerical.len()
            ),
            note: None,
        });
    }
}
