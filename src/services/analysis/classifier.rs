use std::collections::HashSet;

use rayon::prelude::*;
use smallvec::{smallvec, SmallVec};

use super::types::*;
use super::utils::*;
use crate::models::{CellValue, Row};

/// Collects up to `SAMPLE_SIZE` non-empty values of `column`, in row order.
pub fn column_sample(rows: &[Row], column: &str) -> Vec<CellValue> {
    rows.iter()
        .filter_map(|row| row.get(column))
        .filter(|value| !value.is_empty())
        .take(SAMPLE_SIZE)
        .cloned()
        .collect()
}

/// Classifies every column of the dataset, keeping the order of `columns`.
pub fn profile_dataset(rows: &[Row], columns: &[String]) -> Vec<ColumnProfile> {
    columns
        .par_iter()
        .map(|column| classify_column(&column_sample(rows, column), column))
        .collect()
}

pub fn classify_column(sample_values: &[CellValue], column_name: &str) -> ColumnProfile {
    let values: Vec<&CellValue> = sample_values
        .iter()
        .filter(|value| !value.is_empty())
        .take(SAMPLE_SIZE)
        .collect();

    if values.is_empty() {
        tracing::debug!("Column {} has no usable values", column_name);
        return ColumnProfile {
            name: column_name.to_string(),
            column_type: ColumnType::Mixed,
            unique_values: 0,
            unique_ratio: 0.0,
            confidence: 0.0,
            characteristics: SmallVec::new(),
            stats: None,
        };
    }

    let seen: HashSet<String> = values.iter().map(|value| value.to_string()).collect();
    let unique_values = seen.len();
    let unique_ratio = unique_values as f64 / values.len() as f64;

    let profile = |column_type: ColumnType,
                   confidence: f64,
                   characteristics: SmallVec<[Characteristic; 2]>,
                   stats: Option<NumericStats>| ColumnProfile {
        name: column_name.to_string(),
        column_type,
        unique_values,
        unique_ratio,
        confidence,
        characteristics,
        stats,
    };

    // Temporal wins over numeric-looking values.
    if has_temporal_keyword(column_name) || values.iter().any(|value| is_temporal_value(value)) {
        return profile(
            ColumnType::Temporal,
            0.9,
            smallvec![Characteristic::TimeSeries, Characteristic::Sequential],
            None,
        );
    }

    let numbers: Vec<f64> = values.iter().filter_map(|value| parse_number(value)).collect();
    let numeric_ratio = numbers.len() as f64 / values.len() as f64;
    if numeric_ratio >= NUMERIC_RATIO_THRESHOLD {
        let spread = if unique_ratio > CONTINUOUS_UNIQUE_RATIO {
            Characteristic::Continuous
        } else {
            Characteristic::Discrete
        };
        return profile(ColumnType::Numerical, 0.85, smallvec![spread], numeric_stats(&numbers));
    }

    if unique_ratio < CATEGORICAL_UNIQUE_RATIO || unique_values < CATEGORICAL_MAX_UNIQUE {
        let cardinality = if unique_values <= LOW_CARDINALITY_MAX {
            Characteristic::LowCardinality
        } else {
            Characteristic::MediumCardinality
        };
        return profile(ColumnType::Categorical, 0.8, smallvec![cardinality], None);
    }

    profile(
        ColumnType::Mixed,
        0.6,
        smallvec![Characteristic::Text, Characteristic::Heterogeneous],
        None,
    )
}
