use super::types::*;
use crate::models::Row;

/// Checks a chart configuration against the data it will be drawn from.
///
/// The result is advisory: callers decide whether an invalid configuration
/// blocks chart creation.
pub fn validate(dataset: &[Row], config: &ChartConfig) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let Some(first_row) = dataset.first() else {
        errors.push(ValidationIssue::new(
            IssueKind::NoData,
            "The dataset contains no rows",
            "Upload a file with at least one data row",
        ));
        return ValidationResult {
            valid: false,
            errors,
            warnings,
            data_size: 0,
            performance_mode: false,
        };
    };

    if dataset.len() < 2 {
        warnings.push(ValidationIssue::new(
            IssueKind::InsufficientData,
            format!("Only {} row available", dataset.len()),
            "Charts are more meaningful with at least two rows",
        ));
    }

    let axes = [("X", &config.x_axis), ("Y", &config.y_axis)];
    for (label, column) in axes
        .iter()
        .filter_map(|(label, column)| column.as_deref().map(|c| (*label, c)))
    {
        if !first_row.contains_key(column) {
            errors.push(ValidationIssue::new(
                IssueKind::MissingColumn,
                format!("{} axis column '{}' does not exist in the data", label, column),
                "Pick one of the columns listed in the file header",
            ));
            continue;
        }

        let all_empty = dataset
            .iter()
            .take(EMPTY_CHECK_ROWS)
            .all(|row| row.get(column).map_or(true, |value| value.is_empty()));
        if all_empty {
            warnings.push(ValidationIssue::new(
                IssueKind::EmptyColumn,
                format!("{} axis column '{}' has no values in the first rows", label, column),
                "Choose a column that contains data",
            ));
        }
    }

    if !errors.is_empty() {
        tracing::debug!("Chart configuration rejected with {} errors", errors.len());
    }

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
        data_size: dataset.len(),
        performance_mode: dataset.len() > PERFORMANCE_MODE_ROWS,
    }
}

/// Position of an existing chart with the same type, axes and series.
pub fn find_duplicate(existing: &[ChartConfig], candidate: &ChartConfig) -> Option<usize> {
    existing.iter().position(|chart| {
        chart.chart_type == candidate.chart_type
            && chart.x_axis == candidate.x_axis
            && chart.y_axis == candidate.y_axis
            && chart.group_by == candidate.group_by
    })
}

pub fn duplicate_warning(existing: &[ChartConfig], candidate: &ChartConfig) -> Option<ValidationIssue> {
    find_duplicate(existing, candidate).map(|index| {
        ValidationIssue::new(
            IssueKind::DuplicateChart,
            format!("An identical chart already exists at position {}", index + 1),
            "Change the chart type, axes or grouping",
        )
    })
}
