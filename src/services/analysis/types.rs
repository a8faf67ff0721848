use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// Heuristic thresholds. None of these come from a formal model; they are
// tuning knobs.
pub const SAMPLE_SIZE: usize = 100;
pub const EMPTY_CHECK_ROWS: usize = 10;
/// Inclusive: a column with exactly 80% parseable values is numerical.
pub const NUMERIC_RATIO_THRESHOLD: f64 = 0.8;
pub const CONTINUOUS_UNIQUE_RATIO: f64 = 0.8;
/// With the sample capped at `SAMPLE_SIZE`, any column reaching
/// `CATEGORICAL_MAX_UNIQUE` distinct values has a ratio of at least 0.2, so
/// this ratio only decides anything if it is raised above that or the sample
/// cap grows beyond `CATEGORICAL_MAX_UNIQUE / CATEGORICAL_UNIQUE_RATIO`.
pub const CATEGORICAL_UNIQUE_RATIO: f64 = 0.1;
pub const CATEGORICAL_MAX_UNIQUE: usize = 20;
pub const LOW_CARDINALITY_MAX: usize = 5;
pub const BAR_HIGH_CONFIDENCE_MAX_UNIQUE: usize = 10;
pub const PIE_MIN_CATEGORIES: usize = 2;
pub const PIE_MAX_CATEGORIES: usize = 8;
pub const LARGE_DATASET_ROWS: usize = 5_000;
pub const LARGE_DATASET_PENALTY: f64 = 0.95;
pub const PERFORMANCE_MODE_ROWS: usize = 1_000;
pub const OPTIMIZED_TIER_ROWS: usize = 5_000;
pub const EXTREME_TIER_ROWS: usize = 15_000;
pub const ULTRA_TIER_ROWS: usize = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Categorical,
    Numerical,
    Temporal,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Characteristic {
    TimeSeries,
    Sequential,
    Continuous,
    Discrete,
    LowCardinality,
    MediumCardinality,
    Text,
    Heterogeneous,
}

/// Aggregates over the parseable values of a numerical column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericStats {
    pub min: f64,
    pub max: f64,
    pub range: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub unique_values: usize,
    pub unique_ratio: f64,
    pub confidence: f64,
    pub characteristics: SmallVec<[Characteristic; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<NumericStats>,
}

impl ColumnProfile {
    pub fn has(&self, tag: Characteristic) -> bool {
        self.characteristics.contains(&tag)
    }
}

/// Profiles bucketed by type, each bucket in column order.
#[derive(Debug, Clone, Default)]
pub struct ColumnGroups {
    pub temporal: Vec<ColumnProfile>,
    pub numerical: Vec<ColumnProfile>,
    pub categorical: Vec<ColumnProfile>,
    pub mixed: Vec<ColumnProfile>,
}

impl ColumnGroups {
    pub fn from_profiles<'a, I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = &'a ColumnProfile>,
    {
        let mut groups = ColumnGroups::default();
        for profile in profiles {
            let bucket = match profile.column_type {
                ColumnType::Temporal => &mut groups.temporal,
                ColumnType::Numerical => &mut groups.numerical,
                ColumnType::Categorical => &mut groups.categorical,
                ColumnType::Mixed => &mut groups.mixed,
            };
            bucket.push(profile.clone());
        }
        groups
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Line,
    Bar,
    Pie,
    Scatter,
    Bubble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub chart_type: ChartType,
    pub title: String,
    pub description: String,
    pub x_axis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_by: Option<String>,
    pub confidence: f64,
    pub priority: Priority,
    pub reasoning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    /// Mean recommendation confidence as a whole percentage.
    pub confidence: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    Normal,
    Optimized,
    Extreme,
    Ultra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderingStrategy {
    Standard,
    Large,
    Webgl,
    Progressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierSelection {
    pub tier: PerformanceTier,
    pub rendering_strategy: RenderingStrategy,
}

/// A chart configuration picked by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    #[serde(default)]
    pub chart_type: Option<ChartType>,
    #[serde(default)]
    pub x_axis: Option<String>,
    #[serde(default)]
    pub y_axis: Option<String>,
    #[serde(default)]
    pub group_by: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    NoData,
    InsufficientData,
    MissingColumn,
    EmptyColumn,
    DuplicateChart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
    pub suggestion: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub data_size: usize,
    pub performance_mode: bool,
}
