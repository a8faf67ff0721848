use super::types::*;

/// Maps a dataset size to the rendering strategy the chart layer should use.
pub fn select_tier(row_count: usize) -> TierSelection {
    let (tier, rendering_strategy) = match row_count {
        n if n >= ULTRA_TIER_ROWS => (PerformanceTier::Ultra, RenderingStrategy::Progressive),
        n if n >= EXTREME_TIER_ROWS => (PerformanceTier::Extreme, RenderingStrategy::Webgl),
        n if n >= OPTIMIZED_TIER_ROWS => (PerformanceTier::Optimized, RenderingStrategy::Large),
        _ => (PerformanceTier::Normal, RenderingStrategy::Standard),
    };

    TierSelection {
        tier,
        rendering_strategy,
    }
}
