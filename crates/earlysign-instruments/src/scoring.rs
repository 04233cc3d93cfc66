use earlysign_core::models::risk::RiskLevel;

/// `round(100 * total / max)`, halves rounding up, computed in integers.
///
/// A questionnaire whose options are all worth zero has `max == 0`; that
/// scores as 0%. `total` is clamped to `max` so the result never exceeds 100.
pub fn risk_percentage(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let total = u64::from(total.min(max));
    let max = u64::from(max);
    let rounded = (200 * total + max) / (2 * max);
    // total <= max bounds this to 100.
    rounded as u8
}

/// Percentage and tier for a raw score.
pub fn classify(total: u32, max: u32) -> (u8, RiskLevel) {
    let percentage = risk_percentage(total, max);
    (percentage, RiskLevel::from_percentage(percentage))
}
