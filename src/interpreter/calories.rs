use regex::Regex;
use std::sync::LazyLock;

use crate::models::CalorieEstimate;

static TOTAL_CALORIES_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"(?i)Całkowita\s+szacowana\s+kaloryczność\s+posiłku:\s*([0-9]+(?:[,.][0-9]+)?)\s*kcal",
    )
    .ok()
});

/// Pull the "Całkowita szacowana kaloryczność posiłku: N kcal" total out of
/// the model's prose.
///
/// Decimal commas are accepted. The value is rounded half away from zero.
pub fn parse_calories(text: &str) -> CalorieEstimate {
    let Some(pattern) = TOTAL_CALORIES_PATTERN.as_ref() else {
        return CalorieEstimate::Absent;
    };

    let Some(token) = pattern.captures(text).and_then(|caps| caps.get(1)) else {
        log::debug!("🔍 No calorie total found in model answer");
        return CalorieEstimate::Absent;
    };

    let numeric = token.as_str().replace(',', ".");
    let Ok(value) = numeric.parse::<f64>() else {
        log::warn!("⚠️ Could not parse calorie token: {}", token.as_str());
        return CalorieEstimate::Absent;
    };

    let rounded = value.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded > f64::from(u32::MAX) {
        log::warn!("⚠️ Calorie total out of range: {}", token.as_str());
        return CalorieEstimate::Absent;
    }

    CalorieEstimate::Present(rounded as u32)
}
