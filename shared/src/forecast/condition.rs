//! Mapping of provider codes and narrative text to [`SkyCondition`]

use crate::models::SkyCondition;

/// Precipitation type (`PTY`) code. `0` and unknown codes mean "no precipitation".
pub fn from_precipitation_type(code: i32) -> Option<SkyCondition> {
    match code {
        1 | 5 => Some(SkyCondition::Rain),
        2 | 6 => Some(SkyCondition::RainSnowMixed),
        3 | 7 => Some(SkyCondition::Snow),
        4 => Some(SkyCondition::Shower),
        _ => None,
    }
}

/// Sky state (`SKY`) code
pub fn from_sky_code(code: i32) -> Option<SkyCondition> {
    match code {
        1 => Some(SkyCondition::Clear),
        3 => Some(SkyCondition::MostlyCloudy),
        4 => Some(SkyCondition::Overcast),
        _ => None,
    }
}

/// Short-term bucket condition: precipitation type wins over sky state
pub fn from_short_term_codes(pty: Option<i32>, sky: Option<i32>) -> SkyCondition {
    pty.and_then(from_precipitation_type)
        .or_else(|| sky.and_then(from_sky_code))
        .unwrap_or_default()
}

const MIXED_KEYWORDS: &[&str] = &["비/눈", "눈/비", "눈비", "비눈", "진눈깨비", "sleet", "rain/snow"];
const SNOW_KEYWORDS: &[&str] = &["눈", "snow"];
const SHOWER_KEYWORDS: &[&str] = &["소나기", "shower"];
const RAIN_KEYWORDS: &[&str] = &["비", "rain"];
const OVERCAST_KEYWORDS: &[&str] = &["흐림", "흐리고", "흐려", "overcast"];
const MOSTLY_CLOUDY_KEYWORDS: &[&str] = &["구름많", "구름 많", "mostly cloudy"];
const PARTLY_CLOUDY_KEYWORDS: &[&str] = &["구름조금", "구름 조금", "partly cloudy"];
const CLEAR_KEYWORDS: &[&str] = &["맑", "clear", "sunny"];

/// Keyword extraction from a narrative forecast.
///
/// Precedence: snow family, shower, rain, overcast, mostly cloudy, partly
/// cloudy, clear. "비교" ("compared to") is stripped first so it does not read
/// as rain.
pub fn from_text(text: &str) -> Option<SkyCondition> {
    let text = text.to_lowercase().replace("비교", "");
    let has = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    if has(MIXED_KEYWORDS) {
        Some(SkyCondition::RainSnowMixed)
    } else if has(SNOW_KEYWORDS) {
        Some(SkyCondition::Snow)
    } else if has(SHOWER_KEYWORDS) {
        Some(SkyCondition::Shower)
    } else if has(RAIN_KEYWORDS) {
        Some(SkyCondition::Rain)
    } else if has(OVERCAST_KEYWORDS) {
        Some(SkyCondition::Overcast)
    } else if has(MOSTLY_CLOUDY_KEYWORDS) {
        Some(SkyCondition::MostlyCloudy)
    } else if has(PARTLY_CLOUDY_KEYWORDS) {
        Some(SkyCondition::PartlyCloudy)
    } else if text.contains("cloudy") {
        Some(SkyCondition::MostlyCloudy)
    } else if has(CLEAR_KEYWORDS) {
        Some(SkyCondition::Clear)
    } else {
        None
    }
}

/// Mid-term `wf*` field: either a numeric code or a Korean phrase such as "구름많고 비"
pub fn from_mid_term_field(value: &str) -> Option<SkyCondition> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match value.parse::<i32>() {
        Ok(1) => Some(SkyCondition::Clear),
        Ok(2) => Some(SkyCondition::PartlyCloudy),
        Ok(3) | Ok(10) => Some(SkyCondition::MostlyCloudy),
        Ok(4) => Some(SkyCondition::Overcast),
        Ok(5) => Some(SkyCondition::Rain),
        Ok(6) | Ok(9) => Some(SkyCondition::Shower),
        Ok(7) => Some(SkyCondition::Snow),
        Ok(8) => Some(SkyCondition::RainSnowMixed),
        Ok(_) => None,
        Err(_) => from_text(value),
    }
}
