//! Rain cancellation scoring
//!
//! Turns a normalized [`DailyWeather`] plus stadium attributes into a
//! four-level cancellation band. Pure and deterministic.

use chrono::{Duration, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{
    CancelPrediction, CancelProbability, DailyWeather, FactorStatus, FactorType, FactorValue,
    PredictionFactor,
};
use crate::types::SurfaceType;

/// Display format of game and decision times
pub const GAME_TIME_FORMAT: &str = "%H:%M";

/// Hours before first pitch at which the go/no-go window opens
pub const DECISION_LEAD_HOURS: i64 = 3;

const PRECIPITATION_DANGER: i32 = 70;
const PRECIPITATION_WARNING: i32 = 50;
const PRECIPITATION_CAUTION: i32 = 30;
const WIND_WARNING_MPS: i64 = 10;

const SCORE_HIGH: i32 = 60;
const SCORE_MEDIUM: i32 = 35;
const SCORE_LOW: i32 = 15;

/// Evening start used when a game has no scheduled time
pub fn default_game_time() -> NaiveTime {
    NaiveTime::from_hms_opt(18, 30, 0).unwrap_or(NaiveTime::MIN)
}

/// Start of the decision window, three hours before `game_time`, wrapping past midnight
pub fn decision_time_start(game_time: NaiveTime) -> NaiveTime {
    let (start, _) = game_time.overflowing_sub_signed(Duration::hours(DECISION_LEAD_HOURS));
    start
}

pub fn format_game_time(time: NaiveTime) -> String {
    time.format(GAME_TIME_FORMAT).to_string()
}

/// Score the cancellation risk of a game.
///
/// Contributions: precipitation probability (0/10/25/40), rain or shower in
/// either half (30) or overcast (5), wind above 10 m/s (10) and natural turf (5).
/// Domes always score [`CancelProbability::None`].
pub fn calculate_cancel_probability(
    weather: &DailyWeather,
    surface: SurfaceType,
    is_dome: bool,
    game_time: NaiveTime,
) -> CancelPrediction {
    if is_dome {
        return CancelPrediction {
            probability: CancelProbability::None,
            reason: "Dome stadiums are never rained out.".to_string(),
            details: "The roof keeps rain off the field.".to_string(),
            reason_ko: "돔 구장은 우천 취소가 발생하지 않습니다.".to_string(),
            details_ko: "돔 구장은 지붕이 있어 비의 영향이 없습니다.".to_string(),
            game_time: format_game_time(game_time),
            decision_time_start: None,
            factors: Vec::new(),
        };
    }

    let mut score = 0;
    let mut factors = Vec::with_capacity(3);

    let precipitation = weather.precipitation_prob;
    let (points, threshold, status) = if precipitation >= PRECIPITATION_DANGER {
        (40, PRECIPITATION_DANGER, FactorStatus::Danger)
    } else if precipitation >= PRECIPITATION_WARNING {
        (25, PRECIPITATION_WARNING, FactorStatus::Warning)
    } else if precipitation >= PRECIPITATION_CAUTION {
        (10, PRECIPITATION_CAUTION, FactorStatus::Warning)
    } else {
        (0, PRECIPITATION_CAUTION, FactorStatus::Safe)
    };
    score += points;
    factors.push(PredictionFactor {
        factor_type: FactorType::Precipitation,
        value: FactorValue::Percent(precipitation),
        threshold: Some(threshold),
        status,
    });

    let (am, pm) = (weather.weather_am, weather.weather_pm);
    let (points, status) = if am.is_rainy() || pm.is_rainy() {
        (30, FactorStatus::Danger)
    } else if am.is_overcast() || pm.is_overcast() {
        (5, FactorStatus::Warning)
    } else {
        (0, FactorStatus::Safe)
    };
    score += points;
    factors.push(PredictionFactor {
        factor_type: FactorType::WeatherCondition,
        value: FactorValue::Condition(pm),
        threshold: None,
        status,
    });

    if let Some(wind) = weather.wind_speed {
        let status = if wind > Decimal::from(WIND_WARNING_MPS) {
            score += 10;
            FactorStatus::Warning
        } else {
            FactorStatus::Safe
        };
        factors.push(PredictionFactor {
            factor_type: FactorType::Wind,
            value: FactorValue::Speed(wind),
            threshold: Some(WIND_WARNING_MPS as i32),
            status,
        });
    }

    // natural turf drains worse; no factor is reported for it
    if surface == SurfaceType::Natural {
        score += 5;
    }

    let probability = band_for(score);
    let (reason, advice) = english_text(probability);
    let (reason_ko, advice_ko) = korean_text(probability);

    CancelPrediction {
        probability,
        reason: reason.to_string(),
        details: format!(
            "Precipitation probability {}%, conditions: {}. {}",
            precipitation, pm, advice
        ),
        reason_ko: reason_ko.to_string(),
        details_ko: format!(
            "강수 확률 {}%, 날씨 상태: {}. {}",
            precipitation,
            pm.label_ko(),
            advice_ko
        ),
        game_time: format_game_time(game_time),
        decision_time_start: Some(format_game_time(decision_time_start(game_time))),
        factors,
    }
}

/// Map a risk score to its band
pub fn band_for(score: i32) -> CancelProbability {
    if score >= SCORE_HIGH {
        CancelProbability::High
    } else if score >= SCORE_MEDIUM {
        CancelProbability::Medium
    } else if score >= SCORE_LOW {
        CancelProbability::Low
    } else {
        CancelProbability::None
    }
}

fn english_text(probability: CancelProbability) -> (&'static str, &'static str) {
    match probability {
        CancelProbability::High => (
            "High chance of rain with rain expected; a rainout is likely.",
            "Check conditions at the ballpark before first pitch.",
        ),
        CancelProbability::Medium => (
            "Moderate chance of rain; a rainout is possible.",
            "Watch for weather changes around game time.",
        ),
        CancelProbability::Low => (
            "Low chance of rain; a rainout is unlikely.",
            "The game will most likely go ahead as scheduled.",
        ),
        CancelProbability::None => (
            "Fair weather; almost no chance of a rainout.",
            "The game is expected to go ahead as scheduled.",
        ),
    }
}

fn korean_text(probability: CancelProbability) -> (&'static str, &'static str) {
    match probability {
        CancelProbability::High => (
            "강수 확률이 높고 비가 예상되어 우천 취소 가능성이 높습니다.",
            "경기 시작 전 현장 날씨를 확인하시기 바랍니다.",
        ),
        CancelProbability::Medium => (
            "강수 확률이 보통이며 우천 취소 가능성이 있습니다.",
            "경기 시간대 날씨 변화에 주의하시기 바랍니다.",
        ),
        CancelProbability::Low => (
            "강수 확률이 낮아 우천 취소 가능성이 낮습니다.",
            "경기는 정상 진행될 가능성이 높습니다.",
        ),
        CancelProbability::None => (
            "날씨가 양호하여 우천 취소 가능성이 거의 없습니다.",
            "경기는 정상 진행될 것으로 예상됩니다.",
        ),
    }
}
