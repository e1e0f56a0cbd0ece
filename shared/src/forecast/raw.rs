//! Strict intermediate types for provider payloads
//!
//! The HTTP clients decode provider JSON into these types once; the
//! normalizer only ever sees them.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use super::horizon::{IssueTime, MID_TERM_FIRST_TEMPERATURE_DAY, MID_TERM_LAST_DAY};

/// Largest distance searched around a missing temperature day
pub const TEMPERATURE_NEIGHBOR_SEARCH_DAYS: u8 = 3;

/// Short-term forecast category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShortTermCategory {
    /// Hourly temperature
    Tmp,
    /// Daily minimum temperature
    Tmn,
    /// Daily maximum temperature
    Tmx,
    /// Probability of precipitation
    Pop,
    /// Sky state code
    Sky,
    /// Precipitation type code
    Pty,
    /// Relative humidity
    Reh,
    /// Wind speed (m/s)
    Wsd,
    /// Hourly precipitation amount
    Pcp,
    /// Hourly snowfall
    Sno,
    Other(String),
}

impl ShortTermCategory {
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "TMP" => ShortTermCategory::Tmp,
            "TMN" => ShortTermCategory::Tmn,
            "TMX" => ShortTermCategory::Tmx,
            "POP" => ShortTermCategory::Pop,
            "SKY" => ShortTermCategory::Sky,
            "PTY" => ShortTermCategory::Pty,
            "REH" => ShortTermCategory::Reh,
            "WSD" => ShortTermCategory::Wsd,
            "PCP" => ShortTermCategory::Pcp,
            "SNO" => ShortTermCategory::Sno,
            other => ShortTermCategory::Other(other.to_string()),
        }
    }
}

/// One `(date, time, category, value)` tuple of the short-term product
#[derive(Debug, Clone, PartialEq)]
pub struct ShortTermItem {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub category: ShortTermCategory,
    pub value: String,
}

impl ShortTermItem {
    /// Build an item from the provider's `fcstDate` (`YYYYMMDD`) and
    /// `fcstTime` (`HHMM`) fields. Returns `None` when either is unreadable.
    ///
    /// A time sent as a JSON number loses its leading zeros (`600`), so short
    /// all-digit times are padded back to four digits.
    pub fn parse(fcst_date: &str, fcst_time: &str, category: &str, value: impl Into<String>) -> Option<Self> {
        let date = NaiveDate::parse_from_str(fcst_date.trim(), "%Y%m%d").ok()?;
        let time = NaiveTime::parse_from_str(&pad_hhmm(fcst_time.trim())?, "%H%M").ok()?;
        Some(Self {
            date,
            time,
            category: ShortTermCategory::from_code(category),
            value: value.into(),
        })
    }

    pub fn int_value(&self) -> Option<i32> {
        parse_int(&self.value)
    }

    pub fn float_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

fn pad_hhmm(time: &str) -> Option<String> {
    if time.is_empty() {
        return None;
    }
    if time.len() < 4 && time.bytes().all(|b| b.is_ascii_digit()) {
        Some(format!("{:0>4}", time))
    } else {
        Some(time.to_string())
    }
}

/// Sky and precipitation fields of one mid-term land day
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidLandDay {
    /// `wf{n}Am`, days up to 7
    pub am: Option<String>,
    /// `wf{n}Pm`, days up to 7
    pub pm: Option<String>,
    /// `wf{n}`, days 8-10
    pub daily: Option<String>,
    pub rain_am: Option<i32>,
    pub rain_pm: Option<i32>,
    pub rain_daily: Option<i32>,
}

/// Land/sky product for one region and issue time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidLandForecast {
    pub days: BTreeMap<u8, MidLandDay>,
    /// `wfSv` narrative, when present
    pub summary: Option<String>,
}

impl MidLandForecast {
    /// Collect the provider's flat `wf*`/`rnSt*` fields.
    ///
    /// Unknown keys are ignored and blank values are treated as absent.
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut forecast = Self::default();

        for (key, value) in fields {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            if key == "wfSv" {
                forecast.summary = Some(value.to_string());
            } else if let Some((day, suffix)) = key.strip_prefix("wf").and_then(split_day_key) {
                let entry = forecast.days.entry(day).or_default();
                let text = Some(value.to_string());
                match suffix {
                    "Am" => entry.am = text,
                    "Pm" => entry.pm = text,
                    "" => entry.daily = text,
                    _ => {}
                }
            } else if let Some((day, suffix)) = key.strip_prefix("rnSt").and_then(split_day_key) {
                let entry = forecast.days.entry(day).or_default();
                let rain = parse_int(value);
                match suffix {
                    "Am" => entry.rain_am = rain,
                    "Pm" => entry.rain_pm = rain,
                    "" => entry.rain_daily = rain,
                    _ => {}
                }
            }
        }

        forecast
    }

    pub fn day(&self, index: u8) -> Option<&MidLandDay> {
        self.days.get(&index)
    }
}

/// Temperature fields of one mid-term day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayTemperature {
    pub min: Option<i32>,
    pub max: Option<i32>,
    /// `taMin{n}Low`, lower bound of the minimum
    pub min_low: Option<i32>,
    /// `taMax{n}High`, upper bound of the maximum
    pub max_high: Option<i32>,
}

/// Temperature product for one region and issue time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidTemperatureForecast {
    pub days: BTreeMap<u8, DayTemperature>,
}

impl MidTemperatureForecast {
    /// Collect the provider's flat `taMin*`/`taMax*` fields
    pub fn from_fields<K, V, I>(fields: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut forecast = Self::default();

        for (key, value) in fields {
            let key = key.as_ref();
            let Some(temp) = parse_int(value.as_ref()) else {
                continue;
            };

            if let Some((day, suffix)) = key.strip_prefix("taMin").and_then(split_day_key) {
                let entry = forecast.days.entry(day).or_default();
                match suffix {
                    "" => entry.min = Some(temp),
                    "Low" => entry.min_low = Some(temp),
                    _ => {}
                }
            } else if let Some((day, suffix)) = key.strip_prefix("taMax").and_then(split_day_key) {
                let entry = forecast.days.entry(day).or_default();
                match suffix {
                    "" => entry.max = Some(temp),
                    "High" => entry.max_high = Some(temp),
                    _ => {}
                }
            }
        }

        forecast
    }

    /// Min/max temperature for a day index.
    ///
    /// Reads `taMin{d}`/`taMax{d}`, then the `Low`/`High` bounds, then the
    /// plain values of neighboring days (d+1, d-1, d+2, d-2, ...) within the
    /// published range until both are known.
    pub fn range_for(&self, index: u8) -> (Option<i32>, Option<i32>) {
        let exact = self.days.get(&index).copied().unwrap_or_default();
        let mut min = exact.min.or(exact.min_low);
        let mut max = exact.max.or(exact.max_high);

        let in_range = |d: i16| {
            (i16::from(MID_TERM_FIRST_TEMPERATURE_DAY)..=i16::from(MID_TERM_LAST_DAY)).contains(&d)
        };

        for offset in 1..=TEMPERATURE_NEIGHBOR_SEARCH_DAYS {
            if min.is_some() && max.is_some() {
                break;
            }
            let center = i16::from(index);
            for d in [center + i16::from(offset), center - i16::from(offset)] {
                if !in_range(d) {
                    continue;
                }
                if let Some(day) = self.days.get(&(d as u8)) {
                    min = min.or(day.min);
                    max = max.or(day.max);
                }
            }
        }

        (min, max)
    }
}

/// Result of the two concurrent mid-term sub-calls. A failed sub-call is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MidTermPayload {
    pub land: Option<MidLandForecast>,
    pub temperature: Option<MidTemperatureForecast>,
}

/// Decoded payload of whichever product served a request
#[derive(Debug, Clone, PartialEq)]
pub enum RawForecast {
    ShortTerm(Vec<ShortTermItem>),
    MidTerm {
        issue: IssueTime,
        payload: MidTermPayload,
    },
}

/// Split `"4Am"` into `(4, "Am")`
fn split_day_key(rest: &str) -> Option<(u8, &str)> {
    let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    if digits == 0 {
        return None;
    }
    let day = rest[..digits].parse::<u8>().ok()?;
    Some((day, &rest[digits..]))
}

/// Integer reading of a provider value; decimals are truncated
pub(crate) fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(v) = value.parse::<i32>() {
        return Some(v);
    }
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && v.abs() < f64::from(i32::MAX))
        .map(|v| v.trunc() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_term_item_parse() {
        let item = ShortTermItem::parse("20260510", "1500", "POP", "60").unwrap();
        assert_eq!(item.date, NaiveDate::from_ymd_opt(2026, 5, 10).unwrap());
        assert_eq!(item.time, NaiveTime::from_hms_opt(15, 0, 0).unwrap());
        assert_eq!(item.category, ShortTermCategory::Pop);
        assert_eq!(item.int_value(), Some(60));
    }

    #[test]
    fn test_short_term_item_rejects_bad_timestamps() {
        assert!(ShortTermItem::parse("2026-05-10", "1500", "POP", "60").is_none());
        assert!(ShortTermItem::parse("20260510", "2500", "POP", "60").is_none());
        assert!(ShortTermItem::parse("20260510", "", "POP", "60").is_none());
        assert!(ShortTermItem::parse("20260510", "6:0", "POP", "60").is_none());
    }

    #[test]
    fn test_short_term_item_pads_numeric_time() {
        let six = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(ShortTermItem::parse("20260510", "600", "PTY", "1").unwrap().time, six);
        assert_eq!(ShortTermItem::parse("20260510", "0600", "PTY", "1").unwrap().time, six);
        assert_eq!(
            ShortTermItem::parse("20260510", "0", "PTY", "1").unwrap().time,
            NaiveTime::MIN
        );
        assert_eq!(
            ShortTermItem::parse("20260510", "30", "PTY", "1").unwrap().time,
            NaiveTime::from_hms_opt(0, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_unknown_category_is_kept() {
        assert_eq!(
            ShortTermCategory::from_code("VEC"),
            ShortTermCategory::Other("VEC".to_string())
        );
    }

    #[test]
    fn test_land_fields() {
        let land = MidLandForecast::from_fields([
            ("regId", "11B00000"),
            ("wf4Am", "맑음"),
            ("wf4Pm", "구름많고 비"),
            ("rnSt4Am", "10"),
            ("rnSt4Pm", "60"),
            ("wf8", "흐림"),
            ("rnSt8", "40"),
            ("wf9", ""),
            ("wfSv", "전국 흐리고 비"),
        ]);

        let day4 = land.day(4).unwrap();
        assert_eq!(day4.am.as_deref(), Some("맑음"));
        assert_eq!(day4.pm.as_deref(), Some("구름많고 비"));
        assert_eq!(day4.rain_pm, Some(60));

        let day8 = land.day(8).unwrap();
        assert_eq!(day8.daily.as_deref(), Some("흐림"));
        assert_eq!(day8.rain_daily, Some(40));

        assert!(land.day(9).is_none());
        assert_eq!(land.summary.as_deref(), Some("전국 흐리고 비"));
    }

    #[test]
    fn test_temperature_exact_and_bounds() {
        let temps = MidTemperatureForecast::from_fields([
            ("taMin5", "12"),
            ("taMax5High", "25"),
            ("taMax5Low", "20"),
        ]);
        assert_eq!(temps.range_for(5), (Some(12), Some(25)));
    }

    #[test]
    fn test_temperature_neighbor_search() {
        let temps = MidTemperatureForecast::from_fields([
            ("taMin3", "9"),
            ("taMax3", "19"),
            ("taMin7", "14"),
            ("taMax7", "24"),
        ]);
        // d+1 first, then d-1
        assert_eq!(temps.range_for(6), (Some(14), Some(24)));
        assert_eq!(temps.range_for(4), (Some(9), Some(19)));
        // d=10 searches 9, 8, 7
        assert_eq!(temps.range_for(10), (Some(14), Some(24)));
    }

    #[test]
    fn test_temperature_search_is_bounded() {
        let temps = MidTemperatureForecast::from_fields([("taMin3", "9"), ("taMax3", "19")]);
        assert_eq!(temps.range_for(7), (None, None));
        assert_eq!(MidTemperatureForecast::default().range_for(5), (None, None));
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int(" 12.7 "), Some(12));
        assert_eq!(parse_int("-3"), Some(-3));
        assert_eq!(parse_int("강수없음"), None);
        assert_eq!(parse_int(""), None);
    }
}
