//! Built-in registry of KBO home stadiums
//!
//! Maps a stadium name (canonical or short form) to the grid point and region
//! ids the forecast provider expects.

use crate::models::Stadium;
use crate::types::{GridPoint, SurfaceType};

/// Matches shorter than this are too ambiguous for the containment fallback
const MIN_PARTIAL_MATCH_CHARS: usize = 2;

static STADIUMS: [Stadium; 9] = [
    Stadium {
        stadium_name: "잠실야구장",
        aliases: &["잠실", "잠실종합운동장 야구장"],
        location: "서울특별시 송파구",
        home_teams: &["LG", "OB"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 60, ny: 127 },
        station_id: "108",
        land_reg_id: "11B00000",
        temperature_reg_id: "11B10101",
    },
    Stadium {
        stadium_name: "고척스카이돔",
        aliases: &["고척", "고척돔"],
        location: "서울특별시 구로구",
        home_teams: &["WO"],
        surface: SurfaceType::Artificial,
        is_dome: true,
        coordinates: GridPoint { nx: 60, ny: 127 },
        station_id: "108",
        land_reg_id: "11B00000",
        temperature_reg_id: "11B10101",
    },
    Stadium {
        stadium_name: "인천SSG랜더스필드",
        aliases: &["문학", "인천"],
        location: "인천광역시 미추홀구",
        home_teams: &["SK"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 55, ny: 124 },
        station_id: "112",
        land_reg_id: "11B00000",
        temperature_reg_id: "11B20201",
    },
    Stadium {
        stadium_name: "수원KT위즈파크",
        aliases: &["수원"],
        location: "경기도 수원시",
        home_teams: &["KT"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 60, ny: 121 },
        station_id: "119",
        land_reg_id: "11B00000",
        temperature_reg_id: "11B20601",
    },
    Stadium {
        stadium_name: "대전한화생명이글스파크",
        aliases: &["대전", "대전한화생명볼파크"],
        location: "대전광역시 중구",
        home_teams: &["HH"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 67, ny: 100 },
        station_id: "133",
        land_reg_id: "11C20000",
        temperature_reg_id: "11C20401",
    },
    Stadium {
        stadium_name: "대구삼성라이온즈파크",
        aliases: &["대구"],
        location: "대구광역시 수성구",
        home_teams: &["SS"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 89, ny: 90 },
        station_id: "143",
        land_reg_id: "11H10000",
        temperature_reg_id: "11H10701",
    },
    Stadium {
        stadium_name: "광주챔피언스필드",
        aliases: &["광주"],
        location: "광주광역시 북구",
        home_teams: &["HT"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 58, ny: 74 },
        station_id: "156",
        land_reg_id: "11F20000",
        temperature_reg_id: "11F20501",
    },
    Stadium {
        stadium_name: "사직야구장",
        aliases: &["사직", "부산"],
        location: "부산광역시 동래구",
        home_teams: &["LT"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 98, ny: 76 },
        station_id: "159",
        land_reg_id: "11H20000",
        temperature_reg_id: "11H20201",
    },
    Stadium {
        stadium_name: "창원NC파크",
        aliases: &["창원", "마산"],
        location: "경상남도 창원시",
        home_teams: &["NC"],
        surface: SurfaceType::Natural,
        is_dome: false,
        coordinates: GridPoint { nx: 91, ny: 77 },
        station_id: "155",
        land_reg_id: "11H20000",
        temperature_reg_id: "11H20301",
    },
];

/// Every registered stadium, in registry order
pub fn all() -> &'static [Stadium] {
    &STADIUMS
}

/// Resolve a stadium by name.
///
/// Exact canonical or alias matches win. Otherwise a registered name that
/// contains the query (or is contained in it) is accepted, preferring the
/// longest such name; this lets schedule rows like "잠실종합운동장" resolve.
pub fn find(name: &str) -> Option<&'static Stadium> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    if let Some(stadium) = STADIUMS.iter().find(|s| s.is_named(name)) {
        return Some(stadium);
    }

    let mut best: Option<(&'static Stadium, usize)> = None;
    for stadium in STADIUMS.iter() {
        let candidates = std::iter::once(stadium.stadium_name).chain(stadium.aliases.iter().copied());
        for candidate in candidates {
            if !(name.contains(candidate) || candidate.contains(name)) {
                continue;
            }
            let overlap = name.chars().count().min(candidate.chars().count());
            if overlap < MIN_PARTIAL_MATCH_CHARS {
                continue;
            }
            if best.map_or(true, |(_, len)| overlap > len) {
                best = Some((stadium, overlap));
            }
        }
    }

    best.map(|(stadium, _)| stadium)
}
