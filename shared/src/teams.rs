//! KBO clubs and their home stadiums

use crate::models::{Stadium, Team};
use crate::stadiums;

/// League team code and display name, in league listing order
static TEAM_NAMES: [(&str, &str); 10] = [
    ("LG", "LG 트윈스"),
    ("OB", "두산 베어스"),
    ("WO", "키움 히어로즈"),
    ("SK", "SSG 랜더스"),
    ("KT", "KT 위즈"),
    ("HH", "한화 이글스"),
    ("SS", "삼성 라이온즈"),
    ("HT", "KIA 타이거즈"),
    ("LT", "롯데 자이언츠"),
    ("NC", "NC 다이노스"),
];

fn home_stadium(id: &str) -> Option<&'static Stadium> {
    stadiums::all()
        .iter()
        .find(|s| s.home_teams.iter().any(|team| *team == id))
}

fn team(id: &'static str, name: &'static str) -> Option<Team> {
    let stadium = home_stadium(id)?;
    Some(Team {
        id,
        name,
        stadium_name: stadium.stadium_name,
        location: stadium.location,
        reg_id: stadium.temperature_reg_id,
        stadium_type: stadium.surface,
        is_dome: stadium.is_dome,
    })
}

/// Every club with a registered home stadium
pub fn all() -> Vec<Team> {
    TEAM_NAMES.iter().filter_map(|&(id, name)| team(id, name)).collect()
}

/// Look up a club by team code (case-insensitive)
pub fn find(id: &str) -> Option<Team> {
    let id = id.trim();
    TEAM_NAMES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(id))
        .and_then(|&(code, name)| team(code, name))
}
