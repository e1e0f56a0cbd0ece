//! Team models

use serde::Serialize;

use crate::types::SurfaceType;

/// A KBO club joined with its home stadium
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// League team code, as stored in schedule rows (`home_team`, `away_team`)
    pub id: &'static str,
    pub name: &'static str,
    pub stadium_name: &'static str,
    pub location: &'static str,
    /// Mid-term temperature region of the home stadium
    pub reg_id: &'static str,
    pub stadium_type: SurfaceType,
    pub is_dome: bool,
}
