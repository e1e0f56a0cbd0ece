//! Stadium models

use serde::Serialize;

use crate::types::{GridPoint, MidTermRegions, SurfaceType};

/// A home stadium and the forecast locations that cover it
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Stadium {
    pub stadium_name: &'static str,
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    pub location: &'static str,
    pub home_teams: &'static [&'static str],
    #[serde(rename = "stadiumType")]
    pub surface: SurfaceType,
    pub is_dome: bool,
    pub coordinates: GridPoint,
    pub station_id: &'static str,
    pub land_reg_id: &'static str,
    #[serde(rename = "regId")]
    pub temperature_reg_id: &'static str,
}

impl Stadium {
    pub fn grid(&self) -> GridPoint {
        self.coordinates
    }

    pub fn mid_term_regions(&self) -> MidTermRegions {
        MidTermRegions::new(self.land_reg_id, self.temperature_reg_id)
    }

    /// Whether `name` is the canonical name or one of the aliases
    pub fn is_named(&self, name: &str) -> bool {
        self.stadium_name == name || self.aliases.contains(&name)
    }
}
