//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Grid coordinates of the short-term forecast (KMA 5km grid)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct GridPoint {
    pub nx: i32,
    pub ny: i32,
}

impl GridPoint {
    pub fn new(nx: i32, ny: i32) -> Self {
        Self { nx, ny }
    }
}

/// Region identifiers used by the two mid-term sub-calls.
///
/// The land/sky product is published per province while temperatures are
/// published per city, so the two ids usually differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MidTermRegions {
    pub land_reg_id: String,
    pub temperature_reg_id: String,
}

impl MidTermRegions {
    pub fn new(land_reg_id: impl Into<String>, temperature_reg_id: impl Into<String>) -> Self {
        Self {
            land_reg_id: land_reg_id.into(),
            temperature_reg_id: temperature_reg_id.into(),
        }
    }
}

/// Playing surface of a stadium
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Natural,
    Artificial,
}

impl SurfaceType {
    pub fn label_ko(&self) -> &'static str {
        match self {
            SurfaceType::Natural => "천연",
            SurfaceType::Artificial => "인조",
        }
    }

    /// Parse either the English name or the Korean label used in schedule data
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "natural" | "천연" | "천연잔디" => Some(SurfaceType::Natural),
            "artificial" | "인조" | "인조잔디" => Some(SurfaceType::Artificial),
            _ => None,
        }
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceType::Natural => write!(f, "natural"),
            SurfaceType::Artificial => write!(f, "artificial"),
        }
    }
}
