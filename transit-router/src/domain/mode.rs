//! Transit modes.

use std::fmt;

use serde::Deserialize;

/// Main transit mode of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransitMode {
    Rail,
    Coach,
    Subway,
    Bus,
    Tram,
    Ferry,
    Airplane,
    CableCar,
    Gondola,
    Funicular,
}

impl TransitMode {
    /// All modes, in declaration order.
    pub const ALL: [TransitMode; 10] = [
        TransitMode::Rail,
        TransitMode::Coach,
        TransitMode::Subway,
        TransitMode::Bus,
        TransitMode::Tram,
        TransitMode::Ferry,
        TransitMode::Airplane,
        TransitMode::CableCar,
        TransitMode::Gondola,
        TransitMode::Funicular,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitMode::Rail => "RAIL",
            TransitMode::Coach => "COACH",
            TransitMode::Subway => "SUBWAY",
            TransitMode::Bus => "BUS",
            TransitMode::Tram => "TRAM",
            TransitMode::Ferry => "FERRY",
            TransitMode::Airplane => "AIRPLANE",
            TransitMode::CableCar => "CABLE_CAR",
            TransitMode::Gondola => "GONDOLA",
            TransitMode::Funicular => "FUNICULAR",
        }
    }
}

impl fmt::Display for TransitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
