//! Query filter types

use crate::error::{Error, Result};
use std::str::FromStr;

/// Processing states TOPdesk uses for finished incidents
pub const CLOSED_PROCESSING_STATES: [&str; 2] = ["Afgehandeld", "Gesloten"];

/// Incident status filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IncidentStatus {
    /// Processing status is not one of the closed states
    #[default]
    Open,
    /// Processing status is one of the closed states
    Closed,
}

impl IncidentStatus {
    /// Lowercase name as accepted by [`FromStr`]
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Open => "open",
            IncidentStatus::Closed => "closed",
        }
    }

    /// FIQL set operator selecting this status
    pub(crate) fn operator(self) -> &'static str {
        match self {
            IncidentStatus::Open => "=out=",
            IncidentStatus::Closed => "=in=",
        }
    }
}

impl FromStr for IncidentStatus {
    type Err = Error;

    /// Accepts `open` and `closed` in any case. Anything else is rejected
    /// rather than being read as `closed`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(IncidentStatus::Open),
            "closed" => Ok(IncidentStatus::Closed),
            _ => Err(Error::invalid_argument(
                "status",
                format!("expected 'open' or 'closed', got '{s}'"),
            )),
        }
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
