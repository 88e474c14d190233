use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Goals scored by each side; `None` until the match has started
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Goals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// A fixture from an allowed league, normalized to the display offset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub league_id: u32,
    pub league: String,
    pub league_logo: Option<String>,
    pub home_team: String,
    pub home_logo: Option<String>,
    pub away_team: String,
    pub away_logo: Option<String>,
    pub kickoff: DateTime<FixedOffset>, // Already shifted to the display offset
    pub time: String,                   // e.g. "15:30 hs ARG"
    pub day_label: String,              // "Hoy", "Mañana" or a weekday name
    pub status: String,                 // Upstream short status code (NS, 1H, FT, ...)
    pub goals: Goals,
}

impl Match {
    /// "Home vs Away"
    pub fn title(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// "2 - 1" once both scores are known
    pub fn score(&self) -> Option<String> {
        match (self.goals.home, self.goals.away) {
            (Some(home), Some(away)) => Some(format!("{} - {}", home, away)),
            _ => None,
        }
    }
}
