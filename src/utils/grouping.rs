use crate::models::Match;
use serde::Serialize;

/// Matches of one league on one day
#[derive(Debug, Clone, Serialize)]
pub struct LeagueGroup {
    pub league_id: u32,
    pub league: String,
    pub logo: Option<String>,
    pub matches: Vec<Match>,
}

/// One tab on the dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DayGroup {
    pub label: String,
    pub leagues: Vec<LeagueGroup>,
}

impl DayGroup {
    pub fn match_count(&self) -> usize {
        self.leagues.iter().map(|l| l.matches.len()).sum()
    }
}

/// Group by day label, then league. Days and leagues keep first-seen order,
/// matches keep their input order.
pub fn group_matches(matches: &[Match]) -> Vec<DayGroup> {
    let mut days: Vec<DayGroup> = Vec::new();

    for m in matches {
        let day_idx = match days.iter().position(|d| d.label == m.day_label) {
            Some(idx) => idx,
            None => {
                days.push(DayGroup {
                    label: m.day_label.clone(),
                    leagues: Vec::new(),
                });
                days.len() - 1
            }
        };
        let day = &mut days[day_idx];

        let league_idx = match day.leagues.iter().position(|l| l.league_id == m.league_id) {
            Some(idx) => idx,
            None => {
                day.leagues.push(LeagueGroup {
                    league_id: m.league_id,
                    league: m.league.clone(),
                    logo: m.league_logo.clone(),
                    matches: Vec::new(),
                });
                day.leagues.len() - 1
            }
        };
        day.leagues[league_idx].matches.push(m.clone());
    }

    days
}
