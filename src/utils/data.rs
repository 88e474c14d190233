use crate::models::Match;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

/// Flat row for spreadsheet export
#[derive(Debug, Serialize)]
struct MatchRow<'a> {
    day: &'a str,
    time: &'a str,
    league: &'a str,
    home_team: &'a str,
    away_team: &'a str,
    status: &'a str,
    home_goals: Option<u32>,
    away_goals: Option<u32>,
}

impl<'a> From<&'a Match> for MatchRow<'a> {
    fn from(m: &'a Match) -> Self {
        Self {
            day: &m.day_label,
            time: &m.time,
            league: &m.league,
            home_team: &m.home_team,
            away_team: &m.away_team,
            status: &m.status,
            home_goals: m.goals.home,
            away_goals: m.goals.away,
        }
    }
}

/// Write matches as CSV (with header) to any writer
pub fn write_matches_csv<W: Write>(matches: &[Match], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for m in matches {
        csv_writer
            .serialize(MatchRow::from(m))
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Save matches to a CSV file
pub fn save_matches_to_csv(matches: &[Match], filename: &str) -> Result<()> {
    let file = std::fs::File::create(filename).context("Failed to create CSV file")?;
    write_matches_csv(matches, file)
}

/// Save matches to a JSON file
pub fn save_matches_to_json(matches: &[Match], filename: &str) -> Result<()> {
    let json = serde_json::to_string_pretty(matches).context("Failed to serialize matches")?;
    std::fs::write(filename, json).context("Failed to write JSON file")?;
    Ok(())
}

/// Load matches from a JSON file written by `save_matches_to_json`
pub fn load_matches_from_json(filename: &str) -> Result<Vec<Match>> {
    let json = std::fs::read_to_string(filename).context("Failed to read JSON file")?;
    let matches: Vec<Match> =
        serde_json::from_str(&json).context("Failed to deserialize matches")?;
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goals;
    use chrono::DateTime;

    fn sample() -> Vec<Match> {
        vec![Match {
            league_id: 2,
            league: "UEFA Champions League".to_string(),
            league_logo: Some("ucl.png".to_string()),
            home_team: "Real Madrid".to_string(),
            home_logo: None,
            away_team: "Bayern, Munich".to_string(),
            away_logo: None,
            kickoff: DateTime::parse_from_rfc3339("2024-05-08T16:00:00-03:00").unwrap(),
            time: "16:00 hs ARG".to_string(),
            day_label: "Mañana".to_string(),
            status: "FT".to_string(),
            goals: Goals {
                home: Some(2),
                away: Some(1),
            },
        }]
    }

    #[test]
    fn test_write_matches_csv() {
        let mut out = Vec::new();
        write_matches_csv(&sample(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "day,time,league,home_team,away_team,status,home_goals,away_goals"
        );
        assert_eq!(
            lines[1],
            "Mañana,16:00 hs ARG,UEFA Champions League,Real Madrid,\"Bayern, Munich\",FT,2,1"
        );
    }

    #[test]
    fn test_json_file_keeps_matches() {
        let path = std::env::temp_dir().join(format!("futbol_hoy_{}.json", std::process::id()));
        let path = path.to_str().unwrap();

        save_matches_to_json(&sample(), path).unwrap();
        let loaded = load_matches_from_json(path).unwrap();
        std::fs::remove_file(path).ok();

        assert_eq!(loaded, sample());
    }
}
