use crate::api::Fixture;
use crate::models::Match;
use chrono::{DateTime, Datelike, Days, FixedOffset, NaiveDate, Offset, Utc, Weekday};

/// Argentina time
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = -3;

pub const TIME_SUFFIX: &str = "hs ARG";
pub const TODAY_LABEL: &str = "Hoy";
pub const TOMORROW_LABEL: &str = "Mañana";

/// Build a fixed offset from whole hours, `None` outside ±23h
pub fn offset_from_hours(hours: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(hours.checked_mul(3600)?)
}

/// The display offset used when none is configured
pub fn default_offset() -> FixedOffset {
    offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap_or_else(|| Utc.fix())
}

/// "Today" and "tomorrow" as seen from a fixed UTC offset.
///
/// Computed once per aggregation so labels and the window filter always
/// agree on where the day boundary is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    offset: FixedOffset,
    today: NaiveDate,
}

impl DayWindow {
    pub fn at(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self {
            offset,
            today: now.with_timezone(&offset).date_naive(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today + Days::new(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date == self.today() || date == self.tomorrow()
    }

    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    /// "Hoy", "Mañana", otherwise the weekday name
    pub fn day_label(&self, date: NaiveDate) -> String {
        match date.signed_duration_since(self.today).num_days() {
            0 => TODAY_LABEL.to_string(),
            1 => TOMORROW_LABEL.to_string(),
            _ => weekday_name(date.weekday()).to_string(),
        }
    }

    /// Map a raw fixture onto a display-ready match
    pub fn normalize(&self, fixture: Fixture) -> Match {
        let kickoff = self.localize(fixture.fixture.date);

        Match {
            league_id: fixture.league.id,
            league: fixture.league.name,
            league_logo: fixture.league.logo,
            home_team: fixture.teams.home.name,
            home_logo: fixture.teams.home.logo,
            away_team: fixture.teams.away.name,
            away_logo: fixture.teams.away.logo,
            time: format_time(&kickoff),
            day_label: self.day_label(kickoff.date_naive()),
            status: fixture.fixture.status.short.unwrap_or_default(),
            goals: fixture.goals,
            kickoff,
        }
    }
}

/// 24h clock plus the locale marker, e.g. "15:30 hs ARG"
pub fn format_time(kickoff: &DateTime<FixedOffset>) -> String {
    format!("{} {}", kickoff.format("%H:%M"), TIME_SUFFIX)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

pub fn normalize_fixtures(fixtures: Vec<Fixture>, window: &DayWindow) -> Vec<Match> {
    fixtures.into_iter().map(|f| window.normalize(f)).collect()
}

/// Drop matches whose local kickoff date is not today or tomorrow.
/// Upstream dates are server-local, so a fixture asked for "today" can land
/// on either neighbouring day once shifted.
pub fn retain_day_window(matches: Vec<Match>, window: &DayWindow) -> Vec<Match> {
    matches
        .into_iter()
        .filter(|m| window.contains(m.kickoff.date_naive()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn arg() -> FixedOffset {
        offset_from_hours(DEFAULT_UTC_OFFSET_HOURS).unwrap()
    }

    fn fixture(kickoff: &str) -> Fixture {
        serde_json::from_value(serde_json::json!({
            "fixture": {"date": kickoff, "status": {"short": "NS"}},
            "league": {"id": 128, "name": "Liga Profesional Argentina", "logo": "lpa.png"},
            "teams": {
                "home": {"name": "Racing Club", "logo": "racing.png"},
                "away": {"name": "Independiente"}
            },
            "goals": {"home": null, "away": null}
        }))
        .unwrap()
    }

    #[test]
    fn test_offset_from_hours() {
        assert_eq!(arg().local_minus_utc(), -3 * 3600);
        assert!(offset_from_hours(24).is_none());
        assert!(offset_from_hours(i32::MAX).is_none());
    }

    #[test]
    fn test_format_time() {
        let window = DayWindow::at(utc("2024-05-01T12:00:00Z"), arg());
        let local = window.localize(utc("2024-05-01T18:30:00Z"));
        assert_eq!(format_time(&local), "15:30 hs ARG");
    }

    #[test]
    fn test_today_uses_offset() {
        // 01:00 UTC is still the previous evening in Buenos Aires
        let window = DayWindow::at(utc("2024-05-02T01:00:00Z"), arg());
        assert_eq!(window.today(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(window.tomorrow(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn test_day_labels() {
        let window = DayWindow::at(utc("2024-05-01T12:00:00Z"), arg());
        let day = |d: u32| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();

        assert_eq!(window.day_label(day(1)), "Hoy");
        assert_eq!(window.day_label(day(2)), "Mañana");
        assert_eq!(window.day_label(day(3)), "viernes");
        assert_eq!(window.day_label(NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()), "martes");
    }

    #[test]
    fn test_normalize_maps_fields() {
        let window = DayWindow::at(utc("2024-05-01T12:00:00Z"), arg());
        let m = window.normalize(fixture("2024-05-02T01:30:00Z"));

        assert_eq!(m.league_id, 128);
        assert_eq!(m.league_logo.as_deref(), Some("lpa.png"));
        assert_eq!(m.home_team, "Racing Club");
        assert_eq!(m.away_logo, None);
        assert_eq!(m.time, "22:30 hs ARG");
        assert_eq!(m.day_label, "Hoy");
        assert_eq!(m.status, "NS");
        assert_eq!(m.kickoff.to_rfc3339(), "2024-05-01T22:30:00-03:00");
    }

    #[test]
    fn test_retain_day_window() {
        let window = DayWindow::at(utc("2024-05-01T12:00:00Z"), arg());
        let matches = normalize_fixtures(
            vec![
                fixture("2024-05-01T02:00:00Z"), // Apr 30 local
                fixture("2024-05-01T03:00:00Z"), // May 1 00:00 local
                fixture("2024-05-02T23:00:00Z"), // May 2 local
                fixture("2024-05-03T03:00:00Z"), // May 3 local
            ],
            &window,
        );

        let kept: Vec<String> = retain_day_window(matches, &window)
            .into_iter()
            .map(|m| format!("{} {}", m.day_label, m.time))
            .collect();

        assert_eq!(kept, vec!["Hoy 00:00 hs ARG", "Mañana 20:00 hs ARG"]);
    }
}
