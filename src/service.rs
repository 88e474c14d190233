use crate::api::{DateFetch, Fixture, FixtureSource};
use crate::models::Match;
use crate::utils::cache::Cache;
use crate::utils::clock::Clock;
use crate::utils::leagues::{filter_leagues, ALLOWED_LEAGUES};
use crate::utils::normalize::{default_offset, normalize_fixtures, retain_day_window, DayWindow};
use chrono::{DateTime, Days, FixedOffset, Local, NaiveDate, Utc};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub const MATCHES_CACHE_KEY: &str = "today_tomorrow_matches";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// Builds today's and tomorrow's match list, serving it from cache while fresh
pub struct MatchService<S> {
    source: S,
    cache: Arc<dyn Cache<Vec<Match>>>,
    clock: Arc<dyn Clock>,
    offset: FixedOffset,
    ttl: Duration,
    allowed_leagues: Vec<u32>,
}

impl<S: FixtureSource> MatchService<S> {
    pub fn new(source: S, cache: Arc<dyn Cache<Vec<Match>>>, clock: Arc<dyn Clock>) -> Self {
        Self {
            source,
            cache,
            clock,
            offset: default_offset(),
            ttl: DEFAULT_CACHE_TTL,
            allowed_leagues: ALLOWED_LEAGUES.to_vec(),
        }
    }

    pub fn with_offset(mut self, offset: FixedOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_allowed_leagues(mut self, allowed_leagues: Vec<u32>) -> Self {
        self.allowed_leagues = allowed_leagues;
        self
    }

    /// Dates asked of the upstream: today and tomorrow on the server's calendar
    pub fn allowed_dates(&self) -> [NaiveDate; 2] {
        allowed_dates_at(self.clock.now())
    }

    /// Fetch both dates concurrently. Failures stay in the returned outcomes.
    pub async fn fetch_all(&self, dates: [NaiveDate; 2]) -> Vec<DateFetch> {
        let [first, second] = dates;
        let (first, second) = tokio::join!(
            self.source.fetch_fixtures(first),
            self.source.fetch_fixtures(second)
        );
        vec![first, second]
    }

    /// Cached match list, rebuilt from the upstream when missing or expired
    pub async fn get_today_matches(&self) -> Vec<Match> {
        match self.cache.get(MATCHES_CACHE_KEY) {
            Ok(Some(matches)) => {
                info!(count = matches.len(), "Using cached matches");
                return matches;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Cache read failed, fetching fresh matches"),
        }

        self.refresh().await
    }

    /// Rebuild the match list from the upstream and store it, ignoring any cached copy
    pub async fn refresh(&self) -> Vec<Match> {
        let now = self.clock.now();
        let window = DayWindow::at(now, self.offset);

        let fetches = self.fetch_all(allowed_dates_at(now)).await;
        let failed_dates = fetches.iter().filter(|f| !f.is_ok()).count();
        let fixtures: Vec<Fixture> = fetches
            .into_iter()
            .flat_map(DateFetch::into_fixtures)
            .collect();

        let matches = build_matches(fixtures, &self.allowed_leagues, &window);

        if let Err(e) = self.cache.set(MATCHES_CACHE_KEY, matches.clone(), self.ttl) {
            warn!(error = %e, "Failed to cache matches");
        }
        info!(count = matches.len(), failed_dates, "Matches fetched and cached");

        matches
    }
}

fn allowed_dates_at(now: DateTime<Utc>) -> [NaiveDate; 2] {
    let today = now.with_timezone(&Local).date_naive();
    [today, today + Days::new(1)]
}

/// League filter, then normalization, then the day window
pub fn build_matches(
    fixtures: Vec<Fixture>,
    allowed_leagues: &[u32],
    window: &DayWindow,
) -> Vec<Match> {
    let fixtures = filter_leagues(fixtures, allowed_leagues);
    let matches = normalize_fixtures(fixtures, window);
    retain_day_window(matches, window)
}
