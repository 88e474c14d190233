pub mod api_football;

pub use api_football::{ApiFootballClient, FetchError, Fixture};

use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;

/// Outcome of asking the upstream for a single calendar date
#[derive(Debug)]
pub struct DateFetch {
    pub date: NaiveDate,
    pub result: Result<Vec<Fixture>, FetchError>,
}

impl DateFetch {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// The fetched fixtures, or nothing if the request failed
    pub fn into_fixtures(self) -> Vec<Fixture> {
        self.result.unwrap_or_default()
    }
}

/// Anything that can hand back the raw fixtures scheduled on a date
pub trait FixtureSource: Send + Sync {
    fn fetch_fixtures(&self, date: NaiveDate) -> impl Future<Output = DateFetch> + Send;
}

impl<T: FixtureSource> FixtureSource for Arc<T> {
    fn fetch_fixtures(&self, date: NaiveDate) -> impl Future<Output = DateFetch> + Send {
        (**self).fetch_fixtures(date)
    }
}
