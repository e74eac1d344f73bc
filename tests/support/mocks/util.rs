// tests/support/mocks/util.rs
use chrono::{DateTime, Utc};
use slugkeeper::application::ports::{time::Clock, util::SlugGenerator};

#[derive(Clone)]
pub struct DummyClock;

impl Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        super::time::fixed_now()
    }
}

/// Passes text through untouched, so tests control the exact candidate.
#[derive(Clone)]
pub struct DummySlug;

impl SlugGenerator for DummySlug {
    fn slugify(&self, s: &str) -> String {
        s.to_string()
    }
}
