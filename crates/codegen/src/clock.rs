use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// Laravel's migration file prefix, e.g. `2024_05_01_093000`.
pub const TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M%S";

#[derive(Debug, Clone, Copy)]
enum Source {
    System,
    Fixed(NaiveDateTime),
}

/// Hands out second-resolution migration timestamps that strictly increase
/// within a run, so two migrations never share a prefix even when written
/// in the same second.
#[derive(Debug, Clone)]
pub struct MigrationClock {
    source: Source,
    last: Option<NaiveDateTime>,
}

impl MigrationClock {
    pub fn system() -> Self {
        Self {
            source: Source::System,
            last: None,
        }
    }

    /// A clock whose wall time is frozen at `at`.
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self {
            source: Source::Fixed(truncate(at)),
            last: None,
        }
    }

    fn now(&self) -> NaiveDateTime {
        match self.source {
            Source::System => truncate(Local::now().naive_local()),
            Source::Fixed(at) => at,
        }
    }

    /// The next timestamp: wall time, or one second past the previous
    /// stamp if the wall clock has not moved past it.
    pub fn next(&mut self) -> NaiveDateTime {
        let now = self.now();
        let stamp = match self.last {
            Some(last) if now <= last => last + Duration::seconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }

    pub fn next_stamp(&mut self) -> String {
        self.next().format(TIMESTAMP_FORMAT).to_string()
    }
}

impl Default for MigrationClock {
    fn default() -> Self {
        Self::system()
    }
}

fn truncate(at: NaiveDateTime) -> NaiveDateTime {
    at.with_nanosecond(0).unwrap_or(at)
}
