use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::model::{LOCAL_ZONE, TimeReading};

/// Reports the current time in a fixed civil zone.
///
/// Uses a named zone rather than an offset so readings follow daylight
/// saving transitions.
#[derive(Debug, Clone, Copy)]
pub struct ZoneClock {
    zone: Tz,
}

impl ZoneClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    pub fn now(&self) -> TimeReading {
        self.reading_at(Utc::now())
    }

    pub fn reading_at(&self, instant: DateTime<Utc>) -> TimeReading {
        TimeReading {
            current_time: instant.with_timezone(&self.zone).fixed_offset(),
            timezone: self.zone.name().to_string(),
        }
    }
}

impl Default for ZoneClock {
    fn default() -> Self {
        Self::new(LOCAL_ZONE)
    }
}
