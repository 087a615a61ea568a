use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::distance::Coordinate;
use crate::source::LocationProvider;

/// Everything a filter may read besides the record: the clock and the device.
///
/// Built fresh for each evaluation so the location is read at apply time.
#[derive(Debug, Clone)]
pub struct EvaluationContext {
    pub now: DateTime<Tz>,
    pub location: Option<Coordinate>,
}

impl EvaluationContext {
    pub fn new(now: DateTime<Tz>, location: Option<Coordinate>) -> Self {
        EvaluationContext { now, location }
    }

    /// Context at the current wall-clock time in `tz`.
    pub fn current(tz: Tz, locator: &dyn LocationProvider) -> Self {
        EvaluationContext::new(Utc::now().with_timezone(&tz), locator.current_location())
    }

    pub fn timezone(&self) -> Tz {
        self.now.timezone()
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}
