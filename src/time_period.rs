use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::WireMap;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Start and end of a query window. Times are taken as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimePeriod {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimePeriod {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidParameter(format!(
                "time period start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(start.and_time(Default::default()), end.and_time(Default::default()))
    }

    /// Window from `start` up to the current time.
    pub fn since(start: NaiveDateTime) -> Result<Self> {
        Self::new(start, Utc::now().naive_utc())
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Serialize to `{"Start", "End"}`: dates for daily/monthly queries,
    /// second-precision UTC timestamps for hourly ones.
    pub fn build(&self, hourly: bool) -> WireMap {
        let format = if hourly { TIME_FORMAT } else { DATE_FORMAT };
        let mut period = WireMap::new();
        period.insert(
            "Start".into(),
            Value::String(self.start.format(format).to_string()),
        );
        period.insert(
            "End".into(),
            Value::String(self.end.format(format).to_string()),
        );
        period
    }
}

/// A time period given either as a [`TimePeriod`] or as a ready wire mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum TimePeriodArg {
    Structured(TimePeriod),
    Raw(WireMap),
}

impl TimePeriodArg {
    /// Raw mappings are returned untouched, `hourly` only affects structured periods.
    pub fn build(&self, hourly: bool) -> WireMap {
        match self {
            Self::Structured(period) => period.build(hourly),
            Self::Raw(raw) => raw.clone(),
        }
    }
}

impl From<TimePeriod> for TimePeriodArg {
    fn from(period: TimePeriod) -> Self {
        Self::Structured(period)
    }
}

impl From<WireMap> for TimePeriodArg {
    fn from(raw: WireMap) -> Self {
        Self::Raw(raw)
    }
}
