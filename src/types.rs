use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Key-value structure exchanged with the Cost Explorer API, using its exact
/// field names.
pub type WireMap = serde_json::Map<String, serde_json::Value>;

/// Time-bucket width of a cost query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Granularity {
    Daily,
    Monthly,
    Hourly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Monthly => "MONTHLY",
            Self::Hourly => "HOURLY",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "DAILY" => Ok(Self::Daily),
            "MONTHLY" => Ok(Self::Monthly),
            "HOURLY" => Ok(Self::Hourly),
            _ => Err(Error::InvalidParameter(format!(
                "{s} is invalid, valid values are DAILY, MONTHLY, HOURLY."
            ))),
        }
    }
}

/// Dimension catalogue a value lookup is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    CostAndUsage,
    Reservations,
    SavingsPlans,
}

impl Context {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CostAndUsage => "COST_AND_USAGE",
            Self::Reservations => "RESERVATIONS",
            Self::SavingsPlans => "SAVINGS_PLANS",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Context {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "COST_AND_USAGE" => Ok(Self::CostAndUsage),
            "RESERVATIONS" => Ok(Self::Reservations),
            "SAVINGS_PLANS" => Ok(Self::SavingsPlans),
            _ => Err(Error::InvalidParameter(format!(
                "{s} is invalid, valid values are COST_AND_USAGE, RESERVATIONS, SAVINGS_PLANS."
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASCENDING",
            Self::Descending => "DESCENDING",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASCENDING" | "ASC" => Ok(Self::Ascending),
            "DESCENDING" | "DESC" => Ok(Self::Descending),
            _ => Err(Error::InvalidParameter(format!(
                "{s} is invalid, valid values are ASCENDING, DESCENDING."
            ))),
        }
    }
}

/// Representation metric columns are converted to once all pages are read.
/// `String` keeps the API's literal amounts and their significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricsDtype {
    #[default]
    Float64,
    Int64,
    String,
}

impl MetricsDtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float64 => "float64",
            Self::Int64 => "int64",
            Self::String => "string",
        }
    }
}

impl fmt::Display for MetricsDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricsDtype {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "float64" | "float" => Ok(Self::Float64),
            "int64" | "int" => Ok(Self::Int64),
            "string" => Ok(Self::String),
            _ => Err(Error::InvalidParameter(format!(
                "{s} is invalid, valid values are float64, int64, string."
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granularity_parses_case_insensitively() {
        assert_eq!("daily".parse::<Granularity>().unwrap(), Granularity::Daily);
        assert_eq!("HOURLY".parse::<Granularity>().unwrap(), Granularity::Hourly);
        assert!("WEEKLY".parse::<Granularity>().is_err());
    }

    #[test]
    fn sort_order_displays_wire_name() {
        assert_eq!(SortOrder::Descending.to_string(), "DESCENDING");
        assert_eq!("asc".parse::<SortOrder>().unwrap().to_string(), "ASCENDING");
    }

    #[test]
    fn unknown_context_is_invalid_parameter() {
        let err = "LINKED".parse::<Context>().unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
        assert!(err.to_string().contains("COST_AND_USAGE"));
    }

    #[test]
    fn dtype_round_trips_through_display() {
        for dtype in [MetricsDtype::Float64, MetricsDtype::Int64, MetricsDtype::String] {
            assert_eq!(dtype.to_string().parse::<MetricsDtype>().unwrap(), dtype);
        }
    }
}
