//! Typed queries against the AWS Cost Explorer API.
//!
//! Build a request from small value types ([`TimePeriod`], [`Expression`],
//! [`GroupBy`], [`SortBy`]), run it through a [`CostExplorer`] client, and
//! get back one flat [`Table`] covering every response page.
//!
//! ```no_run
//! use cepan::{
//!     get_cost_and_usage, CostAndUsageRequest, Expression, Granularity, GroupBy,
//!     HttpClient, MetricsDtype, TimePeriod,
//! };
//! use chrono::NaiveDate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::from_env("us-east-1", None)?;
//! let period = TimePeriod::from_dates(
//!     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
//! )?;
//! let request = CostAndUsageRequest::new(period, Granularity::Daily)
//!     .metrics(["BlendedCost", "UsageQuantity"])
//!     .filter(Expression::not(Expression::dimensions("SERVICE", ["Amazon Athena"])?))
//!     .group_by(GroupBy::new().dimensions(["SERVICE", "AZ"]));
//! let table = get_cost_and_usage(&client, &request, MetricsDtype::Float64)?;
//! # Ok(())
//! # }
//! ```

pub mod alias;
pub mod client;
pub mod cost_and_usage;
pub mod dimension;
pub mod error;
pub mod filter;
pub mod flatten;
pub mod group_by;
pub mod paginate;
pub mod request;
pub mod sort_by;
pub mod table;
pub mod tag;
pub mod time_period;
pub mod types;

pub use alias::ServiceAliases;
pub use client::{ClientError, CostExplorer, HttpClient};
pub use cost_and_usage::get_cost_and_usage;
pub use dimension::{all_dimensions, get_dimension_values, show_dimensions};
pub use error::{Error, Result};
pub use filter::{Expression, Predicate, PredicateKind};
pub use flatten::{flatten_pages, FlatRow, Flattener};
pub use group_by::{GroupBy, GroupByArg};
pub use paginate::{paginate, Pages};
pub use request::{CostAndUsageRequest, DimensionValuesRequest, TagsRequest};
pub use sort_by::{SortBy, SortByArg};
pub use table::{Cell, Table};
pub use tag::get_tags;
pub use time_period::{TimePeriod, TimePeriodArg};
pub use types::{Context, Granularity, MetricsDtype, SortOrder, WireMap};
