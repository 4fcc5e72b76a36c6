use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use cepan::{Context, Granularity, MetricsDtype};

#[derive(Parser, Debug)]
#[command(
    name = "cepan",
    about = "Query AWS Cost Explorer and print the results as a table"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format: table (default), json
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// AWS region used for signing and the default endpoint
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Override the Cost Explorer endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Start/end of the queried window.
#[derive(clap::Args, Debug, Clone)]
pub struct PeriodArgs {
    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD), exclusive. Defaults to today.
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl PeriodArgs {
    pub fn end_or_today(&self) -> NaiveDate {
        self.end
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

/// `KEY=VALUE[,VALUE...]` filter argument.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValues {
    pub key: String,
    pub values: Vec<String>,
}

pub fn parse_key_values(raw: &str) -> Result<KeyValues, String> {
    let (key, values) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE[,VALUE...], got '{raw}'"))?;
    let values: Vec<String> = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    if key.trim().is_empty() || values.is_empty() {
        return Err(format!("expected KEY=VALUE[,VALUE...], got '{raw}'"));
    }
    Ok(KeyValues {
        key: key.trim().to_string(),
        values,
    })
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cost and usage over time, optionally filtered and grouped
    Cost {
        #[command(flatten)]
        period: PeriodArgs,

        /// Time bucket width
        #[arg(long)]
        granularity: Option<GranularityArg>,

        /// Metric to return (repeatable), e.g. BlendedCost, UsageQuantity
        #[arg(long = "metric")]
        metrics: Vec<String>,

        /// Group by a dimension (repeatable)
        #[arg(long = "group-by-dimension")]
        group_dimensions: Vec<String>,

        /// Group by a tag key (repeatable)
        #[arg(long = "group-by-tag")]
        group_tags: Vec<String>,

        /// Group by a cost category (repeatable)
        #[arg(long = "group-by-cost-category")]
        group_cost_categories: Vec<String>,

        /// Only include these services; short names like EC2 or S3 are accepted (repeatable)
        #[arg(long = "service")]
        services: Vec<String>,

        /// Exclude these services (repeatable)
        #[arg(long = "exclude-service")]
        exclude_services: Vec<String>,

        /// Dimension filter KEY=VALUE[,VALUE...] (repeatable)
        #[arg(long = "dimension", value_parser = parse_key_values)]
        dimensions: Vec<KeyValues>,

        /// Tag filter KEY=VALUE[,VALUE...] (repeatable)
        #[arg(long = "tag", value_parser = parse_key_values)]
        tags: Vec<KeyValues>,

        /// Cost category filter KEY=VALUE[,VALUE...] (repeatable)
        #[arg(long = "cost-category", value_parser = parse_key_values)]
        cost_categories: Vec<KeyValues>,

        /// Representation of metric columns
        #[arg(long)]
        dtype: Option<DtypeArg>,
    },
    /// List known dimension names
    Dimensions {
        /// Dimension catalogue to show
        #[arg(long, default_value = "cost-and-usage")]
        context: ContextArg,

        /// Show every dimension regardless of context
        #[arg(long)]
        all: bool,
    },
    /// Values a dimension takes over a period
    DimensionValues {
        /// Dimension name, e.g. SERVICE, REGION, AZ
        dimension: String,

        #[command(flatten)]
        period: PeriodArgs,

        /// Only return values containing this string
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        context: Option<ContextArg>,

        /// Page size requested from the API
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Values a tag key takes over a period
    Tags {
        tag_key: String,

        #[command(flatten)]
        period: PeriodArgs,

        /// Only return values containing this string
        #[arg(long)]
        search: Option<String>,

        /// Page size requested from the API
        #[arg(long)]
        max_results: Option<u32>,
    },
    /// Show service name aliases accepted by --service
    Aliases,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum GranularityArg {
    Daily,
    Monthly,
    Hourly,
}

impl From<GranularityArg> for Granularity {
    fn from(arg: GranularityArg) -> Self {
        match arg {
            GranularityArg::Daily => Granularity::Daily,
            GranularityArg::Monthly => Granularity::Monthly,
            GranularityArg::Hourly => Granularity::Hourly,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum ContextArg {
    CostAndUsage,
    Reservations,
    SavingsPlans,
}

impl From<ContextArg> for Context {
    fn from(arg: ContextArg) -> Self {
        match arg {
            ContextArg::CostAndUsage => Context::CostAndUsage,
            ContextArg::Reservations => Context::Reservations,
            ContextArg::SavingsPlans => Context::SavingsPlans,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum DtypeArg {
    Float64,
    Int64,
    String,
}

impl From<DtypeArg> for MetricsDtype {
    fn from(arg: DtypeArg) -> Self {
        match arg {
            DtypeArg::Float64 => MetricsDtype::Float64,
            DtypeArg::Int64 => MetricsDtype::Int64,
            DtypeArg::String => MetricsDtype::String,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}
