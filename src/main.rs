mod cli;
mod config;
mod output;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cepan::{
    all_dimensions, get_cost_and_usage, get_dimension_values, get_tags, show_dimensions, Cell,
    CostAndUsageRequest, DimensionValuesRequest, Expression, Granularity, GroupBy, HttpClient,
    MetricsDtype, ServiceAliases, Table, TagsRequest, TimePeriod,
};

use cli::{Cli, Command, KeyValues, PeriodArgs};
use config::Config;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = match std::env::var("RUST_LOG") {
        Ok(env) => EnvFilter::try_new(env).unwrap_or_else(|_| EnvFilter::new(level)),
        Err(_) => EnvFilter::new(format!("{level},ureq=warn,rustls=warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn time_period(period: &PeriodArgs) -> Result<TimePeriod> {
    Ok(TimePeriod::from_dates(period.start, period.end_or_today())?)
}

fn client(cli: &Cli, config: &Config) -> Result<HttpClient> {
    let region = cli.region.as_deref().unwrap_or(config.region());
    let endpoint = cli.endpoint.clone().or_else(|| config.endpoint.clone());
    HttpClient::from_env(region, endpoint).context("Failed to set up Cost Explorer client")
}

/// AND together every filter given on the command line.
fn build_filter(
    aliases: &ServiceAliases,
    services: &[String],
    exclude_services: &[String],
    dimensions: &[KeyValues],
    tags: &[KeyValues],
    cost_categories: &[KeyValues],
) -> Result<Option<Expression>> {
    let mut parts = Vec::new();
    if !services.is_empty() {
        parts.push(Expression::services(services, aliases)?);
    }
    if !exclude_services.is_empty() {
        parts.push(Expression::not(Expression::services(exclude_services, aliases)?));
    }
    for kv in dimensions {
        parts.push(Expression::dimensions(&kv.key, &kv.values)?);
    }
    for kv in tags {
        parts.push(Expression::tags(&kv.key, &kv.values)?);
    }
    for kv in cost_categories {
        parts.push(Expression::cost_categories(&kv.key, &kv.values)?);
    }
    Ok(match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(Expression::and(parts)),
    })
}

fn run(cli: &Cli, config: &Config) -> Result<Table> {
    match &cli.command {
        Command::Cost {
            period,
            granularity,
            metrics,
            group_dimensions,
            group_tags,
            group_cost_categories,
            services,
            exclude_services,
            dimensions,
            tags,
            cost_categories,
            dtype,
        } => {
            let aliases = ServiceAliases::new();
            let granularity = granularity
                .map(Granularity::from)
                .or(config.granularity)
                .unwrap_or(Granularity::Monthly);
            let mut request = CostAndUsageRequest::new(time_period(period)?, granularity);
            if !metrics.is_empty() {
                request = request.metrics(metrics);
            } else if let Some(metrics) = &config.metrics {
                request = request.metrics(metrics);
            }
            if let Some(filter) = build_filter(
                &aliases,
                services,
                exclude_services,
                dimensions,
                tags,
                cost_categories,
            )? {
                request = request.filter(filter);
            }
            let group_by = GroupBy::new()
                .dimensions(group_dimensions)
                .tags(group_tags)
                .cost_categories(group_cost_categories);
            if !group_by.is_empty() {
                request = request.group_by(group_by);
            }
            let dtype = dtype
                .map(MetricsDtype::from)
                .or(config.metrics_dtype)
                .unwrap_or_default();

            let client = client(cli, config)?;
            get_cost_and_usage(&client, &request, dtype).context("Cost and usage query failed")
        }
        Command::Dimensions { context, all } => {
            let names = if *all {
                all_dimensions()
            } else {
                show_dimensions((*context).into())
            };
            let mut table = Table::new(["dimensions"]);
            for name in names {
                table.push_row(vec![Cell::Text(name.to_string())]);
            }
            Ok(table)
        }
        Command::DimensionValues {
            dimension,
            period,
            search,
            context,
            max_results,
        } => {
            let mut request = DimensionValuesRequest::new(time_period(period)?, dimension);
            if let Some(search) = search {
                request = request.search(search);
            }
            if let Some(context) = context {
                request = request.context((*context).into());
            }
            if let Some(max) = max_results {
                request = request.max_results(*max);
            }
            let client = client(cli, config)?;
            get_dimension_values(&client, &request).context("Dimension value lookup failed")
        }
        Command::Tags {
            tag_key,
            period,
            search,
            max_results,
        } => {
            let mut request = TagsRequest::new(time_period(period)?, tag_key);
            if let Some(search) = search {
                request = request.search(search);
            }
            if let Some(max) = max_results {
                request = request.max_results(*max);
            }
            let client = client(cli, config)?;
            get_tags(&client, &request).context("Tag lookup failed")
        }
        Command::Aliases => Ok(ServiceAliases::new().list_aliases()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::load_config();
    let table = run(&cli, &config)?;

    if table.is_empty() {
        eprintln!("No results.");
        return Ok(());
    }

    match cli.format {
        cli::OutputFormat::Json => output::print_json(&table)?,
        cli::OutputFormat::Table => output::print_table(&table),
    }

    Ok(())
}
