use crate::client::CostExplorer;
use crate::error::Result;
use crate::flatten::flatten_pages;
use crate::paginate::paginate;
use crate::request::{CostAndUsageRequest, GET_COST_AND_USAGE};
use crate::table::Table;
use crate::types::MetricsDtype;

/// Run a cost and usage query and flatten every page into one table.
///
/// Columns are `Time`, one per group definition key, and one per metric.
/// Metric columns are converted to `dtype` after the last page is read.
pub fn get_cost_and_usage<C: CostExplorer>(
    client: C,
    request: &CostAndUsageRequest,
    dtype: MetricsDtype,
) -> Result<Table> {
    let params = request.build()?;
    tracing::debug!(granularity = %request.granularity, metrics = ?request.metrics, "querying cost and usage");
    flatten_pages(paginate(client, GET_COST_AND_USAGE, params), dtype)
}
