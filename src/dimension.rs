use serde_json::Value;

use crate::client::CostExplorer;
use crate::error::{Error, Result};
use crate::paginate::paginate;
use crate::request::{DimensionValuesRequest, GET_DIMENSION_VALUES};
use crate::table::{Cell, Table};
use crate::types::Context;

const COST_AND_USAGE_DIMENSIONS: &[&str] = &[
    "AZ",
    "DATABASE_ENGINE",
    "INSTANCE_TYPE",
    "LEGAL_ENTITY_NAME",
    "LINKED_ACCOUNT",
    "OPERATING_SYSTEM",
    "OPERATION",
    "PLATFORM",
    "PURCHASE_TYPE",
    "SERVICE",
    "USAGE_TYPE",
    "USAGE_TYPE_GROUP",
    "REGION",
    "RECORD_TYPE",
    "RESOURCE_ID",
];

const RESERVATIONS_DIMENSIONS: &[&str] = &[
    "AZ",
    "CACHE_ENGINE",
    "DEPLOYMENT_OPTION",
    "INSTANCE_TYPE",
    "LINKED_ACCOUNT",
    "PLATFORM",
    "REGION",
    "SCOPE",
    "TAG",
    "TENANCY",
];

const SAVINGS_PLANS_DIMENSIONS: &[&str] = &[
    "SAVINGS_PLANS_TYPE",
    "PAYMENT_OPTION",
    "REGION",
    "INSTANCE_TYPE_FAMILY",
    "LINKED_ACCOUNT",
    "SAVINGS_PLAN_ARN",
];

/// Every dimension name the API knows, across all contexts.
const ALL_DIMENSIONS: &[&str] = &[
    "AZ",
    "INSTANCE_TYPE",
    "LINKED_ACCOUNT",
    "LINKED_ACCOUNT_NAME",
    "OPERATION",
    "PURCHASE_TYPE",
    "REGION",
    "SERVICE",
    "SERVICE_CODE",
    "USAGE_TYPE",
    "USAGE_TYPE_GROUP",
    "RECORD_TYPE",
    "OPERATING_SYSTEM",
    "TENANCY",
    "SCOPE",
    "PLATFORM",
    "SUBSCRIPTION_ID",
    "LEGAL_ENTITY_NAME",
    "DEPLOYMENT_OPTION",
    "DATABASE_ENGINE",
    "CACHE_ENGINE",
    "INSTANCE_TYPE_FAMILY",
    "BILLING_ENTITY",
    "RESERVATION_ID",
    "RESOURCE_ID",
    "RIGHTSIZING_TYPE",
    "SAVINGS_PLANS_TYPE",
    "SAVINGS_PLAN_ARN",
    "PAYMENT_OPTION",
    "AGREEMENT_END_DATE_TIME_AFTER",
    "AGREEMENT_END_DATE_TIME_BEFORE",
];

/// Dimensions that can be queried in `context`.
pub fn show_dimensions(context: Context) -> &'static [&'static str] {
    match context {
        Context::CostAndUsage => COST_AND_USAGE_DIMENSIONS,
        Context::Reservations => RESERVATIONS_DIMENSIONS,
        Context::SavingsPlans => SAVINGS_PLANS_DIMENSIONS,
    }
}

pub fn all_dimensions() -> &'static [&'static str] {
    ALL_DIMENSIONS
}

/// Values of one dimension over the request's period, as `dimension`/`value`
/// rows. Empty values are skipped.
pub fn get_dimension_values<C: CostExplorer>(
    client: C,
    request: &DimensionValuesRequest,
) -> Result<Table> {
    let params = request.build()?;
    let mut table = Table::new(["dimension", "value"]);
    for page in paginate(client, GET_DIMENSION_VALUES, params) {
        let page = page?;
        let values = page
            .get("DimensionValues")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedResponse("page has no DimensionValues list".into()))?;
        for entry in values {
            let value = entry.get("Value").and_then(Value::as_str).unwrap_or_default();
            if value.is_empty() {
                continue;
            }
            table.push_row(vec![
                Cell::Text(request.dimension.clone()),
                Cell::Text(value.to_string()),
            ]);
        }
    }
    tracing::info!(dimension = %request.dimension, values = table.len(), "fetched dimension values");
    Ok(table)
}
