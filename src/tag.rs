use serde_json::Value;

use crate::client::CostExplorer;
use crate::error::{Error, Result};
use crate::paginate::paginate;
use crate::request::{TagsRequest, GET_TAGS};
use crate::table::{Cell, Table};

/// Values of one tag key over the request's period, as `tag_key`/`value` rows.
pub fn get_tags<C: CostExplorer>(client: C, request: &TagsRequest) -> Result<Table> {
    let params = request.build()?;
    let mut table = Table::new(["tag_key", "value"]);
    for page in paginate(client, GET_TAGS, params) {
        let page = page?;
        let tags = page
            .get("Tags")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedResponse("page has no Tags list".into()))?;
        for tag in tags.iter().filter_map(Value::as_str).filter(|t| !t.is_empty()) {
            table.push_row(vec![
                Cell::Text(request.tag_key.clone()),
                Cell::Text(tag.to_string()),
            ]);
        }
    }
    tracing::info!(tag_key = %request.tag_key, values = table.len(), "fetched tag values");
    Ok(table)
}
