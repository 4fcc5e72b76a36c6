use std::collections::HashSet;

use serde_json::Value;

use crate::error::{Error, Result};
use crate::table::Table;
use crate::types::{MetricsDtype, WireMap};

pub const TIME_COLUMN: &str = "Time";

/// One output row as ordered `(column, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRow {
    cells: Vec<(String, String)>,
}

impl FlatRow {
    fn with_time(time: &str) -> Self {
        Self {
            cells: vec![(TIME_COLUMN.to_string(), time.to_string())],
        }
    }

    /// Set `column`, replacing an earlier value under the same name.
    pub fn set(&mut self, column: &str, value: &str) {
        match self.cells.iter_mut().find(|(c, _)| c == column) {
            Some((_, v)) => *v = value.to_string(),
            None => self.cells.push((column.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(c, v)| (c.as_str(), v.as_str()))
    }
}

/// Accumulates rows page by page. Group definitions stay in effect until a
/// later page replaces them.
#[derive(Debug, Default)]
pub struct Flattener {
    group_definitions: Vec<String>,
    group_columns: HashSet<String>,
    metric_columns: Vec<String>,
    rows: Vec<FlatRow>,
    pages: usize,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group definition keys currently applied to group rows.
    pub fn group_definitions(&self) -> &[String] {
        &self.group_definitions
    }

    /// Metric names seen so far, in first-seen order.
    pub fn metric_columns(&self) -> &[String] {
        &self.metric_columns
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn push_page(&mut self, page: &WireMap) -> Result<()> {
        self.pages += 1;
        match page.get("GroupDefinitions").filter(|d| !d.is_null()) {
            Some(definitions) => {
                self.group_definitions = parse_group_definitions(definitions)?;
                self.group_columns
                    .extend(self.group_definitions.iter().cloned());
            }
            None if !self.group_definitions.is_empty() => {
                tracing::debug!(
                    page = self.pages,
                    definitions = ?self.group_definitions,
                    "page has no GroupDefinitions, reusing previous"
                );
            }
            None => {}
        }

        let buckets = page
            .get("ResultsByTime")
            .and_then(Value::as_array)
            .ok_or_else(|| Error::MalformedResponse("page has no ResultsByTime list".into()))?;

        for bucket in buckets {
            self.push_bucket(bucket)?;
        }
        Ok(())
    }

    fn push_bucket(&mut self, bucket: &Value) -> Result<()> {
        let time = bucket
            .pointer("/TimePeriod/Start")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::MalformedResponse("time bucket has no TimePeriod.Start".into()))?;

        if let Some(total) = bucket.get("Total").and_then(Value::as_object) {
            if !total.is_empty() {
                let mut row = FlatRow::with_time(time);
                self.set_metrics(&mut row, total)?;
                self.rows.push(row);
            }
        }

        let groups = match bucket.get("Groups") {
            None | Some(Value::Null) => return Ok(()),
            Some(Value::Array(groups)) => groups,
            Some(_) => {
                return Err(Error::MalformedResponse(format!(
                    "Groups of bucket {time} is not a list"
                )))
            }
        };
        for group in groups {
            let mut row = FlatRow::with_time(time);
            let keys = group.get("Keys").and_then(Value::as_array);
            for (definition, key) in self
                .group_definitions
                .iter()
                .zip(keys.into_iter().flatten())
            {
                let key = key.as_str().ok_or_else(|| {
                    Error::MalformedResponse(format!("group key for {definition} is not a string"))
                })?;
                row.set(definition, key);
            }
            if let Some(metrics) = group.get("Metrics").and_then(Value::as_object) {
                self.set_metrics(&mut row, metrics)?;
            }
            self.rows.push(row);
        }
        Ok(())
    }

    fn set_metrics(&mut self, row: &mut FlatRow, metrics: &WireMap) -> Result<()> {
        for (name, detail) in metrics {
            let amount = detail
                .get("Amount")
                .and_then(Value::as_str)
                .ok_or_else(|| Error::MalformedResponse(format!("metric {name} has no Amount")))?;
            row.set(name, amount);
            if !self.metric_columns.iter().any(|m| m == name) {
                self.metric_columns.push(name.clone());
            }
        }
        Ok(())
    }

    /// Materialize the rows, converting metric columns to `dtype`.
    pub fn finish(self, dtype: MetricsDtype) -> Result<Table> {
        let mut table = Table::from_records(self.rows.iter().map(FlatRow::pairs));
        let numeric: Vec<String> = self
            .metric_columns
            .into_iter()
            .filter(|m| m != TIME_COLUMN && !self.group_columns.contains(m))
            .collect();
        table.convert_columns(&numeric, dtype)?;
        tracing::info!(
            pages = self.pages,
            rows = table.len(),
            columns = table.columns().len(),
            "flattened cost and usage response"
        );
        Ok(table)
    }
}

fn parse_group_definitions(definitions: &Value) -> Result<Vec<String>> {
    let list = definitions
        .as_array()
        .ok_or_else(|| Error::MalformedResponse("GroupDefinitions is not a list".into()))?;
    list.iter()
        .map(|d| {
            d.get("Key")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| Error::MalformedResponse("group definition has no Key".into()))
        })
        .collect()
}

/// Drain `pages` into a table. The first failing page aborts and discards
/// everything flattened so far.
pub fn flatten_pages<I>(pages: I, dtype: MetricsDtype) -> Result<Table>
where
    I: IntoIterator<Item = Result<WireMap>>,
{
    let mut flattener = Flattener::new();
    for page in pages {
        flattener.push_page(&page?)?;
    }
    flattener.finish(dtype)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use serde_json::json;

    fn page(value: Value) -> Result<WireMap> {
        Ok(value.as_object().unwrap().clone())
    }

    fn metric(amount: &str) -> Value {
        json!({"Amount": amount, "Unit": "USD"})
    }

    #[test]
    fn total_only_bucket_gives_one_row() {
        let pages = vec![page(json!({
            "GroupDefinitions": [],
            "ResultsByTime": [{
                "TimePeriod": {"Start": "2021-01-01", "End": "2021-02-01"},
                "Total": {"AmortizedCost": metric("1.0"), "BlendedCost": metric("1.1")},
                "Groups": [],
                "Estimated": false,
            }],
        }))];
        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.columns(), ["Time", "AmortizedCost", "BlendedCost"]);
        assert_eq!(table.get(0, "BlendedCost"), Some(&Cell::Float(1.1)));
    }

    #[test]
    fn grouped_buckets_give_one_row_per_group() {
        let bucket = |start: &str| {
            json!({
                "TimePeriod": {"Start": start, "End": "x"},
                "Total": {},
                "Groups": [
                    {"Keys": ["Amazon S3", "us-east-1"], "Metrics": {"BlendedCost": metric("1.0"), "UsageQuantity": metric("3")}},
                    {"Keys": ["AWS Lambda", "eu-west-1"], "Metrics": {"BlendedCost": metric("2.0"), "UsageQuantity": metric("4")}},
                ],
            })
        };
        let pages = vec![page(json!({
            "GroupDefinitions": [
                {"Type": "DIMENSION", "Key": "SERVICE"},
                {"Type": "DIMENSION", "Key": "REGION"},
            ],
            "ResultsByTime": [bucket("2021-01-01"), bucket("2021-01-02")],
        }))];

        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(
            table.columns(),
            ["Time", "SERVICE", "REGION", "BlendedCost", "UsageQuantity"]
        );
        assert_eq!(table.get(3, "Time").unwrap().as_str(), Some("2021-01-02"));
        assert_eq!(table.get(3, "SERVICE").unwrap().as_str(), Some("AWS Lambda"));
        assert_eq!(table.get(2, "REGION").unwrap().as_str(), Some("us-east-1"));
        assert_eq!(table.get(1, "UsageQuantity"), Some(&Cell::Float(4.0)));
    }

    #[test]
    fn total_row_precedes_group_rows() {
        let pages = vec![page(json!({
            "GroupDefinitions": [{"Type": "TAG", "Key": "Owner"}],
            "ResultsByTime": [{
                "TimePeriod": {"Start": "2021-01-01"},
                "Total": {"BlendedCost": metric("3.0")},
                "Groups": [{"Keys": ["Owner$alice"], "Metrics": {"BlendedCost": metric("3.0")}}],
            }],
        }))];
        let table = flatten_pages(pages, MetricsDtype::String).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get(0, "Owner").unwrap().is_null());
        assert_eq!(table.get(1, "Owner").unwrap().as_str(), Some("Owner$alice"));
    }

    #[test]
    fn empty_bucket_contributes_no_rows() {
        let pages = vec![page(json!({
            "ResultsByTime": [{"TimePeriod": {"Start": "2021-01-01"}, "Total": {}, "Groups": []}],
        }))];
        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn group_definitions_carry_forward_across_pages() {
        let pages = vec![
            page(json!({
                "GroupDefinitions": [{"Type": "DIMENSION", "Key": "SERVICE"}],
                "ResultsByTime": [{
                    "TimePeriod": {"Start": "2021-01-01"},
                    "Total": {},
                    "Groups": [{"Keys": ["Amazon S3"], "Metrics": {"BlendedCost": metric("1")}}],
                }],
                "NextPageToken": "t",
            })),
            page(json!({
                "ResultsByTime": [{
                    "TimePeriod": {"Start": "2021-01-02"},
                    "Total": {},
                    "Groups": [{"Keys": ["AWS Lambda"], "Metrics": {"BlendedCost": metric("2")}}],
                }],
            })),
        ];
        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert_eq!(table.columns(), ["Time", "SERVICE", "BlendedCost"]);
        assert_eq!(table.get(1, "SERVICE").unwrap().as_str(), Some("AWS Lambda"));
    }

    #[test]
    fn null_group_definitions_keep_previous_ones() {
        let pages = vec![
            page(json!({
                "GroupDefinitions": [{"Type": "DIMENSION", "Key": "SERVICE"}],
                "ResultsByTime": [{
                    "TimePeriod": {"Start": "2021-01-01"},
                    "Total": {},
                    "Groups": [{"Keys": ["Amazon S3"], "Metrics": {"BlendedCost": metric("1")}}],
                }],
                "NextPageToken": "t",
            })),
            page(json!({
                "GroupDefinitions": null,
                "ResultsByTime": [{
                    "TimePeriod": {"Start": "2021-01-02"},
                    "Total": {},
                    "Groups": [{"Keys": ["AWS Lambda"], "Metrics": {"BlendedCost": metric("2")}}],
                }],
            })),
        ];
        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert_eq!(table.columns(), ["Time", "SERVICE", "BlendedCost"]);
        assert_eq!(table.get(1, "SERVICE").unwrap().as_str(), Some("AWS Lambda"));
    }

    #[test]
    fn disjoint_metric_sets_fill_with_nulls() {
        let pages = vec![page(json!({
            "ResultsByTime": [
                {"TimePeriod": {"Start": "2021-01-01"}, "Total": {"BlendedCost": metric("1.0")}},
                {"TimePeriod": {"Start": "2021-01-02"}, "Total": {"UsageQuantity": metric("2.0")}},
            ],
        }))];
        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert_eq!(table.columns(), ["Time", "BlendedCost", "UsageQuantity"]);
        assert!(table.get(0, "UsageQuantity").unwrap().is_null());
        assert_eq!(table.get(1, "UsageQuantity"), Some(&Cell::Float(2.0)));
    }

    #[test]
    fn string_dtype_keeps_literal_amounts() {
        let pages = vec![page(json!({
            "ResultsByTime": [
                {"TimePeriod": {"Start": "2021-01-01"}, "Total": {"BlendedCost": metric("1.0")}},
                {"TimePeriod": {"Start": "2021-01-02"}, "Total": {"BlendedCost": metric("2.0")}},
            ],
        }))];
        let table = flatten_pages(pages, MetricsDtype::String).unwrap();
        let values: Vec<_> = table
            .column("BlendedCost")
            .unwrap()
            .into_iter()
            .map(|c| c.as_str().unwrap().to_string())
            .collect();
        assert_eq!(values, ["1.0", "2.0"]);
    }

    #[test]
    fn non_numeric_amount_fails_conversion() {
        let pages = vec![page(json!({
            "ResultsByTime": [{"TimePeriod": {"Start": "2021-01-01"}, "Total": {"BlendedCost": metric("n/a")}}],
        }))];
        let err = flatten_pages(pages, MetricsDtype::Float64).unwrap_err();
        assert!(matches!(err, Error::NumericConversion { ref column, .. } if column == "BlendedCost"));
    }

    #[test]
    fn group_key_columns_are_not_converted() {
        let pages = vec![page(json!({
            "GroupDefinitions": [{"Type": "DIMENSION", "Key": "LINKED_ACCOUNT"}],
            "ResultsByTime": [{
                "TimePeriod": {"Start": "2021-01-01"},
                "Groups": [{"Keys": ["123456789012"], "Metrics": {"BlendedCost": metric("5")}}],
            }],
        }))];
        let table = flatten_pages(pages, MetricsDtype::Float64).unwrap();
        assert_eq!(
            table.get(0, "LINKED_ACCOUNT").unwrap().as_str(),
            Some("123456789012")
        );
    }

    #[test]
    fn missing_results_is_malformed() {
        let err = flatten_pages(vec![page(json!({"GroupDefinitions": []}))], MetricsDtype::Float64)
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn failed_page_discards_partial_rows() {
        let pages = vec![
            page(json!({
                "ResultsByTime": [{"TimePeriod": {"Start": "2021-01-01"}, "Total": {"BlendedCost": metric("1")}}],
            })),
            Err(Error::Client(crate::client::ClientError::Other("boom".into()))),
        ];
        assert!(matches!(
            flatten_pages(pages, MetricsDtype::Float64),
            Err(Error::Client(_))
        ));
    }

    #[test]
    fn flattener_exposes_rows_incrementally() {
        let mut flattener = Flattener::new();
        flattener
            .push_page(
                &page(json!({
                    "GroupDefinitions": [{"Type": "DIMENSION", "Key": "AZ"}],
                    "ResultsByTime": [{
                        "TimePeriod": {"Start": "2021-01-01"},
                        "Groups": [{"Keys": ["us-east-1a", "ignored"], "Metrics": {"BlendedCost": metric("1")}}],
                    }],
                }))
                .unwrap(),
            )
            .unwrap();
        assert_eq!(flattener.group_definitions(), ["AZ"]);
        assert_eq!(flattener.metric_columns(), ["BlendedCost"]);
        let row = &flattener.rows()[0];
        assert_eq!(row.get("AZ"), Some("us-east-1a"));
        assert_eq!(row.columns().collect::<Vec<_>>(), ["Time", "AZ", "BlendedCost"]);
    }
}
