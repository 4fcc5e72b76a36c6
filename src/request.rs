use serde_json::Value;

use crate::error::{Error, Result};
use crate::filter::Expression;
use crate::group_by::GroupByArg;
use crate::sort_by::{build_sort_by, SortByArg};
use crate::time_period::TimePeriodArg;
use crate::types::{Context, Granularity, WireMap};

pub const GET_COST_AND_USAGE: &str = "GetCostAndUsage";
pub const GET_DIMENSION_VALUES: &str = "GetDimensionValues";
pub const GET_TAGS: &str = "GetTags";

pub const DEFAULT_METRIC: &str = "UnblendedCost";

fn strings(values: &[String]) -> Value {
    Value::Array(values.iter().cloned().map(Value::String).collect())
}

fn maps(values: Vec<WireMap>) -> Value {
    Value::Array(values.into_iter().map(Value::Object).collect())
}

fn insert_filter(params: &mut WireMap, filter: Option<&Expression>) {
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        params.insert("Filter".into(), Value::Object(filter.build_expression()));
    }
}

fn insert_search(params: &mut WireMap, search_string: Option<&str>) {
    if let Some(search) = search_string.filter(|s| !s.is_empty()) {
        params.insert("SearchString".into(), Value::String(search.to_string()));
    }
}

fn insert_paging(params: &mut WireMap, sort_by: &[SortByArg], max_results: Option<u32>) {
    if !sort_by.is_empty() {
        params.insert("SortBy".into(), maps(build_sort_by(sort_by)));
    }
    if let Some(max) = max_results.filter(|m| *m > 0) {
        params.insert("MaxResults".into(), Value::from(max));
    }
}

/// Parameters for `GetCostAndUsage`.
#[derive(Debug, Clone)]
pub struct CostAndUsageRequest {
    pub time_period: TimePeriodArg,
    pub granularity: Granularity,
    pub metrics: Vec<String>,
    pub filter: Option<Expression>,
    pub group_by: Option<GroupByArg>,
}

impl CostAndUsageRequest {
    pub fn new(time_period: impl Into<TimePeriodArg>, granularity: Granularity) -> Self {
        Self {
            time_period: time_period.into(),
            granularity,
            metrics: vec![DEFAULT_METRIC.to_string()],
            filter: None,
            group_by: None,
        }
    }

    pub fn metrics<I, V>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.metrics = metrics.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: impl Into<Expression>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn group_by(mut self, group_by: impl Into<GroupByArg>) -> Self {
        self.group_by = Some(group_by.into());
        self
    }

    /// Fails with [`Error::UnsupportedGranularity`] for hourly queries.
    pub fn build(&self) -> Result<WireMap> {
        if self.granularity == Granularity::Hourly {
            return Err(Error::UnsupportedGranularity(
                self.granularity.as_str().to_string(),
            ));
        }
        if self.metrics.is_empty() {
            return Err(Error::InvalidParameter(
                "at least one metric is required".into(),
            ));
        }

        let mut params = WireMap::new();
        params.insert(
            "TimePeriod".into(),
            Value::Object(self.time_period.build(false)),
        );
        params.insert(
            "Granularity".into(),
            Value::String(self.granularity.as_str().into()),
        );
        params.insert("Metrics".into(), strings(&self.metrics));
        insert_filter(&mut params, self.filter.as_ref());
        if let Some(group_by) = self.group_by.as_ref().filter(|g| !g.is_empty()) {
            params.insert("GroupBy".into(), maps(group_by.build()));
        }
        Ok(params)
    }
}

/// Parameters for `GetDimensionValues`.
#[derive(Debug, Clone)]
pub struct DimensionValuesRequest {
    pub time_period: TimePeriodArg,
    pub dimension: String,
    pub search_string: Option<String>,
    pub context: Option<Context>,
    pub filter: Option<Expression>,
    pub sort_by: Vec<SortByArg>,
    pub max_results: Option<u32>,
}

impl DimensionValuesRequest {
    pub fn new(time_period: impl Into<TimePeriodArg>, dimension: impl Into<String>) -> Self {
        Self {
            time_period: time_period.into(),
            dimension: dimension.into(),
            search_string: None,
            context: None,
            filter: None,
            sort_by: Vec::new(),
            max_results: None,
        }
    }

    pub fn search(mut self, search_string: impl Into<String>) -> Self {
        self.search_string = Some(search_string.into());
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn filter(mut self, filter: impl Into<Expression>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn sort_by(mut self, sort: impl Into<SortByArg>) -> Self {
        self.sort_by.push(sort.into());
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn build(&self) -> Result<WireMap> {
        if self.dimension.is_empty() {
            return Err(Error::InvalidParameter("dimension must not be empty".into()));
        }
        let mut params = WireMap::new();
        params.insert(
            "TimePeriod".into(),
            Value::Object(self.time_period.build(false)),
        );
        params.insert("Dimension".into(), Value::String(self.dimension.clone()));
        insert_search(&mut params, self.search_string.as_deref());
        if let Some(context) = self.context {
            params.insert("Context".into(), Value::String(context.as_str().into()));
        }
        insert_filter(&mut params, self.filter.as_ref());
        insert_paging(&mut params, &self.sort_by, self.max_results);
        Ok(params)
    }
}

/// Parameters for `GetTags`.
#[derive(Debug, Clone)]
pub struct TagsRequest {
    pub time_period: TimePeriodArg,
    pub tag_key: String,
    pub search_string: Option<String>,
    pub filter: Option<Expression>,
    pub sort_by: Vec<SortByArg>,
    pub max_results: Option<u32>,
}

impl TagsRequest {
    pub fn new(time_period: impl Into<TimePeriodArg>, tag_key: impl Into<String>) -> Self {
        Self {
            time_period: time_period.into(),
            tag_key: tag_key.into(),
            search_string: None,
            filter: None,
            sort_by: Vec::new(),
            max_results: None,
        }
    }

    pub fn search(mut self, search_string: impl Into<String>) -> Self {
        self.search_string = Some(search_string.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<Expression>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn sort_by(mut self, sort: impl Into<SortByArg>) -> Self {
        self.sort_by.push(sort.into());
        self
    }

    pub fn max_results(mut self, max: u32) -> Self {
        self.max_results = Some(max);
        self
    }

    pub fn build(&self) -> Result<WireMap> {
        let mut params = WireMap::new();
        params.insert(
            "TimePeriod".into(),
            Value::Object(self.time_period.build(false)),
        );
        params.insert("TagKey".into(), Value::String(self.tag_key.clone()));
        insert_search(&mut params, self.search_string.as_deref());
        insert_filter(&mut params, self.filter.as_ref());
        insert_paging(&mut params, &self.sort_by, self.max_results);
        Ok(params)
    }
}
