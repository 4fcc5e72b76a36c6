use serde_json::Value;

use crate::types::{SortOrder, WireMap};

/// Sort key for dimension and tag value lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortBy {
    pub key: String,
    pub order: Option<SortOrder>,
}

impl SortBy {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: None,
        }
    }

    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: Some(SortOrder::Ascending),
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            order: Some(SortOrder::Descending),
        }
    }

    pub fn build(&self) -> WireMap {
        let mut sort = WireMap::new();
        sort.insert("Key".into(), Value::String(self.key.clone()));
        if let Some(order) = self.order {
            sort.insert("SortOrder".into(), Value::String(order.as_str().into()));
        }
        sort
    }
}

/// One entry of a sort list; structured and raw entries can be mixed.
#[derive(Debug, Clone, PartialEq)]
pub enum SortByArg {
    Structured(SortBy),
    Raw(WireMap),
}

impl From<SortBy> for SortByArg {
    fn from(sort: SortBy) -> Self {
        Self::Structured(sort)
    }
}

impl From<WireMap> for SortByArg {
    fn from(raw: WireMap) -> Self {
        Self::Raw(raw)
    }
}

pub fn build_sort_by(entries: &[SortByArg]) -> Vec<WireMap> {
    entries
        .iter()
        .map(|entry| match entry {
            SortByArg::Structured(sort) => sort.build(),
            SortByArg::Raw(raw) => raw.clone(),
        })
        .collect()
}
