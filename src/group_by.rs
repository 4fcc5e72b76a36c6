use serde_json::Value;

use crate::types::WireMap;

/// Grouping keys for a cost query.
///
/// Built output is always dimensions, then tags, then cost categories. The
/// response reports group keys positionally in this same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupBy {
    pub dimensions: Vec<String>,
    pub tags: Vec<String>,
    pub cost_categories: Vec<String>,
}

impl GroupBy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimensions<I, V>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.dimensions.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn tags<I, V>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.tags.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn cost_categories<I, V>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.cost_categories
            .extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty() && self.tags.is_empty() && self.cost_categories.is_empty()
    }

    pub fn build(&self) -> Vec<WireMap> {
        let typed = [
            ("DIMENSION", &self.dimensions),
            ("TAG", &self.tags),
            ("COST_CATEGORY", &self.cost_categories),
        ];
        typed
            .into_iter()
            .flat_map(|(kind, keys)| keys.iter().map(move |key| group_definition(kind, key)))
            .collect()
    }
}

fn group_definition(kind: &str, key: &str) -> WireMap {
    let mut definition = WireMap::new();
    definition.insert("Type".into(), Value::String(kind.to_string()));
    definition.insert("Key".into(), Value::String(key.to_string()));
    definition
}

/// Grouping given either as a [`GroupBy`] or as ready wire descriptors.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupByArg {
    Structured(GroupBy),
    Raw(Vec<WireMap>),
}

impl GroupByArg {
    pub fn build(&self) -> Vec<WireMap> {
        match self {
            Self::Structured(group_by) => group_by.build(),
            Self::Raw(raw) => raw.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Structured(group_by) => group_by.is_empty(),
            Self::Raw(raw) => raw.is_empty(),
        }
    }
}

impl From<GroupBy> for GroupByArg {
    fn from(group_by: GroupBy) -> Self {
        Self::Structured(group_by)
    }
}

impl From<Vec<WireMap>> for GroupByArg {
    fn from(raw: Vec<WireMap>) -> Self {
        Self::Raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn built(group_by: &GroupBy) -> Value {
        Value::Array(group_by.build().into_iter().map(Value::Object).collect())
    }

    #[rstest]
    #[case(&["val1", "val2"], &[], &[], json!([
        {"Type": "DIMENSION", "Key": "val1"},
        {"Type": "DIMENSION", "Key": "val2"},
    ]))]
    #[case(&["val1"], &["val2"], &[], json!([
        {"Type": "DIMENSION", "Key": "val1"},
        {"Type": "TAG", "Key": "val2"},
    ]))]
    #[case(&[], &["val1", "val2"], &[], json!([
        {"Type": "TAG", "Key": "val1"},
        {"Type": "TAG", "Key": "val2"},
    ]))]
    #[case(&[], &["val1"], &["val2"], json!([
        {"Type": "TAG", "Key": "val1"},
        {"Type": "COST_CATEGORY", "Key": "val2"},
    ]))]
    #[case(&[], &[], &["val1", "val2"], json!([
        {"Type": "COST_CATEGORY", "Key": "val1"},
        {"Type": "COST_CATEGORY", "Key": "val2"},
    ]))]
    #[case(&["val2"], &[], &["val1"], json!([
        {"Type": "DIMENSION", "Key": "val2"},
        {"Type": "COST_CATEGORY", "Key": "val1"},
    ]))]
    fn builds_in_fixed_kind_order(
        #[case] dimensions: &[&str],
        #[case] tags: &[&str],
        #[case] cost_categories: &[&str],
        #[case] expected: Value,
    ) {
        let group_by = GroupBy::new()
            .dimensions(dimensions.iter().copied())
            .tags(tags.iter().copied())
            .cost_categories(cost_categories.iter().copied());
        assert_eq!(built(&group_by), expected);
    }

    #[test]
    fn builder_call_order_does_not_matter() {
        let group_by = GroupBy::new()
            .cost_categories(["team"])
            .tags(["Owner"])
            .dimensions(["SERVICE"]);
        assert_eq!(
            built(&group_by),
            json!([
                {"Type": "DIMENSION", "Key": "SERVICE"},
                {"Type": "TAG", "Key": "Owner"},
                {"Type": "COST_CATEGORY", "Key": "team"},
            ])
        );
    }

    #[test]
    fn empty_group_by_builds_nothing() {
        assert!(GroupBy::new().build().is_empty());
        assert!(GroupByArg::from(GroupBy::new()).is_empty());
    }

    #[test]
    fn raw_descriptors_pass_through() {
        let raw = vec![json!({"Type": "DIMENSION", "Key": "AZ"})
            .as_object()
            .unwrap()
            .clone()];
        assert_eq!(GroupByArg::from(raw.clone()).build(), raw);
    }
}
