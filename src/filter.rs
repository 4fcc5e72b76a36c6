use serde_json::Value;

use crate::alias::ServiceAliases;
use crate::error::{Error, Result};
use crate::types::WireMap;

/// What a predicate's key refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateKind {
    Dimension,
    Tag,
    CostCategory,
}

impl PredicateKind {
    /// Field name the predicate is nested under on the wire.
    pub fn wire_tag(&self) -> &'static str {
        match self {
            Self::Dimension => "Dimensions",
            Self::Tag => "Tags",
            Self::CostCategory => "CostCategories",
        }
    }
}

/// Match on `key` having one of `values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    kind: PredicateKind,
    key: String,
    values: Vec<String>,
    match_options: Vec<String>,
}

impl Predicate {
    pub fn new<K, I, V>(kind: PredicateKind, key: K, values: I) -> Result<Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        let mut deduped: Vec<String> = Vec::new();
        for value in values {
            let value = value.into();
            if !deduped.contains(&value) {
                deduped.push(value);
            }
        }
        if deduped.is_empty() {
            return Err(Error::InvalidParameter(format!(
                "filter on '{key}' needs at least one value"
            )));
        }
        Ok(Self {
            kind,
            key,
            values: deduped,
            match_options: Vec::new(),
        })
    }

    /// Set `MatchOptions`, e.g. `EQUALS` or `CASE_INSENSITIVE`.
    pub fn with_match_options<I, V>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.match_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Replace each value with its canonical service name.
    pub fn with_resolved_services(mut self, aliases: &ServiceAliases) -> Self {
        let mut resolved: Vec<String> = Vec::with_capacity(self.values.len());
        for value in &self.values {
            let name = aliases.resolve(value).to_string();
            if !resolved.contains(&name) {
                resolved.push(name);
            }
        }
        self.values = resolved;
        self
    }

    pub fn kind(&self) -> PredicateKind {
        self.kind
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    fn build_body(&self) -> WireMap {
        let mut body = WireMap::new();
        body.insert("Key".into(), Value::String(self.key.clone()));
        body.insert(
            "Values".into(),
            Value::Array(self.values.iter().cloned().map(Value::String).collect()),
        );
        if !self.match_options.is_empty() {
            body.insert(
                "MatchOptions".into(),
                Value::Array(
                    self.match_options
                        .iter()
                        .cloned()
                        .map(Value::String)
                        .collect(),
                ),
            );
        }
        body
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Predicate(Predicate),
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Not(Box<Expression>),
    /// A wire mapping used verbatim.
    Raw(WireMap),
}

impl Expression {
    pub fn dimensions<I, V>(key: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Predicate::new(PredicateKind::Dimension, key, values).map(Self::Predicate)
    }

    pub fn tags<I, V>(key: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Predicate::new(PredicateKind::Tag, key, values).map(Self::Predicate)
    }

    pub fn cost_categories<I, V>(key: impl Into<String>, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Predicate::new(PredicateKind::CostCategory, key, values).map(Self::Predicate)
    }

    /// `SERVICE` dimension predicate with aliases resolved to canonical names.
    pub fn services<I, V>(values: I, aliases: &ServiceAliases) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Predicate::new(PredicateKind::Dimension, "SERVICE", values)
            .map(|p| Self::Predicate(p.with_resolved_services(aliases)))
    }

    pub fn and(children: impl IntoIterator<Item = Expression>) -> Self {
        Self::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Expression>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(child: Expression) -> Self {
        Self::Not(Box::new(child))
    }

    pub fn build_expression(&self) -> WireMap {
        let mut expr = WireMap::new();
        match self {
            Self::Predicate(p) => {
                expr.insert(p.kind.wire_tag().into(), Value::Object(p.build_body()));
            }
            Self::And(children) => {
                expr.insert("And".into(), build_children(children));
            }
            Self::Or(children) => {
                expr.insert("Or".into(), build_children(children));
            }
            Self::Not(child) => {
                expr.insert("Not".into(), Value::Object(child.build_expression()));
            }
            Self::Raw(raw) => return raw.clone(),
        }
        expr
    }

    /// Whether this expression would add anything to a request.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Raw(raw) if raw.is_empty())
    }
}

fn build_children(children: &[Expression]) -> Value {
    Value::Array(
        children
            .iter()
            .map(|c| Value::Object(c.build_expression()))
            .collect(),
    )
}

impl From<Predicate> for Expression {
    fn from(p: Predicate) -> Self {
        Self::Predicate(p)
    }
}

impl From<WireMap> for Expression {
    fn from(raw: WireMap) -> Self {
        Self::Raw(raw)
    }
}
