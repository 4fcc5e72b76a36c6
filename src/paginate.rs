use serde_json::Value;

use crate::client::CostExplorer;
use crate::error::Result;
use crate::types::WireMap;

/// Field names the API has used for its continuation token, checked in this
/// order. Which one appears depends on the action.
pub const TOKEN_FIELDS: [&str; 2] = ["NextToken", "NextPageToken"];

/// Lazy sequence of response pages for one operation.
///
/// Each `next` performs at most one blocking call. A failed call is yielded
/// once and ends the sequence.
pub struct Pages<C> {
    client: C,
    operation: String,
    params: WireMap,
    page: usize,
    done: bool,
}

pub fn paginate<C: CostExplorer>(client: C, operation: &str, params: WireMap) -> Pages<C> {
    Pages {
        client,
        operation: operation.to_string(),
        params,
        page: 0,
        done: false,
    }
}

/// The continuation token of `page` as `(field, token)`, if any.
pub fn continuation(page: &WireMap) -> Option<(&'static str, Value)> {
    TOKEN_FIELDS.iter().find_map(|field| match page.get(*field) {
        Some(Value::Null) | None => None,
        Some(token) => Some((*field, token.clone())),
    })
}

impl<C: CostExplorer> Iterator for Pages<C> {
    type Item = Result<WireMap>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let response = match self.client.invoke(&self.operation, &self.params) {
            Ok(response) => response,
            Err(e) => {
                self.done = true;
                return Some(Err(e.into()));
            }
        };
        self.page += 1;

        match continuation(&response) {
            Some((field, token)) => {
                tracing::debug!(operation = %self.operation, page = self.page, field, "continuation token found");
                self.params.retain(|key, _| !TOKEN_FIELDS.contains(&key.as_str()));
                self.params.insert(field.to_string(), token);
            }
            None => {
                tracing::debug!(operation = %self.operation, page = self.page, "last page");
                self.done = true;
            }
        }
        Some(Ok(response))
    }
}
