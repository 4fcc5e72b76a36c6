use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value;

use super::{ClientError, CostExplorer};
use crate::types::WireMap;

/// Replays canned responses in order and records every call it receives.
#[derive(Default)]
pub(crate) struct MockClient {
    responses: RefCell<VecDeque<Result<WireMap, ClientError>>>,
    calls: RefCell<Vec<(String, WireMap)>>,
}

impl MockClient {
    pub fn with_pages(pages: impl IntoIterator<Item = Value>) -> Self {
        let client = Self::default();
        for page in pages {
            client.push(page);
        }
        client
    }

    pub fn push(&self, page: Value) {
        let Value::Object(map) = page else {
            panic!("mock page must be a JSON object");
        };
        self.responses.borrow_mut().push_back(Ok(map));
    }

    pub fn push_error(&self, err: ClientError) {
        self.responses.borrow_mut().push_back(Err(err));
    }

    pub fn calls(&self) -> Vec<(String, WireMap)> {
        self.calls.borrow().clone()
    }
}

impl CostExplorer for MockClient {
    fn invoke(&self, operation: &str, params: &WireMap) -> Result<WireMap, ClientError> {
        self.calls
            .borrow_mut()
            .push((operation.to_string(), params.clone()));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Other("no more mock responses".into())))
    }
}
