//! Test utilities for entity sources.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{EntityLookupError, EntitySource};

/// Stub [`EntitySource`] serving in-memory documents.
///
/// Unknown ids answer with a 404 status. Every requested id is recorded so
/// tests can assert on caching.
#[derive(Debug, Default)]
pub struct StubEntitySource {
    documents: HashMap<String, StubEntity>,
    requests: RefCell<Vec<String>>,
}

#[derive(Debug, Clone)]
enum StubEntity {
    Document(Value),
    Status(u16),
}

impl StubEntitySource {
    /// Create a source that knows no entities.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a document whose first P18 claim names `file_name`.
    #[must_use]
    pub fn with_image(self, entity_id: &str, file_name: &str) -> Self {
        self.with_document(entity_id, image_document(entity_id, file_name))
    }

    /// Serve `document` verbatim for `entity_id`.
    #[must_use]
    pub fn with_document(mut self, entity_id: &str, document: Value) -> Self {
        self.documents
            .insert(entity_id.to_owned(), StubEntity::Document(document));
        self
    }

    /// Answer requests for `entity_id` with `status`.
    #[must_use]
    pub fn with_status(mut self, entity_id: &str, status: u16) -> Self {
        self.documents
            .insert(entity_id.to_owned(), StubEntity::Status(status));
        self
    }

    /// Ids requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Number of requests served so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }
}

/// Build a minimal entity document carrying one P18 claim.
#[must_use]
pub fn image_document(entity_id: &str, file_name: &str) -> Value {
    json!({
        "entities": {
            entity_id: {
                "id": entity_id,
                "claims": {
                    "P18": [
                        {"mainsnak": {"snaktype": "value", "property": "P18",
                            "datavalue": {"value": file_name, "type": "string"}}}
                    ]
                }
            }
        }
    })
}

#[async_trait(?Send)]
impl EntitySource for StubEntitySource {
    async fn fetch_entity(&self, entity_id: &str) -> Result<Value, EntityLookupError> {
        self.requests.borrow_mut().push(entity_id.to_owned());
        let url = format!("https://wikidata.invalid/wiki/Special:EntityData/{entity_id}.json");
        match self.documents.get(entity_id) {
            Some(StubEntity::Document(document)) => Ok(document.clone()),
            Some(StubEntity::Status(status)) => Err(EntityLookupError::Status {
                url,
                status: *status,
            }),
            None => Err(EntityLookupError::Status { url, status: 404 }),
        }
    }
}
