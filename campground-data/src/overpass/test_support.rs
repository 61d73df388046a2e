//! Test utilities for element sources.
//!
//! [`StubElementSource`] returns canned elements or a canned failure without
//! touching the network.

use std::cell::Cell;

use async_trait::async_trait;
use campground_core::RawElement;

use super::{ElementSource, OverpassError};

const STUB_ENDPOINT: &str = "https://overpass.invalid/api/interpreter";

/// Stub [`ElementSource`] for testing.
///
/// # Example
///
/// ```
/// use campground_core::{RawElement, Tags};
/// use campground_data::overpass::ElementSource;
/// use campground_data::overpass::test_support::StubElementSource;
/// use campground_data::test_support::block_on_for_tests;
///
/// let source = StubElementSource::with_elements(vec![RawElement::node(
///     139.7,
///     35.6,
///     Tags::from([("name", "Okutama")]),
/// )]);
/// let elements = block_on_for_tests(source.fetch_elements()).expect("stub succeeds");
///
/// assert_eq!(elements.len(), 1);
/// assert_eq!(source.calls(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct StubElementSource {
    response: StubResponse,
    calls: Cell<usize>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Elements(Vec<RawElement>),
    Status { status: u16, body: String },
}

impl StubElementSource {
    /// Create a source that returns `elements`.
    #[must_use]
    pub fn with_elements(elements: Vec<RawElement>) -> Self {
        Self {
            response: StubResponse::Elements(elements),
            calls: Cell::new(0),
        }
    }

    /// Create a source that fails with [`OverpassError::Status`].
    #[must_use]
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            response: StubResponse::Status {
                status,
                body: body.into(),
            },
            calls: Cell::new(0),
        }
    }

    /// Number of fetches issued so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl ElementSource for StubElementSource {
    fn endpoint(&self) -> &str {
        STUB_ENDPOINT
    }

    async fn fetch_elements(&self) -> Result<Vec<RawElement>, OverpassError> {
        self.calls.set(self.calls.get() + 1);
        match &self.response {
            StubResponse::Elements(elements) => Ok(elements.clone()),
            StubResponse::Status { status, body } => Err(OverpassError::Status {
                url: STUB_ENDPOINT.to_owned(),
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
