//! In-memory stand-ins for the management model and the browser.
//!
//! Both doubles count what they were asked so tests can assert that a check
//! short-circuited.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::io;

use crate::locator::{SearchContext, Selector};
use crate::management::{ManagementClient, READ_RESOURCE_OPERATION};
use crate::result::{SuiteError, SuiteResult};

/// Management client backed by a map of resources to attributes
#[derive(Debug, Default)]
pub struct MockManagementClient {
    resources: BTreeMap<String, BTreeMap<String, String>>,
    transport_down_after: Option<usize>,
    expressions: RefCell<Vec<String>>,
    reads: RefCell<Vec<(String, String)>>,
    execute_calls: Cell<usize>,
    read_calls: Cell<usize>,
}

impl MockManagementClient {
    /// Create an empty model
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource without attributes
    #[must_use]
    pub fn with_resource(mut self, path: impl Into<String>) -> Self {
        let _ = self.resources.entry(path.into()).or_default();
        self
    }

    /// Add an attribute, creating the resource if needed
    #[must_use]
    pub fn with_attribute(
        mut self,
        path: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let _ = self
            .resources
            .entry(path.into())
            .or_default()
            .insert(name.into(), value.into());
        self
    }

    /// Make every attribute read fail as if the connection dropped
    #[must_use]
    pub const fn with_transport_down(mut self, down: bool) -> Self {
        self.transport_down_after = if down { Some(0) } else { None };
        self
    }

    /// Let the first `reads` attribute reads succeed, then fail every later one
    #[must_use]
    pub const fn with_transport_down_after(mut self, reads: usize) -> Self {
        self.transport_down_after = Some(reads);
        self
    }

    /// Number of `execute_for_success` calls so far
    #[must_use]
    pub fn execute_calls(&self) -> usize {
        self.execute_calls.get()
    }

    /// Number of `read_attribute` calls so far
    #[must_use]
    pub fn read_calls(&self) -> usize {
        self.read_calls.get()
    }

    /// Expressions executed so far, in order
    #[must_use]
    pub fn expressions(&self) -> Vec<String> {
        self.expressions.borrow().clone()
    }

    /// `(path, attribute)` pairs read so far, in order
    #[must_use]
    pub fn reads(&self) -> Vec<(String, String)> {
        self.reads.borrow().clone()
    }

    fn evaluate(&self, expression: &str) -> bool {
        let Some((path, operation)) = expression.rsplit_once(':') else {
            return false;
        };
        let Some(attributes) = self.resources.get(path) else {
            return false;
        };
        if operation == READ_RESOURCE_OPERATION {
            return true;
        }
        operation
            .strip_prefix("read-attribute(name=")
            .and_then(|rest| rest.strip_suffix(')'))
            .is_some_and(|name| attributes.contains_key(name))
    }
}

impl ManagementClient for MockManagementClient {
    fn execute_for_success(&self, expression: &str) -> bool {
        self.execute_calls.set(self.execute_calls.get() + 1);
        self.expressions.borrow_mut().push(expression.to_string());
        self.evaluate(expression)
    }

    fn read_attribute(&self, path: &str, attribute: &str) -> io::Result<String> {
        let call = self.read_calls.get() + 1;
        self.read_calls.set(call);
        self.reads
            .borrow_mut()
            .push((path.to_string(), attribute.to_string()));

        if self.transport_down_after.is_some_and(|allowed| call > allowed) {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "management interface unreachable",
            ));
        }
        self.resources
            .get(path)
            .and_then(|attrs| attrs.get(attribute))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no attribute '{attribute}' at {path}"),
                )
            })
    }
}

/// Element handed out by [`MockElementRoot`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Selector the element was found by
    pub selector: Selector,
    /// Position among the matches
    pub index: usize,
}

/// Search context answering with a configured number of matches per selector
#[derive(Debug, Default)]
pub struct MockElementRoot {
    matches: HashMap<String, usize>,
    detached: bool,
    queries: RefCell<Vec<Selector>>,
}

impl MockElementRoot {
    /// Create a root where nothing matches
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `selector` (raw text, any kind) match `count` elements
    #[must_use]
    pub fn with_matches(mut self, selector: impl Into<String>, count: usize) -> Self {
        let _ = self.matches.insert(selector.into(), count);
        self
    }

    /// Make every query fail as if the root left the DOM
    #[must_use]
    pub const fn with_detached(mut self, detached: bool) -> Self {
        self.detached = detached;
        self
    }

    /// Selectors queried so far, in order
    #[must_use]
    pub fn queries(&self) -> Vec<Selector> {
        self.queries.borrow().clone()
    }
}

impl SearchContext for MockElementRoot {
    type Element = MockElement;

    fn find_all(&self, selector: &Selector) -> SuiteResult<Vec<MockElement>> {
        self.queries.borrow_mut().push(selector.clone());
        if self.detached {
            return Err(SuiteError::invalid_state("root element is detached"));
        }
        let count = self.matches.get(selector.as_str()).copied().unwrap_or(0);
        Ok((0..count)
            .map(|index| MockElement {
                selector: selector.clone(),
                index,
            })
            .collect())
    }
}
