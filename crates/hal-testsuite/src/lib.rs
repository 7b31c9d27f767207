//! HAL Test Suite: page objects and model verification for the HAL console
//!
//! UI tests drive the console through a browser, then confirm that what the
//! console claims to have saved really landed in the management model.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │   ┌────────────┐    ┌────────────────┐    ┌─────────────────────┐  │
//! │   │ Test       │───►│ PageDescriptor │───►│ SearchContext       │  │
//! │   │ (Rust)     │    │ + Locator      │    │ (browser driver)    │  │
//! │   │            │    └────────────────┘    └─────────────────────┘  │
//! │   │            │    ┌────────────────┐    ┌─────────────────────┐  │
//! │   │            │───►│ Resource       │───►│ ManagementClient    │  │
//! │   └────────────┘    │ Verifier       │    │ (CLI / DMR)         │  │
//! │                     └────────────────┘    └─────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]

mod assertion;
mod config;
mod locator;
mod management;
mod naming;
mod page_object;
mod result;
mod verifier;

/// Subscriber setup for `tracing` output during test runs
pub mod logging;

/// In-memory management model and element root for tests
pub mod mock;

pub use assertion::{Assertion, AssertionResult};
pub use config::{SuiteConfig, ENV_CONSOLE_URL, ENV_MANAGEMENT_HOST, ENV_MANAGEMENT_PORT};
pub use locator::{Locator, LocatorOptions, SearchContext, Selector};
pub use management::{read_resource_expression, ManagementClient, READ_RESOURCE_OPERATION};
pub use mock::{MockElement, MockElementRoot, MockManagementClient};
pub use naming::camel_to_dash;
pub use page_object::{pages, Fragment, FragmentKind, PageDescriptor, PageRegistry};
pub use result::{SuiteError, SuiteResult};
pub use verifier::{ResourceVerifier, ResourceVerifierBuilder};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::assertion::*;
    pub use super::config::*;
    pub use super::locator::*;
    pub use super::management::*;
    pub use super::naming::*;
    pub use super::page_object::*;
    pub use super::result::*;
    pub use super::verifier::*;
}
