//! Cross-checks of UI changes against the management model.
//!
//! A [`ResourceVerifier`] is built per resource under test, pointed at its
//! DMR path, and asked to confirm that the resource exists and that its
//! attributes hold the values the UI just saved:
//!
//! ```
//! use hal_testsuite::{MockManagementClient, ResourceVerifier};
//!
//! let client = MockManagementClient::new()
//!     .with_attribute("/subsystem=jpa", "default-datasource", "ExampleDS");
//! let verifier = ResourceVerifier::with_path("/subsystem=jpa", &client);
//!
//! verifier.verify_resource(true).unwrap();
//! verifier.verify_attribute("defaultDatasource", "ExampleDS").unwrap();
//! ```
//!
//! Mismatches come back as errors for which
//! [`SuiteError::is_assertion_failure`] holds; failures of the client itself
//! come back as [`SuiteError::Io`] untouched.

use crate::assertion::Assertion;
use crate::management::{read_resource_expression, ManagementClient};
use crate::naming::camel_to_dash;
use crate::result::{SuiteError, SuiteResult};

const PATH_NOT_SET: &str = "DMR path not set";
const ATTRIBUTE_DIFFERS: &str = "Attribute value is different in model.";

/// Verifies resource existence and attribute values in the management model
#[derive(Debug)]
pub struct ResourceVerifier<C> {
    resource_path: Option<String>,
    client: C,
}

impl<C: ManagementClient> ResourceVerifier<C> {
    /// Create a verifier with no resource path set
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self {
            resource_path: None,
            client,
        }
    }

    /// Create a verifier pointed at `path`
    #[must_use]
    pub fn with_path(path: impl Into<String>, client: C) -> Self {
        Self {
            resource_path: Some(path.into()),
            client,
        }
    }

    /// Start building a verifier
    #[must_use]
    pub const fn builder() -> ResourceVerifierBuilder<C> {
        ResourceVerifierBuilder {
            resource_path: None,
            client: None,
        }
    }

    /// Replace the stored resource path. The path is not validated.
    pub fn set_resource_path(&mut self, path: impl Into<String>) {
        self.resource_path = Some(path.into());
    }

    /// Forget the stored resource path
    pub fn clear_resource_path(&mut self) {
        self.resource_path = None;
    }

    /// Stored resource path, if any
    #[must_use]
    pub fn resource_path(&self) -> Option<&str> {
        self.resource_path.as_deref()
    }

    /// Client the verifier queries through
    #[must_use]
    pub const fn client(&self) -> &C {
        &self.client
    }

    fn require_path(&self) -> SuiteResult<&str> {
        self.resource_path
            .as_deref()
            .ok_or_else(|| SuiteError::invalid_state(PATH_NOT_SET))
    }

    /// Verify that the resource at `path` exists (or not) in the model
    ///
    /// # Errors
    ///
    /// `ResourceExistence` when the model disagrees with `expected`
    pub fn verify_resource_at(&self, path: &str, expected: bool) -> SuiteResult<()> {
        let exists = self
            .client
            .execute_for_success(&read_resource_expression(path));
        tracing::debug!(resource = path, exists, expected, "checked resource");

        let result = if expected {
            Assertion::is_true(exists, &format!("Resource {path} should exist"))
        } else {
            Assertion::is_false(exists, &format!("Resource {path} should not exist"))
        };
        result.into_result(|message| {
            tracing::warn!(resource = path, %message, "resource existence mismatch");
            SuiteError::ResourceExistence {
                resource: path.to_string(),
                expected,
                message,
            }
        })
    }

    /// Verify that the resource at the stored path exists (or not)
    ///
    /// # Errors
    ///
    /// `InvalidState` without a stored path, otherwise as
    /// [`verify_resource_at`](Self::verify_resource_at)
    pub fn verify_resource(&self, expected: bool) -> SuiteResult<()> {
        let path = self.require_path()?;
        self.verify_resource_at(path, expected)
    }

    /// Verify one attribute value at the stored path.
    ///
    /// `name` may be camelCase; it is converted to dash-case before the model
    /// is read. Values are compared as exact strings.
    ///
    /// # Errors
    ///
    /// `InvalidState` without a stored path, `AttributeMismatch` when the
    /// values differ, `Io` when the client fails
    pub fn verify_attribute(&self, name: &str, expected: &str) -> SuiteResult<()> {
        let path = self.require_path()?;
        let attribute = camel_to_dash(name);
        let actual = self.client.read_attribute(path, &attribute)?;
        tracing::debug!(resource = path, attribute = %attribute, "read attribute");

        Assertion::equals(ATTRIBUTE_DIFFERS, expected, actual.as_str()).into_result(|message| {
            tracing::warn!(
                resource = path,
                attribute = %attribute,
                %message,
                "attribute mismatch"
            );
            SuiteError::AttributeMismatch {
                resource: path.to_string(),
                attribute,
                expected: expected.to_string(),
                actual,
            }
        })
    }

    /// Verify several attributes at the stored path, in the given order.
    ///
    /// Stops at the first failing attribute; later ones are not read.
    ///
    /// # Errors
    ///
    /// The first error [`verify_attribute`](Self::verify_attribute) returns
    pub fn verify_attributes<I, K, V>(&self, pairs: I) -> SuiteResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.require_path()?;
        for (name, expected) in pairs {
            self.verify_attribute(name.as_ref(), expected.as_ref())?;
        }
        Ok(())
    }
}

/// Builder for [`ResourceVerifier`] that rejects a missing client
#[derive(Debug)]
pub struct ResourceVerifierBuilder<C> {
    resource_path: Option<String>,
    client: Option<C>,
}

impl<C: ManagementClient> ResourceVerifierBuilder<C> {
    /// Set the management client
    #[must_use]
    pub fn client(mut self, client: C) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the client from an optional value, e.g. a fixture that may be absent
    #[must_use]
    pub fn maybe_client(mut self, client: Option<C>) -> Self {
        self.client = client;
        self
    }

    /// Set the resource path
    #[must_use]
    pub fn resource_path(mut self, path: impl Into<String>) -> Self {
        self.resource_path = Some(path.into());
        self
    }

    /// Build the verifier
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when no client was set
    pub fn build(self) -> SuiteResult<ResourceVerifier<C>> {
        let client = self
            .client
            .ok_or_else(|| SuiteError::invalid_argument("Management client not set."))?;
        Ok(ResourceVerifier {
            resource_path: self.resource_path,
            client,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mock::MockManagementClient;
    use std::collections::BTreeMap;

    fn foo_client() -> MockManagementClient {
        MockManagementClient::new()
            .with_attribute("/subsystem=foo", "max-threads", "5")
            .with_attribute("/subsystem=foo", "keepalive-time", "100")
            .with_attribute("/subsystem=foo", "name", "default")
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn test_builder_without_client_is_invalid_argument() {
            let err = ResourceVerifier::<MockManagementClient>::builder()
                .resource_path("/subsystem=foo")
                .build()
                .unwrap_err();
            assert!(matches!(err, SuiteError::InvalidArgument { .. }));
            assert!(err.to_string().contains("Management client not set"));
        }

        #[test]
        fn test_builder_with_absent_fixture() {
            let err = ResourceVerifier::<MockManagementClient>::builder()
                .maybe_client(None)
                .build()
                .unwrap_err();
            assert!(matches!(err, SuiteError::InvalidArgument { .. }));
        }

        #[test]
        fn test_builder_with_client() {
            let client = foo_client();
            let verifier = ResourceVerifier::builder()
                .client(&client)
                .resource_path("/subsystem=foo")
                .build()
                .unwrap();
            assert_eq!(verifier.resource_path(), Some("/subsystem=foo"));
        }

        #[test]
        fn test_set_and_clear_path() {
            let client = foo_client();
            let mut verifier = ResourceVerifier::new(&client);
            assert_eq!(verifier.resource_path(), None);
            verifier.set_resource_path("not even a path");
            assert_eq!(verifier.resource_path(), Some("not even a path"));
            verifier.clear_resource_path();
            assert!(verifier.verify_resource(true).is_err());
        }
    }

    mod existence_tests {
        use super::*;

        #[test]
        fn test_existing_resource_expected() {
            let client = foo_client();
            let verifier = ResourceVerifier::new(&client);
            verifier.verify_resource_at("/subsystem=foo", true).unwrap();
            assert_eq!(
                client.expressions(),
                vec!["/subsystem=foo:read-resource()".to_string()]
            );
        }

        #[test]
        fn test_existing_resource_not_expected() {
            let client = foo_client();
            let verifier = ResourceVerifier::new(&client);
            let err = verifier
                .verify_resource_at("/subsystem=foo", false)
                .unwrap_err();
            assert!(err.is_assertion_failure());
            assert!(err
                .to_string()
                .contains("Resource /subsystem=foo should not exist"));
        }

        #[test]
        fn test_missing_resource() {
            let client = foo_client();
            let verifier = ResourceVerifier::new(&client);
            verifier.verify_resource_at("/subsystem=bar", false).unwrap();
            let err = verifier
                .verify_resource_at("/subsystem=bar", true)
                .unwrap_err();
            match err {
                SuiteError::ResourceExistence {
                    resource, expected, ..
                } => {
                    assert_eq!(resource, "/subsystem=bar");
                    assert!(expected);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_stored_path_used() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            verifier.verify_resource(true).unwrap();
            assert!(verifier.verify_resource(false).is_err());
        }

        #[test]
        fn test_no_path_is_invalid_state() {
            let client = foo_client();
            let verifier = ResourceVerifier::new(&client);
            let err = verifier.verify_resource(true).unwrap_err();
            assert!(matches!(err, SuiteError::InvalidState { .. }));
            assert_eq!(client.execute_calls(), 0);
        }
    }

    mod attribute_tests {
        use super::*;

        #[test]
        fn test_matching_value() {
            let client = foo_client();
            let mut verifier = ResourceVerifier::new(&client);
            verifier.set_resource_path("/subsystem=foo");
            verifier.verify_attribute("maxThreads", "5").unwrap();
            assert_eq!(
                client.reads(),
                vec![("/subsystem=foo".to_string(), "max-threads".to_string())]
            );
        }

        #[test]
        fn test_dash_name_passes_through() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            verifier.verify_attribute("max-threads", "5").unwrap();
        }

        #[test]
        fn test_mismatch_reports_both_values() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            let err = verifier.verify_attribute("maxThreads", "6").unwrap_err();
            assert!(err.is_assertion_failure());
            let msg = err.to_string();
            assert!(msg.contains('5'));
            assert!(msg.contains('6'));
            assert!(msg.contains("/subsystem=foo"));
            match err {
                SuiteError::AttributeMismatch {
                    attribute,
                    expected,
                    actual,
                    ..
                } => {
                    assert_eq!(attribute, "max-threads");
                    assert_eq!(expected, "6");
                    assert_eq!(actual, "5");
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_exact_comparison_no_coercion() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            assert!(verifier.verify_attribute("maxThreads", "5.0").is_err());
            assert!(verifier.verify_attribute("maxThreads", " 5").is_err());
        }

        #[test]
        fn test_no_path_is_invalid_state() {
            let client = foo_client();
            let verifier = ResourceVerifier::new(&client);
            let err = verifier.verify_attribute("maxThreads", "5").unwrap_err();
            assert!(matches!(err, SuiteError::InvalidState { .. }));
            assert_eq!(client.read_calls(), 0);
        }

        #[test]
        fn test_client_io_error_propagates() {
            let client = foo_client().with_transport_down(true);
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            let err = verifier.verify_attribute("maxThreads", "5").unwrap_err();
            assert!(!err.is_assertion_failure());
            match err {
                SuiteError::Io(io) => {
                    assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    mod batch_tests {
        use super::*;

        #[test]
        fn test_all_match() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            let mut pairs = BTreeMap::new();
            let _ = pairs.insert("maxThreads", "5");
            let _ = pairs.insert("keepaliveTime", "100");
            verifier.verify_attributes(&pairs).unwrap();
            assert_eq!(client.read_calls(), 2);
        }

        #[test]
        fn test_stops_at_first_failure() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            let pairs = vec![
                ("maxThreads", "5"),
                ("keepaliveTime", "200"),
                ("name", "default"),
            ];
            let err = verifier.verify_attributes(pairs).unwrap_err();
            match err {
                SuiteError::AttributeMismatch { attribute, .. } => {
                    assert_eq!(attribute, "keepalive-time");
                }
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(client.read_calls(), 2);
            assert!(!client.reads().iter().any(|(_, name)| name == "name"));
        }

        #[test]
        fn test_transport_failure_mid_batch() {
            let client = foo_client().with_transport_down_after(1);
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            let err = verifier
                .verify_attributes([
                    ("maxThreads", "5"),
                    ("keepaliveTime", "100"),
                    ("name", "default"),
                ])
                .unwrap_err();
            assert!(!err.is_assertion_failure());
            match err {
                SuiteError::Io(io) => {
                    assert_eq!(io.kind(), std::io::ErrorKind::ConnectionRefused);
                }
                other => panic!("unexpected error: {other}"),
            }
            assert_eq!(client.read_calls(), 2);
            assert_eq!(client.reads()[1].1, "keepalive-time");
        }

        #[test]
        fn test_owned_pairs() {
            let client = foo_client();
            let verifier = ResourceVerifier::with_path("/subsystem=foo", &client);
            let pairs = vec![("name".to_string(), "default".to_string())];
            verifier.verify_attributes(pairs).unwrap();
        }

        #[test]
        fn test_no_path_is_invalid_state_even_when_empty() {
            let client = foo_client();
            let verifier = ResourceVerifier::new(&client);
            let err = verifier
                .verify_attributes(Vec::<(&str, &str)>::new())
                .unwrap_err();
            assert!(matches!(err, SuiteError::InvalidState { .. }));
        }
    }
}
