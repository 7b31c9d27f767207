//! Management client capability consumed by the verifier.
//!
//! The suite never talks to the management interface itself. Whatever drives
//! the CLI (a jboss-cli process, an HTTP management endpoint, a recorded
//! fixture) plugs in by implementing [`ManagementClient`].

use std::io;
use std::rc::Rc;
use std::sync::Arc;

/// Operation appended to a resource path to check it exists
pub const READ_RESOURCE_OPERATION: &str = "read-resource()";

/// Access to the management model through CLI-style expressions.
pub trait ManagementClient {
    /// Evaluate a model-query expression and report whether it succeeded
    fn execute_for_success(&self, expression: &str) -> bool;

    /// Read the current value of `attribute` on the resource at `path`
    ///
    /// # Errors
    ///
    /// Returns an I/O error on transport or protocol failure
    fn read_attribute(&self, path: &str, attribute: &str) -> io::Result<String>;
}

/// Build the `read-resource` expression for a resource path
#[must_use]
pub fn read_resource_expression(path: &str) -> String {
    format!("{path}:{READ_RESOURCE_OPERATION}")
}

impl<T: ManagementClient + ?Sized> ManagementClient for &T {
    fn execute_for_success(&self, expression: &str) -> bool {
        (**self).execute_for_success(expression)
    }

    fn read_attribute(&self, path: &str, attribute: &str) -> io::Result<String> {
        (**self).read_attribute(path, attribute)
    }
}

impl<T: ManagementClient + ?Sized> ManagementClient for Box<T> {
    fn execute_for_success(&self, expression: &str) -> bool {
        (**self).execute_for_success(expression)
    }

    fn read_attribute(&self, path: &str, attribute: &str) -> io::Result<String> {
        (**self).read_attribute(path, attribute)
    }
}

impl<T: ManagementClient + ?Sized> ManagementClient for Rc<T> {
    fn execute_for_success(&self, expression: &str) -> bool {
        (**self).execute_for_success(expression)
    }

    fn read_attribute(&self, path: &str, attribute: &str) -> io::Result<String> {
        (**self).read_attribute(path, attribute)
    }
}

impl<T: ManagementClient + ?Sized> ManagementClient for Arc<T> {
    fn execute_for_success(&self, expression: &str) -> bool {
        (**self).execute_for_success(expression)
    }

    fn read_attribute(&self, path: &str, attribute: &str) -> io::Result<String> {
        (**self).read_attribute(path, attribute)
    }
}
