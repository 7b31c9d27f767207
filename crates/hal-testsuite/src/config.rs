//! Test-suite configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::page_object::{PageDescriptor, PageRegistry};
use crate::result::{SuiteError, SuiteResult};

/// Environment variable overriding [`SuiteConfig::console_url`]
pub const ENV_CONSOLE_URL: &str = "HAL_CONSOLE_URL";
/// Environment variable overriding [`SuiteConfig::management_host`]
pub const ENV_MANAGEMENT_HOST: &str = "HAL_MANAGEMENT_HOST";
/// Environment variable overriding [`SuiteConfig::management_port`]
pub const ENV_MANAGEMENT_PORT: &str = "HAL_MANAGEMENT_PORT";

/// Where the console and its management interface live, and how the suite logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Base URL of the console application
    pub console_url: String,
    /// Host of the management interface
    pub management_host: String,
    /// Port of the management interface
    pub management_port: u16,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
    /// Whether page lookups require exactly one match
    pub strict_locators: bool,
    /// Pages beyond the built-in ones, or replacements for them by id
    pub pages: Vec<PageDescriptor>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            console_url: "http://localhost:9990/console/App.html".to_string(),
            management_host: "localhost".to_string(),
            management_port: 9990,
            log_filter: "info".to_string(),
            strict_locators: true,
            pages: Vec::new(),
        }
    }
}

impl SuiteConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the console base URL
    #[must_use]
    pub fn with_console_url(mut self, url: impl Into<String>) -> Self {
        self.console_url = url.into();
        self
    }

    /// Set the management host
    #[must_use]
    pub fn with_management_host(mut self, host: impl Into<String>) -> Self {
        self.management_host = host.into();
        self
    }

    /// Set the management port
    #[must_use]
    pub const fn with_management_port(mut self, port: u16) -> Self {
        self.management_port = port;
        self
    }

    /// Set the default log filter
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Set locator strictness
    #[must_use]
    pub const fn with_strict_locators(mut self, strict: bool) -> Self {
        self.strict_locators = strict;
        self
    }

    /// Load configuration from a YAML file, or JSON when the extension is `.json`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> SuiteResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&raw)?
        } else {
            serde_yaml_ng::from_str(&raw)?
        };
        tracing::debug!(path = %path.display(), "loaded suite config");
        Ok(config)
    }

    /// Apply `HAL_*` overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparsable port
    pub fn from_env_overrides(self) -> SuiteResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `HAL_*` overrides from an arbitrary lookup
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unparsable port
    pub fn with_overrides<F>(mut self, lookup: F) -> SuiteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_CONSOLE_URL) {
            self.console_url = url;
        }
        if let Some(host) = lookup(ENV_MANAGEMENT_HOST) {
            self.management_host = host;
        }
        if let Some(port) = lookup(ENV_MANAGEMENT_PORT) {
            self.management_port = port.trim().parse().map_err(|_| {
                SuiteError::config(format!("{ENV_MANAGEMENT_PORT} is not a port: {port}"))
            })?;
        }
        Ok(self)
    }

    /// `host:port` of the management interface
    #[must_use]
    pub fn management_address(&self) -> String {
        format!("{}:{}", self.management_host, self.management_port)
    }

    /// Built-in pages plus the ones listed in this configuration
    #[must_use]
    pub fn page_registry(&self) -> PageRegistry {
        PageRegistry::with_pages(self.pages.iter().cloned())
    }

    /// Navigable URL of a page
    #[must_use]
    pub fn page_url(&self, page: &PageDescriptor) -> String {
        page.url(&self.console_url)
    }
}
