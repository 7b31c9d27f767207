//! Structural selectors and strict element lookup under a root.
//!
//! # Design Philosophy
//!
//! - **Scoped**: every lookup runs under a root element handed in by the
//!   browser driver, never against the whole document
//! - **Strict Selection**: fails if more than one element matches
//! - **No Waiting**: a lookup either resolves now or fails now

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::result::{SuiteError, SuiteResult};

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    /// CSS selector (e.g., "table.form-view-panel")
    Css(String),
    /// XPath selector
    XPath(String),
    /// jQuery selector, CSS plus extensions such as `:visible` and `:has()`
    JQuery(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(selector: impl Into<String>) -> Self {
        Self::XPath(selector.into())
    }

    /// Create a jQuery selector
    #[must_use]
    pub fn jquery(selector: impl Into<String>) -> Self {
        Self::JQuery(selector.into())
    }

    /// Raw selector text without the kind tag
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::JQuery(s) => s,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
            Self::XPath(s) => write!(f, "xpath={s}"),
            Self::JQuery(s) => write!(f, "jquery={s}"),
        }
    }
}

/// Locator options for customizing behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatorOptions {
    /// Whether to require strict single-element match
    pub strict: bool,
}

impl Default for LocatorOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// A selector together with how its matches are resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    selector: Selector,
    options: LocatorOptions,
}

impl Locator {
    /// Create a new locator with a CSS selector
    #[must_use]
    pub fn new(selector: impl Into<String>) -> Self {
        Self::from_selector(Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            options: LocatorOptions::default(),
        }
    }

    /// Disable strict mode (first of several matches wins)
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &LocatorOptions {
        &self.options
    }

    /// Resolve this locator under `root`
    ///
    /// # Errors
    ///
    /// `ElementNotFound` when nothing matches, `AmbiguousMatch` when a strict
    /// locator matches more than one element, or whatever the root reports
    pub fn resolve<R: SearchContext + ?Sized>(&self, root: &R) -> SuiteResult<R::Element> {
        let mut matches = root.find_all(&self.selector)?;
        let count = matches.len();
        tracing::debug!(selector = %self.selector, count, "resolved locator");

        if count == 0 {
            return Err(SuiteError::ElementNotFound {
                selector: self.selector.to_string(),
            });
        }
        if self.options.strict && count > 1 {
            return Err(SuiteError::AmbiguousMatch {
                selector: self.selector.to_string(),
                count,
            });
        }
        Ok(matches.swap_remove(0))
    }
}

impl From<Selector> for Locator {
    fn from(selector: Selector) -> Self {
        Self::from_selector(selector)
    }
}

/// An element handle that can run structural queries beneath itself.
///
/// Implemented by the browser-automation layer; the suite only consumes it.
pub trait SearchContext {
    /// Handle type for matched elements
    type Element;

    /// Every element under this root matching `selector`, in document order
    ///
    /// # Errors
    ///
    /// Returns error if the underlying browser query fails
    fn find_all(&self, selector: &Selector) -> SuiteResult<Vec<Self::Element>>;

    /// The single element under this root matching `locator`
    ///
    /// # Errors
    ///
    /// See [`Locator::resolve`]
    fn find_element(&self, locator: &Locator) -> SuiteResult<Self::Element> {
        locator.resolve(self)
    }
}
