//! Page Object Model Support
//!
//! Console pages are described by plain configuration records instead of a
//! type per page. A [`PageDescriptor`] pairs a page id with the location token
//! the console routes on, the selector that picks the interesting panel out
//! of the content area, and the kind of fragment that panel is.
//!
//! Pages that show several visually similar tables pick the one with a form
//! panel inside it, e.g. the JPA page:
//!
//! ```
//! use hal_testsuite::{pages, MockElementRoot};
//!
//! let content = MockElementRoot::new()
//!     .with_matches("table.fill-layout-width:visible:has(table.form-view-panel)", 1);
//! let fragment = pages::jpa().config(&content).unwrap();
//! assert!(fragment.kind().is_config_area());
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::locator::{Locator, SearchContext, Selector};
use crate::result::SuiteResult;

/// Kind of UI region a fragment wraps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentKind {
    /// Read/edit form of a configuration resource
    ConfigArea,
    /// Table listing child resources
    ResourceTable,
    /// Modal dialog or wizard window
    Window,
}

impl FragmentKind {
    /// Whether this is a configuration form area
    #[must_use]
    pub const fn is_config_area(self) -> bool {
        matches!(self, Self::ConfigArea)
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigArea => write!(f, "config-area"),
            Self::ResourceTable => write!(f, "resource-table"),
            Self::Window => write!(f, "window"),
        }
    }
}

/// Handle bound to a located UI region.
///
/// Interactions with the region are up to the driver layer that owns `E`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment<E> {
    kind: FragmentKind,
    root: E,
}

impl<E> Fragment<E> {
    /// Bind a located element as a fragment of the given kind
    #[must_use]
    pub const fn bind(kind: FragmentKind, root: E) -> Self {
        Self { kind, root }
    }

    /// Fragment kind
    #[must_use]
    pub const fn kind(&self) -> FragmentKind {
        self.kind
    }

    /// Element the fragment is bound to
    #[must_use]
    pub const fn root(&self) -> &E {
        &self.root
    }

    /// Unwrap the bound element
    #[must_use]
    pub fn into_root(self) -> E {
        self.root
    }
}

/// Configuration record for one console page.
///
/// Deserialized descriptors go through [`PageDescriptor::new`], so a
/// `location` written as `#token` in a config file is normalized too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PageRecord")]
pub struct PageDescriptor {
    id: String,
    location: String,
    content: Selector,
    fragment: FragmentKind,
}

#[derive(Deserialize)]
struct PageRecord {
    id: String,
    location: String,
    content: Selector,
    #[serde(default = "default_fragment")]
    fragment: FragmentKind,
}

const fn default_fragment() -> FragmentKind {
    FragmentKind::ConfigArea
}

impl From<PageRecord> for PageDescriptor {
    fn from(record: PageRecord) -> Self {
        Self::new(record.id, record.location, record.content, record.fragment)
    }
}

impl PageDescriptor {
    /// Describe a page.
    ///
    /// `location` is the history token the console routes on; a leading `#`
    /// is accepted and dropped.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        content: Selector,
        fragment: FragmentKind,
    ) -> Self {
        let location = location.into();
        let location = location
            .strip_prefix('#')
            .map(str::to_string)
            .unwrap_or(location);
        Self {
            id: id.into(),
            location,
            content,
            fragment,
        }
    }

    /// Page id
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// History token without the leading `#`
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Selector for the page's interesting panel
    #[must_use]
    pub const fn content_selector(&self) -> &Selector {
        &self.content
    }

    /// Kind of fragment the panel is bound as
    #[must_use]
    pub const fn fragment_kind(&self) -> FragmentKind {
        self.fragment
    }

    /// URL of this page under the console's base URL
    #[must_use]
    pub fn url(&self, console_base: &str) -> String {
        let base = console_base
            .split_once('#')
            .map_or(console_base, |(base, _)| base);
        format!("{base}#{}", self.location)
    }

    /// Locate the configuration panel under the page's content root
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the panel does not match exactly once
    pub fn config<R: SearchContext + ?Sized>(
        &self,
        content_root: &R,
    ) -> SuiteResult<Fragment<R::Element>> {
        self.config_with(content_root, true)
    }

    /// Like [`config`](Self::config) with explicit locator strictness
    ///
    /// # Errors
    ///
    /// Returns a not-found error when the panel cannot be resolved
    pub fn config_with<R: SearchContext + ?Sized>(
        &self,
        content_root: &R,
        strict: bool,
    ) -> SuiteResult<Fragment<R::Element>> {
        let locator = Locator::from_selector(self.content.clone()).with_strict(strict);
        let element = content_root.find_element(&locator)?;
        tracing::debug!(page = %self.id, fragment = %self.fragment, "bound page fragment");
        Ok(Fragment::bind(self.fragment, element))
    }
}

/// Descriptors for console pages known to the suite
pub mod pages {
    use super::{FragmentKind, PageDescriptor};
    use crate::locator::Selector;

    /// Visible layout table that contains a form panel
    pub const CONFIG_FORM_TABLE: &str =
        "table.fill-layout-width:visible:has(table.form-view-panel)";

    /// JPA subsystem configuration page
    #[must_use]
    pub fn jpa() -> PageDescriptor {
        PageDescriptor::new(
            "jpa",
            "#jpa",
            Selector::jquery(CONFIG_FORM_TABLE),
            FragmentKind::ConfigArea,
        )
    }

    /// Every built-in descriptor
    #[must_use]
    pub fn all() -> Vec<PageDescriptor> {
        vec![jpa()]
    }
}

/// Registry of page descriptors by id and by location token
#[derive(Debug, Default, Clone)]
pub struct PageRegistry {
    pages: BTreeMap<String, PageDescriptor>,
}

impl PageRegistry {
    /// Create an empty page registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in pages
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for page in pages::all() {
            registry.register(page);
        }
        registry
    }

    /// Built-in pages plus `extra`, which replace built-ins with the same id
    #[must_use]
    pub fn with_pages<I: IntoIterator<Item = PageDescriptor>>(extra: I) -> Self {
        let mut registry = Self::builtin();
        for page in extra {
            registry.register(page);
        }
        registry
    }

    /// Register a page, replacing any page with the same id
    pub fn register(&mut self, page: PageDescriptor) {
        let _ = self.pages.insert(page.id.clone(), page);
    }

    /// Get a page by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&PageDescriptor> {
        self.pages.get(id)
    }

    /// Get the page routed on `token` (with or without `#`)
    #[must_use]
    pub fn by_location(&self, token: &str) -> Option<&PageDescriptor> {
        let token = token.strip_prefix('#').unwrap_or(token);
        self.pages.values().find(|p| p.location == token)
    }

    /// Ids of all registered pages, sorted
    #[must_use]
    pub fn list(&self) -> Vec<&str> {
        self.pages.keys().map(String::as_str).collect()
    }

    /// Number of registered pages
    #[must_use]
    pub fn count(&self) -> usize {
        self.pages.len()
    }
}
