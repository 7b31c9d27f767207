//! Attribute name conversion between reader-facing camelCase and the
//! dash-case names used by the management model.

use regex::Regex;
use std::sync::OnceLock;

fn interior_capital() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\B([A-Z])").expect("static pattern compiles"))
}

/// Convert a camelCase name to dash-case.
///
/// Every uppercase letter that does not sit on a word boundary gets a dash in
/// front of it, then the whole string is lowercased. Runs of capitals are split
/// letter by letter: `URL` becomes `u-r-l`.
///
/// ```
/// use hal_testsuite::camel_to_dash;
///
/// assert_eq!(camel_to_dash("maxThreads"), "max-threads");
/// assert_eq!(camel_to_dash("simple"), "simple");
/// ```
#[must_use]
pub fn camel_to_dash(input: &str) -> String {
    interior_capital()
        .replace_all(input, "-${1}")
        .to_lowercase()
}
