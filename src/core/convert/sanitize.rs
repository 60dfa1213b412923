//! Layer name sanitization
//!
//! Maps raw layer labels to identifiers that are safe as file stems.

use std::collections::HashSet;

/// Extension token stripped from layer names
///
/// Features at the root of a KML document get the file name as layer name.
const SOURCE_EXTENSION: &str = ".kml";

/// Sanitize a raw layer name
///
/// Strips every `.kml` token, replaces space, `\`, `/`, `&` and `?` with `_`,
/// then drops anything outside `[A-Za-z0-9_.-]`. The steps are repeated until
/// the name is stable, so sanitizing twice gives the same result as once.
///
/// # Examples
///
/// ```
/// use kml_preprocessor::core::convert::sanitize;
///
/// assert_eq!(sanitize("My Places.kml"), "My_Places");
/// assert_eq!(sanitize("roads/rail & more?"), "roads_rail___more_");
/// ```
pub fn sanitize(raw: &str) -> String {
    let mut current = sanitize_once(raw);
    loop {
        let next = sanitize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn sanitize_once(raw: &str) -> String {
    raw.replace(SOURCE_EXTENSION, "")
        .chars()
        .filter_map(|c| match c {
            ' ' | '\\' | '/' | '&' | '?' => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') => Some(c),
            _ => None,
        })
        .collect()
}

/// Hands out unique file stems within one run
///
/// Distinct raw names can sanitize to the same stem (`"a b"` and `"a_b"`).
/// Later claims get a numeric suffix so no layer overwrites another.
#[derive(Debug, Default)]
pub struct UniqueNames {
    used: HashSet<String>,
}

impl UniqueNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `stem`, or the first free `stem_<n>` for n = 2, 3, ...
    pub fn claim(&mut self, stem: &str) -> String {
        if self.used.insert(stem.to_string()) {
            return stem.to_string();
        }

        let mut n = 2;
        loop {
            let candidate = format!("{stem}_{n}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}
