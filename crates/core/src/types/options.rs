//! Variant option selections (size, color, ...) attached to a cart line.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Option name to chosen value, e.g. `{"Size": "M", "Color": "Red"}`.
///
/// Backed by a sorted map, so two selections holding the same pairs compare
/// equal (and serialize identically) no matter which order the pairs were
/// chosen in. An empty selection is the "no variant" case.
///
/// ## Examples
///
/// ```
/// use shopflow_core::SelectedOptions;
///
/// let a = SelectedOptions::new().with("Size", "M").with("Color", "Red");
/// let b = SelectedOptions::new().with("Color", "Red").with("Size", "M");
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOptions(BTreeMap<String, String>);

impl SelectedOptions {
    /// An empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set `name` to `value`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// The chosen value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SelectedOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Display for SelectedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}
