use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::types::VersionedError;

/// A single-argument string filter callable from templates.
pub trait TemplateFilter: Send + Sync {
    fn filter(&self, value: &str) -> Result<String, VersionedError>;
}

impl<F> TemplateFilter for F
where
    F: Fn(&str) -> Result<String, VersionedError> + Send + Sync,
{
    fn filter(&self, value: &str) -> Result<String, VersionedError> {
        self(value)
    }
}

/// Named template filters of a host application.
///
/// Registration never replaces an existing entry.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: BTreeMap<String, Arc<dyn TemplateFilter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `filter` under `name` unless the name is taken.
    ///
    /// Returns `true` when the filter was inserted.
    pub fn insert_if_absent(
        &mut self,
        name: impl Into<String>,
        filter: Arc<dyn TemplateFilter>,
    ) -> bool {
        match self.filters.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(filter);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn TemplateFilter>> {
        self.filters.get(name)
    }

    /// Run the filter registered under `name` on `value`.
    pub fn apply(&self, name: &str, value: &str) -> Result<String, VersionedError> {
        let filter = self
            .get(name)
            .ok_or_else(|| VersionedError::UnknownFilter(name.to_string()))?;
        filter.filter(value)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.filters.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}
