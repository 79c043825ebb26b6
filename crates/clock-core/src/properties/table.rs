//! Ordered name → value property table.
//!
//! A [`PropertyTable`] is a sequence of `(name, value)` pairs, unique by
//! name.  Names are matched exactly and case-sensitively.  New names are
//! appended, so iteration order is insertion order; setting an existing name
//! replaces its value in place.
//!
//! The table always owns independent copies of the strings it stores.  Every
//! allocation goes through a fallible reservation so that running out of
//! memory surfaces as [`PropertyError::OutOfMemory`] and leaves the table
//! untouched instead of aborting the process.

use std::collections::TryReserveError;

use thiserror::Error;
use tracing::trace;

use crate::error::ErrorKind;

/// Errors returned by property lookups and mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PropertyError {
    /// No property with the requested name exists.
    #[error("property not found: {0}")]
    NotFound(String),

    /// The property exists but its value cannot be read as the requested type.
    #[error("property {name} is not a valid {expected}: {value:?}")]
    InvalidType {
        name: String,
        expected: &'static str,
        value: String,
    },

    /// Growing the table or copying a string failed.
    #[error("out of memory while storing property: {0}")]
    OutOfMemory(#[from] TryReserveError),
}

impl PropertyError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PropertyError::NotFound(_) => ErrorKind::NotFound,
            PropertyError::InvalidType { .. } => ErrorKind::InvalidType,
            PropertyError::OutOfMemory(_) => ErrorKind::OutOfMemory,
        }
    }
}

/// A single named text value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    name: String,
    value: String,
}

impl Property {
    /// The property name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw property value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// An ordered set of properties, unique by name.
///
/// # Example
///
/// ```rust
/// use clock_core::PropertyTable;
///
/// let mut table = PropertyTable::new();
/// table.set("scale", "80").unwrap();
/// table.set("scale", "90").unwrap();
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.get("scale").unwrap(), "90");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyTable {
    entries: Vec<Property>,
}

impl PropertyTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of properties in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table holds no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if a property named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Iterates over the properties in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.entries.iter()
    }

    /// Sets `name` to `value`, replacing an existing value or appending a new
    /// property.
    ///
    /// Both strings are copied; the caller keeps ownership of its arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::OutOfMemory`] if a copy or the table growth
    /// cannot be allocated.  The table is unmodified in that case.
    pub fn set(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        let value = copy_str(value)?;
        match self.position(name) {
            Some(index) => {
                self.entries[index].value = value;
                Ok(())
            }
            None => {
                let name = copy_str(name)?;
                self.append(name, value)?;
                Ok(())
            }
        }
    }

    /// Stores already-owned strings with the same replace-or-append rule as
    /// [`set`](Self::set).  Used by the decoder, which builds its own copies.
    pub(crate) fn insert_owned(&mut self, name: String, value: String) -> Result<(), TryReserveError> {
        match self.position(&name) {
            Some(index) => {
                trace!(name = %name, "replacing duplicate property");
                self.entries[index].value = value;
                Ok(())
            }
            None => self.append(name, value),
        }
    }

    /// Returns the raw value of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::NotFound`] if no such property exists.
    pub fn get(&self, name: &str) -> Result<&str, PropertyError> {
        self.position(name)
            .map(|index| self.entries[index].value.as_str())
            .ok_or_else(|| PropertyError::NotFound(name.to_string()))
    }

    /// Removes `name` and returns its value, if it was present.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.position(name)?;
        Some(self.entries.remove(index).value)
    }

    /// Removes every property.  Calling this on an empty table is a no-op.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|p| p.name == name)
    }

    fn append(&mut self, name: String, value: String) -> Result<(), TryReserveError> {
        self.entries.try_reserve(1)?;
        self.entries.push(Property { name, value });
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PropertyTable {
    type Item = &'a Property;
    type IntoIter = std::slice::Iter<'a, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Copies `s` into a freshly allocated `String`, reporting allocation failure.
pub(crate) fn copy_str(s: &str) -> Result<String, TryReserveError> {
    let mut out = String::new();
    out.try_reserve_exact(s.len())?;
    out.push_str(s);
    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
