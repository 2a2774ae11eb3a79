//! Types d'erreurs pour pmomedialib

use crate::category::Category;
use std::fmt;

/// Position of an item inside the library document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLocation {
    pub category: Category,
    /// Index in the category array.
    pub index: usize,
    /// Index in the entity's `items` array, for tracks nested in an entity.
    pub track: Option<usize>,
}

impl ItemLocation {
    pub(crate) fn entry(category: Category, index: usize) -> Self {
        Self {
            category,
            index,
            track: None,
        }
    }

    pub(crate) fn nested(self, track: usize) -> Self {
        Self {
            track: Some(track),
            ..self
        }
    }
}

impl fmt::Display for ItemLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.category, self.index)?;
        if let Some(track) = self.track {
            write!(f, ".items[{}]", track)?;
        }
        Ok(())
    }
}

/// Raisons de rejet d'une bibliothèque
///
/// A rejected library never alters the snapshot in place.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("Invalid library JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Library document must be a JSON object")]
    NotAnObject,

    #[error("`{category}` must be an array")]
    InvalidCategory { category: Category },

    #[error("{location} must be an object")]
    InvalidItem { location: ItemLocation },

    #[error("{location}: missing required field `{field}`")]
    MissingField {
        location: ItemLocation,
        field: &'static str,
    },

    #[error("{location}: field `{field}` has an unsupported type")]
    InvalidField {
        location: ItemLocation,
        field: &'static str,
    },
}

impl LibraryError {
    /// Category whose data caused the failure, if the document itself was well-formed.
    pub fn category(&self) -> Option<Category> {
        match self {
            LibraryError::InvalidJson(_) | LibraryError::NotAnObject => None,
            LibraryError::InvalidCategory { category } => Some(*category),
            LibraryError::InvalidItem { location }
            | LibraryError::MissingField { location, .. }
            | LibraryError::InvalidField { location, .. } => Some(location.category),
        }
    }

    pub fn location(&self) -> Option<ItemLocation> {
        match self {
            LibraryError::InvalidItem { location }
            | LibraryError::MissingField { location, .. }
            | LibraryError::InvalidField { location, .. } => Some(*location),
            _ => None,
        }
    }

    /// Name of the offending field, when one is known.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            LibraryError::MissingField { field, .. } | LibraryError::InvalidField { field, .. } => {
                Some(*field)
            }
            _ => None,
        }
    }
}

/// Type Result spécialisé pour pmomedialib
pub type Result<T> = std::result::Result<T, LibraryError>;
