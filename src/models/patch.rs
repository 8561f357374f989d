//! Field patches for partial updates
//!
//! An optional field in an update command has three states: leave it alone,
//! clear it, or set it to a new value. `Option<T>` alone cannot tell the first
//! two apart, so updates carry a `FieldPatch<T>` instead.

/// A change to one optional field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldPatch<T> {
    /// Keep the existing value
    #[default]
    Unchanged,
    /// Remove the value
    Clear,
    /// Replace the value
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Apply this patch to the current value
    pub fn apply(self, current: Option<T>) -> Option<T> {
        match self {
            Self::Unchanged => current,
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }

    /// True if this patch would modify the field
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

impl<T> From<Option<T>> for FieldPatch<T> {
    /// `Some(v)` sets the value, `None` clears it
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Set(v),
            None => Self::Clear,
        }
    }
}
