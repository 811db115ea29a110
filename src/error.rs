//! Error type returned by `Container` and `Item` mutation operations.
//!
//! Mirrors the construction style of `tomllib`'s original `TOMLError`: building
//! an error logs a `warn!` line through the `log` facade before the value is
//! returned, so a caller running with `RUST_LOG=warn` sees every rejected
//! mutation without instrumenting call sites.

use std::fmt;

use crate::key::Key;

/// Everything that can go wrong while building or mutating a [`crate::container::Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TomlDocError {
    /// `append`/`add` was given a key that already names an entry that cannot
    /// be merged with the new one (see the duplicate-key table in the
    /// container's module docs).
    KeyAlreadyPresent(Key),
    /// A lookup, removal, replacement, or `insert_after` anchor named a key
    /// that is not present in the container.
    NonExistentKey(Key),
    /// A dotted-key definition collides structurally with an existing
    /// super-table (or vice versa) in a way that cannot be reconciled.
    Redefinition(Key),
    /// `insert_at` was given an index past the end of the body.
    InvalidInsertion {
        /// The index the caller asked to insert at.
        index: usize,
        /// The current length of the body.
        len: usize,
    },
    /// `add`/`append` was given a value item (not `Whitespace`/`Comment`)
    /// without a key.
    UnkeyedItem,
    /// `item()` coercion was given a host value it has no TOML
    /// representation for.
    UnsupportedCoercion(&'static str),
    /// An `Array` does not support slice assignment, only single-index
    /// reads and writes.
    SliceAssignNotSupported,
    /// `AoT` elements are appended or inserted, never replaced in place.
    UnsupportedAotAssignment,
}

impl fmt::Display for TomlDocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TomlDocError::KeyAlreadyPresent(key) => {
                write!(f, "key '{}' is already present", key.name())
            }
            TomlDocError::NonExistentKey(key) => {
                write!(f, "key '{}' does not exist", key.name())
            }
            TomlDocError::Redefinition(key) => {
                write!(f, "'{}' cannot be redefined in this position", key.name())
            }
            TomlDocError::InvalidInsertion { index, len } => {
                write!(f, "cannot insert at index {} into a body of length {}", index, len)
            }
            TomlDocError::UnkeyedItem => {
                write!(f, "a value item was appended without a key")
            }
            TomlDocError::UnsupportedCoercion(ty) => {
                write!(f, "cannot coerce a value of type '{}' into a TOML item", ty)
            }
            TomlDocError::SliceAssignNotSupported => {
                write!(f, "array slice assignment is not supported")
            }
            TomlDocError::UnsupportedAotAssignment => {
                write!(f, "array-of-tables elements cannot be replaced in place")
            }
        }
    }
}

impl std::error::Error for TomlDocError {}

impl TomlDocError {
    pub(crate) fn key_already_present(key: Key) -> Self {
        let err = TomlDocError::KeyAlreadyPresent(key);
        log::warn!("{}", err);
        err
    }

    pub(crate) fn non_existent_key(key: Key) -> Self {
        let err = TomlDocError::NonExistentKey(key);
        log::warn!("{}", err);
        err
    }

    pub(crate) fn redefinition(key: Key) -> Self {
        let err = TomlDocError::Redefinition(key);
        log::warn!("{}", err);
        err
    }

    pub(crate) fn invalid_insertion(index: usize, len: usize) -> Self {
        let err = TomlDocError::InvalidInsertion { index, len };
        log::warn!("{}", err);
        err
    }

    pub(crate) fn unkeyed_item() -> Self {
        let err = TomlDocError::UnkeyedItem;
        log::warn!("{}", err);
        err
    }

    pub(crate) fn unsupported_coercion(ty: &'static str) -> Self {
        let err = TomlDocError::UnsupportedCoercion(ty);
        log::warn!("{}", err);
        err
    }

    pub(crate) fn slice_assign_not_supported() -> Self {
        let err = TomlDocError::SliceAssignNotSupported;
        log::warn!("{}", err);
        err
    }

    pub(crate) fn unsupported_aot_assignment() -> Self {
        let err = TomlDocError::UnsupportedAotAssignment;
        log::warn!("{}", err);
        err
    }
}

pub type Result<T> = std::result::Result<T, TomlDocError>;
