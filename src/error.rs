//! Errors produced while translating descriptors into generated source.

use thiserror::Error;

/// Failures the translator itself can raise.
///
/// Both variants are fatal for the file currently being generated; other
/// files in a batch are unaffected (see the crate's concurrency notes).
/// `ValueOutOfRange`, the third error kind the wire format can raise, is not
/// a member of this enum: it is only ever thrown *by generated code*, at
/// decode time, not by this crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A field's `type_name` does not resolve to any entry in the [`TypeMap`](crate::type_map::TypeMap).
    #[error("unknown type referenced: {0}")]
    UnknownType(String),

    /// A field's `(type, label)` combination is not one the emitters handle.
    #[error("message {message}: field {field} has an unhandled (type, label) combination")]
    UnhandledFieldShape { message: String, field: String },
}

pub type Result<T> = std::result::Result<T, Error>;
