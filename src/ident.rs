//! Utility functions for working with identifiers.
//!
//! Message and enum names are rendered `UpperCamel` and field names
//! `camelCase` regardless of their casing in the `.proto` source (spec
//! invariant: field names are camelCased in emitted code regardless of
//! snake_case origin; the wire `number` is what is load-bearing, not the
//! spelling).

use heck::{CamelCase, MixedCase};

/// Converts an identifier to `UpperCamel` case, for message and enum names.
pub fn to_upper_camel(s: &str) -> String {
    s.to_camel_case()
}

/// Converts an identifier to `lowerCamel` case, for field names.
pub fn to_lower_camel(s: &str) -> String {
    s.to_mixed_case()
}
