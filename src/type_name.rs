//! The Type Expression model (spec.md §4.C): a small tree describing how a
//! field's proto type renders as output-language syntax, plus the scalar
//! default-value literals used by the Base Prototype builder (§4.E, §9).
//!
//! Grounded on `protomon_build::codegen::types::RustType`'s
//! base/optional/repeated shape, generalized away from `TokenStream` since
//! the emitted language isn't Rust: nullability is a `T | none` union and
//! repetition is `sequence_of<T>` rather than `Option<T>`/`Vec<T>`.

use std::fmt;

use prost_types::field_descriptor_proto::Type;

use crate::module::Module;

/// A type as it will be written into a generated declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpression {
    /// A type the output language provides natively (`string`, `i32`, `bool`, ...).
    Native(&'static str),
    /// A message or enum type defined in (possibly) another output module.
    Imported { module: Module, type_id: String },
    /// `T | none` (spec.md's nullable-union spelling of "optional").
    Optional(Box<TypeExpression>),
    /// `sequence_of<T>` (spec.md's spelling of "repeated").
    Sequence(Box<TypeExpression>),
}

impl TypeExpression {
    /// Renders the syntax spec.md illustrates in its worked examples.
    pub fn render(&self) -> String {
        match self {
            TypeExpression::Native(name) => (*name).to_owned(),
            TypeExpression::Imported { type_id, .. } => type_id.clone(),
            TypeExpression::Optional(inner) => format!("{} | none", inner.render()),
            TypeExpression::Sequence(inner) => format!("sequence_of<{}>", inner.render()),
        }
    }
}

impl fmt::Display for TypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// The native output-language name for a scalar wire type (§4.C / §4.B's
/// scalar table), independent of any particular field's cardinality.
pub fn basic_type_name(ty: Type) -> &'static str {
    match ty {
        Type::Double => "f64",
        Type::Float => "f32",
        Type::Int32
        | Type::Sint32
        | Type::Sfixed32
        | Type::Fixed32
        | Type::Uint32 => "i32",
        Type::Int64
        | Type::Sint64
        | Type::Sfixed64
        | Type::Fixed64
        | Type::Uint64 => "i64",
        Type::Bool => "bool",
        Type::String => "string",
        Type::Bytes => "bytes",
        // Message, Enum, Group are resolved through the TypeMap instead.
        Type::Message | Type::Group => "object",
        Type::Enum => "i32",
    }
}

/// The default-value literal a scalar field takes when absent from the wire
/// (spec.md §9, the Base Prototype builder's zero-value table).
pub fn scalar_default_literal(ty: Type) -> &'static str {
    match ty {
        Type::Double | Type::Float => "0.0",
        Type::Int32
        | Type::Sint32
        | Type::Sfixed32
        | Type::Fixed32
        | Type::Uint32
        | Type::Int64
        | Type::Sint64
        | Type::Sfixed64
        | Type::Fixed64
        | Type::Uint64
        | Type::Enum => "0",
        Type::Bool => "false",
        Type::String => "\"\"",
        Type::Bytes => "new Uint8Array(0)",
        Type::Message | Type::Group => "undefined",
    }
}
