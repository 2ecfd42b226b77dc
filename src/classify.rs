//! The Type Classifier (spec.md §4.B): pure predicates over a field
//! descriptor, plus the wire-type/reader-call/packability tables that the
//! Encoder and Decoder Emitters (§4.F/§4.G) consult.
//!
//! Grounded on `prost_build::code_generator`'s `can_pack`/`field_type_tag`
//! free functions, which perform the same classification over the same
//! `FieldDescriptorProto` shape, though there they feed `syn` token
//! construction rather than a text emitter.

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::FieldDescriptorProto;

use crate::type_map::TypeMap;

/// `is_message(f)` (§4.B).
pub fn is_message(field: &FieldDescriptorProto) -> bool {
    field.r#type() == Type::Message
}

/// `is_primitive(f)` (§4.B): everything but messages, including enums,
/// which travel on the wire as varints.
pub fn is_primitive(field: &FieldDescriptorProto) -> bool {
    !is_message(field)
}

/// `is_repeated(f)` (§4.B).
pub fn is_repeated(field: &FieldDescriptorProto) -> bool {
    field.label() == Label::Repeated
}

/// `is_within_oneof(f)` (§4.B).
pub fn is_within_oneof(field: &FieldDescriptorProto) -> bool {
    field.oneof_index.is_some()
}

/// `is_wrapper_value(f)` (§4.B): whether the field's `type_name` names one
/// of the wrapper value types the TypeMap special-cases.
pub fn is_wrapper_value(field: &FieldDescriptorProto) -> bool {
    field
        .type_name
        .as_deref()
        .is_some_and(TypeMap::is_wrapper_value)
}

/// The protobuf wire type (0=varint, 1=64-bit, 2=length-delimited,
/// 5=32-bit) for a scalar primitive's `type`. Defined exactly for scalar
/// primitives (invariant 4); messages and groups use wire type 2 via their
/// own length-delimited framing, handled separately by the emitters.
pub fn basic_wire_type(ty: Type) -> Option<u32> {
    match ty {
        Type::Int32 | Type::Int64 | Type::Uint32 | Type::Uint64 | Type::Sint32 | Type::Sint64 | Type::Bool | Type::Enum => Some(0),
        Type::Fixed64 | Type::Sfixed64 | Type::Double => Some(1),
        Type::String | Type::Bytes => Some(2),
        Type::Fixed32 | Type::Sfixed32 | Type::Float => Some(5),
        Type::Message | Type::Group => None,
    }
}

/// Wire type for a nested message or the length-delimited framing used
/// around a packed repeated block: always 2.
pub const LENGTH_DELIMITED_WIRE_TYPE: u32 = 2;

/// `(field.number << 3) | wire_type`, unsigned 32-bit (§4.F, P4).
pub fn tag(field_number: i32, wire_type: u32) -> u32 {
    ((field_number as u32) << 3) | wire_type
}

/// The `Reader`/`Writer` method name used to read or write a scalar
/// primitive's value (§6's runtime surface), defined exactly for scalar
/// primitives per invariant 4.
pub fn to_reader_call(ty: Type) -> Option<&'static str> {
    match ty {
        Type::Double => Some("double"),
        Type::Float => Some("float"),
        Type::Int32 => Some("int32"),
        Type::Int64 => Some("int64"),
        Type::Uint32 => Some("uint32"),
        Type::Uint64 => Some("uint64"),
        Type::Sint32 => Some("sint32"),
        Type::Sint64 => Some("sint64"),
        Type::Fixed32 => Some("fixed32"),
        Type::Fixed64 => Some("fixed64"),
        Type::Sfixed32 => Some("sfixed32"),
        Type::Sfixed64 => Some("sfixed64"),
        Type::Bool => Some("bool"),
        Type::String => Some("string"),
        Type::Bytes => Some("bytes"),
        Type::Enum => Some("int32"),
        Type::Message | Type::Group => None,
    }
}

/// Whether reading this scalar type needs 64-bit-safe-integer narrowing
/// (§4.G: `longToNumber`).
pub fn is_64_bit_int(ty: Type) -> bool {
    matches!(
        ty,
        Type::Int64 | Type::Uint64 | Type::Sint64 | Type::Fixed64 | Type::Sfixed64
    )
}

/// `packedType(field.type)` (invariant 4): defined exactly for packable
/// types, i.e. scalar numerics and enums (strings, bytes, and messages are
/// never packable).
pub fn packed_type(ty: Type) -> Option<&'static str> {
    match ty {
        Type::String | Type::Bytes | Type::Message | Type::Group => None,
        other => to_reader_call(other),
    }
}

/// Whether a field is packable: repeated, and its scalar type supports
/// packing (§4.F: "A field is packable iff packedType(field.type) is
/// defined").
pub fn is_packable(field: &FieldDescriptorProto) -> bool {
    is_repeated(field) && is_primitive(field) && packed_type(field.r#type()).is_some()
}
