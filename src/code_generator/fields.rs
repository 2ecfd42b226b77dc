//! Shared field-to-type-expression resolution (spec.md §4.C), used by both
//! the Declaration Emitter and the Encoder/Decoder Emitters so the three
//! agree on exactly the same type for a given field.

use prost_types::field_descriptor_proto::Type;
use prost_types::FieldDescriptorProto;

use crate::classify::{is_message, is_repeated, is_within_oneof};
use crate::error::{Error, Result};
use crate::type_map::TypeMap;
use crate::type_name::{basic_type_name, TypeExpression};

/// Applies §4.C's four-step rule to one field:
/// 1. base type (scalar table, or TypeMap lookup for message/enum),
/// 2. wrap `base | none` if within a oneof,
/// 3. else wrap `base | none` if a (non-oneof) message,
/// 4. wrap `sequence_of<result>` if repeated.
///
/// Rejects map fields (desugared `map<K, V>` entries) with
/// `Error::UnhandledFieldShape`, per the Non-goals in spec.md §1.
pub fn field_type_expression(
    owner_flat_name: &str,
    field: &FieldDescriptorProto,
    type_map: &TypeMap,
) -> Result<TypeExpression> {
    if let Some(type_name) = field.type_name.as_deref() {
        if type_map.is_map_entry(type_name) {
            return Err(Error::UnhandledFieldShape {
                message: owner_flat_name.to_owned(),
                field: field.name().to_owned(),
            });
        }
    }

    let base = base_type_expression(field, type_map)?;

    let nullable = is_within_oneof(field) || is_message(field);
    // A wrapper value (§4.A) already resolves to `T | none`; don't double-wrap it.
    let shaped = if nullable && !matches!(base, TypeExpression::Optional(_)) {
        TypeExpression::Optional(Box::new(base))
    } else {
        base
    };

    Ok(if is_repeated(field) {
        TypeExpression::Sequence(Box::new(shaped))
    } else {
        shaped
    })
}

fn base_type_expression(field: &FieldDescriptorProto, type_map: &TypeMap) -> Result<TypeExpression> {
    match field.r#type() {
        Type::Message | Type::Enum => {
            let type_name = field.type_name.as_deref().unwrap_or_default();
            type_map.resolve(type_name, false)
        }
        other => Ok(TypeExpression::Native(basic_type_name(other))),
    }
}
