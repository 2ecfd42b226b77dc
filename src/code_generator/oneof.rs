//! Tagged-union oneof representation (spec.md §9 REDESIGN FLAGS).
//!
//! This core currently emits oneof members as ordinary optional fields
//! (each rendered individually by [`crate::code_generator::fields`]), not as
//! a tagged union. A future redesign should expose a oneof as
//! `{ field: "a", value: T } | { field: "b", value: U }` so "at most one
//! set" becomes a type-level invariant instead of a runtime convention.
//! This module is that redesign's entry point; it is not called from
//! [`crate::code_generator::generate_file`] today.

use multimap::MultiMap;
use prost_types::{DescriptorProto, FieldDescriptorProto};

use crate::ast::{Declaration, EnumValueDecl};
use crate::error::Result;
use crate::ident::to_lower_camel;
use crate::type_map::TypeMap;

use super::fields::field_type_expression;

/// Groups a message's fields by their `oneof_index`, in declaration order
/// within each group. Grounded on `prost_build::context`'s use of
/// `multimap::MultiMap` to collect oneof members before rendering, which
/// this crate follows rather than hand-rolling a `HashMap<_, Vec<_>>`.
pub fn group_oneof_members(message: &DescriptorProto) -> MultiMap<i32, &FieldDescriptorProto> {
    let mut groups = MultiMap::new();
    for field in &message.field {
        if let Some(index) = field.oneof_index {
            groups.insert(index, field);
        }
    }
    groups
}

/// Builds the tagged-union declaration for one oneof group: one variant per
/// member field, discriminated by a `field` tag holding the member's name.
///
/// Unused while the declaration pass emits plain optional properties
/// instead; kept as the skeleton named in spec.md §9.
pub fn generate_one_of_property(
    message: &DescriptorProto,
    oneof_index: i32,
    members: &[&FieldDescriptorProto],
    type_map: &TypeMap,
) -> Result<Declaration> {
    let oneof_name = message
        .oneof_decl
        .get(oneof_index as usize)
        .and_then(|o| o.name.as_deref())
        .unwrap_or("oneof");

    let mut values = Vec::with_capacity(members.len());
    for field in members {
        // Resolved purely to surface UnknownType/UnhandledFieldShape early;
        // the rendered type itself belongs on the eventual union variant.
        let _type_expr = field_type_expression(message.name(), field, type_map)?;
        values.push(EnumValueDecl {
            name: field.name().to_owned(),
            number: field.number(),
            comments: Default::default(),
        });
    }

    // A real implementation would emit a union-of-interfaces declaration
    // here; `Declaration::Enum` stands in as the nearest existing variant
    // until the code model grows a `Union` declaration kind.
    Ok(Declaration::Enum {
        name: to_lower_camel(oneof_name),
        comments: Default::default(),
        values,
    })
}
