//! The Declaration Emitter (spec.md §4.E): message shape declarations, enum
//! declarations, and base-value prototypes.
//!
//! Grounded on `prost_build::code_generator::CodeGenerator::append_message`/
//! `append_enum`'s per-field iteration, generalized from `syn` token
//! construction to this crate's `ast::Declaration` model.

use log::debug;
use prost_types::{DescriptorProto, EnumDescriptorProto, FileDescriptorProto};

use crate::ast::{CodeFile, Comments, Declaration, EnumValueDecl, FieldDecl, PrototypeEntry};
use crate::classify::is_within_oneof;
use crate::comments::{child_path, comments_for_path, ENUM_VALUE, MESSAGE_FIELD};
use crate::error::Result;
use crate::ident::{to_lower_camel, to_upper_camel};
use crate::module::Module;
use crate::type_map::TypeMap;
use crate::type_name::{scalar_default_literal, TypeExpression};

use super::fields::field_type_expression;

/// Emits `export interface <name> { ... }` for one message (§4.E).
///
/// Types resolved from another output module are registered on `file`'s
/// import set; a reference to a type declared in `own_module` (this file)
/// is not, since the declaration pass has already placed it in the same file.
/// `message_path` is this message's `SourceCodeInfo` path, used to look up
/// its own and its fields' doc comments in `source_file` (spec.md §3
/// "Comment / doc propagation").
#[allow(clippy::too_many_arguments)]
pub fn emit_message_interface(
    flat_name: &str,
    message: &DescriptorProto,
    message_path: &[i32],
    source_file: &FileDescriptorProto,
    type_map: &TypeMap,
    own_module: &Module,
    file: &mut CodeFile,
) -> Result<()> {
    debug!("emitting interface {flat_name} ({} field(s))", message.field.len());
    let mut fields = Vec::with_capacity(message.field.len());
    for (idx, field) in message.field.iter().enumerate() {
        debug!("emitting field {flat_name}.{}", field.name());
        let type_expr = field_type_expression(flat_name, field, type_map)?;
        register_import(&type_expr, own_module, file);
        fields.push(FieldDecl {
            name: to_lower_camel(field.name()),
            type_expr: type_expr.render(),
            comments: comments_for_path(source_file, &child_path(message_path, MESSAGE_FIELD, idx)),
        });
    }
    file.push(Declaration::Interface {
        name: flat_name.to_owned(),
        comments: comments_for_path(source_file, message_path),
        fields,
    });
    Ok(())
}

/// Emits `export enum <name> { ... }` for one enum (§4.E). `enum_path` is
/// this enum's `SourceCodeInfo` path, used the same way `message_path` is in
/// [`emit_message_interface`].
pub fn emit_enum_declaration(
    flat_name: &str,
    enum_desc: &EnumDescriptorProto,
    enum_path: &[i32],
    source_file: &FileDescriptorProto,
    file: &mut CodeFile,
) {
    debug!("emitting enum {flat_name} ({} value(s))", enum_desc.value.len());
    let values = enum_desc
        .value
        .iter()
        .enumerate()
        .map(|(idx, v)| EnumValueDecl {
            name: to_upper_camel(v.name()),
            number: v.number(),
            comments: comments_for_path(source_file, &child_path(enum_path, ENUM_VALUE, idx)),
        })
        .collect();
    file.push(Declaration::Enum {
        name: flat_name.to_owned(),
        comments: comments_for_path(source_file, enum_path),
        values,
    });
}

/// Emits `const base<Name>: object = { ... }` for one message (§4.E, §9, P7):
/// exactly the non-oneof fields, each at its scalar default. Oneof fields and
/// message-typed fields receive no key (they default to absent).
pub fn emit_base_prototype(flat_name: &str, message: &DescriptorProto) -> Declaration {
    let mut entries = Vec::new();
    for field in &message.field {
        if is_within_oneof(field) {
            continue;
        }
        if field.r#type() == prost_types::field_descriptor_proto::Type::Message {
            continue;
        }
        entries.push(PrototypeEntry {
            name: to_lower_camel(field.name()),
            default_literal: scalar_default_literal(field.r#type()).to_owned(),
        });
    }
    Declaration::BasePrototype {
        message_name: flat_name.to_owned(),
        entries,
    }
}

pub(super) fn register_import(expr: &TypeExpression, own_module: &Module, file: &mut CodeFile) {
    match expr {
        TypeExpression::Imported { module, type_id } => {
            if module != own_module {
                file.import(module.clone(), type_id.clone());
            }
        }
        TypeExpression::Optional(inner) | TypeExpression::Sequence(inner) => {
            register_import(inner, own_module, file)
        }
        TypeExpression::Native(_) => {}
    }
}
