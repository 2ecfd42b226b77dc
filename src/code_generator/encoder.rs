//! The Encoder Emitter (spec.md §4.F): synthesizes the body of
//! `encode<Name>(message, writer?) -> writer`.
//!
//! Grounded on `prost::encoding`'s `encode_key`/`key_len` tag arithmetic and
//! `prost_build`'s per-field `encode_field`/`encode_repeated_field`
//! dispatch, generalized from direct byte writes to the `writer.<method>()`
//! call surface spec.md §6 names for the runtime.

use log::trace;
use prost_types::DescriptorProto;

use crate::ast::{CodeFile, Declaration, FunctionBody};
use crate::classify::{
    basic_wire_type, is_message, is_packable, is_repeated, is_within_oneof, is_wrapper_value, tag,
    to_reader_call, LENGTH_DELIMITED_WIRE_TYPE,
};
use crate::error::{Error, Result};
use crate::ident::to_lower_camel;
use crate::module::Module;
use crate::type_map::TypeMap;

/// Emits the `Declaration::EncodeFn` for one message (§4.F), registering an
/// import on `file` for every nested/wrapper message type it references
/// that isn't declared in `own_module`.
pub fn emit_encode_fn(
    flat_name: &str,
    message: &DescriptorProto,
    type_map: &TypeMap,
    own_module: &Module,
    file: &mut CodeFile,
) -> Result<Declaration> {
    let mut body = FunctionBody::default();
    for field in &message.field {
        for statement in field_encode_statements(flat_name, field, type_map, own_module, file, "message")? {
            body.push(statement);
        }
    }
    Ok(Declaration::EncodeFn {
        message_name: flat_name.to_owned(),
        body,
    })
}

/// The statements that write one field, given the receiver expression
/// (`"message"` at the top level, or a loop variable when unwound from a
/// repeated field).
#[allow(clippy::too_many_arguments)]
fn field_encode_statements(
    owner_flat_name: &str,
    field: &prost_types::FieldDescriptorProto,
    type_map: &TypeMap,
    own_module: &Module,
    file: &mut CodeFile,
    receiver: &str,
) -> Result<Vec<String>> {
    let field_name = to_lower_camel(field.name());
    let access = format!("{receiver}.{field_name}");
    trace!("encoding field {owner_flat_name}.{field_name}");

    if is_repeated(field) {
        if is_packable(field) {
            let scalar_method = to_reader_call(field.r#type()).ok_or_else(|| unhandled(owner_flat_name, field))?;
            let field_tag = tag(field.number(), LENGTH_DELIMITED_WIRE_TYPE);
            return Ok(vec![
                format!("writer.uint32({field_tag}).fork();"),
                format!("for (const v of {access}) writer.{scalar_method}(v);"),
                "writer.ldelim();".to_owned(),
            ]);
        }
        let inner = field_encode_statements(owner_flat_name, field, type_map, own_module, file, "v")?;
        let mut out = vec![format!("for (const v of {access}) {{")];
        out.extend(inner.into_iter().map(|line| format!("  {line}")));
        out.push("}".to_owned());
        return Ok(out);
    }

    if is_wrapper_value(field) || is_message(field) {
        return Ok(vec![nested_or_wrapper_write(
            field,
            type_map,
            own_module,
            file,
            &access,
            owner_flat_name,
        )?]);
    }

    let scalar_method = to_reader_call(field.r#type()).ok_or_else(|| unhandled(owner_flat_name, field))?;
    let field_tag = tag(field.number(), basic_wire_type(field.r#type()).ok_or_else(|| unhandled(owner_flat_name, field))?);

    // A scalar member of a oneof is still just a scalar write (spec.md §4.F's
    // "within oneof, single" row): same presence-guard style as a nested
    // message/wrapper, not routed through their type lookup.
    if is_within_oneof(field) {
        return Ok(vec![format!(
            "if ({access} !== undefined) writer.uint32({field_tag}).{scalar_method}({access});"
        )]);
    }

    Ok(vec![format!("writer.uint32({field_tag}).{scalar_method}({access});")])
}

fn nested_or_wrapper_write(
    field: &prost_types::FieldDescriptorProto,
    type_map: &TypeMap,
    own_module: &Module,
    file: &mut CodeFile,
    access: &str,
    owner_flat_name: &str,
) -> Result<String> {
    let type_name = field.type_name.as_deref().ok_or_else(|| unhandled(owner_flat_name, field))?;
    let (module, type_id) = type_map.lookup(type_name)?;
    if module != own_module {
        file.import(module.clone(), type_id.to_owned());
    }
    let field_tag = tag(field.number(), LENGTH_DELIMITED_WIRE_TYPE);
    if is_wrapper_value(field) {
        Ok(format!(
            "if ({access} !== undefined) {type_id}.encode({{ value: {access} }}, writer.uint32({field_tag}).fork()).ldelim();"
        ))
    } else {
        Ok(format!(
            "if ({access} !== undefined) {type_id}.encode({access}, writer.uint32({field_tag}).fork()).ldelim();"
        ))
    }
}

fn unhandled(message: &str, field: &prost_types::FieldDescriptorProto) -> Error {
    Error::UnhandledFieldShape {
        message: message.to_owned(),
        field: field.name().to_owned(),
    }
}
