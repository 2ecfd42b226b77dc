//! The Decoder Emitter (spec.md §4.G): synthesizes the body of
//! `decode<Name>(reader, length?) -> Message`.
//!
//! Grounded on `prost::encoding::merge_loop`'s tag-read/dispatch/skip shape
//! and `prost_build`'s per-field `merge_field` match arms, generalized to a
//! `switch (tag >>> 3)` dispatch over the runtime surface spec.md §6 names.

use log::trace;
use prost_types::DescriptorProto;

use crate::ast::{CodeFile, Declaration, FunctionBody};
use crate::classify::{
    is_64_bit_int, is_message, is_packable, is_repeated, is_wrapper_value, to_reader_call,
};
use crate::error::{Error, Result};
use crate::ident::to_lower_camel;
use crate::module::Module;
use crate::type_map::TypeMap;

/// Emits the `Declaration::DecodeFn` for one message (§4.G), registering an
/// import on `file` for every nested/wrapper message type it references
/// that isn't declared in `own_module`.
pub fn emit_decode_fn(
    flat_name: &str,
    message: &DescriptorProto,
    type_map: &TypeMap,
    own_module: &Module,
    file: &mut CodeFile,
) -> Result<Declaration> {
    let mut body = FunctionBody::default();
    body.push("const end = length === undefined ? reader.len : reader.pos + length;");
    body.push(format!("const message = clone(base{flat_name});"));
    for field in &message.field {
        if is_repeated(field) {
            body.push(format!("message.{} = [];", to_lower_camel(field.name())));
        }
    }
    body.push("while (reader.pos < end) {");
    body.push("  const tag = reader.uint32();");
    body.push("  switch (tag >>> 3) {");
    for field in &message.field {
        body.push(format!("    case {}: {{", field.number()));
        for line in field_decode_statements(flat_name, field, type_map, own_module, file)? {
            body.push(format!("      {line}"));
        }
        body.push("      break;".to_owned());
        body.push("    }".to_owned());
    }
    body.push("    default:");
    body.push("      reader.skipType(tag & 7);");
    body.push("      break;");
    body.push("  }");
    body.push("}");
    body.push("return message;");
    Ok(Declaration::DecodeFn {
        message_name: flat_name.to_owned(),
        body,
    })
}

fn field_decode_statements(
    owner_flat_name: &str,
    field: &prost_types::FieldDescriptorProto,
    type_map: &TypeMap,
    own_module: &Module,
    file: &mut CodeFile,
) -> Result<Vec<String>> {
    let field_name = to_lower_camel(field.name());
    let access = format!("message.{field_name}");
    trace!("decoding field {owner_flat_name}.{field_name}");

    if is_repeated(field) {
        if is_packable(field) {
            let scalar_method = to_reader_call(field.r#type()).ok_or_else(|| unhandled(owner_flat_name, field))?;
            return Ok(vec![
                "if ((tag & 7) === 2) {".to_owned(),
                "  const packedEnd = reader.pos + reader.uint32();".to_owned(),
                format!("  while (reader.pos < packedEnd) {access}.push(reader.{scalar_method}());"),
                "} else {".to_owned(),
                format!("  {access}.push(reader.{scalar_method}());"),
                "}".to_owned(),
            ]);
        }
        let single = single_value_read_expr(owner_flat_name, field)?;
        return Ok(vec![format!("{access}.push({single});")]);
    }

    if is_wrapper_value(field) {
        let type_name = field.type_name.as_deref().unwrap_or_default();
        let (module, type_id) = type_map.lookup(type_name)?;
        if module != own_module {
            file.import(module.clone(), type_id.to_owned());
        }
        return Ok(vec![format!(
            "{access} = {type_id}.decode(reader, reader.uint32()).value;"
        )]);
    }

    if is_message(field) {
        let type_name = field.type_name.as_deref().unwrap_or_default();
        let (module, type_id) = type_map.lookup(type_name)?;
        if module != own_module {
            file.import(module.clone(), type_id.to_owned());
        }
        return Ok(vec![format!("{access} = {type_id}.decode(reader, reader.uint32());")]);
    }

    let expr = single_value_read_expr(owner_flat_name, field)?;
    Ok(vec![format!("{access} = {expr};")])
}

fn single_value_read_expr(
    owner_flat_name: &str,
    field: &prost_types::FieldDescriptorProto,
) -> Result<String> {
    let scalar_method = to_reader_call(field.r#type()).ok_or_else(|| unhandled(owner_flat_name, field))?;
    if is_64_bit_int(field.r#type()) {
        Ok(format!("longToNumber(reader.{scalar_method}() as Long)"))
    } else {
        Ok(format!("reader.{scalar_method}()"))
    }
}

fn unhandled(message: &str, field: &prost_types::FieldDescriptorProto) -> Error {
    Error::UnhandledFieldShape {
        message: message.to_owned(),
        field: field.name().to_owned(),
    }
}
