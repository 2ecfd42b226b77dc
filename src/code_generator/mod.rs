//! Ties the Declaration Emitter (§4.E), Encoder Emitter (§4.F), and Decoder
//! Emitter (§4.G) together into the two-pass, per-file generation spec.md
//! §4.D describes: a declarations pass followed by a codec pass, so that
//! forward references within a file always resolve.
//!
//! Grounded on `prost_build::code_generator::CodeGenerator::generate`,
//! which drives the same declarations-then-bodies shape over a `syn`-typed
//! code model; here the model is this crate's own [`crate::ast::CodeFile`].

mod declarations;
mod decoder;
mod encoder;
mod fields;
pub mod oneof;

use log::debug;
use prost_types::field_descriptor_proto::Type;
use prost_types::FileDescriptorProto;

use crate::ast::{CodeFile, Declaration};
use crate::error::Result;
use crate::module::Module;
use crate::type_map::TypeMap;
use crate::visitor::visit_file;

/// Generates one [`CodeFile`] from one input descriptor (spec.md §4/§6).
///
/// `type_map` must already contain every message/enum referenced by `file`,
/// including those from other files in the batch (invariant 1).
pub fn generate_file(file: &FileDescriptorProto, type_map: &TypeMap) -> Result<CodeFile> {
    let mut code_file = CodeFile::new();
    let own_module = Module::from_file_name(file.name.as_deref().unwrap_or_default());
    let (messages, enums) = visit_file(file);

    // Declarations pass (§4.D): every shape declaration before any codec
    // references one, so forward references within the file always resolve.
    for enum_ in &enums {
        declarations::emit_enum_declaration(&enum_.flat_name, enum_.descriptor, &enum_.path, file, &mut code_file);
    }
    for message in &messages {
        declarations::emit_message_interface(
            &message.flat_name,
            message.descriptor,
            &message.path,
            file,
            type_map,
            &own_module,
            &mut code_file,
        )?;
    }

    // Codec pass (§4.D): base prototypes, then encode/decode pairs.
    let mut needs_long_to_number = false;
    for message in &messages {
        debug!("emitting codec pair for {}", message.flat_name);
        code_file.push(declarations::emit_base_prototype(&message.flat_name, message.descriptor));
        let encode_fn = encoder::emit_encode_fn(&message.flat_name, message.descriptor, type_map, &own_module, &mut code_file)?;
        let decode_fn = decoder::emit_decode_fn(&message.flat_name, message.descriptor, type_map, &own_module, &mut code_file)?;
        code_file.push(encode_fn);
        code_file.push(decode_fn);
        if message.descriptor.field.iter().any(|f| is_64_bit(f.r#type())) {
            needs_long_to_number = true;
        }
    }

    // Every encode function calls `newWriter()` as its default argument
    // (§6's runtime surface), imported from `Config::runtime_path`.
    if !messages.is_empty() {
        let runtime_module = Module::from_parts([type_map.runtime_path().to_owned()]);
        code_file.import_runtime(runtime_module, "newWriter");
    }

    if needs_long_to_number {
        code_file.push(Declaration::LongToNumberHelper);
        let runtime_module = Module::from_parts([type_map.runtime_path().to_owned()]);
        code_file.import_runtime(runtime_module, "ValueOutOfRange");
    }

    Ok(code_file)
}

fn is_64_bit(ty: Type) -> bool {
    matches!(
        ty,
        Type::Int64 | Type::Uint64 | Type::Sint64 | Type::Fixed64 | Type::Sfixed64
    )
}
