//! The Descriptor Visitor (spec.md §4.D): a pre-order walk of a file's
//! message/enum tree that produces `(fully_qualified_name, descriptor)`
//! pairs with correct nested-name flattening.
//!
//! Grounded on `prost_build::code_generator::{push_messages, push_enums}`'s
//! nested traversal, and `prost_build::context::register_message`'s
//! fully-qualified-name accumulation (`prefix + name`, recursing with
//! `prefix + name + "."`).

use log::trace;
use prost_types::{DescriptorProto, EnumDescriptorProto, FileDescriptorProto};

use crate::comments::{FILE_ENUM_TYPE, FILE_MESSAGE_TYPE, MESSAGE_ENUM_TYPE, MESSAGE_NESTED_TYPE};
use crate::ident::to_upper_camel;

/// A message found during traversal, together with its proto-dotted fully
/// qualified name and its flattened output identifier (invariant 2: nested
/// type names are flattened by replacing `.` with `_`, e.g. `Foo.Bar` ->
/// `Foo_Bar`).
#[derive(Debug)]
pub struct VisitedMessage<'a> {
    /// Dotted, package-qualified proto name, without a leading dot.
    pub fq_name: String,
    /// The flattened output identifier, e.g. `Foo_Bar`.
    pub flat_name: String,
    /// This message's `SourceCodeInfo` path, e.g. `[4, 0]` for the first
    /// top-level message or `[4, 0, 3, 1]` for its second nested type.
    pub path: Vec<i32>,
    pub descriptor: &'a DescriptorProto,
}

/// An enum found during traversal; same naming scheme as [`VisitedMessage`].
#[derive(Debug)]
pub struct VisitedEnum<'a> {
    pub fq_name: String,
    pub flat_name: String,
    pub path: Vec<i32>,
    pub descriptor: &'a EnumDescriptorProto,
}

/// Walks every message and enum in `file`, in pre-order (spec.md §4.D).
///
/// Top-level messages come from `file.message_type`, top-level enums from
/// `file.enum_type`; nested messages/enums come from `nested_type`/
/// `enum_type` on each `DescriptorProto`, recursively.
pub fn visit_file(file: &FileDescriptorProto) -> (Vec<VisitedMessage<'_>>, Vec<VisitedEnum<'_>>) {
    let package = file.package.clone().unwrap_or_default();
    let mut messages = Vec::new();
    let mut enums = Vec::new();

    for (idx, enum_type) in file.enum_type.iter().enumerate() {
        push_enum(&package, "", "", &[FILE_ENUM_TYPE, idx as i32], enum_type, &mut enums);
    }
    for (idx, message) in file.message_type.iter().enumerate() {
        visit_message(&package, "", "", &[FILE_MESSAGE_TYPE, idx as i32], message, &mut messages, &mut enums);
    }

    trace!(
        "visited {} message(s) and {} enum(s) in {}",
        messages.len(),
        enums.len(),
        file.name()
    );
    (messages, enums)
}

#[allow(clippy::too_many_arguments)]
fn visit_message<'a>(
    package: &str,
    proto_prefix: &str,
    flat_prefix: &str,
    path: &[i32],
    message: &'a DescriptorProto,
    messages: &mut Vec<VisitedMessage<'a>>,
    enums: &mut Vec<VisitedEnum<'a>>,
) {
    let name = message.name.as_deref().unwrap_or_default();
    let proto_path = format!("{proto_prefix}{name}");
    let flat_name = format!("{flat_prefix}{}", to_upper_camel(name));

    for (idx, enum_type) in message.enum_type.iter().enumerate() {
        let mut enum_path = path.to_vec();
        enum_path.extend([MESSAGE_ENUM_TYPE, idx as i32]);
        push_enum(package, &format!("{proto_path}."), &format!("{flat_name}_"), &enum_path, enum_type, enums);
    }

    trace!("visiting message {flat_name} ({} field(s))", message.field.len());
    messages.push(VisitedMessage {
        fq_name: qualify(package, &proto_path),
        flat_name: flat_name.clone(),
        path: path.to_vec(),
        descriptor: message,
    });

    let next_proto_prefix = format!("{proto_path}.");
    let next_flat_prefix = format!("{flat_name}_");
    for (idx, nested) in message.nested_type.iter().enumerate() {
        // Synthetic map-entry messages are handled (or rejected) by the
        // caller before traversal ever reaches them; see the Non-goals
        // section of spec.md §1 (map fields are out of scope for this core).
        let mut nested_path = path.to_vec();
        nested_path.extend([MESSAGE_NESTED_TYPE, idx as i32]);
        visit_message(package, &next_proto_prefix, &next_flat_prefix, &nested_path, nested, messages, enums);
    }
}

fn push_enum<'a>(
    package: &str,
    proto_prefix: &str,
    flat_prefix: &str,
    path: &[i32],
    enum_type: &'a EnumDescriptorProto,
    enums: &mut Vec<VisitedEnum<'a>>,
) {
    let name = enum_type.name.as_deref().unwrap_or_default();
    trace!("visiting enum {flat_prefix}{name} ({} value(s))", enum_type.value.len());
    enums.push(VisitedEnum {
        fq_name: qualify(package, &format!("{proto_prefix}{name}")),
        flat_name: format!("{flat_prefix}{}", to_upper_camel(name)),
        path: path.to_vec(),
        descriptor: enum_type,
    });
}

fn qualify(package: &str, path: &str) -> String {
    if package.is_empty() {
        path.to_owned()
    } else {
        format!("{package}.{path}")
    }
}
