//! The Type Mapping Table (spec.md §4.A): maps fully-qualified proto type
//! names to `(output_module, output_type_identifier)` pairs so that
//! cross-file references become imports.
//!
//! Grounded on `prost_build::extern_paths::ExternPaths` (an upfront map from
//! proto path to a resolved target) for the wrapper-value special case, and
//! on `prost_build::code_generator::resolve_ident` for the general case of
//! turning a fully-qualified descriptor name into an identifier relative to
//! the emitting file.

use std::collections::HashMap;

use prost_types::FileDescriptorProto;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::module::Module;
use crate::type_name::TypeExpression;
use crate::visitor::visit_file;

/// The three `google.protobuf.*Value` wrapper types this core special-cases
/// (spec.md §4.A); proto2 extensions and groups are non-goals, so the set
/// stops at the three scalar wrappers the spec names rather than all nine
/// well-known wrapper types.
pub const WRAPPER_VALUE_TYPES: &[(&str, &str)] = &[
    ("google.protobuf.StringValue", "string"),
    ("google.protobuf.Int32Value", "i32"),
    ("google.protobuf.BoolValue", "bool"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct TypeMapEntry {
    module: Module,
    type_id: String,
}

/// A read-only table from fully-qualified proto type name (no leading dot)
/// to its output location. Built once from every input file (§3's "Core
/// entities" lifetime note: "The TypeMap is built once and read-only
/// thereafter"), then shared by reference across however many files are
/// generated from it.
#[derive(Debug, Default)]
pub struct TypeMap {
    entries: HashMap<String, TypeMapEntry>,
    map_entries: std::collections::HashSet<String>,
    wrapper_values: Vec<(String, &'static str)>,
    runtime_path: String,
}

impl TypeMap {
    /// Builds the table from every message and enum in `files`, using the
    /// default wrapper-value type set (spec.md §4.A).
    pub fn build(files: &[FileDescriptorProto]) -> Self {
        Self::build_with_config(files, &Config::default())
    }

    /// Builds the table from every message and enum in `files`, applying
    /// `config`'s wrapper-value overrides (SPEC_FULL.md §2:
    /// `Config::wrapper_value_type`).
    pub fn build_with_config(files: &[FileDescriptorProto], config: &Config) -> Self {
        let mut entries = HashMap::new();
        let mut map_entries = std::collections::HashSet::new();
        for file in files {
            let module = Module::from_file_name(file.name.as_deref().unwrap_or_default());
            let (messages, enums) = visit_file(file);
            for message in messages {
                if message
                    .descriptor
                    .options
                    .as_ref()
                    .and_then(|o| o.map_entry)
                    .unwrap_or(false)
                {
                    map_entries.insert(message.fq_name.clone());
                }
                entries.insert(
                    message.fq_name,
                    TypeMapEntry {
                        module: module.clone(),
                        type_id: message.flat_name,
                    },
                );
            }
            for enum_ in enums {
                entries.insert(
                    enum_.fq_name,
                    TypeMapEntry {
                        module: module.clone(),
                        type_id: enum_.flat_name,
                    },
                );
            }
        }
        Self {
            entries,
            map_entries,
            wrapper_values: config.wrapper_value_overrides.clone(),
            runtime_path: config.runtime_path.clone(),
        }
    }

    /// The module path emitted code should import the `Reader`/`Writer`
    /// runtime surface (§6) from (SPEC_FULL.md §2: `Config::runtime_path`).
    pub fn runtime_path(&self) -> &str {
        &self.runtime_path
    }

    /// Whether `proto_name` names a synthetic map-entry message (a nested
    /// message with `MessageOptions.map_entry` set). Map fields are a
    /// non-goal (spec.md §1); the Declaration/Encoder/Decoder Emitters use
    /// this to reject them with `Error::UnhandledFieldShape` instead of
    /// emitting a field of the desugared entry type.
    pub fn is_map_entry(&self, proto_name: &str) -> bool {
        self.map_entries.contains(proto_name.trim_start_matches('.'))
    }

    /// `lookup(proto_name) -> (module, type_id)` (spec.md §4.A).
    ///
    /// `proto_name` may be given with or without its leading dot.
    pub fn lookup(&self, proto_name: &str) -> Result<(&Module, &str)> {
        let key = proto_name.trim_start_matches('.');
        self.entries
            .get(key)
            .map(|entry| (&entry.module, entry.type_id.as_str()))
            .ok_or_else(|| Error::UnknownType(proto_name.to_owned()))
    }

    /// `resolve(proto_name, keep_wrapper) -> TypeExpression` (spec.md §4.A).
    ///
    /// Substitutes the native optional type for a wrapper-value type unless
    /// `keep_wrapper` is set (the Encoder/Decoder Emitters pass `true` when
    /// they need the actual wrapper message type to call its own
    /// `encode`/`decode`, per the "wrapper value" row of §4.F/§4.G).
    pub fn resolve(&self, proto_name: &str, keep_wrapper: bool) -> Result<TypeExpression> {
        let key = proto_name.trim_start_matches('.');
        if !keep_wrapper {
            if let Some((_, native)) = self.wrapper_values.iter().rev().find(|(name, _)| name == key) {
                return Ok(TypeExpression::Optional(Box::new(TypeExpression::Native(native))));
            }
        }
        let (module, type_id) = self.lookup(proto_name)?;
        Ok(TypeExpression::Imported {
            module: module.clone(),
            type_id: type_id.to_owned(),
        })
    }

    /// Whether `proto_name` is one of the wrapper value types (§4.B
    /// `is_wrapper_value`, lifted here since the set is this table's data).
    pub fn is_wrapper_value(proto_name: &str) -> bool {
        let key = proto_name.trim_start_matches('.');
        WRAPPER_VALUE_TYPES.iter().any(|(name, _)| *name == key)
    }
}
