//! Translates Protocol Buffers descriptors into target-language message
//! types and proto3 wire-format codecs.
//!
//! Given a set of [`FileDescriptorProto`]s, [`generate`] produces one
//! [`CodeFile`] per input: a data-shape declaration per message, an
//! enumeration declaration per enum, a default-value prototype per message,
//! and an `encode`/`decode` function pair implementing proto3 wire format.
//! Parsing `.proto` sources into descriptors, and turning a [`CodeFile`]
//! into on-disk text, are both someone else's job — see the module docs on
//! [`ast`] for where this crate's responsibility ends.
//!
//! ```no_run
//! use protogen_core::{generate, Config};
//! use prost_types::FileDescriptorProto;
//!
//! fn run(files: Vec<FileDescriptorProto>) -> protogen_core::Result<()> {
//!     let config = Config::new();
//!     for (file_name, code_file) in generate(&files, &config)? {
//!         println!("// {file_name}\n{}", code_file.render_placeholder());
//!     }
//!     Ok(())
//! }
//! ```

mod ast;
mod classify;
pub mod code_generator;
mod comments;
mod config;
mod error;
mod ident;
mod module;
mod type_map;
mod type_name;
mod visitor;

pub use ast::{CodeFile, Comments, Declaration};
pub use config::Config;
pub use error::{Error, Result};
pub use module::Module;
pub use type_map::TypeMap;

use log::debug;
use prost_types::FileDescriptorProto;

/// Generates a [`CodeFile`] for every file in `files` (spec.md §5: "Multiple
/// files may be generated... no shared mutable state exists beyond the
/// read-only TypeMap").
///
/// The [`TypeMap`] is built once, from every file in the batch, so that
/// cross-file type references (invariant 1) resolve regardless of which
/// file declares the referent.
pub fn generate(files: &[FileDescriptorProto], config: &Config) -> Result<Vec<(String, CodeFile)>> {
    let type_map = TypeMap::build_with_config(files, config);
    files
        .iter()
        .map(|file| {
            debug!("generating {}", file.name());
            let code_file = generate_file(file, &type_map)?;
            let module = Module::from_file_name(file.name());
            Ok((module.to_file_name_or("generated"), code_file))
        })
        .collect()
}

/// Generates a single [`CodeFile`] given an already-built [`TypeMap`] (the
/// per-file entry point §5 describes for parallel, independent generation).
pub fn generate_file(file: &FileDescriptorProto, type_map: &TypeMap) -> Result<CodeFile> {
    code_generator::generate_file(file, type_map)
}
