//! The structured code model this crate hands off to an external
//! source-code printer (spec.md §1: "the downstream source-code
//! pretty-printer ... is specified only by the capabilities the core
//! needs"). `CodeFile` and `Declaration` are that capability surface: a
//! small, inspectable, target-language-agnostic AST, in the spirit of
//! `prost_build::ast::{Comments, Method, Service}` but generalized past
//! Rust-shaped output, since the language this crate emits into has
//! structural interfaces and nullable unions rather than `struct`/`enum`.
//!
//! `CodeFile` additionally implements [`CodeFile::render_placeholder`], a
//! minimal text renderer good enough to assert against in golden tests; a
//! production pipeline would hand `declarations`/`imports` to a real printer
//! instead.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::module::Module;

/// Comments attached to a message, enum, or field, pulled from
/// `SourceCodeInfo` (§3 "Supplemented features"). Mirrors
/// `prost_build::ast::Comments`, minus the Rust-doc-comment-specific
/// markdown rewriting: the target language's comment syntax is a printer
/// concern, not this crate's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments {
    pub leading_detached: Vec<String>,
    pub leading: String,
    pub trailing: String,
}

impl Comments {
    /// Builds a `Comments` from one `SourceCodeInfo` `Location`. Grounded on
    /// `prost_build::ast::Comments::from_location`.
    pub(crate) fn from_location(location: &prost_types::source_code_info::Location) -> Self {
        Self {
            leading_detached: location.leading_detached_comments.clone(),
            leading: location.leading_comments.clone().unwrap_or_default(),
            trailing: location.trailing_comments.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leading_detached.is_empty() && self.leading.is_empty() && self.trailing.is_empty()
    }

    fn append_with_indent(&self, indent: &str, buf: &mut String) {
        for block in &self.leading_detached {
            for line in block.lines() {
                let _ = writeln!(buf, "{indent}//{line}");
            }
        }
        for line in self.leading.lines() {
            let _ = writeln!(buf, "{indent}///{line}");
        }
        for line in self.trailing.lines() {
            let _ = writeln!(buf, "{indent}///{line}");
        }
    }
}

/// An import of a single type identifier from another output module.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Import {
    pub module: Module,
    pub type_id: String,
}

/// One property of a message's data-shape declaration (§4.E).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub type_expr: String,
    pub comments: Comments,
}

/// One member of an enum declaration (§4.E).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDecl {
    pub name: String,
    pub number: i32,
    pub comments: Comments,
}

/// One entry of a message's base (default-value) prototype (§4.E, §9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrototypeEntry {
    pub name: String,
    pub default_literal: String,
}

/// A free function body, rendered verbatim by the printer. `encode`/`decode`
/// bodies are assembled as flat statement lists by the Encoder/Decoder
/// Emitters (§4.F/§4.G) rather than as a deeper expression tree: the wire
/// format's control flow (one conditional write per field, one dispatch arm
/// per field number) is shallow enough that a statement list is the
/// faithful model, the same way `prost_codegen::CodeGenerator` accumulates
/// one pushed line per field rather than building an expression tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionBody {
    pub statements: Vec<String>,
}

impl FunctionBody {
    pub fn push(&mut self, statement: impl Into<String>) {
        self.statements.push(statement.into());
    }
}

/// A single declaration in a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `export interface <name> { ... }`
    Interface {
        name: String,
        comments: Comments,
        fields: Vec<FieldDecl>,
    },
    /// `export enum <name> { ... }`
    Enum {
        name: String,
        comments: Comments,
        values: Vec<EnumValueDecl>,
    },
    /// `const base<name>: object = { ... }`
    BasePrototype {
        message_name: String,
        entries: Vec<PrototypeEntry>,
    },
    /// `function encode<name>(message, writer?) -> writer { ... }`
    EncodeFn {
        message_name: String,
        body: FunctionBody,
    },
    /// `function decode<name>(reader, length?) -> Message { ... }`
    DecodeFn {
        message_name: String,
        body: FunctionBody,
    },
    /// `function longToNumber(long) -> number { ... }`, emitted once per
    /// file iff any message has a 64-bit scalar field (§4.G).
    LongToNumberHelper,
}

/// The terminal, in-memory artifact for one input `FileDescriptorProto`.
///
/// Assembled incrementally (`push`); treated as immutable once handed to a
/// printer, matching §3's "Code model objects are immutable after
/// construction" lifetime note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFile {
    pub imports: BTreeSet<Import>,
    pub runtime_imports: BTreeSet<(Module, String)>,
    pub declarations: Vec<Declaration>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, declaration: Declaration) {
        self.declarations.push(declaration);
    }

    pub fn import(&mut self, module: Module, type_id: impl Into<String>) {
        if module.is_empty() {
            return;
        }
        self.imports.insert(Import {
            module,
            type_id: type_id.into(),
        });
    }

    /// Registers an import of one runtime-surface symbol (§6's `Reader`/
    /// `Writer`/`newWriter`/`ValueOutOfRange`) from `runtime_module`, kept
    /// apart from [`CodeFile::import`]'s type-import set since the runtime
    /// module isn't one this crate declared and shouldn't render with the
    /// same `./`-relative path.
    pub fn import_runtime(&mut self, runtime_module: Module, symbol: impl Into<String>) {
        self.runtime_imports.insert((runtime_module, symbol.into()));
    }

    /// Renders the file as text. A stand-in for the external pretty-printer
    /// named in spec.md §1 — enough structure to assert on in tests, not a
    /// substitute for a real printer in production.
    pub fn render_placeholder(&self) -> String {
        let mut out = String::new();
        // `runtime_imports` is a `BTreeSet<(Module, String)>`, so entries for
        // the same module are already adjacent; group them into one import
        // statement per module.
        let mut runtime_by_module: Vec<(&Module, Vec<&str>)> = Vec::new();
        for (module, symbol) in &self.runtime_imports {
            match runtime_by_module.last_mut() {
                Some((last_module, symbols)) if *last_module == module => symbols.push(symbol.as_str()),
                _ => runtime_by_module.push((module, vec![symbol.as_str()])),
            }
        }
        for (module, symbols) in &runtime_by_module {
            let _ = writeln!(out, "import {{ {} }} from \"{module}\";", symbols.join(", "));
        }
        for import in &self.imports {
            let _ = writeln!(out, "import {{ {} }} from \"./{}\";", import.type_id, import.module);
        }
        if !self.runtime_imports.is_empty() || !self.imports.is_empty() {
            out.push('\n');
        }
        for decl in &self.declarations {
            render_declaration(decl, &mut out);
            out.push('\n');
        }
        out
    }
}

fn render_declaration(decl: &Declaration, out: &mut String) {
    match decl {
        Declaration::Interface {
            name,
            comments,
            fields,
        } => {
            comments.append_with_indent("", out);
            let _ = writeln!(out, "export interface {name} {{");
            for field in fields {
                field.comments.append_with_indent("  ", out);
                let _ = writeln!(out, "  {}: {};", field.name, field.type_expr);
            }
            out.push_str("}\n");
        }
        Declaration::Enum {
            name,
            comments,
            values,
        } => {
            comments.append_with_indent("", out);
            let _ = writeln!(out, "export enum {name} {{");
            for value in values {
                value.comments.append_with_indent("  ", out);
                let _ = writeln!(out, "  {} = {},", value.name, value.number);
            }
            out.push_str("}\n");
        }
        Declaration::BasePrototype {
            message_name,
            entries,
        } => {
            let _ = writeln!(out, "const base{message_name}: object = {{");
            for entry in entries {
                let _ = writeln!(out, "  {}: {},", entry.name, entry.default_literal);
            }
            out.push_str("};\n");
        }
        Declaration::EncodeFn { message_name, body } => {
            let _ = writeln!(
                out,
                "function encode{message_name}(message, writer = newWriter()) {{"
            );
            for statement in &body.statements {
                let _ = writeln!(out, "  {statement}");
            }
            out.push_str("  return writer;\n}\n");
        }
        Declaration::DecodeFn { message_name, body } => {
            let _ = writeln!(
                out,
                "function decode{message_name}(reader, length) {{"
            );
            for statement in &body.statements {
                let _ = writeln!(out, "  {statement}");
            }
            out.push_str("}\n");
        }
        Declaration::LongToNumberHelper => {
            out.push_str(
                "function longToNumber(long) {\n  \
                 if (long.greaterThan(Number.MAX_SAFE_INTEGER)) throw new ValueOutOfRange(long);\n  \
                 return long.toNumber();\n}\n",
            );
        }
    }
}
