//! Configuration for the descriptor-to-source translation (SPEC_FULL.md §2).
//!
//! Mirrors `prost_build::Config`'s builder shape (`&mut self -> &mut Self`
//! chaining) trimmed to the knobs this core actually reads: file I/O, protoc
//! invocation, and include-path handling belong to the out-of-scope CLI/
//! packaging surface (spec.md §1) and are not here.

use crate::type_map::WRAPPER_VALUE_TYPES;

/// Code generation options.
///
/// Construct with [`Config::new`], chain setters, then pass to
/// [`crate::generate`]/[`crate::generate_file`].
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) runtime_path: String,
    pub(crate) wrapper_value_overrides: Vec<(String, &'static str)>,
    pub(crate) oneof_as_tagged_union: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            runtime_path: "protobuf-wire".to_owned(),
            wrapper_value_overrides: WRAPPER_VALUE_TYPES
                .iter()
                .map(|(name, native)| ((*name).to_owned(), *native))
                .collect(),
            oneof_as_tagged_union: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the module path emitted code should import the `Reader`/`Writer`
    /// runtime surface (§6) from. Mirrors `prost_build::Config::prost_path`.
    pub fn runtime_path(&mut self, path: impl Into<String>) -> &mut Self {
        self.runtime_path = path.into();
        self
    }

    /// Overrides (or adds to) the wrapper value type set (§4.A) a proto type
    /// resolves to when not kept as its wrapper message. Mirrors
    /// `prost_build::Config::extern_path`'s override-by-append behavior: a
    /// later call for the same `proto_name` takes precedence.
    pub fn wrapper_value_type(&mut self, proto_name: impl Into<String>, native_type: &'static str) -> &mut Self {
        self.wrapper_value_overrides.push((proto_name.into(), native_type));
        self
    }

    /// When set, oneof fields are emitted as a tagged union instead of
    /// ordinary optional properties (§9 REDESIGN FLAGS). Off by default,
    /// matching §4.F/§4.G's documented behavior.
    pub fn oneof_as_tagged_union(&mut self, enabled: bool) -> &mut Self {
        self.oneof_as_tagged_union = enabled;
        self
    }

    /// Same override-precedence lookup `TypeMap::resolve` performs once it
    /// has copied `wrapper_value_overrides` out of this config; kept here too
    /// so a caller can inspect the effective override without building a
    /// `TypeMap`.
    pub fn resolve_wrapper_value(&self, proto_name: &str) -> Option<&'static str> {
        self.wrapper_value_overrides
            .iter()
            .rev()
            .find(|(name, _)| name == proto_name)
            .map(|(_, native)| *native)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runtime_path_matches_teacher_convention() {
        let config = Config::new();
        assert_eq!(config.runtime_path, "protobuf-wire");
    }

    #[test]
    fn later_wrapper_override_wins() {
        let mut config = Config::new();
        config.wrapper_value_type("google.protobuf.StringValue", "str");
        assert_eq!(
            config.resolve_wrapper_value("google.protobuf.StringValue"),
            Some("str")
        );
    }

    #[test]
    fn oneof_as_tagged_union_defaults_off() {
        assert!(!Config::new().oneof_as_tagged_union);
    }
}
