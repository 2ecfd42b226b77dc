use std::fmt;

/// An output module path: either a flattened input-file basename (§6) or an
/// external path such as `Config::runtime_path` (SPEC_FULL.md §2).
///
/// Mirrors `prost_build::Module`'s `"::"`-joined `Display`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Module {
    components: Vec<String>,
}

impl Module {
    /// Constructs a module path from an iterator of parts.
    pub fn from_parts<I>(parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            components: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Derives the output module from a file descriptor's logical name
    /// (a slash-separated path ending in `.proto`), per spec.md §6: the
    /// basename is the input descriptor name with `.proto` removed and `/`
    /// replaced by `_`.
    pub fn from_file_name(name: &str) -> Self {
        let stem = name.strip_suffix(".proto").unwrap_or(name);
        Self {
            components: stem
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// An iterator over the parts of the path.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(String::as_str)
    }

    /// The output file basename for this module: its components joined with
    /// `_` (spec.md §6: "File basename = input descriptor name with `.proto`
    /// removed and `/` replaced by `_`"). The extension is the downstream
    /// printer's concern, not this crate's.
    pub fn to_file_name_or(&self, default: &str) -> String {
        if self.components.is_empty() {
            default.to_owned()
        } else {
            self.components.join("_")
        }
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts = self.parts();
        if let Some(first) = parts.next() {
            f.write_str(first)?;
        }
        for part in parts {
            f.write_str("::")?;
            f.write_str(part)?;
        }
        Ok(())
    }
}
