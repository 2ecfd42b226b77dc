//! Extracts doc comments from a `FileDescriptorProto`'s `SourceCodeInfo`
//! (spec.md §3 "Comment / doc propagation").
//!
//! Grounded on `prost_build::ast::Comments::from_location` (the
//! `Location` -> `Comments` field mapping) and
//! `CodeGenerator::comments_from_location` (locating the `Location` whose
//! `path` matches the declaration currently being emitted). This crate's
//! `SourceCodeInfo.location` list isn't pre-sorted the way the teacher's
//! `CodeGenerator::new` sorts it for a binary search, since each file is
//! searched only once per declaration rather than at every recursion level;
//! a linear scan is the simpler, equally correct choice here.

use prost_types::FileDescriptorProto;

use crate::ast::Comments;

/// `FileDescriptorProto.message_type` field number.
pub(crate) const FILE_MESSAGE_TYPE: i32 = 4;
/// `FileDescriptorProto.enum_type` field number.
pub(crate) const FILE_ENUM_TYPE: i32 = 5;
/// `DescriptorProto.field` field number.
pub(crate) const MESSAGE_FIELD: i32 = 2;
/// `DescriptorProto.nested_type` field number.
pub(crate) const MESSAGE_NESTED_TYPE: i32 = 3;
/// `DescriptorProto.enum_type` field number.
pub(crate) const MESSAGE_ENUM_TYPE: i32 = 4;
/// `EnumDescriptorProto.value` field number.
pub(crate) const ENUM_VALUE: i32 = 2;

/// Looks up the `Comments` for the declaration at `path` within `file`,
/// returning `Comments::default()` (no doc comment) when `file` carries no
/// `SourceCodeInfo`, or no `Location` matches `path` exactly (SPEC_FULL.md
/// §3: "additive only — absence of SourceCodeInfo produces undocumented
/// declarations exactly as spec.md describes").
pub(crate) fn comments_for_path(file: &FileDescriptorProto, path: &[i32]) -> Comments {
    file.source_code_info
        .as_ref()
        .and_then(|source_info| source_info.location.iter().find(|location| location.path == path))
        .map(Comments::from_location)
        .unwrap_or_default()
}

/// `path` extended with one more `(field_number, index)` pair, for a child
/// declaration (a field within a message, a value within an enum) nested
/// one level below an already-visited message/enum.
pub(crate) fn child_path(parent: &[i32], field_number: i32, index: usize) -> Vec<i32> {
    let mut path = parent.to_vec();
    path.push(field_number);
    path.push(index as i32);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_types::source_code_info::Location;
    use prost_types::SourceCodeInfo;

    fn file_with_location(path: Vec<i32>, leading: &str) -> FileDescriptorProto {
        FileDescriptorProto {
            source_code_info: Some(SourceCodeInfo {
                location: vec![Location {
                    path,
                    leading_comments: Some(leading.to_owned()),
                    ..Default::default()
                }],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn finds_comments_for_matching_path() {
        let file = file_with_location(vec![4, 0], " a message\n");
        let comments = comments_for_path(&file, &[4, 0]);
        assert_eq!(comments.leading, " a message\n");
    }

    #[test]
    fn returns_empty_comments_when_no_location_matches() {
        let file = file_with_location(vec![4, 0], " a message\n");
        let comments = comments_for_path(&file, &[4, 1]);
        assert!(comments.is_empty());
    }

    #[test]
    fn returns_empty_comments_without_source_code_info() {
        let file = FileDescriptorProto::default();
        assert!(comments_for_path(&file, &[4, 0]).is_empty());
    }

    #[test]
    fn child_path_appends_field_number_and_index() {
        assert_eq!(child_path(&[4, 0], MESSAGE_FIELD, 2), vec![4, 0, 2, 2]);
    }
}
