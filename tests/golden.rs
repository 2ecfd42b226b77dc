//! End-to-end scenarios seeding the test suite (spec.md §8): one input
//! descriptor per scenario, asserting on the rendered `CodeFile` text.
//!
//! These assert the emitted *source* is shaped correctly (tags, flattened
//! names, default prototypes, wrapper handling) — verifying the generated
//! code's own runtime behavior (P1-P3) is the downstream printer/runtime's
//! concern, out of scope for this crate per spec.md §1.

use pretty_assertions::assert_eq;
use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use protogen_core::{generate_file, Config, TypeMap};

fn field(name: &str, number: i32, ty: Type, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        r#type: Some(ty as i32),
        label: Some(label as i32),
        ..Default::default()
    }
}

fn message_field(name: &str, number: i32, type_name: &str, label: Label) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_owned()),
        number: Some(number),
        r#type: Some(Type::Message as i32),
        type_name: Some(type_name.to_owned()),
        label: Some(label as i32),
        ..Default::default()
    }
}

fn file(name: &str, package: &str, messages: Vec<DescriptorProto>, enums: Vec<EnumDescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_owned()),
        package: Some(package.to_owned()),
        message_type: messages,
        enum_type: enums,
        ..Default::default()
    }
}

#[test]
fn scenario_empty_message() {
    let descriptor = file(
        "empty.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("Empty".to_owned()),
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("export interface Empty {\n}\n"));
    assert!(rendered.contains("const baseEmpty: object = {\n};\n"));
    assert!(rendered.contains("function encodeEmpty(message, writer = newWriter()) {"));
    assert!(rendered.contains("function decodeEmpty(reader, length) {"));
}

#[test]
fn scenario_scalar_echo() {
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![field("email", 1, Type::String, Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("email: string;"));
    // tag = (1 << 3) | 2 = 10
    assert!(rendered.contains("writer.uint32(10).string(message.email);"));
    assert!(rendered.contains("message.email = reader.string();"));
    assert!(rendered.contains("email: \"\","));
}

#[test]
fn scenario_repeated_packed() {
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![field("xs", 1, Type::Int32, Label::Repeated)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("xs: sequence_of<i32>;"));
    // packed framing uses wire type 2: tag = (1 << 3) | 2 = 10
    assert!(rendered.contains("writer.uint32(10).fork();"));
    assert!(rendered.contains("for (const v of message.xs) writer.int32(v);"));
    assert!(rendered.contains("writer.ldelim();"));
    assert!(rendered.contains("if ((tag & 7) === 2) {"));
}

#[test]
fn scenario_nested_message() {
    let inner = DescriptorProto {
        name: Some("Inner".to_owned()),
        field: vec![field("n", 1, Type::Int32, Label::Optional)],
        ..Default::default()
    };
    let outer = DescriptorProto {
        name: Some("Outer".to_owned()),
        field: vec![message_field("inner", 2, ".pkg.Inner", Label::Optional)],
        ..Default::default()
    };
    let descriptor = file("m.proto", "pkg", vec![outer, inner], vec![]);
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("inner: Inner | none;"));
    // tag = (2 << 3) | 2 = 18
    assert!(rendered.contains(
        "if (message.inner !== undefined) Inner.encode(message.inner, writer.uint32(18).fork()).ldelim();"
    ));
    assert!(rendered.contains("message.inner = Inner.decode(reader, reader.uint32());"));
}

#[test]
fn scenario_nested_message_flattens_identifier() {
    let inner = DescriptorProto {
        name: Some("B".to_owned()),
        ..Default::default()
    };
    let outer = DescriptorProto {
        name: Some("A".to_owned()),
        nested_type: vec![inner],
        ..Default::default()
    };
    let descriptor = file("m.proto", "pkg", vec![outer], vec![]);
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("export interface A_B {"));
    assert!(rendered.contains("function encodeA_B("));
    assert!(rendered.contains("function decodeA_B("));
}

#[test]
fn scenario_wrapper_value() {
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![message_field("s", 3, ".google.protobuf.StringValue", Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let wrappers = file(
        "google/protobuf/wrappers.proto",
        "google.protobuf",
        vec![DescriptorProto {
            name: Some("StringValue".to_owned()),
            field: vec![field("value", 1, Type::String, Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone(), wrappers]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("s: string | none;"));
    // tag = (3 << 3) | 2 = 26
    assert!(rendered.contains(
        "if (message.s !== undefined) StringValue.encode({ value: message.s }, writer.uint32(26).fork()).ldelim();"
    ));
    assert!(rendered.contains("message.s = StringValue.decode(reader, reader.uint32()).value;"));
}

#[test]
fn scenario_enum_field() {
    let color = EnumDescriptorProto {
        name: Some("Color".to_owned()),
        value: vec![
            EnumValueDescriptorProto {
                name: Some("RED".to_owned()),
                number: Some(0),
                ..Default::default()
            },
            EnumValueDescriptorProto {
                name: Some("GREEN".to_owned()),
                number: Some(1),
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![message_field("c", 1, ".pkg.Color", Label::Optional)],
            ..Default::default()
        }],
        vec![color],
    );
    // `c`'s type is MESSAGE in this harness only because message_field()
    // forces Type::Message; build an enum-typed field directly instead.
    let mut descriptor = descriptor;
    descriptor.message_type[0].field[0].r#type = Some(Type::Enum as i32);
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("export enum Color {"));
    assert!(rendered.contains("RED = 0,"));
    assert!(rendered.contains("GREEN = 1,"));
    // scalar (enum) fields write unconditionally: tag = (1 << 3) | 0 = 8
    assert!(rendered.contains("writer.uint32(8).int32(message.c);"));
    assert!(rendered.contains("c: 0,"));
}

#[test]
fn property_p4_tag_computation_across_wire_types() {
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![
                field("a", 1, Type::Int32, Label::Optional),  // varint, wire 0 -> tag 8
                field("b", 2, Type::Fixed64, Label::Optional), // 64-bit, wire 1 -> tag 17
                field("c", 3, Type::String, Label::Optional),  // len-delim, wire 2 -> tag 26
                field("d", 4, Type::Fixed32, Label::Optional), // 32-bit, wire 5 -> tag 37
            ],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("writer.uint32(8).int32(message.a);"));
    assert!(rendered.contains("writer.uint32(17).fixed64(message.b);"));
    assert!(rendered.contains("writer.uint32(26).string(message.c);"));
    assert!(rendered.contains("writer.uint32(37).fixed32(message.d);"));
}

#[test]
fn property_p6_unknown_field_tolerance_uses_skip_type() {
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![field("a", 1, Type::Int32, Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("default:"));
    assert!(rendered.contains("reader.skipType(tag & 7);"));
}

#[test]
fn property_p7_base_prototype_excludes_oneof_and_message_fields() {
    let mut scalar_in_oneof = field("a", 1, Type::Int32, Label::Optional);
    scalar_in_oneof.oneof_index = Some(0);
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![
            DescriptorProto {
                name: Some("Inner".to_owned()),
                ..Default::default()
            },
            DescriptorProto {
                name: Some("M".to_owned()),
                field: vec![
                    scalar_in_oneof,
                    field("b", 2, Type::Bool, Label::Optional),
                    message_field("inner", 3, ".pkg.Inner", Label::Optional),
                ],
                oneof_decl: vec![prost_types::OneofDescriptorProto {
                    name: Some("which".to_owned()),
                    ..Default::default()
                }],
                ..Default::default()
            },
        ],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("const baseM: object = {\n  b: false,\n};\n"));
}

#[test]
fn unknown_type_reference_is_a_fatal_error() {
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![message_field("missing", 1, ".pkg.DoesNotExist", Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let err = generate_file(&descriptor, &type_map).unwrap_err();
    assert_eq!(err, protogen_core::Error::UnknownType(".pkg.DoesNotExist".to_owned()));
}

#[test]
fn map_field_is_rejected_as_unhandled_field_shape() {
    let entry = DescriptorProto {
        name: Some("TagsEntry".to_owned()),
        field: vec![
            field("key", 1, Type::String, Label::Optional),
            field("value", 2, Type::String, Label::Optional),
        ],
        options: Some(prost_types::MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let message = DescriptorProto {
        name: Some("M".to_owned()),
        field: vec![message_field("tags", 1, ".pkg.M.TagsEntry", Label::Repeated)],
        nested_type: vec![entry],
        ..Default::default()
    };
    let descriptor = file("m.proto", "pkg", vec![message], vec![]);
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let err = generate_file(&descriptor, &type_map).unwrap_err();
    assert!(matches!(err, protogen_core::Error::UnhandledFieldShape { .. }));
}

#[test]
fn scalar_oneof_member_gets_a_presence_guarded_scalar_write() {
    let mut choice = field("a", 1, Type::Int32, Label::Optional);
    choice.oneof_index = Some(0);
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![choice],
            oneof_decl: vec![prost_types::OneofDescriptorProto {
                name: Some("which".to_owned()),
                ..Default::default()
            }],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    // tag = (1 << 3) | 0 = 8
    assert!(rendered.contains("if (message.a !== undefined) writer.uint32(8).int32(message.a);"));
    assert!(rendered.contains("message.a = reader.int32();"));
}

#[test]
fn map_field_rejection_names_the_containing_message() {
    let entry = DescriptorProto {
        name: Some("TagsEntry".to_owned()),
        field: vec![
            field("key", 1, Type::String, Label::Optional),
            field("value", 2, Type::String, Label::Optional),
        ],
        options: Some(prost_types::MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    };
    let message = DescriptorProto {
        name: Some("M".to_owned()),
        field: vec![message_field("tags", 1, ".pkg.M.TagsEntry", Label::Repeated)],
        nested_type: vec![entry],
        ..Default::default()
    };
    let descriptor = file("m.proto", "pkg", vec![message], vec![]);
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let err = generate_file(&descriptor, &type_map).unwrap_err();
    assert_eq!(
        err,
        protogen_core::Error::UnhandledFieldShape {
            message: "M".to_owned(),
            field: "tags".to_owned(),
        }
    );
}

#[test]
fn source_code_info_comments_render_above_their_declaration() {
    use prost_types::source_code_info::Location;
    use prost_types::SourceCodeInfo;

    let descriptor = FileDescriptorProto {
        source_code_info: Some(SourceCodeInfo {
            location: vec![
                Location {
                    path: vec![4, 0],
                    leading_comments: Some(" A greeting message.\n".to_owned()),
                    ..Default::default()
                },
                Location {
                    path: vec![4, 0, 2, 0],
                    leading_comments: Some(" Who to greet.\n".to_owned()),
                    ..Default::default()
                },
            ],
        }),
        ..file(
            "m.proto",
            "pkg",
            vec![DescriptorProto {
                name: Some("Greeting".to_owned()),
                field: vec![field("name", 1, Type::String, Label::Optional)],
                ..Default::default()
            }],
            vec![],
        )
    };
    let type_map = TypeMap::build(&[descriptor.clone()]);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("/// A greeting message.\nexport interface Greeting {"));
    assert!(rendered.contains("  /// Who to greet.\n  name: string;"));
}

#[test]
fn generated_file_imports_newwriter_from_the_configured_runtime_path() {
    let mut config = Config::new();
    config.runtime_path("./wire-runtime");
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![field("a", 1, Type::Int64, Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build_with_config(&[descriptor.clone()], &config);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    // runtime_imports is ordered by symbol name, so "ValueOutOfRange" < "newWriter".
    assert!(rendered.contains("import { ValueOutOfRange, newWriter } from \"./wire-runtime\";"));
}

#[test]
fn config_can_override_wrapper_value_native_type() {
    let mut config = Config::new();
    config.wrapper_value_type("google.protobuf.Int32Value", "number");
    let descriptor = file(
        "m.proto",
        "pkg",
        vec![DescriptorProto {
            name: Some("M".to_owned()),
            field: vec![message_field("n", 1, ".google.protobuf.Int32Value", Label::Optional)],
            ..Default::default()
        }],
        vec![],
    );
    let type_map = TypeMap::build_with_config(&[descriptor.clone()], &config);
    let code_file = generate_file(&descriptor, &type_map).unwrap();
    let rendered = code_file.render_placeholder();
    assert!(rendered.contains("n: number | none;"));
}
