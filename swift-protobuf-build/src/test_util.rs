//! Descriptor builders shared by the unit tests.

pub use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FieldOptions, FileDescriptorProto, MessageOptions,
};

pub fn file_proto(
    name: &str,
    package: &str,
    syntax: &str,
    messages: Vec<DescriptorProto>,
    enums: Vec<EnumDescriptorProto>,
) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: (!package.is_empty()).then(|| package.to_string()),
        syntax: Some(syntax.to_string()),
        message_type: messages,
        enum_type: enums,
        ..Default::default()
    }
}

pub fn message_proto(
    name: &str,
    fields: Vec<FieldDescriptorProto>,
    nested: Vec<DescriptorProto>,
    enums: Vec<EnumDescriptorProto>,
) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        nested_type: nested,
        enum_type: enums,
        ..Default::default()
    }
}

/// A synthetic map entry message as `protoc` emits it for `map<K, V>`.
pub fn map_entry_proto(name: &str, key: FieldDescriptorProto, value: FieldDescriptorProto) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: vec![key, value],
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn enum_proto(name: &str, values: &[&str]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .enumerate()
            .map(|(number, value)| EnumValueDescriptorProto {
                name: Some(value.to_string()),
                number: Some(number as i32),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

pub fn field_proto(name: &str, number: i32, label: Label, ty: Type) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(label as i32),
        r#type: Some(ty as i32),
        ..Default::default()
    }
}

pub fn message_field_proto(name: &str, number: i32, label: Label, type_name: &str) -> FieldDescriptorProto {
    typed_field_proto(name, number, label, Type::Message, type_name)
}

pub fn typed_field_proto(
    name: &str,
    number: i32,
    label: Label,
    ty: Type,
    type_name: &str,
) -> FieldDescriptorProto {
    FieldDescriptorProto {
        type_name: Some(type_name.to_string()),
        ..field_proto(name, number, label, ty)
    }
}

pub fn with_default(mut field: FieldDescriptorProto, default: &str) -> FieldDescriptorProto {
    field.default_value = Some(default.to_string());
    field
}

pub fn with_packed(mut field: FieldDescriptorProto, packed: bool) -> FieldDescriptorProto {
    field.options = Some(FieldOptions {
        packed: Some(packed),
        ..Default::default()
    });
    field
}
