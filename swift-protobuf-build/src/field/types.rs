use prost_types::field_descriptor_proto::Type;

use super::{FieldKind, FieldModel};

impl<'c> FieldModel<'c> {
    /// The name the runtime uses in its `decode*Field` and `visit*Field`
    /// method names for scalar types.
    pub fn proto_type_name(&self) -> &'c str {
        if let Some(message) = self.message_type() {
            return &message.swift_name;
        }
        match self.field_type() {
            Type::Double => "Double",
            Type::Float => "Float",
            Type::Int64 => "Int64",
            Type::Uint64 => "UInt64",
            Type::Int32 => "Int32",
            Type::Fixed64 => "Fixed64",
            Type::Fixed32 => "Fixed32",
            Type::Bool => "Bool",
            Type::String => "String",
            Type::Bytes => "Bytes",
            Type::Uint32 => "UInt32",
            Type::Enum => "Enum",
            Type::Sfixed32 => "SFixed32",
            Type::Sfixed64 => "SFixed64",
            Type::Sint32 => "SInt32",
            Type::Sint64 => "SInt64",
            Type::Group | Type::Message => "",
        }
    }

    /// The Swift type of a single value of the field.
    pub fn swift_base_type(&self) -> String {
        match &self.kind {
            FieldKind::Map(map) => format!(
                "Dictionary<{},{}>",
                map.key.swift_base_type(),
                map.value.swift_base_type()
            ),
            FieldKind::Message(message) => message.swift_name.clone(),
            FieldKind::Enum(enum_type) => enum_type.swift_name.clone(),
            FieldKind::Scalar => match self.field_type() {
                Type::Double => "Double",
                Type::Float => "Float",
                Type::Int64 | Type::Sint64 | Type::Sfixed64 => "Int64",
                Type::Uint64 | Type::Fixed64 => "UInt64",
                Type::Int32 | Type::Sint32 | Type::Sfixed32 => "Int32",
                Type::Uint32 | Type::Fixed32 => "UInt32",
                Type::Bool => "Bool",
                Type::String => "String",
                Type::Bytes => "Data",
                Type::Group | Type::Message | Type::Enum => "",
            }
            .to_string(),
        }
    }

    /// The type of the public property.
    pub fn swift_api_type(&self) -> String {
        if self.is_repeated() && !self.is_map() {
            format!("[{}]", self.swift_base_type())
        } else {
            self.swift_base_type()
        }
    }

    /// The type of the backing slot. Fields with presence are optional.
    pub fn swift_storage_type(&self) -> String {
        if self.is_repeated() || !self.has_field_presence() {
            self.swift_api_type()
        } else {
            format!("{}?", self.swift_base_type())
        }
    }

    /// The runtime codec type used to decode and encode the field.
    pub fn traits_type(&self) -> String {
        match &self.kind {
            FieldKind::Map(map) => {
                let map_kind = if map.value.is_message() {
                    "_ProtobufMessageMap"
                } else if map.value.is_enum() {
                    "_ProtobufEnumMap"
                } else {
                    "_ProtobufMap"
                };
                format!(
                    "SwiftProtobuf.{}<{},{}>",
                    map_kind,
                    map.key.traits_type(),
                    map.value.traits_type()
                )
            }
            FieldKind::Message(_) | FieldKind::Enum(_) => self.swift_base_type(),
            FieldKind::Scalar => format!("SwiftProtobuf.Protobuf{}", self.proto_type_name()),
        }
    }
}
