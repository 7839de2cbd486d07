//! Per-field classification, type mapping, defaults and code synthesis.

mod defaults;
mod escaping;
mod generator;
mod types;

pub use generator::MessageFieldGenerator;

use prost_types::field_descriptor_proto::{Label, Type};
use prost_types::FieldDescriptorProto;

use crate::context::Context;
use crate::descriptor_set::{EnumDescriptor, MessageDescriptor};
use crate::error::{Error, Result};
use crate::fully_qualified_name::FullyQualifiedName;
use crate::syntax::Syntax;

/// What a field's type reference resolved to.
#[derive(Debug)]
pub enum FieldKind<'c> {
    /// A numeric, boolean, string or bytes field.
    Scalar,
    /// A message or group field.
    Message(&'c MessageDescriptor<'c>),
    Enum(&'c EnumDescriptor<'c>),
    /// A `map<K, V>` field, with the key and value of its entry type.
    Map(Box<MapEntry<'c>>),
}

#[derive(Debug)]
pub struct MapEntry<'c> {
    pub entry: &'c MessageDescriptor<'c>,
    pub key: FieldModel<'c>,
    pub value: FieldModel<'c>,
}

/// A read-only view of one field descriptor.
///
/// The type reference is resolved once, when the model is built, so every
/// query afterwards is infallible.
#[derive(Debug)]
pub struct FieldModel<'c> {
    pub proto: &'c FieldDescriptorProto,
    pub syntax: Syntax,
    kind: FieldKind<'c>,
}

impl<'c> FieldModel<'c> {
    pub fn new(
        proto: &'c FieldDescriptorProto,
        syntax: Syntax,
        ctx: &'c Context<'_>,
    ) -> Result<FieldModel<'c>> {
        let kind = match proto.r#type() {
            Type::Message => {
                let message: &'c MessageDescriptor<'c> = ctx.resolve_message(proto.type_name())?;
                if message.is_map_entry() {
                    FieldKind::Map(Box::new(MapEntry::new(message, syntax, ctx)?))
                } else {
                    FieldKind::Message(message)
                }
            }
            Type::Group => FieldKind::Message(ctx.resolve_message(proto.type_name())?),
            Type::Enum => FieldKind::Enum(ctx.resolve_enum(proto.type_name())?),
            _ => FieldKind::Scalar,
        };

        Ok(FieldModel {
            proto,
            syntax,
            kind,
        })
    }

    pub fn name(&self) -> &'c str {
        self.proto.name()
    }

    pub fn number(&self) -> i32 {
        self.proto.number()
    }

    pub fn field_type(&self) -> Type {
        self.proto.r#type()
    }

    pub fn is_repeated(&self) -> bool {
        self.proto.label() == Label::Repeated
    }

    pub fn is_required(&self) -> bool {
        self.proto.label() == Label::Required
    }

    pub fn is_message(&self) -> bool {
        self.field_type() == Type::Message
    }

    pub fn is_group(&self) -> bool {
        self.field_type() == Type::Group
    }

    pub fn is_group_or_message(&self) -> bool {
        self.is_group() || self.is_message()
    }

    pub fn is_enum(&self) -> bool {
        self.field_type() == Type::Enum
    }

    pub fn is_string(&self) -> bool {
        self.field_type() == Type::String
    }

    pub fn is_bytes(&self) -> bool {
        self.field_type() == Type::Bytes
    }

    /// `true` only when the referenced message is a map entry, whatever its
    /// name.
    pub fn is_map(&self) -> bool {
        matches!(self.kind, FieldKind::Map(_))
    }

    pub fn is_packable(&self) -> bool {
        self.is_repeated()
            && !matches!(
                self.field_type(),
                Type::String | Type::Bytes | Type::Group | Type::Message
            )
    }

    /// An explicit `packed` option wins; otherwise proto3 packs by default.
    pub fn is_packed(&self) -> bool {
        self.is_packable()
            && self
                .proto
                .options
                .as_ref()
                .and_then(|options| options.packed)
                .unwrap_or_else(|| self.syntax.is_proto3())
    }

    pub fn is_proto3_optional(&self) -> bool {
        self.proto.proto3_optional.unwrap_or(false)
    }

    /// Whether the generated code tracks if the field was set.
    pub fn has_field_presence(&self) -> bool {
        !self.is_repeated()
            && (!self.syntax.is_proto3() || self.is_group_or_message() || self.is_proto3_optional())
    }

    /// The last segment of an absolute type reference, or the reference
    /// unchanged when it is relative.
    pub fn bare_type_name(&self) -> String {
        let type_name = self.proto.type_name();
        if type_name.starts_with('.') {
            FullyQualifiedName::from_type_name(type_name)
                .bare_name()
                .to_string()
        } else {
            type_name.to_string()
        }
    }

    /// The resolved message of a message, group or map field.
    pub fn message_type(&self) -> Option<&'c MessageDescriptor<'c>> {
        match &self.kind {
            FieldKind::Message(message) => Some(*message),
            FieldKind::Map(map) => Some(map.entry),
            _ => None,
        }
    }

    pub fn enum_type(&self) -> Option<&'c EnumDescriptor<'c>> {
        match &self.kind {
            FieldKind::Enum(enum_type) => Some(*enum_type),
            _ => None,
        }
    }
}

impl<'c> MapEntry<'c> {
    fn new(entry: &'c MessageDescriptor<'c>, syntax: Syntax, ctx: &'c Context<'_>) -> Result<Self> {
        let malformed = || Error::MalformedMapEntry {
            path: entry.fq_name.to_string(),
        };
        let key = entry.field_by_number(1).ok_or_else(malformed)?;
        let value = entry.field_by_number(2).ok_or_else(malformed)?;

        Ok(MapEntry {
            entry,
            key: FieldModel::new(key, syntax, ctx)?,
            value: FieldModel::new(value, syntax, ctx)?,
        })
    }
}
