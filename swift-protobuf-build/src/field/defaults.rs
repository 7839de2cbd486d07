use prost_types::field_descriptor_proto::Type;

use super::escaping::{data_literal, swift_string_literal, unescape_c_escape_string};
use super::{FieldKind, FieldModel};
use crate::context::Context;
use crate::error::{Error, Result};

impl FieldModel<'_> {
    /// The Swift expression of the default declared in the schema, if any.
    ///
    /// Empty string and bytes defaults are the zero value anyway and are
    /// reported as absent.
    pub fn explicit_default(&self, ctx: &Context<'_>) -> Result<Option<String>> {
        let default = match self.proto.default_value.as_deref() {
            Some(default) => default,
            None => return Ok(None),
        };

        let value = match self.field_type() {
            Type::Double | Type::Float => {
                let ty = if self.field_type() == Type::Double {
                    "Double"
                } else {
                    "Float"
                };
                match default {
                    "inf" => format!("{ty}.infinity"),
                    "-inf" => format!("-{ty}.infinity"),
                    "nan" => format!("{ty}.nan"),
                    _ => default.to_string(),
                }
            }
            Type::String if default.is_empty() => return Ok(None),
            Type::String => swift_string_literal(default),
            Type::Bytes if default.is_empty() => return Ok(None),
            Type::Bytes => {
                let bytes = unescape_c_escape_string(default).map_err(|reason| Error::InvalidDefault {
                    field: self.name().to_string(),
                    reason,
                })?;
                data_literal(&bytes)
            }
            Type::Enum => ctx.enum_case_name(self.proto.type_name(), default)?,
            _ => default.to_string(),
        };
        Ok(Some(value))
    }

    /// The value a read of the public property yields when nothing was set.
    pub fn default_value(&self, ctx: &Context<'_>) -> Result<String> {
        if self.is_map() {
            return Ok("[:]".to_string());
        }
        if self.is_repeated() {
            return Ok("[]".to_string());
        }
        if let Some(default) = self.explicit_default(ctx)? {
            return Ok(default);
        }

        let value = match &self.kind {
            FieldKind::Message(message) => format!("{}()", message.swift_name),
            FieldKind::Enum(enum_type) => enum_type
                .default_case_reference()
                .unwrap_or_else(|| "nil".to_string()),
            _ => match self.field_type() {
                Type::Bool => "false".to_string(),
                Type::String => "String()".to_string(),
                Type::Bytes => "SwiftProtobuf.Internal.emptyData".to_string(),
                _ => "0".to_string(),
            },
        };
        Ok(value)
    }

    /// The initial value of the backing slot.
    pub fn storage_default_value(&self, ctx: &Context<'_>) -> Result<String> {
        if self.is_map() {
            Ok("[:]".to_string())
        } else if self.is_repeated() {
            Ok("[]".to_string())
        } else if self.has_field_presence() {
            Ok("nil".to_string())
        } else {
            self.default_value(ctx)
        }
    }
}
