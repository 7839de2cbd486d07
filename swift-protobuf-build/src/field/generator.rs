use log::debug;
use prost_types::FieldDescriptorProto;

use super::FieldModel;
use crate::context::Context;
use crate::error::Result;
use crate::ident::PropertyNames;
use crate::printer::CodePrinter;
use crate::syntax::Syntax;

/// Emits the code of one plain message field.
///
/// Every decision (types, defaults, presence) is taken once in `new`, so
/// the storage declaration, accessors, decoder case and visitor call all see
/// the same slot and the same codec.
#[derive(Debug)]
pub struct MessageFieldGenerator<'c> {
    field: FieldModel<'c>,
    names: PropertyNames,
    comments: String,
    visibility: &'static str,
    uses_heap_storage: bool,
    needs_initialization_check: bool,
    api_type: String,
    storage_type: String,
    traits_type: String,
    default_value: String,
    explicit_default: Option<String>,
    storage_default_value: String,
}

impl<'c> MessageFieldGenerator<'c> {
    pub fn new(
        proto: &'c FieldDescriptorProto,
        syntax: Syntax,
        names: PropertyNames,
        comments: String,
        uses_heap_storage: bool,
        ctx: &'c Context<'_>,
    ) -> Result<MessageFieldGenerator<'c>> {
        let field = FieldModel::new(proto, syntax, ctx)?;

        let needs_initialization_check = field.is_group_or_message()
            && field
                .message_type()
                .map_or(false, |message| ctx.has_required_fields(message));
        let explicit_default = field.explicit_default(ctx)?;
        let default_value = field.default_value(ctx)?;
        let storage_default_value = field.storage_default_value(ctx)?;

        debug!(
            "    field: {:?}, type: {:?}, heap: {}",
            field.name(),
            field.swift_api_type(),
            uses_heap_storage
        );

        Ok(MessageFieldGenerator {
            api_type: field.swift_api_type(),
            storage_type: field.swift_storage_type(),
            traits_type: field.traits_type(),
            field,
            names,
            comments,
            visibility: ctx.options().visibility_snippet(),
            uses_heap_storage,
            needs_initialization_check,
            default_value,
            explicit_default,
            storage_default_value,
        })
    }

    pub fn number(&self) -> i32 {
        self.field.number()
    }

    /// The declaration of the backing slot. Inline fields without presence
    /// are stored directly in their public property and need none.
    pub fn generate_storage(&self, p: &mut CodePrinter) {
        let PropertyNames { storage, .. } = &self.names;
        if self.uses_heap_storage {
            p.print(&format!(
                "var {storage}: {} = {}\n",
                self.storage_type, self.storage_default_value
            ));
        } else if self.field.has_field_presence() {
            p.print(&format!(
                "fileprivate var {storage}: {} = {}\n",
                self.storage_type, self.storage_default_value
            ));
        }
    }

    /// The public property, followed by `has` and `clear` members for
    /// fields with presence.
    pub fn generate_interface(&self, p: &mut CodePrinter) {
        if self.uses_heap_storage {
            self.generate_proxy_property(p);
        } else {
            self.generate_top_property(p);
        }

        if !self.field.has_field_presence() {
            return;
        }

        let PropertyNames {
            value,
            has,
            clear,
            storage,
        } = &self.names;
        let vis = self.visibility;
        let (read_prefix, write_prefix) = if self.uses_heap_storage {
            ("_storage.", "_uniqueStorage().")
        } else {
            ("self.", "self.")
        };
        p.print(&format!("/// Returns true if `{value}` has been explicitly set.\n"));
        p.print(&format!("{vis}var {has}: Bool {{return {read_prefix}{storage} != nil}}\n"));
        p.print(&format!(
            "/// Clears the value of `{value}`. Subsequent reads from it will return its default value.\n"
        ));
        p.print(&format!("{vis}mutating func {clear}() {{{write_prefix}{storage} = nil}}\n"));
    }

    fn generate_top_property(&self, p: &mut CodePrinter) {
        let PropertyNames { value, storage, .. } = &self.names;
        let vis = self.visibility;
        p.print("\n");
        p.print(&self.comments);
        if self.field.has_field_presence() {
            p.print(&format!("{vis}var {value}: {} {{\n", self.api_type));
            p.indent();
            p.print(&format!("get {{return {storage} ?? {}}}\n", self.default_value));
            p.print(&format!("set {{{storage} = newValue}}\n"));
            p.outdent();
            p.print("}\n");
        } else {
            p.print(&format!(
                "{vis}var {value}: {} = {}\n",
                self.storage_type, self.storage_default_value
            ));
        }
    }

    fn generate_proxy_property(&self, p: &mut CodePrinter) {
        let PropertyNames { value, storage, .. } = &self.names;
        p.print("\n");
        p.print(&self.comments);
        p.print(&format!("{}var {value}: {} {{\n", self.visibility, self.api_type));
        p.indent();

        let default_clause = if self.field.is_map() || self.field.is_repeated() {
            String::new()
        } else if self.field.is_group_or_message() {
            format!(" ?? {}", self.default_value)
        } else if let Some(default) = &self.explicit_default {
            format!(" ?? {default}")
        } else if self.field.has_field_presence() {
            format!(" ?? {}", self.default_value)
        } else {
            String::new()
        };
        p.print(&format!("get {{return _storage.{storage}{default_clause}}}\n"));
        p.print(&format!("set {{_uniqueStorage().{storage} = newValue}}\n"));

        p.outdent();
        p.print("}\n");
    }

    /// The line copying the field in the storage class' copy initializer.
    pub fn generate_storage_class_clone(&self, p: &mut CodePrinter) {
        let storage = &self.names.storage;
        p.print(&format!("{storage} = source.{storage}\n"));
    }

    pub fn generate_field_comparison(&self, p: &mut CodePrinter) {
        p.print(&format!(
            "if {} != {} {{return false}}\n",
            self.stored_property(""),
            self.stored_property("other")
        ));
    }

    pub fn generate_required_field_check(&self, p: &mut CodePrinter) {
        if !self.field.is_required() {
            return;
        }
        p.print(&format!("if {} == nil {{return false}}\n", self.stored_property("")));
    }

    /// Descends into message fields whose type has required fields somewhere
    /// below it.
    pub fn generate_is_initialized_check(&self, p: &mut CodePrinter) {
        if !self.needs_initialization_check {
            return;
        }
        let slot = self.stored_property("");
        if self.field.is_repeated() {
            p.print(&format!(
                "if !SwiftProtobuf.Internal.areAllInitialized({slot}) {{return false}}\n"
            ));
        } else {
            p.print(&format!("if let v = {slot}, !v.isInitialized {{return false}}\n"));
        }
    }

    pub fn generate_decode_field_case(&self, p: &mut CodePrinter) {
        let (method, traits_arg) = if self.field.is_map() {
            (
                "decodeMapField".to_string(),
                format!("fieldType: {}.self, ", self.traits_type),
            )
        } else {
            let modifier = if self.field.is_repeated() {
                "Repeated"
            } else {
                "Singular"
            };
            (
                format!("decode{modifier}{}Field", self.codec_name()),
                String::new(),
            )
        };
        p.print(&format!(
            "case {}: try decoder.{method}({traits_arg}value: &{})\n",
            self.number(),
            self.stored_property("")
        ));
    }

    pub fn generate_traverse(&self, p: &mut CodePrinter) {
        let (method, traits_arg) = if self.field.is_map() {
            (
                "visitMapField".to_string(),
                format!("fieldType: {}.self, ", self.traits_type),
            )
        } else {
            let modifier = if self.field.is_packed() {
                "Packed"
            } else if self.field.is_repeated() {
                "Repeated"
            } else {
                "Singular"
            };
            (
                format!("visit{modifier}{}Field", self.codec_name()),
                String::new(),
            )
        };

        let slot = self.stored_property("");
        let (conditional, var_name) = if self.field.is_repeated() {
            (format!("!{slot}.isEmpty"), slot.as_str())
        } else if self.field.is_group_or_message() || self.field.has_field_presence() {
            (format!("let v = {slot}"), "v")
        } else if self.field.is_string() || self.field.is_bytes() {
            (format!("!{slot}.isEmpty"), slot.as_str())
        } else {
            (format!("{slot} != {}", self.default_value), slot.as_str())
        };

        p.print(&format!("if {conditional} {{\n"));
        p.indent();
        p.print(&format!(
            "try visitor.{method}({traits_arg}value: {var_name}, fieldNumber: {})\n",
            self.number()
        ));
        p.outdent();
        p.print("}\n");
    }

    /// The type part of the runtime's `decode*Field`/`visit*Field` names.
    fn codec_name(&self) -> &'c str {
        if self.field.is_group() {
            "Group"
        } else if self.field.is_message() {
            "Message"
        } else if self.field.is_enum() {
            "Enum"
        } else {
            self.field.proto_type_name()
        }
    }

    /// The expression reading the field's slot on `variable`, or on `self`
    /// when `variable` is empty.
    fn stored_property(&self, variable: &str) -> String {
        let PropertyNames { value, storage, .. } = &self.names;
        if self.uses_heap_storage {
            return format!("{variable}_storage.{storage}");
        }
        let prefix = if variable.is_empty() { "self" } else { variable };
        if self.field.has_field_presence() {
            format!("{prefix}.{storage}")
        } else {
            format!("{prefix}.{value}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;
    use pretty_assertions::assert_eq;
    use prost_types::compiler::CodeGeneratorRequest;

    fn request(syntax: &str, fields: Vec<FieldDescriptorProto>, parameter: &str) -> CodeGeneratorRequest {
        let file = file_proto(
            "gen.proto",
            "gen",
            syntax,
            vec![
                message_proto(
                    "Holder",
                    fields,
                    vec![
                        map_entry_proto(
                            "CountsEntry",
                            field_proto("key", 1, Label::Optional, Type::String),
                            field_proto("value", 2, Label::Optional, Type::Int32),
                        ),
                        map_entry_proto(
                            "StrictEntry",
                            field_proto("key", 1, Label::Optional, Type::Int32),
                            message_field_proto("value", 2, Label::Optional, ".gen.Strict"),
                        ),
                    ],
                    vec![],
                ),
                message_proto("Child", vec![], vec![], vec![]),
                message_proto(
                    "Strict",
                    vec![field_proto("id", 1, Label::Required, Type::Int32)],
                    vec![],
                    vec![],
                ),
            ],
            vec![enum_proto("Mode", &["MODE_OFF", "MODE_ON"])],
        );
        CodeGeneratorRequest {
            proto_file: vec![file],
            parameter: Some(parameter.to_string()),
            ..Default::default()
        }
    }

    /// Every fragment the generator emits for each field of `.gen.Holder`.
    #[derive(Debug, Default)]
    struct Fragments {
        storage: String,
        interface: String,
        clone: String,
        comparison: String,
        required: String,
        initialized: String,
        decode: String,
        traverse: String,
    }

    fn generate(
        syntax: &str,
        fields: Vec<FieldDescriptorProto>,
        heap: bool,
        parameter: &str,
    ) -> Vec<Fragments> {
        let request = request(syntax, fields, parameter);
        let ctx = Context::new(&request).unwrap();
        let message = ctx.resolve_message(".gen.Holder").unwrap();
        let syntax = ctx.descriptors().file(message.file).syntax;

        message
            .fields()
            .iter()
            .map(|proto| {
                let names = PropertyNames::for_field(proto.name());
                let gen =
                    MessageFieldGenerator::new(proto, syntax, names, String::new(), heap, &ctx)
                        .unwrap();
                Fragments {
                    storage: render(|p| gen.generate_storage(p)),
                    interface: render(|p| gen.generate_interface(p)),
                    clone: render(|p| gen.generate_storage_class_clone(p)),
                    comparison: render(|p| gen.generate_field_comparison(p)),
                    required: render(|p| gen.generate_required_field_check(p)),
                    initialized: render(|p| gen.generate_is_initialized_check(p)),
                    decode: render(|p| gen.generate_decode_field_case(p)),
                    traverse: render(|p| gen.generate_traverse(p)),
                }
            })
            .collect()
    }

    fn render(f: impl FnOnce(&mut CodePrinter)) -> String {
        let mut p = CodePrinter::new();
        f(&mut p);
        p.into_content()
    }

    fn one(syntax: &str, field: FieldDescriptorProto, heap: bool) -> Fragments {
        generate(syntax, vec![field], heap, "").remove(0)
    }

    #[test]
    fn test_proto3_int32() {
        let f = one("proto3", field_proto("count", 1, Label::Optional, Type::Int32), false);
        assert_eq!(f.storage, "");
        assert_eq!(f.interface, "\nvar count: Int32 = 0\n");
        assert_eq!(f.decode, "case 1: try decoder.decodeSingularInt32Field(value: &self.count)\n");
        assert_eq!(
            f.traverse,
            "if self.count != 0 {\n  try visitor.visitSingularInt32Field(value: self.count, fieldNumber: 1)\n}\n"
        );
        assert_eq!(f.comparison, "if self.count != other.count {return false}\n");
        assert_eq!(f.required, "");
        assert_eq!(f.initialized, "");
    }

    #[test]
    fn test_proto2_string_with_default() {
        let f = one(
            "proto2",
            with_default(field_proto("greeting", 2, Label::Optional, Type::String), "hi"),
            false,
        );
        assert_eq!(f.storage, "fileprivate var _greeting: String? = nil\n");
        assert_eq!(
            f.interface,
            concat!(
                "\n",
                "var greeting: String {\n",
                "  get {return _greeting ?? \"hi\"}\n",
                "  set {_greeting = newValue}\n",
                "}\n",
                "/// Returns true if `greeting` has been explicitly set.\n",
                "var hasGreeting: Bool {return self._greeting != nil}\n",
                "/// Clears the value of `greeting`. Subsequent reads from it will return its default value.\n",
                "mutating func clearGreeting() {self._greeting = nil}\n",
            )
        );
        assert_eq!(
            f.decode,
            "case 2: try decoder.decodeSingularStringField(value: &self._greeting)\n"
        );
        assert_eq!(
            f.traverse,
            "if let v = self._greeting {\n  try visitor.visitSingularStringField(value: v, fieldNumber: 2)\n}\n"
        );
    }

    #[test]
    fn test_proto2_string_on_heap() {
        let f = one(
            "proto2",
            with_default(field_proto("greeting", 2, Label::Optional, Type::String), "hi"),
            true,
        );
        assert_eq!(f.storage, "var _greeting: String? = nil\n");
        assert_eq!(
            f.interface,
            concat!(
                "\n",
                "var greeting: String {\n",
                "  get {return _storage._greeting ?? \"hi\"}\n",
                "  set {_uniqueStorage()._greeting = newValue}\n",
                "}\n",
                "/// Returns true if `greeting` has been explicitly set.\n",
                "var hasGreeting: Bool {return _storage._greeting != nil}\n",
                "/// Clears the value of `greeting`. Subsequent reads from it will return its default value.\n",
                "mutating func clearGreeting() {_uniqueStorage()._greeting = nil}\n",
            )
        );
        assert_eq!(f.clone, "_greeting = source._greeting\n");
        assert_eq!(
            f.comparison,
            "if _storage._greeting != other_storage._greeting {return false}\n"
        );
        assert_eq!(
            f.decode,
            "case 2: try decoder.decodeSingularStringField(value: &_storage._greeting)\n"
        );
    }

    #[test]
    fn test_map_in_both_eras() {
        for syntax in ["proto2", "proto3"] {
            let f = one(
                syntax,
                message_field_proto("counts", 3, Label::Repeated, ".gen.Holder.CountsEntry"),
                false,
            );
            assert_eq!(f.storage, "");
            assert_eq!(f.interface, "\nvar counts: Dictionary<String,Int32> = [:]\n");
            assert_eq!(
                f.decode,
                "case 3: try decoder.decodeMapField(fieldType: SwiftProtobuf._ProtobufMap<SwiftProtobuf.ProtobufString,SwiftProtobuf.ProtobufInt32>.self, value: &self.counts)\n"
            );
            assert_eq!(
                f.traverse,
                "if !self.counts.isEmpty {\n  try visitor.visitMapField(fieldType: SwiftProtobuf._ProtobufMap<SwiftProtobuf.ProtobufString,SwiftProtobuf.ProtobufInt32>.self, value: self.counts, fieldNumber: 3)\n}\n"
            );
        }
    }

    #[test]
    fn test_message_on_heap() {
        let f = one("proto3", message_field_proto("child", 4, Label::Optional, ".gen.Child"), true);
        assert_eq!(f.storage, "var _child: Gen_Child? = nil\n");
        assert!(f
            .interface
            .contains("  get {return _storage._child ?? Gen_Child()}\n"));
        assert!(f
            .interface
            .contains("var hasChild: Bool {return _storage._child != nil}\n"));
        assert!(f
            .interface
            .contains("mutating func clearChild() {_uniqueStorage()._child = nil}\n"));
        assert_eq!(
            f.decode,
            "case 4: try decoder.decodeSingularMessageField(value: &_storage._child)\n"
        );
        assert_eq!(
            f.traverse,
            "if let v = _storage._child {\n  try visitor.visitSingularMessageField(value: v, fieldNumber: 4)\n}\n"
        );
        assert_eq!(f.initialized, "");
    }

    #[test]
    fn test_proto3_scalar_on_heap_has_no_default_clause() {
        let f = one("proto3", field_proto("count", 1, Label::Optional, Type::Int64), true);
        assert_eq!(f.storage, "var _count: Int64 = 0\n");
        assert_eq!(
            f.interface,
            "\nvar count: Int64 {\n  get {return _storage._count}\n  set {_uniqueStorage()._count = newValue}\n}\n"
        );
        assert_eq!(
            f.traverse,
            "if _storage._count != 0 {\n  try visitor.visitSingularInt64Field(value: _storage._count, fieldNumber: 1)\n}\n"
        );
    }

    #[test]
    fn test_proto3_strings_and_enums() {
        let fields = vec![
            field_proto("name", 1, Label::Optional, Type::String),
            field_proto("blob", 2, Label::Optional, Type::Bytes),
            typed_field_proto("mode", 3, Label::Optional, Type::Enum, ".gen.Mode"),
            typed_field_proto("modes", 4, Label::Repeated, Type::Enum, ".gen.Mode"),
        ];
        let f = generate("proto3", fields, false, "");
        assert_eq!(
            f[0].traverse,
            "if !self.name.isEmpty {\n  try visitor.visitSingularStringField(value: self.name, fieldNumber: 1)\n}\n"
        );
        assert!(f[1].traverse.starts_with("if !self.blob.isEmpty {\n"));
        assert_eq!(f[2].interface, "\nvar mode: Gen_Mode = .off\n");
        assert_eq!(
            f[2].traverse,
            "if self.mode != .off {\n  try visitor.visitSingularEnumField(value: self.mode, fieldNumber: 3)\n}\n"
        );
        assert_eq!(f[3].decode, "case 4: try decoder.decodeRepeatedEnumField(value: &self.modes)\n");
        assert_eq!(
            f[3].traverse,
            "if !self.modes.isEmpty {\n  try visitor.visitPackedEnumField(value: self.modes, fieldNumber: 4)\n}\n"
        );
    }

    #[test]
    fn test_group_fields() {
        let fields = vec![
            typed_field_proto("item", 6, Label::Optional, Type::Group, ".gen.Child"),
            typed_field_proto("items", 7, Label::Repeated, Type::Group, ".gen.Child"),
        ];
        let f = generate("proto2", fields, false, "");
        assert_eq!(f[0].storage, "fileprivate var _item: Gen_Child? = nil\n");
        assert!(f[0].interface.contains("  get {return _item ?? Gen_Child()}\n"));
        assert_eq!(
            f[0].decode,
            "case 6: try decoder.decodeSingularGroupField(value: &self._item)\n"
        );
        assert_eq!(
            f[0].traverse,
            "if let v = self._item {\n  try visitor.visitSingularGroupField(value: v, fieldNumber: 6)\n}\n"
        );

        assert_eq!(f[1].storage, "");
        assert_eq!(f[1].interface, "\nvar items: [Gen_Child] = []\n");
        assert_eq!(
            f[1].decode,
            "case 7: try decoder.decodeRepeatedGroupField(value: &self.items)\n"
        );
        assert_eq!(
            f[1].traverse,
            "if !self.items.isEmpty {\n  try visitor.visitRepeatedGroupField(value: self.items, fieldNumber: 7)\n}\n"
        );
    }

    #[test]
    fn test_packed_option_overrides_syntax() {
        let fields = vec![
            with_packed(field_proto("samples", 1, Label::Repeated, Type::Sint64), true),
            with_packed(field_proto("raw", 2, Label::Repeated, Type::Fixed32), false),
        ];
        let f = generate("proto2", fields.clone(), false, "");
        assert_eq!(
            f[0].traverse,
            "if !self.samples.isEmpty {\n  try visitor.visitPackedSInt64Field(value: self.samples, fieldNumber: 1)\n}\n"
        );
        assert_eq!(
            f[0].decode,
            "case 1: try decoder.decodeRepeatedSInt64Field(value: &self.samples)\n"
        );

        let f = generate("proto3", fields, false, "");
        assert!(f[0].traverse.contains("visitor.visitPackedSInt64Field("));
        assert!(f[1].traverse.contains("visitor.visitRepeatedFixed32Field("));
    }

    #[test]
    fn test_private_visibility_applies_to_accessors() {
        let f = generate(
            "proto2",
            vec![field_proto("flag", 1, Label::Optional, Type::Bool)],
            true,
            "Visibility=Private",
        )
        .remove(0);
        assert!(f.interface.contains("\nprivate var flag: Bool {\n"));
        assert!(f.interface.contains("\nprivate var hasFlag: Bool {return _storage._flag != nil}\n"));
        assert!(f
            .interface
            .contains("\nprivate mutating func clearFlag() {_uniqueStorage()._flag = nil}\n"));
        assert_eq!(f.storage, "var _flag: Bool? = nil\n");
    }

    #[test]
    fn test_required_and_initialization_checks() {
        let fields = vec![
            field_proto("id", 1, Label::Required, Type::Int32),
            message_field_proto("strict", 2, Label::Optional, ".gen.Strict"),
            message_field_proto("stricts", 3, Label::Repeated, ".gen.Strict"),
            message_field_proto("by_id", 4, Label::Repeated, ".gen.Holder.StrictEntry"),
            message_field_proto("child", 5, Label::Optional, ".gen.Child"),
        ];
        let f = generate("proto2", fields, false, "");
        assert_eq!(f[0].required, "if self._id == nil {return false}\n");
        assert_eq!(f[1].required, "");
        assert_eq!(
            f[1].initialized,
            "if let v = self._strict, !v.isInitialized {return false}\n"
        );
        assert_eq!(
            f[2].initialized,
            "if !SwiftProtobuf.Internal.areAllInitialized(self.stricts) {return false}\n"
        );
        assert_eq!(
            f[3].initialized,
            "if !SwiftProtobuf.Internal.areAllInitialized(self.byId) {return false}\n"
        );
        assert_eq!(f[4].initialized, "");
    }

    #[test]
    fn test_public_visibility_applies_to_accessors() {
        let f = generate(
            "proto2",
            vec![field_proto("flag", 1, Label::Optional, Type::Bool)],
            false,
            "Visibility=Public",
        )
        .remove(0);
        assert!(f.interface.contains("\npublic var flag: Bool {\n"));
        assert!(f.interface.contains("\npublic var hasFlag: Bool {return self._flag != nil}\n"));
        assert!(f.interface.contains("\npublic mutating func clearFlag() {self._flag = nil}\n"));
        assert_eq!(f.storage, "fileprivate var _flag: Bool? = nil\n");
    }

    #[test]
    fn test_proto3_optional_tracks_presence() {
        let mut field = field_proto("maybe", 1, Label::Optional, Type::Int32);
        field.proto3_optional = Some(true);
        field.oneof_index = Some(0);
        let f = one("proto3", field, false);
        assert_eq!(f.storage, "fileprivate var _maybe: Int32? = nil\n");
        assert!(f.interface.contains("  get {return _maybe ?? 0}\n"));
        assert_eq!(
            f.traverse,
            "if let v = self._maybe {\n  try visitor.visitSingularInt32Field(value: v, fieldNumber: 1)\n}\n"
        );
    }

    /// Extracts the method name and the value expression of a rendered
    /// decode case or visitor call.
    fn call_parts(fragment: &str, receiver: &str) -> (String, String) {
        let start = fragment.find(receiver).unwrap() + receiver.len();
        let rest = &fragment[start..];
        let method = &rest[..rest.find('(').unwrap()];
        let value_start = rest.find("value: ").unwrap() + "value: ".len();
        let value = rest[value_start..]
            .split(|c: char| c == ',' || c == ')')
            .next()
            .unwrap();
        (method.to_string(), value.trim_start_matches('&').to_string())
    }

    /// Strips the cardinality out of a runtime method name, leaving the codec
    /// family, e.g. `decodeRepeatedSInt32Field` gives `SInt32`.
    fn codec_family(method: &str) -> &str {
        let method = method
            .trim_start_matches("decode")
            .trim_start_matches("visit")
            .trim_end_matches("Field");
        ["Singular", "Repeated", "Packed"]
            .iter()
            .find_map(|modifier| method.strip_prefix(modifier))
            .unwrap_or(method)
    }

    #[test]
    fn test_decode_and_traverse_agree() {
        let types = [
            Type::Double,
            Type::Float,
            Type::Int64,
            Type::Uint64,
            Type::Int32,
            Type::Fixed64,
            Type::Fixed32,
            Type::Bool,
            Type::String,
            Type::Bytes,
            Type::Uint32,
            Type::Sfixed32,
            Type::Sfixed64,
            Type::Sint32,
            Type::Sint64,
            Type::Enum,
            Type::Message,
            Type::Group,
        ];
        let mut fields = Vec::new();
        for (idx, ty) in types.iter().enumerate() {
            for (offset, label) in [Label::Optional, Label::Repeated].into_iter().enumerate() {
                let number = (idx * 2 + offset + 1) as i32;
                let name = format!("f{number}");
                fields.push(match ty {
                    Type::Enum => typed_field_proto(&name, number, label, *ty, ".gen.Mode"),
                    Type::Message | Type::Group => {
                        typed_field_proto(&name, number, label, *ty, ".gen.Child")
                    }
                    _ => field_proto(&name, number, label, *ty),
                });
            }
        }
        fields.push(message_field_proto("counts", 100, Label::Repeated, ".gen.Holder.CountsEntry"));

        for syntax in ["proto2", "proto3"] {
            for heap in [false, true] {
                for f in generate(syntax, fields.clone(), heap, "") {
                    let (decode_method, decode_slot) = call_parts(&f.decode, "decoder.");
                    let (visit_method, visit_value) = call_parts(&f.traverse, "visitor.");

                    assert_eq!(codec_family(&decode_method), codec_family(&visit_method));

                    // The visited value is either the decoded slot itself or
                    // bound from it.
                    if visit_value == "v" {
                        assert!(f.traverse.starts_with(&format!("if let v = {decode_slot} {{")));
                    } else {
                        assert_eq!(visit_value, decode_slot);
                    }
                    assert!(f.comparison.starts_with(&format!("if {decode_slot} != ")));
                }
            }
        }
    }
}
