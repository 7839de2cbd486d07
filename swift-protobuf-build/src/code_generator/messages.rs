use std::collections::HashSet;

use itertools::Itertools;
use log::{debug, warn};

use super::enums::EnumGenerator;
use super::local_name;
use crate::context::Context;
use crate::descriptor_set::{FileDescriptor, MessageDescriptor};
use crate::error::Result;
use crate::field::MessageFieldGenerator;
use crate::ident::PropertyNames;
use crate::locations::DescriptorLocations;
use crate::message_graph::uses_heap_storage;
use crate::printer::CodePrinter;

/// Generates a message struct, its nested types, and its runtime
/// conformance.
pub(super) struct MessageGenerator<'c> {
    message: &'c MessageDescriptor<'c>,
    proto_message_name: String,
    comments: String,
    visibility: &'static str,
    uses_heap_storage: bool,
    has_required_fields: bool,
    fields: Vec<MessageFieldGenerator<'c>>,
    messages: Vec<MessageGenerator<'c>>,
    enums: Vec<EnumGenerator<'c>>,
}

impl<'c> MessageGenerator<'c> {
    pub(super) fn new(
        message: &'c MessageDescriptor<'c>,
        file: &'c FileDescriptor<'c>,
        ctx: &'c Context<'_>,
    ) -> Result<MessageGenerator<'c>> {
        debug!("  message: {:?}", message.name());

        let uses_heap_storage = uses_heap_storage(message);
        let mut used_names = HashSet::new();
        let mut fields = Vec::new();

        for (idx, field) in message.fields().iter().enumerate() {
            if field.oneof_index.is_some() && !field.proto3_optional.unwrap_or(false) {
                warn!(
                    "skipping oneof field {}.{}: oneofs are not supported",
                    message.fq_name,
                    field.name()
                );
                continue;
            }

            let mut names = PropertyNames::for_field(field.name());
            if !used_names.insert(names.value.clone()) {
                names = names.with_suffix(&field.number().to_string());
                used_names.insert(names.value.clone());
            }

            let mut path = message.path.clone();
            path.extend([DescriptorLocations::FIELD, idx as i32]);
            let comments = file
                .comments(&path)
                .map(|comments| comments.to_swift())
                .unwrap_or_default();

            fields.push(MessageFieldGenerator::new(
                field,
                file.syntax,
                names,
                comments,
                uses_heap_storage,
                ctx,
            )?);
        }

        let messages = message
            .nested_messages
            .iter()
            .map(|&index| ctx.descriptors().message(index))
            .filter(|nested| !nested.is_map_entry())
            .map(|nested| MessageGenerator::new(nested, file, ctx))
            .collect::<Result<Vec<_>>>()?;
        let enums = message
            .nested_enums
            .iter()
            .map(|&index| EnumGenerator::new(ctx.descriptors().enum_type(index), file, ctx))
            .collect();

        let relative_name = message
            .fq_name
            .as_ref()
            .strip_prefix(&format!(".{}.", file.package()))
            .unwrap_or_else(|| message.fq_name.as_ref().trim_start_matches('.'));
        let proto_message_name = if file.package().is_empty() {
            format!("\"{relative_name}\"")
        } else {
            format!("_protobuf_package + \".{relative_name}\"")
        };

        Ok(MessageGenerator {
            message,
            proto_message_name,
            comments: file
                .comments(&message.path)
                .map(|comments| comments.to_swift())
                .unwrap_or_default(),
            visibility: ctx.options().type_visibility_snippet(),
            uses_heap_storage,
            has_required_fields: ctx.has_required_fields(message),
            fields,
            messages,
            enums,
        })
    }

    pub(super) fn generate_main_struct(&self, p: &mut CodePrinter) {
        let vis = self.visibility;

        p.print(&self.comments);
        p.print(&format!(
            "{vis}struct {}: SwiftProtobuf.Message, SwiftProtobuf._MessageImplementationBase {{\n",
            local_name(&self.message.swift_name)
        ));
        p.indent();
        p.print(&format!(
            "{vis}static let protoMessageName: String = {}\n",
            self.proto_message_name
        ));

        if !self.uses_heap_storage {
            let mut storage = CodePrinter::new();
            for field in &self.fields {
                field.generate_storage(&mut storage);
            }
            if !storage.content().is_empty() {
                p.print("\n");
                p.print(storage.content());
            }
        }

        for field in &self.fields {
            field.generate_interface(p);
        }

        p.print(&format!(
            "\n{vis}var unknownFields = SwiftProtobuf.UnknownStorage()\n"
        ));

        for enum_type in &self.enums {
            p.print("\n");
            enum_type.generate_main_enum(p);
        }
        for message in &self.messages {
            p.print("\n");
            message.generate_main_struct(p);
        }

        p.print(&format!("\n{vis}init() {{}}\n"));

        if self.has_required_fields {
            p.print("\n");
            self.generate_is_initialized(p);
        }

        p.print("\n");
        self.generate_decode_message(p);
        p.print("\n");
        self.generate_traverse(p);
        p.print("\n");
        self.generate_message_equality(p);

        if self.uses_heap_storage {
            p.print("\n");
            self.generate_storage_class(p);
        }

        p.outdent();
        p.print("}\n");
    }

    fn generate_is_initialized(&self, p: &mut CodePrinter) {
        p.print(&format!("{}var isInitialized: Bool {{\n", self.visibility));
        p.indent();
        if self.uses_heap_storage {
            p.print("return withExtendedLifetime(_storage) { (_storage: _StorageClass) in\n");
            p.indent();
        }
        for field in &self.fields {
            field.generate_required_field_check(p);
        }
        for field in &self.fields {
            field.generate_is_initialized_check(p);
        }
        p.print("return true\n");
        if self.uses_heap_storage {
            p.outdent();
            p.print("}\n");
        }
        p.outdent();
        p.print("}\n");
    }

    fn generate_decode_message(&self, p: &mut CodePrinter) {
        p.print(&format!(
            "{}mutating func decodeMessage<D: SwiftProtobuf.Decoder>(decoder: inout D) throws {{\n",
            self.visibility
        ));
        p.indent();
        if self.uses_heap_storage {
            p.print("_ = _uniqueStorage()\n");
            p.print("try withExtendedLifetime(_storage) { (_storage: _StorageClass) in\n");
            p.indent();
        }
        p.print("while let fieldNumber = try decoder.nextFieldNumber() {\n");
        p.indent();
        p.print("switch fieldNumber {\n");
        for field in self.fields_by_number() {
            field.generate_decode_field_case(p);
        }
        p.print("default: break\n");
        p.print("}\n");
        p.outdent();
        p.print("}\n");
        if self.uses_heap_storage {
            p.outdent();
            p.print("}\n");
        }
        p.outdent();
        p.print("}\n");
    }

    fn generate_traverse(&self, p: &mut CodePrinter) {
        p.print(&format!(
            "{}func traverse<V: SwiftProtobuf.Visitor>(visitor: inout V) throws {{\n",
            self.visibility
        ));
        p.indent();
        if self.uses_heap_storage {
            p.print("try withExtendedLifetime(_storage) { (_storage: _StorageClass) in\n");
            p.indent();
        }
        for field in self.fields_by_number() {
            field.generate_traverse(p);
        }
        if self.uses_heap_storage {
            p.outdent();
            p.print("}\n");
        }
        p.print("try unknownFields.traverse(visitor: &visitor)\n");
        p.outdent();
        p.print("}\n");
    }

    fn generate_message_equality(&self, p: &mut CodePrinter) {
        p.print(&format!(
            "{}func _protobuf_generated_isEqualTo(other: {}) -> Bool {{\n",
            self.visibility, self.message.swift_name
        ));
        p.indent();
        if self.uses_heap_storage {
            p.print("if _storage !== other._storage {\n");
            p.indent();
            p.print(
                "let storagesAreEqual: Bool = withExtendedLifetime((_storage, other._storage)) { (_args: (_StorageClass, _StorageClass)) in\n",
            );
            p.indent();
            p.print("let _storage = _args.0\n");
            p.print("let other_storage = _args.1\n");
            for field in &self.fields {
                field.generate_field_comparison(p);
            }
            p.print("return true\n");
            p.outdent();
            p.print("}\n");
            p.print("if !storagesAreEqual {return false}\n");
            p.outdent();
            p.print("}\n");
        } else {
            for field in &self.fields {
                field.generate_field_comparison(p);
            }
        }
        p.print("if unknownFields != other.unknownFields {return false}\n");
        p.print("return true\n");
        p.outdent();
        p.print("}\n");
    }

    fn generate_storage_class(&self, p: &mut CodePrinter) {
        p.print("fileprivate class _StorageClass {\n");
        p.indent();
        for field in &self.fields {
            field.generate_storage(p);
        }
        p.print("\ninit() {}\n\ninit(copying source: _StorageClass) {\n");
        p.indent();
        for field in &self.fields {
            field.generate_storage_class_clone(p);
        }
        p.outdent();
        p.print("}\n");
        p.outdent();
        p.print("}\n");

        p.print("\nfileprivate mutating func _uniqueStorage() -> _StorageClass {\n");
        p.indent();
        p.print("if !isKnownUniquelyReferenced(&_storage) {\n");
        p.indent();
        p.print("_storage = _StorageClass(copying: _storage)\n");
        p.outdent();
        p.print("}\n");
        p.print("return _storage\n");
        p.outdent();
        p.print("}\n");

        p.print("\nfileprivate var _storage = _StorageClass()\n");
    }

    fn fields_by_number(&self) -> impl Iterator<Item = &MessageFieldGenerator<'c>> {
        self.fields.iter().sorted_by_key(|field| field.number())
    }
}
