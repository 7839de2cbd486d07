use std::collections::HashMap;

use log::{debug, warn};
use multimap::MultiMap;
use prost_types::source_code_info::Location;
use prost_types::{DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto};

use crate::ast::Comments;
use crate::error::Result;
use crate::fully_qualified_name::FullyQualifiedName;
use crate::ident;
use crate::locations::{DescriptorLocations, FileDescriptorProtoLocations};
use crate::syntax::Syntax;

/// A `.proto` file of the compilation unit.
#[derive(Debug)]
pub struct FileDescriptor<'a> {
    pub proto: &'a FileDescriptorProto,
    pub syntax: Syntax,
    /// Prefix of the Swift names of the file's top-level types.
    pub type_prefix: String,
    /// Top-level messages, as indices into the owning `DescriptorSet`.
    pub messages: Vec<usize>,
    /// Top-level enums, as indices into the owning `DescriptorSet`.
    pub enums: Vec<usize>,
    locations: HashMap<Vec<i32>, &'a Location>,
}

impl<'a> FileDescriptor<'a> {
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    pub fn package(&self) -> &'a str {
        self.proto.package()
    }

    /// Returns the comments attached to the item at `path`, if any.
    pub fn comments(&self, path: &[i32]) -> Option<Comments> {
        self.locations.get(path).map(|location| Comments::from_location(location))
    }
}

/// A message type, nested or top-level.
#[derive(Debug)]
pub struct MessageDescriptor<'a> {
    pub proto: &'a DescriptorProto,
    pub fq_name: FullyQualifiedName,
    pub swift_name: String,
    /// Position in the owning `DescriptorSet`.
    pub index: usize,
    /// Index of the declaring file.
    pub file: usize,
    /// `SourceCodeInfo` path of the declaration.
    pub path: Vec<i32>,
    pub nested_messages: Vec<usize>,
    pub nested_enums: Vec<usize>,
}

impl<'a> MessageDescriptor<'a> {
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Whether this is the synthetic entry type of a `map<K, V>` field.
    pub fn is_map_entry(&self) -> bool {
        self.proto
            .options
            .as_ref()
            .and_then(|options| options.map_entry)
            .unwrap_or(false)
    }

    pub fn fields(&self) -> &'a [FieldDescriptorProto] {
        &self.proto.field
    }

    pub fn field_by_number(&self, number: i32) -> Option<&'a FieldDescriptorProto> {
        self.proto.field.iter().find(|field| field.number() == number)
    }
}

/// An enum type, nested or top-level.
#[derive(Debug)]
pub struct EnumDescriptor<'a> {
    pub proto: &'a EnumDescriptorProto,
    pub fq_name: FullyQualifiedName,
    pub swift_name: String,
    pub file: usize,
    pub path: Vec<i32>,
    /// Swift case names, parallel to `proto.value`.
    pub case_names: Vec<String>,
}

impl<'a> EnumDescriptor<'a> {
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the Swift case name of the value called `proto_name`.
    pub fn case_name(&self, proto_name: &str) -> Option<&str> {
        self.proto
            .value
            .iter()
            .position(|value| value.name() == proto_name)
            .map(|idx| self.case_names[idx].as_str())
    }

    /// The case a field of this enum type defaults to, in the `.name` form
    /// usable wherever the enum type can be inferred. `None` for an enum
    /// without values.
    pub fn default_case_reference(&self) -> Option<String> {
        self.case_names.first().map(|name| format!(".{name}"))
    }
}

/// The symbol table of a compilation unit.
///
/// Built once from every file of the request, in the order the files were
/// supplied, and read-only afterwards. When several files declare the same
/// fully-qualified name the first one wins.
#[derive(Debug)]
pub struct DescriptorSet<'a> {
    files: Vec<FileDescriptor<'a>>,
    messages: Vec<MessageDescriptor<'a>>,
    enums: Vec<EnumDescriptor<'a>>,
    file_index: HashMap<&'a str, usize>,
    message_index: MultiMap<String, usize>,
    enum_index: MultiMap<String, usize>,
}

impl<'a> DescriptorSet<'a> {
    pub fn new(protos: impl IntoIterator<Item = &'a FileDescriptorProto>) -> Result<Self> {
        let mut set = DescriptorSet {
            files: Vec::new(),
            messages: Vec::new(),
            enums: Vec::new(),
            file_index: HashMap::new(),
            message_index: MultiMap::new(),
            enum_index: MultiMap::new(),
        };

        for proto in protos {
            set.add_file(proto)?;
        }

        Ok(set)
    }

    fn add_file(&mut self, proto: &'a FileDescriptorProto) -> Result<()> {
        let file = self.files.len();
        debug!("file: {:?}, package: {:?}", proto.name(), proto.package());

        let mut locations = HashMap::new();
        if let Some(source_info) = proto.source_code_info.as_ref() {
            for location in &source_info.location {
                let len = location.path.len();
                if len > 0 && len % 2 == 0 {
                    locations.entry(location.path.clone()).or_insert(location);
                }
            }
        }

        let swift_prefix = proto.options.as_ref().and_then(|o| o.swift_prefix.as_deref());
        self.files.push(FileDescriptor {
            proto,
            syntax: Syntax::from_descriptor(proto.syntax.as_deref())?,
            type_prefix: ident::type_prefix(proto.package(), swift_prefix),
            messages: Vec::new(),
            enums: Vec::new(),
            locations,
        });
        self.file_index.entry(proto.name()).or_insert(file);

        let empty: [&str; 0] = [];
        let scope = FullyQualifiedName::new(proto.package(), &empty, "");

        for (idx, message) in proto.message_type.iter().enumerate() {
            let path = vec![FileDescriptorProtoLocations::MESSAGE_TYPE, idx as i32];
            let message = self.add_message(file, &scope, None, message, path);
            self.files[file].messages.push(message);
        }
        for (idx, enum_type) in proto.enum_type.iter().enumerate() {
            let path = vec![FileDescriptorProtoLocations::ENUM_TYPE, idx as i32];
            let enum_type = self.add_enum(file, &scope, None, enum_type, path);
            self.files[file].enums.push(enum_type);
        }

        Ok(())
    }

    fn add_message(
        &mut self,
        file: usize,
        scope: &FullyQualifiedName,
        parent_swift_name: Option<&str>,
        proto: &'a DescriptorProto,
        path: Vec<i32>,
    ) -> usize {
        let fq_name = scope.join(proto.name());
        let swift_name = match parent_swift_name {
            Some(parent) => ident::nested_type_name(parent, proto.name(), "Message"),
            None => ident::top_level_type_name(&self.files[file].type_prefix, proto.name(), "Message"),
        };

        let index = self.messages.len();
        if self.message_index.contains_key(fq_name.as_ref()) {
            warn!("duplicate message {}: the first definition wins", fq_name);
        }
        self.message_index.insert(fq_name.as_ref().to_string(), index);
        self.messages.push(MessageDescriptor {
            proto,
            fq_name: fq_name.clone(),
            swift_name: swift_name.clone(),
            index,
            file,
            path: path.clone(),
            nested_messages: Vec::new(),
            nested_enums: Vec::new(),
        });

        for (idx, nested) in proto.nested_type.iter().enumerate() {
            let mut nested_path = path.clone();
            nested_path.extend([DescriptorLocations::NESTED_TYPE, idx as i32]);
            let nested = self.add_message(file, &fq_name, Some(&swift_name), nested, nested_path);
            self.messages[index].nested_messages.push(nested);
        }
        for (idx, nested) in proto.enum_type.iter().enumerate() {
            let mut nested_path = path.clone();
            nested_path.extend([DescriptorLocations::ENUM_TYPE, idx as i32]);
            let nested = self.add_enum(file, &fq_name, Some(&swift_name), nested, nested_path);
            self.messages[index].nested_enums.push(nested);
        }

        index
    }

    fn add_enum(
        &mut self,
        file: usize,
        scope: &FullyQualifiedName,
        parent_swift_name: Option<&str>,
        proto: &'a EnumDescriptorProto,
        path: Vec<i32>,
    ) -> usize {
        let fq_name = scope.join(proto.name());
        let swift_name = match parent_swift_name {
            Some(parent) => ident::nested_type_name(parent, proto.name(), "Enum"),
            None => ident::top_level_type_name(&self.files[file].type_prefix, proto.name(), "Enum"),
        };
        let case_names = proto
            .value
            .iter()
            .map(|value| ident::enum_case_name(proto.name(), value.name()))
            .collect();

        let index = self.enums.len();
        if self.enum_index.contains_key(fq_name.as_ref()) {
            warn!("duplicate enum {}: the first definition wins", fq_name);
        }
        self.enum_index.insert(fq_name.as_ref().to_string(), index);
        self.enums.push(EnumDescriptor {
            proto,
            fq_name,
            swift_name,
            file,
            path,
            case_names,
        });
        index
    }

    pub fn file(&self, index: usize) -> &FileDescriptor<'a> {
        &self.files[index]
    }

    pub fn message(&self, index: usize) -> &MessageDescriptor<'a> {
        &self.messages[index]
    }

    pub fn enum_type(&self, index: usize) -> &EnumDescriptor<'a> {
        &self.enums[index]
    }

    pub fn messages(&self) -> &[MessageDescriptor<'a>] {
        &self.messages
    }

    /// Looks up a file by its `.proto` name.
    pub fn lookup_file(&self, name: &str) -> Option<&FileDescriptor<'a>> {
        self.file_index.get(name).map(|&index| &self.files[index])
    }

    /// Looks up a message by fully-qualified name, returning its index.
    pub fn lookup_message_index(&self, fq_name: &str) -> Option<usize> {
        self.message_index.get(fq_name).copied()
    }

    pub fn lookup_message(&self, fq_name: &str) -> Option<&MessageDescriptor<'a>> {
        self.lookup_message_index(fq_name).map(|index| &self.messages[index])
    }

    pub fn lookup_enum(&self, fq_name: &str) -> Option<&EnumDescriptor<'a>> {
        self.enum_index.get(fq_name).map(|&index| &self.enums[index])
    }

    /// Every enum registered under `fq_name`, in file order.
    pub fn lookup_enums(&self, fq_name: &str) -> impl Iterator<Item = &EnumDescriptor<'a>> {
        self.enum_index
            .get_vec(fq_name)
            .into_iter()
            .flatten()
            .map(|&index| &self.enums[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::*;

    #[test]
    fn test_nested_names() {
        let file = file_proto(
            "test.proto",
            "foo.bar",
            "proto3",
            vec![message_proto(
                "Outer",
                vec![],
                vec![message_proto("Inner", vec![], vec![], vec![])],
                vec![enum_proto("Kind", &["KIND_UNKNOWN", "KIND_BIG"])],
            )],
            vec![enum_proto("Color", &["RED"])],
        );
        let set = DescriptorSet::new([&file]).unwrap();

        let outer = set.lookup_message(".foo.bar.Outer").unwrap();
        assert_eq!(outer.swift_name, "Foo_Bar_Outer");
        assert_eq!(outer.path, vec![4, 0]);

        let inner = set.lookup_message(".foo.bar.Outer.Inner").unwrap();
        assert_eq!(inner.swift_name, "Foo_Bar_Outer.Inner");
        assert_eq!(inner.path, vec![4, 0, 3, 0]);

        let kind = set.lookup_enum(".foo.bar.Outer.Kind").unwrap();
        assert_eq!(kind.swift_name, "Foo_Bar_Outer.Kind");
        assert_eq!(kind.case_names, vec!["unknown", "big"]);
        assert_eq!(kind.default_case_reference().as_deref(), Some(".unknown"));

        let color = set.lookup_enum(".foo.bar.Color").unwrap();
        assert_eq!(color.path, vec![5, 0]);
        assert_eq!(color.case_name("RED"), Some("red"));
        assert_eq!(color.case_name("GREEN"), None);

        assert!(set.lookup_message(".foo.bar.Missing").is_none());
        assert_eq!(set.lookup_file("test.proto").unwrap().type_prefix, "Foo_Bar_");
    }

    #[test]
    fn test_first_definition_wins() {
        let first = file_proto(
            "a.proto",
            "dup",
            "proto2",
            vec![message_proto("Msg", vec![field_proto("a", 1, Label::Optional, Type::Int32)], vec![], vec![])],
            vec![],
        );
        let second = file_proto(
            "b.proto",
            "dup",
            "proto2",
            vec![message_proto("Msg", vec![field_proto("b", 2, Label::Optional, Type::Int32)], vec![], vec![])],
            vec![],
        );
        let set = DescriptorSet::new([&first, &second]).unwrap();
        let msg = set.lookup_message(".dup.Msg").unwrap();
        assert_eq!(msg.file, 0);
        assert_eq!(msg.fields()[0].name(), "a");
    }

    #[test]
    fn test_no_package() {
        let file = file_proto(
            "plain.proto",
            "",
            "proto2",
            vec![message_proto(
                "String",
                vec![],
                vec![message_proto("Part", vec![], vec![], vec![])],
                vec![],
            )],
            vec![enum_proto("Mode", &["MODE_ON"])],
        );
        let set = DescriptorSet::new([&file]).unwrap();
        let msg = set.lookup_message(".String").unwrap();
        assert_eq!(msg.fq_name.as_ref(), ".String");
        assert_eq!(msg.swift_name, "StringMessage");
        assert_eq!(set.lookup_message(".String.Part").unwrap().swift_name, "StringMessage.Part");
        assert_eq!(set.lookup_enum(".Mode").unwrap().swift_name, "Mode");
    }

    #[test]
    fn test_unsupported_syntax() {
        let file = file_proto("x.proto", "x", "editions", vec![], vec![]);
        assert!(DescriptorSet::new([&file]).is_err());
    }
}
