//! Utility functions for turning Protobuf identifiers into Swift identifiers.

use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToShoutySnakeCase, ToUpperCamelCase};
use itertools::Itertools;
use once_cell::sync::Lazy;

// https://docs.swift.org/swift-book/documentation/the-swift-programming-language/lexicalstructure/#Keywords-and-Punctuation
static SWIFT_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "associatedtype", "class", "deinit", "enum", "extension", "fileprivate", "func",
        "import", "init", "inout", "internal", "let", "open", "operator", "private",
        "protocol", "public", "rethrows", "static", "struct", "subscript", "typealias", "var",
        "break", "case", "continue", "default", "defer", "do", "else", "fallthrough", "for",
        "guard", "if", "in", "repeat", "return", "switch", "where", "while", "as", "Any",
        "catch", "false", "is", "nil", "super", "self", "Self", "throw", "throws", "true",
        "try", "Type", "Protocol",
    ]
    .into_iter()
    .collect()
});

// Members every generated message already declares.
static MESSAGE_MEMBERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "debugDescription", "description", "hashValue", "isInitialized", "protoMessageName",
        "unknownFields", "traverse", "decodeMessage",
    ]
    .into_iter()
    .collect()
});

// Type names that would shadow the Swift standard library or the runtime.
static RESERVED_TYPE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Array", "Bool", "Character", "Data", "Dictionary", "Double", "Enum", "Error",
        "Float", "Foundation", "Int", "Int32", "Int64", "Message", "Optional", "String",
        "SwiftProtobuf", "UInt", "UInt32", "UInt64",
    ]
    .into_iter()
    .collect()
});

/// The Swift names generated for one message field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNames {
    /// The public property, back-quoted when it is a keyword.
    pub value: String,
    /// The presence query, `hasFoo`.
    pub has: String,
    /// The clear method, `clearFoo`.
    pub clear: String,
    /// The backing slot, `_foo`.
    pub storage: String,
}

impl PropertyNames {
    /// Builds the names from a field's proto name.
    pub fn for_field(proto_name: &str) -> PropertyNames {
        let mut base = proto_name.to_lower_camel_case();
        if base.is_empty() || base.starts_with(|c: char| c.is_ascii_digit()) {
            base.insert(0, '_');
        }
        if MESSAGE_MEMBERS.contains(base.as_str()) {
            base.push_str("_p");
        }
        PropertyNames::from_base(base)
    }

    /// Appends a disambiguating suffix, used when two fields of a message
    /// map onto the same Swift name.
    pub fn with_suffix(&self, suffix: &str) -> PropertyNames {
        PropertyNames::from_base(format!("{}_{}", unquote(&self.value), suffix))
    }

    fn from_base(base: String) -> PropertyNames {
        let capitalized = upper_first(&base);
        PropertyNames {
            value: quote_if_keyword(&base),
            has: format!("has{capitalized}"),
            clear: format!("clear{capitalized}"),
            storage: format!("_{base}"),
        }
    }
}

/// Returns the Swift type prefix for the top-level types of a file.
///
/// An explicit `swift_prefix` file option wins; otherwise each package
/// component is camel cased and joined with underscores, `foo.bar_baz`
/// becoming `Foo_BarBaz_`.
pub fn type_prefix(package: &str, swift_prefix: Option<&str>) -> String {
    if let Some(prefix) = swift_prefix {
        return prefix.to_string();
    }
    let components = package
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_upper_camel_case())
        .collect::<Vec<_>>();
    if components.is_empty() {
        String::new()
    } else {
        format!("{}_", components.iter().join("_"))
    }
}

/// Returns the Swift name of a message or enum declared directly in a file.
pub fn top_level_type_name(prefix: &str, proto_name: &str, suffix: &str) -> String {
    if prefix.is_empty() {
        sanitize_type_name(proto_name, suffix)
    } else {
        format!("{prefix}{proto_name}")
    }
}

/// Returns the Swift name of a type nested in another message.
pub fn nested_type_name(parent: &str, proto_name: &str, suffix: &str) -> String {
    format!("{}.{}", parent, sanitize_type_name(proto_name, suffix))
}

fn sanitize_type_name(proto_name: &str, suffix: &str) -> String {
    if RESERVED_TYPE_NAMES.contains(proto_name) || SWIFT_KEYWORDS.contains(proto_name) {
        format!("{proto_name}{suffix}")
    } else {
        proto_name.to_string()
    }
}

/// Converts an enum value name to a Swift case name.
///
/// A prefix repeating the enum's own name is stripped, so `COLOR_DARK_RED`
/// in enum `Color` becomes `darkRed`.
pub fn enum_case_name(enum_name: &str, value_name: &str) -> String {
    let prefix = format!("{}_", enum_name.to_shouty_snake_case());
    let stripped = value_name
        .to_shouty_snake_case()
        .strip_prefix(&prefix)
        .map(str::to_string)
        .filter(|rest| !rest.is_empty() && !rest.starts_with(|c: char| c.is_ascii_digit()));

    let mut name = match stripped {
        Some(rest) => rest.to_lower_camel_case(),
        None => value_name.to_lower_camel_case(),
    };
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    quote_if_keyword(&name)
}

fn quote_if_keyword(ident: &str) -> String {
    if SWIFT_KEYWORDS.contains(ident) {
        format!("`{ident}`")
    } else {
        ident.to_string()
    }
}

fn unquote(ident: &str) -> &str {
    ident.trim_matches('`')
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names() {
        let names = PropertyNames::for_field("optional_int32");
        assert_eq!(names.value, "optionalInt32");
        assert_eq!(names.has, "hasOptionalInt32");
        assert_eq!(names.clear, "clearOptionalInt32");
        assert_eq!(names.storage, "_optionalInt32");

        let names = PropertyNames::for_field("class");
        assert_eq!(names.value, "`class`");
        assert_eq!(names.has, "hasClass");
        assert_eq!(names.storage, "_class");

        let names = PropertyNames::for_field("description");
        assert_eq!(names.value, "description_p");
        assert_eq!(names.has, "hasDescription_p");
    }

    #[test]
    fn test_with_suffix() {
        let names = PropertyNames::for_field("foo_bar").with_suffix("7");
        assert_eq!(names.value, "fooBar_7");
        assert_eq!(names.clear, "clearFooBar_7");
        assert_eq!(names.storage, "_fooBar_7");
    }

    #[test]
    fn test_type_prefix() {
        assert_eq!(type_prefix("foo.bar_baz", None), "Foo_BarBaz_");
        assert_eq!(type_prefix("", None), "");
        assert_eq!(type_prefix("foo", Some("FB")), "FB");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(top_level_type_name("Foo_", "Bar", "Message"), "Foo_Bar");
        assert_eq!(top_level_type_name("", "String", "Message"), "StringMessage");
        assert_eq!(top_level_type_name("", "Plain", "Message"), "Plain");
        assert_eq!(nested_type_name("Foo_Bar", "Type", "Enum"), "Foo_Bar.TypeEnum");
        assert_eq!(nested_type_name("Foo_Bar", "Inner", "Message"), "Foo_Bar.Inner");
    }

    #[test]
    fn test_enum_case_name() {
        assert_eq!(enum_case_name("Color", "COLOR_DARK_RED"), "darkRed");
        assert_eq!(enum_case_name("Color", "BLUE"), "blue");
        assert_eq!(enum_case_name("Color", "COLOR_1"), "color1");
        assert_eq!(enum_case_name("Mode", "DEFAULT"), "`default`");
        assert_eq!(enum_case_name("Mode", "MODE_DEFAULT"), "`default`");
    }
}
