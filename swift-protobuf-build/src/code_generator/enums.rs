use std::collections::HashMap;

use log::debug;

use super::local_name;
use crate::context::Context;
use crate::descriptor_set::{EnumDescriptor, FileDescriptor};
use crate::locations::EnumDescriptorLocations;
use crate::printer::CodePrinter;

struct EnumCase {
    name: String,
    number: i32,
    comments: String,
}

/// Generates a Swift enum for a proto enum.
///
/// Values sharing a number with an earlier value (`allow_alias`) become
/// static aliases of the first one rather than cases of their own.
pub(super) struct EnumGenerator<'c> {
    enum_type: &'c EnumDescriptor<'c>,
    comments: String,
    visibility: &'static str,
    is_proto3: bool,
    cases: Vec<EnumCase>,
    aliases: Vec<(String, String)>,
}

impl<'c> EnumGenerator<'c> {
    pub(super) fn new(
        enum_type: &'c EnumDescriptor<'c>,
        file: &'c FileDescriptor<'c>,
        ctx: &Context<'_>,
    ) -> EnumGenerator<'c> {
        debug!("  enum: {:?}", enum_type.name());

        let mut canonical: HashMap<i32, usize> = HashMap::new();
        let mut cases: Vec<EnumCase> = Vec::new();
        let mut aliases = Vec::new();

        for (idx, value) in enum_type.proto.value.iter().enumerate() {
            let name = enum_type.case_names[idx].clone();
            if let Some(&first) = canonical.get(&value.number()) {
                aliases.push((name, cases[first].name.clone()));
                continue;
            }

            let mut path = enum_type.path.clone();
            path.extend([EnumDescriptorLocations::VALUE, idx as i32]);
            canonical.insert(value.number(), cases.len());
            cases.push(EnumCase {
                name,
                number: value.number(),
                comments: file
                    .comments(&path)
                    .map(|comments| comments.to_swift())
                    .unwrap_or_default(),
            });
        }

        EnumGenerator {
            enum_type,
            comments: file
                .comments(&enum_type.path)
                .map(|comments| comments.to_swift())
                .unwrap_or_default(),
            visibility: ctx.options().type_visibility_snippet(),
            is_proto3: file.syntax.is_proto3(),
            cases,
            aliases,
        }
    }

    pub(super) fn generate_main_enum(&self, p: &mut CodePrinter) {
        let vis = self.visibility;
        let name = local_name(&self.enum_type.swift_name);

        p.print(&self.comments);
        p.print(&format!("{vis}enum {name}: SwiftProtobuf.Enum {{\n"));
        p.indent();
        p.print(&format!("{vis}typealias RawValue = Int\n"));
        for case in &self.cases {
            p.print(&case.comments);
            p.print(&format!("case {} // = {}\n", case.name, case.number));
        }
        if self.is_proto3 {
            p.print("case UNRECOGNIZED(Int)\n");
        }

        let default_case = match self.cases.first() {
            Some(case) => Some(format!(".{}", case.name)),
            None if self.is_proto3 => Some(".UNRECOGNIZED(0)".to_string()),
            None => None,
        };
        if let Some(default_case) = default_case {
            p.print(&format!("\n{vis}init() {{\n"));
            p.indent();
            p.print(&format!("self = {default_case}\n"));
            p.outdent();
            p.print("}\n");
        }

        p.print(&format!("\n{vis}init?(rawValue: Int) {{\n"));
        p.indent();
        p.print("switch rawValue {\n");
        for case in &self.cases {
            p.print(&format!("case {}: self = .{}\n", case.number, case.name));
        }
        if self.is_proto3 {
            p.print("default: self = .UNRECOGNIZED(rawValue)\n");
        } else {
            p.print("default: return nil\n");
        }
        p.print("}\n");
        p.outdent();
        p.print("}\n");

        p.print(&format!("\n{vis}var rawValue: Int {{\n"));
        p.indent();
        p.print("switch self {\n");
        for case in &self.cases {
            p.print(&format!("case .{}: return {}\n", case.name, case.number));
        }
        if self.is_proto3 {
            p.print("case .UNRECOGNIZED(let i): return i\n");
        }
        p.print("}\n");
        p.outdent();
        p.print("}\n");

        if !self.aliases.is_empty() {
            p.print("\n");
            for (alias, case) in &self.aliases {
                p.print(&format!("{vis}static let {alias}: {name} = .{case}\n"));
            }
        }

        p.outdent();
        p.print("}\n");
    }
}
