//! Emission of whole `.pb.swift` files.

mod enums;
mod messages;

use log::debug;

use crate::context::Context;
use crate::descriptor_set::FileDescriptor;
use crate::error::Result;
use crate::printer::CodePrinter;

use enums::EnumGenerator;
use messages::MessageGenerator;

/// Generates the Swift source of one `.proto` file.
pub struct FileGenerator<'c> {
    file: &'c FileDescriptor<'c>,
    output_filename: String,
}

impl<'c> FileGenerator<'c> {
    pub fn new(file: &'c FileDescriptor<'c>, ctx: &Context<'_>) -> FileGenerator<'c> {
        FileGenerator {
            file,
            output_filename: ctx.options().file_naming.output_filename(file.name()),
        }
    }

    pub fn output_filename(&self) -> String {
        self.output_filename.clone()
    }

    pub fn generate_output_file(&self, p: &mut CodePrinter, ctx: &'c Context<'_>) -> Result<()> {
        debug!(
            "file: {:?}, package: {:?}, output: {:?}",
            self.file.name(),
            self.file.package(),
            self.output_filename
        );

        // Resolve everything before printing anything.
        let messages = self
            .file
            .messages
            .iter()
            .map(|&index| MessageGenerator::new(ctx.descriptors().message(index), self.file, ctx))
            .collect::<Result<Vec<_>>>()?;
        let enums = self
            .file
            .enums
            .iter()
            .map(|&index| EnumGenerator::new(ctx.descriptors().enum_type(index), self.file, ctx))
            .collect::<Vec<_>>();

        p.print(&format!(
            "// DO NOT EDIT.\n\
             //\n\
             // Generated by the Swift generator plugin for the protocol buffer compiler.\n\
             // Source: {}\n\
             //\n\
             // For information on using the generated types, please see the documentation:\n\
             //   https://github.com/apple/swift-protobuf/\n\
             \n\
             import Foundation\n\
             import SwiftProtobuf\n",
            self.file.name()
        ));

        if !self.file.package().is_empty() {
            p.print(&format!(
                "\nfileprivate let _protobuf_package = \"{}\"\n",
                self.file.package()
            ));
        }

        for message in &messages {
            p.print("\n");
            message.generate_main_struct(p);
        }
        for enum_type in &enums {
            p.print("\n");
            enum_type.generate_main_enum(p);
        }

        Ok(())
    }
}

/// The name a type is declared with inside its parent.
fn local_name(swift_name: &str) -> &str {
    swift_name.rsplit('.').next().unwrap_or(swift_name)
}
