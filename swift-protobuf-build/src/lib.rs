//! `swift-protobuf-build` generates Swift sources for the SwiftProtobuf
//! runtime from `.proto` descriptors, in the shape of a `protoc` plugin.
//!
//! `protoc` hands the plugin a `CodeGeneratorRequest` holding every file of
//! the compilation unit. All of them are loaded into a [`Context`], which
//! resolves type references across files, and a `.pb.swift` file is then
//! generated for each file named in `file_to_generate`.
//!
//! ## Example
//!
//! Install the `protoc-gen-swift` binary of this workspace on the `PATH` and
//! run:
//!
//! ```bash
//! $ protoc --swift_out=Sources/Generated --swift_opt=Visibility=Public items.proto
//! ```
//!
//! The generator can also be driven directly:
//!
//! ```rust,no_run
//! use prost_types::compiler::CodeGeneratorRequest;
//!
//! let request = CodeGeneratorRequest::default();
//! let response = swift_protobuf_build::generate(&request).unwrap();
//! for file in response.file {
//!     println!("{}", file.name());
//! }
//! ```
//!
//! ## Options
//!
//! The plugin parameter is a comma separated list of `Key=Value` pairs:
//!
//! * `Visibility`: `Internal` (default), `Public` or `Private`.
//! * `FileNaming`: `FullPath` (default), `PathToUnderscores` or `DropPath`.

pub mod ast;
mod code_generator;
pub mod context;
pub mod descriptor_set;
pub mod error;
pub mod field;
pub mod fully_qualified_name;
pub mod ident;
mod locations;
pub mod message_graph;
pub mod options;
pub mod printer;
pub mod syntax;

#[cfg(test)]
mod test_util;

use log::debug;
use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};

pub use context::Context;
pub use error::{Error, Result};
pub use options::{FileNaming, GeneratorOptions, Visibility};

/// Generates one Swift file per file requested in `request`.
///
/// The symbol table is built from every file of the request before the first
/// output is generated. Any error aborts the whole run.
pub fn generate(request: &CodeGeneratorRequest) -> Result<CodeGeneratorResponse> {
    debug!(
        "generating {} of {} files",
        request.file_to_generate.len(),
        request.proto_file.len()
    );
    let ctx = Context::new(request)?;
    ctx.generate_response()
}

/// Decodes a serialized `CodeGeneratorRequest` and runs [`generate`] on it.
pub fn generate_from_bytes(buf: &[u8]) -> Result<CodeGeneratorResponse> {
    let request = CodeGeneratorRequest::decode(buf)?;
    generate(&request)
}
