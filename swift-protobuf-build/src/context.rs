use log::{debug, warn};
use prost_types::compiler::code_generator_response::File;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse, Version};

use crate::code_generator::FileGenerator;
use crate::descriptor_set::{DescriptorSet, EnumDescriptor, MessageDescriptor};
use crate::error::{Error, Result, SymbolKind};
use crate::message_graph::MessageGraph;
use crate::options::GeneratorOptions;
use crate::printer::CodePrinter;

/// The context providing all the global information needed to generate code.
///
/// A `Context` is built once per `protoc` invocation from the complete
/// request, and is only ever borrowed immutably afterwards: the generators
/// created for each file, message and field receive `&Context` and look up
/// remote types through it, but never keep it.
pub struct Context<'a> {
    request: &'a CodeGeneratorRequest,
    options: GeneratorOptions,
    descriptors: DescriptorSet<'a>,
    message_graph: MessageGraph,
}

impl<'a> Context<'a> {
    pub fn new(request: &'a CodeGeneratorRequest) -> Result<Self> {
        match request.compiler_version.as_ref() {
            Some(version) if is_tested_compiler(version) => {
                debug!("protoc version {}", version_string(version))
            }
            Some(version) => warn!("untested version of protoc ({})", version_string(version)),
            None => warn!("unknown version of protoc, use 3.1 or later"),
        }

        let options = GeneratorOptions::parse(request.parameter())?;
        let descriptors = DescriptorSet::new(&request.proto_file)?;
        let message_graph = MessageGraph::new(&descriptors);

        Ok(Context {
            request,
            options,
            descriptors,
            message_graph,
        })
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn descriptors(&self) -> &DescriptorSet<'a> {
        &self.descriptors
    }

    /// Resolves a fully-qualified message name, searching the files in the
    /// order they were supplied.
    pub fn resolve_message(&self, path: &str) -> Result<&MessageDescriptor<'a>> {
        self.descriptors
            .lookup_message(path)
            .ok_or_else(|| Error::UnresolvedSymbol {
                kind: SymbolKind::Message,
                path: path.to_string(),
            })
    }

    /// Resolves a fully-qualified enum name, searching the files in the
    /// order they were supplied.
    pub fn resolve_enum(&self, path: &str) -> Result<&EnumDescriptor<'a>> {
        self.descriptors
            .lookup_enum(path)
            .ok_or_else(|| Error::UnresolvedSymbol {
                kind: SymbolKind::Enum,
                path: path.to_string(),
            })
    }

    /// Returns the Swift reference (`.caseName`) of the value `case` of the
    /// enum at `path`.
    pub fn enum_case_name(&self, path: &str, case: &str) -> Result<String> {
        self.descriptors
            .lookup_enums(path)
            .find_map(|enum_type| enum_type.case_name(case))
            .map(|name| format!(".{name}"))
            .ok_or_else(|| Error::UnresolvedEnumCase {
                path: path.to_string(),
                case: case.to_string(),
            })
    }

    /// Returns `true` if the message transitively declares required fields.
    pub fn has_required_fields(&self, message: &MessageDescriptor<'_>) -> bool {
        self.message_graph.has_required_fields(message.index)
    }

    /// Generates one output file per requested input file, in request order.
    ///
    /// Fails on the first error without producing a partial response.
    pub fn generate_response(&self) -> Result<CodeGeneratorResponse> {
        let mut response = CodeGeneratorResponse::default();

        for name in &self.request.file_to_generate {
            let file = self
                .descriptors
                .lookup_file(name)
                .ok_or_else(|| Error::UnknownFile(name.clone()))?;
            let generator = FileGenerator::new(file, self);

            let mut printer = CodePrinter::new();
            generator.generate_output_file(&mut printer, self)?;

            response.file.push(File {
                name: Some(generator.output_filename()),
                content: Some(printer.into_content()),
                ..Default::default()
            });
        }

        Ok(response)
    }
}

fn is_tested_compiler(version: &Version) -> bool {
    match version.major() {
        3 => version.minor() >= 1,
        4 => true,
        _ => false,
    }
}

fn version_string(version: &Version) -> String {
    if version.suffix().is_empty() {
        format!("{}.{}.{}", version.major(), version.minor(), version.patch())
    } else {
        format!(
            "{}.{}.{}.{}",
            version.major(),
            version.minor(),
            version.patch(),
            version.suffix()
        )
    }
}
