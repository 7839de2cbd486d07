use thiserror::Error;

/// Errors that can occur while generating Swift sources.
///
/// Schema violations mean `protoc` handed over a descriptor graph that is
/// corrupt or incomplete. Configuration errors come from the plugin
/// parameter string. Both abort the run before any output is produced.
#[derive(Error, Debug)]
pub enum Error {
    /// A type reference does not name any loaded message or enum.
    #[error("unable to resolve {kind} {path}")]
    UnresolvedSymbol { kind: SymbolKind, path: String },

    /// An enum default names a case the enum does not declare.
    #[error("unable to locate enum case {case} in {path}")]
    UnresolvedEnumCase { path: String, case: String },

    /// A `map_entry` message lacks its key or value field.
    #[error("map entry {path} must declare a key (1) and a value (2) field")]
    MalformedMapEntry { path: String },

    /// The file declares a syntax this generator does not understand.
    #[error("unsupported syntax: {0}")]
    UnsupportedSyntax(String),

    /// An explicit default value could not be decoded.
    #[error("invalid default value for field {field}: {reason}")]
    InvalidDefault { field: String, reason: String },

    /// `file_to_generate` names a file that was not part of the request.
    #[error("requested file {0} was not supplied in the request")]
    UnknownFile(String),

    /// The parameter string carries an option key that is not recognized.
    #[error("unknown generator option: {0}")]
    UnknownOption(String),

    /// The parameter string carries an option with a malformed value.
    #[error("invalid value {value:?} for generator option {key}")]
    InvalidOption { key: String, value: String },

    /// The request bytes could not be decoded.
    #[error("invalid CodeGeneratorRequest: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl Error {
    /// Returns `true` if the error signals an invalid descriptor graph rather
    /// than a user-facing configuration problem.
    pub fn is_schema_violation(&self) -> bool {
        matches!(
            self,
            Error::UnresolvedSymbol { .. }
                | Error::UnresolvedEnumCase { .. }
                | Error::MalformedMapEntry { .. }
                | Error::UnsupportedSyntax(_)
                | Error::InvalidDefault { .. }
        )
    }
}

/// The kind of schema symbol a lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Message,
    Enum,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Message => f.write_str("message"),
            SymbolKind::Enum => f.write_str("enum"),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
