use crate::error::{Error, Result};

/// Access level of the generated field accessors.
///
/// Types and the members implementing the runtime protocols follow the same
/// level, except under `Private`, where they stay internal. Protocol
/// witnesses cannot be private.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Internal,
    Public,
    Private,
}

impl Visibility {
    /// The Swift modifier to place in front of a declaration, including the
    /// trailing space. `internal` is Swift's default and is left implicit.
    pub fn source_snippet(&self) -> &'static str {
        match self {
            Visibility::Internal => "",
            Visibility::Public => "public ",
            Visibility::Private => "private ",
        }
    }

    /// The modifier for generated types and their protocol conformance
    /// members.
    pub fn type_snippet(&self) -> &'static str {
        match self {
            Visibility::Public => "public ",
            Visibility::Internal | Visibility::Private => "",
        }
    }
}

/// How output file names are derived from `.proto` file names.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileNaming {
    /// `foo/bar/baz.proto` becomes `foo/bar/baz.pb.swift`.
    #[default]
    FullPath,
    /// `foo/bar/baz.proto` becomes `foo_bar_baz.pb.swift`.
    PathToUnderscores,
    /// `foo/bar/baz.proto` becomes `baz.pb.swift`.
    DropPath,
}

impl FileNaming {
    pub fn output_filename(&self, proto_name: &str) -> String {
        let stem = proto_name.strip_suffix(".proto").unwrap_or(proto_name);
        let stem = match self {
            FileNaming::FullPath => stem.to_string(),
            FileNaming::PathToUnderscores => stem.replace('/', "_"),
            FileNaming::DropPath => stem.rsplit('/').next().unwrap_or(stem).to_string(),
        };
        format!("{stem}.pb.swift")
    }
}

/// Options controlling code generation, parsed from the plugin parameter.
///
/// The parameter is a comma separated list of `Key=Value` pairs, for example
/// `--swift_opt=Visibility=Public,FileNaming=DropPath`.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub visibility: Visibility,
    pub file_naming: FileNaming,
}

impl GeneratorOptions {
    pub fn parse(parameter: &str) -> Result<GeneratorOptions> {
        let mut options = GeneratorOptions::default();

        for pair in parameter.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => {
                    return Err(Error::InvalidOption {
                        key: pair.to_string(),
                        value: String::new(),
                    })
                }
            };

            let invalid = || Error::InvalidOption {
                key: key.to_string(),
                value: value.to_string(),
            };

            match key {
                "Visibility" => {
                    options.visibility = match value.to_ascii_lowercase().as_str() {
                        "internal" => Visibility::Internal,
                        "public" => Visibility::Public,
                        "private" => Visibility::Private,
                        _ => return Err(invalid()),
                    }
                }
                "FileNaming" => {
                    options.file_naming = match value.to_ascii_lowercase().as_str() {
                        "fullpath" => FileNaming::FullPath,
                        "pathtounderscores" => FileNaming::PathToUnderscores,
                        "droppath" => FileNaming::DropPath,
                        _ => return Err(invalid()),
                    }
                }
                _ => return Err(Error::UnknownOption(key.to_string())),
            }
        }

        Ok(options)
    }

    pub fn visibility_snippet(&self) -> &'static str {
        self.visibility.source_snippet()
    }

    pub fn type_visibility_snippet(&self) -> &'static str {
        self.visibility.type_snippet()
    }
}
