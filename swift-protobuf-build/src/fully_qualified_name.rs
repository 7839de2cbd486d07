use itertools::Itertools;

// Invariant: should always begin with a '.' (dot)
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct FullyQualifiedName(String);

impl FullyQualifiedName {
    pub fn new(package_string: &str, type_path: &[impl AsRef<str>], name: &str) -> Self {
        let segments = package_string
            .split('.')
            .chain(
                type_path
                    .iter()
                    .map(AsRef::as_ref)
                    .map(|segment| segment.trim_start_matches('.')),
            )
            .chain(std::iter::once(name))
            .filter(|segment| !segment.is_empty());
        Self(format!(".{}", segments.format(".")))
    }

    pub fn from_type_name(type_name: &str) -> Self {
        Self(format!(".{}", type_name.trim_start_matches('.')))
    }

    pub fn path_iterator(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0[1..].split('.')
    }

    /// Appends `path` as a nested segment. Joining onto the root scope of a
    /// file without a package yields `.path`.
    pub fn join(&self, path: &str) -> Self {
        if self.0 == "." {
            return Self(format!(".{}", path));
        }
        Self(format!("{}.{}", self.0, path))
    }

    /// The final path segment, used for display.
    pub fn bare_name(&self) -> &str {
        self.path_iterator().next_back().unwrap_or_default()
    }
}

impl AsRef<str> for FullyQualifiedName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FullyQualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
