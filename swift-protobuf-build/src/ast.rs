use prost_types::source_code_info::Location;

/// Comments on a Protobuf item.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Comments {
    /// Leading detached blocks of comments.
    pub leading_detached: Vec<String>,

    /// Leading comments.
    pub leading: String,

    /// Trailing comments.
    pub trailing: String,
}

impl Comments {
    pub(crate) fn from_location(location: &Location) -> Comments {
        let leading_detached = location.leading_detached_comments.clone();
        let leading = location
            .leading_comments
            .as_ref()
            .map_or(String::new(), String::clone);
        let trailing = location
            .trailing_comments
            .as_ref()
            .map_or(String::new(), String::clone);
        Comments {
            leading_detached,
            leading,
            trailing,
        }
    }

    /// Renders the comments as Swift comment lines, each terminated by a
    /// newline. Detached blocks become `//` comments followed by a blank
    /// line; leading and trailing comments become `///` documentation.
    pub fn to_swift(&self) -> String {
        let mut buf = String::new();

        for detached_block in &self.leading_detached {
            append_lines(&mut buf, "//", detached_block);
            buf.push('\n');
        }

        append_lines(&mut buf, "///", &self.leading);

        // Append an empty comment line if there are leading and trailing comments.
        if !self.leading.is_empty() && !self.trailing.is_empty() {
            buf.push_str("///\n");
        }

        append_lines(&mut buf, "///", &self.trailing);
        buf
    }
}

fn append_lines(buf: &mut String, marker: &str, text: &str) {
    for line in text.lines() {
        buf.push_str(marker);
        if !line.trim().is_empty() && !line.starts_with(' ') {
            buf.push(' ');
        }
        buf.push_str(line.trim_end());
        buf.push('\n');
    }
}
