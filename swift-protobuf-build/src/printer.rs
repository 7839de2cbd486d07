/// Accumulates generated Swift source, indenting each line to the current
/// nesting depth.
///
/// Text is passed in fragments which may contain any number of newlines;
/// indentation is inserted lazily at the start of every non-empty line.
#[derive(Debug)]
pub struct CodePrinter {
    content: String,
    indent: String,
    at_line_start: bool,
}

const INDENT: &str = "  ";

impl Default for CodePrinter {
    fn default() -> Self {
        CodePrinter::new()
    }
}

impl CodePrinter {
    pub fn new() -> CodePrinter {
        CodePrinter {
            content: String::new(),
            indent: String::new(),
            at_line_start: true,
        }
    }

    pub fn print(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            if self.at_line_start && line != "\n" {
                self.content.push_str(&self.indent);
            }
            self.content.push_str(line);
            self.at_line_start = line.ends_with('\n');
        }
    }

    pub fn indent(&mut self) {
        self.indent.push_str(INDENT);
    }

    pub fn outdent(&mut self) {
        let len = self.indent.len().saturating_sub(INDENT.len());
        self.indent.truncate(len);
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_content(self) -> String {
        self.content
    }
}
