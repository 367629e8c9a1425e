//! Line buffer for generating properly indented code.

use super::Indent;

/// Extra indent levels applied to the continuation lines of a statement.
const CONTINUATION: usize = 2;

/// Builds indented code line by line.
///
/// The buffer can be drained with [`CodeBuilder::take`] while keeping the
/// current indentation level, which lets a writer stream output as it goes.
///
/// # Example
///
/// ```
/// use keel_codegen::builder::CodeBuilder;
///
/// let mut builder = CodeBuilder::java();
/// builder
///     .push_line("class Foo {")
///     .push_indent()
///     .push_line("int bar;")
///     .push_dedent()
///     .push_line("}");
///
/// assert_eq!(builder.build(), "class Foo {\n  int bar;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn java() -> Self {
        Self::new(Indent::JAVA)
    }

    /// Add a line of code with current indentation.
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent(self.indent_level);
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a possibly multi-line snippet.
    ///
    /// The first line gets the current indentation, every following line is
    /// indented as a continuation.
    pub fn push_wrapped(&mut self, s: &str) -> &mut Self {
        for (i, line) in s.split('\n').enumerate() {
            let level = if i == 0 {
                self.indent_level
            } else {
                self.indent_level + CONTINUATION
            };
            self.write_indent(level);
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }
        self
    }

    /// Add a blank line.
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level.
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level.
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Get the current indentation level.
    pub fn current_indent(&self) -> usize {
        self.indent_level
    }

    /// Drain the buffered code, keeping the indentation level.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Get a reference to the current buffer content.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self, level: usize) {
        for _ in 0..level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::java()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let mut builder = CodeBuilder::java();
        builder.push_line("int x = 1;");
        assert_eq!(builder.build(), "int x = 1;\n");
    }

    #[test]
    fn test_indentation() {
        let mut builder = CodeBuilder::new(Indent::WIDE);
        builder
            .push_line("void main() {")
            .push_indent()
            .push_line("run();")
            .push_dedent()
            .push_line("}");
        assert_eq!(builder.build(), "void main() {\n    run();\n}\n");
    }

    #[test]
    fn test_blank_line_has_no_indent() {
        let mut builder = CodeBuilder::java();
        builder.push_indent().push_line("a;").push_blank().push_line("b;");
        assert_eq!(builder.build(), "  a;\n\n  b;\n");
    }

    #[test]
    fn test_wrapped_continuation() {
        let mut builder = CodeBuilder::java();
        builder.push_indent().push_wrapped("return \"Foo{\" +\n'}';");
        assert_eq!(builder.build(), "  return \"Foo{\" +\n      '}';\n");
    }

    #[test]
    fn test_take_keeps_level() {
        let mut builder = CodeBuilder::java();
        builder.push_line("class Foo {").push_indent();
        assert_eq!(builder.take(), "class Foo {\n");
        assert_eq!(builder.as_str(), "");

        builder.push_line("int bar;");
        assert_eq!(builder.current_indent(), 1);
        assert_eq!(builder.take(), "  int bar;\n");
    }

    #[test]
    fn test_dedent_saturates() {
        let mut builder = CodeBuilder::java();
        builder.push_dedent().push_line("x;");
        assert_eq!(builder.build(), "x;\n");
    }

    #[test]
    fn test_tab_indent() {
        let mut builder = CodeBuilder::new(Indent::Tab);
        builder.push_indent().push_line("x;");
        assert_eq!(builder.build(), "\tx;\n");
    }
}
