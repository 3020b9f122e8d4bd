/// Builds emitted text line by line: indentation, include directives, and
/// blank-line separated groups. Owns the buffer until [`EmitContext::finish`].
#[derive(Debug, Clone)]
pub struct EmitContext {
    /// Current indentation level
    indent_level: usize,
    /// Spaces per indent level
    indent_width: usize,
    /// Finished lines, grouped; groups are separated by one blank line
    groups: Vec<Vec<String>>,
}

impl EmitContext {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent_level: 0,
            indent_width,
            groups: vec![Vec::new()],
        }
    }

    /// Get the current indentation string.
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_level * self.indent_width)
    }

    /// Increase indentation by one level.
    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation by one level.
    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Current indent level.
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Append one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let line = format!("{}{}", self.indent(), text.as_ref());
        self.current_group().push(line);
    }

    /// `# include <path>`
    pub fn include_system(&mut self, path: &str) {
        self.line(format!("# include <{}>", path));
    }

    /// `# include "path"`
    pub fn include_local(&mut self, path: &str) {
        self.line(format!("# include \"{}\"", path));
    }

    /// Start a new group. No-op while the current group is still empty, so
    /// empty sections never produce stray blank lines.
    pub fn begin_group(&mut self) {
        if self.groups.last().is_some_and(|g| !g.is_empty()) {
            self.groups.push(Vec::new());
        }
    }

    /// Number of lines emitted so far.
    pub fn line_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum()
    }

    /// Join all groups into the final text, ending in a single newline.
    pub fn finish(self) -> String {
        let blocks: Vec<String> = self
            .groups
            .into_iter()
            .filter(|g| !g.is_empty())
            .map(|g| g.join("\n"))
            .collect();
        if blocks.is_empty() {
            return String::new();
        }
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }

    fn current_group(&mut self) -> &mut Vec<String> {
        if self.groups.is_empty() {
            self.groups.push(Vec::new());
        }
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }
}
