use tracing::debug;

use crate::export::{DEFAULT_TEMPLATE, LINENO_PADDING_WIDTH, PLACEHOLDER};
use crate::SingleFileError;

/// One file section recovered from an exported document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportedFile {
    /// Path recorded in the section header.
    pub path: String,
    /// Section contents, line-number prefixes stripped.
    pub content: String,
}

/// Splits a document exported with the default template back into files.
#[must_use]
pub fn parse(text: &str) -> Vec<ExportedFile> {
    // The default template always contains the placeholder.
    parse_with_template(text, DEFAULT_TEMPLATE).unwrap_or_default()
}

/// Splits a document exported with a custom header template back into files.
///
/// The template drives header recognition: a run of document lines matching
/// the template's lines (with the placeholder line matched by its literal
/// prefix and suffix) starts a new section. Content lines carrying a
/// line-number prefix (`N:` followed by column padding) are stripped back to
/// their original text.
pub fn parse_with_template(text: &str, template: &str) -> Result<Vec<ExportedFile>, SingleFileError> {
    let header = HeaderShape::from_template(template)?;

    let lines: Vec<&str> = text.lines().collect();
    let mut files = Vec::new();
    let mut current: Option<(String, Vec<String>)> = None;

    let mut index = 0;
    while index < lines.len() {
        if let Some(path) = header.match_at(&lines, index) {
            if let Some((path, content)) = current.take() {
                files.push(seal(path, content));
            }
            current = Some((path, Vec::new()));
            index += header.line_count;
            continue;
        }
        if let Some((_, content)) = current.as_mut() {
            content.push(strip_lineno(lines[index]));
        }
        index += 1;
    }
    if let Some((path, content)) = current.take() {
        files.push(seal(path, content));
    }

    debug!(files = files.len(), "parsed single file");
    Ok(files)
}

fn seal(path: String, content: Vec<String>) -> ExportedFile {
    ExportedFile {
        path,
        content: content.join("\n"),
    }
}

/// The template's shape: literal lines plus one placeholder-bearing line.
struct HeaderShape {
    before: Vec<String>,
    name_prefix: String,
    name_suffix: String,
    after: Vec<String>,
    line_count: usize,
}

impl HeaderShape {
    fn from_template(template: &str) -> Result<Self, SingleFileError> {
        let lines: Vec<&str> = template.lines().collect();
        let position = lines
            .iter()
            .position(|line| line.contains(PLACEHOLDER))
            .ok_or(SingleFileError::MissingPlaceholder)?;
        let name_line = lines[position];
        let split = name_line.find(PLACEHOLDER).unwrap_or_default();
        Ok(Self {
            before: lines[..position].iter().map(ToString::to_string).collect(),
            name_prefix: name_line[..split].to_owned(),
            name_suffix: name_line[split + PLACEHOLDER.len()..].to_owned(),
            after: lines[position + 1..].iter().map(ToString::to_string).collect(),
            line_count: lines.len(),
        })
    }

    /// Returns the recorded path when `lines[index..]` starts with a header.
    fn match_at(&self, lines: &[&str], index: usize) -> Option<String> {
        if index + self.line_count > lines.len() {
            return None;
        }
        for (offset, expected) in self.before.iter().enumerate() {
            if lines[index + offset] != expected {
                return None;
            }
        }
        let name_line = lines[index + self.before.len()];
        let name = name_line
            .strip_prefix(self.name_prefix.as_str())?
            .strip_suffix(self.name_suffix.as_str())?;
        for (offset, expected) in self.after.iter().enumerate() {
            if lines[index + self.before.len() + 1 + offset] != expected {
                return None;
            }
        }
        Some(name.trim().to_owned())
    }
}

/// Strips a `N:` line-number prefix and its column padding, if present.
fn strip_lineno(line: &str) -> String {
    if let Some((number, rest)) = line.split_once(':') {
        if !number.is_empty() && number.chars().all(|ch| ch.is_ascii_digit()) {
            let padding = LINENO_PADDING_WIDTH.saturating_sub(number.len());
            let spaces = rest.len() - rest.trim_start_matches(' ').len();
            return rest[padding.min(spaces)..].to_owned();
        }
    }
    line.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "\
%%%%%%%%%%
file: ./src/a.py
%%%%%%%%%%
import os
print(os.name)

%%%%%%%%%%
file: ./src/b.py
%%%%%%%%%%
x = 1
";

    #[test]
    fn splits_sections_on_default_headers() {
        let files = parse(DOCUMENT);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "./src/a.py");
        assert_eq!(files[0].content, "import os\nprint(os.name)\n");
        assert_eq!(files[1].path, "./src/b.py");
        assert_eq!(files[1].content, "x = 1");
    }

    #[test]
    fn strips_line_number_prefixes() {
        let document = "\
%%%%%%%%%%
file: ./a.py
%%%%%%%%%%
0:     import os
1:     print(os.name)
";
        let files = parse(document);
        assert_eq!(files[0].content, "import os\nprint(os.name)");
    }

    #[test]
    fn custom_template_headers_are_recognised() {
        let document = "\
>>> ./a.txt <<<
alpha
>>> ./b.txt <<<
beta
";
        let files = parse_with_template(document, ">>> {file_name} <<<\n").expect("template");
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "./a.txt");
        assert_eq!(files[0].content, "alpha");
        assert_eq!(files[1].content, "beta");
    }

    #[test]
    fn content_before_the_first_header_is_dropped() {
        let document = "stray line\n%%%%%%%%%%\nfile: ./a\n%%%%%%%%%%\ndata\n";
        let files = parse(document);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, "data");
    }

    #[test]
    fn template_without_placeholder_fails() {
        let error = parse_with_template("anything", "### header ###\n").unwrap_err();
        assert!(matches!(error, SingleFileError::MissingPlaceholder));
    }

    #[test]
    fn colon_lines_without_digits_are_untouched() {
        let document = "%%%%%%%%%%\nfile: ./a\n%%%%%%%%%%\nkey: value\n";
        let files = parse(document);
        assert_eq!(files[0].content, "key: value");
    }
}
