//! Line-oriented marker scanner.
//!
//! Strips block markers, inline section markers and the properties block from annotated
//! source, producing the clean text shown to the player together with the initial
//! region model and decoded properties.

use std::collections::BTreeSet;

use serde_json::Value;

use super::error::{MarkupError, MarkupIssue};
use super::symbols::{BlockMarker, BEGIN_CHAR, END_CHAR, INLINE_MARKER_LEN};
use crate::region::{RegionModel, Section, SectionMap};

/// Result of preprocessing annotated source.
#[derive(Debug, Clone, PartialEq)]
pub struct Preprocessed {
    /// Source with every marker removed
    pub text: String,
    /// Initial editable lines, sections and start-level-end index
    pub regions: RegionModel,
    /// Decoded properties block (an empty object when there is none)
    pub properties: Value,
}

/// Raw extraction artifacts, before properties are decoded.
#[derive(Debug, Default)]
struct Scan {
    output: Vec<String>,
    editable_lines: BTreeSet<usize>,
    sections: SectionMap,
    start_level_end: Option<usize>,
    properties: Vec<String>,
    /// 1-based line of the properties block opener
    properties_line: Option<usize>,
    in_line_block: bool,
    in_properties: bool,
}

/// Strip markers from `source` and derive the initial region model.
///
/// Fails without producing anything if inline markers are unbalanced or the properties
/// block does not decode.
pub fn preprocess(source: &str) -> Result<Preprocessed, MarkupError> {
    let mut scan = Scan::default();

    for (index, raw) in source.split('\n').enumerate() {
        scan.line(index + 1, raw)?;
    }

    if scan.in_properties {
        let line = scan.properties_line.unwrap_or(1);
        return Err(MarkupError::markup(
            line,
            0,
            MarkupIssue::UnterminatedProperties,
        ));
    }

    let properties = decode_properties(&scan.properties, scan.properties_line)?;
    let regions = RegionModel::new(scan.editable_lines, scan.sections, scan.start_level_end);

    tracing::debug!(
        lines = scan.output.len(),
        editable = regions.editable_lines().len(),
        sectioned = regions.sections().len(),
        start_level_end = ?regions.start_level_end(),
        "preprocessed annotated source"
    );

    Ok(Preprocessed {
        text: scan.output.join("\n"),
        regions,
        properties,
    })
}

impl Scan {
    fn line(&mut self, source_line: usize, raw: &str) -> Result<(), MarkupError> {
        let marker = BlockMarker::classify(raw);

        match marker {
            Some(BlockMarker::BeginProperties) => {
                self.in_properties = true;
                self.properties_line.get_or_insert(source_line);
                return Ok(());
            }
            Some(BlockMarker::EndProperties) => {
                self.in_properties = false;
                return Ok(());
            }
            _ => {}
        }

        if self.in_properties {
            self.properties.push(raw.to_string());
            return Ok(());
        }

        match marker {
            Some(BlockMarker::BeginLine) => self.in_line_block = true,
            Some(BlockMarker::EndLine) => self.in_line_block = false,
            Some(BlockMarker::EndStartLevel) => self.start_level_end = Some(self.output.len()),
            _ => self.content(source_line, raw)?,
        }
        Ok(())
    }

    fn content(&mut self, source_line: usize, raw: &str) -> Result<(), MarkupError> {
        let index = self.output.len();

        if self.in_line_block {
            self.editable_lines.insert(index);
            self.output.push(raw.to_string());
            return Ok(());
        }

        let (clean, sections) = extract_sections(raw, source_line)?;
        if !sections.is_empty() {
            self.sections.insert(index, sections);
        }
        self.output.push(clean);
        Ok(())
    }
}

/// Splice inline markers out of a line, left to right, recording `[start, end)` columns
/// in the cleaned line.
fn extract_sections(raw: &str, source_line: usize) -> Result<(String, Vec<Section>), MarkupError> {
    let mut text = raw.to_string();
    let mut sections = Vec::new();
    let mut open: Option<usize> = None;
    let mut cursor = 0;

    while let Some((at, is_begin)) = next_marker(&text[cursor..]) {
        let at = cursor + at;
        let column = text[..at].chars().count();
        text.replace_range(at..at + INLINE_MARKER_LEN, "");
        cursor = at;

        if is_begin {
            if open.is_some() {
                return Err(MarkupError::markup(source_line, column, MarkupIssue::NestedSection));
            }
            open = Some(column);
        } else {
            let start = open.take().ok_or_else(|| {
                MarkupError::markup(source_line, column, MarkupIssue::UnmatchedSectionEnd)
            })?;
            sections.push(Section::new(start, column));
        }
    }

    if let Some(start) = open {
        return Err(MarkupError::markup(source_line, start, MarkupIssue::UnclosedSection));
    }

    Ok((text, sections))
}

/// Byte offset of the next inline marker and whether it is a begin marker.
fn next_marker(text: &str) -> Option<(usize, bool)> {
    match (text.find(BEGIN_CHAR), text.find(END_CHAR)) {
        (Some(begin), Some(end)) if begin < end => Some((begin, true)),
        (_, Some(end)) => Some((end, false)),
        (Some(begin), None) => Some((begin, true)),
        (None, None) => None,
    }
}

fn decode_properties(lines: &[String], line: Option<usize>) -> Result<Value, MarkupError> {
    let Some(line) = line else {
        return Ok(Value::Object(Default::default()));
    };
    serde_json::from_str(&lines.join("\n"))
        .map_err(|source| MarkupError::MalformedProperties { line, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_round_trips() {
        let source = "var a = 1;\n\nvar b = 2;\n";
        let pre = preprocess(source).unwrap();
        assert_eq!(pre.text, source);
        assert!(pre.regions.is_empty());
        assert_eq!(pre.regions.start_level_end(), None);
        assert_eq!(pre.properties, serde_json::json!({}));
    }

    #[test]
    fn test_line_block() {
        let pre = preprocess("#BEGIN_EDITABLE#\nfoo\nbar\n#END_EDITABLE#\nbaz").unwrap();
        assert_eq!(pre.text, "foo\nbar\nbaz");
        assert_eq!(
            pre.regions.editable_lines(),
            &[0, 1].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn test_inline_section() {
        let pre = preprocess("x = #{#5#}#;").unwrap();
        assert_eq!(pre.text, "x = 5;");
        assert_eq!(pre.regions.sections_on(0).unwrap(), &[Section::new(4, 5)]);
    }

    #[test]
    fn test_multiple_sections_in_order() {
        let pre = preprocess("f(#{#a#}#, #{#bb#}#)").unwrap();
        assert_eq!(pre.text, "f(a, bb)");
        assert_eq!(
            pre.regions.sections_on(0).unwrap(),
            &[Section::new(2, 3), Section::new(5, 7)]
        );
    }

    #[test]
    fn test_empty_section() {
        let pre = preprocess("call(#{##}#);").unwrap();
        assert_eq!(pre.text, "call();");
        assert_eq!(pre.regions.sections_on(0).unwrap(), &[Section::new(5, 5)]);
    }

    #[test]
    fn test_sections_use_char_columns() {
        let pre = preprocess("é = #{#1#}#").unwrap();
        assert_eq!(pre.regions.sections_on(0).unwrap(), &[Section::new(4, 5)]);
    }

    #[test]
    fn test_markers_inside_line_block_are_kept() {
        let pre = preprocess("#BEGIN_EDITABLE#\nx = #{#5#}#;\n#END_EDITABLE#").unwrap();
        assert_eq!(pre.text, "x = #{#5#}#;");
        assert!(pre.regions.sections().is_empty());
    }

    #[test]
    fn test_properties_block() {
        let source = "#BEGIN_PROPERTIES#\n{\n  \"version\": 2,\n  \"commandsIntroduced\": [\"map.placeObject\"]\n}\n#END_PROPERTIES#\ncode();";
        let pre = preprocess(source).unwrap();
        assert_eq!(pre.text, "code();");
        assert_eq!(pre.properties["version"], 2);
        assert_eq!(pre.properties["commandsIntroduced"][0], "map.placeObject");
    }

    #[test]
    fn test_malformed_properties() {
        let err = preprocess("a\n#BEGIN_PROPERTIES#\n{ nope\n#END_PROPERTIES#").unwrap_err();
        assert!(matches!(err, MarkupError::MalformedProperties { line: 2, .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_unterminated_properties() {
        let err = preprocess("#BEGIN_PROPERTIES#\n{}").unwrap_err();
        assert!(matches!(
            err,
            MarkupError::MalformedMarkup {
                issue: MarkupIssue::UnterminatedProperties,
                ..
            }
        ));
    }

    #[test]
    fn test_start_level_end_records_output_index() {
        let pre = preprocess("a\n#BEGIN_EDITABLE#\nb\n#END_EDITABLE#\n#END_OF_START_LEVEL#\nc").unwrap();
        assert_eq!(pre.text, "a\nb\nc");
        assert_eq!(pre.regions.start_level_end(), Some(2));
    }

    #[test]
    fn test_unmatched_end_marker() {
        let err = preprocess("ok\nx = 5#}#;").unwrap_err();
        match err {
            MarkupError::MalformedMarkup {
                line,
                column,
                issue,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, 5);
                assert_eq!(issue, MarkupIssue::UnmatchedSectionEnd);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unclosed_and_nested_sections() {
        assert!(matches!(
            preprocess("x = #{#5;").unwrap_err(),
            MarkupError::MalformedMarkup {
                issue: MarkupIssue::UnclosedSection,
                ..
            }
        ));
        assert!(matches!(
            preprocess("#{#a#{#b#}#").unwrap_err(),
            MarkupError::MalformedMarkup {
                issue: MarkupIssue::NestedSection,
                ..
            }
        ));
    }

    #[test]
    fn test_unterminated_line_block_runs_to_end() {
        let pre = preprocess("a\n#BEGIN_EDITABLE#\nb\nc").unwrap();
        assert_eq!(
            pre.regions.editable_lines(),
            &[1, 2].into_iter().collect::<BTreeSet<_>>()
        );
    }
}
