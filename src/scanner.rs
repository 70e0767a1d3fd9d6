//! @ai:module:intent Scan document text line by line and produce positioned findings
//! @ai:module:layer application
//! @ai:module:public_api scan, Scanner, Finding, ScanResult, SOURCE_TAG
//! @ai:module:depends_on pattern, position, category, error
//! @ai:module:stateless true
//! @ai:module:thread_safe true

use crate::category::Severity;
use crate::error::{Error, Result};
use crate::pattern::{LineMatch, PatternTable};
use crate::position::PositionEncoding;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Source tag stamped on every finding.
pub const SOURCE_TAG: &str = "custom-md";

static DEFAULT_SCANNER: LazyLock<Scanner> = LazyLock::new(Scanner::default);

/// @ai:intent One positioned diagnostic produced by a scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    /// 0-based line index
    pub line: usize,
    pub start_column: usize,
    pub end_column: usize,
    pub message: String,
    pub severity: Severity,
    pub code: String,
    pub source: String,
}

/// Findings of one scan, in line order.
pub type ScanResult = Vec<Finding>;

/// @ai:intent Compiled pattern table plus the policy used to position findings
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    table: PatternTable,
    encoding: PositionEncoding,
    max_lines: Option<usize>,
}

/// @ai:intent Scan text with the built-in pattern table
/// @ai:post one finding at most per line, ordered by line
/// @ai:example ("TODO: write docs") -> [Finding { line: 0, start_column: 0, code: "CM02", .. }]
/// @ai:idempotent true
/// @ai:effects pure
pub fn scan(text: &str) -> ScanResult {
    DEFAULT_SCANNER.scan(text)
}

impl Scanner {
    pub fn new(table: PatternTable) -> Self {
        Self {
            table,
            ..Default::default()
        }
    }

    /// @ai:intent Set the unit used for columns
    pub fn with_encoding(mut self, encoding: PositionEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// @ai:intent Stop scanning after this many lines
    pub fn with_max_lines(mut self, max_lines: Option<usize>) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    pub fn encoding(&self) -> PositionEncoding {
        self.encoding
    }

    /// @ai:intent Scan a whole document
    /// @ai:post line indices follow the \n-split sequence regardless of \r\n endings
    /// @ai:idempotent true
    /// @ai:effects pure
    pub fn scan(&self, text: &str) -> ScanResult {
        let limit = self.max_lines.unwrap_or(usize::MAX);

        split_lines(text)
            .take(limit)
            .enumerate()
            .filter_map(|(index, line)| self.scan_line(index, line))
            .collect()
    }

    /// @ai:intent Scan raw bytes, rejecting anything that is not UTF-8 text
    /// @ai:effects pure
    pub fn scan_bytes(&self, bytes: &[u8]) -> Result<ScanResult> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidInput(format!("document is not valid UTF-8: {}", e)))?;
        Ok(self.scan(text))
    }

    /// @ai:intent Produce the finding for a single line, if any category matches
    /// @ai:pre line has no line terminator
    /// @ai:effects pure
    pub fn scan_line(&self, index: usize, line: &str) -> Option<Finding> {
        let matched = self.table.match_line(line)?;
        let message = build_message(&matched);
        let start_column = self.encoding.column(line, matched.keyword_start);
        let end_column = start_column + self.encoding.len(&message);

        Some(Finding {
            line: index,
            start_column,
            end_column,
            message,
            severity: matched.category.severity,
            code: matched.category.code.clone(),
            source: SOURCE_TAG.to_string(),
        })
    }
}

/// @ai:intent Split text on \n, dropping one \r before each break
/// @ai:example ("a\r\nb\n") -> ["a", "b", ""]
/// @ai:effects pure
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// @ai:intent Render "<KEYWORD>: <remainder>" and cut it at the wrapper's closer
/// @ai:edge_cases unterminated wrapper keeps the message untrimmed to end of line
/// @ai:effects pure
fn build_message(matched: &LineMatch<'_, '_>) -> String {
    let message = format!("{}: {}", matched.keyword, matched.remainder);

    let Some(wrapper) = matched.wrapper() else {
        return message;
    };

    match message.find(wrapper.closer()) {
        Some(end) => message[..end].trim().to_string(),
        None => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{default_categories, MarkerCategory};
    use crate::pattern::default_wrappers;
    use crate::wrapper::Wrapper;
    use pretty_assertions::assert_eq;

    fn finding(line: usize, start: usize, message: &str, severity: Severity, code: &str) -> Finding {
        Finding {
            line,
            start_column: start,
            end_column: start + message.encode_utf16().count(),
            message: message.to_string(),
            severity,
            code: code.to_string(),
            source: SOURCE_TAG.to_string(),
        }
    }

    #[test]
    fn test_plain_todo() {
        assert_eq!(
            scan("TODO: write docs"),
            vec![finding(0, 0, "TODO: write docs", Severity::Warning, "CM02")]
        );
    }

    #[test]
    fn test_lines_without_markers() {
        assert!(scan("just prose\n\nnothing: here\nTODO without colon").is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_paren_wrapper_is_trimmed() {
        let result = scan("(TODO: fix this) and more text");
        assert_eq!(
            result,
            vec![finding(0, 1, "TODO: fix this", Severity::Warning, "CM02")]
        );
    }

    #[test]
    fn test_critic_wrapper_is_trimmed() {
        let result = scan("{>> NEXT: refactor later <<}");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "NEXT: refactor later");
        assert_eq!(result[0].code, "CM01");
        assert_eq!(result[0].severity, Severity::Error);
        assert_eq!(result[0].start_column, 4);
        assert_eq!(result[0].end_column, 4 + "NEXT: refactor later".len());
    }

    #[test]
    fn test_unterminated_wrapper_runs_to_end_of_line() {
        let result = scan("(TODO: never closed  ");
        assert_eq!(result[0].message, "TODO: never closed  ");
    }

    #[test]
    fn test_unwrapped_message_keeps_closer_text() {
        let result = scan("TODO: call f(x) later");
        assert_eq!(result[0].message, "TODO: call f(x) later");
    }

    #[test]
    fn test_empty_remainder() {
        let result = scan("FIXME:");
        assert_eq!(result, vec![finding(0, 0, "FIXME: ", Severity::Warning, "CM02")]);
    }

    #[test]
    fn test_whitespace_after_colon_is_normalized() {
        let result = scan("  PLAN:\t\tship it");
        assert_eq!(result, vec![finding(0, 2, "PLAN: ship it", Severity::Info, "CM03")]);
    }

    #[test]
    fn test_case_insensitive_keywords() {
        let lower = scan("todo: lowercase works");
        let upper = scan("TODO: uppercase works");
        assert_eq!(lower[0].code, upper[0].code);
        assert_eq!(lower[0].severity, upper[0].severity);
        assert_eq!(lower[0].message, "todo: lowercase works");
    }

    #[test]
    fn test_next_takes_priority() {
        for line in ["TODO: then NEXT: now", "INFO: NEXT: x", "(FIXME: a) {>> WORK: b <<}"] {
            let result = scan(line);
            assert_eq!(result.len(), 1, "{}", line);
            assert_eq!(result[0].code, "CM01", "{}", line);
        }
    }

    #[test]
    fn test_one_finding_per_line() {
        let result = scan("TODO: a FIXME: b XXX: c");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "TODO: a FIXME: b XXX: c");
    }

    #[test]
    fn test_line_indices_ignore_crlf() {
        let unix = scan("intro\nTODO: a\n\nNEXT: b\n");
        let windows = scan("intro\r\nTODO: a\r\n\r\nNEXT: b\r\n");
        assert_eq!(unix, windows);
        let lines: Vec<_> = unix.iter().map(|f| f.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn test_carriage_return_not_in_message() {
        let result = scan("TODO: trailing\r\n");
        assert_eq!(result[0].message, "TODO: trailing");
    }

    #[test]
    fn test_idempotent() {
        let text = "# Notes\n(TODO: one)\n{>> PLAN: two <<}\nDEV: three\n";
        assert_eq!(scan(text), scan(text));
    }

    #[test]
    fn test_split_lines() {
        let lines: Vec<_> = split_lines("a\r\nb\n").collect();
        assert_eq!(lines, vec!["a", "b", ""]);
    }

    #[test]
    fn test_bracket_wrapper_when_enabled() {
        let table = PatternTable::new(
            default_categories(),
            vec![Wrapper::Critic, Wrapper::Paren, Wrapper::Bracket],
        )
        .unwrap();
        let scanner = Scanner::new(table);
        let result = scanner.scan("see [IMPROVE: naming] below");
        assert_eq!(result, vec![finding(0, 5, "IMPROVE: naming", Severity::Info, "CM03")]);
    }

    #[test]
    fn test_custom_categories() {
        let table = PatternTable::new(
            vec![MarkerCategory::new("Q1", ["QUESTION"], Severity::Error)],
            default_wrappers(),
        )
        .unwrap();
        let result = Scanner::new(table).scan("TODO: ignored\nquestion: why?");
        assert_eq!(result, vec![finding(1, 0, "question: why?", Severity::Error, "Q1")]);
    }

    #[test]
    fn test_utf16_columns() {
        let result = scan("😀 TODO: é");
        assert_eq!(result[0].start_column, 3);
        assert_eq!(result[0].end_column, 3 + "TODO: é".encode_utf16().count());

        let bytes = Scanner::default()
            .with_encoding(PositionEncoding::Utf8)
            .scan("😀 TODO: é");
        assert_eq!(bytes[0].start_column, 5);
        assert_eq!(bytes[0].end_column, 5 + "TODO: é".len());
    }

    #[test]
    fn test_max_lines_caps_work() {
        let scanner = Scanner::default().with_max_lines(Some(2));
        let result = scanner.scan("TODO: a\nTODO: b\nTODO: c");
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_scan_bytes_rejects_invalid_utf8() {
        let scanner = Scanner::default();
        assert!(matches!(
            scanner.scan_bytes(&[0xff, 0xfe, b'T']),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(scanner.scan_bytes(b"XXX: bytes").unwrap().len(), 1);
    }

    #[test]
    fn test_marker_after_non_ascii_text() {
        assert_eq!(
            scan("这里TODO: 修复"),
            vec![finding(0, 2, "TODO: 修复", Severity::Warning, "CM02")]
        );
        assert_eq!(
            scan("éTODO: x"),
            vec![finding(0, 1, "TODO: x", Severity::Warning, "CM02")]
        );
    }

    #[test]
    fn test_non_ascii_case_folding_does_not_match() {
        assert!(scan("WOR\u{212A}: kelvin").is_empty());
        assert_eq!(scan("work: ascii")[0].code, "CM01");
    }

    #[test]
    fn test_lone_carriage_return_ends_remainder() {
        assert!(scan("TODO: a\rb").is_empty());
        assert_eq!(
            scan("x\rTODO: b"),
            vec![finding(0, 2, "TODO: b", Severity::Warning, "CM02")]
        );
    }
}
