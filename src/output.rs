//! @ai:module:intent Format scan reports and pattern tables (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_scan_report, format_pattern_table, to_json
//! @ai:module:depends_on workspace, pattern, category
//! @ai:module:stateless true

use crate::category::{MarkerCategory, Severity};
use crate::pattern::PatternTable;
use crate::workspace::ScanReport;
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a scan report as a string
/// @ai:effects pure
pub fn format_scan_report(report: &ScanReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => format_scan_report_text(report),
    }
}

/// @ai:intent Format a scan report as human-readable text with 1-based positions
/// @ai:effects pure
fn format_scan_report_text(report: &ScanReport) -> String {
    let mut output = String::new();

    for file in &report.files {
        for finding in &file.findings {
            let location = format!(
                "{}:{}:{}",
                file.path.display(),
                finding.line + 1,
                finding.start_column + 1
            );

            output.push_str(&format!(
                "{} {} - {} ({})\n",
                severity_label(finding.severity),
                location.dimmed(),
                finding.message,
                finding.code.dimmed()
            ));
        }
    }

    for failure in &report.failures {
        output.push_str(&format!(
            "{} {} - {}\n",
            "FAIL".red().bold(),
            failure.path.display().to_string().dimmed(),
            failure.message
        ));
    }

    output.push('\n');
    output.push_str(&format!("Checked {} files\n", report.files_checked));

    if report.errors > 0 {
        output.push_str(&format!(
            "{} errors, {} warnings, {} info\n",
            report.errors.to_string().red().bold(),
            report.warnings.to_string().yellow(),
            report.infos
        ));
    } else if report.total_findings() > 0 {
        output.push_str(&format!(
            "{} {} warnings, {} info\n",
            "OK".green().bold(),
            report.warnings.to_string().yellow(),
            report.infos
        ));
    } else {
        output.push_str(&format!("{} No markers found\n", "OK".green().bold()));
    }

    output
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "ERROR".red().bold(),
        Severity::Warning => "WARN".yellow().bold(),
        Severity::Info => "INFO".blue(),
    }
}

#[derive(Serialize)]
struct TableView<'a> {
    categories: Vec<&'a MarkerCategory>,
    wrappers: Vec<WrapperView>,
}

#[derive(Serialize)]
struct WrapperView {
    opener: &'static str,
    closer: &'static str,
}

/// @ai:intent Format the effective pattern table in priority order
/// @ai:effects pure
pub fn format_pattern_table(table: &PatternTable, format: OutputFormat) -> String {
    let view = TableView {
        categories: table.categories().collect(),
        wrappers: table
            .wrappers()
            .iter()
            .map(|w| WrapperView {
                opener: w.opener(),
                closer: w.closer(),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => to_json(&view, false),
        OutputFormat::JsonPretty => to_json(&view, true),
        OutputFormat::Text => {
            let mut output = String::new();

            for (priority, category) in view.categories.iter().enumerate() {
                output.push_str(&format!(
                    "{}. {} {} {}\n",
                    priority + 1,
                    category.code.cyan(),
                    severity_label(category.severity),
                    category.keywords.join(", ")
                ));
            }

            let wrappers: Vec<String> = view
                .wrappers
                .iter()
                .map(|w| format!("{} ... {}", w.opener, w.closer))
                .collect();
            output.push_str(&format!("wrappers: {}\n", wrappers.join("  ")));

            output
        }
    }
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;
    use crate::workspace::FileReport;
    use std::path::PathBuf;

    fn report() -> ScanReport {
        let mut report = ScanReport::default();
        report.add_file(FileReport {
            path: PathBuf::from("notes.md"),
            findings: scan("intro\n  (TODO: fix this) tail"),
        });
        report
    }

    #[test]
    fn test_text_uses_one_based_positions() {
        colored::control::set_override(false);
        let text = format_scan_report(&report(), OutputFormat::Text);
        assert!(text.contains("WARN notes.md:2:4 - TODO: fix this (CM02)"));
        assert!(text.contains("Checked 1 files"));
    }

    #[test]
    fn test_json_keeps_zero_based_model() {
        let json = format_scan_report(&report(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let finding = &value["files"][0]["findings"][0];
        assert_eq!(finding["line"], 1);
        assert_eq!(finding["start_column"], 3);
        assert_eq!(finding["severity"], "warning");
        assert_eq!(finding["source"], "custom-md");
    }

    #[test]
    fn test_pattern_table_json() {
        let json = format_pattern_table(&PatternTable::default(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["categories"][0]["code"], "CM01");
        assert_eq!(value["wrappers"][0]["closer"], "<<}");
        assert_eq!(value["wrappers"].as_array().unwrap().len(), 2);
    }
}
