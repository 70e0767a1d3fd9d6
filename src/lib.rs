//! @ai:module:intent Annotation marker scanner library producing positioned diagnostics
//! @ai:module:layer infrastructure
//! @ai:module:public_api category, collection, config, error, output, pattern, position, scanner, workspace, wrapper
//! @ai:module:stateless true
//!
//! # annoscan
//!
//! Scans plain-text documents line by line for annotation markers such as
//! `TODO:`, `FIXME:`, `NEXT:` or `PLAN:`, optionally wrapped in `{>> ... <<}`
//! or `( ... )`, and reports one finding per matching line.
//!
//! ## Example
//!
//! ```rust
//! use annoscan::{scan, Severity};
//!
//! let findings = scan("intro\n{>> NEXT: refactor later <<}\n");
//! assert_eq!(findings.len(), 1);
//! assert_eq!(findings[0].line, 1);
//! assert_eq!(findings[0].message, "NEXT: refactor later");
//! assert_eq!(findings[0].severity, Severity::Error);
//! ```

pub mod category;
pub mod collection;
pub mod config;
pub mod error;
pub mod output;
pub mod pattern;
pub mod position;
pub mod scanner;
pub mod workspace;
pub mod wrapper;

pub use category::{default_categories, MarkerCategory, Severity};
pub use collection::DiagnosticCollection;
pub use config::{CategoryConfig, ScanConfig};
pub use error::{Error, Result};
pub use output::{format_pattern_table, format_scan_report, to_json, OutputFormat};
pub use pattern::{LineMatch, PatternTable};
pub use position::PositionEncoding;
pub use scanner::{scan, Finding, ScanResult, Scanner, SOURCE_TAG};
pub use workspace::{scan_directory, scan_file, FileReport, ScanFailure, ScanReport};
pub use wrapper::Wrapper;
