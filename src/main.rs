//! @ai:module:intent CLI entry point for the annotation scanner
//! @ai:module:layer presentation
//! @ai:module:public_api main
//! @ai:module:depends_on config, workspace, output

use annoscan::{output, workspace, OutputFormat, ScanConfig, ScanReport};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "annoscan")]
#[command(author, version, about = "Scan documents for TODO/FIXME/NEXT/PLAN annotation markers")]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a file or directory for annotation markers
    Scan {
        /// Path to file or directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to an annoscan.toml configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,

        /// Exit with code 1 if error-severity markers are found
        #[arg(long, default_value = "false")]
        fail_on_error: bool,
    },

    /// Show the effective marker categories in priority order
    Categories {
        /// Path to an annoscan.toml configuration file
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn init_tracing(verbose: bool) {
    let directive = if verbose { "annoscan=debug" } else { "annoscan=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// @ai:intent Use the explicit config file, else annoscan.toml next to the scanned path
/// @ai:effects fs:read
fn load_config(explicit: Option<&Path>, scan_root: &Path) -> annoscan::Result<ScanConfig> {
    match explicit {
        Some(path) => ScanConfig::load(path),
        None => {
            let dir = if scan_root.is_dir() {
                scan_root
            } else {
                scan_root.parent().unwrap_or(Path::new("."))
            };
            ScanConfig::discover(dir)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Scan {
            path,
            config,
            format,
            fail_on_error,
        } => {
            let result = load_config(config.as_deref(), &path).and_then(|config| {
                let scanner = config.build_scanner()?;
                if path.is_file() {
                    let mut report = ScanReport::default();
                    report.add_file(workspace::scan_file(&path, &scanner)?);
                    Ok(report)
                } else {
                    workspace::scan_directory(&path, &config, &scanner)
                }
            });

            match result {
                Ok(report) => {
                    println!("{}", output::format_scan_report(&report, format.into()));

                    if fail_on_error && !report.passed() {
                        ExitCode::from(1)
                    } else {
                        ExitCode::SUCCESS
                    }
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }

        Commands::Categories { config, format } => {
            let config = match config {
                Some(path) => ScanConfig::load(&path),
                None => ScanConfig::discover(Path::new(".")),
            };

            match config.and_then(|c| c.build_scanner()) {
                Ok(scanner) => {
                    println!(
                        "{}",
                        output::format_pattern_table(scanner.table(), format.into())
                    );
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(2)
                }
            }
        }
    }
}
