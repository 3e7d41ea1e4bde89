use clap::{Parser, Subcommand};
use mixcss_eval::{builtins, Processed, Processor, Theme, Units, Warning};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mixcss")]
#[command(about = "mixcss: CSS with mixin calls")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Unit appended to bare numbers
    #[arg(long, global = true, default_value = "rem")]
    unit: String,

    /// Unit appended to bare line-height numbers
    #[arg(long, global = true, default_value = "em")]
    line_height_unit: String,

    /// Log every mixin expansion
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Expand a stylesheet and write the resulting CSS
    Build {
        /// Input stylesheet
        path: String,

        /// Output file (`-` for stdout); defaults to `<stem>.css` next to the input
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Parse and expand a stylesheet without writing output
    Check {
        /// Input stylesheet
        path: String,

        /// Treat warnings such as unknown mixins as errors
        #[arg(long)]
        deny_warnings: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let units = Units::new(cli.unit, cli.line_height_unit);

    match cli.command {
        Command::Build { path, output } => cmd_build(&path, output.as_deref(), units),
        Command::Check {
            path,
            deny_warnings,
        } => cmd_check(&path, deny_warnings, units),
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_source(path: &str) -> String {
    let p = Path::new(path);
    if !p.exists() {
        eprintln!("Error: file not found: {path}");
        std::process::exit(1);
    }
    match std::fs::read_to_string(p) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error reading {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn process(path: &str, units: Units) -> Processed {
    let source = read_source(path);
    debug!(path, unit = %units.default, line_height = %units.line_height, "Processing stylesheet");
    let processor = Processor::new(builtins::registry(Theme::default())).with_units(units);

    match processor.process(&source) {
        Ok(processed) => processed,
        Err(e) => {
            eprintln!("Error in {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn report_warnings(path: &str, warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("Warning: {path}:{warning}");
    }
}

/// `<stem>.css` next to the input.
fn default_output(path: &str) -> Option<PathBuf> {
    let input = Path::new(path);
    let output = input.with_extension("css");
    (output != input).then_some(output)
}

fn cmd_build(path: &str, output: Option<&str>, units: Units) {
    let processed = process(path, units);
    report_warnings(path, &processed.warnings);

    let css = mixcss_codegen::stringify(&processed.stylesheet);

    let out_path = match output {
        Some("-") => {
            print!("{css}");
            return;
        }
        Some(out) => PathBuf::from(out),
        None => match default_output(path) {
            Some(out) => out,
            None => {
                eprintln!("Error: output would overwrite {path}; pass --output");
                std::process::exit(1);
            }
        },
    };

    if let Err(e) = std::fs::write(&out_path, &css) {
        eprintln!("Error writing {}: {e}", out_path.display());
        std::process::exit(1);
    }

    eprintln!("Built: {}", out_path.display());
}

fn cmd_check(path: &str, deny_warnings: bool, units: Units) {
    let processed = process(path, units);
    report_warnings(path, &processed.warnings);

    if deny_warnings && !processed.warnings.is_empty() {
        eprintln!("Failed: {path} ({} warnings)", processed.warnings.len());
        std::process::exit(1);
    }

    eprintln!("OK: {path}");
}
