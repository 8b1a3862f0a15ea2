//! pdfscan CLI - PDF text extraction and redaction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use pdfscan::{parse_file_with_options, JsonFormat, ParseOptions, StreamKind};

#[derive(Parser)]
#[command(name = "pdfscan")]
#[command(version)]
#[command(about = "Extract and redact text in legacy PDF files", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Fail on the first object that cannot be decoded
    #[arg(long, global = true)]
    strict: bool,

    /// Code page for hex strings (e.g. windows-1251, koi8-r)
    #[arg(long, global = true, value_name = "LABEL", env = "PDFSCAN_CODE_PAGE")]
    code_page: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract plain text
    Text {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Dump the scanned objects as JSON
    Json {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Write a copy of the file with all text removed
    Redact {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <name>.redacted.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = parse_options(cli.strict, cli.code_page.as_deref()).and_then(|options| {
        match cli.command {
            Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), options),
            Some(Commands::Json {
                input,
                output,
                compact,
            }) => cmd_json(&input, output.as_deref(), compact, options),
            Some(Commands::Info { input }) => cmd_info(&input, options),
            Some(Commands::Redact { input, output }) => cmd_redact(&input, output.as_deref()),
            Some(Commands::Version) => {
                cmd_version();
                Ok(())
            }
            None => {
                // Default behavior: print text if input is provided
                if let Some(input) = cli.input {
                    cmd_text(&input, None, options)
                } else {
                    println!("{}", "Usage: pdfscan <FILE>".yellow());
                    println!("       pdfscan --help for more information");
                    Ok(())
                }
            }
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn parse_options(
    strict: bool,
    code_page: Option<&str>,
) -> Result<ParseOptions, Box<dyn std::error::Error>> {
    let mut options = ParseOptions::new();
    if strict {
        options = options.strict();
    }
    if let Some(label) = code_page {
        options = options
            .with_code_page_label(label)
            .ok_or_else(|| format!("Unknown code page: {}", label))?;
    }

    log::debug!("Parse options: {:?}", options);
    Ok(options)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;
    let text = pdfscan::render::to_text(&doc)?;

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ParseOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = pdfscan::render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, options: ParseOptions) -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_file_with_options(input, options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match doc.version {
        Some(ref version) => println!("{}: PDF {}", "Format".bold(), version),
        None => println!("{}: {}", "Format".bold(), "no header".dimmed()),
    }
    println!("{}: {}", "Declared objects".bold(), doc.declared_size);
    println!("{}: {}", "Pages".bold(), doc.page_count());

    if let Some((width, height)) = doc.pages.first().and_then(|page| page.size()) {
        println!("{}: {} x {}", "Page size".bold(), width, height);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let count = |kind: StreamKind| doc.objects.iter().filter(|o| o.stream == kind).count();
    let text = doc.plain_text();

    println!("{}: {}", "Objects".bold(), doc.objects.len());
    println!("{}: {}", "Compressed".bold(), count(StreamKind::Compressed));
    println!("{}: {}", "Unsupported".bold(), count(StreamKind::Unsupported));
    println!("{}: {}", "Corrupt".bold(), count(StreamKind::Corrupt));
    println!("{}: {}", "Text runs".bold(), doc.run_count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_redact(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_redact_path(input));

    pdfscan::detect::check_extension(input)?;
    let data = fs::read(input)?;
    let (redacted, report) = pdfscan::redact_bytes(&data)?;
    fs::write(&output, redacted)?;

    println!(
        "{} {} operators in {} of {} streams",
        "Erased".green(),
        report.lines_erased,
        report.streams_rewritten,
        report.streams_found
    );
    if report.streams_skipped > 0 {
        println!(
            "{} {} streams could not be decoded",
            "Skipped".yellow(),
            report.streams_skipped
        );
    }
    if report.truncated > 0 {
        println!(
            "{} {} streams were truncated to fit",
            "Warning:".yellow().bold(),
            report.truncated
        );
    }
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn default_redact_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}.redacted.pdf", stem))
}

fn cmd_version() {
    println!("{} {}", "pdfscan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Legacy PDF text extraction and redaction tool");
    println!();
    println!("License: MIT");
}
