//! CLI for gbt-refs - Format bibliographic exports as numbered reference lists.

use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gbt_refs::{
    format_references, load_records, output::SAMPLE_FILE_NAME, write_outputs, write_sample,
    ConvertError, Field, InputFormat, Options, RecordTable,
};

/// Rows copied into the diagnostic sample when columns are not recognized.
const SAMPLE_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Format bibliographic database exports as numbered GB/T 7714 reference lists
#[derive(Parser)]
#[command(name = "gbt-refs")]
#[command(version)]
#[command(after_help = "\
Examples:
  gbt-refs convert savedrecs.csv
  gbt-refs convert savedrecs.txt -o out/ --truncate 6
  gbt-refs convert export.json --stdout
  gbt-refs fields")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an export file into a formatted reference list
    #[command(after_help = "\
Writes 参考文献输出.csv and 参考文献输出.md next to the input unless
--out-dir or --stdout is given.

Input formats: .csv, .tsv/.txt (tab-delimited), .json/.jsonl.
Spreadsheets (.xlsx, .xls) must be saved as CSV first.")]
    Convert {
        /// Exported records file
        input: PathBuf,

        /// Directory for the output files (default: the input's directory)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Number of authors kept before "et al." / "等"
        #[arg(short = 'n', long, default_value_t = Options::default().truncate)]
        truncate: usize,

        /// Print the citations instead of writing files
        #[arg(long)]
        stdout: bool,

        /// Input format (default: detected from the file extension)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// List the column names accepted for each field
    Fields,
}

/// Values accepted by `--format`.
#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Comma-separated values with a header row
    Csv,
    /// Tab-separated values with a header row
    Tsv,
    /// JSON array of objects, or JSONL
    Json,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => InputFormat::Csv,
            FormatArg::Tsv => InputFormat::Tsv,
            FormatArg::Json => InputFormat::Json,
        }
    }
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable / undecodable
    InputFile(String),
    /// Exit 11 — input has none of the expected columns
    MissingColumns(String),
    /// Exit 12 — cannot write output
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::MissingColumns(_) => 11,
            AppError::OutputFile(_) => 12,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: use a UTF-8 .csv, tab-delimited .txt, or .json export; save .xlsx/.xls files as CSV first",
                    msg
                )
            }
            AppError::MissingColumns(msg) => {
                write!(
                    f,
                    "{}\n  hint: run 'gbt-refs fields' to see the accepted column names",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gbt_refs=info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            out_dir,
            truncate,
            stdout,
            format,
        } => {
            let options = Options { truncate };
            convert_command(&input, out_dir.as_deref(), &options, stdout, format.map(Into::into))?;
        }
        Commands::Fields => {
            fields_command();
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Convert an export file into formatted reference outputs.
fn convert_command(
    input: &Path,
    out_dir: Option<&Path>,
    options: &Options,
    stdout: bool,
    format: Option<InputFormat>,
) -> Result<(), AppError> {
    // 1. Load records
    let table = load_records(input, format)
        .map_err(|e| AppError::InputFile(format!("'{}': {}", input.display(), e)))?;
    info!(
        rows = table.len(),
        columns = table.columns.len(),
        "loaded {}",
        input.display()
    );

    // 2. Format citations (fails on unrecognized columns before any record)
    let citations = match format_references(&table, options) {
        Ok(citations) => citations,
        Err(e @ ConvertError::MissingExpectedColumns { .. }) => {
            let sample = save_sample(input, &table);
            let msg = match sample {
                Some(path) => format!("{}\n  sample of the input saved to: {}", e, path.display()),
                None => e.to_string(),
            };
            return Err(AppError::MissingColumns(msg));
        }
    };

    // 3. Print or write
    if stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        for line in &citations {
            writeln!(handle, "{}", line)
                .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
        }
        return Ok(());
    }

    let out_dir = out_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| parent_dir(input));
    let paths = write_outputs(&out_dir, &citations)
        .map_err(|e| AppError::OutputFile(format!("'{}': {}", out_dir.display(), e)))?;
    info!(
        citations = citations.len(),
        "wrote {} and {}",
        paths.table.display(),
        paths.document.display()
    );

    Ok(())
}

/// Saves the first rows of an unrecognized input next to it. Best effort.
fn save_sample(input: &Path, table: &RecordTable) -> Option<PathBuf> {
    let path = parent_dir(input).join(SAMPLE_FILE_NAME);
    match write_sample(&path, table, SAMPLE_ROWS) {
        Ok(()) => {
            info!("saved input sample to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("could not save input sample: {}", e);
            None
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// List the accepted column names per field.
fn fields_command() {
    for field in Field::ALL {
        println!("{}: {}", field, field.synonyms().join(", "));
    }
}
