//! unpaste CLI - clipboard paste normalization tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use unpaste::detect::{self, Classification};
use unpaste::paste::{
    DirectoryStorage, MemoryStorage, Notifier, PasteHandler, PasteOptions, Severity, TempStorage,
};
use unpaste::render::{self, MemoryDocument};
use unpaste::{ClipboardItem, ClipboardPayload, CleanOptions, JsonFormat, ListOptions, Node};

#[derive(Parser)]
#[command(name = "unpaste")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Normalize clipboard content into structured document nodes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how a payload is classified
    Classify {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Run the full paste pipeline and print the inserted nodes
    Paste {
        #[command(flatten)]
        input: InputArgs,

        /// Keep spans and inline formatting of HTML tables
        #[arg(short, long)]
        preserve_formatting: bool,

        /// Clean prose even when it does not look PDF-extracted
        #[arg(long)]
        force_clean: bool,

        /// Maximum number of table cells
        #[arg(long, default_value = "2000")]
        max_cells: usize,

        /// Directory for pasted images (kept in memory if not specified)
        #[arg(long, value_name = "DIR")]
        image_dir: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Remove artificial line breaks from PDF-extracted text
    Clean {
        #[command(flatten)]
        input: InputArgs,

        /// Clean even when the text does not look PDF-extracted
        #[arg(long)]
        force: bool,

        /// Join hyphenated line-end word splits
        #[arg(long)]
        fix_hyphenation: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the paragraph and list structure of text
    Lists {
        #[command(flatten)]
        input: InputArgs,

        /// Words that start a new paragraph after a bullet item
        #[arg(long, value_delimiter = ',')]
        starters: Option<Vec<String>>,
    },

    /// Show version information
    Version,
}

/// Clipboard flavours to read; plain text comes from stdin when none is given.
#[derive(Args)]
struct InputArgs {
    /// File holding the text/plain flavour
    #[arg(long, value_name = "FILE")]
    text: Option<PathBuf>,

    /// File holding the text/html flavour
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Image file to paste as a clipboard item
    #[arg(long, value_name = "FILE")]
    image: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Document nodes as JSON
    Json,
    /// Plain text rendering of the nodes
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Classify { input } => cmd_classify(&input),
        Commands::Paste {
            input,
            preserve_formatting,
            force_clean,
            max_cells,
            image_dir,
            format,
            compact,
            output,
        } => {
            let options = PasteOptions::new()
                .with_preserve_formatting(preserve_formatting)
                .with_force_clean(force_clean)
                .with_max_table_cells(max_cells);
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            cmd_paste(
                &input,
                &options,
                image_dir.as_deref(),
                format,
                json_format,
                output.as_deref(),
            )
        }
        Commands::Clean {
            input,
            force,
            fix_hyphenation,
            output,
        } => cmd_clean(&input, force, fix_hyphenation, output.as_deref()),
        Commands::Lists { input, starters } => cmd_lists(&input, starters),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Prints notifications to stderr.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        let label = match severity {
            Severity::Success => "success".green(),
            Severity::Warning => "warning".yellow(),
            Severity::Error => "error".red(),
        };
        eprintln!("{}: {}", label.bold(), message);
    }
}

fn read_payload(input: &InputArgs) -> Result<ClipboardPayload, Box<dyn std::error::Error>> {
    let mut payload = ClipboardPayload::new();

    if let Some(path) = &input.text {
        payload = payload.with_text(fs::read_to_string(path)?);
    }
    if let Some(path) = &input.html {
        payload = payload.with_html(fs::read_to_string(path)?);
    }
    if let Some(path) = &input.image {
        payload = payload.with_item(ClipboardItem::new(image_mime(path), fs::read(path)?));
    }

    if input.text.is_none() && input.html.is_none() && input.image.is_none() {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        payload = payload.with_text(text);
    }

    Ok(payload)
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        _ => "application/octet-stream",
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_classify(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let payload = read_payload(input)?;
    let classification = detect::classify(&payload);

    println!("{}", "Classification".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Category".bold(), classification.category());

    match classification {
        Classification::Image(item) => {
            println!("{}: {}", "MIME type".bold(), item.mime_type);
            println!("{}: {} bytes", "Size".bold(), item.blob.len());
        }
        Classification::TabularText { text, delimiter } => {
            let rows = text.lines().filter(|l| !l.trim().is_empty()).count();
            println!("{}: {:?}", "Delimiter".bold(), delimiter);
            println!("{}: {}", "Rows".bold(), rows);
        }
        Classification::HtmlTable(html) => {
            if let Some(stats) = detect::table_stats(html) {
                println!("{}: {}", "Rows".bold(), stats.rows);
                println!("{}: {}", "Cells".bold(), stats.cells);
                println!("{}: {}", "Header cells".bold(), stats.header_cells);
            }
        }
        Classification::ProseText(text) => {
            let yes_no = |b: bool| if b { "Yes" } else { "No" };
            println!("{}: {}", "Characters".bold(), text.chars().count());
            println!(
                "{}: {}",
                "Looks PDF-wrapped".bold(),
                yes_no(unpaste::should_clean(text))
            );
            println!(
                "{}: {}",
                "Has list markers".bold(),
                yes_no(unpaste::has_list_patterns(text))
            );
        }
        Classification::Empty => {
            println!("{}", "Nothing to paste; the editor default applies".dimmed());
        }
    }

    Ok(())
}

fn cmd_paste(
    input: &InputArgs,
    options: &PasteOptions,
    image_dir: Option<&Path>,
    format: OutputFormat,
    json_format: JsonFormat,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = read_payload(input)?;

    let nodes = match image_dir {
        Some(dir) => run_paste(&payload, options, DirectoryStorage::new(dir))?,
        None => run_paste(&payload, options, MemoryStorage::new())?,
    };

    let Some(nodes) = nodes else {
        eprintln!("{}", "Nothing inserted; the editor default paste applies".yellow());
        return Ok(());
    };

    let content = match format {
        OutputFormat::Json => render::to_json(&nodes, json_format)?,
        OutputFormat::Text => render::to_text(&nodes),
    };
    write_output(output, &content)
}

fn run_paste<S: TempStorage>(
    payload: &ClipboardPayload,
    options: &PasteOptions,
    storage: S,
) -> Result<Option<Vec<Node>>, Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let handler = PasteHandler::new(ConsoleNotifier, storage);
    let mut doc = MemoryDocument::new();

    let outcome = rt.block_on(handler.handle(payload, options, &mut doc));
    log::debug!("Paste outcome: {:?}", outcome.category());

    if outcome.is_inserted() {
        Ok(Some(doc.take_nodes()))
    } else {
        Ok(None)
    }
}

fn cmd_clean(
    input: &InputArgs,
    force: bool,
    fix_hyphenation: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = read_payload(input)?;
    let options = CleanOptions::new().with_hyphenation_fix(fix_hyphenation);
    let cleaner = unpaste::clean::PdfCleaner::new(options);

    if !force && !cleaner.should_clean(&payload.plain_text) {
        eprintln!(
            "{}",
            "Text does not look PDF-wrapped; use --force to clean anyway".yellow()
        );
        return write_output(output, payload.plain_text.trim_end());
    }

    write_output(output, &cleaner.clean(&payload.plain_text))
}

fn cmd_lists(
    input: &InputArgs,
    starters: Option<Vec<String>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let payload = read_payload(input)?;
    let mut options = ListOptions::new();
    if let Some(words) = starters {
        options = options.with_paragraph_starters(words);
    }

    let recognizer = unpaste::clean::ListRecognizer::new(&options);
    let blocks = recognizer.convert(&payload.plain_text);
    println!("{}", serde_json::to_string_pretty(&blocks)?);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unpaste".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Clipboard paste normalization tool");
    println!();
    println!("License: MIT");
}
