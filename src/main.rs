use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docxide_enrich::{DocumentRecord, Error, RenderOptions};

#[derive(Parser)]
#[command(version, about = "Annotate DOCX text with visual styles and render it as styled HTML")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Do not link the Inter web font
    #[arg(long)]
    no_web_fonts: bool,

    /// Document title
    #[arg(long)]
    title: Option<String>,
}

impl RenderArgs {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            web_fonts: !self.no_web_fonts,
            title: self.title.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Extract paragraphs and table cells from a DOCX into a JSON record
    Extract {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a JSON record to HTML
    Render {
        record: PathBuf,
        /// JSON array of style annotations replacing the record's styles
        #[arg(short, long)]
        styles: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Append an editing action (JSON object with action and timestamp) to a record's log
    Log { record: PathBuf, entry: PathBuf },
    /// Extract a DOCX and render it with the given styles in one step
    Export {
        input: PathBuf,
        #[arg(short, long)]
        styles: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        render: RenderArgs,
    },
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".into());
    input.with_file_name(format!("{stem}{suffix}"))
}

fn run(command: Command) -> Result<PathBuf, Error> {
    match command {
        Command::Extract { input, output } => {
            let output = output.unwrap_or_else(|| default_output(&input, ".json"));
            let content = docxide_enrich::extract(&input)?;
            let filename = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            DocumentRecord::new(filename, content).save(&output)?;
            Ok(output)
        }
        Command::Render {
            record,
            styles,
            output,
            render,
        } => {
            let output = output.unwrap_or_else(|| default_output(&record, "_enriched.html"));
            let mut doc = DocumentRecord::load(&record)?;
            if let Some(styles) = styles {
                doc.replace_styles(docxide_enrich::load_annotations(&styles)?, &record)?;
            }
            docxide_enrich::render_record_to_html(&doc, &output, &render.options())?;
            Ok(output)
        }
        Command::Log { record, entry } => {
            let mut doc = DocumentRecord::load(&record)?;
            let entry = docxide_enrich::parse_log_entry(&std::fs::read_to_string(&entry)?)?;
            let count = doc.append_log(entry);
            doc.save(&record)?;
            log::info!("Logged action ({count} total) in {}", record.display());
            Ok(record)
        }
        Command::Export {
            input,
            styles,
            output,
            render,
        } => {
            let output = output.unwrap_or_else(|| default_output(&input, "_enriched.html"));
            let styles = match styles {
                Some(path) => docxide_enrich::load_annotations(&path)?,
                None => Vec::new(),
            };
            docxide_enrich::export_docx_to_html(&input, &styles, &output, &render.options())?;
            Ok(output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match run(cli.command) {
        Ok(output) => {
            println!("{}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
