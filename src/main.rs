//! codegrab - find, copy and save code blocks from web pages

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use codegrab::dom::{page_title, parse_html_bytes};
use codegrab::export::{ExportAction, export, write_export};
use codegrab::filename::base_file_name_now;
use codegrab::scan::{CodeBlock, find_block, scan_page};
use codegrab::settings::{self, DownloadMode, Settings, SettingsPatch};
use codegrab::{Error, resolve_extension};

#[derive(Parser)]
#[command(name = "codegrab")]
#[command(version, about = "Find, copy and save code blocks from web pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    codegrab scan page.html                  List code blocks
    codegrab copy page.html -b 0 --markdown  Print block 0 as Markdown
    codegrab download page.html -b 2 -o src  Save block 2 into src/
    codegrab ext python                      Show the extension for a label")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (default: $CODEGRAB_CONFIG or the platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the code blocks of a page
    Scan {
        /// HTML file
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Print blocks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a block to stdout
    Copy {
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        /// Block index, as listed by `scan`
        #[arg(short, long)]
        block: usize,

        /// Wrap in a Markdown fence
        #[arg(short, long)]
        markdown: bool,
    },

    /// Save a block as a file
    Download {
        #[arg(value_name = "PAGE")]
        page: PathBuf,

        #[arg(short, long)]
        block: usize,

        /// Extension to use instead of the detected one
        #[arg(short, long)]
        ext: Option<String>,

        /// File name (without extension)
        #[arg(short, long)]
        name: Option<String>,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Title for the generated name (default: the page <title>)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// Print the file extension for a language label
    Ext {
        #[arg(value_name = "LABEL")]
        label: String,
    },

    /// Show or change settings
    Settings {
        #[arg(long, value_enum)]
        set_mode: Option<ModeArg>,

        /// Comma-separated quick extensions, e.g. `.py,.rs`
        #[arg(long, value_delimiter = ',')]
        set_quick: Option<Vec<String>>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Dialog,
    Quick,
}

impl From<ModeArg> for DownloadMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Dialog => DownloadMode::Dialog,
            ModeArg::Quick => DownloadMode::Quick,
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = if quiet || std::env::var_os("RUST_LOG").is_none() {
        EnvFilter::new(format!("codegrab={level}"))
    } else {
        EnvFilter::from_default_env()
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let settings_path = cli.settings.clone().unwrap_or_else(settings::default_path);
    debug!(path = %settings_path.display(), "settings path");

    match run(cli.command, &settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, settings_path: &Path) -> Result<(), Error> {
    match command {
        Command::Scan { page, json } => {
            let settings = Settings::load_or_default(settings_path);
            let (blocks, _) = load_page(&page, &settings)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&blocks)?);
            } else {
                print_blocks(&blocks);
            }
        }
        Command::Copy {
            page,
            block,
            markdown,
        } => {
            let (blocks, _) = load_page(&page, &Settings::default())?;
            let block = find_block(&blocks, block)?;
            let action = if markdown {
                ExportAction::CopyMarkdown
            } else {
                ExportAction::Copy
            };
            let out = export(block, &action, "");
            let mut stdout = io::stdout().lock();
            out.write_to(&mut stdout)?;
            writeln!(stdout)?;
        }
        Command::Download {
            page,
            block,
            ext,
            name,
            out,
            title,
        } => {
            let settings = Settings::load_or_default(settings_path);
            let (blocks, page_title) = load_page(&page, &settings)?;
            let block = find_block(&blocks, block)?;

            let default_base = base_file_name_now(title.or(page_title).as_deref());
            let name = match name {
                Some(name) => name,
                None if settings.download_mode == DownloadMode::Dialog
                    && io::stdin().is_terminal() =>
                {
                    prompt_name(&default_base)?
                }
                None => String::new(),
            };

            let action = ExportAction::Download {
                extension: ext,
                name,
            };
            let path = write_export(&out, &export(block, &action, &default_base))?;
            println!("{}", path.display());
        }
        Command::Ext { label } => println!("{}", resolve_extension(&label)),
        Command::Settings {
            set_mode,
            set_quick,
        } => {
            let mut settings = Settings::load(settings_path)?;
            if set_mode.is_some() || set_quick.is_some() {
                settings.update(SettingsPatch {
                    download_mode: set_mode.map(DownloadMode::from),
                    quick_extensions: set_quick.map(normalize_extensions),
                });
                settings.save(settings_path)?;
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }
    Ok(())
}

fn load_page(path: &Path, settings: &Settings) -> Result<(Vec<CodeBlock>, Option<String>), Error> {
    let bytes = fs::read(path)?;
    let mut dom = parse_html_bytes(&bytes);
    let title = page_title(&dom);
    let blocks = scan_page(&mut dom, settings)?;
    Ok((blocks, title))
}

fn print_blocks(blocks: &[CodeBlock]) {
    if blocks.is_empty() {
        println!("No code blocks found.");
        return;
    }
    for block in blocks {
        let first_line = block.text.trim().lines().next().unwrap_or("");
        let language = if block.language.is_empty() {
            "-"
        } else {
            block.language.as_str()
        };
        println!(
            "{:>3}  {:<4} {:<12} {:<6} {}",
            block.index, block.tag, language, block.extension, first_line
        );
    }
}

fn prompt_name(default_base: &str) -> io::Result<String> {
    eprint!("File name [{default_base}]: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn normalize_extensions(list: Vec<String>) -> Vec<String> {
    list.into_iter()
        .map(|ext| ext.trim().to_string())
        .filter(|ext| !ext.is_empty())
        .map(|ext| {
            if ext.starts_with('.') {
                ext
            } else {
                format!(".{ext}")
            }
        })
        .collect()
}
