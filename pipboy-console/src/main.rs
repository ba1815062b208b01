mod browse;
mod prompt;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use pipboy_game::{
    Blueprint, PipBoy, PipBoyConfig, decode_any, peek_type, resolve_by_friendly_name,
};
use render::{BOOT_LINES, Tint, type_tree};

#[derive(Debug, Parser)]
#[command(name = "pipboy", version)]
#[command(about = "PIP-Boy 3000 MKIV console: browse stats, items and data stored as XML documents")]
struct Args {
    /// Working directory holding the player document and its sub-directories
    #[arg(long, short = 'C', default_value = ".")]
    dir: PathBuf,

    /// Screen tint (green, amber, blue, white); overrides pipboy.json
    #[arg(long)]
    color: Option<String>,

    /// Skip the boot sequence
    #[arg(long)]
    no_boot: bool,

    /// Map height in cells; overrides pipboy.json
    #[arg(long)]
    map_height: Option<u16>,

    /// Map width in cells; overrides pipboy.json
    #[arg(long)]
    map_width: Option<u16>,

    /// Stylesheet referenced by written documents; overrides pipboy.json
    #[arg(long)]
    stylesheet: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the session and browse its pages (default)
    Browse,
    /// Print the registered type of a stored document
    Peek { path: PathBuf },
    /// Decode a stored document and print its contents
    Show { path: PathBuf },
    /// Build a new object from prompted values and store it in the session
    Create {
        /// Type or category name, case-insensitive
        type_name: String,
    },
    /// List the registered categories and their concrete types
    Types,
    /// Print the effective configuration as JSON
    Config,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command.as_ref().unwrap_or(&Command::Browse) {
        Command::Peek { path } => peek(path),
        Command::Show { path } => show(path),
        Command::Types => {
            print!("{}", type_tree());
            Ok(())
        }
        Command::Config => {
            let config = load_config(&args)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
        Command::Create { type_name } => create(&args, type_name),
        Command::Browse => browse(&args),
    }
}

/// `pipboy.json` from the working directory, with command-line overrides applied.
fn load_config(args: &Args) -> Result<PipBoyConfig> {
    let mut config = PipBoyConfig::load(&args.dir)
        .with_context(|| format!("loading configuration from {}", args.dir.display()))?;
    if let Some(color) = &args.color {
        config.color.clone_from(color);
    }
    if args.no_boot {
        config.boot_sequence = false;
    }
    if let Some(height) = args.map_height {
        config.map_height = height;
    }
    if let Some(width) = args.map_width {
        config.map_width = width;
    }
    if let Some(href) = &args.stylesheet {
        config.stylesheet_href.clone_from(href);
    }
    Ok(config.normalized())
}

fn open_session(args: &Args) -> Result<(PipBoy, Tint)> {
    let config = load_config(args)?;
    let tint = Tint::from_name(&config.color);
    let session = PipBoy::open(&args.dir, config)
        .with_context(|| format!("opening PIP-Boy session in {}", args.dir.display()))?;
    Ok((session, tint))
}

fn peek(path: &Path) -> Result<()> {
    let concrete = peek_type(path).with_context(|| format!("peeking {}", path.display()))?;
    println!("{concrete} ({})", concrete.category());
    Ok(())
}

fn show(path: &Path) -> Result<()> {
    let object = decode_any(path).with_context(|| format!("decoding {}", path.display()))?;
    println!("{}", object.kind().tag().bold());
    println!("{object:#?}");
    Ok(())
}

fn create(args: &Args, type_name: &str) -> Result<()> {
    let resolved = resolve_by_friendly_name(type_name)?;
    let blueprint = Blueprint::for_resolved(resolved)?;
    let (session, _) = open_session(args)?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();
    let object = prompt::prompt_object(&blueprint, &mut input, &mut output)?;
    let path = session
        .store(&object)
        .with_context(|| format!("storing {}", object.name()))?;
    writeln!(output, "Saved {}", path.display())?;
    Ok(())
}

fn browse(args: &Args) -> Result<()> {
    let (mut session, tint) = open_session(args)?;
    let stdout = io::stdout();
    let mut output = BufWriter::new(stdout.lock());
    if session.config().boot_sequence {
        for line in BOOT_LINES {
            writeln!(output, "{}", tint.paint(line))?;
        }
        writeln!(output, "{}", "-".repeat(40))?;
    }

    let stdin = io::stdin();
    browse::run(&mut session, tint, &mut stdin.lock(), &mut output)?;

    writeln!(output, "{}", tint.paint("Shutting Down..."))?;
    output.flush()?;
    session.shutdown().context("saving session")?;
    Ok(())
}
