use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use doxmd::batch::{self, OutputTarget};
use doxmd::{Config, Converter, OutputFormat};

#[derive(Parser)]
#[command(name = "doxmd")]
#[command(about = "Convert Word .docx documents to Markdown")]
#[command(version)]
struct Cli {
    /// A .docx file, or a directory of .docx files
    #[arg(required_unless_present = "init_config")]
    input: Option<PathBuf>,

    /// Directory for the converted files
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for extracted images (default: <output>/<image prefix>, ./images without -o)
    #[arg(long)]
    images: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Print a single document to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Prefix used in image links, relative to the output file
    #[arg(long)]
    image_prefix: Option<String>,

    /// Language tag for code blocks
    #[arg(long)]
    code_language: Option<String>,

    /// Use a specific config file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the default config file and exit
    #[arg(long)]
    init_config: bool,

    /// Show per-element decisions
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.init_config {
        let path = Config::init_default()?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(prefix) = &cli.image_prefix {
        config.convert.image_link_prefix = prefix.clone();
    }
    if let Some(language) = &cli.code_language {
        config.convert.code_language = language.clone();
    }

    let Some(input) = cli.input.as_deref() else {
        bail!("no input given");
    };

    let output_dir = match cli.output.clone().or_else(|| config.output_dir.clone()) {
        Some(dir) => dir,
        None => {
            if cli.image_prefix.is_none() && cli.images.is_none() {
                config.keep_images_local();
            }
            PathBuf::from(".")
        }
    };
    let images_dir = cli
        .images
        .clone()
        .unwrap_or_else(|| config.resolve_images_dir(&output_dir));
    let target = OutputTarget {
        output_dir,
        images_dir,
        format: cli.format,
    };
    let converter = Converter::new(config.convert);

    if input.is_dir() {
        if cli.stdout {
            bail!("--stdout needs a single .docx file, not a directory");
        }
        let report = batch::convert_all(&converter, input, &target)?;
        log::info!(
            "Conversion complete: {} converted, {} failed",
            report.converted.len(),
            report.failed.len()
        );
        if !report.is_success() {
            std::process::exit(1);
        }
    } else if cli.stdout {
        print_document(&converter, input, &target)?;
    } else {
        batch::convert_document(&converter, input, &target)?;
    }

    Ok(())
}

fn print_document(converter: &Converter, input: &Path, target: &OutputTarget) -> Result<()> {
    let conversion = converter
        .convert_file(input)
        .with_context(|| format!("converting {}", input.display()))?;
    doxmd::document::write_images(&conversion.images, &target.images_dir)?;

    let content = batch::format_output(&conversion, target.format)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{content}")?;
    Ok(())
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
