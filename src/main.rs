use clap::{Parser, Subcommand};
use scholar_page::{config, generate, load, logging, output, views};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "scholar-page")]
#[command(about = "Static academic profile page generator")]
#[command(long_about = "\
Static academic profile page generator

One JSON document describes the person: profile, publications, experience,
teaching, service, skills and references. Every non-empty section becomes a
container on a single static page with a small embedded script for the
announcement carousel, scroll reveal, citation toggles and nav highlight.

Content structure:

  content/
  ├── config.toml        # Site config (optional)
  ├── index.json         # Profile document
  └── assets/            # Photo, favicon, ... → copied to output root

Run 'scholar-page gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the document, render every section and write the page
    Build,
    /// Load the document and print a section inventory with data gaps
    Check,
    /// Print the announcement feed
    Announcements,
    /// Print BibTeX for every publication with a DOI or arXiv id
    Cite,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_cli_logger(cli.verbose);

    match cli.command {
        Command::GenConfig => print!("{}", config::stock_config_toml()),
        command => run(command, &cli.source, &cli.output)?,
    }

    Ok(())
}

/// Commands that need the config and the loaded document.
fn run(command: Command, source: &Path, output_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let site_config = config::load_config(source).inspect_err(|e| {
        tracing::error!(dir = %source.display(), error = %e, "invalid config");
    })?;
    let data_path = source.join(&site_config.data);
    let document = load_document(&data_path)?;

    match command {
        Command::Build => {
            tracing::info!(source = %source.display(), output = %output_dir.display(), "building");
            let summary = generate::generate(&document, &site_config, source, output_dir)?;
            output::print_generate_output(&summary);
        }
        Command::Check => {
            output::print_check_output(&document, &data_path, site_config.announcements.count);
        }
        Command::Announcements => {
            let feed = views::announcements(&document, site_config.announcements.count);
            output::print_announcements(&feed);
        }
        Command::Cite => output::print_citations(&document),
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }
    Ok(())
}

/// Load the profile document, logging the failure with its cause.
///
/// A failed load ends the run before anything is written.
fn load_document(path: &Path) -> Result<scholar_page::document::Document, load::LoadError> {
    load::load(path).inspect_err(|e| {
        let cause = std::error::Error::source(e)
            .map(|s| s.to_string())
            .unwrap_or_default();
        tracing::error!(path = %e.path().display(), %cause, "could not load profile document");
    })
}
