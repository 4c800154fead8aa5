use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use adspec_catalog::{catalog_hash, load_catalog, load_or_static, static_catalog, Catalog};
use adspec_validate::{CreativeFile, Validator};

mod config;
mod report;

use config::Config;

#[derive(Parser)]
#[command(name = "adspec", version)]
struct Cli {
    /// Catalog file to use instead of the configured one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a default adspec.toml in the current directory
    Init,

    /// List platforms and their spec ids
    Specs {
        #[arg(long)]
        platform: Option<String>,
    },

    /// Print one spec's constraints
    Show {
        #[arg(long)]
        spec: String,
    },

    /// Check a creative file against a spec; exits 1 when it fails
    Validate {
        #[arg(long)]
        spec: String,
        #[arg(long)]
        file: PathBuf,
        /// Override the MIME type guessed from the file extension
        #[arg(long)]
        mime: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn open_catalog(cwd: &Path, cfg: &Config, flag: Option<&Path>) -> Result<Catalog> {
    let path = flag.map(Path::to_path_buf).or_else(|| cfg.catalog_path(cwd));
    match path {
        Some(p) if !cfg.catalog.fallback_to_static => load_catalog(&p),
        Some(p) => load_or_static(Some(&p)),
        None => static_catalog(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match cli.cmd {
        Command::Init => {
            let path = Config::config_path(&cwd);
            if path.exists() {
                return Err(anyhow!("{} already exists", path.display()));
            }
            Config::default().save_to(&path)?;
            println!("Wrote {}", path.display());
        }
        Command::Specs { platform } => {
            let cfg = Config::load_or_default(&cwd)?;
            let catalog = open_catalog(&cwd, &cfg, cli.catalog.as_deref())?;
            println!("Catalog {}", &catalog_hash(&catalog)?[..12]);
            let platforms = match platform.as_deref() {
                Some(id) => vec![catalog.platform(id).ok_or_else(|| anyhow!("unknown platform: {}", id))?],
                None => catalog.platforms.iter().collect(),
            };
            for p in platforms {
                println!("{} [{}]", p.name, p.id);
                for s in &p.specs {
                    println!("  - {} {} ({}, {})", s.id, s.title, s.format, s.dimensions);
                }
            }
        }
        Command::Show { spec } => {
            let cfg = Config::load_or_default(&cwd)?;
            let catalog = open_catalog(&cwd, &cfg, cli.catalog.as_deref())?;
            let (platform, spec) = catalog.find_spec(&spec).ok_or_else(|| anyhow!("unknown spec: {}", spec))?;
            print!("{}", report::render_spec(platform, spec));
        }
        Command::Validate { spec, file, mime, json } => {
            let cfg = Config::load_or_default(&cwd)?;
            let catalog = open_catalog(&cwd, &cfg, cli.catalog.as_deref())?;
            let (_, spec) = catalog.find_spec(&spec).ok_or_else(|| anyhow!("unknown spec: {}", spec))?;

            let mut creative = CreativeFile::open(&file)?;
            if let Some(mime) = mime {
                creative = creative.with_mime(mime);
            }
            let result = Validator::new().validate(&creative, spec)?;

            if json || cfg.output.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", report::render_result(creative.name(), spec, &result));
            }
            if !result.is_valid {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
