use anyhow::{bail, Result};
use clap::{ArgGroup, Parser};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use rudder::commands::{build, list, validate};

#[derive(Parser)]
#[command(name = "rudder")]
#[command(about = "Build the skill router by scanning for SKILL.md files", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("mode").args(["list", "validate", "dry_run", "backup"])))]
struct Cli {
    /// Skills directory to scan (default: ~/.agents/skills)
    #[arg(long, value_name = "PATH")]
    skills_dir: Option<PathBuf>,

    /// List all skills with descriptions (does not build the router)
    #[arg(long)]
    list: bool,

    /// Validate skills without building the router
    #[arg(long)]
    validate: bool,

    /// Preview the router content without writing to file
    #[arg(long)]
    dry_run: bool,

    /// Create a timestamped backup of the existing router before overwriting
    #[arg(long)]
    backup: bool,

    /// Enable verbose step logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<u8> {
    let skills_dir = match &cli.skills_dir {
        Some(dir) => dir.clone(),
        None => default_skills_dir()?,
    };

    if cli.list {
        list::execute(&skills_dir)
    } else if cli.validate {
        validate::execute(&skills_dir)
    } else {
        build::execute(&skills_dir, cli.dry_run, cli.backup)
    }
}

fn default_skills_dir() -> Result<PathBuf> {
    let Some(home) = dirs::home_dir() else {
        bail!("could not determine home directory; pass --skills-dir");
    };
    Ok(home.join(".agents").join("skills"))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
