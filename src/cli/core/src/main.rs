/* src/cli/core/src/main.rs */

mod build;
mod clean;
mod config;
mod dev;
mod inspect;
mod shell;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use config::resolve_project;
use inspect::ResolveOptions;

#[derive(Parser)]
#[command(name = "folio", version, about = "Static site generator for config-driven portfolios")]
struct Cli {
  /// Path to folio.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  /// Raise log verbosity (-v debug, -vv trace); FOLIO_LOG overrides
  #[arg(short, long, action = clap::ArgAction::Count, global = true)]
  verbose: u8,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Prerender every locale into the output directory
  Build,
  /// Watch the configuration and serve or restart on every change
  Dev,
  /// Remove build output and run cleanup commands
  Clean,
  /// Print the configuration the build would render
  Resolve {
    /// Skip the Markdown transform
    #[arg(long)]
    raw: bool,
    /// List the files the configuration depends on
    #[arg(long, conflicts_with = "raw")]
    deps: bool,
    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
  },
}

fn init_tracing(verbose: u8) {
  use tracing_subscriber::{EnvFilter, fmt};

  let filter = match verbose {
    0 => "warn",
    1 => "folio_cli=debug,folio_core=debug,folio_engine=debug,warn",
    _ => "folio_cli=trace,folio_core=trace,folio_engine=trace,info",
  };
  let env_filter = EnvFilter::try_from_env("FOLIO_LOG").unwrap_or_else(|_| EnvFilter::new(filter));
  fmt().with_env_filter(env_filter).with_target(false).with_writer(std::io::stderr).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let cwd = std::env::current_dir().context("failed to get cwd")?;
  let (root, config) = resolve_project(cli.config.as_deref(), &cwd)?;

  let result = match cli.command {
    Command::Build => build::run_build(&config, &root),
    Command::Dev => dev::run_dev(&config, &root).await,
    Command::Clean => clean::run_clean(&config, &root),
    Command::Resolve { raw, deps, pretty } => inspect::run_resolve(
      &root,
      config.build.runtime.as_deref(),
      ResolveOptions { raw, deps, pretty },
    ),
  };
  if let Err(e) = result {
    ui::blank();
    ui::fail(&format!("{e:#}"));
    std::process::exit(1);
  }
  Ok(())
}
