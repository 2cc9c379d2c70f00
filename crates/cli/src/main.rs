mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{cmd_install_extras, cmd_list_extras, cmd_uninstall_extras};
use output::OutputFormat;
use wifi_lib::consts::{REGISTRY_ENV, SOURCE_ROOT_ENV};

/// wifi - install and remove the extra files shipped with wifi
#[derive(Parser)]
#[command(name = "wifi")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Registry file describing the extras (default: built-in registry)
  #[arg(long, global = true, env = REGISTRY_ENV)]
  registry: Option<PathBuf>,

  /// Directory relative extras sources are read from
  #[arg(long, global = true, env = SOURCE_ROOT_ENV)]
  source_root: Option<PathBuf>,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Install extras like shell completion scripts
  InstallExtras {
    /// Force overwriting files if they already exist
    #[arg(short = 'F', long)]
    force: bool,
  },

  /// Uninstall extras like shell completion scripts
  UninstallExtras,

  /// List the declared extras and whether they are installed
  ListExtras,
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  match cli.command {
    Commands::InstallExtras { force } => cmd_install_extras(cli.registry, cli.source_root, force, cli.output),
    Commands::UninstallExtras => cmd_uninstall_extras(cli.registry, cli.output),
    Commands::ListExtras => cmd_list_extras(cli.registry, cli.source_root, cli.output),
  }
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
