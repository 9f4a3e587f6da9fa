mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cartridge_lib::config::Configuration;
use cartridge_lib::descriptor::Mode;

use crate::cmd::PlanOptions;
use crate::output::{OutputFormat, print_error};

/// cartridge - build planning for multi-cartridge front-end projects
#[derive(Parser)]
#[command(name = "cartridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

/// Project location and the build kinds in scope.
#[derive(Args)]
struct Scope {
  /// Project root (default: $CARTRIDGE_ROOT, then the current directory)
  #[arg(short, long)]
  root: Option<PathBuf>,

  /// Only plan script builds
  #[arg(long)]
  js: bool,

  /// Only plan style builds
  #[arg(long)]
  css: bool,
}

#[derive(Subcommand)]
enum Commands {
  /// Compute the build descriptors for every cartridge
  Plan {
    #[command(flatten)]
    scope: Scope,

    /// Build mode: development or production
    #[arg(short = 't', long = "type", default_value_t = Mode::Production)]
    mode: Mode,

    /// Leave output directories untouched
    #[arg(long)]
    dry_run: bool,

    /// Also write the JSON plan to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },

  /// List the cartridges taking part in the build
  Modules {
    #[command(flatten)]
    scope: Scope,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
  },
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

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let result = match cli.command {
    Commands::Plan {
      scope,
      mode,
      dry_run,
      output,
      format,
    } => cmd::cmd_plan(PlanOptions {
      root: scope.root,
      configuration: Configuration {
        mode,
        js: scope.js,
        css: scope.css,
      },
      dry_run,
      output,
      format,
    }),
    Commands::Modules { scope, format } => cmd::cmd_modules(
      scope.root.as_deref(),
      Configuration {
        js: scope.js,
        css: scope.css,
        ..Default::default()
      },
      format,
    ),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}
