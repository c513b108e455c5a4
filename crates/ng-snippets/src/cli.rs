//! Command-line surface.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::pipeline::Generator;
use crate::infra::config::Config;
use crate::infra::manifest::ProjectManifest;
use crate::infra::report::TracingReporter;
use crate::infra::sink;

#[derive(Debug, Parser)]
#[command(
    name = "ng-snippets",
    author,
    version,
    about = "Generate editor snippets from Angular component inputs and outputs",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan the project and write its snippets file (default)
    Generate {
        /// Project root containing package.json; defaults to the working directory
        #[arg(long)]
        root: Option<PathBuf>,
        /// Print the snippets instead of writing the file
        #[arg(long)]
        stdout: bool,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Execute a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => generate(None, false),
        Some(Commands::Generate { root, stdout }) => generate(root, stdout),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "ng-snippets", &mut io::stdout());
            Ok(())
        }
    }
}

fn generate(root: Option<PathBuf>, to_stdout: bool) -> Result<()> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("unable to determine working directory")?,
    };
    tracing::info!(root = %root.display(), "creating snippets");

    let config = Config::load(&root)
        .with_context(|| format!("failed to load configuration for {}", root.display()))?;
    let reporter = TracingReporter;
    let generator = Generator::new(&config, &reporter);

    if to_stdout {
        return print_snippets(&generator, &config, &root);
    }

    let result = generator
        .generate(&root)
        .with_context(|| format!("failed to generate snippets for {}", root.display()))?;
    tracing::debug!(
        project = %result.project,
        path = %result.output_path.display(),
        "generation finished"
    );
    Ok(())
}

fn print_snippets(generator: &Generator<'_>, config: &Config, root: &Path) -> Result<()> {
    let project = ProjectManifest::load(root)?.name;
    let collection = generator.collect(root, &project)?;
    let rendered = sink::render(&collection, config.output.pretty)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}").context("failed to write snippets to stdout")?;
    Ok(())
}
