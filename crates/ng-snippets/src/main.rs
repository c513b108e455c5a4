use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    ng_snippets::init();

    let cli = ng_snippets::cli::Cli::parse();
    match ng_snippets::cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("snippet generation failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}
