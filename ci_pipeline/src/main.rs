mod cancel;
mod config;
mod containers;
mod error;
mod lint;
mod provisioner;
mod stages;
mod toolchain;

use clap::{Args, Parser, Subcommand};

use crate::config::PipelineConfig;
use crate::provisioner::DaggerProvisioner;
use crate::stages::Stage;
use crate::toolchain::DEFAULT_TOOLCHAIN_FILE;

#[derive(Parser)]
#[command(name = "hubdash-ci", about = "Hubdash CI lint pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile check, then format check (skipped if the compile check fails)
    Lint(SourceArgs),
    /// Compile check only
    Check(SourceArgs),
    /// Format check only
    Fmt(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Source directory; defaults to the repository root
    #[arg(long, env = "HUBDASH_CI_SOURCE")]
    source: Option<String>,
    /// Toolchain descriptor, relative to the source directory
    #[arg(long, default_value = DEFAULT_TOOLCHAIN_FILE)]
    toolchain_file: String,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    // stdout carries the check output only
    if std::env::var("LOG_FORMAT").unwrap_or_default() == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    let Cli { command } = Cli::parse();
    let config = PipelineConfig::from_env();

    let (handle, token) = cancel::pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling");
            handle.cancel();
        }
    });

    dagger_sdk::connect(move |client| async move {
        let (args, stage) = match &command {
            Command::Lint(args) => (args, None),
            Command::Check(args) => (args, Some(Stage::Check)),
            Command::Fmt(args) => (args, Some(Stage::Fmt)),
        };
        let source = match &args.source {
            Some(source) => source.clone(),
            None => config::repo_root(&std::env::current_dir()?)
                .to_string_lossy()
                .into_owned(),
        };
        tracing::info!(%source, "using source directory");
        let src = containers::host_directory(&client, &config, &source);
        let provisioner = DaggerProvisioner::new(client, config);

        let result = match stage {
            None => lint::lint(&provisioner, &src, &args.toolchain_file, &token).await,
            Some(stage) => {
                lint::run_single(&provisioner, &src, &args.toolchain_file, stage, &token).await
            }
        };

        match result {
            Ok(out) => {
                print!("{out}");
                Ok(())
            }
            Err(err) => {
                print!("{}", err.output());
                Err(err.into())
            }
        }
    })
    .await?;

    Ok(())
}
