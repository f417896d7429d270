//! Command-line interface for docparts.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use docparts::backend::default_backend;
use docparts::{BatchProcessor, ChunkingConfig, ProcessingConfig, Strategy, UploadedFile};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "docparts", version, about = "Batch document content extraction")]
struct Cli {
    /// Path to a docparts.toml or JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Process files into content elements and print the result as JSON
    Process {
        /// Files to process
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Extraction strategy policy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Infer table structure (hi_res only)
        #[arg(long)]
        infer_table_structure: bool,

        /// Split elements longer than this many characters
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Start the API server
    Serve {
        /// Host address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    Fast,
    HiRes,
    Auto,
    OcrOnly,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Fast => Strategy::Fast,
            StrategyArg::HiRes => Strategy::HiRes,
            StrategyArg::Auto => Strategy::Auto,
            StrategyArg::OcrOnly => Strategy::OcrOnly,
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ProcessingConfig> {
    match path {
        Some(path) => {
            let config = if path.extension().is_some_and(|ext| ext == "json") {
                ProcessingConfig::from_json_file(path)
            } else {
                ProcessingConfig::from_toml_file(path)
            };
            config.with_context(|| format!("failed to load config from {}", path.display()))
        }
        None => Ok(ProcessingConfig::discover()
            .context("config discovery failed")?
            .unwrap_or_default()),
    }
}

async fn run_process(
    config: ProcessingConfig,
    files: Vec<PathBuf>,
    pretty: bool,
) -> anyhow::Result<()> {
    let mut uploads = Vec::with_capacity(files.len());
    for path in &files {
        let content = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        uploads.push(UploadedFile::new(filename, content));
    }

    tracing::debug!(file_count = uploads.len(), "starting batch");
    let processor = BatchProcessor::new(default_backend(), config);
    let result = processor.process(&uploads).await?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    if result
        .processing_info
        .iter()
        .any(|o| o.status == docparts::OutcomeStatus::Error)
    {
        std::process::exit(1);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Process {
            files,
            strategy,
            infer_table_structure,
            chunk_size,
            pretty,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(strategy) = strategy {
                config.strategy = strategy.into();
            }
            if infer_table_structure {
                config.infer_table_structure = true;
            }
            if let Some(max_chars) = chunk_size {
                config.chunking = Some(ChunkingConfig { max_chars });
            }
            run_process(config, files, pretty).await
        }
        Command::Serve { host, port } => {
            match cli.config {
                Some(_) => {
                    let config = load_config(cli.config.as_ref())?;
                    docparts::api::serve_with_config(&host, port, config).await?;
                }
                None => docparts::api::serve(&host, port).await?,
            }
            Ok(())
        }
    }
}
