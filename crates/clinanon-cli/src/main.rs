use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use clinanon_cli::commands::{self, DetectionFormat};
use clinanon_cli::config::{self, CliConfig};

#[derive(Parser, Debug)]
#[command(about = "Replace detected PII with stable placeholders", version)]
struct Cli {
    /// Config file to use instead of the per-user one.
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Anonymize a document with the detector's findings.
    Anonymize {
        #[arg(long = "text", value_name = "FILE")]
        text: PathBuf,

        #[arg(long = "detections", value_name = "FILE")]
        detections: PathBuf,

        #[arg(long = "format", value_enum, default_value_t = DetectionFormat::Llm)]
        format: DetectionFormat,

        /// Mappings exported by an earlier session, to keep codes stable.
        #[arg(long = "mappings", value_name = "FILE")]
        mappings: Option<PathBuf>,

        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Put original values back into an anonymized document.
    Restore {
        #[arg(long = "text", value_name = "FILE")]
        text: PathBuf,

        #[arg(long = "mappings", value_name = "FILE")]
        mappings: PathBuf,

        #[arg(long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective config.
    Show,
    /// Write the default config file.
    Init {
        #[arg(long = "force", default_value_t = false)]
        force: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_config_path()?,
    };
    // `config init` must work even when the existing file is unreadable.
    let config = match &cli.command {
        Command::Config(ConfigCommand::Init { .. }) => CliConfig::default(),
        _ => config::load_config(&config_path)?,
    };
    init_tracing(&config);

    match cli.command {
        Command::Anonymize {
            text,
            detections,
            format,
            mappings,
            out,
        } => {
            let source = read_file(&text)?;
            let raw = read_file(&detections)?;
            let seed = mappings
                .as_deref()
                .map(commands::read_mappings)
                .transpose()?;
            let document = commands::anonymize(&config, &source, &raw, format, seed.as_deref())?;
            let rendered = serde_json::to_string_pretty(&document)?;
            write_output(out.as_deref(), &rendered)?;
        }
        Command::Restore {
            text,
            mappings,
            out,
        } => {
            let source = read_file(&text)?;
            let pairs = commands::read_mappings(&mappings)?;
            let restored = commands::restore(&source, &pairs)?;
            write_output(out.as_deref(), &restored)?;
        }
        Command::Config(ConfigCommand::Show) => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Config(ConfigCommand::Init { force }) => {
            config::init_config(&config_path, force)?;
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Logs go to stderr so that stdout carries only the command's output.
fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json_logs {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))
}

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, contents)
            .wrap_err_with(|| format!("failed to write {}", path.display())),
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}
