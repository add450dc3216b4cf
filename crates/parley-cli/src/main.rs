use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use parley::providers::configs::{OpenAiProviderConfig, ProviderConfig};
use parley::providers::openai::{OpenAiModel, OpenAiProvider};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands {
    pub mod chat;
    pub mod complete;
    pub mod configure;
    pub mod load;
    pub mod shell;
    pub mod tools;
    pub mod version;
}
mod profile;
mod render;

use profile::{find_existing_profile, PROFILE_DEFAULT_NAME};

#[derive(Parser)]
#[command(author, about, long_about = None)]
struct Cli {
    /// Profile to take model and host settings from
    #[arg(short, long, global = true, default_value = PROFILE_DEFAULT_NAME)]
    profile: String,

    /// Model to use, overriding the profile and OPENAI_MODEL
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// Echo prompts and replies and log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Complete a single prompt
    Complete {
        /// Prompt text, forwarded as-is
        prompt: String,
    },

    /// Start an interactive chat session
    Chat {
        /// System message opening the transcript
        #[arg(short, long)]
        system: Option<String>,
    },

    /// Run a script through the shell tool (executed without sanitization)
    Shell {
        /// Script text
        script: String,

        /// Interpreter accepting `-c <script>`
        #[arg(short, long)]
        interpreter: Option<String>,
    },

    /// List available tools and their input schemas
    Tools,

    /// Extract text from a PDF file or a directory of PDFs
    Load {
        /// File or directory to load
        path: PathBuf,

        /// Path to the pdftotext binary
        #[arg(long, default_value = "/usr/bin/pdftotext")]
        pdftotext: PathBuf,
    },

    /// Create or update a profile
    Configure {
        /// Name of the profile to write
        profile_name: Option<String>,

        /// API host to store in the profile
        #[arg(long)]
        host: Option<String>,
    },

    /// Print the version
    Version,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "parley=debug,parley_cli=debug"
    } else {
        "parley=info,parley_cli=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Environment first, then the profile, then command line flags.
fn provider(cli: &Cli) -> Result<OpenAiProvider> {
    let mut config = OpenAiProviderConfig::from_env()
        .context("OpenAI is configured through OPENAI_API_KEY")?;

    if let Some(profile) = find_existing_profile(&cli.profile)? {
        config = profile.apply(config)?;
    }
    if let Some(model) = &cli.model {
        config.model = model
            .parse::<OpenAiModel>()
            .with_context(|| format!("Unknown model '{}'", model))?;
    }
    config.verbose |= cli.verbose;

    tracing::debug!(model = %config.model, host = %config.host, "provider configured");
    Ok(OpenAiProvider::new(config)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Some(Command::Complete { prompt }) => {
            let provider = provider(&cli)?;
            if let Some(warning) = commands::complete::model_warning(provider.model()) {
                eprintln!("{}", style(warning).yellow());
            }
            commands::complete::execute(&provider, prompt).await
        }
        Some(Command::Chat { system }) => {
            let provider = provider(&cli)?;
            commands::chat::execute(&provider, system.clone()).await
        }
        Some(Command::Shell {
            script,
            interpreter,
        }) => commands::shell::execute(script, interpreter.clone()).await,
        Some(Command::Tools) => commands::tools::execute().await,
        Some(Command::Load { path, pdftotext }) => {
            commands::load::execute(path.clone(), pdftotext.clone()).await
        }
        Some(Command::Configure { profile_name, host }) => {
            commands::configure::handle_configure(
                profile_name.clone(),
                cli.model.clone(),
                host.clone(),
            )
            .await
        }
        Some(Command::Version) => commands::version::execute().await,
        None => {
            println!("No command provided - Run 'parley help' to see available commands.");
            Ok(())
        }
    }
}
