use crate::config::Config;
use crate::core::{CaptionError, CaptionResult};
use crate::extractors::{build_allowlisted_client, build_client, TranscriptFetcher};
use crate::{default_engine, resolve_captions};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "caption-resolver")]
#[command(about = "Fetch video captions with language and source fallback")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(short, long, global = true)]
    pub timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve captions for a video URL or identifier
    Captions {
        /// Video URL or 11-character identifier
        #[arg(value_name = "INPUT")]
        input: String,

        /// Comma-separated language preferences, e.g. "es,en"
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// Extract a transcript from an allow-listed wiki page
    Transcript {
        #[arg(value_name = "PAGE_URL")]
        url: String,
    },
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(timeout) = self.timeout.filter(|t| *t > 0) {
            config.timeout = timeout;
        }
        Ok(config)
    }

    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let result = match &self.command {
            Command::Captions { input, lang } => {
                let engine = default_engine(&config, build_client(&config)?);
                let lang = lang.as_deref().unwrap_or(&config.default_lang);
                resolve_captions(&engine, input, Some(lang)).await
            }
            Command::Transcript { url } => {
                let client = build_allowlisted_client(&config)?;
                let fetcher = TranscriptFetcher::new(client, config.allowed_domains.clone());
                fetcher.fetch_transcript(url).await
            }
        };

        report(result)
    }
}

fn report(result: Result<CaptionResult, CaptionError>) -> Result<()> {
    match result {
        Ok(captions) => {
            println!("{}", serde_json::to_string_pretty(&captions)?);
            Ok(())
        }
        Err(CaptionError::AllSourcesExhausted { attempted, errors }) => {
            eprintln!("No captions found. Tried languages: {}", attempted.join(", "));
            for error in &errors {
                eprintln!("  {}", error);
            }
            anyhow::bail!("all {} caption attempts failed", errors.len());
        }
        Err(e) => Err(e.into()),
    }
}
