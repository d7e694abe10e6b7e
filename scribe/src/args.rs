use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stt::Domain;

/// Scribe transcription request validator
#[derive(Debug, Parser)]
#[command(name = "scribe", about = "Validate speech-to-text transcription requests")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "SCRIBE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a transcription request and print the accepted form
    Validate {
        /// JSON file with the request fields (everything except the audio)
        #[arg(short, long)]
        request: PathBuf,

        /// Audio file to attach
        #[arg(short, long)]
        audio: PathBuf,
    },
    /// List the accepted values of a domain
    Members {
        /// One of: language, model, response_format, include, timestamp_granularity
        domain: Domain,
    },
    /// Check whether a value belongs to a domain
    Check {
        domain: Domain,

        /// JSON value, or a bare string
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_validate() {
        let args = Args::try_parse_from(["scribe", "validate", "--request", "req.json", "--audio", "a.wav"]).unwrap();

        assert!(args.config.is_none());
        let Command::Validate { request, audio } = args.command else {
            panic!("expected validate");
        };
        assert_eq!(request, PathBuf::from("req.json"));
        assert_eq!(audio, PathBuf::from("a.wav"));
    }

    #[test]
    fn parses_domain_names() {
        let args = Args::try_parse_from(["scribe", "-c", "scribe.toml", "members", "response_format"]).unwrap();

        assert_eq!(args.config, Some(PathBuf::from("scribe.toml")));
        assert!(matches!(
            args.command,
            Command::Members {
                domain: Domain::ResponseFormat
            }
        ));
    }

    #[test]
    fn rejects_unknown_domain() {
        assert!(Args::try_parse_from(["scribe", "members", "voices"]).is_err());
    }

    #[test]
    fn check_takes_raw_value() {
        let args = Args::try_parse_from(["scribe", "check", "language", "en"]).unwrap();

        let Command::Check { domain, value } = args.command else {
            panic!("expected check");
        };
        assert_eq!(domain, Domain::Language);
        assert_eq!(value, "en");
    }
}
