//! Command-line argument parsing for MediBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Config;
use crate::pipeline::ResponderMode;

/// MediBuddy - multilingual symptom advice in the terminal
#[derive(Parser, Debug)]
#[command(name = "medibuddy")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(about = "Multilingual symptom-advice chatbot (not a substitute for professional medical advice)", long_about = None)]
pub struct Args {
    /// Symptom query to answer once and exit
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    /// Responder backing the chat (overrides config)
    #[arg(long, value_enum)]
    pub mode: Option<ResponderMode>,

    /// Text-generation endpoint (overrides config)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (print only the reply)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start interactive chat
    Start,

    /// Print the symptom advice table
    Table,

    /// Display effective configuration
    Config,

    /// Check configuration and model endpoint
    Doctor,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check that a query and a subcommand are not combined
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.query.is_some() {
            return Err("Cannot specify a query with a subcommand.".to_string());
        }

        if let Some(query) = &self.query {
            if query.trim().is_empty() {
                return Err("Query must not be empty.".to_string());
            }
        }

        Ok(())
    }

    /// Apply CLI overrides on top of file configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.responder.mode = mode;
        }
        if let Some(endpoint) = &self.endpoint {
            config.model.endpoint = endpoint.clone();
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default tracing filter directive
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show the spinner and captions
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["medibuddy", "-q"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["medibuddy"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["medibuddy", "-v"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["medibuddy", "-vv"]).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_query_parsing() {
        let args = parse(&["medibuddy", "I have a fever"]);
        assert_eq!(args.query.as_deref(), Some("I have a fever"));
        assert!(args.command.is_none());
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_subcommand_parsing() {
        assert_eq!(parse(&["medibuddy", "start"]).command, Some(Commands::Start));
        assert_eq!(parse(&["medibuddy", "table"]).command, Some(Commands::Table));
        assert_eq!(parse(&["medibuddy", "doctor"]).command, Some(Commands::Doctor));
    }

    #[test]
    fn test_mode_flag() {
        let args = parse(&["medibuddy", "--mode", "model", "fever"]);
        assert_eq!(args.mode, Some(ResponderMode::Model));
        assert!(Args::try_parse_from(["medibuddy", "--mode", "oracle"]).is_err());
    }

    #[test]
    fn test_validate_empty_query() {
        let args = Args {
            query: Some("   ".to_string()),
            mode: None,
            endpoint: None,
            config: None,
            verbose: 0,
            quiet: false,
            command: None,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validate_query_with_subcommand() {
        let args = Args {
            query: Some("fever".to_string()),
            mode: None,
            endpoint: None,
            config: None,
            verbose: 0,
            quiet: false,
            command: Some(Commands::Doctor),
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let args = parse(&["medibuddy", "--mode", "model", "--endpoint", "http://localhost:8080"]);
        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.responder.mode, ResponderMode::Model);
        assert_eq!(config.model.endpoint, "http://localhost:8080");
    }

    #[test]
    fn test_verbosity_methods() {
        assert!(!Verbosity::Quiet.show_progress());
        assert!(Verbosity::Normal.show_progress());
        assert_eq!(Verbosity::Verbose.log_filter(), "info");
        assert_eq!(Verbosity::VeryVerbose.as_str(), "very_verbose");
    }
}
