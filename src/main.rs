//! MediBuddy - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tracing::{debug, info};

use medibuddy::{
    advice::AdviceTable,
    chat::{self, ChatHistory, TurnOutcome},
    cli::{Args, Commands, Verbosity},
    config::Config,
    doctor::Doctor,
    language::LanguageDetector,
    logging,
    models::InferenceClient,
    pipeline::{KeywordResponder, ModelResponder, Responder, ResponderMode},
    repl::{DisplayManager, InputEvent, ReplSession},
};

const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Build the responder selected by the configuration
fn build_responder(config: &Config) -> Result<Arc<dyn Responder>> {
    let responder: Arc<dyn Responder> = match config.responder.mode {
        ResponderMode::Keyword => Arc::new(KeywordResponder::new(
            AdviceTable::default(),
            LanguageDetector::new(config.language.fallback.clone()),
        )),
        ResponderMode::Model => {
            let client = InferenceClient::with_config(
                &config.model.endpoint,
                config.api_token(),
                config.model_timeout(),
            )?;
            Arc::new(ModelResponder::new(Arc::new(client), config.model.max_length))
        }
    };
    info!(responder = %responder.describe(), "responder ready");
    Ok(responder)
}

/// Run the interactive chat loop
async fn run_repl(
    config: &Config,
    responder: Arc<dyn Responder>,
    verbosity: Verbosity,
) -> Result<()> {
    let mut repl_session = ReplSession::new(responder, Some(config.history_path()))?;
    let display = repl_session.display_mut();
    display.set_show_annotations(config.display.show_annotations);
    display.set_show_progress(verbosity.show_progress());

    repl_session.show_welcome(VERSION);

    loop {
        match repl_session.read_input()? {
            InputEvent::Blank => continue,
            InputEvent::Command(command) => match repl_session.handle_input(&command) {
                Ok(true) => continue,
                Ok(false) => break,
                Err(e) => repl_session.display().show_error(&e.to_string()),
            },
            InputEvent::Query(query) => {
                // Failures are rendered by the session; the loop keeps going
                repl_session.ask(&query).await;
            }
            InputEvent::Interrupted => println!("\nUse /exit to quit gracefully"),
            InputEvent::Eof => break,
        }
    }

    repl_session.save()?;
    debug!(id = %repl_session.session().id(), "session closed");

    Ok(())
}

/// Answer one query and exit
async fn run_query(
    config: &Config,
    responder: Arc<dyn Responder>,
    query: &str,
    verbosity: Verbosity,
) -> Result<()> {
    let mut history = ChatHistory::new();
    let outcome = chat::submit(responder.as_ref(), &mut history, query).await;

    match outcome {
        TurnOutcome::Answered(reply) => {
            if verbosity.show_progress() && config.display.show_annotations {
                for annotation in &reply.annotations {
                    println!("{}", annotation.to_string().dimmed());
                }
            }
            println!("{}", reply.content);
            Ok(())
        }
        TurnOutcome::Failed { notice } => {
            eprintln!("{}", notice.red());
            std::process::exit(1);
        }
    }
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => Config::default_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in defaults".to_string()),
    };

    println!("\n{}", "MediBuddy Configuration".bold().cyan());
    println!("Source: {}", source.dimmed());
    println!("Verbosity: {}", args.verbosity().as_str());
    println!(
        "API token ({}): {}\n",
        config.model.token_env,
        if config.api_token().is_some() { "set" } else { "not set" }
    );

    let rendered = toml::to_string_pretty(config).context("Failed to render configuration")?;
    println!("{}", rendered);
    Ok(())
}

async fn run_doctor(config: Config) -> Result<()> {
    let doctor = Doctor::new(config);
    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_usage() {
    println!("MediBuddy {} - Multilingual Medical Chatbot", VERSION);
    println!("\nUsage:");
    println!("  medibuddy <query>             Answer one symptom query");
    println!("  medibuddy start               Interactive chat");
    println!("  medibuddy table               Show the symptom advice table");
    println!("  medibuddy config              Show configuration");
    println!("  medibuddy doctor              Check setup and model endpoint");
    println!("\nExample:");
    println!("  medibuddy \"I have a fever and headache\"");
    println!("  medibuddy --mode model \"persistent dry cough\"");
    println!();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(msg) = args.validate() {
        eprintln!("{} {}", "Error:".red().bold(), msg);
        std::process::exit(2);
    }

    // Doctor reports a broken config instead of refusing to start
    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) if args.command == Some(Commands::Doctor) => {
            eprintln!("{} {}", "Warning:".yellow().bold(), e);
            Config::default()
        }
        Err(e) => return Err(e.into()),
    };
    args.apply_overrides(&mut config);

    if !config.display.color_output {
        colored::control::set_override(false);
    }
    logging::init(args.verbosity(), config.display.color_output);

    match &args.command {
        Some(Commands::Start) => {
            config.validate()?;
            let responder = build_responder(&config)?;
            run_repl(&config, responder, args.verbosity()).await?;
        }
        Some(Commands::Table) => DisplayManager::new().show_table(&AdviceTable::default()),
        Some(Commands::Config) => show_config(&args, &config)?,
        Some(Commands::Doctor) => run_doctor(config).await?,
        None => {
            if let Some(query) = &args.query {
                config.validate()?;
                let responder = build_responder(&config)?;
                run_query(&config, responder, query, args.verbosity()).await?;
            } else {
                show_usage();
            }
        }
    }

    Ok(())
}
