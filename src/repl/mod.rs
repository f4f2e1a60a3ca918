//! REPL (Read-Eval-Print Loop) for the chat shell
//!
//! Plays the part of the page shell: input line, transcript, reset control.
//! The session history is owned here and lent to each chat turn.

pub mod commands;
pub mod display;
pub mod session;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use crate::chat::{self, TurnOutcome};
use crate::pipeline::Responder;
use crate::repl::commands::{is_command, CommandHandler};
pub use crate::repl::display::DisplayManager;
pub use crate::repl::session::{SessionManager, SessionStats};

/// Prompt shown before each line
pub const PROMPT: &str = "you> ";

/// One line read from the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Blank line
    Blank,
    /// Slash command, trimmed
    Command(String),
    /// Symptom query, trimmed
    Query(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
}

impl InputEvent {
    /// Sort a raw line into blank, command or query
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            InputEvent::Blank
        } else if is_command(trimmed) {
            InputEvent::Command(trimmed.to_string())
        } else {
            InputEvent::Query(trimmed.to_string())
        }
    }
}

/// REPL session coordinator
///
/// Owns the line editor, command processing, session state, display and the
/// active responder.
pub struct ReplSession {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
    responder: Arc<dyn Responder>,
}

impl ReplSession {
    /// Create a session; `history_path` keeps typed lines across runs
    pub fn new(responder: Arc<dyn Responder>, history_path: Option<PathBuf>) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        if let Some(path) = history_path.as_ref().filter(|p| p.exists()) {
            if let Err(e) = editor.load_history(path) {
                warn!(path = %path.display(), error = %e, "could not load input history");
            }
        }

        let command_handler = CommandHandler::new().with_mode_description(responder.describe());

        Ok(ReplSession {
            editor,
            history_path,
            command_handler,
            session_manager: SessionManager::new(),
            display_manager: DisplayManager::new(),
            responder,
        })
    }

    /// Show welcome banner
    pub fn show_welcome(&self, version: &str) {
        self.display_manager
            .show_banner(version, &self.responder.describe());
    }

    /// Read and classify one line; non-blank lines enter the input history
    pub fn read_input(&mut self) -> Result<InputEvent> {
        match self.editor.readline(PROMPT) {
            Ok(line) => {
                let event = InputEvent::classify(&line);
                if let InputEvent::Command(text) | InputEvent::Query(text) = &event {
                    let _ = self.editor.add_history_entry(text.as_str());
                }
                Ok(event)
            }
            Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
            Err(ReadlineError::Eof) => Ok(InputEvent::Eof),
            Err(err) => Err(anyhow::anyhow!("Readline error: {}", err)),
        }
    }

    /// Run a slash command
    ///
    /// Returns true if session should continue, false to exit.
    pub fn handle_input(&mut self, input: &str) -> Result<bool> {
        let command = self.command_handler.parse(input);
        self.command_handler
            .execute(command, &mut self.session_manager, &self.display_manager)
    }

    /// Run one chat turn and render it
    pub async fn ask(&mut self, query: &str) -> TurnOutcome {
        self.display_manager.start_processing();

        let outcome = chat::submit(
            self.responder.as_ref(),
            self.session_manager.history_mut(),
            query,
        )
        .await;
        self.session_manager.record_outcome(&outcome);

        match &outcome {
            TurnOutcome::Answered(reply) => self.display_manager.show_reply(reply),
            TurnOutcome::Failed { notice } => self.display_manager.show_failure(notice),
        }

        outcome
    }

    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }

    pub fn display_mut(&mut self) -> &mut DisplayManager {
        &mut self.display_manager
    }

    /// Write the input history, creating its directory if needed
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.history_path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            self.editor.save_history(path)?;
        }
        Ok(())
    }
}
