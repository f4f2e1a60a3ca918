//! Command handler for REPL built-in commands
//!
//! Slash commands for history control and introspection. Anything without a
//! leading `/` is a chat query.

use anyhow::Result;
use colored::*;

use crate::advice::AdviceTable;
use crate::chat::Role;
use crate::repl::display::DisplayManager;
use crate::repl::session::SessionManager;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    /// Empty the chat history
    Clear,
    History { limit: Option<usize> },
    Stats,
    Table,
    Mode,
    Verbose { enable: bool },
    /// Clear the terminal
    Cls,
    Exit,
    Unknown { input: String },
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler {
    verbose: bool,
    mode_description: String,
}

impl CommandHandler {
    /// Create new command handler
    pub fn new() -> Self {
        CommandHandler {
            verbose: false,
            mode_description: "keyword table".to_string(),
        }
    }

    /// Responder description printed by `/mode`
    pub fn with_mode_description(mut self, description: impl Into<String>) -> Self {
        self.mode_description = description.into();
        self
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Command::Unknown { input: input.to_string() };
        };

        let parts: Vec<&str> = body.split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown { input: input.to_string() };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "clear" | "reset" => Command::Clear,
            "history" => {
                let limit = parts.get(1).and_then(|s| s.parse().ok());
                Command::History { limit }
            }
            "stats" | "status" => Command::Stats,
            "table" | "symptoms" => Command::Table,
            "mode" => Command::Mode,
            "verbose" => {
                let enable = parts
                    .get(1)
                    .map(|s| matches!(s.to_lowercase().as_str(), "on" | "1" | "true"))
                    .unwrap_or(true);
                Command::Verbose { enable }
            }
            "cls" => Command::Cls,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a command
    ///
    /// Returns true if REPL should continue, false if should exit
    pub fn execute(
        &mut self,
        command: Command,
        session: &mut SessionManager,
        display: &DisplayManager,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Take care!".green());
                Ok(false)
            }
            Command::Clear => {
                let removed = session.clear_history();
                println!("{}", format!("Chat cleared ({} messages removed).", removed).yellow());
                Ok(true)
            }
            Command::History { limit } => {
                self.show_history(session, limit.unwrap_or(10));
                Ok(true)
            }
            Command::Stats => {
                self.show_stats(session);
                Ok(true)
            }
            Command::Table => {
                display.show_table(&AdviceTable::default());
                Ok(true)
            }
            Command::Mode => {
                println!("Responder: {}", self.mode_description.cyan());
                Ok(true)
            }
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
                Ok(true)
            }
            Command::Cls => {
                display.clear_screen()?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/clear", "Clear the chat history"),
            ("/history [n]", "Show last n messages (default: 10)"),
            ("/stats", "Show session statistics"),
            ("/table", "Show known symptoms and advice"),
            ("/mode", "Show the active responder"),
            ("/verbose [on|off]", "Toggle verbose output"),
            ("/cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Type your symptoms in any language (no / prefix)");
        println!("  - Use {} for input history", "UP/DOWN arrows".cyan());
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display chat history
    fn show_history(&self, session: &SessionManager, limit: usize) {
        let messages = session.recent_messages(limit);

        if messages.is_empty() {
            println!("{}", "No messages yet.".yellow());
            return;
        }

        println!("\n{}", format!("Chat History (last {}):", messages.len()).bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        for message in messages {
            let role = match message.role {
                Role::User => "you".green().bold(),
                Role::Assistant => "bot".cyan().bold(),
            };
            if self.verbose {
                println!(
                    "  {} {} {}",
                    message.timestamp.format("%H:%M:%S").to_string().dimmed(),
                    role,
                    message.content
                );
            } else {
                println!("  {} {}", role, message.content);
            }
        }
        println!();
    }

    /// Display session statistics
    fn show_stats(&self, session: &SessionManager) {
        let stats = session.stats();

        println!("\n{}", "Session Statistics:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let duration = session.session_duration();
        let duration_str = if duration >= 60 {
            format!("{}m {}s", duration / 60, duration % 60)
        } else {
            format!("{}s", duration)
        };

        println!("  Questions:        {}", stats.turns.to_string().green());
        println!("  Failed replies:   {}", stats.failures.to_string().red());
        println!("  General advice:   {}", stats.fallbacks.to_string().green());
        println!("  Messages:         {}", session.history_len().to_string().green());
        println!("  Session Duration: {}", duration_str.green());

        let top = stats.top_symptoms();
        if !top.is_empty() {
            println!("\n  {}", "Common Symptoms:".bold());
            let max = top[0].1.max(1);
            for (symptom, count) in top {
                let bar = "#".repeat((count * 30).div_ceil(max));
                println!("    {:<10} {} {}", symptom, bar.cyan(), count);
            }
        }

        if !stats.languages.is_empty() {
            let langs: Vec<String> = stats
                .languages
                .iter()
                .map(|(code, n)| format!("{}={}", code.to_uppercase(), n))
                .collect();
            println!("\n  Languages: {}", langs.join(", "));
        }
        println!();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}
