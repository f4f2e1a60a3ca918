//! Display manager for the chat REPL
//!
//! Banner, spinner while a turn runs, captions and replies.

use colored::*;
use crossterm::{
    cursor,
    execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

use crate::advice::{AdviceTable, FALLBACK_ADVICE};
use crate::pipeline::Reply;

/// Sample queries shown under the banner
pub const SAMPLE_QUERIES: &[&str] = &["fever", "headache", "எனக்கு ஜ்வரம்", "मुझे सिरदर्द है"];

/// Display manager for REPL UI
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
    show_annotations: bool,
    /// Spinner and captions; off in quiet mode
    show_progress: bool,
}

impl DisplayManager {
    /// Create new display manager
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            update_interval: Duration::from_millis(100),
            show_annotations: true,
            show_progress: true,
        }
    }

    /// Quiet mode hides the spinner and captions
    pub fn set_show_progress(&mut self, show: bool) {
        self.show_progress = show;
    }

    /// Toggle language/translation captions
    pub fn set_show_annotations(&mut self, show: bool) {
        self.show_annotations = show;
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, responder: &str) {
        let width = 64;
        let title = format!("  MediBuddy {} - Multilingual Medical Chatbot", version);
        let info = format!("  Responder: {} | Pipeline: Detect -> Translate -> Advise", responder);

        println!("\n{}", "=".repeat(width).cyan());
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", "=".repeat(width).cyan());
        println!("{}", "Not a substitute for professional medical advice!".red().bold());
        println!("Try: {}", SAMPLE_QUERIES.join(", ").green());
        println!(
            "Type your symptoms in any language (or {} for commands, {} to quit)\n",
            "/help".green(),
            "/exit".green()
        );
    }

    /// Spinner shown while a turn is processed
    pub fn start_processing(&mut self) {
        self.finish_current();
        if !self.show_progress {
            return;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Processing 3-step pipeline...");
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb);
    }

    /// Finish current spinner
    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Render a reply with its captions
    pub fn show_reply(&mut self, reply: &Reply) {
        self.finish_current();
        if self.show_annotations && self.show_progress {
            for annotation in &reply.annotations {
                println!("  {}", annotation.to_string().dimmed());
            }
        }
        println!("{} {}\n", "bot:".cyan().bold(), reply.content.green());
    }

    /// Render the fixed failure notice
    pub fn show_failure(&mut self, notice: &str) {
        self.finish_current();
        println!("{} {}\n", "bot:".cyan().bold(), notice.red());
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Print the advice table in match order
    pub fn show_table(&self, table: &AdviceTable) {
        println!("\n{}", "Known Symptoms (first match wins):".bold().cyan());
        println!("{}", "=".repeat(60).cyan());
        for (i, entry) in table.entries().iter().enumerate() {
            println!("  {:>2}. {:<10} {}", i + 1, entry.keyword.green(), entry.advice);
        }
        println!("      {:<10} {}", "(other)".dimmed(), FALLBACK_ADVICE);
        println!();
    }

    /// Clear screen
    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
