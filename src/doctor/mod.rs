//! Doctor command for setup diagnostics
//!
//! Checks the effective configuration, the offline pipeline pieces, and the
//! text-generation endpoint when the model responder is selected.

use colored::*;

use crate::advice::AdviceTable;
use crate::config::Config;
use crate::language::detect_language;
use crate::models::InferenceClient;
use crate::pipeline::ResponderMode;

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
}

impl Doctor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        vec![
            self.check_config(),
            self.check_advice_table(),
            self.check_language_detection(),
            self.check_history_dir(),
            self.check_api_token(),
            self.check_model_endpoint().await,
        ]
    }

    fn model_mode(&self) -> bool {
        self.config.responder.mode == ResponderMode::Model
    }

    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    fn check_advice_table(&self) -> HealthCheck {
        let table = AdviceTable::default();
        let status = match table.lookup("I have a fever").keyword() {
            Some("fever") => HealthStatus::Pass,
            _ => HealthStatus::Fail("keyword lookup returned the wrong entry".to_string()),
        };
        HealthCheck::new("Advice Table", status)
    }

    fn check_language_detection(&self) -> HealthCheck {
        let samples = [("I have a headache", "en"), ("मुझे बुखार है", "hi"), ("எனக்கு காய்ச்சல்", "ta")];

        let misses: Vec<String> = samples
            .iter()
            .filter_map(|(text, expected)| match detect_language(text) {
                Ok(code) if code == *expected => None,
                Ok(code) => Some(format!("{} -> {}", expected, code)),
                Err(_) => Some(format!("{} -> none", expected)),
            })
            .collect();

        let status = if misses.is_empty() {
            HealthStatus::Pass
        } else {
            HealthStatus::Warn(format!("unexpected detections: {}", misses.join(", ")))
        };
        HealthCheck::new("Language Detection", status)
    }

    fn check_history_dir(&self) -> HealthCheck {
        let path = self.config.history_path();
        let status = match path.parent() {
            Some(dir) if dir.as_os_str().is_empty() || dir.exists() => HealthStatus::Pass,
            Some(dir) => HealthStatus::Warn(format!("{} will be created on exit", dir.display())),
            None => HealthStatus::Warn("history file has no parent directory".to_string()),
        };
        HealthCheck::new("Input History", status)
    }

    fn check_api_token(&self) -> HealthCheck {
        let status = if self.config.api_token().is_some() {
            HealthStatus::Pass
        } else {
            HealthStatus::Warn(format!(
                "{} is not set; requests are anonymous",
                self.config.model.token_env
            ))
        };
        HealthCheck::new("API Token", status)
    }

    /// Unreachable endpoint fails in model mode and only warns otherwise
    async fn check_model_endpoint(&self) -> HealthCheck {
        let client = match InferenceClient::with_config(
            &self.config.model.endpoint,
            self.config.api_token(),
            self.config.model_timeout(),
        ) {
            Ok(client) => client,
            Err(e) => {
                return HealthCheck::new("Model Endpoint", HealthStatus::Fail(e.to_string()));
            }
        };

        if client.is_available().await {
            return HealthCheck::new("Model Endpoint", HealthStatus::Pass);
        }

        let message = format!("{} is not reachable", client.endpoint());
        let status = if self.model_mode() {
            HealthStatus::Fail(message)
        } else {
            HealthStatus::Warn(format!("{} (only needed in model mode)", message))
        };
        HealthCheck::new("Model Endpoint", status)
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "MediBuddy Diagnostics".bold().cyan());
        println!("{:<20} Status", "Check");
        println!("{}", "=".repeat(60));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => "PASS".green().to_string(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow().to_string(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red().to_string(),
            };
            println!("{:<20} {}", check.name, status);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
