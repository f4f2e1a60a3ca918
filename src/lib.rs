//! MediBuddy - multilingual symptom-advice chatbot
//!
//! A terminal chatbot that detects the language of a symptom description and
//! answers with canned advice from a keyword table, or with the output of a
//! hosted text-generation model.
//!
//! # Architecture
//!
//! - **advice**: ordered keyword table, first match wins
//! - **language**: script and stop-word language identification
//! - **pipeline**: keyword and model responders behind one trait
//! - **chat**: one chat turn against an explicit session history
//! - **repl / cli**: interactive shell and one-shot entry point

pub mod errors;

pub use errors::{ChatError, Result};

pub mod advice;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod chat;

pub mod config;
pub mod cli;
pub mod logging;
pub mod doctor;
pub mod repl;
