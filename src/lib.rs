//! WildPraxis core: text similarity toolkit, built-in learning content, and
//! a replaceable key-value state layer for the field education app.
//!
//! Everything here is synchronous and side-effect free except the state
//! backends under [`repositories`].

pub mod config;
pub mod models;
pub mod repositories;
pub mod services;
pub mod utils;

pub use config::Config;
pub use models::{CorpusDocument, Lesson, LearningModule, QuizItem, ScoredHit, Track};
pub use repositories::{MemoryStore, SqliteStore, StateStore, StoreError};
pub use services::{ContentService, ProgressService, RetrievalService, WorkbenchService};
