//! Batch-run sheets: many image prompts executed one after another.
//!
//! A sheet is a TOML document:
//!
//! ```toml
//! name = "spring launch"
//!
//! [[row]]
//! prompt = "a red bicycle in a flower market"
//! overlay = "SPRING SALE"
//! count = 2
//!
//! [[row]]
//! prompt = "a picnic basket on a hill"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{AtelierError, Result};
use crate::generation::Orchestrator;
use crate::session::SessionContext;
use crate::types::{GeneratedArtifact, GenerationRequest};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    #[serde(default, rename = "row")]
    pub rows: Vec<SheetRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    pub prompt: String,
    #[serde(default)]
    pub overlay: Option<String>,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl SheetRow {
    fn to_request(&self) -> GenerationRequest {
        GenerationRequest::builder()
            .prompt(self.prompt.clone())
            .maybe_overlay(self.overlay.clone())
            .variation_count(self.count)
            .build()
    }
}

impl Sheet {
    pub fn from_toml(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }
}

/// Result of one sheet row.
#[derive(Debug)]
pub struct RowOutcome {
    pub index: usize,
    pub prompt: String,
    pub result: Result<Vec<GeneratedArtifact>>,
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcome of a whole sheet, in row order.
#[derive(Debug)]
pub struct SheetRun {
    pub name: String,
    pub rows: Vec<RowOutcome>,
}

impl SheetRun {
    pub fn succeeded(&self) -> usize {
        self.rows.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.rows.len() - self.succeeded()
    }

    /// All artifacts from successful rows, in row order.
    pub fn artifacts(&self) -> impl Iterator<Item = &GeneratedArtifact> {
        self.rows
            .iter()
            .filter_map(|r| r.result.as_ref().ok())
            .flatten()
    }
}

/// Runs sheet rows sequentially through an [`Orchestrator`].
#[derive(Clone)]
pub struct SheetRunner {
    orchestrator: Orchestrator,
}

impl SheetRunner {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run every row. A failed row is recorded and the sheet continues.
    pub async fn run<F>(&self, session: &SessionContext, sheet: &Sheet, mut on_row: F) -> SheetRun
    where
        F: FnMut(&RowOutcome) + Send,
    {
        info!(sheet = %sheet.name, rows = sheet.rows.len(), "Running sheet");
        let mut rows = Vec::with_capacity(sheet.rows.len());

        for (index, row) in sheet.rows.iter().enumerate() {
            let result = if row.prompt.trim().is_empty() {
                Err(AtelierError::InvalidArgument(format!(
                    "Row {index} has an empty prompt"
                )))
            } else {
                self.orchestrator
                    .generate_image_batch(session, &row.to_request())
                    .await
            };
            if let Err(ref e) = result {
                warn!(sheet = %sheet.name, row = index, error = %e, "Sheet row failed");
            }
            let outcome = RowOutcome {
                index,
                prompt: row.prompt.clone(),
                result,
            };
            on_row(&outcome);
            rows.push(outcome);
        }

        let run = SheetRun {
            name: sheet.name.clone(),
            rows,
        };
        info!(sheet = %run.name, succeeded = run.succeeded(), failed = run.failed(), "Sheet complete");
        run
    }
}
