// file: src/artifacts/mod.rs
// description: append-only per-run artifact storage with manifest
// reference: internal persistence layer

use crate::error::Result;
use crate::models::stage::Stage;
use chrono::Local;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Durable store for one generation run. Each run writes into its own
/// uniquely named directory (timestamp plus short random suffix, so
/// concurrent runs never collide), and every stage leaves at least one
/// file behind, success or not.
#[derive(Debug)]
pub struct ArtifactStore {
    run_dir: PathBuf,
    files: Vec<String>,
}

/// Index of everything one run wrote, persisted as `manifest.json`.
#[derive(Debug, Serialize)]
pub struct RunManifest {
    pub created_at: String,
    pub concept: String,
    pub approved: bool,
    pub iterations: u32,
    pub final_html_sha256: String,
    pub files: Vec<String>,
}

impl ArtifactStore {
    pub fn create(root: &Path, concept: &str) -> Result<Self> {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let suffix = Uuid::new_v4().simple().to_string();
        let folder = format!(
            "{}_{}_{}",
            timestamp,
            &suffix[..8],
            sanitize_filename(concept)
        );

        let run_dir = root.join(folder);
        fs::create_dir_all(&run_dir)?;

        info!("run artifacts will be saved to {}", run_dir.display());

        Ok(Self {
            run_dir,
            files: Vec::new(),
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Stage artifact named `<order>_<stage>_<role>.<ext>`.
    pub fn save_stage_text(
        &mut self,
        stage: Stage,
        role: &str,
        ext: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let name = format!("{}_{}_{}.{}", stage.order(), stage.name(), role, ext);
        self.save_named(&name, content)
    }

    pub fn save_stage_json(
        &mut self,
        stage: Stage,
        role: &str,
        value: &serde_json::Value,
    ) -> Result<PathBuf> {
        let rendered = serde_json::to_string_pretty(value)?;
        let name = format!("{}_{}_{}.json", stage.order(), stage.name(), role);
        self.save_named(&name, &rendered)
    }

    /// Run-level file with a caller-chosen name (spec copy, final HTML,
    /// verdict).
    pub fn save_named(&mut self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.run_dir.join(name);
        fs::write(&path, content)?;
        self.files.push(name.to_string());
        Ok(path)
    }

    pub fn write_manifest(
        &mut self,
        concept: &str,
        approved: bool,
        iterations: u32,
        final_html: &str,
    ) -> Result<PathBuf> {
        let manifest = RunManifest {
            created_at: Local::now().to_rfc3339(),
            concept: concept.to_string(),
            approved,
            iterations,
            final_html_sha256: compute_hash(final_html),
            files: self.files.clone(),
        };

        let path = self.run_dir.join("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(path)
    }
}

fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Reduce a concept name to a filename-safe token: keep word characters,
/// collapse whitespace and underscores, cap at 50 characters.
pub fn sanitize_filename(name: &str) -> String {
    let filtered: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-' || *c == '_')
        .collect();

    let mut collapsed = String::new();
    let mut previous_was_separator = false;
    for c in filtered.chars() {
        if c.is_whitespace() || c == '_' {
            if !previous_was_separator {
                collapsed.push('_');
                previous_was_separator = true;
            }
        } else {
            collapsed.push(c);
            previous_was_separator = false;
        }
    }

    let trimmed: String = collapsed.trim_matches('_').chars().take(50).collect();

    if trimmed.is_empty() {
        "Unknown".to_string()
    } else {
        trimmed
    }
}
