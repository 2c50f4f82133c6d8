//! Scripted edit sessions
//!
//! A script is a JSON file holding an optional starting skin and a list of
//! edit commands. Replaying dispatches each step in order; a rejected step
//! is reported and the rest still run, since a refused edit changes nothing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::command::{EditCommand, EditError};
use crate::config::Settings;
use crate::editor::{NullRefresh, SkinEditor, SkinSession};
use crate::history::MenuLabels;
use crate::model::Skin;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    /// Starting skin; a fresh one when absent
    #[serde(default)]
    pub skin: Option<Skin>,
    #[serde(default)]
    pub steps: Vec<EditCommand>,
}

/// Script-related errors
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Script not found: {0}")]
    NotFound(String),
}

/// Outcome of one dispatched step
#[derive(Debug, Clone)]
pub struct StepReport {
    pub op: &'static str,
    pub result: Result<(), EditError>,
    /// Menu labels right after the step
    pub menu: MenuLabels,
}

#[derive(Debug)]
pub struct Report {
    pub steps: Vec<StepReport>,
    pub skin: Skin,
    pub history: Vec<String>,
    pub changes_saved: bool,
}

impl Report {
    /// Number of steps that were rejected
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|s| s.result.is_err()).count()
    }
}

/// Load a script from disk
pub fn load_script(path: &Path) -> Result<Script, ReplayError> {
    if !path.exists() {
        return Err(ReplayError::NotFound(path.display().to_string()));
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Dispatch every step of `script` against a fresh session
pub fn run(script: Script, settings: Settings) -> Report {
    let editor = SkinEditor::new(
        script.skin.unwrap_or_default(),
        settings,
        Box::new(NullRefresh),
    );
    let mut session = SkinSession::new(editor);

    let steps = script
        .steps
        .into_iter()
        .map(|step| {
            let op = step.description();
            let result = session.dispatch(step);
            if let Err(e) = &result {
                info!(op, error = %e, "step rejected");
            }
            StepReport {
                op,
                result,
                menu: session.editor.menu().clone(),
            }
        })
        .collect();

    Report {
        steps,
        history: session.history().descriptions(),
        changes_saved: session.editor.changes_saved(),
        skin: session.editor.skin,
    }
}
