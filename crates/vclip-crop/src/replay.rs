//! Scripted editor sessions.
//!
//! A replay script stands in for the host UI: it sets sizes and a template,
//! then feeds pointer events to a [`CropEditor`] and records every region
//! set the editor emits. Used by the `crop-replay` binary and for
//! reproducing editor reports offline.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use vclip_models::{LayoutTemplate, NormalizedRegionSet};

use crate::config::CropEngineConfig;
use crate::editor::CropEditor;
use crate::error::{CropError, CropResult};
use crate::geometry::{Point, Size};

/// One host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
    ResizeContainer { width: f64, height: f64 },
    SetSourceSize { width: f64, height: f64 },
    SetTemplate { template: LayoutTemplate },
    SetDisabled { disabled: bool },
    Select { region: usize },
    Nudge { dx: f64, dy: f64 },
    Reset,
}

/// A recorded editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    pub template: LayoutTemplate,
    pub container: Size,
    pub source: Size,
    #[serde(default)]
    pub initial_regions: Option<NormalizedRegionSet>,
    #[serde(default)]
    pub config: Option<CropEngineConfig>,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    pub fn from_json(json: &str) -> CropResult<Self> {
        let script: Self = serde_json::from_str(json)?;
        if script.events.len() > MAX_EVENTS {
            return Err(CropError::invalid_script(format!(
                "{} events exceeds the limit of {}",
                script.events.len(),
                MAX_EVENTS
            )));
        }
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> CropResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

const MAX_EVENTS: usize = 100_000;

/// Everything a replay produced.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Region sets in emission order
    pub emitted: Vec<NormalizedRegionSet>,
    /// Editor after the last event
    pub editor: CropEditor,
}

/// Run a script against a fresh editor.
pub fn run_script(script: &ReplayScript) -> ReplayOutcome {
    let config = script
        .config
        .clone()
        .unwrap_or_else(CropEngineConfig::from_env);
    let mut editor = CropEditor::new(config, script.template);
    if let Some(initial) = &script.initial_regions {
        editor = editor.with_initial_regions(initial.clone());
    }

    let mut emitted = Vec::new();
    emitted.extend(editor.set_source_size(script.source));
    emitted.extend(editor.set_container_size(script.container));

    for (index, event) in script.events.iter().enumerate() {
        debug!(index, ?event, "Replaying event");
        let output = match *event {
            ReplayEvent::PointerDown { x, y } => {
                editor.pointer_down(Point::new(x, y));
                None
            }
            ReplayEvent::PointerMove { x, y } => editor.pointer_move(Point::new(x, y)),
            ReplayEvent::PointerUp => {
                editor.pointer_up();
                None
            }
            ReplayEvent::ResizeContainer { width, height } => editor.set_container_size(Size::new(width, height)),
            ReplayEvent::SetSourceSize { width, height } => editor.set_source_size(Size::new(width, height)),
            ReplayEvent::SetTemplate { template } => editor.set_template(template),
            ReplayEvent::SetDisabled { disabled } => {
                editor.set_disabled(disabled);
                None
            }
            ReplayEvent::Select { region } => {
                editor.select(region);
                None
            }
            ReplayEvent::Nudge { dx, dy } => editor.nudge_selected(dx, dy),
            ReplayEvent::Reset => editor.reset_regions(),
        };
        emitted.extend(output);
    }

    ReplayOutcome { emitted, editor }
}
