//! Scripted input replay.
//!
//! A script is a JSON document listing host events and toolbar actions to
//! feed to a [`SketchSurface`], in order:
//!
//! ```json
//! {
//!   "steps": [
//!     { "action": "color", "color": "red" },
//!     { "action": "pointer", "kind": "down", "x": 10, "y": 10 },
//!     { "action": "pointer", "kind": "move", "x": 90, "y": 40 },
//!     { "action": "pointer", "kind": "up", "x": 90, "y": 40 },
//!     { "action": "undo" },
//!     { "action": "settle" },
//!     { "action": "save" }
//!   ]
//! }
//! ```

use crate::config::ColorSpec;
use crate::input::{
    MouseEvent, MouseEventKind, PointerEvent, PointerKind, TouchEvent, TouchPhase, TouchPoint,
};
use crate::surface::{SketchSurface, SurfaceError};
use crate::ui::Control;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Step {index}: unknown color {color:?}")]
    InvalidColor { index: usize, color: ColorSpec },

    #[error("Step {index} ({action}) failed: {source}")]
    Step {
        index: usize,
        action: &'static str,
        source: SurfaceError,
    },
}

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Canvas-local pointer event
    Pointer { kind: PointerKind, x: f64, y: f64 },
    /// Mouse event in client coordinates
    Mouse {
        kind: MouseEventKind,
        client_x: f64,
        client_y: f64,
    },
    /// Touch event in client coordinates
    Touch {
        phase: TouchPhase,
        #[serde(default)]
        touches: Vec<TouchPoint>,
    },
    Color { color: ColorSpec },
    Width { width: f64 },
    /// Activates a toolbar control
    Click { control: Control },
    Undo,
    Redo,
    Clear,
    Save,
    /// Loads a PNG file; relative paths resolve against the script's directory
    Load { path: PathBuf },
    Resize { width: u32, height: u32 },
    /// Waits for every pending decode to be applied
    Settle,
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::Pointer { .. } => "pointer",
            Step::Mouse { .. } => "mouse",
            Step::Touch { .. } => "touch",
            Step::Color { .. } => "color",
            Step::Width { .. } => "width",
            Step::Click { .. } => "click",
            Step::Undo => "undo",
            Step::Redo => "redo",
            Step::Clear => "clear",
            Step::Save => "save",
            Step::Load { .. } => "load",
            Step::Resize { .. } => "resize",
            Step::Settle => "settle",
        }
    }
}

/// A parsed script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub steps: Vec<Step>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

/// Summary of a completed replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    /// Steps executed
    pub steps: usize,
    /// `save` steps and toolbar save clicks
    pub saves: usize,
}

impl Script {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps,
            base_dir: None,
        }
    }

    /// Parses a script from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a script file. Relative `load` paths are resolved against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut script = Self::from_json(&json)?;
        script.base_dir = path.parent().map(Path::to_path_buf);
        log::info!(
            "Loaded script {} ({} steps)",
            path.display(),
            script.steps.len()
        );
        Ok(script)
    }

    /// Replays every step against `surface`, then waits for pending decodes.
    ///
    /// Stops at the first failing step.
    pub fn run(&self, surface: &mut SketchSurface) -> Result<ScriptReport, ScriptError> {
        let mut report = ScriptReport::default();

        for (index, step) in self.steps.iter().enumerate() {
            log::debug!("Script step {index}: {}", step.name());
            let wrap = |source| ScriptError::Step {
                index,
                action: step.name(),
                source,
            };

            match step {
                Step::Pointer { kind, x, y } => {
                    surface.handle_pointer(PointerEvent::new(*kind, *x, *y));
                }
                Step::Mouse {
                    kind,
                    client_x,
                    client_y,
                } => {
                    surface.handle_mouse(MouseEvent::new(*kind, *client_x, *client_y));
                }
                Step::Touch { phase, touches } => {
                    surface.handle_touch(TouchEvent {
                        phase: *phase,
                        touches: touches.clone(),
                    });
                }
                Step::Color { color } => {
                    let resolved = color.to_color().ok_or_else(|| ScriptError::InvalidColor {
                        index,
                        color: color.clone(),
                    })?;
                    surface.set_line_color(resolved);
                }
                Step::Width { width } => surface.set_line_width(*width),
                Step::Click { control } => {
                    surface.activate(*control).map_err(wrap)?;
                    if *control == Control::Save {
                        report.saves += 1;
                    }
                }
                Step::Undo => surface.undo().map_err(wrap)?,
                Step::Redo => surface.redo().map_err(wrap)?,
                Step::Clear => surface.clear().map_err(wrap)?,
                Step::Save => {
                    surface.save().map_err(wrap)?;
                    report.saves += 1;
                }
                Step::Load { path } => {
                    let path = self.resolve(path);
                    surface.load_image(path, None).map_err(wrap)?;
                }
                Step::Resize { width, height } => {
                    surface.resize(*width, *height).map_err(wrap)?;
                }
                Step::Settle => {
                    surface.settle();
                }
            }
            report.steps += 1;
        }

        surface.settle();
        log::info!(
            "Script finished: {} steps, {} saves",
            report.steps,
            report.saves
        );
        Ok(report)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}
