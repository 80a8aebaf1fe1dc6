//! Control objects - widgets the backend draws on top of the map.

use serde::Deserialize;

use super::registry::allocate_control_id;
use crate::types::ControlId;

/// Options for the full-screen toggle.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FullScreenOptions {
    /// Button text while the map is not full-screen.
    pub label: String,
    /// Button text while the map is full-screen.
    pub label_active: String,
    /// Tooltip.
    pub tip: String,
}

impl Default for FullScreenOptions {
    fn default() -> Self {
        Self {
            label: "\u{2922}".to_string(),
            label_active: "\u{00d7}".to_string(),
            tip: "Toggle full-screen".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleUnits {
    #[default]
    Metric,
    Imperial,
    Nautical,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    FullScreen(FullScreenOptions),
    Zoom {
        #[serde(default = "ControlKind::default_zoom_delta")]
        delta: f64,
    },
    ScaleLine {
        #[serde(default)]
        units: ScaleUnits,
    },
    Attribution {
        #[serde(default = "ControlKind::default_collapsible")]
        collapsible: bool,
    },
}

impl ControlKind {
    fn default_zoom_delta() -> f64 {
        1.0
    }

    fn default_collapsible() -> bool {
        true
    }

    pub fn name(&self) -> &'static str {
        match self {
            ControlKind::FullScreen(_) => "full_screen",
            ControlKind::Zoom { .. } => "zoom",
            ControlKind::ScaleLine { .. } => "scale_line",
            ControlKind::Attribution { .. } => "attribution",
        }
    }
}

impl Default for ControlKind {
    fn default() -> Self {
        ControlKind::FullScreen(FullScreenOptions::default())
    }
}

/// A control object. Owned by the binder that built it until attached.
#[derive(Debug)]
pub struct Control {
    id: ControlId,
    kind: ControlKind,
}

impl Control {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            id: allocate_control_id(),
            kind,
        }
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }
}
