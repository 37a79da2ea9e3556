use crate::config::{DEFAULT_COLOR, FALLBACK_SIZE};
use crate::scene::{Shape, ShapeKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editable property of the selected shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Property {
    Color,
    Top,
    Left,
    Width,
    Height,
    Radius,
}

impl Property {
    pub fn name(&self) -> &'static str {
        match self {
            Property::Color => "color",
            Property::Top => "top",
            Property::Left => "left",
            Property::Width => "width",
            Property::Height => "height",
            Property::Radius => "radius",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What `apply_property` did with an edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertyOutcome {
    /// The selected shape was changed
    Applied,
    /// The edit is not supported for this shape; the alert is raised
    Unsupported,
    /// Nothing to do: no canvas, no selection, or not applicable to the kind
    Ignored,
}

/// UI-facing copy of the selected shape's editable values. Always derived
/// from the shape, never edited on its own.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertySnapshot {
    pub kind: Option<ShapeKind>,
    pub color: String,
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
}

impl Default for PropertySnapshot {
    fn default() -> Self {
        Self {
            kind: None,
            color: DEFAULT_COLOR.to_string(),
            top: 0.0,
            left: 0.0,
            width: FALLBACK_SIZE,
            height: FALLBACK_SIZE,
            radius: 0.0,
        }
    }
}

impl PropertySnapshot {
    pub fn from_shape(shape: &Shape) -> Self {
        let size = shape.effective_size();
        Self {
            kind: Some(shape.kind()),
            color: shape.fill.clone().unwrap_or_default(),
            top: shape.top(),
            left: shape.left(),
            width: size.x,
            height: size.y,
            radius: shape.radius().unwrap_or(0.0),
        }
    }

    pub fn has_selection(&self) -> bool {
        self.kind.is_some()
    }

    pub fn value(&self, property: Property) -> String {
        match property {
            Property::Color => self.color.clone(),
            Property::Top => format_number(self.top),
            Property::Left => format_number(self.left),
            Property::Width => format_number(self.width),
            Property::Height => format_number(self.height),
            Property::Radius => format_number(self.radius),
        }
    }
}

/// Parse a form field as a finite number
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Number as shown in a form field: at most two decimals, no trailing zeros
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // Avoid "-0"
        return "0".to_string();
    }
    rounded.to_string()
}
