use super::svg_path::{parse_svg_path, path_bounds};
use super::types::{BBox, DVec2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global shape ID counter
static NEXT_SHAPE_ID: AtomicU64 = AtomicU64::new(1);

fn generate_shape_id() -> u64 {
    NEXT_SHAPE_ID.fetch_add(1, Ordering::Relaxed)
}

/// The five kinds of object the toolbar can place
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    TextBox,
    Path,
    Image,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Circle,
        ShapeKind::TextBox,
        ShapeKind::Path,
        ShapeKind::Image,
    ];

    /// Position in `ALL`, for fixed-size per-kind tables
    pub const fn index(self) -> usize {
        match self {
            ShapeKind::Rectangle => 0,
            ShapeKind::Circle => 1,
            ShapeKind::TextBox => 2,
            ShapeKind::Path => 3,
            ShapeKind::Image => 4,
        }
    }

    /// Short type name shown in the properties panel
    pub fn type_name(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
            ShapeKind::TextBox => "textbox",
            ShapeKind::Path => "path",
            ShapeKind::Image => "image",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Intrinsic geometry of a shape, before scaling
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    Rectangle { width: f64, height: f64 },

    Circle { radius: f64 },

    TextBox { text: String, width: f64, height: f64 },

    /// SVG path data; `origin` is the top-left of the outline in path space
    Path { data: String, origin: DVec2, size: DVec2 },

    /// Decoded bitmap, identified by its source URL
    Image { url: String, width: f64, height: f64 },
}

impl ShapeGeometry {
    pub fn rectangle(width: f64, height: f64) -> Self {
        Self::Rectangle { width, height }
    }

    pub fn circle(radius: f64) -> Self {
        Self::Circle { radius }
    }

    pub fn text_box(text: impl Into<String>, width: f64, height: f64) -> Self {
        Self::TextBox {
            text: text.into(),
            width,
            height,
        }
    }

    /// Path geometry measured from its own outline
    pub fn path(data: impl Into<String>) -> Self {
        let data = data.into();
        let bounds = path_bounds(&parse_svg_path(&data)).unwrap_or_default();
        Self::Path {
            data,
            origin: bounds.min,
            size: bounds.size(),
        }
    }

    pub fn image(url: impl Into<String>, width: f64, height: f64) -> Self {
        Self::Image {
            url: url.into(),
            width,
            height,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeGeometry::Rectangle { .. } => ShapeKind::Rectangle,
            ShapeGeometry::Circle { .. } => ShapeKind::Circle,
            ShapeGeometry::TextBox { .. } => ShapeKind::TextBox,
            ShapeGeometry::Path { .. } => ShapeKind::Path,
            ShapeGeometry::Image { .. } => ShapeKind::Image,
        }
    }

    /// Unscaled width and height. A circle is `2 * radius` on both axes.
    pub fn intrinsic_size(&self) -> DVec2 {
        match self {
            ShapeGeometry::Rectangle { width, height }
            | ShapeGeometry::TextBox { width, height, .. }
            | ShapeGeometry::Image { width, height, .. } => DVec2::new(*width, *height),
            ShapeGeometry::Circle { radius } => DVec2::splat(radius * 2.0),
            ShapeGeometry::Path { size, .. } => *size,
        }
    }
}

/// A placed object on the canvas
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Unique identifier
    pub id: u64,

    pub geometry: ShapeGeometry,

    /// Top-left corner of the bounding box (`left`, `top`)
    pub position: DVec2,

    /// Horizontal and vertical scale applied on top of the intrinsic size
    pub scale: DVec2,

    /// CSS fill color; images have none
    pub fill: Option<String>,

    /// Cached interaction bounds, refreshed by `set_coords`
    coords: BBox,
}

impl Shape {
    /// Create a shape at the origin with unit scale
    pub fn new(geometry: ShapeGeometry, fill: Option<String>) -> Self {
        let mut shape = Self {
            id: generate_shape_id(),
            geometry,
            position: DVec2::ZERO,
            scale: DVec2::ONE,
            fill,
            coords: BBox::default(),
        };
        shape.set_coords();
        shape
    }

    pub fn with_position(mut self, position: DVec2) -> Self {
        self.position = position;
        self.set_coords();
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    pub fn left(&self) -> f64 {
        self.position.x
    }

    pub fn top(&self) -> f64 {
        self.position.y
    }

    pub fn intrinsic_size(&self) -> DVec2 {
        self.geometry.intrinsic_size()
    }

    /// On-screen size: intrinsic size times scale
    pub fn effective_size(&self) -> DVec2 {
        self.intrinsic_size() * self.scale
    }

    pub fn radius(&self) -> Option<f64> {
        match self.geometry {
            ShapeGeometry::Circle { radius } => Some(radius),
            _ => None,
        }
    }

    /// Change a circle's radius. Returns false for every other kind.
    pub fn set_radius(&mut self, value: f64) -> bool {
        match &mut self.geometry {
            ShapeGeometry::Circle { radius } => {
                *radius = value;
                true
            }
            _ => false,
        }
    }

    /// Interaction bounds as of the last `set_coords`
    pub fn coords(&self) -> BBox {
        self.coords
    }

    /// Recompute interaction bounds from the current geometry. Must follow any
    /// mutation so hit-testing and dragging see the new shape.
    pub fn set_coords(&mut self) {
        self.coords = BBox::from_origin_size(self.position, self.effective_size());
    }

    pub fn contains_point(&self, point: DVec2) -> bool {
        if !self.coords.contains(point) {
            return false;
        }

        match self.geometry {
            ShapeGeometry::Circle { .. } => {
                // Scaled circles are ellipses
                let half = self.coords.size() * 0.5;
                if half.x <= 0.0 || half.y <= 0.0 {
                    return false;
                }
                let local = (point - self.coords.min - half) / half;
                local.length_squared() <= 1.0
            }
            _ => true,
        }
    }
}
