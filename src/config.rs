use serde::{Deserialize, Serialize};

pub const CANVAS_WIDTH: f64 = 1000.0;
pub const CANVAS_HEIGHT: f64 = 500.0;

/// Effective size used when a width/height edit is not a positive number
pub const FALLBACK_SIZE: f64 = 50.0;

pub const IMAGE_URL: &str = "https://image.civitai.com/xG1nkqKTMzGDvpLrqFT7WA/f3eecd58-cb2b-44ff-8947-9ba3f11ac923/width=100/00038-3630244499.jpeg";

pub const PALETTE: [&str; 5] = ["red", "white", "black", "green", "blue"];

pub const DEFAULT_COLOR: &str = "red";

/// Static settings of the editor. The app runs with `EditorConfig::default()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub image_url: String,
    pub palette: Vec<String>,
    pub default_color: String,
    pub fallback_size: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            image_url: IMAGE_URL.to_string(),
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
            default_color: DEFAULT_COLOR.to_string(),
            fallback_size: FALLBACK_SIZE,
        }
    }
}
