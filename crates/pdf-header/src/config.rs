use crate::constants::*;
use crate::position::{Position, Preset};
use crate::types::*;
use crate::units::{clamp_ratio, clamp_unit, normalize_hex};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Persisted header configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    // Text composition
    pub use_filename: bool,
    pub use_prefix: bool,
    pub prefix_text: String,
    pub use_suffix: bool,
    pub suffix_text: String,
    pub use_custom: bool,
    pub custom_text: String,
    pub use_date: bool,
    pub date_position: DatePosition,
    pub date_source: DateSource,
    pub date_format: String,

    // Typography
    pub font_family: String,
    pub font_file: Option<PathBuf>,
    pub font_size: f32,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub letter_spacing: f32,
    pub line_spacing: f32,
    pub color_hex: String,

    // Position
    pub preset_position: String,
    pub margin_x_pt: f32,
    pub margin_y_pt: f32,
    pub last_x_ratio: f32,
    pub last_y_ratio: f32,

    pub rotation: Rotation,

    // Frame
    pub use_frame: bool,
    pub frame_color: String,
    pub frame_width: f32,
    pub frame_style: FrameStyle,
    pub frame_padding: f32,
    pub frame_opacity: f32,

    // Background
    pub use_bg: bool,
    pub bg_color: String,
    pub bg_opacity: f32,

    pub all_pages: bool,

    /// Keys this version does not know about, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            use_filename: true,
            use_prefix: false,
            prefix_text: String::new(),
            use_suffix: false,
            suffix_text: String::new(),
            use_custom: false,
            custom_text: String::new(),
            use_date: false,
            date_position: DatePosition::Suffix,
            date_source: DateSource::Today,
            date_format: FALLBACK_DATE_FORMAT.to_string(),
            font_family: "Helvetica".to_string(),
            font_file: None,
            font_size: 8.0,
            bold: false,
            italic: false,
            underline: false,
            letter_spacing: 0.0,
            line_spacing: 1.2,
            color_hex: "#FF0000".to_string(),
            preset_position: "custom".to_string(),
            margin_x_pt: DEFAULT_MARGIN_PT,
            margin_y_pt: DEFAULT_MARGIN_PT,
            last_x_ratio: DEFAULT_X_RATIO,
            last_y_ratio: DEFAULT_Y_RATIO,
            rotation: Rotation::None,
            use_frame: false,
            frame_color: "#FF0000".to_string(),
            frame_width: 1.0,
            frame_style: FrameStyle::Solid,
            frame_padding: 3.0,
            frame_opacity: 1.0,
            use_bg: false,
            bg_color: "#FFFFFF".to_string(),
            bg_opacity: 0.8,
            all_pages: true,
            extra: Map::new(),
        }
    }
}

impl HeaderConfig {
    /// Parse a config document, migrating the legacy schema and clamping values
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| HeaderError::Config(format!("Failed to parse config: {}", e)))?;
        let value = migrate_legacy(value);
        let mut config: HeaderConfig = serde_json::from_value(value)
            .map_err(|e| HeaderError::Config(format!("Failed to parse config: {}", e)))?;
        config.normalize();
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HeaderError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load options from JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&text)
    }

    /// Load the config, or the defaults when it is missing or unreadable
    pub async fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path).await {
            Ok(config) => {
                log::debug!("Loaded config from {}", path.display());
                config
            }
            Err(HeaderError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save options to JSON file
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Clamp every numeric field into its valid range and canonicalize colors
    pub fn normalize(&mut self) {
        self.font_size = clamp_or(self.font_size, MIN_FONT_SIZE, MAX_FONT_SIZE, 8.0);
        self.line_spacing = clamp_or(self.line_spacing, MIN_LINE_SPACING, MAX_LINE_SPACING, 1.2);
        self.letter_spacing =
            clamp_or(self.letter_spacing, MIN_LETTER_SPACING, MAX_LETTER_SPACING, 0.0);
        self.margin_x_pt = clamp_or(self.margin_x_pt, 0.0, f32::MAX, DEFAULT_MARGIN_PT);
        self.margin_y_pt = clamp_or(self.margin_y_pt, 0.0, f32::MAX, DEFAULT_MARGIN_PT);
        self.last_x_ratio = clamp_ratio(self.last_x_ratio);
        self.last_y_ratio = clamp_ratio(self.last_y_ratio);
        self.frame_width = clamp_or(self.frame_width, 0.0, 20.0, 1.0);
        self.frame_padding = clamp_or(self.frame_padding, 0.0, 100.0, 3.0);
        self.frame_opacity = clamp_unit(self.frame_opacity);
        self.bg_opacity = clamp_unit(self.bg_opacity);

        self.color_hex = normalize_hex(&self.color_hex, "#FF0000");
        self.frame_color = normalize_hex(&self.frame_color, "#FF0000");
        self.bg_color = normalize_hex(&self.bg_color, "#FFFFFF");

        if self.preset_position != "custom" && Preset::from_key(&self.preset_position).is_none() {
            log::warn!(
                "Unknown preset '{}', using the stored position",
                self.preset_position
            );
            self.preset_position = "custom".to_string();
        }
    }

    /// Change the font size by `delta`, staying within [4, 72]
    pub fn step_font_size(&mut self, delta: i32) {
        self.font_size = (self.font_size.round() + delta as f32).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
    }

    /// The anchor described by the position fields
    pub fn position(&self) -> Position {
        match Preset::from_key(&self.preset_position) {
            Some(preset) => Position::Preset {
                preset,
                margin_x_pt: self.margin_x_pt,
                margin_y_pt: self.margin_y_pt,
            },
            None => Position::Manual {
                rx: self.last_x_ratio,
                ry: self.last_y_ratio,
            },
        }
    }

    /// Store a position; `resolved` is the ratio it had on the last page seen
    pub fn set_position(&mut self, position: &Position, resolved: crate::position::Ratio) {
        self.preset_position = position.key().to_string();
        if let Position::Preset {
            margin_x_pt,
            margin_y_pt,
            ..
        } = *position
        {
            self.margin_x_pt = margin_x_pt.max(0.0);
            self.margin_y_pt = margin_y_pt.max(0.0);
        }
        self.last_x_ratio = clamp_ratio(resolved.x);
        self.last_y_ratio = clamp_ratio(resolved.y);
    }
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Rewrite the legacy flat `text_mode` schema into the toggle fields.
///
/// Legacy documents look like `{"text_mode": "prefixe", "prefixe": "X", ...}`.
/// A document that already has `use_filename` is left alone.
pub fn migrate_legacy(value: Value) -> Value {
    let Value::Object(mut map) = value else {
        return value;
    };
    if map.contains_key("use_filename") {
        return Value::Object(map);
    }
    let Some(mode) = map.remove("text_mode") else {
        return Value::Object(map);
    };

    let take = |map: &mut Map<String, Value>, key: &str| -> String {
        match map.remove(key) {
            Some(Value::String(s)) => s,
            _ => String::new(),
        }
    };
    let prefix = take(&mut map, "prefixe");
    let suffix = take(&mut map, "suffixe");
    let custom = take(&mut map, "custom");

    let mode = mode.as_str().unwrap_or("nom").to_string();
    log::info!("Migrating legacy config (text_mode = {})", mode);

    let (use_filename, use_prefix, use_suffix, use_custom) = match mode.as_str() {
        "prefixe" => (true, !prefix.is_empty(), false, false),
        "suffixe" => (true, false, !suffix.is_empty(), false),
        "custom" if !custom.trim().is_empty() => (false, false, false, true),
        _ => (true, false, false, false),
    };

    map.insert("use_filename".into(), Value::Bool(use_filename));
    map.insert("use_prefix".into(), Value::Bool(use_prefix));
    map.insert("prefix_text".into(), Value::String(prefix));
    map.insert("use_suffix".into(), Value::Bool(use_suffix));
    map.insert("suffix_text".into(), Value::String(suffix));
    map.insert("use_custom".into(), Value::Bool(use_custom));
    map.insert("custom_text".into(), Value::String(custom));

    Value::Object(map)
}

/// Default config location: beside the executable, unless overridden
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_FILE_NAME)
}
