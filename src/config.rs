//! qrforge runtime configuration handling

use crate::error::{Error, Result};
use crate::render::{DotStyle, LogoOptions, LogoShape, RenderOptions, SIZE_MAX, SIZE_MIN, color};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrforgeConfig {
    /// Render option defaults
    pub render: RenderDefaults,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrforgeConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrforge.toml / qrforge.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrforge.toml", "qrforge.yaml", "qrforge.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrforge");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.render.apply_env_overrides();
        self.logging.apply_env_overrides();
    }

    /// Produce fully resolved render options (logo loading happens separately).
    pub fn render_options(&self) -> Result<RenderOptions> {
        self.render.to_render_options()
    }
}

/// User-friendly render overrides merged on top of `RenderOptions::default()`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderDefaults {
    /// Override for output size in pixels (100-500).
    pub size: Option<u32>,
    /// Override for the module color (hex, e.g. `#000000`).
    pub foreground: Option<String>,
    /// Override for the background color (hex, e.g. `#ffffff`).
    pub background: Option<String>,
    /// Override for the dot style (square/dots/rounded/extra-rounded).
    pub dot_style: Option<String>,
    /// Default logo file to overlay, if any.
    pub logo: Option<PathBuf>,
    /// Override for the logo patch margin in pixels.
    pub logo_margin: Option<u32>,
    /// Override for the relative logo size (fraction of output width).
    pub logo_scale: Option<f32>,
    /// Override for the logo patch shape (circle/square/none).
    pub logo_shape: Option<String>,
}

impl RenderDefaults {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(size) = env::var("QRFORGE_SIZE") {
            if let Ok(parsed) = size.parse::<u32>() {
                self.size = Some(parsed);
            }
        }
        if let Ok(fg) = env::var("QRFORGE_FG") {
            self.foreground = Some(fg);
        }
        if let Ok(bg) = env::var("QRFORGE_BG") {
            self.background = Some(bg);
        }
        if let Ok(style) = env::var("QRFORGE_DOT_STYLE") {
            self.dot_style = Some(style);
        }
        if let Ok(logo) = env::var("QRFORGE_LOGO") {
            if logo.trim().is_empty() {
                self.logo = None;
            } else {
                self.logo = Some(PathBuf::from(logo));
            }
        }
        if let Ok(margin) = env::var("QRFORGE_LOGO_MARGIN") {
            if let Ok(parsed) = margin.parse::<u32>() {
                self.logo_margin = Some(parsed);
            }
        }
        if let Ok(scale) = env::var("QRFORGE_LOGO_SCALE") {
            if let Ok(parsed) = scale.parse::<f32>() {
                self.logo_scale = Some(parsed);
            }
        }
        if let Ok(shape) = env::var("QRFORGE_LOGO_SHAPE") {
            self.logo_shape = Some(shape);
        }
    }

    /// Merge overrides onto the default render options.
    ///
    /// The logo file itself is not loaded here; `logo` only records which
    /// path to load. Size values outside 100-500 are clamped.
    pub fn to_render_options(&self) -> Result<RenderOptions> {
        let mut options = RenderOptions::default();

        if let Some(size) = self.size {
            options.size = size.clamp(SIZE_MIN, SIZE_MAX);
        }

        if let Some(fg) = &self.foreground {
            options.foreground = color::parse_hex(fg)?;
        }

        if let Some(bg) = &self.background {
            options.background = color::parse_hex(bg)?;
        }

        if let Some(style) = &self.dot_style {
            options.dot_style = DotStyle::from_str(style).map_err(Error::Config)?;
        }

        Ok(options)
    }

    /// Apply logo parameter overrides onto freshly loaded logo options.
    pub fn apply_logo_overrides(&self, mut logo: LogoOptions) -> Result<LogoOptions> {
        if let Some(margin) = self.logo_margin {
            logo = logo.with_margin(margin);
        }
        if let Some(scale) = self.logo_scale {
            logo = logo.with_scale(scale);
        }
        if let Some(shape) = &self.logo_shape {
            logo = logo.with_shape(LogoShape::from_str(shape).map_err(Error::Config)?);
        }
        Ok(logo)
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRFORGE_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRFORGE_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRFORGE_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRFORGE_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("QRFORGE_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}
