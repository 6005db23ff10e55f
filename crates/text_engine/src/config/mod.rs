//! Configuration system

use std::path::PathBuf;

pub use serde::{Serialize, Deserialize};

use crate::render::text::{FontDescriptor, FontStyle};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Font selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Family name looked up in the system font database
    pub family: String,
    /// Bold face
    pub bold: bool,
    /// Italic face
    pub italic: bool,
    /// Pixel size
    pub size: f32,
    /// Load the face from this file instead of the system database
    pub path: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "DejaVu Sans".to_string(),
            bold: false,
            italic: false,
            size: 24.0,
            path: None,
        }
    }
}

impl FontConfig {
    /// Descriptor for this font selection
    pub fn descriptor(&self) -> FontDescriptor {
        let mut style = FontStyle::PLAIN;
        style.set(FontStyle::BOLD, self.bold);
        style.set(FontStyle::ITALIC, self.italic);
        FontDescriptor::new(self.family.clone(), style, self.size)
    }
}

/// Atlas construction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Encoding label (WHATWG names such as `windows-1252`, `utf-8`, `koi8-r`)
    pub encoding: String,
    /// RGBA colour glyphs are drawn in
    pub foreground: [u8; 4],
    /// Leave out code points the font has no glyph for
    pub skip_missing_glyphs: bool,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            encoding: "windows-1252".to_string(),
            foreground: [255, 255, 255, 255],
            skip_missing_glyphs: false,
        }
    }
}

/// Top-level configuration for atlas tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Font selection
    pub font: FontConfig,
    /// Atlas settings
    pub atlas: AtlasConfig,
    /// Sample string turned into a mesh
    pub demo_text: String,
    /// Where the encoded atlas image is written
    pub output_path: Option<PathBuf>,
}

impl Config for TextConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: TextConfig = toml::from_str(
            r#"
            demo_text = "Score: 100"

            [atlas]
            encoding = "koi8-r"
            "#,
        )
        .unwrap();

        assert_eq!(config.demo_text, "Score: 100");
        assert_eq!(config.atlas.encoding, "koi8-r");
        assert_eq!(config.atlas.foreground, [255, 255, 255, 255]);
        assert_eq!(config.font, FontConfig::default());
    }

    #[test]
    fn test_font_config_descriptor_style() {
        let font = FontConfig {
            bold: true,
            italic: true,
            ..Default::default()
        };
        let descriptor = font.descriptor();
        assert!(descriptor.style.contains(FontStyle::BOLD | FontStyle::ITALIC));
        assert_eq!(descriptor.family, "DejaVu Sans");
    }

    #[test]
    fn test_save_and_load_round_trip_through_ron() {
        let path = std::env::temp_dir().join(format!("text_engine_config_{}.ron", std::process::id()));
        let path = path.to_string_lossy().to_string();

        let mut config = TextConfig::default();
        config.atlas.skip_missing_glyphs = true;
        config.save_to_file(&path).unwrap();

        let loaded = TextConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(loaded.atlas.skip_missing_glyphs);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = TextConfig::default().save_to_file("config.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
