//! Atlas demo
//!
//! Builds a glyph atlas from a config file, writes the atlas image to disk
//! and lays out a sample string against it.
//!
//! Usage: `atlas_demo [config.toml|config.ron]`

use std::sync::Arc;

use text_engine::prelude::*;
use text_engine::render::text::RegisteredEncoding;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error("Failed to write atlas image: {0}")]
    Io(#[from] std::io::Error),
}

const DEFAULT_CONFIG_PATH: &str = "atlas_demo.toml";

fn load_config(path: &str) -> Result<TextConfig, DemoError> {
    if std::path::Path::new(path).exists() {
        log::info!("Loading config from {}", path);
        Ok(TextConfig::load_from_file(path)?)
    } else {
        log::warn!("Config {} not found, using defaults", path);
        Ok(TextConfig::default())
    }
}

fn load_face(config: &FontConfig) -> FontResult<FontdueFace> {
    let descriptor = config.descriptor();
    match &config.path {
        Some(path) => FontdueFace::from_file(path, descriptor),
        None => FontLibrary::with_system_fonts().resolve(&descriptor),
    }
}

fn run(config_path: &str) -> Result<(), DemoError> {
    let config = load_config(config_path)?;
    let mut backend = HeadlessBackend::new();

    let face = load_face(&config.font)?;
    let encoding: RegisteredEncoding = EncodingRegistry::resolve(&config.atlas.encoding)?;
    let atlas = GlyphAtlasBuilder::from_config(&config.atlas).build_with_encoding(&face, &encoding, &mut backend)?;
    log::info!(
        "Atlas: {} glyphs, {}x{} px, baseline at row {}, {} PNG bytes",
        atlas.len(),
        atlas.width(),
        atlas.height(),
        atlas.ascent(),
        atlas.png_bytes().len()
    );

    if let Some(output) = &config.output_path {
        std::fs::write(output, atlas.png_bytes())?;
        log::info!("Atlas image written to {}", output.display());
    }

    let atlas = Arc::new(atlas);
    let mut item = TextItem::new(config.demo_text.clone(), Arc::clone(&atlas), &mut backend)?;
    log_item(&item)?;

    let reversed: String = config.demo_text.chars().rev().collect();
    item.set_text(reversed, &mut backend)?;
    log_item(&item)?;

    item.release(&mut backend);
    Ok(())
}

fn log_item(item: &TextItem) -> FontResult<()> {
    let bounds = item.bounds()?;
    if let Some(mesh) = item.mesh() {
        log::info!(
            "Text {:?}: {} vertices, {} triangles, {}x{} px",
            item.text(),
            mesh.vertex_count(),
            mesh.triangle_count(),
            bounds.width,
            bounds.height
        );
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    text_engine::foundation::logging::init_with_level(log::LevelFilter::Info);

    let config_path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    log::info!("Starting atlas demo");

    match run(&config_path) {
        Ok(()) => {
            log::info!("Atlas demo finished successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Atlas demo failed: {}", e);
            Err(e.into())
        }
    }
}
