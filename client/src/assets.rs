//! Texture preloading.

use log::{info, warn};
use macroquad::prelude::*;

const ASSET_COUNT: usize = 3;

pub struct Assets {
    pub jet_left: Option<Texture2D>,
    pub jet_right: Option<Texture2D>,
    pub background: Option<Texture2D>,
}

impl Assets {
    /// Loads every texture up front, counting what made it. A missing file
    /// is logged and leaves its slot empty; the renderer falls back to
    /// primitive shapes rather than failing the client.
    pub async fn load() -> Self {
        let mut loaded = 0usize;
        let jet_left = load_or_warn("assets/jet_left.png", &mut loaded).await;
        let jet_right = load_or_warn("assets/jet_right.png", &mut loaded).await;
        let background = load_or_warn("assets/clouds.png", &mut loaded).await;
        info!("{}/{} textures ready", loaded, ASSET_COUNT);
        Assets {
            jet_left,
            jet_right,
            background,
        }
    }
}

async fn load_or_warn(path: &str, loaded: &mut usize) -> Option<Texture2D> {
    match load_texture(path).await {
        Ok(texture) => {
            *loaded += 1;
            Some(texture)
        }
        Err(e) => {
            warn!("could not load {}: {:?}", path, e);
            None
        }
    }
}
