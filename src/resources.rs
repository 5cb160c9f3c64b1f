use std::collections::HashMap;

use itertools::Itertools;
use log::info;
use macroquad::prelude::*;

pub struct Resources {
    pub textures: HashMap<String, Texture2D>,
}

impl Resources {
    pub async fn load(paths: &[&str]) -> Result<Resources, macroquad::Error> {
        info!("loading textures: {}", paths.iter().join(", "));

        let mut textures = HashMap::new();
        for path in paths {
            let texture: Texture2D = load_texture(path).await?;
            texture.set_filter(FilterMode::Nearest);
            textures.insert((*path).to_string(), texture);
        }

        Ok(Resources { textures })
    }
}
