use std::collections::HashMap;

use itertools::Itertools;
use log::{debug, warn};
use macroquad::miniquad::{BlendFactor, BlendState, BlendValue, Equation, PipelineParams};
use macroquad::prelude::*;

use crate::host::{BlendMode, ImageRef, Layer, RenderHost, SpriteDraw};

const VERTEX_SHADER: &str = r#"#version 100
attribute vec3 position;
attribute vec2 texcoord;
attribute vec4 color0;

varying lowp vec2 uv;
varying lowp vec4 color;

uniform mat4 Model;
uniform mat4 Projection;

void main() {
    gl_Position = Projection * Model * vec4(position, 1);
    uv = texcoord;
    color = color0 / 255.0;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 100
varying lowp vec2 uv;
varying lowp vec4 color;

uniform sampler2D Texture;

void main() {
    gl_FragColor = color * texture2D(Texture, uv);
}
"#;

/// The real render host: named macroquad render targets, a preloaded texture
/// table, and a multiply-blend material for mask layers.
pub struct MacroquadHost {
    targets: HashMap<String, RenderTarget>,
    textures: HashMap<String, Texture2D>,
    pixel: Texture2D,
    multiply: Material,
}

impl MacroquadHost {
    pub fn new(textures: HashMap<String, Texture2D>) -> Result<MacroquadHost, macroquad::Error> {
        let pixel = Texture2D::from_rgba8(1, 1, &[255, 255, 255, 255]);
        // Source times destination, for both color and alpha: drawing with
        // this pipeline keeps only what the layers below already cover.
        let multiply = load_material(
            ShaderSource::Glsl {
                vertex: VERTEX_SHADER,
                fragment: FRAGMENT_SHADER,
            },
            MaterialParams {
                pipeline_params: PipelineParams {
                    color_blend: Some(BlendState::new(
                        Equation::Add,
                        BlendFactor::Value(BlendValue::DestinationColor),
                        BlendFactor::Zero,
                    )),
                    alpha_blend: Some(BlendState::new(
                        Equation::Add,
                        BlendFactor::Value(BlendValue::DestinationAlpha),
                        BlendFactor::Zero,
                    )),
                    ..Default::default()
                },
                ..Default::default()
            },
        )?;

        Ok(MacroquadHost {
            targets: HashMap::new(),
            textures,
            pixel,
            multiply,
        })
    }

    fn resolve(&self, image: &ImageRef) -> &Texture2D {
        match image {
            ImageRef::Pixel => &self.pixel,
            ImageRef::Target(name) => match self.targets.get(name) {
                Some(target) => &target.texture,
                None => {
                    warn!("no render target named {name}; drawing solid");
                    &self.pixel
                }
            },
            ImageRef::Path(path) => match self.textures.get(path) {
                Some(texture) => texture,
                None => {
                    warn!("no texture loaded for {path}; drawing solid");
                    &self.pixel
                }
            },
        }
    }
}

impl RenderHost for MacroquadHost {
    fn configure_target(&mut self, name: &str, w: f32, h: f32, layers: Vec<Layer>) {
        debug!(
            "target {name} ({w}x{h}): {}",
            layers.iter().map(|layer| &layer.image).join(", ")
        );

        let target = render_target(w as u32, h as u32);
        target.texture.set_filter(FilterMode::Nearest);

        let mut camera = Camera2D::from_display_rect(Rect::new(0.0, 0.0, w, h));
        camera.render_target = Some(target.clone());
        set_camera(&camera);
        clear_background(Color::new(0.0, 0.0, 0.0, 0.0));
        for layer in &layers {
            if layer.blend == BlendMode::Multiply {
                gl_use_material(&self.multiply);
            }
            draw_texture_ex(
                self.resolve(&layer.image),
                layer.x,
                layer.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(layer.w, layer.h)),
                    rotation: layer.angle.to_radians(),
                    ..Default::default()
                },
            );
            if layer.blend == BlendMode::Multiply {
                gl_use_default_material();
            }
        }
        set_default_camera();

        self.targets.insert(name.to_string(), target);
    }

    fn draw_sprites(&mut self, sprites: &[SpriteDraw]) {
        for sprite in sprites {
            draw_texture_ex(
                self.resolve(&sprite.image),
                sprite.x,
                sprite.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(sprite.w, sprite.h)),
                    rotation: sprite.angle.to_radians(),
                    ..Default::default()
                },
            );
        }
    }
}
