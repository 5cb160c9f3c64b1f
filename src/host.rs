use std::fmt;

/// Something a layer or sprite can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// Builtin 1x1 solid white, scaled to the draw bounds.
    Pixel,
    /// A previously configured render target, drawn as a sprite.
    Target(String),
    /// An image file.
    Path(String),
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRef::Pixel => write!(f, "pixel"),
            ImageRef::Target(name) => write!(f, "target:{name}"),
            ImageRef::Path(path) => write!(f, "{path}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Ordinary alpha-over compositing.
    Alpha,
    /// Output color and alpha are the source multiplied by what is already
    /// in the target. Drawing an image with this mode on top of a silhouette
    /// clips the image to the silhouette.
    Multiply,
}

/// One entry in a render target's ordered layer list.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub image: ImageRef,
    pub angle: f32,
    pub blend: BlendMode,
}

/// One entry in a frame's batched draw list. `angle` is in degrees and is
/// cosmetic only.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteDraw {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub image: ImageRef,
    pub angle: f32,
}

/// The rendering engine, seen from the primitive's side: a registry of named
/// reusable targets plus a per-frame draw list. Targets can be referenced as
/// images by later targets and by sprites.
pub trait RenderHost {
    /// Create the named target, or fully replace it if it already exists.
    /// Layers are drawn in order.
    fn configure_target(&mut self, name: &str, w: f32, h: f32, layers: Vec<Layer>);

    /// Queue this frame's sprites in draw order.
    fn draw_sprites(&mut self, sprites: &[SpriteDraw]);
}

#[cfg(test)]
pub use self::recording::{RecordedTarget, RecordingHost};
