use log::info;

use crate::host::{BlendMode, ImageRef, Layer, RenderHost};

/// Name under which the shared circular mask target is registered.
pub const MASK_TARGET: &str = "circle";
/// Side length of the mask canvas.
pub const MASK_SIZE: f32 = 1280.0;

// A solid square whose diagonal equals the canvas side, offset so that it is
// centered on the canvas: side = 1280 / sqrt(2), offset = (1280 - side) / 2.
const SQUARE_SIDE: f32 = 905.0;
const SQUARE_OFFSET: f32 = 187.0;
const SQUARE_COUNT: u32 = 360;

/// Register the shared circular alpha mask: the union of 360 centered solid
/// squares swept through a quarter turn in quarter-degree steps, which covers
/// a disc with no visible gaps at this resolution. Callers invoke this once;
/// the target is never touched again afterwards.
pub fn build(host: &mut dyn RenderHost) {
    let squares = (0..SQUARE_COUNT)
        .map(|i| Layer {
            x: SQUARE_OFFSET,
            y: SQUARE_OFFSET,
            w: SQUARE_SIDE,
            h: SQUARE_SIDE,
            image: ImageRef::Pixel,
            angle: i as f32 / 4.0,
            blend: BlendMode::Alpha,
        })
        .collect();
    host.configure_target(MASK_TARGET, MASK_SIZE, MASK_SIZE, squares);
    info!("built the {MASK_SIZE}x{MASK_SIZE} circular mask from {SQUARE_COUNT} squares");
}
