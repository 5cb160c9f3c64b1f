pub const MOVE_STEP: f32 = 5.0;

pub const RED_SPRITE: &str = "sprites/square/red.png";
pub const BLUE_SPRITE: &str = "sprites/square/blue.png";
pub const GREEN_SPRITE: &str = "sprites/square/green.png";
