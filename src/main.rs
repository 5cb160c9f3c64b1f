mod backend;
mod circle;
mod config;
mod geometry;
mod host;
mod logger;
mod mask;
mod resources;

use log::{error, info, LevelFilter};
use macroquad::prelude::*;

use crate::backend::MacroquadHost;
use crate::circle::{Attrs, CircleFactory};
use crate::config::{BLUE_SPRITE, GREEN_SPRITE, MOVE_STEP, RED_SPRITE};
use crate::geometry::{intersect, Aabb, Collider, DEFAULT_TOLERANCE};
use crate::host::{ImageRef, RenderHost, SpriteDraw};
use crate::resources::Resources;

struct Square {
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    angle: f32,
    path: String,
}

impl Square {
    fn collider(&self) -> Collider {
        Collider::Rect(Aabb {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
        })
    }

    fn sprite(&self) -> SpriteDraw {
        SpriteDraw {
            x: self.x,
            y: self.y,
            w: self.w,
            h: self.h,
            image: ImageRef::Path(self.path.clone()),
            angle: self.angle,
        }
    }
}

#[macroquad::main("Roundel")]
async fn main() {
    logger::init(LevelFilter::Info);

    let resources = match Resources::load(&[RED_SPRITE, BLUE_SPRITE, GREEN_SPRITE]).await {
        Ok(resources) => resources,
        Err(err) => {
            error!("failed to load textures: {err:?}");
            return;
        }
    };
    let mut host = match MacroquadHost::new(resources.textures) {
        Ok(host) => host,
        Err(err) => {
            error!("failed to set up the render host: {err:?}");
            return;
        }
    };

    let mut factory = CircleFactory::new();
    let mut circle = factory.create(
        &mut host,
        Attrs::new()
            .set("x", 0.0)
            .set("y", 0.0)
            .set("w", 300.0)
            .set("h", 300.0)
            .set("path", RED_SPRITE),
    );
    let mut square = Square {
        x: 640.0,
        y: 0.0,
        w: 300.0,
        h: 300.0,
        angle: 0.0,
        path: RED_SPRITE.to_string(),
    };
    let mut ellipse = factory.create(
        &mut host,
        Attrs::new()
            .set("x", 640.0)
            .set("y", 600.0)
            .set("w", 640.0)
            .set("h", 120.0)
            .set("path", RED_SPRITE),
    );
    info!("{} circles ready", factory.created());

    let mut ticks: u32 = 0;
    loop {
        clear_background(BLACK);

        circle.angle = ticks as f32;
        square.angle = ticks as f32;
        ellipse.angle = ticks as f32;

        if is_key_down(KeyCode::Right) {
            circle.x += MOVE_STEP;
        } else if is_key_down(KeyCode::Left) {
            circle.x -= MOVE_STEP;
        } else if is_key_down(KeyCode::Up) {
            circle.y += MOVE_STEP;
        } else if is_key_down(KeyCode::Down) {
            circle.y -= MOVE_STEP;
        }

        // Circle against the plain square through the free function, circle
        // against the flat ellipse through the method wrapper.
        if intersect(
            Some(&circle.collider()),
            Some(&square.collider()),
            DEFAULT_TOLERANCE,
        ) == Some(true)
        {
            circle.set_path(&mut host, BLUE_SPRITE);
            square.path = BLUE_SPRITE.to_string();
        } else if circle.collider().intersects(&ellipse.collider()) == Some(true) {
            circle.set_path(&mut host, GREEN_SPRITE);
            ellipse.set_path(&mut host, GREEN_SPRITE);
        } else {
            circle.set_path(&mut host, RED_SPRITE);
            square.path = RED_SPRITE.to_string();
            ellipse.set_path(&mut host, RED_SPRITE);
        }

        host.draw_sprites(&[circle.sprite(), square.sprite(), ellipse.sprite()]);

        ticks = ticks.wrapping_add(1);
        next_frame().await
    }
}
