//! Canvas-2d scene painting and sprite assets
//!
//! The sim never draws; this module turns a `GameState` into drawImage calls
//! on the 2D canvas context. Sprites are plain `HtmlImageElement`s and the
//! session is gated on every one of them having loaded; a failed sprite is
//! logged and blocks start.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::sim::{CollectibleKind, GameState, MoverKind, PowerUpKind, Rect};

/// Index into the sprite set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sprite {
    Background = 0,
    Whale,
    Octopus,
    Fish,
    Can,
    Barrel,
    SpeedBoost,
}

/// Sprite sources, in `Sprite` discriminant order
const SPRITE_SOURCES: [(Sprite, &str); 7] = [
    (Sprite::Background, "assets/blue_ocean.webp"),
    (Sprite::Whale, "assets/whale.png"),
    (Sprite::Octopus, "assets/octopus.png"),
    (Sprite::Fish, "assets/fish.png"),
    (Sprite::Can, "assets/trash.png"),
    (Sprite::Barrel, "assets/trash2.png"),
    (Sprite::SpeedBoost, "assets/speed_boost.png"),
];

fn sprite_for(kind: MoverKind) -> Sprite {
    match kind {
        MoverKind::Obstacle => Sprite::Octopus,
        MoverKind::Fish => Sprite::Fish,
        MoverKind::Collectible(CollectibleKind::Can) => Sprite::Can,
        MoverKind::Collectible(CollectibleKind::Barrel) => Sprite::Barrel,
        MoverKind::PowerUp(PowerUpKind::SpeedBoost) => Sprite::SpeedBoost,
    }
}

/// The sprite set, with load progress tracked so the game can gate on it
pub struct Assets {
    images: Vec<HtmlImageElement>,
    loaded: Rc<Cell<usize>>,
    failed: Rc<Cell<usize>>,
}

impl Assets {
    /// Kick off loading of every sprite
    pub fn load() -> Result<Self, JsValue> {
        let loaded = Rc::new(Cell::new(0usize));
        let failed = Rc::new(Cell::new(0usize));
        let mut images = Vec::with_capacity(SPRITE_SOURCES.len());

        for (_, src) in SPRITE_SOURCES {
            let image = HtmlImageElement::new()?;

            {
                let loaded = loaded.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    loaded.set(loaded.get() + 1);
                });
                image.add_event_listener_with_callback("load", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }
            {
                let failed = failed.clone();
                let src = src.to_string();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    log::error!("Failed to load sprite: {}", src);
                    failed.set(failed.get() + 1);
                });
                image
                    .add_event_listener_with_callback("error", closure.as_ref().unchecked_ref())?;
                closure.forget();
            }

            image.set_src(src);
            images.push(image);
        }

        Ok(Self {
            images,
            loaded,
            failed,
        })
    }

    /// True once every sprite has loaded
    pub fn ready(&self) -> bool {
        self.loaded.get() == self.images.len()
    }

    /// True if any sprite failed to load; the game will not start
    pub fn any_failed(&self) -> bool {
        self.failed.get() > 0
    }

    fn get(&self, sprite: Sprite) -> &HtmlImageElement {
        &self.images[sprite as usize]
    }
}

/// Draws one frame of the scene onto the canvas
pub struct ScenePainter {
    ctx: CanvasRenderingContext2d,
    assets: Assets,
    width: f64,
    height: f64,
}

impl ScenePainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        Ok(Self {
            ctx,
            assets: Assets::load()?,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    /// Clear, paint the background, then the player and every mover
    pub fn draw(&self, state: &GameState) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                self.assets.get(Sprite::Background),
                0.0,
                0.0,
                self.width,
                self.height,
            );

        self.draw_sprite(Sprite::Whale, &state.player.rect);
        for mover in &state.movers {
            self.draw_sprite(sprite_for(mover.kind), &mover.rect);
        }
    }

    fn draw_sprite(&self, sprite: Sprite, rect: &Rect) {
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                self.assets.get(sprite),
                rect.pos.x as f64,
                rect.pos.y as f64,
                rect.size.x as f64,
                rect.size.y as f64,
            );
    }
}
