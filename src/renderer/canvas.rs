//! Canvas 2D renderer
//!
//! Draws background, falling items, the cat and particles. Sprites are used
//! once they finish loading; until then each thing is a colored box.

use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::layout::{Viewport, cat_lean, particle_alpha};
use crate::consts::{VIEW_H, VIEW_W};
use crate::sim::{GameState, ItemKind, ParticleShape};

/// Loaded (or loading) sprite images
pub struct Sprites {
    background: Option<HtmlImageElement>,
    cat: Option<HtmlImageElement>,
    fish: Option<HtmlImageElement>,
    golden: Option<HtmlImageElement>,
    water: Option<HtmlImageElement>,
}

fn load_image(src: &str) -> Option<HtmlImageElement> {
    let img = HtmlImageElement::new().ok()?;
    img.set_src(src);
    Some(img)
}

/// Usable once decoded
fn ready(img: &Option<HtmlImageElement>) -> Option<&HtmlImageElement> {
    img.as_ref().filter(|i| i.complete() && i.natural_width() > 0)
}

impl Sprites {
    pub fn load() -> Self {
        Self {
            background: load_image("assets/images/background.jpg"),
            cat: load_image("assets/images/cat.png"),
            fish: load_image("assets/images/fish-normal.png"),
            golden: load_image("assets/images/fish-golden.png"),
            water: load_image("assets/images/water-drop.png"),
        }
    }

    fn for_kind(&self, kind: ItemKind) -> Option<&HtmlImageElement> {
        match kind {
            ItemKind::Prize => ready(&self.fish),
            ItemKind::Bonus => ready(&self.golden),
            ItemKind::Hazard => ready(&self.water),
        }
    }
}

/// Renderer state for one canvas
pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
    pub viewport: Viewport,
    /// Skip particle drawing (settings)
    pub particles: bool,
    /// Skip the cat's lean (reduced motion)
    pub lean: bool,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .map_err(|_| "getContext failed".to_string())?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "not a 2d context".to_string())?;

        Ok(Self {
            canvas,
            ctx,
            sprites: Sprites::load(),
            viewport: Viewport::fit(VIEW_W as f64, VIEW_H as f64, 1.0),
            particles: true,
            lean: true,
        })
    }

    /// Resize the backing store and reset the logical transform
    pub fn resize(&mut self, window_width: f64, window_height: f64, dpr: f64) {
        let vp = Viewport::fit(window_width, window_height, dpr);
        let style = self.canvas.style();
        let _ = style.set_property("width", &format!("{}px", vp.css_width));
        let _ = style.set_property("height", &format!("{}px", vp.css_height));
        self.canvas.set_width(vp.pixel_width);
        self.canvas.set_height(vp.pixel_height);
        let _ = self
            .ctx
            .set_transform(vp.scale_x, 0.0, 0.0, vp.scale_y, 0.0, 0.0);
        self.viewport = vp;
        log::debug!(
            "Canvas resized to {}x{} ({}x{} css)",
            vp.pixel_width,
            vp.pixel_height,
            vp.css_width,
            vp.css_height
        );
    }

    /// Draw a full frame
    pub fn render(&self, state: &GameState) {
        self.draw_background();
        self.draw_items(state);
        self.draw_cat(state);
        if self.particles {
            self.draw_particles(state);
        }

        // Ground shine
        self.ctx.set_fill_style_str("rgba(255,255,255,0.06)");
        self.ctx
            .fill_rect(0.0, VIEW_H as f64 - 8.0, VIEW_W as f64, 8.0);
    }

    fn draw_background(&self) {
        let (w, h) = (VIEW_W as f64, VIEW_H as f64);
        match ready(&self.sprites.background) {
            Some(bg) => {
                // Cover the logical view
                let (nw, nh) = (bg.natural_width() as f64, bg.natural_height() as f64);
                let scale = (w / nw).max(h / nh);
                let (sw, sh) = (nw * scale, nh * scale);
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    bg,
                    (w - sw) / 2.0,
                    (h - sh) / 2.0,
                    sw,
                    sh,
                );
            }
            None => {
                self.ctx.set_fill_style_str("#0b0d18");
                self.ctx.fill_rect(0.0, 0.0, w, h);
            }
        }

        // Vignette
        if let Ok(grad) = self
            .ctx
            .create_radial_gradient(w / 2.0, h * 0.7, h * 0.2, w / 2.0, h / 2.0, h * 0.9)
        {
            let _ = grad.add_color_stop(0.0, "rgba(0,0,0,0)");
            let _ = grad.add_color_stop(1.0, "rgba(0,0,0,0.45)");
            self.ctx.set_fill_style_canvas_gradient(&grad);
            self.ctx.fill_rect(0.0, 0.0, w, h);
        }
    }

    /// Draw `img` (or a colored box) centered at the current origin
    fn draw_sprite(&self, img: Option<&HtmlImageElement>, fallback: &str, w: f64, h: f64) {
        match img {
            Some(img) => {
                let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    -w / 2.0,
                    -h / 2.0,
                    w,
                    h,
                );
            }
            None => {
                self.ctx.set_fill_style_str(fallback);
                self.ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);
            }
        }
    }

    fn draw_items(&self, state: &GameState) {
        for item in &state.items {
            let (w, h) = (item.width as f64, item.height as f64);
            self.ctx.save();
            let _ = self
                .ctx
                .translate(item.pos.x as f64 + w / 2.0, item.pos.y as f64 + h / 2.0);
            let _ = self.ctx.rotate(item.rotation as f64);
            self.draw_sprite(self.sprites.for_kind(item.kind), item.kind.color(), w, h);
            self.ctx.restore();
        }
    }

    fn draw_cat(&self, state: &GameState) {
        let player = &state.player;
        let (w, h) = (player.width as f64, player.height as f64);
        let angle = if self.lean { cat_lean(player) } else { 0.0 };

        self.ctx.save();
        let _ = self
            .ctx
            .translate(player.pos.x as f64 + w / 2.0, player.pos.y as f64 + h / 2.0);
        let _ = self.ctx.rotate(angle as f64);
        self.draw_sprite(ready(&self.sprites.cat), "#ffd166", w, h);
        self.ctx.restore();
    }

    fn draw_particles(&self, state: &GameState) {
        for p in &state.particles {
            self.ctx.save();
            self.ctx.set_global_alpha(particle_alpha(p.life) as f64);
            let _ = self.ctx.translate(p.pos.x as f64, p.pos.y as f64);
            let _ = self.ctx.rotate(p.rotation as f64);
            self.ctx.set_fill_style_str(p.kind.color());
            let size = p.size as f64;
            match p.shape {
                ParticleShape::Circle => {
                    self.ctx.begin_path();
                    let _ = self.ctx.arc(0.0, 0.0, size, 0.0, PI * 2.0);
                    self.ctx.fill();
                }
                ParticleShape::Spark => {
                    self.ctx.fill_rect(-size, -size * 0.5, size * 2.0, size);
                }
            }
            self.ctx.restore();
        }
    }
}
