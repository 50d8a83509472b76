//! Paints a `Game` into a `PixelBuf`. The simulation runs on a fixed
//! logical playfield; everything here scales logical units to whatever
//! pixel grid the terminal currently provides.

use crate::entities::{CLOUD_H, CLOUD_W, Rect};
use crate::game::Game;
use crate::phase::Phase;
use crate::pixel::{PixelBuf, Rgb, draw_number, draw_text};
use crate::tuning::Tuning;

// ── Palette ─────────────────────────────────────────────────────────────────

const SKY_TOP: Rgb = Rgb(65, 140, 205);
const SKY_BOT: Rgb = Rgb(168, 216, 240);
const HILL_FAR: Rgb = Rgb(110, 185, 90);
const HILL_NEAR: Rgb = Rgb(85, 165, 70);
const CLOUD: Rgb = Rgb(245, 248, 252);
const CLOUD_SHADE: Rgb = Rgb(214, 226, 238);
const STONE_L: Rgb = Rgb(116, 114, 124);
const STONE_M: Rgb = Rgb(150, 148, 158);
const STONE_HI: Rgb = Rgb(176, 174, 184);
const STONE_R: Rgb = Rgb(132, 130, 140);
const STONE_SEAM: Rgb = Rgb(100, 98, 108);
const CAP_DARK: Rgb = Rgb(84, 82, 92);
const BODY: Rgb = Rgb(205, 72, 54);
const BODY_HI: Rgb = Rgb(232, 104, 82);
const WING: Rgb = Rgb(158, 48, 40);
const EYE: Rgb = Rgb(255, 255, 255);
const PUPIL: Rgb = Rgb(20, 20, 20);
const BEAK: Rgb = Rgb(240, 190, 60);
const SPARK_GOLD: Rgb = Rgb(250, 210, 70);
const SPARK_HI: Rgb = Rgb(255, 242, 160);
const CROWN_GOLD: Rgb = Rgb(235, 185, 50);
const CROWN_HI: Rgb = Rgb(255, 222, 110);
const CROWN_JEWEL: Rgb = Rgb(198, 58, 118);
const WHITE: Rgb = Rgb(255, 255, 255);
const PANEL: Rgb = Rgb(210, 185, 110);
const PANEL_IN: Rgb = Rgb(222, 198, 126);
const PANEL_EDGE: Rgb = Rgb(30, 30, 30);

// ── Logical-to-pixel mapping ────────────────────────────────────────────────

struct View {
    sx: f64,
    sy: f64,
}

impl View {
    fn new(buf: &PixelBuf, t: &Tuning) -> Self {
        View {
            sx: buf.w as f64 / t.field_w,
            sy: buf.h as f64 / t.field_h,
        }
    }

    fn x(&self, lx: f64) -> i32 {
        (lx * self.sx) as i32
    }

    fn y(&self, ly: f64) -> i32 {
        (ly * self.sy) as i32
    }

    fn rect(&self, r: &Rect) -> (i32, i32, i32, i32) {
        (
            self.x(r.x),
            self.y(r.y),
            ((r.w * self.sx) as i32).max(1),
            ((r.h * self.sy) as i32).max(1),
        )
    }
}

/// Render one complete frame of game state into the buffer.
pub fn draw(game: &Game, buf: &mut PixelBuf) {
    let v = View::new(buf, &game.tuning);
    let text_scale = (buf.h as i32 / 100).max(1);

    draw_sky(buf);
    draw_hills(game, buf, &v);
    draw_clouds(game, buf, &v);
    draw_towers(game, buf, &v);
    if let Some(c) = &game.crown {
        draw_crown(buf, v.rect(&c.rect()));
    }
    for s in &game.sparks {
        draw_spark(game, buf, v.rect(&s.rect()));
    }
    draw_player(game, buf, &v);
    draw_hud(game, buf, text_scale);

    match game.phase {
        Phase::Ready => draw_title(game, buf, text_scale),
        Phase::GameOver => draw_end_panel(game, buf, text_scale, "GAME OVER"),
        Phase::Win => draw_end_panel(game, buf, text_scale, "YOU WIN"),
        Phase::Playing => {}
    }
}

fn draw_sky(buf: &mut PixelBuf) {
    let h = buf.h;
    for y in 0..h {
        let t = ((y * 256) / h.max(1)) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in 0..buf.w {
            buf.set(x as i32, y as i32, c);
        }
    }
}

fn draw_hills(game: &Game, buf: &mut PixelBuf, v: &View) {
    let base = buf.h as i32;
    let scale = v.sy * 4.0;
    // Far band
    for x in 0..buf.w as i32 {
        let fx = (x as f64 + game.scroll_x * v.sx * 0.2) * 0.04;
        let h = (fx.sin() * 5.0 + (fx * 1.7).sin() * 2.5) * scale;
        let top = base - h as i32 - (4.0 * scale) as i32;
        for y in top..base {
            buf.set(x, y, HILL_FAR);
        }
    }
    // Near band
    for x in 0..buf.w as i32 {
        let fx = (x as f64 + game.scroll_x * v.sx * 0.4) * 0.06;
        let h = (fx.sin() * 3.5 + (fx * 2.3).sin() * 1.8) * scale;
        let top = base - h as i32 - (2.0 * scale) as i32;
        for y in top..base {
            buf.set(x, y, HILL_NEAR);
        }
    }
}

fn draw_clouds(game: &Game, buf: &mut PixelBuf, v: &View) {
    for cl in &game.clouds {
        let x = v.x(cl.x);
        let y = v.y(cl.y);
        let w = ((CLOUD_W * v.sx) as i32).max(4);
        let h = ((CLOUD_H * v.sy) as i32).max(2);
        // Three overlapping puffs, flat bottom.
        buf.fill_rect(x, y + h / 3, w, h / 2, CLOUD_SHADE);
        buf.fill_rect(x + w / 6, y + h / 6, w / 2, h / 2, CLOUD);
        buf.fill_rect(x + w / 2, y, w / 3, h / 2, CLOUD);
        buf.fill_rect(x + w / 8, y + h / 3, (w * 3) / 4, h / 3, CLOUD);
    }
}

fn stone_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return STONE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(STONE_L, STONE_M, (t * 4).min(256))
    } else if t < 112 {
        Rgb::lerp(STONE_M, STONE_HI, ((t - 64) * 5).min(256))
    } else if t < 176 {
        Rgb::lerp(STONE_HI, STONE_R, ((t - 112) * 4).min(256))
    } else {
        Rgb::lerp(STONE_R, STONE_L, ((t - 176) * 3).min(256))
    }
}

fn draw_towers(game: &Game, buf: &mut PixelBuf, v: &View) {
    let cap_h = ((12.0 * v.sy) as i32).max(2);
    let tooth_h = (cap_h / 2).max(1);
    let cap_extra = ((6.0 * v.sx) as i32).max(1);
    let brick = ((10.0 * v.sy) as i32).max(3);
    let field_bot = buf.h as i32;

    for t in &game.towers {
        let x0 = v.x(t.x);
        let w = ((t.w * v.sx) as i32).max(2);
        let gap_top = v.y(t.gap_top);
        let gap_bot = v.y(t.gap_bot);
        let cap_w = w + cap_extra * 2;
        let tooth_w = (cap_w / 5).max(2);

        // Upper tower body, hanging from the top edge.
        for dx in 0..w {
            let c = stone_shade(dx, w);
            for y in 0..(gap_top - cap_h) {
                let c = if y % brick == 0 { STONE_SEAM } else { c };
                buf.set(x0 + dx, y, c);
            }
        }
        // Upper cap: battlement teeth point down into the gap.
        for dx in 0..cap_w {
            let c = stone_shade(dx, cap_w);
            let x = x0 - cap_extra + dx;
            for y in (gap_top - cap_h)..(gap_top - tooth_h) {
                buf.set(x, y, c);
            }
            if (dx / tooth_w) % 2 == 0 {
                for y in (gap_top - tooth_h)..gap_top {
                    buf.set(x, y, c);
                }
                buf.set(x, gap_top - 1, CAP_DARK);
            }
            buf.set(x, gap_top - cap_h, CAP_DARK);
        }

        // Lower cap: teeth point up.
        for dx in 0..cap_w {
            let c = stone_shade(dx, cap_w);
            let x = x0 - cap_extra + dx;
            if (dx / tooth_w) % 2 == 0 {
                for y in gap_bot..(gap_bot + tooth_h) {
                    buf.set(x, y, c);
                }
                buf.set(x, gap_bot, CAP_DARK);
            }
            for y in (gap_bot + tooth_h)..(gap_bot + cap_h) {
                buf.set(x, y, c);
            }
            buf.set(x, gap_bot + cap_h - 1, CAP_DARK);
        }
        // Lower tower body, down to the bottom edge.
        for dx in 0..w {
            let c = stone_shade(dx, w);
            for y in (gap_bot + cap_h)..field_bot {
                let c = if y % brick == 0 { STONE_SEAM } else { c };
                buf.set(x0 + dx, y, c);
            }
        }
    }
}

fn draw_spark(game: &Game, buf: &mut PixelBuf, (x, y, w, h): (i32, i32, i32, i32)) {
    let cx = x + w / 2;
    let cy = y + h / 2;
    let r = (w.min(h) / 2).max(1);
    // Diamond silhouette.
    for dy in -r..=r {
        let half = r - dy.abs();
        for dx in -half..=half {
            buf.set(cx + dx, cy + dy, SPARK_GOLD);
        }
    }
    // Glimmer alternates with the scroll ticker.
    if (game.scroll_x as i64 / 3) % 2 == 0 {
        buf.set(cx, cy, SPARK_HI);
        buf.set(cx - 1, cy, SPARK_HI);
        buf.set(cx, cy - 1, SPARK_HI);
    }
    // Wing flecks.
    buf.set(cx - r - 1, cy, SPARK_HI);
    buf.set(cx + r + 1, cy, SPARK_HI);
}

fn draw_crown(buf: &mut PixelBuf, (x, y, w, h): (i32, i32, i32, i32)) {
    let band_h = (h / 3).max(1);
    let band_y = y + h - band_h;
    buf.fill_rect(x, band_y, w, band_h, CROWN_GOLD);
    buf.fill_rect(x, band_y, w, 1.max(band_h / 3), CROWN_HI);
    // Three points.
    let tooth_w = (w / 5).max(1);
    let tooth_h = h - band_h;
    for i in 0..3 {
        let tx = x + i * ((w - tooth_w).max(1) / 2);
        buf.fill_rect(tx, y, tooth_w, tooth_h, CROWN_GOLD);
        buf.set(tx + tooth_w / 2, y, CROWN_HI);
    }
    // Jewels along the band.
    for i in 0..3 {
        let jx = x + (i * 2 + 1) * w / 6;
        buf.set(jx, band_y + band_h / 2, CROWN_JEWEL);
    }
}

fn draw_player(game: &Game, buf: &mut PixelBuf, v: &View) {
    let p = &game.player;
    let cx = v.x(p.x + p.w / 2.0);
    let cy = v.y(p.y + p.h / 2.0);
    let bw = ((p.w * v.sx / 2.0) as i32).max(2);
    let bh = ((p.h * v.sy / 2.0) as i32).max(2);
    let tilt_px = ((p.tilt / game.tuning.tilt_max) * 2.0) as i32;

    // Body and top highlight.
    buf.fill_rect(cx - bw, cy - bh, bw * 2 + 1, bh * 2, BODY);
    buf.fill_rect(cx - bw + 1, cy - bh, bw * 2 - 2, (bh / 3).max(1), BODY_HI);

    // Wing beats with the scroll ticker.
    let wing_off = if (game.scroll_x as i64) % 8 < 4 { -1 } else { 1 };
    buf.fill_rect(
        cx - bw + 1,
        cy + wing_off + tilt_px,
        (bw * 2) / 3,
        (bh * 2) / 3,
        WING,
    );

    // Eye, forward-set.
    let ex = cx + bw - (bw / 2).max(1);
    let ey = cy - bh + (bh / 2).max(1);
    buf.fill_rect(ex, ey, 2, 2, EYE);
    buf.set(ex + 1, ey + 1, PUPIL);

    // Beak, pitched by tilt.
    let beak_h = (bh / 2).max(1);
    buf.fill_rect(cx + bw, cy - beak_h / 2 + tilt_px, (bw / 2).max(2), beak_h, BEAK);

    // Tail feather.
    buf.fill_rect(cx - bw - (bw / 2).max(1), cy - 1 + tilt_px, (bw / 2).max(1), 2, WING);
}

fn draw_hud(game: &Game, buf: &mut PixelBuf, scale: i32) {
    let top = 2 * scale;
    let mid = buf.w as i32 / 2;
    draw_number(buf, mid, top, game.score, scale, WHITE);

    // Coins at the top-right, marked with a little diamond.
    let cx = buf.w as i32 - 10 * scale;
    draw_number(buf, cx, top, game.coins, scale, SPARK_GOLD);
    let dx = cx - 6 * scale;
    let dy = top + 2 * scale;
    for d in -1..=1i32 {
        let half = 1 - d.abs();
        for ddx in -half..=half {
            buf.set(dx + ddx, dy + d, SPARK_GOLD);
        }
    }
}

fn draw_title(game: &Game, buf: &mut PixelBuf, scale: i32) {
    let cx = buf.w as i32 / 2;
    let cy = buf.h as i32 / 4;
    draw_text(buf, cx, cy, "SKYDART", scale * 2, SPARK_GOLD);
    draw_text(buf, cx, cy + 14 * scale, "PRESS SPACE", scale, WHITE);
    let mode = if game.tuning.crown.is_some() {
        "MODE QUEST"
    } else {
        "MODE CLASSIC"
    };
    draw_text(buf, cx, cy + 22 * scale, mode, scale, WHITE);
    draw_text(buf, cx, cy + 28 * scale, "1 CLASSIC  2 QUEST", scale, CLOUD_SHADE);
}

fn draw_end_panel(game: &Game, buf: &mut PixelBuf, scale: i32, title: &str) {
    buf.dim();

    let cx = buf.w as i32 / 2;
    let cy = buf.h as i32 / 2;
    let panel_w = (title.len() as i32 + 4) * 4 * scale;
    let panel_h = 30 * scale;
    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;

    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, PANEL_EDGE);
    buf.fill_rect(px, py, panel_w, panel_h, PANEL);
    buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL_IN);

    draw_text(buf, cx, py + 3 * scale, title, scale, WHITE);
    draw_number(buf, cx, py + 12 * scale, game.score, scale, WHITE);
    draw_text(buf, cx, py + 19 * scale, "BEST", scale, CROWN_GOLD);
    draw_number(buf, cx, py + 25 * scale, game.best, scale, CROWN_GOLD);
}
