//! Entity types and their spawn constructors. Pure data; all movement
//! and collision sequencing lives in `game`.

use rand::Rng;

use crate::tuning::{CrownRule, Tuning};

/// Decorative cloud footprint in logical units.
pub const CLOUD_W: f64 = 80.0;
pub const CLOUD_H: f64 = 50.0;

/// Axis-aligned box. Overlap requires all four half-plane conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.y + self.h > other.y
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    /// Horizontal position; never changes after construction.
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub vy: f64,
    /// Cosmetic pitch, positive = nose down. Render-only.
    pub tilt: f64,
}

impl Player {
    pub fn spawn(t: &Tuning) -> Self {
        Player {
            x: t.player_x,
            y: t.field_h / 2.0,
            w: t.player_size,
            h: t.player_size,
            vy: 0.0,
            tilt: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h }
    }
}

/// A tower pair: solid above `gap_top` and below `gap_bot`, for the
/// full field height. Width and gap are fixed at spawn.
#[derive(Clone, Debug)]
pub struct Tower {
    pub x: f64,
    pub w: f64,
    pub gap_top: f64,
    pub gap_bot: f64,
    pub scored: bool,
}

impl Tower {
    pub fn spawn(t: &Tuning, rng: &mut impl Rng) -> Self {
        let gap_top = rng.gen_range(t.gap_top_range());
        Tower {
            x: t.field_w,
            w: t.tower_w,
            gap_top,
            gap_bot: gap_top + t.gap_h,
            scored: false,
        }
    }

    pub fn upper_rect(&self) -> Rect {
        Rect { x: self.x, y: 0.0, w: self.w, h: self.gap_top }
    }

    pub fn lower_rect(&self, field_h: f64) -> Rect {
        Rect {
            x: self.x,
            y: self.gap_bot,
            w: self.w,
            h: field_h - self.gap_bot,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Spark {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Spark {
    /// Initial position of the homing singleton: field center.
    pub fn at_center(t: &Tuning) -> Self {
        Spark {
            x: t.field_w / 2.0,
            y: t.field_h / 2.0,
            w: t.spark_size,
            h: t.spark_size,
        }
    }

    /// Off the right edge at a random height; used both for drifting
    /// spawns and for the homing spark after a catch.
    pub fn off_right(t: &Tuning, rng: &mut impl Rng) -> Self {
        Spark {
            x: t.field_w + rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..(t.field_h - t.spark_size)),
            w: t.spark_size,
            h: t.spark_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h }
    }
}

#[derive(Clone, Debug)]
pub struct Crown {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Crown {
    pub fn spawn(rule: &CrownRule, t: &Tuning, rng: &mut impl Rng) -> Self {
        Crown {
            x: t.field_w,
            y: rng.gen_range(t.gap_margin..(t.field_h - t.gap_margin - rule.size)),
            w: rule.size,
            h: rule.size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect { x: self.x, y: self.y, w: self.w, h: self.h }
    }
}

/// Background decoration only; never collides.
#[derive(Clone, Debug)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub speed: f64,
}

impl Cloud {
    pub fn spawn(t: &Tuning, rng: &mut impl Rng) -> Self {
        Cloud {
            x: t.field_w + rng.gen_range(0.0..200.0),
            y: rng.gen_range(0.0..(t.field_h - 100.0)),
            speed: rng.gen_range(1.0..3.0),
        }
    }
}
