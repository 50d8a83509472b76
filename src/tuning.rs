//! Every constant that differs between the two play modes, gathered in
//! one place so the simulation has a single code path.
//!
//! Positions are logical playfield units (top-left origin, y grows
//! downward); speeds and accelerations are per frame at 30 FPS.

/// How the spark collectible behaves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SparkMode {
    /// A single spark steers toward the player every frame. Caught when
    /// the origin distance drops to `epsilon` or less, then respawns
    /// off the right edge.
    Homing { epsilon: f64 },
    /// Sparks appear with probability `spawn_chance` per frame, drift
    /// left, and are caught by overlap (or lost off-screen).
    Drifting { spawn_chance: f64 },
}

/// Win-condition bonus: one crown spawns when the score first reaches
/// `threshold`; touching it ends the game in a win.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrownRule {
    pub threshold: u32,
    pub size: f64,
}

#[derive(Clone, Debug)]
pub struct Tuning {
    pub field_w: f64,
    pub field_h: f64,

    pub player_size: f64,
    pub player_x: f64,
    pub gravity: f64,
    pub lift: f64,

    // Cosmetic pitch: climbs by `tilt_rate` per frame up to `tilt_max`,
    // snaps to `tilt_flap` on a flap. Render-only.
    pub tilt_rate: f64,
    pub tilt_max: f64,
    pub tilt_flap: f64,

    pub tower_w: f64,
    pub gap_h: f64,
    /// Minimum distance kept between the gap and either field edge.
    pub gap_margin: f64,
    pub tower_speed: f64,
    /// Frames between tower spawns.
    pub tower_interval: u64,

    pub spark_size: f64,
    pub spark_speed: f64,
    pub spark_mode: SparkMode,

    /// Frames between decorative cloud spawns.
    pub cloud_interval: u64,

    pub crown: Option<CrownRule>,
}

impl Tuning {
    /// Large field, one homing spark, no crown, no win condition.
    pub fn classic() -> Self {
        Tuning {
            field_w: 800.0,
            field_h: 500.0,
            player_size: 50.0,
            player_x: 50.0,
            gravity: 0.3,
            lift: -6.0,
            tilt_rate: 0.35,
            tilt_max: 10.0,
            tilt_flap: -6.0,
            tower_w: 80.0,
            gap_h: 200.0,
            gap_margin: 80.0,
            tower_speed: 3.0,
            tower_interval: 75,
            spark_size: 30.0,
            spark_speed: 2.0,
            spark_mode: SparkMode::Homing { epsilon: 5.0 },
            cloud_interval: 90,
            crown: None,
        }
    }

    /// The quest ruleset: tighter field, drifting sparks, and a crown
    /// that appears at ten points and wins the game on contact.
    pub fn quest() -> Self {
        Tuning {
            field_w: 800.0,
            field_h: 400.0,
            player_size: 44.0,
            player_x: 50.0,
            gravity: 0.26,
            lift: -5.4,
            tilt_rate: 0.35,
            tilt_max: 10.0,
            tilt_flap: -6.0,
            tower_w: 70.0,
            gap_h: 170.0,
            gap_margin: 60.0,
            tower_speed: 2.6,
            tower_interval: 90,
            spark_size: 26.0,
            spark_speed: 1.6,
            spark_mode: SparkMode::Drifting { spawn_chance: 0.006 },
            cloud_interval: 90,
            crown: Some(CrownRule {
                threshold: 10,
                size: 40.0,
            }),
        }
    }

    /// Vertical range the top of a tower gap may be drawn from.
    pub fn gap_top_range(&self) -> std::ops::Range<f64> {
        self.gap_margin..(self.field_h - self.gap_h - self.gap_margin)
    }
}
