//! The game session: one value owning every entity and counter, driven
//! by `update` once per frame and `primary_action` on input.
//!
//! All randomness comes through the injected `rng` so callers control
//! determinism (tests use a seeded RNG).

use rand::Rng;

use crate::entities::{CLOUD_W, Cloud, Crown, Player, Spark, Tower};
use crate::phase::{InvalidTransition, Phase};
use crate::tuning::{SparkMode, Tuning};

pub struct Game {
    pub tuning: Tuning,
    pub phase: Phase,
    pub player: Player,
    pub towers: Vec<Tower>,
    pub sparks: Vec<Spark>,
    pub crown: Option<Crown>,
    /// Latch: the crown spawns at most once per round.
    pub crown_spawned: bool,
    pub clouds: Vec<Cloud>,
    pub score: u32,
    pub coins: u32,
    /// Highest score this process; survives restarts.
    pub best: u32,
    /// Advances only while `Playing`; all spawn cadence hangs off it.
    pub frame: u64,
    /// Background parallax offset, render-only.
    pub scroll_x: f64,
}

impl Game {
    pub fn new(tuning: Tuning) -> Self {
        let player = Player::spawn(&tuning);
        // The homing spark is a singleton that exists from the start;
        // drifting sparks only appear once play begins.
        let sparks = match tuning.spark_mode {
            SparkMode::Homing { .. } => vec![Spark::at_center(&tuning)],
            SparkMode::Drifting { .. } => Vec::new(),
        };
        Game {
            tuning,
            phase: Phase::Ready,
            player,
            towers: Vec::new(),
            sparks,
            crown: None,
            crown_spawned: false,
            clouds: Vec::new(),
            score: 0,
            coins: 0,
            best: 0,
            frame: 0,
            scroll_x: 0.0,
        }
    }

    /// Swap rulesets from the attract screen. Ignored mid-round.
    pub fn switch_tuning(&mut self, tuning: Tuning) {
        if self.phase == Phase::Ready {
            *self = Game {
                best: self.best,
                ..Game::new(tuning)
            };
        }
    }

    /// Leave the attract screen and apply the first flap.
    pub fn start(&mut self) -> Result<(), InvalidTransition> {
        self.phase = self.phase.transition(Phase::Playing)?;
        self.flap();
        Ok(())
    }

    /// Reset every entity and counter and go straight back into play.
    /// Only legal from a terminal phase; `best` and the ruleset survive.
    pub fn restart(&mut self) -> Result<(), InvalidTransition> {
        let next = self.phase.transition(Phase::Playing)?;
        *self = Game {
            best: self.best,
            phase: next,
            ..Game::new(self.tuning.clone())
        };
        Ok(())
    }

    /// The single input: flap, start, or restart depending on phase.
    pub fn primary_action(&mut self) -> Result<(), InvalidTransition> {
        match self.phase {
            Phase::Ready => self.start(),
            Phase::Playing => {
                self.flap();
                Ok(())
            }
            Phase::GameOver | Phase::Win => self.restart(),
        }
    }

    /// Replace (never add to) the current velocity with the lift
    /// impulse. Only meaningful mid-round.
    pub fn flap(&mut self) {
        if self.phase == Phase::Playing {
            self.player.vy = self.tuning.lift;
            self.player.tilt = self.tuning.tilt_flap;
        }
    }

    /// Advance the simulation by one frame.
    pub fn update(&mut self, rng: &mut impl Rng) -> Result<(), InvalidTransition> {
        match self.phase {
            Phase::Ready => {
                // Idle bob on the attract screen.
                self.scroll_x += 0.5;
                self.player.y =
                    self.tuning.field_h / 2.0 + (self.scroll_x * 0.16).sin() * 8.0;
                Ok(())
            }
            Phase::Playing => self.step(rng),
            // Frozen; the overlay is drawn from the last live frame.
            Phase::GameOver | Phase::Win => Ok(()),
        }
    }

    fn step(&mut self, rng: &mut impl Rng) -> Result<(), InvalidTransition> {
        self.frame += 1;
        self.scroll_x += self.tuning.tower_speed;

        // Player physics: gravity accumulates, position integrates.
        self.player.vy += self.tuning.gravity;
        self.player.y += self.player.vy;
        self.player.tilt =
            (self.player.tilt + self.tuning.tilt_rate).min(self.tuning.tilt_max);

        // Towers: advance, score on the trailing edge, prune, spawn.
        let speed = self.tuning.tower_speed;
        for t in &mut self.towers {
            t.x -= speed;
            if !t.scored && t.x + t.w < 0.0 {
                t.scored = true;
                self.score += 1;
            }
        }
        self.towers.retain(|t| t.x + t.w + 5.0 > 0.0);
        if self.frame % self.tuning.tower_interval == 0 {
            let t = Tower::spawn(&self.tuning, rng);
            self.towers.push(t);
        }

        // Fatal checks win over everything else this frame.
        if self.player_out_of_bounds() || self.hits_tower() {
            return self.finish(Phase::GameOver);
        }

        self.update_sparks(rng);

        if self.update_crown(rng) {
            return self.finish(Phase::Win);
        }

        // Decorative clouds.
        if self.frame % self.tuning.cloud_interval == 0 {
            let c = Cloud::spawn(&self.tuning, rng);
            self.clouds.push(c);
        }
        for c in &mut self.clouds {
            c.x -= c.speed;
        }
        self.clouds.retain(|c| c.x + CLOUD_W > 0.0);

        Ok(())
    }

    fn player_out_of_bounds(&self) -> bool {
        self.player.y < 0.0 || self.player.y + self.player.h > self.tuning.field_h
    }

    fn hits_tower(&self) -> bool {
        let pr = self.player.rect();
        self.towers.iter().any(|t| {
            pr.overlaps(&t.upper_rect()) || pr.overlaps(&t.lower_rect(self.tuning.field_h))
        })
    }

    fn update_sparks(&mut self, rng: &mut impl Rng) {
        match self.tuning.spark_mode {
            SparkMode::Homing { epsilon } => {
                let (px, py) = (self.player.x, self.player.y);
                let speed = self.tuning.spark_speed;
                let mut caught = false;
                if let Some(s) = self.sparks.first_mut() {
                    let dx = px - s.x;
                    let dy = py - s.y;
                    let dist = (dx * dx + dy * dy).sqrt();
                    if dist > epsilon {
                        s.x += dx / dist * speed;
                        s.y += dy / dist * speed;
                    } else {
                        caught = true;
                    }
                }
                if caught {
                    self.coins += 1;
                    self.sparks[0] = Spark::off_right(&self.tuning, rng);
                }
            }
            SparkMode::Drifting { spawn_chance } => {
                if rng.gen_bool(spawn_chance) {
                    let s = Spark::off_right(&self.tuning, rng);
                    self.sparks.push(s);
                }
                let speed = self.tuning.spark_speed;
                let pr = self.player.rect();
                let mut caught = 0;
                self.sparks.retain_mut(|s| {
                    s.x -= speed;
                    if s.rect().overlaps(&pr) {
                        caught += 1;
                        false
                    } else {
                        s.x + s.w > 0.0
                    }
                });
                self.coins += caught;
            }
        }
    }

    /// Returns true when the crown was touched this frame.
    fn update_crown(&mut self, rng: &mut impl Rng) -> bool {
        let Some(rule) = self.tuning.crown else {
            return false;
        };
        if !self.crown_spawned && self.score >= rule.threshold {
            self.crown = Some(Crown::spawn(&rule, &self.tuning, rng));
            self.crown_spawned = true;
        }
        let pr = self.player.rect();
        let mut touched = false;
        let mut gone = false;
        if let Some(c) = &mut self.crown {
            c.x -= self.tuning.tower_speed;
            if c.rect().overlaps(&pr) {
                touched = true;
            } else if c.x + c.w < 0.0 {
                // Missed: the crown is forfeited for the round.
                gone = true;
            }
        }
        if gone {
            self.crown = None;
        }
        touched
    }

    fn finish(&mut self, to: Phase) -> Result<(), InvalidTransition> {
        self.phase = self.phase.transition(to)?;
        if self.score > self.best {
            self.best = self.score;
        }
        Ok(())
    }
}
