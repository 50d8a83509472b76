use rand::SeedableRng;
use rand::rngs::StdRng;

use skydart::entities::{Crown, Rect, Spark, Tower};
use skydart::game::Game;
use skydart::phase::Phase;
use skydart::tuning::{CrownRule, SparkMode, Tuning};

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A game already past the attract screen.
fn playing(tuning: Tuning) -> Game {
    let mut g = Game::new(tuning);
    g.start().unwrap();
    g
}

/// Quest rules with stochastic spark spawning turned off, so tests
/// control exactly which sparks exist.
fn quest_no_spawn() -> Tuning {
    let mut t = Tuning::quest();
    t.spark_mode = SparkMode::Drifting { spawn_chance: 0.0 };
    t
}

// ── Physics ──────────────────────────────────────────────────────────────────

#[test]
fn gravity_integrates_frame_by_frame() {
    let mut g = playing(Tuning::quest());
    g.player.vy = 0.0;
    let mut rng = rng();
    for n in 1..=10u32 {
        g.update(&mut rng).unwrap();
        assert!((g.player.vy - n as f64 * g.tuning.gravity).abs() < 1e-9);
    }
    assert_eq!(g.phase, Phase::Playing);
}

#[test]
fn position_integrates_velocity() {
    let mut g = playing(Tuning::quest());
    g.player.vy = 0.0;
    let y0 = g.player.y;
    g.update(&mut rng()).unwrap();
    // One frame: vy becomes g, y moves by the new vy.
    assert!((g.player.y - (y0 + g.tuning.gravity)).abs() < 1e-9);
}

#[test]
fn flap_overwrites_velocity_not_additive() {
    let mut g = playing(Tuning::classic());
    g.player.vy = 42.0;
    g.flap();
    assert_eq!(g.player.vy, g.tuning.lift);

    g.player.vy = -99.0;
    g.flap();
    assert_eq!(g.player.vy, g.tuning.lift);
}

#[test]
fn player_never_moves_horizontally() {
    let mut g = playing(Tuning::classic());
    let x0 = g.player.x;
    let mut rng = rng();
    for n in 1..=50u32 {
        g.update(&mut rng).unwrap();
        if n % 20 == 0 {
            g.flap(); // stay airborne
        }
        assert_eq!(g.player.x, x0);
    }
    assert_eq!(g.phase, Phase::Playing);
}

#[test]
fn tilt_climbs_to_cap_and_resets_on_flap() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();
    for _ in 0..46 {
        g.update(&mut rng).unwrap();
    }
    assert_eq!(g.phase, Phase::Playing);
    assert_eq!(g.player.tilt, g.tuning.tilt_max);
    g.flap();
    assert_eq!(g.player.tilt, g.tuning.tilt_flap);
}

// ── Spawning ─────────────────────────────────────────────────────────────────

#[test]
fn tower_gaps_respect_margins_over_many_spawns() {
    let t = Tuning::classic();
    let mut rng = rng();
    for _ in 0..500 {
        let tower = Tower::spawn(&t, &mut rng);
        assert!(tower.gap_top >= t.gap_margin);
        assert!(tower.gap_bot <= t.field_h - t.gap_margin);
        assert!((tower.gap_bot - tower.gap_top - t.gap_h).abs() < 1e-9);
        assert_eq!(tower.w, t.tower_w);
    }
}

#[test]
fn towers_spawn_on_the_frame_interval() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();
    for n in 1..g.tuning.tower_interval {
        g.update(&mut rng).unwrap();
        if n % 20 == 0 {
            g.flap(); // stay airborne across the whole interval
        }
    }
    assert_eq!(g.phase, Phase::Playing);
    assert!(g.towers.is_empty());
    g.update(&mut rng).unwrap();
    assert_eq!(g.towers.len(), 1);
    assert_eq!(g.towers[0].x, g.tuning.field_w);
}

#[test]
fn nothing_spawns_before_play_begins() {
    let mut g = Game::new(Tuning::quest());
    let mut rng = rng();
    for _ in 0..200 {
        g.update(&mut rng).unwrap();
    }
    assert_eq!(g.frame, 0);
    assert!(g.towers.is_empty());
    assert!(g.sparks.is_empty());
    assert!(g.clouds.is_empty());
}

#[test]
fn nothing_spawns_after_the_round_ends() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();
    g.player.y = g.tuning.field_h + 50.0;
    g.update(&mut rng).unwrap();
    assert_eq!(g.phase, Phase::GameOver);

    let frame = g.frame;
    let towers = g.towers.len();
    let clouds = g.clouds.len();
    for _ in 0..200 {
        g.update(&mut rng).unwrap();
    }
    assert_eq!(g.frame, frame);
    assert_eq!(g.towers.len(), towers);
    assert_eq!(g.clouds.len(), clouds);
}

// ── Collision & scoring ──────────────────────────────────────────────────────

#[test]
fn overlap_matches_reference_rectangles() {
    let player = Rect { x: 50.0, y: 50.0, w: 40.0, h: 40.0 };
    let near = Rect { x: 60.0, y: 60.0, w: 40.0, h: 40.0 };
    let far = Rect { x: 200.0, y: 0.0, w: 40.0, h: 40.0 };
    assert!(player.overlaps(&near));
    assert!(!player.overlaps(&far));
}

#[test]
fn score_increments_once_when_trailing_edge_crosses_zero() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();
    // Trailing edge at 2.5; one step of speed 3 pushes it past zero.
    g.towers.push(Tower {
        x: 2.5 - g.tuning.tower_w,
        w: g.tuning.tower_w,
        gap_top: 80.0,
        gap_bot: 280.0,
        scored: false,
    });

    g.update(&mut rng).unwrap();
    assert_eq!(g.score, 1);

    g.update(&mut rng).unwrap();
    g.update(&mut rng).unwrap();
    assert_eq!(g.score, 1, "a tower scores exactly once");
    assert!(g.towers.is_empty(), "towers are pruned shortly after the edge");
}

#[test]
fn tower_overlap_ends_the_round() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();
    // Solid wall over the player's band: gap far below.
    g.towers.push(Tower {
        x: g.player.x - 10.0,
        w: g.tuning.tower_w,
        gap_top: 400.0,
        gap_bot: 480.0,
        scored: false,
    });
    g.update(&mut rng).unwrap();
    assert_eq!(g.phase, Phase::GameOver);
}

#[test]
fn leaving_either_vertical_bound_ends_the_round() {
    for y in [-200.0, 10_000.0] {
        let mut g = playing(Tuning::classic());
        g.player.y = y;
        g.update(&mut rng()).unwrap();
        assert_eq!(g.phase, Phase::GameOver);
    }
}

#[test]
fn best_score_tracks_the_round_high() {
    let mut g = playing(Tuning::classic());
    g.score = 7;
    g.player.y = -500.0;
    g.update(&mut rng()).unwrap();
    assert_eq!(g.phase, Phase::GameOver);
    assert_eq!(g.best, 7);
}

// ── Sparks ───────────────────────────────────────────────────────────────────

#[test]
fn homing_spark_steers_toward_the_player() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();

    // Predict where the player will be after this frame's physics.
    let vy = g.player.vy + g.tuning.gravity;
    let (px, py) = (g.player.x, g.player.y + vy);
    let s0 = g.sparks[0].clone();
    let dx = px - s0.x;
    let dy = py - s0.y;
    let dist = (dx * dx + dy * dy).sqrt();

    g.update(&mut rng).unwrap();

    let s1 = &g.sparks[0];
    let speed = g.tuning.spark_speed;
    assert!((s1.x - (s0.x + dx / dist * speed)).abs() < 1e-9);
    assert!((s1.y - (s0.y + dy / dist * speed)).abs() < 1e-9);
}

#[test]
fn homing_spark_within_epsilon_is_caught_and_respawns() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();
    // Catch distance is measured between origins; park the spark
    // closer than epsilon and freeze the player for the frame.
    g.sparks[0].x = g.player.x + 2.0;
    g.sparks[0].y = g.player.y;
    g.player.vy = 0.0;
    g.tuning.gravity = 0.0;

    g.update(&mut rng).unwrap();

    assert_eq!(g.coins, 1);
    assert_eq!(g.sparks.len(), 1, "the homing spark is a singleton");
    assert!(g.sparks[0].x >= g.tuning.field_w, "respawns off the right edge");
}

#[test]
fn drifting_spark_is_caught_by_overlap() {
    let mut g = playing(quest_no_spawn());
    let mut rng = rng();
    g.sparks.push(Spark {
        x: g.player.x,
        y: g.player.y,
        w: g.tuning.spark_size,
        h: g.tuning.spark_size,
    });
    g.update(&mut rng).unwrap();
    assert_eq!(g.coins, 1);
    assert!(g.sparks.is_empty(), "caught sparks are removed, not respawned");
}

#[test]
fn drifting_spark_offscreen_is_dropped_without_coins() {
    let mut g = playing(quest_no_spawn());
    let mut rng = rng();
    g.sparks.push(Spark {
        x: -(g.tuning.spark_size + 1.0),
        y: 10.0,
        w: g.tuning.spark_size,
        h: g.tuning.spark_size,
    });
    g.update(&mut rng).unwrap();
    assert_eq!(g.coins, 0);
    assert!(g.sparks.is_empty());
}

// ── Crown ────────────────────────────────────────────────────────────────────

fn quest_with_threshold(threshold: u32) -> Tuning {
    let mut t = quest_no_spawn();
    t.crown = Some(CrownRule { threshold, size: 40.0 });
    t
}

#[test]
fn crown_spawns_exactly_once_at_threshold() {
    let mut g = playing(quest_with_threshold(1));
    let mut rng = rng();

    g.update(&mut rng).unwrap();
    assert!(g.crown.is_none(), "not before the threshold");

    g.score = 1;
    g.update(&mut rng).unwrap();
    assert!(g.crown.is_some());
    assert!(g.crown_spawned);

    // Even if the crown disappears, the threshold never re-arms.
    g.crown = None;
    g.update(&mut rng).unwrap();
    assert!(g.crown.is_none());
}

#[test]
fn crown_drifts_left_at_tower_speed() {
    let mut g = playing(quest_with_threshold(0));
    let mut rng = rng();
    g.update(&mut rng).unwrap();
    let x0 = g.crown.as_ref().unwrap().x;
    g.update(&mut rng).unwrap();
    let x1 = g.crown.as_ref().unwrap().x;
    assert!((x0 - x1 - g.tuning.tower_speed).abs() < 1e-9);
}

#[test]
fn touching_the_crown_wins() {
    let mut g = playing(quest_no_spawn());
    let mut rng = rng();
    g.crown_spawned = true;
    g.crown = Some(Crown {
        x: g.player.x + 5.0,
        y: g.player.y,
        w: 40.0,
        h: 40.0,
    });
    g.update(&mut rng).unwrap();
    assert_eq!(g.phase, Phase::Win);
}

#[test]
fn missed_crown_is_forfeited() {
    let mut g = playing(quest_with_threshold(0));
    let mut rng = rng();
    g.update(&mut rng).unwrap();
    assert!(g.crown.is_some());
    // Teleport it just past the left edge; next frame removes it.
    if let Some(c) = g.crown.as_mut() {
        c.x = -(c.w + 1.0);
    }
    g.update(&mut rng).unwrap();
    assert!(g.crown.is_none());
    assert!(g.crown_spawned, "no respawn after a miss");
    assert_eq!(g.phase, Phase::Playing);
}

// ── Phase machine & restart ──────────────────────────────────────────────────

#[test]
fn start_is_only_legal_from_ready() {
    let mut g = Game::new(Tuning::classic());
    assert!(g.start().is_ok());
    assert!(g.start().is_err(), "starting mid-round is rejected");
}

#[test]
fn restart_is_only_legal_from_a_terminal_phase() {
    let mut g = Game::new(Tuning::classic());
    assert!(g.restart().is_err());
    g.start().unwrap();
    assert!(g.restart().is_err());
}

#[test]
fn restart_resets_the_session_but_keeps_best() {
    let mut g = playing(Tuning::classic());
    let mut rng = rng();

    g.score = 9;
    g.coins = 4;
    g.towers.push(Tower {
        x: 300.0,
        w: g.tuning.tower_w,
        gap_top: 100.0,
        gap_bot: 300.0,
        scored: false,
    });
    g.player.y = -100.0;
    g.update(&mut rng).unwrap();
    assert_eq!(g.phase, Phase::GameOver);

    g.restart().unwrap();

    assert_eq!(g.phase, Phase::Playing);
    assert_eq!(g.score, 0);
    assert_eq!(g.coins, 0);
    assert_eq!(g.frame, 0);
    assert!(g.towers.is_empty());
    assert!(g.clouds.is_empty());
    assert!(g.crown.is_none());
    assert!(!g.crown_spawned);
    assert_eq!(g.player.y, g.tuning.field_h / 2.0);
    assert_eq!(g.player.vy, 0.0);
    assert_eq!(g.best, 9);
    // The homing singleton is rebuilt at field center.
    assert_eq!(g.sparks.len(), 1);
    assert_eq!(g.sparks[0].x, g.tuning.field_w / 2.0);
}

#[test]
fn primary_action_flaps_starts_and_restarts() {
    let mut g = Game::new(Tuning::classic());
    assert_eq!(g.phase, Phase::Ready);

    g.primary_action().unwrap();
    assert_eq!(g.phase, Phase::Playing);
    assert_eq!(g.player.vy, g.tuning.lift);

    g.player.vy = 3.0;
    g.primary_action().unwrap();
    assert_eq!(g.player.vy, g.tuning.lift);

    g.player.y = -100.0;
    g.update(&mut rng()).unwrap();
    assert_eq!(g.phase, Phase::GameOver);
    g.primary_action().unwrap();
    assert_eq!(g.phase, Phase::Playing);
}

#[test]
fn preset_switch_only_applies_on_the_attract_screen() {
    let mut g = Game::new(Tuning::quest());
    g.switch_tuning(Tuning::classic());
    assert!(g.tuning.crown.is_none(), "classic has no crown");
    assert_eq!(g.sparks.len(), 1, "classic carries the homing singleton");

    g.start().unwrap();
    g.switch_tuning(Tuning::quest());
    assert!(g.tuning.crown.is_none(), "ignored mid-round");
}
