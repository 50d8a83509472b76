//! Core game logic and rendering for skydart.
//!
//! Everything except terminal and audio I/O lives here so the
//! simulation can be driven headlessly from tests. The binary in
//! `main.rs` owns the event loop, the terminal, and the speakers.

pub mod audio;
pub mod entities;
pub mod game;
pub mod phase;
pub mod pixel;
pub mod render;
pub mod tuning;
