//! NEON RACER: a lane-dodging arcade racer drawn with half-block pixels.
//!
//! [`world::World`] is the simulation; [`state::App`] drives it together with
//! the menus, persistence and sound.

pub mod audio;
pub mod clock;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod input;
pub mod menu;
pub mod render;
pub mod scores;
pub mod settings;
pub mod state;
pub mod storage;
pub mod world;
