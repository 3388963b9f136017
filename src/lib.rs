//! Zombsole - Arena-Combat Zombie Simulator

pub mod core;
pub mod game;
pub mod map;
pub mod renderer;
pub mod rules;
pub mod things;
pub mod weapons;
pub mod world;
