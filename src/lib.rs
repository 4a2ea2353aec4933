//! Verdant: a flocking artificial life world.
//!
//! `model` re-exports the engine crates under one roof and `app` drives a
//! world headlessly for a fixed number of ticks.

pub mod app;
pub mod model;
