//! Core data structures for the Verdant simulation.

pub mod entity;
pub mod events;
pub mod food;
pub mod geometry;
pub mod ids;
