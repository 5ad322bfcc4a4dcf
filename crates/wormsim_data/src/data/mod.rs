//! Core data structures for the Wormsim simulation.

pub mod food;
pub mod geometry;
pub mod neuron;
pub mod overlay;
