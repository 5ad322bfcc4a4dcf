//! # Wormsim
//!
//! A nematode-like worm whose body follows an inverse-kinematics chain and
//! whose steering comes from a connectome, drawn in the terminal with its
//! neurons lighting up as they fire.
//!
//! The simulation lives in `wormsim_core`; this crate holds the interactive
//! app and the headless runner.

pub mod app;
pub mod headless;
