//! Plain data shared by the simulation core and the terminal front-end.

pub mod data;

pub use data::food::FoodMarker;
pub use data::geometry::Point;
pub use data::neuron::{Connection, NeuronCategory};
pub use data::overlay::{Overlay, Rgba, Shape};
