//! Force-directed 3D layout and pointer picking for character co-occurrence graphs.
//!
//! The flow is one-way: a [`dataset::Dataset`] becomes a [`graph::Graph`], a
//! [`layout::ForceLayout`] relaxes it once, and the resulting positions back the
//! [`pick::PickableBody`] values that [`pick::resolve`] and [`hover::HoverController`]
//! work on every pointer move.

pub mod camera;
pub mod dataset;
pub mod graph;
pub mod hover;
pub mod layout;
pub mod palette;
pub mod pick;
