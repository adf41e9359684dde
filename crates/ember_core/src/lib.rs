//! Ember Core - scene data model for the path tracer.
//!
//! This crate provides:
//!
//! - **Geometry**: [`Triangle`] with face normal, albedo, and emission
//! - **Scene**: [`Scene`], an immutable validated triangle list
//! - **Loading**: JSON scene assets via [`Scene::from_json`]
//!
//! # Example
//!
//! ```
//! use ember_core::Scene;
//!
//! let scene = Scene::cornell_box();
//! println!("Loaded {} triangles", scene.len());
//! ```

pub mod scene;

// Re-export commonly used types
pub use scene::{Scene, SceneError, Triangle};
