//! # ballsim
//!
//! Fixed-timestep 2D physics for equal discs bouncing in a walled arena under
//! constant gravity.
//!
//! The host owns a [`World`], calls [`World::step`] once per frame and reads
//! [`World::snapshot`] to draw. Nothing in the core renders, sleeps or keeps global
//! state.
//!
//! ```rust
//! use ballsim::{Arena, Ball, Vector, World};
//!
//! let balls = vec![
//!     Ball::new(Vector::planar(100.0, 100.0), Vector::planar(2.0, 3.0))?,
//!     Ball::new(Vector::planar(300.0, 200.0), Vector::planar(-1.0, -2.0))?,
//! ];
//! let mut world = World::new(balls, Vector::planar(0.0, 0.3), Arena::new(640.0, 480.0), 20.0)?;
//! for _ in 0..600 {
//!     world.step();
//! }
//! for disc in world.snapshot() {
//!     assert!(disc.center.x >= disc.radius && disc.center.x <= 640.0 - disc.radius);
//! }
//! # Ok::<(), ballsim::error::Error>(())
//! ```

pub mod config;
pub mod core;
pub mod error;

#[cfg(feature = "python")]
mod python;

pub use crate::config::ScenarioConfig;
pub use crate::core::{Arena, Ball, Disc, StepStats, Vector, World};
