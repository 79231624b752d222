//! Physics core: vector algebra, the ball entity and the stepping world.

pub mod ball;
pub mod vector;
pub mod world;

pub use ball::Ball;
pub use vector::Vector;
pub use world::{Arena, Disc, StepStats, World};
