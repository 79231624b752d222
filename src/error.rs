use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the physics core and scenario loading.
///
/// Configuration problems surface once, when a [`World`](crate::core::World) is built.
/// Geometric degeneracies are reported by the vector operations and handled locally
/// by the engine, so a running simulation never fails mid-step.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid scenario, arena, radius, gravity or ball state.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An operation needed a direction from a zero-length vector.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(&'static str),

    /// Scenario file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Scenario file is not valid YAML for the expected schema.
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
