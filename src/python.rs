use numpy::ndarray::Array2;
use numpy::{IntoPyArray, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::ScenarioConfig;
use crate::core::{Arena, Ball, Vector, World};

fn py_err<E: ToString>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn to_array2(rows: impl ExactSizeIterator<Item = Vector>) -> Array2<f64> {
    let mut arr = Array2::<f64>::zeros((rows.len(), 2));
    for (i, v) in rows.enumerate() {
        arr[[i, 0]] = v.x;
        arr[[i, 1]] = v.y;
    }
    arr
}

fn rows_from(arr: &PyReadonlyArray2<'_, f64>, what: &str) -> PyResult<Vec<Vector>> {
    let view = arr.as_array();
    if view.shape()[1] != 2 {
        return Err(py_err(format!(
            "{what} must have shape (N, 2), got {:?}",
            view.shape()
        )));
    }
    Ok(view
        .rows()
        .into_iter()
        .map(|r| Vector::planar(r[0], r[1]))
        .collect())
}

/// Python-facing wrapper around [`World`].
///
/// API:
/// - __new__(positions, velocities, gravity=(0, 0.3), width=640, height=480, radius=20, restitution=1)
/// - demo() -> BallSim
/// - step(), advance(steps)
/// - get_positions() / get_velocities() -> np.ndarray, shape (N, 2)
#[pyclass]
pub struct BallSim {
    world: World,
}

#[pymethods]
impl BallSim {
    /// Build a world from (N, 2) position and velocity arrays.
    ///
    /// Errors: raises ValueError on mismatched shapes or invalid configuration.
    #[new]
    #[pyo3(signature = (positions, velocities, gravity=(0.0, 0.3), width=640.0, height=480.0, radius=20.0, restitution=1.0))]
    fn new(
        positions: PyReadonlyArray2<'_, f64>,
        velocities: PyReadonlyArray2<'_, f64>,
        gravity: (f64, f64),
        width: f64,
        height: f64,
        radius: f64,
        restitution: f64,
    ) -> PyResult<Self> {
        let ps = rows_from(&positions, "positions")?;
        let vs = rows_from(&velocities, "velocities")?;
        if ps.len() != vs.len() {
            return Err(py_err(format!(
                "got {} positions but {} velocities",
                ps.len(),
                vs.len()
            )));
        }
        let balls = ps
            .into_iter()
            .zip(vs)
            .map(|(p, v)| Ball::new(p, v))
            .collect::<crate::error::Result<Vec<_>>>()
            .map_err(py_err)?;
        let world = World::new(balls, gravity.into(), Arena::new(width, height), radius)
            .and_then(|w| w.with_restitution(restitution))
            .map_err(py_err)?;
        Ok(Self { world })
    }

    /// The built-in eight-ball demo scenario.
    #[staticmethod]
    fn demo() -> PyResult<Self> {
        let world = ScenarioConfig::demo().build_world().map_err(py_err)?;
        Ok(Self { world })
    }

    /// Load a YAML scenario file.
    #[staticmethod]
    fn from_scenario(path: &str) -> PyResult<Self> {
        let world = ScenarioConfig::from_path(path)
            .and_then(|cfg| cfg.build_world())
            .map_err(py_err)?;
        Ok(Self { world })
    }

    /// Advance one timestep.
    fn step(&mut self) {
        self.world.step();
    }

    /// Advance `steps` timesteps (releases the GIL during computation).
    fn advance(&mut self, py: Python<'_>, steps: u64) {
        py.detach(|| self.world.advance(steps));
    }

    /// Number of completed steps.
    fn frame(&self) -> u64 {
        self.world.frame()
    }

    fn radius(&self) -> f64 {
        self.world.radius()
    }

    fn kinetic_energy(&self) -> f64 {
        self.world.kinetic_energy()
    }

    /// Ball centers as a NumPy array of shape (N, 2), dtype=float64.
    fn get_positions(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        let arr = to_array2(self.world.balls().iter().map(|b| b.position));
        arr.into_pyarray(py).unbind()
    }

    /// Ball velocities as a NumPy array of shape (N, 2), dtype=float64.
    fn get_velocities(&self, py: Python<'_>) -> Py<PyArray2<f64>> {
        let arr = to_array2(self.world.balls().iter().map(|b| b.velocity));
        arr.into_pyarray(py).unbind()
    }
}

/// The ballsim Python module entry point.
#[pymodule]
fn ballsim(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<BallSim>()?;
    Ok(())
}
