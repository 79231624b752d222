use crate::core::{Ball, Vector};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, trace};

/// Coefficient of restitution for a perfectly elastic collision.
pub const ELASTIC: f64 = 1.0;

/// Rectangular arena `[0, width] x [0, height]` bounding every ball center
/// (inset by the radius).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Clamp a ball back inside the arena, negating the velocity component of each
    /// axis it crossed. Returns the number of walls hit (0..=2).
    fn confine(&self, ball: &mut Ball, radius: f64) -> u32 {
        let mut hits = 0;
        if confine_axis(&mut ball.position.x, &mut ball.velocity.x, radius, self.width) {
            hits += 1;
        }
        if confine_axis(&mut ball.position.y, &mut ball.velocity.y, radius, self.height) {
            hits += 1;
        }
        hits
    }
}

/// Read-only view of one ball for rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Vector,
    pub radius: f64,
}

/// Counters gathered during a single [`World::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    /// Approaching or tangential pairs that received an impulse and separation.
    pub contacts_resolved: u32,
    /// Overlapping pairs already moving apart; left untouched.
    pub separating_skipped: u32,
    /// Overlapping pairs with coincident centers; no normal exists, left untouched.
    pub degenerate_skipped: u32,
    /// Wall reflections across all balls.
    pub wall_hits: u32,
}

/// Outcome of checking a single pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOutcome {
    Apart,
    Resolved,
    Separating,
    Degenerate,
}

/// The simulated system: balls of a shared radius in a walled arena under
/// constant gravity.
///
/// The world is advanced one fixed timestep at a time by [`World::step`]. Velocities
/// are in length units per step and gravity in length units per step squared.
#[derive(Debug, Clone)]
pub struct World {
    balls: Vec<Ball>,
    gravity: Vector,
    arena: Arena,
    radius: f64,
    restitution: f64,
    frame: u64,
    last_step: StepStats,
}

impl World {
    /// Create a world from an initial roster.
    ///
    /// Errors:
    /// - `Error::InvalidConfig` if `radius` is not finite and > 0, if either arena
    ///   dimension is smaller than `2 * radius`, if `gravity` is not finite, or if any
    ///   ball has non-finite state.
    ///
    /// Balls may start outside the arena; the first step clamps them back in.
    pub fn new(balls: Vec<Ball>, gravity: Vector, arena: Arena, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidConfig("radius must be finite and > 0".into()));
        }
        if !arena.width.is_finite() || !arena.height.is_finite() {
            return Err(Error::InvalidConfig("arena size must be finite".into()));
        }
        if arena.width < 2.0 * radius || arena.height < 2.0 * radius {
            return Err(Error::InvalidConfig(format!(
                "arena {}x{} is smaller than the ball diameter {}",
                arena.width,
                arena.height,
                2.0 * radius
            )));
        }
        if !gravity.is_finite() {
            return Err(Error::InvalidConfig("gravity must be finite".into()));
        }
        if let Some(idx) = balls
            .iter()
            .position(|b| !b.position.is_finite() || !b.velocity.is_finite())
        {
            return Err(Error::InvalidConfig(format!(
                "ball {idx} has non-finite position or velocity"
            )));
        }

        debug!(
            balls = balls.len(),
            width = arena.width,
            height = arena.height,
            radius,
            gravity = %gravity,
            "world created"
        );

        Ok(Self {
            balls,
            gravity,
            arena,
            radius,
            restitution: ELASTIC,
            frame: 0,
            last_step: StepStats::default(),
        })
    }

    /// Create a world with `count` balls placed without overlap inside the arena.
    ///
    /// Positions are rejection sampled in `[radius, L - radius]`; velocity
    /// components are uniform in `[-max_speed, max_speed]` in the XY plane.
    pub fn random(
        count: usize,
        arena: Arena,
        radius: f64,
        gravity: Vector,
        max_speed: f64,
        seed: Option<u64>,
    ) -> Result<Self> {
        if !max_speed.is_finite() || max_speed < 0.0 {
            return Err(Error::InvalidConfig(
                "max_speed must be finite and >= 0".into(),
            ));
        }
        // Validates radius and arena before sampling from their ranges.
        let mut world = Self::new(Vec::with_capacity(count), gravity, arena, radius)?;

        let mut rng: StdRng = match seed {
            Some(s) => SeedableRng::seed_from_u64(s),
            None => SeedableRng::seed_from_u64(rng().random()),
        };

        let max_attempts = 100_000usize;
        for id in 0..count {
            let mut attempts = 0usize;
            let position = loop {
                if attempts >= max_attempts {
                    return Err(Error::InvalidConfig(format!(
                        "failed to place ball {id} without overlap; try fewer balls or a smaller radius"
                    )));
                }
                attempts += 1;
                let p = Vector::planar(
                    rng.random_range(radius..=arena.width - radius),
                    rng.random_range(radius..=arena.height - radius),
                );
                if !world.overlaps_existing(p) {
                    break p;
                }
            };
            let velocity = Vector::planar(
                rng.random_range(-max_speed..=max_speed),
                rng.random_range(-max_speed..=max_speed),
            );
            world.balls.push(Ball::new(position, velocity)?);
        }

        Ok(world)
    }

    /// Replace the coefficient of restitution (1 is elastic, 0 perfectly inelastic
    /// along the contact normal).
    pub fn with_restitution(mut self, restitution: f64) -> Result<Self> {
        if !restitution.is_finite() || !(0.0..=1.0).contains(&restitution) {
            return Err(Error::InvalidConfig(
                "restitution must be within [0, 1]".into(),
            ));
        }
        self.restitution = restitution;
        Ok(self)
    }

    /// Append a ball to the roster.
    pub fn push_ball(&mut self, ball: Ball) -> Result<()> {
        self.balls.push(Ball::new(ball.position, ball.velocity)?);
        Ok(())
    }

    /// Advance the whole system by one timestep.
    ///
    /// For each ball in roster order: apply gravity to the velocity, move by the new
    /// velocity, resolve contacts against every later ball, then reflect off the
    /// walls. Pairs are resolved in place, so a ball may be pushed again by a later
    /// pair within the same step.
    pub fn step(&mut self) {
        let mut stats = StepStats::default();
        let gravity = self.gravity;
        let n = self.balls.len();

        for i in 0..n {
            let ball = &mut self.balls[i];
            ball.velocity += gravity;
            ball.position += ball.velocity;

            for j in (i + 1)..n {
                let (head, tail) = self.balls.split_at_mut(j);
                match resolve_pair(&mut head[i], &mut tail[0], self.radius, self.restitution) {
                    PairOutcome::Apart => {}
                    PairOutcome::Resolved => stats.contacts_resolved += 1,
                    PairOutcome::Separating => stats.separating_skipped += 1,
                    PairOutcome::Degenerate => {
                        stats.degenerate_skipped += 1;
                        debug!(frame = self.frame, i, j, "coincident centers, pair skipped");
                    }
                }
            }

            stats.wall_hits += self.arena.confine(&mut self.balls[i], self.radius);
        }

        self.frame += 1;
        self.last_step = stats;
        trace!(frame = self.frame, ?stats, "step");
    }

    /// Run `steps` consecutive calls to [`World::step`].
    pub fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Number of completed steps.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Counters from the most recent step (all zero before the first step).
    pub fn last_step(&self) -> StepStats {
        self.last_step
    }

    /// Balls in roster order.
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    /// Number of balls.
    pub fn num_balls(&self) -> usize {
        self.balls.len()
    }

    /// Constant acceleration added to every velocity each step.
    pub fn gravity(&self) -> Vector {
        self.gravity
    }

    /// Arena bounds.
    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Radius shared by every ball.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Coefficient of restitution for ball-ball contacts.
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Render view: each ball's center and the shared radius, in roster order.
    pub fn snapshot(&self) -> impl Iterator<Item = Disc> + '_ {
        let radius = self.radius;
        self.balls.iter().map(move |b| Disc {
            center: b.position,
            radius,
        })
    }

    /// Ball centers in roster order.
    pub fn positions(&self) -> Vec<Vector> {
        self.balls.iter().map(|b| b.position).collect()
    }

    /// Ball velocities in roster order.
    pub fn velocities(&self) -> Vec<Vector> {
        self.balls.iter().map(|b| b.velocity).collect()
    }

    /// Total kinetic energy per unit mass (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.balls.iter().map(Ball::kinetic_energy).sum()
    }

    /// Total momentum per unit mass, i.e. the sum of velocities (diagnostic).
    pub fn momentum(&self) -> Vector {
        self.balls
            .iter()
            .fold(Vector::ZERO, |acc, b| acc + b.velocity)
    }

    fn overlaps_existing(&self, p: Vector) -> bool {
        let min_sq = (2.0 * self.radius) * (2.0 * self.radius);
        self.balls
            .iter()
            .any(|b| (b.position - p).magnitude_squared() < min_sq)
    }
}

/// Equal-mass contact response between two balls.
///
/// Only the component of the relative velocity along the contact normal is
/// exchanged; tangential motion passes through. Separating pairs are left
/// untouched, including their overlap.
fn resolve_pair(a: &mut Ball, b: &mut Ball, radius: f64, restitution: f64) -> PairOutcome {
    let delta = a.position - b.position;
    let distance = delta.magnitude();
    if distance >= 2.0 * radius {
        return PairOutcome::Apart;
    }

    let Ok(normal) = delta.unit() else {
        return PairOutcome::Degenerate;
    };

    let velocity_along_normal = (a.velocity - b.velocity).dot(normal);
    if velocity_along_normal > 0.0 {
        return PairOutcome::Separating;
    }

    // Both masses are 1, so 1/m_a + 1/m_b = 2.
    let impulse = normal * (-(1.0 + restitution) * velocity_along_normal / 2.0);
    a.velocity += impulse;
    b.velocity -= impulse;

    let separation = normal * ((2.0 * radius - distance) / 2.0);
    a.position += separation;
    b.position -= separation;

    PairOutcome::Resolved
}

/// Clamp one coordinate into `[radius, extent - radius]`, flipping the matching
/// velocity component. Only one side can be hit per call.
#[inline]
fn confine_axis(pos: &mut f64, vel: &mut f64, radius: f64, extent: f64) -> bool {
    if *pos - radius < 0.0 {
        *pos = radius;
        *vel = -*vel;
        true
    } else if *pos + radius > extent {
        *pos = extent - radius;
        *vel = -*vel;
        true
    } else {
        false
    }
}
