//! Acceleration contributors for the n-body engine
//!
//! Direct-summation Newtonian gravity over all unordered pairs, plus the
//! step policy that turns the strongest acceleration into the next time step

use crate::simulation::errors::NumericDegeneracy;
use crate::simulation::particle::Particle;
use crate::simulation::vector::Vector2D;

/// How the integrator picks the time step after an acceleration pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepPolicy {
    pub fixed_time_step: f64,
    pub adaptive: Option<f64>, // Some(max velocity change per step) when adaptive stepping is on
}

impl StepPolicy {
    pub fn fixed(time_step: f64) -> Self {
        Self {
            fixed_time_step: time_step,
            adaptive: None,
        }
    }

    pub fn adaptive(fixed_time_step: f64, max_velocity_step: f64) -> Self {
        Self {
            fixed_time_step,
            adaptive: Some(max_velocity_step),
        }
    }

    /// Step size for the given worst-case acceleration.
    /// A zero or vanishing field gives no usable bound, so the fixed step is used instead
    pub fn time_step(&self, max_acceleration: f64) -> f64 {
        let Some(max_velocity_step) = self.adaptive else {
            return self.fixed_time_step;
        };

        let step = max_velocity_step / max_acceleration;
        if step.is_finite() && step > 0.0 {
            step
        } else {
            self.fixed_time_step
        }
    }
}

/// Result of one acceleration pass
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerationField {
    pub accelerations: Vec<Vector2D>, // one per particle, same order
    pub max_acceleration: f64,
    pub time_step: f64, // step to take next, per the policy
}

/// Source of per-particle accelerations
/// Implementations add their contribution into `out[i]` for each particle
pub trait Acceleration {
    fn acceleration(
        &self,
        particles: &[Particle],
        out: &mut [Vector2D],
    ) -> Result<(), NumericDegeneracy>;
}

/// Direct O(n^2) Newtonian gravity, no softening
#[derive(Debug, Clone, Copy, Default)]
pub struct NewtonianGravity;

impl Acceleration for NewtonianGravity {
    fn acceleration(
        &self,
        particles: &[Particle],
        out: &mut [Vector2D],
    ) -> Result<(), NumericDegeneracy> {
        let n = particles.len();

        // Each unordered pair (i, j) with i < j is visited once
        for i in 0..n {
            let pi = &particles[i];

            for j in (i + 1)..n {
                let pj = &particles[j];

                // unit-mass pull on i toward j
                let factor = pi.gravity_acceleration_factor(pj).map_err(|e| e.between(i, j))?;

                // equal and opposite
                out[i] += factor * pj.mass();
                out[j] -= factor * pi.mass();
            }
        }
        Ok(())
    }
}

impl NewtonianGravity {
    /// Accelerations for the current state plus the step the policy derives from them
    pub fn accelerations(
        &self,
        particles: &[Particle],
        policy: &StepPolicy,
    ) -> Result<AccelerationField, NumericDegeneracy> {
        let mut accelerations = vec![Vector2D::zeros(); particles.len()];
        self.acceleration(particles, &mut accelerations)?;

        let max_acceleration = accelerations.iter().map(Vector2D::abs).fold(0.0, f64::max);

        Ok(AccelerationField {
            time_step: policy.time_step(max_acceleration),
            accelerations,
            max_acceleration,
        })
    }
}
