//! Time integrators for the particle system
//!
//! Four interchangeable schemes, resolved once from the configuration:
//! - `euler` – explicit Euler, first order
//! - `kdk`   – kick-drift-kick leapfrog, second order, symplectic
//! - `dkd`   – drift-kick-drift leapfrog, second order, symplectic
//! - `rk4`   – classical 4th-order Runge–Kutta, not symplectic
//!
//! Every scheme advances the whole step with the `dt` it is handed. A step size
//! recomputed mid-step only applies to the next step.

use std::fmt;
use std::str::FromStr;

use crate::simulation::errors::{ConfigError, NumericDegeneracy};
use crate::simulation::forces::{NewtonianGravity, StepPolicy};
use crate::simulation::particle::Particle;
use crate::simulation::vector::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrationMethod {
    Euler,
    Kdk,
    Dkd,
    Rk4,
}

/// Step sizes of one `advance` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub taken: f64, // the clock advances by this much
    pub next: f64,  // step size for the following call
}

impl FromStr for IntegrationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "euler" => Ok(IntegrationMethod::Euler),
            "kdk" => Ok(IntegrationMethod::Kdk),
            "dkd" => Ok(IntegrationMethod::Dkd),
            "rk4" => Ok(IntegrationMethod::Rk4),
            other => Err(ConfigError::UnsupportedIntegrationMethod(other.to_string())),
        }
    }
}

impl fmt::Display for IntegrationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrationMethod::Euler => "euler",
            IntegrationMethod::Kdk => "kdk",
            IntegrationMethod::Dkd => "dkd",
            IntegrationMethod::Rk4 => "rk4",
        };
        f.write_str(name)
    }
}

impl IntegrationMethod {
    /// Advance `particles` in place by one step of size `dt`.
    ///
    /// `accelerations` holds the accelerations of the current state on entry.
    /// Only `kdk` reads them; every scheme except fixed-step `rk4` replaces them
    /// with its last full-state evaluation.
    pub fn advance(
        self,
        particles: &mut [Particle],
        accelerations: &mut Vec<Vector2D>,
        dt: f64,
        gravity: &NewtonianGravity,
        policy: &StepPolicy,
    ) -> Result<Step, NumericDegeneracy> {
        match self {
            IntegrationMethod::Euler => euler(particles, accelerations, gravity, policy),
            IntegrationMethod::Kdk => {
                kick_drift_kick(particles, accelerations, dt, gravity, policy)
            }
            IntegrationMethod::Dkd => {
                drift_kick_drift(particles, accelerations, dt, gravity, policy)
            }
            IntegrationMethod::Rk4 => runge_kutta4(particles, accelerations, dt, gravity, policy),
        }
    }
}

/// x_n+1 = x_n + dt v_n, v_n+1 = v_n + dt a_n
/// The step comes from the accelerations of this very state
fn euler(
    particles: &mut [Particle],
    accelerations: &mut Vec<Vector2D>,
    gravity: &NewtonianGravity,
    policy: &StepPolicy,
) -> Result<Step, NumericDegeneracy> {
    let field = gravity.accelerations(particles, policy)?;
    let dt = field.time_step;

    for (p, a) in particles.iter_mut().zip(field.accelerations.iter()) {
        let v = p.velocity;
        p.update_position(v, dt);
        p.update_velocity(*a, dt);
    }

    *accelerations = field.accelerations;
    Ok(Step { taken: dt, next: dt })
}

fn kick_drift_kick(
    particles: &mut [Particle],
    accelerations: &mut Vec<Vector2D>,
    dt: f64,
    gravity: &NewtonianGravity,
    policy: &StepPolicy,
) -> Result<Step, NumericDegeneracy> {
    let half_dt = 0.5 * dt;

    // Kick with a_n, then drift: v_n+1/2 = v_n + dt/2 a_n, x_n+1 = x_n + dt v_n+1/2
    for (p, a) in particles.iter_mut().zip(accelerations.iter()) {
        p.update_velocity(*a, half_dt);
        let v = p.velocity;
        p.update_position(v, dt);
    }

    // a_n+1 at x_n+1
    let field = gravity.accelerations(particles, policy)?;

    // v_n+1 = v_n+1/2 + dt/2 a_n+1
    for (p, a) in particles.iter_mut().zip(field.accelerations.iter()) {
        p.update_velocity(*a, half_dt);
    }

    *accelerations = field.accelerations;
    Ok(Step { taken: dt, next: field.time_step })
}

fn drift_kick_drift(
    particles: &mut [Particle],
    accelerations: &mut Vec<Vector2D>,
    dt: f64,
    gravity: &NewtonianGravity,
    policy: &StepPolicy,
) -> Result<Step, NumericDegeneracy> {
    let half_dt = 0.5 * dt;

    // x_n+1/2 = x_n + dt/2 v_n
    for p in particles.iter_mut() {
        let v = p.velocity;
        p.update_position(v, half_dt);
    }

    // a at the midpoint
    let field = gravity.accelerations(particles, policy)?;

    // v_n+1 = v_n + dt a_mid, x_n+1 = x_n+1/2 + dt/2 v_n+1
    for (p, a) in particles.iter_mut().zip(field.accelerations.iter()) {
        p.update_velocity(*a, dt);
        let v = p.velocity;
        p.update_position(v, half_dt);
    }

    *accelerations = field.accelerations;
    Ok(Step { taken: dt, next: field.time_step })
}

/// Copy of `origin` advanced by `h` with the velocities of `previous` and the
/// accelerations `previous_accelerations`
fn rk4_stage(
    origin: &[Particle],
    previous: &[Particle],
    previous_accelerations: &[Vector2D],
    h: f64,
) -> Vec<Particle> {
    origin
        .iter()
        .zip(previous.iter().zip(previous_accelerations.iter()))
        .map(|(p, (k, a))| {
            let mut stage = p.clone();
            stage.update_position(k.velocity, h);
            stage.update_velocity(*a, h);
            stage
        })
        .collect()
}

fn runge_kutta4(
    particles: &mut [Particle],
    accelerations: &mut Vec<Vector2D>,
    dt: f64,
    gravity: &NewtonianGravity,
    policy: &StepPolicy,
) -> Result<Step, NumericDegeneracy> {
    let half_dt = 0.5 * dt;

    // Stages never adapt the step
    let stage_policy = StepPolicy::fixed(dt);

    let k1 = particles.to_vec();
    let a1 = gravity.accelerations(&k1, &stage_policy)?.accelerations;

    let k2 = rk4_stage(particles, &k1, &a1, half_dt);
    let a2 = gravity.accelerations(&k2, &stage_policy)?.accelerations;

    let k3 = rk4_stage(particles, &k2, &a2, half_dt);
    let a3 = gravity.accelerations(&k3, &stage_policy)?.accelerations;

    let k4 = rk4_stage(particles, &k3, &a3, dt);
    let a4 = gravity.accelerations(&k4, &stage_policy)?.accelerations;

    for (i, p) in particles.iter_mut().enumerate() {
        let v = (k1[i].velocity + 2.0 * k2[i].velocity + 2.0 * k3[i].velocity + k4[i].velocity)
            / 6.0;
        let a = (a1[i] + 2.0 * a2[i] + 2.0 * a3[i] + a4[i]) / 6.0;
        p.update_position(v, dt);
        p.update_velocity(a, dt);
    }

    // Adaptive step is evaluated once, against the post-step state
    let next = if policy.adaptive.is_some() {
        let field = gravity.accelerations(particles, policy)?;
        *accelerations = field.accelerations;
        field.time_step
    } else {
        policy.fixed_time_step
    };

    Ok(Step { taken: dt, next })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::units::UnitSystem;
    use std::sync::Arc;

    const ALL_METHODS: [IntegrationMethod; 4] = [
        IntegrationMethod::Euler,
        IntegrationMethod::Kdk,
        IntegrationMethod::Dkd,
        IntegrationMethod::Rk4,
    ];

    /// Equal-mass binary on a circular orbit in G = 1 units
    fn binary() -> Vec<Particle> {
        let units = Arc::new(UnitSystem::new("G1").unwrap());
        let g = units.gravity_constant;
        // separation 2, each body at radius 1: v^2 / 1 = G m / 4
        let v = (g * 1.0 / 4.0).sqrt();
        vec![
            Particle::new(1.0, Vector2D::new(-1.0, 0.0), Vector2D::new(0.0, -v), units.clone()),
            Particle::new(1.0, Vector2D::new(1.0, 0.0), Vector2D::new(0.0, v), units),
        ]
    }

    #[test]
    fn parses_known_methods() {
        for name in ["euler", "kdk", "dkd", "rk4"] {
            let method: IntegrationMethod = name.parse().unwrap();
            assert_eq!(method.to_string(), name);
        }
    }

    #[test]
    fn rejects_unknown_method_by_name() {
        let err = "verlet".parse::<IntegrationMethod>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedIntegrationMethod(ref s) if s == "verlet"));
        assert!(err.to_string().contains("'verlet'"));
    }

    #[test]
    fn every_method_conserves_momentum() {
        let gravity = NewtonianGravity;
        let policy = StepPolicy::fixed(0.01);

        for method in ALL_METHODS {
            let mut ps = binary();
            let mut acc = gravity.accelerations(&ps, &policy).unwrap().accelerations;
            for _ in 0..100 {
                method.advance(&mut ps, &mut acc, 0.01, &gravity, &policy).unwrap();
            }
            let p = ps[0].velocity * ps[0].mass() + ps[1].velocity * ps[1].mass();
            assert!(p.abs() < 1e-12, "{method}: net momentum {p}");
        }
    }

    #[test]
    fn fixed_policy_keeps_step() {
        let gravity = NewtonianGravity;
        let policy = StepPolicy::fixed(0.05);
        let mut ps = binary();
        let mut acc = gravity.accelerations(&ps, &policy).unwrap().accelerations;

        for method in ALL_METHODS {
            let step = method.advance(&mut ps, &mut acc, 0.05, &gravity, &policy).unwrap();
            assert_eq!(step, Step { taken: 0.05, next: 0.05 });
        }
    }

    #[test]
    fn adaptive_rk4_reports_post_step_size() {
        let gravity = NewtonianGravity;
        let policy = StepPolicy::adaptive(0.05, 0.001);
        let mut ps = binary();
        let field = gravity.accelerations(&ps, &policy).unwrap();
        let mut acc = field.accelerations;

        let step = IntegrationMethod::Rk4
            .advance(&mut ps, &mut acc, field.time_step, &gravity, &policy)
            .unwrap();

        let expected = gravity.accelerations(&ps, &policy).unwrap().time_step;
        assert_eq!(step.taken, field.time_step);
        assert_eq!(step.next, expected);
    }
}
