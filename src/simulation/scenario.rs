//! Generate input files for the three-body scattering ("fractal") experiment
//!
//! Each file holds an equal-mass circular binary plus a third star of the same
//! mass coming in on a hyperbolic trajectory. The grid sweeps the binary's
//! phase and the incoming star's impact parameter; plotting the outcome of
//! every run over that grid gives the fractal.

use std::f64::consts::PI;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::simulation::errors::SimError;
use crate::simulation::output::format_float;
use crate::simulation::units::UnitSystem;
use crate::simulation::vector::Vector2D;

#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBodyFractal {
    pub unit_system: String,
    pub mass: f64,
    pub binary_radius: f64,
    pub distance: f64, // initial x of the incoming star
    pub impact_steps: usize,
    pub phase_steps: usize,
    pub impact_range: (f64, f64),
    pub phase_range: (f64, f64),
}

impl Default for ThreeBodyFractal {
    fn default() -> Self {
        Self {
            unit_system: "solsys".to_string(),
            mass: 1.0,
            binary_radius: 0.5,
            distance: 50.0,
            impact_steps: 101,
            phase_steps: 101,
            impact_range: (-4.5, 7.5),
            phase_range: (0.0, PI),
        }
    }
}

/// Initial state of one body, in the scenario's unit system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub mass: f64,
    pub position: Vector2D,
    pub velocity: Vector2D,
}

fn linspace(range: (f64, f64), steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![range.0],
        _ => {
            let step = (range.1 - range.0) / (steps - 1) as f64;
            (0..steps).map(|i| range.0 + step * i as f64).collect()
        }
    }
}

impl ThreeBodyFractal {
    /// The three bodies for one `(impact, phase)` grid point
    pub fn bodies(&self, gravity_constant: f64, impact: f64, phase: f64) -> [BodyState; 3] {
        let (sin_phase, cos_phase) = phase.sin_cos();
        let binary_speed = 0.5 * (gravity_constant * self.mass / self.binary_radius).sqrt();

        let binary_position = Vector2D::new(cos_phase, sin_phase) * self.binary_radius;
        let binary_velocity = Vector2D::new(-sin_phase, cos_phase) * binary_speed;
        let (incoming_position, incoming_velocity) = self.incoming(gravity_constant, impact);

        [
            BodyState {
                mass: self.mass,
                position: binary_position,
                velocity: binary_velocity,
            },
            BodyState {
                mass: self.mass,
                position: -binary_position,
                velocity: -binary_velocity,
            },
            BodyState {
                mass: self.mass,
                position: incoming_position,
                velocity: incoming_velocity,
            },
        ]
    }

    /// Position and velocity of the incoming star, treating the binary as one
    /// point mass. Its speed at infinity is half the critical speed, and it
    /// starts at `x = distance` on the hyperbola with impact parameter `impact`.
    fn incoming(&self, gravity_constant: f64, impact: f64) -> (Vector2D, Vector2D) {
        // gravitational parameter of binary + incoming star
        let mu = 3.0 * gravity_constant * self.mass;
        let semi_major_axis = 2.0 * self.binary_radius;
        let critical_velocity = (mu / (2.0 * semi_major_axis)).sqrt();
        let inf_velocity = 0.5 * critical_velocity;

        let b = impact.abs();
        let d = self.distance;

        // hyperbolic semi-major axis, negative
        let a = -mu / (inf_velocity * inf_velocity);

        // head-on: straight radial infall
        if b == 0.0 {
            let speed = (mu * (2.0 / d - 1.0 / a)).sqrt();
            return (Vector2D::new(d, 0.0), Vector2D::new(-speed, 0.0));
        }

        let c = (a * a + b * b).sqrt();
        let theta = (-b / a).atan();
        let (sin_theta, cos_theta) = theta.sin_cos();

        // quadratic for |y| of the incoming star on the rotated hyperbola
        let qa = (sin_theta / a).powi(2) - (cos_theta / b).powi(2);
        let qb = -2.0 * sin_theta * ((d * cos_theta + c) / (a * a) + d * cos_theta / (b * b));
        let qc = ((d * cos_theta + c) / a).powi(2) - (d * sin_theta / b).powi(2) - 1.0;
        let y_abs = (-qb - (qb * qb - 4.0 * qa * qc).sqrt()) / (2.0 * qa);

        let r = (y_abs * y_abs + d * d).sqrt();
        // vis-viva
        let speed = (mu * (2.0 / r - 1.0 / a)).sqrt();

        let x = -y_abs * sin_theta + d * cos_theta + c;
        let gamma = (b / (a * a) * x / ((x / a).powi(2) - 1.0).sqrt()).atan();
        let angle = gamma - theta + PI;

        let sign = impact.signum();
        let position = Vector2D::new(d, sign * y_abs);
        let velocity = Vector2D::new(angle.cos(), angle.sin() * sign) * speed;

        (position, velocity)
    }

    /// Write the whole grid as `<dir>/<stem>_<index>.txt`, phase varying fastest.
    /// Returns the written paths in index order
    pub fn write_inputs(&self, dir: &Path, stem: &str) -> Result<Vec<PathBuf>, SimError> {
        let units = UnitSystem::new(&self.unit_system)?;

        fs::create_dir_all(dir).map_err(|source| SimError::Resource {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::with_capacity(self.impact_steps * self.phase_steps);
        for impact in linspace(self.impact_range, self.impact_steps) {
            for phase in linspace(self.phase_range, self.phase_steps) {
                let path = dir.join(format!("{stem}_{}.txt", paths.len()));
                let bodies = self.bodies(units.gravity_constant, impact, phase);
                write_input_file(&path, &self.unit_system, &bodies)?;
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

fn write_input_file(path: &Path, unit_system: &str, bodies: &[BodyState]) -> Result<(), SimError> {
    let resource = |source| SimError::Resource {
        path: path.to_path_buf(),
        source,
    };

    let mut out = BufWriter::new(File::create(path).map_err(resource)?);
    writeln!(out, "{unit_system}").map_err(resource)?;
    for body in bodies {
        writeln!(
            out,
            "{} {} {} {} {}",
            format_float(body.mass),
            format_float(body.position.x()),
            format_float(body.position.y()),
            format_float(body.velocity.x()),
            format_float(body.velocity.y()),
        )
        .map_err(resource)?;
    }
    out.flush().map_err(resource)
}
