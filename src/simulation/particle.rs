//! Point mass with position and velocity in a shared unit system

use std::sync::Arc;

use crate::simulation::errors::NumericDegeneracy;
use crate::simulation::units::UnitSystem;
use crate::simulation::vector::Vector2D;

#[derive(Debug, Clone)]
pub struct Particle {
    mass: f64,
    pub position: Vector2D,
    pub velocity: Vector2D,
    unit_system: Arc<UnitSystem>, // shared read-only working units
}

impl Particle {
    /// `mass` is taken as given; input parsing rejects non-positive or
    /// non-finite values before a particle is built
    pub fn new(
        mass: f64,
        position: Vector2D,
        velocity: Vector2D,
        unit_system: Arc<UnitSystem>,
    ) -> Self {
        Self {
            mass,
            position,
            velocity,
            unit_system,
        }
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn unit_system(&self) -> &Arc<UnitSystem> {
        &self.unit_system
    }

    pub fn kinetic_energy(&self) -> f64 {
        let speed = self.velocity.abs();
        0.5 * self.mass * speed * speed
    }

    /// Pairwise potential energy `-G m1 m2 / r`
    pub fn potential_energy(&self, other: &Particle) -> Result<f64, NumericDegeneracy> {
        let distance = (self.position - other.position).abs();
        if distance == 0.0 {
            return Err(NumericDegeneracy::ZeroSeparation);
        }
        Ok(-self.unit_system.gravity_constant * self.mass * other.mass / distance)
    }

    /// Unit-mass acceleration this particle feels from `other`: `-G d / |d|^3`
    /// with `d = self.position - other.position`.
    ///
    /// Scale by `other.mass()` for the pull on `self`, and by `-self.mass()`
    /// for the reaction on `other`.
    pub fn gravity_acceleration_factor(
        &self,
        other: &Particle,
    ) -> Result<Vector2D, NumericDegeneracy> {
        let d = self.position - other.position;
        let r = d.abs();
        if r == 0.0 {
            return Err(NumericDegeneracy::ZeroSeparation);
        }
        Ok(-self.unit_system.gravity_constant / (r * r * r) * d)
    }

    pub fn update_position(&mut self, velocity: Vector2D, time_step: f64) {
        self.position = self.position + velocity * time_step;
    }

    pub fn update_velocity(&mut self, acceleration: Vector2D, time_step: f64) {
        self.velocity = self.velocity + acceleration * time_step;
    }
}
