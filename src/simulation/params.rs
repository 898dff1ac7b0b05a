//! Numerical and physical parameters for a run
//!
//! `Parameters` is the validated, typed form of a [`RunConfig`]:
//! - working unit system, shared by every particle of every file,
//! - step size and adaptive stepping bound,
//! - time and iteration limits,
//! - write period and the resolved integration method

use std::sync::Arc;

use crate::configuration::config::RunConfig;
use crate::simulation::errors::ConfigError;
use crate::simulation::forces::StepPolicy;
use crate::simulation::integrator::IntegrationMethod;
use crate::simulation::units::UnitSystem;

#[derive(Debug, Clone)]
pub struct Parameters {
    pub unit_system: Arc<UnitSystem>,
    pub fixed_time_step: f64,
    pub max_velocity_step: f64,
    pub enable_adaptive_time_step: bool,
    pub max_time: f64,
    pub max_iterations: u64, // 0 = unbounded
    pub write_state_period: f64,
    pub integration_method: IntegrationMethod,
}

impl Parameters {
    pub fn from_config(cfg: &RunConfig) -> Result<Self, ConfigError> {
        let unit_system = Arc::new(UnitSystem::new(&cfg.unit_system)?);
        let integration_method: IntegrationMethod = cfg.integration_method.parse()?;

        if !(cfg.fixed_time_step.is_finite() && cfg.fixed_time_step > 0.0) {
            return Err(invalid("fixedTimeStep", cfg.fixed_time_step, "a finite number > 0"));
        }
        let velocity_step_ok = cfg.max_velocity_step.is_finite() && cfg.max_velocity_step > 0.0;
        if cfg.enable_adaptive_time_step && !velocity_step_ok {
            return Err(invalid("maxVelocityStep", cfg.max_velocity_step, "a finite number > 0"));
        }
        if cfg.max_time.is_nan() {
            return Err(invalid("maxTime", cfg.max_time, "a number"));
        }
        if !(cfg.write_state_period.is_finite() && cfg.write_state_period >= 0.0) {
            return Err(invalid("writeStatePeriod", cfg.write_state_period, "a finite number >= 0"));
        }

        Ok(Self {
            unit_system,
            fixed_time_step: cfg.fixed_time_step,
            max_velocity_step: cfg.max_velocity_step,
            enable_adaptive_time_step: cfg.enable_adaptive_time_step,
            max_time: cfg.max_time,
            max_iterations: cfg.max_iterations,
            write_state_period: cfg.write_state_period,
            integration_method,
        })
    }

    pub fn step_policy(&self) -> StepPolicy {
        if self.enable_adaptive_time_step {
            StepPolicy::adaptive(self.fixed_time_step, self.max_velocity_step)
        } else {
            StepPolicy::fixed(self.fixed_time_step)
        }
    }
}

fn invalid(name: &'static str, value: f64, expected: &'static str) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        value: value.to_string(),
        expected,
    }
}
