//! Named unit bases and conversion between them
//!
//! A [`UnitSystem`] is a `(length, mass, time)` scale triple in SI plus the
//! gravitational constant rescaled into that basis. The basis table is fixed;
//! a run builds one working system and shares it through an `Arc`.

use crate::simulation::constants::{
    AU, DAY, DISTANCE_MOON, GRAVITY_CONSTANT, MASS_EARTH, MASS_SUN, PARSEC, YEAR,
};
use crate::simulation::errors::UnknownUnitSystem;

const UNIT_SYSTEM_IDS: [&str; 7] = ["si", "cgs", "solsys", "galactic", "earthmoon", "fff", "G1"];

/// `(length, mass, time)` scale factors in SI for a known id
fn basis(id: &str) -> Option<(f64, f64, f64)> {
    match id {
        "si" => Some((1.0, 1.0, 1.0)),
        "cgs" => Some((0.01, 0.001, 1.0)),
        "solsys" => Some((AU, MASS_SUN, YEAR)),
        "galactic" => Some((1000.0 * PARSEC, 1e10 * MASS_SUN, 1e9 * YEAR)),
        "earthmoon" => Some((DISTANCE_MOON, MASS_EARTH, DAY)),
        // furlong, firkin, fortnight
        "fff" => Some((201.168, 40.823_313_3, 1.2096e6)),
        // time unit chosen so that G = 1
        "G1" => Some((AU, MASS_SUN, (AU * AU * AU / MASS_SUN / GRAVITY_CONSTANT).sqrt())),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnitSystem {
    pub id: String,
    pub unit_length: f64,
    pub unit_mass: f64,
    pub unit_time: f64,
    pub unit_velocity: f64,
    pub gravity_constant: f64, // G expressed in this basis
}

impl UnitSystem {
    pub fn new(id: &str) -> Result<Self, UnknownUnitSystem> {
        let (unit_length, unit_mass, unit_time) =
            basis(id).ok_or_else(|| UnknownUnitSystem(id.to_string()))?;

        Ok(Self {
            id: id.to_string(),
            unit_length,
            unit_mass,
            unit_time,
            unit_velocity: unit_length / unit_time,
            gravity_constant: GRAVITY_CONSTANT
                / (unit_length * unit_length * unit_length / unit_mass / (unit_time * unit_time)),
        })
    }

    pub fn available_ids() -> &'static [&'static str] {
        &UNIT_SYSTEM_IDS
    }

    pub fn convert_length(&self, value: f64, source: &UnitSystem) -> f64 {
        convert_units(value, source.unit_length, self.unit_length)
    }

    pub fn convert_mass(&self, value: f64, source: &UnitSystem) -> f64 {
        convert_units(value, source.unit_mass, self.unit_mass)
    }

    pub fn convert_time(&self, value: f64, source: &UnitSystem) -> f64 {
        convert_units(value, source.unit_time, self.unit_time)
    }

    pub fn convert_velocity(&self, value: f64, source: &UnitSystem) -> f64 {
        convert_units(value, source.unit_velocity, self.unit_velocity)
    }
}

fn convert_units(value: f64, source_units: f64, target_units: f64) -> f64 {
    value * source_units / target_units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * a.abs().max(b.abs())
    }

    #[test]
    fn every_listed_id_resolves() {
        for id in UnitSystem::available_ids() {
            let units = UnitSystem::new(id).unwrap();
            assert_eq!(units.id, *id);
            assert!(units.gravity_constant.is_finite() && units.gravity_constant > 0.0);
        }
    }

    #[test]
    fn unknown_id_is_rejected() {
        assert_eq!(UnitSystem::new("imperial"), Err(UnknownUnitSystem("imperial".into())));
        // ids are case sensitive
        assert!(UnitSystem::new("SI").is_err());
    }

    #[test]
    fn si_keeps_the_physical_constant() {
        let si = UnitSystem::new("si").unwrap();
        assert_eq!(si.gravity_constant, GRAVITY_CONSTANT);
        assert_eq!(si.unit_velocity, 1.0);
    }

    #[test]
    fn g1_has_unit_gravity() {
        let g1 = UnitSystem::new("G1").unwrap();
        assert!(rel_eq(g1.gravity_constant, 1.0, 1e-12));
    }

    #[test]
    fn solsys_gravity_is_about_four_pi_squared() {
        let solsys = UnitSystem::new("solsys").unwrap();
        assert!(rel_eq(solsys.gravity_constant, 39.478_120_186_932_55, 1e-12));
    }

    #[test]
    fn cgs_to_si() {
        let si = UnitSystem::new("si").unwrap();
        let cgs = UnitSystem::new("cgs").unwrap();
        assert!(rel_eq(si.convert_length(250.0, &cgs), 2.5, 1e-15));
        assert!(rel_eq(si.convert_mass(1000.0, &cgs), 1.0, 1e-15));
        assert!(rel_eq(si.convert_velocity(100.0, &cgs), 1.0, 1e-15));
        assert_eq!(si.convert_time(3.0, &cgs), 3.0);
    }

    #[test]
    fn au_per_year_in_si() {
        let si = UnitSystem::new("si").unwrap();
        let solsys = UnitSystem::new("solsys").unwrap();
        assert!(rel_eq(si.convert_velocity(1.0, &solsys), AU / YEAR, 1e-15));
    }
}
