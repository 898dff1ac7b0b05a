//! Physical constants in SI units

pub const SECOND: f64 = 1.0;
pub const MINUTE: f64 = 60.0 * SECOND;
pub const HOUR: f64 = 60.0 * MINUTE;
pub const DAY: f64 = 24.0 * HOUR;
pub const YEAR: f64 = 365.25 * DAY; // julian year

pub const METER: f64 = 1.0;
pub const KILOMETER: f64 = 1000.0 * METER;
pub const AU: f64 = 1.495_978_707e11 * METER;
pub const PARSEC: f64 = 3.085_677_581_491_367e16 * METER;
pub const RADIUS_EARTH: f64 = 6.371e6 * METER;
pub const DISTANCE_MOON: f64 = 3.844e8 * METER;

pub const KILOGRAM: f64 = 1.0;
pub const MASS_SUN: f64 = 1.988_47e30 * KILOGRAM;
pub const MASS_EARTH: f64 = 5.9722e24 * KILOGRAM;
pub const MASS_MOON: f64 = 7.342e22 * KILOGRAM;

pub const GRAVITY_CONSTANT: f64 = 6.6743e-11;
pub const LIGHT_SPEED: f64 = 299_792_458.0;
pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;
pub const PI: f64 = std::f64::consts::PI;

/// Look up a constant by its camelCase name, e.g. `"massSun"` or `"au"`
pub fn constant_by_name(name: &str) -> Option<f64> {
    let value = match name {
        "second" => SECOND,
        "minute" => MINUTE,
        "hour" => HOUR,
        "day" => DAY,
        "year" => YEAR,
        "meter" => METER,
        "kilometer" => KILOMETER,
        "au" => AU,
        "parsec" => PARSEC,
        "radiusEarth" => RADIUS_EARTH,
        "distanceMoon" => DISTANCE_MOON,
        "kilogram" => KILOGRAM,
        "massSun" => MASS_SUN,
        "massEarth" => MASS_EARTH,
        "massMoon" => MASS_MOON,
        "gravityConstant" => GRAVITY_CONSTANT,
        "lightSpeed" => LIGHT_SPEED,
        "planckConstant" => PLANCK_CONSTANT,
        "pi" => PI,
        _ => return None,
    };
    Some(value)
}
