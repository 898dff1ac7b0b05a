//! Trajectory records
//!
//! One line per write event, fields joined by `", "`:
//! `time, m_1..m_n, x_1..x_n, v_1..v_n, energy`, with every vector printed
//! as `"x, y"`. A run cut short by the iteration cap ends with a record whose
//! time is [`ITERATION_LIMIT_TIME`].

use std::io::{self, Write};

use crate::simulation::particle::Particle;

/// Time written on the final record of an iteration-bound run
pub const ITERATION_LIMIT_TIME: f64 = -1.0;

pub const FIELD_DELIMITER: &str = ", ";

/// Shortest round-trip decimal, in exponent form outside `[1e-4, 1e16)`
pub fn format_float(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || !value.is_finite() || (1e-4..1e16).contains(&magnitude) {
        format!("{value}")
    } else {
        format!("{value:e}")
    }
}

pub fn format_record(time: f64, particles: &[Particle], energy: f64) -> String {
    let mut fields = Vec::with_capacity(3 * particles.len() + 2);

    fields.push(format_float(time));
    fields.extend(particles.iter().map(|p| format_float(p.mass())));
    fields.extend(particles.iter().map(|p| p.position.to_string()));
    fields.extend(particles.iter().map(|p| p.velocity.to_string()));
    fields.push(format_float(energy));

    fields.join(FIELD_DELIMITER)
}

/// Line writer for state records, counts what it wrote
pub struct StateWriter<W: Write> {
    out: W,
    records: usize,
}

impl<W: Write> StateWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, records: 0 }
    }

    pub fn write_state(
        &mut self,
        time: f64,
        particles: &[Particle],
        energy: f64,
    ) -> io::Result<()> {
        writeln!(self.out, "{}", format_record(time, particles, energy))?;
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::units::UnitSystem;
    use crate::simulation::vector::Vector2D;
    use std::sync::Arc;

    #[test]
    fn float_formatting() {
        assert_eq!(format_float(-1.0), "-1");
        assert_eq!(format_float(0.0), "0");
        assert_eq!(format_float(0.5), "0.5");
        assert_eq!(format_float(1e24), "1e24");
        assert_eq!(format_float(-6.6743e-11), "-6.6743e-11");
        assert_eq!(format_float(12345.678), "12345.678");
    }

    #[test]
    fn record_layout() {
        let units = Arc::new(UnitSystem::new("si").unwrap());
        let particles = vec![
            Particle::new(1.0, Vector2D::new(0.0, 1.0), Vector2D::new(2.0, 3.0), units.clone()),
            Particle::new(2.0, Vector2D::new(4.0, 5.0), Vector2D::new(6.0, 7.0), units),
        ];

        assert_eq!(
            format_record(0.5, &particles, -2.25),
            "0.5, 1, 2, 0, 1, 4, 5, 2, 3, 6, 7, -2.25"
        );
    }

    #[test]
    fn writer_counts_lines() {
        let units = Arc::new(UnitSystem::new("si").unwrap());
        let particles = vec![Particle::new(1.0, Vector2D::zeros(), Vector2D::zeros(), units)];

        let mut writer = StateWriter::new(Vec::new());
        writer.write_state(0.0, &particles, 0.0).unwrap();
        writer.write_state(ITERATION_LIMIT_TIME, &particles, 0.0).unwrap();

        assert_eq!(writer.records(), 2);
        let text = String::from_utf8(writer.out).unwrap();
        assert_eq!(text, "0, 1, 0, 0, 0, 0, 0\n-1, 1, 0, 0, 0, 0, 0\n");
    }
}
