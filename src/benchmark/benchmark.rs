use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use crate::simulation::forces::{NewtonianGravity, StepPolicy};
use crate::simulation::integrator::IntegrationMethod;
use crate::simulation::particle::Particle;
use crate::simulation::units::UnitSystem;
use crate::simulation::vector::Vector2D;

/// Deterministic cloud of `n` unit-mass particles, no rand needed
pub fn make_particles(n: usize, units: &Arc<UnitSystem>) -> Vec<Particle> {
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            // offset by index so no two particles coincide
            let x = (i_f * 0.37).sin() * 5.0 + i_f * 1e-3;
            let position = Vector2D::new(x, (i_f * 0.13).cos() * 5.0);
            Particle::new(1.0, position, Vector2D::zeros(), units.clone())
        })
        .collect()
}

/// Time one direct-sum acceleration pass per system size
/// Paste output directly into a spreadsheet to graph
pub fn bench_gravity(units: &Arc<UnitSystem>) {
    let policy = StepPolicy::adaptive(1e-3, 1e-2);

    println!("N,accel_ms");
    for n in [200, 400, 800, 1600, 3200, 6400] {
        let particles = make_particles(n, units);

        // Warm up
        if NewtonianGravity.accelerations(&particles, &policy).is_err() {
            println!("{n},degenerate");
            continue;
        }

        let t0 = Instant::now();
        black_box(NewtonianGravity.accelerations(black_box(&particles), &policy)).ok();
        let ms = t0.elapsed().as_secs_f64() * 1000.0;

        println!("{n},{ms:.6}");
    }
}

/// Time one step of every integration method per system size
pub fn bench_methods(units: &Arc<UnitSystem>) {
    let gravity = NewtonianGravity;
    let policy = StepPolicy::fixed(1e-3);
    let methods = [
        IntegrationMethod::Euler,
        IntegrationMethod::Kdk,
        IntegrationMethod::Dkd,
        IntegrationMethod::Rk4,
    ];

    println!("N,euler_ms,kdk_ms,dkd_ms,rk4_ms");
    for n in [200, 400, 800, 1600, 3200] {
        let template = make_particles(n, units);
        let mut row = vec![n.to_string()];

        for method in methods {
            let mut particles = template.clone();
            let Ok(field) = gravity.accelerations(&particles, &policy) else {
                row.push("degenerate".into());
                continue;
            };
            let mut accelerations = field.accelerations;

            let t0 = Instant::now();
            let dt = policy.fixed_time_step;
            let result = black_box(method.advance(
                black_box(&mut particles),
                &mut accelerations,
                dt,
                &gravity,
                &policy,
            ));
            let ms = t0.elapsed().as_secs_f64() * 1000.0;

            row.push(match result {
                Ok(_) => format!("{ms:.6}"),
                Err(_) => "degenerate".into(),
            });
        }
        println!("{}", row.join(","));
    }
}
