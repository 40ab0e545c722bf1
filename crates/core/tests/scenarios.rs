//! End-to-end scenarios: single pulse, sealed chamber, slit diffraction

mod common;

use common::square_sim;
use wave_sim_core::StepParams;

#[test]
fn radial_pulse_peaks_at_center() {
    let params = StepParams {
        gravity: 1.0,
        drag: 0.0,
        vorticity: 0.0,
        pulse_lifetime: 1.0,
        ..StepParams::default()
    };
    let mut sim = square_sim(64, params);
    assert!(sim.emit_radial(32.0, 32.0, 1.0, 3.0));
    sim.step();

    let h = &sim.state().height;
    assert!(h.get(32, 32) > 0.0);

    // Every cell inside the radius, keyed by its distance from the center
    let mut disc = Vec::new();
    for dy in -3_i32..=3 {
        for dx in -3_i32..=3 {
            let d = f64::from(dx).hypot(f64::from(dy));
            if d < 3.0 {
                let (x, y) = ((32 + dx) as usize, (32 + dy) as usize);
                disc.push((d, h.get(x, y), (x, y)));
            }
        }
    }
    assert_eq!(disc.len(), 25);

    for &(d_near, h_near, near) in &disc {
        for &(d_far, h_far, far) in &disc {
            if d_near < d_far {
                assert!(h_near > h_far, "h{near:?}={h_near} <= h{far:?}={h_far}");
            }
        }
    }
    assert!(sim.state().velocity_x.get(34, 32) > 0.0);
}

#[test]
fn sealed_chamber_never_leaks() {
    let params = StepParams {
        gravity: 2.0,
        drag: 0.01,
        ..StepParams::default()
    };
    let mut sim = square_sim(64, params);
    {
        let walls = sim.obstacles_mut();
        walls.stamp_box(32, 16, 17, 2);
        walls.stamp_box(32, 48, 17, 2);
        walls.stamp_box(16, 32, 2, 17);
        walls.stamp_box(48, 32, 2, 17);
    }
    sim.emit_radial(32.0, 32.0, 0.05, 3.0);

    for _ in 0..200 {
        sim.step();
    }

    let grid = sim.grid();
    let state = sim.state();
    let mut inside = 0.0_f64;
    for y in 0..grid.ny() {
        for x in 0..grid.nx() {
            let outside = !(14..50).contains(&x) || !(14..50).contains(&y);
            if outside {
                assert_eq!(state.height.get(x, y), 0.0, "leak at ({x}, {y})");
                assert_eq!(state.velocity_x.get(x, y), 0.0, "leak at ({x}, {y})");
                assert_eq!(state.velocity_y.get(x, y), 0.0, "leak at ({x}, {y})");
            } else {
                inside += f64::from(state.height.get(x, y).abs());
            }
        }
    }
    assert!(inside > 0.0 && inside.is_finite());
}

#[test]
fn slit_limits_transmission_to_the_gap() {
    let params = StepParams {
        gravity: 4.0,
        pulse_lifetime: 2.0,
        ..StepParams::default()
    };
    let mut sim = square_sim(128, params);
    // Wall rows 46..=50 across the whole width, open for |x - 64| <= 2
    sim.obstacles_mut().stamp_slit(64, 48, 126, 2);
    sim.emit_radial(64.0, 56.0, 1.0, 3.0);

    for _ in 0..40 {
        sim.step();
    }

    let h = &sim.state().height;
    // Far from the gap nothing can have arrived yet
    for y in 40..46 {
        for x in (1..=28).chain(100..127) {
            assert_eq!(h.get(x, y), 0.0, "unexpected wave at ({x}, {y})");
        }
    }
    // Behind the gap the pulse has come through
    let transmitted = (40..46)
        .flat_map(|y| (60..=68).map(move |x| (x, y)))
        .any(|(x, y)| h.get(x, y).abs() > 1e-9);
    assert!(transmitted);
    assert!(sim.stats().energy.is_finite());
}
