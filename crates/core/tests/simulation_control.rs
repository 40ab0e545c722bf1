//! Frame scheduling, reallocation and reset through the simulation driver

mod common;

use common::square_sim;
use wave_sim_core::render::OBSTACLE_COLOR;
use wave_sim_core::{
    ObstacleLayout, RenderMode, SimulationConfig, StepParams, WaveSimError, WaveSimulation,
};

#[test]
fn frame_clock_bounds_substeps() {
    let mut sim = square_sim(48, StepParams::default());
    assert_eq!(sim.advance_frame(0.0001), 1);
    assert_eq!(sim.advance_frame(10.0), 4);
    assert_eq!(sim.advance_frame(0.04), 2);
    assert_eq!(sim.steps_taken(), 7);
    assert!((sim.simulation_time() - 7.0 / 60.0).abs() < 1e-6);

    sim.pause();
    assert_eq!(sim.advance_frame(10.0), 0);
    assert_eq!(sim.steps_taken(), 7);
}

#[test]
fn custom_substep_cap() {
    let mut sim = WaveSimulation::new(SimulationConfig {
        nx: 48,
        ny: 48,
        max_substeps: 2,
        ..SimulationConfig::default()
    })
    .unwrap();
    assert_eq!(sim.advance_frame(1.0), 2);
}

#[test]
fn resize_reallocates_everything() {
    let mut sim = square_sim(64, StepParams::default());
    sim.obstacles_mut().stamp_circle(32, 32, 8);
    sim.emit_radial(10.0, 10.0, 0.1, 3.0);

    sim.set_grid_size(96, 72).unwrap();

    let n = 96 * 72;
    let state = sim.state();
    assert_eq!(state.height.data.len(), n);
    assert_eq!(state.velocity_x.data.len(), n);
    assert_eq!(state.velocity_y.data.len(), n);
    assert_eq!(state.previous_height.data.len(), n);
    assert_eq!(sim.obstacles().as_slice().len(), n);
    assert_eq!(sim.obstacles().occupied_count(), 0);
    assert!(state.is_quiescent());

    // The integrator works on the new size straight away
    sim.emit_radial(80.0, 60.0, 0.1, 3.0);
    sim.advance_frame(1.0 / 60.0);
    assert!(sim.state().height.get(80, 60) > 0.0);

    assert_eq!(
        sim.set_grid_size(96, 12),
        Err(WaveSimError::GridTooSmall {
            axis: "ny",
            value: 12,
            minimum: 48
        })
    );
}

#[test]
fn reset_clears_fields_but_keeps_obstacles() {
    let mut sim = square_sim(64, StepParams::default());
    sim.obstacles_mut().stamp_box(40, 40, 4, 4);
    let occupied = sim.obstacles().occupied_count();
    sim.emit_radial(20.0, 20.0, 0.1, 3.0);
    sim.advance_frame(0.05);

    sim.reset();

    assert!(sim.state().is_quiescent());
    assert_eq!(sim.obstacles().occupied_count(), occupied);
}

#[test]
fn generated_layout_is_reproducible() {
    let layout = ObstacleLayout::default();
    let mut a = square_sim(128, StepParams::default());
    let mut b = square_sim(128, StepParams::default());
    assert_eq!(a.generate_obstacles(&layout, 99), 8);
    b.generate_obstacles(&layout, 99);
    assert_eq!(a.obstacles(), b.obstacles());

    b.generate_obstacles(&layout, 100);
    assert_ne!(a.obstacles(), b.obstacles());

    a.clear_obstacles();
    assert_eq!(a.obstacles().occupied_count(), 0);
}

#[test]
fn render_fills_rgba_buffer() {
    let mut sim = square_sim(64, StepParams::default());
    sim.obstacles_mut().stamp_box(32, 32, 4, 4);
    sim.emit_radial(16.0, 16.0, 0.05, 3.0);
    sim.advance_frame(1.0 / 60.0);

    let mut rgba = vec![0u8; 4 * 64 * 64];
    for mode in [RenderMode::Flow, RenderMode::Vorticity] {
        sim.render(mode, &mut rgba).unwrap();
        assert!(rgba.chunks_exact(4).all(|p| p[3] == 255));
        let center = 4 * (32 * 64 + 32);
        assert_eq!(rgba[center..center + 3], OBSTACLE_COLOR);
    }
    let lit = 4 * (16 * 64 + 16);
    sim.render(RenderMode::Flow, &mut rgba).unwrap();
    assert!(rgba[lit..lit + 3].iter().any(|&c| c > 0));

    assert!(sim.render(RenderMode::Flow, &mut rgba[..8]).is_err());
}
