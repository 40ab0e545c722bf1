//! Shared setup for the integration tests

use tracing_subscriber::EnvFilter;
use wave_sim_core::{SimulationConfig, StepParams, WaveSimulation};

/// Route `tracing` output to the test harness; `RUST_LOG=debug` shows solver logs
#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Square shallow-water simulation with the given parameters
#[allow(dead_code)]
pub fn square_sim(size: usize, params: StepParams) -> WaveSimulation {
    WaveSimulation::new(SimulationConfig {
        nx: size,
        ny: size,
        params,
        ..SimulationConfig::default()
    })
    .unwrap()
}
