use clap::Parser;
use image::RgbaImage;
use nalgebra::Vector2;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;
use wave_sim_core::grid::{ObstacleKind, ObstacleShape};
use wave_sim_core::simulation::FIXED_TIMESTEP;
use wave_sim_core::{
    ImpulseConfig, ObstacleLayout, RenderMode, SimulationConfig, StepParams, WaveModel,
    WaveSimulation,
};

/// Headless wave simulation runner
#[derive(Parser, Debug)]
#[command(name = "wave-sim-headless")]
#[command(about = "Run the 2D wave simulation without a window", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 160)]
    nx: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 120)]
    ny: usize,

    /// Number of rendered frames to simulate
    #[arg(short, long, default_value_t = 300)]
    frames: u32,

    /// Wall-clock duration of one frame in seconds
    #[arg(long, default_value_t = FIXED_TIMESTEP)]
    frame_time: f32,

    /// Physical model (shallow-water, wave-equation)
    #[arg(short, long, default_value = "shallow-water")]
    model: String,

    /// Gravity / wave-speed coefficient
    #[arg(short, long, default_value_t = 1.0)]
    gravity: f32,

    /// Linear drag per step
    #[arg(long, default_value_t = 0.0)]
    drag: f32,

    /// Vorticity confinement strength
    #[arg(long, default_value_t = 0.0)]
    vorticity: f32,

    /// Extra confinement where vorticity changes sharply
    #[arg(long, default_value_t = 0.0)]
    vorticity_boost: f32,

    /// Pulse lifetime in seconds
    #[arg(long, default_value_t = 2.0)]
    pulse_lifetime: f32,

    /// Damping factor of the wave-equation model
    #[arg(long, default_value_t = 0.995)]
    damping: f32,

    /// Random circles to place
    #[arg(long, default_value_t = 0)]
    circles: usize,

    /// Random boxes to place
    #[arg(long, default_value_t = 0)]
    boxes: usize,

    /// Random slits to place
    #[arg(long, default_value_t = 0)]
    slits: usize,

    /// Nominal size of random shapes in cells
    #[arg(long, default_value_t = 12)]
    shape_size: i64,

    /// Random seed for the obstacle layout
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Stamp one centred shape (circle, box, slit)
    #[arg(short, long)]
    shape: Option<String>,

    /// Radial pulse strength (0 disables the pulse)
    #[arg(long, default_value_t = 0.05)]
    strength: f32,

    /// Pulse radius in cells
    #[arg(short, long, default_value_t = 3.0)]
    radius: f32,

    /// Pulse x position (defaults to the grid centre)
    #[arg(long)]
    pulse_x: Option<f32>,

    /// Pulse y position (defaults to three quarters down the grid)
    #[arg(long)]
    pulse_y: Option<f32>,

    /// Add a directional kick at the pulse position, angle in degrees
    #[arg(long)]
    kick_angle: Option<f32>,

    /// Drag a horizontal stroke across the upper half during the first frames
    #[arg(long)]
    stroke: bool,

    /// Report interval in frames
    #[arg(long, default_value_t = 60)]
    report_interval: u32,

    /// Render mode of the output image (flow, vorticity)
    #[arg(long, default_value = "flow")]
    render_mode: String,

    /// Write the final frame as an image; the format follows the extension (.png, .bmp, ...)
    #[arg(short, long)]
    output: Option<String>,
}

/// Centred obstacle of the requested kind, sized to the grid
fn centred_shape(kind: ObstacleKind, nx: usize, ny: usize) -> ObstacleShape {
    let (cx, cy) = ((nx / 2) as i64, (ny / 2) as i64);
    let side = (nx.min(ny) / 10).max(3) as i64;
    match kind {
        ObstacleKind::Circle => ObstacleShape::Circle { cx, cy, radius: side },
        ObstacleKind::Box => ObstacleShape::Box {
            cx,
            cy,
            half_w: side,
            half_h: side / 2,
        },
        ObstacleKind::Slit => ObstacleShape::Slit {
            cx,
            cy,
            length: nx as i64,
            gap_half_width: 2,
        },
    }
}

/// Save a rendered RGBA frame
fn write_image(
    path: &Path,
    nx: usize,
    ny: usize,
    rgba: Vec<u8>,
) -> Result<(), Box<dyn std::error::Error>> {
    let image = RgbaImage::from_raw(u32::try_from(nx)?, u32::try_from(ny)?, rgba)
        .ok_or("rendered buffer does not match the grid size")?;
    image.save(path)?;
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let model: WaveModel = args.model.parse()?;
    let render_mode = match args.render_mode.to_lowercase().as_str() {
        "flow" => RenderMode::Flow,
        "vorticity" | "debug" => RenderMode::Vorticity,
        other => return Err(format!("Unknown render mode '{other}'").into()),
    };

    let config = SimulationConfig {
        nx: args.nx,
        ny: args.ny,
        model,
        params: StepParams {
            gravity: args.gravity,
            drag: args.drag,
            vorticity: args.vorticity,
            pulse_lifetime: args.pulse_lifetime,
            vorticity_boost: args.vorticity_boost,
            damping: args.damping,
        },
        impulse: ImpulseConfig {
            radius: args.radius,
            ..ImpulseConfig::default()
        },
        ..SimulationConfig::default()
    };

    println!("=== Wave Simulation Demo ===\n");
    let mut sim = WaveSimulation::new(config)?;
    let grid = sim.grid();
    println!(
        "Grid {}x{}, model {:?}, {} frames of {:.4}s",
        grid.nx(),
        grid.ny(),
        sim.model(),
        args.frames,
        args.frame_time
    );

    // Obstacles
    let layout = ObstacleLayout {
        circles: args.circles,
        boxes: args.boxes,
        slits: args.slits,
        size: args.shape_size,
    };
    if layout.circles + layout.boxes + layout.slits > 0 {
        sim.generate_obstacles(&layout, args.seed);
    }
    if let Some(name) = &args.shape {
        let kind: ObstacleKind = name.parse()?;
        sim.obstacles_mut()
            .stamp(centred_shape(kind, grid.nx(), grid.ny()));
    }
    println!(
        "Obstacles: {} cells occupied",
        sim.obstacles().occupied_count()
    );

    // Initial pulse
    if args.strength > 0.0 {
        let px = args.pulse_x.unwrap_or(grid.nx() as f32 / 2.0);
        let py = args.pulse_y.unwrap_or(grid.ny() as f32 * 0.75);
        if sim.emit_radial(px, py, args.strength, args.radius) {
            println!("Radial pulse at ({px:.1}, {py:.1})");
        } else {
            println!("Radial pulse at ({px:.1}, {py:.1}) landed on an obstacle, skipped");
        }
    }

    if let Some(angle) = args.kick_angle {
        let px = args.pulse_x.unwrap_or(grid.nx() as f32 / 2.0);
        let py = args.pulse_y.unwrap_or(grid.ny() as f32 * 0.75);
        let (sin, cos) = angle.to_radians().sin_cos();
        let direction = Vector2::new(cos, sin);
        if sim.emit_directional(px, py, direction, args.strength) {
            println!("Directional kick at ({px:.1}, {py:.1}) towards {angle:.0} deg");
        }
    }

    let stroke_y = grid.ny() as f32 * 0.25;
    let stroke_frames = 30.min(args.frames);
    if args.stroke {
        sim.begin_stroke(4.0, stroke_y);
    }

    println!("\nFrame | Steps | Energy       | Max |h|  | Max |u|  | Active");
    println!("------|-------|--------------|----------|----------|-------");

    for frame in 1..=args.frames {
        if args.stroke && frame <= stroke_frames {
            let x = 4.0 + (grid.nx() as f32 - 8.0) * frame as f32 / stroke_frames as f32;
            sim.continue_stroke(x, stroke_y);
            if frame == stroke_frames {
                sim.end_stroke();
            }
        }

        let steps = sim.advance_frame(args.frame_time);

        if args.report_interval > 0 && frame % args.report_interval == 0 {
            let stats = sim.stats();
            println!(
                "{:5} | {:5} | {:12.4} | {:8.4} | {:8.4} | {:6}",
                frame,
                steps,
                stats.energy,
                stats.max_height,
                stats.max_speed,
                stats.active_cells
            );
        }
    }

    let stats = sim.stats();
    println!("\n=== Final State ===");
    println!("Simulated time: {:.2}s", sim.simulation_time());
    println!("Steps taken: {}", sim.steps_taken());
    println!("Energy: {:.6}", stats.energy);
    println!("Net height: {:.6}", stats.net_height);
    println!("Max |h|: {:.6}, max |u|: {:.6}", stats.max_height, stats.max_speed);

    if let Some(path) = &args.output {
        let mut rgba = vec![0u8; 4 * grid.cell_count()];
        sim.render(render_mode, &mut rgba)?;
        write_image(Path::new(path), grid.nx(), grid.ny(), rgba)?;
        info!("Wrote {:?} frame to {}", render_mode, path);
        println!("Wrote {path}");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_image_round_trips_rgba() {
        let name = format!("wave-sim-frame-{}.png", std::process::id());
        let path = std::env::temp_dir().join(name);
        let rgba: Vec<u8> = (0..4 * 3 * 2).map(|i| (i * 10) as u8).collect();

        write_image(&path, 3, 2, rgba.clone()).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.into_raw(), rgba);
    }

    #[test]
    fn test_write_image_rejects_short_buffer() {
        let path = std::env::temp_dir().join("wave-sim-short.png");
        assert!(write_image(&path, 4, 4, vec![0; 8]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_unknown_model_is_an_error() {
        let args = Args::parse_from(["wave-sim-headless", "--model", "lattice", "--frames", "1"]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("lattice"));
    }
}
