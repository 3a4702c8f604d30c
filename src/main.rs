mod cli;

use anyhow::{anyhow, Context};
use clap::Parser;
use cli::{init_logger, Args};
use indicatif::ProgressBar;
use log::info;
use sphere_tracer::scene::select_scene;
use sphere_tracer::{Application, InputEvent, Movement, Vec3};
use std::path::Path;
use std::time::Instant;

/// Stand-in for polled input: sway sideways while slowly turning.
fn scripted_input(frame: usize, delta_time: f64) -> Vec<InputEvent> {
    let movement = if (frame / 30) % 2 == 0 {
        Movement::Left
    } else {
        Movement::Right
    };
    vec![
        InputEvent::Key {
            movement,
            delta_time,
        },
        InputEvent::CursorMoved {
            x: 400.0 + frame as f64 * 4.0,
            y: 300.0,
        },
    ]
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.clone().into());

    let scene = select_scene(args.scene).ok_or_else(|| anyhow!("no scene preset {}", args.scene))?;
    let mut app = Application::new(
        args.render_config(),
        scene,
        Vec3::new(0.0, 0.0, 3.0),
        args.width,
        args.height,
    )
    .context("failed to set up the renderer")?;

    let start = Instant::now();
    let mut last_frame = start;
    let bar = ProgressBar::new(args.frames as u64);
    for frame in 0..args.frames {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        for event in scripted_input(frame, delta_time) {
            app.handle(event)?;
        }
        app.frame()
            .with_context(|| format!("frame {} failed", frame))?;
        bar.inc(1);
    }
    bar.finish();

    let elapsed = start.elapsed().as_secs_f64();
    if args.frames > 0 {
        info!(
            "{} frames in {:.2}s ({:.1} fps)",
            args.frames,
            elapsed,
            args.frames as f64 / elapsed
        );
    }

    if let Some(dir) = Path::new(&args.output).parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("cannot create {}", dir.display()))?;
    }
    app.buffer()
        .save(&args.output)
        .with_context(|| format!("cannot save {}", args.output))?;
    info!("saved last frame to {}", args.output);
    Ok(())
}
