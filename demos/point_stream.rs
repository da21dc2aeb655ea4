use lightfield::prelude::*;
use rand::Rng;
use std::thread;
use web_time::{Duration, Instant};

const FRAMES: usize = 50;
const POINTS_PER_FRAME: usize = 2_000;

fn main() {
    env_logger::init();

    let config = ViewerConfig::default().with_command_timeout(Duration::from_millis(500));
    let (mut viewer, client) = Viewer::new(RecordingRenderer::new(), config).unwrap();

    let sensor = thread::spawn(move || {
        let mut rng = rand::rng();
        let mut timeouts = 0;

        for frame in 0..FRAMES {
            let points: Vec<Vec3> = (0..POINTS_PER_FRAME)
                .map(|_| {
                    let angle: f32 = rng.random_range(0.0..std::f32::consts::TAU);
                    let range: f32 = rng.random_range(1.0..30.0);
                    let height = rng.random_range(-0.5..0.5);
                    Vec3::new(range * angle.cos(), range * angle.sin(), height)
                })
                .collect();
            let colors = points
                .iter()
                .map(|p| Color::new(p.length() / 30.0, 0.5, 1.0 - p.length() / 30.0))
                .collect();

            let result = if frame == 0 {
                client.add_point_cloud(&["sensors", "lidar", "scan"], points, Some(colors))
            } else {
                client.set_point_cloud(&["sensors", "lidar", "scan"], points, Some(colors))
            };

            match result {
                Ok(Status::Ok) => {}
                Ok(status) => log::warn!("Frame {} was rejected: {}", frame, status),
                Err(CommandError::Timeout(_)) => timeouts += 1,
                Err(e) => {
                    log::error!("The viewer is gone: {}", e);
                    break;
                }
            }

            let _ = client.apply_directory_transform(
                &["sensors"],
                Vec3::ZERO,
                Vec3::new(0.0, 0.0, 2.0),
                None,
            );
        }

        timeouts
    });

    let start = Instant::now();
    let mut executed = 0;
    while !sensor.is_finished() {
        executed += viewer.update();
        thread::sleep(Duration::from_millis(2));
    }
    executed += viewer.update();

    let timeouts = sensor.join().unwrap();
    println!(
        "Executed {} commands in {:?} ({} timed out).",
        executed,
        start.elapsed(),
        timeouts
    );
}
