use lightfield::prelude::*;
use std::thread;
use web_time::Duration;

fn main() {
    env_logger::init();

    let (mut viewer, client) =
        Viewer::new(RecordingRenderer::new(), ViewerConfig::default()).unwrap();

    let driver = thread::spawn(move || -> Result<(), CommandError> {
        client.add_box(&["robot", "torso"], 0.5, 0.3, 0.8)?;
        client.add_cylinder(&["robot", "wheels", "left"], 0.3, 0.1, 24)?;
        client.add_cylinder(&["robot", "wheels", "right"], 0.3, 0.1, 24)?;
        client.add_cone(&["robot", "mast", "lidar"], 0.1, 0.15, 16)?;
        client.add_actor(
            &["robot", "label"],
            Geometry::text_billboard("rover", Some(14)),
        )?;

        client.set_actor_color(&["robot", "torso"], BLUE)?;
        client.set_actor_offset_orientation(
            &["robot", "wheels", "left"],
            Vec3::new(0.0, 0.35, -0.4),
            Vec3::new(90.0, 0.0, 0.0),
        )?;
        client.set_actor_offset_orientation(
            &["robot", "wheels", "right"],
            Vec3::new(0.0, -0.35, -0.4),
            Vec3::new(90.0, 0.0, 0.0),
        )?;
        client.set_directory_transform(
            &["robot", "mast"],
            Vec3::new(0.0, 0.0, 0.6),
            Vec3::ZERO,
            None,
        )?;
        client.set_frame_axes_visibility(&["robot", "mast", "lidar"], true)?;

        // drive along a circle
        for _ in 0..36 {
            client.apply_directory_transform(
                &["robot"],
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(0.0, 0.0, 10.0),
                Some(TransformOrder::RotateThenTranslate),
            )?;
        }

        let lidar = client.query_actor(&["robot", "mast", "lidar"])?;
        log::info!(
            "The lidar ended at {:?}, heading {:?}.",
            lidar.world_transform.translation(),
            lidar.world_transform.euler_degrees()
        );

        client.rename(&["robot"], "rover")?;
        client.remove_directory(&["rover", "wheels"])?;
        Ok(())
    });

    while !driver.is_finished() {
        let _ = viewer.update();
        thread::sleep(Duration::from_millis(1));
    }
    let _ = viewer.update();

    if let Err(e) = driver.join().unwrap() {
        log::error!("The driver stopped: {}", e);
    }

    let scene = viewer.scene();
    for node in scene.iter() {
        println!("{:?}\t{}", node.kind(), node.path());
    }
    println!(
        "{} nodes, {} live render handles, {} redraws.",
        scene.len(),
        scene.renderer().live_count(),
        scene.renderer().redraw_count()
    );
}
