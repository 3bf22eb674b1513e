//! Full-scene tests: background conversion, atomic swap, morphing.

use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use point_cloud_animate::{ParticleScene, SceneConfig, ShapeKind};
use point_cloud_convert::CloudSource;
use std::io::Cursor;
use std::time::{Duration, Instant};

fn encode_png(image: RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("png encode");
    bytes
}

/// Advance the scene in small frames until the image cloud lands.
fn advance_until_image(scene: &mut ParticleScene) {
    let deadline = Instant::now() + Duration::from_secs(30);
    while scene.cloud().source != CloudSource::Image {
        scene.advance(1.0 / 60.0);
        assert!(Instant::now() < deadline, "conversion never swapped in");
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn image_conversion_swaps_in_off_the_frame_path() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut scene = ParticleScene::with_seed(
        SceneConfig { shape: ShapeKind::Image, count: 500, ..SceneConfig::default() },
        7,
    );
    assert_eq!(scene.cloud().source, CloudSource::Procedural);

    scene.set_image(encode_png(RgbaImage::from_pixel(
        20,
        20,
        Rgba([15, 15, 15, 255]),
    )));
    advance_until_image(&mut scene);

    assert_eq!(scene.cloud().len(), 500);
    assert_eq!(scene.positions().len(), 500 * 3);
    assert_eq!(scene.colours().len(), 500 * 3);
}

#[test]
fn solid_image_shades_every_particle_as_shadow() {
    let mut scene = ParticleScene::with_seed(
        SceneConfig { shape: ShapeKind::Image, count: 400, ..SceneConfig::default() },
        7,
    );
    scene.set_image(encode_png(RgbaImage::from_pixel(
        20,
        20,
        Rgba([15, 15, 15, 255]),
    )));
    advance_until_image(&mut scene);
    // One more frame so the fresh cloud generation is classified.
    scene.advance(1.0 / 60.0);

    // A solid dark image is backdrop throughout (even its frame border
    // stays under the background edge gate), so the whole cloud takes
    // the shadow colour.
    let shadow = scene.config().palette.shadow.to_unit();
    for triple in scene.colours().chunks_exact(3) {
        assert_eq!(triple, shadow);
    }
    assert!(scene.cloud().is_background.iter().all(|bg| *bg));
}

#[test]
fn shape_change_morphs_instead_of_jump_cutting() {
    let mut scene = ParticleScene::with_seed(
        SceneConfig { shape: ShapeKind::Sphere, count: 200, ..SceneConfig::default() },
        7,
    );
    // Settle on the sphere first.
    for _ in 0..50 {
        scene.advance(1.0 / 60.0);
    }
    let settled = scene.positions().to_vec();

    // Retarget to the image; the live buffer must move gradually.
    let mut config = scene.config().clone();
    config.shape = ShapeKind::Image;
    scene.set_config(config);
    scene.set_image(encode_png(RgbaImage::from_pixel(
        20,
        20,
        Rgba([15, 15, 15, 255]),
    )));
    advance_until_image(&mut scene);
    scene.advance(1.0 / 60.0);

    // At most two small frames ran against the new target, so no
    // particle can have moved more than a fraction of the scene span;
    // a jump cut would teleport particles by several units.
    for (before, after) in settled.iter().zip(scene.positions()) {
        let step = (after - before).abs();
        assert!(step < 1.0, "jump cut detected: {before} -> {after}");
    }
}

#[test]
fn count_change_during_conversion_keeps_buffers_aligned() {
    let mut scene = ParticleScene::with_seed(
        SceneConfig { shape: ShapeKind::Image, count: 10, ..SceneConfig::default() },
        7,
    );
    scene.set_image(encode_png(RgbaImage::from_pixel(
        20,
        20,
        Rgba([15, 15, 15, 255]),
    )));

    // Raise the count while the first conversion is still running. The
    // scene must hold a full-length target for the new count from the
    // very next frame, with positions and colours index-aligned.
    let mut config = scene.config().clone();
    config.count = 20;
    scene.set_config(config);

    let deadline = Instant::now() + Duration::from_secs(30);
    loop {
        scene.advance(1.0 / 60.0);
        assert_eq!(scene.cloud().len(), 20);
        assert_eq!(scene.positions().len(), 20 * 3);
        assert_eq!(scene.colours().len(), 20 * 3);
        if scene.cloud().source == CloudSource::Image {
            break;
        }
        assert!(Instant::now() < deadline, "conversion never swapped in");
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn switching_back_to_sphere_discards_the_running_conversion() {
    let mut scene = ParticleScene::with_seed(
        SceneConfig { shape: ShapeKind::Image, count: 60, ..SceneConfig::default() },
        7,
    );
    scene.set_image(encode_png(RgbaImage::from_pixel(
        20,
        20,
        Rgba([15, 15, 15, 255]),
    )));

    // Flip back to the sphere before the conversion can land.
    let mut config = scene.config().clone();
    config.shape = ShapeKind::Sphere;
    scene.set_config(config);
    assert!(!scene.is_converting());

    // Give the worker ample time to finish; its result must never
    // replace the sphere target.
    let deadline = Instant::now() + Duration::from_millis(500);
    while Instant::now() < deadline {
        scene.advance(1.0 / 60.0);
        assert_eq!(scene.cloud().source, CloudSource::Procedural);
        assert_eq!(scene.cloud().len(), 60);
        std::thread::sleep(Duration::from_millis(2));
    }
}

#[test]
fn transparent_image_falls_back_to_sphere_targets() {
    let mut scene = ParticleScene::with_seed(
        SceneConfig { shape: ShapeKind::Image, count: 120, ..SceneConfig::default() },
        7,
    );
    scene.set_image(encode_png(RgbaImage::from_pixel(
        16,
        16,
        Rgba([255, 255, 255, 0]),
    )));

    // The fallback still arrives through the loader as a full-length
    // procedural cloud; the scene never loses a renderable target.
    let deadline = Instant::now() + Duration::from_secs(30);
    while scene.is_converting() {
        scene.advance(1.0 / 60.0);
        assert!(Instant::now() < deadline, "fallback never delivered");
        std::thread::sleep(Duration::from_millis(2));
    }
    scene.advance(1.0 / 60.0);
    assert_eq!(scene.cloud().len(), 120);
    assert_eq!(scene.cloud().source, CloudSource::Procedural);
}
