use super::*;

fn size(w: u32, h: u32) -> SurfaceSize {
    SurfaceSize::new(w, h).unwrap()
}

#[test]
fn pixel_surface_rejects_zero_size() {
    let bad = SurfaceSize {
        width: 0,
        height: 3,
    };
    assert!(PixelSurface::new(bad).is_err());
}

#[test]
fn clear_draw_fill_and_present() {
    let mut s = PixelSurface::new(size(3, 2)).unwrap();
    s.clear(Rgba8Premul::BLACK);
    assert_eq!(s.pixel(2, 1), [0, 0, 0, 255]);

    s.draw_raster(&Raster::solid(1, 1, [0, 0, 255, 255]), Offset::new(1, 0));
    assert_eq!(s.pixel(1, 0), [0, 0, 255, 255]);

    s.fill(Rgba8Premul::WHITE, 1.0);
    assert_eq!(s.pixel(1, 0), [255, 255, 255, 255]);

    assert_eq!(s.presented(), 0);
    s.present().unwrap();
    assert_eq!(s.presented(), 1);
}

#[test]
fn opaque_flatten_keeps_premul_color() {
    let mut s = PixelSurface::new(size(1, 1)).unwrap();
    s.clear(Rgba8Premul::from_straight_rgba(255, 0, 0, 128));
    assert_eq!(s.to_opaque_rgba8(), vec![128, 0, 0, 255]);
}

#[test]
fn png_dump_respects_stride() {
    let dir = std::env::temp_dir().join(format!(
        "jumpscare_png_dump_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let mut s = PngDumpSurface::new(&dir, size(4, 2), 2).unwrap();
    for _ in 0..5 {
        s.clear(Rgba8Premul::WHITE);
        s.present().unwrap();
    }
    assert_eq!(s.written(), 3);
    assert!(dir.join("frame_00000.png").is_file());
    assert!(!dir.join("frame_00001.png").exists());
    assert!(dir.join("frame_00004.png").is_file());

    let img = image::open(dir.join("frame_00002.png")).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (4, 2));
    assert_eq!(img.get_pixel(3, 1).0, [255, 255, 255, 255]);

    std::fs::remove_dir_all(&dir).ok();
}
