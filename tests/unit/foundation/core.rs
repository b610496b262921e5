use super::*;

#[test]
fn surface_size_rejects_zero_sides() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
    let size = SurfaceSize::new(4, 3).unwrap();
    assert_eq!(size.area(), 12);
}

#[test]
fn invalid_surface_reports_dimensions() {
    match SurfaceSize::new(0, 7) {
        Err(JumpscareError::InvalidSurface { width, height }) => {
            assert_eq!((width, height), (0, 7));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn frame_rate_budget_for_60() {
    let fr = FrameRate::new(60).unwrap();
    let budget = fr.tick_budget();
    assert!(budget > Duration::from_micros(16_600));
    assert!(budget < Duration::from_micros(16_700));
    assert!(FrameRate::new(0).is_err());
}

#[test]
fn premul_from_straight_half_alpha() {
    let c = Rgba8Premul::from_straight_rgba(200, 100, 0, 128);
    assert_eq!(c.to_array(), [100, 50, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 255),
        Rgba8Premul {
            r: 10,
            g: 20,
            b: 30,
            a: 255
        }
    );
}

#[test]
fn offset_translate_adds() {
    assert_eq!(
        Offset::new(3, -2).translate(Offset::new(-5, 4)),
        Offset::new(-2, 2)
    );
}
