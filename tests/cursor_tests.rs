// Host-side tests for the spring follower and the reactive cursor model.

use ambient_motion::constants::*;
use ambient_motion::core::*;
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn pointer_at(x: f32, y: f32) -> PointerState {
    PointerState {
        x,
        y,
        normalized_x: 0.5,
        normalized_y: 0.5,
        speed: 0.0,
        is_over_interactive: false,
    }
}

#[test]
fn spring_snaps_on_first_step() {
    let mut s = Spring2::new(SpringConfig::from_tuple(RING_SPRING));
    assert_eq!(s.step(Vec2::new(40.0, 60.0), DT), Vec2::new(40.0, 60.0));
    assert_eq!(s.velocity(), Vec2::ZERO);
}

#[test]
fn every_spring_settles_on_a_still_target() {
    for cfg in [DOT_SPRING, RING_SPRING, GLOW_SPRING] {
        let mut s = Spring2::new(SpringConfig::from_tuple(cfg));
        s.snap_to(Vec2::ZERO);
        let target = Vec2::new(100.0, -50.0);
        for _ in 0..120 {
            s.step(target, DT);
        }
        assert!(s.position().distance(target) < 0.1, "{:?} stuck at {}", cfg, s.position());
        assert!(s.velocity().length() < 1.0);
    }
}

#[test]
fn dot_leads_ring_leads_glow() {
    let mut dot = Spring2::new(SpringConfig::from_tuple(DOT_SPRING));
    let mut ring = Spring2::new(SpringConfig::from_tuple(RING_SPRING));
    let mut glow = Spring2::new(SpringConfig::from_tuple(GLOW_SPRING));
    for s in [&mut dot, &mut ring, &mut glow] {
        s.snap_to(Vec2::ZERO);
    }
    let target = Vec2::new(100.0, 0.0);
    for _ in 0..3 {
        dot.step(target, DT);
        ring.step(target, DT);
        glow.step(target, DT);
    }
    assert!(dot.position().x > ring.position().x);
    assert!(ring.position().x > glow.position().x);
}

#[test]
fn large_frame_gaps_stay_stable() {
    let mut s = Spring2::new(SpringConfig::from_tuple(DOT_SPRING));
    s.snap_to(Vec2::ZERO);
    let p = s.step(Vec2::new(500.0, 0.0), 3.0);
    assert!(p.is_finite());
    assert!(p.x > 0.0 && p.x <= 600.0);
}

#[test]
fn damping_ratio_of_default_springs() {
    assert!(SpringConfig::from_tuple(DOT_SPRING).damping_ratio() > 1.0);
    assert!(SpringConfig::from_tuple(RING_SPRING).damping_ratio() > 1.0);
    let glow = SpringConfig::from_tuple(GLOW_SPRING).damping_ratio();
    assert!(glow > 0.8 && glow < 1.0);
}

#[test]
fn no_frame_before_first_pointer_sample() {
    let mut cursor = ReactiveCursor::new();
    assert!(cursor.frame(&PointerState::default(), DT).is_none());
    assert!(cursor.frame(&pointer_at(10.0, 10.0), DT).is_some());
}

#[test]
fn cursor_converges_to_a_resting_pointer() {
    let mut cursor = ReactiveCursor::new();
    cursor.frame(&pointer_at(0.0, 0.0), DT);
    let mut last = None;
    for _ in 0..180 {
        last = cursor.frame(&pointer_at(300.0, 200.0), DT);
    }
    let f = last.expect("cursor frame");
    for (x, y) in [(f.dot.x, f.dot.y), (f.ring.element.x, f.ring.element.y), (f.glow.x, f.glow.y)] {
        assert!((x - 300.0).abs() < 0.5 && (y - 200.0).abs() < 0.5);
    }
    assert!(cursor.velocity().length() < 0.01);
    assert_eq!((f.ring.scale_x, f.ring.scale_y), (1.0, 1.0));
}

#[test]
fn fast_motion_stretches_ring_along_travel() {
    let mut cursor = ReactiveCursor::new();
    let mut frame = None;
    for i in 0..10 {
        frame = cursor.frame(&pointer_at(40.0 * i as f32, 100.0), DT);
    }
    let f = frame.expect("cursor frame");
    assert!(f.ring.scale_x > 1.0);
    assert!((f.ring.scale_x * f.ring.scale_y - 1.0).abs() < 1e-5);
    assert!(f.ring.rotate_deg.abs() < 1.0);

    let default_glow = CursorVariant::Default.style().glow_size;
    assert!(f.glow.size > default_glow);
}

#[test]
fn stretch_is_area_preserving_and_capped() {
    assert_eq!(liquid_stretch(Vec2::ZERO), (0.0, 1.0, 1.0));
    let (deg, sx, sy) = liquid_stretch(Vec2::new(0.0, 50.0));
    assert!((deg - 90.0).abs() < 1e-4);
    assert!((sx * sy - 1.0).abs() < 1e-6);
    let (_, sx, _) = liquid_stretch(Vec2::new(1e6, 0.0));
    assert!((sx - (1.0 + RING_STRETCH_MAX)).abs() < 1e-6);
}

#[test]
fn glow_boost_is_bounded() {
    let style = CursorVariant::Default.style();
    let (rest_size, rest_opacity) = glow_modulation(&style, 0.0);
    assert_eq!(rest_size, style.glow_size);
    assert!(rest_opacity < style.glow_opacity);
    let (size, opacity) = glow_modulation(&style, 1e6);
    assert!((size - style.glow_size * (1.0 + GLOW_RADIUS_MAX_BOOST)).abs() < 1e-3);
    assert!((opacity - style.glow_opacity).abs() < 1e-6);
}

#[test]
fn variant_names_round_trip() {
    for v in [
        CursorVariant::Default,
        CursorVariant::Hover,
        CursorVariant::Pressed,
        CursorVariant::Text,
        CursorVariant::Drag,
        CursorVariant::Loading,
    ] {
        assert_eq!(CursorVariant::from_name(v.name()), Some(v));
    }
    assert_eq!(CursorVariant::from_name("HOVER"), Some(CursorVariant::Hover));
    assert_eq!(CursorVariant::from_name("spinner"), None);
}

#[test]
fn hover_and_press_apply_only_to_the_default_variant() {
    let mut cursor = ReactiveCursor::new();
    assert_eq!(cursor.effective_variant(false), CursorVariant::Default);
    assert_eq!(cursor.effective_variant(true), CursorVariant::Hover);
    cursor.set_pressed(true);
    assert_eq!(cursor.effective_variant(true), CursorVariant::Pressed);
    cursor.set_pressed(false);
    cursor.set_variant(CursorVariant::Drag);
    assert_eq!(cursor.effective_variant(true), CursorVariant::Drag);
}

#[test]
fn label_shows_only_for_text_variant() {
    let mut cursor = ReactiveCursor::new();
    cursor.set_label(Some("View".into()));
    let f = cursor.frame(&pointer_at(5.0, 5.0), DT).expect("cursor frame");
    assert_eq!(f.label, None);

    cursor.set_variant(CursorVariant::Text);
    let f = cursor.frame(&pointer_at(5.0, 5.0), DT).expect("cursor frame");
    assert_eq!(f.label.as_deref(), Some("View"));
    assert_eq!(f.ring.border, BorderStyle::None);
    assert_eq!(f.dot.opacity, 0.0);
}

#[test]
fn hovering_interactive_content_grows_the_ring() {
    let mut cursor = ReactiveCursor::new();
    let mut p = pointer_at(50.0, 50.0);
    let idle = cursor.frame(&p, DT).expect("cursor frame");
    p.is_over_interactive = true;
    let hover = cursor.frame(&p, DT).expect("cursor frame");
    assert_eq!(hover.variant, CursorVariant::Hover);
    assert!(hover.ring.element.size > idle.ring.element.size);
}

#[test]
fn ring_transform_centers_the_element() {
    let ring = RingFrame {
        element: ElementFrame {
            x: 100.0,
            y: 50.0,
            size: 40.0,
            opacity: 1.0,
        },
        rotate_deg: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
        border: BorderStyle::Solid,
    };
    let css = ring.transform_css();
    assert!(css.starts_with("translate3d(80.00px, 30.00px, 0)"), "{css}");
}

#[test]
fn springs_do_not_overshoot_noticeably() {
    for cfg in [DOT_SPRING, RING_SPRING, GLOW_SPRING] {
        let mut s = Spring2::new(SpringConfig::from_tuple(cfg));
        s.snap_to(Vec2::ZERO);
        let mut peak = 0.0f32;
        for _ in 0..240 {
            peak = peak.max(s.step(Vec2::new(100.0, 0.0), DT).x);
        }
        assert!(peak < 101.0, "{:?} overshot to {}", cfg, peak);
    }
}
