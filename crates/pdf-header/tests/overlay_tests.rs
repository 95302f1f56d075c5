use pdf_header::overlay::*;
use pdf_header::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.001
}

fn geometry() -> PageGeometry {
    PageGeometry::fit(1050.0, 750.0, 595.0, 842.0)
}

#[test]
fn test_estimate_text_box() {
    let (w, h) = estimate_text_box(&["abcd"], 10.0, 0.0, 1.2);
    assert!(approx(w, 24.0));
    assert!(approx(h, 12.0));

    // Letter spacing goes between characters only
    let (w, _) = estimate_text_box(&["abcd"], 10.0, 2.0, 1.0);
    assert!(approx(w, 30.0));

    let (w, h) = estimate_text_box(&["ab", "abcdef"], 10.0, 0.0, 1.0);
    assert!(approx(w, 36.0));
    assert!(approx(h, 20.0));
}

#[test]
fn test_scene_basics() {
    let geometry = geometry();
    let config = HeaderConfig::default();
    let scene = build_scene(&config, "report", Ratio::new(0.5, 0.5), &geometry, None);

    let text = scene.text.expect("text mark");
    assert_eq!(text.lines, vec!["report".to_string()]);
    assert_eq!(text.color, Rgba(255, 0, 0, 255));
    assert_eq!(text.angle_deg, 0.0);

    let (cx, cy) = position::canvas_from_ratio(0.5, 0.5, &geometry);
    assert_eq!(text.anchor, CanvasPoint::new(cx, cy));
    assert!(scene.guides.is_empty());
    assert!(scene.frame.is_none());
    assert!(scene.background.is_none());

    // Crosshair arms are centered on the anchor
    assert_eq!(scene.crosshair[0].from, CanvasPoint::new(cx - 5.0, cy));
    assert_eq!(scene.crosshair[1].to, CanvasPoint::new(cx, cy + 5.0));
}

#[test]
fn test_small_fonts_stay_readable() {
    let geometry = PageGeometry::fit(200.0, 200.0, 595.0, 842.0);
    let config = HeaderConfig {
        font_size: 4.0,
        ..Default::default()
    };
    let scene = build_scene(&config, "x", Ratio::new(0.5, 0.5), &geometry, None);
    assert_eq!(scene.text.unwrap().font_px, 7.0);
}

#[test]
fn test_hover_guides_only_on_page() {
    let geometry = geometry();
    let config = HeaderConfig::default();

    let inside = CanvasPoint::new(
        geometry.img_offset_x + 10.0,
        geometry.img_offset_y + 10.0,
    );
    let scene = build_scene(&config, "a", Ratio::new(0.5, 0.5), &geometry, Some(inside));
    assert_eq!(scene.guides.len(), 2);
    assert_eq!(scene.guides[0].from.y, inside.y);
    assert_eq!(scene.guides[1].from.x, inside.x);

    let outside = CanvasPoint::new(1.0, 1.0);
    let scene = build_scene(&config, "a", Ratio::new(0.5, 0.5), &geometry, Some(outside));
    assert!(scene.guides.is_empty());
}

#[test]
fn test_frame_and_background() {
    let geometry = geometry();
    let config = HeaderConfig {
        use_frame: true,
        use_bg: true,
        bg_opacity: 0.5,
        frame_padding: 0.0,
        ..Default::default()
    };
    let scene = build_scene(&config, "abcd", Ratio::new(0.5, 0.5), &geometry, None);

    let (bg, color) = scene.background.expect("background");
    assert_eq!(color, Rgba(255, 255, 255, 128));
    let frame = scene.frame.expect("frame");
    assert_eq!(frame.quad, bg);

    let text = scene.text.unwrap();
    let (x0, y0, x1, y1) = frame.quad.bounds();
    let (w, h) = estimate_text_box(&["abcd"], text.font_px, 0.0, config.line_spacing);
    assert!((x1 - x0 - w).abs() < 0.01);
    assert!((y1 - y0 - h).abs() < 0.01);
}

#[test]
fn test_rotation_swaps_box_axes() {
    let geometry = geometry();
    let config = HeaderConfig {
        use_frame: true,
        rotation: Rotation::Deg90,
        frame_padding: 0.0,
        ..Default::default()
    };
    let scene = build_scene(&config, "a long header", Ratio::new(0.5, 0.5), &geometry, None);
    let (x0, y0, x1, y1) = scene.frame.unwrap().quad.bounds();
    assert!(y1 - y0 > x1 - x0, "rotated box should be taller than wide");
    assert_eq!(scene.text.unwrap().angle_deg, 90.0);
}

#[test]
fn test_rotate_about_counter_clockwise() {
    let anchor = CanvasPoint::new(100.0, 100.0);
    // A point to the right of the anchor ends up above it on screen
    let p = rotate_about(anchor, 10.0, 0.0, Rotation::Deg90);
    assert_eq!(p, CanvasPoint::new(100.0, 90.0));

    let p = rotate_about(anchor, 10.0, 0.0, Rotation::Deg180);
    assert_eq!(p, CanvasPoint::new(90.0, 100.0));
}

#[test]
fn test_empty_text_draws_no_marks() {
    let config = HeaderConfig {
        use_frame: true,
        use_bg: true,
        underline: true,
        ..Default::default()
    };
    let scene = build_scene(&config, "", Ratio::new(0.5, 0.5), &geometry(), None);
    assert!(scene.text.is_none());
    assert!(scene.frame.is_none());
    assert!(scene.background.is_none());
    assert!(scene.underlines.is_empty());
}

#[test]
fn test_underline_per_line() {
    let config = HeaderConfig {
        underline: true,
        ..Default::default()
    };
    let scene = build_scene(&config, "one\ntwo", Ratio::new(0.5, 0.5), &geometry(), None);
    assert_eq!(scene.underlines.len(), 2);
    assert!(scene.underlines[1].from.y > scene.underlines[0].from.y);
}
