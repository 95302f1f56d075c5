use pdf_header::position::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn test_pdf_point_from_ratio() {
    let (x, y) = pdf_point_from_ratio(0.85, 0.03, 595.0, 842.0);
    assert!(approx(x, 505.75), "x = {}", x);
    assert!(approx(y, 816.74), "y = {}", y);

    assert_eq!(pdf_point_from_ratio(0.0, 0.0, 612.0, 792.0), (0.0, 792.0));
    assert_eq!(pdf_point_from_ratio(1.0, 1.0, 612.0, 792.0), (612.0, 0.0));
}

#[test]
fn test_canvas_ratio_round_trip() {
    let geometry = PageGeometry::fit(800.0, 600.0, 595.0, 842.0);

    for &(rx, ry) in &[(0.0, 0.0), (0.25, 0.75), (0.5, 0.5), (0.85, 0.97), (1.0, 1.0)] {
        let (cx, cy) = canvas_from_ratio(rx, ry, &geometry);
        let back = ratio_from_canvas(cx, cy, &geometry);
        assert!(approx(back.x, rx) && approx(back.y, ry), "{:?}", back);
    }
}

#[test]
fn test_ratio_from_canvas_clamps() {
    let geometry = PageGeometry::fit(800.0, 600.0, 612.0, 792.0);
    let outside = ratio_from_canvas(-50.0, 10_000.0, &geometry);
    assert_eq!(outside, Ratio::new(0.0, 1.0));
}

#[test]
fn test_preview_scale() {
    // A4 in a 1050x750 canvas is bounded by the height
    let scale = preview_scale(1050.0, 750.0, 595.0, 842.0);
    assert!(approx(scale, (750.0 - 40.0) / 842.0));

    // Small pages stop at the max zoom
    assert_eq!(preview_scale(2000.0, 2000.0, 100.0, 100.0), 2.5);

    // Degenerate input still gives a positive scale
    assert!(preview_scale(0.0, 0.0, 0.0, 0.0) > 0.0);
}

#[test]
fn test_fit_centers_page() {
    let geometry = PageGeometry::fit(1000.0, 700.0, 612.0, 792.0);
    let expected_scale = (700.0 - 40.0) / 792.0;
    assert!(approx(geometry.scale, expected_scale));
    assert!(approx(geometry.page_h_px, 660.0));
    assert_eq!(geometry.img_offset_y, 20.0);
    assert_eq!(
        geometry.img_offset_x,
        ((1000.0 - geometry.page_w_px) / 2.0).floor()
    );
    assert!(geometry.contains(500.0, 350.0));
    assert!(!geometry.contains(5.0, 5.0));
}

#[test]
fn test_zero_page_size_is_safe() {
    let geometry = PageGeometry::fit(800.0, 600.0, 0.0, 0.0);
    assert!(geometry.scale.is_finite());
    assert!(geometry.page_w_pt >= 1.0 && geometry.page_h_pt >= 1.0);

    let ratio = resolve_preset(Preset::BottomRight, 20.0, 20.0, 0.0, 0.0);
    assert!(ratio.x.is_finite() && ratio.y.is_finite());
    assert_eq!(ratio, Ratio::new(0.01, 0.01));
}

#[test]
fn test_resolve_preset() {
    let r = resolve_preset(Preset::TopLeft, 20.0, 20.0, 612.0, 792.0);
    assert!(approx(r.x, 20.0 / 612.0));
    assert!(approx(r.y, 20.0 / 792.0));

    let r = resolve_preset(Preset::Center, 20.0, 20.0, 612.0, 792.0);
    assert_eq!(r, Ratio::new(0.5, 0.5));

    let r = resolve_preset(Preset::BottomRight, 20.0, 20.0, 612.0, 792.0);
    assert!(approx(r.x, 1.0 - 20.0 / 612.0));
    assert!(approx(r.y, 1.0 - 20.0 / 792.0));

    // Zero margins still stay inside the page
    let r = resolve_preset(Preset::TopLeft, 0.0, 0.0, 612.0, 792.0);
    assert_eq!(r, Ratio::new(0.01, 0.01));
}

#[test]
fn test_resolve_preset_idempotent() {
    for preset in Preset::ALL {
        let first = resolve_preset(preset, 15.0, 30.0, 595.0, 842.0);
        let second = resolve_preset(preset, 15.0, 30.0, 595.0, 842.0);
        assert_eq!(first, second, "{:?}", preset);
    }
}

#[test]
fn test_preset_keys() {
    for preset in Preset::ALL {
        assert_eq!(Preset::from_key(preset.key()), Some(preset));
    }
    assert_eq!(Preset::from_key("custom"), None);
    assert_eq!(Preset::TopLeft.grid_cell(), (0, 0));
    assert_eq!(Preset::Center.grid_cell(), (1, 1));
    assert_eq!(Preset::BottomRight.grid_cell(), (2, 2));
}

#[test]
fn test_position_resolve() {
    let manual = Position::manual(1.5, -0.2);
    assert_eq!(manual, Position::Manual { rx: 0.99, ry: 0.01 });
    assert_eq!(manual.key(), "custom");
    assert_eq!(manual.resolve(100.0, 100.0), Ratio::new(0.99, 0.01));

    let preset = Position::Preset {
        preset: Preset::TopCenter,
        margin_x_pt: 10.0,
        margin_y_pt: 79.2,
    };
    assert_eq!(preset.key(), "top_center");
    let r = preset.resolve(612.0, 792.0);
    assert!(approx(r.x, 0.5));
    assert!(approx(r.y, 0.1));
}
