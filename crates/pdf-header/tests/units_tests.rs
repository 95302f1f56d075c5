use pdf_header::units::*;

#[test]
fn test_hex_to_rgb() {
    assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
    assert_eq!(hex_to_rgb("00ff7f"), Some((0, 255, 127)));
    assert_eq!(hex_to_rgb("  #123456 "), Some((0x12, 0x34, 0x56)));

    assert_eq!(hex_to_rgb("#FFF"), None);
    assert_eq!(hex_to_rgb("#GG0000"), None);
    assert_eq!(hex_to_rgb(""), None);
    assert_eq!(hex_to_rgb("#ÉÉÉ"), None);
}

#[test]
fn test_hex_to_rgb_float() {
    assert_eq!(hex_to_rgb_float("#FF0000"), (1.0, 0.0, 0.0));
    assert_eq!(hex_to_rgb_float("#000000"), (0.0, 0.0, 0.0));

    // Garbage falls back to black
    assert_eq!(hex_to_rgb_float("red"), (0.0, 0.0, 0.0));
}

#[test]
fn test_normalize_hex() {
    assert_eq!(rgb_to_hex(255, 128, 0), "#FF8000");
    assert_eq!(normalize_hex("ff8000", "#000000"), "#FF8000");
    assert_eq!(normalize_hex("#abc", "#FF0000"), "#FF0000");
}

#[test]
fn test_clamps() {
    assert_eq!(clamp_ratio(-1.0), 0.01);
    assert_eq!(clamp_ratio(2.0), 0.99);
    assert_eq!(clamp_ratio(0.3), 0.3);
    assert_eq!(clamp_ratio(f32::NAN), 0.5);

    assert_eq!(clamp_unit(1.5), 1.0);
    assert_eq!(clamp_unit(-0.5), 0.0);
    assert_eq!(clamp_unit(f32::NAN), 0.0);
}

#[test]
fn test_parse_number_or() {
    assert_eq!(parse_number_or("12", 20.0, 0.0, 100.0), 12.0);
    assert_eq!(parse_number_or(" 7,5 ", 20.0, 0.0, 100.0), 7.5);
    assert_eq!(parse_number_or("abc", 20.0, 0.0, 100.0), 20.0);
    assert_eq!(parse_number_or("", 20.0, 0.0, 100.0), 20.0);
    assert_eq!(parse_number_or("inf", 20.0, 0.0, 100.0), 20.0);
    assert_eq!(parse_number_or("500", 20.0, 0.0, 100.0), 100.0);
    assert_eq!(parse_number_or("-3", 20.0, 0.0, 100.0), 0.0);
}

#[test]
fn test_mm_pt_conversion() {
    assert!((mm_to_pt(25.4) - 72.0).abs() < 0.001);
    assert!((pt_to_mm(72.0) - 25.4).abs() < 0.001);
}
