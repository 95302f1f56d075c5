use chrono::{Local, TimeZone};
use pdf_header::*;
use std::path::Path;

fn fixed_dates() -> DateInputs {
    DateInputs {
        now: Local.with_ymd_and_hms(2025, 12, 31, 18, 30, 0).unwrap(),
        file_modified: Some(Local.with_ymd_and_hms(2024, 3, 5, 9, 0, 0).unwrap()),
    }
}

fn filename_only() -> HeaderConfig {
    HeaderConfig {
        use_filename: true,
        ..Default::default()
    }
}

#[test]
fn test_filename_only() {
    let config = filename_only();
    assert_eq!(compose(&config, "report", &fixed_dates()), "report");
}

#[test]
fn test_prefix_and_filename() {
    let config = HeaderConfig {
        use_prefix: true,
        prefix_text: "CONFIDENTIEL –".to_string(),
        ..filename_only()
    };
    let stem = filename_stem(Path::new("/tmp/batch/report.pdf"));
    assert_eq!(stem, "report");
    assert_eq!(
        compose(&config, &stem, &fixed_dates()),
        "CONFIDENTIEL – report"
    );
}

#[test]
fn test_custom_overrides_filename() {
    let config = HeaderConfig {
        use_custom: true,
        custom_text: "ACME Corp".to_string(),
        ..filename_only()
    };
    assert_eq!(compose(&config, "report", &fixed_dates()), "ACME Corp");
}

#[test]
fn test_full_ordering() {
    let config = HeaderConfig {
        use_prefix: true,
        prefix_text: "  DRAFT ".to_string(),
        use_suffix: true,
        suffix_text: "v2".to_string(),
        use_date: true,
        date_position: DatePosition::Prefix,
        date_format: "%Y-%m-%d".to_string(),
        ..filename_only()
    };
    assert_eq!(
        compose(&config, "report", &fixed_dates()),
        "2025-12-31 DRAFT report v2"
    );

    let config = HeaderConfig {
        date_position: DatePosition::Suffix,
        ..config
    };
    assert_eq!(
        compose(&config, "report", &fixed_dates()),
        "DRAFT report v2 2025-12-31"
    );
}

#[test]
fn test_empty_parts_are_skipped() {
    let config = HeaderConfig {
        use_filename: false,
        use_prefix: true,
        prefix_text: "   ".to_string(),
        use_suffix: true,
        suffix_text: "END".to_string(),
        ..Default::default()
    };
    assert_eq!(compose(&config, "report", &fixed_dates()), "END");

    let nothing = HeaderConfig {
        use_filename: false,
        ..Default::default()
    };
    assert_eq!(compose(&nothing, "report", &fixed_dates()), "");
}

#[test]
fn test_date_source() {
    let config = HeaderConfig {
        use_filename: false,
        use_date: true,
        date_source: DateSource::FileModified,
        date_format: "%d/%m/%Y".to_string(),
        ..Default::default()
    };
    assert_eq!(compose(&config, "x", &fixed_dates()), "05/03/2024");

    // Without a modification time the current date is used
    let dates = DateInputs {
        file_modified: None,
        ..fixed_dates()
    };
    assert_eq!(compose(&config, "x", &dates), "31/12/2025");
}

#[test]
fn test_invalid_date_format_falls_back() {
    let when = fixed_dates().now;
    assert_eq!(format_date(&when, "%Q"), "31/12/2025");
    assert_eq!(format_date(&when, ""), "31/12/2025");
    assert_eq!(format_date(&when, "%d.%m.%Y"), "31.12.2025");
    assert_eq!(format_date(&when, "%d/%m/%Y %H:%M"), "31/12/2025 18:30");
}

#[test]
fn test_date_format_samples() {
    let when = fixed_dates().now;
    for (pattern, sample) in constants::DATE_FORMATS {
        assert_eq!(format_date(&when, pattern), *sample, "{}", pattern);
    }
}
