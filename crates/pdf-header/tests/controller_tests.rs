use pdf_header::*;
use std::path::PathBuf;

fn paths(n: usize) -> Vec<PathBuf> {
    (0..n)
        .map(|i| PathBuf::from(format!("/docs/file{}.pdf", i)))
        .collect()
}

/// A session with `n` files loaded and the first one open on a 1000x700 canvas
fn loaded_session(n: usize) -> HeaderSession {
    let mut session = HeaderSession::new(HeaderConfig::default());
    session.dispatch(Intent::CanvasResized {
        width: 1000.0,
        height: 700.0,
    });
    let effects = session.dispatch(Intent::BatchLoaded(paths(n)));
    assert_eq!(effects, vec![Effect::OpenDocument(paths(n)[0].clone())]);
    session.dispatch(Intent::DocumentOpened {
        page_w_pt: 612.0,
        page_h_pt: 792.0,
    });
    session
}

fn apply_job(effects: &[Effect]) -> ApplyJob {
    match effects {
        [Effect::Apply(job)] => job.clone(),
        other => panic!("Expected a single Apply effect, got {:?}", other),
    }
}

#[test]
fn test_empty_batch_reports_error() {
    let mut session = HeaderSession::new(HeaderConfig::default());
    let effects = session.dispatch(Intent::BatchLoaded(Vec::new()));
    assert!(matches!(
        effects.as_slice(),
        [Effect::ReportError { locked: false, .. }]
    ));
}

#[test]
fn test_click_sets_manual_position() {
    let mut session = loaded_session(1);
    let geometry = *session.geometry();
    let (cx, cy) = position::canvas_from_ratio(0.25, 0.1, &geometry);

    session.dispatch(Intent::PositionClicked { cx, cy });

    let ratio = session.current_ratio();
    assert!((ratio.x - 0.25).abs() < 0.01);
    assert!((ratio.y - 0.1).abs() < 0.01);
    assert_eq!(session.config().preset_position, "custom");
    assert!((session.config().last_x_ratio - 0.25).abs() < 0.01);
}

#[test]
fn test_click_outside_page_is_ignored() {
    let mut session = loaded_session(1);
    let before = *session.position();
    session.dispatch(Intent::PositionClicked { cx: 1.0, cy: 1.0 });
    assert_eq!(*session.position(), before);
}

#[test]
fn test_preset_then_margins() {
    let mut session = loaded_session(1);
    session.dispatch(Intent::PresetSelected(Preset::TopLeft));
    assert_eq!(session.config().preset_position, "top_left");

    session.dispatch(Intent::MarginsChanged {
        x_pt: 61.2,
        y_pt: 79.2,
    });
    let ratio = session.current_ratio();
    assert!((ratio.x - 0.1).abs() < 0.001);
    assert!((ratio.y - 0.1).abs() < 0.001);
    assert_eq!(session.config().margin_x_pt, 61.2);
}

#[test]
fn test_custom_and_filename_are_exclusive() {
    let mut session = HeaderSession::new(HeaderConfig::default());
    assert!(session.config().use_filename);

    session.dispatch(Intent::ToggleChanged {
        toggle: Toggle::Custom,
        enabled: true,
    });
    assert!(session.config().use_custom);
    assert!(!session.config().use_filename);

    session.dispatch(Intent::ToggleChanged {
        toggle: Toggle::Filename,
        enabled: true,
    });
    assert!(session.config().use_filename);
    assert!(!session.config().use_custom);
}

#[test]
fn test_text_and_font_size() {
    let mut session = loaded_session(1);
    session.dispatch(Intent::ToggleChanged {
        toggle: Toggle::Prefix,
        enabled: true,
    });
    session.dispatch(Intent::TextChanged {
        field: TextField::Prefix,
        value: "DRAFT".to_string(),
    });
    assert_eq!(session.header_text(&DateInputs::now()), "DRAFT file0");

    for _ in 0..100 {
        session.dispatch(Intent::FontSizeStepped(1));
    }
    assert_eq!(session.config().font_size, 72.0);
}

#[test]
fn test_apply_success_persists_and_advances() {
    let mut session = loaded_session(2);
    let job = apply_job(&session.dispatch(Intent::ApplyRequested));
    assert_eq!(job.index, 0);
    assert_eq!(job.path, paths(2)[0]);
    assert!(session.is_applying());

    // A second click while stamping is ignored
    assert!(session.dispatch(Intent::ApplyRequested).is_empty());

    let effects = session.dispatch(Intent::ApplyFinished {
        index: 0,
        outcome: ApplyOutcome::Done {
            output: PathBuf::from("/docs_avec_entete/file0.pdf"),
        },
    });
    assert!(matches!(effects[0], Effect::PersistConfig(_)));
    assert_eq!(effects[1], Effect::OpenDocument(paths(2)[1].clone()));
    assert_eq!(session.queue().state(0), Some(FileState::Done));
    assert!(!session.is_applying());
}

#[test]
fn test_apply_failure_keeps_file_for_retry() {
    let mut session = loaded_session(2);
    apply_job(&session.dispatch(Intent::ApplyRequested));

    let effects = session.dispatch(Intent::ApplyFinished {
        index: 0,
        outcome: ApplyOutcome::Failed {
            message: "locked".to_string(),
            locked: true,
        },
    });
    assert_eq!(
        effects,
        vec![Effect::ReportError {
            message: "locked".to_string(),
            locked: true,
        }]
    );
    assert_eq!(session.queue().state(0), Some(FileState::Error));
    assert_eq!(session.queue().current_index(), Some(0));

    // Retry the same file
    let job = apply_job(&session.dispatch(Intent::ApplyRequested));
    assert_eq!(job.index, 0);
    session.dispatch(Intent::ApplyFinished {
        index: 0,
        outcome: ApplyOutcome::Done {
            output: PathBuf::from("out.pdf"),
        },
    });
    let entry = session.queue().get(0).unwrap();
    assert_eq!(entry.state, FileState::Done);
    assert_eq!(entry.attempts, 2);
}

#[test]
fn test_skip_done_error_completes_batch() {
    let mut session = loaded_session(3);

    let effects = session.dispatch(Intent::SkipRequested);
    assert_eq!(effects, vec![Effect::OpenDocument(paths(3)[1].clone())]);

    apply_job(&session.dispatch(Intent::ApplyRequested));
    session.dispatch(Intent::ApplyFinished {
        index: 1,
        outcome: ApplyOutcome::Done {
            output: PathBuf::from("out1.pdf"),
        },
    });

    apply_job(&session.dispatch(Intent::ApplyRequested));
    session.dispatch(Intent::ApplyFinished {
        index: 2,
        outcome: ApplyOutcome::Failed {
            message: "corrupt".to_string(),
            locked: false,
        },
    });
    assert!(!session.is_complete());

    // Moving on from the failed file ends the batch
    let effects = session.dispatch(Intent::SkipRequested);
    assert_eq!(effects, vec![Effect::BatchComplete]);
    assert!(session.is_complete());
    assert_eq!(session.queue().state(0), Some(FileState::Skipped));
    assert_eq!(session.queue().state(1), Some(FileState::Done));
    assert_eq!(session.queue().state(2), Some(FileState::Error));

    // Nothing more is accepted until a new batch arrives
    assert!(session.dispatch(Intent::ApplyRequested).is_empty());
    assert!(session.dispatch(Intent::SkipRequested).is_empty());

    let effects = session.dispatch(Intent::BatchLoaded(paths(1)));
    assert_eq!(effects, vec![Effect::OpenDocument(paths(1)[0].clone())]);
    assert!(!session.is_complete());
}

#[test]
fn test_jump_to() {
    let mut session = loaded_session(3);
    assert_eq!(
        session.dispatch(Intent::JumpTo(2)),
        vec![Effect::OpenDocument(paths(3)[2].clone())]
    );
    assert_eq!(session.queue().current_index(), Some(2));
    assert_eq!(session.page_size(), None);

    assert!(matches!(
        session.dispatch(Intent::JumpTo(9)).as_slice(),
        [Effect::ReportError { .. }]
    ));
}

#[test]
fn test_config_edited_normalizes() {
    let mut session = HeaderSession::new(HeaderConfig::default());
    let edited = HeaderConfig {
        font_size: 300.0,
        preset_position: "bottom_right".to_string(),
        ..Default::default()
    };
    session.dispatch(Intent::ConfigEdited(Box::new(edited)));
    assert_eq!(session.config().font_size, 72.0);
    assert_eq!(session.position().preset(), Some(Preset::BottomRight));
}

#[test]
fn test_scene_follows_session() {
    let session = loaded_session(1);
    let scene = session.scene(&DateInputs::now(), None);
    let text = scene.text.expect("text");
    assert_eq!(text.lines, vec!["file0".to_string()]);
}

#[test]
fn test_edge_click_survives_config_edit() {
    let mut session = loaded_session(1);
    let geometry = *session.geometry();
    session.dispatch(Intent::PositionClicked {
        cx: geometry.img_offset_x,
        cy: geometry.img_offset_y,
    });
    let before = session.current_ratio();
    assert_eq!(before, Ratio::new(0.01, 0.01));

    let mut edited = session.config().clone();
    edited.color_hex = "#336699".to_string();
    session.dispatch(Intent::ConfigEdited(Box::new(edited)));

    assert_eq!(session.current_ratio(), before);
    assert_eq!(session.config().last_x_ratio, before.x);
    assert_eq!(session.config().last_y_ratio, before.y);
}

#[test]
fn test_unreadable_document_is_marked_error() {
    let mut session = HeaderSession::new(HeaderConfig::default());
    session.dispatch(Intent::BatchLoaded(paths(2)));

    let effects = session.dispatch(Intent::DocumentFailed {
        message: "not a PDF".to_string(),
    });
    assert_eq!(
        effects,
        vec![Effect::ReportError {
            message: "not a PDF".to_string(),
            locked: false,
        }]
    );
    assert_eq!(session.queue().state(0), Some(FileState::Error));
    assert_eq!(
        session.queue().get(0).and_then(|e| e.last_error.clone()),
        Some("not a PDF".to_string())
    );
    assert_eq!(session.page_size(), None);

    // Moving on keeps the error and opens the next file
    let effects = session.dispatch(Intent::SkipRequested);
    assert_eq!(effects, vec![Effect::OpenDocument(paths(2)[1].clone())]);
    assert_eq!(session.queue().state(0), Some(FileState::Error));
    assert_eq!(session.progress().errors, 1);
    assert_eq!(session.progress().skipped, 0);
}

#[test]
fn test_pointer_readout_in_points() {
    let session = loaded_session(1);
    let geometry = *session.geometry();

    let (cx, cy) = position::canvas_from_ratio(0.5, 0.25, &geometry);
    let (x, y) = session
        .pdf_point_at(overlay::CanvasPoint::new(cx, cy))
        .unwrap();
    assert!((x - 306.0).abs() < 0.5);
    assert!((y - 594.0).abs() < 0.5);

    assert_eq!(session.pdf_point_at(overlay::CanvasPoint::new(1.0, 1.0)), None);
    let closed = HeaderSession::new(HeaderConfig::default());
    assert_eq!(closed.pdf_point_at(overlay::CanvasPoint::new(cx, cy)), None);
}
