use pdf_header::*;
use std::path::PathBuf;

fn batch(n: usize) -> FileQueue {
    FileQueue::new((0..n).map(|i| PathBuf::from(format!("/docs/file{}.pdf", i))))
}

#[test]
fn test_new_queue() {
    let queue = batch(3);
    assert_eq!(queue.len(), 3);
    assert_eq!(queue.current_index(), Some(0));
    assert!(
        queue
            .entries()
            .iter()
            .all(|e| e.state == FileState::Untreated)
    );
    assert_eq!(queue.progress().label(), "1 / 3");

    let empty = FileQueue::new(Vec::new());
    assert!(empty.is_empty());
    assert_eq!(empty.current_index(), None);
    assert_eq!(empty.progress().label(), "0 / 0");
}

#[test]
fn test_skip_done_error_then_complete() {
    let mut queue = batch(3);

    queue.mark_skipped(0).unwrap();
    assert_eq!(queue.advance(), Some(1));

    queue.begin_attempt(1).unwrap();
    queue.mark_done(1, PathBuf::from("/docs_avec_entete/file1.pdf")).unwrap();
    assert_eq!(queue.advance(), Some(2));

    queue.begin_attempt(2).unwrap();
    queue.mark_error(2, "broken").unwrap();

    assert_eq!(queue.state(0), Some(FileState::Skipped));
    assert_eq!(queue.state(1), Some(FileState::Done));
    assert_eq!(queue.state(2), Some(FileState::Error));
    assert_eq!(queue.advance(), None);
    assert!(queue.is_complete());

    // The cursor stays put once complete
    assert_eq!(queue.current_index(), Some(2));
}

#[test]
fn test_advance_wraps_around() {
    let mut queue = batch(4);
    queue.jump(2).unwrap();
    queue.mark_done(2, PathBuf::from("out.pdf")).unwrap();
    queue.mark_skipped(3).unwrap();

    // Scans 3, then wraps to 0
    assert_eq!(queue.advance(), Some(0));
}

#[test]
fn test_advance_checks_current_last() {
    let mut queue = batch(3);
    queue.mark_skipped(1).unwrap();
    queue.mark_skipped(2).unwrap();

    // Only the current entry is left
    assert_eq!(queue.advance(), Some(0));
}

#[test]
fn test_jump_out_of_range() {
    let mut queue = batch(2);
    assert!(queue.jump(1).is_ok());
    assert_eq!(queue.current_index(), Some(1));

    match queue.jump(5) {
        Err(HeaderError::Queue(msg)) => assert!(msg.contains("out of range")),
        other => panic!("Expected Queue error, got {:?}", other),
    }
    assert_eq!(queue.current_index(), Some(1));
}

#[test]
fn test_retry_after_error() {
    let mut queue = batch(1);

    queue.begin_attempt(0).unwrap();
    queue.mark_error(0, "file locked").unwrap();
    assert_eq!(queue.get(0).unwrap().last_error.as_deref(), Some("file locked"));

    queue.begin_attempt(0).unwrap();
    queue.mark_done(0, PathBuf::from("out.pdf")).unwrap();

    let entry = queue.get(0).unwrap();
    assert_eq!(entry.state, FileState::Done);
    assert_eq!(entry.attempts, 2);
    assert!(entry.recovered());
    assert_eq!(entry.last_error, None);
}

#[test]
fn test_only_untreated_can_be_skipped() {
    let mut queue = batch(2);
    queue.mark_done(0, PathBuf::from("out.pdf")).unwrap();
    assert!(queue.mark_skipped(0).is_err());
    assert_eq!(queue.state(0), Some(FileState::Done));
}

#[test]
fn test_progress_counts() {
    let mut queue = batch(5);
    queue.mark_done(0, PathBuf::from("a.pdf")).unwrap();
    queue.mark_skipped(1).unwrap();
    queue.mark_error(2, "x").unwrap();

    let progress = queue.progress();
    assert_eq!(progress.total, 5);
    assert_eq!(progress.done, 1);
    assert_eq!(progress.skipped, 1);
    assert_eq!(progress.errors, 1);
    assert_eq!(progress.untreated, 2);
    assert_eq!(progress.processed(), 3);
}

#[test]
fn test_state_serialization() {
    assert_eq!(
        serde_json::to_string(&FileState::Untreated).unwrap(),
        "\"non_traite\""
    );
    assert_eq!(serde_json::to_string(&FileState::Done).unwrap(), "\"traite\"");
    assert_eq!(serde_json::to_string(&FileState::Skipped).unwrap(), "\"passe\"");
    assert_eq!(serde_json::to_string(&FileState::Error).unwrap(), "\"erreur\"");
}
