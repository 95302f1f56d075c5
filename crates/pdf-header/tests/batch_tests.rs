use pdf_header::*;
use std::path::PathBuf;

fn touch(path: &std::path::Path) {
    std::fs::write(path, b"%PDF-1.7\n").unwrap();
}

#[tokio::test]
async fn test_directory_expands_sorted() {
    let dir = tempfile::tempdir().unwrap();
    touch(&dir.path().join("b.pdf"));
    touch(&dir.path().join("a.pdf"));
    touch(&dir.path().join("C.PDF"));
    touch(&dir.path().join("notes.txt"));
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    touch(&dir.path().join("sub").join("deep.pdf"));

    let batch = collect_pdfs(&[dir.path()]).await.unwrap();
    let names: Vec<_> = batch
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["C.PDF", "a.pdf", "b.pdf"]);
}

#[tokio::test]
async fn test_files_must_exist_and_be_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("report.pdf");
    let notes = dir.path().join("notes.txt");
    touch(&report);
    touch(&notes);

    let args: Vec<PathBuf> = vec![
        report.clone(),
        notes,
        dir.path().join("missing.pdf"),
        report.clone(),
    ];
    let batch = collect_pdfs(&args).await.unwrap();
    assert_eq!(batch, vec![report]);
}

#[tokio::test]
async fn test_mixed_arguments_keep_order() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("folder");
    std::fs::create_dir(&folder).unwrap();
    touch(&folder.join("x.pdf"));
    let single = dir.path().join("single.pdf");
    touch(&single);

    let batch = collect_pdfs(&[single.clone(), folder.clone()]).await.unwrap();
    assert_eq!(batch, vec![single, folder.join("x.pdf")]);
}

#[test]
fn test_is_pdf() {
    assert!(is_pdf(std::path::Path::new("a.pdf")));
    assert!(is_pdf(std::path::Path::new("a.Pdf")));
    assert!(!is_pdf(std::path::Path::new("a.pdf.bak")));
    assert!(!is_pdf(std::path::Path::new("pdf")));
}

#[cfg(unix)]
#[tokio::test]
async fn test_directory_follows_symlinked_pdfs() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source");
    let folder = dir.path().join("folder");
    std::fs::create_dir(&source).unwrap();
    std::fs::create_dir(&folder).unwrap();
    touch(&source.join("real.pdf"));
    std::os::unix::fs::symlink(source.join("real.pdf"), folder.join("linked.pdf")).unwrap();
    std::os::unix::fs::symlink(source.join("gone.pdf"), folder.join("dangling.pdf")).unwrap();
    std::fs::create_dir(folder.join("dir.pdf")).unwrap();

    let batch = collect_pdfs(&[folder.as_path()]).await.unwrap();
    assert_eq!(batch, vec![folder.join("linked.pdf")]);
}
