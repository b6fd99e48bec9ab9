use papersum::infrastructure::text_processing::TextSpool;

#[test]
fn given_pages_when_finishing_then_joins_with_paragraph_breaks() {
    let mut spool = TextSpool::new().unwrap();
    spool.append_page("first page").unwrap();
    spool.append_page("second page").unwrap();

    assert_eq!(spool.pages(), 2);
    assert_eq!(spool.finish().unwrap(), "first page\n\nsecond page");
}

#[test]
fn given_blank_pages_when_appending_then_they_are_skipped() {
    let mut spool = TextSpool::new().unwrap();
    spool.append_page("  ").unwrap();
    spool.append_page("content").unwrap();
    spool.append_page("").unwrap();

    assert_eq!(spool.pages(), 1);
    assert_eq!(spool.finish().unwrap(), "content");
}

#[test]
fn given_new_spool_when_checking_then_is_empty() {
    let spool = TextSpool::new().unwrap();
    assert!(spool.is_empty());
}

#[test]
fn given_spool_when_dropped_then_backing_file_is_removed() {
    let mut spool = TextSpool::new().unwrap();
    spool.append_page("transient").unwrap();
    let path = spool.path().to_path_buf();
    assert!(path.exists());

    drop(spool);

    assert!(!path.exists());
}

#[test]
fn given_spool_when_finished_then_backing_file_is_removed() {
    let mut spool = TextSpool::new().unwrap();
    spool.append_page("transient").unwrap();
    let path = spool.path().to_path_buf();

    spool.finish().unwrap();

    assert!(!path.exists());
}
