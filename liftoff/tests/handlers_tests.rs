use liftoff::handlers::*;
use std::io::Cursor;
use std::path::PathBuf;

#[test]
fn test_parse_page_count_input() {
    assert_eq!(parse_page_count_input("3\n"), Ok(3));
    assert_eq!(parse_page_count_input("  0 "), Ok(0));
}

#[test]
fn test_parse_page_count_input_rejects_garbage() {
    assert!(parse_page_count_input("").is_err());
    assert!(parse_page_count_input("-1").is_err());
    assert!(parse_page_count_input("ten").is_err());
}

#[test]
fn test_read_page_count_retries_until_valid() {
    let input = Cursor::new("lots\n\n12\n");
    let mut output = Vec::new();

    let pages = read_page_count(input, &mut output).unwrap();

    assert_eq!(pages, 12);
    let shown = String::from_utf8(output).unwrap();
    assert_eq!(shown.matches("How many pages").count(), 3);
    assert!(shown.contains("'lots' is not a page count"));
}

#[test]
fn test_read_page_count_fails_at_end_of_input() {
    let mut output = Vec::new();
    assert!(read_page_count(Cursor::new(""), &mut output).is_err());
}

#[test]
fn test_resolve_dir_expands_home() {
    let resolved = resolve_dir("~/launches");
    assert!(!resolved.starts_with("~"));
    assert!(resolved.ends_with("launches"));

    assert_eq!(resolve_dir("data/out"), PathBuf::from("data/out"));
}
