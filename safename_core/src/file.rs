use std::fs;
use std::io::prelude::*;
use std::path::Path;

use crate::error::SafenameError;

pub fn load_string_from_file<P: AsRef<Path>>(filename: P) -> Result<String, SafenameError> {
    let text = fs::read_to_string(filename)?;
    Ok(text)
}

pub fn save_string_to_file<P: AsRef<Path>>(filename: P, text: &str) -> Result<(), SafenameError> {
    let mut file = fs::File::create(filename)?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

/// One candidate name per line. Only the line terminator is stripped, so
/// leading and trailing spaces survive.
pub fn parse_names(text: &str) -> Vec<String> {
    text.lines().map(|line| line.to_owned()).collect()
}

pub fn load_names_from_file<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, SafenameError> {
    let text = load_string_from_file(filename)?;
    Ok(parse_names(&text))
}

pub fn save_names_to_file<P: AsRef<Path>>(filename: P, names: &[String]) -> Result<(), SafenameError> {
    let mut text = String::new();
    for name in names {
        text.push_str(name);
        text.push('\n');
    }
    save_string_to_file(filename, &text)
}

#[test]
fn parse_names_keeps_spaces() {
    let names = parse_names("trailing \r\n .hidden\nplain");
    assert_eq!(names, vec!["trailing ", " .hidden", "plain"]);
}

#[test]
fn load_names_fixture() {
    let names = load_names_from_file(Path::new(env!("CARGO_MANIFEST_DIR")).join("test/names.txt")).unwrap();
    assert_eq!(names.len(), 7);
    assert_eq!(names[0], "my_report_2024");
    assert_eq!(names[4], "trailing ");
}

#[test]
fn save_and_load_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("names.txt");
    let names = vec!["a.txt".to_string(), "b c".to_string()];

    save_names_to_file(&path, &names).unwrap();
    assert_eq!(load_string_from_file(&path).unwrap(), "a.txt\nb c\n");
    assert_eq!(load_names_from_file(&path).unwrap(), names);
}

#[test]
fn load_missing_file() {
    let result = load_names_from_file("/nonexistent/names.txt");
    assert!(matches!(result, Err(SafenameError::Io(_))));
}
