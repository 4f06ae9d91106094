/*!
 * Tests for translation table parsing and the table model
 */

use anyhow::Result;
use sanzang::errors::TableError;
use sanzang::table::{load_table, parse_table, Record};
use crate::common;

/// Test that the sample table parses with its width and order intact
#[test]
fn test_parse_table_withSampleTable_shouldKeepOrderAndWidth() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;

    assert_eq!(table.len(), 4);
    assert_eq!(table.width(), 3);
    assert_eq!(table.translation_columns(), 2);

    let sources: Vec<&str> = table.iter().map(|r| r.source()).collect();
    assert_eq!(sources, vec!["火山", "火", "山", "水"]);
    Ok(())
}

/// Test that whitespace around fields is ignored
#[test]
fn test_parse_table_withPaddedFields_shouldTrimThem() -> Result<()> {
    let table = parse_table("  火 |  fire  \n")?;
    let record = &table.records()[0];

    assert_eq!(record.source(), "火");
    assert_eq!(record.column(1), "fire");
    Ok(())
}

/// Test that a line with the wrong number of fields is rejected with its line number
#[test]
fn test_parse_table_withInconsistentWidth_shouldReportLine() {
    let err = parse_table("火|fire|huo3\n\n山|mountain\n").unwrap_err();

    match err {
        TableError::Format { line_number, line } => {
            assert_eq!(line_number, 3);
            assert_eq!(line, "山|mountain");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

/// Test that a text line with no separator is a format error
#[test]
fn test_parse_table_withSingleFieldLine_shouldFail() {
    let err = parse_table("火|fire\nmountain\n").unwrap_err();
    assert!(matches!(err, TableError::Format { line_number: 2, .. }));
}

/// Test that an empty source term is rejected
#[test]
fn test_parse_table_withEmptySourceTerm_shouldFail() {
    let err = parse_table("火|fire\n|nothing\n").unwrap_err();
    assert!(matches!(err, TableError::EmptySourceTerm { line_number: 2, .. }));
}

/// Test that empty translation fields are allowed
#[test]
fn test_parse_table_withEmptyTranslation_shouldAccept() -> Result<()> {
    let table = parse_table("之||zhi1\n")?;
    assert_eq!(table.records()[0].column(1), "");
    assert_eq!(table.records()[0].column(2), "zhi1");
    Ok(())
}

/// Test that blank and whitespace-only input produces an empty table
#[test]
fn test_parse_table_withBlankText_shouldBeEmpty() -> Result<()> {
    let table = parse_table("\n   \n\n")?;
    assert!(table.is_empty());
    assert_eq!(table.width(), 0);
    Ok(())
}

/// Test that a byte-order mark and CRLF endings are tolerated
#[test]
fn test_parse_table_withBomAndCrlf_shouldParse() -> Result<()> {
    let table = parse_table("\u{feff}火|fire\r\n山|mountain\r\n")?;

    assert_eq!(table.len(), 2);
    assert_eq!(table.records()[0].source(), "火");
    assert_eq!(table.records()[1].column(1), "mountain");
    Ok(())
}

/// Test that records display in table syntax
#[test]
fn test_record_display_shouldJoinFieldsWithSeparator() {
    let record = Record::new(vec!["火".to_string(), "fire".to_string(), "huo3".to_string()]);
    assert_eq!(record.to_string(), "火|fire|huo3");
    assert_eq!(record.width(), 3);
}

/// Test loading a table from disk
#[test]
fn test_load_table_withExistingFile_shouldParse() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_table(temp_dir.path(), "table.txt")?;

    let table = load_table(&path)?;
    assert_eq!(table.len(), 4);
    Ok(())
}

/// Test that a table file saved with a byte-order mark loads cleanly
#[test]
fn test_load_table_withBomFile_shouldNotKeepMarkInFirstTerm() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bom.txt", "\u{feff}火|fire\n山|mountain\n")?;

    let table = load_table(&path)?;
    assert_eq!(table.records()[0].source(), "火");
    assert_eq!(table.len(), 2);
    Ok(())
}

/// Test that a missing table file produces an I/O error naming the path
#[test]
fn test_load_table_withMissingFile_shouldReturnIoError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("missing.txt");

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, TableError::Io { .. }));
    assert!(err.to_string().contains("missing.txt"));
    Ok(())
}
