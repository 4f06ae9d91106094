/*!
 * Tests for the translation engine
 */

use std::io::Cursor;
use anyhow::Result;
use sanzang::errors::EngineError;
use sanzang::table::parse_table;
use sanzang::translation::{
    filter_vocabulary, format_listing, normalize_chunk, translate_columns, ChunkedTranslator,
};
use crate::common;

/// Test that an earlier record shadows later records on overlapping text
#[test]
fn test_filter_vocabulary_withOverlappingTerms_shouldPreferEarlierRecord() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let rule_set = filter_vocabulary(&table, "火山\n");

    let sources: Vec<&str> = rule_set.rules().iter().map(|r| r.source()).collect();
    assert_eq!(sources, vec!["火山"]);
    assert_eq!(rule_set.claims().len(), 1);
    Ok(())
}

/// Test that records absent from the text are not selected
#[test]
fn test_filter_vocabulary_withUnrelatedText_shouldSelectNothing() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let rule_set = filter_vocabulary(&table, "木\n");

    assert!(rule_set.is_empty());
    assert!(rule_set.claims().is_empty());
    Ok(())
}

/// Test that claims are returned in text order regardless of table order
#[test]
fn test_filter_vocabulary_withManyMatches_shouldOrderClaimsByPosition() -> Result<()> {
    let table = parse_table("水|water\n山|mountain\n")?;
    let rule_set = filter_vocabulary(&table, "山水山\n");

    let starts: Vec<usize> = rule_set.claims().iter().map(|c| c.start).collect();
    assert_eq!(starts, vec![0, 3, 6]);
    Ok(())
}

/// Test that every column of the sample table is rendered
#[test]
fn test_translate_columns_withSampleTable_shouldRenderAllColumns() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let columns = translate_columns(&table, "火山水\n");

    assert_eq!(columns, vec![
        "火山水\n".to_string(),
        "volcano water\n".to_string(),
        "huo3 shan1 shui3\n".to_string(),
    ]);
    Ok(())
}

/// Test that a later longer term cannot take text already claimed
#[test]
fn test_translate_columns_withShortTermFirst_shouldLeaveRemainder() -> Result<()> {
    let table = parse_table("火|fire\n山|mountain\n")?;
    let columns = translate_columns(&table, "火山\n");
    assert_eq!(columns[1], "fire mountain\n");

    let table = parse_table("山|mountain\n火山|volcano\n")?;
    let columns = translate_columns(&table, "火山\n");
    assert_eq!(columns[1], "火 mountain\n");
    Ok(())
}

/// Test that normalization composes decomposed characters
#[test]
fn test_normalize_chunk_withDecomposedText_shouldCompose() {
    assert_eq!(normalize_chunk("e\u{301}"), "\u{e9}");
    assert_eq!(normalize_chunk("火山"), "火山");
}

/// Test the listing for a full chunk of the sample table
#[test]
fn test_format_listing_withTranslatedChunk_shouldInterleaveColumns() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let columns = translate_columns(&table, "火山\n水\n");
    let listing = format_listing(&columns, 1)?;

    assert_eq!(
        listing,
        "1.1|火山\n1.2|volcano\n1.3|huo3 shan1\n\n2.1|水\n2.2|water\n2.3|shui3\n\n"
    );
    Ok(())
}

/// Test that the chunk size does not change the listing of text without blank lines
#[test]
fn test_chunked_translator_withVariousBufferSizes_shouldProduceSameListing() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let input = "火山\n水火\n山\n火\n水山火\n木\n";

    let render = |size: usize| -> Result<String> {
        let mut translator = ChunkedTranslator::new(&table, size);
        let mut out = Vec::new();
        translator.translate_stream(Cursor::new(input.as_bytes().to_vec()), &mut out)?;
        Ok(String::from_utf8(out)?)
    };

    let expected = render(1000)?;
    for size in [1, 2, 3, 5, 7] {
        assert_eq!(render(size)?, expected, "buffer size {}", size);
    }
    assert_eq!(common::listing_line_numbers(&expected), vec![1, 2, 3, 4, 5, 6]);
    Ok(())
}

/// Test that a zero buffer size behaves like one line per chunk
#[test]
fn test_chunked_translator_withZeroBufferSize_shouldUseOne() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let mut translator = ChunkedTranslator::new(&table, 0);
    let mut out = Vec::new();

    let lines = translator.translate_stream(Cursor::new(b"a\nb\n".to_vec()), &mut out)?;

    assert_eq!(translator.buffer_size(), 1);
    assert_eq!(lines, 2);
    assert_eq!(translator.chunks_flushed(), 2);
    Ok(())
}

/// Test that the interrupted error is reported as such
#[test]
fn test_chunked_translator_withCancelledFlag_shouldReturnInterrupted() -> Result<()> {
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    let table = parse_table(common::SAMPLE_TABLE)?;
    let mut translator = ChunkedTranslator::new(&table, 10)
        .with_cancel_flag(Arc::new(AtomicBool::new(true)));
    let mut out = Vec::new();

    let result = translator.translate_stream(Cursor::new("火\n".as_bytes().to_vec()), &mut out);
    assert!(matches!(result, Err(EngineError::Interrupted)));
    Ok(())
}

/// Run a translator over `input` and return the listing
fn listing_for(table: &sanzang::table::Table, buffer_size: usize, input: &str) -> Result<String> {
    let mut translator = ChunkedTranslator::new(table, buffer_size);
    let mut out = Vec::new();
    translator.translate_stream(Cursor::new(input.as_bytes().to_vec()), &mut out)?;
    Ok(String::from_utf8(out)?)
}

/// Source-column record texts of a listing, in output order
fn source_records(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| line.split_once('|'))
        .filter(|(tag, _)| tag.ends_with(".1"))
        .map(|(_, text)| text.to_string())
        .collect()
}

/// Test that translating the listed source lines again lists the same lines
#[test]
fn test_chunked_translator_withListedSource_shouldReproduceSourceLines() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;

    let first = source_records(&listing_for(&table, 2, "火山 \n\n水火\n  木\n")?);
    assert_eq!(first, vec!["火山", "水火", "  木"]);

    let relisted = first.join("\n") + "\n";
    let second = source_records(&listing_for(&table, 2, &relisted)?);
    assert_eq!(second, first);
    Ok(())
}

/// Test that a blank line closing a chunk is counted but not listed
#[test]
fn test_chunked_translator_withBlankLineEndingChunk_shouldSkipItButKeepNumbering() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let input = "火山 \n\n水火\n";

    // Inside a chunk the blank line is listed
    let whole = listing_for(&table, 100, input)?;
    assert_eq!(common::listing_line_numbers(&whole), vec![1, 2, 3]);

    // On its own it is a chunk of only blank lines, listed as one empty line
    let single = listing_for(&table, 1, input)?;
    assert_eq!(common::listing_line_numbers(&single), vec![1, 2, 3]);
    assert!(single.contains("2.1|\n"));

    // Ending the first chunk it is trimmed, and line 3 keeps its number
    let pairs = listing_for(&table, 2, input)?;
    assert_eq!(common::listing_line_numbers(&pairs), vec![1, 3]);
    assert!(pairs.contains("3.1|水火\n"));
    Ok(())
}

/// Test that a lone carriage return ends a source line
#[test]
fn test_chunked_translator_withLoneCarriageReturn_shouldSplitLines() -> Result<()> {
    let table = parse_table(common::SAMPLE_TABLE)?;
    let listing = listing_for(&table, 100, "火\r山\n")?;

    assert!(!listing.contains('\r'));
    assert_eq!(
        listing,
        "1.1|火\n1.2|fire\n1.3|huo3\n\n2.1|山\n2.2|mountain\n2.3|shan1\n\n"
    );
    Ok(())
}
