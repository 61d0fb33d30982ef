mod common;

use std::sync::Arc;

use adult_report::data::{FileSource, MemorySource};
use adult_report::{
    load, parse_csv, summarize, CacheState, DatasetCache, ErrorKind, Income, ADULT_COLUMNS,
};
use common::{Fixture, SAMPLE, SAMPLE_MISSING_ROWS, SCENARIO};

#[test]
fn scenario_drops_incomplete_row_and_summarizes() {
    let src = MemorySource::new("scenario", SCENARIO);
    let ds = load(&src, &ADULT_COLUMNS).unwrap();

    assert_eq!(ds.len(), 2);
    let incomes: Vec<&str> = ds.records().iter().map(|r| r.income.as_str()).collect();
    assert_eq!(incomes, vec!["<=50K", ">50K"]);

    let stats = summarize(&ds).unwrap();
    assert_eq!(stats.mean_age, 44.5);
    assert_eq!(stats.high_income_share, 0.5);
}

#[test]
fn output_count_is_input_minus_incomplete_rows() {
    let input_rows = SAMPLE.lines().filter(|l| !l.trim().is_empty()).count();
    let ds = parse_csv(SAMPLE.as_bytes(), &ADULT_COLUMNS).unwrap();

    assert_eq!(ds.rows_read(), input_rows);
    assert_eq!(ds.len(), input_rows - SAMPLE_MISSING_ROWS);
    assert_eq!(ds.rows_dropped(), SAMPLE_MISSING_ROWS);
}

#[test]
fn no_record_keeps_a_missing_or_padded_field() {
    let ds = parse_csv(SAMPLE.as_bytes(), &ADULT_COLUMNS).unwrap();
    for r in ds.records() {
        for text in [
            &r.workclass,
            &r.education,
            &r.marital_status,
            &r.occupation,
            &r.relationship,
            &r.race,
            &r.sex,
            &r.native_country,
        ] {
            assert!(!text.is_empty());
            assert_ne!(text, "?");
            assert_eq!(text.trim(), text);
        }
        assert!(matches!(r.income, Income::AtMost50K | Income::Above50K));
        assert_eq!(r.income.as_str().trim(), r.income.as_str());
    }
}

#[test]
fn order_of_kept_rows_is_preserved() {
    let ds = parse_csv(SAMPLE.as_bytes(), &ADULT_COLUMNS).unwrap();
    let ages: Vec<u32> = ds.records().iter().map(|r| r.age).collect();
    assert_eq!(ages, vec![39, 50, 38, 53, 28, 37, 49, 52, 31, 42, 54, 30]);
}

#[test]
fn summarize_is_deterministic() {
    let ds = parse_csv(SAMPLE.as_bytes(), &ADULT_COLUMNS).unwrap();
    let a = summarize(&ds).unwrap();
    let b = summarize(&ds).unwrap();
    assert_eq!(a.mean_age.to_bits(), b.mean_age.to_bits());
    assert_eq!(a.high_income_share.to_bits(), b.high_income_share.to_bits());
    assert_eq!(a, b);
}

#[test]
fn summarize_empty_fails() {
    let only_missing = SCENARIO.lines().nth(2).unwrap();
    let ds = parse_csv(only_missing.as_bytes(), &ADULT_COLUMNS).unwrap();
    let err = summarize(&ds).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyDataset);
}

#[test]
fn cache_fetches_once_from_file() {
    let fx = Fixture::new(SAMPLE);
    let cache = DatasetCache::new(Box::new(FileSource::new(&fx.data)), &ADULT_COLUMNS);

    assert_eq!(cache.state(), CacheState::Uninitialized);
    let first = cache.get().unwrap();
    // remove the file: a second fetch would now fail
    std::fs::remove_file(&fx.data).unwrap();
    let second = cache.get().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.state(), CacheState::Ready);

    cache.invalidate();
    let err = cache.get().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
}

#[test]
fn uncached_loads_refetch_and_agree() {
    let src = MemorySource::new("sample", SAMPLE);
    let a = load(&src, &ADULT_COLUMNS).unwrap();
    let b = load(&src, &ADULT_COLUMNS).unwrap();
    assert_eq!(a, b);
    assert_eq!(src.fetch_count(), 2);
}

#[test]
fn sequential_cache_gets_fetch_once() {
    let src = Arc::new(MemorySource::new("sample", SAMPLE));
    let cache = DatasetCache::new(Box::new(Arc::clone(&src)), &ADULT_COLUMNS);
    let a = cache.get().unwrap();
    let b = cache.get().unwrap();
    assert_eq!(*a, *b);
    assert_eq!(src.fetch_count(), 1);
}

#[test]
fn whitespace_line_between_rows_is_skipped() {
    let mut lines = SCENARIO.lines();
    let first = lines.next().unwrap();
    let rest: Vec<&str> = lines.collect();
    let data = format!("{first}\n   \n{}\n", rest.join("\n"));
    let ds = parse_csv(data.as_bytes(), &ADULT_COLUMNS).unwrap();
    assert_eq!(ds.rows_read(), 3);
    assert_eq!(ds.len(), 2);
}

#[test]
fn ragged_row_is_schema_mismatch() {
    let data = format!("{SCENARIO}41, Private, 1, HS-grad\n");
    let err = parse_csv(data.as_bytes(), &ADULT_COLUMNS).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaMismatch);
}
