//! Integration tests for `envtree-commands`.

use anstream::AutoStream;
use envtree::{FieldTree, KeyValueMap, ParseError};
use envtree_commands::Printer;
use test_casing::test_casing;

use crate::configs::{TestConfig, mock_source};

mod configs;

fn test_tree() -> FieldTree {
    FieldTree::for_config::<TestConfig>().unwrap()
}

#[test]
fn full_config_help() {
    let mut buffer = vec![];
    Printer::custom(AutoStream::never(&mut buffer))
        .print_help(&test_tree(), |_| true)
        .unwrap();
    let buffer = String::from_utf8(buffer).unwrap();
    assert!(!buffer.contains("reload_count"), "{buffer}");
    insta::assert_snapshot!("help_full", buffer);
}

#[test]
fn filtered_config_help() {
    let mut buffer = vec![];
    Printer::custom(AutoStream::never(&mut buffer))
        .print_help(&test_tree(), |leaf| leaf.path.starts_with("storage."))
        .unwrap();
    let buffer = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!("help_filtered", buffer);
}

#[test]
fn full_config_debug() {
    let mut buffer = vec![];
    Printer::custom(AutoStream::never(&mut buffer))
        .print_debug(&test_tree(), &mock_source(false))
        .unwrap()
        .unwrap();
    let buffer = String::from_utf8(buffer).unwrap();
    insta::assert_snapshot!("debug_full", buffer);
}

#[test]
fn erroneous_config_debug() {
    let mut buffer = vec![];
    let err = Printer::custom(AutoStream::never(&mut buffer))
        .print_debug(&test_tree(), &mock_source(true))
        .unwrap()
        .unwrap_err();
    let buffer = String::from_utf8(buffer).unwrap();

    assert_eq!(err.key(), Some("APP_ENV"));
    // All errors are reported, not just the first one.
    assert_eq!(buffer.matches("Error:").count(), 3, "{buffer}");
    insta::assert_snapshot!("debug_errors", buffer);
}

#[test]
fn missing_required_param_debug() {
    let mut source = mock_source(false);
    source.remove("APP_PORT");
    let mut buffer = vec![];
    let err = Printer::custom(AutoStream::never(&mut buffer))
        .print_debug(&test_tree(), &source)
        .unwrap()
        .unwrap_err();
    let buffer = String::from_utf8(buffer).unwrap();

    assert_eq!(err, ParseError::MissingRequired { key: "APP_PORT" });
    assert!(
        buffer.contains(
            "APP_PORT [Rust: TestConfig.port] = unset\n  Required\n  \
             Error: env variable 'APP_PORT' is required but not set\n"
        ),
        "{buffer}"
    );
}

#[test]
fn storage_is_optional_without_persist_flag() {
    let mut source = mock_source(false).with("APP_PERSIST", "false");
    source.remove("STORAGE_URL");
    let mut buffer = vec![];
    Printer::custom(AutoStream::never(&mut buffer))
        .print_debug(&test_tree(), &source)
        .unwrap()
        .unwrap();
    let buffer = String::from_utf8(buffer).unwrap();

    assert!(
        buffer.contains("STORAGE_URL [Rust: TestConfig.storage.url] = unset\nSTORAGE_SHARDS"),
        "{buffer}"
    );
}

#[test_casing(3, [
    mock_source(false),
    mock_source(true),
    KeyValueMap::default(),
])]
#[test]
fn debug_outcome_matches_populating(source: KeyValueMap) {
    let mut buffer = Vec::<u8>::new();
    let debug_outcome = Printer::custom(AutoStream::never(&mut buffer))
        .print_debug(&test_tree(), &source)
        .unwrap();
    let populate_outcome = envtree::load_from::<TestConfig, _>(&source).map(drop);
    assert_eq!(debug_outcome, populate_outcome);
}

#[test]
fn printing_tree_json() {
    let json = serde_json::to_value(test_tree()).unwrap();
    let mut buffer = vec![];
    Printer::custom(AutoStream::never(&mut buffer))
        .print_json(&json)
        .unwrap();
    let buffer = String::from_utf8(buffer).unwrap();

    assert!(buffer.ends_with("}\n"), "{buffer}");
    assert!(buffer.contains("\"key\": \"APP_PORT\""), "{buffer}");
    assert!(buffer.contains("\"name\": \"storage\""), "{buffer}");
    let parsed: serde_json::Value = serde_json::from_str(&buffer).unwrap();
    assert_eq!(parsed, json);
}
