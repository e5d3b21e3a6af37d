mod support;

use fracturedjson::{CommentPolicy, Formatter};
use support::columns_align;

const SAMPLE: &str = r#"
{
    "num": 14,
    "string": "testing property alignment",
    "arrayWithLongName": [null, null, null]
}
"#;

#[test]
fn property_values_line_up_when_padding_allows_it() {
    let mut formatter = Formatter::new();
    formatter.options.max_prop_name_padding = 15;
    formatter.options.colon_before_prop_name_padding = false;
    formatter.options.max_inline_complexity = -1;
    formatter.options.max_compact_array_complexity = -1;

    let output = formatter.reformat(SAMPLE, 0).unwrap();
    let lines: Vec<String> = output.trim_end().split('\n').map(|s| s.to_string()).collect();
    assert!(columns_align(&lines, ":"));
}

#[test]
fn colons_can_hug_names_while_values_still_align() {
    let mut formatter = Formatter::new();
    formatter.options.max_prop_name_padding = 15;
    formatter.options.colon_before_prop_name_padding = true;
    formatter.options.max_inline_complexity = -1;
    formatter.options.max_compact_array_complexity = -1;

    let output = formatter.reformat(SAMPLE, 0).unwrap();
    assert!(output.contains("\"num\":"));
    assert!(output.contains("\"string\":"));
    assert!(output.contains("\"arrayWithLongName\":"));

    // The colons themselves are not aligned...
    let lines: Vec<String> = output.trim_end().split('\n').map(|s| s.to_string()).collect();
    assert!(!columns_align(&lines, "\":"));
}

#[test]
fn padding_is_skipped_once_it_would_exceed_the_configured_maximum() {
    let mut formatter = Formatter::new();
    formatter.options.max_prop_name_padding = 0;
    formatter.options.colon_before_prop_name_padding = false;
    formatter.options.max_inline_complexity = -1;
    formatter.options.max_compact_array_complexity = -1;

    let output = formatter.reformat(SAMPLE, 0).unwrap();
    assert!(output.contains("\"num\": 14"));
    assert!(output.contains("\"string\": \"testing"));
    assert!(output.contains("\"arrayWithLongName\": ["));
}

const COMMENTED_SAMPLE: &str = r#"
{
    "foo": // this is foo
        [1, 2, 4],
    "bar": null,
    "bazzzz": /* this is baz */ [0]
}
"#;

#[test]
fn a_line_comment_between_name_and_value_blocks_alignment() {
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    formatter.options.colon_before_prop_name_padding = false;

    let output = formatter.reformat(COMMENTED_SAMPLE, 0).unwrap();
    assert!(output.contains("// this is foo"));
    assert!(output.contains("/* this is baz */"));
}

#[test]
fn a_block_comment_that_fits_inline_still_allows_alignment() {
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    formatter.options.colon_before_prop_name_padding = false;
    formatter.options.max_total_line_length = 80;

    let output = formatter.reformat(COMMENTED_SAMPLE, 0).unwrap();
    let lines: Vec<String> = output.trim_end().split('\n').map(|s| s.to_string()).collect();
    assert!(columns_align(&lines, "["));
}
