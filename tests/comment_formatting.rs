mod support;

use fracturedjson::{CommentPolicy, Formatter};
use support::{columns_align, lines_of, loosen_quotes};

#[test]
fn prefix_and_postfix_comments_travel_with_their_element() {
    let input = loosen_quotes(
        "{\n    /*1*/ 'a': [true, true], /*2*/\n    'b': [false, false],\n    /*3*/ 'c': [false, true] /*4*/\n}",
    );

    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    formatter.options.max_inline_complexity = 0;
    formatter.options.max_compact_array_complexity = 0;
    formatter.options.max_table_row_complexity = 0;

    let output = formatter.reformat(&input, 0).unwrap();
    let lines = lines_of(&output);

    let a_line = lines.iter().find(|l| l.contains("\"a\"")).expect("a present");
    assert!(a_line.contains("/*1*/"));
    let c_line = lines.iter().find(|l| l.contains("\"c\"")).expect("c present");
    assert!(c_line.contains("/*3*/"));
    assert!(output.contains("] /*2*/,"));
    assert!(output.contains("] /*4*/"));
}

#[test]
fn blank_lines_only_survive_when_preservation_is_on() {
    let input = "    [ 1,\n    \n    2 ]".to_string();
    let mut formatter = Formatter::new();

    let compact = formatter.reformat(&input, 0).unwrap();
    assert_eq!(lines_of(&compact).len(), 1);

    formatter.options.preserve_blank_lines = true;
    let expanded = formatter.reformat(&input, 0).unwrap();
    let expanded_lines = lines_of(&expanded);
    assert!(expanded_lines.len() > 1);
    assert!(expanded_lines.iter().any(|l| l.is_empty()));
}

#[test]
fn a_middle_comment_without_a_line_break_can_stay_inline() {
    let input = "{'a': /*1*/\n[true,true]}".to_string();
    let input = loosen_quotes(&input);
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;

    let output = formatter.reformat(&input, 0).unwrap();
    assert_eq!(lines_of(&output).len(), 1);
    assert!(output.contains("/*1*/"));

    formatter.options.max_inline_complexity = 0;
    let output = formatter.reformat(&input, 0).unwrap();
    assert!(output.contains("\"a\": /*1*/ ["));
}

#[test]
fn a_line_comment_forces_a_break_after_the_property() {
    let input = loosen_quotes("{'a': //1\n[true,true]}");
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;

    let output = formatter.reformat(&input, 0).unwrap();
    let lines = lines_of(&output);
    let a_idx = lines.iter().position(|l| l.contains("\"a\"")).unwrap();
    let comment_idx = lines.iter().position(|l| l.contains("//1")).unwrap();
    let bracket_idx = lines.iter().position(|l| l.trim_start().starts_with('[')).unwrap();
    assert!(a_idx < comment_idx);
    assert!(comment_idx < bracket_idx);
}

#[test]
fn multiline_comments_keep_their_relative_indentation() {
    let input = "[ 1,\n  /* +\n     +\n     + */\n  2]".to_string();
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;

    let output = formatter.reformat(&input, 0).unwrap();
    let lines = lines_of(&output);
    assert!(columns_align(&lines, "+"));
}

#[test]
fn comments_dont_get_treated_as_separating_commas() {
    let input = loosen_quotes("[ [ 'a' /*1*/, 'b' ],\n  [ 'c', /*2*/ 'd' ] ]");
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;
    formatter.options.always_expand_depth = 99;

    let output = formatter.reformat(&input, 0).unwrap();
    assert!(output.contains("\"a\" /*1*/,"));
    assert!(output.contains("/*2*/ \"d\""));
}

#[test]
fn removing_comments_strips_every_marker() {
    let input = "//a\n[1,2, //b\n3]\n//c".to_string();
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Remove;
    formatter.options.always_expand_depth = 99;

    let output = formatter.reformat(&input, 0).unwrap();
    assert!(!output.contains("//"));
}
