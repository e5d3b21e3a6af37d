use fracturedjson::{CommentPolicy, Formatter};

#[test]
fn two_top_level_values_with_no_separator_is_an_error() {
    let mut formatter = Formatter::new();
    assert!(formatter.reformat("[1,2] [3,4]", 0).is_err());
}

#[test]
fn two_top_level_values_joined_by_a_comma_is_still_an_error() {
    let mut formatter = Formatter::new();
    assert!(formatter.reformat("[1,2], [3,4]", 0).is_err());
}

#[test]
fn a_trailing_top_level_comment_is_preserved() {
    let input = "[1,2] // trailing note";
    let mut formatter = Formatter::new();
    formatter.options.comment_policy = CommentPolicy::Preserve;

    let output = formatter.reformat(input, 0).unwrap();
    assert!(output.contains("// trailing note"));
}
