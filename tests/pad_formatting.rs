use fracturedjson::Formatter;

const SAMPLE_DOCUMENT: &str = r#"{
    "name": "sensor-07",
    "readings": [1, 2, 3, 4, 5],
    "metadata": {"active": true, "zone": "north", "threshold": 0.5},
    "tags": []
}"#;

#[test]
fn disabling_every_pad_option_leaves_no_extra_spaces() {
    let mut formatter = Formatter::new();
    formatter.options.nested_bracket_padding = false;
    formatter.options.simple_bracket_padding = false;
    formatter.options.colon_padding = false;
    formatter.options.comma_padding = false;
    formatter.options.comment_padding = false;

    let output = formatter.minify(SAMPLE_DOCUMENT).unwrap();
    assert!(!output.contains(' '));

    // A round trip through minify should be semantically identical even
    // though every bit of whitespace is gone.
    let original: serde_json::Value = serde_json::from_str(SAMPLE_DOCUMENT).unwrap();
    let minified: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(original, minified);
}

#[test]
fn simple_bracket_padding_toggles_the_inline_two_element_array() {
    let input = "[1, 2]";

    let mut formatter = Formatter::new();
    formatter.options.simple_bracket_padding = false;
    let without_padding = formatter.reformat(input, 0).unwrap();
    assert_eq!(without_padding.trim_end(), "[1, 2]");

    formatter.options.simple_bracket_padding = true;
    let with_padding = formatter.reformat(input, 0).unwrap();
    assert_eq!(with_padding.trim_end(), "[ 1, 2 ]");
}
