mod support;

use fracturedjson::{EolStyle, Formatter, NumberListAlignment, TableCommaPlacement};
use support::columns_align;

#[test]
fn an_inline_array_leaves_numbers_as_written() {
    let input = "[1, 2.1, 3, -99]";
    let mut formatter = Formatter::new();
    let output = formatter.reformat(input, 0).unwrap();
    assert_eq!(output.trim_end(), input);
}

#[test]
fn a_compact_array_aligns_its_numbers_into_columns() {
    let input = "[1, 2.1, 3, -99]";
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = -1;
    formatter.options.json_eol_style = EolStyle::Lf;
    formatter.options.number_list_alignment = NumberListAlignment::Normalize;

    let output = formatter.reformat(input, 0).unwrap();
    // All four values should land on the single inner row, each decorated
    // with a decimal point once normalized.
    let inner_line = output.lines().find(|l| l.contains('1')).unwrap();
    assert!(inner_line.contains("1.0"));
    assert!(inner_line.contains("-99.0"));
}

#[test]
fn table_rows_keep_their_columns_aligned() {
    let input = "[[1, 2.1, 3, -99],[5, 6, 7, 8]]";
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = -1;
    formatter.options.json_eol_style = EolStyle::Lf;
    formatter.options.number_list_alignment = NumberListAlignment::Normalize;
    formatter.options.table_comma_placement = TableCommaPlacement::AfterPadding;

    let output = formatter.reformat(input, 0).unwrap();
    let lines: Vec<String> = output.trim_end().split('\n').map(|s| s.to_string()).collect();
    assert!(columns_align(&lines, ","));
}

#[test]
fn nulls_keep_their_place_in_a_number_column() {
    let input = "[1, 2, null, -99]";
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = -1;

    let output = formatter.reformat(input, 0).unwrap();
    assert!(output.contains("null"));
    let lines: Vec<String> = output.trim_end().split('\n').map(|s| s.to_string()).collect();
    assert!(columns_align(&lines, ","));
}

#[test]
fn left_right_decimal_and_normalize_all_produce_valid_columns() {
    let input_rows = [
        "[",
        "    [ 123.456, 0, 0 ],",
        "    [ 234567.8, 0, 0 ],",
        "    [ 3, 0.00000, 7e2 ],",
        "    [ null, 2e-1, 80e1 ],",
        "    [ 5.6789, 3.5e-1, 0 ]",
        "]",
    ];
    let input = input_rows.join("");

    for align in [
        NumberListAlignment::Left,
        NumberListAlignment::Right,
        NumberListAlignment::Decimal,
        NumberListAlignment::Normalize,
    ] {
        let mut formatter = Formatter::new();
        formatter.options.max_total_line_length = 60;
        formatter.options.json_eol_style = EolStyle::Lf;
        formatter.options.number_list_alignment = align;
        formatter.options.table_comma_placement = TableCommaPlacement::AfterPadding;

        let output = formatter.reformat(&input, 0).unwrap();
        let lines: Vec<String> = output.trim_end().split('\n').map(|s| s.to_string()).collect();
        assert_eq!(lines.len(), 7, "unexpected row count for {:?}", align);
        assert!(columns_align(&lines, ","), "commas misaligned for {:?}", align);

        // Re-parsing the minified form must reproduce the same values, so
        // alignment never loses or corrupts a number.
        let minified = formatter.minify(&output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&minified).unwrap();
        assert!(value.is_array());
    }
}

#[test]
fn an_unrepresentable_exponent_does_not_break_the_rest_of_the_column() {
    let input = "[1, 2.1, 3, 1e+99]";
    let mut formatter = Formatter::new();
    formatter.options.max_inline_complexity = -1;
    formatter.options.json_eol_style = EolStyle::Lf;
    formatter.options.number_list_alignment = NumberListAlignment::Normalize;
    formatter.options.table_comma_placement = TableCommaPlacement::AfterPadding;

    let output = formatter.reformat(input, 0).unwrap();
    assert!(output.contains("1e+99"));
    let minified = formatter.minify(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&minified).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 4);
}
