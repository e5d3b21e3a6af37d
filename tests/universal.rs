use fracturedjson::{CommentPolicy, EolStyle, Formatter, FracturedJsonOptions, NumberListAlignment, TableCommaPlacement};

#[derive(Clone)]
struct Case {
    text: &'static str,
    opts: FracturedJsonOptions,
}

const PLAIN_DOCS: &[&str] = &[
    r#"{"a":1,"b":[2,3,4],"c":{"d":true,"e":null}}"#,
    r#"[[1,2,3],[4,5,6],[7,8,9]]"#,
    r#"{"name":"widget","price":19.99,"tags":["a","b"],"stock":0}"#,
    r#"[]"#,
    r#"{}"#,
    r#"["hello","world",42,true,null,3.14]"#,
    r#"{"nested":{"deeper":{"deepest":[1,2,{"x":1,"y":2}]}}}"#,
];

const COMMENTED_DOCS: &[&str] = &[
    "// leading comment\n{\n  \"a\": 1, // trailing\n  \"b\": 2\n}\n// trailing file comment",
    "[\n  1, /* one */\n  2, /* two */\n  3\n]",
];

#[test]
fn every_combination_produces_valid_json() {
    for case in generate_cases() {
        let mut formatter = Formatter::new();
        formatter.options = case.opts.clone();
        if formatter.options.comment_policy == CommentPolicy::Preserve {
            formatter.options.comment_policy = CommentPolicy::Remove;
        }

        let output = formatter.reformat(case.text, 0).unwrap();
        serde_json::from_str::<serde_json::Value>(&output).unwrap();
    }
}

#[test]
fn every_quoted_string_from_the_input_survives_formatting() {
    for case in generate_cases() {
        let mut formatter = Formatter::new();
        formatter.options = case.opts.clone();
        let output = formatter.reformat(case.text, 0).unwrap();

        for quoted in quoted_strings(case.text) {
            assert!(output.contains(&quoted), "lost {quoted:?} from input");
        }
    }
}

#[test]
fn lines_past_the_budget_only_happen_when_a_single_item_cant_be_split() {
    for case in generate_cases() {
        let mut formatter = Formatter::new();
        formatter.options = case.opts.clone();
        let output = formatter.reformat(case.text, 0).unwrap();
        let eol = eol_str(&case.opts);

        for line in output.trim_end().split(eol) {
            if line.chars().count() <= case.opts.max_total_line_length {
                continue;
            }
            // An overlong line is only acceptable if it holds at most one
            // comma-separated item — otherwise it should have been split.
            assert!(line.matches(',').count() <= 1, "overlong line: {line:?}");
        }
    }
}

#[test]
fn minify_then_reformat_is_idempotent() {
    for case in generate_cases() {
        let mut formatter = Formatter::new();
        formatter.options = case.opts.clone();

        let first_pass = formatter.reformat(case.text, 0).unwrap();
        let minified = formatter.minify(&first_pass).unwrap();
        let second_pass = formatter.reformat(&minified, 0).unwrap();
        assert_eq!(second_pass, first_pass);
    }
}

#[test]
fn no_output_line_carries_trailing_whitespace() {
    for case in generate_cases() {
        let mut formatter = Formatter::new();
        formatter.options = case.opts.clone();
        let output = formatter.reformat(case.text, 0).unwrap();
        let eol = eol_str(&case.opts);

        for line in output.trim_end().split(eol) {
            assert_eq!(line, line.trim_end());
        }
    }
}

fn generate_cases() -> Vec<Case> {
    let mut cases = Vec::new();
    for &text in PLAIN_DOCS {
        for opts in option_matrix() {
            cases.push(Case { text, opts });
        }
    }

    let mut comment_opts = option_matrix();
    for opts in &mut comment_opts {
        opts.comment_policy = CommentPolicy::Preserve;
        opts.preserve_blank_lines = true;
    }
    for &text in COMMENTED_DOCS {
        for opts in &comment_opts {
            cases.push(Case { text, opts: opts.clone() });
        }
    }

    cases
}

fn option_matrix() -> Vec<FracturedJsonOptions> {
    let mut opts_list = Vec::new();

    for inline in [-1, 0, 1, 2, 3] {
        for array in [-1, 0, 2] {
            for table in [-1, 0, 2] {
                let mut opts = FracturedJsonOptions::default();
                opts.max_inline_complexity = inline;
                opts.max_compact_array_complexity = array;
                opts.max_table_row_complexity = table;
                opts_list.push(opts);
            }
        }
    }

    for len in [20usize, 30, 40, 60, 100] {
        let mut opts = FracturedJsonOptions::default();
        opts.max_total_line_length = len;
        opts_list.push(opts);
    }

    let mut opts = FracturedJsonOptions::default();
    opts.json_eol_style = EolStyle::Crlf;
    opts_list.push(opts);

    let mut opts = FracturedJsonOptions::default();
    opts.nested_bracket_padding = false;
    opts.simple_bracket_padding = true;
    opts.colon_padding = false;
    opts.comment_padding = false;
    opts.indent_spaces = 3;
    opts.prefix_string = "\t\t".to_string();
    opts_list.push(opts);

    let mut opts = FracturedJsonOptions::default();
    opts.table_comma_placement = TableCommaPlacement::BeforePadding;
    opts.number_list_alignment = NumberListAlignment::Left;
    opts_list.push(opts);

    let mut opts = FracturedJsonOptions::default();
    opts.table_comma_placement = TableCommaPlacement::BeforePaddingExceptNumbers;
    opts.number_list_alignment = NumberListAlignment::Normalize;
    opts_list.push(opts);

    opts_list.push(FracturedJsonOptions::recommended());

    opts_list
}

fn quoted_strings(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        while pos < chars.len() && chars[pos] != '"' {
            pos += 1;
        }
        let start = pos + 1;
        let mut end = start;
        while end < chars.len() && chars[end] != '"' {
            end += 1;
        }
        if end >= chars.len() {
            break;
        }
        found.push(chars[start..end].iter().collect());
        pos = end + 1;
    }
    found
}

fn eol_str(opts: &FracturedJsonOptions) -> &'static str {
    match opts.json_eol_style {
        EolStyle::Crlf => "\r\n",
        EolStyle::Lf => "\n",
    }
}
