//! Malformation offsets, including escapes next to the bad brace.

use namedlog_template::{CompiledTemplate, TemplateError};

fn assert_malformed_at(template: &str, expected: usize) {
    match CompiledTemplate::compile(template) {
        Err(TemplateError::Malformed {
            template: text,
            index,
        }) => {
            assert_eq!(index, expected, "wrong index for {:?}", template);
            assert_eq!(text, template);
        }
        other => panic!("expected {:?} to be malformed, got {:?}", template, other),
    }
}

// ============================================================================
// Unmatched open brace
// ============================================================================

#[test]
fn unmatched_open_brace_trivial() {
    assert_malformed_at("{", 1);
}

#[test]
fn unmatched_open_brace_non_trivial() {
    assert_malformed_at("One{Two}Three{Four{Five}Six", 18);
}

#[test]
fn unmatched_open_brace_followed_by_escaped_open_brace() {
    assert_malformed_at("One{Two}Three{Four{{Five{Six}Seven", 24);
}

#[test]
fn unmatched_open_brace_followed_by_escaped_close_brace() {
    assert_malformed_at("One{Two}Three{Four}}Five{Six}Seven", 24);
}

#[test]
fn unmatched_open_brace_preceded_by_escaped_open_brace() {
    assert_malformed_at("One{Two}Three{{Four{Five{Six}Seven", 24);
}

#[test]
fn unmatched_open_brace_preceded_by_escaped_close_brace() {
    assert_malformed_at("One{Two}Three}}Four{Five{Six}Seven", 24);
}

// ============================================================================
// Unmatched close brace
// ============================================================================

#[test]
fn unmatched_close_brace_trivial() {
    assert_malformed_at("}", 0);
}

#[test]
fn unmatched_close_brace_non_trivial() {
    assert_malformed_at("One{Two}Three}Four{Five}Six", 13);
}

#[test]
fn unmatched_close_brace_followed_by_escaped_open_brace() {
    assert_malformed_at("One{Two}Three}Four{{Five{Six}Seven", 13);
}

#[test]
fn unmatched_close_brace_followed_by_escaped_close_brace() {
    assert_malformed_at("One{Two}Three}Four}}Five{Six}Seven", 13);
}

#[test]
fn unmatched_close_brace_preceded_by_escaped_open_brace() {
    assert_malformed_at("One{Two}Three{{Four}Five{Six}Seven", 19);
}

#[test]
fn unmatched_close_brace_preceded_by_escaped_close_brace() {
    assert_malformed_at("One{Two}Three}}Four}Five{Six}Seven", 19);
}

// ============================================================================
// Non-ASCII text
// ============================================================================

#[test]
fn unmatched_open_brace_after_accented_letter() {
    assert_malformed_at("é{", 2);
}

#[test]
fn unmatched_close_brace_after_wide_characters() {
    assert_malformed_at("日本}", 2);
}

#[test]
fn unmatched_open_brace_inside_multibyte_name() {
    assert_malformed_at("Grüße {naïve{x}", 12);
}

#[test]
fn byte_index_slices_at_the_bad_brace() {
    let err = CompiledTemplate::compile("日本}").unwrap_err();
    assert_eq!(err.index(), Some(2));
    let offset = err.byte_index().unwrap();
    assert_eq!(&"日本}"[offset..], "}");
}

// ============================================================================
// Names
// ============================================================================

#[test]
fn empty_value_name() {
    assert_malformed_at("{}", 1);
}

#[test]
fn well_formed_names_in_order() {
    let cases: &[(&str, &[&str])] = &[
        ("{name}", &["name"]),
        ("{name1}{name2}", &["name1", "name2"]),
        ("{name1}{name2}{name3}", &["name1", "name2", "name3"]),
        ("Start{name}End", &["name"]),
        ("Start{name1}Middle{name2}End", &["name1", "name2"]),
        (
            "Start{name1}Middle1{name2}Middle2{name3}End",
            &["name1", "name2", "name3"],
        ),
    ];

    for (text, expected) in cases {
        let template = CompiledTemplate::compile(*text).unwrap();
        assert_eq!(template.original(), *text);
        assert_eq!(template.placeholder_names(), *expected);
    }
}
