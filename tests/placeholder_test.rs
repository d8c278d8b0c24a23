// ABOUTME: Integration tests for placeholder location and rewriting
// ABOUTME: Exercises sigils, hints, longer identifiers, ambiguity, and positional forms

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use sqlmapper::inlist::{InListPattern, RewriteOutcome};

fn rewrite(name: &str, by_position: bool, text: &str) -> RewriteOutcome {
    InListPattern::new(name, by_position)
        .unwrap()
        .rewrite(text, |token| format!("<{token}>"))
}

#[test]
fn test_each_sigil_is_recognized() {
    for sigil in ['@', ':', '$', '?'] {
        let text = format!("where id in {sigil}ids");
        assert_eq!(
            rewrite("ids", false, &text),
            RewriteOutcome::Rewritten {
                text: format!("where id in <{sigil}ids>"),
                placeholder: format!("{sigil}ids"),
                occurrences: 1,
            }
        );
    }
}

#[test]
fn test_matching_ignores_case_and_spans_lines() {
    let text = "select *\nfrom T\nwhere id in @IDS\n";
    match rewrite("ids", false, text) {
        RewriteOutcome::Rewritten {
            text, placeholder, ..
        } => {
            assert_eq!(text, "select *\nfrom T\nwhere id in <@IDS>\n");
            assert_eq!(placeholder, "@IDS");
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn test_hint_only_text_is_not_found() {
    assert_eq!(
        rewrite("ids", false, "option (optimize for (@ids UNKNOWN))"),
        RewriteOutcome::NotFound
    );
}

#[test]
fn test_longer_identifier_is_not_an_occurrence() {
    assert_eq!(
        rewrite("ids", false, "where a = @idsx and b = @ids_old"),
        RewriteOutcome::NotFound
    );
    assert_eq!(
        rewrite("ids", false, "where a = @idsx and id in @ids"),
        RewriteOutcome::Rewritten {
            text: "where a = @idsx and id in <@ids>".into(),
            placeholder: "@ids".into(),
            occurrences: 1,
        }
    );
}

#[test]
fn test_repeated_token_rewrites_every_occurrence() {
    assert_eq!(
        rewrite("ids", false, "where a in @ids or b in @ids"),
        RewriteOutcome::Rewritten {
            text: "where a in <@ids> or b in <@ids>".into(),
            placeholder: "@ids".into(),
            occurrences: 2,
        }
    );
}

#[test]
fn test_mixed_tokens_are_ambiguous() {
    assert_eq!(
        rewrite("ids", false, "where a in @ids or b in :ids"),
        RewriteOutcome::Ambiguous {
            tokens: vec!["@ids".into(), ":ids".into()],
        }
    );
}

#[test]
fn test_positional_form_binds_question_mark() {
    assert_eq!(
        rewrite("ids", true, "where id in ?ids? and x = ?idsx?"),
        RewriteOutcome::Rewritten {
            text: "where id in <?> and x = ?idsx?".into(),
            placeholder: "?".into(),
            occurrences: 1,
        }
    );
}

#[test]
fn test_name_is_matched_literally() {
    assert_eq!(rewrite("a.b", false, "where id in @axb"), RewriteOutcome::NotFound);
    assert!(InListPattern::new("", false).is_err());
}
