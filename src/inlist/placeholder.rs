// ABOUTME: Locates in-list bind placeholders in command text and rewrites them
// ABOUTME: Skips optimizer-hint lookalikes and longer identifiers sharing the name
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Placeholder locator
//!
//! Named placeholders are a sigil (`@`, `:`, `$` or `?`) followed by the
//! parameter name; pseudo-positional placeholders are `?name?` and bind
//! through the provider's positional `?` marker. An occurrence followed by
//! whitespace and `unknown` is the `OPTIMIZE FOR (@ids UNKNOWN)` hint form and
//! is copied through untouched. Matching is case-insensitive and runs over the
//! whole text, line breaks included.

use regex::Regex;

use crate::errors::{AppError, AppResult};

/// Result of scanning command text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Every genuine occurrence was replaced
    Rewritten {
        /// Rewritten command text
        text: String,
        /// Bind token as it appeared in the text, e.g. `@ids` or `?`
        placeholder: String,
        /// Number of occurrences replaced
        occurrences: usize,
    },
    /// No genuine bind occurrence exists in the text
    NotFound,
    /// Genuine occurrences use different bind tokens, e.g. `@ids` and `:ids`
    Ambiguous {
        /// Distinct tokens seen, in order of appearance
        tokens: Vec<String>,
    },
}

/// Case-insensitive token equality, folding the same way the matcher does
fn same_token(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Compiled matcher for one parameter name
#[derive(Debug, Clone)]
pub struct InListPattern {
    regex: Regex,
}

impl InListPattern {
    /// Build the matcher for `name` (without sigil)
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or the pattern fails to compile
    pub fn new(name: &str, by_position: bool) -> AppResult<Self> {
        if name.is_empty() {
            return Err(AppError::invalid_input("placeholder name must not be empty"));
        }
        let escaped = regex::escape(name);
        // group 1: bind token, group 2: identifier continuation, group 3: hint suffix
        let source = if by_position {
            format!(r"(?i)(\?){escaped}\?(\w*)(\s+unknown\b)?")
        } else {
            format!(r"(?i)([?@:$]{escaped})(\w*)(\s+unknown\b)?")
        };
        let regex = Regex::new(&source).map_err(|e| {
            AppError::pattern(format!("cannot build placeholder pattern for {name:?}"))
                .with_source(e)
        })?;
        Ok(Self { regex })
    }

    /// Replace every genuine occurrence using `template(bind_token)`
    ///
    /// The input text is never modified; on `NotFound` and `Ambiguous` the
    /// caller keeps its original text.
    pub fn rewrite<F>(&self, text: &str, mut template: F) -> RewriteOutcome
    where
        F: FnMut(&str) -> String,
    {
        let mut output = String::with_capacity(text.len());
        let mut copied_to = 0;
        let mut tokens: Vec<String> = Vec::new();
        let mut occurrences = 0;

        for caps in self.regex.captures_iter(text) {
            let (Some(whole), Some(bind)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let longer_identifier = caps.get(2).is_some_and(|m| !m.as_str().is_empty());
            let hint = caps.get(3).is_some();
            if longer_identifier || hint {
                continue;
            }

            let token = bind.as_str();
            if !tokens.iter().any(|t| same_token(t, token)) {
                tokens.push(token.to_owned());
            }
            output.push_str(&text[copied_to..whole.start()]);
            output.push_str(&template(token));
            copied_to = whole.end();
            occurrences += 1;
        }

        match tokens.len() {
            0 => RewriteOutcome::NotFound,
            1 => {
                output.push_str(&text[copied_to..]);
                RewriteOutcome::Rewritten {
                    text: output,
                    placeholder: tokens.remove(0),
                    occurrences,
                }
            }
            _ => RewriteOutcome::Ambiguous { tokens },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(text: &str, name: &str, by_position: bool) -> RewriteOutcome {
        InListPattern::new(name, by_position)
            .unwrap()
            .rewrite(text, |token| format!("<{token}>"))
    }

    #[test]
    fn test_named_occurrence_is_rewritten() {
        let outcome = rewrite("select * from T where id in @ids", "ids", false);
        assert_eq!(
            outcome,
            RewriteOutcome::Rewritten {
                text: "select * from T where id in <@ids>".into(),
                placeholder: "@ids".into(),
                occurrences: 1,
            }
        );
    }

    #[test]
    fn test_match_is_case_insensitive_and_keeps_token_text() {
        let outcome = rewrite("where id in @IDS", "ids", false);
        assert!(matches!(
            outcome,
            RewriteOutcome::Rewritten { ref placeholder, .. } if placeholder == "@IDS"
        ));
    }

    #[test]
    fn test_hint_form_is_left_alone() {
        let text = "select * from T where id in @ids\noption (optimize for (@ids UNKNOWN))";
        let RewriteOutcome::Rewritten { text, occurrences, .. } = rewrite(text, "ids", false) else {
            panic!("expected a rewrite");
        };
        assert_eq!(occurrences, 1);
        assert_eq!(
            text,
            "select * from T where id in <@ids>\noption (optimize for (@ids UNKNOWN))"
        );
    }

    #[test]
    fn test_only_hint_is_not_found() {
        let outcome = rewrite("option (optimize for (@ids unknown))", "ids", false);
        assert_eq!(outcome, RewriteOutcome::NotFound);
    }

    #[test]
    fn test_longer_identifier_is_not_an_occurrence() {
        assert_eq!(rewrite("where x = @idsTotal", "ids", false), RewriteOutcome::NotFound);
    }

    #[test]
    fn test_mixed_sigils_are_ambiguous() {
        let outcome = rewrite("where a in @ids or b in :ids", "ids", false);
        assert_eq!(
            outcome,
            RewriteOutcome::Ambiguous {
                tokens: vec!["@ids".into(), ":ids".into()]
            }
        );
    }

    #[test]
    fn test_case_variants_of_non_ascii_name_are_one_token() {
        let outcome = rewrite("where a in @äids or b in @ÄIDS", "äids", false);
        assert_eq!(
            outcome,
            RewriteOutcome::Rewritten {
                text: "where a in <@äids> or b in <@ÄIDS>".into(),
                placeholder: "@äids".into(),
                occurrences: 2,
            }
        );
    }

    #[test]
    fn test_repeated_token_rewrites_every_occurrence() {
        let RewriteOutcome::Rewritten { text, occurrences, .. } =
            rewrite("where a in @ids\n  or b in @ids", "ids", false)
        else {
            panic!("expected a rewrite");
        };
        assert_eq!(occurrences, 2);
        assert_eq!(text, "where a in <@ids>\n  or b in <@ids>");
    }

    #[test]
    fn test_pseudo_positional_binds_through_question_mark() {
        let outcome = rewrite("where id in ?ids? and x = 1", "ids", true);
        assert_eq!(
            outcome,
            RewriteOutcome::Rewritten {
                text: "where id in <?> and x = 1".into(),
                placeholder: "?".into(),
                occurrences: 1,
            }
        );
    }

    #[test]
    fn test_regex_metacharacters_in_name_are_escaped() {
        assert_eq!(rewrite("where id in @a", "a+", false), RewriteOutcome::NotFound);
        assert!(InListPattern::new("", false).is_err());
    }
}
