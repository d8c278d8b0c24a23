// ABOUTME: string_split in-list strategy for large lists of small integers
// ABOUTME: Binds one comma-joined string and unpacks it server-side instead of N parameters
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! `string_split` strategy
//!
//! `where id in @ids` with `[1, 2, 3]` becomes
//! `where id in (select cast([value] as int) from string_split(@ids,','))`
//! with a single `varchar(max)` parameter `ids = '1,2,3'`. Requires SQL Server
//! 2016 (compatibility level 130) or later.

use std::fmt::{Display, Write};

use tracing::{info, warn};

use super::list::InList;
use super::placeholder::{InListPattern, RewriteOutcome};
use super::{DeclineReason, InListHandler, InListOutcome};
use crate::constants::{sql_types, string_split::DELIMITER};
use crate::models::{Command, DbType, DbValue, Parameter, ParameterSize};
use crate::settings::settings;

/// Element types the strategy accepts, with their server column type
pub trait SplitElement: Display {
    /// Column type each split value is cast to
    const SQL_TYPE: &'static str;
}

impl SplitElement for u8 {
    const SQL_TYPE: &'static str = sql_types::TINYINT;
}

impl SplitElement for i16 {
    const SQL_TYPE: &'static str = sql_types::SMALLINT;
}

impl SplitElement for i32 {
    const SQL_TYPE: &'static str = sql_types::INT;
}

impl SplitElement for i64 {
    const SQL_TYPE: &'static str = sql_types::BIGINT;
}

/// Join values with the split delimiter; an empty slice yields `""`
#[must_use]
pub fn join_values<T: Display>(values: &[T]) -> String {
    let mut joined = String::with_capacity(values.len() * 4);
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            joined.push(DELIMITER);
        }
        // integer Display output does not depend on locale
        let _ = write!(joined, "{value}");
    }
    joined
}

/// Subquery that replaces the placeholder
#[must_use]
pub fn split_fragment(sql_type: &str, bind_token: &str) -> String {
    format!("(select cast([value] as {sql_type}) from string_split({bind_token},'{DELIMITER}'))")
}

/// Attempt the rewrite with an explicit threshold
///
/// The list is materialized in place first, so a declining call still leaves
/// the caller with a re-readable collection. On decline the command is
/// untouched; on commit both text and parameters are updated.
pub fn try_string_split(
    command: &mut Command,
    name: &str,
    by_position: bool,
    list: &mut InList,
    threshold: i32,
) -> InListOutcome {
    let Ok(threshold) = usize::try_from(threshold) else {
        return InListOutcome::Declined(DeclineReason::Disabled);
    };
    list.materialize();

    match &*list {
        InList::Byte(seq) => {
            let values = seq.as_slice().unwrap_or_default();
            split_typed(command, name, by_position, values, threshold)
        }
        InList::Int16(seq) => {
            let values = seq.as_slice().unwrap_or_default();
            split_typed(command, name, by_position, values, threshold)
        }
        InList::Int32(seq) => {
            let values = seq.as_slice().unwrap_or_default();
            split_typed(command, name, by_position, values, threshold)
        }
        InList::Int64(seq) => {
            let values = seq.as_slice().unwrap_or_default();
            split_typed(command, name, by_position, values, threshold)
        }
        InList::Guid(_) | InList::Text(_) | InList::Values(_) => {
            InListOutcome::Declined(DeclineReason::UnsupportedElementType {
                element_type: list.element_type_name(),
            })
        }
    }
}

fn split_typed<T: SplitElement>(
    command: &mut Command,
    name: &str,
    by_position: bool,
    values: &[T],
    threshold: usize,
) -> InListOutcome {
    if values.len() < threshold {
        return InListOutcome::Declined(DeclineReason::BelowThreshold {
            count: values.len(),
            threshold,
        });
    }

    let pattern = match InListPattern::new(name, by_position) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!(placeholder = name, error = %e, "Cannot build in-list placeholder pattern");
            return InListOutcome::Declined(DeclineReason::InvalidPattern);
        }
    };

    match pattern.rewrite(&command.text, |token| split_fragment(T::SQL_TYPE, token)) {
        RewriteOutcome::NotFound => InListOutcome::Declined(DeclineReason::PlaceholderNotFound),
        RewriteOutcome::Ambiguous { tokens } => {
            InListOutcome::Declined(DeclineReason::AmbiguousPlaceholder { tokens })
        }
        RewriteOutcome::Rewritten {
            text,
            placeholder,
            occurrences,
        } => {
            let value = join_values(values);
            command.text = text;
            command.parameters.upsert(
                Parameter::new(name, DbType::AnsiString, DbValue::Text(value))
                    .with_size(ParameterSize::Unbounded),
            );
            info!(
                placeholder = %placeholder,
                occurrences,
                elements = values.len(),
                sql_type = T::SQL_TYPE,
                "In-list rewritten to string_split"
            );
            InListOutcome::Handled
        }
    }
}

/// Handler reading its threshold from the global settings
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSplitHandler;

impl InListHandler for StringSplitHandler {
    fn name(&self) -> &'static str {
        "string_split"
    }

    fn try_handle(
        &self,
        command: &mut Command,
        name: &str,
        by_position: bool,
        list: &mut InList,
    ) -> InListOutcome {
        let threshold = settings().inlist_string_split_count();
        try_string_split(command, name, by_position, list, threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inlist::list::Sequence;

    #[test]
    fn test_join_values() {
        assert_eq!(join_values::<i32>(&[]), "");
        assert_eq!(join_values(&[7_i64]), "7");
        assert_eq!(join_values(&[-1_i16, 0, 32767]), "-1,0,32767");
    }

    #[test]
    fn test_fragment_shape() {
        assert_eq!(
            split_fragment("bigint", "@ids"),
            "(select cast([value] as bigint) from string_split(@ids,','))"
        );
    }

    #[test]
    fn test_commit_rewrites_text_and_binds_one_parameter() {
        let mut command = Command::new("select * from T where id in @ids");
        let mut list = InList::from(vec![1_i32, 2, 3, 4]);

        let outcome = try_string_split(&mut command, "ids", false, &mut list, 3);

        assert_eq!(outcome, InListOutcome::Handled);
        assert_eq!(
            command.text,
            "select * from T where id in (select cast([value] as int) from string_split(@ids,','))"
        );
        assert_eq!(command.parameters.len(), 1);
        let param = command.parameters.get("ids").unwrap();
        assert_eq!(param.name, "ids");
        assert_eq!(param.db_type, DbType::AnsiString);
        assert_eq!(param.size, ParameterSize::Unbounded);
        assert_eq!(param.value, DbValue::Text("1,2,3,4".into()));
    }

    #[test]
    fn test_negative_threshold_is_inert_and_leaves_source_pending() {
        let mut command = Command::new("where id in @ids");
        let mut list = InList::from(Sequence::pending(vec![1_i32]));
        let outcome = try_string_split(&mut command, "ids", false, &mut list, -1);
        assert_eq!(outcome, InListOutcome::Declined(DeclineReason::Disabled));
        assert_eq!(list.len(), None);
    }

    #[test]
    fn test_byte_uses_tinyint() {
        let mut command = Command::new("where id in @ids");
        let mut list = InList::from(vec![255_u8, 0]);
        assert!(try_string_split(&mut command, "ids", false, &mut list, 0).is_handled());
        assert!(command.text.contains("cast([value] as tinyint)"));
        assert_eq!(
            command.parameters.get("ids").map(|p| &p.value),
            Some(&DbValue::Text("255,0".into()))
        );
    }
}
