// ABOUTME: Registry gate for the table-valued-parameter in-list strategy
// ABOUTME: Resolves the table type for a list once the TVP threshold is met
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::list::InList;
use super::DeclineReason;
use crate::settings::{settings, InListTableType, Settings};

/// Resolve the table type a TVP handler should bind `list` as
///
/// Declines when the TVP threshold is disabled or not met, or when the
/// element type has no registration. A miss is a normal decline.
///
/// # Errors
///
/// Returns the decline reason when the list should not be sent as a TVP
pub fn tvp_table_type(list: &mut InList) -> Result<InListTableType, DeclineReason> {
    tvp_table_type_with(settings(), list)
}

/// [`tvp_table_type`] against an explicit settings instance
///
/// # Errors
///
/// Returns the decline reason when the list should not be sent as a TVP
pub fn tvp_table_type_with(
    settings: &Settings,
    list: &mut InList,
) -> Result<InListTableType, DeclineReason> {
    let threshold =
        usize::try_from(settings.inlist_tvp_count()).map_err(|_| DeclineReason::Disabled)?;
    let count = list.materialize();
    if count < threshold {
        return Err(DeclineReason::BelowThreshold { count, threshold });
    }

    list.element_type_id()
        .and_then(|element_type| settings.table_type_for(element_type))
        .ok_or(DeclineReason::TableTypeNotRegistered {
            element_type: list.element_type_name(),
        })
}
