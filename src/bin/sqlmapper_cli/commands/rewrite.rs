// ABOUTME: rewrite command for sqlmapper-cli
// ABOUTME: Runs the standard in-list handler chain over a command built from arguments

use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use sqlmapper::inlist::{InList, InListHandlers};
use sqlmapper::models::Command;

/// Element types accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ElementKind {
    /// Unsigned 8-bit integers
    Byte,
    /// 16-bit integers
    Int16,
    /// 32-bit integers
    Int32,
    /// 64-bit integers
    Int64,
    /// Strings (never rewritten by `string_split`)
    Text,
}

#[derive(Serialize)]
struct RewriteReport {
    handler: Option<&'static str>,
    elements: usize,
    command: Command,
}

fn parse_values<T>(values: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<T>().with_context(|| format!("Invalid element value '{v}'")))
        .collect()
}

fn build_list(kind: ElementKind, values: &str) -> Result<InList> {
    Ok(match kind {
        ElementKind::Byte => InList::from(parse_values::<u8>(values)?),
        ElementKind::Int16 => InList::from(parse_values::<i16>(values)?),
        ElementKind::Int32 => InList::from(parse_values::<i32>(values)?),
        ElementKind::Int64 => InList::from(parse_values::<i64>(values)?),
        ElementKind::Text => InList::from(
            values
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>(),
        ),
    })
}

/// Offer the command to the standard handlers and print the report
pub fn run(sql: &str, param: &str, kind: ElementKind, values: &str, by_position: bool) -> Result<()> {
    let mut list = build_list(kind, values)?;
    let mut command = Command::new(sql);

    let handler = InListHandlers::standard().try_handle(&mut command, param, by_position, &mut list);
    if handler.is_none() {
        eprintln!("No handler engaged; the command needs default list expansion");
    }

    let report = RewriteReport {
        handler,
        elements: list.len().unwrap_or_default(),
        command,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
