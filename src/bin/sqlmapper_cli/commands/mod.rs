// ABOUTME: Re-exports command modules for sqlmapper-cli
// ABOUTME: Provides the rewrite and settings commands

pub mod rewrite;
pub mod settings;
