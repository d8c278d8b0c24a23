// ABOUTME: Per-provider command preparation artifacts cached across executions
// ABOUTME: Bakes the fetch size hint; cleared whenever the global fetch size changes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::models::Command;

/// What a provider's command objects can accept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProviderCapabilities {
    /// Provider exposes a row fetch size hint
    pub supports_fetch_size: bool,
}

/// Preparation applied to every command created for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInit {
    /// Fetch size to apply, `None` when unsupported or disabled
    pub fetch_size: Option<i64>,
    /// Global fetch size the artifact was built from
    pub(crate) source_fetch_size: i64,
}

impl CommandInit {
    /// Build the artifact for a provider against the current fetch size
    #[must_use]
    pub fn build(capabilities: ProviderCapabilities, fetch_size: i64) -> Self {
        Self {
            fetch_size: (capabilities.supports_fetch_size && fetch_size >= 0).then_some(fetch_size),
            source_fetch_size: fetch_size,
        }
    }

    /// Copy baked values into a command that does not set its own
    pub fn apply(&self, command: &mut Command) {
        if command.fetch_size.is_none() {
            command.fetch_size = self.fetch_size;
        }
    }
}

/// Concurrent provider-name keyed cache of [`CommandInit`] artifacts
#[derive(Debug, Default)]
pub struct CommandInitCache {
    entries: DashMap<String, Arc<CommandInit>>,
}

impl CommandInitCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the artifact for a provider, rebuilding it if it is stale
    pub fn get_or_build(
        &self,
        provider: &str,
        capabilities: ProviderCapabilities,
        fetch_size: i64,
    ) -> Arc<CommandInit> {
        if let Some(existing) = self.entries.get(provider) {
            if existing.source_fetch_size == fetch_size {
                return Arc::clone(existing.value());
            }
        }

        let init = Arc::new(CommandInit::build(capabilities, fetch_size));
        self.entries.insert(provider.to_owned(), Arc::clone(&init));
        debug!(provider, ?init, "Built command init");
        init
    }

    /// Drop every cached artifact
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Number of cached artifacts
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORACLE: ProviderCapabilities = ProviderCapabilities {
        supports_fetch_size: true,
    };

    #[test]
    fn test_build_respects_capabilities() {
        assert_eq!(CommandInit::build(ORACLE, 512).fetch_size, Some(512));
        assert_eq!(CommandInit::build(ORACLE, -1).fetch_size, None);
        assert_eq!(
            CommandInit::build(ProviderCapabilities::default(), 512).fetch_size,
            None
        );
    }

    #[test]
    fn test_apply_keeps_explicit_fetch_size() {
        let init = CommandInit::build(ORACLE, 512);
        let mut command = Command::new("select 1");
        command.fetch_size = Some(10);
        init.apply(&mut command);
        assert_eq!(command.fetch_size, Some(10));

        let mut command = Command::new("select 1");
        init.apply(&mut command);
        assert_eq!(command.fetch_size, Some(512));
    }

    #[test]
    fn test_stale_entry_is_rebuilt() {
        let cache = CommandInitCache::new();
        let first = cache.get_or_build("oracle", ORACLE, 100);
        let again = cache.get_or_build("oracle", ORACLE, 100);
        assert!(Arc::ptr_eq(&first, &again));

        let rebuilt = cache.get_or_build("oracle", ORACLE, 200);
        assert_eq!(rebuilt.fetch_size, Some(200));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
