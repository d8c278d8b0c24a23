// ABOUTME: Command behavior negotiation with providers that reject optimization hints
// ABOUTME: Classifies provider errors and narrows the allowed behavior set one way
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::atomic::{AtomicU32, Ordering};

use tracing::warn;

use crate::constants::behavior_names;
use crate::errors::{ProviderError, ProviderErrorCode};
use crate::models::CommandBehavior;

/// Behaviors some providers refuse
pub const NEGOTIABLE_BEHAVIORS: CommandBehavior =
    CommandBehavior::SINGLE_RESULT.union(CommandBehavior::SINGLE_ROW);

/// Allowed set at startup and after a reset
pub const DEFAULT_ALLOWED_BEHAVIORS: CommandBehavior = CommandBehavior::all();

/// Result of offering a provider error to negotiation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviorNegotiation {
    /// Behaviors were cleared; re-issue the command without them
    RetryAdvised {
        /// Behaviors removed from the allowed set
        cleared: CommandBehavior,
    },
    /// The error is unrelated, or the set was already narrowed
    NotApplicable,
}

impl BehaviorNegotiation {
    /// Whether the caller should re-issue the command
    #[must_use]
    pub const fn should_retry(self) -> bool {
        matches!(self, Self::RetryAdvised { .. })
    }
}

/// Which negotiable behaviors a provider error complains about
///
/// A structured code is authoritative; message text is only inspected when
/// the provider gave no code.
#[must_use]
pub fn rejected_behaviors(error: &ProviderError) -> CommandBehavior {
    match error.code {
        Some(ProviderErrorCode::SingleResultUnsupported) => CommandBehavior::SINGLE_RESULT,
        Some(ProviderErrorCode::SingleRowUnsupported) => CommandBehavior::SINGLE_ROW,
        Some(_) => CommandBehavior::empty(),
        None => {
            let mut mentioned = CommandBehavior::empty();
            if error.message.contains(behavior_names::SINGLE_RESULT) {
                mentioned |= CommandBehavior::SINGLE_RESULT;
            }
            if error.message.contains(behavior_names::SINGLE_ROW) {
                mentioned |= CommandBehavior::SINGLE_ROW;
            }
            mentioned
        }
    }
}

/// Atomic allowed-behavior bitset
#[derive(Debug)]
pub(crate) struct AllowedBehaviors {
    bits: AtomicU32,
}

impl AllowedBehaviors {
    pub(crate) const fn new() -> Self {
        Self {
            bits: AtomicU32::new(DEFAULT_ALLOWED_BEHAVIORS.bits()),
        }
    }

    pub(crate) fn load(&self) -> CommandBehavior {
        CommandBehavior::from_bits_truncate(self.bits.load(Ordering::SeqCst))
    }

    pub(crate) fn reset(&self) {
        self.bits
            .store(DEFAULT_ALLOWED_BEHAVIORS.bits(), Ordering::SeqCst);
    }

    /// One-way transition from the default set to the narrowed set
    pub(crate) fn negotiate(
        &self,
        requested: CommandBehavior,
        error: &ProviderError,
    ) -> BehaviorNegotiation {
        let allowed = self.load();
        if allowed != DEFAULT_ALLOWED_BEHAVIORS || !requested.intersects(NEGOTIABLE_BEHAVIORS) {
            return BehaviorNegotiation::NotApplicable;
        }
        if !rejected_behaviors(error).intersects(allowed) {
            return BehaviorNegotiation::NotApplicable;
        }

        let narrowed = DEFAULT_ALLOWED_BEHAVIORS.difference(NEGOTIABLE_BEHAVIORS);
        match self.bits.compare_exchange(
            DEFAULT_ALLOWED_BEHAVIORS.bits(),
            narrowed.bits(),
            Ordering::SeqCst,
            Ordering::SeqCst,
        ) {
            Ok(_) => {
                warn!(
                    cleared = ?NEGOTIABLE_BEHAVIORS,
                    provider_message = %error.message,
                    "Provider rejected command behavior optimizations; disabled for this process"
                );
                BehaviorNegotiation::RetryAdvised {
                    cleared: NEGOTIABLE_BEHAVIORS,
                }
            }
            // another thread narrowed first
            Err(_) => BehaviorNegotiation::NotApplicable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_code_wins_over_message() {
        let error = ProviderError::with_code(ProviderErrorCode::Other, "SingleRow is not supported");
        assert!(rejected_behaviors(&error).is_empty());

        let error = ProviderError::with_code(ProviderErrorCode::SingleRowUnsupported, "nope");
        assert_eq!(rejected_behaviors(&error), CommandBehavior::SINGLE_ROW);
    }

    #[test]
    fn test_message_fallback() {
        let error = ProviderError::from_message("CommandBehavior.SingleResult is not supported");
        assert_eq!(rejected_behaviors(&error), CommandBehavior::SINGLE_RESULT);

        let error = ProviderError::from_message("connection reset");
        assert!(rejected_behaviors(&error).is_empty());
    }

    #[test]
    fn test_negotiation_is_one_way() {
        let allowed = AllowedBehaviors::new();
        let error = ProviderError::from_message("SingleRow unsupported");

        let first = allowed.negotiate(CommandBehavior::SINGLE_ROW, &error);
        assert_eq!(
            first,
            BehaviorNegotiation::RetryAdvised {
                cleared: NEGOTIABLE_BEHAVIORS
            }
        );
        assert!(!allowed.load().intersects(NEGOTIABLE_BEHAVIORS));

        let second = allowed.negotiate(CommandBehavior::SINGLE_ROW, &error);
        assert_eq!(second, BehaviorNegotiation::NotApplicable);
        assert!(!allowed.load().intersects(NEGOTIABLE_BEHAVIORS));

        allowed.reset();
        assert_eq!(allowed.load(), DEFAULT_ALLOWED_BEHAVIORS);
    }

    #[test]
    fn test_unrequested_behavior_is_not_negotiated() {
        let allowed = AllowedBehaviors::new();
        let error = ProviderError::from_message("SingleRow unsupported");
        let outcome = allowed.negotiate(CommandBehavior::SEQUENTIAL_ACCESS, &error);
        assert_eq!(outcome, BehaviorNegotiation::NotApplicable);
        assert_eq!(allowed.load(), DEFAULT_ALLOWED_BEHAVIORS);
    }
}
