//! Explicit quote validity state.
//!
//! Collapses the loading/error/warning/submitting flags of a quote
//! session into one tagged value so contradictory combinations (e.g.
//! "valid while loading") cannot be represented.

use serde::Serialize;

/// Inputs the state is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteConditions {
    /// Feed fetch in progress.
    pub loading: bool,
    /// Last fetch failed.
    pub fetch_failed: bool,
    /// Settlement call in flight.
    pub submitting: bool,
    /// Both sides selected.
    pub has_pair: bool,
    /// Both sides selected and sharing a symbol.
    pub same_asset: bool,
    /// Committed amount text is non-empty.
    pub has_amount: bool,
    /// Committed amount text is non-empty but parses to <= 0.
    pub invalid_amount: bool,
}

/// Where a quote stands with respect to submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuoteState {
    /// Waiting on the price feed.
    Loading,
    /// The price feed could not be loaded.
    Failed {
        /// User-facing error message.
        message: String,
    },
    /// The user is still composing a quote; either warning may be set.
    Editing {
        /// Both sides hold the same asset.
        same_asset: bool,
        /// Amount is present but not strictly positive.
        invalid_amount: bool,
    },
    /// Everything checks out; submission is allowed.
    Valid,
    /// A settlement call is in flight.
    Submitting,
}

impl QuoteState {
    /// Derive the state. Precedence: loading, failure, submitting, then
    /// validity.
    pub fn derive(conditions: QuoteConditions, fetch_error: Option<&str>) -> Self {
        if conditions.loading {
            return Self::Loading;
        }
        if conditions.fetch_failed {
            return Self::Failed {
                message: fetch_error.unwrap_or_default().to_string(),
            };
        }
        if conditions.submitting {
            return Self::Submitting;
        }

        let valid = conditions.has_pair
            && !conditions.same_asset
            && conditions.has_amount
            && !conditions.invalid_amount;

        if valid {
            Self::Valid
        } else {
            Self::Editing {
                same_asset: conditions.same_asset,
                invalid_amount: conditions.invalid_amount,
            }
        }
    }

    /// Whether submission is allowed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Short reason submission is blocked, for logs and errors.
    pub fn blocked_reason(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some("prices are still loading"),
            Self::Failed { .. } => Some("prices could not be loaded"),
            Self::Submitting => Some("a swap is already being submitted"),
            Self::Editing { same_asset: true, .. } => Some("cannot swap the same token"),
            Self::Editing { invalid_amount: true, .. } => Some("please enter a valid amount"),
            Self::Editing { .. } => Some("select both tokens and enter an amount"),
            Self::Valid => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> QuoteConditions {
        QuoteConditions {
            has_pair: true,
            has_amount: true,
            ..QuoteConditions::default()
        }
    }

    #[test]
    fn test_valid_when_everything_holds() {
        assert_eq!(QuoteState::derive(ready(), None), QuoteState::Valid);
    }

    #[test]
    fn test_loading_takes_precedence() {
        let c = QuoteConditions { loading: true, fetch_failed: true, ..ready() };
        assert_eq!(QuoteState::derive(c, Some("boom")), QuoteState::Loading);
    }

    #[test]
    fn test_failure_carries_message() {
        let c = QuoteConditions { fetch_failed: true, ..ready() };
        assert_eq!(
            QuoteState::derive(c, Some("boom")),
            QuoteState::Failed { message: "boom".to_string() }
        );
    }

    #[test]
    fn test_warnings_are_independent() {
        let c = QuoteConditions { same_asset: true, invalid_amount: true, ..ready() };
        assert_eq!(
            QuoteState::derive(c, None),
            QuoteState::Editing { same_asset: true, invalid_amount: true }
        );
    }

    #[test]
    fn test_empty_amount_is_not_valid_but_not_warned() {
        let c = QuoteConditions { has_amount: false, ..ready() };
        let state = QuoteState::derive(c, None);
        assert_eq!(state, QuoteState::Editing { same_asset: false, invalid_amount: false });
        assert!(!state.is_valid());
    }

    #[test]
    fn test_submitting_blocks() {
        let c = QuoteConditions { submitting: true, ..ready() };
        let state = QuoteState::derive(c, None);
        assert_eq!(state, QuoteState::Submitting);
        assert_eq!(state.blocked_reason(), Some("a swap is already being submitted"));
    }
}
