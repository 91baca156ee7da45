//! Promotion Usage Budget

/// Redemption cap for a promotion code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageBudget {
    /// Maximum number of redemptions, if capped
    pub redemption_limit: Option<u32>,

    /// Redemptions already made, as reported by the backend
    pub redeemed: u32,
}

impl UsageBudget {
    /// Create a budget with no cap
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            redemption_limit: None,
            redeemed: 0,
        }
    }

    /// Create a capped budget
    #[must_use]
    pub const fn with_redemption_limit(limit: u32, redeemed: u32) -> Self {
        Self {
            redemption_limit: Some(limit),
            redeemed,
        }
    }

    /// Redemptions left, or `None` when uncapped
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.redemption_limit
            .map(|limit| limit.saturating_sub(self.redeemed))
    }

    /// Check if every redemption has been used
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }
}
