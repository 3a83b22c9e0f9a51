//! Chat-scoped global replacement rules.
//!
//! Every transformed caption passes through the owning chat's registry as
//! the final step before delivery. Rules apply sequentially in insertion
//! order, each step feeding the next, so later rules see the output of
//! earlier ones. Updating an existing target keeps its original rank.

use recap_shared::error::{RecapError, Result};

/// One (target, replacement) substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    pub target: String,
    pub replacement: String,
}

/// Ordered set of substitution rules for one chat.
///
/// Process-lifetime state: survives `/clear` and delivery, reset only on
/// restart.
#[derive(Debug, Default)]
pub struct ReplacementRegistry {
    rules: Vec<ReplacementRule>,
}

impl ReplacementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rule, or update the replacement of an existing target in
    /// place without changing its insertion rank.
    ///
    /// Returns `true` when an existing target was updated.
    pub fn upsert(&mut self, target: &str, replacement: &str) -> Result<bool> {
        if target.is_empty() {
            return Err(RecapError::InvalidArgument(
                "Usage: /global_replacement <target> <replacement>".to_string(),
            ));
        }

        if let Some(rule) = self.rules.iter_mut().find(|r| r.target == target) {
            rule.replacement = replacement.to_string();
            return Ok(true);
        }

        self.rules.push(ReplacementRule {
            target: target.to_string(),
            replacement: replacement.to_string(),
        });
        Ok(false)
    }

    /// Run the caption through every rule in insertion order.
    pub fn apply(&self, caption: &str) -> String {
        self.rules.iter().fold(caption.to_string(), |acc, rule| {
            acc.replace(&rule.target, &rule.replacement)
        })
    }

    /// Rules in insertion order. The 1-based position in this slice is the
    /// index accepted by [`remove_at`](Self::remove_at).
    pub fn rules(&self) -> &[ReplacementRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Remove the rule at a 1-based position, as reported by the most
    /// recent listing. Positions shift down after a removal, so the entry
    /// removed is whatever occupies the position *now*.
    pub fn remove_at(&mut self, index: usize) -> Result<ReplacementRule> {
        if index == 0 || index > self.rules.len() {
            return Err(RecapError::OutOfRange {
                index,
                len: self.rules.len(),
            });
        }
        Ok(self.rules.remove(index - 1))
    }
}
