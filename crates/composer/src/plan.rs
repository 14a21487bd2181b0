//! Provider selection order.

use crate::classify::Complexity;
use serde::Serialize;

/// Which configured LLM slot an attempt used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderSlot {
    /// Provider "A", preferred for complex questions
    Primary,
    /// Provider "B", preferred for everything else
    Secondary,
}

impl ProviderSlot {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "A",
            Self::Secondary => "B",
        }
    }
}

/// Ordered slots to attempt. Only configured slots appear, each at most once.
///
/// Complex questions go to A first when A is configured; everything else
/// goes to B first with A as the fallback.
pub fn provider_plan(complexity: Complexity, has_primary: bool, has_secondary: bool) -> Vec<ProviderSlot> {
    let mut plan = Vec::with_capacity(2);

    if complexity.is_complex() && has_primary {
        plan.push(ProviderSlot::Primary);
        if has_secondary {
            plan.push(ProviderSlot::Secondary);
        }
        return plan;
    }

    if has_secondary {
        plan.push(ProviderSlot::Secondary);
    }
    if has_primary {
        plan.push(ProviderSlot::Primary);
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use ProviderSlot::{Primary, Secondary};

    #[test]
    fn test_complex_prefers_primary() {
        assert_eq!(provider_plan(Complexity::Complex, true, true), vec![Primary, Secondary]);
        assert_eq!(provider_plan(Complexity::Complex, true, false), vec![Primary]);
    }

    #[test]
    fn test_simple_prefers_secondary() {
        assert_eq!(provider_plan(Complexity::Simple, true, true), vec![Secondary, Primary]);
        assert_eq!(provider_plan(Complexity::Simple, false, true), vec![Secondary]);
        assert_eq!(provider_plan(Complexity::Simple, true, false), vec![Primary]);
    }

    #[test]
    fn test_complex_without_primary() {
        assert_eq!(provider_plan(Complexity::Complex, false, true), vec![Secondary]);
    }

    #[test]
    fn test_nothing_configured() {
        assert!(provider_plan(Complexity::Simple, false, false).is_empty());
        assert!(provider_plan(Complexity::Complex, false, false).is_empty());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Primary.label(), "A");
        assert_eq!(Secondary.label(), "B");
    }
}
