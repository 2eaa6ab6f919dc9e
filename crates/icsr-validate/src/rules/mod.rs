//! Business rules for domain-layer ICSR trees.

mod reactions;

use std::sync::OnceLock;

pub use reactions::{
    CONFLICTING_IDENTIFIERS, DUPLICATE_RELATION, UNRESOLVED_REFERENCE,
    exclusive_reaction_identity, no_duplicate_reaction_links, reaction_assessed_resolves,
};

use crate::processor::RuleSet;

/// Every business rule, freshly built.
pub fn business_rules() -> RuleSet {
    RuleSet::new()
        .with(reaction_assessed_resolves())
        .with(no_duplicate_reaction_links())
        .with(exclusive_reaction_identity())
}

/// Process-wide rule set, built on first use.
pub fn default_rules() -> &'static RuleSet {
    static RULES: OnceLock<RuleSet> = OnceLock::new();
    RULES.get_or_init(business_rules)
}
