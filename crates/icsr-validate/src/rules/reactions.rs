//! Integrity of drug-to-reaction links.

use std::collections::HashSet;

use icsr_model::domain::{
    EIReactionEvent, GK9IDrugReactionMatrix, GKDrugInformation, Icsr, e_i_reaction_event,
    g_k_drug_information, g_k_9_i_drug_reaction_matrix, icsr,
};
use icsr_model::{FieldPath, ReactionRef, ScalarType};

use crate::rule::{Check, Occurrences, Rule, RuleContext};

pub const UNRESOLVED_REFERENCE: &str = "unresolved_reference";
pub const DUPLICATE_RELATION: &str = "duplicate_relation";
pub const CONFLICTING_IDENTIFIERS: &str = "conflicting_identifiers";

/// Every assessed reaction must be a reaction declared in the same report,
/// by surrogate id or correlation token.
pub fn reaction_assessed_resolves() -> Rule<Icsr> {
    Rule {
        name: "reaction_assessed_resolves",
        code: UNRESOLVED_REFERENCE,
        inputs: &[icsr::e_i_reaction_event, icsr::g_k_drug_information],
        check: Check::PerOccurrence(check_reaction_assessed),
    }
}

fn check_reaction_assessed(context: &RuleContext<'_, Icsr>, found: &mut Occurrences) {
    let declared: HashSet<ReactionRef> = context
        .children_as::<EIReactionEvent>(icsr::e_i_reaction_event)
        .flat_map(|reaction| {
            let id = reaction.id.map(ReactionRef::Id);
            let token = reaction.uuid.map(ReactionRef::Uuid);
            id.into_iter().chain(token)
        })
        .collect();

    let drugs = context.children_as::<GKDrugInformation>(icsr::g_k_drug_information);
    for (drug_index, drug) in drugs.enumerate() {
        for (link_index, link) in drug.g_k_9_i_drug_reaction_matrix.iter().enumerate() {
            let target = link.g_k_9_i_1_reaction_assessed;
            if declared.contains(&target) {
                continue;
            }
            let at = FieldPath::root()
                .field(icsr::g_k_drug_information.name())
                .index(drug_index)
                .field(g_k_drug_information::g_k_9_i_drug_reaction_matrix.name())
                .index(link_index)
                .field(g_k_9_i_drug_reaction_matrix::g_k_9_i_1_reaction_assessed.name());
            found.report(
                at,
                "Technical id was not found among possible related entities",
                Some(target.to_scalar()),
            );
        }
    }
}

/// A drug links to each reaction at most once.
pub fn no_duplicate_reaction_links() -> Rule<GKDrugInformation> {
    Rule {
        name: "no_duplicate_reaction_links",
        code: DUPLICATE_RELATION,
        inputs: &[g_k_drug_information::g_k_9_i_drug_reaction_matrix],
        check: Check::Single {
            message: "Cannot have duplicate drug to reaction relations",
            check: links_are_distinct,
        },
    }
}

fn links_are_distinct(context: &RuleContext<'_, GKDrugInformation>) -> bool {
    let mut seen = HashSet::new();
    context
        .children_as::<GK9IDrugReactionMatrix>(g_k_drug_information::g_k_9_i_drug_reaction_matrix)
        .all(|link| seen.insert(link.g_k_9_i_1_reaction_assessed))
}

/// A reaction is identified by its surrogate id or its correlation token,
/// never both.
pub fn exclusive_reaction_identity() -> Rule<EIReactionEvent> {
    Rule {
        name: "exclusive_reaction_identity",
        code: CONFLICTING_IDENTIFIERS,
        inputs: &[e_i_reaction_event::id, e_i_reaction_event::uuid],
        check: Check::Single {
            message: "Both id and uuid cannot be specified",
            check: |context| {
                context.scalar(e_i_reaction_event::id).is_none()
                    || context.scalar(e_i_reaction_event::uuid).is_none()
            },
        },
    }
}
