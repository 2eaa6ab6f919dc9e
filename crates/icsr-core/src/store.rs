//! Persistence collaborator for storage-layer trees.
//!
//! The store owns surrogate identity: every node of a written tree ends up
//! with an id the store issued, unique across all reports, and
//! correlation-token links become id links. Nothing else in the workspace
//! assigns ids.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use icsr_model::{Entity, ReactionRef, storage};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Persistence operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ICSR {id} does not exist")]
    NotFound { id: i64 },

    /// A drug-reaction link names a token no reaction of the report carries.
    #[error("reaction link at drug {drug}, link {link} points at unknown token {token}")]
    UnresolvedToken {
        drug: usize,
        link: usize,
        token: Uuid,
    },

    /// Two new reactions were submitted with the same id, so links to it
    /// cannot be followed.
    #[error("reaction id {id} was submitted for more than one new reaction")]
    AmbiguousReactionId { id: i64 },

    #[error("store is unavailable after a panic in another thread")]
    Poisoned,
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { id } => format!("No case safety report with id {id} was found."),
            Self::UnresolvedToken { .. } => {
                "A drug-reaction link refers to a reaction that is not part of the report."
                    .to_string()
            }
            Self::AmbiguousReactionId { id } => {
                format!("Reaction id {id} is used by more than one reaction.")
            }
            Self::Poisoned => "The report store is unavailable; restart the process.".to_string(),
        }
    }
}

/// Contract of the persistence collaborator.
pub trait IcsrStore: Send + Sync {
    fn list(&self) -> Result<Vec<storage::Icsr>, StoreError>;

    fn read(&self, id: i64) -> Result<storage::Icsr, StoreError>;

    /// Persists a new report and returns it with every id assigned.
    fn create(&self, icsr: storage::Icsr) -> Result<storage::Icsr, StoreError>;

    /// Replaces report `id`; nodes whose id is not part of the stored
    /// version are treated as new.
    fn update(&self, id: i64, icsr: storage::Icsr) -> Result<storage::Icsr, StoreError>;

    fn delete(&self, id: i64) -> Result<(), StoreError>;
}

/// Ids of every node of `icsr`, root included.
pub fn issued_ids(icsr: &storage::Icsr) -> BTreeSet<i64> {
    let mut ids = BTreeSet::new();
    (icsr as &dyn Entity).visit(&mut |node| ids.extend(node.id()));
    ids
}

/// Gives every node of `icsr` a store-issued id, parents first.
///
/// A node keeps its id only when it is in `issued` and no earlier node of
/// the tree claimed it; every other node draws a fresh id from `next_id`.
/// Links to a reaction whose submitted id was replaced follow the reaction.
pub fn assign_ids(
    icsr: &mut storage::Icsr,
    issued: &BTreeSet<i64>,
    next_id: &mut i64,
) -> Result<(), StoreError> {
    let submitted: Vec<Option<i64>> = icsr.e_i_reaction_event.iter().map(|r| r.id).collect();

    let mut kept = HashSet::new();
    (&mut *icsr as &mut dyn Entity).visit_mut(&mut |node| match node.id() {
        Some(id) if issued.contains(&id) && kept.insert(id) => {}
        _ => {
            node.set_id(Some(*next_id));
            *next_id += 1;
        }
    });

    let retained: HashSet<i64> = icsr
        .e_i_reaction_event
        .iter()
        .zip(&submitted)
        .filter_map(|(reaction, &submitted)| submitted.filter(|&id| reaction.id == Some(id)))
        .collect();
    let mut replaced: HashMap<i64, i64> = HashMap::new();
    for (reaction, submitted) in icsr.e_i_reaction_event.iter().zip(submitted) {
        let (Some(old), Some(new)) = (submitted, reaction.id) else {
            continue;
        };
        if retained.contains(&old) {
            continue;
        }
        if replaced.insert(old, new).is_some() {
            return Err(StoreError::AmbiguousReactionId { id: old });
        }
    }

    for drug in &mut icsr.g_k_drug_information {
        for link in &mut drug.g_k_9_i_drug_reaction_matrix {
            if let ReactionRef::Id(old) = link.g_k_9_i_1_reaction_assessed {
                if let Some(&new) = replaced.get(&old) {
                    link.g_k_9_i_1_reaction_assessed = ReactionRef::Id(new);
                }
            }
        }
    }
    if !replaced.is_empty() {
        debug!(count = replaced.len(), "replaced submitted reaction ids");
    }
    Ok(())
}

/// Rewrites token links to the id of the reaction carrying the token.
///
/// Tokens only correlate nodes of a report that is not yet persisted, so
/// they are cleared from the reactions once every link is rewritten.
pub fn resolve_reaction_tokens(icsr: &mut storage::Icsr) -> Result<(), StoreError> {
    let ids_by_token: HashMap<Uuid, i64> = icsr
        .e_i_reaction_event
        .iter()
        .filter_map(|reaction| {
            let token = reaction.uuid.as_deref()?.parse().ok()?;
            Some((token, reaction.id?))
        })
        .collect();

    for (drug_index, drug) in icsr.g_k_drug_information.iter_mut().enumerate() {
        for (link_index, link) in drug.g_k_9_i_drug_reaction_matrix.iter_mut().enumerate() {
            if let ReactionRef::Uuid(token) = link.g_k_9_i_1_reaction_assessed {
                let id = ids_by_token.get(&token).copied().ok_or(
                    StoreError::UnresolvedToken {
                        drug: drug_index,
                        link: link_index,
                        token,
                    },
                )?;
                link.g_k_9_i_1_reaction_assessed = ReactionRef::Id(id);
            }
        }
    }

    for reaction in &mut icsr.e_i_reaction_event {
        reaction.uuid = None;
    }
    Ok(())
}

#[derive(Debug)]
struct State {
    next_id: i64,
    reports: BTreeMap<i64, storage::Icsr>,
}

/// Thread-safe store keeping reports in memory, keyed by root id.
#[derive(Debug)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                next_id: 1,
                reports: BTreeMap::new(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.lock().map_or(0, |state| state.reports.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state.lock().map_err(|_| StoreError::Poisoned)
    }

    fn persist(
        state: &mut State,
        mut icsr: storage::Icsr,
        issued: &BTreeSet<i64>,
    ) -> Result<storage::Icsr, StoreError> {
        assign_ids(&mut icsr, issued, &mut state.next_id)?;
        resolve_reaction_tokens(&mut icsr)?;
        Ok(icsr)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IcsrStore for InMemoryStore {
    fn list(&self) -> Result<Vec<storage::Icsr>, StoreError> {
        Ok(self.lock()?.reports.values().cloned().collect())
    }

    fn read(&self, id: i64) -> Result<storage::Icsr, StoreError> {
        self.lock()?
            .reports
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })
    }

    fn create(&self, mut icsr: storage::Icsr) -> Result<storage::Icsr, StoreError> {
        let mut state = self.lock()?;
        let id = state.next_id;
        state.next_id += 1;
        icsr.id = Some(id);
        let icsr = Self::persist(&mut state, icsr, &BTreeSet::from([id]))?;
        debug!(id, "stored new ICSR");
        state.reports.insert(id, icsr.clone());
        Ok(icsr)
    }

    fn update(&self, id: i64, mut icsr: storage::Icsr) -> Result<storage::Icsr, StoreError> {
        let mut state = self.lock()?;
        let issued = match state.reports.get(&id) {
            Some(stored) => issued_ids(stored),
            None => return Err(StoreError::NotFound { id }),
        };
        icsr.id = Some(id);
        let icsr = Self::persist(&mut state, icsr, &issued)?;
        debug!(id, "replaced ICSR");
        state.reports.insert(id, icsr.clone());
        Ok(icsr)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        if self.lock()?.reports.remove(&id).is_none() {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "deleted ICSR");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link_to(target: ReactionRef) -> storage::GK9IDrugReactionMatrix {
        storage::GK9IDrugReactionMatrix {
            id: None,
            g_k_9_i_2_r_assessment_relatedness_drug_reaction: Vec::new(),
            g_k_9_i_1_reaction_assessed: target,
            g_k_9_i_3_1a_interval_drug_administration_reaction_num: None,
            g_k_9_i_3_1b_interval_drug_administration_reaction_unit: None,
            g_k_9_i_3_2a_interval_last_dose_drug_reaction_num: None,
            g_k_9_i_3_2b_interval_last_dose_drug_reaction_unit: None,
            g_k_9_i_4_reaction_recur_readministration: None,
        }
    }

    fn reaction_with_id(id: Option<i64>) -> storage::EIReactionEvent {
        storage::EIReactionEvent {
            id,
            ..Default::default()
        }
    }

    #[test]
    fn only_issued_ids_are_kept() {
        let mut icsr = storage::Icsr {
            id: Some(5),
            e_i_reaction_event: vec![
                reaction_with_id(None),
                reaction_with_id(Some(77)),
                reaction_with_id(Some(6)),
            ],
            ..Default::default()
        };
        let mut next_id = 10;

        assign_ids(&mut icsr, &BTreeSet::from([5, 6]), &mut next_id).unwrap();

        let ids: Vec<_> = icsr.e_i_reaction_event.iter().map(|r| r.id).collect();
        assert_eq!(icsr.id, Some(5));
        assert_eq!(ids, vec![Some(10), Some(11), Some(6)]);
        assert_eq!(next_id, 12);
    }

    #[test]
    fn issued_id_is_kept_by_its_first_claimant_only() {
        let mut icsr = storage::Icsr {
            id: Some(1),
            e_i_reaction_event: vec![reaction_with_id(Some(1))],
            ..Default::default()
        };
        let mut next_id = 2;

        assign_ids(&mut icsr, &BTreeSet::from([1]), &mut next_id).unwrap();

        assert_eq!(icsr.id, Some(1));
        assert_eq!(icsr.e_i_reaction_event[0].id, Some(2));
    }

    #[test]
    fn links_follow_a_replaced_reaction_id() {
        let mut icsr = storage::Icsr {
            e_i_reaction_event: vec![reaction_with_id(Some(2))],
            g_k_drug_information: vec![storage::GKDrugInformation {
                g_k_9_i_drug_reaction_matrix: vec![link_to(ReactionRef::Id(2))],
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut next_id = 40;

        assign_ids(&mut icsr, &BTreeSet::new(), &mut next_id).unwrap();

        let reaction_id = icsr.e_i_reaction_event[0].id.unwrap();
        assert_ne!(reaction_id, 2);
        assert_eq!(
            icsr.g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[0].g_k_9_i_1_reaction_assessed,
            ReactionRef::Id(reaction_id)
        );
    }

    #[test]
    fn new_reactions_sharing_an_id_are_rejected() {
        let mut icsr = storage::Icsr {
            e_i_reaction_event: vec![reaction_with_id(Some(3)), reaction_with_id(Some(3))],
            ..Default::default()
        };
        let mut next_id = 1;

        let error = assign_ids(&mut icsr, &BTreeSet::new(), &mut next_id).unwrap_err();
        assert!(matches!(error, StoreError::AmbiguousReactionId { id: 3 }));
    }

    #[test]
    fn issued_ids_cover_the_whole_tree() {
        let icsr = storage::Icsr {
            id: Some(1),
            e_i_reaction_event: vec![reaction_with_id(Some(2))],
            h_narrative_case_summary: Some(Box::new(storage::HNarrativeCaseSummary {
                id: Some(3),
                ..Default::default()
            })),
            ..Default::default()
        };
        assert_eq!(issued_ids(&icsr), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn token_links_become_id_links() {
        let token = Uuid::new_v4();
        let mut icsr = storage::Icsr {
            e_i_reaction_event: vec![storage::EIReactionEvent {
                id: Some(4),
                uuid: Some(token.to_string()),
                ..Default::default()
            }],
            g_k_drug_information: vec![storage::GKDrugInformation {
                g_k_9_i_drug_reaction_matrix: vec![link_to(ReactionRef::Uuid(token))],
                ..Default::default()
            }],
            ..Default::default()
        };

        resolve_reaction_tokens(&mut icsr).unwrap();

        assert_eq!(
            icsr.g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[0].g_k_9_i_1_reaction_assessed,
            ReactionRef::Id(4)
        );
        assert_eq!(icsr.e_i_reaction_event[0].uuid, None);
    }

    #[test]
    fn unknown_token_is_an_error() {
        let mut icsr = storage::Icsr {
            g_k_drug_information: vec![storage::GKDrugInformation {
                g_k_9_i_drug_reaction_matrix: vec![link_to(ReactionRef::Uuid(Uuid::nil()))],
                ..Default::default()
            }],
            ..Default::default()
        };

        let error = resolve_reaction_tokens(&mut icsr).unwrap_err();
        assert!(matches!(error, StoreError::UnresolvedToken { drug: 0, link: 0, .. }));
    }

    #[test]
    fn update_of_a_missing_report_fails() {
        let store = InMemoryStore::new();
        let error = store.update(9, storage::Icsr::default()).unwrap_err();
        assert!(matches!(error, StoreError::NotFound { id: 9 }));
        assert_eq!(error.user_message(), "No case safety report with id 9 was found.");
    }
}
