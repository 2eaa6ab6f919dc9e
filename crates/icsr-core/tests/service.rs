//! Tests for the ICSR service pipeline over the in-memory store.

use icsr_core::{IcsrService, InMemoryStore, ServiceError, StoreError};
use icsr_map::ConversionError;
use icsr_model::api::{self, Value};
use icsr_model::ReactionRef;
use uuid::Uuid;

fn service() -> IcsrService<InMemoryStore> {
    IcsrService::new(InMemoryStore::new())
}

fn reaction(id: Option<i64>, token: Option<Uuid>) -> api::EIReactionEvent {
    api::EIReactionEvent {
        id,
        uuid: Value { value: token },
        e_i_1_2_reaction_primary_source_translation: Value::new("headache".to_string()),
        ..Default::default()
    }
}

fn drug_linking(targets: &[ReactionRef]) -> api::GKDrugInformation {
    api::GKDrugInformation {
        g_k_2_2_medicinal_product_name_primary_source: Value::new("Examplomab".to_string()),
        g_k_9_i_drug_reaction_matrix: targets
            .iter()
            .map(|&target| api::GK9IDrugReactionMatrix {
                g_k_9_i_1_reaction_assessed: Value::new(target),
                ..Default::default()
            })
            .collect(),
        ..Default::default()
    }
}

fn report(
    reactions: Vec<api::EIReactionEvent>,
    drugs: Vec<api::GKDrugInformation>,
) -> api::Icsr {
    api::Icsr {
        e_i_reaction_event: reactions,
        g_k_drug_information: drugs,
        ..Default::default()
    }
}

fn assessed(icsr: &api::Icsr) -> Value<ReactionRef> {
    icsr.g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[0]
        .g_k_9_i_1_reaction_assessed
        .clone()
}

// --- business validation ---

#[test]
fn business_validate_returns_the_model_and_its_issues() {
    let icsr = report(
        vec![reaction(None, None)],
        vec![drug_linking(&[ReactionRef::Id(3)])],
    );

    let outcome = service().business_validate(&icsr).unwrap();

    assert!(!outcome.is_valid());
    assert_eq!(outcome.report.codes(), vec!["unresolved_reference"]);
    assert_eq!(outcome.model, icsr);
}

#[test]
fn missing_cross_reference_is_a_conversion_error() {
    let mut icsr = report(Vec::new(), vec![drug_linking(&[ReactionRef::Id(1)])]);
    icsr.g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[0].g_k_9_i_1_reaction_assessed =
        Value::default();

    let error = service().business_validate(&icsr).unwrap_err();

    assert!(matches!(
        error,
        ServiceError::Conversion(ConversionError::Build { .. })
    ));
}

// --- create ---

#[test]
fn valid_report_is_persisted_with_ids() {
    let token = Uuid::new_v4();
    let service = service();
    let icsr = report(
        vec![reaction(None, Some(token))],
        vec![drug_linking(&[ReactionRef::Uuid(token)])],
    );

    let outcome = service.create(&icsr).unwrap();

    assert!(outcome.is_valid());
    let created = outcome.model;
    let root_id = created.id.unwrap();
    let reaction_id = created.e_i_reaction_event[0].id.unwrap();
    assert_eq!(assessed(&created), Value::new(ReactionRef::Id(reaction_id)));
    assert_eq!(created.e_i_reaction_event[0].uuid, Value::default());
    assert!(created.g_k_drug_information[0].id.is_some());

    assert_eq!(service.read(root_id).unwrap(), created);
    assert_eq!(service.list().unwrap().len(), 1);
}

#[test]
fn invalid_report_is_not_persisted() {
    let service = service();
    let icsr = report(
        vec![reaction(Some(1), Some(Uuid::new_v4()))],
        Vec::new(),
    );

    let outcome = service.create(&icsr).unwrap();

    assert!(!outcome.is_valid());
    assert_eq!(outcome.report.codes(), vec!["conflicting_identifiers"]);
    assert!(service.store().is_empty());
}

#[test]
fn submitted_ids_never_collide_with_issued_ones() {
    let service = service();
    let icsr = report(
        vec![reaction(None, None), reaction(Some(2), None)],
        vec![drug_linking(&[ReactionRef::Id(2)])],
    );

    let outcome = service.create(&icsr).unwrap();

    assert!(outcome.is_valid());
    let created = outcome.model;
    let first = created.e_i_reaction_event[0].id.unwrap();
    let second = created.e_i_reaction_event[1].id.unwrap();
    assert_ne!(first, second);
    assert_eq!(assessed(&created), Value::new(ReactionRef::Id(second)));
}

#[test]
fn ids_are_unique_across_reports() {
    let service = service();
    let first = service
        .create(&report(vec![reaction(None, None)], Vec::new()))
        .unwrap()
        .model;
    let taken = first.e_i_reaction_event[0].id.unwrap();

    let second = service
        .create(&report(vec![reaction(Some(taken), None)], Vec::new()))
        .unwrap()
        .model;
    assert_ne!(second.e_i_reaction_event[0].id, Some(taken));

    let mut changed = service.read(second.id.unwrap()).unwrap();
    changed.e_i_reaction_event.push(reaction(first.id, None));
    let updated = service
        .update(second.id.unwrap(), &changed)
        .unwrap()
        .model;
    assert_eq!(updated.e_i_reaction_event[0].id, second.e_i_reaction_event[0].id);
    assert_ne!(updated.e_i_reaction_event[1].id, first.id);
    assert_eq!(service.read(first.id.unwrap()).unwrap(), first);
}

// --- update / delete ---

#[test]
fn read_back_report_can_be_updated() {
    let service = service();
    let token = Uuid::new_v4();
    let created = service
        .create(&report(
            vec![reaction(None, Some(token))],
            vec![drug_linking(&[ReactionRef::Uuid(token)])],
        ))
        .unwrap()
        .model;
    let id = created.id.unwrap();

    let mut changed = service.read(id).unwrap();
    changed.e_i_reaction_event.push(reaction(None, None));
    let outcome = service.update(id, &changed).unwrap();

    assert!(outcome.is_valid());
    let updated = service.read(id).unwrap();
    assert_eq!(updated.e_i_reaction_event.len(), 2);
    assert_eq!(updated.e_i_reaction_event[0].id, created.e_i_reaction_event[0].id);
    assert!(updated.e_i_reaction_event[1].id.is_some());
}

#[test]
fn invalid_update_keeps_the_stored_report() {
    let service = service();
    let created = service
        .create(&report(vec![reaction(None, None)], Vec::new()))
        .unwrap()
        .model;
    let id = created.id.unwrap();

    let broken = report(Vec::new(), vec![drug_linking(&[ReactionRef::Id(404)])]);
    let outcome = service.update(id, &broken).unwrap();

    assert!(!outcome.is_valid());
    assert_eq!(service.read(id).unwrap(), created);
}

#[test]
fn deleted_report_is_gone() {
    let service = service();
    let id = service
        .create(&report(Vec::new(), Vec::new()))
        .unwrap()
        .model
        .id
        .unwrap();

    service.delete(id).unwrap();

    assert!(matches!(
        service.read(id).unwrap_err(),
        ServiceError::Store(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        service.delete(id).unwrap_err(),
        ServiceError::Store(StoreError::NotFound { .. })
    ));
}

#[test]
fn outcome_serializes_model_with_verdict() {
    let outcome = service()
        .business_validate(&report(Vec::new(), Vec::new()))
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["is_valid"], serde_json::json!(true));
    assert_eq!(json["issues"], serde_json::json!([]));
    assert!(json["model"].is_object());
}
