//! Tests for the document tree model and its generated field tables.

use icsr_model::api::{self, NullableValue, Value};
use icsr_model::domain;
use icsr_model::storage;
use icsr_model::{
    BuildError, Entity, EntityType, FieldMap, FieldRef, FieldValue, IssueReport, NullFlavor,
    ReactionRef, Scalar, ScalarError, read_document,
};
use uuid::Uuid;

// --- descriptor tables ---

#[test]
fn every_layer_reaches_the_same_entity_names() {
    let names = |root: &'static icsr_model::EntityDescriptor| {
        let mut names: Vec<_> = root.reachable().iter().map(|d| d.name).collect();
        names.sort_unstable();
        names
    };
    let api_names = names(api::Icsr::schema());
    let domain_names = names(domain::Icsr::schema());
    let storage_names = names(storage::Icsr::schema());

    assert_eq!(api_names.len(), 29);
    assert_eq!(api_names, domain_names);
    assert_eq!(domain_names, storage_names);
}

#[test]
fn fields_are_listed_in_declaration_order_after_id() {
    let schema = domain::GK9IDrugReactionMatrix::schema();
    let names: Vec<_> = schema.fields.iter().take(3).map(|field| field.name).collect();
    assert_eq!(
        names,
        vec![
            "id",
            "g_k_9_i_2_r_assessment_relatedness_drug_reaction",
            "g_k_9_i_1_reaction_assessed",
        ]
    );
    assert!(schema.field("g_k_9_i_1_reaction_assessed").unwrap().required);
    assert!(!api::GK9IDrugReactionMatrix::schema()
        .field("g_k_9_i_1_reaction_assessed")
        .unwrap()
        .required);
}

#[test]
fn field_keys_name_declared_fields() {
    let key = domain::g_k_drug_information::g_k_9_i_drug_reaction_matrix;
    assert_eq!(key.name(), "g_k_9_i_drug_reaction_matrix");
    assert!(domain::GKDrugInformation::schema().field(key.name()).is_some());
    assert_eq!(domain::e_i_reaction_event::uuid.name(), "uuid");
}

#[test]
fn descriptor_reports_layer_qualified_names() {
    assert_eq!(storage::Icsr::schema().qualified_name(), "storage::Icsr");
    assert_eq!(api::EIReactionEvent::schema().name, "e_i_reaction_event");
}

// --- accessors ---

#[test]
fn field_accessor_reads_scalars_and_children() {
    let token = Uuid::new_v4();
    let icsr = domain::Icsr {
        e_i_reaction_event: vec![domain::EIReactionEvent {
            id: Some(4),
            uuid: Some(token),
            ..Default::default()
        }],
        ..Default::default()
    };

    let reactions = icsr.field("e_i_reaction_event").unwrap();
    let reaction = reactions.as_children()[0];
    assert_eq!(reaction.id(), Some(4));
    assert_eq!(
        reaction.field("uuid").unwrap().as_scalar(),
        Some(&Scalar::Uuid(token))
    );
    assert!(icsr.field("no_such_field").is_none());
    assert!(matches!(
        icsr.field("h_narrative_case_summary"),
        Some(FieldRef::Child(None))
    ));
}

#[test]
fn fields_start_with_the_surrogate_id() {
    let drug = domain::GKDrugInformation {
        id: Some(9),
        ..Default::default()
    };
    let fields = drug.fields();
    assert_eq!(fields[0].0, "id");
    assert_eq!(fields[0].1.as_scalar(), Some(&Scalar::Integer(9)));
    assert_eq!(fields.len(), drug.descriptor().fields.len());
}

#[test]
fn children_mut_reaches_nested_nodes() {
    let mut icsr = storage::Icsr {
        g_k_drug_information: vec![storage::GKDrugInformation::default()],
        h_narrative_case_summary: Some(Box::default()),
        ..Default::default()
    };
    let mut count = 0;
    (&mut icsr as &mut dyn Entity).visit_mut(&mut |node| {
        count += 1;
        node.set_id(Some(count));
    });
    assert_eq!(count, 3);
    assert_eq!(icsr.id, Some(1));
    assert_eq!(icsr.h_narrative_case_summary.unwrap().id, Some(3));
}

// --- construction ---

#[test]
fn required_cross_reference_must_be_present() {
    let error = domain::GK9IDrugReactionMatrix::from_fields(FieldMap::new()).unwrap_err();
    assert_eq!(
        error,
        BuildError::MissingRequired {
            field: "g_k_9_i_1_reaction_assessed"
        }
    );
}

#[test]
fn undeclared_fields_are_rejected() {
    let mut fields = FieldMap::new();
    fields.insert("not_a_field", FieldValue::Scalar(None));
    let error = domain::H3RSenderDiagnosisMeddraCode::from_fields(fields).unwrap_err();
    assert_eq!(error.field(), "not_a_field");
}

#[test]
fn null_flavor_is_rejected_by_a_plain_target_field() {
    let mut fields = FieldMap::new();
    fields.insert(
        "h_1_case_narrative",
        FieldValue::Scalar(Some(Scalar::NullFlavor(NullFlavor::Unk))),
    );
    let error = domain::HNarrativeCaseSummary::from_fields(fields).unwrap_err();
    assert!(matches!(
        error,
        BuildError::Scalar {
            field: "h_1_case_narrative",
            ..
        }
    ));
}

#[test]
fn child_of_the_wrong_type_is_rejected() {
    let mut fields = FieldMap::new();
    fields.insert(
        "g_k_drug_information",
        FieldValue::Children(vec![Box::new(api::GKDrugInformation::default())]),
    );
    let error = domain::Icsr::from_fields(fields).unwrap_err();
    assert!(matches!(error, BuildError::UnexpectedEntity { .. }));
}

#[test]
fn built_entity_keeps_values() {
    let mut fields = FieldMap::new();
    fields.insert("id", FieldValue::Scalar(Some(Scalar::Integer(2))));
    fields.insert(
        "g_k_9_i_1_reaction_assessed",
        FieldValue::Scalar(Some(Scalar::Integer(7))),
    );
    let link = domain::GK9IDrugReactionMatrix::from_fields(fields).unwrap();
    assert_eq!(link.id, Some(2));
    assert_eq!(link.g_k_9_i_1_reaction_assessed, ReactionRef::Id(7));
    assert!(link.g_k_9_i_2_r_assessment_relatedness_drug_reaction.is_empty());
}

// --- api wire form ---

#[test]
fn api_rejects_value_and_null_flavor_together() {
    let json = r#"{
        "c_2_r_primary_source_information": [
            {"c_2_r_1_1_reporter_title": {"value": "Dr", "null_flavor": "MSK"}}
        ]
    }"#;
    let error = api::Icsr::from_json(json).unwrap_err();
    assert!(
        error
            .message
            .contains("Null flavor should not be present if value is present"),
        "{}",
        error.message
    );
    assert_eq!(
        error.path.to_string(),
        "c_2_r_primary_source_information[0].c_2_r_1_1_reporter_title"
    );
}

#[test]
fn reading_continues_past_a_malformed_attribute() {
    let json = r#"{
        "c_1_identification_case_safety_report": {
            "c_1_1_sender_safety_report_unique_id": {"value": "US-ACME-0002"},
            "c_1_3_type_report": {"value": "spontaneous"},
            "c_1_7_fulfil_local_criteria_expedited_report": {"value": true, "null_flavor": "NI"}
        },
        "e_i_reaction_event": [{}, {"e_i_5_date_end_reaction": {"value": 20240101}}]
    }"#;

    let document = read_document(json).unwrap();

    let paths: Vec<_> = document.faults.iter().map(|f| f.path.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "c_1_identification_case_safety_report.c_1_3_type_report",
            "c_1_identification_case_safety_report.c_1_7_fulfil_local_criteria_expedited_report",
            "e_i_reaction_event[1].e_i_5_date_end_reaction",
        ]
    );
    let c1 = document.icsr.c_1_identification_case_safety_report.as_ref().unwrap();
    assert_eq!(
        c1.c_1_1_sender_safety_report_unique_id,
        Value::new("US-ACME-0002".to_string())
    );
    assert_eq!(c1.c_1_3_type_report, Value::default());
    assert_eq!(document.icsr.e_i_reaction_event.len(), 2);
}

#[test]
fn null_flavor_outside_the_attribute_set_is_a_fault() {
    let json = r#"{
        "e_i_reaction_event": [{
            "e_i_3_2a_results_death": {"null_flavor": "PINF"},
            "e_i_4_date_start_reaction": {"null_flavor": "ASKU"}
        }],
        "g_k_drug_information": [{"g_k_1_characterisation_drug_role": {"null_flavor": "UNK"}}]
    }"#;

    let document = read_document(json).unwrap();

    assert_eq!(document.faults.len(), 2);
    assert_eq!(
        document.faults[0].path.to_string(),
        "e_i_reaction_event[0].e_i_3_2a_results_death"
    );
    assert_eq!(document.faults[0].message, "null flavor PINF is not accepted");
    assert_eq!(
        document.faults[1].path.to_string(),
        "g_k_drug_information[0].g_k_1_characterisation_drug_role"
    );
    let reaction = &document.icsr.e_i_reaction_event[0];
    assert_eq!(reaction.e_i_3_2a_results_death, NullableValue::default());
    assert_eq!(
        reaction.e_i_4_date_start_reaction,
        NullableValue::null_flavor(NullFlavor::Asku)
    );
}

#[test]
fn descriptors_list_accepted_null_flavors() {
    let death = domain::EIReactionEvent::schema()
        .field("e_i_3_2a_results_death")
        .unwrap();
    assert!(death.accepts(NullFlavor::Ni));
    assert!(!death.accepts(NullFlavor::Unk));

    let qualifier = storage::FRResultsTestsProceduresInvestigationPatient::schema()
        .field("f_r_3_2_test_result_val_qual")
        .unwrap();
    assert_eq!(
        qualifier.null_flavors,
        Some(&[NullFlavor::Ninf, NullFlavor::Pinf][..])
    );

    let name = api::GKDrugInformation::schema()
        .field("g_k_2_2_medicinal_product_name_primary_source")
        .unwrap();
    assert_eq!(name.null_flavors, None);
}

#[test]
fn construction_rejects_a_null_flavor_outside_the_attribute_set() {
    let mut fields = FieldMap::new();
    fields.insert(
        "e_i_4_date_start_reaction",
        FieldValue::Scalar(Some(Scalar::NullFlavor(NullFlavor::Unk))),
    );
    let error = storage::EIReactionEvent::from_fields(fields).unwrap_err();
    assert_eq!(
        error,
        BuildError::Scalar {
            field: "e_i_4_date_start_reaction",
            source: ScalarError::NullFlavorNotAccepted(NullFlavor::Unk),
        }
    );
}

#[test]
fn empty_report_is_valid() {
    let report = IssueReport::default();
    assert!(report.is_valid);
    assert_eq!(report.issue_count(), 0);
}

#[test]
fn api_reads_wrapped_values() {
    let json = r#"{
        "c_1_identification_case_safety_report": {
            "c_1_1_sender_safety_report_unique_id": {"value": "US-ACME-0001"},
            "c_1_7_fulfil_local_criteria_expedited_report": {"null_flavor": "NI"}
        },
        "g_k_drug_information": [
            {"g_k_9_i_drug_reaction_matrix": [{"g_k_9_i_1_reaction_assessed": {"value": 3}}]}
        ]
    }"#;
    let icsr = api::Icsr::from_json(json).unwrap();
    let c1 = icsr.c_1_identification_case_safety_report.unwrap();
    assert_eq!(
        c1.c_1_1_sender_safety_report_unique_id,
        Value::new("US-ACME-0001".to_string())
    );
    assert_eq!(
        c1.c_1_7_fulfil_local_criteria_expedited_report,
        NullableValue::null_flavor(NullFlavor::Ni)
    );
    assert_eq!(
        icsr.g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[0].g_k_9_i_1_reaction_assessed,
        Value::new(ReactionRef::Id(3))
    );
}

#[test]
fn nullable_value_constructor_enforces_exclusivity() {
    assert!(NullableValue::new(Some(1_i64), Some(NullFlavor::Unk)).is_err());
    assert!(NullableValue::new(Some(1_i64), None).is_ok());
    assert!(NullableValue::<i64>::new(None, Some(NullFlavor::Unk)).is_ok());
}
