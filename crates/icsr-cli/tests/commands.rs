//! Integration tests for the CLI commands over document files.

use std::fs;
use std::path::PathBuf;

use icsr_cli::commands::{
    CONSTRUCTION_CODE, ConvertTarget, LayerArg, run_convert, run_validate, schema_rows,
};
use icsr_cli::summary::issue_table;
use tempfile::TempDir;

const VALID: &str = r#"{
    "c_1_identification_case_safety_report": {
        "c_1_1_sender_safety_report_unique_id": {"value": "US-ACME-0001"}
    },
    "e_i_reaction_event": [
        {"uuid": {"value": "7f1f3c1e-1d43-4a4b-9a4e-0f2f6a1c2b3d"}}
    ],
    "g_k_drug_information": [
        {
            "g_k_2_2_medicinal_product_name_primary_source": {"value": "Examplomab"},
            "g_k_9_i_drug_reaction_matrix": [
                {"g_k_9_i_1_reaction_assessed": {"value": "7f1f3c1e-1d43-4a4b-9a4e-0f2f6a1c2b3d"}}
            ]
        }
    ]
}"#;

fn write_document(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// --- validate ---

#[test]
fn valid_document_passes() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "valid.json", VALID);

    let result = run_validate(&path).unwrap();

    assert!(result.report.is_valid);
    assert_eq!(result.file, path);
}

#[test]
fn business_rule_violations_are_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        "orphan.json",
        r#"{
            "e_i_reaction_event": [{"id": 1}],
            "g_k_drug_information": [
                {"g_k_9_i_drug_reaction_matrix": [
                    {"g_k_9_i_1_reaction_assessed": {"value": 2}},
                    {"g_k_9_i_1_reaction_assessed": {"value": 2}}
                ]}
            ]
        }"#,
    );

    let result = run_validate(&path).unwrap();

    assert!(!result.report.is_valid);
    assert_eq!(
        result.report.codes(),
        vec!["duplicate_relation", "unresolved_reference", "unresolved_reference"]
    );
    let rendered = issue_table(&result.report.issues).to_string();
    assert!(rendered.contains("unresolved_reference"));
}

#[test]
fn malformed_document_is_a_structure_issue() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        "conflict.json",
        r#"{"c_2_r_primary_source_information": [
            {"c_2_r_1_1_reporter_title": {"value": "Dr", "null_flavor": "MSK"}}
        ]}"#,
    );

    let result = run_validate(&path).unwrap();

    assert!(!result.report.is_valid);
    assert_eq!(result.report.codes(), vec!["structure"]);
    assert!(
        result.report.issues[0]
            .message
            .contains("Null flavor should not be present if value is present")
    );
    assert_eq!(
        result.report.issues[0].path.to_string(),
        "c_2_r_primary_source_information[0].c_2_r_1_1_reporter_title"
    );
}

#[test]
fn every_malformed_attribute_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        "two_faults.json",
        r#"{
            "c_1_identification_case_safety_report": {
                "c_1_3_type_report": {"value": "spontaneous"},
                "c_1_7_fulfil_local_criteria_expedited_report": {"value": true, "null_flavor": "NI"}
            },
            "e_i_reaction_event": [{"e_i_3_2a_results_death": {"null_flavor": "PINF"}}]
        }"#,
    );

    let result = run_validate(&path).unwrap();

    let paths: Vec<_> = result
        .report
        .issues
        .iter()
        .map(|issue| issue.path.to_string())
        .collect();
    assert_eq!(
        paths,
        vec![
            "e_i_reaction_event[0].e_i_3_2a_results_death",
            "c_1_identification_case_safety_report.c_1_3_type_report",
            "c_1_identification_case_safety_report.c_1_7_fulfil_local_criteria_expedited_report",
        ]
    );
    assert_eq!(result.report.codes(), vec!["structure"; 3]);
    assert_eq!(
        result.report.issues[0].message,
        "null flavor PINF is not accepted"
    );
}

#[test]
fn link_without_target_is_a_construction_issue() {
    let dir = TempDir::new().unwrap();
    let path = write_document(
        &dir,
        "untargeted.json",
        r#"{"g_k_drug_information": [{"g_k_9_i_drug_reaction_matrix": [{}]}]}"#,
    );

    let result = run_validate(&path).unwrap();

    assert_eq!(result.report.codes(), vec![CONSTRUCTION_CODE]);
    assert_eq!(
        result.report.issues[0].path.to_string(),
        "g_k_drug_information[0].g_k_9_i_drug_reaction_matrix[0].g_k_9_i_1_reaction_assessed"
    );
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let error = run_validate(&dir.path().join("absent.json")).unwrap_err();
    assert!(error.to_string().starts_with("read "));
}

// --- convert ---

#[test]
fn convert_to_storage_keeps_tokens_as_text() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "valid.json", VALID);

    let rendered = run_convert(&path, ConvertTarget::Storage).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(
        json["e_i_reaction_event"][0]["uuid"],
        "7f1f3c1e-1d43-4a4b-9a4e-0f2f6a1c2b3d"
    );
    assert_eq!(
        json["c_1_identification_case_safety_report"]["c_1_1_sender_safety_report_unique_id"],
        "US-ACME-0001"
    );
}

#[test]
fn convert_to_domain_unwraps_values() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, "valid.json", VALID);

    let rendered = run_convert(&path, ConvertTarget::Domain).unwrap();
    let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(
        json["g_k_drug_information"][0]["g_k_2_2_medicinal_product_name_primary_source"],
        "Examplomab"
    );
}

// --- schema ---

#[test]
fn schema_lists_every_entity_of_a_layer() {
    let rows = schema_rows(Some(LayerArg::Domain));
    assert_eq!(rows.len(), 29);
    assert_eq!(rows[0].entity, "icsr");
    assert!(rows.iter().all(|row| row.layer == "domain"));

    let matrix = rows
        .iter()
        .find(|row| row.entity == "g_k_9_i_drug_reaction_matrix")
        .unwrap();
    assert_eq!(
        matrix.nested,
        vec!["g_k_9_i_2_r_assessment_relatedness_drug_reaction (children)"]
    );
}

#[test]
fn schema_without_layer_lists_all_layers() {
    assert_eq!(schema_rows(None).len(), 3 * 29);
}
