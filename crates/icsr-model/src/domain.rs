//! Internal domain layer, the form business rules run against.
//!
//! Null-flavored attributes are [`Nullable`]; a drug-reaction link must name
//! the reaction it assesses.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity;
use crate::entity::Layer;
use crate::scalar::{Decimal, Nullable, ReactionRef};

pub struct DomainLayer;

impl Layer for DomainLayer {
    const NAME: &'static str = "domain";

    type Root = Icsr;
}

entity! {
    /// Root of an Individual Case Safety Report.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Icsr in DomainLayer => icsr {
        child c_1_identification_case_safety_report: Option<Box<C1IdentificationCaseSafetyReport>>,
        children c_2_r_primary_source_information: Vec<C2RPrimarySourceInformation>,
        child c_3_information_sender_case_safety_report: Option<Box<C3InformationSenderCaseSafetyReport>>,
        children c_4_r_literature_reference: Vec<C4RLiteratureReference>,
        child c_5_study_identification: Option<Box<C5StudyIdentification>>,
        child d_patient_characteristics: Option<Box<DPatientCharacteristics>>,
        children e_i_reaction_event: Vec<EIReactionEvent>,
        children f_r_results_tests_procedures_investigation_patient: Vec<FRResultsTestsProceduresInvestigationPatient>,
        children g_k_drug_information: Vec<GKDrugInformation>,
        child h_narrative_case_summary: Option<Box<HNarrativeCaseSummary>>,
    }
}

entity! {
    /// C.1 Identification of the case safety report.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C1IdentificationCaseSafetyReport in DomainLayer => c_1_identification_case_safety_report {
        children c_1_6_1_r_documents_held_sender: Vec<C161RDocumentsHeldSender>,
        children c_1_9_1_r_source_case_id: Vec<C191RSourceCaseId>,
        children c_1_10_r_identification_number_report_linked: Vec<C110RIdentificationNumberReportLinked>,
        scalar c_1_1_sender_safety_report_unique_id: Option<String>,
        scalar c_1_2_date_creation: Option<String>,
        scalar c_1_3_type_report: Option<i64>,
        scalar c_1_4_date_report_first_received_source: Option<String>,
        scalar c_1_5_date_most_recent_information: Option<String>,
        scalar c_1_6_1_additional_documents_available: Option<bool>,
        scalar c_1_7_fulfil_local_criteria_expedited_report: Option<Nullable<bool>> [Ni],
        scalar c_1_8_1_worldwide_unique_case_identification_number: Option<String>,
        scalar c_1_8_2_first_sender: Option<i64>,
        scalar c_1_9_1_other_case_ids_previous_transmissions: Option<Nullable<bool>> [Ni],
        scalar c_1_11_1_report_nullification_amendment: Option<i64>,
        scalar c_1_11_2_reason_nullification_amendment: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C161RDocumentsHeldSender in DomainLayer => c_1_6_1_r_documents_held_sender {
        scalar c_1_6_1_r_1_documents_held_sender: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C191RSourceCaseId in DomainLayer => c_1_9_1_r_source_case_id {
        scalar c_1_9_1_r_1_source_case_id: Option<String>,
        scalar c_1_9_1_r_2_case_id: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C110RIdentificationNumberReportLinked in DomainLayer => c_1_10_r_identification_number_report_linked {
        scalar c_1_10_r_identification_number_report_linked: Option<String>,
    }
}

entity! {
    /// C.2.r Primary source(s) of information.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C2RPrimarySourceInformation in DomainLayer => c_2_r_primary_source_information {
        scalar c_2_r_1_1_reporter_title: Option<Nullable<String>> [Msk, Asku, Nask, Unk],
        scalar c_2_r_1_2_reporter_given_name: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar c_2_r_1_3_reporter_middle_name: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar c_2_r_1_4_reporter_family_name: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar c_2_r_2_1_reporter_organisation: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar c_2_r_2_4_reporter_city: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar c_2_r_2_7_reporter_telephone: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar c_2_r_3_reporter_country_code: Option<String>,
        scalar c_2_r_4_qualification: Option<Nullable<i64>> [Unk],
        scalar c_2_r_5_primary_source_regulatory_purposes: Option<i64>,
    }
}

entity! {
    /// C.3 Information concerning the sender of the case safety report.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C3InformationSenderCaseSafetyReport in DomainLayer => c_3_information_sender_case_safety_report {
        scalar c_3_1_sender_type: Option<i64>,
        scalar c_3_2_sender_organisation: Option<String>,
        scalar c_3_3_1_sender_department: Option<String>,
        scalar c_3_3_3_sender_given_name: Option<String>,
        scalar c_3_3_5_sender_family_name: Option<String>,
        scalar c_3_4_2_sender_city: Option<String>,
        scalar c_3_4_5_sender_country_code: Option<String>,
        scalar c_3_4_8_sender_email: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C4RLiteratureReference in DomainLayer => c_4_r_literature_reference {
        scalar c_4_r_1_literature_reference: Option<Nullable<String>> [Asku, Nask],
    }
}

entity! {
    /// C.5 Study identification.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C5StudyIdentification in DomainLayer => c_5_study_identification {
        children c_5_1_r_study_registration: Vec<C51RStudyRegistration>,
        scalar c_5_2_study_name: Option<Nullable<String>> [Asku, Nask],
        scalar c_5_3_sponsor_study_number: Option<Nullable<String>> [Asku, Nask],
        scalar c_5_4_study_type_reaction: Option<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C51RStudyRegistration in DomainLayer => c_5_1_r_study_registration {
        scalar c_5_1_r_1_study_registration_number: Option<Nullable<String>> [Asku, Nask],
        scalar c_5_1_r_2_study_registration_country: Option<Nullable<String>> [Asku, Nask],
    }
}

entity! {
    /// D Patient characteristics.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DPatientCharacteristics in DomainLayer => d_patient_characteristics {
        children d_7_1_r_structured_information_medical_history: Vec<D71RStructuredInformationMedicalHistory>,
        children d_8_r_past_drug_history: Vec<D8RPastDrugHistory>,
        children d_9_2_r_cause_death: Vec<D92RCauseDeath>,
        children d_9_4_r_autopsy_determined_cause_death: Vec<D94RAutopsyDeterminedCauseDeath>,
        children d_10_7_1_r_structured_information_parent_meddra_code: Vec<D1071RStructuredInformationParentMeddraCode>,
        children d_10_8_r_past_drug_history_parent: Vec<D108RPastDrugHistoryParent>,
        scalar d_1_patient: Option<Nullable<String>> [Msk, Asku, Nask, Unk],
        scalar d_1_1_1_medical_record_number_source_gp: Option<Nullable<String>> [Msk],
        scalar d_2_1_date_birth: Option<Nullable<String>> [Msk],
        scalar d_2_2a_age_onset_reaction_num: Option<i64>,
        scalar d_2_2b_age_onset_reaction_unit: Option<String>,
        scalar d_2_3_patient_age_group: Option<i64>,
        scalar d_3_body_weight: Option<Decimal>,
        scalar d_4_height: Option<i64>,
        scalar d_5_sex: Option<Nullable<i64>> [Msk, Unk, Asku, Nask],
        scalar d_6_last_menstrual_period_date: Option<String>,
        scalar d_7_2_text_medical_history: Option<Nullable<String>> [Msk, Asku, Nask, Unk],
        scalar d_7_3_concomitant_therapies: Option<bool>,
        scalar d_9_1_date_death: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_9_3_autopsy: Option<Nullable<bool>> [Asku, Nask, Unk],
        scalar d_10_1_parent_identification: Option<Nullable<String>> [Msk, Asku, Nask, Unk],
        scalar d_10_4_body_weight_parent: Option<Decimal>,
        scalar d_10_6_sex_parent: Option<Nullable<i64>> [Unk, Msk, Asku, Nask],
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D71RStructuredInformationMedicalHistory in DomainLayer => d_7_1_r_structured_information_medical_history {
        scalar d_7_1_r_1a_meddra_version_medical_history: Option<String>,
        scalar d_7_1_r_1b_medical_history_meddra_code: Option<i64>,
        scalar d_7_1_r_2_start_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_7_1_r_3_continuing: Option<Nullable<bool>> [Msk, Asku, Nask, Unk],
        scalar d_7_1_r_4_end_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_7_1_r_5_comments: Option<String>,
        scalar d_7_1_r_6_family_history: Option<bool>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D8RPastDrugHistory in DomainLayer => d_8_r_past_drug_history {
        scalar d_8_r_1_name_drug: Option<Nullable<String>> [Unk, Na],
        scalar d_8_r_4_start_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_8_r_5_end_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_8_r_6a_meddra_version_indication: Option<String>,
        scalar d_8_r_6b_indication_meddra_code: Option<i64>,
        scalar d_8_r_7a_meddra_version_reaction: Option<String>,
        scalar d_8_r_7b_reaction_meddra_code: Option<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D92RCauseDeath in DomainLayer => d_9_2_r_cause_death {
        scalar d_9_2_r_1a_meddra_version_cause_death: Option<String>,
        scalar d_9_2_r_1b_cause_death_meddra_code: Option<i64>,
        scalar d_9_2_r_2_cause_death: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D94RAutopsyDeterminedCauseDeath in DomainLayer => d_9_4_r_autopsy_determined_cause_death {
        scalar d_9_4_r_1a_meddra_version_autopsy_determined_cause_death: Option<String>,
        scalar d_9_4_r_1b_autopsy_determined_cause_death_meddra_code: Option<i64>,
        scalar d_9_4_r_2_autopsy_determined_cause_death: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D1071RStructuredInformationParentMeddraCode in DomainLayer => d_10_7_1_r_structured_information_parent_meddra_code {
        scalar d_10_7_1_r_1a_meddra_version_medical_history: Option<String>,
        scalar d_10_7_1_r_1b_medical_history_meddra_code: Option<i64>,
        scalar d_10_7_1_r_2_start_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_10_7_1_r_3_continuing: Option<Nullable<bool>> [Msk, Asku, Nask, Unk],
        scalar d_10_7_1_r_4_end_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_10_7_1_r_5_comments: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D108RPastDrugHistoryParent in DomainLayer => d_10_8_r_past_drug_history_parent {
        scalar d_10_8_r_1_name_drug: Option<String>,
        scalar d_10_8_r_4_start_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_10_8_r_5_end_date: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar d_10_8_r_6b_indication_meddra_code: Option<i64>,
        scalar d_10_8_r_7b_reactions_meddra_code: Option<i64>,
    }
}

entity! {
    /// E.i Reaction(s)/event(s).
    ///
    /// `uuid` is the correlation token drug-reaction links may point at before
    /// the reaction has a surrogate id.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct EIReactionEvent in DomainLayer => e_i_reaction_event {
        scalar uuid: Option<Uuid>,
        scalar e_i_1_1a_reaction_primary_source_native_language: Option<String>,
        scalar e_i_1_1b_reaction_primary_source_language: Option<String>,
        scalar e_i_1_2_reaction_primary_source_translation: Option<String>,
        scalar e_i_2_1a_meddra_version_reaction: Option<String>,
        scalar e_i_2_1b_reaction_meddra_code: Option<i64>,
        scalar e_i_3_1_term_highlighted_reporter: Option<i64>,
        scalar e_i_3_2a_results_death: Option<Nullable<bool>> [Ni],
        scalar e_i_3_2b_life_threatening: Option<Nullable<bool>> [Ni],
        scalar e_i_3_2c_caused_prolonged_hospitalisation: Option<Nullable<bool>> [Ni],
        scalar e_i_4_date_start_reaction: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar e_i_5_date_end_reaction: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar e_i_6a_duration_reaction_num: Option<i64>,
        scalar e_i_6b_duration_reaction_unit: Option<String>,
        scalar e_i_7_outcome_reaction_last_observation: Option<i64>,
        scalar e_i_8_medical_confirmation_healthcare_professional: Option<bool>,
        scalar e_i_9_identification_country_reaction: Option<String>,
    }
}

entity! {
    /// F.r Results of tests and procedures relevant to the investigation of the patient.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FRResultsTestsProceduresInvestigationPatient in DomainLayer => f_r_results_tests_procedures_investigation_patient {
        scalar f_r_1_test_date: Option<Nullable<String>> [Unk],
        scalar f_r_2_1_test_name: Option<String>,
        scalar f_r_2_2a_meddra_version_test_name: Option<String>,
        scalar f_r_2_2b_test_name_meddra_code: Option<i64>,
        scalar f_r_3_1_test_result_code: Option<i64>,
        scalar f_r_3_2_test_result_val_qual: Option<Nullable<Decimal>> [Ninf, Pinf],
        scalar f_r_3_3_test_result_unit: Option<String>,
        scalar f_r_3_4_result_unstructured_data: Option<String>,
        scalar f_r_4_normal_low_value: Option<String>,
        scalar f_r_5_normal_high_value: Option<String>,
        scalar f_r_6_comments: Option<String>,
        scalar f_r_7_more_information_available: Option<bool>,
    }
}

entity! {
    /// G.k Drug(s) information.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GKDrugInformation in DomainLayer => g_k_drug_information {
        children g_k_2_3_r_substance_id_strength: Vec<GK23RSubstanceIdStrength>,
        children g_k_4_r_dosage_information: Vec<GK4RDosageInformation>,
        children g_k_7_r_indication_use_case: Vec<GK7RIndicationUseCase>,
        children g_k_9_i_drug_reaction_matrix: Vec<GK9IDrugReactionMatrix>,
        children g_k_10_r_additional_information_drug: Vec<GK10RAdditionalInformationDrug>,
        scalar g_k_1_characterisation_drug_role: Option<i64>,
        scalar g_k_2_1_1b_mpid: Option<String>,
        scalar g_k_2_2_medicinal_product_name_primary_source: Option<String>,
        scalar g_k_2_4_identification_country_drug_obtained: Option<String>,
        scalar g_k_2_5_investigational_product_blinded: Option<bool>,
        scalar g_k_3_1_authorisation_application_number: Option<String>,
        scalar g_k_3_3_name_holder_applicant: Option<String>,
        scalar g_k_5a_cumulative_dose_first_reaction_num: Option<Decimal>,
        scalar g_k_5b_cumulative_dose_first_reaction_unit: Option<String>,
        scalar g_k_8_action_taken_drug: Option<i64>,
        scalar g_k_11_additional_information_drug: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK23RSubstanceIdStrength in DomainLayer => g_k_2_3_r_substance_id_strength {
        scalar g_k_2_3_r_1_substance_name: Option<String>,
        scalar g_k_2_3_r_2b_substance_termid: Option<String>,
        scalar g_k_2_3_r_3a_strength_num: Option<Decimal>,
        scalar g_k_2_3_r_3b_strength_unit: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK4RDosageInformation in DomainLayer => g_k_4_r_dosage_information {
        scalar g_k_4_r_1a_dose_num: Option<Decimal>,
        scalar g_k_4_r_1b_dose_unit: Option<String>,
        scalar g_k_4_r_2_number_units_interval: Option<Decimal>,
        scalar g_k_4_r_3_definition_interval_unit: Option<String>,
        scalar g_k_4_r_4_date_time_drug: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar g_k_4_r_5_date_time_last_administration: Option<Nullable<String>> [Msk, Asku, Nask],
        scalar g_k_4_r_7_batch_lot_number: Option<String>,
        scalar g_k_4_r_8_dosage_text: Option<String>,
        scalar g_k_4_r_9_1_pharmaceutical_dose_form: Option<Nullable<String>> [Asku, Nask, Unk],
        scalar g_k_4_r_10_1_route_administration: Option<Nullable<String>> [Asku, Nask, Unk],
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK7RIndicationUseCase in DomainLayer => g_k_7_r_indication_use_case {
        scalar g_k_7_r_1_indication_primary_source: Option<Nullable<String>> [Asku, Nask, Unk],
        scalar g_k_7_r_2a_meddra_version_indication: Option<String>,
        scalar g_k_7_r_2b_indication_meddra_code: Option<i64>,
    }
}

entity! {
    /// G.k.9.i Drug-reaction(s)/event(s) matrix.
    ///
    /// `g_k_9_i_1_reaction_assessed` points at a reaction of the same report by
    /// surrogate id or correlation token.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct GK9IDrugReactionMatrix in DomainLayer => g_k_9_i_drug_reaction_matrix {
        #[serde(default)]
        children g_k_9_i_2_r_assessment_relatedness_drug_reaction: Vec<GK9I2RAssessmentRelatednessDrugReaction>,
        scalar g_k_9_i_1_reaction_assessed: ReactionRef,
        scalar g_k_9_i_3_1a_interval_drug_administration_reaction_num: Option<Decimal>,
        scalar g_k_9_i_3_1b_interval_drug_administration_reaction_unit: Option<String>,
        scalar g_k_9_i_3_2a_interval_last_dose_drug_reaction_num: Option<Decimal>,
        scalar g_k_9_i_3_2b_interval_last_dose_drug_reaction_unit: Option<String>,
        scalar g_k_9_i_4_reaction_recur_readministration: Option<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK9I2RAssessmentRelatednessDrugReaction in DomainLayer => g_k_9_i_2_r_assessment_relatedness_drug_reaction {
        scalar g_k_9_i_2_r_1_source_assessment: Option<String>,
        scalar g_k_9_i_2_r_2_method_assessment: Option<String>,
        scalar g_k_9_i_2_r_3_result_assessment: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK10RAdditionalInformationDrug in DomainLayer => g_k_10_r_additional_information_drug {
        scalar g_k_10_r_additional_information_drug: Option<i64>,
    }
}

entity! {
    /// H Narrative case summary and further information.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct HNarrativeCaseSummary in DomainLayer => h_narrative_case_summary {
        children h_3_r_sender_diagnosis_meddra_code: Vec<H3RSenderDiagnosisMeddraCode>,
        children h_5_r_case_summary_reporter_comments_native_language: Vec<H5RCaseSummaryReporterCommentsNativeLanguage>,
        scalar h_1_case_narrative: Option<String>,
        scalar h_2_reporter_comments: Option<String>,
        scalar h_4_sender_comments: Option<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct H3RSenderDiagnosisMeddraCode in DomainLayer => h_3_r_sender_diagnosis_meddra_code {
        scalar h_3_r_1a_meddra_version_sender_diagnosis: Option<String>,
        scalar h_3_r_1b_sender_diagnosis_meddra_code: Option<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct H5RCaseSummaryReporterCommentsNativeLanguage in DomainLayer => h_5_r_case_summary_reporter_comments_native_language {
        scalar h_5_r_1a_case_summary_reporter_comments_text: Option<String>,
        scalar h_5_r_1b_case_summary_reporter_comments_language: Option<String>,
    }
}
