//! External-facing layer.
//!
//! Every scalar is wrapped: plain attributes as [`Value`] (`{"value": ...}`)
//! and null-flavored attributes as [`NullableValue`]
//! (`{"value": ..., "null_flavor": ...}`). Reaction links may arrive without
//! a target; the domain layer is where that becomes an error.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::entity;
use crate::entity::Layer;
use crate::error::{ScalarError, StructuralError};
use crate::null_flavor::NullFlavor;
use crate::scalar::{Decimal, ReactionRef, Scalar, ScalarField, ScalarType};
use crate::structure::read_document;

pub struct ApiLayer;

impl Layer for ApiLayer {
    const NAME: &'static str = "api";

    type Root = Icsr;
}

impl Icsr {
    /// Reads a document from its JSON form, failing on the first malformed
    /// attribute.
    pub fn from_json(text: &str) -> Result<Self, StructuralError> {
        let document = read_document(text)?;
        match document.faults.into_iter().next() {
            Some(fault) => Err(fault),
            None => Ok(document.icsr),
        }
    }
}

/// A plain attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value<T> {
    pub value: Option<T>,
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> Value<T> {
    pub fn new(value: T) -> Self {
        Self { value: Some(value) }
    }
}

impl<T: ScalarType> ScalarField for Value<T> {
    fn read(&self) -> Option<Scalar> {
        self.value.as_ref().map(ScalarType::to_scalar)
    }

    fn write(scalar: Option<Scalar>) -> Result<Self, ScalarError> {
        let value = scalar.map(T::from_scalar).transpose()?;
        Ok(Self { value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Null flavor should not be present if value is present")]
pub struct NullFlavorConflict;

/// An attribute that carries either a value or a null flavor, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NullableValue<T> {
    value: Option<T>,
    null_flavor: Option<NullFlavor>,
}

impl<T> Default for NullableValue<T> {
    fn default() -> Self {
        Self {
            value: None,
            null_flavor: None,
        }
    }
}

impl<T> NullableValue<T> {
    pub fn new(value: Option<T>, null_flavor: Option<NullFlavor>) -> Result<Self, NullFlavorConflict> {
        if value.is_some() && null_flavor.is_some() {
            return Err(NullFlavorConflict);
        }
        Ok(Self { value, null_flavor })
    }

    pub fn value(value: T) -> Self {
        Self {
            value: Some(value),
            null_flavor: None,
        }
    }

    pub fn null_flavor(flavor: NullFlavor) -> Self {
        Self {
            value: None,
            null_flavor: Some(flavor),
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn flavor(&self) -> Option<NullFlavor> {
        self.null_flavor
    }
}

#[derive(Deserialize)]
struct RawNullableValue<T> {
    value: Option<T>,
    null_flavor: Option<NullFlavor>,
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NullableValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawNullableValue::<T>::deserialize(deserializer)?;
        NullableValue::new(raw.value, raw.null_flavor).map_err(serde::de::Error::custom)
    }
}

impl<T: ScalarType> ScalarField for NullableValue<T> {
    fn read(&self) -> Option<Scalar> {
        match (&self.value, self.null_flavor) {
            (Some(value), _) => Some(value.to_scalar()),
            (None, Some(flavor)) => Some(Scalar::NullFlavor(flavor)),
            (None, None) => None,
        }
    }

    fn write(scalar: Option<Scalar>) -> Result<Self, ScalarError> {
        Ok(match scalar {
            None => Self::default(),
            Some(Scalar::NullFlavor(flavor)) => Self::null_flavor(flavor),
            Some(other) => Self::value(T::from_scalar(other)?),
        })
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Icsr in ApiLayer => icsr {
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
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C1IdentificationCaseSafetyReport in ApiLayer => c_1_identification_case_safety_report {
        children c_1_6_1_r_documents_held_sender: Vec<C161RDocumentsHeldSender>,
        children c_1_9_1_r_source_case_id: Vec<C191RSourceCaseId>,
        children c_1_10_r_identification_number_report_linked: Vec<C110RIdentificationNumberReportLinked>,
        scalar c_1_1_sender_safety_report_unique_id: Value<String>,
        scalar c_1_2_date_creation: Value<String>,
        scalar c_1_3_type_report: Value<i64>,
        scalar c_1_4_date_report_first_received_source: Value<String>,
        scalar c_1_5_date_most_recent_information: Value<String>,
        scalar c_1_6_1_additional_documents_available: Value<bool>,
        scalar c_1_7_fulfil_local_criteria_expedited_report: NullableValue<bool> [Ni],
        scalar c_1_8_1_worldwide_unique_case_identification_number: Value<String>,
        scalar c_1_8_2_first_sender: Value<i64>,
        scalar c_1_9_1_other_case_ids_previous_transmissions: NullableValue<bool> [Ni],
        scalar c_1_11_1_report_nullification_amendment: Value<i64>,
        scalar c_1_11_2_reason_nullification_amendment: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C161RDocumentsHeldSender in ApiLayer => c_1_6_1_r_documents_held_sender {
        scalar c_1_6_1_r_1_documents_held_sender: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C191RSourceCaseId in ApiLayer => c_1_9_1_r_source_case_id {
        scalar c_1_9_1_r_1_source_case_id: Value<String>,
        scalar c_1_9_1_r_2_case_id: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C110RIdentificationNumberReportLinked in ApiLayer => c_1_10_r_identification_number_report_linked {
        scalar c_1_10_r_identification_number_report_linked: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C2RPrimarySourceInformation in ApiLayer => c_2_r_primary_source_information {
        scalar c_2_r_1_1_reporter_title: NullableValue<String> [Msk, Asku, Nask, Unk],
        scalar c_2_r_1_2_reporter_given_name: NullableValue<String> [Msk, Asku, Nask],
        scalar c_2_r_1_3_reporter_middle_name: NullableValue<String> [Msk, Asku, Nask],
        scalar c_2_r_1_4_reporter_family_name: NullableValue<String> [Msk, Asku, Nask],
        scalar c_2_r_2_1_reporter_organisation: NullableValue<String> [Msk, Asku, Nask],
        scalar c_2_r_2_4_reporter_city: NullableValue<String> [Msk, Asku, Nask],
        scalar c_2_r_2_7_reporter_telephone: NullableValue<String> [Msk, Asku, Nask],
        scalar c_2_r_3_reporter_country_code: Value<String>,
        scalar c_2_r_4_qualification: NullableValue<i64> [Unk],
        scalar c_2_r_5_primary_source_regulatory_purposes: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C3InformationSenderCaseSafetyReport in ApiLayer => c_3_information_sender_case_safety_report {
        scalar c_3_1_sender_type: Value<i64>,
        scalar c_3_2_sender_organisation: Value<String>,
        scalar c_3_3_1_sender_department: Value<String>,
        scalar c_3_3_3_sender_given_name: Value<String>,
        scalar c_3_3_5_sender_family_name: Value<String>,
        scalar c_3_4_2_sender_city: Value<String>,
        scalar c_3_4_5_sender_country_code: Value<String>,
        scalar c_3_4_8_sender_email: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C4RLiteratureReference in ApiLayer => c_4_r_literature_reference {
        scalar c_4_r_1_literature_reference: NullableValue<String> [Asku, Nask],
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C5StudyIdentification in ApiLayer => c_5_study_identification {
        children c_5_1_r_study_registration: Vec<C51RStudyRegistration>,
        scalar c_5_2_study_name: NullableValue<String> [Asku, Nask],
        scalar c_5_3_sponsor_study_number: NullableValue<String> [Asku, Nask],
        scalar c_5_4_study_type_reaction: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct C51RStudyRegistration in ApiLayer => c_5_1_r_study_registration {
        scalar c_5_1_r_1_study_registration_number: NullableValue<String> [Asku, Nask],
        scalar c_5_1_r_2_study_registration_country: NullableValue<String> [Asku, Nask],
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct DPatientCharacteristics in ApiLayer => d_patient_characteristics {
        children d_7_1_r_structured_information_medical_history: Vec<D71RStructuredInformationMedicalHistory>,
        children d_8_r_past_drug_history: Vec<D8RPastDrugHistory>,
        children d_9_2_r_cause_death: Vec<D92RCauseDeath>,
        children d_9_4_r_autopsy_determined_cause_death: Vec<D94RAutopsyDeterminedCauseDeath>,
        children d_10_7_1_r_structured_information_parent_meddra_code: Vec<D1071RStructuredInformationParentMeddraCode>,
        children d_10_8_r_past_drug_history_parent: Vec<D108RPastDrugHistoryParent>,
        scalar d_1_patient: NullableValue<String> [Msk, Asku, Nask, Unk],
        scalar d_1_1_1_medical_record_number_source_gp: NullableValue<String> [Msk],
        scalar d_2_1_date_birth: NullableValue<String> [Msk],
        scalar d_2_2a_age_onset_reaction_num: Value<i64>,
        scalar d_2_2b_age_onset_reaction_unit: Value<String>,
        scalar d_2_3_patient_age_group: Value<i64>,
        scalar d_3_body_weight: Value<Decimal>,
        scalar d_4_height: Value<i64>,
        scalar d_5_sex: NullableValue<i64> [Msk, Unk, Asku, Nask],
        scalar d_6_last_menstrual_period_date: Value<String>,
        scalar d_7_2_text_medical_history: NullableValue<String> [Msk, Asku, Nask, Unk],
        scalar d_7_3_concomitant_therapies: Value<bool>,
        scalar d_9_1_date_death: NullableValue<String> [Msk, Asku, Nask],
        scalar d_9_3_autopsy: NullableValue<bool> [Asku, Nask, Unk],
        scalar d_10_1_parent_identification: NullableValue<String> [Msk, Asku, Nask, Unk],
        scalar d_10_4_body_weight_parent: Value<Decimal>,
        scalar d_10_6_sex_parent: NullableValue<i64> [Unk, Msk, Asku, Nask],
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D71RStructuredInformationMedicalHistory in ApiLayer => d_7_1_r_structured_information_medical_history {
        scalar d_7_1_r_1a_meddra_version_medical_history: Value<String>,
        scalar d_7_1_r_1b_medical_history_meddra_code: Value<i64>,
        scalar d_7_1_r_2_start_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_7_1_r_3_continuing: NullableValue<bool> [Msk, Asku, Nask, Unk],
        scalar d_7_1_r_4_end_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_7_1_r_5_comments: Value<String>,
        scalar d_7_1_r_6_family_history: Value<bool>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D8RPastDrugHistory in ApiLayer => d_8_r_past_drug_history {
        scalar d_8_r_1_name_drug: NullableValue<String> [Unk, Na],
        scalar d_8_r_4_start_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_8_r_5_end_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_8_r_6a_meddra_version_indication: Value<String>,
        scalar d_8_r_6b_indication_meddra_code: Value<i64>,
        scalar d_8_r_7a_meddra_version_reaction: Value<String>,
        scalar d_8_r_7b_reaction_meddra_code: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D92RCauseDeath in ApiLayer => d_9_2_r_cause_death {
        scalar d_9_2_r_1a_meddra_version_cause_death: Value<String>,
        scalar d_9_2_r_1b_cause_death_meddra_code: Value<i64>,
        scalar d_9_2_r_2_cause_death: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D94RAutopsyDeterminedCauseDeath in ApiLayer => d_9_4_r_autopsy_determined_cause_death {
        scalar d_9_4_r_1a_meddra_version_autopsy_determined_cause_death: Value<String>,
        scalar d_9_4_r_1b_autopsy_determined_cause_death_meddra_code: Value<i64>,
        scalar d_9_4_r_2_autopsy_determined_cause_death: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D1071RStructuredInformationParentMeddraCode in ApiLayer => d_10_7_1_r_structured_information_parent_meddra_code {
        scalar d_10_7_1_r_1a_meddra_version_medical_history: Value<String>,
        scalar d_10_7_1_r_1b_medical_history_meddra_code: Value<i64>,
        scalar d_10_7_1_r_2_start_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_10_7_1_r_3_continuing: NullableValue<bool> [Msk, Asku, Nask, Unk],
        scalar d_10_7_1_r_4_end_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_10_7_1_r_5_comments: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct D108RPastDrugHistoryParent in ApiLayer => d_10_8_r_past_drug_history_parent {
        scalar d_10_8_r_1_name_drug: Value<String>,
        scalar d_10_8_r_4_start_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_10_8_r_5_end_date: NullableValue<String> [Msk, Asku, Nask],
        scalar d_10_8_r_6b_indication_meddra_code: Value<i64>,
        scalar d_10_8_r_7b_reactions_meddra_code: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct EIReactionEvent in ApiLayer => e_i_reaction_event {
        scalar uuid: Value<Uuid>,
        scalar e_i_1_1a_reaction_primary_source_native_language: Value<String>,
        scalar e_i_1_1b_reaction_primary_source_language: Value<String>,
        scalar e_i_1_2_reaction_primary_source_translation: Value<String>,
        scalar e_i_2_1a_meddra_version_reaction: Value<String>,
        scalar e_i_2_1b_reaction_meddra_code: Value<i64>,
        scalar e_i_3_1_term_highlighted_reporter: Value<i64>,
        scalar e_i_3_2a_results_death: NullableValue<bool> [Ni],
        scalar e_i_3_2b_life_threatening: NullableValue<bool> [Ni],
        scalar e_i_3_2c_caused_prolonged_hospitalisation: NullableValue<bool> [Ni],
        scalar e_i_4_date_start_reaction: NullableValue<String> [Msk, Asku, Nask],
        scalar e_i_5_date_end_reaction: NullableValue<String> [Msk, Asku, Nask],
        scalar e_i_6a_duration_reaction_num: Value<i64>,
        scalar e_i_6b_duration_reaction_unit: Value<String>,
        scalar e_i_7_outcome_reaction_last_observation: Value<i64>,
        scalar e_i_8_medical_confirmation_healthcare_professional: Value<bool>,
        scalar e_i_9_identification_country_reaction: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct FRResultsTestsProceduresInvestigationPatient in ApiLayer => f_r_results_tests_procedures_investigation_patient {
        scalar f_r_1_test_date: NullableValue<String> [Unk],
        scalar f_r_2_1_test_name: Value<String>,
        scalar f_r_2_2a_meddra_version_test_name: Value<String>,
        scalar f_r_2_2b_test_name_meddra_code: Value<i64>,
        scalar f_r_3_1_test_result_code: Value<i64>,
        scalar f_r_3_2_test_result_val_qual: NullableValue<Decimal> [Ninf, Pinf],
        scalar f_r_3_3_test_result_unit: Value<String>,
        scalar f_r_3_4_result_unstructured_data: Value<String>,
        scalar f_r_4_normal_low_value: Value<String>,
        scalar f_r_5_normal_high_value: Value<String>,
        scalar f_r_6_comments: Value<String>,
        scalar f_r_7_more_information_available: Value<bool>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GKDrugInformation in ApiLayer => g_k_drug_information {
        children g_k_2_3_r_substance_id_strength: Vec<GK23RSubstanceIdStrength>,
        children g_k_4_r_dosage_information: Vec<GK4RDosageInformation>,
        children g_k_7_r_indication_use_case: Vec<GK7RIndicationUseCase>,
        children g_k_9_i_drug_reaction_matrix: Vec<GK9IDrugReactionMatrix>,
        children g_k_10_r_additional_information_drug: Vec<GK10RAdditionalInformationDrug>,
        scalar g_k_1_characterisation_drug_role: Value<i64>,
        scalar g_k_2_1_1b_mpid: Value<String>,
        scalar g_k_2_2_medicinal_product_name_primary_source: Value<String>,
        scalar g_k_2_4_identification_country_drug_obtained: Value<String>,
        scalar g_k_2_5_investigational_product_blinded: Value<bool>,
        scalar g_k_3_1_authorisation_application_number: Value<String>,
        scalar g_k_3_3_name_holder_applicant: Value<String>,
        scalar g_k_5a_cumulative_dose_first_reaction_num: Value<Decimal>,
        scalar g_k_5b_cumulative_dose_first_reaction_unit: Value<String>,
        scalar g_k_8_action_taken_drug: Value<i64>,
        scalar g_k_11_additional_information_drug: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK23RSubstanceIdStrength in ApiLayer => g_k_2_3_r_substance_id_strength {
        scalar g_k_2_3_r_1_substance_name: Value<String>,
        scalar g_k_2_3_r_2b_substance_termid: Value<String>,
        scalar g_k_2_3_r_3a_strength_num: Value<Decimal>,
        scalar g_k_2_3_r_3b_strength_unit: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK4RDosageInformation in ApiLayer => g_k_4_r_dosage_information {
        scalar g_k_4_r_1a_dose_num: Value<Decimal>,
        scalar g_k_4_r_1b_dose_unit: Value<String>,
        scalar g_k_4_r_2_number_units_interval: Value<Decimal>,
        scalar g_k_4_r_3_definition_interval_unit: Value<String>,
        scalar g_k_4_r_4_date_time_drug: NullableValue<String> [Msk, Asku, Nask],
        scalar g_k_4_r_5_date_time_last_administration: NullableValue<String> [Msk, Asku, Nask],
        scalar g_k_4_r_7_batch_lot_number: Value<String>,
        scalar g_k_4_r_8_dosage_text: Value<String>,
        scalar g_k_4_r_9_1_pharmaceutical_dose_form: NullableValue<String> [Asku, Nask, Unk],
        scalar g_k_4_r_10_1_route_administration: NullableValue<String> [Asku, Nask, Unk],
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK7RIndicationUseCase in ApiLayer => g_k_7_r_indication_use_case {
        scalar g_k_7_r_1_indication_primary_source: NullableValue<String> [Asku, Nask, Unk],
        scalar g_k_7_r_2a_meddra_version_indication: Value<String>,
        scalar g_k_7_r_2b_indication_meddra_code: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK9IDrugReactionMatrix in ApiLayer => g_k_9_i_drug_reaction_matrix {
        children g_k_9_i_2_r_assessment_relatedness_drug_reaction: Vec<GK9I2RAssessmentRelatednessDrugReaction>,
        scalar g_k_9_i_1_reaction_assessed: Value<ReactionRef>,
        scalar g_k_9_i_3_1a_interval_drug_administration_reaction_num: Value<Decimal>,
        scalar g_k_9_i_3_1b_interval_drug_administration_reaction_unit: Value<String>,
        scalar g_k_9_i_3_2a_interval_last_dose_drug_reaction_num: Value<Decimal>,
        scalar g_k_9_i_3_2b_interval_last_dose_drug_reaction_unit: Value<String>,
        scalar g_k_9_i_4_reaction_recur_readministration: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK9I2RAssessmentRelatednessDrugReaction in ApiLayer => g_k_9_i_2_r_assessment_relatedness_drug_reaction {
        scalar g_k_9_i_2_r_1_source_assessment: Value<String>,
        scalar g_k_9_i_2_r_2_method_assessment: Value<String>,
        scalar g_k_9_i_2_r_3_result_assessment: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct GK10RAdditionalInformationDrug in ApiLayer => g_k_10_r_additional_information_drug {
        scalar g_k_10_r_additional_information_drug: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct HNarrativeCaseSummary in ApiLayer => h_narrative_case_summary {
        children h_3_r_sender_diagnosis_meddra_code: Vec<H3RSenderDiagnosisMeddraCode>,
        children h_5_r_case_summary_reporter_comments_native_language: Vec<H5RCaseSummaryReporterCommentsNativeLanguage>,
        scalar h_1_case_narrative: Value<String>,
        scalar h_2_reporter_comments: Value<String>,
        scalar h_4_sender_comments: Value<String>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct H3RSenderDiagnosisMeddraCode in ApiLayer => h_3_r_sender_diagnosis_meddra_code {
        scalar h_3_r_1a_meddra_version_sender_diagnosis: Value<String>,
        scalar h_3_r_1b_sender_diagnosis_meddra_code: Value<i64>,
    }
}

entity! {
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct H5RCaseSummaryReporterCommentsNativeLanguage in ApiLayer => h_5_r_case_summary_reporter_comments_native_language {
        scalar h_5_r_1a_case_summary_reporter_comments_text: Value<String>,
        scalar h_5_r_1b_case_summary_reporter_comments_language: Value<String>,
    }
}
