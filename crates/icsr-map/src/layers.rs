//! Correspondences between the adjacent layers of the document model.

use icsr_model::api::ApiLayer;
use icsr_model::domain::DomainLayer;
use icsr_model::storage::StorageLayer;

use crate::convert::{Adjacent, Backward, Forward};
use crate::correspondence;

correspondence! {
    /// External form and business-rule form.
    pub struct ApiDomain: api::ApiLayer => domain::DomainLayer {
        Icsr,
        C1IdentificationCaseSafetyReport,
        C161RDocumentsHeldSender,
        C191RSourceCaseId,
        C110RIdentificationNumberReportLinked,
        C2RPrimarySourceInformation,
        C3InformationSenderCaseSafetyReport,
        C4RLiteratureReference,
        C5StudyIdentification,
        C51RStudyRegistration,
        DPatientCharacteristics,
        D71RStructuredInformationMedicalHistory,
        D8RPastDrugHistory,
        D92RCauseDeath,
        D94RAutopsyDeterminedCauseDeath,
        D1071RStructuredInformationParentMeddraCode,
        D108RPastDrugHistoryParent,
        EIReactionEvent,
        FRResultsTestsProceduresInvestigationPatient,
        GKDrugInformation,
        GK23RSubstanceIdStrength,
        GK4RDosageInformation,
        GK7RIndicationUseCase,
        GK9IDrugReactionMatrix,
        GK9I2RAssessmentRelatednessDrugReaction,
        GK10RAdditionalInformationDrug,
        HNarrativeCaseSummary,
        H3RSenderDiagnosisMeddraCode,
        H5RCaseSummaryReporterCommentsNativeLanguage,
    }
}

correspondence! {
    /// Business-rule form and persisted form.
    pub struct DomainStorage: domain::DomainLayer => storage::StorageLayer {
        Icsr,
        C1IdentificationCaseSafetyReport,
        C161RDocumentsHeldSender,
        C191RSourceCaseId,
        C110RIdentificationNumberReportLinked,
        C2RPrimarySourceInformation,
        C3InformationSenderCaseSafetyReport,
        C4RLiteratureReference,
        C5StudyIdentification,
        C51RStudyRegistration,
        DPatientCharacteristics,
        D71RStructuredInformationMedicalHistory,
        D8RPastDrugHistory,
        D92RCauseDeath,
        D94RAutopsyDeterminedCauseDeath,
        D1071RStructuredInformationParentMeddraCode,
        D108RPastDrugHistoryParent,
        EIReactionEvent,
        FRResultsTestsProceduresInvestigationPatient,
        GKDrugInformation,
        GK23RSubstanceIdStrength,
        GK4RDosageInformation,
        GK7RIndicationUseCase,
        GK9IDrugReactionMatrix,
        GK9I2RAssessmentRelatednessDrugReaction,
        GK10RAdditionalInformationDrug,
        HNarrativeCaseSummary,
        H3RSenderDiagnosisMeddraCode,
        H5RCaseSummaryReporterCommentsNativeLanguage,
    }
}

impl Adjacent<DomainLayer> for ApiLayer {
    type Direction = Forward<ApiDomain>;
}

impl Adjacent<ApiLayer> for DomainLayer {
    type Direction = Backward<ApiDomain>;
}

impl Adjacent<StorageLayer> for DomainLayer {
    type Direction = Forward<DomainStorage>;
}

impl Adjacent<DomainLayer> for StorageLayer {
    type Direction = Backward<DomainStorage>;
}
