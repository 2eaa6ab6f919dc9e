use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use icsr_core::{IcsrService, InMemoryStore, ServiceError};
use icsr_map::{ConversionError, convert};
use icsr_model::{
    EntityDescriptor, EntityType, FieldShape, IssueReport, ValidationIssue, api, domain,
    storage,
};
use tracing::{info, info_span, warn};

/// Code reported when a well-formed document cannot be built in the domain
/// layer (for example a reaction link without a target).
pub const CONSTRUCTION_CODE: &str = "construction";

/// Layer of the document model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayerArg {
    Api,
    Domain,
    Storage,
}

impl LayerArg {
    pub const ALL: [LayerArg; 3] = [LayerArg::Api, LayerArg::Domain, LayerArg::Storage];

    fn root(self) -> &'static EntityDescriptor {
        match self {
            LayerArg::Api => api::Icsr::schema(),
            LayerArg::Domain => domain::Icsr::schema(),
            LayerArg::Storage => storage::Icsr::schema(),
        }
    }
}

/// Layer an api document can be converted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConvertTarget {
    Domain,
    Storage,
}

#[derive(Debug)]
pub struct ValidateResult {
    pub file: PathBuf,
    pub report: IssueReport,
}

/// Reads an api document and runs the structural and business checks.
///
/// Problems with the document itself end up in the report, one issue per
/// malformed attribute; only I/O and store failures are errors.
pub fn run_validate(path: &Path) -> Result<ValidateResult> {
    let span = info_span!("validate", file = %path.display());
    let _guard = span.enter();

    let text = read_document(path)?;
    let report = match icsr_model::read_document(&text) {
        Err(error) => {
            warn!(%error, "document is malformed");
            rejected(vec![ValidationIssue::from(&error)])
        }
        Ok(document) if !document.is_clean() => {
            warn!(faults = document.faults.len(), "document has malformed attributes");
            rejected(document.faults.iter().map(ValidationIssue::from).collect())
        }
        Ok(document) => {
            match IcsrService::new(InMemoryStore::new()).business_validate(&document.icsr) {
                Ok(outcome) => outcome.report,
                Err(ServiceError::Conversion(error)) => {
                    warn!(%error, "document cannot be built in the domain layer");
                    rejected(vec![construction_issue(&error)])
                }
                Err(error) => return Err(error).context("validate document"),
            }
        }
    };

    info!(
        valid = report.is_valid,
        issues = report.issue_count(),
        "validation finished"
    );
    Ok(ValidateResult {
        file: path.to_path_buf(),
        report,
    })
}

/// Converts an api document into `target` and renders it as JSON.
pub fn run_convert(path: &Path, target: ConvertTarget) -> Result<String> {
    let span = info_span!("convert", file = %path.display(), target = ?target);
    let _guard = span.enter();

    let text = read_document(path)?;
    let icsr = api::Icsr::from_json(&text)
        .with_context(|| format!("parse {}", path.display()))?;
    let domain: domain::Icsr = convert(&icsr).context("convert to the domain layer")?;
    let rendered = match target {
        ConvertTarget::Domain => serde_json::to_string_pretty(&domain),
        ConvertTarget::Storage => {
            let stored: storage::Icsr =
                convert(&domain).context("convert to the storage layer")?;
            serde_json::to_string_pretty(&stored)
        }
    };
    let rendered = rendered.context("serialize converted document")?;
    info!(bytes = rendered.len(), "conversion finished");
    Ok(rendered)
}

/// One entity type of one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRow {
    pub layer: &'static str,
    pub entity: &'static str,
    pub type_name: &'static str,
    pub scalars: usize,
    /// Nested fields with their shape, in declaration order.
    pub nested: Vec<String>,
}

pub fn schema_rows(layer: Option<LayerArg>) -> Vec<SchemaRow> {
    let layers = match layer {
        Some(layer) => vec![layer],
        None => LayerArg::ALL.to_vec(),
    };
    layers
        .into_iter()
        .flat_map(|layer| layer.root().reachable())
        .map(|descriptor| SchemaRow {
            layer: descriptor.layer,
            entity: descriptor.name,
            type_name: descriptor.type_name,
            scalars: descriptor
                .fields
                .iter()
                .filter(|field| matches!(field.shape, FieldShape::Scalar))
                .count(),
            nested: descriptor
                .fields
                .iter()
                .filter(|field| field.shape.entity().is_some())
                .map(|field| format!("{} ({})", field.name, field.shape.label()))
                .collect(),
        })
        .collect()
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn rejected(issues: Vec<ValidationIssue>) -> IssueReport {
    IssueReport {
        is_valid: false,
        issues,
    }
}

fn construction_issue(error: &ConversionError) -> ValidationIssue {
    let path = error.path().cloned().unwrap_or_default();
    ValidationIssue::new(path, CONSTRUCTION_CODE, error.to_string())
}
