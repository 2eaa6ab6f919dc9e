//! The api -> domain -> storage pipeline behind every ICSR operation.

use icsr_map::{ConversionError, convert};
use icsr_model::{api, domain, storage};
use icsr_validate::{Validated, validate};
use thiserror::Error;
use tracing::{info, info_span};

use crate::store::{IcsrStore, StoreError};

/// An api-layer report annotated with its business-rule outcome.
pub type ServiceOutcome = Validated<api::Icsr>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Create/read/update/delete over a persistence collaborator.
///
/// Writes go through business validation first and are only persisted when
/// the report is valid; an invalid report is returned with its issues and
/// nothing is stored.
pub struct IcsrService<S> {
    store: S,
}

impl<S: IcsrStore> IcsrService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the business rules without persisting anything.
    pub fn business_validate(&self, icsr: &api::Icsr) -> Result<ServiceOutcome, ServiceError> {
        let _span = info_span!("business_validate").entered();
        let Validated { model, report } = validate(convert::<_, domain::Icsr>(icsr)?);
        info!(valid = report.is_valid, issues = report.issues.len(), "validated ICSR");
        Ok(Validated {
            model: convert(&model)?,
            report,
        })
    }

    pub fn create(&self, icsr: &api::Icsr) -> Result<ServiceOutcome, ServiceError> {
        let _span = info_span!("create").entered();
        self.write(icsr, |stored| self.store.create(stored))
    }

    pub fn update(&self, id: i64, icsr: &api::Icsr) -> Result<ServiceOutcome, ServiceError> {
        let _span = info_span!("update", id).entered();
        self.write(icsr, |stored| self.store.update(id, stored))
    }

    pub fn read(&self, id: i64) -> Result<api::Icsr, ServiceError> {
        Ok(to_api(&self.store.read(id)?)?)
    }

    pub fn list(&self) -> Result<Vec<api::Icsr>, ServiceError> {
        let stored = self.store.list()?;
        info!(count = stored.len(), "listing ICSRs");
        stored
            .iter()
            .map(|icsr| to_api(icsr).map_err(ServiceError::from))
            .collect()
    }

    pub fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.store.delete(id)?;
        info!(id, "deleted ICSR");
        Ok(())
    }

    fn write(
        &self,
        icsr: &api::Icsr,
        persist: impl FnOnce(storage::Icsr) -> Result<storage::Icsr, StoreError>,
    ) -> Result<ServiceOutcome, ServiceError> {
        let Validated { model, report } = validate(convert::<_, domain::Icsr>(icsr)?);
        if !report.is_valid {
            info!(issues = report.issues.len(), "ICSR rejected by business rules");
            return Ok(Validated {
                model: convert(&model)?,
                report,
            });
        }

        let stored = persist(convert(&model)?)?;
        info!(id = stored.id, "ICSR persisted");
        Ok(Validated {
            model: to_api(&stored)?,
            report,
        })
    }
}

fn to_api(stored: &storage::Icsr) -> Result<api::Icsr, ConversionError> {
    let domain: domain::Icsr = convert(stored)?;
    convert(&domain)
}
