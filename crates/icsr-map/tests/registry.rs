//! Tests for class correspondence registries.

use std::thread;

use icsr_map::{ApiDomain, ClassRegistry, Correspondence, DomainStorage, MappingError, Pair};
use icsr_model::{EntityType, api, domain, storage};

// --- declared correspondences ---

#[test]
fn declared_correspondences_cover_both_schemas() {
    let api_domain = ApiDomain::registry().unwrap();
    let domain_storage = DomainStorage::registry().unwrap();

    assert_eq!(api_domain.len(), api::Icsr::schema().reachable().len());
    assert_eq!(domain_storage.len(), storage::Icsr::schema().reachable().len());
    assert_eq!(api_domain.source_layer(), "api");
    assert_eq!(api_domain.target_layer(), "domain");
    assert_eq!(domain_storage.source_layer(), "domain");
    assert_eq!(domain_storage.target_layer(), "storage");
}

#[test]
fn lookups_resolve_in_both_directions() {
    let registry = DomainStorage::registry().unwrap();

    let target = registry
        .target_of(domain::GK9IDrugReactionMatrix::schema())
        .unwrap();
    assert_eq!(target, storage::GK9IDrugReactionMatrix::schema());

    let source = registry.source_of(storage::Icsr::schema()).unwrap();
    assert_eq!(source, domain::Icsr::schema());
}

#[test]
fn pairs_share_canonical_names() {
    for pair in ApiDomain::registry().unwrap().pairs() {
        assert_eq!(pair.source.name, pair.target.name);
        assert_eq!(pair.source.type_name, pair.target.type_name);
    }
}

#[test]
fn lookup_from_a_foreign_layer_is_unresolvable() {
    let registry = ApiDomain::registry().unwrap();
    let error = registry
        .target_of(storage::EIReactionEvent::schema())
        .unwrap_err();
    assert_eq!(
        error,
        MappingError::UnresolvableCounterpart {
            entity: "storage::EIReactionEvent".to_string(),
            from: "api",
            to: "domain",
        }
    );
}

// --- idempotence ---

#[test]
fn rebuilding_yields_an_equal_registry() {
    let first = DomainStorage::build().unwrap();
    let second = DomainStorage::build().unwrap();
    assert_eq!(first, second);
    assert_eq!(&first, DomainStorage::registry().unwrap());
}

#[test]
fn concurrent_first_use_shares_one_registry() {
    let registries: Vec<&'static ClassRegistry> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| ApiDomain::registry().unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for registry in &registries {
        assert!(std::ptr::eq(*registry, registries[0]));
    }
    assert_eq!(registries[0], &ApiDomain::build().unwrap());
}

// --- inconsistent declarations ---

fn domain_storage_pairs_without(canonical: &str) -> Vec<Pair> {
    DomainStorage::pairs()
        .into_iter()
        .filter(|pair| pair.source.name != canonical)
        .collect()
}

#[test]
fn missing_pair_is_reported() {
    let pairs = domain_storage_pairs_without("h_3_r_sender_diagnosis_meddra_code");
    let error =
        ClassRegistry::build(domain::Icsr::schema(), storage::Icsr::schema(), &pairs).unwrap_err();
    assert_eq!(
        error,
        MappingError::Unpaired {
            entity: "domain::H3RSenderDiagnosisMeddraCode".to_string(),
            layer: "domain",
        }
    );
}

#[test]
fn duplicate_pair_is_reported() {
    let mut pairs = DomainStorage::pairs();
    pairs.push(pairs[0]);
    let error =
        ClassRegistry::build(domain::Icsr::schema(), storage::Icsr::schema(), &pairs).unwrap_err();
    assert!(matches!(error, MappingError::DuplicatePair { .. }));
}

#[test]
fn pair_with_different_names_is_rejected() {
    let mut pairs = domain_storage_pairs_without("icsr");
    pairs.push(Pair::new(
        domain::Icsr::schema(),
        storage::HNarrativeCaseSummary::schema(),
    ));
    let error =
        ClassRegistry::build(domain::Icsr::schema(), storage::Icsr::schema(), &pairs).unwrap_err();
    assert!(matches!(error, MappingError::NameMismatch { .. }));
}

#[test]
fn pair_outside_the_target_schema_is_rejected() {
    let mut pairs = domain_storage_pairs_without("icsr");
    pairs.push(Pair::new(domain::Icsr::schema(), api::Icsr::schema()));
    let error =
        ClassRegistry::build(domain::Icsr::schema(), storage::Icsr::schema(), &pairs).unwrap_err();
    assert_eq!(
        error,
        MappingError::OutsideSchema {
            entity: "api::Icsr".to_string(),
            layer: "storage",
        }
    );
}
