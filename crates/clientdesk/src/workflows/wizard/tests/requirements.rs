use std::collections::BTreeSet;

use super::common::collision_catalog;
use crate::catalog::Catalog;
use crate::workflows::wizard::{requirement_key, resolve_requirements, RequirementEntry};

fn selection(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn common_requirements_come_first_in_catalog_order() {
    let catalog = Catalog::standard_intake();
    let resolved = resolve_requirements(&catalog, "individual", &selection(&[]));

    let names: Vec<&str> = resolved.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["ID Copy", "Proof of Address"]);
}

#[test]
fn service_requirements_follow_master_list_order_not_selection_order() {
    let catalog = Catalog::standard_intake();
    let forward = resolve_requirements(
        &catalog,
        "individual",
        &selection(&["Tax Filing", "Immigration Case"]),
    );
    let reverse = resolve_requirements(
        &catalog,
        "individual",
        &selection(&["Immigration Case", "Tax Filing"]),
    );

    assert_eq!(forward, reverse);

    let names: Vec<&str> = forward.iter().map(|entry| entry.name.as_str()).collect();
    // Tax Filing precedes Immigration Case in the master list.
    let tax_position = names
        .iter()
        .position(|name| *name == "Tax Clearance Form")
        .expect("tax requirement present");
    let passport_position = names
        .iter()
        .position(|name| *name == "Passport Copy")
        .expect("immigration requirement present");
    assert!(tax_position < passport_position);
}

#[test]
fn duplicate_names_resolve_first_wins_even_when_flags_differ() {
    let catalog = collision_catalog();
    let resolved = resolve_requirements(&catalog, "individual", &selection(&["Tax Filing"]));

    assert_eq!(
        resolved,
        vec![
            RequirementEntry::new("ID Copy", "identification", true),
            RequirementEntry::new("Tax Form", "form", true),
        ]
    );
}

#[test]
fn adding_a_service_never_removes_an_existing_requirement() {
    let catalog = Catalog::standard_intake();
    let smaller = resolve_requirements(&catalog, "company", &selection(&["Tax Filing"]));
    let larger = resolve_requirements(
        &catalog,
        "company",
        &selection(&["Tax Filing", "Payroll Support"]),
    );

    for entry in &smaller {
        assert!(
            larger.iter().any(|kept| kept.name == entry.name),
            "{} lost when the selection grew",
            entry.name
        );
    }
    assert!(larger.len() > smaller.len());
}

#[test]
fn shared_documents_across_services_appear_once() {
    let catalog = Catalog::standard_intake();
    // Both Tax Filing and Payroll Support list "Prior Year Returns".
    let resolved = resolve_requirements(
        &catalog,
        "individual",
        &selection(&["Tax Filing", "Payroll Support"]),
    );

    let count = resolved
        .iter()
        .filter(|entry| entry.name == "Prior Year Returns")
        .count();
    assert_eq!(count, 1);
    // Tax Filing defines it first, so its optional flag wins.
    let entry = resolved
        .iter()
        .find(|entry| entry.name == "Prior Year Returns")
        .expect("present");
    assert!(!entry.required);
}

#[test]
fn common_entry_beats_service_redefinition_in_the_standard_catalog() {
    let catalog = Catalog::standard_intake();
    let resolved = resolve_requirements(
        &catalog,
        "company",
        &selection(&["Company Registration"]),
    );

    let certificate = resolved
        .iter()
        .find(|entry| entry.name == "Certificate of Incorporation")
        .expect("present");
    assert!(certificate.required, "common entry's flag must survive");
}

#[test]
fn resolution_is_pure_and_repeatable() {
    let catalog = Catalog::standard_intake();
    let selected = selection(&["Immigration Case"]);
    let first = resolve_requirements(&catalog, "individual", &selected);
    let second = resolve_requirements(&catalog, "individual", &selected);
    assert_eq!(first, second);
}

#[test]
fn booking_tags_without_a_common_set_resolve_service_entries_only() {
    let catalog = Catalog::standard_booking();
    let resolved = resolve_requirements(
        &catalog,
        "tax_advisory",
        &selection(&["Visa Application Review"]),
    );

    let names: Vec<&str> = resolved.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["Passport Copy", "Current Visa"]);
}

#[test]
fn requirement_keys_disambiguate_service_specific_documents() {
    assert_eq!(requirement_key(None, "ID Copy"), "ID Copy");
    assert_eq!(
        requirement_key(Some("Tax Filing"), "ID Copy"),
        "Tax Filing-ID Copy"
    );
}
