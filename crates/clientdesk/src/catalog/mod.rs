//! Static reference data: the master service list, per-tag common document
//! requirements, and identification patterns. Built once at startup,
//! shared read-only across every active session.

use regex::Regex;
use serde::Serialize;

use crate::workflows::wizard::RequirementEntry;

/// One service the firm offers, with the documents it asks for.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDefinition {
    pub name: String,
    pub requirements: Vec<RequirementEntry>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    entity_tags: Vec<&'static str>,
    common: Vec<(&'static str, Vec<RequirementEntry>)>,
    services: Vec<ServiceDefinition>,
    id_patterns: Vec<(&'static str, Regex)>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity_tag(mut self, tag: &'static str) -> Self {
        self.entity_tags.push(tag);
        self
    }

    pub fn with_common(mut self, tag: &'static str, requirements: Vec<RequirementEntry>) -> Self {
        self.common.push((tag, requirements));
        self
    }

    pub fn with_service(
        mut self,
        name: impl Into<String>,
        requirements: Vec<RequirementEntry>,
    ) -> Self {
        self.services.push(ServiceDefinition {
            name: name.into(),
            requirements,
        });
        self
    }

    /// Patterns are catalog-authored literals; an invalid one is an
    /// authoring bug and panics at construction, before any session runs.
    pub fn with_id_pattern(mut self, id_type: &'static str, pattern: &str) -> Self {
        let compiled = Regex::new(pattern).expect("catalog id pattern must compile");
        self.id_patterns.push((id_type, compiled));
        self
    }

    pub fn entity_tags(&self) -> &[&'static str] {
        &self.entity_tags
    }

    /// Master service list, in catalog order. Requirement resolution walks
    /// this, never the caller's selection order.
    pub fn services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn service(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|service| service.name == name)
    }

    /// Requirements that apply to a tag regardless of selected services.
    /// Tags without a common set resolve to none.
    pub fn common_requirements(&self, tag: &str) -> &[RequirementEntry] {
        self.common
            .iter()
            .find(|(key, _)| *key == tag)
            .map(|(_, requirements)| requirements.as_slice())
            .unwrap_or(&[])
    }

    pub fn id_pattern(&self, id_type: &str) -> Option<&Regex> {
        self.id_patterns
            .iter()
            .find(|(key, _)| *key == id_type)
            .map(|(_, pattern)| pattern)
    }

    /// Reference data for the five-step client-onboarding intake.
    pub fn standard_intake() -> Self {
        Self::new()
            .with_entity_tag("individual")
            .with_entity_tag("company")
            .with_entity_tag("partnership")
            .with_entity_tag("sole_trader")
            .with_entity_tag("ngo")
            .with_common(
                "individual",
                vec![
                    RequirementEntry::new("ID Copy", "identification", true),
                    RequirementEntry::new("Proof of Address", "document", true),
                ],
            )
            .with_common(
                "company",
                vec![
                    RequirementEntry::new("Certificate of Incorporation", "certificate", true),
                    RequirementEntry::new("Proof of Address", "document", true),
                    RequirementEntry::new("Company Profile", "document", false),
                ],
            )
            .with_common(
                "partnership",
                vec![
                    RequirementEntry::new("Partnership Deed", "certificate", true),
                    RequirementEntry::new("Proof of Address", "document", true),
                ],
            )
            .with_common(
                "sole_trader",
                vec![
                    RequirementEntry::new("ID Copy", "identification", true),
                    RequirementEntry::new("Trade Licence", "certificate", false),
                ],
            )
            .with_common(
                "ngo",
                vec![
                    RequirementEntry::new("Registration Certificate", "certificate", true),
                    RequirementEntry::new("Constitution", "document", true),
                ],
            )
            .with_service(
                "Tax Filing",
                vec![
                    RequirementEntry::new("Tax Clearance Form", "form", true),
                    RequirementEntry::new("Prior Year Returns", "document", false),
                ],
            )
            .with_service(
                "Company Registration",
                vec![
                    // Redefines the company common entry under a weaker
                    // flag; the common entry wins at resolution.
                    RequirementEntry::new("Certificate of Incorporation", "certificate", false),
                    RequirementEntry::new("Director ID Copies", "identification", true),
                    RequirementEntry::new("Registered Office Lease", "document", false),
                ],
            )
            .with_service(
                "Immigration Case",
                vec![
                    RequirementEntry::new("Passport Copy", "identification", true),
                    RequirementEntry::new("Visa History", "document", false),
                    RequirementEntry::new("Police Clearance", "certificate", true),
                ],
            )
            .with_service(
                "Document Management",
                vec![RequirementEntry::new("Records Inventory", "form", false)],
            )
            .with_service(
                "Payroll Support",
                vec![
                    RequirementEntry::new("Employee Register", "form", true),
                    RequirementEntry::new("Prior Year Returns", "document", true),
                ],
            )
            .with_id_pattern("national-id", r"^\d{9}$")
            .with_id_pattern("passport", r"^[A-Z]\d{7}$")
            .with_id_pattern("drivers-licence", r"^\d{6,8}$")
    }

    /// Reference data for the four-step appointment booking. Booking has no
    /// common requirement sets; everything hangs off the chosen services.
    pub fn standard_booking() -> Self {
        Self::new()
            .with_entity_tag("tax_advisory")
            .with_entity_tag("immigration")
            .with_entity_tag("corporate_services")
            .with_service(
                "Tax Consultation",
                vec![RequirementEntry::new("Prior Year Returns", "document", false)],
            )
            .with_service(
                "Visa Application Review",
                vec![
                    RequirementEntry::new("Passport Copy", "identification", true),
                    RequirementEntry::new("Current Visa", "document", false),
                ],
            )
            .with_service(
                "Company Secretarial",
                vec![RequirementEntry::new("Board Resolution", "document", true)],
            )
            .with_id_pattern("national-id", r"^\d{9}$")
            .with_id_pattern("passport", r"^[A-Z]\d{7}$")
    }
}
