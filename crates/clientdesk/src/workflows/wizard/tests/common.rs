use crate::catalog::Catalog;
use crate::workflows::intake::{self, fields, IntakeFlow};
use crate::workflows::wizard::{EntityType, FieldValue, RequirementEntry, WizardSession};
use chrono::NaiveDate;

pub(super) fn individual_session() -> WizardSession<IntakeFlow> {
    intake::create_session(EntityType::Individual)
}

pub(super) fn company_session() -> WizardSession<IntakeFlow> {
    intake::create_session(EntityType::Company)
}

/// Fill the individual fields through the identification step so the
/// session can walk forward freely.
pub(super) fn fill_individual(session: &mut WizardSession<IntakeFlow>) {
    session.set_field(fields::FIRST_NAME, FieldValue::text("John"));
    session.set_field(fields::SURNAME, FieldValue::text("Doe"));
    session.set_field(fields::EMAIL, FieldValue::text("john@example.com"));
    session.set_field(fields::PHONE, FieldValue::text("555 010 2030"));
    session.set_field(fields::ID_TYPE, FieldValue::text("national-id"));
    session.set_field(fields::ID_NUMBER, FieldValue::text("123456789"));
    session.set_field(
        fields::DATE_OF_BIRTH,
        FieldValue::Date(NaiveDate::from_ymd_opt(1988, 4, 12).expect("valid date")),
    );
}

/// Catalog mirroring the common-vs-service requirement collision the
/// resolver must settle first-wins.
pub(super) fn collision_catalog() -> Catalog {
    Catalog::new()
        .with_common(
            "individual",
            vec![RequirementEntry::new("ID Copy", "identification", true)],
        )
        .with_service(
            "Tax Filing",
            vec![
                RequirementEntry::new("ID Copy", "identification", false),
                RequirementEntry::new("Tax Form", "form", true),
            ],
        )
}
