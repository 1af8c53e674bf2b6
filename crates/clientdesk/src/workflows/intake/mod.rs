//! Five-step client-onboarding intake flow.

mod rules;
mod steps;

use crate::workflows::wizard::{EntityType, SessionData, WizardFlow, WizardSession};

pub use steps::{IntakeStep, INTAKE_STEP_COUNT};

/// Field names the intake steps read. Callers write these via `set_field`.
pub mod fields {
    pub const FIRST_NAME: &str = "first_name";
    pub const SURNAME: &str = "surname";
    pub const BUSINESS_NAME: &str = "business_name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const ID_TYPE: &str = "id_type";
    pub const ID_NUMBER: &str = "id_number";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const TIN: &str = "tin";
    pub const REG_NUMBER: &str = "reg_number";
}

/// Fields whose meaning is tied to the entity type; switching between
/// individual and organizational variants clears them.
const TAG_DEPENDENT_FIELDS: &[&str] = &[
    fields::FIRST_NAME,
    fields::SURNAME,
    fields::BUSINESS_NAME,
    fields::ID_TYPE,
    fields::ID_NUMBER,
    fields::DATE_OF_BIRTH,
    fields::TIN,
    fields::REG_NUMBER,
];

/// Step rules for intake. Stateless; one value serves every session.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeFlow;

impl WizardFlow for IntakeFlow {
    type Tag = EntityType;

    fn step_count(&self) -> u8 {
        INTAKE_STEP_COUNT
    }

    fn is_step_valid(&self, step: u8, tag: EntityType, data: &SessionData) -> bool {
        match IntakeStep::from_number(step) {
            Some(IntakeStep::BasicInfo) => rules::basic_info_satisfied(tag, data),
            Some(IntakeStep::Contact) => rules::contact_satisfied(data),
            Some(IntakeStep::Identification) => rules::identification_satisfied(tag, data),
            // Service selection and review carry no blocking requirement;
            // document upload may finish after the entity is created.
            Some(IntakeStep::Services) | Some(IntakeStep::Review) => true,
            None => false,
        }
    }

    fn tag_dependent_fields(&self) -> &'static [&'static str] {
        TAG_DEPENDENT_FIELDS
    }
}

/// Fresh intake session at step 1 for the given entity type.
pub fn create_session(entity_type: EntityType) -> WizardSession<IntakeFlow> {
    WizardSession::new(IntakeFlow, entity_type)
}
