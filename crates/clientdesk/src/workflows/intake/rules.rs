use super::fields;
use crate::workflows::wizard::{EntityType, SessionData};

/// Basic info: individuals need a first name and surname of usable length;
/// every other entity type needs a business name instead. No other field
/// may influence this step.
pub(crate) fn basic_info_satisfied(entity_type: EntityType, data: &SessionData) -> bool {
    if entity_type.is_individual() {
        data.text_len(fields::FIRST_NAME) > 1 && data.text_len(fields::SURNAME) > 1
    } else {
        data.text_len(fields::BUSINESS_NAME) > 2
    }
}

/// Contact: the email check is deliberately weak (`contains '@'`). It is
/// the contract existing callers rely on, so it must not be tightened
/// here without flagging the behavior change.
pub(crate) fn contact_satisfied(data: &SessionData) -> bool {
    let email_plausible = data
        .text(fields::EMAIL)
        .map(|email| email.contains('@'))
        .unwrap_or(false);
    email_plausible && data.text_len(fields::PHONE) > 5
}

/// Identification: individuals need a chosen primary-ID type, a number of
/// usable length, and a date of birth. Non-individuals satisfy the step
/// with either government identifier (TIN or registration number).
pub(crate) fn identification_satisfied(entity_type: EntityType, data: &SessionData) -> bool {
    if entity_type.is_individual() {
        data.is_present(fields::ID_TYPE)
            && data.text_len(fields::ID_NUMBER) > 3
            && data.is_present(fields::DATE_OF_BIRTH)
    } else {
        data.text_len(fields::TIN) > 3 || data.text_len(fields::REG_NUMBER) > 3
    }
}
