use clientdesk::catalog::Catalog;
use clientdesk::workflows::booking::{self, fields, BookingStep, BOOKING_STEP_COUNT};
use clientdesk::workflows::wizard::{Department, FieldValue, WizardError};

#[test]
fn booking_steps_are_ordered_and_numbered() {
    let ordered = BookingStep::ordered();
    assert_eq!(ordered.len(), BOOKING_STEP_COUNT as usize);
    for (index, step) in ordered.into_iter().enumerate() {
        assert_eq!(step.number() as usize, index + 1);
        assert_eq!(BookingStep::from_number(step.number()), Some(step));
    }
    assert_eq!(BookingStep::from_number(5), None);
}

#[test]
fn a_booking_walks_all_four_steps() {
    let catalog = Catalog::standard_booking();
    let mut session = booking::create_session(Department::Immigration);

    session.toggle_service("Visa Application Review");
    session.advance().expect("service selection is ungated");

    assert_eq!(
        session.advance(),
        Err(WizardError::StepInvalid { step: 2 })
    );
    session.set_field(fields::FULL_NAME, FieldValue::text("Amina Okafor"));
    session.advance().expect("details complete");

    session.set_field(fields::EMAIL, FieldValue::text("amina@okafor.example"));
    session.set_field(fields::PHONE, FieldValue::text("555 010 2030"));
    session.advance().expect("contact complete");
    assert_eq!(session.current_step(), BOOKING_STEP_COUNT);

    // Booking has no common requirement set; only the chosen service's
    // documents appear.
    let requirements = session.requirements(&catalog);
    let names: Vec<&str> = requirements
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["Passport Copy", "Current Visa"]);

    session.confirm_submitted().expect("at review");
    assert!(session.is_done());
}

#[test]
fn toggle_order_never_changes_the_resolved_documents() {
    let catalog = Catalog::standard_booking();

    let mut forward = booking::create_session(Department::TaxAdvisory);
    forward.toggle_service("Tax Consultation");
    forward.toggle_service("Company Secretarial");

    let mut reverse = booking::create_session(Department::TaxAdvisory);
    reverse.toggle_service("Company Secretarial");
    reverse.toggle_service("Tax Consultation");

    assert_eq!(
        forward.requirements(&catalog),
        reverse.requirements(&catalog)
    );
}

#[test]
fn changing_department_keeps_the_visitor_details() {
    let mut session = booking::create_session(Department::TaxAdvisory);
    session.set_field(fields::FULL_NAME, FieldValue::text("Amina Okafor"));

    session.set_entity_tag(Department::Immigration);
    assert_eq!(session.data().text(fields::FULL_NAME), Some("Amina Okafor"));
    assert_eq!(session.entity_tag(), Department::Immigration);
}
