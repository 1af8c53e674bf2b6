//! Four-step appointment-booking flow, the smaller sibling of intake.

use serde::{Deserialize, Serialize};

use crate::workflows::wizard::{Department, SessionData, WizardFlow, WizardSession};

/// The four steps of booking, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    Service,
    Details,
    Contact,
    Review,
}

pub const BOOKING_STEP_COUNT: u8 = 4;

impl BookingStep {
    pub const fn ordered() -> [Self; 4] {
        [Self::Service, Self::Details, Self::Contact, Self::Review]
    }

    pub const fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(Self::Service),
            2 => Some(Self::Details),
            3 => Some(Self::Contact),
            4 => Some(Self::Review),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::Service => 1,
            Self::Details => 2,
            Self::Contact => 3,
            Self::Review => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Service => "Service Selection",
            Self::Details => "Appointment Details",
            Self::Contact => "Contact Details",
            Self::Review => "Review & Confirm",
        }
    }
}

/// Field names the booking steps read.
pub mod fields {
    pub const FULL_NAME: &str = "full_name";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
}

/// Step rules for booking. Same contact contract as intake; details only
/// need a usable client name, whichever department handles the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFlow;

impl WizardFlow for BookingFlow {
    type Tag = Department;

    fn step_count(&self) -> u8 {
        BOOKING_STEP_COUNT
    }

    fn is_step_valid(&self, step: u8, _tag: Department, data: &SessionData) -> bool {
        match BookingStep::from_number(step) {
            Some(BookingStep::Details) => data.text_len(fields::FULL_NAME) > 1,
            Some(BookingStep::Contact) => {
                let email_plausible = data
                    .text(fields::EMAIL)
                    .map(|email| email.contains('@'))
                    .unwrap_or(false);
                email_plausible && data.text_len(fields::PHONE) > 5
            }
            Some(BookingStep::Service) | Some(BookingStep::Review) => true,
            None => false,
        }
    }
}

/// Fresh booking session at step 1 for the given department.
pub fn create_session(department: Department) -> WizardSession<BookingFlow> {
    WizardSession::new(BookingFlow, department)
}
