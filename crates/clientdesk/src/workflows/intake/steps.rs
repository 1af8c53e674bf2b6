use serde::{Deserialize, Serialize};

/// The five steps of client onboarding, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    BasicInfo,
    Contact,
    Identification,
    Services,
    Review,
}

pub const INTAKE_STEP_COUNT: u8 = 5;

impl IntakeStep {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::BasicInfo,
            Self::Contact,
            Self::Identification,
            Self::Services,
            Self::Review,
        ]
    }

    pub const fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(Self::BasicInfo),
            2 => Some(Self::Contact),
            3 => Some(Self::Identification),
            4 => Some(Self::Services),
            5 => Some(Self::Review),
            _ => None,
        }
    }

    pub const fn number(self) -> u8 {
        match self {
            Self::BasicInfo => 1,
            Self::Contact => 2,
            Self::Identification => 3,
            Self::Services => 4,
            Self::Review => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BasicInfo => "Basic Information",
            Self::Contact => "Contact Details",
            Self::Identification => "Identification",
            Self::Services => "Service Selection",
            Self::Review => "Review & Documents",
        }
    }
}
