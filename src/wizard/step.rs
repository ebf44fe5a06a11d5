//! Wizard steps — which screen the user is on.

use serde::{Deserialize, Serialize};

/// The steps of the booking flow.
///
/// Progresses linearly: SelectingService → SelectingStaff → SelectingDate →
/// SelectingTime → Confirming → Success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    SelectingService,
    SelectingStaff,
    SelectingDate,
    SelectingTime,
    Confirming,
    Success,
}

impl Step {
    /// All steps in forward order.
    pub const ALL: [Step; 6] = [
        Step::SelectingService,
        Step::SelectingStaff,
        Step::SelectingDate,
        Step::SelectingTime,
        Step::Confirming,
        Step::Success,
    ];

    /// Check if moving from `self` to `target` is a legal transition.
    ///
    /// Forward moves go one step at a time. Backward moves go one step at a
    /// time, except that Success returns to the start. Any step may reset
    /// to the start.
    pub fn can_transition_to(&self, target: Step) -> bool {
        self.next() == Some(target)
            || self.previous() == Some(target)
            || target == Step::SelectingService
    }

    /// The step after this one, if any.
    pub fn next(&self) -> Option<Step> {
        use Step::*;
        match self {
            SelectingService => Some(SelectingStaff),
            SelectingStaff => Some(SelectingDate),
            SelectingDate => Some(SelectingTime),
            SelectingTime => Some(Confirming),
            Confirming => Some(Success),
            Success => None,
        }
    }

    /// Where `back` leads from this step. `None` at the first step.
    pub fn previous(&self) -> Option<Step> {
        use Step::*;
        match self {
            SelectingService => None,
            SelectingStaff => Some(SelectingService),
            SelectingDate => Some(SelectingStaff),
            SelectingTime => Some(SelectingDate),
            Confirming => Some(SelectingTime),
            Success => Some(SelectingService),
        }
    }

    /// Whether the booking has been handed off.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Human-readable title for the step.
    pub fn title(&self) -> &'static str {
        match self {
            Self::SelectingService => "Choose a service",
            Self::SelectingStaff => "Choose a specialist",
            Self::SelectingDate => "Choose a date",
            Self::SelectingTime => "Choose a time",
            Self::Confirming => "Confirm your booking",
            Self::Success => "Booked",
        }
    }

    /// Short lowercase name used in messages, e.g. `the time step`.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::SelectingService => "the service step",
            Self::SelectingStaff => "the specialist step",
            Self::SelectingDate => "the date step",
            Self::SelectingTime => "the time step",
            Self::Confirming => "the confirmation step",
            Self::Success => "the success screen",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::SelectingService => "selecting_service",
            Self::SelectingStaff => "selecting_staff",
            Self::SelectingDate => "selecting_date",
            Self::SelectingTime => "selecting_time",
            Self::Confirming => "confirming",
            Self::Success => "success",
        };
        write!(f, "{s}")
    }
}
