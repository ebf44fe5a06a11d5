//! Render projection — what each step shows.
//!
//! `project` is a pure function of the wizard state. Front-ends draw the
//! resulting `StepView` however they like; the `Display` impl is the plain
//! text form used by the terminal.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::error::InvalidSelection;
use crate::slots;
use crate::wizard::{BookingPayload, BookingReceipt, BookingWizard, Step};

/// One selectable entry on a list screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewOption {
    /// What gets passed back to the wizard when chosen.
    pub value: String,
    pub label: String,
    pub detail: String,
    /// Chosen earlier; drawn highlighted.
    pub selected: bool,
}

/// The screen for the current step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepView {
    Services {
        options: Vec<ViewOption>,
    },
    Staff {
        service: String,
        options: Vec<ViewOption>,
    },
    Dates {
        options: Vec<ViewOption>,
    },
    Times {
        date: String,
        options: Vec<ViewOption>,
    },
    Confirmation {
        summary: BookingPayload,
    },
    Success {
        summary: BookingPayload,
        #[serde(skip_serializing_if = "Option::is_none")]
        booking_id: Option<Uuid>,
    },
}

impl StepView {
    pub fn step(&self) -> Step {
        match self {
            Self::Services { .. } => Step::SelectingService,
            Self::Staff { .. } => Step::SelectingStaff,
            Self::Dates { .. } => Step::SelectingDate,
            Self::Times { .. } => Step::SelectingTime,
            Self::Confirmation { .. } => Step::Confirming,
            Self::Success { .. } => Step::Success,
        }
    }

    /// Selectable entries; empty on the confirmation and success screens.
    pub fn options(&self) -> &[ViewOption] {
        match self {
            Self::Services { options }
            | Self::Staff { options, .. }
            | Self::Dates { options }
            | Self::Times { options, .. } => options.as_slice(),
            Self::Confirmation { .. } | Self::Success { .. } => &[],
        }
    }

    /// Find the option a user typed: its 1-based number, its value, or its
    /// label (case-insensitive).
    pub fn resolve(&self, token: &str) -> Option<&ViewOption> {
        let token = token.trim();
        let options = self.options();
        if let Ok(n) = token.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| options.get(i));
        }
        options
            .iter()
            .find(|o| o.value == token)
            .or_else(|| options.iter().find(|o| o.label.eq_ignore_ascii_case(token)))
    }
}

/// Build the view for the wizard's current step.
///
/// `receipt` is shown on the success screen when given.
pub fn project(
    wizard: &BookingWizard,
    receipt: Option<&BookingReceipt>,
) -> Result<StepView, InvalidSelection> {
    let selection = wizard.selection();
    let catalog = wizard.catalog();

    let view = match wizard.step() {
        Step::SelectingService => StepView::Services {
            options: catalog
                .services()
                .iter()
                .map(|s| ViewOption {
                    value: s.name.clone(),
                    label: s.name.clone(),
                    detail: s.price.to_string(),
                    selected: selection.service.as_deref() == Some(s.name.as_str()),
                })
                .collect(),
        },
        Step::SelectingStaff => StepView::Staff {
            service: selection.service.clone().unwrap_or_default(),
            options: catalog
                .staff_members()
                .iter()
                .map(|m| ViewOption {
                    value: m.name.clone(),
                    label: m.name.clone(),
                    detail: m.specialization.join(", "),
                    selected: selection.staff.as_deref() == Some(m.name.as_str()),
                })
                .collect(),
        },
        Step::SelectingDate => StepView::Dates {
            options: wizard
                .available_dates()
                .map(|d| ViewOption {
                    value: d.format(slots::DATE_FORMAT).to_string(),
                    label: d.format("%a %d").to_string(),
                    detail: d.format("%B").to_string(),
                    selected: selection.date == Some(d),
                })
                .collect(),
        },
        Step::SelectingTime => {
            let date = selection
                .date
                .ok_or(InvalidSelection::Incomplete { missing: "date" })?;
            StepView::Times {
                date: date.format(slots::DATE_FORMAT).to_string(),
                options: wizard
                    .times_on(date)
                    .map(|t| ViewOption {
                        value: slots::format_time(t),
                        label: slots::format_time(t),
                        detail: String::new(),
                        selected: selection.time == Some(t),
                    })
                    .collect(),
            }
        }
        Step::Confirming => StepView::Confirmation {
            summary: wizard.payload()?,
        },
        Step::Success => StepView::Success {
            summary: wizard.payload()?,
            booking_id: receipt.map(|r| r.id),
        },
    };
    Ok(view)
}

impl fmt::Display for StepView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "── {} ──", self.step().title())?;
        match self {
            Self::Staff { service, .. } => writeln!(f, "Service: {service}")?,
            Self::Times { date, .. } => writeln!(f, "Date: {date}")?,
            _ => {}
        }
        match self {
            Self::Confirmation { summary } => {
                write_summary(f, summary)?;
                writeln!(f, "Type 'confirm' to book or 'cancel' to go back.")?;
            }
            Self::Success { summary, booking_id } => {
                writeln!(f, "Booking created!")?;
                writeln!(f, "{}", summary.summary())?;
                if let Some(id) = booking_id {
                    writeln!(f, "ID: {id}")?;
                }
                writeln!(f, "Type 'new' to book again.")?;
            }
            _ => {
                let options = self.options();
                if options.is_empty() {
                    writeln!(f, "(nothing available, type 'back')")?;
                }
                for (i, o) in options.iter().enumerate() {
                    let marker = if o.selected { '*' } else { ' ' };
                    if o.detail.is_empty() {
                        writeln!(f, "{marker}{:>3}. {}", i + 1, o.label)?;
                    } else {
                        writeln!(f, "{marker}{:>3}. {} ({})", i + 1, o.label, o.detail)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn write_summary(f: &mut fmt::Formatter<'_>, p: &BookingPayload) -> fmt::Result {
    writeln!(f, "  Service: {}", p.service)?;
    writeln!(f, "  Staff:   {}", p.staff)?;
    writeln!(f, "  Date:    {}", p.date)?;
    writeln!(f, "  Time:    {}", p.time)?;
    writeln!(f, "  Price:   {}", p.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::bridge::RecordingBridge;
    use crate::catalog::Catalog;
    use crate::config::ScheduleConfig;

    fn wizard() -> BookingWizard {
        let mut c = Catalog::new("Test");
        c.add_service("Haircut", 500).unwrap();
        c.add_service("Shave", 300).unwrap();
        c.add_staff("Alex", ["haircut", "styling"]).unwrap();
        c.add_booked(slots::parse_date("2025-11-18").unwrap(), slots::parse_time("09:00").unwrap());
        BookingWizard::new(
            Arc::new(c),
            ScheduleConfig::default(),
            slots::parse_date("2025-11-17").unwrap(),
        )
    }

    #[test]
    fn services_listed_in_catalog_order() {
        let view = project(&wizard(), None).unwrap();
        let labels: Vec<&str> = view.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["Haircut", "Shave"]);
        assert!(view.options().iter().all(|o| !o.selected));
        assert_eq!(view.options()[1].detail, "300");
    }

    #[test]
    fn earlier_choice_is_highlighted_after_back() {
        let mut w = wizard();
        w.choose_service("Shave").unwrap();
        w.back();
        let view = project(&w, None).unwrap();
        let selected: Vec<&str> = view
            .options()
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(selected, ["Shave"]);
    }

    #[test]
    fn staff_detail_joins_specializations() {
        let mut w = wizard();
        w.choose_service("Haircut").unwrap();
        let view = project(&w, None).unwrap();
        assert_eq!(view.options()[0].detail, "haircut, styling");
        assert!(matches!(view, StepView::Staff { ref service, .. } if service == "Haircut"));
    }

    #[test]
    fn times_view_excludes_booked() {
        let mut w = wizard();
        w.choose_service("Haircut").unwrap();
        w.choose_staff("Alex").unwrap();
        w.choose_date(slots::parse_date("2025-11-18").unwrap()).unwrap();
        let view = project(&w, None).unwrap();
        assert!(view.resolve("09:00").is_none());
        assert_eq!(view.resolve("1").unwrap().value, "08:00");
        assert_eq!(view.resolve("09:30").unwrap().value, "09:30");
    }

    #[test]
    fn resolve_by_number_value_or_label() {
        let view = project(&wizard(), None).unwrap();
        assert_eq!(view.resolve("2").unwrap().value, "Shave");
        assert_eq!(view.resolve("haircut").unwrap().value, "Haircut");
        assert!(view.resolve("0").is_none());
        assert!(view.resolve("3").is_none());
        assert!(view.resolve("Massage").is_none());
    }

    #[test]
    fn date_labels_show_weekday() {
        let mut w = wizard();
        w.choose_service("Haircut").unwrap();
        w.choose_staff("Alex").unwrap();
        let view = project(&w, None).unwrap();
        let first = &view.options()[0];
        assert_eq!(first.value, "2025-11-17");
        assert_eq!(first.label, "Mon 17");
        assert_eq!(view.resolve("2025-11-20").unwrap().label, "Thu 20");
    }

    #[test]
    fn success_view_carries_receipt() {
        let mut w = wizard();
        w.choose_service("Haircut").unwrap();
        w.choose_staff("Alex").unwrap();
        w.choose_date(slots::parse_date("2025-11-20").unwrap()).unwrap();
        w.choose_time(slots::parse_time("09:00").unwrap()).unwrap();

        let confirm_text = project(&w, None).unwrap().to_string();
        assert!(confirm_text.contains("Price:   500"), "{confirm_text}");

        let receipt = w.confirm(&RecordingBridge::new()).unwrap();
        let view = project(&w, Some(&receipt)).unwrap();
        assert!(view.options().is_empty());
        let text = view.to_string();
        assert!(text.contains(&receipt.id.to_string()));
        assert!(text.contains("Haircut with Alex, 2025-11-20 at 09:00"));
    }

    #[test]
    fn text_marks_selected_option() {
        let mut w = wizard();
        w.choose_service("Haircut").unwrap();
        w.back();
        let text = project(&w, None).unwrap().to_string();
        assert!(text.contains("*  1. Haircut (500)"), "{text}");
        assert!(text.contains("   2. Shave (300)"), "{text}");
    }
}
