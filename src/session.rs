//! Booking session — dispatches user commands to the wizard.
//!
//! The session owns the wizard, the platform bridge and the ledger of
//! bookings confirmed so far. Front-ends parse input into `Command`s and
//! draw the `Reply` they get back.

use tracing::{debug, warn};

use crate::bridge::PlatformBridge;
use crate::error::{InvalidSelection, Result};
use crate::ledger::BookingLedger;
use crate::slots;
use crate::view::{self, StepView};
use crate::wizard::{BookingReceipt, BookingWizard, Step};

const HELP: &str = "\
Type the number or name of an option to choose it.
  back      previous step
  reset     start over
  confirm   book it (on the confirmation step)
  cancel    go back from the confirmation step
  new       book again after success
  bookings  list bookings made this session
  stats     totals per specialist
  quit      exit
An option whose name matches a command is chosen instead of the command.";

/// A user action, independent of how it was entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick an option on the current screen.
    Select(String),
    Back,
    Reset,
    Confirm,
    Cancel,
    NewBooking,
    Bookings,
    Stats,
    Help,
    Quit,
}

impl Command {
    /// Parse one line of input. Blank lines yield `None`.
    pub fn parse(input: &str) -> Option<Command> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let command = match trimmed.to_lowercase().as_str() {
            "back" | "b" => Command::Back,
            "reset" | "restart" => Command::Reset,
            "confirm" | "yes" | "y" => Command::Confirm,
            "cancel" | "no" | "n" => Command::Cancel,
            "new" | "new booking" => Command::NewBooking,
            "bookings" | "my" => Command::Bookings,
            "stats" => Command::Stats,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Select(trimmed.to_string()),
        };
        Some(command)
    }
}

/// What the front-end should show after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    View(StepView),
    Text(String),
    Quit,
}

pub struct BookingSession<B: PlatformBridge> {
    wizard: BookingWizard,
    bridge: B,
    ledger: BookingLedger,
    last_receipt: Option<BookingReceipt>,
}

impl<B: PlatformBridge> BookingSession<B> {
    pub fn new(wizard: BookingWizard, bridge: B) -> Self {
        Self {
            wizard,
            bridge,
            ledger: BookingLedger::new(),
            last_receipt: None,
        }
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    /// Parse a line against the current screen.
    ///
    /// Input naming an option on screen selects it even if it is also a
    /// keyword.
    pub fn parse(&self, input: &str) -> Option<Command> {
        let command = Command::parse(input)?;
        if matches!(command, Command::Select(_)) {
            return Some(command);
        }
        let token = input.trim();
        let on_screen = self
            .view()
            .ok()
            .is_some_and(|v| v.options().iter().any(|o| o.label.eq_ignore_ascii_case(token)));
        if on_screen {
            Some(Command::Select(token.to_string()))
        } else {
            Some(command)
        }
    }

    /// Signal the host and return the first screen.
    pub fn start(&mut self) -> Result<Reply> {
        self.bridge.ready();
        self.bridge.expand();
        Ok(Reply::View(self.view()?))
    }

    /// The current screen.
    pub fn view(&self) -> Result<StepView> {
        Ok(view::project(&self.wizard, self.last_receipt.as_ref())?)
    }

    /// Run one command. A rejected command leaves the session unchanged.
    pub fn handle(&mut self, command: Command) -> Result<Reply> {
        debug!(?command, step = %self.wizard.step(), "Handling command");
        let result = self.dispatch(command);
        if let Err(e) = &result {
            warn!(step = %self.wizard.step(), "Command rejected: {}", e);
        }
        result
    }

    fn dispatch(&mut self, command: Command) -> Result<Reply> {
        match command {
            Command::Select(token) => {
                self.select(&token)?;
            }
            Command::Back => {
                if self.wizard.back() == Step::SelectingService {
                    self.last_receipt = None;
                }
            }
            Command::Cancel => {
                if self.wizard.step() != Step::Confirming {
                    return Err(out_of_step("cancel", self.wizard.step()).into());
                }
                self.wizard.back();
            }
            Command::Reset => {
                self.wizard.reset();
                self.last_receipt = None;
            }
            Command::Confirm => {
                let receipt = self.wizard.confirm(&self.bridge)?;
                self.ledger.record(receipt.clone());
                self.last_receipt = Some(receipt);
            }
            Command::NewBooking => {
                self.wizard.new_booking()?;
                self.last_receipt = None;
            }
            Command::Bookings => return Ok(Reply::Text(self.ledger.listing())),
            Command::Stats => return Ok(Reply::Text(self.ledger.report())),
            Command::Help => return Ok(Reply::Text(HELP.to_string())),
            Command::Quit => return Ok(Reply::Quit),
        }
        Ok(Reply::View(self.view()?))
    }

    fn select(&mut self, token: &str) -> std::result::Result<Step, InvalidSelection> {
        let step = self.wizard.step();
        if matches!(step, Step::Confirming | Step::Success) {
            return Err(out_of_step("select an option", step));
        }
        let view = view::project(&self.wizard, None)?;
        let value = view
            .resolve(token)
            .map(|o| o.value.clone())
            .ok_or_else(|| InvalidSelection::UnknownOption {
                token: token.to_string(),
            })?;
        let unknown = || InvalidSelection::UnknownOption {
            token: token.to_string(),
        };

        match step {
            Step::SelectingService => self.wizard.choose_service(&value),
            Step::SelectingStaff => self.wizard.choose_staff(&value),
            Step::SelectingDate => {
                let date = slots::parse_date(&value).ok_or_else(unknown)?;
                self.wizard.choose_date(date)
            }
            Step::SelectingTime => {
                let time = slots::parse_time(&value).ok_or_else(unknown)?;
                self.wizard.choose_time(time)
            }
            Step::Confirming | Step::Success => Err(out_of_step("select an option", step)),
        }
    }
}

fn out_of_step(action: &'static str, current: Step) -> InvalidSelection {
    InvalidSelection::OutOfStep { action, current }
}
