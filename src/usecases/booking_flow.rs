//! Booking flow state machine. Sequences service -> date/time -> customer
//! details -> confirmation with at-most-one in-flight submission.
//!
//! The flow owns the draft (no ambient globals) and exposes explicit command
//! handlers for whatever UI drives it. Transitions are synchronous with
//! respect to commands; the `Submitting` state serializes duplicate confirm
//! actions.

use crate::domain::availability::legal_starts;
use crate::domain::{
    BookingDraft, BusinessCalendar, ConfirmedBooking, Customer, DomainError, ServiceCatalog,
    ServiceId, Slot, SlotKey,
};
use crate::domain::validation::validate_customer;
use crate::ports::SlotIndexPort;
use crate::usecases::submission::SubmissionService;
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Flow steps, in order. `Submitting` is transient; `Success` is terminal;
/// `Failed` hands control back to the confirmation step for a manual retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    ServiceSelection,
    DateTimeSelection,
    CustomerInfo,
    Confirmation,
    Submitting,
    Success,
    Failed,
}

/// One booking session. Owns the draft, enforces step guards, and drives the
/// submission orchestrator on confirmation.
pub struct BookingFlow {
    state: FlowState,
    draft: BookingDraft,
    /// Booking frozen at the first confirm; reused verbatim on retry so a
    /// failed submission is re-sent unchanged.
    frozen: Option<ConfirmedBooking>,
    catalog: ServiceCatalog,
    calendar: BusinessCalendar,
    step_min: u32,
    /// Earliest bookable date. Past-date policy lives here, not in the
    /// availability engine.
    today: NaiveDate,
    index: Arc<dyn SlotIndexPort>,
    submission: Arc<SubmissionService>,
}

impl BookingFlow {
    pub fn new(
        catalog: ServiceCatalog,
        calendar: BusinessCalendar,
        step_min: u32,
        today: NaiveDate,
        index: Arc<dyn SlotIndexPort>,
        submission: Arc<SubmissionService>,
    ) -> Self {
        Self {
            state: FlowState::ServiceSelection,
            draft: BookingDraft::default(),
            frozen: None,
            catalog,
            calendar,
            step_min,
            today,
            index,
            submission,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn catalog(&self) -> &ServiceCatalog {
        &self.catalog
    }

    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Choose a service. Copies the catalog entry's duration and price into
    /// the draft; later catalog changes never touch this session.
    pub fn select_service(&mut self, id: ServiceId) -> Result<(), DomainError> {
        if self.state != FlowState::ServiceSelection {
            return Err(DomainError::Flow(format!(
                "cannot select a service in {:?}",
                self.state
            )));
        }
        let service = self
            .catalog
            .get(id)
            .ok_or_else(|| DomainError::Flow(format!("unknown service {id:?}")))?;
        self.draft.service = Some(service.clone());
        Ok(())
    }

    /// Pick a date. Does not commit a time: a previously picked start is
    /// dropped, and the day's bookable slots are returned for display.
    pub async fn select_date(&mut self, date: NaiveDate) -> Result<Vec<Slot>, DomainError> {
        if self.state != FlowState::DateTimeSelection {
            return Err(DomainError::Flow(format!(
                "cannot pick a date in {:?}",
                self.state
            )));
        }
        if date < self.today {
            return Err(DomainError::Flow(format!("{date} is in the past")));
        }
        self.draft.date = Some(date);
        self.draft.start_min = None;
        self.available_slots(date).await
    }

    /// Bookable slots for a date: legal starts minus whatever the booked
    /// index already holds. The index is queried per candidate, never
    /// iterated.
    pub async fn available_slots(&self, date: NaiveDate) -> Result<Vec<Slot>, DomainError> {
        let service = self.require_service()?;
        let duration_min = service.duration_min;
        let day = self.calendar.hours_for(date.weekday());

        let mut slots = Vec::new();
        for start_min in legal_starts(day, duration_min, self.step_min) {
            let key = SlotKey { date, start_min };
            if !self.index.is_booked(&key).await? {
                slots.push(Slot {
                    date,
                    start_min,
                    duration_min,
                });
            }
        }
        Ok(slots)
    }

    /// Commit a start time on the picked date.
    pub async fn select_slot(&mut self, start_min: u32) -> Result<(), DomainError> {
        if self.state != FlowState::DateTimeSelection {
            return Err(DomainError::Flow(format!(
                "cannot pick a time in {:?}",
                self.state
            )));
        }
        let date = self
            .draft
            .date
            .ok_or_else(|| DomainError::Flow("pick a date first".into()))?;
        let duration_min = self.require_service()?.duration_min;

        if !self
            .calendar
            .is_legal_window(date.weekday(), start_min, duration_min)
        {
            return Err(DomainError::Flow(format!(
                "{} is not within business hours on {date}",
                crate::domain::clock::format_12h(start_min)
            )));
        }
        let key = SlotKey { date, start_min };
        if self.index.is_booked(&key).await? {
            return Err(DomainError::Flow("that slot was just taken".into()));
        }
        self.draft.start_min = Some(start_min);
        Ok(())
    }

    /// Store validated customer details. All field failures are reported
    /// together; the draft is untouched while any required field is invalid.
    pub fn submit_customer(&mut self, customer: Customer) -> Result<(), DomainError> {
        if self.state != FlowState::CustomerInfo {
            return Err(DomainError::Flow(format!(
                "cannot enter customer details in {:?}",
                self.state
            )));
        }
        let errors = validate_customer(&customer);
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }
        self.draft.customer = Some(customer);
        Ok(())
    }

    /// Advance to the next step if the current step's exit guard holds.
    pub fn next(&mut self) -> Result<FlowState, DomainError> {
        let next = match self.state {
            FlowState::ServiceSelection => {
                self.require_service()?;
                FlowState::DateTimeSelection
            }
            FlowState::DateTimeSelection => {
                if self.draft.date.is_none() || self.draft.start_min.is_none() {
                    return Err(DomainError::Flow("pick a date and a time first".into()));
                }
                FlowState::CustomerInfo
            }
            FlowState::CustomerInfo => {
                if self.draft.customer.is_none() {
                    return Err(DomainError::Flow("enter your details first".into()));
                }
                FlowState::Confirmation
            }
            other => {
                return Err(DomainError::Flow(format!("cannot advance from {other:?}")));
            }
        };
        self.state = next;
        Ok(next)
    }

    /// Step back to the previous step, discarding only the fields of steps
    /// forward of the target (the chosen service survives a return from
    /// customer info, for instance).
    pub fn back(&mut self) -> Result<FlowState, DomainError> {
        let target = match self.state {
            FlowState::DateTimeSelection => {
                self.draft.date = None;
                self.draft.start_min = None;
                self.draft.customer = None;
                self.frozen = None;
                FlowState::ServiceSelection
            }
            FlowState::CustomerInfo => {
                self.draft.customer = None;
                self.frozen = None;
                FlowState::DateTimeSelection
            }
            FlowState::Confirmation | FlowState::Failed => {
                self.frozen = None;
                FlowState::CustomerInfo
            }
            other => {
                return Err(DomainError::Flow(format!("cannot go back from {other:?}")));
            }
        };
        self.state = target;
        Ok(target)
    }

    /// Transition Confirmation -> Submitting and hand out the frozen booking.
    /// A confirm while already Submitting is rejected without a dispatch, so
    /// a double click cannot fan out twice.
    pub fn confirm_requested(&mut self) -> Result<ConfirmedBooking, DomainError> {
        match self.state {
            FlowState::Submitting => {
                return Err(DomainError::Flow("a submission is already in flight".into()));
            }
            FlowState::Confirmation | FlowState::Failed => {}
            other => {
                return Err(DomainError::Flow(format!("cannot confirm from {other:?}")));
            }
        }
        let booking = match &self.frozen {
            // Retry re-sends the identical booking, timestamp included.
            Some(frozen) => frozen.clone(),
            None => {
                let frozen = self.freeze()?;
                self.frozen = Some(frozen.clone());
                frozen
            }
        };
        self.state = FlowState::Submitting;
        Ok(booking)
    }

    /// Record the orchestrator's terminal outcome. Failure re-enables the
    /// confirm action; the frozen booking is kept for the retry.
    pub fn complete_submission(&mut self, success: bool) -> Result<FlowState, DomainError> {
        if self.state != FlowState::Submitting {
            return Err(DomainError::Flow(format!(
                "no submission in flight in {:?}",
                self.state
            )));
        }
        self.state = if success {
            self.frozen = None;
            FlowState::Success
        } else {
            FlowState::Failed
        };
        Ok(self.state)
    }

    /// Confirm the booking: freeze the draft, fan out to both collaborators,
    /// and on full success merge the slot key into the booked index. A
    /// failed or abandoned flow never reserves a slot.
    pub async fn confirm(&mut self) -> Result<(), DomainError> {
        let booking = self.confirm_requested()?;
        let submission = Arc::clone(&self.submission);
        match submission.submit(&booking).await {
            Ok(()) => {
                // An index failure must not leave the flow stuck in
                // Submitting; it takes the same retry path as a collaborator
                // failure.
                if let Err(err) = self.index.mark_booked(booking.slot_key()).await {
                    self.complete_submission(false)?;
                    warn!(error = %err, "slot index update failed, confirm re-enabled");
                    return Err(err);
                }
                self.complete_submission(true)?;
                info!(date = %booking.date, start_min = booking.start_min, "booking confirmed");
                Ok(())
            }
            Err(err) => {
                self.complete_submission(false)?;
                warn!(error = %err, "submission failed, confirm re-enabled");
                Err(err)
            }
        }
    }

    /// Discard the session and start over with an empty draft.
    pub fn reset(&mut self) {
        self.draft = BookingDraft::default();
        self.frozen = None;
        self.state = FlowState::ServiceSelection;
    }

    fn require_service(&self) -> Result<&crate::domain::Service, DomainError> {
        self.draft
            .service
            .as_ref()
            .ok_or_else(|| DomainError::Flow("choose a service first".into()))
    }

    fn freeze(&self) -> Result<ConfirmedBooking, DomainError> {
        let service = self.require_service()?.clone();
        let date = self
            .draft
            .date
            .ok_or_else(|| DomainError::Flow("no date chosen".into()))?;
        let start_min = self
            .draft
            .start_min
            .ok_or_else(|| DomainError::Flow("no time chosen".into()))?;
        let customer = self
            .draft
            .customer
            .clone()
            .ok_or_else(|| DomainError::Flow("no customer details".into()))?;
        Ok(ConfirmedBooking {
            service,
            date,
            start_min,
            customer,
            submitted_at: Utc::now(),
        })
    }
}
