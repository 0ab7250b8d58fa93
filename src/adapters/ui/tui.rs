//! Implements InputPort. Inquire-based interactive booking prompts.
//!
//! Pure presentation: every decision is delegated to the flow's command
//! handlers, and every guard violation comes back as a printable error.

use crate::domain::clock::format_12h;
use crate::domain::{Customer, DomainError, ServiceId, Slot};
use crate::ports::InputPort;
use crate::usecases::{BookingFlow, FlowState};
use async_trait::async_trait;
use chrono::NaiveDate;
use inquire::{Confirm, Select, Text};
use tokio::sync::Mutex;

fn prompt_err(e: inquire::InquireError) -> DomainError {
    DomainError::Flow(e.to_string())
}

/// TUI adapter. Owns the flow for the duration of one session.
pub struct TuiBookingPort {
    flow: Mutex<BookingFlow>,
}

impl TuiBookingPort {
    pub fn new(flow: BookingFlow) -> Self {
        Self {
            flow: Mutex::new(flow),
        }
    }

    async fn step_service(&self, flow: &mut BookingFlow) -> Result<(), DomainError> {
        let options: Vec<String> = flow
            .catalog()
            .all()
            .iter()
            .map(|s| format!("{} ({} min, ₹{})", s.name, s.duration_min, s.price))
            .collect();
        let picked = Select::new("Which consultation would you like?", options.clone())
            .prompt()
            .map_err(prompt_err)?;
        let idx = options.iter().position(|o| *o == picked).unwrap_or(0);
        let id: ServiceId = flow.catalog().all()[idx].id;
        flow.select_service(id)?;
        flow.next()?;
        Ok(())
    }

    async fn step_date_time(&self, flow: &mut BookingFlow) -> Result<(), DomainError> {
        loop {
            let raw = Text::new("Date (YYYY-MM-DD, or 'back'):")
                .prompt()
                .map_err(prompt_err)?;
            if raw.trim().eq_ignore_ascii_case("back") {
                flow.back()?;
                return Ok(());
            }
            let date = match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
                Ok(d) => d,
                Err(e) => {
                    println!("That is not a date: {e}");
                    continue;
                }
            };

            let slots = match flow.select_date(date).await {
                Ok(slots) => slots,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            };
            if flow.calendar().is_closed_on(date) {
                println!("The office is closed that day. Please pick another date.");
                continue;
            }
            if slots.is_empty() {
                println!("No available slots for this date. Please pick another date.");
                continue;
            }

            let times: Vec<String> = slots
                .iter()
                .map(|s: &Slot| format_12h(s.start_min))
                .collect();
            let picked = Select::new("Available times:", times.clone())
                .prompt()
                .map_err(prompt_err)?;
            let idx = times.iter().position(|t| *t == picked).unwrap_or(0);
            flow.select_slot(slots[idx].start_min).await?;
            flow.next()?;
            return Ok(());
        }
    }

    async fn step_customer(&self, flow: &mut BookingFlow) -> Result<(), DomainError> {
        loop {
            let customer = Customer {
                first_name: Text::new("First name:").prompt().map_err(prompt_err)?,
                last_name: Text::new("Last name:").prompt().map_err(prompt_err)?,
                email: Text::new("Email:").prompt().map_err(prompt_err)?,
                phone: Text::new("Phone:").prompt().map_err(prompt_err)?,
                company: optional(
                    Text::new("Company (optional):")
                        .prompt()
                        .map_err(prompt_err)?,
                ),
                project_type: optional(
                    Text::new("Project type (optional):")
                        .prompt()
                        .map_err(prompt_err)?,
                ),
                budget: optional(
                    Text::new("Budget range (optional):")
                        .prompt()
                        .map_err(prompt_err)?,
                ),
                timeline: optional(
                    Text::new("Timeline (optional):")
                        .prompt()
                        .map_err(prompt_err)?,
                ),
                details: optional(
                    Text::new("Project details (optional):")
                        .prompt()
                        .map_err(prompt_err)?,
                ),
                special_requests: optional(
                    Text::new("Special requests (optional):")
                        .prompt()
                        .map_err(prompt_err)?,
                ),
                newsletter_opt_in: Confirm::new("Subscribe to the newsletter?")
                    .with_default(false)
                    .prompt()
                    .map_err(prompt_err)?,
            };

            match flow.submit_customer(customer) {
                Ok(()) => {
                    flow.next()?;
                    return Ok(());
                }
                Err(DomainError::Validation(errors)) => {
                    for e in errors {
                        println!("  {}: {}", e.field, e.message);
                    }
                    println!("Please correct the fields above.");
                }
                Err(other) => return Err(other),
            }
        }
    }

    /// Returns true when the session is over (cancelled).
    async fn step_confirmation(&self, flow: &mut BookingFlow) -> Result<bool, DomainError> {
        print_summary(flow);
        let confirm_label = if flow.state() == FlowState::Failed {
            "Retry submission"
        } else {
            "Confirm booking"
        };
        let options = vec![confirm_label, "Go back", "Cancel booking"];
        let choice = Select::new("Ready?", options).prompt().map_err(prompt_err)?;

        match choice {
            "Go back" => {
                flow.back()?;
                Ok(false)
            }
            "Cancel booking" => {
                flow.reset();
                println!("Booking cancelled.");
                Ok(true)
            }
            _ => match flow.confirm().await {
                Ok(()) => Ok(false),
                Err(e) => {
                    println!(
                        "Sorry, there was an error confirming your booking: {e}. You can retry."
                    );
                    Ok(false)
                }
            },
        }
    }
}

fn optional(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn print_summary(flow: &BookingFlow) {
    let draft = flow.draft();
    println!("\n--- Booking summary ---");
    if let Some(service) = &draft.service {
        println!(
            "Service:  {} ({} min, ₹{})",
            service.name, service.duration_min, service.price
        );
    }
    if let Some(date) = draft.date {
        println!("Date:     {}", date.format("%A, %-d %B %Y"));
    }
    if let Some(start) = draft.start_min {
        println!("Time:     {}", format_12h(start));
    }
    if let Some(customer) = &draft.customer {
        println!("Name:     {}", customer.full_name());
        println!("Email:    {}", customer.email);
        println!("Phone:    {}", customer.phone);
    }
    println!("-----------------------\n");
}

#[async_trait]
impl InputPort for TuiBookingPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut flow = self.flow.lock().await;
        loop {
            match flow.state() {
                FlowState::ServiceSelection => self.step_service(&mut flow).await?,
                FlowState::DateTimeSelection => self.step_date_time(&mut flow).await?,
                FlowState::CustomerInfo => self.step_customer(&mut flow).await?,
                FlowState::Confirmation | FlowState::Failed => {
                    if self.step_confirmation(&mut flow).await? {
                        return Ok(());
                    }
                }
                FlowState::Submitting => {
                    // confirm() resolves the submission before returning;
                    // nothing to prompt here.
                }
                FlowState::Success => {
                    let date = flow.draft().date;
                    let start = flow.draft().start_min;
                    match (date, start) {
                        (Some(d), Some(m)) => println!(
                            "Your appointment is booked for {} at {}.",
                            d.format("%A, %-d %B %Y"),
                            format_12h(m)
                        ),
                        _ => println!("Your appointment is booked."),
                    }
                    return Ok(());
                }
            }
        }
    }
}
