//! Submission orchestrator: fan-out of a finalized booking.
//!
//! - Builds the flat record for the persistence collaborator and the
//!   formatted message for the operator notifier
//! - Dispatches both concurrently and joins both results
//! - Either failure fails the whole submission; no compensation is attempted
//!   for a persisted-but-unnotified booking (retry may duplicate downstream)

use crate::domain::{BookingRecord, ConfirmedBooking, DomainError};
use crate::ports::{NotifierPort, PersistencePort};
use crate::domain::clock::format_12h;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Default per-collaborator deadline. The upstream design had none and could
/// hang in the submitting state forever; here each call is bounded.
pub const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

const NOT_SPECIFIED: &str = "Not specified";

/// Orchestrates the two-way dispatch on confirmation.
pub struct SubmissionService {
    persistence: Arc<dyn PersistencePort>,
    notifier: Arc<dyn NotifierPort>,
    deadline: Duration,
}

impl SubmissionService {
    pub fn new(persistence: Arc<dyn PersistencePort>, notifier: Arc<dyn NotifierPort>) -> Self {
        Self::with_deadline(persistence, notifier, DEFAULT_SUBMIT_TIMEOUT)
    }

    pub fn with_deadline(
        persistence: Arc<dyn PersistencePort>,
        notifier: Arc<dyn NotifierPort>,
        deadline: Duration,
    ) -> Self {
        Self {
            persistence,
            notifier,
            deadline,
        }
    }

    /// Dispatch the booking to both collaborators concurrently and await
    /// both. Success only when both succeed. Neither call is cancelled when
    /// the other fails; failures are joined, the persistence error reported
    /// first.
    pub async fn submit(&self, booking: &ConfirmedBooking) -> Result<(), DomainError> {
        let record = build_record(booking);
        let message = operator_message(booking);

        let persist = async {
            timeout(self.deadline, self.persistence.record(&record))
                .await
                .map_err(|_| DomainError::Timeout("persistence collaborator".into()))?
        };
        let notify = async {
            timeout(self.deadline, self.notifier.notify_operator(&message))
                .await
                .map_err(|_| DomainError::Timeout("notification collaborator".into()))?
        };

        let (persisted, notified) = tokio::join!(persist, notify);

        match (persisted, notified) {
            (Ok(()), Ok(())) => {
                info!(
                    date = %booking.date,
                    start = %format_12h(booking.start_min),
                    service = %booking.service.name,
                    "booking submitted"
                );
                Ok(())
            }
            (Err(p), Err(n)) => {
                warn!(persistence = %p, notify = %n, "both collaborators failed");
                Err(p)
            }
            (Err(p), Ok(())) => {
                warn!(error = %p, "persistence failed, operator was notified");
                Err(p)
            }
            (Ok(()), Err(n)) => {
                // The record is already persisted and is not retracted; a
                // user-initiated retry may create a duplicate downstream.
                warn!(error = %n, "notification failed after persistence succeeded");
                Err(n)
            }
        }
    }
}

/// Flat named fields for the persistence collaborator.
pub fn build_record(booking: &ConfirmedBooking) -> BookingRecord {
    let customer = &booking.customer;
    let or_unspecified =
        |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());

    BookingRecord {
        service: booking.service.name.clone(),
        date: booking.date.format("%d/%m/%Y").to_string(),
        time: format_12h(booking.start_min),
        duration: format!("{} minutes", booking.service.duration_min),
        price: format!("₹{}", booking.service.price),
        client_name: customer.full_name(),
        email: customer.email.clone(),
        phone: customer.phone.clone(),
        project_type: or_unspecified(&customer.project_type),
        budget: or_unspecified(&customer.budget),
        timeline: or_unspecified(&customer.timeline),
        message: customer
            .details
            .clone()
            .unwrap_or_else(|| "No additional message".to_string()),
        submitted_at: booking.submitted_at.to_rfc3339(),
    }
}

/// Human-readable operator message for the notification collaborator.
pub fn operator_message(booking: &ConfirmedBooking) -> String {
    let customer = &booking.customer;
    let unspecified = NOT_SPECIFIED.to_string();
    format!(
        "NEW APPOINTMENT BOOKING\n\
         \n\
         Service: {service}\n\
         Date: {date}\n\
         Time: {time}\n\
         Duration: {duration} minutes\n\
         Consultation Fee: ₹{price}\n\
         \n\
         Client: {name}\n\
         Phone: {phone}\n\
         Email: {email}\n\
         \n\
         Project Type: {project_type}\n\
         Budget: {budget}\n\
         Timeline: {timeline}\n\
         \n\
         Message: {message}\n\
         \n\
         Booked at: {booked_at}\n\
         \n\
         Please confirm this appointment with the client.",
        service = booking.service.name,
        date = booking.date.format("%A, %-d %B %Y"),
        time = format_12h(booking.start_min),
        duration = booking.service.duration_min,
        price = booking.service.price,
        name = customer.full_name(),
        phone = customer.phone,
        email = customer.email,
        project_type = customer.project_type.as_ref().unwrap_or(&unspecified),
        budget = customer.budget.as_ref().unwrap_or(&unspecified),
        timeline = customer.timeline.as_ref().unwrap_or(&unspecified),
        message = customer
            .details
            .as_deref()
            .unwrap_or("No additional message"),
        booked_at = booking.submitted_at.to_rfc3339(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Customer, Service, ServiceId};
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn booking() -> ConfirmedBooking {
        ConfirmedBooking {
            service: Service {
                id: ServiceId::Interior,
                name: "Interior Design Consultation".into(),
                duration_min: 60,
                price: 200,
            },
            date: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            start_min: 870,
            customer: Customer {
                first_name: "Asha".into(),
                last_name: "Patel".into(),
                email: "asha@example.com".into(),
                phone: "+919913448866".into(),
                ..Customer::default()
            },
            submitted_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    struct StubStore {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl StubStore {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                delay: Duration::ZERO,
            }
        }
    }

    #[async_trait::async_trait]
    impl PersistencePort for StubStore {
        async fn record(&self, _record: &BookingRecord) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                Err(DomainError::Persistence("stub down".into()))
            } else {
                Ok(())
            }
        }
    }

    struct StubNotifier {
        calls: AtomicUsize,
        fail: bool,
        delay: Duration,
    }

    impl StubNotifier {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
                delay: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::ok()
            }
        }
    }

    #[async_trait::async_trait]
    impl NotifierPort for StubNotifier {
        async fn notify_operator(&self, _message: &str) -> Result<(), DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if self.fail {
                Err(DomainError::Notify("stub down".into()))
            } else {
                Ok(())
            }
        }
    }

    #[tokio::test]
    async fn both_collaborators_are_dispatched_and_joined() {
        let store = Arc::new(StubStore::ok());
        let notifier = Arc::new(StubNotifier::ok());
        let service = SubmissionService::new(store.clone(), notifier.clone());

        service.submit(&booking()).await.unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn notification_failure_fails_the_submission() {
        let store = Arc::new(StubStore::ok());
        let notifier = Arc::new(StubNotifier::failing());
        let service = SubmissionService::new(store.clone(), notifier);

        let err = service.submit(&booking()).await.unwrap_err();
        assert!(matches!(err, DomainError::Notify(_)));
        // Persistence already ran and is not retracted.
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn persistence_error_is_reported_first_when_both_fail() {
        let store = Arc::new(StubStore {
            fail: true,
            ..StubStore::ok()
        });
        let notifier = Arc::new(StubNotifier::failing());
        let service = SubmissionService::new(store, notifier);

        let err = service.submit(&booking()).await.unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_collaborator_hits_the_deadline() {
        let store = Arc::new(StubStore {
            delay: Duration::from_secs(120),
            ..StubStore::ok()
        });
        let notifier = Arc::new(StubNotifier::ok());
        let service =
            SubmissionService::with_deadline(store, notifier, Duration::from_secs(5));

        let err = service.submit(&booking()).await.unwrap_err();
        assert!(matches!(err, DomainError::Timeout(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn dispatches_run_concurrently() {
        let store = Arc::new(StubStore {
            delay: Duration::from_secs(10),
            ..StubStore::ok()
        });
        let notifier = Arc::new(StubNotifier {
            delay: Duration::from_secs(10),
            ..StubNotifier::ok()
        });
        let service = SubmissionService::new(store, notifier);

        let started = tokio::time::Instant::now();
        service.submit(&booking()).await.unwrap();
        // Sequential dispatch would take 20s of virtual time.
        assert!(started.elapsed() < Duration::from_secs(15));
    }

    #[test]
    fn record_fills_unspecified_fields() {
        let record = build_record(&booking());
        assert_eq!(record.date, "02/03/2026");
        assert_eq!(record.time, "2:30 PM");
        assert_eq!(record.duration, "60 minutes");
        assert_eq!(record.price, "₹200");
        assert_eq!(record.client_name, "Asha Patel");
        assert_eq!(record.project_type, "Not specified");
        assert_eq!(record.message, "No additional message");
    }

    #[test]
    fn operator_message_carries_the_essentials() {
        let message = operator_message(&booking());
        assert!(message.contains("Interior Design Consultation"));
        assert!(message.contains("Monday, 2 March 2026"));
        assert!(message.contains("2:30 PM"));
        assert!(message.contains("Asha Patel"));
        assert!(message.contains("+919913448866"));
    }
}
