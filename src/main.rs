//! Wiring & DI. Entry point: bootstrap adapters, inject into the flow, run UI.
//! No business logic here.

use bookflow::adapters::notify::{MockNotifier, WebhookNotifier};
use bookflow::adapters::persistence::memory::parse_seed;
use bookflow::adapters::persistence::{FormEndpointStore, InMemoryStore};
use bookflow::adapters::ui::TuiBookingPort;
use bookflow::domain::{BookedIndex, BusinessCalendar, ServiceCatalog};
use bookflow::ports::{InputPort, NotifierPort, PersistencePort, SlotIndexPort};
use bookflow::shared::config::AppConfig;
use bookflow::usecases::{BookingFlow, SubmissionService};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = match AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config load failed, falling back to defaults");
            AppConfig::default()
        }
    };

    // --- Booked-slot index (in-memory, optionally seeded for the demo) ---
    let seed: BookedIndex = match cfg.seed_booked.as_deref() {
        Some(list) => parse_seed(list).map_err(|e| anyhow::anyhow!("BOOKFLOW_SEED_BOOKED: {e}"))?,
        None => BookedIndex::new(),
    };
    if !seed.is_empty() {
        info!(count = seed.len(), "seeded booked slots");
    }
    let memory = Arc::new(InMemoryStore::with_seed(seed));
    let index: Arc<dyn SlotIndexPort> = Arc::clone(&memory) as Arc<dyn SlotIndexPort>;

    // --- Persistence collaborator: form endpoint if configured, else memory ---
    let persistence: Arc<dyn PersistencePort> = match cfg.form_url.clone() {
        Some(url) => {
            info!(%url, "persistence: form endpoint");
            Arc::new(FormEndpointStore::new(url))
        }
        None => {
            warn!("BOOKFLOW_FORM_URL not set, bookings are kept in memory only");
            Arc::clone(&memory) as Arc<dyn PersistencePort>
        }
    };

    // --- Notification collaborator: webhook if configured, else mock ---
    let notifier: Arc<dyn NotifierPort> = match cfg.notify_url.clone() {
        Some(url) => {
            info!(%url, "notifier: operator webhook");
            Arc::new(WebhookNotifier::new(url))
        }
        None => {
            warn!("BOOKFLOW_NOTIFY_URL not set, using mock notifier");
            Arc::new(MockNotifier::new())
        }
    };

    let submission = Arc::new(SubmissionService::with_deadline(
        persistence,
        notifier,
        Duration::from_secs(cfg.submit_timeout_secs_or_default()),
    ));

    let today = chrono::Local::now().date_naive();
    let flow = BookingFlow::new(
        ServiceCatalog::default(),
        BusinessCalendar::default(),
        cfg.slot_step_min_or_default(),
        today,
        index,
        submission,
    );

    let input_port: Arc<dyn InputPort> = Arc::new(TuiBookingPort::new(flow));
    input_port.run().await.map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
