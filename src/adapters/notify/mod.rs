pub mod mock;
pub mod webhook;

pub use mock::MockNotifier;
pub use webhook::WebhookNotifier;
