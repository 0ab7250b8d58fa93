pub mod form_endpoint;
pub mod memory;

pub use form_endpoint::FormEndpointStore;
pub use memory::InMemoryStore;
