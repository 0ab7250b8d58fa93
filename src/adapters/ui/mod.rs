pub mod tui;

pub use tui::TuiBookingPort;
