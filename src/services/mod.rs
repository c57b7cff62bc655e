//! Services for booking normalization and listing

pub mod amount;
pub mod bookings;
pub mod duration;
pub mod normalizer;
pub mod status;
pub mod summarizer;
pub mod time_parser;

pub use amount::format_amount;
pub use bookings::BookingsService;
pub use duration::duration;
pub use summarizer::{Participants, Summarizer};
pub use time_parser::to_minutes;
