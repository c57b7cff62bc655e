//! Type definitions for bookdesk

mod booking;
mod error;
mod page;

pub use booking::*;
pub use error::*;
pub use page::*;
