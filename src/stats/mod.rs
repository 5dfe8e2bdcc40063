//! Stats module - recipient rollups over exported records

mod counts;

pub use counts::{recipient_counts, RecipientCount};
