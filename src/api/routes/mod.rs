//! API Routes
//!
//! Route handlers organized by functionality.

pub mod correlations;
pub mod health;
pub mod insights;
pub mod weather;
pub mod years;
