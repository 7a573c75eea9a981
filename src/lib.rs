//! Slab-based electricity billing.
//!
//! A [`tariff::Tariff`] holds the rate tables of every usage category,
//! and a [`engine::BillEngine`] bills single meters or a main meter with its submeters against it.

pub mod engine;
pub mod error;
pub mod quantity;
pub mod tariff;
