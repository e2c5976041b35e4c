//! The vacation-accounting engine.
//!
//! This is the one part of the system with real invariants: accrual,
//! carryover, optional-holiday allotment and business-day counting against a
//! lazily-synced holiday calendar. All three adapters (REST, MCP, chat) route
//! through `engine::service` and must get identical answers.
//!
//! `calendar`, `business_days`, `accrual` and `validate` are pure once their
//! inputs are supplied; `service` is the only submodule touching the Ledger.

pub mod accrual;
pub mod business_days;
pub mod calendar;
pub mod service;
pub mod validate;
