//! Test Module
//!
//! Test suite for the CareBot backend.
//!
//! ## Test Categories
//! - `sentiment_tests`: keyword heuristic, model fallback, HTTP inference backend
//! - `responder_tests`: reply flows, relax menu, diary rendering
//! - `database_tests`: emotion diary persistence
//! - `supervisor_tests`: dialogue state machine end to end
//! - `transport_tests`: Telegram Bot API client

pub mod transport_tests;
