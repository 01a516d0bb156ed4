//! Application layer containing the core business logic orchestration.
//!
//! This module defines the [`proxy::PaymentProxy`] which acts as the primary
//! entry point for processing payments, together with the client
//! authenticator and the request validator it sequences.

pub mod auth;
pub mod proxy;
pub mod validation;
