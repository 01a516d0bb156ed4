//! Domain layer: the data model of the payment proxy and the ports it
//! requires from the outside world.
//!
//! Everything here is transport-agnostic. Storage backends, provider
//! simulators and the CLI plug into the traits defined in [`ports`].

pub mod card;
pub mod client;
pub mod payment;
pub mod ports;
pub mod transaction;
pub mod webhook;
