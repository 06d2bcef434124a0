//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `PaymentController`, the single entry point for
//! the payment lifecycle. Each operation is one read, one external-processor
//! call, and one store write, in that order.

pub mod controller;
