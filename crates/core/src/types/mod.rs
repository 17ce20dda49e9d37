//! Core types for Smart Shipping.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod id;
pub mod journey;
pub mod status;

pub use contact::{ContactError, ContactIdentifier, Email, Phone};
pub use id::*;
pub use journey::{
    FieldKind, JourneyError, JourneyProgress, JourneyStep, STEP_COUNT, StepData, StepField,
};
pub use status::*;
