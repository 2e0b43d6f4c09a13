//! Core types shared across apidelta facilities
//!
//! - **Schema constants**: canonical field keys and event names used by the
//!   logging facility and the structured error facility

pub mod schema;
