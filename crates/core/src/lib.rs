//! Core domain types for the stagegate approval-workflow client.
//!
//! Defines the wire DTOs exchanged with the workflow service, the
//! loosely-structured draft types produced by UI code, and the pure
//! shaping logic that turns a draft into a creation payload.

pub mod approval;
pub mod types;
pub mod workflow;
