//! HTTP client library for the stagegate workflow service.
//!
//! [`WorkflowsApi`](api::WorkflowsApi) is a typed wrapper over the
//! service's `/workflows` REST surface: workflow CRUD, step management,
//! resource assignment, and approval actions. [`auth`] builds a
//! [`reqwest::Client`] that carries the bearer credential so the API
//! wrapper itself never touches authentication.

pub mod api;
pub mod auth;
