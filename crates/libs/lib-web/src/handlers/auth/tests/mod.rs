//! # Auth Handler Tests
//!
//! Test suite for authentication handlers (signup and login).


pub(super) use crate::handlers::test_support::{CallCounts, TestApp};
pub(super) use axum::http::{Method, StatusCode};
pub(super) use serde_json::json;
