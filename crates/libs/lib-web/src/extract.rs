//! # Request Extractors

use axum::extract::FromRequest;
use lib_core::AppError;

/// `Json` extractor whose rejection is an [`AppError`], so malformed bodies
/// get the same `{error, code}` envelope as validation failures.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
