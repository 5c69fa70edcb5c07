//! # Post Data Transfer Objects
//!
//! `authorId` arrives as raw JSON so that both `3` and `"3"` are accepted and
//! anything else is a validation error rather than an extractor rejection.

use super::double_option;
use crate::model::Post;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostCreateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(rename = "authorId", default, skip_serializing_if = "Option::is_none")]
    pub author_id: Option<Value>,
}

/// Partial post update; same tri-state fields as the user update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PostUpdateRequest {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    #[serde(
        rename = "authorId",
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub author_id: Option<Option<Value>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostResponse {
    pub message: String,
    pub post: Post,
}
