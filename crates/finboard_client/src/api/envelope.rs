//! Wire envelopes for the finboard API.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Success envelope: the payload rides in `data`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
    pub page_size: u32,
}

/// List envelope returned whole by `request_paginated`.
#[derive(Debug, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

/// Failure body. The field-error map is keyed deterministically so the
/// flattened notice text is stable.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

pub fn flatten_field_errors(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .values()
        .flatten()
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
