//! # Domain models for journal entries
//!
//! Defines the records that flow through an [`crate::EntryStore`]. These types are
//! `Serialize + Deserialize` with camelCase field names so that the persisted JSON
//! has the same shape as the documents of the hosted collection.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Entry`] | A stored fragment: the store-assigned `id` and `created_at` plus the writable fields. |
//! | [`EntryFields`] | The writable subset sent on create and update. Updates replace all of it. |
//!
//! ## Helper functions
//!
//! - [`normalize_display_date`]: reduces a legacy ISO timestamp (`2024-06-01T12:00:00Z`)
//!   to its `YYYY-MM-DD` part.
//! - [`is_valid_display_date`]: checks the zero-padded `YYYY-MM-DD` shape that makes
//!   lexicographic order equal chronological order.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder shown when an entry has no image or its image fails to load.
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1455390582262-044cdead277a?q=80&w=1000";

/// A journal entry as stored in the collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque id assigned by the store.
    pub id: String,
    pub title: String,
    /// Body text. Newlines are preserved verbatim.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// User-chosen date in `YYYY-MM-DD` form. This is the sort key.
    pub display_date: String,
    /// Insertion timestamp assigned by the store. Never shown, never edited.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// The fields an author can write.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFields {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub display_date: String,
}

impl Entry {
    /// Build a stored entry from written fields.
    pub fn from_fields(id: String, fields: EntryFields, created_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            title: fields.title,
            content: fields.content,
            image_url: fields.image_url,
            display_date: fields.display_date,
            created_at,
        }
    }

    /// Replace every writable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, fields: EntryFields) {
        self.title = fields.title;
        self.content = fields.content;
        self.image_url = fields.image_url;
        self.display_date = fields.display_date;
    }

    /// Image to render, falling back to `default` when none is set.
    pub fn image_or<'a>(&'a self, default: &'a str) -> &'a str {
        match self.image_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => default,
        }
    }
}

/// Strip a time suffix from a stored date: `"2024-06-01T12:00:00.000Z"` → `"2024-06-01"`.
pub fn normalize_display_date(value: &str) -> &str {
    value.split('T').next().unwrap_or(value).trim()
}

/// Whether `value` is a real calendar date in zero-padded `YYYY-MM-DD` form.
pub fn is_valid_display_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
