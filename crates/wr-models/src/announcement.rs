//! Announcement model
//!
//! Table: announcements

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Announcement entity, shown on every dashboard
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub body: String,

    pub author_id: Id,

    pub published_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Announcement {
    pub fn new(title: impl Into<String>, body: impl Into<String>, author_id: Id) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            author_id,
            ..Default::default()
        }
    }
}

impl Identifiable for Announcement {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Announcement {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Announcement {
    const TABLE_NAME: &'static str = "announcements";
    const TYPE_NAME: &'static str = "Announcement";
}
