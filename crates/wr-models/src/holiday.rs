//! Holiday model
//!
//! Table: holidays

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wr_core::traits::{Entity, Id, Identifiable, Timestamped};

/// Company-wide holiday entity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: Option<Id>,

    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub date: NaiveDate,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Holiday {
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            ..Default::default()
        }
    }
}

impl Identifiable for Holiday {
    fn id(&self) -> Option<Id> {
        self.id
    }
}

impl Timestamped for Holiday {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Entity for Holiday {
    const TABLE_NAME: &'static str = "holidays";
    const TYPE_NAME: &'static str = "Holiday";
}
