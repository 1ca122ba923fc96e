//! Subjects group cards under a fixed category.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed set of subject categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectCategory {
    Language,
    Mathematics,
    Science,
    History,
    Geography,
    Arts,
    Technology,
    #[default]
    Other,
}

/// A study subject owning a set of cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: SubjectCategory,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    /// Create a subject with an explicit creation instant.
    #[must_use]
    pub fn new_at(
        name: impl Into<String>,
        category: SubjectCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            category,
            tags: Vec::new(),
            created_at,
        }
    }

    /// Create a subject stamped with the current instant.
    #[must_use]
    pub fn new(name: impl Into<String>, category: SubjectCategory) -> Self {
        Self::new_at(name, category, Utc::now())
    }
}
