//! Forum domain records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::CallerId;

/// Closed set of discussion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForumCategory {
    #[serde(rename = "Teaching Strategies")]
    TeachingStrategies,
    #[serde(rename = "Classroom Management")]
    ClassroomManagement,
    #[serde(rename = "Technology Integration")]
    TechnologyIntegration,
    #[serde(rename = "Subject Specific")]
    SubjectSpecific,
    #[serde(rename = "Professional Development")]
    ProfessionalDevelopment,
    #[serde(rename = "Resources")]
    Resources,
    #[serde(rename = "General Discussion")]
    GeneralDiscussion,
}

impl ForumCategory {
    pub fn name(self) -> &'static str {
        match self {
            ForumCategory::TeachingStrategies => "Teaching Strategies",
            ForumCategory::ClassroomManagement => "Classroom Management",
            ForumCategory::TechnologyIntegration => "Technology Integration",
            ForumCategory::SubjectSpecific => "Subject Specific",
            ForumCategory::ProfessionalDevelopment => "Professional Development",
            ForumCategory::Resources => "Resources",
            ForumCategory::GeneralDiscussion => "General Discussion",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s {
            "Teaching Strategies" => Some(ForumCategory::TeachingStrategies),
            "Classroom Management" => Some(ForumCategory::ClassroomManagement),
            "Technology Integration" => Some(ForumCategory::TechnologyIntegration),
            "Subject Specific" => Some(ForumCategory::SubjectSpecific),
            "Professional Development" => Some(ForumCategory::ProfessionalDevelopment),
            "Resources" => Some(ForumCategory::Resources),
            "General Discussion" => Some(ForumCategory::GeneralDiscussion),
            _ => None,
        }
    }
}

impl std::fmt::Display for ForumCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A comment on a forum post. Appended only; removable only by its own
/// owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub owner: CallerId,
    pub owner_display_name: String,
    pub created_at: DateTime<Utc>,
}

/// A discussion post.
///
/// `likes` and `views` are monotonic counters: views bump on every single
/// read (the owner's included) and likes bump on every like call with no
/// per-caller dedup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForumPost {
    pub id: Uuid,
    /// At most 200 characters.
    pub title: String,
    pub content: String,
    pub category: ForumCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub owner: CallerId,
    pub owner_display_name: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ForumPost {
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_display_name() {
        for cat in [
            ForumCategory::TeachingStrategies,
            ForumCategory::ClassroomManagement,
            ForumCategory::TechnologyIntegration,
            ForumCategory::SubjectSpecific,
            ForumCategory::ProfessionalDevelopment,
            ForumCategory::Resources,
            ForumCategory::GeneralDiscussion,
        ] {
            assert_eq!(ForumCategory::from_name(cat.name()), Some(cat));
        }
        assert_eq!(ForumCategory::from_name("Memes"), None);
    }

    #[test]
    fn category_serializes_as_display_name() {
        let v = serde_json::to_value(ForumCategory::SubjectSpecific).unwrap();
        assert_eq!(v, "Subject Specific");
    }
}
