//! Announcement domain model.
//!
//! Field names on the wire and in the backing CSV file are the Spanish ones
//! the board has always used (`titulo`, `descripcion`, `fecha`).

use serde::{Deserialize, Serialize};

/// Integer identifier of an announcement.
pub type AnnouncementId = i64;

/// A titled, dated text record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Announcement {
    pub id: AnnouncementId,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fecha")]
    pub date: String,
}

impl Announcement {
    /// Build a record from a draft and an assigned id.
    pub fn from_draft(id: AnnouncementId, draft: AnnouncementDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            date: draft.date,
        }
    }

    /// Overwrite the mutable fields, keeping the id.
    pub fn apply(&mut self, draft: AnnouncementDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.date = draft.date;
    }
}

/// The mutable part of an announcement, as sent by clients on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AnnouncementDraft {
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "fecha")]
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> AnnouncementDraft {
        AnnouncementDraft {
            title: title.into(),
            description: "desc".into(),
            date: "2024-01-01".into(),
        }
    }

    #[test]
    fn serializes_with_spanish_field_names() {
        let a = Announcement::from_draft(3, draft("A"));
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "titulo": "A",
                "descripcion": "desc",
                "fecha": "2024-01-01"
            })
        );
    }

    #[test]
    fn apply_keeps_id() {
        let mut a = Announcement::from_draft(5, draft("old"));
        a.apply(draft("new"));
        assert_eq!(a.id, 5);
        assert_eq!(a.title, "new");
    }

    #[test]
    fn draft_parses_request_body() {
        let d: AnnouncementDraft = serde_json::from_str(
            r#"{"titulo": "T", "descripcion": "D", "fecha": "2024-02-02"}"#,
        )
        .unwrap();
        assert_eq!(d.title, "T");
        assert_eq!(d.date, "2024-02-02");
    }
}
