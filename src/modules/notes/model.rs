use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A single daily note pinned to a calendar day.
///
/// Field names serialize in camelCase to stay compatible with records the
/// app has already persisted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Calendar day the note belongs to, `YYYY-MM-DD`
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Note {
    /// Whether the note's day falls in the given year and month. Notes with
    /// an unparseable date never match.
    pub fn falls_in_month(&self, year: i32, month: u32) -> bool {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(day) => day.year() == year && day.month() == month,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note_on(date: &str) -> Note {
        Note {
            id: "abc1234".to_string(),
            title: "Coffee chat".to_string(),
            date: date.to_string(),
            time: None,
            location: None,
            description: "Catch-up over coffee".to_string(),
            color: None,
            created_at: "2022-01-10T08:00:00Z".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_month_matching() {
        let note = note_on("2022-01-12");
        assert!(note.falls_in_month(2022, 1));
        assert!(!note.falls_in_month(2022, 2));
        assert!(!note.falls_in_month(2021, 1));
    }

    #[test]
    fn test_unparseable_date_never_matches() {
        let note = note_on("next tuesday");
        assert!(!note.falls_in_month(2022, 1));
    }

    #[test]
    fn test_serializes_with_camel_case_keys() {
        let note = note_on("2022-01-12");
        let json = serde_json::to_string(&note).unwrap();

        assert!(json.contains("\"createdAt\""));
        // Absent optional fields are omitted entirely
        assert!(!json.contains("avatarUrl"));

        let back: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(back, note);
    }
}
