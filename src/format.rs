//! Pure derivations of the Canvas-facing title, description and location
//! strings from an [`Event`], plus the label translations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::Event;

/// Language for the fixed labels in generated descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Sv,
}

impl Language {
    fn course(self) -> &'static str {
        match self {
            Language::En => "Course",
            Language::Sv => "Kurs",
        }
    }

    fn courses(self) -> &'static str {
        match self {
            Language::En => "Courses",
            Language::Sv => "Kurser",
        }
    }

    fn activity(self) -> &'static str {
        match self {
            Language::En => "Activity",
            Language::Sv => "Aktivitet",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Language::En => "Title",
            Language::Sv => "Titel",
        }
    }

    fn location(self) -> &'static str {
        match self {
            Language::En => "Location",
            Language::Sv => "Plats",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::En => write!(f, "en"),
            Language::Sv => write!(f, "sv"),
        }
    }
}

/// Derive a concise event title. Precedence: activities, then the export's
/// own title, then the first course name, then a generic fallback.
pub fn event_title(event: &Event) -> String {
    if !event.activities.is_empty() {
        return event.activities.join(", ");
    }
    if !event.title.is_empty() {
        return event.title.clone();
    }
    if let Some(name) = event.courses.iter().find_map(|c| c.name.clone()) {
        return truncate_with_ellipsis(&name, 40);
    }
    "Event".to_string()
}

/// Build the `<br>`-separated description. Each block is emitted only when
/// its source data is present; the title block is additionally suppressed
/// when the title already appears verbatim among the activities.
pub fn event_description(event: &Event, language: Language) -> String {
    let mut parts: Vec<String> = Vec::new();

    // The course block is keyed on codes; a course with a name but no code
    // contributes nothing here (it only feeds the title fallback).
    let code_count = event.course_codes().count();
    if code_count > 0 {
        let label = if code_count > 1 {
            language.courses()
        } else {
            language.course()
        };
        parts.push(format!("{label}:<br>"));
        for course in &event.courses {
            let Some(code) = course.code.as_deref() else {
                continue;
            };
            match &course.name {
                Some(name) => parts.push(format!("   {code} - {name}<br>")),
                None => parts.push(format!("   {code}<br>")),
            }
        }
        parts.push("<br>".to_string());
    }

    if !event.activities.is_empty() {
        parts.push(format!(
            "📋 {}: {}<br>",
            language.activity(),
            event.activities.join(", ")
        ));
        parts.push("<br>".to_string());
    }

    if !event.title.is_empty() && !event.activities.contains(&event.title) {
        parts.push(format!("📌 {}: {}<br>", language.title(), event.title));
        parts.push("<br>".to_string());
    }

    if !event.room.is_empty() {
        parts.push(format!("📍 {}: {}<br>", language.location(), event.room));
        parts.push("<br>".to_string());
    }

    parts.concat().trim().to_string()
}

/// The Canvas location field: the room, verbatim.
pub fn event_location(event: &Event) -> &str {
    &event.room
}

/// Shorten to `max` characters, replacing the tail with `...` when over.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Course;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn event() -> Event {
        Event {
            start: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            courses: Vec::new(),
            activities: Vec::new(),
            title: String::new(),
            room: String::new(),
            class_codes: Vec::new(),
            class_names: Vec::new(),
        }
    }

    #[test_case(vec!["Lecture"], "Intro", "Lecture" ; "activities win over title")]
    #[test_case(vec!["Lecture", "Lab"], "", "Lecture, Lab" ; "activities joined")]
    #[test_case(vec![], "Seminar X", "Seminar X" ; "title used when no activities")]
    fn test_title_precedence(activities: Vec<&str>, title: &str, expected: &str) {
        let event = Event {
            activities: activities.into_iter().map(String::from).collect(),
            title: title.to_string(),
            ..event()
        };
        assert_eq!(event_title(&event), expected);
    }

    #[test]
    fn test_title_falls_back_to_course_name_truncated() {
        let event = Event {
            courses: vec![Course {
                code: Some("TDA384".to_string()),
                name: Some(
                    "A very long course name exceeding forty characters total".to_string(),
                ),
            }],
            ..event()
        };
        let title = event_title(&event);
        assert_eq!(title, "A very long course name exceeding for...");
        assert_eq!(title.chars().count(), 40);
    }

    #[test]
    fn test_title_uses_course_name_without_code() {
        let event = Event {
            courses: vec![Course {
                code: None,
                name: Some("Concurrent Programming".to_string()),
            }],
            ..event()
        };
        assert_eq!(event_title(&event), "Concurrent Programming");
        // No codes, so the description has no course block either.
        assert_eq!(event_description(&event, Language::En), "");
    }

    #[test]
    fn test_title_fallback_label() {
        assert_eq!(event_title(&event()), "Event");
    }

    #[test]
    fn test_description_course_block_singular_and_plural() {
        let one = Event {
            courses: vec![Course {
                code: Some("TDA384".to_string()),
                name: Some("Concurrent Programming".to_string()),
            }],
            ..event()
        };
        assert_eq!(
            event_description(&one, Language::En),
            "Course:<br>   TDA384 - Concurrent Programming<br><br>"
        );

        let two = Event {
            courses: vec![
                Course { code: Some("TDA384".to_string()), name: None },
                Course { code: Some("EDA387".to_string()), name: None },
            ],
            ..event()
        };
        assert_eq!(
            event_description(&two, Language::En),
            "Courses:<br>   TDA384<br>   EDA387<br><br>"
        );
    }

    #[test]
    fn test_description_title_block_deduplicated_against_activities() {
        let duplicated = Event {
            activities: vec!["Lecture".to_string()],
            title: "Lecture".to_string(),
            ..event()
        };
        assert!(!event_description(&duplicated, Language::En).contains("Title"));

        let distinct = Event {
            activities: vec!["Lecture".to_string()],
            title: "Intro".to_string(),
            ..event()
        };
        let description = event_description(&distinct, Language::En);
        assert!(description.contains("📌 Title: Intro<br>"));
        assert!(description.contains("📋 Activity: Lecture<br>"));
    }

    #[test]
    fn test_description_swedish_labels() {
        let event = Event {
            activities: vec!["Föreläsning".to_string()],
            room: "EL41".to_string(),
            ..event()
        };
        let description = event_description(&event, Language::Sv);
        assert!(description.contains("📋 Aktivitet: Föreläsning<br>"));
        assert!(description.contains("📍 Plats: EL41<br>"));
    }

    #[test]
    fn test_description_empty_event_is_empty() {
        assert_eq!(event_description(&event(), Language::En), "");
    }

    #[test]
    fn test_formatting_is_pure() {
        let event = Event {
            activities: vec!["Lab".to_string()],
            title: "Setup".to_string(),
            room: "EL41".to_string(),
            ..event()
        };
        assert_eq!(event_title(&event), event_title(&event));
        assert_eq!(
            event_description(&event, Language::En),
            event_description(&event, Language::En)
        );
        assert_eq!(event_location(&event), event_location(&event));
    }

    #[test]
    fn test_location_is_room_or_empty() {
        assert_eq!(event_location(&event()), "");
        let with_room = Event { room: "HB2".to_string(), ..event() };
        assert_eq!(event_location(&with_room), "HB2");
    }
}
