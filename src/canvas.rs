//! Canvas calendar API client and the sequential submission loop.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;

use crate::config::Config;
use crate::event::Event;
use crate::format::{self, Language};

const CANVAS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Outcome of one create-request. Transport failures are folded in as a
/// synthetic status 0 so the loop can treat every outcome uniformly.
#[derive(Debug, Clone)]
pub struct SubmissionResult {
    pub status: u16,
    pub body: String,
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        self.status == 201
    }
}

/// Seam between the submission loop and the remote API, so the loop can be
/// exercised without a network.
#[async_trait]
pub trait CalendarApi: Sync {
    async fn create_event(&self, event: &Event) -> SubmissionResult;
}

/// The JSON body of a calendar-event create-request.
pub fn event_payload(event: &Event, context_code: &str, language: Language) -> Value {
    json!({
        "calendar_event": {
            "context_code": context_code,
            "title": format::event_title(event),
            "start_at": event.start.format(CANVAS_TIME_FORMAT).to_string(),
            "end_at": event.end.format(CANVAS_TIME_FORMAT).to_string(),
            "location_name": format::event_location(event),
            "description": format::event_description(event, language),
        }
    })
}

pub struct CanvasClient {
    client: Client,
    endpoint: Url,
    api_token: String,
    context_code: String,
    language: Language,
}

impl CanvasClient {
    pub fn new(config: &Config) -> Result<Self> {
        let endpoint = Url::parse(&format!("{}/calendar_events", config.base_url()))
            .context("Invalid canvas_domain in config")?;
        Ok(Self {
            client: Client::new(),
            endpoint,
            api_token: config.api_token.clone(),
            context_code: config.context_code(),
            language: config.language,
        })
    }
}

#[async_trait]
impl CalendarApi for CanvasClient {
    async fn create_event(&self, event: &Event) -> SubmissionResult {
        let payload = event_payload(event, &self.context_code, self.language);
        debug!("POST {}: {}", self.endpoint, payload);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Authorization", format!("Bearer {}", self.api_token))
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response.text().await.unwrap_or_default();
                SubmissionResult { status, body }
            }
            Err(err) => SubmissionResult { status: 0, body: err.to_string() },
        }
    }
}

/// Submit events one at a time in source order, printing per-event progress.
/// A failed request is reported and counted but never stops the loop.
/// Returns `(success_count, error_count)`.
pub async fn submit_events(api: &dyn CalendarApi, events: &[Event]) -> (usize, usize) {
    let mut success_count = 0;
    let mut error_count = 0;

    for (i, event) in events.iter().enumerate() {
        let title = format::event_title(event);
        let display_title = format::truncate_with_ellipsis(&title, 50);
        println!("[{}/{}] Creating: {}", i + 1, events.len(), display_title);

        let result = api.create_event(event).await;
        if result.is_success() {
            println!("         ✓ Success");
            success_count += 1;
        } else {
            println!("         ✗ Error (Status {})", result.status);
            match serde_json::from_str::<Value>(&result.body) {
                Ok(detail) => println!("         Response: {detail}"),
                Err(_) => println!("         Response: {}", result.body),
            }
            error_count += 1;
        }
        println!();
    }

    (success_count, error_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Course;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct StubApi {
        statuses: Mutex<VecDeque<u16>>,
    }

    impl StubApi {
        fn with_statuses(statuses: &[u16]) -> Self {
            Self { statuses: Mutex::new(statuses.iter().copied().collect()) }
        }
    }

    #[async_trait]
    impl CalendarApi for StubApi {
        async fn create_event(&self, _event: &Event) -> SubmissionResult {
            let status = self
                .statuses
                .lock()
                .unwrap()
                .pop_front()
                .expect("more submissions than stubbed statuses");
            SubmissionResult { status, body: "{}".to_string() }
        }
    }

    fn event() -> Event {
        Event {
            start: Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            courses: vec![Course {
                code: Some("TDA384".to_string()),
                name: Some("Concurrent Programming".to_string()),
            }],
            activities: vec!["Lecture".to_string()],
            title: String::new(),
            room: "HC1".to_string(),
            class_codes: Vec::new(),
            class_names: Vec::new(),
        }
    }

    #[test]
    fn test_payload_shape() {
        let payload = event_payload(&event(), "course_12345", Language::En);
        let calendar_event = &payload["calendar_event"];

        assert_eq!(calendar_event["context_code"], "course_12345");
        assert_eq!(calendar_event["title"], "Lecture");
        assert_eq!(calendar_event["start_at"], "2024-01-15T09:00:00Z");
        assert_eq!(calendar_event["end_at"], "2024-01-15T10:00:00Z");
        assert_eq!(calendar_event["location_name"], "HC1");
        assert!(calendar_event["description"]
            .as_str()
            .unwrap()
            .contains("TDA384 - Concurrent Programming"));
    }

    #[tokio::test]
    async fn test_created_event_counts_as_success() {
        let api = StubApi::with_statuses(&[201]);
        assert_eq!(submit_events(&api, &[event()]).await, (1, 0));
    }

    #[tokio::test]
    async fn test_non_201_counts_as_error() {
        let api = StubApi::with_statuses(&[401]);
        assert_eq!(submit_events(&api, &[event()]).await, (0, 1));
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_loop() {
        let api = StubApi::with_statuses(&[201, 500, 0, 201]);
        let events = vec![event(), event(), event(), event()];
        assert_eq!(submit_events(&api, &events).await, (2, 2));
    }
}
