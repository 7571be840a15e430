//! TimeEdit CSV parsing: raw export text in, canonical [`Event`] records out.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use csv::StringRecord;

use crate::error::ImportError;
use crate::event::{Course, Event};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// TimeEdit exports carry three lines of sheet metadata before the header row.
const PREAMBLE_LINES: usize = 3;
/// TimeEdit pads course codes with suffixes; Canvas convention keeps the
/// 6-character base code.
const COURSE_CODE_LEN: usize = 6;

/// Parse a whole export. Rows without a begin date/time are blank separators
/// and are skipped; a timestamp that fails to parse aborts the run.
pub fn parse_events(input: &str, offset_hours: i64) -> Result<Vec<Event>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(skip_preamble(input, PREAMBLE_LINES).as_bytes());
    let headers = reader.headers()?.clone();

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(event) = parse_row(&headers, &record, offset_hours)? {
            events.push(event);
        }
    }
    Ok(events)
}

fn skip_preamble(input: &str, lines: usize) -> &str {
    let mut rest = input;
    for _ in 0..lines {
        match rest.split_once('\n') {
            Some((_, tail)) => rest = tail,
            None => return "",
        }
    }
    rest
}

/// Look a field up by header name. Missing columns count as empty fields.
fn field<'a>(headers: &StringRecord, record: &'a StringRecord, name: &str) -> &'a str {
    headers
        .iter()
        .position(|h| h == name)
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .trim()
}

fn parse_row(
    headers: &StringRecord,
    record: &StringRecord,
    offset_hours: i64,
) -> Result<Option<Event>> {
    let begin_date = field(headers, record, "Begin date");
    let begin_time = field(headers, record, "Begin time");
    if begin_date.is_empty() || begin_time.is_empty() {
        return Ok(None);
    }

    let start = to_utc(begin_date, begin_time, offset_hours)?;
    let end = to_utc(
        field(headers, record, "End date"),
        field(headers, record, "End time"),
        offset_hours,
    )?;

    // Zip to the longer of the two lists: a name past the end of the codes
    // list is kept as a code-less course so the title fallback can use it.
    let codes = split_list(field(headers, record, "Course code"));
    let names = split_list(field(headers, record, "Course name"));
    let pair_count = codes.len().max(names.len());
    let mut codes = codes.into_iter();
    let mut names = names.into_iter();
    let courses = (0..pair_count)
        .map(|_| Course {
            code: codes.next().map(|code| code.chars().take(COURSE_CODE_LEN).collect()),
            name: names.next(),
        })
        .collect();

    Ok(Some(Event {
        start,
        end,
        courses,
        activities: split_list(field(headers, record, "Activity")),
        title: field(headers, record, "Title").to_string(),
        room: field(headers, record, "Room").to_string(),
        class_codes: split_list(field(headers, record, "class code")),
        class_names: split_list(field(headers, record, "Name")),
    }))
}

/// Interpret a naive local `date time` pair and shift it to UTC by the
/// configured fixed offset.
fn to_utc(date: &str, time: &str, offset_hours: i64) -> Result<DateTime<Utc>, ImportError> {
    let text = format!("{date} {time}");
    let local = NaiveDateTime::parse_from_str(&text, DATETIME_FORMAT)
        .map_err(|_| ImportError::MalformedTimestamp(text.clone()))?;
    Ok(Utc.from_utc_datetime(&(local - Duration::hours(offset_hours))))
}

/// Split a comma-separated cell, trimming each entry and dropping empties.
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
