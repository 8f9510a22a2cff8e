/// Timeline (Gantt) normalization
///
/// Turns tasks and projects into bars with a definite start, end and
/// progress. Records coming from the API may lack dates or carry strings
/// that do not parse, so every bar is resolved the same way:
///
/// - start: parsed start, else `now`
/// - end: parsed end, else `start + offset`
/// - a record whose end cannot be computed, or falls before its start, is
///   dropped
///
/// The offset is one day for tasks. Projects have no single canonical
/// offset (the board shows both a weekly and a monthly variant), so callers
/// pick one with [`ProjectSpan`].
///
/// All functions are pure: the same input and `now` give the same output.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;
use taskboard_shared::dates::parse_timestamp;
use taskboard_shared::models::{project::Project, task::Task};

/// Progress shown for every project bar
pub const PROJECT_PROGRESS: f64 = 50.0;

/// Task without a due date spans this many days
pub const TASK_DEFAULT_DAYS: i64 = 1;

/// Default length of a project bar without an end date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSpan {
    /// 7 days
    Week,
    /// 30 days
    Month,
    Days(i64),
}

impl ProjectSpan {
    pub fn days(&self) -> i64 {
        match self {
            ProjectSpan::Week => 7,
            ProjectSpan::Month => 30,
            ProjectSpan::Days(days) => *days,
        }
    }
}

/// Which kind of record a bar represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Task,
    Project,
}

/// One timeline bar
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    /// `Task-<id>` or `Project-<id>`
    pub id: String,
    pub name: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,

    /// Percent complete
    pub progress: f64,
    pub kind: EntryKind,
}

/// Task fields the timeline reads, dates still raw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRecord {
    pub id: i32,
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub due_date: Option<String>,
    pub points: Option<i32>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: Some(task.title.clone()),
            start_date: task.start_date.map(format_date),
            due_date: task.due_date.map(format_date),
            points: task.points,
        }
    }
}

/// Project fields the timeline reads, dates still raw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRecord {
    pub id: i32,
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<&Project> for ProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            name: Some(project.name.clone()),
            start_date: project.start_date.map(format_date),
            end_date: project.end_date.map(format_date),
        }
    }
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Resolves a bar's bounds
///
/// `None` when the end overflows the calendar or precedes the start.
fn resolve_span(
    start: Option<&str>,
    end: Option<&str>,
    default_days: i64,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = start.and_then(|s| parse_timestamp(s).ok()).unwrap_or(now);
    let end = match end.and_then(|s| parse_timestamp(s).ok()) {
        Some(end) => end,
        None => start.checked_add_signed(Duration::try_days(default_days)?)?,
    };
    (end >= start).then_some((start, end))
}

fn display_name(name: Option<&str>, fallback: &str) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => fallback.to_string(),
    }
}

/// Builds task bars
///
/// Progress is `points / 10 * 100`; tasks without points show 0.
pub fn task_entries(tasks: &[TaskRecord], now: DateTime<Utc>) -> Vec<TimelineEntry> {
    tasks
        .iter()
        .filter_map(|task| {
            let Some((start, end)) = resolve_span(
                task.start_date.as_deref(),
                task.due_date.as_deref(),
                TASK_DEFAULT_DAYS,
                now,
            ) else {
                tracing::debug!(task_id = task.id, "Dropping task with an invalid date range");
                return None;
            };

            Some(TimelineEntry {
                id: format!("Task-{}", task.id),
                name: display_name(task.title.as_deref(), "Untitled Task"),
                start,
                end,
                progress: f64::from(task.points.unwrap_or(0)) / 10.0 * 100.0,
                kind: EntryKind::Task,
            })
        })
        .collect()
}

/// Builds project bars
pub fn project_entries(
    projects: &[ProjectRecord],
    span: ProjectSpan,
    now: DateTime<Utc>,
) -> Vec<TimelineEntry> {
    projects
        .iter()
        .filter_map(|project| {
            let Some((start, end)) = resolve_span(
                project.start_date.as_deref(),
                project.end_date.as_deref(),
                span.days(),
                now,
            ) else {
                tracing::debug!(project_id = project.id, "Dropping project with an invalid date range");
                return None;
            };

            Some(TimelineEntry {
                id: format!("Project-{}", project.id),
                name: display_name(project.name.as_deref(), "Untitled Project"),
                start,
                end,
                progress: PROJECT_PROGRESS,
                kind: EntryKind::Project,
            })
        })
        .collect()
}
