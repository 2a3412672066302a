//! Curriculum document model.
//!
//! # Responsibility
//! - Describe the migrated document: `meta`, `schedule`, `curriculum`.
//! - Nest subjects -> cards -> module tabs -> questions in source order.
//!
//! # Invariants
//! - Field order here is the key order of the written JSON.
//! - `time`/`today` counters are always integers, never null.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Root of a migrated planner document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumDocument {
    /// Opaque export metadata, copied from the legacy root.
    pub meta: Value,
    pub schedule: Schedule,
    pub curriculum: Vec<Subject>,
}

/// Calendar-oriented data that used to live under `home` and the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Countdown entries, copied verbatim.
    pub d_days: Value,
    /// Per-day study log, copied verbatim.
    pub daily_history: Value,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            d_days: Value::Array(Vec::new()),
            daily_history: Value::Object(Map::new()),
        }
    }
}

/// Counters shared by cards, tabs and questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub done: bool,
    /// Accumulated study time.
    pub time: i64,
    /// Whether a timer was running when the export was taken.
    pub is_running: bool,
}

impl Progress {
    pub fn new(done: bool, time: i64, is_running: bool) -> Self {
        Self {
            done,
            time,
            is_running,
        }
    }
}

/// Subject counters. Subjects track a daily total instead of a timer flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProgress {
    pub done: bool,
    pub time: i64,
    /// Time spent on the subject on the export day.
    pub today: i64,
}

impl SubjectProgress {
    pub fn new(done: bool, time: i64, today: i64) -> Self {
        Self { done, time, today }
    }
}

/// One curriculum subject with its study cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Value,
    pub name: Value,
    pub exam_info: Value,
    pub badge: Value,
    pub progress: SubjectProgress,
    pub cards: Vec<Card>,
}

/// A study card; owns its resolved module inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: Value,
    pub title: Value,
    pub scope: Value,
    pub qbox: Value,
    pub progress: Progress,
    pub module: CardModule,
}

/// Module embedded in a card.
///
/// `id` falls back to the card's module reference when the module record
/// could not be resolved or carries no id of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardModule {
    pub id: Value,
    pub active_tab: Value,
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub id: Value,
    pub label: Value,
    pub theory_note: Value,
    pub progress: Progress,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: Value,
    pub src: Value,
    pub text: Value,
    pub user_note: Value,
    pub progress: Progress,
}

#[cfg(test)]
mod tests {
    use super::{CardModule, Progress, Question, Schedule, SubjectProgress};
    use serde_json::{json, Value};

    #[test]
    fn progress_serializes_camel_case_keys_in_order() {
        let value = serde_json::to_value(Progress::new(true, 42, false)).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["done", "time", "isRunning"]);
        assert_eq!(value["time"], 42);
    }

    #[test]
    fn subject_progress_uses_today_counter() {
        let value = serde_json::to_value(SubjectProgress::new(false, 10, 3)).unwrap();
        assert_eq!(value, json!({"done": false, "time": 10, "today": 3}));
    }

    #[test]
    fn question_keeps_field_order() {
        let question = Question {
            id: json!("q1"),
            src: json!(""),
            text: json!(""),
            user_note: json!(""),
            progress: Progress::default(),
        };
        let rendered = serde_json::to_string(&question).unwrap();
        assert_eq!(
            rendered,
            r#"{"id":"q1","src":"","text":"","userNote":"","progress":{"done":false,"time":0,"isRunning":false}}"#
        );
    }

    #[test]
    fn card_module_renames_active_tab() {
        let module = CardModule {
            id: Value::Null,
            active_tab: json!("t1"),
            tabs: Vec::new(),
        };
        let value = serde_json::to_value(module).unwrap();
        assert_eq!(value, json!({"id": null, "activeTab": "t1", "tabs": []}));
    }

    #[test]
    fn default_schedule_is_empty() {
        let value = serde_json::to_value(Schedule::default()).unwrap();
        assert_eq!(value, json!({"dDays": [], "dailyHistory": {}}));
    }
}
