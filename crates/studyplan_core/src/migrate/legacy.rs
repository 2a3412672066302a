//! Legacy document walk.
//!
//! Subjects come from `home.subjects`, their cards from
//! `details[subject.id].cards`, and each card's tabs from
//! `modules[card.module].tabs`.

use super::access::{is_truthy, Record};
use super::{MigrateResult, MigrationReport};
use crate::model::curriculum::{
    Card, CardModule, CurriculumDocument, Progress, Question, Schedule, Subject, SubjectProgress,
    Tab,
};
use log::debug;
use serde_json::{Map, Value};

/// Converts a legacy document root into the curriculum model.
///
/// # Errors
/// - Returns `MigrateError::Shape` when a structural field (`home`,
///   `details`, `modules`, `subjects`, `cards`, `tabs`, `questions` or one of
///   their elements) has the wrong container type.
pub fn convert_legacy(
    source: &Map<String, Value>,
) -> MigrateResult<(CurriculumDocument, MigrationReport)> {
    let root = Record::root(source);
    let home = root.object("home")?;
    let details = root.object("details")?;
    let modules = root.object("modules")?;

    let mut report = MigrationReport::default();
    let mut curriculum = Vec::new();
    for subject in home.records("subjects")? {
        let subject_id = subject.id("id");
        if !is_truthy(&subject_id) {
            report.skipped_subjects += 1;
            debug!(
                "event=subject_skipped module=migrate reason=missing_id path={}",
                subject.path()
            );
            continue;
        }

        let detail = details.entry_or_empty(&subject_id)?;
        let mut cards = Vec::new();
        for card in detail.records("cards")? {
            cards.push(convert_card(&card, &modules, &mut report)?);
        }

        curriculum.push(Subject {
            id: subject_id,
            name: subject.text("name"),
            exam_info: subject.text("examInfo"),
            badge: subject.text("badge"),
            progress: SubjectProgress::new(
                subject.flag("done"),
                subject.count("time"),
                subject.count("today"),
            ),
            cards,
        });
        report.subjects += 1;
    }

    let schedule_defaults = Schedule::default();
    let document = CurriculumDocument {
        meta: root.passthrough("meta", Value::Object(Map::new())),
        schedule: Schedule {
            d_days: home.passthrough_truthy("dDays", schedule_defaults.d_days),
            daily_history: root
                .passthrough_truthy("dailyHistory", schedule_defaults.daily_history),
        },
        curriculum,
    };
    Ok((document, report))
}

fn convert_card(
    card: &Record<'_>,
    modules: &Record<'_>,
    report: &mut MigrationReport,
) -> MigrateResult<Card> {
    let module_ref = card.id("module");
    let resolved = if is_truthy(&module_ref) {
        let resolved = modules.entry(&module_ref)?;
        if resolved.is_none() {
            report.unresolved_modules += 1;
            debug!(
                "event=module_unresolved module=migrate path={}",
                card.path()
            );
        }
        resolved
    } else {
        None
    };

    let module = match resolved {
        Some(module) => {
            let mut tabs = Vec::new();
            for tab in module.records("tabs")? {
                tabs.push(convert_tab(&tab, report)?);
            }
            CardModule {
                id: if module.has("id") {
                    module.id("id")
                } else {
                    module_ref
                },
                active_tab: module.text("activeTab"),
                tabs,
            }
        }
        None => CardModule {
            id: module_ref,
            active_tab: Value::String(String::new()),
            tabs: Vec::new(),
        },
    };

    report.cards += 1;
    Ok(Card {
        id: card.id("id"),
        title: card.text("title"),
        scope: card.text("scope"),
        qbox: card.text("qbox"),
        progress: timer_progress(card),
        module,
    })
}

fn convert_tab(tab: &Record<'_>, report: &mut MigrationReport) -> MigrateResult<Tab> {
    let questions = tab
        .records("questions")?
        .iter()
        .map(convert_question)
        .collect::<Vec<_>>();
    report.questions += questions.len();
    report.tabs += 1;

    Ok(Tab {
        id: tab.id("id"),
        label: tab.text("label"),
        theory_note: tab.text("theoryNote"),
        progress: timer_progress(tab),
        questions,
    })
}

fn convert_question(question: &Record<'_>) -> Question {
    Question {
        id: question.id("id"),
        src: question.text("src"),
        text: question.text("text"),
        user_note: question.text("userNote"),
        progress: timer_progress(question),
    }
}

/// `{done, time, isRunning}` as tracked on cards, tabs and questions.
fn timer_progress(record: &Record<'_>) -> Progress {
    Progress::new(
        record.flag("done"),
        record.count("time"),
        record.flag("isRunning"),
    )
}

#[cfg(test)]
mod tests {
    use super::convert_legacy;
    use serde_json::{json, Value};

    fn convert(value: Value) -> (Value, super::MigrationReport) {
        let (document, report) =
            convert_legacy(value.as_object().expect("fixture should be an object")).unwrap();
        (serde_json::to_value(document).unwrap(), report)
    }

    #[test]
    fn module_without_own_id_falls_back_to_reference() {
        let (output, report) = convert(json!({
            "home": {"subjects": [{"id": "s1"}]},
            "details": {"s1": {"cards": [{"id": "c1", "module": "m1"}]}},
            "modules": {"m1": {"activeTab": "t1", "tabs": []}}
        }));
        let module = &output["curriculum"][0]["cards"][0]["module"];
        assert_eq!(module, &json!({"id": "m1", "activeTab": "t1", "tabs": []}));
        assert_eq!(report.unresolved_modules, 0);
    }

    #[test]
    fn explicit_null_module_id_is_kept() {
        let (output, _) = convert(json!({
            "home": {"subjects": [{"id": "s1"}]},
            "details": {"s1": {"cards": [{"module": "m1"}]}},
            "modules": {"m1": {"id": null}}
        }));
        assert_eq!(
            output["curriculum"][0]["cards"][0]["module"]["id"],
            Value::Null
        );
    }

    #[test]
    fn card_without_module_reference_gets_null_module_id() {
        let (output, report) = convert(json!({
            "home": {"subjects": [{"id": "s1"}]},
            "details": {"s1": {"cards": [{"id": "c1"}]}}
        }));
        let card = &output["curriculum"][0]["cards"][0];
        assert_eq!(card["id"], "c1");
        assert_eq!(
            card["module"],
            json!({"id": null, "activeTab": "", "tabs": []})
        );
        assert_eq!(report.unresolved_modules, 0);
        assert_eq!(report.cards, 1);
    }

    #[test]
    fn report_counts_every_level() {
        let (_, report) = convert(json!({
            "home": {"subjects": [{"id": "s1"}, {"name": "no id"}, {"id": ""}]},
            "details": {"s1": {"cards": [
                {"id": "c1", "module": "m1"},
                {"id": "c2", "module": "ghost"}
            ]}},
            "modules": {"m1": {"tabs": [
                {"id": "t1", "questions": [{"id": "q1"}, {"id": "q2"}]},
                {"id": "t2"}
            ]}}
        }));
        assert_eq!(report.subjects, 1);
        assert_eq!(report.skipped_subjects, 2);
        assert_eq!(report.cards, 2);
        assert_eq!(report.unresolved_modules, 1);
        assert_eq!(report.tabs, 2);
        assert_eq!(report.questions, 2);
    }

    #[test]
    fn dropped_subject_detail_is_never_read() {
        let (output, _) = convert(json!({
            "home": {"subjects": [{"name": "orphan"}]},
            "details": {"": {"cards": "would be rejected if read"}}
        }));
        assert_eq!(output["curriculum"], json!([]));
    }

    #[test]
    fn non_string_subject_id_finds_no_details() {
        let (output, _) = convert(json!({
            "home": {"subjects": [{"id": 7}]},
            "details": {"7": {"cards": [{"id": "c1"}]}}
        }));
        assert_eq!(output["curriculum"][0]["id"], 7);
        assert_eq!(output["curriculum"][0]["cards"], json!([]));
    }

    #[test]
    fn falsy_schedule_sources_take_defaults_but_meta_is_kept() {
        let (output, _) = convert(json!({
            "meta": null,
            "home": {"dDays": null},
            "dailyHistory": []
        }));
        assert_eq!(output["meta"], Value::Null);
        assert_eq!(output["schedule"], json!({"dDays": [], "dailyHistory": {}}));
    }
}
