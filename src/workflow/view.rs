//! Declarative projection of controller state into what the screen shows.

use super::controller::WorkflowController;
use super::form::QuizStatus;
use super::notice::NoticeKind;
use super::phase::{Phase, RedirectTarget};
use crate::shared::ids::{CategoryId, RowId};
use std::time::Instant;

pub const CATEGORY_PLACEHOLDER: &str = "Select a category...";
pub const IN_USE_SUFFIX: &str = " (in use)";
pub const GENERATING_TEXT: &str = "Generating quizzes with AI...";
pub const SAVING_TEXT: &str = "Saving...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOption {
    pub category: Option<CategoryId>,
    pub label: String,
    pub disabled: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: RowId,
    pub category_label: String,
    pub count: u32,
    pub options: Vec<CategoryOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigView {
    pub rows: Vec<RowView>,
    pub summary: String,
    pub release_date: String,
    pub status: QuizStatus,
    pub generate_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRowView {
    pub index: usize,
    pub category_name: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewView {
    pub count_label: String,
    pub rows: Vec<ReviewRowView>,
    pub save_enabled: bool,
    pub regenerate_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowView {
    pub phase: Phase,
    pub config: ConfigView,
    pub review: ReviewView,
    pub busy: Option<String>,
    pub notice: Option<NoticeView>,
    pub unload_guard: bool,
    pub exit: Option<RedirectTarget>,
}

pub fn project_workflow_view(controller: &WorkflowController, now: Instant) -> WorkflowView {
    let finished = controller.exit_target().is_some();
    let busy = if controller.generation_in_flight() {
        Some(GENERATING_TEXT.to_string())
    } else if controller.save_in_flight() {
        Some(SAVING_TEXT.to_string())
    } else {
        None
    };
    let generate_enabled = !finished && !controller.generation_in_flight();

    WorkflowView {
        phase: controller.phase(),
        config: ConfigView {
            rows: project_rows(controller),
            summary: controller.rows().summary().label(),
            release_date: controller.release_date().to_string(),
            status: controller.status(),
            generate_enabled,
        },
        review: ReviewView {
            count_label: controller.review().count_label(),
            rows: controller
                .review()
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| ReviewRowView {
                    index,
                    category_name: item.category_name.clone(),
                    title: item.title.clone(),
                    description: item.description.clone(),
                })
                .collect(),
            save_enabled: !finished
                && controller.phase() == Phase::Review
                && !controller.save_in_flight()
                && !controller.review().is_empty(),
            regenerate_enabled: generate_enabled,
        },
        busy,
        notice: controller.notice(now).map(|notice| NoticeView {
            kind: notice.kind,
            message: notice.message.clone(),
        }),
        unload_guard: controller.requires_unload_confirmation(),
        exit: controller.exit_target().cloned(),
    }
}

fn project_rows(controller: &WorkflowController) -> Vec<RowView> {
    let catalog = controller.catalog();
    let store = controller.rows();
    store
        .rows()
        .iter()
        .map(|row| {
            let used = store.used_elsewhere(row.id);
            let mut options = vec![CategoryOption {
                category: None,
                label: CATEGORY_PLACEHOLDER.to_string(),
                disabled: false,
                selected: row.category.is_none(),
            }];
            options.extend(catalog.categories().iter().map(|category| {
                let in_use = used.contains(&&category.id);
                CategoryOption {
                    category: Some(category.id.clone()),
                    label: if in_use {
                        format!("{}{IN_USE_SUFFIX}", category.name)
                    } else {
                        category.name.clone()
                    },
                    disabled: in_use,
                    selected: row.category.as_ref() == Some(&category.id),
                }
            }));
            let category_label = match &row.category {
                Some(id) => catalog
                    .name_of(id)
                    .map(str::to_string)
                    .unwrap_or_else(|| id.to_string()),
                None => CATEGORY_PLACEHOLDER.to_string(),
            };
            RowView {
                id: row.id,
                category_label,
                count: row.count,
                options,
            }
        })
        .collect()
}
