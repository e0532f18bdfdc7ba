use crate::app::command_support::{
    build_session, parse_flags, workflow_summary_lines, CATEGORIES_FLAG, CONFIG_FLAG,
    RELEASE_DATE_FLAG, STATUS_FLAG,
};
use crate::workflow::CompletionOutcome;
use std::time::Instant;

const ROW_FLAG: &str = "--row";
const SAVE_FLAG: &str = "--save";

/// One `--row <category>=<count>` argument, kept raw so the row store applies
/// the same coercion the interactive screen does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowArg {
    pub category: String,
    pub count: String,
}

pub fn parse_row_arg(raw: &str) -> Result<RowArg, String> {
    let (category, count) = raw
        .split_once('=')
        .ok_or_else(|| format!("invalid row `{raw}`; expected <category_id>=<count>"))?;
    Ok(RowArg {
        category: category.trim().to_string(),
        count: count.trim().to_string(),
    })
}

pub fn cmd_batch(args: &[String]) -> Result<String, String> {
    let flags = parse_flags(
        args,
        &[
            CONFIG_FLAG,
            CATEGORIES_FLAG,
            ROW_FLAG,
            RELEASE_DATE_FLAG,
            STATUS_FLAG,
        ],
        &[SAVE_FLAG],
    )?;
    if let Some(extra) = flags.positionals().first() {
        return Err(format!("unexpected argument `{extra}`"));
    }
    let row_args = flags
        .values(ROW_FLAG)
        .iter()
        .map(|raw| parse_row_arg(raw))
        .collect::<Result<Vec<_>, _>>()?;
    if row_args.is_empty() {
        return Err("batch requires at least one --row <category_id>=<count>".to_string());
    }

    let mut session = build_session(&flags)?;
    for (index, row_arg) in row_args.iter().enumerate() {
        let controller = session.controller_mut();
        let id = match controller.rows().id_at(index) {
            Some(id) => id,
            None => controller.add_row().map_err(|e| e.to_string())?,
        };
        if !row_arg.category.is_empty() {
            let known = controller
                .catalog()
                .categories()
                .iter()
                .any(|category| category.id.as_str() == row_arg.category);
            if !known {
                return Err(format!("unknown category `{}`", row_arg.category));
            }
            controller
                .set_category_input(id, &row_arg.category)
                .map_err(|e| e.to_string())?;
        }
        controller
            .set_count_input(id, &row_arg.count)
            .map_err(|e| e.to_string())?;
    }

    let outcome = session
        .generate_now(Instant::now())
        .map_err(|e| e.to_string())?;
    match outcome {
        CompletionOutcome::Applied => {}
        CompletionOutcome::Failed(message) => return Err(format!("generation failed: {message}")),
        CompletionOutcome::Discarded | CompletionOutcome::Stale => {
            return Err("generation result was discarded".to_string())
        }
    }

    let mut lines = vec!["generation=ok".to_string()];
    lines.extend(
        session
            .controller()
            .review()
            .items()
            .iter()
            .map(|item| format!("quiz category={} title={}", item.category_id, item.title)),
    );

    if flags.switch(SAVE_FLAG) {
        let outcome = session.save_now(Instant::now()).map_err(|e| e.to_string())?;
        match outcome {
            CompletionOutcome::Applied => {
                lines.push("save=ok".to_string());
                if let Some(count) = session.last_receipt().and_then(|r| r.created_count) {
                    lines.push(format!("created_count={count}"));
                }
            }
            CompletionOutcome::Failed(message) => return Err(format!("save failed: {message}")),
            CompletionOutcome::Discarded | CompletionOutcome::Stale => {
                return Err("save result was discarded".to_string())
            }
        }
    }

    lines.extend(workflow_summary_lines(session.controller()));
    Ok(lines.join("\n"))
}
