use super::navigation::clamp_selection;
use super::state::{release_date_prompt, UiState};
use crate::workflow::{NoticeKind, Phase, WorkflowView};
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use ratatui::{Frame, Terminal};

pub const SCREEN_TITLE: &str = "Bulk Quiz Generation";
pub const CONFIG_HINT_TEXT: &str =
    "Up/Down row | Left/Right category | +/- count | a add | d remove | r date | t status | Enter generate | q quit";
pub const REVIEW_HINT_TEXT: &str =
    "Up/Down move | d remove | g regenerate | r date | t status | Enter save | Esc back | q quit";
pub const EDITING_HINT_TEXT: &str = "Type the date | Enter apply | Esc cancel";

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn draw_workflow_screen<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &WorkflowView,
    ui: &UiState,
) -> Result<(), String> {
    terminal
        .draw(|frame| draw_workflow(frame, view, ui))
        .map_err(|e| format!("failed to render workflow screen: {e}"))?;
    Ok(())
}

pub fn draw_workflow(frame: &mut Frame<'_>, view: &WorkflowView, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(frame.area());

    let step = match view.phase {
        Phase::Config => "Step: Configure categories".to_string(),
        Phase::Review => format!("Step: Review generated quizzes ({})", view.review.count_label),
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            SCREEN_TITLE,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(step),
        Line::from(format!(
            "Release date: {} | Status: {}",
            if view.config.release_date.is_empty() {
                "(not set)"
            } else {
                view.config.release_date.as_str()
            },
            view.config.status
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    match view.phase {
        Phase::Config => draw_config_body(frame, chunks[1], view, ui),
        Phase::Review => draw_review_body(frame, chunks[1], view, ui),
    }

    draw_footer(frame, chunks[2], view, ui);

    if let Some(busy) = &view.busy {
        let area = centered_rect(50, 20, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(busy.clone())
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL)),
            area,
        );
    }
}

fn draw_config_body(frame: &mut Frame<'_>, area: Rect, view: &WorkflowView, ui: &UiState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);
    let selected = clamp_selection(ui.selected_row, view.config.rows.len());

    let rows = view.config.rows.iter().enumerate().map(|(idx, row)| {
        let style = if idx == selected {
            selected_style()
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from((idx + 1).to_string()),
            Cell::from(row.category_label.clone()),
            Cell::from(row.count.to_string()),
        ])
        .style(style)
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(70),
            Constraint::Length(8),
        ],
    )
    .header(Row::new(vec!["#", "Category", "Count"]).style(Style::default().add_modifier(Modifier::BOLD)))
    .column_spacing(2)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Categories: {} ", view.config.summary)),
    );
    frame.render_widget(table, parts[0]);

    let options = view
        .config
        .rows
        .get(selected)
        .map(|row| {
            row.options
                .iter()
                .map(|option| {
                    let style = if option.selected {
                        selected_style()
                    } else if option.disabled {
                        Style::default().fg(Color::DarkGray)
                    } else {
                        Style::default()
                    };
                    Span::styled(format!(" {} ", option.label), style)
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(Line::from(options))
            .block(Block::default().borders(Borders::ALL).title(" Options ")),
        parts[1],
    );
}

fn draw_review_body(frame: &mut Frame<'_>, area: Rect, view: &WorkflowView, ui: &UiState) {
    let selected = clamp_selection(ui.selected_item, view.review.rows.len());
    let rows = view.review.rows.iter().map(|item| {
        let style = if item.index == selected {
            selected_style()
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(item.category_name.clone()),
            Cell::from(item.title.clone()),
            Cell::from(item.description.clone()),
        ])
        .style(style)
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(20),
            Constraint::Percentage(35),
            Constraint::Percentage(45),
        ],
    )
    .header(
        Row::new(vec!["Category", "Title", "Description"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .column_spacing(2)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Generated: {} ", view.review.count_label)),
    );
    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, view: &WorkflowView, ui: &UiState) {
    let hint = match (&ui.date_input, view.phase) {
        (Some(_), _) => EDITING_HINT_TEXT,
        (None, Phase::Config) => CONFIG_HINT_TEXT,
        (None, Phase::Review) => REVIEW_HINT_TEXT,
    };
    let mut lines = vec![Line::from(hint.to_string())];
    if let Some(input) = &ui.date_input {
        lines.push(Line::from(release_date_prompt(input)));
    }
    if let Some(target) = &view.exit {
        lines.push(Line::from(format!("Saved. Continue at {target}")));
    }
    match &view.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Error => Color::Red,
                NoticeKind::Info => Color::Green,
            };
            lines.push(Line::from(Span::styled(
                notice.message.clone(),
                Style::default().fg(color),
            )));
        }
        None if view.unload_guard => {
            lines.push(Line::from("Unsaved generated quizzes"));
        }
        None => {}
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}
