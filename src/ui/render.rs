//! Frame drawing for the three screens.

use crate::ui::markdown::parse_markdown;
use crate::ui::theme::Theme;
use crate::ui::{App, FormFocus, Pending, Screen, Toast};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Content column width cap; wide terminals get margins instead of
/// hundred-column paragraphs.
const MAX_CONTENT_WIDTH: u16 = 90;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Block::default().style(Theme::bg()), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(8),    // Screen content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);

    let content = centered_column(layout[1]);
    match app.screen {
        Screen::Welcome => render_form(frame, content, app),
        Screen::Validating => render_validating(frame, content, app),
        Screen::Results => render_results(frame, content, app),
    }

    render_footer(frame, layout[2], app);

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}

fn centered_column(area: Rect) -> Rect {
    let width = area.width.min(MAX_CONTENT_WIDTH);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let (mark, mark_style, health) = match app.backend_healthy {
        Some(true) => (
            Theme::CHECK_MARK,
            Style::default().fg(Theme::GREEN),
            "backend online",
        ),
        Some(false) => (
            Theme::CROSS_MARK,
            Style::default().fg(Theme::RED),
            "backend unreachable",
        ),
        None => (Theme::BULLET_FILLED, Theme::text_dim(), "checking backend"),
    };
    let line = Line::from(vec![
        Span::styled("  Idea Validator", Theme::title()),
        Span::styled("   ", Style::default()),
        Span::styled(mark.to_string(), mark_style),
        Span::styled(format!(" {}", health), Theme::text_dim()),
    ]);
    frame.render_widget(
        Paragraph::new(vec![line, Line::from("")]).style(Theme::bg()),
        area,
    );
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Idea name
            Constraint::Length(4), // Description
            Constraint::Length(3), // Target market
            Constraint::Length(4), // Problem it solves
            Constraint::Length(3), // Unique value
            Constraint::Length(2), // Critics
            Constraint::Length(1), // Submit
            Constraint::Min(0),
        ])
        .split(area);

    render_input(frame, layout[0], app, FormFocus::IdeaName, &app.form.idea_name);
    render_input(frame, layout[1], app, FormFocus::Description, &app.form.description);
    render_input(frame, layout[2], app, FormFocus::TargetMarket, &app.form.target_market);
    render_input(frame, layout[3], app, FormFocus::ProblemSolving, &app.form.problem_solving);
    render_input(frame, layout[4], app, FormFocus::UniqueValue, &app.form.unique_value);
    render_critics(frame, layout[5], app);
    render_submit(frame, layout[6], app);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App, field: FormFocus, value: &str) {
    let focused = app.focus == field;
    let border = if focused {
        Theme::border_active()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(
            format!(" {} ", field.label()),
            if focused { Theme::bold() } else { Theme::text_muted() },
        ));

    let inner_width = area.width.saturating_sub(2) as usize;
    let mut text = if field.is_multiline() {
        value.to_string()
    } else {
        // Single-line inputs scroll horizontally; show the tail.
        tail_fitting(value, inner_width.saturating_sub(1))
    };
    if focused {
        text.push('▏');
    }

    let paragraph = Paragraph::new(text)
        .style(Theme::text())
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Last portion of `text` that fits in `width` display columns.
fn tail_fitting(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut tail = String::new();
    for ch in text.chars().rev() {
        let mut candidate = ch.to_string();
        candidate.push_str(&tail);
        if candidate.width() > width {
            break;
        }
        tail = candidate;
    }
    tail
}

fn render_critics(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == FormFocus::Critics;
    let mut spans = vec![Span::styled(
        " Critics  ",
        if focused { Theme::bold() } else { Theme::text_muted() },
    )];
    for (i, critic) in crate::request::AVAILABLE_CRITICS.iter().enumerate() {
        let bullet = if app.critic_selected[i] {
            Theme::BULLET_FILLED
        } else {
            Theme::BULLET_EMPTY
        };
        let style = if focused && i == app.critic_cursor {
            Theme::selected()
        } else if app.critic_selected[i] {
            Theme::text()
        } else {
            Theme::text_dim()
        };
        spans.push(Span::styled(format!(" {} {} ", bullet, critic), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).style(Theme::bg()), area);
}

fn render_submit(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == FormFocus::Submit;
    let style = if focused {
        Theme::selected().add_modifier(Modifier::BOLD)
    } else {
        Theme::text_muted()
    };
    let line = Line::from(vec![
        Span::styled(" ", Style::default()),
        Span::styled("[ Validate idea ]", style),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::bg()), area);
}

fn render_validating(frame: &mut Frame, area: Rect, app: &App) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} Consulting the critics…", app.spinner()),
            Theme::bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This usually takes a minute or two.",
            Theme::text_dim(),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Theme::bg()),
        area,
    );
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    // Reserve the bottom rows for the follow-up prompt when it is open.
    let (body_area, prompt_area) = if app.follow_up_input.is_some() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(3)])
            .split(area);
        (split[0], Some(split[1]))
    } else {
        (area, None)
    };

    let width = body_area.width.saturating_sub(2) as usize;
    let lines = results_lines(app, width);
    let scroll = app.results_scroll.min(lines.len().saturating_sub(1)) as u16;
    frame.render_widget(
        Paragraph::new(lines)
            .style(Theme::bg())
            .scroll((scroll, 0)),
        body_area,
    );

    if let Some(prompt) = prompt_area {
        let input = app.follow_up_input.as_deref().unwrap_or("");
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::border_active())
            .title(Span::styled(" Ask a follow-up ", Theme::bold()));
        let inner_width = prompt.width.saturating_sub(3) as usize;
        let mut text = tail_fitting(input, inner_width);
        text.push('▏');
        frame.render_widget(Paragraph::new(text).style(Theme::text()).block(block), prompt);
    }
}

/// Assemble the full results document as styled lines so a single
/// scroll offset covers all sections.
fn results_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let Some(display) = &app.display else {
        return vec![Line::from(Span::styled(
            "No results yet.",
            Theme::text_dim(),
        ))];
    };

    let mut lines = Vec::new();

    lines.push(section_header("VERDICT"));
    lines.extend(parse_markdown(&display.summary, width));
    lines.push(Line::from(""));

    lines.push(section_header("STRENGTHS"));
    for item in &display.strengths {
        lines.extend(bullet_lines(item, width));
    }
    lines.push(Line::from(""));

    lines.push(section_header("CONCERNS"));
    for item in &display.concerns {
        lines.extend(bullet_lines(item, width));
    }
    lines.push(Line::from(""));

    lines.push(section_header("NEXT STEPS"));
    for item in &display.next_steps {
        lines.extend(bullet_lines(item, width));
    }

    for (title, body) in &display.detail_sections {
        lines.push(Line::from(""));
        lines.push(section_header(&title.to_uppercase()));
        lines.extend(parse_markdown(body, width));
    }

    if !app.session.follow_ups.is_empty() {
        lines.push(Line::from(""));
        lines.push(section_header("FOLLOW-UPS"));
        for exchange in &app.session.follow_ups {
            lines.push(Line::from(Span::styled(
                format!("Q: {}", exchange.question),
                Theme::bold(),
            )));
            lines.extend(parse_markdown(&exchange.answer, width));
            lines.push(Line::from(""));
        }
    }

    if app.pending == Pending::FollowUp {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{} Waiting for the answer…", app.spinner()),
            Theme::text_muted(),
        )));
    }

    lines
}

fn section_header(title: &str) -> Line<'static> {
    Line::from(Span::styled(format!(" {}", title), Theme::title()))
}

fn bullet_lines(item: &str, width: usize) -> Vec<Line<'static>> {
    parse_markdown(&format!("- {}", item), width)
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("  ", Style::default())];

    let mut hint = |key: &str, action: &str| {
        spans.push(Span::styled(format!(" {} ", key), Theme::key()));
        spans.push(Span::styled(format!(" {}  ", action), Theme::text_dim()));
    };

    match app.screen {
        Screen::Welcome => {
            hint("Tab", "next field");
            if app.focus == FormFocus::Critics {
                hint("←→", "move");
                hint("␣", "toggle");
            }
            hint("↵", "submit");
            if app.focus == FormFocus::Submit && app.session.has_result() {
                hint("r", "results");
            }
        }
        Screen::Validating => {}
        Screen::Results => {
            if app.follow_up_input.is_some() {
                hint("↵", "ask");
                hint("Esc", "close");
            } else {
                hint("↑↓", "scroll");
                hint("f", "follow-up");
                hint("n", "new idea");
            }
        }
    }
    hint("q", "quit");

    let footer = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(Theme::GREY_900));
    frame.render_widget(footer, area);
}

fn render_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();
    let message = format!("  {}  ", toast.message);
    let width = (message.width() as u16).min(area.width);
    let toast_area = Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: area.height.saturating_sub(5),
        width,
        height: 1,
    };
    frame.render_widget(Clear, toast_area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            message,
            Style::default().fg(Theme::WHITE),
        )))
        .style(Style::default().bg(Theme::GREY_500)),
        toast_area,
    );
}
