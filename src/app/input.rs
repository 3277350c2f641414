//! Key handling, dispatched per screen.

use crate::app::{background, RuntimeContext};
use crate::request::AVAILABLE_CRITICS;
use crate::ui::{App, FormFocus, Screen};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const SCROLL_PAGE: usize = 10;

pub fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    // Ctrl-C quits from anywhere, even mid-request.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return Ok(());
    }

    match app.screen {
        Screen::Welcome => handle_form_key(app, key, ctx),
        Screen::Validating => handle_validating_key(app, key),
        Screen::Results => handle_results_key(app, key, ctx),
    }
    Ok(())
}

fn handle_form_key(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    match key.code {
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => match app.focus {
            FormFocus::Submit => submit(app, ctx),
            // Enter inserts a newline in the long-text fields and
            // advances focus everywhere else.
            _ if app.focus.is_multiline() => {
                if let Some(field) = app.focused_field() {
                    field.push('\n');
                }
            }
            _ => app.focus = app.focus.next(),
        },
        KeyCode::Left if app.focus == FormFocus::Critics => {
            app.critic_cursor = app.critic_cursor.saturating_sub(1);
        }
        KeyCode::Right if app.focus == FormFocus::Critics => {
            if app.critic_cursor + 1 < AVAILABLE_CRITICS.len() {
                app.critic_cursor += 1;
            }
        }
        KeyCode::Char(' ') if app.focus == FormFocus::Critics => app.toggle_critic(),
        KeyCode::Char('r') if app.focus == FormFocus::Submit && app.session.has_result() => {
            app.screen = Screen::Results;
        }
        KeyCode::Backspace => {
            if let Some(field) = app.focused_field() {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = app.focused_field() {
                field.push(c);
            }
        }
        _ => {}
    }
}

fn submit(app: &mut App, ctx: &RuntimeContext) {
    if let Some(request) = app.try_submit() {
        background::spawn_validation(ctx.client.clone(), ctx.tx.clone(), request);
    }
}

fn handle_validating_key(app: &mut App, key: KeyEvent) {
    // The request keeps running server-side; there is no cancel, only quit.
    if let KeyCode::Char('q') = key.code {
        app.should_quit = true;
    }
}

fn handle_results_key(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    if app.follow_up_input.is_some() {
        handle_follow_up_key(app, key, ctx);
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Up | KeyCode::Char('k') => {
            app.results_scroll = app.results_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.results_scroll = app.results_scroll.saturating_add(1);
        }
        KeyCode::PageUp => {
            app.results_scroll = app.results_scroll.saturating_sub(SCROLL_PAGE);
        }
        KeyCode::PageDown => {
            app.results_scroll = app.results_scroll.saturating_add(SCROLL_PAGE);
        }
        KeyCode::Home => app.results_scroll = 0,
        KeyCode::Char('f') => app.open_follow_up(),
        KeyCode::Char('n') => app.new_validation(),
        _ => {}
    }
}

fn handle_follow_up_key(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) {
    match key.code {
        KeyCode::Esc => app.follow_up_input = None,
        KeyCode::Enter => {
            if let Some((thread_id, question)) = app.take_follow_up() {
                background::spawn_follow_up(ctx.client.clone(), ctx.tx.clone(), thread_id, question);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.follow_up_input.as_mut() {
                input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.follow_up_input.as_mut() {
                input.push(c);
            }
        }
        _ => {}
    }
}
