use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{self, DisableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers, MouseEventKind};
use crossterm::style::Color::{DarkBlue, DarkGreen, Red, Reset, Yellow};
use crossterm::style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use super::types::{Choice, CycleDirection, ListItem, UiState, ViewportState};
use super::QUIT_OPTION;
use seli_core::error::{Error, Result};

/// Keeps the terminal in raw mode on the alternate screen while alive.
pub struct TerminalGuard;

impl TerminalGuard {
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be switched over.
    pub fn enter() -> Result<Self> {
        let mut stdout = stdout();
        stdout.execute(EnterAlternateScreen).map_err(Error::Stdio)?;
        enable_raw_mode().map_err(Error::Stdio)?;
        stdout.execute(event::EnableMouseCapture).map_err(Error::Stdio)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// What a key press changes in the selection UI.
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Choose(Choice),
    Update(UiState),
    Move(CycleDirection),
    Ignore,
}

/// Prompts the user to pick one of `items`.
///
/// Must be called while a [`TerminalGuard`] is alive.
///
/// # Errors
///
/// Returns an error if reading terminal events or drawing fails.
pub fn prompt_for_choice(title: &str, status: Option<&str>, items: &[ListItem]) -> Result<Choice> {
    let (width, height) = terminal::size().map_err(Error::Stdio)?;

    let mut ui_state = UiState {
        selected_index: 0,
        viewport: ViewportState {
            offset: 0,
            height: height.saturating_sub(reserved_rows(status)),
            width,
        },
        is_filtering: false,
        filter_text: String::new(),
    };

    let mut indexes_to_display = filter_displayed_indexes(items, &ui_state.filter_text);
    redraw_ui(title, status, &ui_state, items, &indexes_to_display)?;

    loop {
        if !event::poll(Duration::from_millis(500)).map_err(Error::Stdio)? {
            continue;
        }

        let new_ui_state = match event::read().map_err(Error::Stdio)? {
            Event::Key(key_event) => {
                match handle_key_event(key_event, &ui_state, &indexes_to_display) {
                    KeyOutcome::Choose(choice) => return Ok(choice),
                    KeyOutcome::Update(state) => Some(state),
                    KeyOutcome::Move(direction) => Some(move_selected_index(
                        &ui_state,
                        indexes_to_display.len(),
                        direction,
                    )),
                    KeyOutcome::Ignore => None,
                }
            }
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollDown => Some(move_selected_index(
                    &ui_state,
                    indexes_to_display.len(),
                    CycleDirection::Down,
                )),
                MouseEventKind::ScrollUp => Some(move_selected_index(
                    &ui_state,
                    indexes_to_display.len(),
                    CycleDirection::Up,
                )),
                _ => None,
            },
            Event::Resize(width, height) => {
                let mut state = ui_state.clone();
                state.viewport.width = width;
                state.viewport.height = height.saturating_sub(reserved_rows(status));
                Some(keep_selection_visible(state))
            }
            _ => None,
        };

        if let Some(state) = new_ui_state {
            if state != ui_state {
                if state.filter_text != ui_state.filter_text {
                    indexes_to_display = filter_displayed_indexes(items, &state.filter_text);
                }
                ui_state = state;
                redraw_ui(title, status, &ui_state, items, &indexes_to_display)?;
            }
        }
    }
}

/// Header line, optional status line, and filter line.
fn reserved_rows(status: Option<&str>) -> u16 {
    if status.is_some() {
        3
    } else {
        2
    }
}

/// Handle keyboard events in the selection UI
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> KeyOutcome {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Choose(Choice::Quit)
        }
        KeyCode::Up => KeyOutcome::Move(CycleDirection::Up),
        KeyCode::Down => KeyOutcome::Move(CycleDirection::Down),
        KeyCode::Enter => match indexes_to_display.get(ui_state.selected_index) {
            Some(index) => KeyOutcome::Choose(Choice::Select(*index)),
            None => KeyOutcome::Ignore,
        },
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            if updated_state.filter_text.pop().is_none() {
                updated_state.is_filtering = false;
            }
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text = String::new();
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Esc | KeyCode::Backspace => KeyOutcome::Choose(Choice::Back),
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char(QUIT_OPTION) => KeyOutcome::Choose(Choice::Quit),
        _ => KeyOutcome::Ignore,
    }
}

/// Move the selected index in the given direction, wrapping at both ends
pub fn move_selected_index(
    ui_state: &UiState,
    displayed_length: usize,
    direction: CycleDirection,
) -> UiState {
    if displayed_length == 0 {
        return ui_state.clone();
    }

    let mut ui_state = ui_state.clone();
    ui_state.selected_index = match direction {
        CycleDirection::Up if ui_state.selected_index == 0 => displayed_length - 1,
        CycleDirection::Up => ui_state.selected_index - 1,
        CycleDirection::Down => (ui_state.selected_index + 1) % displayed_length,
    };

    keep_selection_visible(ui_state)
}

/// Scrolls the viewport so the selected row is on screen
fn keep_selection_visible(mut ui_state: UiState) -> UiState {
    let height = (ui_state.viewport.height as usize).max(1);

    if ui_state.selected_index < ui_state.viewport.offset {
        ui_state.viewport.offset = ui_state.selected_index;
    } else if ui_state.selected_index >= ui_state.viewport.offset + height {
        ui_state.viewport.offset = ui_state.selected_index + 1 - height;
    }

    ui_state
}

/// Indexes of the items matching the filter, in list order
pub fn filter_displayed_indexes(items: &[ListItem], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..items.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| matcher.fuzzy_match(&item.to_string(), predicate).is_some())
        .map(|(i, _)| i)
        .collect()
}

fn redraw_ui(
    title: &str,
    status: Option<&str>,
    ui_state: &UiState,
    items: &[ListItem],
    indexes_to_display: &[usize],
) -> Result<()> {
    draw(title, status, ui_state, items, indexes_to_display).map_err(Error::Stdio)
}

fn draw(
    title: &str,
    status: Option<&str>,
    ui_state: &UiState,
    items: &[ListItem],
    indexes_to_display: &[usize],
) -> std::io::Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "{title}   |   {}/{}   |   /: Filter   <esc>: Back   q: Quit",
            (ui_state.selected_index + 1).min(indexes_to_display.len()),
            indexes_to_display.len()
        )
    };

    queue!(
        stdout,
        SetBackgroundColor(DarkGreen),
        Print(pad_to_width(&format!("  {instructions}"), width)),
        SetBackgroundColor(Reset),
        cursor::MoveToNextLine(1),
    )?;

    if let Some(status) = status {
        queue!(
            stdout,
            SetForegroundColor(Red),
            SetAttribute(Attribute::Bold),
            Print(truncate_to_width(status, width)),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Reset),
            cursor::MoveToNextLine(1),
        )?;
    }

    if indexes_to_display.is_empty() {
        queue!(
            stdout,
            SetForegroundColor(Red),
            Print("Nothing to show here!"),
            SetForegroundColor(Reset),
            cursor::MoveToNextLine(1)
        )?;
    }

    let visible = indexes_to_display
        .iter()
        .enumerate()
        .skip(ui_state.viewport.offset)
        .take(ui_state.viewport.height as usize);

    for (row, index) in visible {
        let content = pad_to_width(&format!("  {}", items[*index]), width);

        if row == ui_state.selected_index {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            stdout,
            Print(content),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
            cursor::MoveToNextLine(1),
        )?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()
}

fn truncate_to_width(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn pad_to_width(text: &str, width: usize) -> String {
    let truncated = truncate_to_width(text, width);
    let padding = width.saturating_sub(truncated.chars().count());
    format!("{truncated}{}", " ".repeat(padding))
}
