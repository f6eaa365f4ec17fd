//! Raw-mode terminal picker.
//!
//! One `rerank` per query edit; rendering runs a second, independent
//! alignment pass per visible row (with its own scratch) purely to decide
//! which characters to highlight. Drawing targets stderr so stdout carries
//! nothing but the final selection.

use std::io::{self, Write};
use std::path::Path;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use fzr_core::{CandidateStore, ScoreScratch};

/// Rows above the candidate list: title, blank, input, blank.
const HEADER_ROWS: u16 = 4;
const PROMPT: &str = "fzr> ";

pub fn run(
    store: &mut CandidateStore,
    base_path: &Path,
    source: &str,
) -> anyhow::Result<Option<String>> {
    let mut screen = io::stderr();

    terminal::enable_raw_mode()?;
    execute!(screen, EnterAlternateScreen, Hide)?;
    let result = event_loop(&mut screen, store, base_path, source);
    // always restore the terminal, even if the loop errored
    let _ = execute!(screen, Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn event_loop(
    screen: &mut io::Stderr,
    store: &mut CandidateStore,
    base_path: &Path,
    source: &str,
) -> anyhow::Result<Option<String>> {
    let limits = *store.limits();
    let mut highlight = ScoreScratch::new(&limits)?;
    let mut query = String::new();
    let mut selected = 0usize;

    store.rerank("")?;

    loop {
        draw(screen, store, &mut highlight, &query, selected, base_path, source)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }

        match key.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(None);
            }
            KeyCode::Enter => {
                return Ok(store
                    .shortlist()
                    .nth(selected)
                    .map(|entry| entry.name.to_string()));
            }
            KeyCode::Up => selected = selected.saturating_sub(1),
            KeyCode::Down => {
                let visible = visible_rows()?.min(store.shortlist_len());
                if selected + 1 < visible {
                    selected += 1;
                }
            }
            KeyCode::Backspace => {
                if query.pop().is_some() {
                    store.rerank(&query)?;
                    selected = 0;
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if query.len() + c.len_utf8() <= limits.max_pattern_len {
                    query.push(c);
                    store.rerank(&query)?;
                    selected = 0;
                }
            }
            _ => {}
        }
    }
}

fn visible_rows() -> anyhow::Result<usize> {
    let (_, rows) = terminal::size()?;
    Ok(rows.saturating_sub(HEADER_ROWS) as usize)
}

fn draw(
    screen: &mut io::Stderr,
    store: &CandidateStore,
    highlight: &mut ScoreScratch,
    query: &str,
    selected: usize,
    base_path: &Path,
    source: &str,
) -> anyhow::Result<()> {
    let (cols, _) = terminal::size()?;
    let list_rows = visible_rows()?;

    queue!(screen, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(
        screen,
        SetAttribute(Attribute::Reverse),
        Print(format!(
            " fzr  [{}/{}]  base ({source}): {} ",
            store.shortlist_len(),
            store.total(),
            base_path.display()
        )),
        SetAttribute(Attribute::Reset),
    )?;

    queue!(
        screen,
        MoveTo(0, 2),
        Print(PROMPT),
        Print(query),
        SetAttribute(Attribute::Reverse),
        Print(" "),
        SetAttribute(Attribute::Reset),
    )?;

    let name_budget = (cols as usize).saturating_sub(4);
    for (row, entry) in store.shortlist().take(list_rows).enumerate() {
        queue!(screen, MoveTo(0, HEADER_ROWS + row as u16))?;
        if row == selected {
            queue!(
                screen,
                SetAttribute(Attribute::Bold),
                Print("=> "),
                SetAttribute(Attribute::Reset),
            )?;
        } else {
            queue!(screen, Print(" - "))?;
        }
        draw_name(screen, highlight, query, entry.name, name_budget)?;
    }

    screen.flush()?;
    Ok(())
}

/// Print one candidate name, highlighting the positions the pattern
/// consumed. This alignment is recomputed here and does not reuse the score
/// from `rerank`.
fn draw_name(
    screen: &mut io::Stderr,
    highlight: &mut ScoreScratch,
    query: &str,
    name: &str,
    budget: usize,
) -> anyhow::Result<()> {
    let positions = match highlight.match_positions(query, name)? {
        Some((_, positions)) => positions,
        // a row can stop matching between rerank and redraw only if the
        // shortlist is stale; render it unhighlighted rather than fail
        None => Vec::new(),
    };

    for (printed, (idx, ch)) in name.char_indices().enumerate() {
        if printed == budget {
            break;
        }
        if positions.get(idx).copied().unwrap_or(false) {
            queue!(
                screen,
                SetForegroundColor(Color::Yellow),
                Print(ch),
                ResetColor
            )?;
        } else {
            queue!(screen, Print(ch))?;
        }
    }
    Ok(())
}
