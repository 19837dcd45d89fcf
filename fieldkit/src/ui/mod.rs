use std::{
    cell::RefCell,
    io::Stdout,
    rc::Rc,
    time::{Duration, Instant},
};

use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fieldkit_core::{
    ChoicePop,
    Editable,
    Field,
    FieldEvent,
    PopRegistry,
    Render,
    Transformable,
    field::ChangeCallback,
    surface::EditingSurface,
};
use ratatui::{
    Frame,
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
};

use self::keys::Action;
use crate::config::Config;

mod keys;

const IDLE_POLL: Duration = Duration::from_millis(250);
const HISTORY_LEN: usize = 5;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub fn run(config: &Config) -> Result<()> {
    let registry = PopRegistry::new();
    let history: Rc<RefCell<Vec<String>>> = Rc::default();
    let sink = Rc::clone(&history);
    let on_change: ChangeCallback = Box::new(move |value: &str| -> anyhow::Result<()> {
        log::info!(value; "Value committed");
        let mut history = sink.borrow_mut();
        history.push(value.to_owned());
        if history.len() > HISTORY_LEN {
            history.remove(0);
        }
        Ok(())
    });

    let mut field = Field::new(config.field_options(on_change), &registry)?;
    for builtin in &config.pipeline {
        field.append_transform(*builtin)?;
    }
    if !config.choices.is_empty() {
        field.attach_pop(ChoicePop::new(config.choices.iter().cloned()));
    }
    field.focus();

    let mut terminal = setup()?;
    let result = event_loop(&mut terminal, &mut field, &history);
    restore(&mut terminal)?;

    result
}

fn setup() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(terminal.show_cursor()?)
}

fn event_loop(
    terminal: &mut Tui,
    field: &mut Field,
    history: &RefCell<Vec<String>>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, field, &history.borrow()))?;

        let timeout = field.next_deadline().map_or(IDLE_POLL, |deadline| {
            deadline.saturating_duration_since(Instant::now()).min(IDLE_POLL)
        });
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match keys::action_for(key, field.surface().is_focused()) {
                    Some(Action::Quit) => break,
                    Some(Action::Commit) => field.blur(),
                    Some(Action::Refocus) => field.focus(),
                    Some(Action::TogglePop) => field.toggle_pop(),
                    Some(Action::PopNext) => field.pop_select_next(),
                    Some(Action::PopPrev) => field.pop_select_prev(),
                    Some(Action::Edit(modifiers, command)) => {
                        field.edit(modifiers, command);
                    }
                    None => {}
                },
                Event::Paste(text) => {
                    field.handle_event(&FieldEvent::Paste(text));
                }
                _ => {}
            }
        }

        let ran = field.run_pending();
        if ran > 0 {
            log::trace!(ran; "Ran field timers");
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, field: &mut Field, history: &[String]) {
    let [field_area, history_area, help_area] = Layout::vertical([
        Constraint::Min(4),
        Constraint::Length(HISTORY_LEN as u16 + 2),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let block = Block::bordered().title(format!(" {} ", field.input_type()));
    let width = block.inner(field_area).width as usize;
    frame.render_widget(Paragraph::new(field.render(width)).block(block), field_area);

    let history_lines: Vec<Line> =
        history.iter().rev().map(|value| Line::raw(value.clone())).collect();
    let history_block = Block::bordered().title(format!(" Committed {:?} ", field.state()));
    frame.render_widget(Paragraph::new(history_lines).block(history_block), history_area);

    let help = "esc quit | enter commit/edit | tab choices | up/down select";
    frame.render_widget(Line::styled(help, Style::default().dim()), help_area);
}
