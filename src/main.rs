// Rust Datepicker
// Terminal front end: renders the picker as text and reads commands from stdin

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use rust_datepicker::services::settings::SettingsService;
use rust_datepicker::ui::TextRenderer;
use rust_datepicker::{
    DateError, DatePicker, EventKind, NavDirection, NavUnit, PickerEvent, SelectionMode,
};

const HELP: &str = "\
commands:
  n / p            next / previous month
  N / P            next / previous year
  c <pane> <cell>  click a day cell (0-41)
  d <date>         select a date, e.g. 2024-03-05
  g <date>         show the month of a date
  m <mode>         single, multiple or range
  s                print the selection as JSON
  x                clear the selection
  t                show / hide
  q                quit";

#[derive(Debug, PartialEq)]
enum Command {
    Navigate(NavUnit, NavDirection),
    Click(usize, usize),
    Select(String),
    GoTo(String),
    Mode(SelectionMode),
    Print,
    Clear,
    Toggle,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = parts.collect();

    let command = match (head, rest.as_slice()) {
        ("n", []) => Command::Navigate(NavUnit::Months, NavDirection::Next),
        ("p", []) => Command::Navigate(NavUnit::Months, NavDirection::Previous),
        ("N", []) => Command::Navigate(NavUnit::Years, NavDirection::Next),
        ("P", []) => Command::Navigate(NavUnit::Years, NavDirection::Previous),
        ("c", [pane, cell]) => {
            let pane = pane.parse().map_err(|_| format!("bad pane index: {}", pane))?;
            let cell = cell.parse().map_err(|_| format!("bad cell index: {}", cell))?;
            Command::Click(pane, cell)
        }
        ("d", [_, ..]) => Command::Select(rest.join(" ")),
        ("g", [_, ..]) => Command::GoTo(rest.join(" ")),
        ("m", [mode]) => Command::Mode(mode.parse().map_err(|e: DateError| e.to_string())?),
        ("s", []) => Command::Print,
        ("x", []) => Command::Clear,
        ("t", []) => Command::Toggle,
        ("h" | "?", []) => Command::Help,
        ("q", []) => Command::Quit,
        _ => return Err(format!("unknown command: {}", line.trim())),
    };
    Ok(command)
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Rust Datepicker");

    let service = match std::env::args_os().nth(1) {
        Some(path) => SettingsService::new(PathBuf::from(path)),
        None => SettingsService::open_default(),
    };
    let settings = service.load()?;
    let mut picker = DatePicker::new(settings).context("failed to create picker")?;

    picker.on(EventKind::Select, |event| {
        if let PickerEvent::Select(payload) = event {
            log::info!("Selected {} day(s)", payload.len());
        }
    });

    let mut renderer = TextRenderer::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    draw(&picker, &mut renderer, &mut stdout)?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(stdout, "{}", HELP)?;
                continue;
            }
            Ok(Command::Print) => {
                let selection = picker.current_selection(false);
                writeln!(stdout, "{}", serde_json::to_string(&selection)?)?;
                continue;
            }
            Ok(command) => apply(&mut picker, command),
            Err(message) => {
                writeln!(stdout, "{} (h for help)", message)?;
                continue;
            }
        }
        draw(&picker, &mut renderer, &mut stdout)?;
    }

    log::info!("Rust Datepicker exiting");
    Ok(())
}

fn apply(picker: &mut DatePicker, command: Command) {
    match command {
        Command::Navigate(unit, direction) => picker.on_navigate(unit, direction),
        Command::Click(pane, cell) => {
            if !picker.on_cell_click(pane, cell) {
                log::warn!("Cell {} of pane {} is not selectable", cell, pane);
            }
        }
        Command::Select(text) => {
            let day = picker.factory().stripped(text.as_str().into());
            match day.value_of() {
                Some(timestamp) => picker.on_day_click(timestamp),
                None => log::warn!("Could not read date {:?}", text),
            }
        }
        Command::GoTo(text) => picker.go_to(text),
        Command::Mode(mode) => picker.set_mode(mode),
        Command::Clear => picker.clear_selection(),
        Command::Toggle => picker.toggle(),
        Command::Print | Command::Help | Command::Quit => {}
    }
}

fn draw(picker: &DatePicker, renderer: &mut TextRenderer, out: &mut impl Write) -> Result<()> {
    picker.render(renderer);
    write!(out, "{}", renderer.take_output())?;
    out.flush()?;
    Ok(())
}
