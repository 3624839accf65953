/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Input handling for the point editor.
//!
//! Input detection (pointer buttons, named commands, text lines) is kept
//! apart from intent application so every mapping is testable without a
//! windowing layer.

use std::fmt;

use euclid::default::Point2D;

use crate::app::GraphIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    ClearAll,
}

/// Discrete input accepted from the windowing layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Click {
        button: PointerButton,
        position: Point2D<f32>,
    },
    DoubleClick {
        position: Point2D<f32>,
    },
    Command(EditorCommand),
}

/// Convert one input event to the graph intent it triggers.
pub fn intent_for_event(event: InputEvent) -> GraphIntent {
    match event {
        InputEvent::Click {
            button: PointerButton::Primary,
            position,
        } => GraphIntent::CreateNodeAt { position },
        InputEvent::Click {
            button: PointerButton::Secondary,
            position,
        } => GraphIntent::SelectAndConnectAt { position },
        InputEvent::DoubleClick { position } => GraphIntent::ToggleSelectionAt { position },
        InputEvent::Command(EditorCommand::Undo) => GraphIntent::Undo,
        InputEvent::Command(EditorCommand::ClearAll) => GraphIntent::ClearGraph,
    }
}

/// Convert a batch of events to intents without applying them.
pub fn intents_from_events<I>(events: I) -> Vec<GraphIntent>
where
    I: IntoIterator<Item = InputEvent>,
{
    events.into_iter().map(intent_for_event).collect()
}

/// One line of the headless shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellLine {
    Event(InputEvent),
    Show,
    Quit,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputParseError {
    UnknownCommand(String),
    MissingCoordinate(&'static str),
    BadCoordinate(String),
    TrailingInput(String),
}

impl fmt::Display for InputParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(word) => write!(f, "unknown command: {word}"),
            Self::MissingCoordinate(axis) => write!(f, "missing {axis} coordinate"),
            Self::BadCoordinate(raw) => write!(f, "not a coordinate: {raw}"),
            Self::TrailingInput(rest) => write!(f, "unexpected input after command: {rest}"),
        }
    }
}

impl std::error::Error for InputParseError {}

/// Parse one shell line.
///
/// `click X Y` is a primary click, `select X Y` a secondary click, and
/// `toggle X Y` a double click. `#` starts a comment.
pub fn parse_line(line: &str) -> Result<ShellLine, InputParseError> {
    let line = line.split('#').next().unwrap_or_default();
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(ShellLine::Blank);
    };

    let parsed = match command.to_ascii_lowercase().as_str() {
        "click" | "add" => ShellLine::Event(InputEvent::Click {
            button: PointerButton::Primary,
            position: parse_point(&mut words)?,
        }),
        "select" | "connect" => ShellLine::Event(InputEvent::Click {
            button: PointerButton::Secondary,
            position: parse_point(&mut words)?,
        }),
        "toggle" => ShellLine::Event(InputEvent::DoubleClick {
            position: parse_point(&mut words)?,
        }),
        "undo" => ShellLine::Event(InputEvent::Command(EditorCommand::Undo)),
        "clear" => ShellLine::Event(InputEvent::Command(EditorCommand::ClearAll)),
        "show" => ShellLine::Show,
        "quit" | "exit" => ShellLine::Quit,
        _ => return Err(InputParseError::UnknownCommand(command.to_string())),
    };

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(InputParseError::TrailingInput(rest.join(" ")));
    }
    Ok(parsed)
}

fn parse_point<'a>(
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Point2D<f32>, InputParseError> {
    let x = parse_coordinate(words.next(), "x")?;
    let y = parse_coordinate(words.next(), "y")?;
    Ok(Point2D::new(x, y))
}

fn parse_coordinate(raw: Option<&str>, axis: &'static str) -> Result<f32, InputParseError> {
    let raw = raw.ok_or(InputParseError::MissingCoordinate(axis))?;
    raw.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputParseError::BadCoordinate(raw.to_string()))
}
