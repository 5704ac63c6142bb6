use std::str::FromStr;

use crate::error::{AnnotatorError, Result};

/// Input delivered by the host environment.
///
/// Pointer positions are in plot data coordinates: `x` along columns, `y`
/// along rows, pixel centers on integers.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    PointerEnter,
    PointerLeave,
    PointerMove { x: f64, y: f64 },
    /// Button release over the plot.
    Click { x: f64, y: f64 },
    Key(Key),
}

/// A key press, decoded from the host's key name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A single printable character.
    Char(char),
    Backspace,
    /// `shift+backspace`, `ctrl+backspace` or `ctrl+d`: empty the label buffer.
    ClearBuffer,
    Enter,
    Escape,
    /// Anything else (modifier chords, function keys, ...). Ignored.
    Other(String),
}

impl Key {
    /// Decode a host key name such as `"a"`, `"escape"` or `"ctrl+d"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "enter" | "return" => Key::Enter,
            "shift+backspace" | "ctrl+backspace" | "ctrl+d" => Key::ClearBuffer,
            "space" => Key::Char(' '),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !c.is_control() => Key::Char(c),
                    _ => Key::Other(name.to_string()),
                }
            }
        }
    }
}

impl FromStr for Event {
    type Err = AnnotatorError;

    /// Parse one line of an event log: `enter`, `leave`, `move X Y`,
    /// `click X Y` or `key NAME`.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };
        match verb {
            "enter" => Ok(Event::PointerEnter),
            "leave" => Ok(Event::PointerLeave),
            "move" => {
                let (x, y) = parse_xy(rest, line)?;
                Ok(Event::PointerMove { x, y })
            }
            "click" => {
                let (x, y) = parse_xy(rest, line)?;
                Ok(Event::Click { x, y })
            }
            "key" if !rest.is_empty() => Ok(Event::Key(Key::from_name(rest))),
            _ => Err(AnnotatorError::InvalidEvent(line.to_string())),
        }
    }
}

fn parse_xy(args: &str, line: &str) -> Result<(f64, f64)> {
    let invalid = || AnnotatorError::InvalidEvent(line.to_string());
    let mut parts = args.split_whitespace();
    let x = parts.next().ok_or_else(invalid)?.parse::<f64>().map_err(|_| invalid())?;
    let y = parts.next().ok_or_else(invalid)?.parse::<f64>().map_err(|_| invalid())?;
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok((x, y))
}

/// Parse a whole event log, skipping blank lines and `#` comments.
pub fn parse_event_log(text: &str) -> Result<Vec<Event>> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::parse::<Event>)
        .collect()
}
