use tracing::{debug, trace};

use super::event::{Event, Key};
use super::Annotator;
use crate::error::Result;
use crate::picker;

/// Interaction mode. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    /// Pointer outside the plot, nothing in progress.
    Idle,
    /// Pointer over the plot; moving highlights the cluster under it.
    Hovering,
    /// Color picker shown; the next click assigns a color to `pending`.
    PickingColor { pending: usize },
    /// Typing a new name for the hovered cluster.
    EditingLabel,
}

/// Which image the primary panel shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shown {
    Color,
    Highlight(usize),
    Picker,
}

impl Annotator {
    /// Apply one host event to the session.
    ///
    /// Errors only on pointer positions that cannot be mapped to a pixel;
    /// the session is left unchanged in that case.
    pub fn handle(&mut self, event: Event) -> Result<()> {
        trace!(?event, mode = ?self.mode, "event");
        match event {
            Event::PointerEnter => self.on_enter(),
            Event::PointerLeave => self.on_leave(),
            Event::PointerMove { x, y } => self.on_move(x, y)?,
            Event::Click { x, y } => self.on_click(x, y)?,
            Event::Key(key) => self.on_key(key),
        }
        Ok(())
    }

    /// Apply a sequence of events, stopping at the first error.
    pub fn replay<I>(&mut self, events: I) -> Result<()>
    where
        I: IntoIterator<Item = Event>,
    {
        events.into_iter().try_for_each(|e| self.handle(e))
    }

    fn on_enter(&mut self) {
        self.pointer_inside = true;
        if self.mode == SessionMode::Idle {
            self.mode = SessionMode::Hovering;
        }
    }

    fn on_leave(&mut self) {
        self.pointer_inside = false;
        match self.mode {
            SessionMode::PickingColor { .. } => {}
            SessionMode::EditingLabel => {
                self.shown = Shown::Color;
            }
            SessionMode::Hovering | SessionMode::Idle => {
                self.mode = SessionMode::Idle;
                self.hovered = None;
                self.label_buffer.clear();
                self.shown = Shown::Color;
            }
        }
    }

    fn on_move(&mut self, x: f64, y: f64) -> Result<()> {
        if !self.pointer_inside {
            return Ok(());
        }
        match self.mode {
            SessionMode::Hovering | SessionMode::EditingLabel => {
                let cluster = self.cluster_at(x, y)?;
                if self.hovered != Some(cluster) {
                    if self.mode == SessionMode::EditingLabel {
                        debug!(cluster, "Pointer moved to another cluster, edit abandoned");
                    }
                    self.hover(cluster);
                }
            }
            SessionMode::PickingColor { .. } | SessionMode::Idle => {}
        }
        Ok(())
    }

    fn on_click(&mut self, x: f64, y: f64) -> Result<()> {
        if !self.pointer_inside {
            return Ok(());
        }
        match self.mode {
            SessionMode::Hovering => {
                let cluster = self.cluster_at(x, y)?;
                self.begin_pick(cluster)?;
            }
            SessionMode::PickingColor { .. } => {
                let rgb = picker::sample(&self.picker, self.shape(), x, y)?;
                self.commit_color(rgb)?;
            }
            SessionMode::EditingLabel | SessionMode::Idle => {}
        }
        Ok(())
    }

    fn on_key(&mut self, key: Key) {
        match self.mode {
            SessionMode::Idle => {}
            SessionMode::Hovering => {
                if let (Key::Char(c), Some(_)) = (&key, self.hovered) {
                    self.mode = SessionMode::EditingLabel;
                    self.label_buffer.clear();
                    self.label_buffer.push(*c);
                }
            }
            SessionMode::EditingLabel => match key {
                Key::Enter => {
                    if let Some(cluster) = self.hovered {
                        self.label_names[cluster] = self.label_buffer.clone();
                        debug!(cluster, name = %self.label_buffer, "Cluster renamed");
                        self.finish_edit(cluster);
                    }
                }
                Key::Escape => {
                    if let Some(cluster) = self.hovered {
                        self.label_buffer = self.label_names[cluster].clone();
                        self.finish_edit(cluster);
                    }
                }
                other => self.edit_buffer(other),
            },
            SessionMode::PickingColor { pending } => match key {
                Key::Escape => self.cancel_pick(),
                Key::Enter => {
                    self.label_names[pending] = self.label_buffer.clone();
                    self.cancel_pick();
                    if self.pointer_inside {
                        self.shown = Shown::Highlight(pending);
                    }
                }
                other => self.edit_buffer(other),
            },
        }
    }

    fn edit_buffer(&mut self, key: Key) {
        match key {
            Key::Char(c) => self.label_buffer.push(c),
            Key::Backspace => {
                self.label_buffer.pop();
            }
            Key::ClearBuffer => self.label_buffer.clear(),
            Key::Enter | Key::Escape | Key::Other(_) => {}
        }
    }

    fn hover(&mut self, cluster: usize) {
        self.mode = SessionMode::Hovering;
        self.hovered = Some(cluster);
        self.shown = Shown::Highlight(cluster);
        self.label_buffer = self.label_names[cluster].clone();
    }

    fn finish_edit(&mut self, cluster: usize) {
        self.mode = self.resting_mode();
        self.shown = if self.pointer_inside {
            Shown::Highlight(cluster)
        } else {
            Shown::Color
        };
    }
}
