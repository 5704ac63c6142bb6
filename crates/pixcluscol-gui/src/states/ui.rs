use std::path::PathBuf;

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub labels_path: Option<PathBuf>,
    pub reference_path: Option<PathBuf>,
    pub annotation_path: Option<PathBuf>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_reference: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
