use super::preview::{DecodedPreview, Preview};
use crate::workflow::{Completion, Workflow};
use std::fmt::Display;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, warn};

/// Everything the window owns besides the API client.
pub struct AppState {
    pub workflow: Workflow,
    pub preview: Option<Preview>,
    /// Last validation warning, shown until dismissed or superseded.
    pub notice: Option<String>,
    pub show_details: bool,
    pub completion_sender: Sender<Completion>,
    pub completion_receiver: Receiver<Completion>,
    pub preview_sender: Sender<DecodedPreview>,
    pub preview_receiver: Receiver<DecodedPreview>,
}

impl Default for AppState {
    fn default() -> Self {
        let (completion_sender, completion_receiver) = mpsc::channel();
        let (preview_sender, preview_receiver) = mpsc::channel();
        Self {
            workflow: Workflow::new(),
            preview: None,
            notice: None,
            show_details: false,
            completion_sender,
            completion_receiver,
            preview_sender,
            preview_receiver,
        }
    }
}

impl AppState {
    pub fn warn(&mut self, notice: impl Display) {
        let notice = notice.to_string();
        warn!(notice = %notice, "user notice");
        self.notice = Some(notice);
    }

    /// Applies every completion that has arrived since the last frame.
    /// Returns how many changed the workflow.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_receiver.try_recv() {
            if self.workflow.apply(completion) == crate::workflow::Applied::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Installs a decoded thumbnail if it still belongs to the current
    /// selection. A failed decode leaves no preview.
    pub fn apply_preview(&mut self, decoded: DecodedPreview) -> bool {
        if decoded.cycle != self.workflow.cycle() {
            debug!(cycle = %decoded.cycle, current = %self.workflow.cycle(), "discarding stale preview");
            return false;
        }

        self.preview = match decoded.image {
            Ok(image) => Some(Preview::new(decoded.name, image)),
            Err(e) => {
                warn!(name = %decoded.name, error = %e, "could not decode preview");
                None
            }
        };
        true
    }

    pub fn drain_previews(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(decoded) = self.preview_receiver.try_recv() {
            if self.apply_preview(decoded) {
                applied += 1;
            }
        }
        applied
    }
}
