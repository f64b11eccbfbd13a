mod preview;
mod state;
mod ui;

use crate::error::ValidationError;
use crate::upload::{ApiClient, FileProcessor, SelectedFile};
use crate::workflow::{self, ensure_single, Completion, CycleId};
use eframe::{egui, App};
use preview::{decode_thumbnail, DecodedPreview};
use state::AppState;
use std::future::Future;
use std::path::PathBuf;
use tokio::runtime::Handle;
use tracing::{debug, info};

pub struct CleanupBot {
    client: ApiClient,
    runtime: Handle,
    state: AppState,
}

impl CleanupBot {
    pub fn new(client: ApiClient, runtime: Handle) -> Self {
        info!("Initializing Clean Up Bot");
        Self {
            client,
            runtime,
            state: AppState::default(),
        }
    }

    /// Paths from the file dialog. A cancelled dialog is an empty selection.
    pub fn select_paths(&mut self, ctx: &egui::Context, paths: Vec<PathBuf>) {
        match FileProcessor::read_selection(&paths) {
            Ok(files) => self.select_files(ctx, files),
            Err(e) => self.state.warn(e),
        }
    }

    pub fn select_dropped(&mut self, ctx: &egui::Context, dropped: Vec<egui::DroppedFile>) {
        if let Err(e) = ensure_single(dropped.len()) {
            self.state.warn(e);
            return;
        }

        let read = dropped.iter().map(|file| match (&file.path, &file.bytes) {
            (Some(path), _) => FileProcessor::read_file(path),
            (None, Some(bytes)) => FileProcessor::from_bytes(&file.name, bytes),
            (None, None) => Err(ValidationError::Unreadable {
                path: PathBuf::from(&file.name),
                reason: "drop carried no data".to_string(),
            }),
        });
        match read.collect::<Result<Vec<_>, _>>() {
            Ok(files) => self.select_files(ctx, files),
            Err(e) => self.state.warn(e),
        }
    }

    pub fn select_files(&mut self, ctx: &egui::Context, files: Vec<SelectedFile>) {
        let ticket = match self.state.workflow.select(files) {
            Ok(ticket) => ticket,
            Err(e) => {
                self.state.warn(e);
                return;
            }
        };

        self.state.notice = None;
        // The old texture is released now; the new thumbnail arrives from the runtime.
        self.state.preview = None;
        self.decode_preview(ctx, ticket.cycle, &ticket.file);

        let client = self.client.clone();
        self.dispatch(ctx, async move { workflow::upload(&client, ticket).await });
    }

    pub fn analyze(&mut self, ctx: &egui::Context) {
        let ticket = match self.state.workflow.begin_analysis() {
            Ok(ticket) => ticket,
            Err(e) => {
                self.state.warn(e);
                return;
            }
        };

        self.state.notice = None;
        let client = self.client.clone();
        self.dispatch(ctx, async move { workflow::analyze(&client, ticket).await });
    }

    pub fn open_image(&mut self, imglink: &str) {
        let url = self.client.image_url(imglink);
        info!(url = %url, "opening analysed image");
        if let Err(e) = open::that(&url) {
            self.state.warn(format!("Could not open {url}: {e}"));
        }
    }

    fn decode_preview(&self, ctx: &egui::Context, cycle: CycleId, file: &SelectedFile) {
        let name = file.name.clone();
        let bytes = file.bytes.clone();
        let sender = self.state.preview_sender.clone();
        let ctx = ctx.clone();
        self.runtime.spawn_blocking(move || {
            let image = decode_thumbnail(&bytes);
            if sender.send(DecodedPreview { cycle, name, image }).is_err() {
                debug!("window closed before the preview was decoded");
            }
            ctx.request_repaint();
        });
    }

    fn dispatch<F>(&self, ctx: &egui::Context, operation: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let sender = self.state.completion_sender.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let completion = operation.await;
            if sender.send(completion).is_err() {
                debug!("window closed before the request finished");
            }
            ctx.request_repaint();
        });
    }

    pub fn update_state(&mut self, ctx: &egui::Context) {
        if self.state.drain_completions() + self.state.drain_previews() > 0 {
            ctx.request_repaint();
        }

        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if !dropped.is_empty() {
            self.select_dropped(ctx, dropped);
        }
    }
}

impl App for CleanupBot {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
