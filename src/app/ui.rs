use super::CleanupBot;
use crate::upload::IMAGE_EXTENSIONS;
use crate::utils::file_size::human_readable_bytes;
use crate::workflow::{present, StatusView, Verdict};
use eframe::egui::{self, Align, Color32, RichText};
use rfd::FileDialog;

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const CLEAN: Color32 = Color32::from_rgb(0, 180, 0);
const DIRTY: Color32 = Color32::from_rgb(230, 140, 20);
const FAILURE: Color32 = Color32::from_rgb(220, 50, 50);

impl CleanupBot {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    ui.vertical_centered(|ui| {
                        ui.heading("Clean Up Bot");
                        ui.add_space(5.0);
                        ui.label(
                            RichText::new("Upload a photo and find out whether the space is tidy")
                                .color(ui.visuals().text_color().gamma_multiply(0.7)),
                        );
                    });

                    ui.add_space(20.0);
                    self.render_intake(ui);
                    ui.add_space(20.0);
                    self.render_preview(ui);
                    ui.add_space(20.0);
                    self.render_actions(ui);
                    ui.add_space(20.0);
                    self.render_status(ui);

                    if self.state.workflow.selected_file().is_some() {
                        ui.add_space(10.0);
                        self.render_details(ui);
                    }

                    ui.add_space(20.0);
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                self.render_footer(ui);
            });
        });
    }

    fn render_intake(&mut self, ui: &mut egui::Ui) {
        let hovering = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());

        ui.group(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                if hovering {
                    ui.label(RichText::new("Drop the image to upload it").color(ACCENT));
                } else {
                    ui.label("Drag and drop an image here");
                    ui.label(
                        RichText::new("or pick one from disk")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                }
                ui.add_space(8.0);

                if ui.button("📁 Select Image").clicked() {
                    let paths = FileDialog::new()
                        .add_filter("Images", &IMAGE_EXTENSIONS)
                        .pick_files()
                        .unwrap_or_default();
                    let ctx = ui.ctx().clone();
                    self.select_paths(&ctx, paths);
                }
                ui.add_space(8.0);
            });
        });
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let Some(preview) = self.state.preview.as_mut() else {
            return;
        };
        let size = preview.size();
        let name = preview.name().to_string();

        if let Some(texture) = preview.texture(&ctx) {
            let sized = egui::load::SizedTexture::new(texture.id(), size);
            ui.vertical_centered(|ui| {
                ui.image(sized).on_hover_text(name);
            });
        }
    }

    fn render_actions(&mut self, ui: &mut egui::Ui) {
        let view = present(&self.state.workflow);
        let (enabled, label) = (view.analyze_enabled, view.analyze_label);

        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(enabled, |ui| {
                let button = egui::Button::new(format!("🔍 {label}"))
                    .min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    let ctx = ui.ctx().clone();
                    self.analyze(&ctx);
                }
            });
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let view = present(&self.state.workflow);
        let mut open_link = None;

        match view.status {
            StatusView::Hidden => {}
            StatusView::Busy(label) => {
                ui.vertical_centered(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(label);
                    });
                });
            }
            StatusView::Verdict {
                verdict,
                explanation,
                imglink,
            } => {
                ui.group(|ui| {
                    ui.vertical_centered(|ui| {
                        let (icon, color) = match verdict {
                            Verdict::Clean => ("✅", CLEAN),
                            Verdict::Dirty => ("🧹", DIRTY),
                        };
                        ui.label(
                            RichText::new(format!("{} {}", icon, verdict.headline()))
                                .color(color)
                                .strong(),
                        );
                        ui.add_space(5.0);
                        ui.label(explanation);
                        ui.add_space(5.0);
                        if ui.link("Open image").clicked() {
                            open_link = Some(imglink.to_string());
                        }
                    });
                });
            }
            StatusView::Failure(message) => {
                ui.vertical_centered(|ui| {
                    ui.colored_label(FAILURE, message);
                });
            }
        }

        if let Some(imglink) = open_link {
            self.open_image(&imglink);
        }
    }

    fn render_details(&mut self, ui: &mut egui::Ui) {
        if ui
            .button(if self.state.show_details {
                "Hide Details"
            } else {
                "Show Details"
            })
            .clicked()
        {
            self.state.show_details = !self.state.show_details;
        }

        if !self.state.show_details {
            return;
        }

        let workflow = &self.state.workflow;
        egui::Frame::none()
            .fill(ui.style().visuals.extreme_bg_color)
            .inner_margin(8.0)
            .show(ui, |ui| {
                if let Some(file) = workflow.selected_file() {
                    ui.label(format!(
                        "File: {} ({}, {})",
                        file.name,
                        file.mime,
                        human_readable_bytes(file.len as u64)
                    ));
                }
                ui.label(format!("Status: {}", workflow.status()));
                match workflow.reference() {
                    Some(reference) => ui.label(format!("Reference: {reference}")),
                    None => ui.label("Reference: none"),
                };
            });
    }

    fn render_footer(&mut self, ui: &mut egui::Ui) {
        let mut dismissed = false;
        if let Some(notice) = &self.state.notice {
            ui.add_space(5.0);
            ui.vertical_centered(|ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(FAILURE, notice.as_str());
                    if ui.small_button("✖").clicked() {
                        dismissed = true;
                    }
                });
            });
        }
        if dismissed {
            self.state.notice = None;
        }
    }
}
