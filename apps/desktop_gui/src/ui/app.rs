use std::time::Duration;

use chrono::Local;
use client_core::{FailureDisplay, ResolutionPolicy, ResponseOrdering, ViewState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::reduce;
use crate::ui::{panels, shell};

#[derive(Debug, Clone)]
pub struct StartupConfig {
    pub endpoint_label: String,
    pub policy: ResolutionPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusBannerSeverity {
    Error,
}

#[derive(Debug, Clone)]
struct StatusBanner {
    severity: StatusBannerSeverity,
    message: String,
}

fn ordering_label(ordering: ResponseOrdering) -> &'static str {
    match ordering {
        ResponseOrdering::LastIssuedWins => "Newest submission wins",
        ResponseOrdering::LastResolvedWins => "Last response to arrive wins",
    }
}

fn failure_display_label(failures: FailureDisplay) -> &'static str {
    match failures {
        FailureDisplay::Surface => "Show an error",
        FailureDisplay::Silent => "Keep silent",
    }
}

fn banner_for(err: &UiError) -> StatusBanner {
    let prefix = match err.context() {
        UiErrorContext::BackendStartup => "Startup",
        UiErrorContext::Submit => "Submit",
    };
    StatusBanner {
        severity: StatusBannerSeverity::Error,
        message: format!("{prefix} ({}): {}", err.category().label(), err.message()),
    }
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    endpoint_label: String,
    policy: ResolutionPolicy,

    sentence: String,
    state: ViewState,

    status: String,
    status_banner: Option<StatusBanner>,
    focus_input: bool,
}

impl DesktopGuiApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            endpoint_label: startup.endpoint_label,
            policy: startup.policy,
            sentence: String::new(),
            state: ViewState::new(),
            status: "Starting...".to_string(),
            status_banner: None,
            focus_input: true,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            let reduction = reduce(&self.state, event, self.policy);
            self.state = reduction.state;
            if let Some(status) = reduction.status {
                self.status = status;
            }
            if let Some(err) = reduction.error {
                self.status_banner = Some(banner_for(&err));
            }
        }
    }

    fn try_submit(&mut self) {
        // No trimming or validation: the sentence goes out exactly as typed.
        let sentence = self.sentence.clone();
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::Compress { sentence },
            &mut self.status,
        );
        if !queued {
            let err = UiError::from_message(UiErrorContext::Submit, self.status.clone());
            self.status_banner = Some(banner_for(&err));
        }
    }

    fn show_banner(ui: &mut egui::Ui, message: &str) -> bool {
        let mut dismissed = false;
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
            });
        dismissed
    }

    fn show_status_banners(&mut self, ui: &mut egui::Ui) {
        if let Some(banner) = self.status_banner.clone() {
            match banner.severity {
                StatusBannerSeverity::Error => {
                    if Self::show_banner(ui, &banner.message) {
                        self.status_banner = None;
                    }
                }
            }
            ui.add_space(6.0);
        }

        if let Some(notice) = self.state.failure().cloned() {
            let at = notice.occurred_at.with_timezone(&Local).format("%H:%M:%S");
            let message = format!(
                "{} {} at {at}: {}",
                notice.headline(),
                notice.kind.label(),
                notice.message
            );
            if Self::show_banner(ui, &message) {
                self.state = self.state.without_failure();
            }
            ui.add_space(6.0);
        }
    }

    fn show_form(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Sentence").strong().size(16.0));
        ui.horizontal(|ui| {
            let button_width = 110.0;
            let edit = egui::TextEdit::singleline(&mut self.sentence)
                .id_salt("sentence")
                .hint_text("Input Sentence...")
                .desired_width((ui.available_width() - button_width).max(120.0));
            let response = ui.add_sized([0.0, 30.0], edit);
            if self.focus_input {
                response.request_focus();
                self.focus_input = false;
            }

            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui
                .add_sized([button_width - 10.0, 30.0], egui::Button::new("Compress"))
                .clicked();
            if enter_pressed || clicked {
                self.try_submit();
                self.focus_input = true;
            }
            if self.state.is_pending() {
                ui.spinner();
            }
        });
    }

    fn show_options(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Options")
            .default_open(false)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Endpoint:");
                    ui.monospace(&self.endpoint_label);
                });
                egui::ComboBox::from_label("Overlapping responses")
                    .selected_text(ordering_label(self.policy.ordering))
                    .show_ui(ui, |ui| {
                        for ordering in [
                            ResponseOrdering::LastIssuedWins,
                            ResponseOrdering::LastResolvedWins,
                        ] {
                            ui.selectable_value(
                                &mut self.policy.ordering,
                                ordering,
                                ordering_label(ordering),
                            );
                        }
                    });
                egui::ComboBox::from_label("When compression fails")
                    .selected_text(failure_display_label(self.policy.failures))
                    .show_ui(ui, |ui| {
                        for failures in [FailureDisplay::Surface, FailureDisplay::Silent] {
                            ui.selectable_value(
                                &mut self.policy.failures,
                                failures,
                                failure_display_label(failures),
                            );
                        }
                    });
            });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("view_shell").show(ctx, |ui| {
            shell::show_header(ui);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.small("Status:");
                ui.small(egui::RichText::new(&self.status).weak());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.style_mut().spacing.item_spacing = egui::vec2(8.0, 8.0);
                    self.show_status_banners(ui);
                    self.show_form(ui);
                    ui.add_space(10.0);

                    let view = self.state.view();
                    panels::show_compression_panel(
                        ui,
                        &view,
                        self.state.source_sentence(),
                    );
                    ui.add_space(10.0);
                    panels::show_result_panel(ui, &view);

                    ui.add_space(10.0);
                    ui.separator();
                    self.show_options(ui);
                });
        });

        if self.state.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
