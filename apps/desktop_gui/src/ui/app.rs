use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiEvent, ViewMessage};
use crate::controller::reducer::Coordinator;
use crate::ui::{user_modal::UserModal, user_table};

const REPAINT_INTERVAL: std::time::Duration = std::time::Duration::from_millis(100);

pub struct UserDirectoryApp {
    coordinator: Coordinator,
    ui_rx: Receiver<UiEvent>,
    user_modal: UserModal,
    api_base_url: String,
}

impl UserDirectoryApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: impl Into<String>,
    ) -> Self {
        Self {
            coordinator: Coordinator::start(cmd_tx),
            ui_rx,
            user_modal: UserModal::default(),
            api_base_url: api_base_url.into(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.coordinator.handle_ui_event(event);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("app_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("User Management");
            ui.label("Browse users, open their details, and remove them from the list.");
            ui.add_space(6.0);
        });
    }

    fn show_footer(&self, ctx: &egui::Context) {
        let state = self.coordinator.state();
        egui::TopBottomPanel::bottom("app_footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Powered by {} & egui", self.api_base_url));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let pending = state.pending_delete_count();
                    if pending > 0 {
                        ui.label(format!("{pending} delete(s) in flight"));
                        ui.separator();
                    }
                    ui.label(self.coordinator.status());
                });
            });
        });
    }

    fn show_main(&self, ctx: &egui::Context) -> Vec<ViewMessage> {
        let state = self.coordinator.state();
        let mut messages = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            if state.is_loading() {
                ui.centered_and_justified(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading users...");
                    });
                });
            } else if state.has_error() {
                let error_color = ui.visuals().error_fg_color;
                ui.centered_and_justified(|ui| {
                    ui.colored_label(error_color, "Failed to load users.");
                });
            } else {
                messages = user_table::show(ui, state.users(), |user_id| {
                    state.is_delete_pending(user_id)
                });
            }
        });
        messages
    }

    fn show_notice(&self, ctx: &egui::Context) -> Option<ViewMessage> {
        let state = self.coordinator.state();
        let notice = state.notice()?;
        let queued = state.queued_notice_count();
        let modal = egui::Modal::new(egui::Id::new("delete_failure_notice")).show(ctx, |ui| {
            ui.set_width(320.0);
            ui.label(notice);
            if queued > 1 {
                ui.small(format!("{} more after this one", queued - 1));
            }
            ui.add_space(8.0);
            ui.button("OK").clicked()
        });
        modal.inner.then_some(ViewMessage::AcknowledgeNotice)
    }
}

impl eframe::App for UserDirectoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_footer(ctx);
        let mut messages = self.show_main(ctx);

        let notice_open = self.coordinator.state().notice().is_some();
        let selected = self.coordinator.state().selected_user().cloned();
        messages.extend(self.user_modal.show(ctx, selected.as_ref(), !notice_open));
        messages.extend(self.show_notice(ctx));

        for message in messages {
            self.coordinator.handle_view_message(message);
        }

        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}
