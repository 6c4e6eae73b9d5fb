//! Detail overlay for the selected user.

use eframe::egui;
use shared::{
    domain::{UserId, UserRecord},
    links::UserLinks,
};

use crate::controller::events::{DismissReason, ViewMessage};

/// Tracks whether escape should dismiss the overlay. It is armed only while an
/// overlay is on screen and disarmed as soon as nothing is selected.
#[derive(Debug, Default)]
pub struct EscapeListener {
    armed_for: Option<UserId>,
}

impl EscapeListener {
    pub fn sync(&mut self, shown: Option<UserId>) {
        if self.armed_for == shown {
            return;
        }
        match shown {
            Some(user_id) => tracing::trace!(user_id = user_id.0, "escape listener armed"),
            None => tracing::trace!("escape listener disarmed"),
        }
        self.armed_for = shown;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_for.is_some()
    }

    pub fn poll(&self, escape_pressed: bool) -> Option<ViewMessage> {
        (self.is_armed() && escape_pressed).then_some(ViewMessage::Dismiss(DismissReason::EscapeKey))
    }
}

#[derive(Debug, Default)]
pub struct UserModal {
    escape: EscapeListener,
}

impl UserModal {
    /// Shows the overlay for `user`, or nothing when `None`. While
    /// `interactive` is false (another modal sits on top) dismissal triggers
    /// are ignored.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        user: Option<&UserRecord>,
        interactive: bool,
    ) -> Option<ViewMessage> {
        self.escape.sync(user.map(|user| user.id));
        let user = user?;

        let escape_pressed = interactive
            && self.escape.is_armed()
            && ctx.input_mut(|i| i.consume_key(egui::Modifiers::NONE, egui::Key::Escape));
        if let Some(message) = self.escape.poll(escape_pressed) {
            return Some(message);
        }

        let modal = egui::Modal::new(egui::Id::new(("user_detail_modal", user.id.0)))
            .show(ctx, |ui| show_details(ui, user));
        if !interactive {
            return None;
        }
        dismiss_message(modal.inner, modal.backdrop_response.clicked())
    }
}

fn dismiss_message(close_clicked: bool, backdrop_clicked: bool) -> Option<ViewMessage> {
    if close_clicked {
        Some(ViewMessage::Dismiss(DismissReason::CloseControl))
    } else if backdrop_clicked {
        Some(ViewMessage::Dismiss(DismissReason::OutsideClick))
    } else {
        None
    }
}

/// Returns true when the close control was activated.
fn show_details(ui: &mut egui::Ui, user: &UserRecord) -> bool {
    let links = UserLinks::for_user(user);
    let mut close_clicked = false;

    ui.set_width(420.0);
    ui.horizontal(|ui| {
        ui.heading(&user.name);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            close_clicked = ui.button("×").on_hover_text("Close").clicked();
        });
    });
    ui.hyperlink_to(&user.email, &links.mailto);

    section(ui, "Address", |ui| {
        ui.label(format!("{}, {}", user.address.street, user.address.suite));
        ui.label(format!("{}, {}", user.address.city, user.address.zipcode));
        ui.hyperlink_to("View on map", &links.map);
    });
    section(ui, "Contact", |ui| {
        labeled(ui, "Phone", &user.phone);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Website:").strong());
            ui.hyperlink_to(&user.website, &links.website);
        });
    });
    section(ui, "Company", |ui| {
        labeled(ui, "Name", &user.company.name);
        labeled(ui, "Catchphrase", &user.company.catch_phrase);
        labeled(ui, "Business", &user.company.bs);
    });

    close_clicked
}

fn section(ui: &mut egui::Ui, title: &str, add: impl FnOnce(&mut egui::Ui)) {
    ui.add_space(8.0);
    ui.separator();
    ui.label(egui::RichText::new(title).strong().size(15.0));
    add(ui);
}

fn labeled(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(egui::RichText::new(format!("{label}:")).strong());
        ui.label(value);
    });
}
