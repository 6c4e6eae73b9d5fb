//! Table of loaded users. Rendering only; activations come back as messages.

use eframe::egui;
use shared::domain::{UserId, UserRecord};

use crate::controller::events::ViewMessage;

const COLUMN_HEADERS: [&str; 6] = ["Name / Email", "Address", "Phone", "Website", "Company", ""];

/// Text of the five clickable cells of a row, in column order.
pub fn row_cells(user: &UserRecord) -> [String; 5] {
    [
        format!("{}\n{}", user.name, user.email),
        user.address.summary(),
        user.phone.clone(),
        user.website.clone(),
        user.company.name.clone(),
    ]
}

/// Responses of one rendered row.
struct RowResponse {
    user_id: UserId,
    cells: Vec<egui::Response>,
    delete: egui::Response,
}

impl RowResponse {
    /// Activating any data cell selects the row; the delete button only ever
    /// emits `Delete`.
    fn messages(&self) -> Vec<ViewMessage> {
        let mut messages = Vec::new();
        if self.cells.iter().any(egui::Response::clicked) {
            messages.push(ViewMessage::Select {
                user_id: self.user_id,
            });
        }
        if self.delete.clicked() {
            messages.push(ViewMessage::Delete {
                user_id: self.user_id,
            });
        }
        messages
    }
}

/// Renders every user in the order given.
pub fn show(
    ui: &mut egui::Ui,
    users: &[UserRecord],
    is_delete_pending: impl Fn(UserId) -> bool,
) -> Vec<ViewMessage> {
    render_rows(ui, users, is_delete_pending)
        .iter()
        .flat_map(RowResponse::messages)
        .collect()
}

fn render_rows(
    ui: &mut egui::Ui,
    users: &[UserRecord],
    is_delete_pending: impl Fn(UserId) -> bool,
) -> Vec<RowResponse> {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("user_table")
                .num_columns(COLUMN_HEADERS.len())
                .striped(true)
                .spacing([16.0, 8.0])
                .show(ui, |ui| {
                    for header in COLUMN_HEADERS {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();

                    users
                        .iter()
                        .map(|user| {
                            let cells: Vec<egui::Response> = row_cells(user)
                                .into_iter()
                                .map(|cell| ui.selectable_label(false, cell))
                                .collect();

                            let pending = is_delete_pending(user.id);
                            let label = if pending { "Deleting..." } else { "Delete" };
                            let delete = ui
                                .add_enabled(!pending, egui::Button::new(label))
                                .on_hover_text(format!("Delete {}", user.name));
                            ui.end_row();

                            RowResponse {
                                user_id: user.id,
                                cells,
                                delete,
                            }
                        })
                        .collect::<Vec<_>>()
                })
                .inner
        })
        .inner
}
