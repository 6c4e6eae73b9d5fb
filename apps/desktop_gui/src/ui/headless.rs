//! Drives an egui context without a window so views can be clicked in tests.

use eframe::egui;

const SCREEN_SIZE: egui::Vec2 = egui::vec2(1200.0, 800.0);

#[derive(Default)]
pub struct Headless {
    ctx: egui::Context,
}

impl Headless {
    /// Runs one frame with `events` as input and returns what `run` produced
    /// in its last pass.
    pub fn frame<R>(
        &self,
        events: Vec<egui::Event>,
        mut run: impl FnMut(&egui::Context) -> R,
    ) -> R {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, SCREEN_SIZE)),
            events,
            ..Default::default()
        };
        let mut output = None;
        let _ = self.ctx.run(input, |ctx| output = Some(run(ctx)));
        output.expect("egui runs the ui at least once per frame")
    }
}

/// Input for a primary click at `pos`: press in one frame, release in the next.
pub fn click_events(pos: egui::Pos2) -> [Vec<egui::Event>; 2] {
    [
        vec![egui::Event::PointerMoved(pos), primary_button(pos, true)],
        vec![primary_button(pos, false)],
    ]
}

pub fn key_press(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

fn primary_button(pos: egui::Pos2, pressed: bool) -> egui::Event {
    egui::Event::PointerButton {
        pos,
        button: egui::PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}
