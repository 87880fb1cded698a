use eframe::egui;

use crate::common::Author;
use crate::ui::chat_session::ChatSession;
use crate::ui::scroll::ScrollTracker;

pub fn render(ui: &mut egui::Ui, session: &mut ChatSession, tracker: &mut ScrollTracker) {
    let scroll_now = session
        .take_scroll_request()
        .is_some_and(|request| tracker.should_scroll(request.force));

    let output = egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            if session.is_loading_history() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading history...");
                });
            }

            for message in session.messages() {
                let (name, color) = match message.author {
                    Author::User => ("You", egui::Color32::LIGHT_BLUE),
                    Author::Assistant => ("Tutor", egui::Color32::LIGHT_GREEN),
                };
                ui.colored_label(color, name);
                ui.label(&message.text);
                ui.add_space(6.0);
            }

            if session.is_awaiting_reply() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Tutor is typing...").weak());
                });
            }

            if scroll_now {
                ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
            }
        });

    tracker.observe(
        output.state.offset.y,
        output.inner_rect.height(),
        output.content_size.y,
    );
}
