use eframe::egui;

/// Enter sends, Shift+Enter inserts a newline.
pub fn render(ui: &mut egui::Ui, input_text: &mut String, show_jump: bool) -> InputActions {
    let mut actions = InputActions::default();
    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::multiline(input_text)
                .desired_rows(2)
                .desired_width(ui.available_width() - 140.0)
                .hint_text("Write in English..."),
        );
        if response.has_focus()
            && ui.input(|i| i.key_pressed(egui::Key::Enter) && !i.modifiers.shift)
        {
            actions.send = true;
        }

        if ui.button("Send").clicked() {
            actions.send = true;
        }
        if show_jump && ui.button("⬇ Bottom").clicked() {
            actions.go_to_bottom = true;
        }
    });

    actions
}

#[derive(Default)]
pub struct InputActions {
    pub send: bool,
    pub go_to_bottom: bool,
}
