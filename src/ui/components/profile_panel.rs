use eframe::egui;

use crate::ui::profile_form::{ENGLISH_LEVELS, GOAL_MAX_CHARS, ProfileForm};

#[derive(Default)]
pub struct ProfileActions {
    pub save: bool,
    pub clear: bool,
    pub go_to_chat: bool,
}

pub fn render(ui: &mut egui::Ui, form: &mut ProfileForm) -> ProfileActions {
    let mut actions = ProfileActions::default();

    if form.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading...");
        });
    }

    ui.label("English level:");
    let selected = if form.english_level.is_empty() {
        "Select your level"
    } else {
        form.english_level.as_str()
    }
    .to_string();
    egui::ComboBox::from_id_salt("english_level")
        .selected_text(selected)
        .show_ui(ui, |ui| {
            for level in ENGLISH_LEVELS {
                ui.selectable_value(&mut form.english_level, level.to_string(), level);
            }
        });

    ui.add_space(6.0);
    ui.label("Learning goal:");
    ui.add(
        egui::TextEdit::multiline(&mut form.learning_goal)
            .desired_rows(4)
            .hint_text("What do you want to achieve with English?"),
    );
    ui.label(
        egui::RichText::new(format!(
            "{}/{GOAL_MAX_CHARS}",
            form.learning_goal.trim().chars().count()
        ))
        .weak(),
    );

    ui.add_space(6.0);
    ui.label("Favourite music genres (comma separated):");
    ui.text_edit_singleline(&mut form.music_genres);

    if let Err(err) = form.validate() {
        ui.label(egui::RichText::new(err.to_string()).weak());
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        if ui
            .add_enabled(form.can_save(), egui::Button::new("Save profile"))
            .clicked()
        {
            actions.save = true;
        }
        if ui.button("Clear").clicked() {
            actions.clear = true;
        }
        if ui.button("Go to chat").clicked() {
            actions.go_to_chat = true;
        }
    });

    if form.redirect_pending() {
        ui.label(egui::RichText::new("Opening the chat...").weak());
    }

    actions
}
