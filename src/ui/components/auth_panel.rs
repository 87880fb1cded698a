use eframe::egui;

use crate::ui::auth_form::{AuthForm, AuthMode};

#[derive(Default)]
pub struct AuthActions {
    pub submit: bool,
    pub switch_screen: bool,
}

pub fn render(ui: &mut egui::Ui, form: &mut AuthForm) -> AuthActions {
    let mut actions = AuthActions::default();

    ui.label("Email:");
    ui.text_edit_singleline(&mut form.email);

    ui.label("Password:");
    let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
    if password.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
        actions.submit = true;
    }

    if let Some(error) = &form.error_message {
        ui.colored_label(egui::Color32::RED, error);
    }

    ui.add_space(8.0);
    let (submit_label, switch_label) = match form.mode {
        AuthMode::Login => ("Log in", "No account yet? Register"),
        AuthMode::Register => ("Register", "Already registered? Log in"),
    };
    ui.horizontal(|ui| {
        if ui
            .add_enabled(!form.is_submitting, egui::Button::new(submit_label))
            .clicked()
        {
            actions.submit = true;
        }
        if form.is_submitting {
            ui.spinner();
        }
    });

    ui.separator();
    if ui.link(switch_label).clicked() {
        actions.switch_screen = true;
    }

    actions
}
