use eframe::egui;

use crate::ui::notice::{Notice, NoticeKind};

/// Returns true when the notice was dismissed.
pub fn render(ui: &mut egui::Ui, notice: &Notice) -> bool {
    let color = match notice.kind {
        NoticeKind::Success => egui::Color32::GREEN,
        NoticeKind::Error => egui::Color32::RED,
    };
    let mut dismissed = false;
    ui.horizontal(|ui| {
        ui.colored_label(color, &notice.text);
        if ui.small_button("✕").clicked() {
            dismissed = true;
        }
    });
    dismissed
}
