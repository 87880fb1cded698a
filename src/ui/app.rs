use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{NetworkCommand, NetworkEvent};

use super::components::{auth_panel, chat_area, input_bar, notice_bar, profile_panel};
use super::router::Screen;
use super::state::AppState;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct TutorApp {
    state: AppState,
    command_sender: mpsc::Sender<NetworkCommand>,
    event_receiver: mpsc::Receiver<NetworkEvent>,
}

impl TutorApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        mut state: AppState,
        command_sender: mpsc::Sender<NetworkCommand>,
        event_receiver: mpsc::Receiver<NetworkEvent>,
    ) -> Self {
        state.start();
        let mut app = Self {
            state,
            command_sender,
            event_receiver,
        };
        app.flush_commands();
        app
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.handle_event(event, Instant::now());
        }
    }

    fn flush_commands(&mut self) {
        for command in self.state.take_commands() {
            if let Err(err) = self.command_sender.try_send(command) {
                log::warn!("Failed to send command to network: {err}");
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading(self.state.screen().title());
            if self.state.is_logged_in() {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Log out").clicked() {
                        self.state.logout();
                    }
                    if self.state.screen() == Screen::Chat && ui.button("Profile").clicked() {
                        self.state.navigate(Screen::ProfileSetup);
                    }
                });
            }
        });

        if let Some(notice) = &self.state.notice {
            if notice_bar::render(ui, notice) {
                self.state.dismiss_notice();
            }
        }
    }

    fn render_screen(&mut self, ctx: &egui::Context) {
        match self.state.screen() {
            Screen::Login => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let actions = auth_panel::render(ui, &mut self.state.login);
                    if actions.submit {
                        self.state.submit_login();
                    }
                    if actions.switch_screen {
                        self.state.navigate(Screen::Register);
                    }
                });
            }
            Screen::Register => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let actions = auth_panel::render(ui, &mut self.state.register);
                    if actions.submit {
                        self.state.submit_register();
                    }
                    if actions.switch_screen {
                        self.state.navigate(Screen::Login);
                    }
                });
            }
            Screen::ProfileSetup => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let actions = profile_panel::render(ui, &mut self.state.profile);
                    if actions.save {
                        self.state.save_profile(Instant::now());
                    }
                    if actions.clear {
                        self.state.profile.clear();
                        self.state.dismiss_notice();
                    }
                    if actions.go_to_chat {
                        self.state.navigate(Screen::Chat);
                    }
                });
            }
            Screen::Chat => {
                egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
                    ui.add_space(4.0);
                    let show_jump = !self.state.scroll.is_following();
                    let actions = input_bar::render(ui, &mut self.state.chat.draft, show_jump);
                    if actions.send {
                        self.state.send_chat_message();
                    }
                    if actions.go_to_bottom {
                        self.state.chat.go_to_bottom();
                    }
                    ui.add_space(4.0);
                });
                egui::CentralPanel::default().show(ctx, |ui| {
                    let state = &mut self.state;
                    chat_area::render(ui, &mut state.chat, &mut state.scroll);
                });
            }
        }
    }
}

impl eframe::App for TutorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();
        self.state.tick(Instant::now());

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });
        self.render_screen(ctx);

        self.flush_commands();
        ctx.request_repaint_after(POLL_INTERVAL);
    }
}
