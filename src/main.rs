#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;

use clap::Parser;
use eframe::{egui, App, NativeOptions};

use lingotap::api::gemini::GeminiClient;
use lingotap::config::{self, Config};
use lingotap::interaction::{ModeBoard, SwipeTracker};
use lingotap::types::pairs::{DisplayMode, SentencePair};
use lingotap::worker::{spawn_request_chain, ChainResult, SourceAction};

const TITLE_SIZE_NORMAL: f32 = 28.0;
const TITLE_SIZE_LARGE: f32 = 36.0;
const TEXT_SIZE_NORMAL: f32 = 16.0;
const TEXT_SIZE_LARGE: f32 = 22.0;

const HIGHLIGHT_SPANISH: egui::Color32 = egui::Color32::from_rgb(219, 234, 254);
const HIGHLIGHT_ENGLISH: egui::Color32 = egui::Color32::from_rgb(254, 226, 226);

#[derive(Parser, Debug)]
#[command(name = "lingotap", about = "Tap-to-reveal Spanish reading practice")]
struct Args {
    /// Path to the TOML config file with the Gemini API key and model.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

struct LingoTapApp {
    config: Option<Config>,
    config_error: Option<String>,
    prompt_input: String,
    pairs: Vec<SentencePair>,
    modes: ModeBoard,
    dropped_lines: usize,
    busy_action: Option<SourceAction>,
    in_flight: usize,
    swipe: SwipeTracker,
    large_text: bool,
    results_tx: Sender<ChainResult>,
    results_rx: Receiver<ChainResult>,
}

impl LingoTapApp {
    fn new(_cc: &eframe::CreationContext<'_>, args: &Args) -> Self {
        let mut config_val = None;
        let mut config_error_val = None;

        match config::load_config_from_file(&args.config) {
            Ok(loaded_config) => {
                config_val = Some(loaded_config);
            }
            Err(err_msg) => {
                log::error!("Error loading {}: {}", args.config, err_msg);
                config_error_val = Some(err_msg);
            }
        }

        let (results_tx, results_rx) = channel();
        Self {
            config: config_val,
            config_error: config_error_val,
            prompt_input: String::new(),
            pairs: Vec::new(),
            modes: ModeBoard::new(),
            dropped_lines: 0,
            busy_action: None,
            in_flight: 0,
            swipe: SwipeTracker::new(),
            large_text: false,
            results_tx,
            results_rx,
        }
    }

    fn start_chain(&mut self, action: SourceAction) {
        if self.prompt_input.trim().is_empty() {
            return;
        }
        let Some(conf) = &self.config else {
            return;
        };
        let Some(api_key) = conf.resolved_api_key() else {
            self.config_error = Some(format!(
                "No API key configured. Set api_key in the config file or the {} environment variable.",
                config::API_KEY_ENV
            ));
            return;
        };

        let client = GeminiClient::new(api_key, conf.model.clone());
        self.busy_action = Some(action);
        self.in_flight += 1;
        spawn_request_chain(
            client,
            action,
            self.prompt_input.clone(),
            self.results_tx.clone(),
        );
    }

    fn apply_chain_result(&mut self, result: ChainResult) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.busy_action == Some(result.action) {
            self.busy_action = None;
        }
        // A chain with no output leaves the current pairs on screen; the
        // button simply returns to its idle label.
        if let Some(output) = result.outcome {
            self.modes.reset(output.pairs.len());
            self.pairs = output.pairs;
            self.dropped_lines = output.dropped_lines;
        }
    }

    fn show_pairs(&mut self, ui: &mut egui::Ui) {
        let text_size = if self.large_text {
            TEXT_SIZE_LARGE
        } else {
            TEXT_SIZE_NORMAL
        };

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for index in 0..self.pairs.len() {
                        let mode = self.modes.get(index).unwrap_or_default();
                        let pair = &self.pairs[index];
                        let shown = if mode.shows_english() {
                            &pair.english
                        } else {
                            &pair.spanish
                        };

                        let mut rich = egui::RichText::new(format!(" {} ", shown)).size(text_size);
                        match mode {
                            DisplayMode::Spanish => {}
                            DisplayMode::SpanishHighlighted => {
                                rich = rich
                                    .background_color(HIGHLIGHT_SPANISH)
                                    .color(egui::Color32::BLACK);
                            }
                            DisplayMode::EnglishHighlighted => {
                                rich = rich
                                    .background_color(HIGHLIGHT_ENGLISH)
                                    .color(egui::Color32::BLACK);
                            }
                            DisplayMode::EnglishDimmed => {
                                rich = rich.weak();
                            }
                        }

                        let response = ui
                            .add(egui::Label::new(rich).sense(egui::Sense::click_and_drag()))
                            .on_hover_cursor(egui::CursorIcon::PointingHand);

                        if response.drag_started() {
                            self.swipe.begin(index);
                        }
                        if response.dragged() {
                            self.swipe.drag(index, response.drag_delta().x);
                        }
                        if response.drag_stopped() {
                            if let Some(direction) = self.swipe.release(index) {
                                self.modes.swipe(index, direction);
                            }
                        }
                        if response.clicked() {
                            self.modes.tap(index);
                        }
                    }
                });
            });
    }
}

impl App for LingoTapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply_chain_result(result);
        }
        if self.in_flight > 0 {
            // Keep polling the channel while any chain is in flight; a stale
            // chain can still deliver after a newer one cleared the busy flag.
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let title_size = if self.large_text {
                TITLE_SIZE_LARGE
            } else {
                TITLE_SIZE_NORMAL
            };
            let title = egui::RichText::new("Translation").strong().size(title_size);
            ui.vertical_centered(|ui| {
                let response = ui
                    .add(egui::Label::new(title).sense(egui::Sense::click()))
                    .on_hover_text("Click to toggle text size");
                if response.clicked() {
                    self.large_text = !self.large_text;
                }
            });

            if let Some(err) = &self.config_error {
                ui.colored_label(egui::Color32::RED, err);
            }

            ui.add(
                egui::TextEdit::multiline(&mut self.prompt_input)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .hint_text("Enter a story prompt or your own English text..."),
            );

            ui.horizontal(|ui| {
                for action in [
                    SourceAction::CreateStory,
                    SourceAction::FollowInstruction,
                    SourceAction::UseOwnText,
                ] {
                    let busy = self.busy_action == Some(action);
                    let label = if busy {
                        action.busy_label()
                    } else {
                        action.idle_label()
                    };
                    if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                        self.start_chain(action);
                    }
                }
            });

            if self.dropped_lines > 0 {
                ui.colored_label(
                    egui::Color32::YELLOW,
                    format!(
                        "{} malformed translation line(s) were skipped.",
                        self.dropped_lines
                    ),
                );
            }

            ui.separator();

            if self.pairs.is_empty() {
                ui.label("Tap a sentence to reveal its other reading. Swipe left for Spanish, right to dim in English.");
            } else {
                self.show_pairs(ui);
            }
        });
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let args = Args::parse();

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 640.0])
            .with_min_inner_size([480.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "LingoTap",
        options,
        Box::new(move |cc| Box::new(LingoTapApp::new(cc, &args))),
    )
}
