use std::sync::mpsc::Sender;
use std::thread;

use crate::api::gemini::{self, GeminiClient};
use crate::parsing::pair_parser;
use crate::types::pairs::SentencePair;

/// The three ways user text can become English source text. `UseOwnText`
/// never touches the network for the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAction {
    CreateStory,
    FollowInstruction,
    UseOwnText,
}

impl SourceAction {
    pub fn idle_label(self) -> &'static str {
        match self {
            SourceAction::CreateStory => "Create a Story",
            SourceAction::FollowInstruction => "Follow Instruction",
            SourceAction::UseOwnText => "Use My Text",
        }
    }

    pub fn busy_label(self) -> &'static str {
        match self {
            SourceAction::CreateStory | SourceAction::FollowInstruction => "Generating...",
            SourceAction::UseOwnText => "Translating...",
        }
    }
}

/// Parsed pairs from a completed chain. `outcome` is `None` when the chain
/// produced nothing to show (upstream failure, or nothing to translate);
/// the UI then leaves its current pairs untouched.
#[derive(Debug)]
pub struct ChainResult {
    pub action: SourceAction,
    pub outcome: Option<ChainOutput>,
}

#[derive(Debug)]
pub struct ChainOutput {
    pub pairs: Vec<SentencePair>,
    pub dropped_lines: usize,
}

/// Runs one generate-or-passthrough → translate → parse chain on its own
/// thread and reports back over the channel. No cancellation: a result
/// arriving after a newer chain started still lands.
pub fn spawn_request_chain(
    client: GeminiClient,
    action: SourceAction,
    input: String,
    tx: Sender<ChainResult>,
) {
    thread::spawn(move || {
        let result = run_request_chain(&client, action, &input);
        // The receiver may be gone during shutdown; nothing left to do then.
        let _ = tx.send(result);
    });
}

fn run_request_chain(client: &GeminiClient, action: SourceAction, input: &str) -> ChainResult {
    let english = match action {
        SourceAction::CreateStory => fetch_or_empty(client, gemini::story_prompt(input)),
        SourceAction::FollowInstruction => fetch_or_empty(client, gemini::instruction_prompt(input)),
        SourceAction::UseOwnText => input.to_string(),
    };
    if english.trim().is_empty() {
        log::warn!("{:?}: nothing to translate", action);
        return ChainResult {
            action,
            outcome: None,
        };
    }

    let raw = match client.generate_content(gemini::translation_prompt(&english)) {
        Ok(text) => text,
        Err(e) => {
            log::error!("{:?}: translation request failed: {}", action, e);
            return ChainResult {
                action,
                outcome: None,
            };
        }
    };

    let parsed = pair_parser::parse_translation_block(&raw);
    if parsed.dropped_lines > 0 {
        log::warn!(
            "{:?}: skipped {} malformed line(s) in translation output",
            action,
            parsed.dropped_lines
        );
    }
    ChainResult {
        action,
        outcome: Some(ChainOutput {
            pairs: parsed.pairs,
            dropped_lines: parsed.dropped_lines,
        }),
    }
}

fn fetch_or_empty(client: &GeminiClient, prompt: String) -> String {
    match client.generate_content(prompt) {
        Ok(text) => text,
        Err(e) => {
            log::error!("generation request failed: {}", e);
            String::new()
        }
    }
}
