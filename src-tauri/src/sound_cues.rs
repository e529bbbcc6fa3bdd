//! Audio cues played while the gateway UI is chatting.
//!
//! Detection runs in the page (a `MutationObserver` over added nodes); this
//! module owns the tone table and the pattern lists the page script is
//! configured with. Swapping the heuristic means swapping the
//! [`NodeClassifier`]; the observer and the tones stay as they are.

use serde::Serialize;
use serde_json::{json, Value};

use crate::shell_scripts::render_script;

const SOUND_CUES_TEMPLATE: &str = include_str!("scripts/sound_cues.js");
pub(crate) const SOUND_CUES_INSTALLED_FLAG: &str = "__openclawSoundCuesInstalled";
pub(crate) const THINKING_DEBOUNCE_MS: u64 = 3_000;
// Enter in a form field fires both keydown and submit.
pub(crate) const SEND_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SoundCue {
    pub(crate) start_hz: f32,
    pub(crate) end_hz: f32,
    pub(crate) duration_ms: u32,
    pub(crate) waveform: &'static str,
    pub(crate) gain: f32,
}

pub(crate) const SEND_CUE: SoundCue = SoundCue {
    start_hz: 520.0,
    end_hz: 880.0,
    duration_ms: 140,
    waveform: "sine",
    gain: 0.08,
};

pub(crate) const RESPONSE_CUE: SoundCue = SoundCue {
    start_hz: 880.0,
    end_hz: 520.0,
    duration_ms: 180,
    waveform: "sine",
    gain: 0.08,
};

pub(crate) const THINKING_CUE: SoundCue = SoundCue {
    start_hz: 220.0,
    end_hz: 240.0,
    duration_ms: 400,
    waveform: "triangle",
    gain: 0.04,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NodeClassifier {
    pub(crate) thinking_patterns: Vec<&'static str>,
    pub(crate) response_patterns: Vec<&'static str>,
}

impl Default for NodeClassifier {
    fn default() -> Self {
        Self {
            thinking_patterns: vec!["thinking", "typing", "loading-dots", "spinner", "pending"],
            response_patterns: vec![
                "assistant",
                "chat-message--bot",
                "message-assistant",
                "bot-message",
                "response",
            ],
        }
    }
}

fn script_config(classifier: &NodeClassifier) -> Value {
    json!({
        "flag": SOUND_CUES_INSTALLED_FLAG,
        "thinkingPatterns": classifier.thinking_patterns,
        "responsePatterns": classifier.response_patterns,
        "thinkingDebounceMs": THINKING_DEBOUNCE_MS,
        "sendDebounceMs": SEND_DEBOUNCE_MS,
        "cues": {
            "send": SEND_CUE,
            "response": RESPONSE_CUE,
            "thinking": THINKING_CUE,
        },
    })
}

pub(crate) fn sound_cues_script(classifier: &NodeClassifier) -> String {
    render_script(SOUND_CUES_TEMPLATE, &script_config(classifier))
}
