//! Audio output over `HtmlAudioElement`. One long-lived element carries the
//! background track; cues spawn throwaway elements so rapid presses can
//! overlap instead of cutting each other off.

use wasm_bindgen::JsValue;
use web_sys::HtmlAudioElement;

use crate::audio::{AudioOut, Cue};

pub struct WebAudio {
    music: HtmlAudioElement,
}

impl WebAudio {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self {
            music: HtmlAudioElement::new_with_src("/music/song-2.mp3")?,
        })
    }

    /// The background track element, for readiness listeners.
    pub fn music_element(&self) -> &HtmlAudioElement {
        &self.music
    }
}

impl AudioOut for WebAudio {
    fn music_play(&mut self) {
        let _ = self.music.play();
    }

    fn music_pause(&mut self) {
        let _ = self.music.pause();
    }

    fn cue(&mut self, cue: Cue) {
        let src = match cue {
            Cue::Good => "/music/good-score.mp3",
            Cue::Bad => "/music/bad-score.mp3",
        };
        if let Ok(sound) = HtmlAudioElement::new_with_src(src) {
            let _ = sound.play();
        }
    }
}
