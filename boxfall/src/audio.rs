//! Audio seam. Playback is fire-and-forget: hosts swallow autoplay
//! rejections and the core never waits on a sound.

/// One-shot feedback sounds for a scored press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Good,
    Bad,
}

pub trait AudioOut {
    /// Start (or restart) the background track.
    fn music_play(&mut self);

    /// Pause the background track, keeping its position.
    fn music_pause(&mut self);

    /// Play a one-shot cue over the music.
    fn cue(&mut self, cue: Cue);
}
