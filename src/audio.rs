//! Sound cues and the playlist
//!
//! Terminals have no mixer, so cues go to a `CueSink`: the bell for the
//! moments that matter, or nothing. Cues are fire-and-forget and skipped
//! entirely while muted.

use std::io::Write;

use tracing::{trace, warn};

use crate::config::SoundOutput;
use crate::content::{Track, PLAYLIST};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Pop,
    Click,
    Success,
    Magic,
    Complete,
    Drumroll,
    Kiss,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Pop => "pop",
            SoundCue::Click => "click",
            SoundCue::Success => "success",
            SoundCue::Magic => "magic",
            SoundCue::Complete => "complete",
            SoundCue::Drumroll => "drumroll",
            SoundCue::Kiss => "kiss",
        }
    }

    /// Small interface feedback rather than a milestone
    pub fn is_subtle(self) -> bool {
        matches!(self, SoundCue::Pop | SoundCue::Click)
    }
}

/// Somewhere cues can be played
pub trait CueSink: Send {
    fn play(&mut self, cue: SoundCue) -> std::io::Result<()>;
}

/// Rings the terminal bell on milestone cues
#[derive(Debug, Default)]
pub struct BellSink;

impl CueSink for BellSink {
    fn play(&mut self, cue: SoundCue) -> std::io::Result<()> {
        if cue.is_subtle() {
            return Ok(());
        }
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()
    }
}

#[derive(Debug, Default)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: SoundCue) -> std::io::Result<()> {
        Ok(())
    }
}

/// Mute-aware front for a sink
pub struct SoundBoard {
    sink: Box<dyn CueSink>,
    muted: bool,
}

impl std::fmt::Debug for SoundBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBoard").field("muted", &self.muted).finish()
    }
}

impl SoundBoard {
    pub fn new(sink: Box<dyn CueSink>) -> Self {
        Self { sink, muted: false }
    }

    pub fn from_output(output: SoundOutput) -> Self {
        match output {
            SoundOutput::Bell => Self::new(Box::new(BellSink)),
            SoundOutput::Silent => Self::new(Box::new(SilentSink)),
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play `cue` unless muted. Failures are logged, never returned.
    pub fn play(&mut self, cue: SoundCue) -> bool {
        if self.muted {
            return false;
        }
        match self.sink.play(cue) {
            Ok(()) => {
                trace!(cue = cue.name(), "cue played");
                true
            }
            Err(e) => {
                warn!(cue = cue.name(), error = %e, "failed to play cue");
                false
            }
        }
    }
}

/// Track at `index`, wrapping past the end
pub fn track_at(index: usize) -> &'static Track {
    &PLAYLIST[index % PLAYLIST.len()]
}

/// "Title - Artist", or just the title when the artist is unknown
pub fn track_label(track: &Track) -> String {
    if track.artist.is_empty() {
        track.title.to_string()
    } else {
        format!("{} - {}", track.title, track.artist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct RecordingSink {
        played: Arc<Mutex<Vec<SoundCue>>>,
    }

    impl CueSink for RecordingSink {
        fn play(&mut self, cue: SoundCue) -> std::io::Result<()> {
            self.played.lock().unwrap().push(cue);
            Ok(())
        }
    }

    struct BrokenSink;

    impl CueSink for BrokenSink {
        fn play(&mut self, _cue: SoundCue) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn test_muted_board_plays_nothing() {
        let sink = RecordingSink::default();
        let mut board = SoundBoard::new(Box::new(sink.clone()));

        assert!(board.play(SoundCue::Kiss));
        board.set_muted(true);
        assert!(!board.play(SoundCue::Success));
        board.set_muted(false);
        assert!(board.play(SoundCue::Pop));

        assert_eq!(*sink.played.lock().unwrap(), vec![SoundCue::Kiss, SoundCue::Pop]);
    }

    #[test]
    fn test_sink_failure_is_swallowed() {
        let mut board = SoundBoard::new(Box::new(BrokenSink));
        assert!(!board.play(SoundCue::Complete));
    }

    #[test]
    fn test_playlist_wraps() {
        assert_eq!(track_at(0).title, PLAYLIST[0].title);
        assert_eq!(track_at(PLAYLIST.len()).title, PLAYLIST[0].title);
        assert!(track_label(track_at(1)).contains(" - "));
    }
}
