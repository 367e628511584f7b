pub mod synth;

use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, warn};

use crate::error::AudioError;

const EXTENSIONS: [&str; 3] = ["ogg", "wav", "mp3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Engine,
    Crash,
    Pickup,
    Click,
    Hover,
    MenuMusic,
}

impl Cue {
    pub const ALL: [Cue; 6] = [
        Cue::Engine,
        Cue::Crash,
        Cue::Pickup,
        Cue::Click,
        Cue::Hover,
        Cue::MenuMusic,
    ];

    /// File name without extension under the sounds directory.
    pub fn stem(self) -> &'static str {
        match self {
            Cue::Engine => "engine",
            Cue::Crash => "crash",
            Cue::Pickup => "pickup",
            Cue::Click => "click",
            Cue::Hover => "hover",
            Cue::MenuMusic => "menu_music",
        }
    }
}

/// First `<stem>.{ogg,wav,mp3}` that exists in `dir`.
pub fn resolve(dir: &Path, cue: Cue) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{ext}", cue.stem())))
        .find(|path| path.is_file())
}

fn decode(path: &Path) -> Result<impl Source + Send + 'static, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::try_from(file).map_err(|err| AudioError::Decode {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

fn open_output() -> Result<OutputStream, AudioError> {
    let mut stream = OutputStreamBuilder::open_default_stream()
        .map_err(|err| AudioError::NoDevice(err.to_string()))?;
    // The drop notice would go to stderr, under the game screen.
    stream.log_on_drop(false);
    Ok(stream)
}

/// Best-effort cue player. Every failure is logged once and the cue goes silent.
pub struct SoundManager {
    output: Option<OutputStream>,
    enabled: bool,
    synth: bool,
    sounds_dir: PathBuf,
    live: Vec<(Cue, Sink)>,
    warned: HashSet<Cue>,
}

impl SoundManager {
    /// Opens the default output device. Starts enabled with synthesis off.
    pub fn open(sounds_dir: impl Into<PathBuf>) -> Self {
        let output = match open_output() {
            Ok(stream) => Some(stream),
            Err(err) => {
                warn!(error = %err, "audio disabled");
                None
            }
        };
        Self {
            output,
            enabled: true,
            synth: false,
            sounds_dir: sounds_dir.into(),
            live: Vec::new(),
            warned: HashSet::new(),
        }
    }

    /// A manager with no output device; every cue is a no-op.
    pub fn silent() -> Self {
        Self {
            output: None,
            enabled: false,
            synth: false,
            sounds_dir: PathBuf::new(),
            live: Vec::new(),
            warned: HashSet::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop_all();
        }
    }

    pub fn set_synth(&mut self, synth: bool) {
        self.synth = synth;
        // A cue that was silent may now have a voice.
        self.warned.clear();
    }

    /// Starts `cue`. A looping cue that is already playing is left alone.
    pub fn play(&mut self, cue: Cue, looping: bool) {
        if !self.enabled {
            return;
        }
        let sink = match self.output.as_ref() {
            Some(stream) => Sink::connect_new(stream.mixer()),
            None => return,
        };
        self.live.retain(|(_, sink)| !sink.empty());
        if looping && self.is_playing(cue) {
            return;
        }
        if !self.load(&sink, cue, looping) {
            return;
        }
        debug!(cue = cue.stem(), looping, "cue started");
        self.live.push((cue, sink));
    }

    /// Queues the file for `cue`, or its synthesized stand-in, on `sink`.
    fn load(&mut self, sink: &Sink, cue: Cue, looping: bool) -> bool {
        if let Some(path) = resolve(&self.sounds_dir, cue) {
            match decode(&path) {
                Ok(source) if looping => {
                    sink.append(source.repeat_infinite());
                    return true;
                }
                Ok(source) => {
                    sink.append(source);
                    return true;
                }
                Err(err) => self.warn_once(cue, &err.to_string()),
            }
        }

        let rendered = if self.synth { synth::render(cue) } else { None };
        let Some(samples) = rendered else {
            self.warn_once(cue, "no sound file");
            return false;
        };
        let buffer = SamplesBuffer::new(1, synth::SAMPLE_RATE, samples);
        if looping {
            sink.append(buffer.repeat_infinite());
        } else {
            sink.append(buffer);
        }
        true
    }

    pub fn stop(&mut self, cue: Cue) {
        self.live.retain(|(playing, sink)| {
            if *playing == cue {
                sink.stop();
                false
            } else {
                true
            }
        });
    }

    /// Stops and drops every live sink. Safe to call repeatedly.
    pub fn stop_all(&mut self) {
        for (_, sink) in self.live.drain(..) {
            sink.stop();
        }
    }

    pub fn is_playing(&self, cue: Cue) -> bool {
        self.live
            .iter()
            .any(|(playing, sink)| *playing == cue && !sink.empty())
    }

    fn warn_once(&mut self, cue: Cue, reason: &str) {
        if self.warned.insert(cue) {
            warn!(
                cue = cue.stem(),
                dir = %self.sounds_dir.display(),
                reason,
                "cue is silent"
            );
        }
    }
}

impl Drop for SoundManager {
    fn drop(&mut self) {
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_are_distinct() {
        let stems: HashSet<_> = Cue::ALL.iter().map(|cue| cue.stem()).collect();
        assert_eq!(stems.len(), Cue::ALL.len());
    }

    #[test]
    fn resolve_prefers_ogg_then_wav() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(resolve(dir.path(), Cue::Crash), None);

        std::fs::write(dir.path().join("crash.mp3"), b"x").unwrap();
        std::fs::write(dir.path().join("crash.wav"), b"x").unwrap();
        assert_eq!(
            resolve(dir.path(), Cue::Crash),
            Some(dir.path().join("crash.wav"))
        );
        std::fs::write(dir.path().join("crash.ogg"), b"x").unwrap();
        assert_eq!(
            resolve(dir.path(), Cue::Crash),
            Some(dir.path().join("crash.ogg"))
        );
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("click.wav");
        std::fs::write(&path, b"not audio").unwrap();
        assert!(matches!(decode(&path), Err(AudioError::Decode { .. })));
        assert!(matches!(
            decode(&dir.path().join("absent.wav")),
            Err(AudioError::Open { .. })
        ));
    }

    #[test]
    fn silent_manager_ignores_everything() {
        let mut audio = SoundManager::silent();
        audio.play(Cue::Engine, true);
        assert!(!audio.is_playing(Cue::Engine));
        audio.stop(Cue::Engine);
        audio.stop_all();
        audio.stop_all();
        audio.set_enabled(true);
        audio.play(Cue::Crash, false);
        assert!(!audio.is_playing(Cue::Crash));
    }
}
