//! Audio cues and background music
//!
//! The game only ever asks for named sounds: one of the background tracks, the
//! pickup chime, or the home-run crack. Playback itself sits behind
//! [`AudioSink`] so the browser build can use `<audio>` elements while native
//! and test builds log or record the requests.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Background tracks, in playlist index order
pub const TRACKS: [&str; 5] = ["bgm1.mp3", "bgm2.mp3", "bgm3.mp3", "bgm4.mp3", "bgm5.mp3"];

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Background track by playlist index
    MusicTrack(usize),
    /// Bat picked up
    Collect,
    /// Enemy knocked back
    HomeRun,
}

impl Cue {
    /// Asset file name
    pub fn asset(&self) -> &'static str {
        match self {
            Cue::MusicTrack(i) => TRACKS[i % TRACKS.len()],
            Cue::Collect => "collect.mp3",
            Cue::HomeRun => "HomeRun.mp3",
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, Cue::MusicTrack(_))
    }
}

/// Something that can play and stop named sounds
pub trait AudioSink {
    fn play(&mut self, cue: Cue, volume: f32);
    fn stop(&mut self, cue: Cue);

    /// The current background track reached its natural end
    fn music_ended(&self) -> bool {
        false
    }
}

/// Random track order that never repeats the previous pick
#[derive(Debug, Clone)]
pub struct Playlist {
    rng: Pcg32,
    len: usize,
    current: Option<usize>,
}

impl Playlist {
    pub fn new(seed: u64, len: usize) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            len,
            current: None,
        }
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Advance to the next track
    pub fn next_track(&mut self) -> usize {
        let next = match (self.current, self.len) {
            (_, 0 | 1) => 0,
            (None, len) => self.rng.random_range(0..len),
            (Some(prev), len) => {
                // Draw from the other len - 1 slots
                let pick = self.rng.random_range(0..len - 1);
                if pick >= prev { pick + 1 } else { pick }
            }
        };
        self.current = Some(next);
        next
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    playlist: Playlist,
    music_volume: f32,
    effect_volume: f32,
    muted: bool,
    /// First-keypress latch; never re-armed
    started: bool,
    stopped: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, seed: u64, settings: &Settings) -> Self {
        let mut manager = Self {
            sink,
            playlist: Playlist::new(seed, TRACKS.len()),
            music_volume: 0.0,
            effect_volume: 0.0,
            muted: false,
            started: false,
            stopped: false,
        };
        manager.apply_settings(settings);
        manager
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_music_volume(settings.music_volume);
        self.set_effect_volume(settings.effect_volume);
        self.muted = settings.muted;
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Set effect volume (0.0 - 1.0)
    pub fn set_effect_volume(&mut self, vol: f32) {
        self.effect_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute or unmute everything. Muting silences the running track; unmuting
    /// resumes the playlist with a fresh track if the session is still live.
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        if !self.started || self.stopped {
            return;
        }
        if muted {
            if let Some(track) = self.playlist.current() {
                self.sink.stop(Cue::MusicTrack(track));
            }
        } else {
            self.on_track_ended();
        }
    }

    fn effective_volume(&self, cue: Cue) -> f32 {
        if self.muted {
            0.0
        } else if cue.is_music() {
            self.music_volume
        } else {
            self.effect_volume
        }
    }

    fn play(&mut self, cue: Cue) {
        let vol = self.effective_volume(cue);
        if vol <= 0.0 {
            return;
        }
        self.sink.play(cue, vol);
    }

    /// Start background music. Only the first call does anything.
    pub fn start_music(&mut self) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        let track = self.playlist.next_track();
        log::info!("Starting background music with {}", TRACKS[track]);
        self.play(Cue::MusicTrack(track));
        true
    }

    /// Current track finished on its own; queue a different one
    pub fn on_track_ended(&mut self) {
        if !self.started || self.stopped {
            return;
        }
        let track = self.playlist.next_track();
        log::debug!("Next track: {}", TRACKS[track]);
        self.play(Cue::MusicTrack(track));
    }

    pub fn stop_music(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Some(track) = self.playlist.current() {
            self.sink.stop(Cue::MusicTrack(track));
        }
    }

    /// Check the sink for a finished track. Call once per frame.
    pub fn poll(&mut self) {
        if self.sink.music_ended() {
            self.on_track_ended();
        }
    }

    /// Play whatever a simulation event calls for
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ItemCollected { .. } => self.play(Cue::Collect),
            GameEvent::HomeRun { .. } => self.play(Cue::HomeRun),
            GameEvent::GameOver { .. } => self.stop_music(),
            _ => {}
        }
    }

    pub fn current_track(&self) -> Option<usize> {
        self.playlist.current()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

/// Headless sink that only logs
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct LogSink;

#[cfg(not(target_arch = "wasm32"))]
impl AudioSink for LogSink {
    fn play(&mut self, cue: Cue, volume: f32) {
        log::info!("Play {} at volume {:.2}", cue.asset(), volume);
    }

    fn stop(&mut self, cue: Cue) {
        log::info!("Stop {}", cue.asset());
    }
}

/// `<audio>` element playback
#[cfg(target_arch = "wasm32")]
pub struct WebAudio {
    base: String,
    music: Option<web_sys::HtmlAudioElement>,
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    /// `base` is the asset directory, e.g. `"assets/"`
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            music: None,
        }
    }

    fn element(&self, cue: Cue, volume: f32) -> Option<web_sys::HtmlAudioElement> {
        let src = format!("{}{}", self.base, cue.asset());
        let el = web_sys::HtmlAudioElement::new_with_src(&src).ok()?;
        el.set_volume(volume as f64);
        Some(el)
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioSink for WebAudio {
    fn play(&mut self, cue: Cue, volume: f32) {
        let Some(el) = self.element(cue, volume) else {
            log::warn!("Failed to create audio element for {}", cue.asset());
            return;
        };
        // Autoplay may be refused before a user gesture; the game carries on
        match el.play() {
            Ok(promise) => {
                let name = cue.asset();
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                        log::warn!("Playback refused for {}: {:?}", name, e);
                    }
                });
            }
            Err(e) => log::warn!("Playback failed for {}: {:?}", cue.asset(), e),
        }
        if cue.is_music() {
            if let Some(old) = self.music.replace(el) {
                let _ = old.pause();
            }
        }
    }

    fn stop(&mut self, cue: Cue) {
        if cue.is_music() {
            if let Some(el) = self.music.take() {
                let _ = el.pause();
                el.set_current_time(0.0);
            }
        }
    }

    fn music_ended(&self) -> bool {
        self.music.as_ref().is_some_and(|el| el.ended())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Recorder {
        played: Vec<(Cue, f32)>,
        stopped: Vec<Cue>,
        ended: Cell<bool>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, cue: Cue, volume: f32) {
            self.played.push((cue, volume));
        }

        fn stop(&mut self, cue: Cue) {
            self.stopped.push(cue);
        }

        fn music_ended(&self) -> bool {
            self.ended.replace(false)
        }
    }

    fn manager() -> AudioManager<Recorder> {
        AudioManager::new(Recorder::default(), 9, &Settings::default())
    }

    #[test]
    fn test_playlist_never_repeats() {
        let mut playlist = Playlist::new(3, TRACKS.len());
        let mut prev = playlist.next_track();
        for _ in 0..500 {
            let next = playlist.next_track();
            assert_ne!(next, prev);
            assert!(next < TRACKS.len());
            prev = next;
        }
    }

    #[test]
    fn test_single_track_playlist() {
        let mut playlist = Playlist::new(3, 1);
        assert_eq!(playlist.next_track(), 0);
        assert_eq!(playlist.next_track(), 0);
    }

    #[test]
    fn test_mute_toggle_stops_and_resumes_music() {
        let mut audio = manager();
        audio.start_music();
        let first = audio.current_track();

        audio.set_muted(true);
        assert_eq!(audio.sink().stopped, vec![Cue::MusicTrack(first.unwrap())]);
        audio.handle_event(&GameEvent::ItemCollected { expires_at: 1.0 });
        assert_eq!(audio.sink().played.len(), 1);

        audio.set_muted(false);
        assert_eq!(audio.sink().played.len(), 2);
        assert!(audio.sink().played[1].0.is_music());
        assert_ne!(audio.current_track(), first);
    }

    #[test]
    fn test_unmute_before_first_key_stays_silent() {
        let mut audio = manager();
        audio.set_muted(true);
        audio.set_muted(false);
        assert!(audio.sink().played.is_empty());
        assert!(audio.sink().stopped.is_empty());
    }

    #[test]
    fn test_music_starts_once() {
        let mut audio = manager();
        assert!(audio.start_music());
        assert!(!audio.start_music());
        assert_eq!(audio.sink().played.len(), 1);
        let (cue, vol) = audio.sink().played[0];
        assert!(cue.is_music());
        assert_eq!(vol, 0.2);
    }

    #[test]
    fn test_ended_track_advances() {
        let mut audio = manager();
        audio.start_music();
        let first = audio.current_track();

        audio.sink.ended.set(true);
        audio.poll();
        audio.poll();
        assert_eq!(audio.sink().played.len(), 2);
        assert_ne!(audio.current_track(), first);
    }

    #[test]
    fn test_track_end_before_start_is_ignored() {
        let mut audio = manager();
        audio.on_track_ended();
        assert!(audio.sink().played.is_empty());
    }

    #[test]
    fn test_events_map_to_cues() {
        let mut audio = manager();
        audio.start_music();
        audio.handle_event(&GameEvent::ItemCollected { expires_at: 1.0 });
        audio.handle_event(&GameEvent::HomeRun { enemy: 0 });
        audio.handle_event(&GameEvent::GameOver { elapsed_secs: 3.0 });

        let played: Vec<Cue> = audio.sink().played.iter().map(|(c, _)| *c).collect();
        assert_eq!(played[1..], [Cue::Collect, Cue::HomeRun]);
        assert_eq!(audio.sink().played[1].1, 0.15);
        assert_eq!(audio.sink().stopped.len(), 1);

        // Music stays stopped after game over
        audio.on_track_ended();
        assert_eq!(audio.sink().played.len(), 3);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), 1, &settings);
        audio.start_music();
        audio.handle_event(&GameEvent::HomeRun { enemy: 2 });
        assert!(audio.sink().played.is_empty());
    }

    #[test]
    fn test_asset_names() {
        assert_eq!(Cue::MusicTrack(0).asset(), "bgm1.mp3");
        assert_eq!(Cue::MusicTrack(4).asset(), "bgm5.mp3");
        assert_eq!(Cue::HomeRun.asset(), "HomeRun.mp3");
    }
}
