// Integration tests for voicedeck
// Exercise the public surface end to end against a recording fake backend,
// so no audio hardware is required.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use voicedeck::{
    AssetManifest, AssetSource, AudioOutput, ClipDescriptor, ClipHandle, OutputDevice,
    PlayOutcome, PlaybackController, SoundError, SoundManager,
};

fn init_logging() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Observable state of one fake output
#[derive(Default)]
struct VoiceState {
    playing: AtomicBool,
    looped: AtomicBool,
    clip: Mutex<Option<String>>,
    volume: Mutex<f32>,
}

impl VoiceState {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Simulate the clip running to completion
    fn finish(&self) {
        self.playing.store(false, Ordering::SeqCst);
    }
}

/// Fake output device recording every opened voice
#[derive(Default)]
struct FakeHost {
    opened: Mutex<Vec<Arc<VoiceState>>>,
}

impl FakeHost {
    fn output_count(&self) -> usize {
        self.opened.lock().len()
    }

    fn state(&self, index: usize) -> Arc<VoiceState> {
        Arc::clone(&self.opened.lock()[index])
    }

    fn playing_count(&self) -> usize {
        self.opened
            .lock()
            .iter()
            .filter(|state| state.is_playing())
            .count()
    }
}

struct FakeVoice {
    state: Arc<VoiceState>,
}

impl AudioOutput for FakeVoice {
    fn set_clip(&mut self, clip: &ClipHandle) {
        *self.state.clip.lock() = Some(clip.name().to_string());
    }

    fn set_loop(&mut self, looped: bool) {
        self.state.looped.store(looped, Ordering::SeqCst);
    }

    fn set_volume(&mut self, volume: f32) {
        *self.state.volume.lock() = volume;
    }

    fn play(&mut self) {
        self.state.playing.store(true, Ordering::SeqCst);
    }

    fn stop(&mut self) {
        self.state.playing.store(false, Ordering::SeqCst);
    }

    fn pause(&mut self) {}

    fn resume(&mut self) {}

    fn is_playing(&self) -> bool {
        self.state.is_playing()
    }
}

/// Newtype so the foreign `OutputDevice` trait can be implemented
/// without violating the orphan rule for `Arc<FakeHost>`.
struct FakeDevice(Arc<FakeHost>);

impl OutputDevice for FakeDevice {
    fn open_output(&self) -> Result<Box<dyn AudioOutput>, SoundError> {
        let state = Arc::new(VoiceState::default());
        self.0.opened.lock().push(Arc::clone(&state));
        Ok(Box::new(FakeVoice { state }))
    }
}

/// In-memory asset source: music {track_a, track_b}, effects {click}
struct MemorySource {
    loads: AtomicUsize,
}

impl MemorySource {
    fn new() -> Self {
        Self {
            loads: AtomicUsize::new(0),
        }
    }
}

fn descriptor(name: &str) -> ClipDescriptor {
    ClipDescriptor {
        name: name.to_string(),
        data: Arc::new(vec![0xFF, 0xFB, 0x90, 0x00]),
        duration: None,
    }
}

impl AssetSource for MemorySource {
    fn load(&self) -> Result<AssetManifest, SoundError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(AssetManifest {
            music: vec![descriptor("track_a"), descriptor("track_b")],
            effects: vec![descriptor("click")],
        })
    }
}

fn controller(host: &Arc<FakeHost>) -> PlaybackController {
    init_logging();
    let mut controller = PlaybackController::new(Box::new(FakeDevice(Arc::clone(host))));
    controller.load_catalog(&MemorySource::new());
    controller
}

#[test]
fn test_music_track_switch_scenario() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    // play_music("track_a"): one channel playing track_a, looped
    assert_eq!(controller.play_music("track_a"), PlayOutcome::Played);
    assert_eq!(host.playing_count(), 1);
    assert_eq!(*host.state(0).clip.lock(), Some("track_a".to_string()));
    assert!(host.state(0).looped.load(Ordering::SeqCst));

    // play_music("track_b"): track_a stopped, one channel now plays track_b
    assert_eq!(controller.play_music("track_b"), PlayOutcome::Played);
    assert_eq!(host.playing_count(), 1);
    assert_eq!(*host.state(0).clip.lock(), Some("track_b".to_string()));
    assert!(host.state(0).looped.load(Ordering::SeqCst));
}

#[test]
fn test_at_most_one_music_channel_after_every_call() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    for name in ["track_a", "track_b", "track_a", "track_a", "track_b"] {
        assert_eq!(controller.play_music(name), PlayOutcome::Played);
        assert_eq!(host.playing_count(), 1);
    }
}

#[test]
fn test_effect_polyphony() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    // Two overlapping one-shots play simultaneously
    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    assert_eq!(host.playing_count(), 2);

    // Effects never loop
    assert!(!host.state(0).looped.load(Ordering::SeqCst));
    assert!(!host.state(1).looped.load(Ordering::SeqCst));
}

#[test]
fn test_overlapping_effects_grow_pool_by_exactly_one() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    // Saturate a pool of N voices, none ever finishing
    let n = 3;
    for _ in 0..n {
        assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    }
    assert_eq!(host.output_count(), n);

    // The (N+1)th overlapping call creates exactly one new voice
    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    assert_eq!(host.output_count(), n + 1);
    assert_eq!(controller.effect_voice_count(), n + 1);
}

#[test]
fn test_finished_effect_voice_is_reused_not_grown() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    host.state(0).finish();

    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    assert_eq!(host.output_count(), 1);
}

#[test]
fn test_volume_applies_to_existing_and_later_voices() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    controller.set_effect_volume(0.5);
    assert_eq!(*host.state(0).volume.lock(), 0.5);

    // A voice created after the setter inherits the most recent value
    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);
    assert_eq!(*host.state(1).volume.lock(), 0.5);

    // And a later setter reaches every existing voice
    controller.set_music_volume(0.25);
    controller.set_effect_volume(0.25);
    assert_eq!(*host.state(0).volume.lock(), 0.25);
    assert_eq!(*host.state(1).volume.lock(), 0.25);
}

#[test]
fn test_unknown_clip_is_fully_inert() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    assert_eq!(controller.play_music("nonexistent"), PlayOutcome::UnknownClip);
    assert_eq!(controller.play_effect("nonexistent"), PlayOutcome::UnknownClip);

    // No new channel, no playback state change
    assert_eq!(host.output_count(), 0);
    assert_eq!(host.playing_count(), 0);
}

#[test]
fn test_stop_music_stops_every_music_voice() {
    let host = Arc::new(FakeHost::default());
    let mut controller = controller(&host);

    assert_eq!(controller.play_music("track_a"), PlayOutcome::Played);
    assert_eq!(controller.play_effect("click"), PlayOutcome::Played);

    controller.stop_music();

    // Music silenced, the effect keeps playing
    assert!(!controller.is_music_playing());
    assert_eq!(host.playing_count(), 1);
}

// The only test in this binary touching the process-wide singleton.
#[test]
fn test_singleton_bootstrap_dedup_and_playback() {
    init_logging();
    let host = Arc::new(FakeHost::default());
    let source = MemorySource::new();

    let (first, second) = std::thread::scope(|scope| {
        let a = scope.spawn(|| SoundManager::bootstrap(&source, Box::new(FakeDevice(Arc::clone(&host)))));
        let b = scope.spawn(|| SoundManager::bootstrap(&source, Box::new(FakeDevice(Arc::clone(&host)))));
        (a.join().unwrap(), b.join().unwrap())
    });

    // One surviving instance, catalog initialized exactly once
    assert!(std::ptr::eq(first, second));
    assert_eq!(source.loads.load(Ordering::SeqCst), 1);

    let manager = SoundManager::instance();
    assert!(std::ptr::eq(manager, first));

    assert_eq!(manager.play_music("track_a"), PlayOutcome::Played);
    assert!(manager.is_music_playing());
    assert_eq!(manager.play_effect("click"), PlayOutcome::Played);

    manager.shutdown();
    assert!(!manager.is_music_playing());
}
