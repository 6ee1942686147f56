//! Audio system using Web Audio API
//!
//! Cues are synthesized with oscillators, so there are no sound files to load.

use std::cell::RefCell;
use std::rc::Rc;

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::feedback::{FeedbackError, FeedbackSink, SoundCue, sound_cues};
use crate::sim::GameEvent;

/// Plays the game's sound cues
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.7,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Pull volume and mute state from settings
    pub fn apply_settings(&mut self, settings: &crate::Settings) {
        self.master_volume = settings.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        self.muted = settings.muted;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_available(&self) -> bool {
        self.ctx.is_some()
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound cue
    pub fn play(&self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            SoundCue::Catch => self.play_catch(ctx, vol),
            SoundCue::Splash => self.play_splash(ctx, vol),
            SoundCue::GameOver => self.play_game_over(ctx, vol),
            SoundCue::HighScore => self.play_high_score(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Catch - rising "mrrp" chirp
    fn play_catch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency().set_value_at_time(520.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(880.0, t + 0.08)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.16)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
    }

    /// Splash - noisy downward sweep with a low plop
    fn play_splash(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(1800.0, t).ok();
            osc.frequency().set_value_at_time(900.0, t + 0.03).ok();
            osc.frequency().set_value_at_time(1400.0, t + 0.06).ok();
            osc.frequency().set_value_at_time(600.0, t + 0.1).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(120.0, t + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        // Plop
        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }

    /// Game over - a drooping "mrrow" followed by a low thud
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time() + 0.15;

        if let Some((osc, gain)) = self.create_osc(ctx, 620.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(0.01, t).ok();
            gain.gain().linear_ramp_to_value_at_time(vol * 0.3, t + 0.08).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.7)
                .ok();
            osc.frequency().set_value_at_time(620.0, t).ok();
            osc.frequency().linear_ramp_to_value_at_time(700.0, t + 0.12).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(240.0, t + 0.65)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.75).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 90.0, OscillatorType::Sine) {
            let t = t + 0.7;
            gain.gain().set_value_at_time(vol * 0.35, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.35).ok();
        }
    }

    /// New best - quick major arpeggio after the game-over cue
    fn play_high_score(&self, ctx: &AudioContext, vol: f32) {
        const NOTES: [f32; 4] = [523.25, 659.25, 783.99, 1046.5];
        let start = ctx.current_time() + 1.0;

        for (i, freq) in NOTES.into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                continue;
            };
            let t = start + i as f64 * 0.09;
            let hold = if i == NOTES.len() - 1 { 0.4 } else { 0.12 };
            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + hold)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + hold + 0.05).ok();
        }
    }
}

/// Shared handle so the mute button and the session can both reach the manager
impl FeedbackSink for Rc<RefCell<AudioManager>> {
    fn on_event(&mut self, event: &GameEvent) -> Result<(), FeedbackError> {
        let cues = sound_cues(event);
        if cues.is_empty() {
            return Ok(());
        }
        let audio = self
            .try_borrow()
            .map_err(|e| FeedbackError::Failed(e.to_string()))?;
        // Already warned once at startup
        if !audio.is_available() {
            return Ok(());
        }
        for cue in cues {
            audio.play(*cue);
        }
        Ok(())
    }
}
