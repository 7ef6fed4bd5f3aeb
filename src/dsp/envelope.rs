use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Strike Envelope
===============

A chime is struck, not held: there is no gate to release. The envelope
rises linearly to full level, then decays exponentially until it is
inaudible and goes back to Idle.

  Level
    1.0 ┐ ╱╲
        │╱  ╲
        │    ╲__
        │       ‾‾‾──___
    0.0 └─────────────────‾‾──→ Time
        Attack   Decay

Decay is expressed as the time to fall by 60 dB (a factor of 1000), the
usual "ring time" of a bell. Per sample we multiply by

    coefficient = exp(ln(0.001) / (decay_time * sample_rate))

so after `decay_time * sample_rate` samples the level is 0.001 of where it
started. Below SILENCE the stage snaps to Idle and the level to zero.
*/

const SILENCE: f32 = 1.0e-3;
const LN_SILENCE: f32 = -6.907_755; // ln(0.001)

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeState {
    Idle,
    Attack,
    Decay,
}

pub struct Envelope {
    attack_time: f32, // seconds to ramp 0 -> 1
    decay_time: f32,  // seconds to fall 60 dB

    stage: EnvelopeState,
    level: f32,
}

impl Envelope {
    pub fn strike(attack: f32, decay: f32) -> Self {
        Self {
            attack_time: attack.max(MIN_TIME),
            decay_time: decay.max(MIN_TIME),
            stage: EnvelopeState::Idle,
            level: 0.0,
        }
    }

    /// Restart the envelope from silence.
    ///
    /// Retriggering mid-ring restarts the attack so back-to-back cues stay
    /// distinct.
    pub fn note_on(&mut self, _ctx: &RenderCtx) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
    }

    /// Advance by one sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += 1.0 / (self.attack_time * ctx.sample_rate);
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                let coefficient = (LN_SILENCE / (self.decay_time * ctx.sample_rate)).exp();
                self.level *= coefficient;
                if self.level < SILENCE {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeState::Idle
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }
}
