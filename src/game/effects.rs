//! Teleport Particle Bursts
//!
//! Purely cosmetic. Bursts are handed to the presentation collaborator and
//! never take part in collision or gateway checks.

use serde::{Serialize, Deserialize};

use crate::core::rng::ParticleRng;
use crate::core::vec2::Vec2;

/// Spawn radius around the burst centre.
const SPREAD: f32 = 30.0;
/// Max speed per axis, units per tick.
const MAX_SPEED: f32 = 4.0;
/// Life lost per tick is drawn from [MIN_DECAY, MIN_DECAY + DECAY_RANGE).
const MIN_DECAY: f32 = 0.02;
const DECAY_RANGE: f32 = 0.02;
/// Overlay fade per tick.
const ALPHA_FADE: f32 = 0.05;

/// A single particle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    /// Screen position
    pub position: Vec2,
    /// Units per tick
    pub velocity: Vec2,
    /// 1.0 at spawn, dead at 0
    pub life: f32,
    /// Life lost per tick
    pub decay: f32,
}

impl Particle {
    /// Still visible.
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// One burst with its fading overlay.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParticleBurst {
    /// Particles of this burst
    pub particles: Vec<Particle>,
    /// Overlay opacity, 1.0 at spawn
    pub alpha: f32,
}

impl ParticleBurst {
    /// Spawn `count` particles around `center`.
    pub fn spawn(center: Vec2, count: usize, rng: &mut ParticleRng) -> Self {
        let particles = (0..count)
            .map(|_| Particle {
                position: Vec2::new(
                    center.x + rng.next_range(-SPREAD, SPREAD),
                    center.y + rng.next_range(-SPREAD, SPREAD),
                ),
                velocity: Vec2::new(
                    rng.next_range(-MAX_SPEED, MAX_SPEED),
                    rng.next_range(-MAX_SPEED, MAX_SPEED),
                ),
                life: 1.0,
                decay: MIN_DECAY + rng.next_f32() * DECAY_RANGE,
            })
            .collect();

        Self { particles, alpha: 1.0 }
    }

    /// Advance one tick.
    pub fn step(&mut self) {
        for particle in self.particles.iter_mut().filter(|p| p.is_alive()) {
            particle.position += particle.velocity;
            particle.life -= particle.decay;
        }
        self.alpha -= ALPHA_FADE;
    }

    /// Fully faded.
    pub fn is_finished(&self) -> bool {
        self.alpha <= 0.0
    }
}

/// Active bursts plus the RNG that seeds them.
#[derive(Clone, Debug, Default)]
pub struct EffectLayer {
    bursts: Vec<ParticleBurst>,
    rng: ParticleRng,
    particle_count: usize,
}

impl EffectLayer {
    /// Create an empty layer.
    pub fn new(seed: u64, particle_count: usize) -> Self {
        Self {
            bursts: Vec::new(),
            rng: ParticleRng::new(seed),
            particle_count,
        }
    }

    /// Start a burst at `center`.
    pub fn burst(&mut self, center: Vec2) {
        let burst = ParticleBurst::spawn(center, self.particle_count, &mut self.rng);
        self.bursts.push(burst);
    }

    /// Advance every burst and drop finished ones.
    pub fn step(&mut self) {
        for burst in &mut self.bursts {
            burst.step();
        }
        self.bursts.retain(|burst| !burst.is_finished());
    }

    /// Bursts still on screen.
    pub fn bursts(&self) -> &[ParticleBurst] {
        &self.bursts
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.bursts.clear();
    }
}
