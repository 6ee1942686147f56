//! Cosmetic particle bursts
//!
//! Particles never feed back into score or phase; they only decorate catches.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, ItemKind, MAX_PARTICLES, Particle, ParticleShape};

/// Horizontal drag applied per step
const PARTICLE_DRAG: f32 = 0.992;

fn push_particle(state: &mut GameState, particle: Particle) {
    if state.particles.len() >= MAX_PARTICLES {
        // Remove oldest particles to make room
        state.particles.remove(0);
    }
    state.particles.push(particle);
}

/// Spark burst for a caught prize/bonus
pub fn spawn_burst(state: &mut GameState, at: Vec2, kind: ItemKind, count: usize, speed_mul: f32) {
    for _ in 0..count {
        let rng = state.rng();
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(110.0_f32..290.0) * speed_mul;
        let particle = Particle {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: rng.random_range(0.5..0.9),
            size: rng.random_range(3.0..6.0),
            rotation: rng.random_range(0.0..PI),
            spin: rng.random_range(-3.0..3.0),
            gravity: 160.0,
            shape: ParticleShape::Spark,
            kind,
        };
        push_particle(state, particle);
    }
}

/// Circular splash for a caught hazard
pub fn spawn_splash(state: &mut GameState, at: Vec2) {
    for _ in 0..26 {
        let rng = state.rng();
        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(80.0_f32..240.0);
        let particle = Particle {
            pos: at,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: rng.random_range(0.6..1.1),
            size: rng.random_range(4.0..9.0),
            rotation: rng.random_range(0.0..PI),
            spin: rng.random_range(-2.0..2.0),
            gravity: 220.0,
            shape: ParticleShape::Circle,
            kind: ItemKind::Hazard,
        };
        push_particle(state, particle);
    }
}

/// Effects for a catch of the given kind
pub fn spawn_catch_effect(state: &mut GameState, at: Vec2, kind: ItemKind) {
    match kind {
        ItemKind::Prize => spawn_burst(state, at, kind, 12, 1.0),
        ItemKind::Bonus => spawn_burst(state, at, kind, 16, 1.2),
        ItemKind::Hazard => spawn_splash(state, at),
    }
}

/// Age, drag, gravity and integrate all particles
pub fn update_particles(particles: &mut Vec<Particle>, dt: f32) {
    for p in particles.iter_mut() {
        p.life -= dt;
        p.vel.x *= PARTICLE_DRAG;
        p.vel.y += p.gravity * dt;
        p.pos += p.vel * dt;
        p.rotation += p.spin * dt;
    }
    particles.retain(|p| p.life > 0.0);
}
