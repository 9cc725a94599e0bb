//! Presentation queue for explosions. Craters are carved immediately; this
//! only serializes the animation so two blasts never play at once.

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use scorch_core::constants::EXPLOSION_MIN_FRAMES;

/// One blast waiting for, or playing, its animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplosionAnim {
    pub center: IVec2,
    pub radius: i32,
    pub frame: u32,
    pub total_frames: u32,
}

impl ExplosionAnim {
    pub fn new(center: IVec2, radius: i32) -> Self {
        let total_frames = EXPLOSION_MIN_FRAMES.max((radius.max(0) as f64 * 0.5).floor() as u32);
        Self {
            center,
            radius,
            frame: 0,
            total_frames,
        }
    }

    /// Current fireball radius, growing to full size over the animation.
    pub fn current_radius(&self) -> i32 {
        if self.total_frames == 0 {
            return self.radius;
        }
        (self.radius as f64 * (self.frame + 1) as f64 / self.total_frames as f64).ceil() as i32
    }
}

/// FIFO of explosion animations with at most one active.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExplosionQueue {
    active: Option<ExplosionAnim>,
    pending: VecDeque<ExplosionAnim>,
}

impl ExplosionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, center: IVec2, radius: i32) {
        let anim = ExplosionAnim::new(center, radius);
        if self.active.is_none() {
            self.active = Some(anim);
        } else {
            self.pending.push_back(anim);
        }
    }

    pub fn active(&self) -> Option<&ExplosionAnim> {
        self.active.as_ref()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Advance the active animation one frame. Returns true while anything
    /// is still playing.
    pub fn step(&mut self) -> bool {
        if let Some(anim) = self.active.as_mut() {
            anim.frame += 1;
            if anim.frame >= anim.total_frames {
                self.active = self.pending.pop_front();
            }
        }
        self.active.is_some()
    }
}
