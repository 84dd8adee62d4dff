//! Physics and collision service contract
//!
//! The simulation never integrates gravity itself. It tells the service when
//! to attach or detach the player, when a flap impulse is due, asks it to
//! advance the player vertically once per tick, and asks it whether two boxes
//! touch.

use glam::Vec2;

use crate::sim::PlayerBody;
use crate::sim::collision::Aabb;

/// Rigid-body and collision service
pub trait Physics {
    /// Start simulating the player body
    fn attach(&mut self, body: &PlayerBody);
    /// Stop simulating the player body and forget its velocity
    fn detach(&mut self);
    /// Override the body's velocity
    fn set_velocity(&mut self, velocity: Vec2);
    /// Apply an impulse at a world point
    fn apply_impulse(&mut self, impulse: Vec2, at: Vec2);
    /// Advance the body's vertical motion by `dt`
    fn integrate(&mut self, body: &mut PlayerBody, dt: f32);
    /// Whether two boxes intersect
    fn intersects(&self, a: &Aabb, b: &Aabb) -> bool;
}

/// Point-mass vertical ballistics with box overlap tests
#[derive(Debug, Clone)]
pub struct BallisticPhysics {
    pub gravity: f32,
    pub mass: f32,
    velocity: Vec2,
    attached: bool,
}

impl BallisticPhysics {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            mass: 1.0,
            velocity: Vec2::ZERO,
            attached: false,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Physics for BallisticPhysics {
    fn attach(&mut self, _body: &PlayerBody) {
        self.attached = true;
        self.velocity = Vec2::ZERO;
    }

    fn detach(&mut self) {
        self.attached = false;
        self.velocity = Vec2::ZERO;
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        if self.attached {
            self.velocity = velocity;
        }
    }

    fn apply_impulse(&mut self, impulse: Vec2, _at: Vec2) {
        // Point mass: no torque, so the contact point does not matter
        if self.attached {
            self.velocity += impulse / self.mass;
        }
    }

    fn integrate(&mut self, body: &mut PlayerBody, dt: f32) {
        if !self.attached {
            return;
        }
        // Horizontal motion belongs to the state machine
        self.velocity.y += self.gravity * dt;
        body.position.y += self.velocity.y * dt;
    }

    fn intersects(&self, a: &Aabb, b: &Aabb) -> bool {
        a.overlaps(b)
    }
}
