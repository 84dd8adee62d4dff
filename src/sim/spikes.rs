//! Spike field: immutable slot templates plus one active set per wall
//!
//! Each vertical side has five pre-authored slots. For every bounce cycle the
//! approaching wall activates a random subset of them; the members are copied
//! out of the template list so later activations never alias earlier ones.
//! All members of a set share a single x offset, which is the only value that
//! moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which edge of the field a spike belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpikeSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl SpikeSide {
    /// The facing wall (vertical sides only)
    pub fn opposite(self) -> Self {
        match self {
            SpikeSide::Left => SpikeSide::Right,
            SpikeSide::Right => SpikeSide::Left,
            SpikeSide::Top => SpikeSide::Bottom,
            SpikeSide::Bottom => SpikeSide::Top,
        }
    }

    /// -1 for the left wall, +1 for the right wall
    pub fn x_sign(self) -> f32 {
        match self {
            SpikeSide::Left => -1.0,
            _ => 1.0,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, SpikeSide::Left | SpikeSide::Right)
    }
}

/// A fixed candidate spike position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeSlot {
    pub side: SpikeSide,
    pub index: u8,
    /// Local y for vertical sides, local x for the top/bottom rows
    pub offset: f32,
}

impl SpikeSlot {
    /// World position of this slot when its set sits at `x_offset`
    pub fn position(&self, x_offset: f32) -> Vec2 {
        match self.side {
            SpikeSide::Left | SpikeSide::Right => Vec2::new(x_offset, self.offset),
            SpikeSide::Top => Vec2::new(self.offset, ROW_Y),
            SpikeSide::Bottom => Vec2::new(self.offset, -ROW_Y),
        }
    }
}

/// The subset of one wall's slots chosen for the current bounce cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSpikeSet {
    pub members: Vec<SpikeSlot>,
    pub shared_x_offset: f32,
    pub generated_this_cycle: bool,
}

impl ActiveSpikeSet {
    pub fn contains(&self, index: u8) -> bool {
        self.members.iter().any(|m| m.index == index)
    }

    /// True once the shared offset is within `epsilon` of `home` on the far side
    pub fn is_home(&self, side: SpikeSide, home: f32, epsilon: f32) -> bool {
        match side {
            SpikeSide::Left => self.shared_x_offset <= -home + epsilon,
            _ => self.shared_x_offset >= home - epsilon,
        }
    }
}

/// Slot templates for all four edges and the active sets of both walls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikeField {
    left_slots: Vec<SpikeSlot>,
    right_slots: Vec<SpikeSlot>,
    top_slots: Vec<SpikeSlot>,
    bottom_slots: Vec<SpikeSlot>,
    pub left: ActiveSpikeSet,
    pub right: ActiveSpikeSet,
}

impl SpikeField {
    /// Build the standard layout with both walls retreated to `home_x`
    pub fn new(home_x: f32) -> Self {
        let column = |side: SpikeSide| -> Vec<SpikeSlot> {
            (0..SPIKES_PER_SIDE)
                .map(|i| SpikeSlot {
                    side,
                    index: i as u8,
                    offset: SIDE_SLOT_ORIGIN + i as f32 * SIDE_SLOT_SPACING,
                })
                .collect()
        };
        let row = |side: SpikeSide| -> Vec<SpikeSlot> {
            (0..SPIKES_PER_ROW)
                .map(|i| SpikeSlot {
                    side,
                    index: i as u8,
                    offset: ROW_SLOT_ORIGIN + i as f32 * ROW_SLOT_SPACING,
                })
                .collect()
        };

        let left_slots = column(SpikeSide::Left);
        let right_slots = column(SpikeSide::Right);

        // Until the first generation every slot counts as a member, parked at home.
        let left = ActiveSpikeSet {
            members: left_slots.clone(),
            shared_x_offset: -home_x,
            generated_this_cycle: false,
        };
        let right = ActiveSpikeSet {
            members: right_slots.clone(),
            shared_x_offset: home_x,
            generated_this_cycle: false,
        };

        Self {
            left_slots,
            right_slots,
            top_slots: row(SpikeSide::Top),
            bottom_slots: row(SpikeSide::Bottom),
            left,
            right,
        }
    }

    /// Template slots for one edge
    pub fn slots(&self, side: SpikeSide) -> &[SpikeSlot] {
        match side {
            SpikeSide::Left => &self.left_slots,
            SpikeSide::Right => &self.right_slots,
            SpikeSide::Top => &self.top_slots,
            SpikeSide::Bottom => &self.bottom_slots,
        }
    }

    /// Active set of a wall
    ///
    /// Panics for `Top`/`Bottom`, which never activate.
    pub fn set(&self, side: SpikeSide) -> &ActiveSpikeSet {
        match side {
            SpikeSide::Left => &self.left,
            SpikeSide::Right => &self.right,
            _ => panic!("{side:?} has no active spike set"),
        }
    }

    pub fn set_mut(&mut self, side: SpikeSide) -> &mut ActiveSpikeSet {
        match side {
            SpikeSide::Left => &mut self.left,
            SpikeSide::Right => &mut self.right,
            _ => panic!("{side:?} has no active spike set"),
        }
    }

    /// Copy the chosen template slots into the wall's active set
    ///
    /// The shared offset is kept so the new members continue from wherever
    /// the set last was rather than jumping.
    pub fn activate(&mut self, side: SpikeSide, indices: &[u8]) {
        let members: Vec<SpikeSlot> = indices
            .iter()
            .map(|&i| {
                let slots = self.slots(side);
                assert!(
                    (i as usize) < slots.len(),
                    "slot index {i} out of range for {side:?}"
                );
                slots[i as usize]
            })
            .collect();

        let set = self.set_mut(side);
        set.members = members;
        set.generated_this_cycle = true;
    }

    /// Mark both walls for regeneration
    pub fn clear_generated(&mut self) {
        self.left.generated_this_cycle = false;
        self.right.generated_this_cycle = false;
    }
}
