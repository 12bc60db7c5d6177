//! Parameter store: host slots and the control fields they drive.

use crate::math::param_val_to_f32;

/// Host parameter slots, in host index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    User1,
    User2,
    User3,
    User4,
    User5,
    User6,
    /// Morph select (the "A" knob).
    Shape,
    /// Shape depth (the "B" knob).
    ShiftShape,
}

impl ParamId {
    pub const ALL: [ParamId; 8] = [
        ParamId::User1,
        ParamId::User2,
        ParamId::User3,
        ParamId::User4,
        ParamId::User5,
        ParamId::User6,
        ParamId::Shape,
        ParamId::ShiftShape,
    ];

    /// Map a raw host index; unknown indices yield `None`.
    pub const fn from_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(ParamId::User1),
            1 => Some(ParamId::User2),
            2 => Some(ParamId::User3),
            3 => Some(ParamId::User4),
            4 => Some(ParamId::User5),
            5 => Some(ParamId::User6),
            6 => Some(ParamId::Shape),
            7 => Some(ParamId::ShiftShape),
            _ => None,
        }
    }

    pub const fn index(self) -> u16 {
        self as u16
    }

    pub const fn name(self) -> &'static str {
        match self {
            ParamId::User1 => "user1",
            ParamId::User2 => "user2",
            ParamId::User3 => "user3",
            ParamId::User4 => "user4",
            ParamId::User5 => "user5",
            ParamId::User6 => "user6",
            ParamId::Shape => "shape",
            ParamId::ShiftShape => "shift_shape",
        }
    }
}

/// Control fields written by parameter events and read by the block path.
///
/// Each field is an independent store; no ordering is required between them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamStore {
    morph_index: f32,
    shape_amount: f32,
}

impl ParamStore {
    pub const fn new() -> Self {
        Self {
            morph_index: 0.0,
            shape_amount: 0.0,
        }
    }

    pub fn morph_index(&self) -> f32 {
        self.morph_index
    }

    pub fn shape_amount(&self) -> f32 {
        self.shape_amount
    }

    /// Apply a normalized value to a slot. Returns true when the slot drives
    /// a control field (the user slots are accepted and ignored).
    #[inline]
    pub fn apply(&mut self, id: ParamId, value: f32, morph_scale: f32) -> bool {
        match id {
            ParamId::Shape => {
                self.morph_index = morph_scale * value;
                true
            }
            ParamId::ShiftShape => {
                self.shape_amount = 1.0 + value;
                true
            }
            ParamId::User1
            | ParamId::User2
            | ParamId::User3
            | ParamId::User4
            | ParamId::User5
            | ParamId::User6 => false,
        }
    }

    /// Apply a raw host event (index plus 10-bit value).
    #[inline]
    pub fn apply_raw(&mut self, index: u16, value: u16, morph_scale: f32) -> bool {
        match ParamId::from_index(index) {
            Some(id) => self.apply(id, param_val_to_f32(value), morph_scale),
            None => false,
        }
    }
}
