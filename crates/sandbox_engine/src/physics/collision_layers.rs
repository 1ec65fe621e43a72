//! Collision categories, masks and contact-callback flags
//!
//! Filtering happens at two levels:
//! - **Category / mask** decide whether two bodies interact physically at all
//!   (both sides must accept the other's category).
//! - **Callback flag / filter** decide whether an interacting pair is reported
//!   to the contact listener. A side "matches" when its callback filter
//!   contains the other side's callback flag.
//!
//! The ground sits in [`CollisionGroups::GROUND`] and accepts everything but
//! ground; falling objects sit in [`CollisionGroups::OBJECT`], accept
//! everything, and only ask to be told about contacts with ground.

use bitflags::bitflags;
use rapier3d::prelude::{Group, InteractionGroups};

bitflags! {
    /// Collision category / mask bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionGroups: u32 {
        /// Static or kinematic ground geometry
        const GROUND = 1 << 8;
        /// Spawned dynamic objects
        const OBJECT = 1 << 9;
    }
}

impl CollisionGroups {
    /// No category
    pub const NONE: Self = Self::empty();

    /// Every category (all 32 bits, including ones without a name)
    pub const ALL: Self = Self::from_bits_retain(u32::MAX);

    /// Every category except ground
    pub const NOT_GROUND: Self = Self::from_bits_retain(u32::MAX ^ Self::GROUND.bits());

    /// Check if two bodies should collide based on their categories and masks
    ///
    /// A's category must be in B's mask AND B's category must be in A's mask.
    pub fn should_collide(category_a: Self, mask_a: Self, category_b: Self, mask_b: Self) -> bool {
        category_a.intersects(mask_b) && category_b.intersects(mask_a)
    }

    /// Convert a category / mask pair into the physics engine's interaction groups
    pub fn interaction_groups(category: Self, mask: Self) -> InteractionGroups {
        InteractionGroups::new(
            Group::from_bits_truncate(category.bits()),
            Group::from_bits_truncate(mask.bits()),
        )
    }
}

/// Everything the world needs to know about one body's filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyFilter {
    /// Category this body belongs to
    pub category: CollisionGroups,
    /// Categories this body collides with
    pub mask: CollisionGroups,
    /// Flag presented to the other party when matching callbacks
    pub callback_flag: CollisionGroups,
    /// Flags this body wants to hear about on the other party
    pub callback_filter: CollisionGroups,
    /// Whether contacts involving this body are reported at all
    pub report_contacts: bool,
}

impl BodyFilter {
    /// Filtering for the kinematic ground: collides with all but ground,
    /// never asks for callbacks itself
    pub const fn ground() -> Self {
        Self {
            category: CollisionGroups::GROUND,
            mask: CollisionGroups::NOT_GROUND,
            callback_flag: CollisionGroups::GROUND,
            callback_filter: CollisionGroups::NONE,
            report_contacts: false,
        }
    }

    /// Filtering for spawned objects: collide with everything, report ground contacts
    pub const fn object() -> Self {
        Self {
            category: CollisionGroups::OBJECT,
            mask: CollisionGroups::ALL,
            callback_flag: CollisionGroups::OBJECT,
            callback_filter: CollisionGroups::GROUND,
            report_contacts: true,
        }
    }

    /// Whether this body's callback filter accepts `other`'s flag
    pub fn matches(&self, other: &Self) -> bool {
        !other.callback_flag.is_empty() && self.callback_filter.contains(other.callback_flag)
    }

    /// Whether two bodies interact physically
    pub fn collides_with(&self, other: &Self) -> bool {
        CollisionGroups::should_collide(self.category, self.mask, other.category, other.mask)
    }

    /// Contact-callback outcome for a pair: `Some((matched_self, matched_other))`
    /// when the pair should be reported, `None` otherwise
    pub fn callback_match(&self, other: &Self) -> Option<(bool, bool)> {
        if !(self.report_contacts || other.report_contacts) {
            return None;
        }
        let matched_self = self.matches(other);
        let matched_other = other.matches(self);
        (matched_self || matched_other).then_some((matched_self, matched_other))
    }
}
