//! Equip requirement checks.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerAttrs, Slot, SlotMask};
use crate::movement::{MoveEvent, Requirements, WieldFlags};

/// Why a player may not equip an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ineligibility {
    LevelTooLow,
    MagicLevelTooLow,
    PremiumRequired,
    VocationNotAllowed,
    SlotMismatch,
}

impl std::fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Ineligibility::LevelTooLow => "level too low",
            Ineligibility::MagicLevelTooLow => "magic level too low",
            Ineligibility::PremiumRequired => "premium account required",
            Ineligibility::VocationNotAllowed => "vocation not allowed",
            Ineligibility::SlotMismatch => "item does not fit this slot",
        };
        f.write_str(reason)
    }
}

/// Result of an eligibility check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eligibility {
    Eligible,
    Ineligible(Ineligibility),
}

impl Eligibility {
    #[must_use]
    pub fn is_eligible(self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// The first failed check, if any.
    #[must_use]
    pub fn reason(self) -> Option<Ineligibility> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Ineligible(reason) => Some(reason),
        }
    }
}

/// Evaluator for equip requirements.
pub struct EligibilityEvaluator;

impl EligibilityEvaluator {
    /// Check whether `player` may equip into `slot`.
    ///
    /// Checks run in a fixed order and stop at the first failure: level,
    /// magic level, premium, vocation, slot. The first four only apply when
    /// their wield flag is set and are skipped entirely for players that
    /// ignore wield requirements. The slot check always applies.
    #[must_use]
    pub fn evaluate(
        player: &PlayerAttrs,
        requirements: &Requirements,
        slots: SlotMask,
        slot: Slot,
    ) -> Eligibility {
        if !player.ignore_wield_requirements {
            if let Some(reason) = Self::first_failed_requirement(player, requirements) {
                return Eligibility::Ineligible(reason);
            }
        }

        if !slots.accepts(slot) {
            return Eligibility::Ineligible(Ineligibility::SlotMismatch);
        }

        Eligibility::Eligible
    }

    /// Check a registered event's requirements and slot mask.
    #[must_use]
    pub fn evaluate_event(player: &PlayerAttrs, event: &MoveEvent, slot: Slot) -> Eligibility {
        Self::evaluate(player, &event.requirements, event.slots, slot)
    }

    fn first_failed_requirement(
        player: &PlayerAttrs,
        requirements: &Requirements,
    ) -> Option<Ineligibility> {
        let flags = requirements.wield_flags();

        if flags.contains(WieldFlags::LEVEL) && player.level < requirements.min_level() {
            return Some(Ineligibility::LevelTooLow);
        }
        if flags.contains(WieldFlags::MAGIC_LEVEL)
            && player.magic_level < requirements.min_magic_level()
        {
            return Some(Ineligibility::MagicLevelTooLow);
        }
        if flags.contains(WieldFlags::PREMIUM) && requirements.premium() && !player.premium {
            return Some(Ineligibility::PremiumRequired);
        }
        if flags.contains(WieldFlags::VOCATION) && !requirements.allows_vocation(player.vocation) {
            return Some(Ineligibility::VocationNotAllowed);
        }
        None
    }
}
