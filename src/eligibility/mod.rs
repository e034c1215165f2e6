//! Equip eligibility.
//!
//! Before an equip handler runs, the player is checked against the event's
//! [`Requirements`](crate::movement::Requirements) and slot mask. The check
//! is a pure function of the player snapshot and the event; it never touches
//! world state and is safe to repeat.
//!
//! ```
//! use movement_events::core::{PlayerAttrs, PlayerId, Slot, SlotMask, VocationId};
//! use movement_events::eligibility::{EligibilityEvaluator, Ineligibility};
//! use movement_events::movement::Requirements;
//!
//! let knight = VocationId::new(4);
//! let requirements = Requirements::new().with_min_level(20).with_vocation(knight);
//! let player = PlayerAttrs::new(PlayerId::new(1), knight).with_level(10);
//!
//! let result = EligibilityEvaluator::evaluate(&player, &requirements, SlotMask::ANYWHERE, Slot::Right);
//! assert_eq!(result.reason(), Some(Ineligibility::LevelTooLow));
//! ```

mod evaluator;

pub use evaluator::{Eligibility, EligibilityEvaluator, Ineligibility};
