//! Bonus domain: timed pickups that feed the extra-life counter.

mod components;
mod systems;


pub use components::{Bonus, BonusKind, BonusTally};
pub use systems::{BonusOutcome, settle_bonus};

use bevy::prelude::*;

use crate::core::TickSet;
use crate::sprites::DrawSet;
use systems::{queue_bonus_draws, update_bonuses};

pub struct BonusPlugin;

impl Plugin for BonusPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BonusTally>()
            .add_systems(FixedUpdate, update_bonuses.in_set(TickSet::Cleanup))
            .add_systems(Update, queue_bonus_draws.in_set(DrawSet::Queue));
    }
}
