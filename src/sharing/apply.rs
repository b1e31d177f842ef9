//! Profile application
//!
//! Copies a profile onto a live player, or resets a player to baseline when
//! no profile exists. Both walk the registry in order and skip every
//! sharable that is switched off; skipped properties are left as they are.

use crate::config::ShareSettings;
use crate::host::{Economy, PlayerState};
use crate::profile::Profile;

use super::registry::{ApplyContext, REGISTRY};

/// Apply a stored profile. Returns the number of properties written.
pub fn apply_profile(
    profile: &Profile,
    player: &mut dyn PlayerState,
    share: &ShareSettings,
    ctx: &ApplyContext,
    economy: Option<&dyn Economy>,
) -> usize {
    let mut applied = 0;
    for def in REGISTRY.iter().filter(|def| share.is_enabled(def.sharable)) {
        (def.apply)(profile, player, ctx);
        applied += 1;
    }

    // The balance is not a share toggle; it always follows the profile
    if let Some(economy) = economy {
        economy.set_balance(player.id(), profile.balance);
    }

    applied
}

/// Reset a player to baseline. Returns the number of properties reset.
pub fn apply_defaults(
    player: &mut dyn PlayerState,
    share: &ShareSettings,
    ctx: &ApplyContext,
    economy: Option<&dyn Economy>,
) -> usize {
    let mut reset = 0;
    for def in REGISTRY.iter().filter(|def| share.is_enabled(def.sharable)) {
        (def.reset)(player, ctx);
        reset += 1;
    }

    if let Some(economy) = economy {
        economy.reset_to_baseline(player.id());
    }

    reset
}
