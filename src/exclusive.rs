//! Mutually exclusive item groups
//!
//! Some items are alternative choices of one another: picking one heart
//! variant locks the save out of the other three. Two mechanisms exist:
//!
//! * A fixed global group of relic/quest flags, collapsed before rendering
//!   so only the owned variant stays visible.
//! * Per-item `exclusiveGroup` labels from the config, collapsed at
//!   counting time so each group contributes at most one obtained and one
//!   total.

use crate::item::{Item, ItemRule};
use crate::resolve::{Progress, Resolved};
use crate::session::LoadedSave;

/// Alternative flags where owning one excludes the rest. The heart
/// variants resolve as relics or, failing that, quests; the two Huntress
/// feast quests are straight quest alternatives.
pub const EXCLUSIVE_GROUPS: &[&[&str]] = &[
    &["Heart Flower", "Heart Coral", "Heart Hunter", "Clover Heart"],
    &["Huntress Quest", "Huntress Quest Runt"],
];

fn owned_value(value: &Resolved) -> bool {
    matches!(
        value,
        Resolved::State(Progress::Deposited)
            | Resolved::State(Progress::Collected)
            | Resolved::State(Progress::Completed)
            | Resolved::Bool(true)
    )
}

/// The first flag of `group` the save owns, probed as a relic and then as
/// a quest.
pub fn owned_in_group<'a>(save: &LoadedSave, group: &[&'a str]) -> Option<&'a str> {
    group.iter().copied().find(|flag| {
        let relic = save.resolve(&Item::from_rule(ItemRule::Relic { flag: flag.to_string() }));
        if owned_value(&relic) {
            return true;
        }
        let quest = save.resolve(&Item::from_rule(ItemRule::Quest { flag: flag.to_string() }));
        owned_value(&quest)
    })
}

/// Drop items superseded by an owned member of a fixed exclusive group.
///
/// While no member of a group is owned, all of its items stay; once one is
/// owned, only that one remains eligible for rendering and counting.
pub fn filter_exclusive<'a>(items: &'a [Item], save: &LoadedSave) -> Vec<&'a Item> {
    let mut kept: Vec<&Item> = items.iter().collect();
    for group in EXCLUSIVE_GROUPS {
        let Some(owned) = owned_in_group(save, group) else {
            continue;
        };
        kept.retain(|item| match item.flag() {
            Some(flag) => !group.contains(&flag) || flag == owned,
            None => true,
        });
    }
    kept
}

/// Count obtained vs. total with `exclusiveGroup` collapse: each labeled
/// group contributes at most 1 to either side, and tool upgrades are left
/// out entirely.
pub fn count_progress(items: &[&Item], save: Option<&LoadedSave>) -> (usize, usize) {
    let mut obtained = 0;
    let mut groups = std::collections::HashSet::new();
    let mut counted_groups = std::collections::HashSet::new();

    for item in items {
        if item.upgrade_of.is_some() {
            continue;
        }

        let unlocked = match save {
            Some(save) => save.classify(item).done,
            None => false,
        };

        match &item.exclusive_group {
            Some(group) => {
                groups.insert(group.clone());
                if unlocked && counted_groups.insert(group.clone()) {
                    obtained += 1;
                }
            }
            None => {
                if unlocked {
                    obtained += 1;
                }
            }
        }
    }

    let total = items
        .iter()
        .filter(|item| item.exclusive_group.is_none() && item.upgrade_of.is_none())
        .count()
        + groups.len();

    (obtained, total)
}
