use silksave::{count_progress, filter_exclusive, Item, ItemConfig, LoadedSave, UnlockState};

use crate::debug_eprintln;
use crate::error::Result;

fn display_name(item: &Item) -> &str {
    item.label
        .as_deref()
        .or(item.id.as_deref())
        .or_else(|| item.flag())
        .unwrap_or("(unnamed)")
}

fn marker(state: UnlockState) -> char {
    match state {
        UnlockState::Done => 'x',
        UnlockState::Accepted => '~',
        UnlockState::Locked => ' ',
    }
}

pub fn run(save: &LoadedSave, items_path: &str) -> Result<()> {
    let config = ItemConfig::from_file(items_path)?;
    debug_eprintln!("item config: {} categories", config.categories.len());

    for category in &config.categories {
        let kept = filter_exclusive(&category.items, save);
        let (obtained, total) = count_progress(&kept, Some(save));
        println!("{} {}/{}", category.label, obtained, total);

        for item in kept {
            let state = save.classify(item).state();
            println!("  [{}] {}", marker(state), display_name(item));
        }
    }
    Ok(())
}
