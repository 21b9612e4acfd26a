use silksave::save::format_play_time;
use silksave::{LoadedSave, Mode};

use crate::error::Result;

pub fn summary(save: &LoadedSave) -> Result<()> {
    let player = &save.save().player_data;

    match save.mode() {
        Mode::Steel => println!("STEEL SOUL SAVE LOADED"),
        Mode::Normal => println!("NORMAL SAVE LOADED"),
    }
    println!("completion: {}%", player.completion_percentage);
    println!("play time:  {}", format_play_time(player.play_time));
    println!("rosaries:   {}", player.geo);
    println!("shards:     {}", player.shell_shards);
    if let Some(date) = &player.date {
        println!("saved:      {}", date);
    }
    Ok(())
}

pub fn flags(save: &LoadedSave, only_scene: Option<&str>) -> Result<()> {
    let index = save.flags();

    let mut scenes: Vec<&str> = match only_scene {
        Some(scene) => index.scene(scene).map(|_| scene).into_iter().collect(),
        None => index.scene_names().collect(),
    };
    scenes.sort_unstable();

    for scene in scenes {
        let Some(scene_flags) = index.scene(scene) else {
            continue;
        };
        println!("{}", scene);
        let mut ids: Vec<(&str, bool)> = scene_flags
            .iter()
            .map(|(id, value)| (id.as_str(), *value))
            .collect();
        ids.sort_unstable();
        for (id, value) in ids {
            println!("  {} = {}", id, value);
        }
    }
    Ok(())
}
