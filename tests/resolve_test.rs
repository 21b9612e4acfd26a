mod common;

use serde_json::json;
use silksave::{
    count_progress, filter_exclusive, Item, LoadedSave, Progress, Resolved, Session, UnlockState,
};

fn item(json: &str) -> Item {
    serde_json::from_str(json).unwrap()
}

fn load(save: serde_json::Value) -> LoadedSave {
    LoadedSave::from_json_value(save).unwrap()
}

#[test]
fn nothing_loaded_resolves_to_missing() {
    let session = Session::new();
    assert!(session.save().is_none());
    assert!(session.flags().is_none());
    let flag = item(r#"{ "type": "flag", "flag": "hasDash" }"#);
    assert_eq!(session.resolve(&flag), Resolved::Missing);
}

#[test]
fn absent_flag_resolves_to_missing_not_false() {
    // End-to-end scenario: a minimal save and a flag item referencing an
    // absent boolean field.
    let save = load(common::minimal_save());
    let flag = item(r#"{ "type": "flag", "flag": "defeatedSomeBoss" }"#);
    assert_eq!(save.resolve(&flag), Resolved::Missing);
}

#[test]
fn flag_and_boss_read_player_data_directly() {
    let save = load(common::with_player_field(
        common::minimal_save(),
        "hasDash",
        json!(true),
    ));
    let flag = item(r#"{ "type": "flag", "flag": "hasDash" }"#);
    let boss = item(r#"{ "type": "boss", "flag": "hasDash" }"#);
    assert_eq!(save.resolve(&flag), Resolved::Bool(true));
    assert_eq!(save.resolve(&boss), Resolved::Bool(true));
}

#[test]
fn flag_int_thresholds_at_one() {
    let mut save = common::minimal_save();
    save["playerData"]["counterA"] = json!(0);
    save["playerData"]["counterB"] = json!(1);
    save["playerData"]["counterC"] = json!("1");
    let save = load(save);

    for (flag, expected) in [("counterA", false), ("counterB", true), ("counterC", false)] {
        let rule = item(&format!(r#"{{ "type": "flagInt", "flag": "{flag}" }}"#));
        assert_eq!(save.resolve(&rule), Resolved::Bool(expected), "{flag}");
    }
    // Absent is false, not missing.
    let absent = item(r#"{ "type": "flagInt", "flag": "counterD" }"#);
    assert_eq!(save.resolve(&absent), Resolved::Bool(false));
}

#[test]
fn level_returns_raw_number_and_defers_classification() {
    let save = load(common::with_player_field(
        common::minimal_save(),
        "nailUpgrades",
        json!(2),
    ));
    let needle = item(r#"{ "type": "level", "flag": "nailUpgrades", "required": 3 }"#);
    assert_eq!(save.resolve(&needle), Resolved::Number(2.0));
    assert_eq!(save.classify(&needle).state(), UnlockState::Locked);

    let absent = item(r#"{ "type": "level", "flag": "somethingElse", "required": 1 }"#);
    assert_eq!(save.resolve(&absent), Resolved::Number(0.0));
}

#[test]
fn quill_is_forced_to_zero_without_the_quill() {
    let mut save = common::minimal_save();
    save["playerData"]["QuillState"] = json!(2);
    let without = load(save.clone());
    let quill = item(r#"{ "id": "QuillState_2", "type": "quill", "flag": "QuillState" }"#);
    assert_eq!(without.resolve(&quill), Resolved::Number(0.0));
    assert!(!without.classify(&quill).done);

    save["playerData"]["hasQuill"] = json!(true);
    let with = load(save);
    assert_eq!(with.resolve(&quill), Resolved::Number(2.0));
    assert!(with.classify(&quill).done);
}

#[test]
fn scene_bool_normalizes_and_defaults_to_false() {
    let mut save = common::minimal_save();
    save["sceneData"]["persistentBools"] = json!({
        "serializedList": [
            { "SceneName": "Bone East", "ID": "Heart Flower", "Value": true },
        ]
    });
    let save = load(save);

    // Config spells scene and flag with different whitespace/underscores.
    let shard = item(r#"{ "type": "sceneBool", "scene": "Bone_East", "flag": "Heart_Flower" }"#);
    assert_eq!(save.resolve(&shard), Resolved::Bool(true));

    let absent = item(r#"{ "type": "sceneBool", "scene": "Bone East", "flag": "Nothing Here" }"#);
    assert_eq!(save.resolve(&absent), Resolved::Bool(false), "absent is false, never missing");
}

#[test]
fn scene_bool_with_required_compares_persistent_ints() {
    let mut save = common::minimal_save();
    save["sceneData"]["persistentInts"] = json!({
        "serializedList": [
            { "SceneName": "Coral Tower", "ID": "Shell Fossil Mimic", "Value": 2 },
        ]
    });
    let save = load(save);

    let mimic = item(
        r#"{ "type": "sceneBool", "scene": "Coral Tower", "flag": "Shell Fossil Mimic", "required": 2 }"#,
    );
    assert_eq!(save.resolve(&mimic), Resolved::Bool(true));

    let wrong_tier = item(
        r#"{ "type": "sceneBool", "scene": "Coral Tower", "flag": "Shell Fossil Mimic", "required": 1 }"#,
    );
    assert_eq!(save.resolve(&wrong_tier), Resolved::Bool(false));
}

#[test]
fn scene_visited_checks_the_visited_list() {
    let save = load(common::with_player_field(
        common::minimal_save(),
        "scenesVisited",
        json!(["Bone_East_10", "Weave_05b"]),
    ));
    let visited = item(r#"{ "type": "sceneVisited", "scene": "Weave_05b" }"#);
    let not_visited = item(r#"{ "type": "sceneVisited", "scene": "Under_21" }"#);
    assert_eq!(save.resolve(&visited), Resolved::Bool(true));
    assert_eq!(save.resolve(&not_visited), Resolved::Bool(false));
}

#[test]
fn key_requires_a_literal_true() {
    let mut save = common::minimal_save();
    save["playerData"]["HasSlabKeyA"] = json!(true);
    save["playerData"]["oddKey"] = json!(1);
    let save = load(save);

    let key = item(r#"{ "type": "key", "flag": "HasSlabKeyA" }"#);
    assert_eq!(save.resolve(&key), Resolved::Bool(true));

    // Truthy-but-not-true never counts.
    let odd = item(r#"{ "type": "key", "flag": "oddKey" }"#);
    assert_eq!(save.resolve(&odd), Resolved::Bool(false));

    let multi = item(r#"{ "type": "key", "flags": ["HasSlabKeyB", "HasSlabKeyA"] }"#);
    assert_eq!(save.resolve(&multi), Resolved::Bool(true));
}

#[test]
fn tool_searches_tools_then_tool_equips() {
    // End-to-end scenario: Needle in Tools.
    let mut save = common::minimal_save();
    save["playerData"]["Tools"] = json!({
        "savedData": [{ "Name": "Needle", "Data": { "IsUnlocked": true } }]
    });
    save["playerData"]["ToolEquips"] = json!({
        "savedData": [{ "Name": "Straight Pin", "Data": { "IsUnlocked": true } }]
    });
    let save = load(save);

    let needle = item(r#"{ "type": "tool", "flag": "Needle" }"#);
    assert_eq!(save.resolve(&needle), Resolved::Bool(true));

    // Name matching is case/whitespace-insensitive.
    let pin = item(r#"{ "type": "tool", "flag": "straight  pin" }"#);
    assert_eq!(save.resolve(&pin), Resolved::Bool(true));

    // No entry in either list resolves to missing, not false.
    let absent = item(r#"{ "type": "tool", "flag": "Sting Shard" }"#);
    assert_eq!(save.resolve(&absent), Resolved::Missing);
}

#[test]
fn collectable_reads_the_amount() {
    let mut save = common::minimal_save();
    save["playerData"]["Collectables"] = json!({
        "savedData": [
            { "Name": "Shell Fossil", "Data": { "Amount": 4 } },
            { "Name": "Bone Scrap", "Data": {} },
        ]
    });
    let save = load(save);

    let fossil = item(r#"{ "type": "collectable", "flag": "Shell Fossil" }"#);
    assert_eq!(save.resolve(&fossil), Resolved::Number(4.0));

    // Entry without an Amount counts as zero.
    let scrap = item(r#"{ "type": "collectable", "flag": "Bone Scrap" }"#);
    assert_eq!(save.resolve(&scrap), Resolved::Number(0.0));

    let absent = item(r#"{ "type": "collectable", "flag": "Moss Gem" }"#);
    assert_eq!(save.resolve(&absent), Resolved::Missing);
}

#[test]
fn quest_completed_takes_precedence_over_accepted() {
    let mut save = common::minimal_save();
    save["playerData"]["QuestCompletionData"] = json!({
        "savedData": [
            { "Name": "Broodfeast", "Data": { "IsCompleted": true, "IsAccepted": true } },
            { "Name": "Silk and Soul", "Data": { "IsAccepted": true } },
            { "Name": "Dormant", "Data": {} },
        ]
    });
    let save = load(save);

    let both = item(r#"{ "type": "quest", "flag": "Broodfeast" }"#);
    assert_eq!(save.resolve(&both), Resolved::State(Progress::Completed));

    let accepted = item(r#"{ "type": "quest", "flag": "Silk and Soul" }"#);
    assert_eq!(save.resolve(&accepted), Resolved::State(Progress::Accepted));
    assert_eq!(save.classify(&accepted).state(), UnlockState::Accepted);

    let dormant = item(r#"{ "type": "quest", "flag": "Dormant" }"#);
    assert_eq!(save.resolve(&dormant), Resolved::Bool(false));

    let unknown = item(r#"{ "type": "quest", "flag": "Unposted" }"#);
    assert_eq!(save.resolve(&unknown), Resolved::Missing);
}

#[test]
fn journal_absent_is_zero_not_false() {
    let mut save = common::minimal_save();
    save["playerData"]["EnemyJournalKillData"] = json!({
        "list": [{ "Name": "Crawbug", "Record": { "Kills": 12, "HasBeenSeen": true } }]
    });
    let save = load(save);

    let seen = item(r#"{ "type": "journal", "flag": "Crawbug", "required": 20 }"#);
    assert_eq!(save.resolve(&seen), Resolved::Number(12.0));
    assert_eq!(save.classify(&seen).state(), UnlockState::Accepted);

    let never_seen = item(r#"{ "type": "journal", "flag": "Aknid", "required": 15 }"#);
    assert_eq!(save.resolve(&never_seen), Resolved::Number(0.0));
    assert_eq!(save.classify(&never_seen).state(), UnlockState::Locked);
}

#[test]
fn relic_deposited_takes_precedence() {
    let mut save = common::minimal_save();
    save["playerData"]["Relics"] = json!({
        "savedData": [
            { "Name": "Arcane Egg", "Data": { "IsDeposited": true, "HasSeenInRelicBoard": true } },
            { "Name": "Weaver Effigy", "Data": { "IsCollected": true } },
        ]
    });
    save["playerData"]["MementosDeposited"] = json!({
        "savedData": [{ "Name": "Old Coin", "Data": { "IsDeposited": true } }]
    });
    let save = load(save);

    let egg = item(r#"{ "type": "relic", "flag": "Arcane Egg" }"#);
    assert_eq!(save.resolve(&egg), Resolved::State(Progress::Deposited));

    let effigy = item(r#"{ "type": "relic", "flag": "Weaver Effigy" }"#);
    assert_eq!(save.resolve(&effigy), Resolved::State(Progress::Collected));

    // Both lists are searched, Relics first.
    let coin = item(r#"{ "type": "relic", "flag": "Old Coin" }"#);
    assert_eq!(save.resolve(&coin), Resolved::State(Progress::Deposited));

    let absent = item(r#"{ "type": "relic", "flag": "Lost Bead" }"#);
    assert_eq!(save.resolve(&absent), Resolved::Bool(false));
}

#[test]
fn materium_board_seen_means_deposited() {
    let mut save = common::minimal_save();
    save["playerData"]["MateriumCollected"] = json!({
        "savedData": [
            { "Name": "Lumen Core", "Data": { "HasSeenInRelicBoard": true, "IsCollected": true } },
            { "Name": "Dull Core", "Data": { "IsCollected": true } },
        ]
    });
    let save = load(save);

    let lumen = item(r#"{ "type": "materium", "flag": "Lumen Core" }"#);
    assert_eq!(save.resolve(&lumen), Resolved::State(Progress::Deposited));

    let dull = item(r#"{ "type": "materium", "flag": "Dull Core" }"#);
    assert_eq!(save.resolve(&dull), Resolved::State(Progress::Collected));

    let absent = item(r#"{ "type": "materium", "flag": "Void Core" }"#);
    assert_eq!(save.resolve(&absent), Resolved::Bool(false));
}

#[test]
fn device_related_flag_wins_over_scene_flags() {
    let mut save = common::minimal_save();
    save["playerData"]["DepositedFarsight"] = json!(true);
    save["sceneData"]["persistentBools"] = json!({
        "serializedList": [
            { "SceneName": "Song Tower", "ID": "Farsight Device", "Value": true },
        ]
    });
    let save = load(save);

    let deposited = item(
        r#"{ "type": "device", "scene": "Song Tower", "flag": "Farsight Device", "relatedFlag": "DepositedFarsight" }"#,
    );
    assert_eq!(save.resolve(&deposited), Resolved::State(Progress::Deposited));

    let collected = item(
        r#"{ "type": "device", "scene": "Song Tower", "flag": "Farsight Device", "relatedFlag": "DepositedOther" }"#,
    );
    assert_eq!(save.resolve(&collected), Resolved::State(Progress::Collected));

    let neither = item(
        r#"{ "type": "device", "scene": "Song Tower", "flag": "Other Device", "relatedFlag": "DepositedOther" }"#,
    );
    assert_eq!(save.resolve(&neither), Resolved::Bool(false));
}

#[test]
fn any_of_passes_when_any_check_passes() {
    let mut save = common::minimal_save();
    save["playerData"]["hasDash"] = json!(false);
    save["playerData"]["nailUpgrades"] = json!(2);
    let save = load(save);

    let either = item(
        r#"{ "type": "anyOf", "anyOf": [
            { "type": "flag", "flag": "hasDash" },
            { "type": "level", "flag": "nailUpgrades", "required": 2 }
        ] }"#,
    );
    let value = save.resolve(&either);
    assert_eq!(
        value,
        Resolved::Many(vec![Resolved::Bool(false), Resolved::Number(2.0)])
    );
    assert!(save.classify(&either).done);
}

#[test]
fn duplicate_flag_triples_last_write_wins() {
    let mut save = common::minimal_save();
    // serde_json maps are sorted by key, so "a" is walked before "b".
    save["sceneData"]["a"] = json!([{ "SceneName": "Dup Scene", "ID": "Flag", "Value": false }]);
    save["sceneData"]["b"] = json!([{ "SceneName": "Dup Scene", "ID": "Flag", "Value": true }]);
    let save = load(save);
    assert_eq!(save.flags().get("Dup Scene", "Flag"), Some(true));
}

#[test]
fn resolution_is_deterministic() {
    let mut save = common::minimal_save();
    save["playerData"]["Relics"] = json!({
        "savedData": [{ "Name": "Arcane Egg", "Data": { "IsCollected": true } }]
    });
    let save = load(save);
    let relic = item(r#"{ "type": "relic", "flag": "Arcane Egg" }"#);
    assert_eq!(save.resolve(&relic), save.resolve(&relic));
}

#[test]
fn exclusive_group_collapses_to_the_owned_member() {
    // End-to-end scenario: one heart variant deposited excludes the rest.
    let mut save = common::minimal_save();
    save["playerData"]["Relics"] = json!({
        "savedData": [{ "Name": "Heart Coral", "Data": { "IsDeposited": true } }]
    });
    let save = load(save);

    let items: Vec<Item> = vec![
        item(r#"{ "id": "heart_flower", "type": "relic", "flag": "Heart Flower", "exclusiveGroup": "hearts" }"#),
        item(r#"{ "id": "heart_coral", "type": "relic", "flag": "Heart Coral", "exclusiveGroup": "hearts" }"#),
        item(r#"{ "id": "heart_hunter", "type": "relic", "flag": "Heart Hunter", "exclusiveGroup": "hearts" }"#),
        item(r#"{ "id": "clover_heart", "type": "relic", "flag": "Clover Heart", "exclusiveGroup": "hearts" }"#),
    ];

    let kept = filter_exclusive(&items, &save);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id.as_deref(), Some("heart_coral"));

    // The group counts as 1 of 1.
    let (obtained, total) = count_progress(&kept, Some(&save));
    assert_eq!((obtained, total), (1, 1));
}

#[test]
fn completed_quest_collapses_its_exclusive_group() {
    // The two Huntress feast quests are alternatives; completing one hides
    // the other.
    let mut save = common::minimal_save();
    save["playerData"]["QuestCompletionData"] = json!({
        "savedData": [{ "Name": "Huntress Quest", "Data": { "IsCompleted": true } }]
    });
    let save = load(save);

    let items: Vec<Item> = vec![
        item(r#"{ "id": "broodfest", "type": "quest", "flag": "Huntress Quest", "exclusiveGroup": "feast" }"#),
        item(r#"{ "id": "runtfeast", "type": "quest", "flag": "Huntress Quest Runt", "exclusiveGroup": "feast" }"#),
    ];

    let kept = filter_exclusive(&items, &save);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id.as_deref(), Some("broodfest"));

    let (obtained, total) = count_progress(&kept, Some(&save));
    assert_eq!((obtained, total), (1, 1));
}

#[test]
fn unowned_exclusive_group_counts_once_in_the_total() {
    let save = load(common::minimal_save());
    let items: Vec<Item> = vec![
        item(r#"{ "type": "relic", "flag": "Heart Flower", "exclusiveGroup": "hearts" }"#),
        item(r#"{ "type": "relic", "flag": "Heart Coral", "exclusiveGroup": "hearts" }"#),
        item(r#"{ "type": "flag", "flag": "hasDash" }"#),
    ];
    let kept = filter_exclusive(&items, &save);
    assert_eq!(kept.len(), 3, "nothing owned, nothing filtered");

    let (obtained, total) = count_progress(&kept, Some(&save));
    assert_eq!(obtained, 0);
    assert_eq!(total, 2, "one plain item plus one group");
}
