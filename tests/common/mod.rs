use serde_json::{json, Value};

/// A minimal save document that passes schema validation: empty lists,
/// `completionPercentage: 42`, `geo: 100`, `ShellShards: 3`,
/// `permadeathMode: 0`.
pub fn minimal_save() -> Value {
    json!({
        "playerData": {
            "Collectables": { "savedData": [] },
            "completionPercentage": 42,
            "EnemyJournalKillData": { "list": [] },
            "MateriumCollected": { "savedData": [] },
            "MementosDeposited": { "savedData": [] },
            "geo": 100,
            "permadeathMode": 0,
            "playTime": 3725.0,
            "QuestCompletionData": { "savedData": [] },
            "Relics": { "savedData": [] },
            "scenesVisited": [],
            "ShellShards": 3,
            "ToolEquips": { "savedData": [] },
            "Tools": { "savedData": [] },
            "PurchasedBonebottomFaithToken": false,
            "CollectedDustCageKey": false,
            "MerchantEnclaveSimpleKey": false,
            "BallowGivenKey": false,
            "collectedWardKey": false,
            "collectedWardBossKey": false,
            "HasSlabKeyC": false,
            "HasSlabKeyA": false,
            "HasSlabKeyB": false,
            "PurchasedArchitectKey": false
        },
        "sceneData": {}
    })
}

/// Set a field under `playerData`.
pub fn with_player_field(mut save: Value, key: &str, value: Value) -> Value {
    save["playerData"][key] = value;
    save
}
