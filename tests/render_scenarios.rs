//! End-to-end rendering from JSON item records to HTML

use memoria::items::{merge_localized, RawDataset};
use memoria::{DescriptionEngine, Item, ItemKind};
use serde_json::{json, Value};

fn dataset(value: Value) -> RawDataset {
    match value {
        Value::Object(map) => map,
        _ => panic!("dataset must be an object"),
    }
}

fn single(value: Value) -> Item {
    let data = dataset(value);
    let mut items = merge_localized(&data, &data);
    assert_eq!(items.len(), 1);
    items.remove(0)
}

#[test]
fn flat_damage_memory() {
    let item = single(json!({
        "Memory_Strike": {
            "name": "Strike",
            "rarity": "Common",
            "description": "Deals damage.",
            "rawDesc": "Deals {0} damage.",
            "rawDescVars": [{
                "rendered": "<sprite=5>",
                "format": "#,##0",
                "data": {
                    "basicConstant": 10, "basicAP": 0, "basicAD": 0,
                    "basicLvl": 0, "basicAddedMultiplierPerLevel": 0
                }
            }]
        }
    }));

    let html = DescriptionEngine::default()
        .render(&item, 5.0, ItemKind::Memory)
        .unwrap();
    assert_eq!(
        html,
        "Deals 10<span class=\"tooltip\" data-tip=\"0 / lvl\">\
         <img src=\"assets/game/sprites/5.png\" class=\"inline-sprite\" alt=\"Sprite 5\">\
         </span> damage."
    );
}

#[test]
fn essence_quality_scaling() {
    let item = single(json!({
        "Gem_E_Focus": {
            "name": "Focus",
            "rarity": "Epic",
            "rawDesc": "Gain {0} crit chance.",
            "rawDescVars": [{
                "rendered": "10%<sprite=5>",
                "format": "#,##0'%'",
                "data": { "basicConstant": 10, "basicAddedMultiplierPerLevel": 0.01 }
            }]
        }
    }));

    // 10 * (1 + 0.01 * 100) = 20; rate 10 * 0.01 * 5000 / 100 = 5
    let html = DescriptionEngine::new("s")
        .render(&item, 100.0, ItemKind::Essence)
        .unwrap();
    assert_eq!(
        html,
        "Gain 20%<span class=\"tooltip\" data-tip=\"5% / 50% Qual.\">\
         <img src=\"s/5.png\" class=\"inline-sprite\" alt=\"Sprite 5\"></span> crit chance."
    );
}

#[test]
fn colored_ratio_with_unknown_sibling() {
    let item = single(json!({
        "Memory_Bolt": {
            "name": "Bolt",
            "rarity": "Rare",
            "rawDesc": "Deals {0} ({1}) damage.",
            "rawDescVars": [
                { "rendered": "30<sprite=5>", "format": "#,##0", "data": {} },
                {
                    "rendered": "<color=#00ffcc>45%</color><sprite=5>",
                    "format": "P0",
                    "data": { "basicAP": "0.45" }
                }
            ]
        }
    }));

    let html = DescriptionEngine::new("s")
        .render(&item, 0.0, ItemKind::Memory)
        .unwrap();
    assert_eq!(
        html,
        "Deals 30<span class=\"tooltip\" data-tip=\"Unknown value\">\
         <img src=\"s/5.png\" class=\"inline-sprite\" alt=\"Sprite 5\"></span>? \
         (<span style=\"color: #00ffcc\">45%</span><span class=\"tooltip\" data-tip=\"0% / lvl\">\
         <img src=\"s/5.png\" class=\"inline-sprite\" alt=\"Sprite 5\"></span>) damage."
    );
}

#[test]
fn unknown_format_falls_back_to_plain() {
    let item = single(json!({
        "Memory_Odd": {
            "name": "Odd",
            "rarity": "Unique",
            "description": "Something\nodd.",
            "rawDesc": "Value {0}",
            "rawDescVars": [
                { "rendered": "1<sprite=5>", "format": "C0", "data": { "basicConstant": 1 } }
            ]
        }
    }));

    let engine = DescriptionEngine::default();
    assert!(engine.render(&item, 0.0, ItemKind::Memory).is_err());
    assert_eq!(engine.render_or_plain(&item, 0.0, ItemKind::Memory), "Something<br>odd.");
}
