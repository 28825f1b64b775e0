// ==========================================
// 元数据同步流程集成测试
// ==========================================
// 测试目标: 名称映射 → Starward 记录 → 人工补全 → 覆盖保存
// ==========================================


use serde_json::json;
use starward_uigf_sync::domain::{ItemCategory, Rarity};
use starward_uigf_sync::engine::{
    MetaSyncPipeline, ResolveAction, ScriptedAnswers, SessionState,
};
use starward_uigf_sync::importer::ImportError;
use starward_uigf_sync::repository::MetaStoreRepository;
use starward_uigf_sync::EngineError;
use test_helpers::{read_json, sample_mapping, starward_export, store_json, Workspace};

fn weapon(rarity: u8) -> ResolveAction {
    ResolveAction::Submit {
        category: Some(ItemCategory::Weapon),
        rarity: Rarity::new(rarity),
    }
}

#[test]
fn test_first_run_creates_store() {
    let ws = Workspace::new().unwrap();
    let mapping = ws.write_json("mapping.json", &sample_mapping()).unwrap();
    let starward = ws
        .write_json(
            "starward.json",
            &starward_export(vec![json!({
                "item_id": "1", "name": "Sword", "item_type": "武器", "rank_type": "3",
                "time": "2024-01-01 00:00:00", "gacha_type": "301"
            })]),
        )
        .unwrap();
    let store_path = ws.path("meta.json");

    let mut answers = ScriptedAnswers::new([weapon(4), weapon(5)]);
    let report = MetaSyncPipeline::default()
        .reconcile(&mapping, &starward, &store_path, &mut answers)
        .expect("reconcile should succeed");

    assert!(!report.store_existed);
    assert_eq!(report.total_entries, 3);
    assert_eq!(report.from_mapping.added, 3);
    assert_eq!(report.from_records.added, 0);
    assert_eq!(report.from_records.fields_filled, 2);
    assert_eq!(report.pending_before, 2);
    assert_eq!(report.pending_after, 0);
    assert_eq!(report.resolution.state, SessionState::Done);

    let saved = read_json(&store_path).unwrap();
    assert_eq!(saved["by_id"]["1"]["rank_type"], json!("3"));
    assert_eq!(saved["by_id"]["2"]["name"], json!("Sword"));
    assert_eq!(saved["by_id"]["2"]["rank_type"], json!("4"));
    assert_eq!(saved["by_id"]["3"]["name"], json!("Bow"));
    assert_eq!(saved["by_id"]["3"]["item_type"], json!("武器"));
    assert_eq!(saved["by_id"]["3"]["item_id"], json!("3"));
}

#[test]
fn test_existing_store_wins_over_later_layers() {
    let ws = Workspace::new().unwrap();
    let store_path = ws
        .write_json(
            "meta.json",
            &store_json(&[("1", "Old Sword", Some("武器"), None)]),
        )
        .unwrap();
    let mapping = ws.write_json("mapping.json", &json!({"New Sword": 1})).unwrap();
    let starward = ws
        .write_json(
            "starward.json",
            &starward_export(vec![json!({
                "item_id": "1", "name": "Other", "item_type": "角色", "rank_type": "4"
            })]),
        )
        .unwrap();

    let mut answers = ScriptedAnswers::new([]);
    let report = MetaSyncPipeline::default()
        .reconcile(&mapping, &starward, &store_path, &mut answers)
        .unwrap();

    assert!(report.store_existed);
    assert_eq!(report.pending_before, 0);

    let store = MetaStoreRepository.load(&store_path).unwrap();
    let entry = store.get("1").unwrap();
    assert_eq!(entry.name, "Old Sword");
    assert_eq!(entry.item_type.as_deref(), Some("武器"));
    assert_eq!(entry.rank_type.as_deref(), Some("4"));
}

#[test]
fn test_rerun_on_same_inputs_changes_nothing() {
    let ws = Workspace::new().unwrap();
    let mapping = ws.write_json("mapping.json", &sample_mapping()).unwrap();
    let starward = ws.write_json("starward.json", &starward_export(vec![])).unwrap();
    let store_path = ws.path("meta.json");
    let pipeline = MetaSyncPipeline::default();

    let mut answers = ScriptedAnswers::new([weapon(3), ResolveAction::Skip, weapon(4)]);
    pipeline
        .reconcile(&mapping, &starward, &store_path, &mut answers)
        .unwrap();
    let first = std::fs::read_to_string(&store_path).unwrap();

    let mut answers = ScriptedAnswers::new([ResolveAction::Abandon]);
    let report = pipeline
        .reconcile(&mapping, &starward, &store_path, &mut answers)
        .unwrap();
    let second = std::fs::read_to_string(&store_path).unwrap();

    assert_eq!(first, second);
    assert_eq!(report.from_mapping.added, 0);
    assert_eq!(report.from_mapping.fields_filled, 0);
    assert_eq!(report.pending_before, 1);
    assert_eq!(report.resolution.state, SessionState::Abandoned);
}

#[test]
fn test_abandon_keeps_confirmed_answers() {
    let ws = Workspace::new().unwrap();
    let mapping = ws.write_json("mapping.json", &sample_mapping()).unwrap();
    let starward = ws.write_json("starward.json", &starward_export(vec![])).unwrap();
    let store_path = ws.path("meta.json");

    let mut answers = ScriptedAnswers::new([weapon(3), ResolveAction::Abandon]);
    let report = MetaSyncPipeline::default()
        .reconcile(&mapping, &starward, &store_path, &mut answers)
        .unwrap();

    assert_eq!(report.resolution.state, SessionState::Abandoned);
    assert_eq!(report.pending_after, 2);

    let store = MetaStoreRepository.load(&store_path).unwrap();
    assert!(store.get("1").unwrap().is_classified());
    assert!(!store.get("2").unwrap().is_classified());
}

#[test]
fn test_malformed_mapping_leaves_store_untouched() {
    let ws = Workspace::new().unwrap();
    let original = store_json(&[("1", "Sword", None, None)]);
    let store_path = ws.write_json("meta.json", &original).unwrap();
    let mapping = ws.write_text("mapping.json", "[1, 2, 3]").unwrap();
    let starward = ws.write_json("starward.json", &starward_export(vec![])).unwrap();

    let mut answers = ScriptedAnswers::new([weapon(5)]);
    let result = MetaSyncPipeline::default().reconcile(&mapping, &starward, &store_path, &mut answers);

    assert!(matches!(
        result,
        Err(EngineError::Import(ImportError::FormatError { .. }))
    ));
    assert_eq!(read_json(&store_path).unwrap(), original);
}

#[test]
fn test_invalid_starward_export_is_validation_error() {
    let ws = Workspace::new().unwrap();
    let mapping = ws.write_json("mapping.json", &sample_mapping()).unwrap();
    let starward = ws
        .write_json("starward.json", &json!({"info": {}, "hk4e": [{"list": []}]}))
        .unwrap();
    let store_path = ws.path("meta.json");

    let mut answers = ScriptedAnswers::new([]);
    let result = MetaSyncPipeline::default().reconcile(&mapping, &starward, &store_path, &mut answers);

    assert!(matches!(
        result,
        Err(EngineError::Import(ImportError::ValidationError { .. }))
    ));
    assert!(!store_path.exists());
}
