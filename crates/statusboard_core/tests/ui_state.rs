use statusboard_core::db::open_db_in_memory;
use statusboard_core::insight::pipeline_ids;
use statusboard_core::{
    ChecklistService, ChecklistState, KvRepository, ProjectData, RepoError, SqliteKvRepository,
    ThemePreference, ThemeService, PIPELINE_CHECKLIST_KEY, THEME_KEY,
};

const IDS: [&str; 3] = ["scan", "map", "build"];

#[test]
fn toggle_flips_exactly_one_id() {
    let mut state = ChecklistState::new(IDS);
    state.toggle("map");

    assert!(state.is_checked("map"));
    assert!(!state.is_checked("scan"));
    assert!(!state.is_checked("build"));
    assert_eq!(state.completed_count(), 1);
}

#[test]
fn set_all_true_then_false_restores_initial_state() {
    let initial = ChecklistState::new(IDS);
    let mut state = initial.clone();

    state.set_all(true);
    assert_eq!(state.completion(), 1.0);
    state.set_all(false);

    assert_eq!(state, initial);
}

#[test]
fn checklist_state_survives_reopen_through_the_store() {
    let conn = open_db_in_memory().unwrap();
    let service = ChecklistService::new(SqliteKvRepository::new(&conn));

    let mut state = service.load(PIPELINE_CHECKLIST_KEY, IDS);
    assert!(service.toggle(PIPELINE_CHECKLIST_KEY, &mut state, "build"));

    let restored = service.load(PIPELINE_CHECKLIST_KEY, IDS);
    assert_eq!(restored, state);
    assert!(restored.is_checked("build"));
}

#[test]
fn corrupt_checklist_entry_restores_all_false() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.put(PIPELINE_CHECKLIST_KEY, "{not json").unwrap();

    let service = ChecklistService::new(&repo);
    let state = service.load(PIPELINE_CHECKLIST_KEY, IDS);

    assert_eq!(state, ChecklistState::new(IDS));
}

#[test]
fn reset_forgets_stored_checklist() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    let service = ChecklistService::new(&repo);

    let mut state = service.load(PIPELINE_CHECKLIST_KEY, IDS);
    service.set_all(PIPELINE_CHECKLIST_KEY, &mut state, true);
    assert!(service.reset(PIPELINE_CHECKLIST_KEY));

    assert_eq!(repo.get(PIPELINE_CHECKLIST_KEY).unwrap(), None);
    assert_eq!(service.load(PIPELINE_CHECKLIST_KEY, IDS).completed_count(), 0);
}

#[test]
fn fallback_pipeline_seeds_the_checklist() {
    let data = ProjectData::fallback();
    let state = ChecklistState::new(pipeline_ids(&data));

    assert_eq!(state.ids().len(), data.pipeline().len());
    assert_eq!(state.completion(), 0.0);
}

#[test]
fn blank_keys_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);

    assert!(matches!(repo.put("  ", "x"), Err(RepoError::InvalidKey(_))));
}

#[test]
fn theme_defaults_to_light_and_toggle_persists() {
    let conn = open_db_in_memory().unwrap();
    let service = ThemeService::new(SqliteKvRepository::new(&conn));

    assert_eq!(service.load(), ThemePreference::Light);
    assert_eq!(service.toggle(), ThemePreference::Dark);
    assert_eq!(service.load(), ThemePreference::Dark);
}

#[test]
fn corrupt_theme_entry_falls_back_to_light() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::new(&conn);
    repo.put(THEME_KEY, "\"sepia\"").unwrap();

    assert_eq!(ThemeService::new(&repo).load(), ThemePreference::Light);
}
