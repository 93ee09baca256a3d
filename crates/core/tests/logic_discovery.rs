mod common;

use common::{names_of, setup_project};

#[test]
fn test_scan_yields_declared_names_in_order() {
    let (_dir, engine, id, _rx) = setup_project(
        &[("settings.py", "DEBUG = True\nALLOWED_HOSTS = []\n")],
        &["settings.py"],
    );
    assert_eq!(
        names_of(&engine, &id),
        Some(vec!["DEBUG".to_string(), "ALLOWED_HOSTS".to_string()])
    );
}

#[test]
fn test_names_dedupe_across_files_in_list_order() {
    let (_dir, engine, id, _rx) = setup_project(
        &[
            ("settings.py", "DEBUG = True\nALLOWED_HOSTS = []\n"),
            ("local.py", "DEBUG = False\nTIME_ZONE = 'UTC'\n"),
        ],
        &["settings.py", "local.py"],
    );
    assert_eq!(
        names_of(&engine, &id),
        Some(vec![
            "DEBUG".to_string(),
            "ALLOWED_HOSTS".to_string(),
            "TIME_ZONE".to_string(),
        ])
    );
}

#[test]
fn test_missing_file_is_skipped_not_fatal() {
    let (_dir, engine, id, _rx) = setup_project(
        &[("settings.py", "DEBUG = True\n")],
        &["nope.py", "settings.py"],
    );
    assert_eq!(names_of(&engine, &id), Some(vec!["DEBUG".to_string()]));
}

#[test]
fn test_rebuild_is_idempotent() {
    let (_dir, engine, id, _rx) = setup_project(
        &[("settings.py", "DEBUG = True\nSECRET_KEY = 'x'\n")],
        &["settings.py"],
    );
    let first = names_of(&engine, &id);
    engine.rebuild(&id);
    assert_eq!(names_of(&engine, &id), first);
}

#[test]
fn test_duplicate_list_entries_still_dedupe() {
    let (_dir, engine, id, _rx) = setup_project(
        &[("settings.py", "DEBUG = True\n")],
        &["settings.py", "settings.py"],
    );
    assert_eq!(names_of(&engine, &id), Some(vec!["DEBUG".to_string()]));
}

#[test]
fn test_no_configured_files_leaves_index_absent() {
    let (_dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &[]);
    assert!(!engine.has_index(&id));
    assert!(engine.names(&id).is_none());
}

#[test]
fn test_unreadable_everything_keeps_previous_index() {
    let (dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &["settings.py"]);
    assert_eq!(names_of(&engine, &id), Some(vec!["DEBUG".to_string()]));

    std::fs::remove_file(dir.path().join("settings.py")).unwrap();
    engine.rebuild(&id);
    // Stale but complete beats empty: the old snapshot survives.
    assert_eq!(names_of(&engine, &id), Some(vec!["DEBUG".to_string()]));
}

#[test]
fn test_readable_empty_file_replaces_with_empty_list() {
    let (dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &["settings.py"]);
    std::fs::write(dir.path().join("settings.py"), "# nothing here\n").unwrap();
    engine.rebuild(&id);
    assert!(engine.has_index(&id));
    assert_eq!(names_of(&engine, &id), Some(Vec::new()));
}

#[test]
fn test_change_signal_triggers_rescan() {
    let (dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &["settings.py"]);
    std::fs::write(dir.path().join("settings.py"), "DEBUG = True\nNEW_FLAG = 1\n").unwrap();

    engine.on_change_signal(&djset_core::ChangeSignal { scope: id.clone() });
    assert_eq!(
        names_of(&engine, &id),
        Some(vec!["DEBUG".to_string(), "NEW_FLAG".to_string()])
    );
}
