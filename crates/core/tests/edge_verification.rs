mod common;

use common::{names_of, setup_project};
use djset_core::Config;

#[test]
fn test_config_change_rebuilds_index_and_watches_for_every_scope() {
    let (dir, engine, id, _rx) = setup_project(
        &[
            ("settings.py", "DEBUG = True\n"),
            ("local.py", "TIME_ZONE = 'UTC'\n"),
        ],
        &["settings.py"],
    );
    assert_eq!(names_of(&engine, &id), Some(vec!["DEBUG".to_string()]));
    assert_eq!(engine.watched_file_count(&id), 1);

    // No file content changed, only the configuration value.
    engine.update_config(Config {
        settings_files: vec!["settings.py".to_string(), "local.py".to_string()],
    });
    assert_eq!(
        names_of(&engine, &id),
        Some(vec!["DEBUG".to_string(), "TIME_ZONE".to_string()])
    );
    assert_eq!(engine.watched_file_count(&id), 2);
    drop(dir);
}

#[test]
fn test_emptying_the_config_tears_watches_down() {
    let (_dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &["settings.py"]);
    assert_eq!(engine.watched_file_count(&id), 1);

    engine.update_config(Config::default());
    assert_eq!(engine.watched_file_count(&id), 0);
    // Rebuild with nothing configured is a no-op: the old snapshot stays.
    assert_eq!(names_of(&engine, &id), Some(vec!["DEBUG".to_string()]));
}

#[test]
fn test_scope_removal_drops_index_and_watches() {
    let (_dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &["settings.py"]);
    engine.remove_scope(&id);
    assert!(engine.names(&id).is_none());
    assert_eq!(engine.watched_file_count(&id), 0);
}

#[test]
fn test_scope_for_path_picks_longest_root() {
    let (dir, engine, id, _rx) = setup_project(&[("settings.py", "DEBUG = True\n")], &["settings.py"]);
    let inside = dir.path().join("app/views.py");
    assert_eq!(engine.scope_for_path(&inside), Some(id));
    assert_eq!(engine.scope_for_path(std::path::Path::new("/elsewhere/x.py")), None);
}
