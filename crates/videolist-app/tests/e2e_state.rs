/// End-to-end tests for `AppState` — the list-screen state machine.
///
/// These tests exercise the real refresh paths without any rendering:
///   - Walk refresh lifecycle (start, poll, completion, list replacement)
///   - Indexed refresh (synchronous, newest first)
///   - Failure reporting and permission denial
///   - Click → play target
///
/// The real walker and worker thread are used, so no mocking is needed.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use videolist_app::{AppPhase, AppState, PlayTarget};
use videolist_core::config::{ScanConfig, VideoListConfig};
use videolist_core::platform::{FixedPermission, FsPermission};
use videolist_core::scanner::{MediaRecord, MemoryMediaIndex, ScanMode, Scanner, SqliteMediaIndex};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn touch(path: &Path) {
    fs::write(path, b"\0").unwrap();
}

fn make_temp_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("a.mp4"));
    touch(&tmp.path().join("notes.txt"));
    let sub = tmp.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    touch(&sub.join("b.mov"));
    tmp
}

fn walk_state(root: &Path) -> AppState {
    AppState::new(Scanner::new(ScanConfig::with_root(root)), FsPermission)
}

/// Pump `process_scan_messages()` until the phase leaves `Refreshing` or the
/// deadline expires.
fn pump_until_done(state: &mut AppState) {
    let deadline = std::time::Instant::now() + Duration::from_secs(30);
    while state.phase == AppPhase::Refreshing {
        assert!(
            std::time::Instant::now() < deadline,
            "scan did not complete within 30 seconds"
        );
        state.process_scan_messages();
        std::thread::sleep(Duration::from_millis(5));
    }
}

fn sorted_names(state: &AppState) -> Vec<String> {
    let mut names: Vec<String> = state
        .videos()
        .iter()
        .map(|v| v.display_name().to_string())
        .collect();
    names.sort();
    names
}

// ── Walk refresh ──────────────────────────────────────────────────────────────

/// A new state is idle with an empty list.
#[test]
fn new_state_is_idle() {
    let tmp = make_temp_tree();
    let state = walk_state(tmp.path());
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.videos().is_empty());
    assert!(state.refreshed_at().is_none());
}

/// `refresh` on the walk path enters `Refreshing`; polling brings it to
/// `Ready` with the discovered videos.
#[test]
fn walk_refresh_completes() {
    let tmp = make_temp_tree();
    let mut state = walk_state(tmp.path());
    assert_eq!(state.scan_mode(), ScanMode::Walk);

    assert!(state.refresh());
    assert_eq!(state.phase, AppPhase::Refreshing);
    pump_until_done(&mut state);

    assert_eq!(state.phase, AppPhase::Ready);
    assert_eq!(sorted_names(&state), vec!["a.mp4", "b.mov"]);
    assert!(state.error_message().is_none());
    assert!(state.refreshed_at().is_some());
}

/// A second refresh while the first is running is refused.
#[test]
fn refresh_while_refreshing_is_ignored() {
    let tmp = make_temp_tree();
    let mut state = walk_state(tmp.path());
    assert!(state.refresh());
    if state.phase == AppPhase::Refreshing {
        assert!(!state.refresh());
    }
    state.wait_for_scan();
    assert_eq!(state.phase, AppPhase::Ready);
}

/// Pull-to-refresh replaces the whole list, including removals.
#[test]
fn refresh_replaces_list() {
    let tmp = make_temp_tree();
    let mut state = walk_state(tmp.path());
    state.refresh();
    state.wait_for_scan();
    assert_eq!(state.videos().len(), 2);

    fs::remove_file(tmp.path().join("a.mp4")).unwrap();
    touch(&tmp.path().join("c.avi"));
    state.refresh();
    state.wait_for_scan();
    assert_eq!(sorted_names(&state), vec!["b.mov", "c.avi"]);
}

/// A failed scan reports its message and keeps the previous list.
#[test]
fn failed_scan_keeps_previous_list() {
    let tmp = make_temp_tree();
    let sub = tmp.path().join("sub");
    // Permission is granted up front; only the scan itself can fail.
    let mut state = AppState::new(
        Scanner::new(ScanConfig::with_root(&sub)),
        FixedPermission(true),
    );
    state.refresh();
    state.wait_for_scan();
    assert_eq!(sorted_names(&state), vec!["b.mov"]);

    fs::remove_dir_all(&sub).unwrap();
    state.refresh();
    state.wait_for_scan();

    assert_eq!(state.phase, AppPhase::Ready);
    assert_eq!(sorted_names(&state), vec!["b.mov"]);
    assert_eq!(
        state.error_message(),
        Some("Cannot read External storage directory.")
    );

    state.clear_error();
    assert!(state.error_message().is_none());
}

// ── Permission ────────────────────────────────────────────────────────────────

/// Denied permission blocks the scan and surfaces the fixed message.
#[test]
fn permission_denied_blocks_scan() {
    let tmp = make_temp_tree();
    let mut state = AppState::new(
        Scanner::new(ScanConfig::with_root(tmp.path())),
        FixedPermission(false),
    );

    assert!(!state.refresh());
    assert!(state.permission_denied());
    assert_eq!(state.phase, AppPhase::Idle);
    assert!(state.videos().is_empty());
    assert_eq!(
        state.error_message(),
        Some("Cannot read videos without storage read permission.")
    );
}

// ── Indexed refresh ───────────────────────────────────────────────────────────

/// The indexed path completes inside `refresh`, newest first.
#[test]
fn indexed_refresh_is_synchronous() {
    let tmp = TempDir::new().unwrap();
    let index = Arc::new(MemoryMediaIndex::with_records(vec![
        MediaRecord::video(1, "older.mp4", 10_000, 100),
        MediaRecord::video(2, "newer.mp4", 10_000, 200),
    ]));
    let scanner = Scanner::new(ScanConfig::with_root(tmp.path())).with_index(index.clone());
    let mut state = AppState::new(scanner, FsPermission);

    assert!(state.refresh());
    assert_eq!(state.phase, AppPhase::Ready);
    let names: Vec<&str> = state.videos().iter().map(|v| v.display_name()).collect();
    assert_eq!(names, vec!["newer.mp4", "older.mp4"]);

    index.insert(MediaRecord::video(3, "newest.mp4", 10_000, 300));
    state.refresh();
    assert_eq!(state.videos()[0].display_name(), "newest.mp4");
}

/// An unreachable index turns into an error message.
#[test]
fn indexed_refresh_reports_unreachable_index() {
    let tmp = TempDir::new().unwrap();
    let index = Arc::new(MemoryMediaIndex::new());
    index.set_available(false);
    let scanner = Scanner::new(ScanConfig::with_root(tmp.path())).with_index(index);
    let mut state = AppState::new(scanner, FsPermission);

    state.refresh();
    assert_eq!(state.phase, AppPhase::Ready);
    assert!(state
        .error_message()
        .unwrap()
        .starts_with("Media index unavailable"));
}

/// The indexed path never reads the storage root, so a root the filesystem
/// check would refuse does not block it.
#[test]
fn indexed_refresh_ignores_unreadable_root() {
    let tmp = TempDir::new().unwrap();
    let missing_root = tmp.path().join("no-such-storage");
    let index = Arc::new(MemoryMediaIndex::with_records(vec![MediaRecord::video(
        7, "indexed.mp4", 10_000, 1,
    )]));
    let scanner = Scanner::new(ScanConfig::with_root(&missing_root)).with_index(index);
    let mut state = AppState::new(scanner, FsPermission);

    assert!(state.refresh());
    assert!(!state.permission_denied());
    assert_eq!(state.phase, AppPhase::Ready);
    assert_eq!(state.videos().len(), 1);
    assert!(state.error_message().is_none());
}

/// The walk path still checks the root before scanning.
#[test]
fn walk_refresh_checks_root_permission() {
    let tmp = TempDir::new().unwrap();
    let mut state = walk_state(&tmp.path().join("no-such-storage"));

    assert!(!state.refresh());
    assert!(state.permission_denied());
    assert_eq!(state.phase, AppPhase::Idle);
}

/// `build` attaches the configured SQLite catalog.
#[test]
fn build_uses_configured_index() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("media.db");
    SqliteMediaIndex::create(&db)
        .unwrap()
        .insert(&MediaRecord::video(5, "catalogued.mkv", 9_000, 1))
        .unwrap();

    let mut config = VideoListConfig::default();
    config.scan.root = tmp.path().to_path_buf();
    config.index.database = Some(db);

    let mut state = AppState::build(&config).unwrap();
    assert_eq!(state.scan_mode(), ScanMode::Indexed);
    state.refresh();
    assert_eq!(state.videos()[0].display_name(), "catalogued.mkv");
}

// ── Click handling ────────────────────────────────────────────────────────────

/// Tapping a walked row yields its path; indexed rows yield a content URI;
/// out-of-range taps yield nothing.
#[test]
fn click_maps_to_play_target() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("only.mkv"));
    let mut state = walk_state(tmp.path());
    state.refresh();
    state.wait_for_scan();

    match state.on_item_clicked(0) {
        Some(PlayTarget::File(path)) => assert!(path.ends_with("only.mkv")),
        other => panic!("expected a file target, got {other:?}"),
    }
    assert!(state.on_item_clicked(1).is_none());

    let index = Arc::new(MemoryMediaIndex::with_records(vec![MediaRecord::video(
        77, "x.mp4", 5_000, 1,
    )]));
    let mut indexed = AppState::new(
        Scanner::new(ScanConfig::with_root(PathBuf::from("."))).with_index(index),
        FixedPermission(true),
    );
    indexed.refresh();
    assert_eq!(
        indexed.on_item_clicked(0),
        Some(PlayTarget::ContentUri(
            "content://media/external/video/media/77".into()
        ))
    );
}
