use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Hasher stand-in that returns a fixed fingerprint and records its inputs.
struct StubHasher {
    hash: String,
    verified: bool,
    inputs: Mutex<Vec<String>>,
}

impl StubHasher {
    fn new(hash: &str, verified: bool) -> Arc<Self> {
        Arc::new(Self {
            hash: hash.to_string(),
            verified,
            inputs: Mutex::new(Vec::new()),
        })
    }

    fn inputs(&self) -> Vec<String> {
        self.inputs.lock().unwrap().clone()
    }
}

impl Hasher for StubHasher {
    fn generate_hash(&self, input: &str) -> String {
        self.inputs.lock().unwrap().push(input.to_string());
        self.hash.clone()
    }

    fn verify(&self, _hash: &str) -> bool {
        self.verified
    }

    fn mark(&self) -> &'static str {
        "STUBalg_"
    }
}

fn name(s: &str) -> ScriptName {
    ScriptName::new(s)
}

// ── Fingerprint ────────────────────────────────────────────────────────

#[test]
fn test_returns_hash_from_name_and_content() {
    let hasher = StubHasher::new("ahffa52162121ASAS", true);
    let script = SqlScript::with_hasher(
        name("00001_Script1"),
        "SELECT 1 FROM db.test",
        hasher.clone(),
    );

    assert_eq!(script.hash(), "ahffa52162121ASAS");
    assert_eq!(hasher.inputs(), vec!["00001_Script1SELECT 1 FROM db.test"]);
}

#[test]
fn test_hash_is_computed_once() {
    let hasher = StubHasher::new("h", true);
    let script = SqlScript::with_hasher(name("0001_a.sql"), "SELECT 1", hasher.clone());

    let _ = script.hash();
    let _ = script.hash();
    assert_eq!(hasher.inputs().len(), 1);
}

#[test]
fn test_default_hasher_fingerprint() {
    let script = SqlScript::new("0001_Script", "Select 1 FROM dbo.test");
    assert_eq!(script.hash(), "MD5alg_0u4dkHFSZD4Qv62JubzTIQ==");
}

#[test]
fn test_name_content_split_is_not_distinguished() {
    let a = SqlScript::new("0001_ab", "c");
    let b = SqlScript::new("0001_a", "bc");
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn test_try_new_rejects_empty_name() {
    let err = SqlScript::try_new("", "SELECT 1").unwrap_err();
    assert!(matches!(err, CoreError::InvalidScriptName { .. }));
}

// ── Lazy contents ──────────────────────────────────────────────────────

#[test]
fn test_lazy_returns_hash_from_name() {
    let hasher = StubHasher::new("ahffa52162121ASAS", true);
    let script = SqlScript::lazy(name("00001_Script1"), String::new, hasher.clone());

    assert_eq!(script.hash(), "ahffa52162121ASAS");
    assert_eq!(hasher.inputs(), vec!["00001_Script1"]);
}

#[test]
fn test_lazy_loader_runs_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let script = SqlScript::lazy(
        name("0003_orders.sql"),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "CREATE TABLE orders (id INT)".to_string()
        },
        Arc::new(Md5WithMarkHasher),
    );

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let _ = script.hash();
    assert_eq!(script.contents(), "CREATE TABLE orders (id INT)");
    let _ = script.contents();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lazy_and_eager_scripts_share_fingerprint() {
    let eager = SqlScript::new("0004_idx.sql", "CREATE INDEX i ON t (c)");
    let lazy = SqlScript::lazy(
        name("0004_idx.sql"),
        || "CREATE INDEX i ON t (c)".to_string(),
        Arc::new(Md5WithMarkHasher),
    );
    assert_eq!(eager.hash(), lazy.hash());
}

#[test]
fn test_lazy_skips_loading_for_legacy_record() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let script = SqlScript::lazy(
        name("0001_init.sql"),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            "SELECT 1".to_string()
        },
        Arc::new(Md5WithMarkHasher),
    );

    let outcome = script
        .match_to(Some(&ExecutedScript::legacy("0001_init.sql")))
        .unwrap();
    assert_eq!(outcome, MatchOutcome::Matched);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// ── Reading from files and streams ─────────────────────────────────────

#[test]
fn test_from_file_uses_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("0005_seed.sql");
    std::fs::write(&path, "\u{feff}INSERT INTO t VALUES (1)").unwrap();

    let script = SqlScript::from_file(&path, Arc::new(Md5WithMarkHasher)).unwrap();
    assert_eq!(script.name(), "0005_seed.sql");
    assert_eq!(script.contents(), "INSERT INTO t VALUES (1)");
}

#[test]
fn test_from_file_missing_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.sql");
    let err = SqlScript::from_file(&path, Arc::new(Md5WithMarkHasher)).unwrap_err();
    match err {
        CoreError::ScriptIo { path: p, .. } => assert!(p.ends_with("missing.sql")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_from_reader() {
    let reader = std::io::Cursor::new("SELECT 42");
    let script =
        SqlScript::from_reader(name("0006_q.sql"), reader, Arc::new(Md5WithMarkHasher)).unwrap();
    assert_eq!(script.contents(), "SELECT 42");
}

// ── Match rule ─────────────────────────────────────────────────────────

#[test]
fn test_match_to_returns_not_applied_without_record() {
    let script = SqlScript::new("00001_Script1", "SELECT 1 FROM dbo.test");
    assert_eq!(script.match_to(None).unwrap(), MatchOutcome::NotApplied);
}

#[test]
fn test_match_to_returns_not_applied_if_executed_script_has_different_name() {
    let hasher = StubHasher::new("24343jjj324234", true);
    let script = SqlScript::with_hasher(name("00001_Script1"), "SELECT 1 FROM dbo.test", hasher);
    let executed = ExecutedScript::new("00001_Script2", Some("24343jjj324234".to_string()));

    assert_eq!(
        script.match_to(Some(&executed)).unwrap(),
        MatchOutcome::NotApplied
    );
}

#[test]
fn test_match_to_matches_same_name_with_absent_or_empty_hash() {
    // A hasher that rejects everything proves verify is never consulted.
    let hasher = StubHasher::new("unused", false);
    let script = SqlScript::with_hasher(name("00001_Script1"), "SELECT 1 FROM dbo.test", hasher);

    for stored in [None, Some(String::new())] {
        let executed = ExecutedScript::new("00001_Script1", stored);
        assert_eq!(
            script.match_to(Some(&executed)).unwrap(),
            MatchOutcome::Matched
        );
    }
}

#[test]
fn test_match_to_errors_if_hash_is_not_verified_by_hasher() {
    let hasher = StubHasher::new("24343jjj324234", false);
    let script = SqlScript::with_hasher(name("00001_Script1"), "SELECT 1 FROM dbo.test", hasher);
    let executed = ExecutedScript::new("00001_Script1", Some("24343jjj324234".to_string()));

    let err = script.match_to(Some(&executed)).unwrap_err();
    match err {
        CoreError::UntrustedJournal {
            script,
            stored_hash,
            mark,
        } => {
            assert_eq!(script, "00001_Script1");
            assert_eq!(stored_hash, "24343jjj324234");
            assert_eq!(mark, "STUBalg_");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_match_to_matches_same_name_and_same_hash() {
    let hasher = StubHasher::new("24343jjj324234", true);
    let script = SqlScript::with_hasher(name("00001_Script1"), "SELECT 1 FROM dbo.test", hasher);
    let executed = ExecutedScript::new("00001_Script1", Some("24343jjj324234".to_string()));

    assert_eq!(
        script.match_to(Some(&executed)).unwrap(),
        MatchOutcome::Matched
    );
}

#[test]
fn test_match_to_reports_change_for_same_name_and_different_hash() {
    let hasher = StubHasher::new("1343dlfjdf3434", true);
    let script = SqlScript::with_hasher(name("00001_Script1"), "SELECT 1 FROM dbo.test", hasher);
    let executed = ExecutedScript::new("00001_Script1", Some("24343jjj324234".to_string()));

    let outcome = script.match_to(Some(&executed)).unwrap();
    assert!(outcome.is_changed());
    assert!(outcome.must_run());
    assert_eq!(
        outcome,
        MatchOutcome::Changed {
            stored_hash: "24343jjj324234".to_string(),
            current_hash: "1343dlfjdf3434".to_string(),
        }
    );
}

#[test]
fn test_debug_does_not_load_contents() {
    let script = SqlScript::lazy(
        name("0007_big.sql"),
        || panic!("loader must not run"),
        Arc::new(Md5WithMarkHasher),
    );
    let rendered = format!("{script:?}");
    assert!(rendered.contains("0007_big.sql"));
    assert!(rendered.contains("loaded: false"));
}
