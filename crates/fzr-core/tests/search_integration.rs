use std::fs;

use fzr_core::{CandidateStore, Limits, ScoreScratch, WalkMode, collect_names};

fn project_fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for sub in ["src", "src/engine", "docs", "tests"] {
        fs::create_dir_all(dir.path().join(sub)).unwrap();
    }
    for file in [
        "Cargo.toml",
        "src/main.rs",
        "src/lib.rs",
        "src/engine/score.rs",
        "src/engine/store.rs",
        "docs/design.md",
        "tests/integration.rs",
    ] {
        fs::write(dir.path().join(file), "").unwrap();
    }
    dir
}

#[test]
fn walk_load_and_type_a_query_character_by_character() {
    let dir = project_fixture();
    let names = collect_names(dir.path(), WalkMode::Files).unwrap();

    let mut store = CandidateStore::new(Limits::default()).unwrap();
    store.load(&names).unwrap();

    // empty query: everything listed, scores strictly descending in
    // discovery order
    assert_eq!(store.shortlist_len(), names.len());
    let initial: Vec<_> = store.shortlist().map(|e| (e.name.to_string(), e.score)).collect();
    for pair in initial.windows(2) {
        assert!(pair[0].1 > pair[1].1);
    }
    assert_eq!(
        initial.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>(),
        names.iter().map(String::as_str).collect::<Vec<_>>()
    );

    // grow the query as a user would; the shortlist may only shrink while
    // the query strictly extends
    let mut previous_len = store.shortlist_len();
    for len in 1..="score".len() {
        store.rerank(&"score"[..len]).unwrap();
        assert!(store.shortlist_len() <= previous_len);
        previous_len = store.shortlist_len();
    }
    // "score" is also a windowed subsequence of store.rs (the 'c' comes from
    // "src/"), but the contiguous streak in score.rs must rank first
    let names_now: Vec<_> = store.shortlist().map(|e| e.name.to_string()).collect();
    assert_eq!(names_now, ["src/engine/score.rs", "src/engine/store.rs"]);

    // backspace back down to a broader query
    store.rerank("s").unwrap();
    assert!(store.shortlist_len() > 2);
}

#[test]
fn highlight_pass_is_independent_of_ranking() {
    let dir = project_fixture();
    let names = collect_names(dir.path(), WalkMode::Files).unwrap();

    let mut store = CandidateStore::new(Limits::default()).unwrap();
    store.load(&names).unwrap();
    store.rerank("engs").unwrap();

    // the front-end re-aligns each visible row with its own scratch, purely
    // for rendering; scores must agree with what rerank computed
    let mut highlight = ScoreScratch::new(store.limits()).unwrap();
    for entry in store.shortlist() {
        let (score, positions) = highlight
            .match_positions("engs", entry.name)
            .unwrap()
            .expect("shortlisted candidates must still align");
        assert_eq!(score, entry.score);
        assert_eq!(positions.len(), entry.name.len());
        assert_eq!(positions.iter().filter(|&&p| p).count(), "engs".len());
    }
}

#[test]
fn directory_mode_searches_directory_names() {
    let dir = project_fixture();
    let names = collect_names(dir.path(), WalkMode::Directories).unwrap();

    let mut store = CandidateStore::new(Limits::default()).unwrap();
    store.load(&names).unwrap();
    store.rerank("eng").unwrap();

    let names_now: Vec<_> = store.shortlist().map(|e| e.name.to_string()).collect();
    assert_eq!(names_now, ["src/engine"]);
}
