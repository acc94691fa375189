//! Property and backend-parity tests for the snippet repository.
//!
//! Every property runs against both backends so InMemoryStore and SqliteStore
//! stay interchangeable.

use std::sync::Arc;

use proptest::prelude::*;

use playground_sandbox::ExecutionResult;
use playground_storage::{
    InMemoryStore, ObjectStore, Snippet, SnippetError, SnippetRepository, SqliteStore,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..64)
}

fn execution_result() -> impl Strategy<Value = ExecutionResult> {
    prop_oneof![
        bytes().prop_map(|compiler_output| ExecutionResult::CompileFailed { compiler_output }),
        (any::<i32>(), bytes(), bytes()).prop_map(|(exit_code, compiler_output, program_output)| {
            ExecutionResult::Completed {
                exit_code,
                compiler_output,
                program_output,
            }
        }),
    ]
}

fn snippet() -> impl Strategy<Value = Snippet> {
    (".{0,200}", proptest::option::of(execution_result()))
        .prop_map(|(code, result)| Snippet { code, result })
}

fn backends() -> Vec<(&'static str, SnippetRepository)> {
    vec![
        ("memory", SnippetRepository::new(Arc::new(InMemoryStore::new()))),
        (
            "sqlite",
            SnippetRepository::new(Arc::new(SqliteStore::in_memory().unwrap())),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn get_after_put_returns_identical_snippet(snippet in snippet()) {
        for (name, repo) in backends() {
            let id = repo.put(&snippet).unwrap();
            prop_assert_eq!(&repo.get(id.as_str()).unwrap(), &snippet, "backend {}", name);
            prop_assert_eq!(
                repo.get_raw(id.as_str()).unwrap(),
                snippet.to_canonical_bytes().unwrap(),
                "backend {}", name
            );
        }
    }

    #[test]
    fn put_is_idempotent(snippet in snippet()) {
        for (name, repo) in backends() {
            let first = repo.put(&snippet).unwrap();
            let second = repo.put(&snippet).unwrap();
            prop_assert_eq!(&first, &second, "backend {}", name);
        }
    }

    #[test]
    fn backends_agree_on_ids(snippet in snippet()) {
        let ids: Vec<_> = backends()
            .into_iter()
            .map(|(_, repo)| repo.put(&snippet).unwrap())
            .collect();
        prop_assert_eq!(&ids[0], &ids[1]);
    }

    #[test]
    fn distinct_code_gets_distinct_ids(a in ".{0,40}", b in ".{0,40}") {
        prop_assume!(a != b);
        let repo = SnippetRepository::new(Arc::new(InMemoryStore::new()));
        let id_a = repo.put(&Snippet::new(a)).unwrap();
        let id_b = repo.put(&Snippet::new(b)).unwrap();
        prop_assert_ne!(id_a, id_b);
    }
}

// ---------------------------------------------------------------------------
// Concurrency and limits
// ---------------------------------------------------------------------------

#[test]
fn concurrent_puts_of_same_content_converge() {
    let store = Arc::new(SqliteStore::in_memory().unwrap());
    let repo = SnippetRepository::new(store.clone());
    let snippet = Snippet::new("fn main() { println!(\"shared\"); }");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let repo = repo.clone();
            let snippet = snippet.clone();
            std::thread::spawn(move || repo.put(&snippet).unwrap())
        })
        .collect();
    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(ids.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(
        store.get_object(&ids[0].storage_key()).unwrap(),
        Some(snippet.to_canonical_bytes().unwrap())
    );
}

#[test]
fn oversized_snippet_never_reaches_the_store() {
    let store = Arc::new(InMemoryStore::new());
    let repo = SnippetRepository::new(store.clone());

    let err = repo.put(&Snippet::new("a".repeat(512 * 1024))).unwrap_err();

    assert!(matches!(err, SnippetError::TooLarge { .. }), "{err:?}");
    assert!(store.is_empty());
}

#[test]
fn persisted_snippets_outlive_the_repository() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snippets.db");
    let path = path.to_str().unwrap();
    let snippet = Snippet::new("fn main() {}").with_result(ExecutionResult::CompileFailed {
        compiler_output: b"error".to_vec(),
    });

    let id = {
        let repo = SnippetRepository::new(Arc::new(SqliteStore::new(path).unwrap()));
        repo.put(&snippet).unwrap()
    };

    let repo = SnippetRepository::new(Arc::new(SqliteStore::new(path).unwrap()));
    assert_eq!(repo.get(id.as_str()).unwrap(), snippet);
}
