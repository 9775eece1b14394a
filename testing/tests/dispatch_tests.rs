//! Request-to-persistence properties, checked against the in-memory store.

#![allow(clippy::expect_used)] // Tests can expect

use proptest::prelude::*;
use sample_todo_core::dispatch::{self, load_items};
use sample_todo_core::store::{Diagnostic, StoreError, TodoStore};
use sample_todo_core::{Outcome, TodoAction, TodoForm, TodoId, TodoItem};
use sample_todo_testing::properties::{arb_integral_id_spelling, arb_non_numeric_id, arb_title};
use sample_todo_testing::InMemoryTodoStore;

fn add_form(title: &str) -> TodoForm {
    TodoForm {
        action: Some("add".to_string()),
        title: Some(title.to_string()),
        id: None,
    }
}

fn toggle_form(id: &str) -> TodoForm {
    TodoForm {
        action: Some("toggle".to_string()),
        title: None,
        id: Some(id.to_string()),
    }
}

/// Acquire a connection, run one decoded form through the dispatcher, release.
async fn submit(store: &InMemoryTodoStore, form: &TodoForm) -> Result<Outcome, StoreError> {
    let mut conn = store.acquire().await?;
    dispatch::run(&mut conn, TodoAction::from_form(form).into_step()).await
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("Failed to build runtime")
}

#[tokio::test]
async fn test_round_trip_add_then_toggle() {
    let store = InMemoryTodoStore::new();

    let outcome = submit(&store, &add_form("Buy milk")).await.expect("add");
    assert_eq!(outcome, Outcome::Redirect);
    assert_eq!(
        store.items(),
        vec![TodoItem::new(TodoId::new(1), "Buy milk".to_string(), false)]
    );

    let outcome = submit(&store, &toggle_form("1")).await.expect("toggle");
    assert_eq!(outcome, Outcome::Redirect);
    assert_eq!(
        store.items(),
        vec![TodoItem::new(TodoId::new(1), "Buy milk".to_string(), true)]
    );
}

#[tokio::test]
async fn test_render_returns_all_rows_in_insertion_order() {
    let store = InMemoryTodoStore::with_titles(["first", "second", "third"]);

    let outcome = submit(&store, &TodoForm::default()).await.expect("render");
    let Outcome::Render(items) = outcome else {
        unreachable!("no action renders");
    };
    let titles: Vec<_> = items.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[tokio::test]
async fn test_render_on_empty_store_is_empty_not_error() {
    let store = InMemoryTodoStore::new();
    let outcome = submit(&store, &TodoForm::default()).await.expect("render");
    assert_eq!(outcome, Outcome::Render(Vec::new()));
}

#[tokio::test]
async fn test_add_without_title_inserts_empty_title() {
    let store = InMemoryTodoStore::new();
    let form = TodoForm {
        action: Some("add".to_string()),
        ..TodoForm::default()
    };

    submit(&store, &form).await.expect("add");
    assert_eq!(store.items()[0].title, "");
}

#[tokio::test]
async fn test_toggle_unknown_id_redirects_without_changes() {
    let store = InMemoryTodoStore::with_titles(["only"]);
    let before = store.items();

    let outcome = submit(&store, &toggle_form("42")).await.expect("toggle");
    assert_eq!(outcome, Outcome::Redirect);
    assert_eq!(store.items(), before);
}

#[tokio::test]
async fn test_failed_insert_is_returned_and_nothing_is_stored() {
    let store = InMemoryTodoStore::new();
    let error = StoreError::Statement(
        Diagnostic::message("duplicate key value violates unique constraint \"todo_pkey\"")
            .with_sqlstate("23505")
            .with_constraint("todo_pkey"),
    );
    store.fail_writes(error.clone());

    let result = submit(&store, &add_form("dup")).await;
    assert_eq!(result, Err(error));
    assert!(store.is_empty());
    assert_eq!(store.open_connections(), 0);
}

#[tokio::test]
async fn test_failed_toggle_is_returned() {
    let store = InMemoryTodoStore::with_titles(["a"]);
    store.fail_writes(StoreError::Connection("server closed the connection".to_string()));

    let result = submit(&store, &toggle_form("1")).await;
    assert!(matches!(result, Err(StoreError::Connection(_))));
    assert!(!store.items()[0].done);
}

#[tokio::test]
async fn test_non_numeric_toggle_skips_the_store_even_when_writes_fail() {
    let store = InMemoryTodoStore::with_titles(["a"]);
    store.fail_writes(StoreError::Connection("down".to_string()));

    let outcome = submit(&store, &toggle_form("abc")).await.expect("no-op");
    assert_eq!(outcome, Outcome::Redirect);
}

#[tokio::test]
async fn test_numeric_spellings_toggle_the_row() {
    let store = InMemoryTodoStore::with_titles(["a"]);

    for raw in ["1.0", "1e0", "01", "+1", " 1"] {
        let before = store.items()[0].done;
        let outcome = submit(&store, &toggle_form(raw)).await.expect("toggle");
        assert_eq!(outcome, Outcome::Redirect);
        assert_ne!(store.items()[0].done, before, "{raw:?} should toggle item 1");
    }
}

#[tokio::test]
async fn test_read_failure_degrades_to_empty_list() {
    let store = InMemoryTodoStore::with_titles(["hidden"]);
    store.fail_reads(StoreError::Statement(Diagnostic::message("permission denied")));

    let mut conn = store.acquire().await.expect("acquire");
    assert!(load_items(&mut conn).await.is_empty());

    let outcome = submit(&store, &TodoForm::default()).await.expect("render never fails");
    assert_eq!(outcome, Outcome::Render(Vec::new()));
}

proptest! {
    #[test]
    fn prop_add_appends_exactly_one_undone_item(
        existing in proptest::collection::vec(arb_title(), 0..5),
        title in arb_title(),
    ) {
        let store = InMemoryTodoStore::with_titles(existing.clone());
        runtime().block_on(submit(&store, &add_form(&title))).expect("add");

        let items = store.items();
        prop_assert_eq!(items.len(), existing.len() + 1);
        let added = &items[existing.len()];
        prop_assert_eq!(&added.title, &title);
        prop_assert!(!added.done);
    }

    #[test]
    fn prop_toggle_twice_restores(
        titles in proptest::collection::vec(arb_title(), 1..6),
        pick in any::<prop::sample::Index>(),
    ) {
        let store = InMemoryTodoStore::with_titles(titles);
        let before = store.items();
        let target = before[pick.index(before.len())].id.to_string();

        let rt = runtime();
        rt.block_on(submit(&store, &toggle_form(&target))).expect("toggle");
        let once = store.items();
        prop_assert_ne!(&once, &before);

        rt.block_on(submit(&store, &toggle_form(&target))).expect("toggle");
        prop_assert_eq!(store.items(), before);
    }

    #[test]
    fn prop_non_numeric_toggle_changes_nothing(
        titles in proptest::collection::vec(arb_title(), 0..5),
        raw in arb_non_numeric_id(),
    ) {
        let store = InMemoryTodoStore::with_titles(titles);
        let before = store.items();

        let outcome = runtime().block_on(submit(&store, &toggle_form(&raw))).expect("no-op");
        prop_assert_eq!(outcome, Outcome::Redirect);
        prop_assert_eq!(store.items(), before);
    }

    #[test]
    fn prop_integral_spelling_toggles_like_plain_id(
        (id, raw) in arb_integral_id_spelling(),
    ) {
        let titles: Vec<String> = (1..=id).map(|n| format!("item {n}")).collect();
        let store = InMemoryTodoStore::with_titles(titles);

        runtime().block_on(submit(&store, &toggle_form(&raw))).expect("toggle");
        let done: Vec<TodoId> = store.items().into_iter().filter(|i| i.done).map(|i| i.id).collect();
        prop_assert_eq!(done, vec![TodoId::new(id)]);
    }
}
