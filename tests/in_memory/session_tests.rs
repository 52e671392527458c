//! In-memory integration tests for todo sessions across page views.

use super::helpers::{open_session, store, texts};
use rstest::rstest;
use toist::todo::{
    adapters::memory::InMemoryKeyValueStore,
    domain::TodoId,
    services::{STORAGE_KEY, TodoNotice},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn changes_survive_into_the_next_session(
    store: InMemoryKeyValueStore,
) -> Result<(), eyre::Report> {
    let mut first = open_session(&store).await?;
    first.add("Buy milk").await?;
    first.add("Call mum").await?;
    first.toggle(&TodoId::new("todo-1")).await?;

    let second = open_session(&store).await?;

    assert_eq!(second.list(), first.list());
    assert_eq!(second.completed_count(), 1);
    assert_eq!(second.notice(), None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopened_session_appends_with_unused_identifiers(
    store: InMemoryKeyValueStore,
) -> Result<(), eyre::Report> {
    let mut first = open_session(&store).await?;
    first.add("one").await?;
    first.add("two").await?;

    let mut second = open_session(&store).await?;
    second.add("three").await?;

    assert_eq!(texts(&second), vec!["one", "two", "three"]);
    assert!(second.list().contains(&TodoId::new("todo-3")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_input_leaves_storage_untouched(
    store: InMemoryKeyValueStore,
) -> Result<(), eyre::Report> {
    let mut session = open_session(&store).await?;
    session.add("Buy milk").await?;
    let before = store.peek(STORAGE_KEY);

    let result = session.add("\n\t ").await;

    assert_eq!(result, Err(TodoNotice::EmptyInput));
    assert_eq!(store.peek(STORAGE_KEY), before);
    assert_eq!(store.write_count(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn quota_failure_keeps_session_usable() -> Result<(), eyre::Report> {
    let store = InMemoryKeyValueStore::with_quota(150);
    let mut session = open_session(&store).await?;

    session.add("short").await?;
    assert_eq!(session.notice(), None);

    session.add(&"long entry ".repeat(20)).await?;
    assert_eq!(session.notice(), Some(&TodoNotice::SaveFailed));
    assert_eq!(session.list().len(), 2);

    session.delete(&TodoId::new("todo-2")).await?;
    assert_eq!(session.notice(), None);

    let reopened = open_session(&store).await?;
    assert_eq!(texts(&reopened), vec!["short"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reopened_session_with_many_stored_todos_still_adds(
    store: InMemoryKeyValueStore,
) -> Result<(), eyre::Report> {
    let mut first = open_session(&store).await?;
    for n in 1..=10 {
        first.add(&format!("task {n}")).await?;
    }

    let mut second = open_session(&store).await?;
    second.add("one more").await?;

    assert_eq!(second.list().len(), 11);
    assert!(second.list().contains(&TodoId::new("todo-11")));
    assert_eq!(second.notice(), None);
    Ok(())
}
