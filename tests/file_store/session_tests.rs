//! Todo sessions persisted through the file-backed store.

use super::helpers::{TempStore, temp_store};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use toist::todo::{
    adapters::fs::FileKeyValueStore,
    domain::{TimestampIdGenerator, TodoIdGenerator},
    ports::KeyValueStore,
    services::{STORAGE_KEY, TodoConfig, TodoController, TodoNotice, TodoPersistence},
};

type FileController = TodoController<FileKeyValueStore, DefaultClock, TimestampIdGenerator>;

async fn open_session(store: FileKeyValueStore) -> Result<FileController, eyre::Report> {
    let config = TodoConfig::default();
    let mut controller = TodoController::new(
        Arc::new(DefaultClock),
        Arc::new(TimestampIdGenerator),
        config.clone(),
    );
    controller
        .attach(TodoPersistence::new(Arc::new(store), &config))
        .await
        .map_err(|notice| eyre::eyre!("attach failed: {notice}"))?;
    Ok(controller)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn todos_round_trip_through_the_file_store(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    let mut first = open_session(fixture.store.clone()).await?;
    first.add("Buy milk").await?;
    first.add("Call mum").await?;
    let milk = first
        .list()
        .iter()
        .next()
        .map(|todo| todo.id().clone())
        .ok_or_else(|| eyre::eyre!("expected a todo"))?;
    first.toggle(&milk).await?;

    let second = open_session(fixture.reopen()?).await?;

    assert_eq!(second.list(), first.list());
    assert_eq!(fixture.file_names()?, vec![format!("{STORAGE_KEY}.json")]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn corrupted_file_starts_fresh_and_is_replaced_on_first_change(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    fixture.store.set(STORAGE_KEY, "[{\"id\":").await?;

    let mut session = open_session(fixture.reopen()?).await?;
    assert!(session.list().is_empty());
    assert_eq!(session.notice(), Some(&TodoNotice::LoadFailed));
    assert_eq!(
        fixture.store.get(STORAGE_KEY).await?.as_deref(),
        Some("[{\"id\":")
    );

    session.add("Buy milk").await?;

    let reopened = open_session(fixture.reopen()?).await?;
    assert_eq!(reopened.list().len(), 1);
    assert_eq!(reopened.notice(), None);
    Ok(())
}

#[rstest]
fn timestamp_identifiers_are_unique_within_one_instant() {
    let ids = TimestampIdGenerator;
    let now = chrono::Utc::now();
    let generated: std::collections::HashSet<_> = (0..100).map(|_| ids.next_id(now)).collect();
    assert_eq!(generated.len(), 100);
}
