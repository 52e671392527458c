//! Contract tests for the file-backed key-value store.

use super::helpers::{TempStore, temp_store};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use rstest::rstest;
use toist::todo::ports::{KeyValueStore, StorageError};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_key_reads_as_none(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    assert_eq!(fixture.store.get("toist-todos").await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn set_overwrites_and_get_reads_back(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    fixture.store.set("toist-todos", "[1]").await?;
    fixture.store.set("toist-todos", "[1,2]").await?;

    assert_eq!(
        fixture.store.get("toist-todos").await?.as_deref(),
        Some("[1,2]")
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn values_live_in_one_json_file_per_key(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    fixture.store.set("toist-todos", "[]").await?;

    let mut names = fixture.file_names()?;
    names.sort();
    assert_eq!(names, vec!["toist-todos.json".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_and_tolerates_missing_keys(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    fixture.store.set("toist-todos", "[]").await?;

    fixture.store.remove("toist-todos").await?;
    fixture.store.remove("toist-todos").await?;

    assert_eq!(fixture.store.get("toist-todos").await?, None);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn keys_cannot_escape_the_store_directory(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    let result = fixture.store.set("../outside", "[]").await;

    assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    assert!(fixture.file_names()?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_rename_leaves_no_temporary_file(
    temp_store: Result<TempStore, eyre::Report>,
) -> Result<(), eyre::Report> {
    let fixture = temp_store?;
    let dir = Dir::open_ambient_dir(&fixture.root, ambient_authority())?;
    dir.create_dir("toist-todos.json")?;
    dir.write("toist-todos.json/occupied", "x")?;

    let result = fixture.store.set("toist-todos", "[]").await;

    assert!(result.is_err());
    assert_eq!(fixture.file_names()?, vec!["toist-todos.json".to_owned()]);
    Ok(())
}
