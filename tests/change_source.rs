// tests/change_source.rs

use retrans_test_utils::builders::{WatchSessionBuilder, source_file};
use retrans_test_utils::fake_invoker::FakeInvoker;
use retrans_test_utils::init_tracing;
use retrans_test_utils::reporter::channel_reporter;

use std::error::Error;
use std::fs;

use tokio::sync::mpsc;
use tokio::time::{Duration, sleep, timeout};

use retrans::engine::{CoreRuntime, Runtime, RuntimeEvent};
use retrans::status::Status;
use retrans::watch::{ChangeSource, spawn_watcher};

type TestResult = Result<(), Box<dyn Error>>;

/// Give the OS watch a moment to be registered before touching files.
const SETTLE: Duration = Duration::from_millis(100);

#[tokio::test]
async fn writing_the_file_produces_a_notification() -> TestResult {
    init_tracing();

    let file = source_file();
    let mut source = ChangeSource::open(file.path())?;
    sleep(SETTLE).await;

    fs::write(file.path(), b"{\"locale\":{\"source\":\"de\"}}")?;

    let notification = timeout(Duration::from_secs(5), source.next())
        .await
        .map_err(|_| "no notification within 5 seconds")?;
    assert!(notification.is_some());

    source.close();
    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn sibling_files_are_ignored() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let target = dir.path().join("i18n.json");
    let sibling = dir.path().join("i18n.lock");
    fs::write(&target, b"{}")?;
    fs::write(&sibling, b"")?;

    let mut source = ChangeSource::open(&target)?;
    sleep(SETTLE).await;

    fs::write(&sibling, b"locked")?;
    assert!(
        timeout(Duration::from_millis(500), source.next())
            .await
            .is_err(),
        "a sibling write must not notify"
    );

    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn saving_by_rename_over_the_file_produces_a_notification() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let target = dir.path().join("i18n.json");
    let swap = dir.path().join(".i18n.json.swp");
    fs::write(&target, b"{}")?;

    let mut source = ChangeSource::open(&target)?;
    sleep(SETTLE).await;

    fs::write(&swap, b"{\"locale\":{\"source\":\"de\"}}")?;
    fs::rename(&swap, &target)?;

    let notification = timeout(Duration::from_secs(5), source.next())
        .await
        .map_err(|_| "atomic save of the watched file produced no notification")?;
    assert!(notification.is_some());

    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn renaming_the_file_away_is_not_a_change() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let target = dir.path().join("i18n.json");
    fs::write(&target, b"{}")?;

    let mut source = ChangeSource::open(&target)?;
    sleep(SETTLE).await;

    fs::rename(&target, dir.path().join("i18n.json.bak"))?;
    assert!(
        timeout(Duration::from_millis(500), source.next())
            .await
            .is_err(),
        "moving the file away must not notify"
    );

    Ok(())
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn rapid_saves_end_to_end_run_once() -> TestResult {
    init_tracing();

    let file = source_file();
    let session = WatchSessionBuilder::new(file.path())
        .bucket("web")
        .quiet_period_ms(300)
        .build();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    let source = ChangeSource::open(session.path())?;
    let watcher = spawn_watcher(source, tx.clone());

    let invoker = FakeInvoker::new();
    let (reporter, mut statuses) = channel_reporter();
    let runtime = Runtime::new(CoreRuntime::new(session), rx, invoker.clone(), reporter);
    let handle = tokio::spawn(runtime.run());

    sleep(SETTLE).await;
    for i in 0..3 {
        fs::write(file.path(), format!("{{\"rev\":{i}}}"))?;
        sleep(Duration::from_millis(20)).await;
    }

    // Wait well past the quiet period.
    sleep(Duration::from_millis(1500)).await;

    tx.send(RuntimeEvent::ShutdownRequested).await?;
    let finished = timeout(Duration::from_secs(5), handle).await?;
    finished??;
    drop(watcher);

    let mut seen = Vec::new();
    while let Ok((_, status)) = statuses.try_recv() {
        seen.push(status);
    }

    assert!(matches!(seen.first(), Some(Status::Watching(_))));
    assert_eq!(
        seen.iter().filter(|s| **s == Status::ChangeDetected).count(),
        1,
        "statuses: {seen:?}"
    );
    assert_eq!(invoker.calls().len(), 1);
    assert_eq!(invoker.calls()[0].bucket.as_deref(), Some("web"));

    Ok(())
}
