// src/watch/watcher.rs

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use notify::event::{ModifyKind, RenameMode};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::engine::RuntimeEvent;
use crate::errors::{Result, RetransError};
use crate::types::ChangeNotification;

/// Stream of modifications to a single file.
///
/// The OS watch is placed on the file's parent directory (non-recursive) and
/// filtered down to the file itself, so it keeps working when an editor saves
/// by renaming a temp file over it. Dropping the source releases the OS watch.
pub struct ChangeSource {
    path: PathBuf,
    rx: mpsc::UnboundedReceiver<ChangeNotification>,
    _watcher: RecommendedWatcher,
}

impl std::fmt::Debug for ChangeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeSource")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl ChangeSource {
    /// Start watching `path`.
    ///
    /// Fails like [`check_source`] if the file is missing or unreadable and
    /// with [`RetransError::Watch`] if the OS refuses the watch.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = check_source(path.as_ref())?;

        let (dir, file_name) = match (path.parent(), path.file_name()) {
            (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_os_string()),
            _ => {
                return Err(RetransError::ConfigError(format!(
                    "{} does not name a file",
                    path.display()
                )));
            }
        };

        let (tx, rx) = mpsc::unbounded_channel::<ChangeNotification>();

        // Called synchronously on notify's own thread.
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_content_change(&event.kind) && concerns_file(&event, &file_name) {
                        // Receiver gone means the source was dropped.
                        let _ = tx.send(ChangeNotification::now());
                    }
                }
                Err(err) => {
                    warn!(error = %err, "file watch error");
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        info!(path = %path.display(), "file watcher started");

        Ok(Self {
            path,
            rx,
            _watcher: watcher,
        })
    }

    /// Wait for the next modification.
    ///
    /// Only returns `None` if the underlying watcher has gone away.
    pub async fn next(&mut self) -> Option<ChangeNotification> {
        self.rx.recv().await
    }

    /// Stop watching and release the OS handle.
    pub fn close(self) {
        debug!(path = %self.path.display(), "closing file watcher");
    }
}

/// Whether `kind` says the file's contents changed.
///
/// Besides data writes this includes a file appearing under the name, either
/// created or renamed onto it, which is how atomic saves land. Removal,
/// metadata and access events don't count.
pub fn is_content_change(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Modify(
                ModifyKind::Data(_)
                    | ModifyKind::Any
                    | ModifyKind::Other
                    | ModifyKind::Name(RenameMode::To | RenameMode::Both)
            )
    )
}

fn concerns_file(event: &Event, file_name: &OsString) -> bool {
    let is_ours = |p: &PathBuf| p.file_name() == Some(file_name.as_os_str());
    match event.kind {
        // Paths are `[from, to]`; only a rename onto the file matters.
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
            event.paths.last().is_some_and(is_ours)
        }
        _ => event.paths.iter().any(is_ours),
    }
}

/// Make `path` absolute and lexically normalized, then require it to be a
/// readable regular file.
pub fn check_source(path: &Path) -> Result<PathBuf> {
    let path = normalize(&std::path::absolute(path)?);

    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(RetransError::SourceNotFound(path));
        }
        Err(source) => return Err(RetransError::SourceUnreadable { path, source }),
    };
    if !metadata.is_file() {
        return Err(RetransError::SourceNotAFile(path));
    }
    if let Err(source) = fs::File::open(&path) {
        return Err(RetransError::SourceUnreadable { path, source });
    }

    Ok(path)
}

/// Drop `.` and fold `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Handle for the forwarding task started by [`spawn_watcher`].
///
/// Dropping this handle stops forwarding and releases the watch.
pub struct WatcherHandle {
    task: JoinHandle<()>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle").finish()
    }
}

impl Drop for WatcherHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Forward every notification from `source` into the runtime as
/// [`RuntimeEvent::FileChanged`].
pub fn spawn_watcher(
    mut source: ChangeSource,
    runtime_tx: mpsc::Sender<RuntimeEvent>,
) -> WatcherHandle {
    let task = tokio::spawn(async move {
        while let Some(notification) = source.next().await {
            debug!(?notification, "file changed");
            if runtime_tx
                .send(RuntimeEvent::FileChanged(notification))
                .await
                .is_err()
            {
                debug!("runtime channel closed; stopping watcher");
                break;
            }
        }
        source.close();
    });

    WatcherHandle { task }
}
