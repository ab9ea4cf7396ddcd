//! Streamed file lifecycle
//!
//! A previewed file is written to a scratch file that external viewers can
//! open. That file is the "local reference": it must be released (deleted)
//! when the preview is replaced, reset, or dropped, and at most one may exist
//! per manager at any time.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::{Builder, TempPath};

use crate::api::{StreamPayload, DEFAULT_MIME_TYPE};
use crate::logic::file::{base_name, preview_kind, PreviewKind};
use crate::logic::resource::{RequestSequence, Ticket, FALLBACK_ERROR};

/// Scratch file backing one preview
///
/// Dropping it deletes the file; `release` does the same but reports errors.
#[derive(Debug)]
pub struct LocalReference {
    path: Option<TempPath>,
    location: PathBuf,
    live: Arc<AtomicUsize>,
}

impl LocalReference {
    fn create(dir: &Path, name: &str, bytes: &[u8], live: Arc<AtomicUsize>) -> io::Result<Self> {
        fs::create_dir_all(dir)?;

        // Keep the extension so external viewers pick the right handler
        let suffix = match Path::new(name).extension() {
            Some(ext) => format!(".{}", ext.to_string_lossy()),
            None => String::new(),
        };

        let mut file = Builder::new()
            .prefix("cloudtui-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(bytes)?;
        file.flush()?;

        let path = file.into_temp_path();
        let location = path.to_path_buf();
        live.fetch_add(1, Ordering::SeqCst);

        Ok(Self {
            path: Some(path),
            location,
            live,
        })
    }

    pub fn path(&self) -> &Path {
        &self.location
    }

    /// Delete the scratch file now
    pub fn release(mut self) -> io::Result<()> {
        match self.path.take() {
            Some(path) => {
                self.live.fetch_sub(1, Ordering::SeqCst);
                path.close()
            }
            None => Ok(()),
        }
    }
}

impl Drop for LocalReference {
    fn drop(&mut self) {
        if self.path.take().is_some() {
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// The file currently shown in the preview pane
#[derive(Debug)]
pub struct StreamedFile {
    pub content: Vec<u8>,
    pub reference: LocalReference,
    pub mime_type: String,
    pub name: String,
}

impl StreamedFile {
    pub fn preview_kind(&self) -> PreviewKind {
        preview_kind(&self.mime_type)
    }
}

/// What `StreamManager::complete` did with a result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    Ready,
    Failed(String),
    Stale,
}

/// Owns the single streamed file and its local reference
#[derive(Debug)]
pub struct StreamManager {
    scratch_dir: PathBuf,
    current: Option<StreamedFile>,
    pending: Option<String>,
    loading: bool,
    error: Option<String>,
    sequence: RequestSequence,
    live: Arc<AtomicUsize>,
}

impl StreamManager {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
            current: None,
            pending: None,
            loading: false,
            error: None,
            sequence: RequestSequence::new(),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn current(&self) -> Option<&StreamedFile> {
        self.current.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Name of the file being fetched, while a stream is in flight
    pub fn pending_name(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    /// True when there is anything to show: a file, a spinner or an error
    pub fn is_active(&self) -> bool {
        self.current.is_some() || self.loading || self.error.is_some()
    }

    /// Number of local references that currently exist
    pub fn live_references(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.sequence.is_current(ticket)
    }

    /// Start streaming `name`; the previous preview is released immediately
    pub fn begin(&mut self, name: &str) -> Ticket {
        self.release_current();
        self.loading = true;
        self.error = None;
        self.pending = Some(name.to_string());
        self.sequence.next()
    }

    /// Apply the result of the stream identified by `ticket`
    pub fn complete(&mut self, ticket: Ticket, result: Result<StreamPayload, String>) -> StreamOutcome {
        if !self.sequence.is_current(ticket) {
            tracing::debug!(ticket = ticket.id(), "dropping stale stream result");
            return StreamOutcome::Stale;
        }

        self.loading = false;
        let name = self.pending.take().unwrap_or_default();

        let payload = match result {
            Ok(payload) => payload,
            Err(message) => return self.fail(message),
        };

        // Release before create, so two references never coexist
        self.release_current();

        let reference = match LocalReference::create(
            &self.scratch_dir,
            base_name(&name),
            &payload.bytes,
            Arc::clone(&self.live),
        ) {
            Ok(reference) => reference,
            Err(e) => {
                tracing::warn!(error = %e, dir = %self.scratch_dir.display(), "could not write scratch file");
                return self.fail(format!("Could not store {}: {}", name, e));
            }
        };

        let mime_type = if payload.mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE.to_string()
        } else {
            payload.mime_type
        };

        tracing::debug!(name = %name, mime = %mime_type, path = %reference.path().display(), "stream ready");

        self.current = Some(StreamedFile {
            content: payload.bytes,
            reference,
            mime_type,
            name,
        });
        self.error = None;
        StreamOutcome::Ready
    }

    fn fail(&mut self, message: String) -> StreamOutcome {
        let message = if message.trim().is_empty() {
            FALLBACK_ERROR.to_string()
        } else {
            message
        };
        self.error = Some(message.clone());
        StreamOutcome::Failed(message)
    }

    /// Drop the preview and ignore any stream still in flight
    pub fn reset(&mut self) {
        self.release_current();
        self.loading = false;
        self.error = None;
        self.pending = None;
        self.sequence.invalidate();
    }

    /// Copy the current file into `dir`, returning where it was written
    pub fn save_to(&self, dir: &Path) -> io::Result<Option<PathBuf>> {
        let Some(file) = &self.current else {
            return Ok(None);
        };

        fs::create_dir_all(dir)?;
        let target = dir.join(base_name(&file.name));
        fs::write(&target, &file.content)?;
        Ok(Some(target))
    }

    fn release_current(&mut self) {
        if let Some(file) = self.current.take() {
            let location = file.reference.path().to_path_buf();
            if let Err(e) = file.reference.release() {
                tracing::warn!(error = %e, path = %location.display(), "could not remove scratch file");
            }
        }
    }
}
