//! Size-rotated log file used as the tracing sink when `--log-dir` is given.
//!
//! Messages go to `<dir>/<name>.log`. With rotation on, a write that finds
//! the file at or above the size limit first moves it to `<name>.old.log`
//! (replacing any previous one) and starts a fresh file. If the file cannot
//! be opened the message is dropped; logging never fails the caller.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing_subscriber::fmt::MakeWriter;

pub const DEFAULT_MAX_SIZE_MB: f64 = 2.0;

/// Where and how a [`FileLogDestination`] writes.
#[derive(Debug, Clone)]
pub struct FileLogOptions {
    pub directory: PathBuf,
    pub max_size_mb: f64,
    pub rotate: bool,
}

impl FileLogOptions {
    /// Options with the default size limit and rotation enabled.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            rotate: true,
        }
    }

    fn max_size_bytes(&self) -> u64 {
        (self.max_size_mb * 1024.0 * 1024.0) as u64
    }
}

#[derive(Debug)]
pub struct FileLogDestination {
    options: FileLogOptions,
    log_path: PathBuf,
    rotated_path: PathBuf,
    /// Opened on first write; `None` until then or after a failed open.
    file: Mutex<Option<File>>,
}

impl FileLogDestination {
    /// Creates the destination for `<name>.log`. The directory is created
    /// here if possible; failure is retried implicitly on each write.
    pub fn new(name: &str, options: FileLogOptions) -> Self {
        let _ = fs::create_dir_all(&options.directory);
        Self {
            log_path: options.directory.join(format!("{name}.log")),
            rotated_path: options.directory.join(format!("{name}.old.log")),
            options,
            file: Mutex::new(None),
        }
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    #[cfg(test)]
    pub fn rotated_path(&self) -> &Path {
        &self.rotated_path
    }

    /// Appends one message, rotating first if the file is over the limit.
    pub fn write_log(&self, message: &[u8]) {
        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_none() {
            *guard = self.open();
        }
        self.rotate_if_needed(&mut guard);
        if let Some(file) = guard.as_mut() {
            let _ = file.write_all(message);
        }
    }

    pub fn flush(&self) {
        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(file) = guard.as_mut() {
            let _ = file.flush();
        }
    }

    fn open(&self) -> Option<File> {
        let _ = fs::create_dir_all(&self.options.directory);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .ok()
    }

    fn rotate_if_needed(&self, file: &mut Option<File>) {
        if !self.options.rotate {
            return;
        }
        let Some(current) = file.as_ref() else {
            return;
        };
        let size = current.metadata().map(|m| m.len()).unwrap_or(0);
        if size < self.options.max_size_bytes() {
            return;
        }

        match fs::remove_file(&self.rotated_path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            // Keep appending to the oversized file rather than lose messages.
            Err(_) => return,
        }
        *file = None;
        let _ = fs::rename(&self.log_path, &self.rotated_path);
        *file = self.open();
    }
}

/// Handle returned to `tracing_subscriber` for a single event.
pub struct FileLogWriter<'a> {
    destination: &'a FileLogDestination,
}

impl Write for FileLogWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.destination.write_log(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.destination.flush();
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileLogDestination {
    type Writer = FileLogWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        FileLogWriter { destination: self }
    }
}
