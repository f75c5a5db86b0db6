// src/log.rs
//! Log sinks for the frontends.
//!
//! Library code only emits `tracing` events. The binary decides where they go:
//! stderr for one-shot commands, or `.store/debug.log` with elapsed-time stamps
//! while `watch` owns the terminal.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::Uptime;

use crate::config::consts::{LOG_FILE, STORE_DIR};

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn log_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(LOG_FILE)
}

/// Send events to stderr. Safe to call more than once; later calls are ignored.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Append events to the debug log file, creating `.store/` if needed.
pub fn init_file() -> io::Result<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_timer(Uptime::default())
        .with_ansi(false)
        .try_init();

    Ok(path)
}
