use std::io::{self, Write};
use std::sync::RwLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

static ACTIVE: RwLock<Option<ProgressBar>> = RwLock::new(None);

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// A running spinner. Log output is printed above it until it is dropped.
pub struct Spinner {
    pb: ProgressBar,
}

impl Spinner {
    pub fn set_message(&self, msg: impl Into<String>) {
        self.pb.set_message(msg.into());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.pb.finish_and_clear();
        if let Ok(mut active) = ACTIVE.write() {
            *active = None;
        }
    }
}

pub fn start(msg: &str) -> Spinner {
    let style = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS);

    let pb = ProgressBar::new_spinner();
    pb.set_style(style);
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut active) = ACTIVE.write() {
        *active = Some(pb.clone());
    }
    Spinner { pb }
}

/// Log writer that prints through the active spinner, or to stdout when none is shown.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let active = ACTIVE.read().ok().and_then(|guard| guard.clone());
        match active {
            Some(pb) => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
                Ok(buf.len())
            }
            None => io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()
    }
}
