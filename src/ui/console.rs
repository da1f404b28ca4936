use indicatif::{ProgressBar, ProgressStyle};
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

/// Operator-facing output. Everything the command prints goes through here
/// so tests can capture it.
pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
    animate: bool,
}

/// In-memory sink returned by [`Console::capture`].
#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("capture buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Console {
    pub fn stdout() -> Self {
        Self {
            out: Mutex::new(Box::new(io::stdout())),
            animate: true,
        }
    }

    /// A console that records output instead of printing it; spinners are hidden.
    pub fn capture() -> (Self, Captured) {
        let captured = Captured::default();
        let console = Self {
            out: Mutex::new(Box::new(captured.clone())),
            animate: false,
        };
        (console, captured)
    }

    pub fn println(&self, line: impl Display) {
        if let Ok(mut out) = self.out.lock() {
            // Write errors (e.g. a closed pipe) are ignored.
            let _ = writeln!(out, "{line}");
            let _ = out.flush();
        }
    }

    pub fn blank(&self) {
        self.println("");
    }

    /// Start a spinner showing `message`; it runs until [`Spinner::stop`] or drop.
    pub fn spinner(&self, message: impl Into<String>) -> Spinner {
        let bar = if self.animate {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                bar.set_style(style.tick_strings(SPINNER_FRAMES));
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(message.into());
        Spinner { bar }
    }
}

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn stop(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
