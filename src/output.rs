//! Verbose output for the command-line updaters.

use crate::error::Result;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

/// Line writer for `-v` output.
///
/// A reader closing the pipe (`duckdns-update -v ... | head -1`) is not an
/// error: the first `BrokenPipe` silently turns every later line into a
/// no-op. Any other write failure is reported.
pub struct Echo {
    inner: Mutex<EchoState>,
}

struct EchoState {
    out: Box<dyn Write + Send>,
    closed: bool,
}

impl Echo {
    /// Echo to an arbitrary writer.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            inner: Mutex::new(EchoState {
                out: Box::new(out),
                closed: false,
            }),
        }
    }

    /// Echo to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Discard everything.
    pub fn sink() -> Self {
        Self::new(io::sink())
    }

    /// Write one line.
    pub fn line(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let mut state = match self.inner.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        };
        if state.closed {
            return Ok(());
        }

        let written = writeln!(state.out, "{}", args).and_then(|()| state.out.flush());
        match written {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!("Output closed by reader, dropping verbose output");
                state.closed = true;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
