// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::borrow::Cow;
use std::fmt;
use std::io;
use std::io::Write;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::PoisonError;
use std::sync::RwLock;

use crate::Error;
use crate::LoggerBuilder;
use crate::Sink;
use crate::Trap;
use crate::record::CallStack;
use crate::record::Level;
use crate::record::Record;
use crate::sink;
use crate::trap::DefaultTrap;

static DEFAULT_LOGGER: OnceLock<Arc<Logger>> = OnceLock::new();

/// Return the process-wide logger.
///
/// The first call probes the host platform with [`sink::detect`] unless a logger was installed
/// with [`set_default_logger`] before.
pub fn default_logger() -> &'static Arc<Logger> {
    DEFAULT_LOGGER.get_or_init(|| Arc::new(Logger::new(sink::detect())))
}

/// Install the process-wide logger.
///
/// # Errors
///
/// Return the given logger back if the process-wide logger has already been initialized.
pub fn set_default_logger(logger: Arc<Logger>) -> Result<(), Arc<Logger>> {
    DEFAULT_LOGGER.set(logger)
}

/// The global logging facade.
///
/// A logger holds the active sink shared by every call site. The sink can be replaced at any
/// time with [`Logger::set_logger`]; the replacement is not validated and `None` silences the
/// logger.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tagforth::Level;
/// use tagforth::Logger;
/// use tagforth::sink::Console;
///
/// let logger = Logger::new(Arc::new(Console::default()));
/// logger.out(Level::INFO, "Test", format_args!("Hello {}", "World"));
/// ```
#[derive(Debug)]
pub struct Logger {
    sink: RwLock<Option<Arc<dyn Sink>>>,
    trap: Box<dyn Trap>,
}

impl Logger {
    /// Create a [`LoggerBuilder`].
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Create a logger writing to `sink`, reporting failures with [`DefaultTrap`].
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self::with_parts(Some(sink), Box::new(DefaultTrap::default()))
    }

    pub(crate) fn with_parts(sink: Option<Arc<dyn Sink>>, trap: Box<dyn Trap>) -> Self {
        Self {
            sink: RwLock::new(sink),
            trap,
        }
    }

    /// The active sink.
    pub fn sink(&self) -> Option<Arc<dyn Sink>> {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the active sink.
    ///
    /// `None` is accepted and drops every following record until another sink is set.
    pub fn set_logger(&self, sink: Option<Arc<dyn Sink>>) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    /// Format `args` and write the message to the active sink.
    #[track_caller]
    pub fn out(&self, level: Level, tag: &str, args: fmt::Arguments<'_>) {
        let stack = CallStack::capture();
        self.emit(self.sink().as_ref(), level, tag, args, stack);
    }

    /// Format `args` and write the message with caller frames collected by a wrapper.
    ///
    /// Wrappers around this crate build `stack` innermost first, usually by ending with
    /// [`CallStack::with_caller`], so that sinks configured with a stack depth can name the
    /// wrapper's own caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagforth::Level;
    /// use tagforth::Logger;
    /// use tagforth::record::CallStack;
    /// use tagforth::record::Frame;
    /// use tagforth::sink::Testing;
    ///
    /// #[track_caller]
    /// fn audit(logger: &Logger, event: &str) {
    ///     let stack = CallStack::from_frames([Frame::new(file!(), line!())]).with_caller();
    ///     logger.out_with_stack(Level::INFO, "audit", stack, format_args!("{event}"));
    /// }
    ///
    /// let logger = Logger::builder().sink(Testing::default()).build();
    /// audit(&logger, "login");
    /// ```
    pub fn out_with_stack(
        &self,
        level: Level,
        tag: &str,
        stack: CallStack,
        args: fmt::Arguments<'_>,
    ) {
        self.emit(self.sink().as_ref(), level, tag, args, stack);
    }

    /// Print `err` and its chain of sources to standard error.
    ///
    /// The active sink is not involved.
    pub fn out_error<E>(&self, tag: &str, err: &E)
    where
        E: std::error::Error + ?Sized,
    {
        let _ = write_error_chain(&mut io::stderr().lock(), tag, err);
    }

    /// Flush the active sink.
    pub fn flush(&self) {
        if let Some(sink) = self.sink() {
            if let Err(err) = sink.flush() {
                self.trap.trap(&err);
            }
        }
    }

    pub(crate) fn emit(
        &self,
        sink: Option<&Arc<dyn Sink>>,
        level: Level,
        tag: &str,
        args: fmt::Arguments<'_>,
        stack: CallStack,
    ) {
        let Some(sink) = sink else {
            return;
        };

        let payload = match args.as_str() {
            Some(payload) => Cow::Borrowed(payload),
            None => {
                let mut payload = String::new();
                if let Err(err) = fmt::write(&mut payload, args) {
                    let err = Error::from_fmt_error(err).with_context("tag", tag);
                    self.trap.trap(&err);
                    return;
                }
                Cow::Owned(payload)
            }
        };

        let record = Record::builder()
            .level(level)
            .tag(tag)
            .payload(payload)
            .stack(stack)
            .build();

        if let Err(err) = sink.write(&record) {
            self.trap.trap(&err.with_context("tag", tag));
        }
    }
}

/// Write `err` followed by its sources, one per line.
pub(crate) fn write_error_chain<W, E>(w: &mut W, tag: &str, err: &E) -> io::Result<()>
where
    W: Write + ?Sized,
    E: std::error::Error + ?Sized,
{
    writeln!(w, "{tag} | {err}")?;

    let mut source = err.source();
    if source.is_some() {
        writeln!(w, "Caused by:")?;
    }
    let mut index = 0;
    while let Some(cause) = source {
        writeln!(w, "    {index}: {cause}")?;
        source = cause.source();
        index += 1;
    }
    Ok(())
}
