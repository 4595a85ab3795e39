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

use std::sync::Arc;

use crate::Logger;
use crate::Sink;
use crate::Trap;
use crate::logger::set_default_logger;
use crate::sink;
use crate::sink::Facility;
use crate::trap::DefaultTrap;

/// A builder for configuring a [`Logger`].
///
/// Without an explicit sink, [`build`](LoggerBuilder::build) probes the host platform with
/// [`sink::detect`].
///
/// # Examples
///
/// ```
/// use tagforth::Logger;
/// use tagforth::sink::Testing;
///
/// let logger = Logger::builder().sink(Testing::default()).build();
/// ```
#[must_use = "call `try_apply` to set the process-wide logger or `build` to construct a logger instance"]
#[derive(Debug, Default)]
pub struct LoggerBuilder {
    sink: Option<Arc<dyn Sink>>,
    trap: Option<Box<dyn Trap>>,
}

impl LoggerBuilder {
    /// Write records to `sink`.
    pub fn sink(mut self, sink: impl Sink) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Write records to a sink shared with other loggers or registries.
    pub fn shared_sink(mut self, sink: Arc<dyn Sink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Write records to the given host facility, or to the console if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagforth::Logger;
    /// use tagforth::sink::StaticFacility;
    ///
    /// let facility = StaticFacility::new("host").with_method("i", |_, _| Ok(()));
    /// let logger = Logger::builder().facility(Some(&facility)).build();
    /// ```
    pub fn facility(mut self, facility: Option<&dyn Facility>) -> Self {
        self.sink = Some(sink::detect_with(facility));
        self
    }

    /// Report delivery failures with `trap`.
    ///
    /// Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = Some(trap.into());
        self
    }

    /// Build the [`Logger`].
    pub fn build(self) -> Logger {
        let sink = self.sink.unwrap_or_else(sink::detect);
        let trap = self
            .trap
            .unwrap_or_else(|| Box::new(DefaultTrap::default()));
        Logger::with_parts(Some(sink), trap)
    }

    /// Set up the process-wide logger.
    ///
    /// # Errors
    ///
    /// Return the built logger back if the process-wide logger has already been initialized.
    pub fn try_apply(self) -> Result<(), Arc<Logger>> {
        set_default_logger(Arc::new(self.build()))
    }
}
