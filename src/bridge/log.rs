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

//! Route records of the [`log`] crate through a [`Logger`] or a [`TagRegistry`].
//!
//! The record target is used as the tag.

use crate::Error;
use crate::Logger;
use crate::TagRegistry;
use crate::record::CallStack;
use crate::record::Frame;
use crate::record::Level;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => Level::ERROR,
            log::Level::Info => Level::INFO,
            log::Level::Debug | log::Level::Trace => Level::DEBUG,
        }
    }
}

fn call_stack(record: &log::Record) -> CallStack {
    let file = match (record.file_static(), record.file()) {
        (Some(file), _) => Some(Frame::new(file, record.line().unwrap_or_default())),
        (None, Some(file)) => Some(Frame::new(file.to_owned(), record.line().unwrap_or_default())),
        (None, None) => None,
    };
    CallStack::from_frames(file)
}

impl log::Log for Logger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        self.sink().is_some()
    }

    fn log(&self, record: &log::Record) {
        self.emit(
            self.sink().as_ref(),
            record.level().into(),
            record.target(),
            *record.args(),
            call_stack(record),
        );
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

impl log::Log for TagRegistry {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        self.tag(metadata.target()).is_enabled()
    }

    fn log(&self, record: &log::Record) {
        let config = self.tag(record.target());
        if !config.is_enabled() {
            return;
        }
        self.emit(
            &config,
            record.level().into(),
            record.target(),
            *record.args(),
            call_stack(record),
        );
    }

    fn flush(&self) {
        self.logger().flush();
    }
}

/// Install `logger` as the global logger of the [`log`] crate.
///
/// # Errors
///
/// Return an error if a global logger has already been set.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tagforth::Logger;
/// use tagforth::TagRegistry;
/// use tagforth::sink::Testing;
///
/// let logger = Arc::new(Logger::builder().sink(Testing::default()).build());
/// tagforth::bridge::apply(TagRegistry::new(logger)).unwrap();
///
/// log::info!(target: "net", "connected");
/// ```
pub fn apply(logger: impl log::Log + 'static) -> Result<(), Error> {
    log::set_boxed_logger(Box::new(logger))
        .map_err(|err| Error::new("failed to set global logger").with_source(err))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
