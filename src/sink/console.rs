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

use std::io;
use std::io::Write;
use std::panic;

use crate::Error;
use crate::Layout;
use crate::Sink;
use crate::layout::ConsoleLayout;
use crate::layout::TestingLayout;
use crate::record::Level;
use crate::record::Record;

/// The standard stream a console line goes to.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Stream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

impl Stream {
    /// [`Level::ERROR`] goes to standard error, every other level to standard output.
    pub fn for_level(level: Level) -> Stream {
        if level == Level::ERROR {
            Stream::Stderr
        } else {
            Stream::Stdout
        }
    }
}

/// A sink that prints log records to the process standard streams.
///
/// This is the fallback sink when the host platform has no native logging facility.
///
/// # Examples
///
/// ```
/// use tagforth::sink::Console;
///
/// let console = Console::default();
/// ```
#[derive(Debug)]
pub struct Console {
    layout: Box<dyn Layout>,
}

impl Default for Console {
    fn default() -> Self {
        Self {
            layout: Box::new(ConsoleLayout::default()),
        }
    }
}

impl Console {
    /// Set the layout for the [`Console`] sink.
    ///
    /// Default to [`ConsoleLayout`].
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }
}

impl Console {
    fn write_to<'a>(
        &self,
        record: &Record,
        stdout: &'a mut dyn Write,
        stderr: &'a mut dyn Write,
    ) -> Result<(), Error> {
        let mut line = self.layout.format(record)?;
        line.push('\n');
        let stream = match Stream::for_level(record.level()) {
            Stream::Stdout => stdout,
            Stream::Stderr => stderr,
        };
        stream
            .write_all(line.as_bytes())
            .map_err(Error::from_io_error)
    }
}

impl Sink for Console {
    fn write(&self, record: &Record) -> Result<(), Error> {
        self.write_to(record, &mut io::stdout(), &mut io::stderr())
    }

    fn flush(&self) -> Result<(), Error> {
        io::stdout().flush().map_err(Error::from_io_error)?;
        io::stderr().flush().map_err(Error::from_io_error)
    }
}

/// A sink that writes log records that can be captured by a test harness (like `cargo test`),
/// and thus the outputs are suppressed unless `--nocapture` or `--show-output` is specified.
///
/// # Examples
///
/// ```
/// use tagforth::sink::Testing;
///
/// let test_sink = Testing::default();
/// ```
#[derive(Debug)]
pub struct Testing {
    layout: Box<dyn Layout>,
}

impl Default for Testing {
    fn default() -> Self {
        Self {
            layout: Box::new(TestingLayout::default()),
        }
    }
}

impl Testing {
    /// Set the layout for the [`Testing`] sink.
    ///
    /// Default to [`TestingLayout`].
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }
}

impl Sink for Testing {
    fn write(&self, record: &Record) -> Result<(), Error> {
        let line = self.layout.format(record)?;
        let stream = Stream::for_level(record.level());
        print_captured(|| match stream {
            Stream::Stdout => println!("{line}"),
            Stream::Stderr => eprintln!("{line}"),
        })
    }
}

// `println!` is the only path the test harness captures, and it panics when the stream is gone.
fn print_captured(print: impl FnOnce()) -> Result<(), Error> {
    panic::catch_unwind(panic::AssertUnwindSafe(print))
        .map_err(|_| Error::new("failed to print to the captured stream"))
}
