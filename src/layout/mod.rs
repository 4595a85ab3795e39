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

//! Layouts for formatting log records into lines.

use std::fmt;

use crate::Error;
use crate::record::Frame;
use crate::record::Record;

mod caller;
mod console;
mod testing;

pub use self::caller::CallerLayout;
pub use self::caller::DEFAULT_STACK_DEPTH;
pub use self::console::ConsoleLayout;
pub use self::testing::TestingLayout;

/// A layout for formatting log records.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Format a log record into a single line, without the trailing newline.
    fn format(&self, record: &Record) -> Result<String, Error>;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

// a record without any frame still renders a location column
fn location(frame: Option<&Frame>) -> (&str, u32) {
    match frame {
        Some(frame) => (frame.filename(), frame.line()),
        None => ("<unknown>", 0),
    }
}
