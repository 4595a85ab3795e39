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

use std::fmt::Write;

use crate::Error;
use crate::Layout;
use crate::layout::location;
use crate::record::Level;
use crate::record::Record;

/// The layout of the [`Console`](crate::sink::Console) sink.
///
/// Output format:
///
/// ```text
/// main.rs[12] | net | connected
/// [DBG] | main.rs[13] | net | handshake done
/// main.rs[14] | net | connection reset
/// ```
///
/// The location is always the caller of the logging entry point.
///
/// # Examples
///
/// ```
/// use tagforth::layout::ConsoleLayout;
///
/// let layout = ConsoleLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ConsoleLayout {}

impl Layout for ConsoleLayout {
    fn format(&self, record: &Record) -> Result<String, Error> {
        let (file, line) = location(record.stack().frame(0));
        let tag = record.tag();
        let message = record.payload();

        let mut text = String::new();
        if record.level() == Level::DEBUG {
            text.push_str("[DBG] | ");
        }
        write!(&mut text, "{file}[{line}] | {tag} | {message}").map_err(Error::from_fmt_error)?;
        Ok(text)
    }
}
