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

/// The layout of the [`Testing`](crate::sink::Testing) sink.
///
/// The tag carries a one-letter severity prefix:
///
/// ```text
/// I/net | main.rs[12] : connected
/// D/net | main.rs[13] : handshake done
/// E/net | main.rs[14] : connection reset
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TestingLayout {}

fn prefix(level: Level) -> &'static str {
    match level {
        Level::INFO => "I/",
        Level::ERROR => "E/",
        _ => "D/",
    }
}

impl Layout for TestingLayout {
    fn format(&self, record: &Record) -> Result<String, Error> {
        let (file, line) = location(record.stack().frame(0));
        let prefix = prefix(record.level());
        let tag = record.tag();
        let message = record.payload();

        let mut text = String::new();
        write!(&mut text, "{prefix}{tag} | {file}[{line}] : {message}")
            .map_err(Error::from_fmt_error)?;
        Ok(text)
    }
}
