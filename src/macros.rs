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

/// Log a formatted message at an explicit level.
///
/// Writes through [`default_logger`](crate::default_logger) unless a logger is named.
///
/// # Examples
///
/// ```
/// use tagforth::Level;
/// use tagforth::out;
///
/// out!(Level::INFO, "Test", "Hello {}", "World");
///
/// let logger = tagforth::Logger::builder()
///     .sink(tagforth::sink::Testing::default())
///     .build();
/// out!(logger: logger, Level::DEBUG, "Test", "{} + {} = {}", 1, 2, 1 + 2);
/// ```
#[macro_export]
macro_rules! out {
    (logger: $logger:expr, $level:expr, $tag:expr, $($arg:tt)+) => {
        $logger.out($level, $tag, ::std::format_args!($($arg)+))
    };
    ($level:expr, $tag:expr, $($arg:tt)+) => {
        $crate::default_logger().out($level, $tag, ::std::format_args!($($arg)+))
    };
}

/// Print an error and its sources to standard error through the process-wide logger.
///
/// # Examples
///
/// ```
/// use tagforth::out_error;
///
/// let err = std::io::Error::other("disk full");
/// out_error!("storage", err);
/// ```
#[macro_export]
macro_rules! out_error {
    ($tag:expr, $err:expr $(,)?) => {
        $crate::default_logger().out_error($tag, &$err)
    };
}

/// Log a formatted message at the configured level of a tag.
///
/// Writes through [`default_registry`](crate::default_registry) unless a registry is named.
/// Arguments are not formatted when the tag is disabled.
///
/// # Examples
///
/// ```
/// use tagforth::tag_out;
///
/// tagforth::default_registry().set_log_enable("noisy", false);
///
/// tag_out!("net", "connected to {}", "10.0.0.1");
/// tag_out!("noisy", "never formatted: {}", 42);
/// ```
#[macro_export]
macro_rules! tag_out {
    (registry: $registry:expr, $tag:expr, $($arg:tt)+) => {
        $registry.out($tag, ::std::format_args!($($arg)+))
    };
    ($tag:expr, $($arg:tt)+) => {
        $crate::default_registry().out($tag, ::std::format_args!($($arg)+))
    };
}
