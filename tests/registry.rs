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

use std::fmt;
use std::sync::Arc;
use std::sync::Barrier;
use std::sync::Mutex;
use std::thread;

use rand::Rng;
use rand::distr::Alphanumeric;
use tagforth::Error;
use tagforth::Level;
use tagforth::Logger;
use tagforth::Sink;
use tagforth::TagRegistry;
use tagforth::record::Record;
use tagforth::registry::LIBRARY_TAG;
use tagforth::tag_out;

#[derive(Debug, Default)]
struct Capture {
    records: Mutex<Vec<(Level, String, String)>>,
}

impl Capture {
    fn records(&self) -> Vec<(Level, String, String)> {
        self.records.lock().unwrap().clone()
    }
}

impl Sink for Capture {
    fn write(&self, record: &Record) -> Result<(), Error> {
        self.records.lock().unwrap().push((
            record.level(),
            record.tag().to_string(),
            record.payload().to_string(),
        ));
        Ok(())
    }
}

struct Explosive;

impl fmt::Display for Explosive {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        panic!("a disabled tag must not format its arguments");
    }
}

fn registry() -> (TagRegistry, Arc<Capture>) {
    let capture = Arc::new(Capture::default());
    let logger = Logger::builder().shared_sink(capture.clone()).build();
    (TagRegistry::new(Arc::new(logger)), capture)
}

#[test]
fn test_unconfigured_tags_are_enabled() {
    let (registry, capture) = registry();

    tag_out!(registry: registry, "a", "one");
    tag_out!(registry: registry, "b", "two {}", 2);

    assert_eq!(
        capture.records(),
        [
            (Level::INFO, "a".to_string(), "one".to_string()),
            (Level::INFO, "b".to_string(), "two 2".to_string()),
        ]
    );
}

#[test]
fn test_disabled_tag_is_silent_and_lazy() {
    let (registry, capture) = registry();
    registry.set_log_enable("quiet", false);

    tag_out!(registry: registry, "quiet", "boom: {}", Explosive);
    registry.out_with_level("quiet", Level::ERROR, format_args!("{}", Explosive));
    registry.out_error("quiet", &std::io::Error::other("hidden"));

    assert!(capture.records().is_empty());

    registry.set_log_enable("quiet", true);
    tag_out!(registry: registry, "quiet", "back");
    assert_eq!(capture.records().len(), 1);
}

#[test]
fn test_tag_level_is_the_default_level() {
    let (registry, capture) = registry();
    registry.set_log_level("net", Level::DEBUG);

    tag_out!(registry: registry, "net", "configured");
    registry.out_with_level("net", Level::ERROR, format_args!("explicit"));

    let levels = capture
        .records()
        .into_iter()
        .map(|(level, _, _)| level)
        .collect::<Vec<_>>();
    assert_eq!(levels, [Level::DEBUG, Level::ERROR]);
}

#[test]
fn test_tag_sink_override() {
    let (registry, default) = registry();
    let dedicated = Arc::new(Capture::default());

    registry.set_tag_logger("db", Some(dedicated.clone()));
    tag_out!(registry: registry, "db", "to dedicated");
    tag_out!(registry: registry, "net", "to default");

    registry.set_tag_logger("db", None);
    tag_out!(registry: registry, "db", "to default again");

    assert_eq!(dedicated.records().len(), 1);
    let payloads = default
        .records()
        .into_iter()
        .map(|(_, _, payload)| payload)
        .collect::<Vec<_>>();
    assert_eq!(payloads, ["to default", "to default again"]);
}

#[test]
fn test_set_logger_replaces_default_sink() {
    let (registry, old) = registry();
    let new = Arc::new(Capture::default());

    assert!(registry.set_logger(None).is_err());
    registry.set_logger(Some(new.clone())).unwrap();
    tag_out!(registry: registry, "net", "hello");

    assert!(old.records().is_empty());
    assert_eq!(new.records().len(), 1);
}

#[test]
fn test_strict_and_legacy_set_logger() {
    let (registry, capture) = registry();

    let err = registry.set_logger(None).unwrap_err();
    assert_eq!(err.message(), "default sink must not be empty");

    // the facade itself accepts an empty sink
    registry.logger().set_logger(None);
    tag_out!(registry: registry, "net", "dropped");
    assert!(capture.records().is_empty());
}

#[test]
#[allow(deprecated)]
fn test_legacy_log_uses_library_tag() {
    let (registry, capture) = registry();

    registry.log(format_args!("legacy {}", 1));
    registry.set_log_enable(LIBRARY_TAG, false);
    registry.log(format_args!("{}", Explosive));
    registry.log_error(&std::io::Error::other("hidden"));

    assert_eq!(
        capture.records(),
        [(Level::INFO, LIBRARY_TAG.to_string(), "legacy 1".to_string())]
    );
}

#[test]
fn test_directives() {
    let (registry, capture) = registry();
    registry.apply_directives(&"db=off,net=error".parse().unwrap());

    tag_out!(registry: registry, "db", "{}", Explosive);
    tag_out!(registry: registry, "net", "failed");

    assert_eq!(
        capture.records(),
        [(Level::ERROR, "net".to_string(), "failed".to_string())]
    );
}

#[test]
fn test_concurrent_first_use_creates_one_record() {
    let (registry, capture) = registry();
    let registry = Arc::new(registry);

    for _ in 0..16 {
        let tag = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect::<String>();

        let threads = 8;
        let barrier = Arc::new(Barrier::new(threads));
        let handles = (0..threads)
            .map(|_| {
                let registry = registry.clone();
                let barrier = barrier.clone();
                let tag = tag.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let config = registry.tag(&tag);
                    tag_out!(registry: registry, &tag, "first use");
                    config
                })
            })
            .collect::<Vec<_>>();

        let configs = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<_>>();
        assert!(configs.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));

        // the record every thread saw is the one the registry keeps
        registry.set_log_level(&tag, Level::ERROR);
        assert!(configs.iter().all(|c| c.level() == Level::ERROR));
    }

    assert_eq!(registry.len(), 16);
    assert_eq!(capture.records().len(), 16 * 8);
}
