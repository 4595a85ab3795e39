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
use std::sync::Mutex;

use tagforth::Level;
use tagforth::Logger;
use tagforth::TagRegistry;
use tagforth::out;
use tagforth::record::CallStack;
use tagforth::record::Frame;
use tagforth::sink::PlatformSink;
use tagforth::sink::StaticFacility;

type Calls = Arc<Mutex<Vec<String>>>;

fn facility(calls: &Calls) -> StaticFacility {
    let mut facility = StaticFacility::new("host");
    for method in ["i", "d", "w"] {
        let calls = calls.clone();
        facility = facility.with_method(method, move |tag, message| {
            calls.lock().unwrap().push(format!("{method} {tag} {message}"));
            Ok(())
        });
    }
    facility
}

#[test]
fn test_probed_facility_receives_records() {
    let calls = Calls::default();
    let facility = facility(&calls);
    let logger = Logger::builder().facility(Some(&facility)).build();

    out!(logger: logger, Level::INFO, "app", "started");
    out!(logger: logger, Level::ERROR, "app", "failed: {}", 7);
    out!(logger: logger, Level::DEBUG, "app", "detail");
    out!(logger: logger, Level::from_raw(99), "app", "odd");

    assert_eq!(
        *calls.lock().unwrap(),
        [
            "i app started",
            "w app failed: 7",
            "d app detail",
            "d app odd",
        ]
    );
}

#[test]
fn test_missing_facility_falls_back_to_console() {
    let logger = Logger::builder().facility(None).build();
    let sink = logger.sink().unwrap();
    assert!(format!("{sink:?}").starts_with("Console"));
    out!(logger: logger, Level::INFO, "Test", "Hello {}", "World");
}

#[test]
fn test_stack_info_names_the_caller() {
    let calls = Calls::default();
    let sink = PlatformSink::new(&facility(&calls)).with_stack_info(true);
    let logger = Logger::builder().sink(sink).build();
    let registry = TagRegistry::new(Arc::new(logger));

    let line = line!() + 1;
    registry.out("ui", format_args!("clicked"));

    assert_eq!(
        *calls.lock().unwrap(),
        [format!("i ui platform.rs[{line}] : clicked")]
    );
}

// frame 0 is the line below, frame 1 the caller of `audit`
#[track_caller]
fn audit(logger: &Logger, event: &str) -> u32 {
    let stack = CallStack::from_frames([Frame::new(file!(), line!())]).with_caller();
    logger.out_with_stack(Level::INFO, "audit", stack, format_args!("{event}"));
    line!() - 2
}

#[test]
fn test_stack_depth_reaches_wrapper_caller() {
    let calls = Calls::default();
    let mut locations = vec![];
    for depth in [0, 1, 2] {
        let sink = PlatformSink::new(&facility(&calls))
            .with_stack_info(true)
            .with_stack_depth(depth);
        let logger = Logger::builder().sink(sink).build();
        let caller = line!() + 1;
        let inner = audit(&logger, "login");
        locations.push(if depth == 0 { inner } else { caller });
    }

    // depth 2 is deeper than the stack and clamps to the outermost frame
    let expected = locations
        .iter()
        .map(|line| format!("i audit platform.rs[{line}] : login"))
        .collect::<Vec<_>>();
    assert_eq!(*calls.lock().unwrap(), expected);
    assert_ne!(locations[0], locations[1]);
}

#[test]
fn test_registry_forwards_wrapper_stack() {
    let calls = Calls::default();
    let sink = PlatformSink::new(&facility(&calls))
        .with_stack_info(true)
        .with_stack_depth(1);
    let registry = TagRegistry::new(Arc::new(Logger::builder().sink(sink).build()));
    let stack = CallStack::from_frames([
        Frame::new("src/wrapper.rs", 3),
        Frame::new("src/app.rs", 40),
    ]);

    registry.out_with_stack("ui", stack.clone(), format_args!("clicked"));
    registry.set_log_enable("ui", false);
    registry.out_with_stack("ui", stack, format_args!("hidden"));

    assert_eq!(*calls.lock().unwrap(), ["i ui app.rs[40] : clicked"]);
}

#[test]
fn test_failing_facility_is_silent() {
    let facility = StaticFacility::new("broken")
        .with_method("i", |_, _| Err(tagforth::Error::new("no log daemon")));
    let logger = Logger::builder()
        .facility(Some(&facility))
        .trap(PanicTrap)
        .build();

    out!(logger: logger, Level::INFO, "app", "lost");
    out!(logger: logger, Level::ERROR, "app", "no warn method");
}

#[derive(Debug)]
struct PanicTrap;

impl tagforth::Trap for PanicTrap {
    fn trap(&self, err: &tagforth::Error) {
        panic!("platform failures must not reach the trap: {err}");
    }
}
