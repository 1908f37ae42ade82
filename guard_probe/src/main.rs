//! # Guard Probe
//!
//! Scenario runner for the `fatal_guard` integration tests. Process
//! termination cannot be observed from inside the process that dies, so
//! the tests spawn this binary as a child, pick a scenario via argv, and
//! assert on the exit status and captured stderr.
//!
//! Exit code `2` is reserved for probe usage errors and never used by a
//! guard, so the tests can tell "scenario failed to start" apart from
//! "guard fired".

use std::io;
use std::thread;
use std::time::Duration;

use fatal_guard::hook;
use fatal_guard::prelude::*;
use tracing::info;

/// Failure a worker surfaces as a value rather than a panic.
#[derive(Debug, thiserror::Error)]
enum ProbeError {
    #[error("sensor offline: {0}")]
    SensorOffline(&'static str),
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .init();

    let scenario = match std::env::args().nth(1) {
        Some(s) => s,
        None => usage(),
    };

    match scenario.as_str() {
        "clean" => clean(),
        "boom" => boom(),
        "exit-code" => exit_code(),
        "decorated" => decorated(),
        "custom-error" => custom_error(),
        "result-err" => result_err(),
        "race" => race(),
        "unguarded" => unguarded(),
        "hook" => hook_scenario(),
        _ => usage(),
    }
}

fn usage() -> ! {
    eprintln!(
        "usage: guard_probe <clean|boom|exit-code|decorated|custom-error|result-err|race|unguarded|hook>"
    );
    std::process::exit(2);
}

/// Guarded worker completes normally; the guard must leave no trace.
fn clean() {
    let handle = thread::spawn(|| {
        let _guard = fatal_guard();
        6 * 7
    });
    let value = handle.join().expect("worker completed");
    println!("clean done: {value}");
}

/// The literal scenario from the crate's motivation: a worker panics
/// "boom" immediately while the main thread sleeps and then prints
/// "done". Whether "done" makes it out is a race between the sleep and
/// the termination; callers must not assert on it.
fn boom() {
    let _handle = thread::Builder::new()
        .name("worker".into())
        .spawn(|| {
            let _guard = fatal_guard();
            panic!("boom");
        })
        .expect("spawn worker");

    thread::sleep(Duration::from_secs(1));
    println!("done");
}

/// Same as `boom` but with a caller-chosen exit status.
fn exit_code() {
    let _handle = thread::spawn(|| {
        let _guard = FatalGuard::with_exit_code(7);
        panic!("seven");
    });
    thread::sleep(Duration::from_secs(1));
}

/// Decorator form of `boom`; must be observably identical to it.
fn decorated() {
    let _handle = thread::Builder::new()
        .name("worker".into())
        .spawn(fatal_on_panic(|| {
            panic!("boom");
        }))
        .expect("spawn worker");

    thread::sleep(Duration::from_secs(1));
    println!("done");
}

/// A typed error value escalated through the guard instead of a panic.
fn custom_error() {
    let _handle = thread::spawn(|| {
        let guard = fatal_guard();
        let reading: Result<u32, ProbeError> = Err(ProbeError::SensorOffline("axis-3"));
        let _ = guard.check(reading);
    });
    thread::sleep(Duration::from_secs(1));
}

/// Decorator for fallible routines: an `Err` return is fatal too.
fn result_err() {
    let _handle = thread::spawn(fatal_on_error(|| {
        Err::<(), ProbeError>(ProbeError::SensorOffline("axis-9"))
    }));
    thread::sleep(Duration::from_secs(1));
}

/// Two guarded workers: A completes, B panics 10ms later. The process
/// must die with B's diagnostics no matter that A succeeded.
fn race() {
    let a = thread::Builder::new()
        .name("worker-a".into())
        .spawn(|| {
            let _guard = fatal_guard();
            thread::sleep(Duration::from_millis(5));
            info!("a done");
        })
        .expect("spawn worker-a");

    let b = thread::Builder::new()
        .name("worker-b".into())
        .spawn(|| {
            let _guard = fatal_guard();
            thread::sleep(Duration::from_millis(15));
            panic!("b failed");
        })
        .expect("spawn worker-b");

    let _ = a.join();
    let _ = b.join();
    println!("race done");
}

/// Only the worker body is guarded; a panic on an *unguarded* thread
/// stays confined to that thread, exactly as stock Rust behaves.
fn unguarded() {
    let guarded = thread::spawn(|| {
        let _guard = fatal_guard();
        info!("guarded worker fine");
    });

    let isolated = thread::spawn(|| {
        panic!("isolated");
    });

    guarded.join().expect("guarded worker completed");
    assert!(isolated.join().is_err(), "unguarded panic is joinable");
    println!("supervisor still alive");
}

/// Process-wide hook with a custom code; the panicking thread holds no
/// guard at all.
fn hook_scenario() {
    hook::install(3);
    let _handle = thread::spawn(|| {
        panic!("hooked");
    });
    thread::sleep(Duration::from_secs(1));
}
