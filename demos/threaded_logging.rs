//! Threaded logging demo
//!
//! Three named producer threads log at random intervals while the
//! background consumer writes to `TestLogFile<timestamp>.log` in the
//! current directory.
//!
//! Run with: cargo run --example threaded_logging [seconds]

use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use threaded_logger::prelude::*;

const PRODUCER_NAMES: [&str; 3] = [
    "Logging thread one",
    "Logging thread two",
    "Logging thread three",
];

fn write_to_log(logger: &LoggerService, running: &AtomicBool, seed: u64) -> Result<()> {
    let name = thread::current().name().unwrap_or("unnamed").to_string();
    let mut rng = StdRng::seed_from_u64(seed);

    while running.load(Ordering::Relaxed) {
        logger.info(format!(
            "This is a log message from {} at {}",
            name,
            Local::now().format("%H:%M:%S")
        ))?;
        thread::sleep(Duration::from_millis(rng.gen_range(0..2000)));
    }
    Ok(())
}

fn main() -> Result<()> {
    let seconds: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(5);

    let log_file = std::env::current_dir()?.join(format!(
        "TestLogFile{}.log",
        Local::now().format("%Y%m%d_%I_%M_%S")
    ));

    let logger = Arc::new(LoggerService::builder().consumer_thread_name("Consumer thread").build());
    logger.initialize(&log_file)?;

    logger.info("Starting threads")?;

    let running = Arc::new(AtomicBool::new(true));
    let mut producers = Vec::new();
    for (seed, name) in PRODUCER_NAMES.iter().enumerate() {
        let logger = Arc::clone(&logger);
        let running = Arc::clone(&running);
        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || write_to_log(&logger, &running, 2 + seed as u64))?;
        producers.push(handle);
    }

    logger.info("Finished starting threads")?;
    println!("Logging to {} for {}s...", log_file.display(), seconds);

    thread::sleep(Duration::from_secs(seconds));
    running.store(false, Ordering::Relaxed);

    for producer in producers {
        match producer.join() {
            Ok(result) => result?,
            Err(_) => eprintln!("A producer thread panicked"),
        }
    }

    logger.terminate()?;
    println!(
        "Wrote {} entries to {}",
        logger.metrics().written(),
        log_file.display()
    );

    Ok(())
}
