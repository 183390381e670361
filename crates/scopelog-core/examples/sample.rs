//! Example of using scopelog-core directly from Rust.

use scopelog_core::{log_error_nt, log_info, log_warn, LineOptions, LogLine, Severity};
use std::thread;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let the_answer = 42;

    // 1. One statement, one line: the temporary is flushed at the semicolon
    log_info().append("I am a logger, logging stuff");
    log_info()
        .append("The answer to life, universe and everything is ")
        .append(the_answer);
    log_error_nt().append("Something fatal happened");

    // 2. A longer-lived line, flushed when the block ends
    {
        let mut line = log_warn();
        for step in 0..3 {
            line.append(" step ").append(step);
        }
    }

    // 3. Concurrent writers never interleave their lines
    let handles: Vec<_> = (0..4)
        .map(|n| {
            thread::spawn(move || {
                LogLine::new(Severity::Info, false)
                    .append("worker ")
                    .append(n)
                    .append(" done");
            })
        })
        .collect();
    for h in handles {
        let _ = h.join();
    }

    // 4. Report the write failure instead of ignoring it
    let mut line = LogLine::with_options(LineOptions::new(Severity::Info).with_timestamp(false));
    line.append("finished");
    line.finish()?;

    Ok(())
}
