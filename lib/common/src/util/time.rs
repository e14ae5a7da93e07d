use std::time::{Duration, Instant};

/// Pretty-print an elapsed duration (used by the shell timer and in logs).
pub fn format_duration(duration: Duration) -> String {
    let micros = duration.as_micros();
    let seconds = duration.as_secs();

    match seconds {
        0 => match micros {
            0..=999 => format!("{}μs", micros),
            _ => format!("{:.3}ms", micros as f64 / 1_000.0),
        },
        1..=59 => format!("{:.3}s", duration.as_secs_f64()),
        60..=3_599 => format!("{:.3}m", seconds as f64 / 60.0),
        _ => format!("{:.3}h", seconds as f64 / 3_600.0),
    }
}

/// Runs `f` and returns its result together with the time it took.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}
