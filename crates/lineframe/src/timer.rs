use std::time::{Duration, Instant};

/// Runs `f` and returns its result together with the wall-clock time it took.
///
/// ```rust
/// let (sum, elapsed) = lineframe::timed(|| (1..=10).sum::<u32>());
/// assert_eq!(sum, 55);
/// assert!(elapsed.as_secs() < 60);
/// ```
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}
