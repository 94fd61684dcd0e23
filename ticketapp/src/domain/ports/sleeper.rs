//! Driven port for awaiting a delay.

use std::time::Duration;

use async_trait::async_trait;

/// Abstraction over async sleeping so delays can be skipped in tests.
///
/// ```rust,no_run
/// use async_trait::async_trait;
/// use std::sync::Mutex;
/// use std::time::Duration;
/// use ticketapp::domain::ports::Sleeper;
///
/// #[derive(Default)]
/// struct CountingSleeper {
///     calls: Mutex<u32>,
/// }
///
/// #[async_trait]
/// impl Sleeper for CountingSleeper {
///     async fn sleep(&self, _duration: Duration) {
///         *self.calls.lock().expect("calls mutex") += 1;
///     }
/// }
/// # async fn demo() {
/// let sleeper = CountingSleeper::default();
/// sleeper.sleep(Duration::from_millis(25)).await;
/// assert_eq!(*sleeper.calls.lock().expect("calls mutex"), 1);
/// # }
/// ```
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend execution for `duration`.
    async fn sleep(&self, duration: Duration);
}
