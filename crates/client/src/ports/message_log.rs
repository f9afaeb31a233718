//! Message log port - append-only, human-readable operation history.

#[cfg_attr(test, mockall::automock)]
pub trait MessageLogPort: Send + Sync {
    /// Append a message. Implementations must tolerate concurrent callers
    /// and keep arrival order.
    fn add(&self, message: &str);
}
