//! Presentation-layer notification port.

use crate::domain::Notice;

/// Receives transient notices for the user.
///
/// Called from fetch tasks, so implementations must return promptly.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notice: Notice);
}
