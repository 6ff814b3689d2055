//! Terminal rendition of transient notices.

use fx_types::{Notice, Notifier};

/// Prints notices to stderr so they do not mix with converted values.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(?notice, "Showing notice");
        eprintln!("! {}", notice);
    }
}
