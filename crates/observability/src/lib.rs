//! Shared logging setup for the restock binaries.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (JSON output, env filtering).
pub mod tracing;
