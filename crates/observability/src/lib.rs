//! Tracing and logging setup shared by the tradeline binaries.

/// Initialize process-wide tracing at `info` unless `RUST_LOG` says otherwise.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::LogFormat::Json, "info");
}

/// Tracing configuration (filters, output format).
pub mod tracing;
