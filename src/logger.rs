use std::fmt;

/// Leveled diagnostics sink used by the policy engine.
///
/// The engine never changes behavior based on logging; implementations only
/// observe. [`TracingLogger`] is used unless another sink is supplied through
/// [`Cors::with_logger`](crate::Cors::with_logger).
pub trait CorsLogger: Send + Sync {
    fn debug(&self, message: fmt::Arguments<'_>);
    fn error(&self, message: fmt::Arguments<'_>);
}

/// Forwards engine diagnostics to `tracing` under the `edge_cors` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl CorsLogger for TracingLogger {
    fn debug(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(target: "edge_cors", "{message}");
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        tracing::error!(target: "edge_cors", "{message}");
    }
}
