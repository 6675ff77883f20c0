//! Structured logging for Keystone services
//!
//! A [`Logger`] is an explicit handle around a `tracing` dispatcher. Services
//! build one from [`LoggingConfig`] at startup and pass it to the components
//! that log, instead of relying on a process-wide fallback.
#![allow(clippy::must_use_candidate)]

use std::fmt;
use std::future::Future;

use keystone_config::{Environment, LoggingConfig};
use tracing::instrument::{Instrument, Instrumented, WithDispatch, WithSubscriber};
use tracing::{Dispatch, Span, dispatcher};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Handle to a configured logging pipeline
///
/// Cloning is cheap; clones share the same output.
#[derive(Clone)]
pub struct Logger {
    dispatch: Dispatch,
    root: Span,
}

impl Logger {
    /// Logger writing to stdout
    pub fn new(config: &LoggingConfig) -> Self {
        Self::build(config, std::io::stdout, true)
    }

    /// Logger writing to an arbitrary sink, without ANSI colors
    pub fn with_writer<W>(config: &LoggingConfig, make_writer: W) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        Self::build(config, make_writer, false)
    }

    /// Logger that drops every event
    pub fn disabled() -> Self {
        Self {
            dispatch: Dispatch::none(),
            root: Span::none(),
        }
    }

    fn build<W>(config: &LoggingConfig, make_writer: W, ansi: bool) -> Self
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

        let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.environment {
            Environment::Production => tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_writer(make_writer)
                .boxed(),
            Environment::Development => tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(ansi)
                .with_writer(make_writer)
                .boxed(),
        };

        let dispatch = Dispatch::new(tracing_subscriber::registry().with(fmt_layer.with_filter(filter)));

        // ERROR level keeps the span enabled under any filter that is not `off`
        let root = match &config.prefix {
            Some(prefix) => dispatcher::with_default(&dispatch, || tracing::error_span!("logger", prefix = %prefix)),
            None => Span::none(),
        };

        Self { dispatch, root }
    }

    /// Run `f` with this logger receiving every event it emits
    ///
    /// Events are recorded inside the prefix span when one is configured.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        dispatcher::with_default(&self.dispatch, || self.root.in_scope(f))
    }

    /// Attach this logger to `future`, for every poll until it completes
    ///
    /// The async counterpart of [`Logger::in_scope`].
    pub fn attach<F: Future>(&self, future: F) -> WithDispatch<Instrumented<F>> {
        future.instrument(self.root.clone()).with_subscriber(self.dispatch.clone())
    }

    /// Make this logger the process-wide default
    ///
    /// Meant for the binary's `main`, once. The prefix span only applies to
    /// events emitted through [`Logger::in_scope`].
    ///
    /// # Errors
    ///
    /// Returns an error if a global default was already installed
    pub fn install_global(&self) -> anyhow::Result<()> {
        dispatcher::set_global_default(self.dispatch.clone())
            .map_err(|e| anyhow::anyhow!("failed to install global logger: {e}"))
    }

    /// The underlying dispatcher, for wiring into other `tracing` consumers
    pub const fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::disabled()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("prefix_span", &self.root.id()).finish_non_exhaustive()
    }
}
