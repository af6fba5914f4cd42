//! Injected logging.
//!
//! Library code never reaches for the process-wide logger. Whoever calls
//! into swath hands over a [`Diagnostics`] wrapping the `log::Log` sink it
//! wants records to go to. The CLI passes `log::logger()` after setting up
//! env_logger; tests and embedders can use [`Diagnostics::silent`].

use std::fmt;

use log::{Level, Log, Metadata, Record};

/// Target attached to every record emitted by the planner.
pub const TARGET: &str = "swath";

/// A borrowed logging sink, cheap to copy into worker closures.
#[derive(Clone, Copy)]
pub struct Diagnostics<'a> {
    sink: &'a dyn Log,
}

struct Silent;

impl Log for Silent {
    fn enabled(&self, _: &Metadata<'_>) -> bool {
        false
    }

    fn log(&self, _: &Record<'_>) {}

    fn flush(&self) {}
}

static SILENT: Silent = Silent;

impl<'a> Diagnostics<'a> {
    pub fn new(sink: &'a dyn Log) -> Self {
        Self { sink }
    }

    /// A sink that drops everything.
    pub fn silent() -> Diagnostics<'static> {
        Diagnostics { sink: &SILENT }
    }

    /// Send one record to the sink if it accepts `level` for our target.
    pub fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let metadata = Metadata::builder().level(level).target(TARGET).build();
        if !self.sink.enabled(&metadata) {
            return;
        }
        self.sink.log(
            &Record::builder()
                .metadata(metadata)
                .args(args)
                .module_path_static(Some(module_path!()))
                .build(),
        );
    }

    #[inline]
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Debug, args);
    }

    #[inline]
    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    #[inline]
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }
}

impl fmt::Debug for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics").finish_non_exhaustive()
    }
}
