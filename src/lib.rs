pub mod event;
pub mod filter;
pub mod prettifier;
pub mod runner;

// Re-export main types for convenient access
pub use event::Event;
pub use filter::{EventFilter, FilterConfig};
pub use prettifier::{prettify, prettify_with_observer, ScanObserver, ScanState, TraceObserver};
pub use runner::{run_tests, RunnerConfig};
