//! Turns Go test identifiers into readable sentences.
//!
//! A test name like `TestFoo/has_well-formed_output` encodes the parent test
//! (`TestFoo`) and a subtest whose spaces were replaced with underscores by
//! the test runner. [`prettify`] undoes that encoding as far as it can,
//! yielding `Foo has well-formed output`: camel-case transitions and
//! underscores become spaces, initialisms such as "PDF" or "JSON" keep their
//! casing, hyphenated and apostrophized words stay intact.
//!
//! Because Go function names are themselves camel-cased, a name like
//! `TestHandleInputClosesInputAfterReading` is ambiguous: the function under
//! test is `HandleInput`, but nothing in the name says so. An underscore
//! directly after the function name marks the end of a multiword function
//! name: `TestHandleInput_ClosesInputAfterReading` renders as
//! `HandleInput closes input after reading`.
//!
//! The transform is total: any input produces some sentence (possibly
//! empty), and the scanner cannot fail or panic.

mod scanner;

pub use scanner::ScanState;

use scanner::Scanner;
use tracing::trace;

/// Observer for scanner decisions, injected per call. The scanner invokes it
/// on every state dispatch and every emitted word; implementations must not
/// influence the result.
pub trait ScanObserver {
    /// A state is about to dispatch on the next code point. `span` is the
    /// pending word so far, `next` the lookahead (None at end of input).
    fn on_state(&mut self, _state: ScanState, _span: &[char], _next: Option<char>) {}

    /// A word was appended to the output sequence.
    fn on_emit(&mut self, _word: &str) {}

    /// The multiword-function hint fired and folded the words emitted so far
    /// into `compound`.
    fn on_merge(&mut self, _compound: &str) {}
}

/// The silent observer.
impl ScanObserver for () {}

/// Observer that forwards scanner decisions to `tracing` at TRACE level.
/// Enable with e.g. `RUST_LOG=testdox=trace`.
#[derive(Debug, Default)]
pub struct TraceObserver;

impl ScanObserver for TraceObserver {
    fn on_state(&mut self, state: ScanState, span: &[char], next: Option<char>) {
        trace!(
            ?state,
            span = %span.iter().collect::<String>(),
            ?next,
            "scan"
        );
    }

    fn on_emit(&mut self, word: &str) {
        trace!(word, "emit");
    }

    fn on_merge(&mut self, compound: &str) {
        trace!(compound, "multiword function");
    }
}

/// Render a test identifier as a sentence.
///
/// The leading `Test` prefix is stripped; if nothing remains the result is
/// the empty string. The output never contains `_` or `/`, and its first
/// code point is uppercase.
///
/// ```
/// use testdox::prettify;
///
/// assert_eq!(
///     prettify("TestSumCorrectlySumsInputNumbers"),
///     "Sum correctly sums input numbers",
/// );
/// assert_eq!(
///     prettify("TestFoo/has_well-formed_output"),
///     "Foo has well-formed output",
/// );
/// ```
pub fn prettify(test_name: &str) -> String {
    prettify_with_observer(test_name, &mut ())
}

/// [`prettify`] with an injected [`ScanObserver`] receiving the scanner's
/// decision trace. The observer never affects the returned sentence.
pub fn prettify_with_observer<O: ScanObserver>(test_name: &str, observer: &mut O) -> String {
    Scanner::new(test_name, observer).run()
}
