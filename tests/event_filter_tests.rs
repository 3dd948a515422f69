// Event decoding, relevance predicates, and the grouped output shape of the
// presentation loop, exercised against in-memory streams.

use std::io::Cursor;

use testdox::event::{Event, ACTION_FAIL, ACTION_PASS};
use testdox::{EventFilter, FilterConfig};

fn event(action: &str, test: &str) -> Event {
    Event {
        action: action.into(),
        test: test.into(),
        ..Event::default()
    }
}

fn run_filter(input: &str) -> (String, bool) {
    let mut out = Vec::new();
    let mut filter = EventFilter::new(FilterConfig::default(), &mut out);
    let ok = filter.run(Cursor::new(input)).unwrap();
    (String::from_utf8(out).unwrap(), ok)
}

#[test]
fn test_is_test_result_is_true_for_test_pass_or_fail_events() {
    assert!(event(ACTION_PASS, "TestFooDoesX").is_test_result());
    assert!(event(ACTION_FAIL, "TestFooDoesX").is_test_result());
}

#[test]
fn test_is_test_result_is_false_for_non_test_pass_fail_events() {
    let irrelevant = [
        event(ACTION_PASS, "ExampleFooDoesX"),
        event(ACTION_FAIL, "BenchmarkFooDoesX"),
        event(ACTION_PASS, ""),
        event(ACTION_FAIL, ""),
        event(ACTION_PASS, "FuzzBar"),
        event("run", "TestFooDoesX"),
        event("output", "TestFooDoesX"),
    ];
    for e in irrelevant {
        assert!(!e.is_test_result(), "true for {:?} on {:?}", e.action, e.test);
    }
}

#[test]
fn test_is_package_result_requires_empty_test_name() {
    assert!(event(ACTION_PASS, "").is_package_result());
    assert!(event(ACTION_FAIL, "").is_package_result());
    assert!(!event(ACTION_PASS, "TestSomething").is_package_result());
    assert!(!event("output", "").is_package_result());
}

#[test]
fn test_is_fuzz_fail_only_for_failing_fuzz_targets() {
    assert!(event(ACTION_FAIL, "FuzzBar").is_fuzz_fail());
    assert!(!event(ACTION_PASS, "FuzzBar").is_fuzz_fail());
    assert!(!event(ACTION_FAIL, "TestFooDoesX").is_fuzz_fail());
}

#[test]
fn test_filter_groups_results_under_package_headers() {
    let input = concat!(
        r#"{"Action":"run","Package":"a","Test":"TestFirstThingHappens"}"#, "\n",
        r#"{"Action":"pass","Package":"a","Test":"TestFirstThingHappens","Elapsed":0.01}"#, "\n",
        r#"{"Action":"fail","Package":"b","Test":"TestOtherThingExplodes","Elapsed":1.5}"#, "\n",
        r#"{"Action":"pass","Package":"a","Elapsed":0.01}"#, "\n",
        r#"{"Action":"fail","Package":"b","Elapsed":1.5}"#, "\n",
    );
    let (output, ok) = run_filter(input);
    assert_eq!(
        output,
        "a:\n ✔ First thing happens (0.01s)\n\n\
         b:\n x Other thing explodes (1.50s)\n\n"
    );
    assert!(!ok);
}

#[test]
fn test_filter_interleaves_packages_without_mixing_results() {
    let input = concat!(
        r#"{"Action":"pass","Package":"a","Test":"TestAWorks"}"#, "\n",
        r#"{"Action":"pass","Package":"b","Test":"TestBWorks"}"#, "\n",
        r#"{"Action":"pass","Package":"b","Elapsed":0}"#, "\n",
        r#"{"Action":"pass","Package":"a","Elapsed":0}"#, "\n",
    );
    let (output, ok) = run_filter(input);
    assert!(ok);
    let b_block = output.find("b:\n ✔ B works").unwrap();
    let a_block = output.find("a:\n ✔ A works").unwrap();
    assert!(b_block < a_block, "packages print in completion order: {output}");
}

#[test]
fn test_filter_returns_ok_if_there_are_no_test_failures() {
    let input = concat!(
        r#"{"Action":"pass","Package":"demo","Test":"TestItWorks","Elapsed":0}"#, "\n",
        r#"{"Action":"pass","Package":"demo","Elapsed":0}"#, "\n",
    );
    let (_, ok) = run_filter(input);
    assert!(ok);
}

#[test]
fn test_package_result_with_no_tests_still_prints_header() {
    let input = concat!(r#"{"Action":"pass","Package":"empty","Elapsed":0}"#, "\n");
    let (output, ok) = run_filter(input);
    assert_eq!(output, "empty:\n\n");
    assert!(ok);
}

#[test]
fn test_fuzz_failure_replays_buffered_output() {
    let input = concat!(
        r#"{"Action":"output","Package":"demo","Test":"FuzzBar","Output":"=== RUN FuzzBar\n"}"#, "\n",
        r#"{"Action":"output","Package":"demo","Test":"FuzzBar","Output":"failing input: \"\\x00\"\n"}"#, "\n",
        r#"{"Action":"fail","Package":"demo","Test":"FuzzBar","Elapsed":0.3}"#, "\n",
    );
    let (output, ok) = run_filter(input);
    assert!(!ok);
    assert_eq!(output, "=== RUN FuzzBar\nfailing input: \"\\x00\"\n");
}

#[test]
fn test_passing_fuzz_targets_are_not_rendered() {
    let input = concat!(
        r#"{"Action":"pass","Package":"demo","Test":"FuzzBar","Elapsed":0.3}"#, "\n",
        r#"{"Action":"pass","Package":"demo","Elapsed":0.3}"#, "\n",
    );
    let (output, ok) = run_filter(input);
    assert!(ok);
    assert_eq!(output, "demo:\n\n");
}

#[test]
fn test_buffered_output_is_dropped_once_the_package_completes() {
    let input = concat!(
        r#"{"Action":"output","Package":"demo","Output":"noise\n"}"#, "\n",
        r#"{"Action":"pass","Package":"demo","Elapsed":0}"#, "\n",
    );
    let (output, _) = run_filter(input);
    assert!(!output.contains("noise"), "raw output leaked: {output}");
}

#[test]
fn test_malformed_lines_do_not_abort_the_stream() {
    let input = concat!(
        "}}} definitely not json {{{\n",
        r#"{"Action":"pass","Package":"demo","Test":"TestSurvivesGarbage"}"#, "\n",
        r#"{"Action":"pass","Package":"demo"}"#, "\n",
    );
    let (output, ok) = run_filter(input);
    assert!(ok);
    assert!(output.contains("Survives garbage"));
}

#[test]
fn test_elapsed_times_render_with_two_decimals() {
    let input = concat!(
        r#"{"Action":"pass","Package":"demo","Test":"TestQuick","Elapsed":0.01}"#, "\n",
        r#"{"Action":"pass","Package":"demo","Test":"TestSlow","Elapsed":2.5}"#, "\n",
        r#"{"Action":"pass","Package":"demo"}"#, "\n",
    );
    let (output, _) = run_filter(input);
    assert!(output.contains("Quick (0.01s)"), "{output}");
    assert!(output.contains("Slow (2.50s)"), "{output}");
}

#[test]
fn test_color_changes_glyphs_but_not_text() {
    let input = concat!(
        r#"{"Action":"pass","Package":"demo","Test":"TestItWorks","Elapsed":0}"#, "\n",
        r#"{"Action":"pass","Package":"demo"}"#, "\n",
    );
    let mut plain = Vec::new();
    EventFilter::new(FilterConfig { color: false }, &mut plain)
        .run(Cursor::new(input))
        .unwrap();
    let mut colored = Vec::new();
    EventFilter::new(FilterConfig { color: true }, &mut colored)
        .run(Cursor::new(input))
        .unwrap();
    let plain = String::from_utf8(plain).unwrap();
    let colored = String::from_utf8(colored).unwrap();
    assert!(colored.contains("\x1b["), "expected ANSI escapes: {colored:?}");
    assert!(colored.contains("It works (0.00s)"));
    assert!(plain.contains("It works (0.00s)"));
    assert!(!plain.contains("\x1b["));
}
