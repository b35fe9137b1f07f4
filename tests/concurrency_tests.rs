use std::thread;

use jsyntax::ast::CompilationUnit;
use jsyntax::{parse_source, CancellationToken, Diagnostic, Error, ParseOutput, ParserConfig, SourceUnit};

fn sources() -> Vec<SourceUnit> {
    vec![
        SourceUnit::new("traffic_light.java", include_str!("java/traffic_light.java")),
        SourceUnit::new("annotation.java", include_str!("java/annotation.java")),
        SourceUnit::new("record.java", include_str!("java/record.java")),
        SourceUnit::new("generics.java", include_str!("java/generics_and_initializers.java")),
        SourceUnit::new("broken.java", "class A { int x = ; }\n}\nenum E { A, B"),
    ]
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn results_are_shareable_across_threads() {
    assert_send_sync::<CompilationUnit>();
    assert_send_sync::<Diagnostic>();
    assert_send_sync::<ParseOutput>();
    assert_send_sync::<CancellationToken>();
    assert_send_sync::<SourceUnit>();
}

#[test]
fn parallel_parses_match_sequential_ones() {
    let units = sources();
    let config = ParserConfig::default();
    let sequential: Vec<ParseOutput> = units.iter().map(|u| parse_source(u, &config, None)).collect();

    let parallel: Vec<ParseOutput> = thread::scope(|scope| {
        let handles: Vec<_> = units
            .iter()
            .map(|unit| scope.spawn(move || parse_source(unit, &config, None)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("parser thread panicked"))
            .collect()
    });

    assert_eq!(sequential, parallel);
    assert!(parallel[..4].iter().all(|o| o.diagnostics.is_empty()));
    assert_eq!(parallel[4].diagnostics.len(), 3);
}

#[test]
fn repeated_parses_are_deterministic() {
    let unit = &sources()[4];
    let config = ParserConfig::default();
    let first = parse_source(unit, &config, None);
    for _ in 0..5 {
        assert_eq!(parse_source(unit, &config, None), first);
    }
}

#[test]
fn shared_tree_is_read_from_many_threads() {
    let output = parse_source(&sources()[3], &ParserConfig::default(), None);
    let unit = &output.unit;
    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(move || jsyntax::ast::collect_type_names(unit).len()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).collect()
    });
    assert_eq!(counts, vec![2; 4]);
}

#[test]
fn cancelled_before_start_returns_early() {
    let token = CancellationToken::new();
    token.cancel();

    let output = parse_source(&sources()[0], &ParserConfig::default(), Some(&token));
    assert!(output.cancelled);
    assert!(output.unit.types.is_empty());
    assert!(output.diagnostics.is_empty());
    assert_eq!(output.into_result(), Err(Error::Cancelled));
}

#[test]
fn cancellation_is_visible_through_clones() {
    let token = CancellationToken::new();
    let remote = token.clone();
    assert!(!token.is_cancelled());

    thread::scope(|scope| {
        scope.spawn(|| remote.cancel());
    });
    assert!(token.is_cancelled());

    let untouched = parse_source(&sources()[0], &ParserConfig::default(), Some(&CancellationToken::new()));
    assert!(!untouched.cancelled);
    assert_eq!(untouched.unit.types.len(), 3);
}
