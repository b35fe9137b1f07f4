use jsyntax::ast::*;
use jsyntax::parser::SourceId;
use jsyntax::parser::Parser;
use jsyntax::{parse_compilation_unit, parse_source, DiagnosticKind, ParserConfig, SourceUnit};

// These tests check that a malformed input yields a usable tree plus the
// minimal set of diagnostics, never a cascade.

fn parse_with(source: &str, config: ParserConfig) -> jsyntax::ParseOutput {
    Parser::with_config(source, SourceId::new("Test.java"), config).parse()
}

#[test]
fn stray_top_level_method_yields_one_diagnostic() {
    let source = include_str!("java/recovery/traffic_light_toplevel_main.java");
    let (unit, diagnostics) = parse_compilation_unit(source);

    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    let diagnostic = &diagnostics[0];
    assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
    assert_eq!(
        diagnostic.message,
        "expected class, interface, enum, record or @interface, found 'void'"
    );

    let (line_index, line) = source
        .lines()
        .enumerate()
        .find(|(_, l)| l.contains("public static void main"))
        .expect("main line");
    assert_eq!(diagnostic.span.start.line, line_index + 1);
    assert_eq!(diagnostic.span.start.column, line.find("void").map(|c| c + 1).unwrap_or(0));

    let names: Vec<&str> = unit.types.iter().map(TypeDecl::name).collect();
    assert_eq!(names, vec!["Displayable", "Level", "TrafficLight"]);
    let light = unit.find_type("TrafficLight").and_then(TypeDecl::as_enum).expect("TrafficLight");
    assert!(light.constants.iter().all(EnumConstant::has_body));
}

#[test]
fn unclosed_braces_are_structural() {
    let source = "class A {\n    void m() {\n        int x = 1;\n";
    let (unit, diagnostics) = parse_compilation_unit(source);

    assert_eq!(diagnostics.len(), 2, "{:?}", diagnostics);
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Structural));
    assert_eq!(diagnostics[0].message, "'{' of class A is never closed");
    assert_eq!((diagnostics[0].span.start.line, diagnostics[0].span.start.column), (1, 9));
    assert_eq!(diagnostics[1].message, "'{' of block is never closed");
    assert_eq!(diagnostics[1].span.start.line, 2);

    assert_eq!(unit.types.len(), 1);
    assert_eq!(unit.types[0].members().len(), 1);
    assert_eq!(unit.types[0].members()[0].name(), Some("m"));
}

#[test]
fn unclosed_enum_body() {
    let (unit, diagnostics) = parse_compilation_unit("enum E { A, B");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Structural);
    assert_eq!(diagnostics[0].message, "'{' of enum E is never closed");
    assert_eq!(unit.types[0].as_enum().map(|e| e.constants.len()), Some(2));
}

#[test]
fn lexical_errors_do_not_cascade() {
    let source = "class A {\n    int x = 09;\n    char c = 'ab';\n    String s = \"abc\n    ;\n    int # z;\n    int ok = 1;\n}\n";
    let (unit, diagnostics) = parse_compilation_unit(source);

    assert_eq!(diagnostics.len(), 4, "{:?}", diagnostics);
    assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::Lexical));
    let lines: Vec<usize> = diagnostics.iter().map(|d| d.span.start.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 6]);

    let fields: Vec<&str> = unit.types[0].members().iter().filter_map(Member::name).collect();
    assert_eq!(fields, vec!["x", "c", "s", "z", "ok"]);
}

#[test]
fn text_blocks_parse_and_unterminated_ones_report_once() {
    let source = "class A {\n    String html = \"\"\"\n        <b>hi</b>\n        \"\"\";\n    int after = 1;\n}\n";
    let (unit, diagnostics) = parse_compilation_unit(source);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    let field = unit.types[0].members()[0].as_field().expect("field");
    assert_eq!(
        field.declarators[0].initializer.as_ref().and_then(Expr::as_literal),
        Some(&Literal::String("<b>hi</b>\n".to_string()))
    );
    assert_eq!(unit.types[0].members().len(), 2);

    // the block swallows the closing brace; only the lexical error is reported
    let (unit, diagnostics) = parse_compilation_unit("class A {\n    String s = \"\"\"\n  never closed;\n}\n");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].kind, DiagnosticKind::Lexical);
    assert_eq!(diagnostics[0].message, "unterminated text block");
    assert_eq!((diagnostics[0].span.start.line, diagnostics[0].span.start.column), (2, 16));
    assert_eq!(unit.types.len(), 1);

    let (_, diagnostics) = parse_compilation_unit("class A {\n    int x = /* oops\n}\n");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].message, "unterminated block comment");
}

#[test]
fn bad_member_is_skipped_and_parsing_resumes() {
    let (unit, diagnostics) = parse_compilation_unit("class A { int x = ; int y = 2; void m() {} }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "expected expression, found ';'");

    let names: Vec<&str> = unit.types[0].members().iter().filter_map(Member::name).collect();
    assert_eq!(names, vec!["y", "m"]);
}

#[test]
fn missing_return_type() {
    let (unit, diagnostics) = parse_compilation_unit("class A { foo() { return; } void ok() {} }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "invalid method declaration; return type required");
    assert_eq!(diagnostics[0].span.start.column, 11);
    let names: Vec<&str> = unit.types[0].members().iter().filter_map(Member::name).collect();
    assert_eq!(names, vec!["ok"]);
}

#[test]
fn variadic_parameter_must_be_last() {
    let (unit, diagnostics) = parse_compilation_unit("class A { void m(int... a, int b) {} }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "only the last parameter may be variadic");

    let method = unit.types[0].members()[0].as_method().expect("method kept");
    assert_eq!(method.parameters.len(), 2);
    assert!(!method.parameters[0].variadic);
    assert!(!method.is_variadic());
}

#[test]
fn malformed_enum_constant_is_skipped() {
    let (unit, diagnostics) = parse_compilation_unit("enum E { A(1, ), B, C }");
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert!(diagnostics[0].message.contains("in enum constant"), "{}", diagnostics[0].message);

    let e = unit.types[0].as_enum().expect("enum");
    let names: Vec<&str> = e.constants.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C"]);
}

#[test]
fn repeated_modifier_is_reported_once() {
    let (unit, diagnostics) = parse_compilation_unit("class A { public public int x; }");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, "repeated modifier 'public'");
    let field = unit.types[0].members()[0].as_field().expect("field kept");
    assert_eq!(field.modifiers.as_slice(), &[Modifier::Public]);
}

#[test]
fn error_budget_stops_the_parse() {
    let source = "class A { int a = ; int b = ; int c = ; int d = ; int e = ; }";
    let output = parse_with(source, ParserConfig::new().with_max_errors(3));
    assert_eq!(output.diagnostics.len(), 3);
    assert!(!output.cancelled);

    let unlimited = parse_with(source, ParserConfig::default());
    assert_eq!(unlimited.diagnostics.len(), 5);
}

#[test]
fn default_config_reports_every_error_and_keeps_every_declaration() {
    let mut source = "class B { int x = ; }\n".repeat(120);
    source.push_str("class Valid {}\n");
    let output = parse_with(&source, ParserConfig::default());

    assert_eq!(output.diagnostics.len(), 120);
    assert_eq!(output.unit.types.len(), 121);
    assert!(output.unit.find_type("Valid").is_some());
    assert_eq!(output.diagnostics[119].span.start.line, 120);
}

#[test]
fn nesting_limit_for_declarations() {
    let source = "class A { class B { class C { class D { class E {} } } } }";
    let output = parse_with(source, ParserConfig::new().with_max_nesting_depth(4));
    assert_eq!(output.diagnostics.len(), 1, "{:?}", output.diagnostics);
    assert_eq!(output.diagnostics[0].message, "nesting exceeds the maximum depth of 4");

    let d = output.unit.find_type("A.B.C.D").expect("innermost allowed type");
    assert!(d.members().is_empty());
    assert!(parse_with(source, ParserConfig::default()).diagnostics.is_empty());
}

#[test]
fn nesting_limit_for_type_arguments() {
    let depth = 100_000;
    let source = format!(
        "class A {{ {}String{} x; int y; }}",
        "List<".repeat(depth),
        ">".repeat(depth)
    );
    let (unit, diagnostics) = parse_compilation_unit(&source);
    assert_eq!(diagnostics.len(), 1, "{:?}", diagnostics);
    assert_eq!(diagnostics[0].message, "nesting exceeds the maximum depth of 64");
    let names: Vec<&str> = unit.types[0].members().iter().filter_map(Member::name).collect();
    assert_eq!(names, vec!["y"]);

    let (unit, diagnostics) = parse_compilation_unit("class A { Map<String, List<Set<Integer>>> m; }");
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    assert_eq!(unit.types[0].members()[0].as_field().map(|f| f.type_ref.type_args.len()), Some(2));
}

#[test]
fn nesting_limit_for_expressions() {
    let source = format!("class A {{ int x = {}1{}; int y; }}", "(".repeat(200), ")".repeat(200));
    let (unit, diagnostics) = parse_compilation_unit(&source);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.contains("maximum depth"));
    let names: Vec<&str> = unit.types[0].members().iter().filter_map(Member::name).collect();
    assert_eq!(names, vec!["y"]);
}

#[test]
fn diagnostics_carry_source_and_are_ordered() {
    let unit = SourceUnit::new("Broken.java", "class A { int x = ; }\nclass B { int = 1; }\n");
    let output = parse_source(&unit, &ParserConfig::default(), None);
    assert_eq!(output.diagnostics.len(), 2);
    assert!(output.diagnostics.windows(2).all(|w| w[0].span.start <= w[1].span.start));
    assert!(output.diagnostics.iter().all(|d| d.source.as_str() == "Broken.java"));
    assert!(output.diagnostics[1].to_string().starts_with("Broken.java:2:"));
    assert_eq!(output.unit.types.len(), 2);
}
