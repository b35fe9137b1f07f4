use jsyntax::ast::*;
use jsyntax::parse_compilation_unit;
use jsyntax::parser::Parser;

fn parse_expr(source: &str) -> Expr {
    let mut parser = Parser::new(source);
    parser.parse_expression().expect("Failed to parse expression")
}

fn binary(expr: &Expr) -> &BinaryExpr {
    match expr {
        Expr::Binary(b) => b,
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn logical_and_bitwise_precedence() {
    let or = parse_expr("a || b && c");
    let top = binary(&or);
    assert_eq!(top.operator, BinaryOp::Or);
    assert_eq!(binary(&top.right).operator, BinaryOp::And);

    let bits = parse_expr("a & b | c ^ d");
    let top = binary(&bits);
    assert_eq!(top.operator, BinaryOp::BitOr);
    assert_eq!(binary(&top.left).operator, BinaryOp::BitAnd);
    assert_eq!(binary(&top.right).operator, BinaryOp::Xor);
}

#[test]
fn equality_is_left_associative() {
    let e = parse_expr("a == b != c");
    let top = binary(&e);
    assert_eq!(top.operator, BinaryOp::Ne);
    assert_eq!(binary(&top.left).operator, BinaryOp::Eq);
}

#[test]
fn shift_binds_looser_than_additive() {
    let e = parse_expr("x << 1 + 2");
    let top = binary(&e);
    assert_eq!(top.operator, BinaryOp::LShift);
    assert_eq!(binary(&top.right).operator, BinaryOp::Add);

    let rel = parse_expr("a < b >> 1");
    let top = binary(&rel);
    assert_eq!(top.operator, BinaryOp::Lt);
    assert_eq!(binary(&top.right).operator, BinaryOp::RShift);
}

#[test]
fn unary_prefix_and_postfix() {
    let Expr::Unary(neg) = parse_expr("-x++") else { panic!("expected unary") };
    assert_eq!(neg.operator, UnaryOp::Minus);
    assert!(matches!(&*neg.operand, Expr::Unary(u) if u.operator == UnaryOp::PostInc));

    for (source, op) in [("!done", UnaryOp::Not), ("~mask", UnaryOp::BitNot), ("++i", UnaryOp::PreInc), ("--i", UnaryOp::PreDec), ("+1", UnaryOp::Plus)] {
        match parse_expr(source) {
            Expr::Unary(u) => assert_eq!(u.operator, op, "{}", source),
            other => panic!("{}: expected unary, got {:?}", source, other),
        }
    }
}

#[test]
fn casts_bind_to_the_postfix_chain() {
    let Expr::Cast(cast) = parse_expr("(String) obj.toString()") else { panic!("expected cast") };
    assert_eq!(cast.target_type.name, "String");
    assert!(matches!(&*cast.expr, Expr::MethodCall(m) if m.name == "toString"));

    let Expr::Cast(generic) = parse_expr("(Map.Entry<K, V>[]) raw") else { panic!("expected cast") };
    assert_eq!(generic.target_type.to_string(), "Map.Entry<K, V>[]");

    let product = parse_expr("(x + y) * z");
    let top = binary(&product);
    assert_eq!(top.operator, BinaryOp::Mul);
    assert!(matches!(&*top.left, Expr::Parenthesized(_)));
}

#[test]
fn member_access_calls_and_indexing() {
    let Expr::FieldAccess(access) = parse_expr("items[0].name") else { panic!("expected field access") };
    assert_eq!(access.name, "name");
    assert!(matches!(&*access.target, Expr::ArrayAccess(_)));

    let Expr::FieldAccess(this_field) = parse_expr("this.value") else { panic!("expected field access") };
    assert!(matches!(&*this_field.target, Expr::Identifier(id) if id.name == "this"));

    let Expr::MethodCall(call) = parse_expr("super.call(1, \"two\")") else { panic!("expected call") };
    assert_eq!(call.arguments.len(), 2);
    assert!(call.target.is_some());

    let Expr::MethodCall(generic) = parse_expr("Collections.<String>emptyList()") else { panic!("expected call") };
    assert_eq!(generic.name, "emptyList");
    assert!(generic.arguments.is_empty());

    let Expr::MethodCall(bare) = parse_expr("compute(a, b)") else { panic!("expected call") };
    assert!(bare.target.is_none());
}

#[test]
fn instance_and_array_creation() {
    let Expr::New(new) = parse_expr("new Outer.Inner(1, \"a\")") else { panic!("expected instance creation") };
    assert_eq!(new.target_type.name, "Outer.Inner");
    assert_eq!(new.arguments.len(), 2);
    assert!(new.anonymous_body.is_none());

    let Expr::NewArray(init) = parse_expr("new int[] {1, 2}") else { panic!("expected array creation") };
    assert_eq!(init.element_type.name, "int");
    assert_eq!(init.extra_dims, 1);
    assert!(init.dimensions.is_empty());
    assert_eq!(init.initializer.as_ref().map(|i| i.elements.len()), Some(2));

    let Expr::NewArray(sized) = parse_expr("new String[2][3]") else { panic!("expected array creation") };
    assert_eq!((sized.dimensions.len(), sized.extra_dims), (2, 0));
    assert!(sized.initializer.is_none());

    let Expr::New(anonymous) = parse_expr("new Runnable() { public void run() {} }") else { panic!("expected instance creation") };
    let body = anonymous.anonymous_body.expect("anonymous body");
    assert_eq!(body.methods().count(), 1);
}

#[test]
fn method_references() {
    let Expr::MethodRef(ctor) = parse_expr("Foo::new") else { panic!("expected method reference") };
    assert_eq!(ctor.name, "new");

    for (source, array_type) in [("int[]::new", "int[]"), ("String[]::new", "String[]")] {
        let Expr::MethodRef(r) = parse_expr(source) else { panic!("{}: expected method reference", source) };
        match &*r.target {
            Expr::ClassLiteral(c) => assert_eq!(c.target_type.to_string(), array_type),
            other => panic!("{}: expected array type target, got {:?}", source, other),
        }
    }

    let Expr::MethodRef(println) = parse_expr("System.out::println") else { panic!("expected method reference") };
    assert_eq!(println.target.qualified_name().as_deref(), Some("System.out"));
}

#[test]
fn lambda_forms() {
    let Expr::Lambda(single) = parse_expr("x -> x * 2") else { panic!("expected lambda") };
    assert_eq!(single.params.len(), 1);
    assert!(single.params[0].type_ref.is_none());

    let Expr::Lambda(typed) = parse_expr("(int a, final int b) -> a + b") else { panic!("expected lambda") };
    let types: Vec<String> = typed
        .params
        .iter()
        .map(|p| p.type_ref.as_ref().map(ToString::to_string).unwrap_or_default())
        .collect();
    assert_eq!(types, vec!["int", "int"]);

    let Expr::Lambda(block) = parse_expr("() -> { return; }") else { panic!("expected lambda") };
    assert!(block.params.is_empty());
    assert!(matches!(&block.body, LambdaBody::Block(b) if b.token_count == 2));
}

#[test]
fn literal_forms() {
    let cases = [
        ("1e3", Literal::Double(1000.0)),
        (".5", Literal::Double(0.5)),
        ("2.5f", Literal::Float(2.5)),
        ("0b101", Literal::Integer(5)),
        ("017", Literal::Integer(15)),
        ("1_000L", Literal::Long(1000)),
        ("true", Literal::Boolean(true)),
        ("null", Literal::Null),
        (r#""A""#, Literal::String("A".to_string())),
        (r"'\''", Literal::Char('\'')),
    ];
    for (source, expected) in cases {
        assert_eq!(parse_expr(source).as_literal(), Some(&expected), "{}", source);
    }
}

#[test]
fn nested_annotation_and_class_literal_values() {
    let Expr::Annotation(inner) = parse_expr("@Inner(name = \"n\")") else { panic!("expected annotation") };
    assert_eq!(inner.name, "Inner");
    assert_eq!(inner.arguments.len(), 1);

    let Expr::ClassLiteral(void) = parse_expr("void.class") else { panic!("expected class literal") };
    assert_eq!(void.target_type.name, "void");
}

#[test]
fn expression_spans_cover_source() {
    let source = "flag ? first.value() : other[1] + 2";
    let e = parse_expr(source);
    assert!(matches!(e, Expr::Conditional(_)));
    assert_eq!(e.span().source_text(source), source);

    let Expr::Conditional(c) = &e else { unreachable!() };
    assert_eq!(c.then_expr.span().source_text(source), "first.value()");
    assert_eq!(c.else_expr.span().source_text(source), "other[1] + 2");
}

#[test]
fn malformed_expressions_are_errors() {
    for source in ["1 +", "a.", "(int", "new", "x ? y"] {
        let mut parser = Parser::new(source);
        assert!(parser.parse_expression().is_err(), "{}", source);
    }

    let mut parser = Parser::new("a + ;");
    let err = parser.parse_expression().expect_err("missing operand");
    assert_eq!(err.message(), "expected expression, found ';'");
    assert_eq!(err.span().start.column, 5);
}

fn initializers(source: &str) -> Vec<Expr> {
    let (unit, diagnostics) = parse_compilation_unit(source);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    unit.types[0]
        .members()
        .iter()
        .filter_map(Member::as_field)
        .flat_map(|f| f.declarators.iter())
        .filter_map(|d| d.initializer.clone())
        .collect()
}

#[test]
fn assignment_in_field_initializer() {
    let values = initializers("class A { int x = y = 1; int z = (w <<= 2); }");

    let Expr::Assign(chain) = &values[0] else { panic!("expected assignment, got {:?}", values[0]) };
    assert_eq!(chain.operator, AssignOp::Assign);
    assert_eq!(chain.target.qualified_name().as_deref(), Some("y"));
    assert_eq!(chain.value.as_literal(), Some(&Literal::Integer(1)));

    let Expr::Parenthesized(inner) = &values[1] else { panic!("expected parentheses") };
    assert!(matches!(&*inner.inner, Expr::Assign(a) if a.operator == AssignOp::LShift));
}

#[test]
fn conditional_branch_is_not_an_assignment_target() {
    let mut parser = Parser::new("a ? b : c = 1");
    let err = parser.parse_expression().expect_err("conditional is not assignable");
    assert!(err.message().contains("invalid assignment target"), "{}", err.message());

    let Expr::Conditional(c) = parse_expr("a ? b = 1 : c") else { panic!("expected conditional") };
    assert!(matches!(*c.then_expr, Expr::Assign(_)));
}

#[test]
fn trailing_dot_and_hex_float_initializers() {
    let values = initializers("class A { float f = 2.f; double h = 0x1.8p1; double d = 1.; float q = 0x1p-2f; }");
    let literals: Vec<Option<&Literal>> = values.iter().map(Expr::as_literal).collect();
    assert_eq!(
        literals,
        vec![
            Some(&Literal::Float(2.0)),
            Some(&Literal::Double(3.0)),
            Some(&Literal::Double(1.0)),
            Some(&Literal::Float(0.25)),
        ]
    );
}

#[test]
fn switch_expression_initializer() {
    let values = initializers("class A { static final int N = switch (K) { case 1 -> 2; default -> { yield 3; } }; int after; }");
    let Expr::Switch(sw) = &values[0] else { panic!("expected switch, got {:?}", values[0]) };
    assert_eq!(sw.selector.qualified_name().as_deref(), Some("K"));
    assert!(!sw.body.is_empty());
}
