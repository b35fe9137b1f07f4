use super::*;

/// Read-only AST traversal.
///
/// Every method defaults to walking the node's children, so an
/// implementation overrides only the nodes it cares about and calls the
/// matching `walk_*` function to keep descending.
pub trait AstVisitor {
    fn visit_compilation_unit(&mut self, unit: &CompilationUnit) {
        walk_compilation_unit(self, unit);
    }

    fn visit_type_decl(&mut self, decl: &TypeDecl) {
        walk_type_decl(self, decl);
    }

    fn visit_enum_constant(&mut self, constant: &EnumConstant) {
        walk_enum_constant(self, constant);
    }

    fn visit_record_component(&mut self, component: &RecordComponent) {
        walk_annotations(self, &component.annotations);
        self.visit_type_ref(&component.type_ref);
    }

    fn visit_member(&mut self, member: &Member) {
        walk_member(self, member);
    }

    fn visit_parameter(&mut self, parameter: &Parameter) {
        walk_annotations(self, &parameter.annotations);
        self.visit_type_ref(&parameter.type_ref);
    }

    fn visit_annotation(&mut self, annotation: &Annotation) {
        for arg in &annotation.arguments {
            match arg {
                AnnotationArg::Value(value) | AnnotationArg::Named(_, value) => self.visit_expr(value),
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_type_ref(&mut self, type_ref: &TypeRef) {
        for arg in &type_ref.type_args {
            match arg {
                TypeArg::Type(t) => self.visit_type_ref(t),
                TypeArg::Wildcard(WildcardType { bound: Some((_, t)), .. }) => self.visit_type_ref(t),
                TypeArg::Wildcard(_) => {}
            }
        }
    }
}

pub fn walk_compilation_unit<V: AstVisitor + ?Sized>(visitor: &mut V, unit: &CompilationUnit) {
    for decl in &unit.types {
        visitor.visit_type_decl(decl);
    }
}

pub fn walk_type_decl<V: AstVisitor + ?Sized>(visitor: &mut V, decl: &TypeDecl) {
    walk_annotations(visitor, decl.annotations());
    for param in decl.type_params() {
        for bound in &param.bounds {
            visitor.visit_type_ref(bound);
        }
    }
    for supertype in decl.supertypes() {
        visitor.visit_type_ref(supertype);
    }
    match decl {
        TypeDecl::Enum(e) => {
            for constant in &e.constants {
                visitor.visit_enum_constant(constant);
            }
        }
        TypeDecl::Record(r) => {
            for component in &r.components {
                visitor.visit_record_component(component);
            }
        }
        TypeDecl::Class(_) | TypeDecl::Interface(_) | TypeDecl::Annotation(_) => {}
    }
    for member in decl.members() {
        visitor.visit_member(member);
    }
}

pub fn walk_enum_constant<V: AstVisitor + ?Sized>(visitor: &mut V, constant: &EnumConstant) {
    walk_annotations(visitor, &constant.annotations);
    for arg in constant.arguments.iter().flatten() {
        visitor.visit_expr(arg);
    }
    if let Some(body) = &constant.body {
        walk_class_body(visitor, body);
    }
}

pub fn walk_class_body<V: AstVisitor + ?Sized>(visitor: &mut V, body: &ClassBody) {
    for member in &body.members {
        visitor.visit_member(member);
    }
}

pub fn walk_member<V: AstVisitor + ?Sized>(visitor: &mut V, member: &Member) {
    match member {
        Member::Field(field) => {
            walk_annotations(visitor, &field.annotations);
            visitor.visit_type_ref(&field.type_ref);
            for init in field.declarators.iter().filter_map(|d| d.initializer.as_ref()) {
                visitor.visit_expr(init);
            }
        }
        Member::Method(method) => {
            walk_annotations(visitor, &method.annotations);
            if let Some(ret) = &method.return_type {
                visitor.visit_type_ref(ret);
            }
            for param in &method.parameters {
                visitor.visit_parameter(param);
            }
            for thrown in &method.throws {
                visitor.visit_type_ref(thrown);
            }
        }
        Member::Constructor(ctor) => {
            walk_annotations(visitor, &ctor.annotations);
            for param in &ctor.parameters {
                visitor.visit_parameter(param);
            }
            for thrown in &ctor.throws {
                visitor.visit_type_ref(thrown);
            }
        }
        Member::NestedType(decl) => visitor.visit_type_decl(decl),
        Member::AnnotationElement(element) => {
            walk_annotations(visitor, &element.annotations);
            visitor.visit_type_ref(&element.element_type);
            if let Some(default) = &element.default {
                visitor.visit_expr(default);
            }
        }
        Member::Initializer(_) => {}
    }
}

fn walk_annotations<V: AstVisitor + ?Sized>(visitor: &mut V, annotations: &[Annotation]) {
    for annotation in annotations {
        visitor.visit_annotation(annotation);
    }
}

pub fn walk_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) => {}
        Expr::FieldAccess(e) => visitor.visit_expr(&e.target),
        Expr::MethodCall(e) => {
            if let Some(target) = &e.target {
                visitor.visit_expr(target);
            }
            for arg in &e.arguments {
                visitor.visit_expr(arg);
            }
        }
        Expr::ArrayAccess(e) => {
            visitor.visit_expr(&e.array);
            visitor.visit_expr(&e.index);
        }
        Expr::Unary(e) => visitor.visit_expr(&e.operand),
        Expr::Binary(e) => {
            visitor.visit_expr(&e.left);
            visitor.visit_expr(&e.right);
        }
        Expr::Conditional(e) => {
            visitor.visit_expr(&e.condition);
            visitor.visit_expr(&e.then_expr);
            visitor.visit_expr(&e.else_expr);
        }
        Expr::Assign(e) => {
            visitor.visit_expr(&e.target);
            visitor.visit_expr(&e.value);
        }
        Expr::Cast(e) => {
            visitor.visit_type_ref(&e.target_type);
            visitor.visit_expr(&e.expr);
        }
        Expr::InstanceOf(e) => {
            visitor.visit_expr(&e.expr);
            visitor.visit_type_ref(&e.target_type);
        }
        Expr::New(e) => {
            visitor.visit_type_ref(&e.target_type);
            for arg in &e.arguments {
                visitor.visit_expr(arg);
            }
            if let Some(body) = &e.anonymous_body {
                walk_class_body(visitor, body);
            }
        }
        Expr::NewArray(e) => {
            visitor.visit_type_ref(&e.element_type);
            for dim in &e.dimensions {
                visitor.visit_expr(dim);
            }
            if let Some(init) = &e.initializer {
                for element in &init.elements {
                    visitor.visit_expr(element);
                }
            }
        }
        Expr::ArrayLiteral(e) => {
            for element in &e.elements {
                visitor.visit_expr(element);
            }
        }
        Expr::Annotation(a) => visitor.visit_annotation(a),
        Expr::ClassLiteral(e) => visitor.visit_type_ref(&e.target_type),
        Expr::Parenthesized(e) => visitor.visit_expr(&e.inner),
        Expr::Lambda(e) => {
            if let LambdaBody::Expr(body) = &e.body {
                visitor.visit_expr(body);
            }
        }
        Expr::MethodRef(e) => visitor.visit_expr(&e.target),
        Expr::Switch(e) => visitor.visit_expr(&e.selector),
    }
}

/// Dotted names of every named type declaration, outermost first
pub fn collect_type_names(unit: &CompilationUnit) -> Vec<String> {
    #[derive(Default)]
    struct Collector {
        path: Vec<String>,
        names: Vec<String>,
    }

    impl AstVisitor for Collector {
        fn visit_type_decl(&mut self, decl: &TypeDecl) {
            self.path.push(decl.name().to_string());
            self.names.push(self.path.join("."));
            walk_type_decl(self, decl);
            self.path.pop();
        }
    }

    let mut collector = Collector::default();
    collector.visit_compilation_unit(unit);
    collector.names
}
