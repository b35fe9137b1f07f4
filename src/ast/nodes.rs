use super::{HasSpan, Span};
use std::fmt;

// Package and Import Declarations
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDecl {
    pub name: String,
    pub span: Span,
}

impl fmt::Display for PackageDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "package {};", self.name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub name: String,
    pub is_static: bool,
    pub is_wildcard: bool,
    pub span: Span,
}

impl fmt::Display for ImportDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_static {
            write!(f, "import static ")?;
        } else {
            write!(f, "import ")?;
        }

        if self.is_wildcard {
            write!(f, "{}.*;", self.name)
        } else {
            write!(f, "{};", self.name)
        }
    }
}

// Type Declarations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Record,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keyword = match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Annotation => "@interface",
            TypeKind::Record => "record",
        };
        f.write_str(keyword)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Annotation(AnnotationDecl),
    Record(RecordDecl),
}

impl TypeDecl {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDecl::Class(_) => TypeKind::Class,
            TypeDecl::Interface(_) => TypeKind::Interface,
            TypeDecl::Enum(_) => TypeKind::Enum,
            TypeDecl::Annotation(_) => TypeKind::Annotation,
            TypeDecl::Record(_) => TypeKind::Record,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            TypeDecl::Class(c) => &c.name,
            TypeDecl::Interface(i) => &i.name,
            TypeDecl::Enum(e) => &e.name,
            TypeDecl::Annotation(a) => &a.name,
            TypeDecl::Record(r) => &r.name,
        }
    }

    pub fn modifiers(&self) -> &Modifiers {
        match self {
            TypeDecl::Class(c) => &c.modifiers,
            TypeDecl::Interface(i) => &i.modifiers,
            TypeDecl::Enum(e) => &e.modifiers,
            TypeDecl::Annotation(a) => &a.modifiers,
            TypeDecl::Record(r) => &r.modifiers,
        }
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut Modifiers {
        match self {
            TypeDecl::Class(c) => &mut c.modifiers,
            TypeDecl::Interface(i) => &mut i.modifiers,
            TypeDecl::Enum(e) => &mut e.modifiers,
            TypeDecl::Annotation(a) => &mut a.modifiers,
            TypeDecl::Record(r) => &mut r.modifiers,
        }
    }

    pub fn annotations(&self) -> &[Annotation] {
        match self {
            TypeDecl::Class(c) => &c.annotations,
            TypeDecl::Interface(i) => &i.annotations,
            TypeDecl::Enum(e) => &e.annotations,
            TypeDecl::Annotation(a) => &a.annotations,
            TypeDecl::Record(r) => &r.annotations,
        }
    }

    /// Generic type parameters; enums and annotation types have none
    pub fn type_params(&self) -> &[TypeParam] {
        match self {
            TypeDecl::Class(c) => &c.type_params,
            TypeDecl::Interface(i) => &i.type_params,
            TypeDecl::Record(r) => &r.type_params,
            TypeDecl::Enum(_) | TypeDecl::Annotation(_) => &[],
        }
    }

    /// Superclass and superinterfaces, in source order
    pub fn supertypes(&self) -> Vec<&TypeRef> {
        match self {
            TypeDecl::Class(c) => c.extends.iter().chain(c.implements.iter()).collect(),
            TypeDecl::Interface(i) => i.extends.iter().collect(),
            TypeDecl::Enum(e) => e.implements.iter().collect(),
            TypeDecl::Record(r) => r.implements.iter().collect(),
            TypeDecl::Annotation(_) => Vec::new(),
        }
    }

    /// Ordinary members (enum constants and record components live in their
    /// own fields)
    pub fn members(&self) -> &[Member] {
        match self {
            TypeDecl::Class(c) => &c.members,
            TypeDecl::Interface(i) => &i.members,
            TypeDecl::Enum(e) => &e.members,
            TypeDecl::Annotation(a) => &a.members,
            TypeDecl::Record(r) => &r.members,
        }
    }

    /// Directly nested member types
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDecl> {
        self.members().iter().filter_map(|m| match m {
            Member::NestedType(t) => Some(t),
            _ => None,
        })
    }

    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match self {
            TypeDecl::Enum(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&RecordDecl> {
        match self {
            TypeDecl::Record(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_annotation(&self) -> Option<&AnnotationDecl> {
        match self {
            TypeDecl::Annotation(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_interface(&self) -> Option<&InterfaceDecl> {
        match self {
            TypeDecl::Interface(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match self {
            TypeDecl::Class(c) => Some(c),
            _ => None,
        }
    }
}

impl HasSpan for TypeDecl {
    fn span(&self) -> Span {
        match self {
            TypeDecl::Class(c) => c.span,
            TypeDecl::Interface(i) => i.span,
            TypeDecl::Enum(e) => e.span,
            TypeDecl::Annotation(a) => a.span,
            TypeDecl::Record(r) => r.span,
        }
    }
}

impl fmt::Display for TypeDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind(), self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub extends: Option<TypeRef>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub extends: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

/// Enum declaration. `constants` keeps source order and always precedes the
/// ordinary `members` that follow the `;` separator.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub implements: Vec<TypeRef>,
    pub constants: Vec<EnumConstant>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl EnumDecl {
    pub fn constant(&self, name: &str) -> Option<&EnumConstant> {
        self.constants.iter().find(|c| c.name == name)
    }
}

/// A single enum constant.
///
/// `arguments` is `None` for `RED` and `Some(vec![])` for `RED()`. A present
/// `body` makes the constant an anonymous subtype of its enum that owns the
/// members inside the braces.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumConstant {
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub arguments: Option<Vec<Expr>>,
    pub body: Option<ClassBody>,
    pub span: Span,
}

impl EnumConstant {
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// Braced member list of an anonymous class: enum constant bodies and
/// `new T() { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassBody {
    pub members: Vec<Member>,
    pub span: Span,
}

impl ClassBody {
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(Member::as_method)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub members: Vec<Member>,
    pub span: Span,
}

impl AnnotationDecl {
    pub fn elements(&self) -> impl Iterator<Item = &AnnotationElement> {
        self.members.iter().filter_map(|m| match m {
            Member::AnnotationElement(e) => Some(e),
            _ => None,
        })
    }

    pub fn element(&self, name: &str) -> Option<&AnnotationElement> {
        self.elements().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub components: Vec<RecordComponent>,
    pub implements: Vec<TypeRef>,
    pub members: Vec<Member>,
    pub span: Span,
}

impl RecordDecl {
    /// Parameter list of the implied canonical constructor, in component
    /// order
    pub fn canonical_parameters(&self) -> Vec<Parameter> {
        self.components
            .iter()
            .map(|c| Parameter {
                modifiers: Modifiers::default(),
                annotations: c.annotations.clone(),
                type_ref: c.type_ref.clone(),
                name: c.name.clone(),
                variadic: c.variadic,
                span: c.span,
            })
            .collect()
    }

    /// The `private final` field each component implies
    pub fn component_fields(&self) -> Vec<FieldDecl> {
        self.components
            .iter()
            .map(|c| FieldDecl {
                modifiers: [Modifier::Private, Modifier::Final].into_iter().collect(),
                annotations: c.annotations.clone(),
                type_ref: c.effective_type(),
                declarators: vec![VariableDeclarator {
                    name: c.name.clone(),
                    array_dims: 0,
                    initializer: None,
                    span: c.span,
                }],
                span: c.span,
            })
            .collect()
    }

    /// Public accessors for the components the body does not declare
    /// itself. They have no source text, so `body` is `None`.
    pub fn implicit_accessors(&self) -> Vec<MethodDecl> {
        let declared = |name: &str| {
            self.members
                .iter()
                .filter_map(Member::as_method)
                .any(|m| m.name == name && m.parameters.is_empty())
        };
        self.components
            .iter()
            .filter(|c| !declared(&c.name))
            .map(|c| MethodDecl {
                modifiers: [Modifier::Public].into_iter().collect(),
                annotations: Vec::new(),
                type_params: Vec::new(),
                return_type: Some(c.effective_type()),
                name: c.name.clone(),
                parameters: Vec::new(),
                throws: Vec::new(),
                body: None,
                span: c.span,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordComponent {
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    pub name: String,
    pub variadic: bool,
    pub span: Span,
}

impl RecordComponent {
    /// Declared type, with a variadic component seen as an array
    pub fn effective_type(&self) -> TypeRef {
        if self.variadic {
            self.type_ref.array_of()
        } else {
            self.type_ref.clone()
        }
    }
}

// Modifiers and Annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,
    // interface default method
    Default,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Native => "native",
            Modifier::Synchronized => "synchronized",
            Modifier::Transient => "transient",
            Modifier::Volatile => "volatile",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        };
        f.write_str(s)
    }
}

/// Modifier set: written modifiers in source order, then any implied ones
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    /// Add a modifier; returns false when it was already present
    pub fn insert(&mut self, modifier: Modifier) -> bool {
        if self.contains(modifier) {
            return false;
        }
        self.0.push(modifier);
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Modifier] {
        &self.0
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Modifiers::new();
        for m in iter {
            set.insert(m);
        }
        set
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub name: String,
    pub arguments: Vec<AnnotationArg>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationArg {
    Value(Expr),
    Named(String, Expr),
}

// Type References
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub name: String,
    pub type_args: Vec<TypeArg>,
    pub array_dims: usize,
    pub span: Span,
}

impl TypeRef {
    pub fn is_primitive(&self) -> bool {
        self.array_dims == 0
            && matches!(
                self.name.as_str(),
                "boolean" | "byte" | "short" | "int" | "long" | "char" | "float" | "double"
            )
    }

    pub fn is_array(&self) -> bool {
        self.array_dims > 0
    }

    /// One more array dimension
    pub fn array_of(&self) -> TypeRef {
        TypeRef {
            array_dims: self.array_dims + 1,
            ..self.clone()
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.type_args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ">")?;
        }
        for _ in 0..self.array_dims {
            write!(f, "[]")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeArg {
    Type(TypeRef),
    Wildcard(WildcardType),
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type(t) => write!(f, "{}", t),
            TypeArg::Wildcard(w) => match &w.bound {
                None => write!(f, "?"),
                Some((BoundKind::Extends, t)) => write!(f, "? extends {}", t),
                Some((BoundKind::Super, t)) => write!(f, "? super {}", t),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WildcardType {
    pub bound: Option<(BoundKind, TypeRef)>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundKind { Extends, Super }

#[derive(Debug, Clone, PartialEq)]
pub struct TypeParam {
    pub name: String,
    pub bounds: Vec<TypeRef>,
    pub span: Span,
}

// Members
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    NestedType(TypeDecl),
    AnnotationElement(AnnotationElement),
    Initializer(InitializerBlock),
}

impl Member {
    /// Declared name; fields report their first declarator, initializers
    /// have none
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Field(f) => f.declarators.first().map(|d| d.name.as_str()),
            Member::Method(m) => Some(&m.name),
            Member::Constructor(c) => Some(&c.name),
            Member::NestedType(t) => Some(t.name()),
            Member::AnnotationElement(e) => Some(&e.name),
            Member::Initializer(_) => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodDecl> {
        match self {
            Member::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldDecl> {
        match self {
            Member::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_constructor(&self) -> Option<&ConstructorDecl> {
        match self {
            Member::Constructor(c) => Some(c),
            _ => None,
        }
    }
}

impl HasSpan for Member {
    fn span(&self) -> Span {
        match self {
            Member::Field(f) => f.span,
            Member::Method(m) => m.span,
            Member::Constructor(c) => c.span,
            Member::NestedType(t) => t.span(),
            Member::AnnotationElement(e) => e.span,
            Member::Initializer(i) => i.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    pub declarators: Vec<VariableDeclarator>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: String,
    /// C-style dimensions written after the name (`int a[]`)
    pub array_dims: usize,
    pub initializer: Option<Expr>,
    pub span: Span,
}

impl FieldDecl {
    /// Full type of one declarator, folding in C-style dimensions
    pub fn declared_type(&self, declarator: &VariableDeclarator) -> TypeRef {
        TypeRef {
            array_dims: self.type_ref.array_dims + declarator.array_dims,
            ..self.type_ref.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    /// `None` for `void`
    pub return_type: Option<TypeRef>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeRef>,
    pub body: Option<Block>,
    pub span: Span,
}

impl MethodDecl {
    pub fn is_variadic(&self) -> bool {
        self.parameters.last().is_some_and(|p| p.variadic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_params: Vec<TypeParam>,
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub throws: Vec<TypeRef>,
    pub body: Block,
    /// Record compact canonical constructor (`R { ... }`)
    pub compact: bool,
    pub span: Span,
}

/// Annotation type element: `Type name() [default value];`
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationElement {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub element_type: TypeRef,
    pub name: String,
    pub default: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializerBlock {
    pub is_static: bool,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub modifiers: Modifiers,
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    pub name: String,
    pub variadic: bool,
    pub span: Span,
}

impl Parameter {
    /// `T... xs` is seen by the callee as `T[] xs`
    pub fn effective_type(&self) -> TypeRef {
        if self.variadic {
            self.type_ref.array_of()
        } else {
            self.type_ref.clone()
        }
    }
}

/// Method, constructor or initializer body.
///
/// Bodies are kept opaque: the parser checks that braces balance and records
/// the extent, but does not build statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Tokens between the braces
    pub token_count: usize,
    pub span: Span,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.token_count == 0
    }
}

// Expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    FieldAccess(FieldAccessExpr),
    MethodCall(MethodCallExpr),
    ArrayAccess(ArrayAccessExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Conditional(ConditionalExpr),
    Assign(AssignExpr),
    Cast(CastExpr),
    InstanceOf(InstanceOfExpr),
    New(NewExpr),
    NewArray(NewArrayExpr),
    // `{a, b}` in initializer and element-value positions
    ArrayLiteral(ArrayLiteral),
    Annotation(Annotation),
    ClassLiteral(ClassLiteralExpr),
    Parenthesized(ParenthesizedExpr),
    Lambda(LambdaExpr),
    MethodRef(MethodRefExpr),
    Switch(SwitchExpr),
}

impl Expr {
    /// Dotted name for plain name chains such as `LogLevel.INFO`
    pub fn qualified_name(&self) -> Option<String> {
        match self {
            Expr::Identifier(id) => Some(id.name.clone()),
            Expr::FieldAccess(fa) => fa
                .target
                .qualified_name()
                .map(|prefix| format!("{}.{}", prefix, fa.name)),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(l) => Some(&l.value),
            _ => None,
        }
    }

    pub fn as_array_literal(&self) -> Option<&ArrayLiteral> {
        match self {
            Expr::ArrayLiteral(a) => Some(a),
            _ => None,
        }
    }
}

impl HasSpan for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Literal(e) => e.span,
            Expr::Identifier(e) => e.span,
            Expr::FieldAccess(e) => e.span,
            Expr::MethodCall(e) => e.span,
            Expr::ArrayAccess(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Conditional(e) => e.span,
            Expr::Assign(e) => e.span,
            Expr::Cast(e) => e.span,
            Expr::InstanceOf(e) => e.span,
            Expr::New(e) => e.span,
            Expr::NewArray(e) => e.span,
            Expr::ArrayLiteral(e) => e.span,
            Expr::Annotation(e) => e.span,
            Expr::ClassLiteral(e) => e.span,
            Expr::Parenthesized(e) => e.span,
            Expr::Lambda(e) => e.span,
            Expr::MethodRef(e) => e.span,
            Expr::Switch(e) => e.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    Long(i64),
    Float(f64),
    Double(f64),
    Boolean(bool),
    String(String),
    Char(char),
    Null,
}

/// Simple name; `this` and `super` are represented as names too
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldAccessExpr {
    pub target: Box<Expr>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodCallExpr {
    pub target: Option<Box<Expr>>,
    pub name: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayAccessExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub operand: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus, Minus, Not, BitNot, PreInc, PreDec, PostInc, PostDec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: BinaryOp,
    pub right: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add, Sub, Mul, Div, Mod,
    Lt, Le, Gt, Ge, Eq, Ne,
    And, Or, BitAnd, BitOr, Xor,
    LShift, RShift, URShift,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalExpr {
    pub condition: Box<Expr>,
    pub then_expr: Box<Expr>,
    pub else_expr: Box<Expr>,
    pub span: Span,
}

/// `target = value` and the compound forms such as `+=`; right-associative
#[derive(Debug, Clone, PartialEq)]
pub struct AssignExpr {
    pub target: Box<Expr>,
    pub operator: AssignOp,
    pub value: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    Add, Sub, Mul, Div, Mod,
    BitAnd, BitOr, Xor,
    LShift, RShift, URShift,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    pub target_type: TypeRef,
    pub expr: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceOfExpr {
    pub expr: Box<Expr>,
    pub target_type: TypeRef,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpr {
    pub target_type: TypeRef,
    pub arguments: Vec<Expr>,
    pub anonymous_body: Option<ClassBody>,
    pub span: Span,
}

/// `new int[3][]` or `new String[] { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct NewArrayExpr {
    pub element_type: TypeRef,
    pub dimensions: Vec<Expr>,
    pub extra_dims: usize,
    pub initializer: Option<ArrayLiteral>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassLiteralExpr {
    pub target_type: TypeRef,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenthesizedExpr {
    pub inner: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub params: Vec<LambdaParam>,
    pub body: LambdaBody,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaParam {
    pub type_ref: Option<TypeRef>,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Block),
}

/// `Target::name`, including `Type::new`
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRefExpr {
    pub target: Box<Expr>,
    pub name: String,
    pub span: Span,
}

/// `switch (selector) { ... }` in expression position; the case body is
/// kept opaque like any other block
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchExpr {
    pub selector: Box<Expr>,
    pub body: Block,
    pub span: Span,
}
