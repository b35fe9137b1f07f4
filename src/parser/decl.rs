//! Type declarations, members and type references.

use super::error::{ParseError, ParseResult};
use super::lexer::Token;
use super::parser::Parser;
use super::span::{Location, Span};
use crate::ast::*;

/// The declaration whose body is being parsed
#[derive(Debug, Clone, Copy)]
pub(super) struct Owner<'a> {
    kind: TypeKind,
    /// `None` inside anonymous bodies, where nothing is a constructor
    name: Option<&'a str>,
}

impl<'a> Owner<'a> {
    fn named(kind: TypeKind, name: &'a str) -> Self {
        Self { kind, name: Some(name) }
    }

    fn anonymous() -> Self {
        Self { kind: TypeKind::Class, name: None }
    }

    fn is_interface_like(&self) -> bool {
        matches!(self.kind, TypeKind::Interface | TypeKind::Annotation)
    }
}

fn modifier_for(token: Token) -> Option<Modifier> {
    let modifier = match token {
        Token::Public => Modifier::Public,
        Token::Protected => Modifier::Protected,
        Token::Private => Modifier::Private,
        Token::Abstract => Modifier::Abstract,
        Token::Static => Modifier::Static,
        Token::Final => Modifier::Final,
        Token::Native => Modifier::Native,
        Token::Synchronized => Modifier::Synchronized,
        Token::Transient => Modifier::Transient,
        Token::Volatile => Modifier::Volatile,
        Token::Strictfp => Modifier::Strictfp,
        Token::Default => Modifier::Default,
        _ => return None,
    };
    Some(modifier)
}

impl<'src> Parser<'src> {
    // Modifiers and annotations

    /// Modifiers and annotations in any order; stops before `@interface`
    pub(super) fn parse_modifiers(&mut self) -> ParseResult<(Modifiers, Vec<Annotation>)> {
        let mut modifiers = Modifiers::new();
        let mut annotations = Vec::new();
        loop {
            match self.peek_token() {
                Some(Token::At) if self.peek_nth(1) != Some(Token::Interface) => {
                    annotations.push(self.parse_annotation()?);
                }
                Some(token) => {
                    let Some(modifier) = modifier_for(token) else { break };
                    let span = self.current_span();
                    self.advance();
                    if !modifiers.insert(modifier) {
                        self.report(ParseError::invalid_syntax(format!("repeated modifier '{}'", modifier), span));
                    }
                }
                None => break,
            }
        }
        Ok((modifiers, annotations))
    }

    pub(super) fn parse_annotations(&mut self) -> ParseResult<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while self.check(Token::At) && self.peek_nth(1) != Some(Token::Interface) {
            annotations.push(self.parse_annotation()?);
        }
        Ok(annotations)
    }

    /// `@Name`, `@Name(value)` or `@Name(key = value, ...)`
    pub(super) fn parse_annotation(&mut self) -> ParseResult<Annotation> {
        let start = self.consume(Token::At, "'@'")?.span.start;
        let name = self.parse_qualified_name()?;
        let mut arguments = Vec::new();
        if self.match_token(Token::LParen) {
            if !self.check(Token::RParen) {
                if self.check(Token::Identifier) && self.peek_nth(1) == Some(Token::Assign) {
                    loop {
                        let key = self.parse_identifier()?;
                        self.consume(Token::Assign, "'='")?;
                        arguments.push(AnnotationArg::Named(key, self.parse_expression()?));
                        if !self.match_token(Token::Comma) {
                            break;
                        }
                    }
                } else {
                    arguments.push(AnnotationArg::Value(self.parse_expression()?));
                }
            }
            self.consume(Token::RParen, "')' after annotation arguments")?;
        }
        Ok(Annotation { name, arguments, span: self.span_from(start) })
    }

    // Type declarations

    /// Whether the next tokens start a class, interface, enum, record or
    /// annotation type declaration
    pub(super) fn at_type_decl_keyword(&mut self) -> bool {
        match self.peek_token() {
            Some(Token::Class | Token::Interface | Token::Enum) => true,
            Some(Token::At) => self.peek_nth(1) == Some(Token::Interface),
            Some(Token::Identifier) => {
                self.check_contextual(0, "record") && self.peek_nth(1) == Some(Token::Identifier)
            }
            _ => false,
        }
    }

    pub(super) fn parse_type_decl(&mut self, owner: Option<Owner<'_>>) -> ParseResult<TypeDecl> {
        let start = self.current_span().start;
        let (modifiers, annotations) = self.parse_modifiers()?;
        self.parse_type_decl_rest(start, modifiers, annotations, owner)
    }

    fn parse_type_decl_rest(
        &mut self,
        start: Location,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        owner: Option<Owner<'_>>,
    ) -> ParseResult<TypeDecl> {
        if !self.at_type_decl_keyword() {
            return Err(self.error_here("class, interface, enum, record or @interface"));
        }
        let mut decl = self.nested(|p| match p.peek_token() {
            Some(Token::Class) => p.parse_class_decl(start, modifiers, annotations).map(TypeDecl::Class),
            Some(Token::Interface) => p.parse_interface_decl(start, modifiers, annotations).map(TypeDecl::Interface),
            Some(Token::Enum) => p.parse_enum_decl(start, modifiers, annotations).map(TypeDecl::Enum),
            Some(Token::At) => p.parse_annotation_decl(start, modifiers, annotations).map(TypeDecl::Annotation),
            _ => p.parse_record_decl(start, modifiers, annotations).map(TypeDecl::Record),
        })?;
        apply_type_modifiers(&mut decl, owner);
        Ok(decl)
    }

    fn parse_class_decl(&mut self, start: Location, modifiers: Modifiers, annotations: Vec<Annotation>) -> ParseResult<ClassDecl> {
        self.consume(Token::Class, "'class'")?;
        let name = self.parse_identifier()?;
        let type_params = if self.check(Token::Lt) { self.parse_type_params()? } else { Vec::new() };
        let extends = if self.match_token(Token::Extends) { Some(self.parse_type_ref()?) } else { None };
        let implements = if self.match_token(Token::Implements) { self.parse_type_list()? } else { Vec::new() };

        let mut members = Vec::new();
        self.parse_type_body(Owner::named(TypeKind::Class, &name), &mut members)?;

        Ok(ClassDecl {
            modifiers,
            annotations,
            name,
            type_params,
            extends,
            implements,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_interface_decl(&mut self, start: Location, modifiers: Modifiers, annotations: Vec<Annotation>) -> ParseResult<InterfaceDecl> {
        self.consume(Token::Interface, "'interface'")?;
        let name = self.parse_identifier()?;
        let type_params = if self.check(Token::Lt) { self.parse_type_params()? } else { Vec::new() };
        let extends = if self.match_token(Token::Extends) { self.parse_type_list()? } else { Vec::new() };

        let mut members = Vec::new();
        self.parse_type_body(Owner::named(TypeKind::Interface, &name), &mut members)?;

        Ok(InterfaceDecl {
            modifiers,
            annotations,
            name,
            type_params,
            extends,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_annotation_decl(&mut self, start: Location, modifiers: Modifiers, annotations: Vec<Annotation>) -> ParseResult<AnnotationDecl> {
        self.consume(Token::At, "'@'")?;
        self.consume(Token::Interface, "'interface'")?;
        let name = self.parse_identifier()?;

        let mut members = Vec::new();
        self.parse_type_body(Owner::named(TypeKind::Annotation, &name), &mut members)?;

        Ok(AnnotationDecl {
            modifiers,
            annotations,
            name,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_record_decl(&mut self, start: Location, modifiers: Modifiers, annotations: Vec<Annotation>) -> ParseResult<RecordDecl> {
        // contextual `record`
        self.consume(Token::Identifier, "'record'")?;
        let name = self.parse_identifier()?;
        let type_params = if self.check(Token::Lt) { self.parse_type_params()? } else { Vec::new() };
        let components = self
            .parse_parameters()?
            .into_iter()
            .map(|p| RecordComponent {
                annotations: p.annotations,
                type_ref: p.type_ref,
                name: p.name,
                variadic: p.variadic,
                span: p.span,
            })
            .collect();
        let implements = if self.match_token(Token::Implements) { self.parse_type_list()? } else { Vec::new() };

        let mut members = Vec::new();
        self.parse_type_body(Owner::named(TypeKind::Record, &name), &mut members)?;

        Ok(RecordDecl {
            modifiers,
            annotations,
            name,
            type_params,
            components,
            implements,
            members,
            span: self.span_from(start),
        })
    }

    fn parse_enum_decl(&mut self, start: Location, modifiers: Modifiers, annotations: Vec<Annotation>) -> ParseResult<EnumDecl> {
        self.consume(Token::Enum, "'enum'")?;
        let name = self.parse_identifier()?;
        let implements = if self.match_token(Token::Implements) { self.parse_type_list()? } else { Vec::new() };

        let open = self.consume(Token::LBrace, "'{' to open enum body")?.span;
        let level = self.brace_level();
        let mut constants = Vec::new();
        let mut members = Vec::new();
        let what = format!("enum {}", name);

        loop {
            if self.halted() {
                break;
            }
            match self.peek_token() {
                None => {
                    self.report_unclosed(open, &what);
                    break;
                }
                Some(Token::RBrace) => {
                    self.advance();
                    break;
                }
                Some(Token::Semicolon) => {
                    self.advance();
                    self.parse_body_members(Owner::named(TypeKind::Enum, &name), open, &what, &mut members);
                    break;
                }
                Some(_) => {}
            }

            match self.parse_enum_constant() {
                Ok(constant) => constants.push(constant),
                Err(err) => {
                    self.report(err.with_context("enum constant"));
                    self.skip_until(level, &[Token::Comma, Token::Semicolon]);
                }
            }

            if !self.match_token(Token::Comma) && !matches!(self.peek_token(), Some(Token::Semicolon | Token::RBrace) | None) {
                let err = self.error_here("',', ';' or '}' after enum constant");
                self.report(err);
                self.skip_until(level, &[Token::Comma, Token::Semicolon]);
                self.match_token(Token::Comma);
            }
        }

        Ok(EnumDecl {
            modifiers,
            annotations,
            name,
            implements,
            constants,
            members,
            span: self.span_from(start),
        })
    }

    /// `@A NAME`, `NAME(args)`, `NAME { members }` or `NAME(args) { members }`
    fn parse_enum_constant(&mut self) -> ParseResult<EnumConstant> {
        let start = self.current_span().start;
        let annotations = self.parse_annotations()?;
        let name = self.parse_identifier()?;
        let arguments = if self.check(Token::LParen) { Some(self.parse_arguments()?) } else { None };
        let body = if self.check(Token::LBrace) { Some(self.parse_anonymous_body()?) } else { None };
        Ok(EnumConstant {
            annotations,
            name,
            arguments,
            body,
            span: self.span_from(start),
        })
    }

    /// Body of an anonymous class: enum constant bodies and `new T() { ... }`
    pub(super) fn parse_anonymous_body(&mut self) -> ParseResult<ClassBody> {
        self.nested(|p| {
            let open = p.consume(Token::LBrace, "'{'")?.span;
            let mut members = Vec::new();
            p.parse_body_members(Owner::anonymous(), open, "anonymous class body", &mut members);
            Ok(ClassBody {
                members,
                span: p.span_from(open.start),
            })
        })
    }

    /// `{ members }` of a named declaration
    fn parse_type_body(&mut self, owner: Owner<'_>, members: &mut Vec<Member>) -> ParseResult<()> {
        let open = self.consume(Token::LBrace, "'{' to open declaration body")?.span;
        let what = match owner.name {
            Some(name) => format!("{} {}", owner.kind, name),
            None => "anonymous class body".to_string(),
        };
        self.parse_body_members(owner, open, &what, members);
        Ok(())
    }

    /// Members up to and including the closing `}`. Errors inside a member
    /// are reported and the member skipped; end of input leaves the body
    /// unclosed.
    fn parse_body_members(&mut self, owner: Owner<'_>, open: Span, what: &str, members: &mut Vec<Member>) {
        let level = self.brace_level();
        loop {
            if self.halted() {
                return;
            }
            match self.peek_token() {
                None => {
                    self.report_unclosed(open, what);
                    return;
                }
                Some(Token::RBrace) => {
                    self.advance();
                    return;
                }
                Some(Token::Semicolon) => {
                    self.advance();
                    continue;
                }
                Some(_) => {}
            }
            match self.parse_member(owner) {
                Ok(member) => members.push(member),
                Err(err) => {
                    self.report(err);
                    self.synchronize(level);
                }
            }
        }
    }

    // Members

    fn parse_member(&mut self, owner: Owner<'_>) -> ParseResult<Member> {
        let start = self.current_span().start;

        if self.check(Token::LBrace) || (self.check(Token::Static) && self.peek_nth(1) == Some(Token::LBrace)) {
            let is_static = self.match_token(Token::Static);
            let body = self.parse_block()?;
            return Ok(Member::Initializer(InitializerBlock {
                is_static,
                body,
                span: self.span_from(start),
            }));
        }

        let (mut modifiers, annotations) = self.parse_modifiers()?;

        if self.at_type_decl_keyword() {
            let decl = self.parse_type_decl_rest(start, modifiers, annotations, Some(owner))?;
            return Ok(Member::NestedType(decl));
        }

        let type_params = if self.check(Token::Lt) { self.parse_type_params()? } else { Vec::new() };

        if self.check(Token::Identifier) {
            let follows = self.peek_nth(1);
            let named_like_owner = owner.name.is_some_and(|n| self.check_contextual(0, n));
            if follows == Some(Token::LParen) {
                if !named_like_owner {
                    let span = self.current_span();
                    return Err(ParseError::invalid_syntax("invalid method declaration; return type required", span));
                }
                return self
                    .parse_constructor(start, modifiers, annotations, type_params)
                    .map(Member::Constructor);
            }
            if follows == Some(Token::LBrace) && named_like_owner && owner.kind == TypeKind::Record {
                let name = self.parse_identifier()?;
                let body = self.parse_block()?;
                return Ok(Member::Constructor(ConstructorDecl {
                    modifiers,
                    annotations,
                    type_params,
                    name,
                    parameters: Vec::new(),
                    throws: Vec::new(),
                    body,
                    compact: true,
                    span: self.span_from(start),
                }));
            }
        }

        let return_type = if self.check(Token::Void) {
            let span = self.current_span();
            self.advance();
            if !self.check(Token::Identifier) || self.peek_nth(1) != Some(Token::LParen) {
                return Err(ParseError::invalid_syntax("'void' is only allowed as a method return type", span));
            }
            None
        } else {
            Some(self.parse_type_ref()?)
        };
        let name_span = self.current_span();
        let name = self.parse_identifier()?;

        if self.check(Token::LParen) {
            if owner.kind == TypeKind::Annotation {
                let element_type = return_type.ok_or_else(|| {
                    ParseError::invalid_syntax("annotation type element cannot be void", name_span)
                })?;
                inject_annotation_element_modifiers(&mut modifiers);
                return self
                    .parse_annotation_element(start, modifiers, annotations, element_type, name)
                    .map(Member::AnnotationElement);
            }
            return self
                .parse_method(start, modifiers, annotations, type_params, return_type, name, owner)
                .map(Member::Method);
        }

        if !type_params.is_empty() {
            return Err(ParseError::invalid_syntax("type parameters are only allowed on methods and constructors", name_span));
        }
        // `void` without parentheses was rejected above
        let Some(type_ref) = return_type else {
            return Err(self.error_here("'('"));
        };
        if owner.is_interface_like() {
            inject_constant_modifiers(&mut modifiers);
        }
        self.parse_field(start, modifiers, annotations, type_ref, name, name_span.start)
            .map(Member::Field)
    }

    fn parse_field(
        &mut self,
        start: Location,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        type_ref: TypeRef,
        first: String,
        first_start: Location,
    ) -> ParseResult<FieldDecl> {
        let mut declarators = Vec::new();
        let mut name = first;
        let mut name_start = first_start;
        loop {
            let mut array_dims = 0;
            while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
                self.advance();
                self.advance();
                array_dims += 1;
            }
            let initializer = if self.match_token(Token::Assign) { Some(self.parse_expression()?) } else { None };
            declarators.push(VariableDeclarator {
                name,
                array_dims,
                initializer,
                span: self.span_from(name_start),
            });
            if !self.match_token(Token::Comma) {
                break;
            }
            name_start = self.current_span().start;
            name = self.parse_identifier()?;
        }
        self.consume(Token::Semicolon, "';' after field declaration")?;
        Ok(FieldDecl {
            modifiers,
            annotations,
            type_ref,
            declarators,
            span: self.span_from(start),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn parse_method(
        &mut self,
        start: Location,
        mut modifiers: Modifiers,
        annotations: Vec<Annotation>,
        type_params: Vec<TypeParam>,
        mut return_type: Option<TypeRef>,
        name: String,
        owner: Owner<'_>,
    ) -> ParseResult<MethodDecl> {
        let parameters = self.parse_parameters()?;
        // legacy `int f()[]`
        while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
            self.advance();
            self.advance();
            if let Some(ty) = return_type.as_mut() {
                ty.array_dims += 1;
            }
        }
        let throws = if self.match_token(Token::Throws) { self.parse_type_list()? } else { Vec::new() };
        let body = if self.check(Token::LBrace) {
            Some(self.parse_block()?)
        } else {
            self.consume(Token::Semicolon, "method body or ';'")?;
            None
        };

        if owner.kind == TypeKind::Interface {
            inject_interface_method_modifiers(&mut modifiers, body.is_none());
        }

        Ok(MethodDecl {
            modifiers,
            annotations,
            type_params,
            return_type,
            name,
            parameters,
            throws,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_constructor(
        &mut self,
        start: Location,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        type_params: Vec<TypeParam>,
    ) -> ParseResult<ConstructorDecl> {
        let name = self.parse_identifier()?;
        let parameters = self.parse_parameters()?;
        let throws = if self.match_token(Token::Throws) { self.parse_type_list()? } else { Vec::new() };
        let body = self.parse_block()?;
        Ok(ConstructorDecl {
            modifiers,
            annotations,
            type_params,
            name,
            parameters,
            throws,
            body,
            compact: false,
            span: self.span_from(start),
        })
    }

    /// `Type name() [default value];` with the name already consumed
    fn parse_annotation_element(
        &mut self,
        start: Location,
        modifiers: Modifiers,
        annotations: Vec<Annotation>,
        mut element_type: TypeRef,
        name: String,
    ) -> ParseResult<AnnotationElement> {
        self.consume(Token::LParen, "'('")?;
        if !self.check(Token::RParen) {
            let span = self.current_span();
            return Err(ParseError::invalid_syntax("annotation type elements cannot have parameters", span));
        }
        self.advance();
        while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
            self.advance();
            self.advance();
            element_type.array_dims += 1;
        }
        let default = if self.match_token(Token::Default) { Some(self.parse_expression()?) } else { None };
        self.consume(Token::Semicolon, "';' after annotation type element")?;
        Ok(AnnotationElement {
            modifiers,
            annotations,
            element_type,
            name,
            default,
            span: self.span_from(start),
        })
    }

    /// Opaque `{ ... }`: braces are balanced and tokens counted, nothing
    /// else is interpreted
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let open = self.consume(Token::LBrace, "'{'")?.span;
        let level = self.brace_level();
        let mut token_count = 0;
        loop {
            match self.peek_token() {
                None => {
                    self.report_unclosed(open, "block");
                    break;
                }
                Some(Token::RBrace) if self.brace_level() == level => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                    token_count += 1;
                }
            }
        }
        Ok(Block {
            token_count,
            span: self.span_from(open.start),
        })
    }

    /// `( [param {, param}] )`; only the last parameter may be variadic
    pub(super) fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        self.consume(Token::LParen, "'('")?;
        let mut parameters: Vec<Parameter> = Vec::new();
        if !self.check(Token::RParen) {
            loop {
                if let Some(prev) = parameters.last_mut() {
                    if prev.variadic {
                        self.report(ParseError::invalid_syntax("only the last parameter may be variadic", prev.span));
                        prev.variadic = false;
                    }
                }
                parameters.push(self.parse_parameter()?);
                if !self.match_token(Token::Comma) {
                    break;
                }
            }
        }
        self.consume(Token::RParen, "')' after parameters")?;
        Ok(parameters)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let start = self.current_span().start;
        let (modifiers, annotations) = self.parse_modifiers()?;
        let mut type_ref = self.parse_type_ref()?;
        let variadic = self.match_token(Token::Ellipsis);
        let name = if self.check(Token::This) {
            // receiver parameter
            self.advance();
            "this".to_string()
        } else {
            self.parse_identifier()?
        };
        while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
            self.advance();
            self.advance();
            type_ref.array_dims += 1;
        }
        Ok(Parameter {
            modifiers,
            annotations,
            type_ref,
            name,
            variadic,
            span: self.span_from(start),
        })
    }

    // Types

    /// `<T, U extends A & B>`
    pub(super) fn parse_type_params(&mut self) -> ParseResult<Vec<TypeParam>> {
        self.consume(Token::Lt, "'<'")?;
        let mut params = Vec::new();
        loop {
            let start = self.current_span().start;
            self.parse_annotations()?;
            let name = self.parse_identifier()?;
            let mut bounds = Vec::new();
            if self.match_token(Token::Extends) {
                bounds.push(self.parse_type_ref()?);
                while self.match_token(Token::Amp) {
                    bounds.push(self.parse_type_ref()?);
                }
            }
            params.push(TypeParam { name, bounds, span: self.span_from(start) });
            if !self.match_token(Token::Comma) {
                break;
            }
        }
        self.consume_close_angle()?;
        Ok(params)
    }

    pub(super) fn parse_type_list(&mut self) -> ParseResult<Vec<TypeRef>> {
        let mut types = vec![self.parse_type_ref()?];
        while self.match_token(Token::Comma) {
            types.push(self.parse_type_ref()?);
        }
        Ok(types)
    }

    /// Primitive or class type with optional type arguments and `[]` pairs
    pub(super) fn parse_type_ref(&mut self) -> ParseResult<TypeRef> {
        let start = self.current_span().start;
        // type-use annotations carry no meaning for the declaration tree
        self.parse_annotations()?;

        let mut name;
        let mut type_args = Vec::new();
        match self.peek_token() {
            Some(token) if token.is_primitive_type() => {
                name = self.advance().map(|t| t.lexeme).unwrap_or_default();
            }
            _ => {
                name = self.parse_identifier()?;
                loop {
                    if self.check(Token::Lt) {
                        type_args = self.parse_type_args()?;
                    }
                    if !(self.check(Token::Dot) && self.peek_nth(1) == Some(Token::Identifier)) {
                        break;
                    }
                    // `Outer<T>.Inner` keeps the outer arguments in the name
                    if !type_args.is_empty() {
                        let args: Vec<String> = type_args.drain(..).map(|a| a.to_string()).collect();
                        name = format!("{}<{}>", name, args.join(", "));
                    }
                    self.advance();
                    name.push('.');
                    name.push_str(&self.parse_identifier()?);
                }
            }
        }

        let mut array_dims = 0;
        while self.check(Token::LBracket) && self.peek_nth(1) == Some(Token::RBracket) {
            self.advance();
            self.advance();
            array_dims += 1;
        }

        Ok(TypeRef {
            name,
            type_args,
            array_dims,
            span: self.span_from(start),
        })
    }

    /// `<A, ? extends B, ? super C>`; the diamond `<>` yields no arguments
    pub(super) fn parse_type_args(&mut self) -> ParseResult<Vec<TypeArg>> {
        self.nested(|p| p.parse_type_arg_list())
    }

    fn parse_type_arg_list(&mut self) -> ParseResult<Vec<TypeArg>> {
        self.consume(Token::Lt, "'<'")?;
        let mut args = Vec::new();
        if self.check(Token::Gt) {
            self.advance();
            return Ok(args);
        }
        loop {
            let start = self.current_span().start;
            self.parse_annotations()?;
            if self.match_token(Token::Question) {
                let bound = if self.match_token(Token::Extends) {
                    Some((BoundKind::Extends, self.parse_type_ref()?))
                } else if self.match_token(Token::Super) {
                    Some((BoundKind::Super, self.parse_type_ref()?))
                } else {
                    None
                };
                args.push(TypeArg::Wildcard(WildcardType { bound, span: self.span_from(start) }));
            } else {
                args.push(TypeArg::Type(self.parse_type_ref()?));
            }
            if !self.match_token(Token::Comma) {
                break;
            }
        }
        self.consume_close_angle()?;
        Ok(args)
    }
}

// Implicit modifiers

fn apply_type_modifiers(decl: &mut TypeDecl, owner: Option<Owner<'_>>) {
    let kind = decl.kind();
    let final_enum = decl
        .as_enum()
        .is_some_and(|e| !e.constants.iter().any(EnumConstant::has_body));
    let modifiers = decl.modifiers_mut();

    if let Some(owner) = owner {
        if owner.is_interface_like() {
            modifiers.insert(Modifier::Public);
            modifiers.insert(Modifier::Static);
        }
        if kind != TypeKind::Class {
            modifiers.insert(Modifier::Static);
        }
    }
    if kind == TypeKind::Record || (kind == TypeKind::Enum && final_enum) {
        modifiers.insert(Modifier::Final);
    }
}

fn inject_constant_modifiers(modifiers: &mut Modifiers) {
    modifiers.insert(Modifier::Public);
    modifiers.insert(Modifier::Static);
    modifiers.insert(Modifier::Final);
}

fn inject_interface_method_modifiers(modifiers: &mut Modifiers, bodiless: bool) {
    let private = modifiers.contains(Modifier::Private);
    if !private {
        modifiers.insert(Modifier::Public);
    }
    let concrete = private || modifiers.contains(Modifier::Static) || modifiers.contains(Modifier::Default);
    if bodiless && !concrete {
        modifiers.insert(Modifier::Abstract);
    }
}

fn inject_annotation_element_modifiers(modifiers: &mut Modifiers) {
    modifiers.insert(Modifier::Public);
    modifiers.insert(Modifier::Abstract);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mods(list: &[Modifier]) -> Modifiers {
        list.iter().copied().collect()
    }

    #[test]
    fn interface_methods_get_public_and_abstract() {
        let mut m = Modifiers::new();
        inject_interface_method_modifiers(&mut m, true);
        assert_eq!(m, mods(&[Modifier::Public, Modifier::Abstract]));

        let mut m = mods(&[Modifier::Default]);
        inject_interface_method_modifiers(&mut m, false);
        assert_eq!(m, mods(&[Modifier::Default, Modifier::Public]));

        let mut m = mods(&[Modifier::Private]);
        inject_interface_method_modifiers(&mut m, false);
        assert_eq!(m, mods(&[Modifier::Private]));
    }

    #[test]
    fn constants_never_duplicate_written_modifiers() {
        let mut m = mods(&[Modifier::Static, Modifier::Final]);
        inject_constant_modifiers(&mut m);
        assert_eq!(m.as_slice(), &[Modifier::Static, Modifier::Final, Modifier::Public]);
    }
}
