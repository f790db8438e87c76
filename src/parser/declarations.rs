//! Declaration parsing implementation
//!
//! This module handles the program header and everything that introduces a
//! name or a type:
//!
//! - The import list and the `class` header
//! - Blocks, which interleave declarations and statements
//! - Variable and closure declarations
//! - Closure literals with their formal arguments
//! - Types: simple, list (`@[T]`) and key-value (`@@[K:V]`)
//!
//! # Grammar
//!
//! ```text
//! program     ::= ('import' qualified ';')* 'class' IDENT block
//! qualified   ::= IDENT ('.' IDENT)*
//! block       ::= '{' (declaration ';' | statement ';')* '}'
//! declaration ::= 'def' IDENT ('=' closure | (':' type)?)
//! closure     ::= '{' (var_dec (',' var_dec)*)? '->' (statement ';')* '}'
//! var_dec     ::= IDENT (':' type)?
//! type        ::= simple | '@' '@' '[' simple ':' type ']' | '@' '[' type ']'
//! ```

use crate::parser::ast::*;
use crate::parser::parse::{ParseResult, Parser, SyntaxError};
use crate::parser::token::{Kind, Token, SIMPLE_TYPES};

impl Parser {
    /// Parse the whole compilation unit up to (not including) `Eof`.
    pub(crate) fn parse_class(&mut self) -> ParseResult<Program> {
        let first_token = self.current.clone();

        let mut imports = Vec::new();
        while self.check(Kind::KwImport) {
            self.advance();
            imports.push(self.parse_qualified_name()?);
            self.expect(Kind::Semicolon)?;
        }

        self.expect(Kind::KwClass)?;
        let class_name = self.expect(Kind::Ident)?.text().to_string();
        let block = self.parse_block()?;

        Ok(Program {
            imports,
            class_name,
            block,
            first_token,
        })
    }

    fn parse_qualified_name(&mut self) -> ParseResult<QualifiedName> {
        let first_token = self.expect(Kind::Ident)?;
        let mut name = first_token.text().to_string();

        while self.check(Kind::Dot) {
            self.advance();
            let part = self.expect(Kind::Ident)?;
            name.push('/');
            name.push_str(part.text());
        }

        Ok(QualifiedName { name, first_token })
    }

    /// Parse a `{ ... }` block. Empty statements are accepted and dropped.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        self.nested(Self::parse_block_body)
    }

    fn parse_block_body(&mut self) -> ParseResult<Block> {
        let first_token = self.expect(Kind::LCurly)?;
        let mut elems = Vec::new();

        loop {
            match self.kind() {
                Kind::RCurly => break,
                Kind::KwDef => {
                    let declaration = self.parse_declaration()?;
                    elems.push(BlockElem::Declaration(declaration));
                }
                _ => {
                    if let Some(statement) = self.parse_statement()? {
                        elems.push(BlockElem::Statement(statement));
                    }
                }
            }
            self.expect(Kind::Semicolon)?;
        }

        self.expect(Kind::RCurly)?;
        Ok(Block { elems, first_token })
    }

    fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        let first_token = self.expect(Kind::KwDef)?;
        let name_token = self.expect(Kind::Ident)?;
        let name = name_token.text().to_string();

        if self.check(Kind::Assign) {
            self.advance();
            let closure = self.parse_closure()?;
            return Ok(Declaration::Closure(ClosureDec {
                name,
                closure,
                first_token,
            }));
        }

        let var_type = self.parse_type_annotation(&name_token)?;
        Ok(Declaration::Var(VarDec {
            name,
            var_type,
            first_token,
        }))
    }

    /// Parse a closure literal: `{ args -> statements }`.
    pub(crate) fn parse_closure(&mut self) -> ParseResult<Closure> {
        let first_token = self.expect(Kind::LCurly)?;

        let mut formal_args = Vec::new();
        if self.check(Kind::Ident) {
            formal_args.push(self.parse_var_dec()?);
            while self.check(Kind::Comma) {
                self.advance();
                formal_args.push(self.parse_var_dec()?);
            }
        }
        self.expect(Kind::Arrow)?;

        let mut body = Vec::new();
        while !self.check(Kind::RCurly) {
            if let Some(statement) = self.parse_statement()? {
                body.push(statement);
            }
            self.expect(Kind::Semicolon)?;
        }
        self.expect(Kind::RCurly)?;

        Ok(Closure {
            formal_args,
            body,
            first_token,
        })
    }

    /// A formal argument: `name` or `name : type`.
    fn parse_var_dec(&mut self) -> ParseResult<VarDec> {
        let first_token = self.expect(Kind::Ident)?;
        let name = first_token.text().to_string();
        let var_type = self.parse_type_annotation(&first_token)?;

        Ok(VarDec {
            name,
            var_type,
            first_token,
        })
    }

    /// Optional `: type`. Without one the type is undeclared, anchored at the
    /// name it belongs to.
    fn parse_type_annotation(&mut self, name_token: &Token) -> ParseResult<Type> {
        if !self.check(Kind::Colon) {
            return Ok(Type::Undeclared {
                first_token: name_token.clone(),
            });
        }
        self.advance();
        self.parse_type()
    }

    /// Parse a type.
    pub fn parse_type(&mut self) -> ParseResult<Type> {
        self.nested(Self::parse_type_body)
    }

    fn parse_type_body(&mut self) -> ParseResult<Type> {
        if self.check_any(SIMPLE_TYPES) {
            return Ok(Type::Simple(self.parse_simple_type()?));
        }

        if !self.check(Kind::At) {
            return Err(SyntaxError::message(
                self.current.clone(),
                "expected a type",
            ));
        }

        let first_token = self.advance();
        if self.check(Kind::At) {
            self.advance();
            self.expect(Kind::LSquare)?;
            let key = self.parse_simple_type()?;
            self.expect(Kind::Colon)?;
            let value = self.parse_type()?;
            self.expect(Kind::RSquare)?;
            return Ok(Type::KeyValue {
                key,
                value: Box::new(value),
                first_token,
            });
        }

        if !self.check(Kind::LSquare) {
            return Err(SyntaxError::message(
                self.current.clone(),
                "expected a type",
            ));
        }
        self.advance();
        let element = self.parse_type()?;
        self.expect(Kind::RSquare)?;
        Ok(Type::List {
            element: Box::new(element),
            first_token,
        })
    }

    fn parse_simple_type(&mut self) -> ParseResult<SimpleType> {
        let first_token = self.expect_any(SIMPLE_TYPES)?;
        let kind = match first_token.kind {
            Kind::KwInt => SimpleKind::Int,
            Kind::KwBoolean => SimpleKind::Boolean,
            _ => SimpleKind::String,
        };
        Ok(SimpleType { kind, first_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_source;

    fn ty(source: &str) -> Type {
        Parser::from_source(source).parse_type().unwrap()
    }

    #[test]
    fn test_imports_are_slash_joined() {
        let program = parse_source("import a.b.c; import d; class A { }").unwrap();
        let names: Vec<&str> = program.imports.iter().map(|q| q.name.as_str()).collect();
        assert_eq!(names, vec!["a/b/c", "d"]);
        assert_eq!(program.imports[0].first_token.text(), "a");
        assert_eq!(program.first_token.kind, Kind::KwImport);
    }

    #[test]
    fn test_block_keeps_source_order() {
        let program = parse_source("class A { def x; x = 1; print x; }").unwrap();
        let elems = &program.block.elems;
        assert_eq!(elems.len(), 3);
        assert!(matches!(elems[0], BlockElem::Declaration(Declaration::Var(_))));
        assert!(matches!(elems[1], BlockElem::Statement(Statement::Assignment { .. })));
        assert!(matches!(elems[2], BlockElem::Statement(Statement::Print { .. })));
    }

    #[test]
    fn test_empty_statements_are_dropped() {
        let program = parse_source("class A { ; ; print 1; ; }").unwrap();
        assert_eq!(program.block.elems.len(), 1);
    }

    #[test]
    fn test_untyped_declaration_is_undeclared() {
        let program = parse_source("class A { def x; }").unwrap();
        match &program.block.elems[0] {
            BlockElem::Declaration(Declaration::Var(dec)) => {
                assert_eq!(dec.name, "x");
                assert_eq!(dec.first_token.kind, Kind::KwDef);
                match &dec.var_type {
                    Type::Undeclared { first_token } => assert_eq!(first_token.text(), "x"),
                    other => panic!("Expected undeclared type, got {:?}", other),
                }
            }
            other => panic!("Expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_closure_declaration() {
        let source = "class A { def f = { a, b : int -> return a + b; }; }";
        let program = parse_source(source).unwrap();
        match &program.block.elems[0] {
            BlockElem::Declaration(Declaration::Closure(dec)) => {
                assert_eq!(dec.name, "f");
                let args = &dec.closure.formal_args;
                assert_eq!(args.len(), 2);
                assert!(matches!(args[0].var_type, Type::Undeclared { .. }));
                assert!(matches!(
                    args[1].var_type,
                    Type::Simple(SimpleType { kind: SimpleKind::Int, .. })
                ));
                assert_eq!(dec.closure.body.len(), 1);
            }
            other => panic!("Expected closure declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_closure_without_arguments() {
        let mut parser = Parser::from_source("{ -> print 1; ; }");
        let closure = parser.parse_closure().unwrap();
        assert!(closure.formal_args.is_empty());
        assert_eq!(closure.body.len(), 1);
        assert_eq!(parser.current().kind, Kind::Eof);
    }

    #[test]
    fn test_closure_requires_arrow() {
        let err = Parser::from_source("{ a print a; }").parse_closure().unwrap_err();
        assert_eq!(err.expected_kinds(), &[Kind::Arrow]);
        assert_eq!(err.token().kind, Kind::KwPrint);
    }

    #[test]
    fn test_types() {
        assert!(matches!(
            ty("boolean"),
            Type::Simple(SimpleType { kind: SimpleKind::Boolean, .. })
        ));

        match ty("@[string]") {
            Type::List { element, first_token } => {
                assert_eq!(first_token.kind, Kind::At);
                assert!(matches!(
                    *element,
                    Type::Simple(SimpleType { kind: SimpleKind::String, .. })
                ));
            }
            other => panic!("Expected list type, got {:?}", other),
        }

        match ty("@@[int : @[boolean]]") {
            Type::KeyValue { key, value, .. } => {
                assert_eq!(key.kind, SimpleKind::Int);
                assert!(matches!(*value, Type::List { .. }));
            }
            other => panic!("Expected key-value type, got {:?}", other),
        }
    }

    #[test]
    fn test_key_must_be_simple() {
        let err = Parser::from_source("@@[@[int] : int]").parse_type().unwrap_err();
        assert_eq!(
            err.expected_kinds(),
            &[Kind::KwInt, Kind::KwBoolean, Kind::KwString]
        );
    }

    #[test]
    fn test_bad_type_message() {
        let err = Parser::from_source("x").parse_type().unwrap_err();
        assert!(matches!(err, SyntaxError::Message { ref message, .. } if message == "expected a type"));
    }

    #[test]
    fn test_single_at_needs_bracket() {
        let err = Parser::from_source("@int").parse_type().unwrap_err();
        assert!(matches!(err, SyntaxError::Message { ref message, .. } if message == "expected a type"));
        assert_eq!(err.token().kind, Kind::KwInt);
        assert_eq!(err.token().start, 1);
    }

    #[test]
    fn test_deep_list_type_is_rejected() {
        let source = format!("{}int{}", "@[".repeat(1_000), "]".repeat(1_000));
        let err = Parser::from_source(&source).parse_type().unwrap_err();
        assert!(matches!(err, SyntaxError::Message { ref message, .. } if message == "nesting too deep"));
    }

    #[test]
    fn test_deep_blocks_are_rejected() {
        let source = format!(
            "class A {{ {}{} }}",
            "while (x) { ".repeat(2_000),
            "}; ".repeat(2_000)
        );
        let err = parse_source(&source).unwrap_err();
        assert!(matches!(err, SyntaxError::Message { ref message, .. } if message == "nesting too deep"));
    }

    #[test]
    fn test_missing_class_keyword() {
        let err = parse_source("import a; A { }").unwrap_err();
        assert_eq!(err.expected_kinds(), &[Kind::KwClass]);
    }
}
