// Integration tests for the Quill parser

use quill::parser::ast::*;
use quill::parser::{parse_source, Kind, Parser, SyntaxError};

fn program(source: &str) -> Program {
    parse_source(source).unwrap_or_else(|e| panic!("Parsing failed: {}", e))
}

fn only_statement(source: &str) -> Statement {
    let wrapped = format!("class T {{ {}; }}", source);
    let mut program = program(&wrapped);
    assert_eq!(program.block.elems.len(), 1);
    match program.block.elems.remove(0) {
        BlockElem::Statement(statement) => statement,
        other => panic!("Expected statement, got {:?}", other),
    }
}

fn print_expr(source: &str) -> Expression {
    match only_statement(&format!("print {}", source)) {
        Statement::Print { expr, .. } => expr,
        other => panic!("Expected print, got {:?}", other),
    }
}

fn int(e: &Expression) -> i32 {
    match e {
        Expression::IntLit { value, .. } => *value,
        other => panic!("Expected int literal, got {:?}", other),
    }
}

#[test]
fn test_full_program() {
    let source = r#"
        import util.lists;
        import io;
        class Main {
            def count : int;
            def names : @[string];
            def ages : @@[string : int];
            def add = { a : int, b : int -> return a + b; };
            count = 0;
            names = @["ann", "bob"];
            ages = @@["ann" : 31, "bob" : 27];
            while* (0..size(names)) { print names[0]; };
            while (count < 10) { count = count + 1; };
            if (count == 10) { print "done"; } else { print "?"; };
            %add(1, 2);
        }
    "#;

    let program = program(source);
    assert_eq!(program.class_name, "Main");
    assert_eq!(program.imports.len(), 2);
    assert_eq!(program.imports[0].name, "util/lists");

    let elems = &program.block.elems;
    assert_eq!(elems.len(), 11);
    assert!(matches!(elems[3], BlockElem::Declaration(Declaration::Closure(_))));
    assert!(matches!(elems[7], BlockElem::Statement(Statement::WhileRange { .. })));
    assert!(matches!(elems[8], BlockElem::Statement(Statement::While { .. })));
    assert!(matches!(elems[9], BlockElem::Statement(Statement::IfElse { .. })));
    assert!(matches!(elems[10], BlockElem::Statement(Statement::Expression { .. })));
}

#[test]
fn test_precedence() {
    match print_expr("1 + 2 * 3") {
        Expression::Binary {
            op: BinOp::Add,
            left,
            right,
            ..
        } => {
            assert_eq!(int(&left), 1);
            match *right {
                Expression::Binary {
                    op: BinOp::Mul,
                    left,
                    right,
                    ..
                } => {
                    assert_eq!(int(&left), 2);
                    assert_eq!(int(&right), 3);
                }
                other => panic!("Expected product, got {:?}", other),
            }
        }
        other => panic!("Expected sum, got {:?}", other),
    }

    match print_expr("1 * 2 + 3") {
        Expression::Binary {
            op: BinOp::Add,
            left,
            right,
            ..
        } => {
            assert!(matches!(*left, Expression::Binary { op: BinOp::Mul, .. }));
            assert_eq!(int(&right), 3);
        }
        other => panic!("Expected sum, got {:?}", other),
    }
}

#[test]
fn test_relational_is_loosest() {
    match print_expr("a + 1 < b & c") {
        Expression::Binary {
            op: BinOp::And,
            left,
            ..
        } => {
            assert!(matches!(*left, Expression::Binary { op: BinOp::Lt, .. }));
        }
        other => panic!("Expected conjunction, got {:?}", other),
    }
}

#[test]
fn test_while_star_range() {
    match only_statement("while* (1..5) { }") {
        Statement::WhileRange { range, block, .. } => {
            assert_eq!(int(&range.low), 1);
            assert_eq!(int(&range.high), 5);
            assert!(block.elems.is_empty());
        }
        other => panic!("Expected range loop, got {:?}", other),
    }
}

#[test]
fn test_range_rejected_outside_while_star() {
    for source in [
        "class T { if (1..5) { }; }",
        "class T { while (1..5) { }; }",
        "class T { print 1..5; }",
        "class T { while* ((1..5)) { }; }",
        "class T { while* (1..2..3) { }; }",
    ] {
        let err = parse_source(source).unwrap_err();
        assert_eq!(err.token().kind, Kind::Range, "{}", source);
    }
}

#[test]
fn test_list_and_map_literals() {
    match print_expr("@[1,2,3]") {
        Expression::List { elements, .. } => {
            let values: Vec<i32> = elements.iter().map(int).collect();
            assert_eq!(values, vec![1, 2, 3]);
        }
        other => panic!("Expected list, got {:?}", other),
    }

    match print_expr("@@[1:2, 3:4]") {
        Expression::MapList { entries, .. } => {
            let pairs: Vec<(i32, i32)> = entries
                .iter()
                .map(|kv| (int(&kv.key), int(&kv.value)))
                .collect();
            assert_eq!(pairs, vec![(1, 2), (3, 4)]);
        }
        other => panic!("Expected map, got {:?}", other),
    }

    assert!(matches!(print_expr("@[]"), Expression::List { ref elements, .. } if elements.is_empty()));
    assert!(matches!(print_expr("@@[]"), Expression::MapList { ref entries, .. } if entries.is_empty()));
}

#[test]
fn test_string_literal_value() {
    match print_expr(r#""say \"hi\"\n""#) {
        Expression::StringLit { value, .. } => assert_eq!(value, "say \"hi\"\n"),
        other => panic!("Expected string, got {:?}", other),
    }
}

#[test]
fn test_closure_literal_as_argument() {
    match print_expr("map(xs, { x -> return x * 2; })") {
        Expression::ClosureEval { name, args, .. } => {
            assert_eq!(name, "map");
            assert_eq!(args.len(), 2);
            assert!(matches!(args[1], Expression::ClosureLiteral { .. }));
        }
        other => panic!("Expected call, got {:?}", other),
    }
}

#[test]
fn test_first_tokens_point_at_production_start() {
    let program = program("class T {\n  x = -y;\n}");
    let statement = match &program.block.elems[0] {
        BlockElem::Statement(statement) => statement,
        other => panic!("Expected statement, got {:?}", other),
    };
    assert_eq!(statement.first_token().text(), "x");
    assert_eq!(statement.first_token().line, 2);
    match statement {
        Statement::Assignment { expr, .. } => {
            assert_eq!(expr.first_token().kind, Kind::Minus);
            assert_eq!(expr.first_token().start, 16);
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_first_error_wins() {
    let source = "class T {\n  print 1;\n  x = ];\n  y = ];\n}";
    let mut parser = Parser::from_source(source);
    assert!(parser.parse().is_none());
    assert_eq!(parser.errors().len(), 1);

    let err = &parser.errors()[0];
    assert_eq!(err.token().kind, Kind::RSquare);
    assert_eq!(err.token().line, 3);
    assert!(matches!(err, SyntaxError::Message { .. }));
}

#[test]
fn test_missing_semicolon_expects_semicolon() {
    let err = parse_source("class T { print 1 print 2; }").unwrap_err();
    assert_eq!(err.expected_kinds(), &[Kind::Semicolon]);
    assert_eq!(err.token().kind, Kind::KwPrint);
    assert_eq!(err.token().start, 18);
}

#[test]
fn test_lexical_errors_surface_as_syntax_errors() {
    let err = parse_source("class T { x = 1 # 2; }").unwrap_err();
    assert_eq!(err.token().kind, Kind::IllegalChar);

    let err = parse_source("class T { print \"open; }").unwrap_err();
    assert_eq!(err.token().kind, Kind::UnterminatedString);

    let err = parse_source("class T { /* open }").unwrap_err();
    assert_eq!(err.token().kind, Kind::UnterminatedComment);
}

#[test]
fn test_premature_end_of_input() {
    let err = parse_source("class T { print 1;").unwrap_err();
    assert_eq!(err.token().kind, Kind::Eof);
}

#[test]
fn test_int_literal_out_of_range() {
    assert_eq!(int(&print_expr("2147483647")), i32::MAX);
    let err = parse_source("class T { print 2147483648; }").unwrap_err();
    assert!(matches!(err, SyntaxError::Message { .. }));
    assert_eq!(err.token().text(), "2147483648");
}

#[test]
fn test_public_productions() {
    let mut parser = Parser::from_source("@@[string : @[int]]");
    assert!(matches!(parser.parse_type().unwrap(), Type::KeyValue { .. }));

    let mut parser = Parser::from_source("key(m) + value(m)");
    assert!(matches!(
        parser.parse_expression().unwrap(),
        Expression::Binary { op: BinOp::Add, .. }
    ));

    let mut parser = Parser::from_source("");
    assert!(parser.parse_statement().unwrap().is_none());
}

#[test]
fn test_demo_program_parses() {
    let program = program(include_str!("../demos/closures.quill"));
    assert_eq!(program.class_name, "Demo");
    assert_eq!(program.imports[0].name, "util/lists");
    assert_eq!(program.block.elems.len(), 11);
}

fn nesting_error(source: &str) -> SyntaxError {
    let err = parse_source(source).unwrap_err();
    assert!(
        matches!(err, SyntaxError::Message { ref message, .. } if message == "nesting too deep"),
        "unexpected error: {}",
        err
    );
    err
}

#[test]
fn test_deeply_nested_parentheses_are_rejected() {
    let depth = 10_000;
    let source = format!(
        "class A {{ print {}1{}; }}",
        "(".repeat(depth),
        ")".repeat(depth)
    );
    let err = nesting_error(&source);
    assert_eq!(err.token().kind, Kind::LParen);
    assert_eq!(err.token().line, 1);
}

#[test]
fn test_deeply_nested_collections_and_closures_are_rejected() {
    let list = format!("class A {{ x = {}1{}; }}", "@[".repeat(3_000), "]".repeat(3_000));
    nesting_error(&list);

    let map = format!("class A {{ x = {}1{}; }}", "@@[1 : ".repeat(3_000), "]".repeat(3_000));
    nesting_error(&map);

    let closures = format!(
        "class A {{ print {}1{}; }}",
        "{ -> print ".repeat(3_000),
        "; }".repeat(3_000)
    );
    nesting_error(&closures);

    let calls = format!("class A {{ print {}1{}; }}", "f(".repeat(3_000), ")".repeat(3_000));
    nesting_error(&calls);
}

#[test]
fn test_reasonable_nesting_still_parses() {
    let mut e = print_expr(&format!("{}7{}", "(".repeat(50), ")".repeat(50)));
    assert_eq!(int(&e), 7);

    e = print_expr(&format!("{}1", "!-".repeat(20)));
    assert!(matches!(e, Expression::Unary { op: UnOp::Not, .. }));

    let source = format!(
        "class A {{ {}{} }}",
        "if (x) { ".repeat(30),
        "}; ".repeat(30)
    );
    assert_eq!(program(&source).block.elems.len(), 1);
}
