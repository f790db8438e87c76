//! Indented, one-node-per-line rendering of a parsed [`Program`].
//!
//! Each line carries the node label and the line its first token started on,
//! e.g. `  While* @4`. Used by `--ast` and the explorer's AST pane.

use crate::parser::ast::*;
use crate::parser::token::Token;

/// Render `program` as an outline, one node per line.
pub fn outline(program: &Program) -> Vec<String> {
    let mut out = Outline::new();
    out.emit_program(program);
    out.lines
}

/// Render a type the way it is written in source. Undeclared types print as `?`.
pub fn type_name(ty: &Type) -> String {
    match ty {
        Type::Simple(simple) => simple_name(simple.kind).to_string(),
        Type::List { element, .. } => format!("@[{}]", type_name(element)),
        Type::KeyValue { key, value, .. } => {
            format!("@@[{}:{}]", simple_name(key.kind), type_name(value))
        }
        Type::Undeclared { .. } => "?".to_string(),
    }
}

fn simple_name(kind: SimpleKind) -> &'static str {
    match kind {
        SimpleKind::Int => "int",
        SimpleKind::Boolean => "boolean",
        SimpleKind::String => "string",
    }
}

struct Outline {
    lines: Vec<String>,
    depth: usize,
}

impl Outline {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            depth: 0,
        }
    }

    fn line(&mut self, label: impl AsRef<str>, token: &Token) {
        self.lines.push(format!(
            "{}{} @{}",
            "  ".repeat(self.depth),
            label.as_ref(),
            token.line
        ));
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn emit_program(&mut self, program: &Program) {
        self.line(format!("Program {}", program.class_name), &program.first_token);
        self.nested(|out| {
            for import in &program.imports {
                out.line(format!("Import {}", import.name), &import.first_token);
            }
            out.emit_block(&program.block);
        });
    }

    fn emit_block(&mut self, block: &Block) {
        self.line("Block", &block.first_token);
        self.nested(|out| {
            for elem in &block.elems {
                match elem {
                    BlockElem::Declaration(declaration) => out.emit_declaration(declaration),
                    BlockElem::Statement(statement) => out.emit_statement(statement),
                }
            }
        });
    }

    fn emit_declaration(&mut self, declaration: &Declaration) {
        match declaration {
            Declaration::Var(dec) => self.emit_var_dec(dec),
            Declaration::Closure(dec) => {
                self.line(format!("ClosureDec {}", dec.name), &dec.first_token);
                self.nested(|out| out.emit_closure(&dec.closure));
            }
        }
    }

    fn emit_var_dec(&mut self, dec: &VarDec) {
        self.line(
            format!("VarDec {} : {}", dec.name, type_name(&dec.var_type)),
            &dec.first_token,
        );
    }

    fn emit_closure(&mut self, closure: &Closure) {
        self.line("Closure", &closure.first_token);
        self.nested(|out| {
            for arg in &closure.formal_args {
                out.emit_var_dec(arg);
            }
            for statement in &closure.body {
                out.emit_statement(statement);
            }
        });
    }

    fn emit_statement(&mut self, statement: &Statement) {
        let token = statement.first_token();
        match statement {
            Statement::Assignment { lvalue, expr, .. } => {
                self.line("Assignment", token);
                self.nested(|out| {
                    match lvalue {
                        LValue::Ident { name, first_token } => {
                            out.line(format!("LValue {}", name), first_token)
                        }
                        LValue::Indexed {
                            name,
                            index,
                            first_token,
                        } => {
                            out.line(format!("LValue {}[]", name), first_token);
                            out.nested(|out| out.emit_expression(index));
                        }
                    }
                    out.emit_expression(expr);
                });
            }
            Statement::Print { expr, .. } => {
                self.line("Print", token);
                self.nested(|out| out.emit_expression(expr));
            }
            Statement::Expression { expr, .. } => {
                self.line("ExpressionStatement", token);
                self.nested(|out| out.emit_expression(expr));
            }
            Statement::Return { expr, .. } => {
                self.line("Return", token);
                self.nested(|out| out.emit_expression(expr));
            }
            Statement::While {
                condition, block, ..
            } => self.emit_conditional("While", token, condition, block),
            Statement::WhileStar {
                condition, block, ..
            } => self.emit_conditional("While*", token, condition, block),
            Statement::If {
                condition, block, ..
            } => self.emit_conditional("If", token, condition, block),
            Statement::WhileRange { range, block, .. } => {
                self.line("WhileRange", token);
                self.nested(|out| {
                    out.emit_range(range);
                    out.emit_block(block);
                });
            }
            Statement::IfElse {
                condition,
                then_block,
                else_block,
                ..
            } => {
                self.line("IfElse", token);
                self.nested(|out| {
                    out.emit_expression(condition);
                    out.emit_block(then_block);
                    out.emit_block(else_block);
                });
            }
        }
    }

    fn emit_conditional(
        &mut self,
        label: &str,
        token: &Token,
        condition: &Expression,
        block: &Block,
    ) {
        self.line(label, token);
        self.nested(|out| {
            out.emit_expression(condition);
            out.emit_block(block);
        });
    }

    fn emit_range(&mut self, range: &RangeExpression) {
        self.line("Range", &range.first_token);
        self.nested(|out| {
            out.emit_expression(&range.low);
            out.emit_expression(&range.high);
        });
    }

    fn emit_expression(&mut self, expr: &Expression) {
        let token = expr.first_token();
        match expr {
            Expression::Binary {
                left, op, right, ..
            } => {
                self.line(format!("Binary {}", op.symbol()), token);
                self.nested(|out| {
                    out.emit_expression(left);
                    out.emit_expression(right);
                });
            }
            Expression::Unary { op, operand, .. } => {
                self.line(format!("Unary {}", op.symbol()), token);
                self.nested(|out| out.emit_expression(operand));
            }
            Expression::IntLit { value, .. } => self.line(format!("Int {}", value), token),
            Expression::BooleanLit { value, .. } => {
                self.line(format!("Boolean {}", value), token)
            }
            Expression::StringLit { value, .. } => {
                self.line(format!("String {:?}", value), token)
            }
            Expression::Ident { name, .. } => self.line(format!("Ident {}", name), token),
            Expression::IndexedAccess { name, index, .. } => {
                self.line(format!("Index {}", name), token);
                self.nested(|out| out.emit_expression(index));
            }
            Expression::ClosureEval { name, args, .. } => {
                self.line(format!("Call {}", name), token);
                self.nested(|out| {
                    for arg in args {
                        out.emit_expression(arg);
                    }
                });
            }
            Expression::ClosureLiteral { closure, .. } => self.emit_closure(closure),
            Expression::Size { expr, .. } => self.emit_builtin("Size", token, expr),
            Expression::Key { expr, .. } => self.emit_builtin("Key", token, expr),
            Expression::Value { expr, .. } => self.emit_builtin("Value", token, expr),
            Expression::List { elements, .. } => {
                self.line("List", token);
                self.nested(|out| {
                    for element in elements {
                        out.emit_expression(element);
                    }
                });
            }
            Expression::MapList { entries, .. } => {
                self.line("Map", token);
                self.nested(|out| {
                    for entry in entries {
                        out.line("Entry", &entry.first_token);
                        out.nested(|out| {
                            out.emit_expression(&entry.key);
                            out.emit_expression(&entry.value);
                        });
                    }
                });
            }
            Expression::Range(range) => self.emit_range(range),
        }
    }

    fn emit_builtin(&mut self, label: &str, token: &Token, expr: &Expression) {
        self.line(label, token);
        self.nested(|out| out.emit_expression(expr));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::parse_source;

    #[test]
    fn test_outline_shape() {
        let source = "import a.b;\nclass A {\n  def x : @[int];\n  x = 1 + 2;\n}";
        let program = parse_source(source).unwrap();
        assert_eq!(
            outline(&program),
            vec![
                "Program A @1",
                "  Import a/b @1",
                "  Block @2",
                "    VarDec x : @[int] @3",
                "    Assignment @4",
                "      LValue x @4",
                "      Binary + @4",
                "        Int 1 @4",
                "        Int 2 @4",
            ]
        );
    }

    #[test]
    fn test_while_range_outline() {
        let program = parse_source("class A { while* (1..n) { }; }").unwrap();
        let lines = outline(&program);
        assert_eq!(lines[2], "    WhileRange @1");
        assert_eq!(lines[3], "      Range @1");
        assert_eq!(lines[5], "        Ident n @1");
    }

    #[test]
    fn test_type_names() {
        let program = parse_source("class A { def m : @@[string : @[boolean]]; def u; }").unwrap();
        let names: Vec<String> = program
            .block
            .elems
            .iter()
            .filter_map(|elem| match elem {
                BlockElem::Declaration(Declaration::Var(dec)) => Some(type_name(&dec.var_type)),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["@@[string:@[boolean]]", "?"]);
    }
}
