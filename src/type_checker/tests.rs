//! Unit tests for the type checker.

use crate::{
    ast::{
        ast::{BinaryOperator, Stmt},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    symbol_table::symbol_table::resolve,
};

use super::type_checker::{binary_result_type, infer_types, type_check, TypedProgram};

fn check_source(source: &str) -> Result<TypedProgram, Error> {
    let program = parse(tokenize(source.to_string(), None).unwrap()).unwrap();
    type_check(resolve(program).unwrap())
}

/// Inferred type of the value stored by the last top-level statement.
fn last_value_type(program: &TypedProgram) -> Option<Type> {
    let value = match program.program().body.last()? {
        Stmt::Declaration(decl) => &decl.value,
        Stmt::Assignment(assignment) => &assignment.value,
        Stmt::Print(print) => &print.value,
        _ => return None,
    };

    program.inferred_type(value.id())
}

#[test]
fn test_literal_types() {
    for (source, expected) in [
        ("print 1;", Type::Int),
        ("print 1.5;", Type::Float),
        ("print true;", Type::Bool),
        ("print 'a';", Type::String),
    ] {
        let program = check_source(source).unwrap();
        assert_eq!(last_value_type(&program), Some(expected), "{}", source);
    }
}

#[test]
fn test_declaration_accepts_matching_type() {
    let program = check_source("var i:int = 0;").unwrap();

    assert_eq!(last_value_type(&program), Some(Type::Int));
}

#[test]
fn test_declaration_rejects_float_for_int() {
    let error = check_source("var i:int = 3.0;").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::DeclarationTypeMismatch { expected: Type::Int, received: Type::Float }
    );
    assert_eq!(error.get_position().0, 12);
}

#[test]
fn test_declaration_has_no_widening() {
    let error = check_source("var f:float = 1;").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::DeclarationTypeMismatch { expected: Type::Float, received: Type::Int }
    );
}

#[test]
fn test_assignment_type_mismatch() {
    let error = check_source("var s:string = 'a'; s = 1;").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::AssignmentTypeMismatch { expected: Type::String, received: Type::Int }
    );
}

#[test]
fn test_assignment_to_undeclared_variable() {
    let error = check_source("x = 1;").unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UndeclaredIdentifier { variable: "x".to_string() });
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_identifier_takes_declared_type() {
    let program = check_source("var f:float = 1.5; print f;").unwrap();

    assert_eq!(last_value_type(&program), Some(Type::Float));
}

#[test]
fn test_undeclared_identifier_in_condition() {
    let error = check_source("while i < 10 do i = i + 1; end").unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UndeclaredIdentifier { variable: "i".to_string() });
    assert_eq!(error.get_position().0, 6);
}

#[test]
fn test_inner_declaration_not_visible_outside() {
    let error = check_source("while true do var a:int = 1; end print a;").unwrap_err();

    assert_eq!(error.kind(), &ErrorImpl::UndeclaredIdentifier { variable: "a".to_string() });
}

#[test]
fn test_shadowed_variable_uses_inner_type() {
    let program = check_source("var a:int = 1; if true do var a:string = 'x'; a = 'y'; end").unwrap();

    let Stmt::If(if_stmt) = &program.program().body[1] else {
        panic!("expected an if statement");
    };
    let Stmt::Assignment(assignment) = &if_stmt.body[1] else {
        panic!("expected an assignment");
    };
    assert_eq!(program.inferred_type(assignment.value.id()), Some(Type::String));
}

#[test]
fn test_outer_variable_visible_in_else() {
    assert!(check_source("var n:int = 0; if n < 1 do n = 1; else n = 2; end").is_ok());
}

#[test]
fn test_conditions_are_not_required_to_be_bool() {
    assert!(check_source("while 1 do end if 'yes' do end").is_ok());
}

#[test]
fn test_string_concatenation_promotes() {
    let program = check_source("var s:string = 'hello' + 4;").unwrap();

    assert_eq!(last_value_type(&program), Some(Type::String));
}

#[test]
fn test_boolean_expression() {
    let program =
        check_source("var j:bool = false; var i:bool = true && false || (true || j);").unwrap();

    assert_eq!(last_value_type(&program), Some(Type::Bool));
}

#[test]
fn test_every_expression_node_is_typed() {
    let program = check_source("var x:int = 1; print 1 + 2 * x;").unwrap();
    let Stmt::Print(print) = &program.program().body[1] else {
        panic!("expected a print statement");
    };
    // 1, 2, x, 2 * x, 1 + 2 * x plus the initializer of x
    assert_eq!(program.types().len(), 6);
    assert_eq!(program.inferred_type(print.value.id()), Some(Type::Int));
}

#[test]
fn test_infer_types_is_idempotent() {
    let program = parse(tokenize("var a:float = 1.0 * 2.5; print a < 3;".to_string(), None).unwrap()).unwrap();
    let resolved = resolve(program).unwrap();

    let first = infer_types(&resolved).unwrap();
    let second = infer_types(&resolved).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_string_operators() {
    assert_eq!(binary_result_type(Type::String, Type::String, BinaryOperator::Add), Ok(Type::String));
    assert_eq!(binary_result_type(Type::Bool, Type::String, BinaryOperator::Add), Ok(Type::String));
    assert_eq!(
        binary_result_type(Type::String, Type::Int, BinaryOperator::Subtract),
        Err(ErrorImpl::UnsupportedOperator { operator: "-".to_string(), category: Type::String })
    );
    assert_eq!(
        binary_result_type(Type::String, Type::String, BinaryOperator::Equals),
        Err(ErrorImpl::UnsupportedOperator { operator: "==".to_string(), category: Type::String })
    );
}

#[test]
fn test_bool_operators() {
    for operator in [BinaryOperator::And, BinaryOperator::Or, BinaryOperator::Equals] {
        assert_eq!(binary_result_type(Type::Bool, Type::Bool, operator), Ok(Type::Bool));
    }

    assert_eq!(
        binary_result_type(Type::Bool, Type::Bool, BinaryOperator::NotEquals),
        Err(ErrorImpl::UnsupportedOperator { operator: "!=".to_string(), category: Type::Bool })
    );
    assert_eq!(
        binary_result_type(Type::Bool, Type::Int, BinaryOperator::And),
        Err(ErrorImpl::BooleanOperandMismatch { left: Type::Bool, right: Type::Int })
    );
    assert_eq!(
        binary_result_type(Type::Float, Type::Bool, BinaryOperator::Or),
        Err(ErrorImpl::BooleanOperandMismatch { left: Type::Float, right: Type::Bool })
    );
}

#[test]
fn test_numeric_operators() {
    assert_eq!(binary_result_type(Type::Int, Type::Int, BinaryOperator::Add), Ok(Type::Int));
    assert_eq!(binary_result_type(Type::Int, Type::Int, BinaryOperator::Modulo), Ok(Type::Int));
    assert_eq!(binary_result_type(Type::Int, Type::Float, BinaryOperator::Multiply), Ok(Type::Float));
    assert_eq!(binary_result_type(Type::Int, Type::Int, BinaryOperator::Less), Ok(Type::Bool));
    // A float operand wins over the comparison
    assert_eq!(binary_result_type(Type::Float, Type::Int, BinaryOperator::Less), Ok(Type::Float));

    for operator in [
        BinaryOperator::And,
        BinaryOperator::Or,
        BinaryOperator::Equals,
        BinaryOperator::NotEquals,
    ] {
        assert_eq!(
            binary_result_type(Type::Int, Type::Float, operator),
            Err(ErrorImpl::UnsupportedOperator {
                operator: operator.symbol().to_string(),
                category: Type::Int
            })
        );
    }
}

#[test]
fn test_operator_error_points_at_expression() {
    let error = check_source("print 1 == 2;").unwrap_err();

    assert_eq!(
        error.kind(),
        &ErrorImpl::UnsupportedOperator { operator: "==".to_string(), category: Type::Int }
    );
    assert_eq!(error.get_position().0, 6);
}
