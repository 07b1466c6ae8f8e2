// ABOUTME: Tree-walking evaluator - recursive, depth-first, left-to-right

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::builtins;
use crate::env::Environment;
use crate::value::Value;
use std::rc::Rc;

pub fn eval_program(program: &Program, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for statement in &program.statements {
        result = eval_statement(statement, env);
        match result {
            Value::Return(payload) => return *payload,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block(block: &BlockStatement, env: &Rc<Environment>) -> Value {
    let mut result = Value::Null;
    for statement in &block.statements {
        result = eval_statement(statement, env);
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(statement: &Statement, env: &Rc<Environment>) -> Value {
    match statement {
        Statement::Let { name, value, .. } => {
            let evaluated = match value {
                Some(expr) => eval_expression(expr, env),
                None => Value::Null,
            };
            if evaluated.is_error() {
                return evaluated;
            }
            env.define(name.clone(), evaluated);
            Value::Null
        }
        Statement::Return { value, .. } => {
            let evaluated = match value {
                Some(expr) => eval_expression(expr, env),
                None => Value::Null,
            };
            if evaluated.is_error() {
                return evaluated;
            }
            Value::Return(Box::new(evaluated))
        }
        Statement::ExpressionStmt { expression, .. } => eval_expression(expression, env),
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expression(expression: &Expression, env: &Rc<Environment>) -> Value {
    match expression {
        Expression::Integer { value, .. } => Value::Integer(*value),
        Expression::Float { value, .. } => Value::Float(*value),
        Expression::Boolean { value, .. } => Value::Boolean(*value),
        Expression::StringLiteral { value, .. } => Value::String(value.clone()),
        Expression::Identifier { name, .. } => eval_identifier(name, env),
        Expression::Prefix {
            operator, right, ..
        } => {
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix(operator, &right)
        }
        Expression::Infix {
            left,
            operator,
            right,
            ..
        } => {
            let left = eval_expression(left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expression(right, env);
            if right.is_error() {
                return right;
            }
            eval_infix(operator, &left, &right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
            ..
        } => {
            let condition = eval_expression(condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Value::Null
            }
        }
        Expression::Function {
            name, params, body, ..
        } => {
            let function = Value::Function {
                params: params.clone(),
                body: Rc::new(body.clone()),
                env: Rc::clone(env),
            };
            if let Some(name) = name {
                env.define(name.clone(), function.clone());
            }
            function
        }
        Expression::Lambda { params, body, .. } => Value::Function {
            params: params.clone(),
            body: Rc::new(body.clone()),
            env: Rc::clone(env),
        },
        Expression::Call { callee, args, .. } => {
            let callee = eval_expression(callee, env);
            if callee.is_error() {
                return callee;
            }
            let mut evaluated_args = Vec::with_capacity(args.len());
            for arg in args {
                let value = eval_expression(arg, env);
                if value.is_error() {
                    return value;
                }
                evaluated_args.push(value);
            }
            apply_function(&callee, &evaluated_args)
        }
    }
}

fn eval_identifier(name: &str, env: &Rc<Environment>) -> Value {
    if let Some(value) = env.get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Value::Error(format!("Poseemos un problema, que es \"{name}\"?"))
}

fn eval_prefix(operator: &str, right: &Value) -> Value {
    match operator {
        "!" => match right {
            Value::Boolean(false) => Value::Boolean(true),
            _ => Value::Boolean(false),
        },
        "-" => match right {
            Value::Integer(n) => Value::Integer(-n),
            Value::Float(n) => Value::Float(-n),
            other => Value::Error(format!(
                "Poseemos un problema, no puedo operar -{}",
                other.type_name()
            )),
        },
        other => Value::Error(format!(
            "Poseemos un problema, no puedo operar {}{}",
            other,
            right.type_name()
        )),
    }
}

fn eval_infix(operator: &str, left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(operator, *l, *r),
        (Value::Float(l), Value::Float(r)) => eval_float_infix(operator, *l, *r),
        (Value::Integer(l), Value::Float(r)) => eval_float_infix(operator, *l as f64, *r),
        (Value::Float(l), Value::Integer(r)) => eval_float_infix(operator, *l, *r as f64),
        (Value::String(l), Value::String(r)) => eval_string_infix(operator, l, r),
        _ if left.type_name() == right.type_name() => match operator {
            "==" => Value::Boolean(left == right),
            "!=" => Value::Boolean(left != right),
            _ => Value::Error(format!(
                "Poseemos un problema, no puedo operar {} {} {}",
                left.type_name(),
                operator,
                right.type_name()
            )),
        },
        _ => Value::Error(format!(
            "Poseemos un problema, no puedo ejecutar {} {} {}",
            left.type_name(),
            operator,
            right.type_name()
        )),
    }
}

/// Floor division, rounding the quotient toward negative infinity. `None` on
/// division by zero.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    if b == 0 {
        return None;
    }
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

fn floor_mod(a: i64, b: i64) -> Option<i64> {
    floor_div(a, b).map(|q| a - q * b)
}

fn overflow_error(left: i64, operator: &str, right: i64) -> Value {
    Value::Error(format!(
        "Poseemos un problema, desbordamiento calculando {left} {operator} {right}"
    ))
}

fn division_by_zero_error() -> Value {
    Value::Error("Poseemos un problema, no puedo dividir entre cero".to_string())
}

fn eval_integer_infix(operator: &str, left: i64, right: i64) -> Value {
    match operator {
        "+" => left
            .checked_add(right)
            .map(Value::Integer)
            .unwrap_or_else(|| overflow_error(left, operator, right)),
        "-" => left
            .checked_sub(right)
            .map(Value::Integer)
            .unwrap_or_else(|| overflow_error(left, operator, right)),
        "*" => left
            .checked_mul(right)
            .map(Value::Integer)
            .unwrap_or_else(|| overflow_error(left, operator, right)),
        "/" => match floor_div(left, right) {
            Some(q) => Value::Integer(q),
            None => division_by_zero_error(),
        },
        "%" => match floor_mod(left, right) {
            Some(r) => Value::Integer(r),
            None => division_by_zero_error(),
        },
        "**" => {
            if right < 0 {
                Value::Error(format!(
                    "Poseemos un problema, no puedo operar INTEGER {operator} INTEGER"
                ))
            } else {
                match left.checked_pow(right as u32) {
                    Some(n) => Value::Integer(n),
                    None => overflow_error(left, operator, right),
                }
            }
        }
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "<=" => Value::Boolean(left <= right),
        ">=" => Value::Boolean(left >= right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!(
            "Poseemos un problema, no puedo operar INTEGER {operator} INTEGER"
        )),
    }
}

fn eval_float_infix(operator: &str, left: f64, right: f64) -> Value {
    match operator {
        "+" => Value::Float(left + right),
        "-" => Value::Float(left - right),
        "*" => Value::Float(left * right),
        "/" => Value::Float(left / right),
        "%" => Value::Float(left % right),
        "**" => Value::Float(left.powf(right)),
        "<" => Value::Boolean(left < right),
        ">" => Value::Boolean(left > right),
        "<=" => Value::Boolean(left <= right),
        ">=" => Value::Boolean(left >= right),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!(
            "Poseemos un problema, no puedo operar FLOAT {operator} FLOAT"
        )),
    }
}

fn eval_string_infix(operator: &str, left: &str, right: &str) -> Value {
    match operator {
        "+" => Value::String(format!("{left}{right}")),
        "==" => Value::Boolean(left == right),
        "!=" => Value::Boolean(left != right),
        _ => Value::Error(format!(
            "Poseemos un problema, no puedo operar STRING {operator} STRING"
        )),
    }
}

fn apply_function(callee: &Value, args: &[Value]) -> Value {
    match callee {
        Value::Builtin(func) => func(args),
        Value::Function { params, body, env } => {
            let call_env = Environment::with_parent(Rc::clone(env));
            for (param, arg) in params.iter().zip(args.iter()) {
                call_env.define(param.clone(), arg.clone());
            }
            let result = eval_block(body, &call_env);
            match result {
                Value::Return(payload) => *payload,
                other => other,
            }
        }
        other => Value::Error(format!(
            "Poseemos un problema, no es una funcion: {}",
            other.type_name()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn run(source: &str) -> Value {
        let (program, errors) = parse(source);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        let env = Environment::new();
        eval_program(&program, &env)
    }

    #[test]
    fn test_arithmetic_precedence() {
        assert_eq!(run("5 + 5 * 2;"), Value::Integer(15));
    }

    #[test]
    fn test_let_bindings_accumulate() {
        assert_eq!(
            run("variable a = 5; variable b = a; variable c = a + b + 5; c;"),
            Value::Integer(15)
        );
    }

    #[test]
    fn test_if_truthiness() {
        assert_eq!(
            run("si (1 < 2) { 10; } si_no { 20; }"),
            Value::Integer(10)
        );
        assert_eq!(
            run("si (1 > 2) { 10; } si_no { 20; }"),
            Value::Integer(20)
        );
        assert_eq!(run("si (1) { 10; }"), Value::Null);
    }

    #[test]
    fn test_function_call_and_closures() {
        assert_eq!(
            run("variable suma = procedimiento(x, y) { regresa x + y; }; suma(5 + 5, suma(10, 10));"),
            Value::Integer(30)
        );
    }

    #[test]
    fn test_string_concatenation() {
        assert_eq!(
            run(r#""Hello," + " " + "world!";"#),
            Value::String("Hello, world!".to_string())
        );
    }

    #[test]
    fn test_type_mismatch_error() {
        assert_eq!(
            run("5 + verdadero;"),
            Value::Error(
                "Poseemos un problema, no puedo ejecutar INTEGER + BOOLEAN".to_string()
            )
        );
    }

    #[test]
    fn test_unknown_identifier_error() {
        assert_eq!(
            run("foobar;"),
            Value::Error("Poseemos un problema, que es \"foobar\"?".to_string())
        );
    }

    #[test]
    fn test_builtin_longitud() {
        assert_eq!(run(r#"longitud("Hola mundo");"#), Value::Integer(10));
        assert_eq!(
            run("longitud(1);"),
            Value::Error("Poseemos un problema, no tengo soporte para INTEGER".to_string())
        );
    }

    #[test]
    fn test_return_unwraps_across_blocks() {
        assert_eq!(
            run("metodo f() { si (verdadero) { regresa 5; } regresa 10; } f();"),
            Value::Integer(5)
        );
    }

    #[test]
    fn test_closure_captures_defining_environment() {
        let source = "metodo hacerContador() { \
            variable contador = 0; \
            regresa procedimiento() { regresa contador; }; \
        } variable obtener = hacerContador(); obtener();";
        assert_eq!(run(source), Value::Integer(0));
    }

    #[test]
    fn test_recursion_via_named_function() {
        let source = "metodo factorial(n) { \
            si (n <= 1) { regresa 1; } \
            regresa n * factorial(n - 1); \
        } factorial(5);";
        assert_eq!(run(source), Value::Integer(120));
    }

    #[test]
    fn test_floor_division_rounds_toward_negative_infinity() {
        assert_eq!(run("-7 / 2;"), Value::Integer(-4));
    }

    #[test]
    fn test_user_binding_shadows_builtin() {
        assert_eq!(
            run("variable imprimir = 42; imprimir;"),
            Value::Integer(42)
        );
    }

    #[test]
    fn test_not_a_function_error() {
        assert_eq!(
            run("variable x = 5; x();"),
            Value::Error("Poseemos un problema, no es una funcion: INTEGER".to_string())
        );
    }

    #[test]
    fn test_let_without_initializer_binds_null() {
        assert_eq!(run("variable x; x;"), Value::Null);
    }

    #[test]
    fn test_bang_operator_is_only_true_for_false() {
        assert_eq!(run("!falso;"), Value::Boolean(true));
        assert_eq!(run("!verdadero;"), Value::Boolean(false));
        assert_eq!(run("variable n; !n;"), Value::Boolean(false));
        assert_eq!(run("!5;"), Value::Boolean(false));
        assert_eq!(run("!\"x\";"), Value::Boolean(false));
    }

    #[test]
    fn test_integer_division_by_zero_is_an_error() {
        assert_eq!(
            run("1 / 0;"),
            Value::Error("Poseemos un problema, no puedo dividir entre cero".to_string())
        );
        assert_eq!(
            run("1 % 0;"),
            Value::Error("Poseemos un problema, no puedo dividir entre cero".to_string())
        );
    }

    #[test]
    fn test_integer_overflow_is_an_error_not_a_panic() {
        assert!(run("9223372036854775807 + 1;").is_error());
        assert!(run("9223372036854775807 * 2;").is_error());
    }

    #[test]
    fn test_negative_integer_exponent_is_an_error() {
        assert!(run("2 ** -1;").is_error());
    }
}
