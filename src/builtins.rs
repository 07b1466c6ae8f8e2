// ABOUTME: Fixed built-in function registry, consulted when identifier lookup misses the environment chain

use crate::value::Value;
use std::io::{self, Write};

fn wrong_arity(expected: usize, got: usize) -> Value {
    Value::Error(format!(
        "Poseemos un problema, numero incorrecto de argumentos, se requeria {expected}, pero se recibio {got}"
    ))
}

fn unsupported_type(value: &Value) -> Value {
    Value::Error(format!(
        "Poseemos un problema, no tengo soporte para {}",
        value.type_name()
    ))
}

fn longitud(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::String(s) => Value::Integer(s.chars().count() as i64),
        other => unsupported_type(other),
    }
}

fn imprimir(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    println!("{}", args[0]);
    Value::Null
}

fn recibir(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    let prompt = match &args[0] {
        Value::String(s) => s.clone(),
        other => return unsupported_type(other),
    };
    print!("{prompt}");
    if io::stdout().flush().is_err() {
        return Value::Error("Poseemos un problema, no se pudo escribir en la salida".to_string());
    }
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(_) => Value::String(line.trim_end_matches(['\n', '\r']).to_string()),
        Err(_) => Value::Error("Poseemos un problema, no se pudo leer la entrada".to_string()),
    }
}

fn parsear_a_entero(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::String(s) => match s.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            Err(_) => Value::Error(format!(
                "Poseemos un problema, no se ha podido parsear {s} como entero"
            )),
        },
        Value::Boolean(b) => Value::Integer(if *b { 1 } else { 0 }),
        other => unsupported_type(other),
    }
}

fn parsear_a_texto(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::Integer(_) | Value::String(_) | Value::Boolean(_) => {
            Value::String(args[0].to_string())
        }
        other => unsupported_type(other),
    }
}

fn parsear_a_booleano(args: &[Value]) -> Value {
    if args.len() != 1 {
        return wrong_arity(1, args.len());
    }
    match &args[0] {
        Value::Integer(n) => Value::Boolean(*n == 1),
        other => unsupported_type(other),
    }
}

/// Resolves a built-in by name, or `None` if `name` names no built-in.
pub fn lookup(name: &str) -> Option<Value> {
    let func = match name {
        "longitud" => longitud,
        "imprimir" => imprimir,
        "recibir" => recibir,
        "parsearAentero" => parsear_a_entero,
        "parsearAtexto" => parsear_a_texto,
        "parsearAbooleano" => parsear_a_booleano,
        _ => return None,
    };
    Some(Value::Builtin(func))
}
