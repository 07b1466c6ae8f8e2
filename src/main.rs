mod ast;
mod builtins;
mod config;
mod env;
mod eval;
mod lexer;
mod parser;
mod token;
mod value;

use clap::Parser as ClapParser;
use env::Environment;
use eval::eval_program;
use parser::parse;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::PathBuf;
use value::Value;

/// Kinp interpreter
#[derive(ClapParser, Debug)]
#[command(name = "kinp")]
#[command(version = config::VERSION)]
#[command(about = "Un interprete dinamico para el lenguaje Kinp")]
struct CliArgs {
    /// Archivo de script a ejecutar (opcional; si se omite, inicia el REPL)
    #[arg(value_name = "ARCHIVO")]
    script: Option<PathBuf>,
}

fn main() {
    let args = CliArgs::parse();

    match args.script {
        Some(path) => run_script(&path),
        None => run_repl(),
    }
}

/// Executes a single file and exits. A missing file is reported with the
/// published message and the process exits cleanly rather than with an error
/// status.
fn run_script(path: &PathBuf) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(_) => {
            println!(
                "Poseemos un problema, no se encontro el archivo {}",
                path.display()
            );
            return;
        }
    };

    let (program, errors) = parse(&contents);
    if !errors.is_empty() {
        for error in &errors {
            println!("{error}");
        }
        return;
    }

    let env = Environment::new();
    let result = eval_program(&program, &env);
    if let Value::Error(_) = result {
        println!("{result}");
    }
}

/// Interactive read-evaluate-print loop. Each accepted line is appended to a
/// running buffer; the whole buffer is re-parsed and re-evaluated from a
/// fresh environment every turn, so `variable` bindings persist across lines
/// purely through that re-evaluation. Lines that fail to parse are not added
/// to the buffer.
fn run_repl() {
    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);

    let config = Config::builder().auto_add_history(true).build();
    let mut editor = match DefaultEditor::with_config(config) {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("No se pudo iniciar el REPL: {err}");
            return;
        }
    };

    let history_file = ".kinp_history";
    let _ = editor.load_history(history_file);

    let mut buffer = String::new();

    loop {
        match editor.readline("-> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "salir()" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let candidate = format!("{buffer} {line}");
                let (program, errors) = parse(&candidate);
                if !errors.is_empty() {
                    for error in &errors {
                        println!("{error}");
                    }
                    continue;
                }

                buffer = candidate;
                let env = Environment::new();
                let result = eval_program(&program, &env);
                if let Value::Error(_) = result {
                    println!("{result}");
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {err}");
                break;
            }
        }
    }

    let _ = editor.save_history(history_file);
}
