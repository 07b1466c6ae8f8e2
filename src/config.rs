// ABOUTME: Version and REPL banner constants

pub const VERSION: &str = "1.0.0";
pub const WELCOME_MESSAGE: &str = "Kinp Interpreter v1.0";
pub const WELCOME_SUBTITLE: &str = "un interprete dinamico con palabras clave en espanol";
