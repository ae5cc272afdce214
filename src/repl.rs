use crate::interpreter::{Effect, Interpreter};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, Default)]
pub struct ReplOptions {
    /// Suppress the banner and the prompt.
    pub quiet: bool,
}

/// Interactive loop keeping one interpreter alive between lines.
pub fn start(options: ReplOptions) {
    if !options.quiet {
        println!("minibasic v{}", env!("CARGO_PKG_VERSION"));
        println!("Statements: LET <var> = <expr>, PRINT <value>[, <value>...]");
        println!("Type 'exit' or press Ctrl+D to quit");
        println!();
    }

    let mut interpreter = Interpreter::new();

    loop {
        if !options.quiet {
            print!("> ");
            if io::stdout().flush().is_err() {
                break;
            }
        }

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) => {
                // EOF reached (Ctrl+D or piped input ended)
                if !options.quiet {
                    println!();
                }
                break;
            }
            Ok(_) => {
                let line = line.trim_end_matches(['\r', '\n']);
                if line.trim().is_empty() {
                    continue;
                }
                if is_exit_command(line) {
                    if !options.quiet {
                        println!("Goodbye!");
                    }
                    break;
                }

                run_repl_command(line, &mut interpreter);
            }
            Err(error) => {
                eprintln!("Error reading input: {}", error);
                break;
            }
        }
    }
}

fn is_exit_command(line: &str) -> bool {
    let command = line.trim();
    command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit")
}

fn run_repl_command(source: &str, interpreter: &mut Interpreter) {
    match interpreter.parse_statement(source) {
        Ok(Effect::Print(text)) => println!("{}", text),
        Ok(Effect::Assign { .. }) => {}
        Err(error) => error.report(source, None, None),
    }
}
