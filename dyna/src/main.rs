use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use dyna::{base_bindings, read_eval, read_eval_all};
use dynalisp::Error;

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("dyna").join("history"))
}

fn repl() -> rustyline::Result<()> {
    let env = base_bindings();
    let mut rl = DefaultEditor::new()?;
    let history = history_path();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    println!("Dynalisp REPL - one expression per line");
    println!("For anything bigger, put it in a file and run: dyna yourcode.lisp");

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                match read_eval(&env, &line) {
                    Ok(value) => println!("{value}"),
                    // a blank line reads as "no sexp"; nothing to report
                    Err(Error::NoNextSexp) => {}
                    Err(err) => eprintln!("Err: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        }
    }

    if let Some(path) = &history {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let _ = rl.save_history(path);
    }
    Ok(())
}

fn run_file(path: &str) -> Result<(), Error> {
    debug!("running {path}");
    let contents = fs::read_to_string(path)?;

    let env = base_bindings();
    let result = read_eval_all(&env, &contents)?;
    println!("{result}");
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  dyna              Start interactive REPL");
    eprintln!("  dyna <file.lisp>  Run a Dynalisp file");
    eprintln!("  dyna --help       Show this help message");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.len() {
        1 => {
            if let Err(err) = repl() {
                eprintln!("{err}");
                process::exit(1);
            }
        }
        2 => {
            let arg = &args[1];
            if arg == "--help" || arg == "-h" {
                print_usage();
            } else if let Err(err) = run_file(arg) {
                eprintln!("{err}");
                process::exit(1);
            }
        }
        _ => {
            eprintln!("Error: Too many arguments");
            print_usage();
            process::exit(1);
        }
    }
}
