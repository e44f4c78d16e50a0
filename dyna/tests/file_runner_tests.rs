use std::fs;
use std::path::PathBuf;
use std::process::Command;

// Path to the dyna binary built alongside the tests
fn dyna_binary() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // workspace root
    path.push("target");
    path.push("debug");
    path.push("dyna");
    path
}

fn temp_lisp_file(content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("dyna_test_{}.lisp", rand::random::<u32>()));
    fs::write(&path, content).expect("failed to write temp file");
    path
}

// Run a source file through the binary and capture stdout
fn run_lisp_file(content: &str) -> Result<String, String> {
    let file_path = temp_lisp_file(content);

    let output = Command::new(dyna_binary())
        .arg(&file_path)
        .output()
        .map_err(|e| e.to_string())?;

    fs::remove_file(&file_path).ok();

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

#[test]
fn test_last_expression_is_printed() {
    let result = run_lisp_file(
        r#"
(cons 1 2)
(cons 3 4)
(cons 5 6)
"#,
    );
    assert_eq!(result.unwrap(), "(5 . 6)");
}

#[test]
fn test_define_carries_across_expressions() {
    let result = run_lisp_file(
        r#"
(define double (lambda (x) (+ x x)))
(double 111)
"#,
    );
    assert_eq!(result.unwrap(), "222");
}

#[test]
fn test_comments_and_paren_heavy_strings() {
    let result = run_lisp_file(
        r#"
; a comment with (parens) in it
(print "hello (world)")
(cons 1 2)
"#,
    );
    let output = result.unwrap();
    assert!(output.contains("\"hello (world)\""));
    assert!(output.ends_with("(1 . 2)"));
}

#[test]
fn test_load_chains_files() {
    let library = temp_lisp_file("(define tripled (lambda (x) (+ x x x)))");
    let program = format!(
        r#"(load "{}")
(tripled 14)"#,
        library.display()
    );

    let result = run_lisp_file(&program);
    fs::remove_file(&library).ok();
    assert_eq!(result.unwrap(), "42");
}

#[test]
fn test_reader_error_fails_the_run() {
    let result = run_lisp_file("(()");
    assert!(result.is_err());
}

#[test]
fn test_undefined_symbol_fails_the_run() {
    let result = run_lisp_file("(this-was-never-defined)");
    assert!(result.is_err());
}
