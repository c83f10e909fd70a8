//! Unit tests for the preprocessor.

use super::*;
use crate::lexer::Lexer;
use crate::source::SourceMap;
use crate::token::TokenKind;

/// Lexes `input` as an in-memory file and preprocesses it.
fn preprocess_source(input: &str) -> Vec<Token> {
    let mut sources = SourceMap::new();
    let file = sources.add("test.c", input);
    let tokens = Lexer::new(input, file).tokenize().expect("lex failed");
    preprocess(tokens, &mut sources).expect("preprocess failed")
}

fn preprocess_error_of(input: &str) -> PreprocessError {
    let mut sources = SourceMap::new();
    let file = sources.add("test.c", input);
    let tokens = Lexer::new(input, file).tokenize().expect("lex failed");
    match preprocess(tokens, &mut sources) {
        Ok(_) => panic!("expected preprocessing to fail for {:?}", input),
        Err(e) => e,
    }
}

fn texts(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .map(|t| match &t.kind {
            TokenKind::Punct(s) | TokenKind::Ident(s) => s.clone(),
            TokenKind::Num(n) => n.to_string(),
            TokenKind::Str(_) => "<str>".to_string(),
            TokenKind::Eof => "<eof>".to_string(),
        })
        .collect()
}

#[test]
fn test_stream_without_directives_is_unchanged() {
    let tokens = preprocess_source("int main() { return 0; }");
    assert_eq!(
        texts(&tokens),
        vec!["int", "main", "(", ")", "{", "return", "0", ";", "}", "<eof>"]
    );
}

#[test]
fn test_define_and_expand() {
    let tokens = preprocess_source("#define N 3\nint x; x = N;");
    assert_eq!(
        texts(&tokens),
        vec!["int", "x", ";", "x", "=", "3", ";", "<eof>"]
    );
}

#[test]
fn test_macro_body_is_rest_of_line() {
    let tokens = preprocess_source("#define PAIR 1 + 2\nPAIR;");
    assert_eq!(texts(&tokens), vec!["1", "+", "2", ";", "<eof>"]);
}

#[test]
fn test_empty_macro_body() {
    let tokens = preprocess_source("#define NOTHING\nNOTHING 7;");
    assert_eq!(texts(&tokens), vec!["7", ";", "<eof>"]);
}

#[test]
fn test_expansion_is_not_rescanned() {
    // A expands to B; the produced B is not expanded again.
    let tokens = preprocess_source("#define A B\n#define B 1\nA");
    assert_eq!(texts(&tokens), vec!["B", "<eof>"]);
}

#[test]
fn test_macro_defined_after_use_does_not_apply() {
    let tokens = preprocess_source("X\n#define X 1\nX");
    assert_eq!(texts(&tokens), vec!["X", "1", "<eof>"]);
}

#[test]
fn test_redefinition_replaces_body() {
    let tokens = preprocess_source("#define N 1\n#define N 2\nN");
    assert_eq!(texts(&tokens), vec!["2", "<eof>"]);
}

#[test]
fn test_keywords_are_not_macro_candidates() {
    // Only identifiers expand; `return` stays a keyword even if a macro
    // with that spelling can never be defined through the grammar.
    let tokens = preprocess_source("#define ret 1\nreturn ret;");
    assert_eq!(texts(&tokens), vec!["return", "1", ";", "<eof>"]);
}

#[test]
fn test_null_directive_is_dropped() {
    let tokens = preprocess_source("#\nint x;");
    assert_eq!(texts(&tokens), vec!["int", "x", ";", "<eof>"]);
}

#[test]
fn test_hash_mid_line_is_not_a_directive() {
    // A `#` that does not start its line flows through to the parser.
    let tokens = preprocess_source("x #");
    assert_eq!(texts(&tokens), vec!["x", "#", "<eof>"]);
}

#[test]
fn test_invalid_directive_is_an_error() {
    let error = preprocess_error_of("#pragma once\n");
    assert!(error.message.contains("invalid preprocessor directive"));
}

#[test]
fn test_define_without_name_is_an_error() {
    let error = preprocess_error_of("#define 1 2\n");
    assert!(error.message.contains("expected an identifier"));
}

#[test]
fn test_include_without_string_is_an_error() {
    let error = preprocess_error_of("#include x\n");
    assert!(error.message.contains("expected a string literal"));
}

#[test]
fn test_missing_include_file_is_an_error() {
    let error = preprocess_error_of("#include \"no-such-file-mincc.h\"\n");
    assert!(error.message.contains("cannot open included file"));
}

#[test]
fn test_include_splices_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let header = dir.path().join("def.h");
    std::fs::write(&header, "int shared;\n").expect("write header");
    let main_path = dir.path().join("main.c");
    let main_src = "#include \"def.h\"\nint x;\n";
    std::fs::write(&main_path, main_src).expect("write main");

    let mut sources = SourceMap::new();
    let file = sources.load(&main_path).expect("load");
    let text = sources.file(file).text.clone();
    let tokens = Lexer::new(&text, file).tokenize().expect("lex");
    let tokens = preprocess(tokens, &mut sources).expect("preprocess");

    assert_eq!(
        texts(&tokens),
        vec!["int", "shared", ";", "int", "x", ";", "<eof>"]
    );
    // The header was registered in the source map for diagnostics.
    assert_eq!(sources.len(), 2);
}

#[test]
fn test_include_macro_visibility_and_nesting() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("inner.h"), "#define VALUE 42\n").expect("write");
    std::fs::write(dir.path().join("outer.h"), "#include \"inner.h\"\n").expect("write");
    let main_path = dir.path().join("main.c");
    std::fs::write(&main_path, "#include \"outer.h\"\nint x; x = VALUE;\n").expect("write");

    let mut sources = SourceMap::new();
    let file = sources.load(&main_path).expect("load");
    let text = sources.file(file).text.clone();
    let tokens = Lexer::new(&text, file).tokenize().expect("lex");
    let tokens = preprocess(tokens, &mut sources).expect("preprocess");

    assert_eq!(
        texts(&tokens),
        vec!["int", "x", ";", "x", "=", "42", ";", "<eof>"]
    );
}

#[test]
fn test_include_cycle_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("loop.h");
    std::fs::write(&path, "#include \"loop.h\"\n").expect("write");

    let mut sources = SourceMap::new();
    let file = sources.load(&path).expect("load");
    let text = sources.file(file).text.clone();
    let tokens = Lexer::new(&text, file).tokenize().expect("lex");
    let error = preprocess(tokens, &mut sources).expect_err("cycle must error");
    assert!(error.message.contains("nested too deeply"));
}

#[test]
fn test_extra_tokens_after_include_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("h.h"), "int a;\n").expect("write");
    let main_path = dir.path().join("main.c");
    std::fs::write(&main_path, "#include \"h.h\" junk junk\nint b;\n").expect("write");

    let mut sources = SourceMap::new();
    let file = sources.load(&main_path).expect("load");
    let text = sources.file(file).text.clone();
    let tokens = Lexer::new(&text, file).tokenize().expect("lex");
    let tokens = preprocess(tokens, &mut sources).expect("preprocess");
    assert_eq!(texts(&tokens), vec!["int", "a", ";", "int", "b", ";", "<eof>"]);
}
