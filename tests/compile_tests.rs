//! End-to-end compilation: source text in, target source out.

use indium::compile::{compile, CompileError};

fn compile_ok(source: &str) -> String {
    match compile(source) {
        Ok(target) => target,
        Err(e) => panic!("compilation failed: {}", e),
    }
}

#[test]
fn compile_empty_package() {
    let target = compile_ok("package main\n");
    assert_eq!(target, "package main\n");
}

#[test]
fn compile_integer_binding() {
    let target = compile_ok("package main\nlet x = 42;\n");
    assert!(target.starts_with("package main\n"));
    assert!(target.contains("var x = 42"));
}

#[test]
fn compile_string_binding() {
    let target = compile_ok("package main\nlet s = \"hi\";\n");
    assert!(target.contains("var s = \"hi\""));
}

#[test]
fn compile_binding_uses_prelude() {
    let target = compile_ok("package main\nlet x = add 1 2;\n");
    assert!(target.contains("var x = add(1)(2)"));
}

#[test]
fn compile_later_bindings_see_earlier_ones() {
    let target = compile_ok("package main\nlet x = 42;\nlet y = add x 1;\n");
    assert!(target.contains("var x = 42"));
    assert!(target.contains("var y = add(x)(1)"));
}

#[test]
fn compile_block_with_lambda_binding() {
    // the lambda's parameter is pinned to int by `add`, so the block emits
    // as an immediately-invoked closure with concrete types throughout
    let target = compile_ok("package main\nlet y = { let f = x -> add x 1; f 41 };\n");
    assert!(target.contains("var y = func() int {"));
    assert!(target.contains("var f = func(x int) int { return add(x)(1) }"));
    assert!(target.contains("return f(41)"));
}

#[test]
fn compile_tuple_binding() {
    let target = compile_ok("package main\nlet pair = (1, \"two\");\n");
    assert!(target.contains("var pair = struct{_0 int; _1 string}{_0: 1, _1: \"two\"}"));
}

#[test]
fn compile_type_alias() {
    let target = compile_ok("package main\ntype age = int;\n");
    assert!(target.contains("type age int"));
}

#[test]
fn compile_parse_failure() {
    let result = compile("package main\nlet x = ;\n");
    assert!(matches!(result, Err(CompileError::Parse(_))));
}

#[test]
fn compile_inference_failure() {
    let result = compile("package main\nlet x = add \"one\" 2;\n");
    assert!(matches!(result, Err(CompileError::Infer(_))));
}

#[test]
fn compile_unknown_identifier_failure() {
    let result = compile("package main\nlet x = mystery;\n");
    let Err(CompileError::Infer(e)) = result else {
        panic!("expected an inference failure");
    };
    assert_eq!(e.to_string(), "unknown identifier: 'mystery'");
}

#[test]
fn compile_full_program_shape() {
    let target = compile_ok(
        "package demo\n\
         type age = int;\n\
         let base = 40;\n\
         let total = add base 2;\n",
    );
    let wanted = "package demo\n\
                  \ntype age int\n\
                  \nvar base = 40\n\
                  \nvar total = add(base)(2)\n";
    assert_eq!(target, wanted);
}

#[test]
fn compile_uses_print_int_prelude() {
    let target = compile_ok("package main\nlet out = PrintInt 42;\n");
    assert!(target.contains("var out = PrintInt(42)"));
}

#[test]
fn compile_stops_at_first_failure() {
    // the second binding fails before the third is ever looked at
    let result = compile(
        "package main\n\
         let x = 1;\n\
         let y = add x \"two\";\n\
         let z = mystery;\n",
    );
    let Err(CompileError::Infer(e)) = result else {
        panic!("expected an inference failure");
    };
    assert!(e.to_string().starts_with("mismatched types"));
}

#[test]
fn compile_generic_binding_failure() {
    // the identity lambda never gets a concrete type, and the target
    // language has no generics
    let result = compile("package main\nlet id = x -> x;\n");
    assert!(matches!(result, Err(CompileError::Codegen(_))));
}
