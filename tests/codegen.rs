use std::fs;

use plzero::loader::{load_lexemes, load_source};
use plzero::model::{OpCode, Program};
use plzero::processor::symbol::SymbolKind;
use plzero::processor::{CodeGenError, CodeGenerator, GeneratorConfig, generate};
use plzero::writer::text;

fn compile_file(path: &str) -> Result<Program, CodeGenError> {
    let src = fs::read_to_string(path).unwrap();
    let tokens = load_source(&src).expect("lexes");
    generate(&tokens, &GeneratorConfig::default())
}

fn render(program: &Program) -> String {
    let mut buf = Vec::new();
    text::emit(program, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn compiles_constants_inline() {
    let program = compile_file("tests/programs/scenario1.pl0").expect("compiles");

    assert_eq!(program.last().unwrap().op, OpCode::Halt);
    assert_eq!(
        render(&program),
        "7 0 0 2\n6 0 0 1\n6 0 0 4\n1 0 0 5\n1 0 0 1\n13 0 0 0\n4 0 0 1\n3 0 0 1\n9 0 0 0\n2 0 0 0\n11 0 0 3\n"
    );
    // `a` is never loaded from memory
    let loads = program
        .instructions
        .iter()
        .filter(|i| i.op == OpCode::Lod)
        .count();
    assert_eq!(loads, 1);
}

#[test]
fn lexeme_list_and_source_agree() {
    let list = fs::read_to_string("tests/programs/scenario1.lex").unwrap();
    let tokens = load_lexemes(&list).unwrap();
    let from_list = generate(&tokens, &GeneratorConfig::default()).unwrap();
    let from_source = compile_file("tests/programs/scenario1.pl0").unwrap();
    assert_eq!(from_list, from_source);
}

#[test]
fn missing_var_semicolon_is_error_4() {
    let err = compile_file("tests/programs/missing_semicolon.pl0").unwrap_err();
    assert_eq!(err.code(), 4);
}

#[test]
fn scenario_error_codes() {
    let test_cases = vec![
        ("var x; begin call x end.", 17),
        ("if x then y := 1", 15),
        ("var x begin x := 1 end.", 4),
    ];

    for (src, code) in test_cases {
        let tokens = load_source(src).unwrap();
        let err = generate(&tokens, &GeneratorConfig::default()).unwrap_err();
        assert_eq!(err.code(), code, "{src}");
    }
}

#[test]
fn nested_procedures_use_their_own_locals() {
    let src = fs::read_to_string("tests/programs/nested.pl0").unwrap();
    let tokens = load_source(&src).unwrap();
    let (program, symbols) = CodeGenerator::new(&tokens, &GeneratorConfig::default())
        .generate_with_symbols()
        .unwrap();

    let locals: Vec<_> = symbols.iter().filter(|s| s.name == "n").collect();
    assert_eq!(locals.len(), 4);
    for (depth, sym) in locals.iter().enumerate() {
        assert_eq!(sym.level as usize, depth);
    }

    // Each literal store goes to the n of the block it appears in.
    let code = &program.instructions;
    for (value, sym) in (1..=4).rev().zip(locals.iter().rev()) {
        let SymbolKind::Var { address } = sym.kind else {
            panic!("n is a variable");
        };
        let at = code
            .iter()
            .position(|i| i.op == OpCode::Lit && i.m == value)
            .expect("literal emitted");
        assert_eq!(code[at + 1].op, OpCode::Sto);
        assert_eq!(code[at + 1].l, 0);
        assert_eq!(code[at + 1].m, address);
    }

    // Calls climb zero levels: each callee is declared in the caller's block.
    for ins in code.iter().filter(|i| i.op == OpCode::Cal) {
        assert_eq!(ins.l, 0);
        assert_eq!(code[ins.m as usize].op, OpCode::Jmp);
    }
}

#[test]
fn all_jumps_land_inside_the_program() {
    let program = compile_file("tests/programs/loops.pl0").unwrap();
    for (addr, ins) in program.instructions.iter().enumerate() {
        if ins.op.is_jump() {
            assert_ne!(ins.m, 0, "jump at {addr} still has its placeholder");
            assert!((ins.m as usize) < program.len(), "jump at {addr} out of range");
        }
    }
}

#[test]
fn recompiling_is_identical() {
    let first = render(&compile_file("tests/programs/loops.pl0").unwrap());
    let second = render(&compile_file("tests/programs/loops.pl0").unwrap());
    assert_eq!(first, second);
}

#[test]
#[should_panic(expected = "MAX_CODE_LENGTH")]
fn exceeding_capacity_aborts() {
    let src = fs::read_to_string("tests/programs/loops.pl0").unwrap();
    let tokens = load_source(&src).unwrap();
    let _ = generate(&tokens, &GeneratorConfig { max_code_length: 10 });
}

#[test]
fn unbounded_capacity_compiles_normally() {
    let tokens = load_source("var x; x := 1.").unwrap();
    let program = generate(
        &tokens,
        &GeneratorConfig {
            max_code_length: usize::MAX,
        },
    )
    .unwrap();
    assert_eq!(program.last().unwrap().op, OpCode::Halt);
}
