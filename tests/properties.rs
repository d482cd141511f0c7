use befunge::{Interpreter, MemoryConsole, Value};
use proptest::prelude::*;

/// Run `source` with `input` lines queued and return what it printed.
fn run(source: &str, input: &[String]) -> String {
    let mut vm = Interpreter::with_console(source, MemoryConsole::with_input(input.iter().cloned()));
    vm.execute().expect("program should halt");
    vm.into_console().take_output()
}

proptest! {
    #[test]
    fn addition_is_commutative(a in any::<Value>(), b in any::<Value>()) {
        let ab = run("&&+.@", &[a.to_string(), b.to_string()]);
        let ba = run("&&+.@", &[b.to_string(), a.to_string()]);
        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(ab, a.wrapping_add(b).to_string());
    }

    #[test]
    fn multiplication_is_commutative(a in any::<Value>(), b in any::<Value>()) {
        let ab = run("&&*.@", &[a.to_string(), b.to_string()]);
        let ba = run("&&*.@", &[b.to_string(), a.to_string()]);
        prop_assert_eq!(&ab, &ba);
        prop_assert_eq!(ab, a.wrapping_mul(b).to_string());
    }

    #[test]
    fn subtraction_takes_first_input_minus_second(a in any::<Value>(), b in any::<Value>()) {
        prop_assert_eq!(run("&&-.@", &[a.to_string(), b.to_string()]), a.wrapping_sub(b).to_string());
    }

    #[test]
    fn division_truncates_toward_zero(a in any::<Value>(), b in any::<Value>().prop_filter("nonzero", |b| *b != 0)) {
        prop_assert_eq!(run("&&/.@", &[a.to_string(), b.to_string()]), a.wrapping_div(b).to_string());
        prop_assert_eq!(run("&&%.@", &[a.to_string(), b.to_string()]), a.wrapping_rem(b).to_string());
    }

    #[test]
    fn greater_compares_second_popped_against_first(a in any::<Value>(), b in any::<Value>()) {
        let expected = if a > b { "1" } else { "0" };
        prop_assert_eq!(run("&&`.@", &[a.to_string(), b.to_string()]), expected);
    }

    #[test]
    fn string_mode_output_reverses_the_literal(text in "[a-zA-Z0-9 !?.,]{1,12}") {
        let commas = ",".repeat(text.chars().count());
        let source = format!("\"{text}\"{commas}@");
        let reversed: String = text.chars().rev().collect();
        prop_assert_eq!(run(&source, &[]), reversed);
    }

    #[test]
    fn put_then_get_round_trips_any_value(v in any::<Value>()) {
        // Store the input at (0, 1), fetch it back and print it.
        let source = "&01p01g.@\n ";
        prop_assert_eq!(run(source, &[v.to_string()]), v.to_string());
    }
}
