use jul::lang::source_buffer::SourceLocation;
use jul::runtime::data_structures::value::{ToValue, Value};
use jul::runtime::error::{ScriptError, StackError};
use jul::runtime::interpreter::jul_interpreter::JulInterpreter;
use jul::runtime::interpreter::line_io::MemoryIo;
use jul::runtime::interpreter::{CodeManagement, InterpreterConfig, InterpreterStack};
use std::cell::RefCell;
use std::rc::Rc;

fn interpreter_with_input(input: &str) -> (JulInterpreter, Rc<RefCell<String>>) {
    let io = MemoryIo::new(input);
    let output = io.output();
    let config = InterpreterConfig::default().with_seed(1).with_io(Box::new(io));

    (JulInterpreter::new(config).unwrap(), output)
}

fn run(code: &str) -> String {
    let (mut interpreter, output) = interpreter_with_input("");

    interpreter.execute_str(code).unwrap();

    let result = output.borrow().clone();
    result
}

#[test]
fn converts_adds_and_prints() {
    assert_eq!(run("\"3\" to-integer 4 add to-text print"), "7");
}

#[test]
fn recursive_words() {
    let code = "
        *factorial [
            dup 1 is-greater [dup decrement factorial multiply] [] if
        ] define

        10 factorial print
    ";

    assert_eq!(run(code), "3628800");
}

#[test]
fn loops_with_repeat() {
    let code = "[dup to-text \" \" add write 4 is-smaller] repeat";

    assert_eq!(run(code), "0 1 2 3 4 ");
}

#[test]
fn quotations_nest() {
    assert_eq!(run("[[1 2 add] do 3 multiply] do print"), "9");
}

#[test]
fn comments_and_escapes() {
    assert_eq!(
        run("( a (nested) comment ) \"tab\\there\\n\" write *done write"),
        "tab\there\ndone"
    );
}

#[test]
fn greets_with_input() {
    let (mut interpreter, output) = interpreter_with_input("World\n");

    interpreter
        .execute_str("\"Name? \" write ask \"Hello, \" swap add \"!\" add println")
        .unwrap();

    assert_eq!(*output.borrow(), "Name? Hello, World!\n");
}

#[test]
fn state_carries_over_between_inputs() {
    let (mut interpreter, output) = interpreter_with_input("");

    interpreter.execute_str("*double [2 multiply] define 21").unwrap();
    interpreter.execute_str("double print").unwrap();

    assert_eq!(*output.borrow(), "42");
    assert!(interpreter.stack().is_empty());
}

#[test]
fn new_words_shadow_nothing_but_are_callable_at_once() {
    let (mut interpreter, _) = interpreter_with_input("");

    interpreter
        .execute_str("*greeting [*hi] define greeting greeting")
        .unwrap();

    assert_eq!(
        interpreter.stack().iter().cloned().collect::<Vec<_>>(),
        vec!["hi".to_value(), "hi".to_value()]
    );
}

#[test]
fn errors_inside_words_carry_both_locations() {
    let (mut interpreter, _) = interpreter_with_input("");

    let Err(ScriptError::Runtime(error)) =
        interpreter.execute_str("*bad [1 drop drop] define\n  bad")
    else {
        panic!("expected a runtime error");
    };

    assert_eq!(error.location(), &SourceLocation::new_from_info(2, 3));
    assert_eq!(error.word(), Some("bad"));
    assert_eq!(
        error.to_string(),
        "(at 2:3) bad: (at 1:8) drop: stack underflow"
    );
    assert!(matches!(
        error.cause().root_cause(),
        ScriptError::Stack(StackError::Underflow)
    ));
}

#[test]
fn soft_parse_failures_can_be_checked() {
    let (mut interpreter, _) = interpreter_with_input("");

    interpreter.execute_str("*abc to-integer").unwrap();

    let Value::Text(message) = interpreter.pop().unwrap() else {
        panic!("expected the parse failure as text");
    };
    assert!(message.contains("abc"));
}

#[test]
fn timestamps_are_pushed_and_waited_for() {
    let (mut interpreter, _) = interpreter_with_input("");

    interpreter.execute_str("now 5 wait now").unwrap();

    let (Value::Timestamp(later), Value::Timestamp(earlier)) =
        (interpreter.pop().unwrap(), interpreter.pop().unwrap())
    else {
        panic!("expected two timestamps");
    };

    assert!(later - earlier >= chrono::TimeDelta::milliseconds(5));
}

#[test]
fn waiting_for_a_past_timestamp_returns_at_once() {
    let (mut interpreter, _) = interpreter_with_input("");

    interpreter.execute_str("now wait").unwrap();

    assert!(interpreter.stack().is_empty());
}
