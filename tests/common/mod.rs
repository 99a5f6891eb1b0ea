use hazel::{execute, Execution};

pub fn run(source: &str) -> Execution {
    execute(source)
}

/// Runs a program expected to load and produce no runtime faults.
pub fn output_of(source: &str) -> Vec<String> {
    let result = execute(source);
    assert!(
        result.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        result.diagnostics
    );
    result.output
}

