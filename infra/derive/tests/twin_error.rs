#[test]
fn twin_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/twin_error_pass.rs");
    t.pass("tests/ui/twin_error_result_alias.rs");
}
