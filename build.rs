fn main() {
    // For integration tests, compile the canvas UI
    let config = slint_build::CompilerConfiguration::default();
    slint_build::compile_with_config("tests/ui/test.slint", config).unwrap();
}
