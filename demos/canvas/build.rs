fn main() {
    slint_build::compile("../../ui/canvas.slint").unwrap();
}
