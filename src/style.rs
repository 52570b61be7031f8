use slint::Color;

/// Colors used when rendering the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub node_fill: Color,
    pub node_title: Color,
    pub node_stroke: Color,
    pub selected_stroke: Color,
    pub input_connector: Color,
    pub output_connector: Color,
    pub connection: Color,
    pub drag_line: Color,
    pub sweep_line: Color,
    pub selection_stroke: Color,
    pub selection_fill: Color,
    pub line_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        let goldenrod = Color::from_rgb_u8(250, 250, 210);
        Self {
            background: Color::from_rgb_u8(0x2b, 0x2b, 0x2b),
            node_fill: Color::from_rgb_u8(72, 61, 139),
            node_title: Color::from_rgb_u8(255, 255, 255),
            node_stroke: Color::from_argb_u8(0, 0, 0, 0),
            selected_stroke: Color::from_rgb_u8(255, 255, 0),
            input_connector: Color::from_rgb_u8(0, 128, 0),
            output_connector: Color::from_rgb_u8(255, 165, 0),
            connection: Color::from_rgb_u8(211, 211, 211),
            drag_line: Color::from_rgb_u8(255, 255, 0),
            sweep_line: Color::from_rgb_u8(255, 0, 0),
            selection_stroke: goldenrod,
            selection_fill: goldenrod.with_alpha(0.3),
            line_width: 2.0,
        }
    }
}

impl Theme {
    pub fn node_stroke(&self, selected: bool) -> Color {
        if selected {
            self.selected_stroke
        } else {
            self.node_stroke
        }
    }
}
