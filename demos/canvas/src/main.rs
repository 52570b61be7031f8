use anyhow::Context;
use log::{info, warn};
use node_canvas::{ConnectorRef, EditorConfig, NodeEditor, Overlay, RenderedLine, RenderedNode};
use slint::{ComponentHandle, ModelRc, SharedString, VecModel};
use std::rc::Rc;

slint::include_modules!();

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "NODE_CANVAS_CONFIG";

fn load_config() -> EditorConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return EditorConfig::default();
    };
    match EditorConfig::load(&path) {
        Ok(config) => {
            info!("loaded config from {}", path);
            config
        }
        Err(err) => {
            warn!("falling back to default config: {}", err);
            EditorConfig::default()
        }
    }
}

fn node_view(n: &RenderedNode) -> NodeView {
    NodeView {
        id: n.id,
        title: n.title.clone(),
        x: n.x,
        y: n.y,
        width: n.width,
        height: n.height,
        fill: n.fill,
        stroke: n.stroke,
        title_color: n.title_color,
        input_x: n.input.x,
        input_y: n.input.y,
        input_width: n.input.width,
        input_height: n.input.height,
        input_color: n.input.color,
        output_x: n.output.x,
        output_y: n.output.y,
        output_width: n.output.width,
        output_height: n.output.height,
        output_color: n.output.color,
    }
}

fn line_view(l: &RenderedLine) -> LineView {
    LineView {
        id: l.id,
        commands: l.commands.clone(),
        color: l.color,
        width: l.width,
    }
}

fn apply_overlay(w: &MainWindow, overlay: &Overlay) {
    w.set_canvas_background(overlay.background);
    w.set_selection_stroke(overlay.selection_stroke);
    w.set_selection_fill(overlay.selection_fill);
    if let Some(rect) = overlay.selection_box {
        w.set_selection_x(rect.x);
        w.set_selection_y(rect.y);
        w.set_selection_width(rect.width);
        w.set_selection_height(rect.height);
    }
    w.set_selection_visible(overlay.selection_box.is_some());
    w.set_menu_visible(overlay.menu.visible);
    w.set_menu_x(overlay.menu.x);
    w.set_menu_y(overlay.menu.y);
    let labels: Vec<SharedString> = overlay.menu.labels.clone();
    w.set_menu_labels(ModelRc::from(Rc::new(VecModel::from(labels))));
    w.set_cursor_shape(overlay.cursor.index());
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let editor = NodeEditor::with_config(load_config()).context("invalid editor config")?;
    let window = MainWindow::new().context("failed to create window")?;
    let w = window.as_weak();

    // A starting pair so the canvas is not empty
    let a = editor.add_node(100.0, 100.0);
    let b = editor.add_node(400.0, 200.0);
    editor.connect(ConnectorRef::output(a), ConnectorRef::input(b))?;

    let nodes = Rc::new(VecModel::<NodeView>::default());
    window.set_nodes(ModelRc::from(nodes.clone()));
    editor.bind_nodes(nodes, node_view);

    let lines = Rc::new(VecModel::<LineView>::default());
    window.set_lines(ModelRc::from(lines.clone()));
    editor.bind_lines(lines, line_view);

    editor.bind_overlay({
        let w = w.clone();
        move |overlay| {
            if let Some(w) = w.upgrade() {
                apply_overlay(&w, overlay);
            }
        }
    });

    window.on_pointer_down({
        let editor = editor.clone();
        move |button, x, y, shift| {
            editor.pointer_pressed(x, y, button, shift);
        }
    });
    window.on_pointer_up({
        let editor = editor.clone();
        move |button, x, y| {
            editor.pointer_released(x, y, button);
        }
    });
    window.on_pointer_move({
        let editor = editor.clone();
        move |x, y| {
            editor.pointer_moved(x, y);
        }
    });
    window.on_pointer_enter({
        let editor = editor.clone();
        move || editor.pointer_entered()
    });
    window.on_pointer_exit({
        let editor = editor.clone();
        move || editor.pointer_exited()
    });
    window.on_scrolled({
        let editor = editor.clone();
        move |x, y, delta_y| {
            editor.scrolled(x, y, delta_y);
        }
    });
    window.on_key_down({
        let editor = editor.clone();
        move |text| editor.key_pressed(&text)
    });
    window.on_key_up({
        let editor = editor.clone();
        move |text| editor.key_released(&text)
    });
    window.on_focus_lost({
        let editor = editor.clone();
        move || editor.focus_lost()
    });
    window.on_menu_item_activated({
        let editor = editor.clone();
        move |index| {
            if let Ok(index) = usize::try_from(index) {
                editor.activate_menu_item(index);
            }
        }
    });

    // The toolbar button drops new nodes at a fixed spot below it
    window.on_add_node_clicked({
        let editor = editor.clone();
        move || {
            editor.add_node_at_screen(20.0, 60.0);
        }
    });

    window.run()?;
    Ok(())
}
