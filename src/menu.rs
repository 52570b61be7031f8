//! Context menus that open on right-click and/or a keyboard chord.
//!
//! A [`MenuHandler`] is attached to one target (the canvas, or nodes) and is
//! fed that target's pointer and key events. It tracks whether the pointer is
//! over the target, where it last moved and which keys are held, and shows
//! its [`ContextMenu`] when the configured trigger fires.
//!
//! # Example
//!
//! ```
//! use node_canvas::menu::{ContextMenu, MenuHandler, MenuItem};
//! use node_canvas::geometry::Point;
//! use slint::platform::Key;
//!
//! let menu = ContextMenu::new(vec![MenuItem::new("Add Node", "add")]);
//! let mut handler = MenuHandler::builder(menu)
//!     .required_keys([char::from(Key::Shift), 'a'])
//!     .build();
//!
//! handler.pointer_entered();
//! handler.pointer_moved(Point::new(40.0, 50.0));
//! handler.key_pressed(char::from(Key::Shift));
//! handler.key_pressed('A');
//!
//! assert!(handler.menu().is_showing());
//! assert_eq!(handler.activate(0), Some("add"));
//! ```

use crate::error::EditorError;
use crate::geometry::Point;
use log::trace;
use slint::platform::Key;
use std::collections::HashSet;

/// One entry of a context menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem<A> {
    pub label: String,
    pub action: A,
}

impl<A> MenuItem<A> {
    pub fn new(label: impl Into<String>, action: A) -> Self {
        Self { label: label.into(), action }
    }
}

/// A popup list of actions, shown at a screen position.
#[derive(Debug, Clone)]
pub struct ContextMenu<A> {
    items: Vec<MenuItem<A>>,
    showing: bool,
    position: Point,
    auto_hide: bool,
}

impl<A: Clone> ContextMenu<A> {
    pub fn new(items: Vec<MenuItem<A>>) -> Self {
        Self {
            items,
            showing: false,
            position: Point::default(),
            auto_hide: true,
        }
    }

    pub fn items(&self) -> &[MenuItem<A>] {
        &self.items
    }

    pub fn is_showing(&self) -> bool {
        self.showing
    }

    pub fn auto_hide(&self) -> bool {
        self.auto_hide
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn show(&mut self, at: Point) {
        self.position = at;
        self.showing = true;
    }

    pub fn hide(&mut self) {
        self.showing = false;
    }

    /// Pick an item of a showing menu. The menu closes either way.
    pub fn activate(&mut self, index: usize) -> Option<A> {
        if !self.showing {
            return None;
        }
        self.showing = false;
        self.items.get(index).map(|item| item.action.clone())
    }
}

/// Attaches a [`ContextMenu`] to a target and decides when to open it.
#[derive(Debug, Clone)]
pub struct MenuHandler<A> {
    menu: ContextMenu<A>,
    required_keys: HashSet<char>,
    pressed_keys: HashSet<char>,
    mouse_over: bool,
    last_mouse: Point,
    use_right_click: bool,
    use_keys: bool,
}

impl<A: Clone> MenuHandler<A> {
    pub fn builder(menu: ContextMenu<A>) -> MenuHandlerBuilder<A> {
        MenuHandlerBuilder {
            menu,
            required_keys: HashSet::new(),
            use_right_click: false,
            use_keys: true,
        }
    }

    pub fn menu(&self) -> &ContextMenu<A> {
        &self.menu
    }

    pub fn menu_mut(&mut self) -> &mut ContextMenu<A> {
        &mut self.menu
    }

    pub fn is_mouse_over(&self) -> bool {
        self.mouse_over
    }

    /// Last pointer position seen over the target.
    pub fn last_mouse(&self) -> Point {
        self.last_mouse
    }

    pub fn pointer_entered(&mut self) {
        self.mouse_over = true;
    }

    pub fn pointer_exited(&mut self) {
        self.mouse_over = false;
    }

    pub fn pointer_moved(&mut self, p: Point) {
        self.last_mouse = p;
    }

    /// Secondary-button click on the target. Returns whether it was consumed.
    pub fn secondary_clicked(&mut self, p: Point) -> bool {
        if !self.use_right_click {
            return false;
        }
        self.last_mouse = p;
        if !self.menu.is_showing() {
            self.menu.show(p);
        }
        true
    }

    /// Returns `true` if this press opened the menu.
    pub fn key_pressed(&mut self, key: char) -> bool {
        if !self.use_keys {
            return false;
        }
        self.pressed_keys.insert(normalize_key(key));

        let chord_held = !self.required_keys.is_empty()
            && self.required_keys.is_subset(&self.pressed_keys);
        if self.mouse_over && chord_held && !self.menu.is_showing() {
            trace!("menu chord triggered at {:?}", self.last_mouse);
            self.menu.show(self.last_mouse);
            return true;
        }
        false
    }

    pub fn key_released(&mut self, key: char) {
        if self.use_keys {
            self.pressed_keys.remove(&normalize_key(key));
        }
    }

    /// Forget every held key, e.g. after focus loss.
    pub fn release_all_keys(&mut self) {
        self.pressed_keys.clear();
    }

    pub fn hide(&mut self) {
        self.menu.hide();
    }

    pub fn activate(&mut self, index: usize) -> Option<A> {
        self.menu.activate(index)
    }
}

pub struct MenuHandlerBuilder<A> {
    menu: ContextMenu<A>,
    required_keys: HashSet<char>,
    use_right_click: bool,
    use_keys: bool,
}

impl<A: Clone> MenuHandlerBuilder<A> {
    /// Keys that must all be held, with the pointer over the target, to
    /// open the menu. Empty by default, which disables the chord.
    pub fn required_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.required_keys = keys.into_iter().map(normalize_key).collect();
        self
    }

    pub fn use_right_click(mut self, use_right_click: bool) -> Self {
        self.use_right_click = use_right_click;
        self
    }

    pub fn use_keys(mut self, use_keys: bool) -> Self {
        self.use_keys = use_keys;
        self
    }

    pub fn build(self) -> MenuHandler<A> {
        MenuHandler {
            menu: self.menu,
            required_keys: self.required_keys,
            pressed_keys: HashSet::new(),
            mouse_over: false,
            last_mouse: Point::default(),
            use_right_click: self.use_right_click,
            use_keys: self.use_keys,
        }
    }
}

/// Letters compare case-insensitively so Shift+A matches `a`.
pub fn normalize_key(key: char) -> char {
    key.to_lowercase().next().unwrap_or(key)
}

/// First character of a key event's text, as delivered by Slint.
pub fn key_from_text(text: &str) -> Option<char> {
    text.chars().next()
}

/// Parse a human-readable key name such as `"shift"` or `"a"`.
pub fn parse_key_name(name: &str) -> Result<char, EditorError> {
    let key = match name.to_ascii_lowercase().as_str() {
        "shift" => Key::Shift.into(),
        "ctrl" | "control" => Key::Control.into(),
        "alt" => Key::Alt.into(),
        "meta" | "super" => Key::Meta.into(),
        "delete" => Key::Delete.into(),
        "backspace" => Key::Backspace.into(),
        "escape" | "esc" => Key::Escape.into(),
        "tab" => Key::Tab.into(),
        "enter" | "return" => Key::Return.into(),
        "space" => ' ',
        _ => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(EditorError::UnknownKey(name.to_owned())),
            }
        }
    };
    Ok(normalize_key(key))
}
