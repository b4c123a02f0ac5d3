//! Document surfaces touched by theme application
//!
//! [`Document`] is the write surface of the root element: its class list,
//! its `color-scheme` style and its inline CSS custom properties.
//! [`DisplayState`] is an owned in-memory implementation used by the CLI
//! (rendered as `<html>` attributes) and by tests.

use std::fmt::Write as _;

use crate::theme::ThemeMode;

/// Root-element surfaces a theme is applied to
pub trait Document {
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    fn set_color_scheme(&mut self, scheme: &str);
    fn set_property(&mut self, name: &str, value: &str);
    fn remove_property(&mut self, name: &str);
}

/// In-memory root element state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    classes: Vec<String>,
    color_scheme: Option<String>,
    properties: Vec<(String, String)>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Mode indicated by the class list, if exactly one mode class is set
    pub fn mode(&self) -> Option<ThemeMode> {
        let active: Vec<ThemeMode> = ThemeMode::all()
            .iter()
            .copied()
            .filter(|m| self.has_class(m.class_name()))
            .collect();
        match active.as_slice() {
            [mode] => Some(*mode),
            _ => None,
        }
    }

    /// Inline `style` attribute value
    pub fn style_attribute(&self) -> String {
        let mut out = String::new();
        if let Some(scheme) = &self.color_scheme {
            let _ = write!(out, "color-scheme: {scheme};");
        }
        for (name, value) in &self.properties {
            if !out.is_empty() {
                out.push(' ');
            }
            let _ = write!(out, "{name}: {value};");
        }
        out
    }

    /// Attributes of the root element, e.g. `class="dark" style="..."`
    pub fn to_html_attributes(&self) -> String {
        let mut attrs = Vec::new();
        if !self.classes.is_empty() {
            attrs.push(format!("class=\"{}\"", escape_attribute(&self.classes.join(" "))));
        }
        let style = self.style_attribute();
        if !style.is_empty() {
            attrs.push(format!("style=\"{}\"", escape_attribute(&style)));
        }
        attrs.join(" ")
    }
}

/// Escape a value for a double-quoted HTML attribute
pub(crate) fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

impl Document for DisplayState {
    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn set_color_scheme(&mut self, scheme: &str) {
        self.color_scheme = Some(scheme.to_string());
    }

    fn set_property(&mut self, name: &str, value: &str) {
        match self.properties.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.properties.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_property(&mut self, name: &str) {
        self.properties.retain(|(n, _)| n != name);
    }
}
