//! Chat markup helpers
//!
//! Menus are sent as roll-template text with inline button links; the GM
//! stat block is plain HTML.

use crate::domain::value_objects::{CharacterId, HandoutId};

/// Command prefix re-invoked by menu buttons
pub const COMMAND_PREFIX: &str = "!cosh";

/// Line separator inside a template description
pub const LINE_BREAK: &str = "\n\r";

/// Die glyph shown on a roll button next to a handout link
pub const ROLL_GLYPH: &str = "🎲";

const HANDOUT_URL: &str = "http://journal.roll20.net/handout/";

const FLAT_BUTTON: &[(&str, &str)] = &[
    ("border", "none"),
    ("border-radius", "3px"),
    ("background-color", "#3452eb"),
    ("padding", "3px"),
    ("margin", "2px"),
    ("color", "#fff"),
    ("font-size", "1em"),
    ("font-weight", "bold"),
];

/// Inline CSS declarations
pub fn style(declarations: &[(&str, &str)]) -> String {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}:{value};"))
        .collect()
}

/// An HTML element; `None` content produces a self-closing tag
pub fn element(tag: &str, content: Option<&str>, attributes: &[(&str, &str)]) -> String {
    let mut html = format!("<{tag}");
    for (name, value) in attributes {
        html.push_str(&format!(" {name}=\"{value}\""));
    }
    match content {
        Some(content) => html.push_str(&format!(">{content}</{tag}>")),
        None => html.push_str(" />"),
    }
    html
}

/// A styled chat button. The host wraps the link target in quotes, so the
/// style attribute is smuggled in after the target and closed by the host.
pub fn button(label: &str, target: &str) -> String {
    format!("[{label}]({target}\" style=\"{})", style(FLAT_BUTTON))
}

/// Target rolling a character's attribute or ability
pub fn roll_target(character_id: &CharacterId, roll: &str) -> String {
    format!("~{character_id}|{roll}")
}

/// Inline reference to a character attribute, resolved by the host
pub fn attribute_ref(character_name: &str, attribute: &str) -> String {
    format!("@{{{character_name}|{attribute}}}")
}

/// Inline ability call (`%{name|roll}`), rolled by the host on send
pub fn ability_call(character_name: &str, roll: &str) -> String {
    format!("%{{{character_name}|{roll}}}")
}

/// Link to a journal handout, numbered when `sequence > 0`
pub fn handout_link(label: &str, sequence: u8, handout: &HandoutId) -> String {
    format!("[{}]({HANDOUT_URL}{handout})", numbered(label, sequence))
}

/// `"n. label"`, or just the label for sequence 0
pub fn numbered(label: &str, sequence: u8) -> String {
    if sequence > 0 {
        format!("{sequence}. {label}")
    } else {
        label.to_string()
    }
}

/// The outer `co1` roll template wrapping every menu
#[derive(Debug, Clone)]
pub struct MenuTemplate {
    pub perso: String,
    pub subtags: String,
    pub name: String,
}

impl MenuTemplate {
    pub fn new(perso: impl Into<String>, subtags: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            perso: perso.into(),
            subtags: subtags.into(),
            name: name.into(),
        }
    }

    pub fn wrap(&self, body: &str) -> String {
        format!(
            "&{{template:co1}} {{{{perso={}}}}} {{{{subtags={}}}}} {{{{name={}}}}} {{{{desc={body} }}}}",
            self.perso, self.subtags, self.name
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_wrap() {
        let template = MenuTemplate::new("Zora", "Combat", "Attaques");
        assert_eq!(
            template.wrap("x"),
            "&{template:co1} {{perso=Zora}} {{subtags=Combat}} {{name=Attaques}} {{desc=x }}"
        );
    }

    #[test]
    fn test_button_smuggles_style_after_target() {
        let b = button("Épée", "~-C1|jet_for");
        assert!(b.starts_with("[Épée](~-C1|jet_for\" style=\"border:none;"));
        assert!(b.ends_with("font-weight:bold;)"));
    }

    #[test]
    fn test_references() {
        assert_eq!(attribute_ref("Zora", "PROFIL"), "@{Zora|PROFIL}");
        assert_eq!(ability_call("Zora", "repeating_armes_$0_pjatk"), "%{Zora|repeating_armes_$0_pjatk}");
        assert_eq!(roll_target(&CharacterId::new("-C1"), "jet_dex"), "~-C1|jet_dex");
    }

    #[test]
    fn test_element_and_handout_link() {
        assert_eq!(element("br", None, &[]), "<br />");
        assert_eq!(
            element("div", Some("Zora"), &[("style", "color:white;")]),
            "<div style=\"color:white;\">Zora</div>"
        );
        assert_eq!(
            handout_link("Manoeuvre", 1, &HandoutId::new("-H9")),
            "[1. Manoeuvre](http://journal.roll20.net/handout/-H9)"
        );
    }
}
