//! Pre-paint bootstrap script generation
//!
//! Renders a self-contained JavaScript unit that runs synchronously in the
//! document head, before any stylesheet-dependent paint. It performs the
//! same resolution as [`crate::resolver`] against `localStorage` and the
//! `prefers-color-scheme` media query, then the same writes as
//! [`crate::applicator::ThemeApplicator`].
//!
//! The script logic lives in one template. Every key name, default id,
//! class name, variable name and the theme data itself is filled in from the
//! Rust constants the native code path uses. Any failure inside the script
//! is swallowed so the page falls back to the static stylesheet.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::ser::SerializeMap;

use crate::document::escape_attribute;
use crate::registry::ThemeRegistry;
use crate::store::{CODE_BG_VAR, CODE_FONT_SIZE_VAR, CODE_FONT_VAR, PrefKey};
use crate::theme::{ThemeColors, ThemeDefinition, ThemeMode};

/// Bootstrap template; `{{name}}` placeholders are JSON literals
const SCRIPT_TEMPLATE: &str = r#"(function(){try{
var d=document.documentElement,s=window.localStorage;
var themes={{themes}},keys={{keys}},fallback={{default_id}};
var classes={{mode_classes}},schemes={{color_schemes}},opposite={{opposite_modes}},code={{code_vars}};
var has=function(o,k){return Object.prototype.hasOwnProperty.call(o,k)};
var get=function(k){var v=s.getItem(k);return v?v:null};
var id=get({{color_theme_key}});
if(!id){
var dark=!!(window.matchMedia&&window.matchMedia("(prefers-color-scheme: dark)").matches);
id=dark?(get({{dark_theme_key}})||{{default_dark}}):(get({{light_theme_key}})||{{default_light}});
s.setItem({{color_theme_key}},id);
}
if(!has(themes,fallback))return;
if(!has(themes,id))id=fallback;
var t=themes[id];
if(id===fallback){keys.forEach(function(k){d.style.removeProperty(k)})}
else{keys.forEach(function(k){if(has(t.colors,k))d.style.setProperty(k,t.colors[k])})}
d.classList.add(classes[t.mode]);
d.classList.remove(classes[opposite[t.mode]]);
d.style.colorScheme=schemes[t.mode];
s.setItem({{mode_key}},t.mode);
try{
var p=JSON.parse(get({{code_prefs_key}}));
if(p){
var z=p.fontSize;
if(typeof p.bg==="string"&&p.bg)d.style.setProperty(code.bg,p.bg);
if(typeof p.font==="string"&&p.font)d.style.setProperty(code.font,p.font);
if((typeof z==="number"||typeof z==="string")&&z)d.style.setProperty(code.fontSize,z+"px");
}
}catch(e){}
}catch(e){}})();"#;

/// Behaviorally relevant part of a theme; display metadata is left out
#[derive(Serialize)]
struct ScriptTheme<'a> {
    mode: ThemeMode,
    colors: &'a ThemeColors,
}

/// Catalog as an id-keyed object, in catalog order
struct ScriptThemes<'a>(&'a [ThemeDefinition]);

impl Serialize for ScriptThemes<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for theme in self.0 {
            map.serialize_entry(
                &theme.id,
                &ScriptTheme {
                    mode: theme.mode,
                    colors: &theme.colors,
                },
            )?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct CodeVars {
    bg: &'static str,
    font: &'static str,
    #[serde(rename = "fontSize")]
    font_size: &'static str,
}

/// Generates the inline bootstrap unit for a catalog
#[derive(Debug, Clone, Copy)]
pub struct BootstrapScriptGenerator<'r> {
    registry: &'r ThemeRegistry,
}

impl<'r> BootstrapScriptGenerator<'r> {
    pub fn new(registry: &'r ThemeRegistry) -> Self {
        Self { registry }
    }

    /// The bare script text
    pub fn generate(&self) -> Result<String> {
        render_template(SCRIPT_TEMPLATE, &self.variables()?)
    }

    /// The script wrapped in a `<script>` element for the document head
    pub fn generate_tag(&self, nonce: Option<&str>) -> Result<String> {
        let script = self.generate()?;
        Ok(match nonce {
            Some(nonce) => format!("<script nonce=\"{}\">{}</script>", escape_attribute(nonce), script),
            None => format!("<script>{}</script>", script),
        })
    }

    fn variables(&self) -> Result<Vec<(&'static str, String)>> {
        let registry = self.registry;
        let modes = ThemeMode::all();

        let mode_classes: Vec<(&str, &str)> =
            modes.iter().map(|m| (m.as_str(), m.class_name())).collect();
        let color_schemes: Vec<(&str, &str)> =
            modes.iter().map(|m| (m.as_str(), m.color_scheme())).collect();
        let opposite_modes: Vec<(&str, &str)> =
            modes.iter().map(|m| (m.as_str(), m.opposite().as_str())).collect();

        Ok(vec![
            ("themes", to_script_json(&ScriptThemes(registry.list_themes()))?),
            ("keys", to_script_json(&registry.canonical_keys())?),
            ("default_id", to_script_json(registry.default_id())?),
            ("mode_classes", to_script_json(&ObjectPairs(&mode_classes))?),
            ("color_schemes", to_script_json(&ObjectPairs(&color_schemes))?),
            ("opposite_modes", to_script_json(&ObjectPairs(&opposite_modes))?),
            (
                "code_vars",
                to_script_json(&CodeVars {
                    bg: CODE_BG_VAR,
                    font: CODE_FONT_VAR,
                    font_size: CODE_FONT_SIZE_VAR,
                })?,
            ),
            ("color_theme_key", to_script_json(PrefKey::ColorTheme.as_str())?),
            ("dark_theme_key", to_script_json(PrefKey::DarkTheme.as_str())?),
            ("light_theme_key", to_script_json(PrefKey::LightTheme.as_str())?),
            ("mode_key", to_script_json(PrefKey::Mode.as_str())?),
            ("code_prefs_key", to_script_json(PrefKey::CodeThemePrefs.as_str())?),
            ("default_dark", to_script_json(ThemeMode::Dark.default_theme_id())?),
            ("default_light", to_script_json(ThemeMode::Light.default_theme_id())?),
        ])
    }
}

/// Shorthand for [`BootstrapScriptGenerator::generate`]
pub fn generate_theme_script(registry: &ThemeRegistry) -> Result<String> {
    BootstrapScriptGenerator::new(registry).generate()
}

/// Ordered string pairs serialized as a JSON object
struct ObjectPairs<'a>(&'a [(&'a str, &'a str)]);

impl Serialize for ObjectPairs<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// JSON that is also safe inside an inline `<script>` element
fn to_script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).context("Failed to serialize bootstrap data")?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    Ok(out)
}

/// Single-pass `{{name}}` substitution; inserted values are never rescanned
fn render_template(template: &str, vars: &[(&str, String)]) -> Result<String> {
    let mut out = String::with_capacity(template.len() * 2);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .context("Unterminated placeholder in bootstrap template")?;
        let name = &after[..end];
        let value = vars
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
            .with_context(|| format!("Unknown placeholder in bootstrap template: {name}"))?;
        out.push_str(value);
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}
