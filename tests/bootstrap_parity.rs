//! Runs the generated bootstrap script under `node` against a stub
//! `document`/`localStorage`/`matchMedia` and checks it leaves the same
//! root element and store as `ThemeController::init`.
//!
//! Skipped when `node` is not on the PATH.

use std::collections::BTreeMap;
use std::fs;
use std::process::Command;

use hubtheme::theme::builtin_themes;
use hubtheme::{DisplayState, MemoryStore, PrefKey, ThemeController, ThemeRegistry, generate_theme_script};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

// ============================================================================
// Test helpers
// ============================================================================

/// Browser stubs; `{{seed}}` is a JSON literal, `{{script}}` the bootstrap unit
const HARNESS: &str = r#"var seed={{seed}};
var items=Object.assign({},seed.store),classes=[],props=[];
var own=function(o,k){return Object.prototype.hasOwnProperty.call(o,k)};
var style={
colorScheme:"",
setProperty:function(k,v){v=String(v);for(var i=0;i<props.length;i++){if(props[i][0]===k){props[i][1]=v;return}}props.push([k,v])},
removeProperty:function(k){props=props.filter(function(p){return p[0]!==k})}
};
globalThis.window={
localStorage:{
getItem:function(k){return own(items,k)?items[k]:null},
setItem:function(k,v){items[k]=String(v)}
},
matchMedia:function(q){return{matches:q==="(prefers-color-scheme: dark)"&&seed.dark}}
};
globalThis.document={documentElement:{
classList:{
add:function(c){if(classes.indexOf(c)<0)classes.push(c)},
remove:function(c){classes=classes.filter(function(x){return x!==c})}
},
style:style
}};
{{script}}
var store={};
seed.keys.forEach(function(k){store[k]=own(items,k)?items[k]:null});
console.log(JSON.stringify({classes:classes,colorScheme:style.colorScheme||null,properties:props,store:store}));
"#;

#[derive(Serialize)]
struct Seed<'a> {
    dark: bool,
    store: BTreeMap<&'a str, &'a str>,
    keys: Vec<&'static str>,
}

/// Root element and store after a page load
#[derive(Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageState {
    classes: Vec<String>,
    color_scheme: Option<String>,
    properties: Vec<(String, String)>,
    store: BTreeMap<String, Option<String>>,
}

fn node_available() -> bool {
    Command::new("node")
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false)
}

fn seeded_store(seeds: &[(PrefKey, &str)]) -> MemoryStore {
    seeds
        .iter()
        .fold(MemoryStore::new(), |store, (key, value)| store.with(*key, *value))
}

fn run_controller(registry: &ThemeRegistry, seeds: &[(PrefKey, &str)], dark: bool) -> PageState {
    let mut ctl = ThemeController::new(registry, seeded_store(seeds), DisplayState::new());
    ctl.init(dark);
    let (store, doc) = ctl.into_parts();

    PageState {
        classes: doc.classes().to_vec(),
        color_scheme: doc.color_scheme().map(str::to_string),
        properties: doc
            .properties()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        store: PrefKey::all()
            .iter()
            .map(|key| (key.as_str().to_string(), store.raw(key.as_str()).map(str::to_string)))
            .collect(),
    }
}

fn run_script(dir: &TempDir, registry: &ThemeRegistry, seeds: &[(PrefKey, &str)], dark: bool) -> PageState {
    let seed = Seed {
        dark,
        store: seeds.iter().map(|(key, value)| (key.as_str(), *value)).collect(),
        keys: PrefKey::all().iter().map(PrefKey::as_str).collect(),
    };
    let harness = HARNESS
        .replace("{{seed}}", &serde_json::to_string(&seed).unwrap())
        .replace("{{script}}", &generate_theme_script(registry).unwrap());

    let path = dir.path().join("page.js");
    fs::write(&path, harness).unwrap();
    let out = Command::new("node").arg(&path).output().unwrap();
    assert!(
        out.status.success(),
        "node failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).unwrap()
}

fn assert_same_page(registry: &ThemeRegistry, seeds: &[(PrefKey, &str)], dark: bool) {
    let dir = TempDir::new().unwrap();
    let native = run_controller(registry, seeds, dark);
    let script = run_script(&dir, registry, seeds, dark);
    assert_eq!(script, native, "seeds {seeds:?}, system dark {dark}");
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_first_visit_follows_system_signal() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let registry = ThemeRegistry::builtin();
    for dark in [true, false] {
        assert_same_page(&registry, &[], dark);
    }
}

#[test]
fn test_saved_and_removed_themes() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let registry = ThemeRegistry::builtin();
    for id in ["ember", "arctic", "midnight", "removed-theme", ""] {
        for dark in [true, false] {
            assert_same_page(&registry, &[(PrefKey::ColorTheme, id)], dark);
        }
    }
}

#[test]
fn test_remembered_variants() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let registry = ThemeRegistry::builtin();
    let seeds = [(PrefKey::DarkTheme, "hub-dark"), (PrefKey::LightTheme, "dawn")];
    for dark in [true, false] {
        assert_same_page(&registry, &seeds, dark);
    }
    assert_same_page(&registry, &[(PrefKey::LightTheme, "gone")], false);
}

#[test]
fn test_code_prefs_including_malformed() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let registry = ThemeRegistry::builtin();
    let prefs = [
        r##"{"bg":"#101010","font":"Fira Code","fontSize":13}"##,
        r##"{"fontSize":"14"}"##,
        r##"{"fontSize":12.5}"##,
        r##"{"fontSize":0,"bg":""}"##,
        r##"{"bg":"#111","font":12}"##,
        r##"{"bg":"#111","fontSize":true}"##,
        r##"["#111"]"##,
        "null",
        "{not json",
    ];
    for raw in prefs {
        let seeds = [(PrefKey::ColorTheme, "dawn"), (PrefKey::CodeThemePrefs, raw)];
        assert_same_page(&registry, &seeds, false);
    }
}

#[test]
fn test_missing_default_leaves_page_untouched() {
    if !node_available() {
        eprintln!("node not found, skipping");
        return;
    }
    let themes = builtin_themes()
        .into_iter()
        .filter(|t| t.id != "midnight")
        .collect();
    let registry = ThemeRegistry::new(themes, "midnight").unwrap();

    assert_same_page(&registry, &[(PrefKey::ColorTheme, "ember")], true);
    assert_same_page(&registry, &[], true);
}
