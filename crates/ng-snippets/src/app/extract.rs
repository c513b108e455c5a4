//! Line-oriented extraction of a component's selector and its `@Input`/`@Output` bindings.
//!
//! Each line is inspected on its own. Declarations spread over several lines, decorators with
//! arguments (`@Input('alias')`) and `protected` members are not recognized.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::model::{Binding, BindingKind, ComponentDescriptor};

const INPUT_MARKER: &str = "@Input";
const OUTPUT_MARKER: &str = "@Output";

static BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(@Input|@Output)\(\)(?:\spublic\s|\sprivate\s|\s)([^;=]+)")
        .expect("binding pattern is valid")
});

static ACCESSOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(set|get)\s+([^\s(]+)\s*\(([^)]*)\)\s*(?::\s*([^{]*))?")
        .expect("accessor pattern is valid")
});

static SPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"  +").expect("space pattern is valid"));

/// Scan a component source file.
///
/// Returns `None` when the file declares no selector; such files produce no snippet.
pub fn extract(text: &str) -> Option<ComponentDescriptor> {
    let mut tag_name: Option<String> = None;
    let mut bindings = Vec::new();

    for line in text.lines() {
        if tag_name.is_none() {
            tag_name = parse_selector(line);
        }
        if let Some(binding) = parse_binding(line) {
            bindings.push(binding);
        }
    }

    let tag_name = tag_name?;
    bindings.sort();
    Some(ComponentDescriptor { tag_name, bindings })
}

/// Recognize a `selector: 'tag'` line and return the tag.
///
/// The line is normalized by dropping the first `;`, `:` and `=`, collapsing runs of spaces and
/// splitting on single spaces. The second token loses every quote character and its first comma.
pub fn parse_selector(line: &str) -> Option<String> {
    let normalized = line.replacen(';', "", 1).replacen(':', "", 1).replacen('=', "", 1);
    let collapsed = SPACE_RUN.replace_all(&normalized, " ");
    let mut tokens = collapsed.trim().split(' ');

    if tokens.next()? != "selector" {
        return None;
    }

    let tag: String = tokens
        .next()?
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | '`'))
        .collect();
    let tag = tag.replacen(',', "", 1);
    (!tag.is_empty()).then_some(tag)
}

/// Recognize the first `@Input()`/`@Output()` declaration on a line.
pub fn parse_binding(line: &str) -> Option<Binding> {
    let captures = BINDING.captures(line)?;
    let kind = match &captures[1] {
        INPUT_MARKER => BindingKind::Input,
        OUTPUT_MARKER => BindingKind::Output,
        _ => return None,
    };
    let raw = &captures[2];
    let declaration = raw.trim();

    if let Some(accessor) = ACCESSOR.captures(declaration) {
        let name = &accessor[2];
        let type_hint = match &accessor[1] {
            "set" => accessor[3]
                .split_once(':')
                .map(|(_, ty)| ty)
                .unwrap_or_default(),
            _ => accessor.get(4).map(|ty| ty.as_str()).unwrap_or_default(),
        };
        return Binding::new(kind, name, type_hint);
    }

    // Split on the first colon only when something, even whitespace, follows it.
    match raw.split_once(':') {
        Some((name, ty)) if !ty.is_empty() => Binding::new(kind, name, ty),
        _ => Binding::new(kind, raw, ""),
    }
}
