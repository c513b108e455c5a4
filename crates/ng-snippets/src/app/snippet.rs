//! Rendering component descriptors into editor snippets.

use crate::domain::model::{Binding, BindingKind, ComponentDescriptor, SnippetRecord};

/// Scope written when no configuration overrides it.
pub const DEFAULT_SCOPE: &str = "html";

/// Turns descriptors into [`SnippetRecord`]s for one project.
#[derive(Debug, Clone)]
pub struct SnippetBuilder {
    project: String,
    scope: String,
}

impl SnippetBuilder {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            scope: DEFAULT_SCOPE.to_owned(),
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Build the snippet for one component.
    ///
    /// The body opens the tag, lists one attribute per binding and closes the tag. With bindings
    /// present the opening line is left open and the last attribute line carries the `>`.
    pub fn build(&self, descriptor: &ComponentDescriptor) -> SnippetRecord {
        let tag = descriptor.tag_name.as_str();

        let mut attributes: Vec<String> = descriptor.bindings.iter().map(render_binding).collect();
        let open = match attributes.last_mut() {
            Some(last) => {
                last.push('>');
                format!("<{tag}")
            }
            None => format!("<{tag}>"),
        };

        let mut body = Vec::with_capacity(attributes.len() + 2);
        body.push(open);
        body.extend(attributes);
        body.push(format!("</{tag}>"));

        SnippetRecord {
            prefix: vec![tag.to_owned(), format!("<{tag}"), self.project.clone()],
            body,
            description: format!("<{tag}>"),
            scope: self.scope.clone(),
        }
    }
}

fn render_binding(binding: &Binding) -> String {
    match binding.kind {
        BindingKind::Input => format!("  [{}]=\"{}\"", binding.name, binding.type_hint),
        BindingKind::Output => format!("  ({})=\"\"", binding.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(tag: &str, bindings: &[(BindingKind, &str, &str)]) -> ComponentDescriptor {
        let mut bindings: Vec<_> = bindings
            .iter()
            .filter_map(|(kind, name, ty)| Binding::new(*kind, name, ty))
            .collect();
        bindings.sort();
        ComponentDescriptor {
            tag_name: tag.into(),
            bindings,
        }
    }

    #[test]
    fn renders_inputs_then_outputs_and_closes_last_line() {
        let record = SnippetBuilder::new("shop").build(&descriptor(
            "app-field",
            &[
                (BindingKind::Output, "changed", "EventEmitter<string>"),
                (BindingKind::Input, "label", "string"),
            ],
        ));

        assert_eq!(
            record.body,
            [
                "<app-field",
                "  [label]=\"string\"",
                "  (changed)=\"\">",
                "</app-field>",
            ]
        );
        assert_eq!(record.prefix, ["app-field", "<app-field", "shop"]);
        assert_eq!(record.description, "<app-field>");
        assert_eq!(record.scope, "html");
    }

    #[test]
    fn component_without_bindings_has_two_line_body() {
        let record = SnippetBuilder::new("shop").build(&descriptor("app-empty", &[]));
        assert_eq!(record.body, ["<app-empty>", "</app-empty>"]);
    }

    #[test]
    fn untyped_input_renders_empty_value() {
        let record =
            SnippetBuilder::new("shop").build(&descriptor("app-x", &[(BindingKind::Input, "flag", "")]));
        assert_eq!(record.body, ["<app-x", "  [flag]=\"\">", "</app-x>"]);
    }

    #[test]
    fn scope_can_be_overridden() {
        let record = SnippetBuilder::new("shop")
            .with_scope("html,vue-html")
            .build(&descriptor("app-x", &[]));
        assert_eq!(record.scope, "html,vue-html");
    }
}
