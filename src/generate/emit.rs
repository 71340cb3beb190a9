//! Text of generated headers and implementation stubs.

use super::ClassSpec;

/// Render `template <typename P0, typename P1, ...>`.
///
/// Callers guarantee a non-empty list; [`super::resolve`] rejects a bare `-t`.
pub fn template_clause(params: &[String]) -> String {
    debug_assert!(!params.is_empty(), "template clause needs parameters");
    let params: Vec<String> = params.iter().map(|p| format!("typename {}", p)).collect();
    format!("template <{}>", params.join(", "))
}

/// Everything that varies between generated headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderArtifact {
    pub guard_macro: String,
    pub template_clause: Option<String>,
    pub class_name: String,
}

impl HeaderArtifact {
    pub fn new(spec: &ClassSpec) -> Self {
        Self {
            guard_macro: spec.guard_macro(),
            template_clause: spec
                .is_template()
                .then(|| template_clause(&spec.template_params)),
            class_name: spec.name.clone(),
        }
    }

    pub fn render(&self) -> String {
        let guard = &self.guard_macro;
        let mut text = format!("#ifndef {guard}\n#define {guard}\n\n");
        if let Some(clause) = &self.template_clause {
            text.push_str(clause);
            text.push('\n');
        }
        text.push_str(&format!(
            "class {} {{\n   public:\n\t\n   private:\n\t\n}};\n\n",
            self.class_name
        ));
        text.push_str(&format!("#endif\t// {guard}\n"));
        text
    }
}

/// The stub holds a single include of its header and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    pub include_target: String,
}

impl SourceArtifact {
    pub fn render(&self) -> String {
        format!("#include \"{}\"\n", self.include_target)
    }
}
