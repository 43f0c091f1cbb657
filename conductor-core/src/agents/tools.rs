use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Suffix appended to every tool result so downstream rendering stays
/// consistent across agents.
pub const FORMATTING_INSTRUCTIONS: &str =
    "Present this result to the user as markdown, then add a one-line summary of the action taken.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolParameter {
    pub name: String,
    pub description: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

/// A tool is a named response template plus a parameter schema. Execution is
/// pure string interpolation; there are no external calls behind a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ToolParameter>,
    pub response_template: String,
}

impl ToolDescriptor {
    /// Interpolate the response template with the supplied arguments.
    ///
    /// Always returns a string: a missing placeholder value or a malformed
    /// template yields an in-band error message rather than an error return.
    pub fn execute(&self, args: &HashMap<String, String>) -> String {
        match render_template(&self.response_template, args) {
            Ok(rendered) => format!("{rendered}\n{FORMATTING_INSTRUCTIONS}"),
            Err(TemplateError::MissingParameter(name)) => {
                format!("Missing parameter '{name}' for tool '{}'", self.name)
            }
            Err(TemplateError::Malformed(detail)) => {
                format!("Error processing tool '{}': {detail}", self.name)
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum TemplateError {
    MissingParameter(String),
    Malformed(String),
}

/// `{placeholder}` interpolation. `{{` and `}}` are literal braces.
fn render_template(
    template: &str,
    args: &HashMap<String, String>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(inner) => name.push(inner),
                        None => {
                            return Err(TemplateError::Malformed(
                                "unclosed '{' in response template".to_string(),
                            ))
                        }
                    }
                }
                if name.is_empty() {
                    return Err(TemplateError::Malformed(
                        "empty placeholder in response template".to_string(),
                    ));
                }
                match args.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(TemplateError::MissingParameter(name)),
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

/// A static per-agent tool list, deserialized from embedded JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolCatalog {
    pub tools: Vec<ToolDescriptor>,
}

impl ToolCatalog {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let tools: Vec<ToolDescriptor> = serde_json::from_str(raw)?;
        Ok(Self { tools })
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
