//! DeclarativeOperator — YAML-described operator with lineage hooks
//!
//! A spec names the task, its type, optional annotated inlets/outlets, and
//! the value each lineage hook returns. Hook values are free-form: they are
//! handed to the extractor as structural values and coerced there, so a
//! spec can describe any lineage-like shape.
//!
//! String leaves in hook values may reference `{task_id}` and `{task_type}`.
//! The complete and failure hooks may also use `{dag_id}`, `{run_id}` and
//! `{try_number}` from the task instance. `{{` and `}}` escape braces.

use super::task_instance::TaskInstance;
use super::traits::{LineageHooks, LineageLike, Operator};
use crate::error::{LineageError, LineageResult};
use crate::lineage::Dataset;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::warn;

/// The YAML document describing a declarative operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclarativeSpec {
    pub task_id: String,
    pub task_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inlets: Vec<Dataset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outlets: Vec<Dataset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_start: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_complete: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_failure: Option<Value>,
}

/// Operator whose behavior is read from a [`DeclarativeSpec`].
#[derive(Debug, Clone)]
pub struct DeclarativeOperator {
    spec: DeclarativeSpec,
}

impl DeclarativeOperator {
    /// Create an operator from a spec, rejecting malformed templates up front.
    pub fn new(spec: DeclarativeSpec) -> LineageResult<Self> {
        validate_spec(&spec)?;
        Ok(Self { spec })
    }

    pub fn from_yaml(yaml: &str) -> LineageResult<Self> {
        let spec: DeclarativeSpec = serde_yaml::from_str(yaml)?;
        Self::new(spec)
    }

    pub fn from_path(path: &Path) -> LineageResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    pub fn spec(&self) -> &DeclarativeSpec {
        &self.spec
    }

    fn render_hook(&self, hook: &Value, task_instance: Option<&TaskInstance>) -> LineageLike {
        let ctx = TemplateContext {
            task_id: &self.spec.task_id,
            task_type: &self.spec.task_type,
            task_instance,
        };
        match render_value(hook, &ctx) {
            Ok(rendered) => LineageLike::Structural(rendered),
            Err(e) => {
                // `new` rejects such templates; only a spec built around it gets here
                warn!(
                    task_id = %self.spec.task_id,
                    task_type = %self.spec.task_type,
                    error = %e,
                    "cannot render lineage hook template"
                );
                LineageLike::Structural(Value::Null)
            }
        }
    }
}

impl Operator for DeclarativeOperator {
    fn task_id(&self) -> &str {
        &self.spec.task_id
    }

    fn task_type(&self) -> &str {
        &self.spec.task_type
    }

    fn lineage_hooks(&self) -> LineageHooks {
        let mut hooks = LineageHooks::NONE;
        if self.spec.on_start.is_some() {
            hooks = hooks | LineageHooks::START;
        }
        if self.spec.on_complete.is_some() {
            hooks = hooks | LineageHooks::COMPLETE;
        }
        if self.spec.on_failure.is_some() {
            hooks = hooks | LineageHooks::FAILURE;
        }
        hooks
    }

    fn get_openlineage_facets_on_start(&self) -> Option<LineageLike> {
        self.spec.on_start.as_ref().map(|hook| self.render_hook(hook, None))
    }

    fn get_openlineage_facets_on_complete(
        &self,
        task_instance: Option<&TaskInstance>,
    ) -> Option<LineageLike> {
        self.spec
            .on_complete
            .as_ref()
            .map(|hook| self.render_hook(hook, task_instance))
    }

    fn get_openlineage_facets_on_failure(
        &self,
        task_instance: Option<&TaskInstance>,
    ) -> Option<LineageLike> {
        self.spec
            .on_failure
            .as_ref()
            .map(|hook| self.render_hook(hook, task_instance))
    }

    fn inlets(&self) -> Vec<Dataset> {
        self.spec.inlets.clone()
    }

    fn outlets(&self) -> Vec<Dataset> {
        self.spec.outlets.clone()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_spec(spec: &DeclarativeSpec) -> LineageResult<()> {
    if spec.task_id.trim().is_empty() {
        return Err(LineageError::InvalidSpec("task_id must not be empty".to_string()));
    }
    if spec.task_type.trim().is_empty() {
        return Err(LineageError::InvalidSpec("task_type must not be empty".to_string()));
    }

    if let Some(hook) = &spec.on_start {
        validate_placeholders(hook, START_PLACEHOLDERS, "on_start")?;
    }
    if let Some(hook) = &spec.on_complete {
        validate_placeholders(hook, RUN_PLACEHOLDERS, "on_complete")?;
    }
    if let Some(hook) = &spec.on_failure {
        validate_placeholders(hook, RUN_PLACEHOLDERS, "on_failure")?;
    }
    Ok(())
}

const START_PLACEHOLDERS: &[&str] = &["task_id", "task_type"];
const RUN_PLACEHOLDERS: &[&str] = &["task_id", "task_type", "dag_id", "run_id", "try_number"];

fn validate_placeholders(value: &Value, allowed: &[&str], hook: &str) -> LineageResult<()> {
    match value {
        Value::String(s) => {
            for name in placeholders(s).map_err(|e| {
                LineageError::InvalidSpec(format!("{}: {}", hook, e))
            })? {
                if !allowed.contains(&name.as_str()) {
                    return Err(LineageError::InvalidSpec(format!(
                        "{}: placeholder {{{}}} is not available here",
                        hook, name
                    )));
                }
            }
            Ok(())
        }
        Value::Array(items) => items
            .iter()
            .try_for_each(|v| validate_placeholders(v, allowed, hook)),
        Value::Object(map) => map
            .values()
            .try_for_each(|v| validate_placeholders(v, allowed, hook)),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Template rendering
// ---------------------------------------------------------------------------

struct TemplateContext<'a> {
    task_id: &'a str,
    task_type: &'a str,
    task_instance: Option<&'a TaskInstance>,
}

/// A parsed piece of a template string
enum Segment {
    Literal(String),
    Placeholder(String),
}

fn parse_template(template: &str) -> Result<Vec<Segment>, String> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                literal.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => name.push(c),
                        None => return Err(format!("unclosed placeholder in: {}", template)),
                    }
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name.trim().to_string()));
            }
            '}' => return Err(format!("unmatched '}}' in: {}", template)),
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn placeholders(template: &str) -> Result<Vec<String>, String> {
    Ok(parse_template(template)?
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

fn render_string(template: &str, ctx: &TemplateContext) -> Result<String, String> {
    let mut out = String::new();
    for segment in parse_template(template)? {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Placeholder(name) => out.push_str(&resolve_placeholder(&name, ctx)?),
        }
    }
    Ok(out)
}

fn resolve_placeholder(name: &str, ctx: &TemplateContext) -> Result<String, String> {
    let ti = ctx.task_instance;
    match name {
        "task_id" => Ok(ctx.task_id.to_string()),
        "task_type" => Ok(ctx.task_type.to_string()),
        "dag_id" => Ok(ti.map(|t| t.dag_id.clone()).unwrap_or_default()),
        "run_id" => Ok(ti.map(|t| t.run_id.clone()).unwrap_or_default()),
        "try_number" => Ok(ti.map(|t| t.try_number.to_string()).unwrap_or_default()),
        other => Err(format!("unknown placeholder: {}", other)),
    }
}

fn render_value(value: &Value, ctx: &TemplateContext) -> Result<Value, String> {
    Ok(match value {
        Value::String(s) => Value::String(render_string(s, ctx)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|v| render_value(v, ctx))
                .collect::<Result<_, _>>()?,
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), render_value(v, ctx)?)))
                .collect::<Result<_, String>>()?,
        ),
        other => other.clone(),
    })
}
