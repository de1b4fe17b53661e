//! A small template group engine.
//!
//! A group file holds named templates with declared parameters:
//!
//! ```text
//! // comment
//! connection(sFrom, sTo, arrsMessages) ::= <<
//! $sTo$ -> $sFrom$ : $arrsMessages; separator=", "$
//! >>
//! ```
//!
//! Expressions are delimited by `$`. `$name$` inserts an attribute, lists are
//! joined with the optional `separator`, and `$name:{it | body}$` applies an
//! anonymous template to every item. `$$` is a literal dollar sign.

use std::path::Path;
use std::str::FromStr;

use indexmap::IndexMap;
use tracing::debug;

use super::{Attributes, RenderError, Renderer, Value};

const BUNDLED_GROUP: &str = include_str!("../../../templates/interface_view.stg");

#[derive(Debug, Clone)]
pub struct TemplateGroup {
    templates: IndexMap<String, Template>,
}

#[derive(Debug, Clone)]
struct Template {
    params: Vec<String>,
    body: Vec<Chunk>,
}

#[derive(Debug, Clone, PartialEq)]
enum Chunk {
    Text(String),
    Expr(Expr),
}

#[derive(Debug, Clone, PartialEq)]
struct Expr {
    attribute: String,
    apply: Option<Anonymous>,
    separator: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
struct Anonymous {
    var: String,
    body: Vec<Chunk>,
}

impl TemplateGroup {
    /// The group shipped with the crate: a PlantUML rendering of the interface view
    pub fn bundled() -> Result<Self, RenderError> {
        BUNDLED_GROUP.parse()
    }

    pub fn from_file(path: &Path) -> Result<Self, RenderError> {
        debug!("Loading template group from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        content.parse()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn template_names(&self) -> impl Iterator<Item = &String> {
        self.templates.keys()
    }
}

impl FromStr for TemplateGroup {
    type Err = RenderError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let mut templates = IndexMap::new();
        let mut lines = source.lines().enumerate().map(|(i, l)| (i + 1, l));

        while let Some((line_no, line)) = lines.next() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }

            if let Some(declaration) = trimmed.strip_prefix("group ") {
                if !templates.is_empty() {
                    return Err(parse_error(
                        line_no,
                        "group declaration must come before any template".to_string(),
                    ));
                }
                let group = parse_group_declaration(declaration, line_no)?;
                debug!("Parsing template group {}", group);
                continue;
            }

            let (name, params, rest) = parse_header(trimmed, line_no)?;

            let body_line = if rest.is_empty() { line_no + 1 } else { line_no };
            let body = match rest.strip_suffix(">>") {
                // `name() ::= << text >>` on a single line
                Some(inline) => inline.trim().to_string(),
                None => {
                    let mut body_lines = Vec::new();
                    if !rest.is_empty() {
                        body_lines.push(rest);
                    }
                    let mut closed = false;
                    for (_, line) in lines.by_ref() {
                        if line.trim() == ">>" {
                            closed = true;
                            break;
                        }
                        body_lines.push(line);
                    }
                    if !closed {
                        return Err(parse_error(
                            line_no,
                            format!("template {} is missing its closing >>", name),
                        ));
                    }
                    body_lines.join("\n")
                }
            };

            let template = Template {
                params,
                body: parse_chunks(&body, body_line)?,
            };
            if templates.insert(name.clone(), template).is_some() {
                return Err(parse_error(
                    line_no,
                    format!("template {} is defined twice", name),
                ));
            }
        }

        Ok(Self { templates })
    }
}

impl Renderer for TemplateGroup {
    fn render(&self, template: &str, attributes: &Attributes) -> Result<String, RenderError> {
        let definition = self
            .templates
            .get(template)
            .ok_or_else(|| RenderError::UnknownTemplate(template.to_string()))?;

        if let Some(undeclared) = attributes
            .keys()
            .find(|name| !definition.params.contains(name))
        {
            return Err(RenderError::UndeclaredAttribute {
                template: template.to_string(),
                attribute: undeclared.clone(),
            });
        }

        let scope = Scope {
            template,
            attributes,
            bound: Vec::new(),
        };
        render_chunks(&definition.body, &scope)
    }
}

/// Reads the `name;` or `name : supergroup;` tail of a `group` line
fn parse_group_declaration(declaration: &str, line_no: usize) -> Result<&str, RenderError> {
    let declaration = declaration
        .trim()
        .strip_suffix(';')
        .ok_or_else(|| parse_error(line_no, "group declaration must end with ;".to_string()))?;
    let (name, supergroup) = match declaration.split_once(':') {
        Some((name, supergroup)) => (name.trim(), Some(supergroup.trim())),
        None => (declaration.trim(), None),
    };
    if !is_identifier(name) || supergroup.is_some_and(|s| !is_identifier(s)) {
        return Err(parse_error(
            line_no,
            format!("malformed group declaration {:?}", declaration),
        ));
    }
    Ok(name)
}

fn parse_error(line: usize, message: String) -> RenderError {
    RenderError::Parse { line, message }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits `name(a, b) ::= << rest` into its parts
fn parse_header(line: &str, line_no: usize) -> Result<(String, Vec<String>, &str), RenderError> {
    let (signature, definition) = line
        .split_once("::=")
        .ok_or_else(|| parse_error(line_no, format!("expected a template header, got {:?}", line)))?;

    let rest = definition
        .trim_start()
        .strip_prefix("<<")
        .ok_or_else(|| parse_error(line_no, "template body must start with <<".to_string()))?
        .trim();

    let signature = signature.trim();
    let (name, params) = signature
        .strip_suffix(')')
        .and_then(|s| s.split_once('('))
        .ok_or_else(|| {
            parse_error(
                line_no,
                format!("malformed template signature {:?}", signature),
            )
        })?;

    let name = name.trim();
    if !is_identifier(name) {
        return Err(parse_error(
            line_no,
            format!("invalid template name {:?}", name),
        ));
    }

    let params = params
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if is_identifier(p) {
                Ok(p.to_string())
            } else {
                Err(parse_error(line_no, format!("invalid parameter {:?}", p)))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok((name.to_string(), params, rest))
}

/// Finds the end of an expression starting right after its opening `$`.
/// Dollars nested in `{...}` or inside the quoted option strings after `;` do
/// not close it. Quotes in anonymous template text are plain text.
fn find_expr_end(src: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_options = false;
    let mut in_quotes = false;
    let mut escaped = false;

    for (i, c) in src.char_indices() {
        if in_quotes {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_quotes = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' if in_options => in_quotes = true,
            '{' if !in_options => depth += 1,
            '}' if !in_options => depth = depth.saturating_sub(1),
            ';' if depth == 0 => in_options = true,
            '$' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_chunks(src: &str, line: usize) -> Result<Vec<Chunk>, RenderError> {
    let mut chunks = Vec::new();
    let mut text = String::new();
    let mut rest = src;

    while let Some(start) = rest.find('$') {
        text.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            text.push('$');
            rest = tail;
            continue;
        }

        let expr_line = line + src[..src.len() - rest.len() + start].matches('\n').count();
        let end = find_expr_end(after)
            .ok_or_else(|| parse_error(expr_line, "unterminated $ expression".to_string()))?;

        if !text.is_empty() {
            chunks.push(Chunk::Text(std::mem::take(&mut text)));
        }
        chunks.push(Chunk::Expr(parse_expr(&after[..end], expr_line)?));
        rest = &after[end + 1..];
    }

    text.push_str(rest);
    if !text.is_empty() {
        chunks.push(Chunk::Text(text));
    }
    Ok(chunks)
}

/// Splits on the first `;` that is outside braces
fn split_options(src: &str) -> (&str, Option<&str>) {
    let mut depth = 0usize;
    for (i, c) in src.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => return (&src[..i], Some(&src[i + 1..])),
            _ => {}
        }
    }
    (src, None)
}

fn parse_expr(src: &str, line: usize) -> Result<Expr, RenderError> {
    let (head, options) = split_options(src.trim());

    let head = head.trim();
    let name_end = head
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(head.len());
    let (attribute, application) = head.split_at(name_end);
    if attribute.is_empty() {
        return Err(parse_error(
            line,
            format!("expression {:?} does not name an attribute", src),
        ));
    }

    let application = application.trim();
    let apply = if application.is_empty() {
        None
    } else {
        let inner = application
            .strip_prefix(':')
            .map(str::trim_start)
            .and_then(|s| s.strip_prefix('{'))
            .and_then(|s| s.strip_suffix('}'))
            .ok_or_else(|| {
                parse_error(
                    line,
                    format!("expected :{{var | body}} after {}, got {:?}", attribute, application),
                )
            })?;
        let (var, body) = inner.split_once('|').ok_or_else(|| {
            parse_error(
                line,
                format!("anonymous template on {} has no | separator", attribute),
            )
        })?;
        let var = var.trim();
        if !is_identifier(var) {
            return Err(parse_error(
                line,
                format!("invalid anonymous template variable {:?}", var),
            ));
        }
        Some(Anonymous {
            var: var.to_string(),
            body: parse_chunks(body.trim_start(), line)?,
        })
    };

    let mut separator = None;
    if let Some(options) = options {
        let options = options.trim();
        let value = options
            .strip_prefix("separator")
            .map(str::trim_start)
            .and_then(|s| s.strip_prefix('='))
            .map(str::trim)
            .ok_or_else(|| parse_error(line, format!("unknown expression option {:?}", options)))?;
        separator = Some(parse_string_literal(value, line)?);
    }

    Ok(Expr {
        attribute: attribute.to_string(),
        apply,
        separator,
    })
}

fn parse_string_literal(src: &str, line: usize) -> Result<String, RenderError> {
    let inner = src
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| parse_error(line, format!("expected a quoted string, got {}", src)))?;

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            other => {
                return Err(parse_error(
                    line,
                    format!("invalid escape \\{}", other.map(String::from).unwrap_or_default()),
                ))
            }
        }
    }
    Ok(out)
}

struct Scope<'a> {
    template: &'a str,
    attributes: &'a Attributes,
    /// Anonymous template variables, innermost last
    bound: Vec<(&'a str, &'a str)>,
}

enum Resolved<'a> {
    Text(&'a str),
    List(&'a [String]),
}

impl<'a> Scope<'a> {
    fn lookup(&self, name: &str) -> Option<Resolved<'a>> {
        if let Some((_, value)) = self.bound.iter().rev().find(|(var, _)| *var == name) {
            return Some(Resolved::Text(*value));
        }
        self.attributes.get(name).map(|value| match value {
            Value::Text(text) => Resolved::Text(text),
            Value::List(items) => Resolved::List(items),
        })
    }

    fn bind(&self, var: &'a str, value: &'a str) -> Scope<'a> {
        let mut bound = self.bound.clone();
        bound.push((var, value));
        Scope {
            template: self.template,
            attributes: self.attributes,
            bound,
        }
    }
}

fn render_chunks<'a>(chunks: &'a [Chunk], scope: &Scope<'a>) -> Result<String, RenderError> {
    let mut out = String::new();
    for chunk in chunks {
        match chunk {
            Chunk::Text(text) => out.push_str(text),
            Chunk::Expr(expr) => out.push_str(&render_expr(expr, scope)?),
        }
    }
    Ok(out)
}

fn render_expr<'a>(expr: &'a Expr, scope: &Scope<'a>) -> Result<String, RenderError> {
    let items: Vec<&str> = match scope.lookup(&expr.attribute) {
        Some(Resolved::Text(text)) => vec![text],
        Some(Resolved::List(items)) => items.iter().map(String::as_str).collect(),
        None => {
            return Err(RenderError::MissingAttribute {
                template: scope.template.to_string(),
                attribute: expr.attribute.clone(),
            })
        }
    };

    let rendered = items
        .into_iter()
        .map(|item| match &expr.apply {
            Some(anonymous) => render_chunks(&anonymous.body, &scope.bind(&anonymous.var, item)),
            None => Ok(item.to_string()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(rendered.join(expr.separator.as_deref().unwrap_or("")))
}
