//! Minimal HCL document model and writer
//!
//! Rendered monitors are built as an in-memory document (blocks, attributes,
//! blank-line separators) and serialized deterministically in the layout
//! `terraform fmt` produces: two-space indentation and `=` signs aligned
//! across runs of consecutive attributes.
//!
//! # Example
//!
//! ```
//! use tfsynth::core::hcl::{Document, Value};
//!
//! let mut document = Document::new();
//! let resource = document
//!     .body_mut()
//!     .append_new_block("resource", ["newrelic_synthetics_monitor", "login"]);
//! resource.body_mut().set_attribute_value("name", "Login");
//! resource.body_mut().set_attribute_value("verify_ssl", true);
//!
//! assert_eq!(
//!     document.to_string(),
//!     "resource \"newrelic_synthetics_monitor\" \"login\" {\n  name       = \"Login\"\n  verify_ssl = true\n}\n"
//! );
//! ```

pub mod heredoc;

pub use heredoc::{encode_heredoc, escape_template_sequences, HeredocLayout};

use std::fmt::{self, Write};

const INDENT: &str = "  ";

/// Token kinds needed for raw expressions (heredocs and bare references)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unquoted reference or keyword, e.g. `var.api_key` or `number`
    Ident,
    OpenHeredoc,
    QuotedLit,
    Newline,
    CloseHeredoc,
}

/// A raw expression token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub bytes: String,
}

impl Token {
    pub fn new(kind: TokenKind, bytes: impl Into<String>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    pub fn newline() -> Self {
        Self::new(TokenKind::Newline, "\n")
    }
}

/// Raw tokens for an unquoted reference such as `var.account_id`
pub fn reference(expression: &str) -> Tokens {
    vec![Token::new(TokenKind::Ident, expression)]
}

pub type Tokens = Vec<Token>;

/// Typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Number(i64),
    List(Vec<Value>),
}

impl Value {
    /// List of strings; an empty input gives an empty list
    pub fn string_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(values.into_iter().map(|v| Value::String(v.into())).collect())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

/// Right-hand side of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Value(Value),
    Raw(Tokens),
}

impl Expression {
    #[cfg(test)]
    fn as_value(&self) -> Option<&Value> {
        match self {
            Expression::Value(v) => Some(v),
            Expression::Raw(_) => None,
        }
    }

    fn is_multiline(&self) -> bool {
        match self {
            Expression::Value(_) => false,
            Expression::Raw(tokens) => tokens
                .iter()
                .any(|t| t.kind == TokenKind::Newline || t.bytes.contains('\n')),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub expr: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Attribute(Attribute),
    Block(Block),
    Newline,
}

/// Ordered contents of a document or block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Body {
    items: Vec<BodyItem>,
}

impl Body {
    /// Set an attribute, replacing it in place if it already exists
    pub fn set_attribute_value(&mut self, name: &str, value: impl Into<Value>) {
        self.set_expression(name, Expression::Value(value.into()));
    }

    /// Set an attribute to a raw token sequence
    pub fn set_attribute_raw(&mut self, name: &str, tokens: Tokens) {
        self.set_expression(name, Expression::Raw(tokens));
    }

    fn set_expression(&mut self, name: &str, expr: Expression) {
        for item in &mut self.items {
            if let BodyItem::Attribute(attr) = item {
                if attr.name == name {
                    attr.expr = expr;
                    return;
                }
            }
        }
        self.items.push(BodyItem::Attribute(Attribute {
            name: name.to_string(),
            expr,
        }));
    }

    pub fn append_block(&mut self, block: Block) -> &mut Block {
        self.items.push(BodyItem::Block(block));
        match self.items.last_mut() {
            Some(BodyItem::Block(block)) => block,
            _ => unreachable!("a block was just pushed"),
        }
    }

    pub fn append_new_block<I, S>(&mut self, block_type: &str, labels: I) -> &mut Block
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append_block(Block::new(block_type, labels))
    }

    /// Blank-line separator
    pub fn append_newline(&mut self) {
        self.items.push(BodyItem::Newline);
    }

    /// Move every item of `other` to the end of this body
    pub fn append_body(&mut self, other: Body) {
        self.items.extend(other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[cfg(test)]
    fn attribute(&self, name: &str) -> Option<&Expression> {
        self.items.iter().find_map(|item| match item {
            BodyItem::Attribute(attr) if attr.name == name => Some(&attr.expr),
            _ => None,
        })
    }

    #[cfg(test)]
    fn items(&self) -> &[BodyItem] {
        &self.items
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        let mut index = 0;

        while index < self.items.len() {
            match &self.items[index] {
                BodyItem::Newline => {
                    out.push('\n');
                    index += 1;
                }
                BodyItem::Block(block) => {
                    block.write_to(out, depth);
                    index += 1;
                }
                BodyItem::Attribute(_) => {
                    // Align `=` across the run of consecutive attributes; a
                    // multi-line expression closes the run.
                    let mut run = Vec::new();
                    while let Some(BodyItem::Attribute(attr)) = self.items.get(index) {
                        run.push(attr);
                        index += 1;
                        if attr.expr.is_multiline() {
                            break;
                        }
                    }
                    let width = run.iter().map(|a| a.name.chars().count()).max().unwrap_or(0);
                    for attr in run {
                        let pad = width - attr.name.chars().count();
                        let _ = write!(out, "{indent}{}{} = ", attr.name, " ".repeat(pad));
                        write_expression(out, &attr.expr, &indent);
                        out.push('\n');
                    }
                }
            }
        }
    }
}

/// A block with a type, labels, and a body
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub block_type: String,
    pub labels: Vec<String>,
    body: Body,
}

impl Block {
    pub fn new<I, S>(block_type: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            block_type: block_type.to_string(),
            labels: labels.into_iter().map(Into::into).collect(),
            body: Body::default(),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        out.push_str(&indent);
        out.push_str(&self.block_type);
        for label in &self.labels {
            out.push(' ');
            write_quoted(out, label);
        }
        out.push_str(" {\n");
        self.body.write_to(out, depth + 1);
        out.push_str(&indent);
        out.push_str("}\n");
    }
}

/// A whole HCL file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    body: Body,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.body.write_to(&mut out, 0);
        f.write_str(&out)
    }
}

fn write_expression(out: &mut String, expr: &Expression, indent: &str) {
    match expr {
        Expression::Value(value) => write_value(out, value),
        Expression::Raw(tokens) => {
            let mut line_start = false;
            for token in tokens {
                match token.kind {
                    TokenKind::Newline => {
                        out.push('\n');
                        line_start = true;
                    }
                    TokenKind::QuotedLit | TokenKind::CloseHeredoc => {
                        if line_start && !token.bytes.is_empty() {
                            out.push_str(indent);
                        }
                        out.push_str(&token.bytes);
                        line_start = false;
                    }
                    TokenKind::Ident | TokenKind::OpenHeredoc => {
                        out.push_str(&token.bytes);
                        line_start = false;
                    }
                }
            }
        }
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => write_quoted(out, s),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item);
            }
            out.push(']');
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                out.push(c);
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attribute_replaces_in_place() {
        let mut body = Body::default();
        body.set_attribute_value("a", "1");
        body.set_attribute_value("b", "2");
        body.set_attribute_value("a", "3");

        assert_eq!(body.items().len(), 2);
        assert_eq!(
            body.attribute("a").and_then(Expression::as_value),
            Some(&Value::from("3"))
        );
    }

    #[test]
    fn test_alignment_is_per_run() {
        let mut document = Document::new();
        let block = document.body_mut().append_new_block("resource", ["t", "n"]);
        block.body_mut().set_attribute_value("name", "x");
        block.body_mut().set_attribute_value("locations_public", Value::string_list(["US_EAST_1"]));
        block.body_mut().append_newline();
        block.body_mut().set_attribute_value("period", "EVERY_MINUTE");

        assert_eq!(
            document.to_string(),
            concat!(
                "resource \"t\" \"n\" {\n",
                "  name             = \"x\"\n",
                "  locations_public = [\"US_EAST_1\"]\n",
                "\n",
                "  period = \"EVERY_MINUTE\"\n",
                "}\n"
            )
        );
    }

    #[test]
    fn test_nested_blocks_and_lists() {
        let mut document = Document::new();
        let resource = document.body_mut().append_new_block("resource", ["t", "n"]);
        let step = resource.body_mut().append_new_block("step", Vec::<String>::new());
        step.body_mut().set_attribute_value("ordinal", 0i64);
        step.body_mut().set_attribute_value("values", Value::string_list(Vec::<String>::new()));

        assert_eq!(
            document.to_string(),
            "resource \"t\" \"n\" {\n  step {\n    ordinal = 0\n    values  = []\n  }\n}\n"
        );
    }

    #[test]
    fn test_quoted_strings_are_escaped() {
        let mut out = String::new();
        write_quoted(&mut out, "say \"hi\"\\ ${x} %{y} $z\n");
        assert_eq!(out, r#""say \"hi\"\\ $${x} %%{y} $z\n""#);
    }
}
