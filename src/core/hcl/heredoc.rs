//! Heredoc encoding
//!
//! Produces the token sequence for a multi-line heredoc expression. Two
//! layouts are supported:
//!
//! - [`HeredocLayout::Plain`] (`<<EOF`): the whole text is one literal token
//!   wrapped in a leading and trailing newline, written verbatim.
//! - [`HeredocLayout::Dedented`] (`<<-EOF`): one literal token per line, each
//!   followed by a newline token, so the writer can re-indent every line to
//!   the enclosing block depth. Terraform strips the common indentation back
//!   off when it reads the file.

use super::{Token, TokenKind, Tokens};

/// Heredoc layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeredocLayout {
    /// `<<MARKER`, text written verbatim
    Plain,
    /// `<<-MARKER`, lines indented with the enclosing block
    Dedented,
}

/// Double every `${` and `%{` so the text is read back as a literal
///
/// # Examples
///
/// ```
/// use tfsynth::core::hcl::heredoc::escape_template_sequences;
///
/// assert_eq!(escape_template_sequences("${a} %{ if b }"), "$${a} %%{ if b }");
/// ```
pub fn escape_template_sequences(text: &str) -> String {
    text.replace("${", "$${").replace("%{", "%%{")
}

/// Encode `text` as a heredoc terminated by `marker`
///
/// `marker` is the bare terminator (e.g. `SCRIPT`); the dedent hyphen of the
/// opening token comes from `layout`. When `escape` is set, interpolation and
/// directive sequences are doubled first. Any input, including the empty
/// string, produces a well-formed sequence.
pub fn encode_heredoc(text: &str, marker: &str, layout: HeredocLayout, escape: bool) -> Tokens {
    let text = if escape {
        escape_template_sequences(text)
    } else {
        text.to_string()
    };

    let mut tokens = Vec::new();

    match layout {
        HeredocLayout::Dedented => {
            tokens.push(Token::new(TokenKind::OpenHeredoc, format!("<<-{marker}")));
            tokens.push(Token::newline());
            for line in text.split('\n') {
                tokens.push(Token::new(TokenKind::QuotedLit, line));
                tokens.push(Token::newline());
            }
        }
        HeredocLayout::Plain => {
            tokens.push(Token::new(TokenKind::OpenHeredoc, format!("<<{marker}")));
            tokens.push(Token::new(TokenKind::QuotedLit, format!("\n{text}\n")));
        }
    }

    tokens.push(Token::new(TokenKind::CloseHeredoc, marker));
    tokens
}
