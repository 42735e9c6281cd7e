//! Macro expansion engine
//!
//! An independent token-rewriting interpreter over raw formula/text
//! fragments. It has its own tokenizer, much coarser than the document one
//! since the fragments it sees are already isolated, and reduces the token
//! buffer in place: registered macro invocations capture their declared
//! number of brace groups (arguments expand inside-out first), the handler's
//! replacement is reduced again with the macro's own name on a guard set,
//! then spliced back as a single opaque token, and scanning resumes at the
//! splice point. The guard is what makes expansion idempotent: replacement
//! text may invoke further macros, which expand right away, but a handler
//! can never re-match its own output.
//!
//! Unknown commands are not an error; they are reproduced verbatim, though
//! their brace groups still expand recursively with the command name pushed
//! onto the context stack.
//!
//! Math delimiters at the top level of a fragment are elided (the
//! serializer owns the outer math wrapping), except inside `\text`/`\fbox`
//! contexts, where `$` is already escaped content and stays.

use std::collections::HashMap;
use std::fmt;

use logos::Logos;

/// Errors raised during macro expansion
#[derive(Debug, Clone, PartialEq)]
pub enum ExpansionError {
    /// A macro ran out of input before its declared argument count
    /// (raised only with `strict_arity` enabled)
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
    /// A brace group never returned to depth zero, or brackets paired up
    /// with the wrong type
    UnbalancedBrace { name: String },
}

impl fmt::Display for ExpansionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionError::ArityMismatch {
                name,
                expected,
                found,
            } => write!(
                f,
                "Macro \\{} expects {} arguments, {} were provided",
                name, expected, found
            ),
            ExpansionError::UnbalancedBrace { name } => {
                write!(f, "Braces do not match in the arguments of \\{}", name)
            }
        }
    }
}

impl std::error::Error for ExpansionError {}

/// Token types of the expansion tokenizer
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum MacroTokenKind {
    #[regex(r"\\[a-zA-Z0-9]+")]
    Command,
    #[token("{")]
    BraceLeft,
    #[token("}")]
    BraceRight,
    #[token("$$")]
    MathBlock,
    #[token("$")]
    MathInline,
    #[regex(r"\\+")]
    Backslash,
    #[regex(r"[ \t\r\n]+")]
    Whitespace,
    #[regex(r"[^{}\\$ \t\r\n]+")]
    Other,
}

#[derive(Debug, Clone)]
struct MacroToken {
    kind: MacroTokenKind,
    text: String,
}

/// Handler variants: the context-aware form is chosen at registration time
enum Handler {
    /// Arity 0, pure textual replacement
    Replacement(String),
    Simple(Box<dyn Fn(&[String]) -> String + Send + Sync>),
    WithContext(Box<dyn Fn(&[String], &[String]) -> String + Send + Sync>),
}

struct Macro {
    arity: usize,
    handler: Handler,
}

/// The macro catalog plus the expansion interpreter
#[derive(Default)]
pub struct MacroExpansion {
    macros: HashMap<String, Macro>,
    strict_arity: bool,
}

enum Capture {
    /// All declared groups found; `end` is the buffer index one past the
    /// final closing brace
    Complete { arguments: Vec<String>, end: usize },
    /// Input ended (or a non-group token intervened) before the declared
    /// argument count was reached
    Shortfall { found: usize },
}

impl MacroExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an arity-0 textual replacement. A later registration for
    /// the same name overwrites the earlier one.
    pub fn add_replacement(&mut self, name: &str, replacement: &str) -> &mut Self {
        self.macros.insert(
            name.to_string(),
            Macro {
                arity: 0,
                handler: Handler::Replacement(replacement.to_string()),
            },
        );
        self
    }

    /// Register a handler over captured argument strings
    pub fn add_handler(
        &mut self,
        name: &str,
        arity: usize,
        handler: impl Fn(&[String]) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.macros.insert(
            name.to_string(),
            Macro {
                arity,
                handler: Handler::Simple(Box::new(handler)),
            },
        );
        self
    }

    /// Register a handler that also receives the enclosing-macro-name stack
    pub fn add_context_handler(
        &mut self,
        name: &str,
        arity: usize,
        handler: impl Fn(&[String], &[String]) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.macros.insert(
            name.to_string(),
            Macro {
                arity,
                handler: Handler::WithContext(Box::new(handler)),
            },
        );
        self
    }

    /// Fail with `ArityMismatch` instead of leaving under-applied macros
    /// unexpanded
    pub fn strict_arity(&mut self, strict: bool) -> &mut Self {
        self.strict_arity = strict;
        self
    }

    /// Expand every registered macro in the fragment
    pub fn expand(&self, latex: &str) -> Result<String, ExpansionError> {
        let buffer = macro_tokenize(latex);
        self.reduce_to_string(buffer, &[], &[])
    }

    fn reduce_to_string(
        &self,
        buffer: Vec<MacroToken>,
        context: &[String],
        guard: &[String],
    ) -> Result<String, ExpansionError> {
        let reduced = self.reduce(buffer, context, guard)?;
        let keep_math = context
            .iter()
            .any(|name| name == "text" || name == "fbox");

        let mut out = String::new();
        for token in &reduced {
            match token.kind {
                MacroTokenKind::MathInline | MacroTokenKind::MathBlock if !keep_math => {}
                _ => out.push_str(&token.text),
            }
        }
        Ok(out)
    }

    fn reduce(
        &self,
        mut buffer: Vec<MacroToken>,
        context: &[String],
        guard: &[String],
    ) -> Result<Vec<MacroToken>, ExpansionError> {
        let mut position = 0;

        while position < buffer.len() {
            if buffer[position].kind != MacroTokenKind::Command {
                position += 1;
                continue;
            }

            let name = buffer[position]
                .text
                .trim_start_matches('\\')
                .to_string();

            // guarded names come from a handler's own replacement text and
            // must stay literal, or expansion would never terminate
            let makro = match self.macros.get(&name) {
                Some(makro) if !guard.contains(&name) => makro,
                _ => {
                    position =
                        self.reduce_unknown(&mut buffer, position, &name, context, guard)?;
                    continue;
                }
            };

            match self.capture(&buffer, position + 1, makro.arity, &name, context, guard)? {
                Capture::Complete { arguments, end } => {
                    let replacement = match &makro.handler {
                        Handler::Replacement(text) => text.clone(),
                        Handler::Simple(handler) => handler(&arguments),
                        Handler::WithContext(handler) => handler(&arguments, context),
                    };
                    // replacement text is rescanned so further invocations
                    // inside it expand right away, with this macro guarded
                    let mut inner_guard = guard.to_vec();
                    inner_guard.push(name.clone());
                    let expanded = self.reduce_to_string(
                        macro_tokenize(&replacement),
                        context,
                        &inner_guard,
                    )?;
                    // rope-style rebuild: the whole invocation span collapses
                    // to one opaque token, and scanning resumes right on it
                    let mut next = Vec::with_capacity(buffer.len());
                    next.extend_from_slice(&buffer[..position]);
                    next.push(MacroToken {
                        kind: MacroTokenKind::Other,
                        text: expanded,
                    });
                    next.extend_from_slice(&buffer[end..]);
                    buffer = next;
                    position += 1; // the spliced token is fully reduced
                }
                Capture::Shortfall { found } => {
                    if self.strict_arity {
                        return Err(ExpansionError::ArityMismatch {
                            name,
                            expected: makro.arity,
                            found,
                        });
                    }
                    position += 1; // left unexpanded
                }
            }
        }

        Ok(buffer)
    }

    /// Capture `arity` brace groups following `start`, expanding each
    /// group's contents before the handler ever sees it
    fn capture(
        &self,
        buffer: &[MacroToken],
        start: usize,
        arity: usize,
        name: &str,
        context: &[String],
        guard: &[String],
    ) -> Result<Capture, ExpansionError> {
        let mut arguments = Vec::with_capacity(arity);
        let mut index = start;

        while arguments.len() < arity {
            while index < buffer.len() && buffer[index].kind == MacroTokenKind::Whitespace {
                index += 1;
            }
            if index >= buffer.len() || buffer[index].kind != MacroTokenKind::BraceLeft {
                return Ok(Capture::Shortfall {
                    found: arguments.len(),
                });
            }

            let close = group_end(buffer, index, name)?;
            let mut inner_context = context.to_vec();
            inner_context.push(name.to_string());
            let inner = buffer[index + 1..close].to_vec();
            arguments.push(self.reduce_to_string(inner, &inner_context, guard)?);
            index = close + 1;
        }

        Ok(Capture::Complete {
            arguments,
            end: index,
        })
    }

    /// Reproduce an unregistered command verbatim, still expanding inside
    /// its directly attached brace groups so the context stack covers them
    fn reduce_unknown(
        &self,
        buffer: &mut Vec<MacroToken>,
        position: usize,
        name: &str,
        context: &[String],
        guard: &[String],
    ) -> Result<usize, ExpansionError> {
        let mut groups = Vec::new();
        let mut index = position + 1;
        while index < buffer.len() && buffer[index].kind == MacroTokenKind::BraceLeft {
            let Ok(close) = group_end(buffer, index, name) else {
                break; // unterminated: leave the rest untouched
            };
            groups.push((index + 1, close));
            index = close + 1;
        }

        if groups.is_empty() {
            return Ok(position + 1);
        }

        let mut inner_context = context.to_vec();
        inner_context.push(name.to_string());

        let mut text = buffer[position].text.clone();
        for (group_start, group_close) in groups {
            let inner = buffer[group_start..group_close].to_vec();
            text.push('{');
            text.push_str(&self.reduce_to_string(inner, &inner_context, guard)?);
            text.push('}');
        }

        let mut next = Vec::with_capacity(buffer.len());
        next.extend_from_slice(&buffer[..position]);
        next.push(MacroToken {
            kind: MacroTokenKind::Other,
            text,
        });
        next.extend_from_slice(&buffer[index..]);
        *buffer = next;

        Ok(position + 1)
    }
}

/// Index of the brace closing the group opened at `open`; the depth counter
/// must return to zero before the group counts as closed
fn group_end(
    buffer: &[MacroToken],
    open: usize,
    name: &str,
) -> Result<usize, ExpansionError> {
    let mut depth = 0usize;
    let mut index = open;
    while index < buffer.len() {
        match buffer[index].kind {
            MacroTokenKind::BraceLeft => depth += 1,
            MacroTokenKind::BraceRight => {
                depth -= 1;
                if depth == 0 {
                    return Ok(index);
                }
            }
            _ => {}
        }
        index += 1;
    }
    Err(ExpansionError::UnbalancedBrace {
        name: name.to_string(),
    })
}

fn macro_tokenize(latex: &str) -> Vec<MacroToken> {
    let mut lexer = MacroTokenKind::lexer(latex);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let text = lexer.slice().to_string();
        match result {
            Ok(kind) => tokens.push(MacroToken { kind, text }),
            // the rule set is total over the fragments we see; anything
            // else passes through opaquely
            Err(()) => tokens.push(MacroToken {
                kind: MacroTokenKind::Other,
                text,
            }),
        }
    }
    tokens
}
