use log::{debug, trace};
use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::Ident;

use crate::{
    Automaton, Comment, Definition, FinalToken, GenerateError, GenerateErrorKind, Node, Result,
};

/// Options that control the names used in the generated code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateOptions {
    /// The name of the token enum.
    pub token_type: String,
    /// The name of the type that implements the `Lexicon` trait.
    pub lexicon: String,
    /// The path under which the generated code reaches the runtime crate.
    pub runtime: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            token_type: "TToken".to_string(),
            lexicon: "Lexicon".to_string(),
            runtime: "::scanpile".to_string(),
        }
    }
}

/// Generates the source code of a tokenizer with the default options.
///
/// The result is the unformatted text of a Rust module body. It is meant to be written to a file
/// by a build script and included into a module of the crate that uses it, like this:
/// ```ignore
/// pub mod lexer {
///     include!(concat!(env!("OUT_DIR"), "/lexer.rs"));
/// }
/// ```
/// The generated module contains
/// * the token enum `TToken` with all grammar tokens followed by `EOS` and `ERROR`,
/// * the type `Lexicon` that implements `scanpile::Lexicon`,
/// * the aliases `Scanner<S>` and `Token` and
/// * the function `scanner` that creates a scanner over a string slice.
pub fn generate(definition: &Definition) -> Result<String> {
    Ok(generate_tokens(definition, &GenerateOptions::default())?.to_string())
}

/// Generates the tokenizer as a token stream.
pub fn generate_tokens(definition: &Definition, options: &GenerateOptions) -> Result<TokenStream> {
    definition.validate()?;
    let generator = Generator::new(definition, options)?;
    debug!(
        "Generating tokenizer {} with {} tokens, {} nodes and {} comments",
        options.token_type,
        definition.tokens.len(),
        definition.automaton.nodes.len(),
        definition.comments.len()
    );
    Ok(generator.generate())
}

// Names the generated module defines besides the token enum and the lexicon.
const RESERVED_TYPE_NAMES: &[&str] = &["Scanner", "Token", "scanner"];

fn invalid_option(option: &'static str, value: String) -> GenerateError {
    GenerateError::new(GenerateErrorKind::InvalidOption { option, value })
}

fn parse_option<T: syn::parse::Parse>(option: &'static str, value: &str) -> Result<T> {
    syn::parse_str::<T>(value).map_err(|_| invalid_option(option, value.to_string()))
}

struct Generator<'a> {
    definition: &'a Definition,
    token_type: Ident,
    lexicon: Ident,
    runtime: syn::Path,
}

impl<'a> Generator<'a> {
    fn new(definition: &'a Definition, options: &GenerateOptions) -> Result<Self> {
        let token_type: Ident = parse_option("token_type", &options.token_type)?;
        let lexicon: Ident = parse_option("lexicon", &options.lexicon)?;
        // Both types share the generated module with the aliases and with each other.
        for (option, ident) in [("token_type", &token_type), ("lexicon", &lexicon)] {
            if RESERVED_TYPE_NAMES.iter().any(|name| ident == name) {
                return Err(invalid_option(option, ident.to_string()));
            }
        }
        if token_type == lexicon {
            return Err(invalid_option("lexicon", options.lexicon.clone()));
        }
        Ok(Self {
            definition,
            token_type,
            lexicon,
            runtime: parse_option("runtime", &options.runtime)?,
        })
    }

    fn generate(&self) -> TokenStream {
        let token_enum = self.generate_token_enum();
        let lexicon = self.generate_lexicon();
        let token_type = &self.token_type;
        let lexicon_type = &self.lexicon;
        let rt = &self.runtime;
        quote! {
            #token_enum

            #lexicon

            /// The scanner over a character source.
            pub type Scanner<S> = #rt::Scanner<#lexicon_type, S>;

            /// The token type of the scanner.
            pub type Token = #rt::Token<#token_type>;

            /// Creates a scanner over the given input.
            pub fn scanner(input: &str) -> Scanner<::std::str::Chars<'_>> {
                Scanner::new(input.chars())
            }
        }
    }

    fn variant(&self, name: &str) -> TokenStream {
        let token_type = &self.token_type;
        let name = Ident::new(name, proc_macro2::Span::call_site());
        quote! { #token_type::#name }
    }

    fn final_variant(&self, final_token: FinalToken) -> Option<TokenStream> {
        match final_token {
            FinalToken::Token(index) => Some(self.variant(&self.definition.tokens[index])),
            FinalToken::EndOfStream => Some(self.variant("EOS")),
            FinalToken::Error => Some(self.variant("ERROR")),
            FinalToken::Comment(_) => None,
        }
    }

    // The token a backtrack point saves when the scanner leaves the given node.
    // Only nodes that accept a token can be backtracked to. The start node has not consumed
    // anything yet, so there is nothing to fall back to.
    fn backtrack_token(&self, automaton: &Automaton, node: usize) -> Option<TokenStream> {
        if node == 0 {
            return None;
        }
        automaton
            .final_value(node)
            .and_then(|value| self.definition.final_token(value))
            .and_then(|final_token| self.final_variant(final_token))
    }

    fn generate_token_enum(&self) -> TokenStream {
        let token_type = &self.token_type;
        let rt = &self.runtime;
        let names: Vec<&str> = self
            .definition
            .tokens
            .iter()
            .map(String::as_str)
            .chain(["EOS", "ERROR"])
            .collect();
        let idents = names
            .iter()
            .map(|name| Ident::new(name, proc_macro2::Span::call_site()));
        let display_arms = names.iter().map(|name| {
            let variant = self.variant(name);
            quote! { #variant => #name, }
        });
        quote! {
            /// The token kinds of the scanner.
            #[allow(clippy::upper_case_acronyms)]
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
            pub enum #token_type {
                #(#idents,)*
            }

            impl ::std::fmt::Display for #token_type {
                fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                    let name = match self {
                        #(#display_arms)*
                    };
                    f.write_str(name)
                }
            }

            impl #rt::TokenKind for #token_type {
                const END_OF_STREAM: Self = #token_type::EOS;
                const ERROR: Self = #token_type::ERROR;
            }
        }
    }

    fn generate_lexicon(&self) -> TokenStream {
        let token_type = &self.token_type;
        let lexicon = &self.lexicon;
        let rt = &self.runtime;
        let whitespace = if self.definition.whitespace.is_empty() {
            TokenStream::new()
        } else {
            let guard = self
                .definition
                .whitespace
                .generate_guard(&quote! { s.next_code() });
            quote! {
                while #guard {
                    s.next_char();
                }
            }
        };
        let arms = self
            .definition
            .automaton
            .nodes
            .iter()
            .map(|node| self.generate_top_level_arm(node));
        quote! {
            /// The state dispatch of the scanner.
            #[derive(Clone, Copy, Debug, Default)]
            pub struct #lexicon;

            impl #rt::Lexicon for #lexicon {
                type Kind = #token_type;

                #[allow(
                    unused_labels,
                    unused_mut,
                    unused_variables,
                    unreachable_code,
                    clippy::never_loop
                )]
                fn next_token<S>(s: &mut #rt::ScanState<#token_type, S>)
                where
                    S: Iterator<Item = char>,
                {
                    'token: loop {
                        #whitespace
                        let mut state: usize = 0;
                        loop {
                            match state {
                                #(#arms)*
                                _ => unreachable!(),
                            }
                        }
                    }
                }
            }
        }
    }

    fn generate_top_level_arm(&self, node: &Node) -> TokenStream {
        let automaton = &self.definition.automaton;
        let backtrack = self.backtrack_token(automaton, node.id);
        let transitions = node.transitions.iter().map(|(chars, to)| {
            let guard = chars.generate_guard(&quote! { ch });
            let mark = match &backtrack {
                Some(kind) if automaton.final_value(*to).is_none() => {
                    trace!("Backtrack point on transition {} -> {}", node.id, to);
                    quote! { s.mark_backtrack_point(#kind); }
                }
                _ => TokenStream::new(),
            };
            let consume = if node.id == 0 {
                quote! { s.mark_and_next_char(); }
            } else {
                quote! { s.next_char(); }
            };
            let to = Literal::usize_unsuffixed(*to);
            let body = quote! {
                #mark
                #consume
                state = #to;
            };
            (guard, body)
        });
        let end_action = self.generate_top_level_end_action(node);
        self.generate_arm(node, "top level", transitions.collect(), end_action)
    }

    // A node arm is a chain of guarded transitions that ends with the end action.
    fn generate_arm(
        &self,
        node: &Node,
        automaton_name: &str,
        transitions: Vec<(TokenStream, TokenStream)>,
        end_action: TokenStream,
    ) -> TokenStream {
        trace!(
            "Node {} of the {} automaton with {} transitions",
            node.id,
            automaton_name,
            transitions.len()
        );
        let id = Literal::usize_unsuffixed(node.id);
        if transitions.is_empty() {
            return quote! {
                #id => {
                    #end_action
                }
            };
        }
        let branches = transitions
            .into_iter()
            .map(|(guard, body)| quote! { if #guard { #body } });
        quote! {
            #id => {
                let ch = s.next_code();
                #(#branches else)* {
                    #end_action
                }
            }
        }
    }

    fn generate_top_level_end_action(&self, node: &Node) -> TokenStream {
        let error = self.variant("ERROR");
        let rt = &self.runtime;
        let final_token = self
            .definition
            .automaton
            .final_value(node.id)
            .and_then(|value| self.definition.final_token(value));
        match final_token {
            Some(FinalToken::Comment(index)) => self.generate_comment(index),
            Some(final_token) => {
                let kind = self.final_variant(final_token);
                quote! {
                    s.set_token(#kind);
                    return;
                }
            }
            None if node.id == 0 => {
                let eos = self.variant("EOS");
                quote! {
                    if s.next_code() == #rt::END_OF_STREAM {
                        s.mark_and_next_char();
                        s.set_token(#eos);
                        return;
                    }
                    s.mark_and_next_char();
                    s.attempt_backtrack_otherwise(#error);
                    return;
                }
            }
            None => quote! {
                s.attempt_backtrack_otherwise(#error);
                return;
            },
        }
    }

    fn generate_comment(&self, index: usize) -> TokenStream {
        let comment = &self.definition.comments[index];
        debug!("Generating {}", comment.describe());
        match comment {
            Comment::Line { .. } => quote! {
                s.enter_comment();
                continue 'token;
            },
            Comment::BlockNested { automaton, .. } => {
                let arms = automaton
                    .nodes
                    .iter()
                    .map(|node| self.generate_comment_arm(automaton, node, true));
                quote! {
                    s.enter_comment();
                    let mut nesting: usize = 1;
                    let mut comment_state: usize = 0;
                    loop {
                        match comment_state {
                            #(#arms)*
                            _ => unreachable!(),
                        }
                    }
                }
            }
            Comment::BlockNonNested { automaton, .. } => {
                let arms = automaton
                    .nodes
                    .iter()
                    .map(|node| self.generate_comment_arm(automaton, node, false));
                quote! {
                    s.enter_comment();
                    let mut comment_state: usize = 0;
                    loop {
                        match comment_state {
                            #(#arms)*
                            _ => unreachable!(),
                        }
                    }
                }
            }
        }
    }

    fn generate_comment_arm(&self, automaton: &Automaton, node: &Node, nested: bool) -> TokenStream {
        let transitions = node
            .transitions
            .iter()
            .map(|(chars, to)| {
                let guard = chars.generate_guard(&quote! { ch });
                let to = Literal::usize_unsuffixed(*to);
                let body = quote! {
                    s.next_char();
                    comment_state = #to;
                };
                (guard, body)
            })
            .collect();
        let error = self.variant("ERROR");
        let end_action = match (automaton.final_value(node.id), nested) {
            (Some(0), _) => quote! { comment_state = 0; },
            (Some(1), true) => quote! {
                nesting += 1;
                comment_state = 0;
            },
            (Some(2), true) => quote! {
                nesting -= 1;
                if nesting == 0 {
                    continue 'token;
                }
                comment_state = 0;
            },
            (Some(1), false) => quote! { continue 'token; },
            // An unterminated or malformed comment.
            _ => quote! {
                s.attempt_backtrack_otherwise(#error);
                return;
            },
        };
        self.generate_arm(node, "comment", transitions, end_action)
    }
}
