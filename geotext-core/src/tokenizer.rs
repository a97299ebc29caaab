//! # Tokenizador com Offsets
//!
//! Divide o texto bruto em tokens preservando a posição original de cada um,
//! para que os matches possam ser destacados sem alterar a formatação.
//!
//! ## Regras
//!
//! - Espaços, os separadores `| \ / ,` e travessões (`-`, `–`, `—`) quebram tokens.
//! - Pontuação nas pontas é descartada tanto do texto quanto do offset:
//!   `"(Russia)."` e `"“Paris”…"` viram `Russia` e `Paris`.
//! - Pontos internos ficam no texto mas saem da chave: `"D.C."` tem texto
//!   `D.C` e chave `DC`, igual ao que [`normalize`](crate::normalize::normalize)
//!   faz com os nomes do gazetteer.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use geotext_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Washington, D.C., paris?");
//! let keys: Vec<&str> = tokens.iter().map(|t| t.key.as_str()).collect();
//! assert_eq!(keys, vec!["Washington", "DC", "paris"]);
//! ```

use serde::{Deserialize, Serialize};

use crate::normalize::{is_separator, punctuation_bounds, strip_punctuation};

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// Texto como aparece no documento, sem pontuação nas pontas.
    pub text: String,
    /// Forma normalizada usada para montar chaves de consulta.
    pub key: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Tokeniza um texto.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run_start: Option<usize> = None;

    for (byte_pos, ch) in text.char_indices() {
        if ch.is_whitespace() || is_separator(ch) {
            if let Some(start) = run_start.take() {
                flush_run(&mut tokens, text, start, byte_pos);
            }
        } else if run_start.is_none() {
            run_start = Some(byte_pos);
        }
    }

    if let Some(start) = run_start {
        flush_run(&mut tokens, text, start, text.len());
    }

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

/// Fecha uma sequência de caracteres não separadores e adiciona o token (se sobrar algo)
fn flush_run(tokens: &mut Vec<Token>, text: &str, start: usize, end: usize) {
    let raw = &text[start..end];
    let (leading, trailing) = punctuation_bounds(raw);
    let surface = &raw[leading..trailing];
    if surface.is_empty() {
        return;
    }
    let surface_start = start + leading;

    let without_dots = surface.replace('.', "");
    let key = strip_punctuation(&without_dots);
    if key.is_empty() {
        return;
    }

    tokens.push(Token {
        text: surface.to_string(),
        key: key.to_string(),
        start: surface_start,
        end: surface_start + surface.len(),
        index: 0, // será atribuído depois
    });
}
