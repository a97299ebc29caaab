//! # Blacklist
//!
//! Palavras que nunca viram match, mesmo que coincidam com uma chave do índice
//! (ex: "North" é divisão administrativa em vários países, "Pole" é adjetivo pátrio).
//!
//! Além da lista explícita há uma regra derivada: qualquer candidato de
//! exatamente 2 caracteres com ao menos uma letra minúscula é bloqueado.
//! Isso impede que "la" ou "La" colidam com a sigla "LA".

use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::normalize::normalize;

/// Palavras comuns que também são nacionalidades ou divisões administrativas.
pub const DEFAULT_WORDS: &[&str] = &[
    "pole", "north", "northern", "western", "central", "southern", "eastern",
];

/// Conjunto de palavras bloqueadas, sensível a caixa.
#[derive(Debug, Clone, Default)]
pub struct Blacklist {
    words: HashSet<String>,
}

impl Blacklist {
    /// Blacklist vazia: só a regra dos 2 caracteres vale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Blacklist com [`DEFAULT_WORDS`] em minúsculas e com a inicial maiúscula.
    pub fn with_defaults() -> Self {
        let mut blacklist = Self::new();
        for word in DEFAULT_WORDS {
            blacklist.insert(word);
            blacklist.insert(&capitalize(word));
        }
        blacklist
    }

    /// Guarda a palavra já normalizada, na mesma forma das chaves de consulta
    /// (`"St. Louis"` → `"St Louis"`).
    pub fn insert(&mut self, word: &str) {
        let word = normalize(word);
        if !word.is_empty() {
            self.words.insert(word);
        }
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Verifica se o candidato está bloqueado (lista explícita ou regra dos 2 caracteres).
    pub fn contains(&self, candidate: &str) -> bool {
        self.contains_word(candidate) || is_short_lowercase(candidate)
    }

    /// Apenas a lista explícita, sem a regra dos 2 caracteres.
    pub fn contains_word(&self, candidate: &str) -> bool {
        self.words.contains(candidate)
    }
}

/// Regra derivada: 2 caracteres (grafemas) com alguma letra minúscula.
pub fn is_short_lowercase(candidate: &str) -> bool {
    candidate.graphemes(true).count() == 2 && candidate.chars().any(char::is_lowercase)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
