//! # Normalização de Nomes e Modos de Matching
//!
//! Nomes do gazetteer e janelas de texto passam pela mesma normalização de
//! pontuação antes de serem comparados:
//!
//! 1. Pontos são removidos (`"D.C."` → `"DC"`, `"St. Louis"` → `"St Louis"`).
//! 2. `| \ / ,`, vírgulas CJK e qualquer travessão Unicode (`-`, `–`, `—`)
//!    viram espaço (`"Lima—Peru"` → `"Lima Peru"`).
//! 3. Pontuação nas pontas de cada palavra é descartada, incluindo aspas
//!    tipográficas, reticências e pontuação CJK (`"“Paris”…"` → `"Paris"`).
//! 4. Espaços repetidos colapsam em um só.
//!
//! O [`MatchMode`] decide o resto da política: caixa exata e apenas escrita
//! latina no modo padrão; caixa ignorada e qualquer escrita no agressivo.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GeoTextError, Result};

static DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\p{Pd}$").expect("regex de travessão válida"));

static LEADING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{P}[:punct:]]+").expect("regex de pontuação válida"));

static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{P}[:punct:]]+$").expect("regex de pontuação válida"));

/// Normaliza pontuação e espaços de um nome de lugar ou trecho de texto.
///
/// ```rust
/// use geotext_core::normalize::normalize;
///
/// assert_eq!(normalize("Washington, D.C."), "Washington DC");
/// assert_eq!(normalize("  (Russia)  "), "Russia");
/// ```
pub fn normalize(s: &str) -> String {
    let without_dots = s.replace('.', "");
    without_dots
        .replace(is_separator, " ")
        .split_whitespace()
        .map(strip_punctuation)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove pontuação (ASCII ou Unicode `P*`) das duas pontas.
pub fn strip_punctuation(s: &str) -> &str {
    let (start, end) = punctuation_bounds(s);
    &s[start..end]
}

/// Faixa de bytes de `s` que sobra depois de tirar a pontuação das pontas.
pub fn punctuation_bounds(s: &str) -> (usize, usize) {
    let start = LEADING_PUNCTUATION.find(s).map_or(0, |m| m.end());
    let end = TRAILING_PUNCTUATION
        .find(&s[start..])
        .map_or(s.len(), |m| start + m.start());
    (start, end)
}

/// Separadores que quebram tokens além do espaço.
pub fn is_separator(c: char) -> bool {
    matches!(c, '|' | '\\' | '/' | ',' | '，' | '、') || DASH.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Verifica se o token usa apenas escrita latina (ASCII, Latin-1 e Latin Extended).
///
/// No modo padrão só esses tokens podem formar candidatos.
pub fn is_latin_token(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c == '\''
                || c == '\u{2019}'
                || (c.is_alphabetic() && ('\u{00C0}'..='\u{024F}').contains(&c))
        })
}

/// Política de matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// **Padrão**: caixa exata, apenas escrita latina, sem nacionalidades.
    Default,
    /// **Agressivo**: ignora caixa, aceita qualquer escrita e procura
    /// adjetivos pátrios. Mais lento em textos longos.
    Aggressive,
}

impl MatchMode {
    pub fn name(&self) -> &'static str {
        match self {
            MatchMode::Default => "default",
            MatchMode::Aggressive => "aggressive",
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, MatchMode::Aggressive)
    }

    /// Forma da chave usada na consulta ao índice.
    pub fn fold<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self {
            MatchMode::Default => Cow::Borrowed(key),
            MatchMode::Aggressive => Cow::Owned(key.to_lowercase()),
        }
    }

    /// Diz se um token pode participar de uma janela candidata.
    pub fn accepts_token(&self, token: &str) -> bool {
        match self {
            MatchMode::Default => is_latin_token(token),
            MatchMode::Aggressive => !token.is_empty(),
        }
    }
}

impl Default for MatchMode {
    fn default() -> Self {
        MatchMode::Default
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MatchMode {
    type Err = GeoTextError;

    /// Aceita `default` e `aggressive` (sem diferenciar caixa).
    /// Qualquer outro valor é rejeitado em vez de cair num modo padrão.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(MatchMode::Default),
            "aggressive" => Ok(MatchMode::Aggressive),
            other => Err(GeoTextError::invalid_configuration(format!(
                "modo de matching desconhecido '{}' (use 'default' ou 'aggressive')",
                other
            ))),
        }
    }
}
