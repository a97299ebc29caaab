//! # Matcher — Varredura do Texto contra o Gazetteer
//!
//! Percorre os tokens do documento procurando janelas que sejam chaves do
//! índice. Em cada posição tenta primeiro a janela mais longa possível
//! (até o maior número de tokens de qualquer chave) e vai encurtando:
//!
//! ```text
//! "New York City is big"
//!  [New York City]      ← hit com 3 tokens, consome a janela
//!                 [is]  ← bloqueado (2 caracteres com minúscula)
//!                    [big] ← sem hit
//! ```
//!
//! Janelas bloqueadas pela [`Blacklist`] são descartadas antes da consulta.
//! Um hit consome a janela inteira, então os spans nunca se sobrepõem e saem
//! ordenados pelo offset inicial.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::blacklist::Blacklist;
use crate::index::{Candidate, GazetteerIndex};
use crate::nationality::NationalityTable;
use crate::normalize::MatchMode;
use crate::records::PlaceKind;
use crate::tokenizer::{tokenize, Token};

/// Um trecho do texto que bateu com pelo menos um candidato.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSpan {
    /// Texto original do trecho.
    pub text: String,
    /// Chave normalizada usada na consulta (antes de ignorar caixa).
    pub key: String,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original (exclusiva)
    pub end: usize,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice após o último token
    pub end_token: usize,
    /// Países candidatos, ordenados por código.
    pub candidates: Vec<Candidate>,
}

impl RawSpan {
    /// Trecho formado só por siglas: serve de evidência, não é um lugar.
    pub fn is_evidence_only(&self) -> bool {
        self.candidates.iter().all(Candidate::is_evidence_only)
    }

}

/// Distância em tokens entre duas faixas `[start, end)` (0 quando se tocam).
pub(crate) fn token_gap(a: (usize, usize), b: (usize, usize)) -> usize {
    if b.0 >= a.1 {
        b.0 - a.1
    } else {
        a.0.saturating_sub(b.1)
    }
}

/// Varre textos contra um índice imutável.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'g> {
    index: &'g GazetteerIndex,
    nationalities: &'g NationalityTable,
    blacklist: &'g Blacklist,
}

impl<'g> Matcher<'g> {
    pub fn new(
        index: &'g GazetteerIndex,
        nationalities: &'g NationalityTable,
        blacklist: &'g Blacklist,
    ) -> Self {
        Self {
            index,
            nationalities,
            blacklist,
        }
    }

    /// Inicia a varredura de um texto. A sequência é preguiçosa e pode ser
    /// clonada ou reiniciada.
    pub fn scan<'t>(&self, text: &'t str, mode: MatchMode) -> Scan<'g, 't> {
        let mut max_window = self.index.max_tokens();
        if mode.is_aggressive() {
            max_window = max_window.max(self.nationalities.max_tokens());
        }

        Scan {
            matcher: *self,
            text,
            tokens: tokenize(text),
            mode,
            max_window: max_window.max(1),
            cursor: 0,
        }
    }

    fn is_blacklisted(&self, key: &str, mode: MatchMode) -> bool {
        if self.blacklist.contains(key) {
            return true;
        }
        mode.is_aggressive() && self.blacklist.contains_word(&key.to_lowercase())
    }

    fn candidates_for(&self, key: &str, mode: MatchMode) -> Vec<Candidate> {
        let mut candidates = self
            .index
            .lookup(key, mode)
            .map(<[Candidate]>::to_vec)
            .unwrap_or_default();

        if mode.is_aggressive() {
            if let Some(code) = self.nationalities.lookup(key, mode) {
                let population = self.index.country_population(code).unwrap_or(0);
                merge_nationality(&mut candidates, code, population);
            }
        }
        candidates
    }
}

/// Um adjetivo pátrio vira candidato de nível país com a população total do país.
fn merge_nationality(candidates: &mut Vec<Candidate>, code: &str, population: u64) {
    match candidates.binary_search_by(|c| c.country_code.as_str().cmp(code)) {
        Ok(pos) => {
            candidates[pos].kinds.insert(PlaceKind::Nationality);
        }
        Err(pos) => {
            candidates.insert(pos, Candidate::new(code, population, PlaceKind::Nationality));
        }
    }
}

/// Sequência de [`RawSpan`] de um documento.
#[derive(Debug, Clone)]
pub struct Scan<'g, 't> {
    matcher: Matcher<'g>,
    text: &'t str,
    tokens: Vec<Token>,
    mode: MatchMode,
    max_window: usize,
    cursor: usize,
}

impl<'g, 't> Scan<'g, 't> {
    /// Volta ao início do documento.
    pub fn restart(&mut self) {
        self.cursor = 0;
    }

    fn try_window(&self, first: usize, len: usize) -> Option<RawSpan> {
        let window = &self.tokens[first..first + len];
        if !window.iter().all(|t| self.mode.accepts_token(&t.key)) {
            return None;
        }

        let key = window
            .iter()
            .map(|t| t.key.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        if self.matcher.is_blacklisted(&key, self.mode) {
            trace!(candidate = %key, "candidato bloqueado pela blacklist");
            return None;
        }

        let candidates = self.matcher.candidates_for(&key, self.mode);
        if candidates.is_empty() {
            return None;
        }

        let start = window[0].start;
        let end = window[len - 1].end;
        Some(RawSpan {
            text: self.text[start..end].to_string(),
            key,
            start,
            end,
            start_token: first,
            end_token: first + len,
            candidates,
        })
    }
}

impl Iterator for Scan<'_, '_> {
    type Item = RawSpan;

    fn next(&mut self) -> Option<RawSpan> {
        while self.cursor < self.tokens.len() {
            let first = self.cursor;
            let longest = self.max_window.min(self.tokens.len() - first);

            // Mais longa primeiro
            for len in (1..=longest).rev() {
                if let Some(span) = self.try_window(first, len) {
                    self.cursor = first + len;
                    return Some(span);
                }
            }
            self.cursor += 1;
        }
        None
    }
}

impl FusedIterator for Scan<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AbbreviationRecord, NationalityRecord, PlaceRecord, RecordSet};

    struct Fixture {
        index: GazetteerIndex,
        nationalities: NationalityTable,
        blacklist: Blacklist,
    }

    impl Fixture {
        fn new(records: &RecordSet) -> Self {
            let index = GazetteerIndex::build(records);
            let nationalities = NationalityTable::build(&records.nationalities, &index);
            Self {
                index,
                nationalities,
                blacklist: Blacklist::with_defaults(),
            }
        }

        fn matcher(&self) -> Matcher<'_> {
            Matcher::new(&self.index, &self.nationalities, &self.blacklist)
        }
    }

    fn records() -> RecordSet {
        let mut records = RecordSet::new();
        records.cities = vec![
            PlaceRecord::city("New York City", "US", 8_175_133),
            PlaceRecord::city("San Francisco", "US", 864_816),
            PlaceRecord::city("York", "GB", 153_717),
            PlaceRecord::city("Paris", "FR", 2_138_551),
            PlaceRecord::city("Washington DC", "US", 689_545),
        ];
        records.admin_divisions = vec![
            PlaceRecord::admin_division("New York", "US", 19_274_244),
            PlaceRecord::admin_division("North", "CM", 2_442_578),
        ];
        records.countries = vec![
            PlaceRecord::country("India", "IN", 1_352_617_328),
            PlaceRecord::country("日本", "JP", 126_529_100),
        ];
        records.abbreviations = vec![AbbreviationRecord::new("LA", "US", 3_971_883)];
        records.nationalities = vec![NationalityRecord::new("French", "FR")];
        records
    }

    fn keys(spans: &[RawSpan]) -> Vec<&str> {
        spans.iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn test_longest_match_first() {
        let fixture = Fixture::new(&records());
        let spans: Vec<RawSpan> = fixture
            .matcher()
            .scan("These should only be cities: San Francisco, New York City", MatchMode::Default)
            .collect();
        assert_eq!(keys(&spans), vec!["San Francisco", "New York City"]);
    }

    #[test]
    fn test_spans_are_ordered_and_disjoint() {
        let fixture = Fixture::new(&records());
        let text = "New York and York, then Paris, New York City and York again";
        let spans: Vec<RawSpan> = fixture.matcher().scan(text, MatchMode::Default).collect();
        assert_eq!(spans.len(), 5);
        for pair in spans.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start_token < pair[1].start_token);
        }
        for span in &spans {
            assert_eq!(&text[span.start..span.end], span.text);
        }
    }

    #[test]
    fn test_default_mode_is_case_sensitive_and_latin_only() {
        let fixture = Fixture::new(&records());
        let spans: Vec<RawSpan> = fixture
            .matcher()
            .scan("paris? INDIA, 日本, and India", MatchMode::Default)
            .collect();
        assert_eq!(keys(&spans), vec!["India"]);
    }

    #[test]
    fn test_aggressive_mode() {
        let fixture = Fixture::new(&records());
        let spans: Vec<RawSpan> = fixture
            .matcher()
            .scan("Washington, D.C., paris? INDIA, 日本, and French wine", MatchMode::Aggressive)
            .collect();
        assert_eq!(
            keys(&spans),
            vec!["Washington DC", "paris", "INDIA", "日本", "French"]
        );
        assert_eq!(spans[0].text, "Washington, D.C");
        let french = &spans[4];
        assert!(french.candidates[0].has_kind(PlaceKind::Nationality));
        assert_eq!(french.candidates[0].country_code, "FR");
    }

    #[test]
    fn test_blacklist_is_applied_before_lookup() {
        let fixture = Fixture::new(&records());
        let spans: Vec<RawSpan> = fixture
            .matcher()
            .scan("North of la liga, north LA", MatchMode::Aggressive)
            .collect();
        assert_eq!(keys(&spans), vec!["LA"]);
        assert!(spans[0].is_evidence_only());
    }

    #[test]
    fn test_scan_is_restartable() {
        let fixture = Fixture::new(&records());
        let mut scan = fixture.matcher().scan("Paris and York", MatchMode::Default);
        let first: Vec<RawSpan> = scan.by_ref().collect();
        assert!(scan.next().is_none());
        scan.restart();
        let second: Vec<RawSpan> = scan.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_empty_text() {
        let fixture = Fixture::new(&records());
        assert_eq!(fixture.matcher().scan("", MatchMode::Default).count(), 0);
    }

    #[test]
    fn test_token_gap() {
        let fixture = Fixture::new(&records());
        let spans: Vec<RawSpan> = fixture
            .matcher()
            .scan("Paris is far from York", MatchMode::Default)
            .collect();
        let paris = (spans[0].start_token, spans[0].end_token);
        let york = (spans[1].start_token, spans[1].end_token);
        assert_eq!(token_gap(paris, york), 3);
        assert_eq!(token_gap(york, paris), 3);
        assert_eq!(token_gap((0, 1), (1, 2)), 0);
    }
}
