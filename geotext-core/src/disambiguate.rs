//! # Desambiguação por País
//!
//! Quando um nome é usado por lugares em países diferentes ("Cambridge" no
//! Reino Unido e nos EUA), é preciso escolher um país por ocorrência.
//!
//! ## Ordem de decisão
//!
//! 1. Um único candidato elegível: é ele.
//! 2. Siglas no documento ("MA", "UK") apontando para algum dos países
//!    candidatos vencem a população. Se mais de um país tem evidência, vence
//!    a sigla mais próxima da ocorrência:
//!    `"Cambridge, MA is near Cambridge, UK"` → US e depois GB.
//! 3. Sem evidência: maior população; empate vai para o menor código de país.
//!
//! Candidatos que existem só por causa de uma sigla nunca são escolhidos, e
//! um span formado só por siglas não gera [`Match`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::index::Candidate;
use crate::matcher::{token_gap, RawSpan};
use crate::records::PlaceKind;

/// Uma ocorrência resolvida para um único país.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Texto como aparece no documento (ex: "Washington, D.C").
    pub text: String,
    /// Nome normalizado que bateu no índice (ex: "Washington DC").
    pub name: String,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original (exclusiva)
    pub end: usize,
    pub country_code: String,
    /// População do lugar escolhido, não a maior entre os candidatos.
    pub population: u64,
    pub kinds: BTreeSet<PlaceKind>,
}

impl Match {
    pub fn has_kind(&self, kind: PlaceKind) -> bool {
        self.kinds.contains(&kind)
    }
}

/// Ocorrência de uma sigla no documento.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Evidence {
    country_code: String,
    start_token: usize,
    end_token: usize,
}

/// Resolve spans de um documento usando as siglas do próprio documento como contexto.
#[derive(Debug, Clone, Default)]
pub struct Disambiguator {
    evidence: Vec<Evidence>,
}

impl Disambiguator {
    /// Coleta a evidência de siglas de todos os spans do documento.
    pub fn from_spans(spans: &[RawSpan]) -> Self {
        let evidence = spans
            .iter()
            .flat_map(|span| {
                span.candidates
                    .iter()
                    .filter(|c| c.has_kind(PlaceKind::Abbreviation))
                    .map(move |c| Evidence {
                        country_code: c.country_code.clone(),
                        start_token: span.start_token,
                        end_token: span.end_token,
                    })
            })
            .collect();
        Self { evidence }
    }

    /// Resolve um span. Retorna `None` para spans que são só evidência.
    pub fn resolve(&self, span: &RawSpan) -> Option<Match> {
        let eligible: Vec<&Candidate> = span
            .candidates
            .iter()
            .filter(|c| !c.is_evidence_only())
            .collect();

        let chosen = match eligible.as_slice() {
            [] => return None,
            [only] => *only,
            _ => self.choose(span, &eligible)?,
        };

        trace!(
            text = %span.text,
            country = %chosen.country_code,
            population = chosen.population,
            candidates = eligible.len(),
            "span resolvido"
        );

        Some(Match {
            text: span.text.clone(),
            name: span.key.clone(),
            start: span.start,
            end: span.end,
            country_code: chosen.country_code.clone(),
            population: chosen.population,
            kinds: chosen.kinds.clone(),
        })
    }

    fn choose<'c>(&self, span: &RawSpan, eligible: &[&'c Candidate]) -> Option<&'c Candidate> {
        let distances: Vec<Option<usize>> = eligible
            .iter()
            .map(|c| self.nearest_evidence(span, &c.country_code))
            .collect();

        match distances.iter().flatten().min() {
            Some(nearest) => {
                let evidenced: Vec<&Candidate> = eligible
                    .iter()
                    .zip(&distances)
                    .filter(|(_, distance)| **distance == Some(*nearest))
                    .map(|(c, _)| *c)
                    .collect();
                by_population(&evidenced)
            }
            None => by_population(eligible),
        }
    }

    /// Distância em tokens até a sigla mais próxima do país, ignorando o próprio span.
    fn nearest_evidence(&self, span: &RawSpan, country_code: &str) -> Option<usize> {
        self.evidence
            .iter()
            .filter(|e| e.country_code == country_code)
            .filter(|e| !(e.start_token == span.start_token && e.end_token == span.end_token))
            .map(|e| token_gap((span.start_token, span.end_token), (e.start_token, e.end_token)))
            .min()
    }
}

/// Maior população; empate fica com o menor código de país.
fn by_population<'c>(candidates: &[&'c Candidate]) -> Option<&'c Candidate> {
    candidates.iter().copied().max_by(|a, b| {
        a.population
            .cmp(&b.population)
            .then_with(|| b.country_code.cmp(&a.country_code))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(key: &str, start_token: usize, candidates: Vec<Candidate>) -> RawSpan {
        RawSpan {
            text: key.to_string(),
            key: key.to_string(),
            start: start_token * 10,
            end: start_token * 10 + key.len(),
            start_token,
            end_token: start_token + 1,
            candidates,
        }
    }

    fn city(code: &str, population: u64) -> Candidate {
        Candidate::new(code, population, PlaceKind::City)
    }

    fn abbreviation(code: &str, population: u64) -> Candidate {
        Candidate::new(code, population, PlaceKind::Abbreviation)
    }

    #[test]
    fn test_single_candidate() {
        let spans = vec![span("Recife", 0, vec![city("BR", 1_478_098)])];
        let resolved = Disambiguator::from_spans(&spans).resolve(&spans[0]).unwrap();
        assert_eq!(resolved.country_code, "BR");
        assert_eq!(resolved.population, 1_478_098);
    }

    #[test]
    fn test_largest_population_without_evidence() {
        let spans = vec![span(
            "Cambridge",
            0,
            vec![city("GB", 158_434), city("US", 118_403)],
        )];
        let resolved = Disambiguator::from_spans(&spans).resolve(&spans[0]).unwrap();
        assert_eq!(resolved.country_code, "GB");
        assert_eq!(resolved.population, 158_434);
    }

    #[test]
    fn test_equal_population_picks_smallest_code() {
        let spans = vec![span("Springfield", 0, vec![city("US", 1000), city("AU", 1000), city("CA", 1000)])];
        let disambiguator = Disambiguator::from_spans(&spans);
        for _ in 0..10 {
            assert_eq!(disambiguator.resolve(&spans[0]).unwrap().country_code, "AU");
        }
    }

    #[test]
    fn test_abbreviation_beats_population() {
        let spans = vec![
            span("Cambridge", 0, vec![city("GB", 158_434), city("US", 118_403)]),
            span("MA", 1, vec![abbreviation("US", 6_892_503)]),
        ];
        let disambiguator = Disambiguator::from_spans(&spans);
        let resolved = disambiguator.resolve(&spans[0]).unwrap();
        assert_eq!(resolved.country_code, "US");
        assert_eq!(resolved.population, 118_403);
        assert!(disambiguator.resolve(&spans[1]).is_none());
    }

    #[test]
    fn test_nearest_abbreviation_wins() {
        // Cambridge, MA is near Cambridge, UK
        let spans = vec![
            span("Cambridge", 0, vec![city("GB", 158_434), city("US", 118_403)]),
            span("MA", 1, vec![abbreviation("US", 6_892_503)]),
            span("Cambridge", 5, vec![city("GB", 158_434), city("US", 118_403)]),
            span("UK", 6, vec![abbreviation("GB", 66_488_991)]),
        ];
        let disambiguator = Disambiguator::from_spans(&spans);
        assert_eq!(disambiguator.resolve(&spans[0]).unwrap().country_code, "US");
        assert_eq!(disambiguator.resolve(&spans[2]).unwrap().country_code, "GB");
    }

    #[test]
    fn test_abbreviation_candidate_is_never_chosen() {
        // a sigla embutida no próprio nome não conta como candidato nem como evidência
        let mut mixed = city("US", 10_711_908);
        mixed.kinds.insert(PlaceKind::AdminDivision);
        let spans = vec![span(
            "Georgia",
            0,
            vec![Candidate::new("GE", 3_731_000, PlaceKind::Country), abbreviation("ZZ", 99_999_999), mixed],
        )];
        let resolved = Disambiguator::from_spans(&spans).resolve(&spans[0]).unwrap();
        assert_eq!(resolved.country_code, "US");
    }
}
