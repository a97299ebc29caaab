//! # Contagem de Menções por País
//!
//! Cada [`Match`] resolvido conta uma menção para o seu país. O ranking é:
//!
//! | Chave | Ordem |
//! |-------|-------|
//! | número de menções | decrescente |
//! | maior população entre os matches do país | decrescente |
//! | código do país | crescente |
//!
//! ```text
//! "Lima, Dublin and Moscow (Russia)" → RU 2, IE 1, PE 1
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::disambiguate::Match;

/// Uma linha do ranking de países.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryMention {
    pub country_code: String,
    pub count: usize,
    /// Maior população entre os matches que contribuíram.
    pub max_population: u64,
}

/// Agrega matches de um documento em um ranking de países.
#[derive(Debug, Clone, Default)]
pub struct CountryMentionAggregator {
    tally: HashMap<String, (usize, u64)>,
}

impl CountryMentionAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atalho: agrega uma sequência inteira e devolve o ranking.
    pub fn tally<'a, I>(matches: I) -> Vec<CountryMention>
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let mut aggregator = Self::new();
        for m in matches {
            aggregator.add(m);
        }
        aggregator.ranking()
    }

    pub fn add(&mut self, m: &Match) {
        let entry = self.tally.entry(m.country_code.clone()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 = entry.1.max(m.population);
    }

    /// Ranking determinístico, independente da ordem interna do mapa.
    pub fn ranking(&self) -> Vec<CountryMention> {
        let mut mentions: Vec<CountryMention> = self
            .tally
            .iter()
            .map(|(code, (count, max_population))| CountryMention {
                country_code: code.clone(),
                count: *count,
                max_population: *max_population,
            })
            .collect();

        mentions.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| b.max_population.cmp(&a.max_population))
                .then_with(|| a.country_code.cmp(&b.country_code))
        });
        mentions
    }
}
