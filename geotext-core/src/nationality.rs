//! Tabela de adjetivos pátrios ("Brazilian" → BR), usada só no modo agressivo.

use std::collections::HashMap;

use crate::index::GazetteerIndex;
use crate::normalize::{normalize, MatchMode};
use crate::records::NationalityRecord;

/// Mapa imutável adjetivo → país.
#[derive(Debug, Clone, Default)]
pub struct NationalityTable {
    exact: HashMap<String, String>,
    folded: HashMap<String, String>,
}

impl NationalityTable {
    /// Constrói a tabela. Adjetivos que também são nomes de país ficam de fora:
    /// o país tem precedência.
    pub fn build(records: &[NationalityRecord], index: &GazetteerIndex) -> Self {
        let mut table = Self::default();
        for record in records {
            let key = normalize(&record.adjective);
            let code = record.country_code.trim().to_ascii_uppercase();
            if key.is_empty() || code.is_empty() || index.is_country_name(&key) {
                continue;
            }
            table.folded.insert(key.to_lowercase(), code.clone());
            table.exact.insert(key, code);
        }
        table
    }

    pub fn lookup(&self, key: &str, mode: MatchMode) -> Option<&str> {
        let code = match mode {
            MatchMode::Default => self.exact.get(key),
            MatchMode::Aggressive => self.folded.get(mode.fold(key).as_ref()),
        };
        code.map(String::as_str)
    }

    /// Maior número de tokens entre os adjetivos.
    pub fn max_tokens(&self) -> usize {
        self.exact
            .keys()
            .map(|key| key.split(' ').count())
            .max()
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::PlaceRecord;

    #[test]
    fn test_lookup_ignores_case_in_aggressive_mode() {
        let records = vec![NationalityRecord::new("Japanese", "JP")];
        let table = NationalityTable::build(&records, &GazetteerIndex::default());
        assert_eq!(table.lookup("Japanese", MatchMode::Default), Some("JP"));
        assert_eq!(table.lookup("japanese", MatchMode::Aggressive), Some("JP"));
        assert_eq!(table.lookup("japanese", MatchMode::Default), None);
    }

    #[test]
    fn test_country_names_take_precedence() {
        let countries = vec![PlaceRecord::country("Kuwait", "KW", 4_137_309)];
        let index = GazetteerIndex::from_parts(&[], &countries, &[], &[], &[]);
        let records = vec![
            NationalityRecord::new("Kuwait", "KW"),
            NationalityRecord::new("Kuwaiti", "KW"),
        ];
        let table = NationalityTable::build(&records, &index);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("Kuwaiti", MatchMode::Default), Some("KW"));
    }
}
