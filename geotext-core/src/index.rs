//! # Índice do Gazetteer
//!
//! Compila cidades, países, divisões administrativas, aliases e siglas em um
//! mapa `nome normalizado → candidatos`, onde cada candidato é um par
//! `(país, população)`. Um mesmo nome pode apontar para vários países:
//!
//! ```text
//! "Cambridge" → [(GB, 158434), (US, 118403)]
//! "Georgia"   → [(GE, 3731000, país), (US, 10711908, estado)]
//! ```
//!
//! ## Regras de construção
//!
//! - Divisões administrativas só entram com população ≥ 15000.
//! - Um candidato por país em cada chave; colisões entre registros diferentes
//!   ficam com a maior população. O mesmo registro repetido (nome, país e tipo
//!   iguais) é mesclado e a última população vence.
//! - Se o nome é de um país, as cidades homônimas saem da chave
//!   ("Mexico" é sempre o país).
//! - Siglas entram como candidatos do tipo [`PlaceKind::Abbreviation`]; sozinhas
//!   servem apenas como evidência para desambiguar outros nomes.
//!
//! O índice é imutável depois de construído e pode ser compartilhado entre
//! threads sem trava.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::normalize::{normalize, MatchMode};
use crate::records::{AbbreviationRecord, AliasRecord, PlaceKind, PlaceRecord, RecordSet};

/// População mínima para uma divisão administrativa entrar no índice.
pub const ADMIN_DIVISION_MIN_POPULATION: u64 = 15_000;

/// Um país candidato para um nome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub country_code: String,
    pub population: u64,
    /// Papéis que o nome tem neste país (ex: São Paulo é cidade e estado).
    pub kinds: BTreeSet<PlaceKind>,
}

impl Candidate {
    pub fn new(country_code: impl Into<String>, population: u64, kind: PlaceKind) -> Self {
        Self {
            country_code: country_code.into(),
            population,
            kinds: BTreeSet::from([kind]),
        }
    }

    pub fn has_kind(&self, kind: PlaceKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Candidato que só existe por causa de uma sigla.
    pub fn is_evidence_only(&self) -> bool {
        self.kinds.iter().all(|k| *k == PlaceKind::Abbreviation)
    }
}

/// Índice imutável `chave normalizada → candidatos` (ordenados por país).
#[derive(Debug, Clone, Default)]
pub struct GazetteerIndex {
    /// Chaves com caixa exata (modo padrão).
    exact: HashMap<String, Vec<Candidate>>,
    /// Chaves em minúsculas (modo agressivo).
    folded: HashMap<String, Vec<Candidate>>,
    /// População total de cada país (registros de país).
    country_populations: HashMap<String, u64>,
    /// Maior número de tokens entre todas as chaves.
    max_tokens: usize,
}

impl GazetteerIndex {
    /// Constrói o índice a partir de um pacote de registros.
    pub fn build(records: &RecordSet) -> Self {
        Self::from_parts(
            &records.cities,
            &records.countries,
            &records.admin_divisions,
            &records.aliases,
            &records.abbreviations,
        )
    }

    /// Constrói o índice a partir das listas separadas.
    pub fn from_parts(
        cities: &[PlaceRecord],
        countries: &[PlaceRecord],
        admin_divisions: &[PlaceRecord],
        aliases: &[AliasRecord],
        abbreviations: &[AbbreviationRecord],
    ) -> Self {
        let mut builder = IndexBuilder::new();
        for record in cities.iter().chain(countries).chain(admin_divisions) {
            builder.add_place(record);
        }
        for alias in aliases {
            builder.add_alias(alias);
        }
        for abbreviation in abbreviations {
            builder.add_abbreviation(abbreviation);
        }
        builder.build()
    }

    /// Consulta uma janela já normalizada. No modo agressivo a caixa é ignorada.
    pub fn lookup(&self, key: &str, mode: MatchMode) -> Option<&[Candidate]> {
        let entry = match mode {
            MatchMode::Default => self.exact.get(key),
            MatchMode::Aggressive => self.folded.get(mode.fold(key).as_ref()),
        };
        entry.map(Vec::as_slice)
    }

    /// Verifica se o nome é de um país (em qualquer caixa).
    pub fn is_country_name(&self, key: &str) -> bool {
        self.folded
            .get(&key.to_lowercase())
            .map(|candidates| candidates.iter().any(|c| c.has_kind(PlaceKind::Country)))
            .unwrap_or(false)
    }

    pub fn country_population(&self, country_code: &str) -> Option<u64> {
        self.country_populations.get(country_code).copied()
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Número de chaves com caixa exata.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

/// Acumula registros antes de congelar o índice.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    /// (chave, país, tipo) → população; registro repetido sobrescreve.
    entries: HashMap<(String, String, PlaceKind), u64>,
    country_populations: HashMap<String, u64>,
    dropped_admin_divisions: usize,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_place(&mut self, record: &PlaceRecord) {
        if record.kind == PlaceKind::AdminDivision
            && record.population < ADMIN_DIVISION_MIN_POPULATION
        {
            self.dropped_admin_divisions += 1;
            return;
        }
        if record.kind == PlaceKind::Country {
            self.country_populations
                .insert(country_code(&record.country_code), record.population);
        }
        self.insert(&record.name, &record.country_code, record.population, record.kind);
    }

    /// Aliases de nacionalidade são ignorados: adjetivos vêm só da
    /// [`NationalityTable`](crate::nationality::NationalityTable).
    pub fn add_alias(&mut self, record: &AliasRecord) {
        if record.kind == PlaceKind::Nationality {
            return;
        }
        // O alias herda a população do canônico, então herda o corte também
        if record.kind == PlaceKind::AdminDivision
            && record.population < ADMIN_DIVISION_MIN_POPULATION
        {
            self.dropped_admin_divisions += 1;
            return;
        }
        self.insert(
            &record.alias_name,
            &record.canonical_country_code,
            record.population,
            record.kind,
        );
    }

    pub fn add_abbreviation(&mut self, record: &AbbreviationRecord) {
        self.insert(
            &record.abbreviation,
            &record.country_code,
            record.population,
            PlaceKind::Abbreviation,
        );
    }

    fn insert(&mut self, name: &str, code: &str, population: u64, kind: PlaceKind) {
        let key = normalize(name);
        let code = country_code(code);
        if key.is_empty() || code.is_empty() {
            return;
        }
        self.entries.insert((key, code, kind), population);
    }

    /// Congela o índice.
    pub fn build(self) -> GazetteerIndex {
        let exact = group_entries(&self.entries, |key| key.to_string());
        let folded = group_entries(&self.entries, str::to_lowercase);
        let max_tokens = exact
            .keys()
            .map(|key| key.split(' ').count())
            .max()
            .unwrap_or(0);

        debug!(
            keys = exact.len(),
            folded_keys = folded.len(),
            countries = self.country_populations.len(),
            dropped_admin_divisions = self.dropped_admin_divisions,
            max_tokens,
            "índice do gazetteer construído"
        );

        GazetteerIndex {
            exact,
            folded,
            country_populations: self.country_populations,
            max_tokens,
        }
    }
}

/// Populações por tipo de um candidato em construção.
type KindPopulations = BTreeMap<PlaceKind, u64>;

/// Agrupa as entradas por chave (após `key_fn`) e país, aplicando as regras de mesclagem.
fn group_entries<F>(
    entries: &HashMap<(String, String, PlaceKind), u64>,
    key_fn: F,
) -> HashMap<String, Vec<Candidate>>
where
    F: Fn(&str) -> String,
{
    let mut grouped: HashMap<String, BTreeMap<String, KindPopulations>> = HashMap::new();
    for ((key, code, kind), population) in entries {
        let slot = grouped
            .entry(key_fn(key))
            .or_default()
            .entry(code.clone())
            .or_default()
            .entry(*kind)
            .or_insert(0);
        *slot = (*slot).max(*population);
    }

    grouped
        .into_iter()
        .filter_map(|(key, by_country)| {
            let names_country = by_country
                .values()
                .any(|kinds| kinds.contains_key(&PlaceKind::Country));

            let candidates: Vec<Candidate> = by_country
                .into_iter()
                .filter_map(|(code, mut kinds)| {
                    if names_country {
                        kinds.remove(&PlaceKind::City);
                    }
                    finish_candidate(code, kinds)
                })
                .collect();

            if candidates.is_empty() {
                None
            } else {
                Some((key, candidates))
            }
        })
        .collect()
}

fn finish_candidate(code: String, kinds: KindPopulations) -> Option<Candidate> {
    if kinds.is_empty() {
        return None;
    }
    // Sigla só define a população quando não há lugar de verdade por trás
    let real = kinds
        .iter()
        .filter(|(kind, _)| **kind != PlaceKind::Abbreviation)
        .map(|(_, population)| *population)
        .max();
    let population = real.unwrap_or_else(|| kinds.values().copied().max().unwrap_or(0));

    Some(Candidate {
        country_code: code,
        population,
        kinds: kinds.into_keys().collect(),
    })
}

fn country_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
