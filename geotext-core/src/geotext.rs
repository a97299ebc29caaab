//! # GeoText — Extração de Lugares de um Documento
//!
//! Orquestra os estágios em sequência:
//!
//! ```text
//! texto ──► tokenize ──► Matcher (janelas + blacklist) ──► RawSpan*
//!                                                            │
//!           Disambiguator (siglas do documento, população) ◄─┘
//!                 │
//!                 ▼
//!   Match* ──► classificação por tipo ──► CountryMentionAggregator
//! ```
//!
//! Um [`GeoText`] é construído uma vez a partir de um [`RecordSet`] e depois só
//! é lido: pode ser compartilhado entre threads (`Arc<GeoText>`) e processar
//! vários documentos em paralelo com [`GeoText::extract_many`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{CountryMention, CountryMentionAggregator};
use crate::blacklist::Blacklist;
use crate::disambiguate::{Disambiguator, Match};
use crate::error::{GeoTextError, Result};
use crate::index::GazetteerIndex;
use crate::matcher::{Matcher, RawSpan};
use crate::nationality::NationalityTable;
use crate::normalize::MatchMode;
use crate::records::{PlaceKind, RecordSet};

/// Parâmetros de uma extração.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    #[serde(default)]
    pub mode: MatchMode,
    /// Mantém apenas cidades, divisões e nacionalidades deste país.
    /// Países mencionados diretamente nunca são filtrados.
    #[serde(default)]
    pub country: Option<String>,
}

impl ExtractOptions {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode, country: None }
    }

    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country = Some(country_code.into());
        self
    }

    /// Valida opções vindas de fora (nome do modo e código de país em texto).
    pub fn parse(mode: &str, country: Option<&str>) -> Result<Self> {
        let mode: MatchMode = mode.parse()?;
        let country = match country.map(str::trim) {
            None | Some("") => None,
            Some(code) if code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()) => {
                Some(code.to_ascii_uppercase())
            }
            Some(code) => {
                return Err(GeoTextError::invalid_configuration(format!(
                    "código de país inválido: '{code}'"
                )))
            }
        };
        Ok(Self { mode, country })
    }

    fn keeps(&self, m: &Match) -> bool {
        match &self.country {
            Some(code) => m.has_kind(PlaceKind::Country) || m.country_code.eq_ignore_ascii_case(code),
            None => true,
        }
    }
}

/// Resultado da extração de um documento.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub cities: Vec<Match>,
    pub countries: Vec<Match>,
    pub admin_divisions: Vec<Match>,
    /// Vazio fora do modo agressivo.
    pub nationalities: Vec<Match>,
    /// Todos os matches em ordem de aparição, cada um uma única vez.
    pub matches: Vec<Match>,
    pub country_mentions: Vec<CountryMention>,
}

impl Extraction {
    /// Países citados diretamente ou por adjetivo pátrio, em ordem de aparição.
    pub fn country_codes(&self) -> Vec<&str> {
        self.matches
            .iter()
            .filter(|m| m.has_kind(PlaceKind::Country) || m.has_kind(PlaceKind::Nationality))
            .map(|m| m.country_code.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    fn push(&mut self, m: Match) {
        if m.has_kind(PlaceKind::City) {
            self.cities.push(m.clone());
        }
        if m.has_kind(PlaceKind::Country) {
            self.countries.push(m.clone());
        }
        if m.has_kind(PlaceKind::AdminDivision) {
            self.admin_divisions.push(m.clone());
        }
        if m.has_kind(PlaceKind::Nationality) {
            self.nationalities.push(m.clone());
        }
        self.matches.push(m);
    }
}

/// Extrator de lugares pronto para uso.
#[derive(Debug, Clone)]
pub struct GeoText {
    index: GazetteerIndex,
    nationalities: NationalityTable,
    blacklist: Blacklist,
}

impl GeoText {
    /// Constrói o extrator. A blacklist padrão é somada à do pacote de registros.
    pub fn new(records: &RecordSet) -> Self {
        let mut blacklist = Blacklist::with_defaults();
        blacklist.extend(&records.blacklist);
        Self::with_blacklist(records, blacklist)
    }

    /// Constrói o extrator com uma blacklist própria (sem as palavras padrão).
    pub fn with_blacklist(records: &RecordSet, blacklist: Blacklist) -> Self {
        let index = GazetteerIndex::build(records);
        let nationalities = NationalityTable::build(&records.nationalities, &index);
        debug!(
            keys = index.len(),
            nationalities = nationalities.len(),
            blacklist = blacklist.len(),
            "extrator construído"
        );
        Self {
            index,
            nationalities,
            blacklist,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(&RecordSet::from_json(json)?))
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.index, &self.nationalities, &self.blacklist)
    }

    /// Número de chaves distintas no índice.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn extract(&self, text: &str, mode: MatchMode) -> Extraction {
        self.extract_with(text, &ExtractOptions::new(mode))
    }

    pub fn extract_with(&self, text: &str, options: &ExtractOptions) -> Extraction {
        let spans: Vec<RawSpan> = self.matcher().scan(text, options.mode).collect();
        let disambiguator = Disambiguator::from_spans(&spans);

        let mut extraction = Extraction::default();
        for span in &spans {
            let Some(m) = disambiguator.resolve(span) else {
                continue;
            };
            if options.keeps(&m) {
                extraction.push(m);
            }
        }
        extraction.country_mentions = CountryMentionAggregator::tally(&extraction.matches);

        debug!(
            mode = %options.mode,
            spans = spans.len(),
            matches = extraction.matches.len(),
            countries = extraction.country_mentions.len(),
            "documento processado"
        );
        extraction
    }

    /// Processa vários documentos em paralelo; a ordem da saída é a da entrada.
    pub fn extract_many<S>(&self, texts: &[S], options: &ExtractOptions) -> Vec<Extraction>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.extract_with(text.as_ref(), options))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_records;
    use crate::records::{AliasRecord, PlaceRecord};

    fn geotext() -> GeoText {
        GeoText::new(&demo_records())
    }

    fn names(matches: &[Match]) -> Vec<&str> {
        matches.iter().map(|m| m.name.as_str()).collect()
    }

    fn mentions(extraction: &Extraction) -> Vec<(&str, usize)> {
        extraction
            .country_mentions
            .iter()
            .map(|c| (c.country_code.as_str(), c.count))
            .collect()
    }

    #[test]
    fn test_city_and_state_share_a_name() {
        let text = "São Paulo é a capital do estado de São Paulo. As cidades de Barueri e Carapicuíba \
                    fazem parte da Grande São Paulo. O Rio de Janeiro continua lindo.";
        let extraction = geotext().extract(text, MatchMode::Default);
        assert_eq!(
            names(&extraction.cities),
            vec!["São Paulo", "São Paulo", "Barueri", "Carapicuíba", "São Paulo", "Rio de Janeiro"]
        );
        assert_eq!(
            names(&extraction.admin_divisions),
            vec!["São Paulo", "São Paulo", "São Paulo", "Rio de Janeiro"]
        );
        // cidade e estado contam uma vez só
        assert_eq!(mentions(&extraction), vec![("BR", 6)]);
    }

    #[test]
    fn test_longest_name_wins() {
        let text = "As capitais do nordeste brasileiro são: Salvador na Bahia, Recife em Pernambuco, \
                    Natal fica no Rio Grande do Norte, João Pessoa fica na Paraíba, Fortaleza fica no Ceará.";
        let extraction = geotext().extract(text, MatchMode::Default);
        assert_eq!(
            names(&extraction.cities),
            vec!["Salvador", "Recife", "Natal", "João Pessoa", "Fortaleza"]
        );
        assert_eq!(
            names(&extraction.admin_divisions),
            vec!["Bahia", "Pernambuco", "Rio Grande do Norte", "Paraíba", "Ceará"]
        );
    }

    #[test]
    fn test_aliases() {
        let extraction = geotext().extract("Floripa! Istanbul! Bukarest!", MatchMode::Default);
        assert_eq!(names(&extraction.cities), vec!["Floripa", "Istanbul", "Bukarest"]);
        let codes: Vec<&str> = extraction.cities.iter().map(|m| m.country_code.as_str()).collect();
        assert_eq!(codes, vec!["BR", "TR", "RO"]);
    }

    #[test]
    fn test_countries() {
        let extraction = geotext().extract(
            "Totalitarian governments such as Japan, Italy, and Germany, as well as other countries",
            MatchMode::Default,
        );
        assert_eq!(names(&extraction.countries), vec!["Japan", "Italy", "Germany"]);
        assert_eq!(extraction.country_codes(), vec!["JP", "IT", "DE"]);
        assert!(extraction.cities.is_empty());
    }

    #[test]
    fn test_admin_divisions() {
        let extraction = geotext().extract(
            "The sun is nice in Florida and the snow is nice in Hokkaido",
            MatchMode::Default,
        );
        assert_eq!(names(&extraction.admin_divisions), vec!["Florida", "Hokkaido"]);
    }

    #[test]
    fn test_multi_word_cities() {
        let extraction = geotext().extract(
            "These should only be cities: San Francisco, New York City",
            MatchMode::Aggressive,
        );
        assert_eq!(names(&extraction.cities), vec!["San Francisco", "New York City"]);
        assert!(extraction.admin_divisions.is_empty());
    }

    #[test]
    fn test_country_mention_ranking() {
        let extraction = geotext().extract(
            "I would like to visit Lima, Dublin and Moscow (Russia).",
            MatchMode::Default,
        );
        assert_eq!(mentions(&extraction), vec![("RU", 2), ("PE", 1), ("IE", 1)]);
    }

    #[test]
    fn test_abbreviation_context() {
        let extraction = geotext().extract("Cambridge, MA is near Cambridge, UK", MatchMode::Default);
        let codes: Vec<&str> = extraction.cities.iter().map(|m| m.country_code.as_str()).collect();
        assert_eq!(codes, vec!["US", "GB"]);
        // siglas não aparecem no resultado
        assert_eq!(extraction.matches.len(), 2);
        assert_eq!(mentions(&extraction), vec![("GB", 1), ("US", 1)]);
    }

    #[test]
    fn test_population_without_context() {
        let extraction = geotext().extract("Cambridge is lovely", MatchMode::Default);
        assert_eq!(extraction.cities[0].country_code, "GB");
    }

    #[test]
    fn test_aggressive_mode() {
        let extraction = geotext().extract(
            "Washington, D.C., paris? INDIA, 日本, and București!",
            MatchMode::Aggressive,
        );
        assert_eq!(names(&extraction.cities), vec!["Washington DC", "paris", "București"]);
        assert_eq!(extraction.cities[0].text, "Washington, D.C");
        assert_eq!(extraction.cities[1].country_code, "FR");
        assert_eq!(names(&extraction.countries), vec!["INDIA", "日本"]);

        let strict = geotext().extract(
            "Washington, D.C., paris? INDIA, 日本, and București!",
            MatchMode::Default,
        );
        assert_eq!(names(&strict.cities), vec!["Washington DC", "București"]);
        assert!(strict.countries.is_empty());
    }

    #[test]
    fn test_nationalities_only_in_aggressive_mode() {
        let text = "Japanese people like anime. French people often drink wine. Chinese people enjoy fireworks.";
        let aggressive = geotext().extract(text, MatchMode::Aggressive);
        assert_eq!(
            names(&aggressive.nationalities),
            vec!["Japanese", "French", "Chinese"]
        );
        assert_eq!(aggressive.country_codes(), vec!["JP", "FR", "CN"]);
        assert_eq!(mentions(&aggressive), vec![("CN", 1), ("JP", 1), ("FR", 1)]);

        let strict = geotext().extract(text, MatchMode::Default);
        assert!(strict.is_empty());
        assert!(strict.country_mentions.is_empty());
    }

    #[test]
    fn test_default_blacklist() {
        let gt = geotext();
        assert!(gt.extract("Up North we go", MatchMode::Default).is_empty());
        assert!(gt.extract("A Pole in Warsaw", MatchMode::Aggressive).is_empty());
    }

    #[test]
    fn test_short_lowercase_words_never_match() {
        let mut records = RecordSet::new();
        records.aliases = vec![AliasRecord::new("LA", "US", 3_971_883, PlaceKind::City)];
        let gt = GeoText::new(&records);

        assert!(gt.extract("la liga", MatchMode::Default).is_empty());
        assert!(gt.extract("La Liga", MatchMode::Default).is_empty());
        assert!(gt.extract("la liga", MatchMode::Aggressive).is_empty());
        assert_eq!(names(&gt.extract("I love LA", MatchMode::Default).cities), vec!["LA"]);
    }

    #[test]
    fn test_records_blacklist_is_added() {
        let mut records = RecordSet::new();
        records.cities = vec![PlaceRecord::city("Reading", "GB", 318_014)];
        assert_eq!(GeoText::new(&records).extract("Reading", MatchMode::Default).cities.len(), 1);

        records.blacklist = vec!["Reading".to_string()];
        assert!(GeoText::new(&records).extract("Reading", MatchMode::Default).is_empty());
    }

    #[test]
    fn test_typographic_punctuation_around_names() {
        let gt = geotext();
        for text in ["“Paris” is lovely", "Visit Paris…", "«Paris»"] {
            let extraction = gt.extract(text, MatchMode::Default);
            assert_eq!(names(&extraction.cities), vec!["Paris"], "{text}");
            assert_eq!(extraction.cities[0].text, "Paris");
        }

        let extraction = gt.extract("¿Lima? Lima—Peru", MatchMode::Default);
        assert_eq!(names(&extraction.cities), vec!["Lima", "Lima"]);
        assert_eq!(names(&extraction.countries), vec!["Peru"]);

        let extraction = gt.extract("東京、日本。", MatchMode::Aggressive);
        assert_eq!(names(&extraction.countries), vec!["日本"]);
    }

    #[test]
    fn test_punctuated_blacklist_seed() {
        let mut records = RecordSet::new();
        records.cities = vec![PlaceRecord::city("St. Louis", "US", 319_294)];
        let text = "I left St. Louis today";
        assert_eq!(names(&GeoText::new(&records).extract(text, MatchMode::Default).cities), vec!["St Louis"]);

        records.blacklist = vec!["St. Louis".to_string()];
        let gt = GeoText::new(&records);
        assert!(gt.extract(text, MatchMode::Default).is_empty());
        assert!(gt.extract(text, MatchMode::Aggressive).is_empty());
    }

    #[test]
    fn test_nationality_aliases_are_not_places() {
        let mut records = RecordSet::new();
        records.aliases = vec![AliasRecord::new("Carioca", "BR", 6_023_699, PlaceKind::Nationality)];
        let gt = GeoText::new(&records);
        assert!(gt.extract("Carioca", MatchMode::Default).is_empty());
        assert!(gt.extract("Carioca", MatchMode::Aggressive).is_empty());
    }

    #[test]
    fn test_small_admin_divisions_are_ignored() {
        assert!(geotext().extract("Tiny Parish", MatchMode::Default).is_empty());
    }

    #[test]
    fn test_country_filter() {
        let gt = geotext();
        let options = ExtractOptions::new(MatchMode::Default).with_country("BR");
        let extraction = gt.extract_with("Rio de Janeiro y Havana, Cuba", &options);
        assert_eq!(names(&extraction.cities), vec!["Rio de Janeiro"]);
        assert_eq!(names(&extraction.countries), vec!["Cuba"]);
        assert_eq!(mentions(&extraction), vec![("BR", 1), ("CU", 1)]);
    }

    #[test]
    fn test_parse_options() {
        let options = ExtractOptions::parse(" Aggressive ", Some("br")).unwrap();
        assert_eq!(options.mode, MatchMode::Aggressive);
        assert_eq!(options.country.as_deref(), Some("BR"));
        assert_eq!(ExtractOptions::parse("default", Some("")).unwrap().country, None);

        assert!(matches!(
            ExtractOptions::parse("fuzzy", None),
            Err(GeoTextError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            ExtractOptions::parse("default", Some("BRA")),
            Err(GeoTextError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_empty_text() {
        let extraction = geotext().extract("", MatchMode::Aggressive);
        assert_eq!(extraction, Extraction::default());
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let text = "Cambridge, Paris, Georgia and São Paulo";
        let first = GeoText::new(&demo_records()).extract(text, MatchMode::Aggressive);
        for _ in 0..5 {
            assert_eq!(GeoText::new(&demo_records()).extract(text, MatchMode::Aggressive), first);
        }
    }

    #[test]
    fn test_extract_many_keeps_order() {
        let gt = geotext();
        let texts = vec!["Lima", "Dublin and Moscow", "", "Tokyo, Japan"];
        let options = ExtractOptions::new(MatchMode::Default);
        let batch = gt.extract_many(&texts, &options);
        let sequential: Vec<Extraction> = texts.iter().map(|t| gt.extract_with(t, &options)).collect();
        assert_eq!(batch, sequential);
        assert_eq!(batch.len(), 4);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"cities":[{"name":"Recife","country_code":"br","population":1478098}]}"#;
        let gt = GeoText::from_json(json).unwrap();
        let extraction = gt.extract("Recife", MatchMode::Default);
        assert_eq!(extraction.cities[0].country_code, "BR");
        assert!(GeoText::from_json("{").is_err());
    }

    #[test]
    fn test_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GeoText>();
    }
}
