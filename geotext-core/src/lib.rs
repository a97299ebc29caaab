//! # geotext-core — Extração de Lugares em Texto Livre
//!
//! Encontra cidades, países, divisões administrativas (estados, províncias) e
//! adjetivos pátrios em um documento, resolve cada ocorrência para um único
//! país e produz um ranking dos países mais mencionados.
//!
//! ## Arquitetura
//!
//! 1.  **Registros** ([`records`]): pacote de entrada no formato do GeoNames
//!     (cidades, países, divisões, aliases, siglas, nacionalidades, blacklist).
//! 2.  **Índice** ([`index`]): nome normalizado → candidatos `(país, população)`,
//!     construído uma vez e só lido depois.
//! 3.  **Tokenização** ([`tokenizer`], [`normalize`]): tokens com offsets de byte,
//!     chaves sem pontos e sem pontuação nas bordas.
//! 4.  **Matching** ([`matcher`]): janelas mais longas primeiro, filtradas pela
//!     [`blacklist`] e pelo [`MatchMode`].
//! 5.  **Desambiguação** ([`disambiguate`]): siglas do documento, depois população.
//! 6.  **Agregação** ([`aggregate`]): contagem de menções por país.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use geotext_core::{demo_records, GeoText, MatchMode};
//!
//! let geotext = GeoText::new(&demo_records());
//! let extraction = geotext.extract("I would like to visit Lima, Dublin and Moscow (Russia).", MatchMode::Default);
//!
//! assert_eq!(extraction.cities.len(), 3);
//! assert_eq!(extraction.country_mentions[0].country_code, "RU");
//! assert_eq!(extraction.country_mentions[0].count, 2);
//! ```
//!
//! ## Modos
//!
//! | Modo | Caixa | Escritas | Nacionalidades |
//! |------|-------|----------|----------------|
//! | `default` | exata | latina | não |
//! | `aggressive` | ignorada | qualquer | sim |

pub mod aggregate;
pub mod blacklist;
pub mod demo;
pub mod disambiguate;
pub mod error;
pub mod geotext;
pub mod index;
pub mod matcher;
pub mod nationality;
pub mod normalize;
pub mod records;
pub mod tokenizer;

pub use aggregate::{CountryMention, CountryMentionAggregator};
pub use blacklist::Blacklist;
pub use demo::{demo_records, demo_texts};
pub use disambiguate::{Disambiguator, Match};
pub use error::{GeoTextError, Result};
pub use geotext::{ExtractOptions, Extraction, GeoText};
pub use index::{Candidate, GazetteerIndex};
pub use matcher::{Matcher, RawSpan};
pub use normalize::{normalize, MatchMode};
pub use records::{
    AbbreviationRecord, AliasRecord, NationalityRecord, PlaceKind, PlaceRecord, RecordSet,
};
pub use tokenizer::{tokenize, Token};
