//! # Registros de Entrada do Gazetteer
//!
//! Os registros chegam já parseados por quem carrega os dados (exportações do
//! GeoNames, arquivos de aliases customizados etc.). O núcleo não lê arquivos:
//! recebe um [`RecordSet`] e compila o índice a partir dele.
//!
//! ## Tipos de registro
//!
//! | Registro               | Chave               | Valor                        |
//! |------------------------|---------------------|------------------------------|
//! | [`PlaceRecord`]        | nome do lugar       | país, admin1, população      |
//! | [`AliasRecord`]        | grafia alternativa  | país e população canônicos   |
//! | [`AbbreviationRecord`] | sigla ("MA", "UK")  | país, população de referência|
//! | [`NationalityRecord`]  | adjetivo pátrio     | país                         |

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Papel que um nome desempenha no gazetteer.
///
/// A saída separa cidades, países, estados e nacionalidades com base nesta
/// variante. A desambiguação em si só olha país e população.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceKind {
    /// Cidade (ex: "Recife", "Cambridge").
    City,
    /// País (ex: "Brasil", "Japan").
    Country,
    /// Divisão administrativa de primeiro nível (estados, províncias, prefeituras).
    AdminDivision,
    /// Sigla de país ou estado. Só serve como evidência de contexto.
    Abbreviation,
    /// Adjetivo pátrio ("Brazilian"), consultado apenas no modo agressivo.
    Nationality,
}

impl Default for PlaceKind {
    fn default() -> Self {
        PlaceKind::City
    }
}

/// Um lugar com metadados: cidade, país ou divisão administrativa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRecord {
    pub name: String,
    /// Código ISO de 2 letras (ex: "BR").
    pub country_code: String,
    #[serde(default)]
    pub admin1_code: Option<String>,
    /// População; ausente vale 0.
    #[serde(default)]
    pub population: u64,
    #[serde(default)]
    pub kind: PlaceKind,
}

impl PlaceRecord {
    pub fn new(
        name: impl Into<String>,
        country_code: impl Into<String>,
        population: u64,
        kind: PlaceKind,
    ) -> Self {
        Self {
            name: name.into(),
            country_code: country_code.into(),
            admin1_code: None,
            population,
            kind,
        }
    }

    pub fn city(name: impl Into<String>, country_code: impl Into<String>, population: u64) -> Self {
        Self::new(name, country_code, population, PlaceKind::City)
    }

    pub fn country(name: impl Into<String>, country_code: impl Into<String>, population: u64) -> Self {
        Self::new(name, country_code, population, PlaceKind::Country)
    }

    pub fn admin_division(
        name: impl Into<String>,
        country_code: impl Into<String>,
        population: u64,
    ) -> Self {
        Self::new(name, country_code, population, PlaceKind::AdminDivision)
    }

    pub fn with_admin1(mut self, admin1_code: impl Into<String>) -> Self {
        self.admin1_code = Some(admin1_code.into());
        self
    }
}

/// Grafia alternativa que aponta para um lugar canônico
/// (ex: "Floripa" → Florianópolis, BR).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRecord {
    pub alias_name: String,
    pub canonical_country_code: String,
    /// População copiada do lugar canônico.
    #[serde(default)]
    pub population: u64,
    /// Tipo do lugar canônico; um alias de cidade é reportado como cidade.
    #[serde(default)]
    pub kind: PlaceKind,
}

impl AliasRecord {
    pub fn new(
        alias_name: impl Into<String>,
        canonical_country_code: impl Into<String>,
        population: u64,
        kind: PlaceKind,
    ) -> Self {
        Self {
            alias_name: alias_name.into(),
            canonical_country_code: canonical_country_code.into(),
            population,
            kind,
        }
    }
}

/// Sigla de país ou estado ("MA" → US, "UK" → GB).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbbreviationRecord {
    pub abbreviation: String,
    pub country_code: String,
    /// População do que a sigla abrevia, usada só no desempate.
    #[serde(default)]
    pub population: u64,
}

impl AbbreviationRecord {
    pub fn new(abbreviation: impl Into<String>, country_code: impl Into<String>, population: u64) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            country_code: country_code.into(),
            population,
        }
    }
}

/// Adjetivo pátrio ("Japanese" → JP).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalityRecord {
    pub adjective: String,
    pub country_code: String,
}

impl NationalityRecord {
    pub fn new(adjective: impl Into<String>, country_code: impl Into<String>) -> Self {
        Self {
            adjective: adjective.into(),
            country_code: country_code.into(),
        }
    }
}

/// Pacote completo de registros já parseados.
///
/// Todos os campos são opcionais na desserialização. A lista em que um
/// [`PlaceRecord`] aparece define seu [`PlaceKind`], ver [`RecordSet::from_json`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordSet {
    pub cities: Vec<PlaceRecord>,
    pub countries: Vec<PlaceRecord>,
    pub admin_divisions: Vec<PlaceRecord>,
    pub aliases: Vec<AliasRecord>,
    pub abbreviations: Vec<AbbreviationRecord>,
    pub nationalities: Vec<NationalityRecord>,
    /// Palavras que nunca devem virar match.
    pub blacklist: Vec<String>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Desserializa um pacote JSON e alinha o `kind` de cada lugar com a lista
    /// em que ele foi declarado.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut records: RecordSet = serde_json::from_str(json)?;
        records.align_kinds();
        Ok(records)
    }

    /// Serializa o pacote (usado para exportar o gazetteer de demonstração).
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn align_kinds(&mut self) {
        for record in &mut self.cities {
            record.kind = PlaceKind::City;
        }
        for record in &mut self.countries {
            record.kind = PlaceKind::Country;
        }
        for record in &mut self.admin_divisions {
            record.kind = PlaceKind::AdminDivision;
        }
    }
}
