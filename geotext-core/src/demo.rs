//! # Gazetteer de Demonstração
//!
//! Um recorte pequeno do GeoNames, suficiente para a interface web funcionar
//! sem arquivos externos e para os testes cobrirem os casos clássicos:
//!
//! - Capitais e estados brasileiros (nomes compartilhados entre cidade e estado,
//!   como "São Paulo" e "Rio de Janeiro").
//! - Nomes ambíguos entre países ("Cambridge", "Paris", "Georgia").
//! - Aliases ("Floripa", "Istanbul", "Bukarest") e escrita não latina ("日本").
//! - Siglas de estados e países ("MA", "UK") para desambiguação por contexto.
//! - Adjetivos pátrios para o modo agressivo.
//!
//! As populações seguem o `cities15000`/`countryInfo` do GeoNames, arredondadas.

use crate::records::{
    AbbreviationRecord, AliasRecord, NationalityRecord, PlaceKind, PlaceRecord, RecordSet,
};

/// Cidades: (nome, país, população)
const CITIES: &[(&str, &str, u64)] = &[
    // ===== BRASIL =====
    ("São Paulo", "BR", 10_021_295),
    ("Rio de Janeiro", "BR", 6_023_699),
    ("Salvador", "BR", 2_711_840),
    ("Santos", "BR", 433_966),
    ("Barueri", "BR", 240_749),
    ("Carapicuíba", "BR", 369_584),
    ("Recife", "BR", 1_478_098),
    ("Natal", "BR", 763_043),
    ("João Pessoa", "BR", 702_235),
    ("Fortaleza", "BR", 2_400_000),
    ("Teresina", "BR", 744_512),
    ("Aracaju", "BR", 571_149),
    ("Maceió", "BR", 932_748),
    ("São Luís", "BR", 957_515),
    ("Manaus", "BR", 1_802_014),
    ("Palmas", "BR", 228_297),
    ("Belém", "BR", 1_407_737),
    ("Rio Branco", "BR", 348_354),
    ("Belo Horizonte", "BR", 2_373_224),
    ("Vitória", "BR", 365_855),
    ("Goiânia", "BR", 1_171_195),
    ("Brasília", "BR", 2_207_718),
    ("Campo Grande", "BR", 786_797),
    ("Cuiabá", "BR", 540_814),
    ("Porto Alegre", "BR", 1_372_741),
    ("Curitiba", "BR", 1_718_421),
    ("Florianópolis", "BR", 421_240),
    ("Rio Grande", "BR", 186_544),
    ("Francisco Beltrão", "BR", 67_132),
    ("São José dos Campos", "BR", 729_737),
    // ===== MUNDO =====
    ("Lima", "PE", 7_737_002),
    ("Dublin", "IE", 1_024_027),
    ("Moscow", "RU", 10_381_222),
    ("London", "GB", 7_556_900),
    ("Cambridge", "GB", 158_434),
    ("Cambridge", "US", 118_403),
    ("Paris", "FR", 2_138_551),
    ("Paris", "US", 25_171),
    ("Havana", "CU", 2_163_824),
    ("İstanbul", "TR", 14_804_116),
    ("București", "RO", 1_877_155),
    ("New York City", "US", 8_175_133),
    ("San Francisco", "US", 864_816),
    ("Los Angeles", "US", 3_971_883),
    ("Washington, D.C.", "US", 689_545),
    ("Tokyo", "JP", 8_336_599),
    ("Beijing", "CN", 11_716_620),
    ("Mexico City", "MX", 12_294_193),
    ("Santiago", "CL", 4_837_295),
    ("Buenos Aires", "AR", 13_076_300),
];

/// Países: (nome, país, população)
const COUNTRIES: &[(&str, &str, u64)] = &[
    ("Brazil", "BR", 209_469_333),
    ("Peru", "PE", 31_989_256),
    ("Ireland", "IE", 4_853_506),
    ("Russia", "RU", 144_478_050),
    ("Japan", "JP", 126_529_100),
    ("Italy", "IT", 60_431_283),
    ("Germany", "DE", 82_927_922),
    ("India", "IN", 1_352_617_328),
    ("United States", "US", 327_167_434),
    ("United Kingdom", "GB", 66_488_991),
    ("France", "FR", 66_987_244),
    ("China", "CN", 1_392_730_000),
    ("Mexico", "MX", 126_190_788),
    ("Cuba", "CU", 11_338_138),
    ("Turkey", "TR", 82_319_724),
    ("Romania", "RO", 19_473_936),
    ("Chile", "CL", 18_729_160),
    ("Argentina", "AR", 44_494_502),
    ("Georgia", "GE", 3_731_000),
];

/// Divisões administrativas: (nome, país, código admin1, população)
const ADMIN_DIVISIONS: &[(&str, &str, &str, u64)] = &[
    ("São Paulo", "BR", "27", 41_262_199),
    ("Rio de Janeiro", "BR", "21", 15_989_929),
    ("Bahia", "BR", "05", 14_016_906),
    ("Pernambuco", "BR", "30", 8_796_448),
    ("Rio Grande do Norte", "BR", "22", 3_168_027),
    ("Paraíba", "BR", "17", 3_766_528),
    ("Ceará", "BR", "06", 8_452_381),
    ("Piauí", "BR", "20", 3_118_360),
    ("Sergipe", "BR", "28", 2_068_017),
    ("Alagoas", "BR", "02", 3_120_494),
    ("Maranhão", "BR", "13", 6_574_789),
    ("Amazonas", "BR", "04", 3_483_985),
    ("Tocantins", "BR", "31", 1_383_445),
    ("Pará", "BR", "16", 7_581_051),
    ("Acre", "BR", "01", 733_559),
    ("Minas Gerais", "BR", "15", 19_597_330),
    ("Espírito Santo", "BR", "08", 3_514_952),
    ("Goiás", "BR", "29", 6_003_788),
    ("Distrito Federal", "BR", "07", 2_570_160),
    ("Mato Grosso do Sul", "BR", "11", 2_449_024),
    ("Mato Grosso", "BR", "14", 3_035_122),
    ("Rio Grande do Sul", "BR", "23", 10_693_929),
    ("Santa Catarina", "BR", "26", 6_248_436),
    ("Paraná", "BR", "18", 10_444_526),
    ("Florida", "US", "FL", 20_271_272),
    ("New York", "US", "NY", 19_274_244),
    ("Texas", "US", "TX", 25_145_561),
    ("Massachusetts", "US", "MA", 6_892_503),
    ("Georgia", "US", "GA", 10_711_908),
    ("Hokkaido", "JP", "12", 5_383_579),
    ("North", "CM", "07", 2_442_578),
    ("Tiny Parish", "GB", "ZZ", 9_000),
];

/// Aliases: (alias, país, população, tipo)
const ALIASES: &[(&str, &str, u64, PlaceKind)] = &[
    ("Floripa", "BR", 421_240, PlaceKind::City),
    ("Sampa", "BR", 10_021_295, PlaceKind::City),
    ("Istanbul", "TR", 14_804_116, PlaceKind::City),
    ("Bukarest", "RO", 1_877_155, PlaceKind::City),
    ("Bucharest", "RO", 1_877_155, PlaceKind::City),
    ("NYC", "US", 8_175_133, PlaceKind::City),
    ("Brasil", "BR", 209_469_333, PlaceKind::Country),
    ("日本", "JP", 126_529_100, PlaceKind::Country),
    ("Deutschland", "DE", 82_927_922, PlaceKind::Country),
];

/// Siglas: (sigla, país, população do que abrevia)
const ABBREVIATIONS: &[(&str, &str, u64)] = &[
    ("MA", "US", 6_892_503),
    ("NY", "US", 19_274_244),
    ("TX", "US", 25_145_561),
    ("FL", "US", 20_271_272),
    ("GA", "US", 10_711_908),
    ("LA", "US", 3_971_883),
    ("UK", "GB", 66_488_991),
    ("SP", "BR", 41_262_199),
    ("RJ", "BR", 15_989_929),
];

/// Adjetivos pátrios: (adjetivo, país)
const NATIONALITIES: &[(&str, &str)] = &[
    ("Japanese", "JP"),
    ("French", "FR"),
    ("Chinese", "CN"),
    ("Brazilian", "BR"),
    ("American", "US"),
    ("Mexican", "MX"),
    ("Russian", "RU"),
    ("Irish", "IE"),
    ("Pole", "PL"),
];

/// Monta o pacote de registros de demonstração.
pub fn demo_records() -> RecordSet {
    RecordSet {
        cities: CITIES
            .iter()
            .map(|(name, code, population)| PlaceRecord::city(*name, *code, *population))
            .collect(),
        countries: COUNTRIES
            .iter()
            .map(|(name, code, population)| PlaceRecord::country(*name, *code, *population))
            .collect(),
        admin_divisions: ADMIN_DIVISIONS
            .iter()
            .map(|(name, code, admin1, population)| {
                PlaceRecord::admin_division(*name, *code, *population).with_admin1(*admin1)
            })
            .collect(),
        aliases: ALIASES
            .iter()
            .map(|(alias, code, population, kind)| AliasRecord::new(*alias, *code, *population, *kind))
            .collect(),
        abbreviations: ABBREVIATIONS
            .iter()
            .map(|(abbreviation, code, population)| {
                AbbreviationRecord::new(*abbreviation, *code, *population)
            })
            .collect(),
        nationalities: NATIONALITIES
            .iter()
            .map(|(adjective, code)| NationalityRecord::new(*adjective, *code))
            .collect(),
        blacklist: Vec::new(),
    }
}

/// Textos de demonstração para a interface web: (título, texto, modo sugerido)
pub fn demo_texts() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "Capitais do Nordeste",
            "As capitais do nordeste brasileiro são: Salvador na Bahia, Recife em Pernambuco, Natal fica no Rio Grande do Norte, João Pessoa fica na Paraíba, Fortaleza fica no Ceará, Teresina no Piauí, Aracaju em Sergipe, Maceió em Alagoas e São Luís no Maranhão.",
            "default",
        ),
        (
            "Cidade e estado",
            "São Paulo é a capital do estado de São Paulo. As cidades de Barueri e Carapicuíba fazem parte da Grande São Paulo. O Rio de Janeiro continua lindo.",
            "default",
        ),
        (
            "Desambiguação",
            "Cambridge, MA is near Boston, while Cambridge, UK is an hour from London.",
            "default",
        ),
        (
            "Menções de países",
            "I would like to visit Lima, Dublin and Moscow (Russia).",
            "default",
        ),
        (
            "Modo agressivo",
            "Washington, D.C., paris? INDIA, 日本, and București! Japanese people like anime, French people drink wine.",
            "aggressive",
        ),
        (
            "Aliases",
            "Floripa! Istanbul! Bukarest!",
            "default",
        ),
    ]
}
