//! Keyword spellings shipped with the crate.
//!
//! Step keywords always include the `*` bullet.

use super::{KeywordCategory as K, KeywordTable, LanguageKeywords};

type Entries = &'static [(K, &'static [&'static str])];

const ENGLISH: Entries = &[
    (K::Feature, &["Feature", "Business Need", "Ability"]),
    (K::Background, &["Background"]),
    (K::Scenario, &["Scenario", "Example"]),
    (K::ScenarioOutline, &["Scenario Outline", "Scenario Template"]),
    (K::Examples, &["Examples", "Scenarios"]),
    (K::Given, &["Given", "*"]),
    (K::When, &["When", "*"]),
    (K::Then, &["Then", "*"]),
    (K::And, &["And", "*"]),
    (K::But, &["But", "*"]),
];

const PORTUGUESE: Entries = &[
    (K::Feature, &["Funcionalidade", "Característica", "Caracteristica"]),
    (K::Background, &["Contexto", "Cenário de Fundo", "Cenario de Fundo", "Fundo"]),
    (K::Scenario, &["Cenário", "Cenario", "Exemplo"]),
    (
        K::ScenarioOutline,
        &[
            "Esquema do Cenário",
            "Esquema do Cenario",
            "Delineação do Cenário",
            "Delineacao do Cenario",
        ],
    ),
    (K::Examples, &["Exemplos", "Cenários", "Cenarios"]),
    (K::Given, &["Dado", "Dada", "Dados", "Dadas", "*"]),
    (K::When, &["Quando", "*"]),
    (K::Then, &["Então", "Entao", "*"]),
    (K::And, &["E", "*"]),
    (K::But, &["Mas", "*"]),
];

const SPANISH: Entries = &[
    (K::Feature, &["Característica", "Necesidad del negocio", "Requisito"]),
    (K::Background, &["Antecedentes"]),
    (K::Scenario, &["Escenario", "Ejemplo"]),
    (K::ScenarioOutline, &["Esquema del escenario"]),
    (K::Examples, &["Ejemplos"]),
    (K::Given, &["Dado", "Dada", "Dados", "Dadas", "*"]),
    (K::When, &["Cuando", "*"]),
    (K::Then, &["Entonces", "*"]),
    (K::And, &["Y", "E", "*"]),
    (K::But, &["Pero", "*"]),
];

const FRENCH: Entries = &[
    (K::Feature, &["Fonctionnalité"]),
    (K::Background, &["Contexte"]),
    (K::Scenario, &["Scénario", "Exemple"]),
    (K::ScenarioOutline, &["Plan du scénario", "Plan du Scénario"]),
    (K::Examples, &["Exemples"]),
    (
        K::Given,
        &["Soit", "Sachant que", "Sachant", "Étant donné que", "Étant donné", "*"],
    ),
    (K::When, &["Quand", "Lorsque", "*"]),
    (K::Then, &["Alors", "Donc", "*"]),
    (K::And, &["Et que", "Et", "*"]),
    (K::But, &["Mais que", "Mais", "*"]),
];

const GERMAN: Entries = &[
    (K::Feature, &["Funktionalität", "Funktion"]),
    (K::Background, &["Grundlage", "Hintergrund", "Voraussetzungen", "Vorbedingungen"]),
    (K::Scenario, &["Szenario", "Beispiel"]),
    (K::ScenarioOutline, &["Szenariogrundriss", "Szenarien"]),
    (K::Examples, &["Beispiele"]),
    (K::Given, &["Angenommen", "Gegeben sei", "Gegeben seien", "*"]),
    (K::When, &["Wenn", "*"]),
    (K::Then, &["Dann", "*"]),
    (K::And, &["Und", "*"]),
    (K::But, &["Aber", "*"]),
];

const LANGUAGES: &[(&str, Entries)] = &[
    ("en", ENGLISH),
    ("pt", PORTUGUESE),
    ("pt-br", PORTUGUESE),
    ("es", SPANISH),
    ("fr", FRENCH),
    ("de", GERMAN),
];

/// Compile the built-in table.
///
/// A language whose data fails to compile is logged and left out rather than
/// taking the whole table down.
pub(super) fn table() -> KeywordTable {
    let mut table = KeywordTable::default();
    for (code, entries) in LANGUAGES {
        match LanguageKeywords::from_words(code, entries) {
            Ok(keywords) => {
                table.insert(keywords);
            }
            Err(error) => log::error!("skipping built-in keywords for `{code}`: {error}"),
        }
    }
    table
}
