use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a taxonomy
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse taxonomy: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate tag '{tag}' in {category} / {subcategory}")]
    DuplicateTag {
        category: String,
        subcategory: String,
        tag: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub name: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// Location of a tag inside the taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPath {
    pub category: String,
    pub subcategory: String,
    pub tag: String,
}

/// Static skill/interest taxonomy: category -> subcategory -> tag
///
/// Read-only once loaded. Matching never consults it; it is used to validate
/// and display tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    pub categories: Vec<Category>,
}

impl Taxonomy {
    /// Build a taxonomy, rejecting tags repeated within one subcategory
    pub fn new(categories: Vec<Category>) -> Result<Self, TaxonomyError> {
        for category in &categories {
            for sub in &category.subcategories {
                let mut seen = HashSet::new();
                for tag in &sub.tags {
                    if !seen.insert(tag.as_str()) {
                        return Err(TaxonomyError::DuplicateTag {
                            category: category.name.clone(),
                            subcategory: sub.name.clone(),
                            tag: tag.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self { categories })
    }

    /// Parse a taxonomy from TOML
    ///
    /// ```toml
    /// [[categories]]
    /// name = "Инструменты"
    ///
    /// [[categories.subcategories]]
    /// name = "Струнные"
    /// tags = ["Гитара", "Бас-гитара"]
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, TaxonomyError> {
        let parsed: Taxonomy = toml::from_str(source)?;
        Self::new(parsed.categories)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TaxonomyError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The taxonomy shipped with the service
    pub fn builtin() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|(category, subs)| Category {
                name: category.to_string(),
                subcategories: subs
                    .iter()
                    .map(|(sub, tags)| Subcategory {
                        name: sub.to_string(),
                        tags: tags.iter().map(|t| t.to_string()).collect(),
                    })
                    .collect(),
            })
            .collect();

        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.iter_paths().any(|(_, _, t)| t == tag)
    }

    /// Every (category, subcategory) pair the tag appears under
    pub fn paths(&self, tag: &str) -> Vec<TagPath> {
        self.iter_paths()
            .filter(|(_, _, t)| *t == tag)
            .map(|(category, subcategory, tag)| TagPath {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
                tag: tag.to_string(),
            })
            .collect()
    }

    /// Tags from `tags` the taxonomy does not know, in input order
    pub fn unknown_tags<'a>(&self, tags: &'a [String]) -> Vec<&'a str> {
        tags.iter()
            .map(String::as_str)
            .filter(|tag| !self.contains(tag))
            .collect()
    }

    pub fn tag_count(&self) -> usize {
        self.iter_paths().count()
    }

    fn iter_paths(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.categories.iter().flat_map(|c| {
            c.subcategories.iter().flat_map(move |s| {
                s.tags
                    .iter()
                    .map(move |t| (c.name.as_str(), s.name.as_str(), t.as_str()))
            })
        })
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

type BuiltinCategory = (&'static str, &'static [(&'static str, &'static [&'static str])]);

const BUILTIN: &[BuiltinCategory] = &[
    (
        "Инструменты",
        &[
            ("Струнные", &["Гитара", "Бас-гитара", "Укулеле", "Скрипка", "Виолончель", "Контрабас"]),
            ("Клавишные", &["Фортепиано", "Синтезатор", "Орган"]),
            ("Ударные", &["Барабаны", "Перкуссия", "Кахон"]),
            ("Духовые", &["Саксофон", "Труба", "Флейта", "Тромбон", "Кларнет"]),
        ],
    ),
    (
        "Вокал",
        &[
            ("Техника", &["Вокал", "Бэк-вокал", "Экстрим-вокал", "Оперный вокал"]),
            ("Тембр", &["Сопрано", "Альт", "Тенор", "Баритон", "Бас"]),
        ],
    ),
    (
        "Жанры",
        &[
            ("Популярная музыка", &["Поп", "Инди", "Хип-хоп", "R&B"]),
            ("Рок", &["Рок", "Панк", "Метал", "Альтернатива"]),
            ("Джаз и блюз", &["Джаз", "Блюз", "Фанк", "Соул"]),
            ("Электроника", &["Техно", "Хаус", "Эмбиент", "Драм-н-бейс"]),
            ("Академическая", &["Классика", "Камерная музыка"]),
        ],
    ),
    (
        "Продакшн",
        &[
            ("Студия", &["Сведение", "Мастеринг", "Звукорежиссура", "Запись"]),
            ("Творчество", &["Аранжировка", "Композиция", "Битмейкинг", "Тексты песен"]),
        ],
    ),
    (
        "Сцена",
        &[
            ("Выступления", &["Концерты", "Кавер-группа", "Уличные выступления", "Сессионная работа"]),
            ("Обучение", &["Преподавание", "Сольфеджио", "Теория музыки"]),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_is_valid() {
        let builtin = Taxonomy::builtin();
        let rebuilt = Taxonomy::new(builtin.categories.clone()).unwrap();

        assert_eq!(builtin, rebuilt);
        assert!(builtin.tag_count() > 50);
    }

    #[test]
    fn test_path_lookup() {
        let taxonomy = Taxonomy::builtin();
        let paths = taxonomy.paths("Гитара");

        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].category, "Инструменты");
        assert_eq!(paths[0].subcategory, "Струнные");
    }

    #[test]
    fn test_subcategory_name_is_not_a_tag() {
        // "Рок" is both a subcategory name and a tag; only the tag counts
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.paths("Рок").len(), 1);
        assert!(taxonomy.paths("Техника").is_empty());
    }

    #[test]
    fn test_tag_in_several_subcategories() {
        let source = r#"
            [[categories]]
            name = "Инструменты"

            [[categories.subcategories]]
            name = "Струнные"
            tags = ["Гитара", "Бас"]

            [[categories]]
            name = "Вокал"

            [[categories.subcategories]]
            name = "Тембр"
            tags = ["Тенор", "Бас"]
        "#;

        let taxonomy = Taxonomy::from_toml_str(source).unwrap();
        let paths = taxonomy.paths("Бас");

        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].category, "Инструменты");
        assert_eq!(paths[0].subcategory, "Струнные");
        assert_eq!(paths[1].category, "Вокал");
        assert_eq!(paths[1].subcategory, "Тембр");
        assert!(taxonomy.unknown_tags(&["Бас".to_string()]).is_empty());
    }

    #[test]
    fn test_unknown_tags() {
        let taxonomy = Taxonomy::builtin();
        let tags = vec!["Гитара".to_string(), "Варган".to_string()];

        assert_eq!(taxonomy.unknown_tags(&tags), vec!["Варган"]);
    }

    #[test]
    fn test_from_toml() {
        let source = r#"
            [[categories]]
            name = "Инструменты"

            [[categories.subcategories]]
            name = "Струнные"
            tags = ["Гитара", "Домра"]
        "#;

        let taxonomy = Taxonomy::from_toml_str(source).unwrap();
        assert!(taxonomy.contains("Домра"));
        assert!(!taxonomy.contains("Вокал"));
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let source = r#"
            [[categories]]
            name = "Инструменты"

            [[categories.subcategories]]
            name = "Струнные"
            tags = ["Гитара", "Гитара"]
        "#;

        let err = Taxonomy::from_toml_str(source).unwrap_err();
        assert!(matches!(err, TaxonomyError::DuplicateTag { .. }));
    }
}
