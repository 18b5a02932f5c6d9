use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    #[must_use]
    pub fn as_attr(self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Language {
    pub const ALL: [Language; 2] = [Language::En, Language::Ar];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    #[must_use]
    pub fn direction(self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    /// Locale used for date and number formatting.
    #[must_use]
    pub fn locale(self) -> &'static str {
        match self {
            Self::En => "en-US",
            Self::Ar => "ar-SA",
        }
    }

    /// Label on the switcher button, written in the language itself.
    #[must_use]
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Ar => "العربية",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

const BASIC_ARABIC: [(&str, &str); 20] = [
    ("Loading", "جاري التحميل"),
    ("Submit", "إرسال"),
    ("Cancel", "إلغاء"),
    ("Save", "حفظ"),
    ("Back", "رجوع"),
    ("Logout", "تسجيل الخروج"),
    ("Restaurant", "مطعم"),
    ("Audit", "تدقيق"),
    ("Yes", "نعم"),
    ("No", "لا"),
    ("Completed", "مكتمل"),
    ("Pending", "قيد الانتظار"),
    ("Active", "نشط"),
    ("Search", "بحث"),
    ("Filter", "تصفية"),
    ("Dashboard", "لوحة التحكم"),
    ("Settings", "الإعدادات"),
    ("Error", "خطأ"),
    ("Success", "نجاح"),
    ("Warning", "تحذير"),
];

/// Key to string tables per language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tables: HashMap<Language, HashMap<String, String>>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding only the built-in Arabic table.
    #[must_use]
    pub fn basic() -> Self {
        let mut catalog = Self::new();
        catalog.insert_table(
            Language::Ar,
            BASIC_ARABIC
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        );
        catalog
    }

    pub fn insert_table(&mut self, lang: Language, table: HashMap<String, String>) {
        self.tables.insert(lang, table);
    }

    #[must_use]
    pub fn has_table(&self, lang: Language) -> bool {
        self.tables.contains_key(&lang)
    }

    /// English returns the key; other languages return the catalog entry or the key.
    #[must_use]
    pub fn translate<'a>(&'a self, lang: Language, key: &'a str) -> &'a str {
        if lang == Language::En {
            return key;
        }
        self.tables
            .get(&lang)
            .and_then(|table| table.get(key))
            .filter(|value| !value.is_empty())
            .map_or(key, String::as_str)
    }
}
