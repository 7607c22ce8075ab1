/// Target languages offered to learners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    /// Name in the language itself
    pub native: &'static str,
    /// Name in French
    pub french: &'static str,
    pub group: LanguageGroup,
    pub rtl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageGroup {
    European,
    Arabic,
    African,
}

impl LanguageGroup {
    pub fn label(&self) -> &'static str {
        match self {
            LanguageGroup::European => "Langues européennes",
            LanguageGroup::Arabic => "Arabe",
            LanguageGroup::African => "Langues africaines",
        }
    }
}

pub const DEFAULT_LANGUAGE: &str = "en";

const fn lang(
    code: &'static str,
    native: &'static str,
    french: &'static str,
    group: LanguageGroup,
    rtl: bool,
) -> Language {
    Language {
        code,
        native,
        french,
        group,
        rtl,
    }
}

use LanguageGroup::{African, Arabic, European};

pub static LANGUAGES: &[Language] = &[
    lang("en", "English", "Anglais", European, false),
    lang("es", "Español", "Espagnol", European, false),
    lang("pt", "Português", "Portugais", European, false),
    lang("it", "Italiano", "Italien", European, false),
    lang("ro", "Română", "Roumain", European, false),
    lang("pl", "Polski", "Polonais", European, false),
    lang("nl", "Nederlands", "Néerlandais", European, false),
    lang("de", "Deutsch", "Allemand", European, false),
    lang("ru", "Русский", "Russe", European, false),
    lang("uk", "Українська", "Ukrainien", European, false),
    lang("sq", "Shqip", "Albanais", European, false),
    lang("sr", "Српски", "Serbe", European, false),
    lang("bg", "Български", "Bulgare", European, false),
    lang("tr", "Türkçe", "Turc", European, false),
    lang("el", "Ελληνικά", "Grec", European, false),
    lang("hu", "Magyar", "Hongrois", European, false),
    lang("cs", "Čeština", "Tchèque", European, false),
    lang("sk", "Slovenčina", "Slovaque", European, false),
    lang("hr", "Hrvatski", "Croate", European, false),
    lang("ar", "العربية", "Arabe standard", Arabic, true),
    lang("ar-MA", "الدارجة (المغرب)", "Arabe marocain", Arabic, true),
    lang("ar-DZ", "الدارجة (الجزائر)", "Arabe algérien", Arabic, true),
    lang("ar-EG", "العامية المصرية", "Arabe égyptien", Arabic, true),
    lang("ln", "Lingála", "Lingala", African, false),
    lang("sw", "Kiswahili", "Swahili", African, false),
    lang("wo", "Wolof", "Wolof", African, false),
    lang("bm", "Bamanankan", "Bambara", African, false),
    lang("mos", "Mooré", "Mooré", African, false),
    lang("fon", "Fon gbè", "Fon", African, false),
    lang("yo", "Yorùbá", "Yoruba", African, false),
    lang("ig", "Igbo", "Igbo", African, false),
    lang("am", "አማርኛ", "Amharique", African, false),
    lang("ti", "ትግርኛ", "Tigrigna", African, true),
    lang("so", "Soomaali", "Somali", African, false),
    lang("ha", "Hausa", "Haoussa", African, false),
    lang("ff", "Pulaar", "Peul", African, false),
    lang("kg", "Kikongo", "Kikongo", African, false),
    lang("lua", "Tshiluba", "Tshiluba", African, false),
];

pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

pub fn is_supported(code: &str) -> bool {
    find(code).is_some()
}

/// Native name, or the code itself for unknown languages
pub fn native_name(code: &str) -> &str {
    find(code).map(|l| l.native).unwrap_or(code)
}

pub fn is_rtl(code: &str) -> bool {
    find(code).is_some_and(|l| l.rtl)
}

/// Languages of one picker group, in display order
pub fn in_group(group: LanguageGroup) -> impl Iterator<Item = &'static Language> {
    LANGUAGES.iter().filter(move |l| l.group == group)
}
