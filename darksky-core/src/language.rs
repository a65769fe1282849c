/// Language codes accepted by the `lang` query parameter.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "ar",
    "az",
    "be",
    "bg",
    "bs",
    "ca",
    "cs",
    "de",
    "el",
    "en",
    "es",
    "et",
    "fr",
    "hr",
    "hu",
    "id",
    "it",
    "is",
    "kw",
    "nb",
    "nl",
    "pl",
    "pt",
    "ru",
    "sk",
    "sl",
    "sr",
    "sv",
    "tet",
    "tr",
    "uk",
    "x-pig-latin",
    "zh",
    "zh-tw",
];

/// Case-insensitive membership test against [`SUPPORTED_LANGUAGES`].
pub fn is_language_valid(lang: &str) -> bool {
    let lower = lang.to_lowercase();
    SUPPORTED_LANGUAGES.contains(&lower.as_str())
}
