// ABOUTME: Shared utility functions for the catalog
// ABOUTME: Identifier generation and slug derivation

use uuid::Uuid;

/// Generate a new record identifier (UUID v4, hyphenated lowercase)
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Derive a URL-safe slug from a display name.
///
/// ASCII alphanumerics are lowercased and kept. Accented Latin letters are
/// transliterated to their ASCII base, other characters separate words and
/// every run of separators collapses into a single `-`. Returns `"item"`
/// when nothing usable remains.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        let ascii = if c.is_ascii_alphanumeric() {
            Some(AsciiFold::Char(c.to_ascii_lowercase()))
        } else {
            transliterate(c).map(AsciiFold::Str)
        };

        match ascii {
            Some(folded) => {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                match folded {
                    AsciiFold::Char(c) => slug.push(c),
                    AsciiFold::Str(s) => slug.push_str(s),
                }
            }
            None => pending_dash = true,
        }
    }

    if slug.is_empty() {
        "item".to_string()
    } else {
        slug
    }
}

enum AsciiFold {
    Char(char),
    Str(&'static str),
}

/// Lowercase ASCII spelling of a Latin-1 / Latin Extended-A letter
fn transliterate(c: char) -> Option<&'static str> {
    let folded = match c.to_lowercase().next()? {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'æ' => "ae",
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => "c",
        'ď' | 'đ' | 'ð' => "d",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => "e",
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => "g",
        'ĥ' | 'ħ' => "h",
        'ì' | 'í' | 'î' | 'ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => "i",
        'ĵ' => "j",
        'ķ' => "k",
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => "l",
        'ñ' | 'ń' | 'ņ' | 'ň' => "n",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => "o",
        'œ' => "oe",
        'ŕ' | 'ŗ' | 'ř' => "r",
        'ś' | 'ŝ' | 'ş' | 'š' => "s",
        'ß' => "ss",
        'ţ' | 'ť' | 'ŧ' => "t",
        'þ' => "th",
        'ù' | 'ú' | 'û' | 'ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => "u",
        'ŵ' => "w",
        'ý' | 'ÿ' | 'ŷ' => "y",
        'ź' | 'ż' | 'ž' => "z",
        _ => return None,
    };
    Some(folded)
}

/// Unicode-aware case folding used for case-insensitive keys.
///
/// SQLite's `LOWER()` and `NOCASE` only fold ASCII, so case-insensitive
/// lookups compare against columns written with this function instead.
pub fn fold_case(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Folded search text over several fields, one field per line
pub fn search_key<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> String {
    fields
        .into_iter()
        .flatten()
        .map(fold_case)
        .filter(|field| !field.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append a numeric suffix to a base slug (`n` of 1 returns the base unchanged)
pub fn slug_with_suffix(base: &str, n: u32) -> String {
    if n <= 1 {
        base.to_string()
    } else {
        format!("{}-{}", base, n)
    }
}
