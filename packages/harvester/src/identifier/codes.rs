//! Short slugs for the consolidated codes of the Russian Federation.

use regex::Regex;
use std::sync::LazyLock;

use super::digest::{hex_digest, SHORT_DIGEST_LEN};

/// Heading fragment (lowercase) to slug, checked in order.
///
/// Specific fragments come before fragments they contain.
pub const CODE_SLUGS: &[(&str, &str)] = &[
    ("гражданский кодекс", "gk-rf"),
    ("уголовный кодекс", "uk-rf"),
    ("трудовой кодекс", "tk-rf"),
    ("налоговый кодекс", "nk-rf"),
    ("кодекс об административных правонарушениях", "koap-rf"),
    ("административных правонарушениях", "koap-rf"),
    ("арбитражный процессуальный", "apk-rf"),
    ("гражданский процессуальный", "gpk-rf"),
    ("уголовно-процессуальный", "upk-rf"),
    ("уголовно-исполнительный", "uik-rf"),
    ("бюджетный кодекс", "bk-rf"),
    ("земельный кодекс", "zk-rf"),
    ("водный кодекс", "vk-rf"),
    ("лесной кодекс", "lk-rf"),
    ("воздушный кодекс", "vozk-rf"),
    ("жилищный кодекс", "zhk-rf"),
    ("семейный кодекс", "sk-rf"),
    ("таможенный кодекс", "tamk-rf"),
    ("градостроительный кодекс", "grk-rf"),
    ("кодекс торгового мореплавания", "ktm-rf"),
    ("кодекс внутреннего водного транспорта", "kvvt-rf"),
    ("кодекс административного судопроизводства", "kas-rf"),
];

/// "часть первая" / "часть 2" style part marker.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PART_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"часть\s+(перв|втор|трет|четв[её]рт|[1-4])").expect("valid regex")
});

/// Extract the part number (1-4) from a lowercase heading.
fn part_number(heading_lower: &str) -> Option<u8> {
    let marker = PART_PATTERN.captures(heading_lower)?.get(1)?.as_str();
    match marker {
        "перв" | "1" => Some(1),
        "втор" | "2" => Some(2),
        "трет" | "3" => Some(3),
        "4" => Some(4),
        m if m.starts_with("четв") => Some(4),
        _ => None,
    }
}

/// Resolve the identifier of a code from its heading.
///
/// Known codes get their short slug, with `-N` appended for multi-part
/// codes. Unknown codes get `code-` plus a digest of the heading.
///
/// # Examples
/// ```
/// use ruslaw_harvester::identifier::code_slug;
///
/// assert_eq!(code_slug("Гражданский кодекс Российской Федерации (часть первая)"), "gk-rf-1");
/// assert_eq!(code_slug("Трудовой кодекс Российской Федерации"), "tk-rf");
/// ```
#[must_use]
pub fn code_slug(heading: &str) -> String {
    let heading_lower = heading.to_lowercase();

    let Some((_, slug)) = CODE_SLUGS
        .iter()
        .find(|(fragment, _)| heading_lower.contains(fragment))
    else {
        return format!("code-{}", hex_digest(heading, SHORT_DIGEST_LEN));
    };

    match part_number(&heading_lower) {
        Some(part) => format!("{slug}-{part}"),
        None => (*slug).to_string(),
    }
}
