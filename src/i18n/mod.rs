//! Localized user-facing messages.
//!
//! Error bodies returned to callers go through [`Message::text`]. The locale
//! is negotiated once per request from `Accept-Language`.

mod catalog;

pub use catalog::Message;

/// Locales with a translated catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
    Fr,
    Pt,
    De,
}

impl Locale {
    /// Resolve a language tag ("pt-BR", "fr", "EN") by its primary subtag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        match primary.as_str() {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            "fr" => Some(Locale::Fr),
            "pt" => Some(Locale::Pt),
            "de" => Some(Locale::De),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::Pt => "pt",
            Locale::De => "de",
        }
    }

    /// Pick the supported locale with the highest quality value from an
    /// `Accept-Language` header, falling back to `default`.
    pub fn negotiate(accept_language: Option<&str>, default: Locale) -> Locale {
        let Some(header) = accept_language else {
            return default;
        };

        let mut best: Option<(Locale, f32)> = None;
        for item in header.split(',') {
            let mut parts = item.split(';');
            let tag = parts.next().unwrap_or_default();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            if quality <= 0.0 {
                continue;
            }
            if let Some(locale) = Locale::from_tag(tag) {
                // Ties keep the earlier entry.
                if best.map_or(true, |(_, q)| quality > q) {
                    best = Some((locale, quality));
                }
            }
        }

        best.map(|(locale, _)| locale).unwrap_or(default)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(Locale::from_tag("pt-BR"), Some(Locale::Pt));
        assert_eq!(Locale::from_tag("EN"), Some(Locale::En));
        assert_eq!(Locale::from_tag("de_AT"), Some(Locale::De));
        assert_eq!(Locale::from_tag("ja"), None);
        assert_eq!(Locale::from_tag(""), None);
    }

    #[test]
    fn test_negotiate_by_quality() {
        assert_eq!(
            Locale::negotiate(Some("ja, fr;q=0.5, es;q=0.8"), Locale::En),
            Locale::Es
        );
        assert_eq!(Locale::negotiate(Some("de-DE,de;q=0.9"), Locale::En), Locale::De);
        assert_eq!(Locale::negotiate(Some("fr;q=0"), Locale::En), Locale::En);
    }

    #[test]
    fn test_negotiate_falls_back() {
        assert_eq!(Locale::negotiate(None, Locale::Pt), Locale::Pt);
        assert_eq!(Locale::negotiate(Some("zh-CN, ja"), Locale::Fr), Locale::Fr);
        assert_eq!(Locale::negotiate(Some("*"), Locale::En), Locale::En);
    }
}
