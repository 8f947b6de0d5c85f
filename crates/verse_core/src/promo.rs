use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use shared::locale;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "584125384440";

/// Characters left untouched by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoBanner {
    pub whatsapp_number: String,
    pub greeting: String,
}

impl Default for PromoBanner {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            greeting: locale::PROMO_GREETING.to_string(),
        }
    }
}

impl PromoBanner {
    pub fn new(whatsapp_number: impl Into<String>) -> Self {
        Self {
            whatsapp_number: whatsapp_number.into(),
            ..Self::default()
        }
    }

    pub fn contact_url(&self) -> String {
        let number: String = self
            .whatsapp_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        format!(
            "https://wa.me/{number}?text={}",
            utf8_percent_encode(&self.greeting, URI_COMPONENT)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_link_matches_published_banner() {
        assert_eq!(
            PromoBanner::default().contact_url(),
            "https://wa.me/584125384440?text=%C2%A1Hola!%20Me%20gustar%C3%ADa%20m%C3%A1s%20informaci%C3%B3n%20sobre%20las%20franelas%2C%20por%20favor."
        );
    }

    #[test]
    fn number_keeps_digits_only() {
        let banner = PromoBanner {
            whatsapp_number: "+58 (412) 538-4440".to_string(),
            greeting: "hola & adiós?".to_string(),
        };

        assert_eq!(
            banner.contact_url(),
            "https://wa.me/584125384440?text=hola%20%26%20adi%C3%B3s%3F"
        );
    }
}
