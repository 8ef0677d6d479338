//! Client platform detection from the User-Agent string.

use tapcard_vcf::Dialect;

/// Client platform family, used to pick the encoder dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Apple,
    Android,
    Other,
}

const APPLE_TOKENS: [&str; 5] = ["iphone", "ipad", "ipod", "macintosh", "mac os"];

impl Platform {
    /// Detects the platform family from a User-Agent header value.
    #[must_use]
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if APPLE_TOKENS.iter().any(|token| ua.contains(token)) {
            Self::Apple
        } else if ua.contains("android") {
            Self::Android
        } else {
            Self::Other
        }
    }

    /// Encoder dialect for this platform. Unknown clients get the portable
    /// Android spelling.
    #[must_use]
    pub const fn dialect(self) -> Dialect {
        match self {
            Self::Apple => Dialect::apple(),
            Self::Android | Self::Other => Dialect::android(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tapcard_vcf::SocialFieldStrategy;

    #[test]
    fn iphone_is_apple() {
        let ua = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Safari/604.1";
        assert_eq!(Platform::from_user_agent(ua), Platform::Apple);
    }

    #[test]
    fn macos_safari_is_apple() {
        let ua = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) Safari/605.1.15";
        assert_eq!(Platform::from_user_agent(ua), Platform::Apple);
    }

    #[test]
    fn android_chrome_is_android() {
        let ua = "Mozilla/5.0 (Linux; Android 14; Pixel 8) Chrome/120.0 Mobile Safari/537.36";
        assert_eq!(Platform::from_user_agent(ua), Platform::Android);
    }

    #[test]
    fn desktop_linux_is_other() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64) Firefox/121.0";
        assert_eq!(Platform::from_user_agent(ua), Platform::Other);
    }

    #[test]
    fn empty_user_agent_is_other() {
        assert_eq!(Platform::from_user_agent(""), Platform::Other);
    }

    #[test]
    fn non_apple_platforms_share_the_portable_dialect() {
        assert_eq!(
            Platform::Android.dialect().social,
            SocialFieldStrategy::TypedUrl
        );
        assert_eq!(
            Platform::Other.dialect().social,
            SocialFieldStrategy::TypedUrl
        );
        assert_eq!(
            Platform::Apple.dialect().social,
            SocialFieldStrategy::StructuredProfile
        );
    }
}
