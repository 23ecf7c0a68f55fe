//! Keyword relevance filters and the freshness predicate.

use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use reqwest::Url;

use crate::types::FeedItem;

const BROKER_INDUSTRY_KEYWORDS: &[&str] = &[
    "broker",
    "brokers",
    "forex",
    "fx",
    "cfd",
    "trading",
    "platform",
    "metatrader",
    "mt4",
    "mt5",
    "copy trading",
    "prop",
    "regulated",
    "regulation",
    "license",
    "licence",
    "withdraw",
    "deposit",
];

const FOREX_MACRO_KEYWORDS: &[&str] = &[
    "forex",
    "fx",
    "usd",
    "eur",
    "mxn",
    "brl",
    "cop",
    "clp",
    "ars",
    "pen",
    "central bank",
    "rates",
    "inflation",
    "minutes",
    "fomc",
    "ecb",
    "banxico",
    "copom",
];

const CRYPTO_KEYWORDS: &[&str] = &[
    "crypto",
    "bitcoin",
    "btc",
    "ethereum",
    "eth",
    "stablecoin",
    "blockchain",
    "token",
    "exchange",
    "defi",
    "web3",
];

/// Countries, demonyms, regional terms, regional central banks, and LATAM
/// currency codes. Matched as whole words.
const LATAM_KEYWORDS: &[&str] = &[
    "latam",
    "latin america",
    "latin american",
    "américa latina",
    "america latina",
    "latinoamérica",
    "latinoamerica",
    "mexico",
    "méxico",
    "mexican",
    "mexicano",
    "brazil",
    "brasil",
    "brazilian",
    "argentina",
    "argentine",
    "argentinian",
    "chile",
    "chilean",
    "colombia",
    "colombian",
    "peru",
    "perú",
    "peruvian",
    "uruguay",
    "paraguay",
    "ecuador",
    "bolivia",
    "venezuela",
    "costa rica",
    "panama",
    "panamá",
    "guatemala",
    "honduras",
    "nicaragua",
    "el salvador",
    "dominican",
    "república dominicana",
    "caribbean",
    "caribe",
    "banxico",
    "copom",
    "bcra",
    "banrep",
    "mxn",
    "brl",
    "ars",
    "clp",
    "cop",
    "pen",
    "uyu",
    "crc",
    "dop",
    "ves",
    "bob",
    "pyg",
    "gtq",
    "hnl",
    "nio",
    "pab",
];

/// Hosts whose every headline counts as regionally relevant.
const TRUSTED_LATAM_DOMAINS: &[&str] = &["banxico.org.mx"];

/// Topic sections of the daily brief.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    BrokerIndustry,
    ForexMacro,
    Crypto,
}

impl Topic {
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Topic::BrokerIndustry => BROKER_INDUSTRY_KEYWORDS,
            Topic::ForexMacro => FOREX_MACRO_KEYWORDS,
            Topic::Crypto => CRYPTO_KEYWORDS,
        }
    }

    /// Lowercase substring match of `title` against the topic keywords.
    #[must_use]
    pub fn matches(self, title: &str) -> bool {
        let lower = title.to_lowercase();
        self.keywords().iter().any(|kw| lower.contains(kw))
    }
}

/// Whole-word LATAM matcher over titles, plus a trusted-domain rule.
#[derive(Debug, Clone)]
pub struct LatamMatcher {
    re: Regex,
}

impl Default for LatamMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl LatamMatcher {
    #[must_use]
    pub fn new() -> Self {
        let alternation = LATAM_KEYWORDS
            .iter()
            .map(|kw| regex::escape(kw))
            .collect::<Vec<_>>()
            .join("|");
        let re = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("valid latam regex");
        Self { re }
    }

    #[must_use]
    pub fn matches_title(&self, title: &str) -> bool {
        self.re.is_match(title)
    }

    #[must_use]
    pub fn is_trusted_domain(link: &str) -> bool {
        Url::parse(link)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.trim_start_matches("www.").to_string()))
            .is_some_and(|host| TRUSTED_LATAM_DOMAINS.contains(&host.as_str()))
    }

    #[must_use]
    pub fn matches(&self, item: &FeedItem) -> bool {
        self.matches_title(&item.title) || Self::is_trusted_domain(&item.link)
    }
}

/// Whether `published_at` lies within `window_days` before `now`.
#[must_use]
pub fn is_fresh(published_at: DateTime<Utc>, now: DateTime<Utc>, window_days: i64) -> bool {
    published_at >= now - Duration::days(window_days)
}
