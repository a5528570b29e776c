//! Default request headers.
//!
//! Every request carries the same browser-like header set, fixed when the
//! session is initialized. Three identifiers in it are random per session.

use uuid::Uuid;

use crate::auth::Credential;
use crate::traits::Headers;

pub const ORIGIN: &str = "https://www.kimi.com";
pub const REFERER: &str = "https://www.kimi.com/";

const CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const EDGE_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36 Edg/124.0.0.0";
const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15";
const FIREFOX_UA: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:125.0) Gecko/20100101 Firefox/125.0";

const DEVICE_ID_MIN: u128 = 1_000_000_000_000_000_000;
const DEVICE_ID_SPAN: u128 = 9_000_000_000_000_000_000;
const TRAFFIC_ID_LEN: usize = 20;
const TRAFFIC_ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// User-Agent for an impersonation profile such as `chrome110` or
/// `safari17_0`. Unknown profiles get the Chrome string.
pub fn user_agent_for(profile: &str) -> &'static str {
    let profile = profile.to_ascii_lowercase();
    if profile.starts_with("edge") {
        EDGE_UA
    } else if profile.starts_with("safari") {
        SAFARI_UA
    } else if profile.starts_with("firefox") {
        FIREFOX_UA
    } else {
        CHROME_UA
    }
}

/// Per-session tracking identifiers the web app sends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIds {
    /// 19-digit decimal
    pub device_id: String,
    /// 19-digit decimal
    pub session_id: String,
    /// 20 lowercase alphanumerics
    pub traffic_id: String,
}

impl SessionIds {
    pub fn generate() -> Self {
        Self {
            device_id: nineteen_digits(),
            session_id: nineteen_digits(),
            traffic_id: traffic_id(),
        }
    }
}

fn nineteen_digits() -> String {
    (DEVICE_ID_MIN + Uuid::new_v4().as_u128() % DEVICE_ID_SPAN).to_string()
}

/// Base-36 digits of a random v4 UUID. Twenty digits use about 104 of its
/// 122 random bits.
fn traffic_id() -> String {
    let base = TRAFFIC_ID_ALPHABET.len() as u128;
    let mut n = Uuid::new_v4().as_u128();
    (0..TRAFFIC_ID_LEN)
        .map(|_| {
            let c = TRAFFIC_ID_ALPHABET[(n % base) as usize] as char;
            n /= base;
            c
        })
        .collect()
}

/// Build the full default header set, Authorization included.
pub fn default_headers(profile: &str, ids: &SessionIds, credential: &Credential) -> Headers {
    let mut headers = Headers::new();
    let mut set = |name: &str, value: &str| {
        headers.insert(name.to_string(), value.to_string());
    };

    set("Accept", "application/json, text/plain, */*");
    set("Accept-Language", "ru-RU,ru;q=0.9,en-US;q=0.8");
    set("Content-Type", "application/json");
    set("Origin", ORIGIN);
    set("Referer", REFERER);
    set("User-Agent", user_agent_for(profile));
    set("X-Language", "en-US");
    set("X-Msh-Platform", "web");
    set("x-msh-device-id", &ids.device_id);
    set("x-msh-session-id", &ids.session_id);
    set("x-traffic-id", &ids.traffic_id);
    set("Authorization", &credential.bearer());

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_shapes() {
        for _ in 0..50 {
            let ids = SessionIds::generate();
            assert_eq!(ids.device_id.len(), 19);
            assert!(ids.device_id.chars().all(|c| c.is_ascii_digit()));
            assert!(!ids.device_id.starts_with('0'));
            assert_eq!(ids.session_id.len(), 19);
            assert_eq!(ids.traffic_id.len(), 20);
            assert!(ids
                .traffic_id
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        }
    }

    #[test]
    fn test_traffic_id_uses_whole_alphabet() {
        let all: String = (0..100).map(|_| SessionIds::generate().traffic_id).collect();
        assert!(all.chars().any(|c| ('g'..='z').contains(&c)));
        assert!(all.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_ids_differ_between_sessions() {
        assert_ne!(SessionIds::generate(), SessionIds::generate());
    }

    #[test]
    fn test_user_agent_profiles() {
        assert!(user_agent_for("chrome110").contains("Chrome/124"));
        assert!(user_agent_for("edge101").contains("Edg/"));
        assert!(user_agent_for("safari17_0").contains("Version/17"));
        assert!(user_agent_for("Firefox133").contains("Firefox/"));
        assert_eq!(user_agent_for("netscape4"), user_agent_for("chrome110"));
    }

    #[test]
    fn test_default_headers() {
        let ids = SessionIds::generate();
        let credential = Credential::new("tok").unwrap();
        let headers = default_headers("chrome110", &ids, &credential);

        assert_eq!(headers.len(), 12);
        assert_eq!(headers["Authorization"], "Bearer tok");
        assert_eq!(headers["Origin"], "https://www.kimi.com");
        assert_eq!(headers["Referer"], "https://www.kimi.com/");
        assert_eq!(headers["X-Msh-Platform"], "web");
        assert_eq!(headers["x-msh-device-id"], ids.device_id);
        assert_eq!(headers["x-traffic-id"], ids.traffic_id);
    }
}
