//! Netscape cookie-jar parsing.
//!
//! Browser extensions export cookies in the format curl and wget use:
//! one cookie per line, seven tab-separated fields
//!
//! ```text
//! domain  include_subdomains  path  secure  expiry  name  value
//! ```
//!
//! Lines starting with `#` are comments, except the `#HttpOnly_` domain
//! prefix which marks an HttpOnly cookie. Expiry and discard information is
//! kept but never used to drop cookies: an exported session is trusted as-is.
//!
//! The `# Netscape HTTP Cookie File` header line is optional. Several
//! browser exporters omit it, so a file is judged by its cookie lines alone.

use std::path::Path;

use crate::error::{AuthError, CookieParseError};

const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// A single cookie from a Netscape cookie file.
#[derive(Clone, PartialEq, Eq)]
pub struct Cookie {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    /// Unix timestamp, `None` for session cookies.
    pub expires: Option<i64>,
    pub name: String,
    pub value: String,
    pub http_only: bool,
}

impl Cookie {
    /// Domain without the leading dot used for subdomain matching.
    pub fn host(&self) -> &str {
        self.domain.trim_start_matches('.')
    }

    /// Render the cookie as a `Set-Cookie` header value.
    pub fn to_set_cookie(&self) -> String {
        let mut out = format!("{}={}; Path={}", self.name, self.value, self.path);
        if self.include_subdomains {
            out.push_str(&format!("; Domain={}", self.host()));
        }
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }

    /// URL the cookie is scoped to, used to seed a cookie store.
    pub fn origin_url(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{}://{}{}", scheme, self.host(), self.path)
    }
}

impl std::fmt::Debug for Cookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cookie")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// All cookies loaded from one file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    /// Parse the contents of a Netscape cookie file.
    pub fn parse(text: &str) -> Result<Self, CookieParseError> {
        let mut cookies = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim_end_matches('\r');
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
                Some(rest) => (rest, true),
                None if trimmed.starts_with('#') || trimmed.starts_with('$') => continue,
                None => (line, false),
            };

            cookies.push(parse_line(line, line_no, http_only)?);
        }

        Ok(Self { cookies })
    }

    /// Read and parse a cookie file.
    ///
    /// A missing file is reported as [`AuthError::CookieFileNotFound`]; any
    /// other failure as [`AuthError::CookieParse`].
    pub async fn load(path: &Path) -> Result<Self, AuthError> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::CookieFileNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(err) => {
                return Err(AuthError::CookieParse {
                    path: path.to_path_buf(),
                    source: err.into(),
                });
            }
        };

        Self::parse(&text).map_err(|source| AuthError::CookieParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Look up a cookie by name. Later entries win over earlier ones.
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies.iter().rev().find(|c| c.name == name)
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

fn parse_line(line: &str, line_no: usize, http_only: bool) -> Result<Cookie, CookieParseError> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 7 {
        return Err(CookieParseError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let include_subdomains = parse_flag(fields[1], line_no)?;
    let secure = parse_flag(fields[3], line_no)?;
    let expires = parse_expiry(fields[4], line_no)?;

    // curl writes value-only cookies with an empty name.
    let (name, value) = if fields[5].is_empty() {
        (fields[6].to_string(), String::new())
    } else {
        (fields[5].to_string(), fields[6].to_string())
    };

    Ok(Cookie {
        domain: fields[0].to_string(),
        include_subdomains,
        path: fields[2].to_string(),
        secure,
        expires,
        name,
        value,
        http_only,
    })
}

fn parse_flag(value: &str, line: usize) -> Result<bool, CookieParseError> {
    if value.eq_ignore_ascii_case("TRUE") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("FALSE") {
        Ok(false)
    } else {
        Err(CookieParseError::InvalidFlag {
            line,
            value: value.to_string(),
        })
    }
}

fn parse_expiry(value: &str, line: usize) -> Result<Option<i64>, CookieParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let parsed = value
        .parse::<i64>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().map(|f| f as i64))
        .ok_or_else(|| CookieParseError::InvalidExpiry {
            line,
            value: value.to_string(),
        })?;

    Ok((parsed != 0).then_some(parsed))
}
