//! Error classification and remediation advice for database failures.
//!
//! Everything here is a pure function of the error text or the configured
//! URI, so the advice can be tested without a database.

use serde::Serialize;

/// Broad cause of a database failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    ConnectionRefused,
    DnsResolution,
    Authentication,
    SslTls,
    Timeout,
    Network,
    Unknown,
}

const REFUSED_NEEDLES: &[&str] = &["connection refused", "econnrefused"];
const DNS_NEEDLES: &[&str] = &[
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
    "enotfound",
];
const AUTH_NEEDLES: &[&str] = &[
    "password authentication failed",
    "authentication failed",
    "no pg_hba.conf entry",
];
const TLS_NEEDLES: &[&str] = &["ssl", "tls"];
const TIMEOUT_NEEDLES: &[&str] = &["timed out", "timeout"];
const NETWORK_NEEDLES: &[&str] = &[
    "network",
    "unreachable",
    "connection reset",
    "broken pipe",
];

/// Categories checked in order; the first whose needle appears wins.
const CATEGORY_NEEDLES: &[(ErrorCategory, &[&str])] = &[
    (ErrorCategory::ConnectionRefused, REFUSED_NEEDLES),
    (ErrorCategory::DnsResolution, DNS_NEEDLES),
    (ErrorCategory::Authentication, AUTH_NEEDLES),
    (ErrorCategory::SslTls, TLS_NEEDLES),
    (ErrorCategory::Timeout, TIMEOUT_NEEDLES),
    (ErrorCategory::Network, NETWORK_NEEDLES),
];

fn mentions(message: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| message.contains(needle))
}

/// Classify an error message by case-insensitive substring matching.
#[must_use]
pub fn categorize(message: &str) -> ErrorCategory {
    let message = message.to_lowercase();
    CATEGORY_NEEDLES
        .iter()
        .find(|(_, needles)| mentions(&message, needles))
        .map_or(ErrorCategory::Unknown, |(category, _)| *category)
}

/// Suggestions for every cause the message mentions, or a generic list.
#[must_use]
pub fn suggestions(message: &str) -> Vec<&'static str> {
    let message = message.to_lowercase();
    let mut out = Vec::new();

    if mentions(&message, REFUSED_NEEDLES) {
        out.extend([
            "PostgreSQL is not accepting connections - start it locally (e.g. 'pg_ctl start' or 'systemctl start postgresql')",
            "Check that PostgreSQL is listening on the configured port (default: 5432)",
            "For hosted databases: verify the instance is running and not paused",
        ]);
    }
    if mentions(&message, DNS_NEEDLES) {
        out.extend([
            "DNS resolution failed - check the database hostname",
            "Verify your internet connection",
            "Check that the host in your connection string is spelled correctly",
        ]);
    }
    if mentions(&message, AUTH_NEEDLES) {
        out.extend([
            "Check the database username and password",
            "Verify the role has LOGIN and CONNECT privileges",
            "Check pg_hba.conf allows this client and authentication method",
        ]);
    }
    if mentions(&message, TLS_NEEDLES) {
        out.extend([
            "SSL/TLS negotiation failed - check the sslmode in your connection string",
            "Check that the server supports the required TLS version",
            "For hosted databases: add 'sslmode=require' to the connection string",
        ]);
    }
    if mentions(&message, TIMEOUT_NEEDLES) {
        out.extend([
            "Connection timeout - check your network connectivity",
            "Increase SHINEWELL_DB_ACQUIRE_TIMEOUT_SECS",
            "For hosted databases: verify this server's IP is allowed",
        ]);
    }

    if out.is_empty() {
        out.extend([
            "Check your PostgreSQL connection string format",
            "Verify your database credentials are correct",
            "Ensure this server's IP is allowed (for hosted databases)",
            "Check that the PostgreSQL service is running",
            "Review the PostgreSQL server logs for more details",
        ]);
    }

    out
}

/// Standard remediation steps for a category.
#[must_use]
pub const fn common_solutions(category: ErrorCategory) -> &'static [&'static str] {
    match category {
        ErrorCategory::ConnectionRefused => &[
            "Start PostgreSQL: pg_ctl start",
            "Check PostgreSQL status: systemctl status postgresql",
            "Verify port 5432 is available",
            "Check firewall settings",
        ],
        ErrorCategory::DnsResolution => &[
            "Check internet connection",
            "Verify the database hostname",
            "Try using the IP address instead of the hostname",
            "Check DNS settings",
        ],
        ErrorCategory::Authentication => &[
            "Verify username and password",
            "Check role privileges on the database",
            "Recreate the database role if needed",
            "Check connection string format",
        ],
        ErrorCategory::SslTls => &[
            "Check the sslmode parameter",
            "Check TLS version compatibility",
            "Install the server's CA certificate if it is self-signed",
            "Contact your hosting provider about TLS support",
        ],
        ErrorCategory::Timeout => &[
            "Increase the connection timeout",
            "Check network connectivity",
            "Verify the IP allow list of the database host",
            "Check server resource usage",
        ],
        ErrorCategory::Network | ErrorCategory::Unknown => &[
            "Check the PostgreSQL connection string",
            "Verify environment variables",
            "Check PostgreSQL service status",
            "Review error logs for more details",
        ],
    }
}

/// Frequent causes of not being able to connect at all.
pub const COMMON_ISSUES: &[&str] = &[
    "Database URL not configured properly",
    "PostgreSQL service not running (for local installations)",
    "Network connectivity issues",
    "Authentication credentials incorrect",
    "IP address not allowed by the hosted database",
];

// =============================================================================
// Connection URI checks
// =============================================================================

/// Where the configured database lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UriKind {
    Missing,
    Local,
    Hosted,
    Unknown,
}

/// Static checks on the configured connection string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UriDiagnostics {
    pub valid: bool,
    #[serde(rename = "type")]
    pub kind: UriKind,
    pub issues: Vec<String>,
}

const LOCAL_HOSTS: &[&str] = &["localhost", "127.0.0.1", "::1", "[::1]"];

/// Check the shape of a connection string without connecting.
#[must_use]
pub fn validate_database_uri(uri: Option<&str>) -> UriDiagnostics {
    let Some(uri) = uri.map(str::trim).filter(|u| !u.is_empty()) else {
        return UriDiagnostics {
            valid: false,
            kind: UriKind::Missing,
            issues: vec!["Database URL is not configured".to_string()],
        };
    };

    let mut issues = Vec::new();

    if !(uri.starts_with("postgres://") || uri.starts_with("postgresql://")) {
        issues.push("URI should start with 'postgres://' or 'postgresql://'".to_string());
        return UriDiagnostics {
            valid: false,
            kind: UriKind::Unknown,
            issues,
        };
    }

    let parsed = match url::Url::parse(uri) {
        Ok(parsed) => parsed,
        Err(e) => {
            issues.push(format!("URI could not be parsed: {e}"));
            return UriDiagnostics {
                valid: false,
                kind: UriKind::Unknown,
                issues,
            };
        }
    };

    let socket_host = parsed
        .query_pairs()
        .find(|(key, _)| key == "host")
        .is_some_and(|(_, value)| value.starts_with('/'));
    let kind = match parsed.host_str() {
        None | Some("") => UriKind::Local,
        _ if socket_host => UriKind::Local,
        Some(host) if LOCAL_HOSTS.contains(&host) => UriKind::Local,
        Some(_) => UriKind::Hosted,
    };

    if kind == UriKind::Hosted && parsed.username().is_empty() {
        issues.push(
            "Hosted database URI should contain credentials (username:password@)".to_string(),
        );
    }
    if parsed.path().trim_start_matches('/').is_empty() {
        issues.push("URI does not name a database".to_string());
    }

    UriDiagnostics {
        valid: issues.is_empty(),
        kind,
        issues,
    }
}

/// Replace any `user:password@` in a connection string with `***:***@`.
///
/// Credentials end at the last `@` before the query string, so passwords
/// containing `/` or `@` are hidden in full.
#[must_use]
pub fn redact_uri(uri: &str) -> String {
    let Some(scheme_end) = uri.find("://") else {
        return uri.to_string();
    };
    let authority_start = scheme_end + 3;
    let rest = uri.get(authority_start..).unwrap_or_default();
    let before_query = rest.get(..rest.find('?').unwrap_or(rest.len())).unwrap_or_default();

    match before_query.rfind('@') {
        Some(at) => format!(
            "{}***:***{}",
            uri.get(..authority_start).unwrap_or_default(),
            rest.get(at..).unwrap_or_default()
        ),
        None => uri.to_string(),
    }
}
