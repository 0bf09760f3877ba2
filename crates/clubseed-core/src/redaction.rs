use serde::{Deserialize, Serialize};

/// Store connection metadata with secrets masked, safe to log and persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactedConnection {
    pub scheme: Option<String>,
    pub user: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Database name for network stores, directory for file stores.
    pub target: Option<String>,
    pub redacted: String,
}

const MASK: &str = "***";

/// Mask credentials in a store URL while keeping the parts useful for diagnostics.
pub fn redact_connection_string(conn: &str) -> RedactedConnection {
    let Some((scheme, rest)) = split_scheme(conn) else {
        return RedactedConnection {
            scheme: None,
            user: None,
            host: None,
            port: None,
            target: None,
            redacted: mask_query(conn),
        };
    };

    if !conn[scheme.len()..].starts_with("://") {
        // `dir:<path>` style: no authority section.
        return RedactedConnection {
            scheme: Some(scheme.to_string()),
            user: None,
            host: None,
            port: None,
            target: non_empty(rest),
            redacted: mask_query(conn),
        };
    }

    let (without_query, query) = match rest.split_once('?') {
        Some((head, query)) => (head, Some(query)),
        None => (rest, None),
    };
    let (authority, path) = match without_query.find('/') {
        Some(idx) => (&without_query[..idx], &without_query[idx + 1..]),
        None => (without_query, ""),
    };
    let (credentials, host_port) = match authority.rfind('@') {
        Some(idx) => (Some(&authority[..idx]), &authority[idx + 1..]),
        None => (None, authority),
    };

    let (user, masked_credentials) = match credentials {
        Some(creds) => match creds.split_once(':') {
            Some((user, _password)) => (non_empty(user), Some(format!("{user}:{MASK}"))),
            None => (non_empty(creds), Some(creds.to_string())),
        },
        None => (None, None),
    };

    let (host, port) = match host_port.rsplit_once(':') {
        Some((host, port)) => match port.parse::<u16>() {
            Ok(port) => (non_empty(host), Some(port)),
            Err(_) => (non_empty(host_port), None),
        },
        None => (non_empty(host_port), None),
    };

    let target = if scheme == "file" {
        non_empty(without_query)
    } else {
        non_empty(path)
    };

    let mut redacted = format!("{scheme}://");
    if let Some(creds) = masked_credentials {
        redacted.push_str(&creds);
        redacted.push('@');
    }
    redacted.push_str(host_port);
    if !path.is_empty() || without_query.contains('/') {
        redacted.push('/');
        redacted.push_str(path);
    }
    if let Some(query) = query {
        redacted.push('?');
        redacted.push_str(&mask_params(query));
    }

    RedactedConnection {
        scheme: Some(scheme.to_string()),
        user,
        host,
        port,
        target,
        redacted,
    }
}

fn split_scheme(conn: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = conn.split_once(':')?;
    if scheme.is_empty()
        || !scheme
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '+' || ch == '-' || ch == '.')
    {
        return None;
    }
    Some((scheme, rest.strip_prefix("//").unwrap_or(rest)))
}

fn mask_query(conn: &str) -> String {
    match conn.split_once('?') {
        Some((head, query)) => format!("{head}?{}", mask_params(query)),
        None => conn.to_string(),
    }
}

fn mask_params(query: &str) -> String {
    query
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((key, _)) if is_sensitive_key(key) => format!("{key}={MASK}"),
            _ => pair.to_string(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_ascii_lowercase().as_str(),
        "password" | "pass" | "pwd" | "token" | "api_key" | "apikey" | "secret"
    )
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
