use std::{env, fmt, fs, path::Path, time::Duration};

use crate::{domain::ChatTarget, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_TIME: Duration = Duration::from_secs(600);

/// Typed configuration, built once at startup and shared by reference.
#[derive(Clone)]
pub struct Config {
    // Credentials
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: ChatTarget,

    // Review API
    pub endpoint: String,
    /// `None` keeps the HTTP client's default (no timeout).
    pub request_timeout: Option<Duration>,

    // Loop
    pub retry_time: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup (the process env in `load`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Required env vars
        let practicum_token = lookup("PRACTICUM_TOKEN").and_then(non_empty);
        let telegram_token = lookup("TELEGRAM_TOKEN").and_then(non_empty);
        let chat_id = lookup("TELEGRAM_CHAT_ID").and_then(non_empty);

        let (Some(practicum_token), Some(telegram_token), Some(chat_id)) =
            (&practicum_token, &telegram_token, &chat_id)
        else {
            let missing: Vec<&str> = [
                ("PRACTICUM_TOKEN", practicum_token.is_none()),
                ("TELEGRAM_TOKEN", telegram_token.is_none()),
                ("TELEGRAM_CHAT_ID", chat_id.is_none()),
            ]
            .into_iter()
            .filter(|(_, is_missing)| *is_missing)
            .map(|(key, _)| key)
            .collect();
            return Err(Error::Config(format!(
                "не хватает переменных окружения: {}",
                missing.join(", ")
            )));
        };

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let request_timeout = parse_u64(lookup("PRACTICUM_TIMEOUT_SECS"))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let retry_time = parse_u64(lookup("RETRY_TIME"))
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RETRY_TIME);

        Ok(Self {
            practicum_token: practicum_token.clone(),
            telegram_token: telegram_token.clone(),
            telegram_chat_id: ChatTarget(chat_id.trim().to_string()),
            endpoint,
            request_timeout,
            retry_time,
        })
    }
}

// Tokens never show up in `{:?}` output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("request_timeout", &self.request_timeout)
            .field("retry_time", &self.retry_time)
            .finish()
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn parse_u64(v: Option<String>) -> Option<u64> {
    v.and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const CREDENTIALS: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "p-token"),
        ("TELEGRAM_TOKEN", "t-token"),
        ("TELEGRAM_CHAT_ID", "12345"),
    ];

    #[test]
    fn loads_credentials_with_defaults() {
        let cfg = Config::from_lookup(lookup_from(&CREDENTIALS)).unwrap();
        assert_eq!(cfg.practicum_token, "p-token");
        assert_eq!(cfg.telegram_token, "t-token");
        assert_eq!(cfg.telegram_chat_id, ChatTarget("12345".to_string()));
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.retry_time, Duration::from_secs(600));
        assert!(cfg.request_timeout.is_none());
    }

    #[test]
    fn each_missing_or_blank_credential_is_fatal() {
        for skip in 0..CREDENTIALS.len() {
            for blank in [false, true] {
                let pairs: Vec<(&str, &str)> = CREDENTIALS
                    .iter()
                    .enumerate()
                    .filter_map(|(i, (k, v))| match (i == skip, blank) {
                        (true, false) => None,
                        (true, true) => Some((*k, "  ")),
                        _ => Some((*k, *v)),
                    })
                    .collect();

                let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
                match err {
                    Error::Config(msg) => assert!(msg.contains(CREDENTIALS[skip].0), "{msg}"),
                    other => panic!("unexpected error: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn debug_output_hides_tokens() {
        let cfg = Config::from_lookup(lookup_from(&CREDENTIALS)).unwrap();
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("p-token"), "{shown}");
        assert!(!shown.contains("t-token"), "{shown}");
        assert!(shown.contains("<redacted>"));
        assert!(shown.contains("12345"));
    }

    #[test]
    fn reports_every_missing_variable() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("PRACTICUM_TOKEN"));
        assert!(msg.contains("TELEGRAM_TOKEN"));
        assert!(msg.contains("TELEGRAM_CHAT_ID"));
    }

    #[test]
    fn optional_overrides_are_parsed() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("PRACTICUM_ENDPOINT", "http://localhost:8080/hw/"));
        pairs.push(("RETRY_TIME", "30"));
        pairs.push(("PRACTICUM_TIMEOUT_SECS", "5"));
        let cfg = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(cfg.endpoint, "http://localhost:8080/hw/");
        assert_eq!(cfg.retry_time, Duration::from_secs(30));
        assert_eq!(cfg.request_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn invalid_retry_time_falls_back_to_default() {
        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("RETRY_TIME", "soon"));
        let cfg = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(cfg.retry_time, DEFAULT_RETRY_TIME);

        let mut pairs = CREDENTIALS.to_vec();
        pairs.push(("RETRY_TIME", "0"));
        let cfg = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(cfg.retry_time, DEFAULT_RETRY_TIME);
    }

    #[test]
    fn dotenv_lines_strip_quotes_and_comments() {
        let parsed = parse_dotenv(
            "# comment\nPRACTICUM_TOKEN=\"abc\"\n\nexport TELEGRAM_TOKEN='def'\nnot a pair\n=x\n",
        );
        assert_eq!(
            parsed,
            vec![
                ("PRACTICUM_TOKEN".to_string(), "abc".to_string()),
                ("TELEGRAM_TOKEN".to_string(), "def".to_string()),
            ]
        );
    }
}
