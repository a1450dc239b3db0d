use crate::domain::{ProxyError, Result};
use js_sandbox::{JsValue, Script};
use url::Url;

const PAC_UTILS: &str = include_str!("../../pac_utils.js");

/// Runs `FindProxyForURL(url, host)` from a PAC script and returns its raw
/// answer, e.g. `"PROXY proxy.example:8080; DIRECT"`.
///
/// `null`, `undefined` or an empty string come back as `None`.
pub fn evaluate_pac(pac_file: &str, url: &str) -> Result<Option<String>> {
    let host = Url::parse(url)
        .map_err(|e| ProxyError::InvalidUri(format!("{}: {}", url, e)))?
        .host_str()
        .map(|h| h.trim_start_matches('[').trim_end_matches(']').to_string())
        .ok_or_else(|| ProxyError::InvalidUri(format!("missing host in {}", url)))?;

    let pac_payload = format!("{}\n{}", PAC_UTILS, pac_file);

    let mut script = Script::from_string(&pac_payload)
        .map_err(|e| ProxyError::ResolutionFailed(format!("PAC script error: {}", e)))?;

    let eval_result: JsValue = script
        .call("FindProxyForURL", (url.to_string(), host))
        .map_err(|e| ProxyError::ResolutionFailed(format!("PAC execution error: {}", e)))?;

    let answer = match eval_result {
        JsValue::Null => None,
        JsValue::String(s) => Some(s),
        other => Some(other.to_string()),
    };

    Ok(answer.filter(|a| !a.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAC: &str = r#"
function FindProxyForURL(url, host) {
    if (isPlainHostName(host) || dnsDomainIs(host, ".internal.example")) {
        return "DIRECT";
    }
    if (shExpMatch(url, "https://*")) {
        return "HTTPS secure.example:443; DIRECT";
    }
    if (host == "blank.example") {
        return "";
    }
    if (host == "null.example") {
        return null;
    }
    return "PROXY proxy.example:8080; SOCKS5 socks.example:1080";
}
"#;

    #[test]
    fn test_returns_raw_directive_list() {
        let answer = evaluate_pac(PAC, "http://www.example.com/").unwrap();
        assert_eq!(answer.as_deref(), Some("PROXY proxy.example:8080; SOCKS5 socks.example:1080"));
    }

    #[test]
    fn test_pac_helpers_are_available() {
        assert_eq!(evaluate_pac(PAC, "http://intranet/").unwrap().as_deref(), Some("DIRECT"));
        assert_eq!(
            evaluate_pac(PAC, "http://wiki.internal.example/").unwrap().as_deref(),
            Some("DIRECT")
        );
        assert_eq!(
            evaluate_pac(PAC, "https://www.example.com/").unwrap().as_deref(),
            Some("HTTPS secure.example:443; DIRECT")
        );
    }

    #[test]
    fn test_empty_answers_are_none() {
        assert_eq!(evaluate_pac(PAC, "http://blank.example/").unwrap(), None);
        assert_eq!(evaluate_pac(PAC, "http://null.example/").unwrap(), None);
    }

    #[test]
    fn test_broken_script_is_a_resolution_failure() {
        let err = evaluate_pac("function FindProxyForURL(url, host) {", "http://a.example/").unwrap_err();
        assert!(matches!(err, ProxyError::ResolutionFailed(_)));
    }
}
