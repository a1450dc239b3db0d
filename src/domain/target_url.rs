use super::ConnectionRequest;

/// Rebuilds the destination URL the resolver is asked about.
///
/// The port is left out when it is the scheme default (80 for `http:`, 443
/// for `https:`). Nothing is validated: odd inputs end up in the string as is.
pub fn resolver_url(request: &ConnectionRequest) -> String {
    let (scheme, default_port) = if request.secure { ("https:", 443) } else { ("http:", 80) };

    let (path, search) = match request.path.find('?') {
        Some(idx) => request.path.split_at(idx),
        None => (request.path.as_str(), ""),
    };

    let host = if request.host.contains(':') && !request.host.starts_with('[') {
        format!("[{}]", request.host)
    } else {
        request.host.clone()
    };

    let port = if request.port == default_port {
        String::new()
    } else {
        format!(":{}", request.port)
    };

    let slash = if path.is_empty() || path.starts_with('/') { "" } else { "/" };

    format!(
        "{scheme}//{host}{port}{slash}{path}{search}",
        path = path.replace('#', "%23"),
        search = search.replace('#', "%23"),
    )
}
