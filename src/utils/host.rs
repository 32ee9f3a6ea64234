/// The `host[:port]` part of an API URL, shown in the navbar.
pub fn hostname_from_url(url: &str) -> String {
    let rest = url.trim();
    let rest = rest.split_once("://").map_or(rest, |(_, r)| r);
    rest.split(['/', '?', '#']).next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::hostname_from_url;

    #[test]
    fn strips_scheme_and_path() {
        assert_eq!(hostname_from_url("http://localhost:8001/api"), "localhost:8001");
        assert_eq!(hostname_from_url("kvm.lan/api"), "kvm.lan");
        assert_eq!(hostname_from_url("  "), "");
    }
}
