/// Font Awesome brand icon for an OS name. First matching keyword wins.
pub fn get_os_icon(os_name: &str) -> &'static str {
    let name = os_name.to_lowercase();
    if name.contains("ubuntu") {
        "ubuntu"
    } else if name.contains("debian") {
        "debian"
    } else if name.contains("centos") || name.contains("rhel") || name.contains("fedora") {
        "redhat"
    } else if name.contains("windows") {
        "windows"
    } else if name.contains("arch") {
        "arch-linux"
    } else {
        "linux"
    }
}

#[cfg(test)]
mod tests {
    use super::get_os_icon;

    #[test]
    fn keyword_table() {
        assert_eq!(get_os_icon("Ubuntu Server 22.04"), "ubuntu");
        assert_eq!(get_os_icon("DEBIAN 12"), "debian");
        assert_eq!(get_os_icon("CentOS Stream 9"), "redhat");
        assert_eq!(get_os_icon("RHEL 9"), "redhat");
        assert_eq!(get_os_icon("Fedora Workstation"), "redhat");
        assert_eq!(get_os_icon("Windows Server 2022"), "windows");
        assert_eq!(get_os_icon("Arch Linux"), "arch-linux");
        assert_eq!(get_os_icon("Alpine"), "linux");
    }

    #[test]
    fn earlier_keywords_take_precedence() {
        assert_eq!(get_os_icon("Ubuntu on Windows"), "ubuntu");
        assert_eq!(get_os_icon("Windows Subsystem for Arch"), "windows");
    }
}
