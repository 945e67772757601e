//! Service name lookup for well-known ports.
//!
//! Best-effort labels for report rendering; no probing is involved.

/// Service name for a well-known port, if there is one.
pub fn service_name(port: u16) -> Option<&'static str> {
    let name = match port {
        20 => "ftp-data",
        21 => "ftp",
        22 => "ssh",
        23 => "telnet",
        25 => "smtp",
        53 => "dns",
        80 => "http",
        88 => "kerberos",
        110 => "pop3",
        111 => "rpcbind",
        123 => "ntp",
        135 => "msrpc",
        139 => "netbios-ssn",
        143 => "imap",
        161 => "snmp",
        179 => "bgp",
        389 => "ldap",
        443 => "https",
        445 => "microsoft-ds",
        465 => "smtps",
        514 => "syslog",
        515 => "printer",
        548 => "afp",
        554 => "rtsp",
        587 => "submission",
        631 => "ipp",
        636 => "ldaps",
        873 => "rsync",
        993 => "imaps",
        995 => "pop3s",
        1080 => "socks",
        1433 => "mssql",
        1521 => "oracle",
        1883 => "mqtt",
        2049 => "nfs",
        2375 => "docker",
        3000 => "grafana",
        3128 => "squid",
        3306 => "mysql",
        3389 => "rdp",
        5353 => "mdns",
        5432 => "postgresql",
        5672 => "amqp",
        5900 => "vnc",
        6379 => "redis",
        8080 => "http-proxy",
        8443 => "https-alt",
        9090 => "prometheus",
        9100 => "jetdirect",
        9200 => "elasticsearch",
        11211 => "memcached",
        27017 => "mongodb",
        _ => return None,
    };
    Some(name)
}

/// Service label for display, "unknown" for ports with no entry.
pub fn service_label(port: u16) -> &'static str {
    service_name(port).unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_lookups() {
        assert_eq!(service_name(22), Some("ssh"));
        assert_eq!(service_name(80), Some("http"));
        assert_eq!(service_name(443), Some("https"));
    }

    #[test]
    fn test_unknown_port() {
        assert_eq!(service_name(49321), None);
    }

    #[test]
    fn test_service_label() {
        assert_eq!(service_label(22), "ssh");
        assert_eq!(service_label(47321), "unknown");
    }
}
