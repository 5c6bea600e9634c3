//! Capture integration tests.

use ipconf::{IpConfig, Ipv4, Ipv6, PlatformAddress, PlatformRoute, Privacy, ResolvConf, Source, ifa_flags};

use crate::common::{TestLink, addr4, addr6, route4, v4, v6};

fn gateway_link() -> TestLink<Ipv4> {
    TestLink::<Ipv4>::new()
        .with_addresses(vec![addr4("10.0.0.5", 24, Source::Kernel)])
        .with_routes(vec![
            route4("0.0.0.0", 0, Some("10.0.0.1"), 100),
            route4("0.0.0.0", 0, Some("10.0.0.2"), 50),
            route4("10.0.0.0", 24, None, 0),
        ])
}

#[test]
fn test_gateway_extraction() {
    let link = gateway_link();
    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();

    assert_eq!(config.gateway(), Some(v4("10.0.0.2")));
    assert_eq!(config.routes(), &[route4("10.0.0.0", 24, None, 0)]);
}

#[test]
fn test_gateway_tie_keeps_first() {
    let link = TestLink::<Ipv4>::new().with_routes(vec![
        route4("0.0.0.0", 0, Some("10.0.0.7"), 20),
        route4("0.0.0.0", 0, Some("10.0.0.8"), 20),
    ]);
    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    assert_eq!(config.gateway(), Some(v4("10.0.0.7")));
    assert!(config.routes().is_empty());
}

#[test]
fn test_host_route_to_gateway_suppressed() {
    let link = gateway_link();
    let mut routes = link.platform.link_routes(link.ifindex);
    routes.push(route4("10.0.0.2", 32, None, 0));
    // Host routes via a next hop or to other hosts are foreign state.
    routes.push(route4("10.0.0.2", 32, Some("10.0.0.9"), 0));
    routes.push(route4("10.0.0.3", 32, None, 0));
    let link = link.with_routes(routes);

    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    assert_eq!(config.gateway(), Some(v4("10.0.0.2")));
    let keys: Vec<_> = config.routes().iter().map(|r| (r.network, r.prefix_len, r.gateway)).collect();
    assert_eq!(
        keys,
        vec![
            (v4("10.0.0.0"), 24, v4("0.0.0.0")),
            (v4("10.0.0.2"), 32, v4("10.0.0.9")),
            (v4("10.0.0.3"), 32, v4("0.0.0.0")),
        ]
    );
}

#[test]
fn test_host_route_kept_without_default_route() {
    let link = TestLink::<Ipv4>::new().with_routes(vec![route4("10.0.0.2", 32, None, 0)]);
    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    assert_eq!(config.gateway(), None);
    assert_eq!(config.num_routes(), 1);
}

#[test]
fn test_resolver_import() {
    let link = gateway_link();
    let resolver = ResolvConf::from_contents(
        "# test\nsearch example.com\nnameserver 10.0.0.53\nnameserver 0.0.0.0\nnameserver 2001:db8::53\nnameserver 10.0.0.53\n",
    );

    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, Some(&resolver), Privacy::Unknown).unwrap();
    assert_eq!(config.nameservers(), &[v4("10.0.0.53")]);
    // Only nameservers are imported.
    assert!(config.searches().is_empty());

    let without = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    assert!(without.nameservers().is_empty());
}

#[test]
fn test_resolver_needs_default_route() {
    let link = TestLink::<Ipv4>::new()
        .with_addresses(vec![addr4("10.0.0.5", 24, Source::Kernel)])
        .with_routes(vec![route4("10.0.0.0", 24, None, 0)]);
    let resolver = ResolvConf::from_contents("nameserver 10.0.0.53\n");

    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, Some(&resolver), Privacy::Unknown).unwrap();
    assert!(config.nameservers().is_empty());
}

#[test]
fn test_unreadable_resolver_is_ignored() {
    let link = gateway_link();
    let resolver = ResolvConf::from_path("/nonexistent/ipconf-test/resolv.conf");
    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, Some(&resolver), Privacy::Unknown).unwrap();
    assert!(config.nameservers().is_empty());
    assert_eq!(config.gateway(), Some(v4("10.0.0.2")));
}

#[test]
fn test_slave_link_has_no_config() {
    let link = gateway_link();
    link.platform.add_slave(link.ifindex, 1);
    assert!(IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).is_none());
}

#[test]
fn test_unknown_link_captures_empty() {
    let link = TestLink::<Ipv4>::new();
    link.platform.remove_link(link.ifindex);
    let config = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_captured_addresses_sorted() {
    let link = TestLink::<Ipv6>::new()
        .with_addresses(vec![
            addr6("2001:db8::5", 64, Source::Kernel).lifetime(0, 3600, 1800),
            PlatformAddress::new(v6("2001:db8::9"), 64).flags(ifa_flags::TENTATIVE),
            addr6("fe80::5", 64, Source::Kernel),
        ])
        .with_routes(vec![PlatformRoute::default_via(v6("fe80::1"), 1024)]);

    let config = IpConfig::<Ipv6>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    let order: Vec<_> = config.addresses().iter().map(|a| a.address).collect();
    assert_eq!(order, vec![v6("fe80::5"), v6("2001:db8::5"), v6("2001:db8::9")]);
    assert_eq!(config.gateway(), Some(v6("fe80::1")));
}

#[test]
fn test_recapture_is_equal_and_quiet() {
    let link = gateway_link();
    let mut current = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();
    let again = IpConfig::<Ipv4>::capture(&link.platform, link.ifindex, None, Privacy::Unknown).unwrap();

    assert!(current.equal(&again));
    let outcome = current.replace(&again);
    assert!(!outcome.relevant_changed());
    assert!(!outcome.any_changed);
}
