//! Merge, subtract, replace and equality integration tests.

use ipconf::{ConfigField, IpConfig, IpSetting, Ipv4, Method, Privacy, Source};
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;

use crate::common::{addr4, init_tracing, route4, v4};

fn base() -> IpConfig<Ipv4> {
    let mut config = IpConfig::new();
    config.add_address(addr4("192.168.1.10", 24, Source::Dhcp).lifetime(100, 3600, 1800));
    config.add_address(addr4("169.254.3.3", 16, Source::Kernel));
    config.set_gateway(Some(v4("192.168.1.1")));
    config.add_route(route4("10.0.0.0", 8, Some("192.168.1.254"), 10));
    config.add_nameserver(v4("192.168.1.53"));
    config.add_nameserver(v4("9.9.9.9"));
    config.add_domain("lan");
    config.add_search("lan");
    config.add_search("example.com");
    config
}

/// A spread of configurations differing from `base` in one aspect each.
fn variants() -> Vec<(&'static str, IpConfig<Ipv4>)> {
    let mut out = vec![("base", base()), ("empty", IpConfig::new())];

    let mut c = base();
    c.add_address(addr4("192.168.1.10", 24, Source::User).lifetime(200, 3600, 1800));
    out.push(("lifetime tick", c));

    let mut c = base();
    c.set_mss(1400);
    c.set_never_default(true);
    out.push(("bookkeeping", c));

    let mut c = base();
    c.set_privacy(Privacy::PreferTemporary);
    out.push(("privacy", c));

    let mut c = base();
    c.set_gateway(Some(v4("192.168.1.2")));
    out.push(("gateway", c));

    let mut c = base();
    c.set_gateway(None);
    out.push(("no gateway", c));

    let mut c = base();
    c.add_address(addr4("192.168.1.10", 25, Source::Dhcp));
    out.push(("prefix", c));

    let mut c = base();
    c.add_route(route4("10.0.0.0", 8, Some("192.168.1.254"), 20));
    out.push(("route metric", c));

    let mut c = base();
    c.add_route(route4("10.0.0.0", 8, Some("192.168.1.254"), 10).source(Source::User));
    out.push(("route source", c));

    let mut c = base();
    c.del_nameserver(0);
    c.add_nameserver(v4("192.168.1.53"));
    out.push(("nameserver order", c));

    let mut c = base();
    c.reset_domains();
    out.push(("domains", c));

    let mut c = base();
    c.add_search("corp.example");
    out.push(("searches", c));

    out
}

#[test]
fn test_replace_agrees_with_equal() {
    init_tracing();

    for (a_name, a) in variants() {
        for (b_name, b) in variants() {
            let mut dst = a.clone();
            let outcome = dst.replace(&b);

            assert_eq!(
                outcome.relevant_changed(),
                !a.equal(&b),
                "replace({}, {}) disagrees with equal",
                a_name,
                b_name
            );
            assert!(
                !outcome.relevant_changed() || outcome.any_changed,
                "relevant change without any change for ({}, {})",
                a_name,
                b_name
            );
            assert!(dst.equal(&b), "replace({}, {}) did not converge", a_name, b_name);
            assert_eq!(dst.addresses(), b.addresses());
            assert_eq!(dst.routes(), b.routes());
            assert_eq!(dst.mss(), b.mss());
            assert_eq!(dst.never_default(), b.never_default());
        }
    }
}

#[test]
fn test_replace_reports_fields() {
    let variants = variants();
    let find = |name: &str| {
        variants
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| c.clone())
            .unwrap()
    };

    let mut dst = base();
    let outcome = dst.replace(&find("gateway"));
    assert_fields!(outcome.relevant, Gateway);

    let mut dst = base();
    let outcome = dst.replace(&find("lifetime tick"));
    assert_fields!(outcome.relevant);
    assert!(outcome.any_changed);

    let mut dst = base();
    let outcome = dst.replace(&find("empty"));
    assert_fields!(outcome.relevant, Gateway, Addresses, Routes, Nameservers, Domains, Searches);
}

#[test]
fn test_equal_configs_hash_alike() {
    for (a_name, a) in variants() {
        for (b_name, b) in variants() {
            if !a.equal(&b) {
                continue;
            }
            let mut ha = DefaultHasher::new();
            let mut hb = DefaultHasher::new();
            a.hash_into(&mut ha, false);
            b.hash_into(&mut hb, false);
            assert_eq!(ha.finish(), hb.finish(), "{} vs {}", a_name, b_name);
        }
    }
}

fn other() -> IpConfig<Ipv4> {
    let mut config = IpConfig::new();
    config.add_address(addr4("10.99.0.2", 16, Source::Vpn));
    config.add_address(addr4("10.99.0.3", 16, Source::Vpn));
    config.add_route(route4("10.98.0.0", 16, Some("10.99.0.1"), 50));
    config.add_nameserver(v4("10.99.0.53"));
    config.add_domain("vpn.example");
    config.add_search("vpn.example");
    config.set_mss(1300);
    config
}

#[test]
fn test_subtract_undoes_merge() {
    let a = base();
    let b = other();

    let mut combined = a.clone();
    let changes = combined.merge(&b);
    assert_fields!(changes, Addresses, Routes, Nameservers, Domains, Searches);
    assert!(!combined.equal(&a));
    assert_eq!(combined.mss(), 1300);

    let changes = combined.subtract(&b);
    assert_fields!(changes, Addresses, Routes, Nameservers, Domains, Searches);
    assert!(combined.equal(&a));
    assert_eq!(combined.mss(), 0);
}

#[test]
fn test_subtract_undoes_merge_of_gateway() {
    let mut a = base();
    a.set_gateway(None);
    let mut b = other();
    b.set_gateway(Some(v4("10.99.0.1")));

    let mut combined = a.clone();
    assert!(combined.merge(&b).contains(ConfigField::Gateway));
    assert_eq!(combined.gateway(), Some(v4("10.99.0.1")));

    assert!(combined.subtract(&b).contains(ConfigField::Gateway));
    assert!(combined.equal(&a));
}

#[test]
fn test_merge_is_idempotent() {
    let mut combined = base();
    combined.merge(&other());
    let snapshot = combined.clone();

    assert_fields!(combined.merge(&other()));
    assert!(combined.equal(&snapshot));
}

#[test]
fn test_vpn_teardown_rebuild() {
    // A device config plus a VPN contribution; the VPN goes away.
    let device = base();
    let vpn = other();

    let mut published = device.clone();
    published.merge(&vpn);

    let mut rebuilt = device.clone();
    rebuilt.merge(&IpConfig::new());
    let outcome = published.replace(&rebuilt);
    assert!(outcome.relevant_changed());
    assert!(published.equal(&device));
}

#[test]
fn test_merge_setting_overrides() {
    let mut config = base();
    let setting = IpSetting::<Ipv4>::new(Method::Auto)
        .route("172.16.0.0/12", |r| r.via("192.168.1.254"))
        .unwrap()
        .dns("1.1.1.1")
        .unwrap()
        .ignore_auto_routes()
        .ignore_auto_dns();

    let changes = config.merge_setting(&setting, 425);
    assert_fields!(changes, Routes, Nameservers, Domains, Searches);
    assert_eq!(config.routes(), &[route4("172.16.0.0", 12, Some("192.168.1.254"), 425).source(Source::User)]);
    assert_eq!(config.nameservers(), &[v4("1.1.1.1")]);
    assert!(config.domains().is_empty());
    assert!(config.searches().is_empty());
    assert_eq!(config.gateway(), Some(v4("192.168.1.1")));

    assert_fields!(config.merge_setting(&setting, 425), Routes, Nameservers);
}
