use crate::addr::SwitchPosition;
use crate::routing::{
    HASHED_PRIORITY, ROUTE_PRIORITY, Rule, RuleKind, lookup, synthesize, uplink_port,
};
use crate::topo::{Endpoint, TopologyModel};
use std::net::Ipv4Addr;

fn ip(a: u8, b: u8, c: u8, d: u8) -> Ipv4Addr {
    Ipv4Addr::new(a, b, c, d)
}

#[test]
fn core_switch_gets_one_slash16_per_pod() {
    let rules = synthesize(SwitchPosition::Core { index: 0 }, 4);
    assert_eq!(rules.len(), 4);
    for (p, r) in rules.iter().enumerate() {
        assert_eq!(r.dst, ip(10, p as u8, 0, 0));
        assert_eq!(r.mask, ip(255, 255, 0, 0));
        assert_eq!(r.out_port, p as u16 + 1);
        assert_eq!(r.priority, ROUTE_PRIORITY);
        assert_eq!(r.kind, RuleKind::CoreDown);
    }
}

#[test]
fn upper_switch_hashed_ports_rotate_by_switch_index() {
    let rules = synthesize(SwitchPosition::Pod { pod: 0, switch: 2 }, 4);
    let hashed: Vec<&Rule> = rules
        .iter()
        .filter(|r| r.kind == RuleKind::UplinkHashed)
        .collect();
    assert_eq!(hashed.len(), 2);
    assert_eq!(hashed[0].dst, ip(0, 0, 0, 2));
    assert_eq!(hashed[0].mask, ip(0, 0, 0, 255));
    assert_eq!(hashed[0].out_port, 3);
    assert_eq!(hashed[1].dst, ip(0, 0, 0, 3));
    assert_eq!(hashed[1].out_port, 4);
    assert!(hashed.iter().all(|r| r.priority == HASHED_PRIORITY));

    // p0_s3 starts on the other uplink
    assert_eq!(uplink_port(2, 3, 4), 4);
    assert_eq!(uplink_port(3, 3, 4), 3);
}

#[test]
fn upper_switch_routes_down_per_subnet() {
    let rules = synthesize(SwitchPosition::Pod { pod: 3, switch: 3 }, 4);
    let down: Vec<&Rule> = rules
        .iter()
        .filter(|r| r.kind == RuleKind::PodDown)
        .collect();
    assert_eq!(down.len(), 2);
    for (subnet, r) in down.iter().enumerate() {
        assert_eq!(r.dst, ip(10, 3, subnet as u8, 0));
        assert_eq!(r.mask, ip(255, 255, 255, 0));
        assert_eq!(r.out_port, subnet as u16 + 1);
        assert_eq!(r.priority, ROUTE_PRIORITY);
    }
    assert_eq!(rules.len(), 4);
}

#[test]
fn lower_switch_routes_hosts_exactly() {
    let rules = synthesize(SwitchPosition::Pod { pod: 0, switch: 0 }, 4);
    let exact: Vec<(Ipv4Addr, Ipv4Addr, u16)> = rules
        .iter()
        .filter(|r| r.kind == RuleKind::HostExact)
        .map(|r| (r.dst, r.mask, r.out_port))
        .collect();
    assert_eq!(
        exact,
        vec![
            (ip(10, 0, 0, 2), ip(255, 255, 255, 255), 1),
            (ip(10, 0, 0, 3), ip(255, 255, 255, 255), 2),
        ]
    );
    let hashed: Vec<u16> = rules
        .iter()
        .filter(|r| r.kind == RuleKind::UplinkHashed)
        .map(|r| r.out_port)
        .collect();
    assert_eq!(hashed, vec![3, 4]);
}

#[test]
fn synthesize_is_deterministic() {
    for pos in [
        SwitchPosition::Core { index: 5 },
        SwitchPosition::Pod { pod: 2, switch: 1 },
        SwitchPosition::Pod { pod: 7, switch: 6 },
    ] {
        assert_eq!(synthesize(pos, 8), synthesize(pos, 8));
    }
}

#[test]
fn overlapping_rules_never_share_a_priority() {
    for k in [2usize, 4, 6, 8] {
        let topo = TopologyModel::build(k as i64).unwrap();
        for s in topo.switches() {
            let rules = synthesize(s.position(), k);
            for (i, a) in rules.iter().enumerate() {
                for b in &rules[i + 1..] {
                    assert!(
                        !(a.overlaps(b) && a.priority == b.priority),
                        "k={k} {}: {a} overlaps {b}",
                        s.name()
                    );
                }
            }
        }
    }
}

#[test]
fn every_output_port_is_wired_to_the_expected_layer() {
    let topo = TopologyModel::build(6).unwrap();
    for s in topo.switches() {
        for r in synthesize(s.position(), topo.k()) {
            let peer = s
                .neighbor(r.out_port)
                .unwrap_or_else(|| panic!("{}: port {} unwired", s.name(), r.out_port));
            match (r.kind, peer) {
                (RuleKind::HostExact, Endpoint::Host(h)) => assert_eq!(h.host as u16, r.out_port + 1),
                (RuleKind::PodDown, Endpoint::Switch(SwitchPosition::Pod { switch, .. })) => {
                    assert_eq!(switch as u16 + 1, r.out_port)
                }
                (RuleKind::CoreDown, Endpoint::Switch(SwitchPosition::Pod { pod, .. })) => {
                    assert_eq!(pod as u16 + 1, r.out_port)
                }
                (RuleKind::UplinkHashed, Endpoint::Switch(up)) => {
                    assert!(
                        up.is_core() || up.layer(topo.k()) == crate::addr::Layer::Upper,
                        "{}: hashed rule goes down to {up}",
                        s.name()
                    )
                }
                (kind, peer) => panic!("{}: {kind:?} rule points at {peer}", s.name()),
            }
        }
    }
}

#[test]
fn lookup_prefers_exact_over_hashed() {
    let rules = synthesize(SwitchPosition::Pod { pod: 1, switch: 1 }, 4);
    let local = lookup(&rules, ip(10, 1, 1, 3)).unwrap();
    assert_eq!(local.kind, RuleKind::HostExact);
    assert_eq!(local.out_port, 2);

    let remote = lookup(&rules, ip(10, 2, 0, 3)).unwrap();
    assert_eq!(remote.kind, RuleKind::UplinkHashed);
    assert_eq!(remote.out_port, uplink_port(3, 1, 4));

    assert!(lookup(&rules, ip(10, 2, 0, 9)).is_none());
}
