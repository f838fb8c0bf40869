//! Peer pool, selection and redial policy tests for lsk-api

use lsk_api::{
    NethashRedialPolicy, Network, NetworkIdentity, NodeSelector, PeerLists, PeerPool,
    RandomNodeSelector, RedialPolicy, RequestBuilder, SelectionError, Verb, MAINNET_NETHASH,
    TESTNET_NETHASH,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

fn lists() -> PeerLists {
    PeerLists {
        mainnet: vec!["main-a".into(), "main-b".into(), "main-c".into()],
        ssl: vec!["ssl-a".into(), "ssl-b".into()],
        testnet: vec!["test-a".into(), "test-b".into()],
    }
}

fn random_pool() -> PeerPool {
    PeerPool::new(lists()).with_random_peer(true)
}

// ==================== Active List ====================

#[test]
fn test_active_list_by_mode() {
    let pool = random_pool();
    assert_eq!(pool.active_peer_list(), lists().mainnet.as_slice());

    let pool = random_pool().with_ssl(true);
    assert_eq!(pool.active_peer_list(), lists().ssl.as_slice());

    let pool = random_pool().with_testnet(true);
    assert_eq!(pool.active_peer_list(), lists().testnet.as_slice());

    // testnet has a single list regardless of ssl
    let pool = random_pool().with_testnet(true).with_ssl(true);
    assert_eq!(pool.active_peer_list(), lists().testnet.as_slice());
}

// ==================== Random Pick ====================

#[test]
fn test_pick_never_returns_banned_peer() {
    let pool = random_pool().with_banned(["main-a", "main-c"]);
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        assert_eq!(pool.pick_random_unbanned(&mut rng).unwrap(), "main-b");
    }
}

#[test]
fn test_pick_exhausted_when_all_banned() {
    let pool = random_pool().with_banned(["main-a", "main-b", "main-c"]);
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(
        pool.pick_random_unbanned(&mut rng),
        Err(SelectionError::ExhaustedPeers)
    );
    assert!(!pool.has_unbanned_peers());

    // bans on another list don't exhaust this one
    let pool = pool.with_testnet(true);
    assert!(pool.pick_random_unbanned(&mut rng).is_ok());
}

#[test]
fn test_pick_uniformity() {
    let pool = random_pool();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..1000 {
        let peer = RandomNodeSelector.select_node(&pool, None).unwrap();
        *counts.entry(peer).or_default() += 1;
    }

    assert_eq!(counts.len(), 3);
    for (peer, count) in &counts {
        // expected ~333 each
        assert!(*count > 200, "{} picked only {} times", peer, count);
    }
}

#[test]
fn test_pick_seeded_rng_reproducible() {
    let pool = random_pool();
    let draw = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..20)
            .map(|_| pool.pick_random_unbanned(&mut rng).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(42), draw(42));
}

// ==================== Selection ====================

#[test]
fn test_selection_ignores_explicit_node_in_random_mode() {
    let pool = random_pool();
    for _ in 0..50 {
        let peer = RandomNodeSelector.select_node(&pool, Some("elsewhere")).unwrap();
        assert!(pool.active_peer_list().contains(&peer));
    }
}

#[test]
fn test_selection_pinned_mode() {
    let pool = PeerPool::new(lists()).with_banned(["bad"]);

    assert_eq!(
        RandomNodeSelector.select_node(&pool, Some("good")),
        Ok("good".to_string())
    );
    assert_eq!(
        RandomNodeSelector.select_node(&pool, Some("bad")),
        Err(SelectionError::BannedNode("bad".to_string()))
    );
    assert_eq!(
        RandomNodeSelector.select_node(&pool, None),
        Err(SelectionError::NoNodeSpecified)
    );
}

#[test]
fn test_selection_does_not_mutate_pool() {
    let pool = random_pool().with_current_peer("main-a");
    RandomNodeSelector.select_node(&pool, None).unwrap();
    assert_eq!(pool.current_peer(), "main-a");
    assert!(pool.banned_peers().is_empty());
}

// ==================== Banning ====================

#[test]
fn test_ban_idempotent() {
    let mut pool = random_pool().with_current_peer("main-a");
    assert!(pool.ban_current_node());
    assert!(!pool.ban_current_node());
    assert_eq!(pool.banned_peers().len(), 1);
    assert!(pool.is_banned("main-a"));
    assert_eq!(pool.unbanned_peers(), vec!["main-b", "main-c"]);
}

#[test]
fn test_bans_survive_network_switch() {
    let mut pool = random_pool().with_current_peer("main-a");
    pool.ban_current_node();
    pool.set_testnet(true);
    pool.set_ssl(true);
    pool.set_testnet(false);
    pool.set_ssl(false);
    assert!(pool.is_banned("main-a"));
}

// ==================== Redial Policy ====================

#[test]
fn test_redial_never_when_pinned() {
    let mut pool = PeerPool::new(lists()).with_current_peer("main-a");
    for hint in [None, Some(MAINNET_NETHASH), Some(TESTNET_NETHASH), Some("abc")] {
        assert!(!NethashRedialPolicy.may_redial(&mut pool, hint));
    }
    assert!(!pool.use_testnet());
}

#[test]
fn test_redial_testnet_hint_flips_network() {
    let mut pool = random_pool();
    assert!(NethashRedialPolicy.may_redial(&mut pool, Some(TESTNET_NETHASH)));
    assert!(pool.use_testnet());
    assert_eq!(pool.network(), Network::Testnet);

    assert!(NethashRedialPolicy.may_redial(&mut pool, Some(MAINNET_NETHASH)));
    assert!(!pool.use_testnet());
}

#[test]
fn test_redial_no_hint_depends_on_remaining_peers() {
    let mut pool = random_pool().with_banned(["main-a", "main-b"]);
    assert!(NethashRedialPolicy.may_redial(&mut pool, None));

    let mut pool = pool.with_banned(["main-c"]);
    assert!(!NethashRedialPolicy.may_redial(&mut pool, None));
}

#[test]
fn test_redial_unknown_hint_refused() {
    let mut pool = random_pool();
    assert!(!NethashRedialPolicy.may_redial(&mut pool, Some("not-a-nethash")));
    assert!(!pool.use_testnet());
}

// ==================== Identity and Requests ====================

#[test]
fn test_request_for_current_peer() {
    let pool = random_pool()
        .with_current_peer("main-b")
        .with_port(Some(8000))
        .with_ssl(true);
    let identity = NetworkIdentity::new(pool.port());

    let request = RequestBuilder::new(pool.base_url(), identity.headers_for(pool.network()))
        .build(Verb::Put, "signatures", &serde_json::Map::new());

    assert_eq!(request.url, "https://main-b:8000/api/signatures");
    assert_eq!(request.verb, Verb::Put);
    assert_eq!(request.headers["nethash"], MAINNET_NETHASH);
    assert_eq!(request.headers["port"], "8000");
}

#[test]
fn test_identity_without_port() {
    let identity = NetworkIdentity::new(None);
    let headers = identity.headers_for(Network::Testnet);
    assert_eq!(headers["nethash"], TESTNET_NETHASH);
    assert_eq!(headers["broadhash"], TESTNET_NETHASH);
    assert!(!headers.contains_key("port"));
}
