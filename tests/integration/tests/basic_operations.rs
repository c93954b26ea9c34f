//! Integration test: a web of trust walked through registry, link store,
//! sentry, distance and path operations in the order a validator uses them.

use wotgraph_core::{DistanceParams, LinkOutcome, UnlinkOutcome, WebOfTrust, WotError, WotId};
use wotgraph_integration_tests::ids;

const FULL: f64 = 1.0;

fn outdistanced(wot: &WebOfTrust, node: usize, k: usize, step_max: u32) -> bool {
    wot.is_outdistanced(DistanceParams {
        node: WotId(node),
        sentry_requirement: k,
        step_max,
        x_percent: FULL,
    })
    .unwrap()
}

#[test]
fn test_basic_lifecycle() {
    let mut wot = WebOfTrust::new(3);
    assert_eq!(wot.max_links(), 3);
    assert_eq!(wot.size(), 0);

    // Registry
    for expected in 0..12 {
        assert_eq!(wot.add_node(), WotId(expected));
    }
    assert_eq!(wot.size(), 12);
    assert_eq!(wot.enabled().len(), 12);
    assert!(wot.disabled().is_empty());

    // Cap
    for target in 1..=3 {
        assert!(wot.add_link(WotId(0), WotId(target)).unwrap().is_added());
    }
    assert_eq!(
        wot.add_link(WotId(0), WotId(4)).unwrap(),
        LinkOutcome::CapacityReached(0)
    );
    assert!(!wot.exists_link(WotId(0), WotId(4)));
    wot.set_max_links(4);
    assert_eq!(wot.add_link(WotId(0), WotId(4)).unwrap(), LinkOutcome::Added(1));
    for target in 1..=4 {
        assert_eq!(
            wot.remove_link(WotId(0), WotId(target)).unwrap(),
            UnlinkOutcome::Removed(0)
        );
    }
    assert!(!wot.exists_link(WotId(4), WotId(6)));

    // Membership flags
    assert!(!wot.set_enabled(WotId(0), false).unwrap());
    assert!(!wot.set_enabled(WotId(1), false).unwrap());
    assert!(!wot.set_enabled(WotId(2), false).unwrap());
    assert_eq!(wot.disabled(), ids(&[0, 1, 2]));
    assert!(wot.set_enabled(WotId(1), true).unwrap());
    assert_eq!(wot.disabled(), ids(&[0, 2]));
    for id in [0, 2] {
        wot.set_enabled(WotId(id), true).unwrap();
    }
    assert!(wot.disabled().is_empty());

    // In-degree bookkeeping
    assert_eq!(wot.add_link(WotId(2), WotId(0)).unwrap().received(), 1);
    assert_eq!(wot.add_link(WotId(4), WotId(0)).unwrap().received(), 2);
    assert_eq!(wot.add_link(WotId(5), WotId(0)).unwrap().received(), 3);
    assert_eq!(
        wot.add_link(WotId(5), WotId(0)).unwrap(),
        LinkOutcome::AlreadyLinked(3)
    );
    assert_eq!(wot.remove_link(WotId(4), WotId(0)).unwrap().received(), 2);
    assert!(!wot.exists_link(WotId(4), WotId(0)));
    assert_eq!(
        wot.remove_link(WotId(4), WotId(0)).unwrap(),
        UnlinkOutcome::NotLinked(2)
    );

    // No sentry at all yet.
    assert!(!outdistanced(&wot, 0, 1, 1));
    assert!(!outdistanced(&wot, 0, 2, 1));
    assert!(!outdistanced(&wot, 0, 3, 1));

    wot.add_link(WotId(3), WotId(1)).unwrap();
    wot.add_link(WotId(3), WotId(2)).unwrap();
    assert_eq!(wot.sentries(1), ids(&[2]));
    assert!(wot.sentries(2).is_empty());
    assert_eq!(wot.non_sentries(1).len(), 11);
    assert_eq!(wot.non_sentries(2).len(), 12);
    assert!(!outdistanced(&wot, 0, 1, 1));
    assert!(!outdistanced(&wot, 0, 2, 2));

    wot.add_link(WotId(1), WotId(3)).unwrap();
    wot.add_link(WotId(2), WotId(3)).unwrap();
    assert_eq!(wot.sentries(1), ids(&[1, 2, 3]));
    assert_eq!(wot.sentries(2), ids(&[3]));
    assert!(wot.sentries(3).is_empty());
    assert_eq!(wot.non_sentries(1).len(), 9);
    assert_eq!(wot.non_sentries(2).len(), 11);

    // Paths
    assert!(wot.find_paths(WotId(3), WotId(0), 1).unwrap().is_empty());
    assert_eq!(wot.find_paths(WotId(3), WotId(0), 2).unwrap(), vec![ids(&[3, 2, 0])]);

    // Only sentry 2 reaches 0 in one hop; 1 and 3 do not.
    assert!(outdistanced(&wot, 0, 1, 1));
    assert!(!outdistanced(&wot, 0, 3, 1));
    assert!(!outdistanced(&wot, 0, 2, 2));

    // Tail removal
    assert_eq!(wot.remove_node().unwrap(), WotId(11));
    assert_eq!(wot.size(), 11);

    // A disabled member is no sentry.
    assert!(!wot.set_enabled(WotId(3), false).unwrap());
    assert_eq!(wot.disabled(), ids(&[3]));
    assert!(!outdistanced(&wot, 0, 2, 1));

    // Fork independence
    let mut copy = wot.fork();
    assert!(!copy.set_enabled(WotId(3), false).unwrap());
    assert_eq!(copy.add_node(), WotId(11));
    assert_eq!(copy.size(), 12);
    assert_eq!(wot.size(), 11);
    assert_eq!(wot.disabled().len(), 1);
    assert!(!outdistanced(&copy, 0, 2, 1));
}

#[test]
fn test_structural_errors_do_not_mutate() {
    let mut wot = WebOfTrust::new(3);
    assert!(matches!(wot.remove_node(), Err(WotError::EmptyGraph)));
    wot.add_node();
    wot.add_node();
    let before = wot.dump();

    assert!(wot.add_link(WotId(0), WotId(0)).is_err());
    assert!(wot.add_link(WotId(0), WotId(2)).is_err());
    assert!(wot.remove_link(WotId(7), WotId(0)).is_err());
    assert!(wot.set_enabled(WotId(2), false).is_err());
    assert!(wot.is_enabled(WotId(2)).is_err());
    assert!(!wot.exists_link(WotId(9), WotId(0)));

    assert_eq!(wot.dump(), before);
}

#[test]
fn test_remove_node_drops_its_links() {
    let mut wot = WebOfTrust::new(3);
    for _ in 0..3 {
        wot.add_node();
    }
    wot.add_link(WotId(0), WotId(2)).unwrap();
    wot.add_link(WotId(2), WotId(1)).unwrap();
    assert_eq!(wot.remove_node().unwrap(), WotId(2));
    assert_eq!(wot.issued_count(WotId(0)).unwrap(), 0);
    assert_eq!(wot.received_count(WotId(1)).unwrap(), 0);
    // The index comes back clean.
    assert_eq!(wot.add_node(), WotId(2));
    assert!(!wot.exists_link(WotId(0), WotId(2)));
}
