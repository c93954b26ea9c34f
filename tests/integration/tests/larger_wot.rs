//! Integration test: sentries, distance rule and diagnostics on a twelve
//! member web of trust.
//!
//! ```text
//! 0 --> 1 --> 2 --> 4 --> 5 --> 6 --> 7
//!             ^
//!            ||
//!            ##==> 3 <-- 8 <-- 9 <========##
//!                        |                ||
//!                        `> 10 <==> 11 <==##
//! ```

use wotgraph_core::{DistanceParams, DistanceRule, WotId, WotParams};
use wotgraph_integration_tests::{ids, larger_wot};

fn params(node: usize, k: usize, step_max: u32, x_percent: f64) -> DistanceParams {
    DistanceParams {
        node: WotId(node),
        sentry_requirement: k,
        step_max,
        x_percent,
    }
}

#[test]
fn test_dump() {
    let wot = larger_wot();
    assert_eq!(
        wot.dump(),
        "max_links=3\nnodes_count=12\n000: []\n001: [0]\n002: [1, 3]\n003: [2, 8]\n\
         004: [2]\n005: [4]\n006: [5]\n007: [6]\n008: [9]\n009: [11]\n010: [8, 11]\n\
         011: [9, 10]\n"
    );
}

#[test]
fn test_sentries() {
    let wot = larger_wot();
    assert_eq!(wot.sentries(1).len(), 10);
    assert_eq!(wot.sentries(2), ids(&[2, 11]));
    assert!(wot.sentries(3).is_empty());
    for k in 0..4 {
        let enabled = wot.enabled();
        assert!(wot.sentries(k).iter().all(|id| enabled.contains(id)));
    }
}

#[test]
fn test_distance_grows_with_step_max() {
    let wot = larger_wot();
    let success: Vec<usize> = (1..=5)
        .map(|d| wot.compute_distance(params(2, 1, d, 1.0)).unwrap().success)
        .collect();
    // 1 and 3, then 8, 9, 11 and 10, one per extra hop.
    assert_eq!(success, vec![2, 3, 4, 5, 6]);
    assert!(success.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_distance_ratio_threshold() {
    let wot = larger_wot();
    // 6 of 9 sentries within five hops.
    assert!(!wot.is_outdistanced(params(2, 1, 5, 0.66)).unwrap());
    assert!(wot.is_outdistanced(params(2, 1, 5, 0.67)).unwrap());
    // 2 of 9 within one hop.
    assert!(!wot.is_outdistanced(params(2, 1, 1, 0.22)).unwrap());
    assert!(wot.is_outdistanced(params(2, 1, 1, 0.23)).unwrap());
}

#[test]
fn test_zero_ratio_is_never_outdistanced() {
    let wot = larger_wot();
    for node in 0..12 {
        for k in 0..3 {
            for d in 1..6 {
                assert!(!wot.is_outdistanced(params(node, k, d, 0.0)).unwrap());
            }
        }
    }
}

#[test]
fn test_check_member_with_default_params() {
    let wot = larger_wot();
    let rule = WotParams::default().distance_rule();
    // 12 members, 5 steps: requirement 2, sentries 2 and 11.
    let report = wot.check_member(WotId(7), &rule).unwrap();
    assert_eq!(report.sentries, 2);
    // 2 reaches 7 in four hops, 11 needs eight.
    assert_eq!(report.success, 1);
    assert!(report.outdistanced);

    let lenient = DistanceRule {
        x_percent: 0.5,
        ..rule
    };
    assert!(!wot.check_member(WotId(7), &lenient).unwrap().outdistanced);
}

#[test]
fn test_paths_follow_certifications() {
    let wot = larger_wot();
    assert!(wot.find_paths(WotId(3), WotId(0), 1).unwrap().is_empty());
    assert!(wot.find_paths(WotId(3), WotId(0), 10).unwrap().is_empty());
    assert_eq!(
        wot.find_paths(WotId(9), WotId(2), 4).unwrap(),
        vec![ids(&[9, 8, 3, 2])]
    );
    assert_eq!(
        wot.find_paths(WotId(11), WotId(3), 4).unwrap(),
        vec![ids(&[11, 9, 8, 3])]
    );
}

#[test]
fn test_centralities_cover_every_node() {
    let wot = larger_wot();
    let betweenness = wot.betweenness_centralities();
    let stress = wot.stress_centralities();
    assert_eq!(betweenness.len(), 12);
    assert_eq!(stress.len(), 12);
    // Sources and sinks relay nothing.
    assert_eq!(betweenness[0], 0);
    assert_eq!(betweenness[7], 0);
    // Only 0 certifies 1, and 0 reaches six members beyond it.
    assert_eq!(betweenness[1], 6);
    for (b, s) in betweenness.iter().zip(&stress) {
        assert!(b <= s);
    }
}
