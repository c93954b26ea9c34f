//! Integration test: block replay from JSON events and candidate evaluation
//! on fork branches.

use wotgraph_core::{BlockJournal, DistanceRule, WebOfTrust, WotEvent, WotId};
use wotgraph_integration_tests::larger_wot;

const BLOCKS: &str = r#"[
  [
    {"type": "identity_joined"},
    {"type": "identity_joined"},
    {"type": "identity_joined"}
  ],
  [
    {"type": "certification_issued", "issuer": 0, "target": 1},
    {"type": "certification_issued", "issuer": 1, "target": 2},
    {"type": "certification_issued", "issuer": 2, "target": 0}
  ],
  [
    {"type": "certification_expired", "issuer": 0, "target": 1},
    {"type": "member_excluded", "member": 1}
  ]
]"#;

#[test]
fn test_replay_json_blocks() {
    let blocks: Vec<Vec<WotEvent>> = serde_json::from_str(BLOCKS).unwrap();
    let mut wot = WebOfTrust::new(2);
    let mut dumps = vec![wot.dump()];
    let mut journals = Vec::new();
    for block in &blocks {
        journals.push(wot.apply_block(block).unwrap());
        dumps.push(wot.dump());
    }
    assert_eq!(
        wot.dump(),
        "max_links=2\nnodes_count=3\n000: [2]\n001: disabled []\n002: [1]\n"
    );

    // Reverting walks back through every intermediate state.
    for journal in journals.iter().rev() {
        dumps.pop();
        wot.revert_block(journal).unwrap();
        assert_eq!(Some(&wot.dump()), dumps.last());
    }
    assert_eq!(wot.size(), 0);
}

#[test]
fn test_rollback_after_noop_events() {
    let mut wot = larger_wot();
    wot.set_enabled(WotId(9), false).unwrap();
    let canonical = wot.dump();

    // A renewal of 2 -> 3 and an exclusion of an already excluded member
    // ride along with one real change.
    let block: Vec<WotEvent> = serde_json::from_str(
        r#"[
          {"type": "certification_issued", "issuer": 2, "target": 3},
          {"type": "member_excluded", "member": 9},
          {"type": "certification_issued", "issuer": 0, "target": 9}
        ]"#,
    )
    .unwrap();
    let journal = wot.apply_block(&block).unwrap();
    assert_eq!(journal.len(), 1);

    // The journal survives a trip through JSON, as the CLI stores it.
    let stored: BlockJournal =
        serde_json::from_str(&serde_json::to_string(&journal).unwrap()).unwrap();
    wot.revert_block(&stored).unwrap();
    assert_eq!(wot.dump(), canonical);
    assert!(canonical.contains("\n003: [2, 8]\n"));
}

#[test]
fn test_rejected_block_keeps_canonical_state() {
    let mut wot = larger_wot();
    let before = wot.dump();
    let block = [
        WotEvent::IdentityJoined,
        WotEvent::CertificationIssued {
            issuer: WotId(12),
            target: WotId(0),
        },
        WotEvent::MemberRevoked { member: WotId(99) },
    ];
    assert!(wot.apply_block(&block).is_err());
    assert_eq!(wot.dump(), before);
}

#[test]
fn test_competing_branches() {
    let canonical = larger_wot();
    let before = canonical.dump();
    let rule = DistanceRule {
        step_max: 5,
        x_percent: 0.67,
    };

    // Branch A: the newcomer is certified by both sentry neighbours.
    let a = canonical
        .evaluate_block(1, &[(WotId(2), WotId(12)), (WotId(3), WotId(12))], &[WotId(12)], &rule)
        .unwrap();
    // Branch B: the newcomer hangs off the end of the chain.
    let b = canonical
        .evaluate_block(1, &[(WotId(0), WotId(12)), (WotId(7), WotId(12))], &[WotId(12)], &rule)
        .unwrap();

    assert!(a.is_valid());
    assert!(!b.is_valid());
    assert_eq!(b.outdistanced(), vec![WotId(12)]);
    assert_eq!(a.members_count, 12);
    assert_eq!(a.sentry_requirement, 2);
    assert_eq!(canonical.dump(), before);
}

#[test]
fn test_branches_evaluated_in_parallel() {
    let canonical = larger_wot();
    let rule = DistanceRule {
        step_max: 5,
        x_percent: 0.67,
    };
    let candidates: Vec<Vec<(WotId, WotId)>> = vec![
        vec![(WotId(2), WotId(12)), (WotId(3), WotId(12))],
        vec![(WotId(0), WotId(12)), (WotId(7), WotId(12))],
    ];

    let verdicts: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = candidates
            .iter()
            .map(|links| {
                let branch = canonical.fork();
                let rule = &rule;
                scope.spawn(move || {
                    branch
                        .evaluate_block(1, links, &[WotId(12)], rule)
                        .map(|verdict| verdict.is_valid())
                        .unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(verdicts, vec![true, false]);
}
