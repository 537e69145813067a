// ==============================================
// LEADERBOARD PROPERTY TESTS (integration)
// ==============================================
//
// Random mutation sequences checked against a sorted reference model.

use std::collections::BTreeMap;

use proptest::prelude::*;
use rankkit::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Upsert(u8, i64),
    Adjust(u8, i64),
    Remove(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..40, -100i64..100).prop_map(|(n, s)| Op::Upsert(n, s)),
        2 => (0u8..40, -20i64..20).prop_map(|(n, d)| Op::Adjust(n, d)),
        1 => (0u8..40).prop_map(Op::Remove),
    ]
}

fn name(n: u8) -> String {
    format!("entity-{:02}", n)
}

/// Applies `op` to both the board and a name -> score model.
fn apply(board: &mut Leaderboard, model: &mut BTreeMap<String, i64>, op: &Op) {
    match *op {
        Op::Upsert(n, s) => {
            let created = board.add_or_update(&name(n), s).unwrap().created;
            assert_eq!(created, model.insert(name(n), s).is_none());
        },
        Op::Adjust(n, d) => match model.get_mut(&name(n)) {
            Some(score) => {
                *score += d;
                assert_eq!(board.adjust_score(&name(n), d).unwrap().score, *score);
            },
            None => assert!(board.adjust_score(&name(n), d).unwrap_err().is_not_found()),
        },
        Op::Remove(n) => {
            let expected = model.remove(&name(n));
            match board.remove(&name(n)) {
                Ok(record) => assert_eq!(Some(record.score()), expected),
                Err(err) => {
                    assert!(err.is_not_found());
                    assert!(expected.is_none());
                },
            }
        },
    }
}

fn expected_order(model: &BTreeMap<String, i64>) -> Vec<Standing> {
    let mut order: Vec<Standing> = model
        .iter()
        .map(|(name, score)| Standing::new(name.as_str(), *score))
        .collect();
    order.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    order
}

proptest! {
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_order_rank_and_top_k(ops in prop::collection::vec(op_strategy(), 0..300)) {
        let mut board = Leaderboard::new();
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&mut board, &mut model, op);
            prop_assert!(board.check_invariants().is_ok());
        }

        let order = expected_order(&model);
        prop_assert_eq!(board.ordered_sequence(), order.clone());
        prop_assert_eq!(board.len(), model.len());

        for (idx, standing) in order.iter().enumerate() {
            let before = order
                .iter()
                .filter(|o| o.score > standing.score || (o.score == standing.score && o.name < standing.name))
                .count();
            prop_assert_eq!(board.rank_of(&standing.name), Some(before + 1));
            prop_assert_eq!(idx, before);
            prop_assert_eq!(board.entity_at_rank(idx + 1), Some(standing.clone()));
        }

        for k in [1usize, 2, 5, 10, 64] {
            let want: Vec<Standing> = order.iter().take(k).cloned().collect();
            prop_assert_eq!(board.top_k(k), want.clone());
            prop_assert_eq!(board.top_k_indexed(k), want);
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_movement_matches_rank_difference(
        setup in prop::collection::vec(op_strategy(), 1..80),
        round in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut board = Leaderboard::new();
        let mut model = BTreeMap::new();
        for op in &setup {
            apply(&mut board, &mut model, op);
        }
        let before = board.snapshot_all_ranks();

        let mut shadow = Leaderboard::from_export(board.export()).unwrap();
        let report = board
            .apply_batch(|batch| {
                for op in &round {
                    match *op {
                        Op::Upsert(n, s) => { batch.add_or_update(&name(n), s)?; },
                        Op::Adjust(n, d) => { let _ = batch.adjust_score(&name(n), d); },
                        Op::Remove(n) => { let _ = batch.remove(&name(n)); },
                    }
                }
                Ok(())
            })
            .unwrap();
        for op in &round {
            apply(&mut shadow, &mut model, op);
        }

        prop_assert_eq!(report.len(), board.len());
        for movement in &report {
            prop_assert_eq!(Some(movement.new_rank), board.rank_of(&movement.name));
            prop_assert_eq!(movement.old_rank, before.get(&movement.name));
            let expected = movement.old_rank.map(|old| old as i64 - movement.new_rank as i64);
            prop_assert_eq!(movement.delta, expected);
            prop_assert_eq!(
                board.get(&movement.name).and_then(|r| r.last_rank()),
                Some(movement.new_rank)
            );
        }
        prop_assert_eq!(board.ordered_sequence(), shadow.ordered_sequence());
        for (departed, _) in report.departed() {
            prop_assert!(!board.contains(departed));
        }
    }

    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_export_load_round_trip(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut board = Leaderboard::new();
        let mut model = BTreeMap::new();
        for op in &ops {
            apply(&mut board, &mut model, op);
        }
        let restored = Leaderboard::from_export(board.export()).unwrap();
        prop_assert!(restored.check_invariants().is_ok());
        prop_assert_eq!(restored.ordered_sequence(), board.ordered_sequence());
        for standing in board.ordered_sequence() {
            prop_assert_eq!(restored.history_of(&standing.name), board.history_of(&standing.name));
        }
    }
}
