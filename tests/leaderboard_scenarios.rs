// ==============================================
// LEADERBOARD SCENARIO TESTS (integration)
// ==============================================
//
// End-to-end scenarios driven through the public API only.

use rankkit::prelude::*;

fn standings(pairs: &[(&str, i64)]) -> Vec<Standing> {
    pairs.iter().map(|&(name, score)| Standing::new(name, score)).collect()
}

// ==============================================
// Ordering and rank
// ==============================================

mod ordering {
    use super::*;

    #[test]
    fn three_entities_inserted_out_of_order() {
        let mut board = Leaderboard::new();
        board.add_or_update("A", 120).unwrap();
        board.add_or_update("D", 130).unwrap();
        board.add_or_update("E", 60).unwrap();

        assert_eq!(
            board.ordered_sequence(),
            standings(&[("D", 130), ("A", 120), ("E", 60)])
        );
        assert_eq!(board.rank_of("A"), Some(2));
        assert_eq!(board.top_k(2), standings(&[("D", 130), ("A", 120)]));
        assert_eq!(board.top_k_indexed(2), board.top_k(2));
    }

    #[test]
    fn equal_scores_order_by_name() {
        let mut board = Leaderboard::new();
        board.add_or_update("Bob", 75).unwrap();
        board.add_or_update("Amy", 75).unwrap();
        assert_eq!(
            board.ordered_sequence(),
            standings(&[("Amy", 75), ("Bob", 75)])
        );
        assert_eq!(board.rank_of("Bob"), Some(2));
    }

    #[test]
    fn negative_and_zero_scores_rank_below_positive() {
        let mut board = Leaderboard::new();
        for (name, score) in [("neg", -10), ("zero", 0), ("pos", 3)] {
            board.add_or_update(name, score).unwrap();
        }
        assert_eq!(
            board.ordered_sequence(),
            standings(&[("pos", 3), ("zero", 0), ("neg", -10)])
        );
    }

    #[test]
    fn update_repositions_entity() {
        let mut board = Leaderboard::new();
        for (name, score) in [("a", 10), ("b", 20), ("c", 30)] {
            board.add_or_update(name, score).unwrap();
        }
        board.add_or_update("a", 40).unwrap();
        assert_eq!(board.rank_of("a"), Some(1));
        board.adjust_score("a", -35).unwrap();
        assert_eq!(board.rank_of("a"), Some(3));
        assert_eq!(board.history_of("a").unwrap(), &[10, 40, 5]);
        board.check_invariants().unwrap();
    }
}

// ==============================================
// Error paths
// ==============================================

mod errors {
    use super::*;

    #[test]
    fn remove_ghost_on_empty_board() {
        let mut board = Leaderboard::new();
        let err = board.remove("ghost").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "entity not found: ghost");
        assert!(board.is_empty());
        board.check_invariants().unwrap();
    }

    #[test]
    fn empty_name_leaves_board_unchanged() {
        let mut board = Leaderboard::new();
        board.add_or_update("a", 1).unwrap();
        let before = board.export();
        assert!(matches!(
            board.add_or_update("", 5),
            Err(LeaderboardError::InvalidInput(_))
        ));
        assert_eq!(board.export(), before);
    }

    #[test]
    fn zero_k_is_clamped_or_rejected() {
        let mut board = Leaderboard::new();
        board.add_or_update("a", 1).unwrap();
        board.add_or_update("b", 2).unwrap();
        assert_eq!(board.top_k(0), standings(&[("b", 2)]));
        assert!(board.try_top_k(0).is_err());
        assert_eq!(board.try_top_k(9).unwrap().len(), 2);
    }
}

// ==============================================
// Rounds with movement
// ==============================================

mod rounds {
    use super::*;

    #[test]
    fn round_reports_badges_and_departures() {
        let mut board = Leaderboard::new();
        for (i, name) in ["p1", "p2", "p3", "p4", "p5", "p6"].iter().enumerate() {
            board.add_or_update(name, 100 - i as i64 * 10).unwrap();
        }

        let report = board
            .apply_batch(|round| {
                round.adjust_score("p6", 100)?;
                round.adjust_score("p5", 45)?;
                round.remove("p1")?;
                Ok(())
            })
            .unwrap();

        let p6 = report.get("p6").unwrap();
        assert_eq!((p6.old_rank, p6.new_rank), (Some(6), 1));
        assert_eq!(p6.badges, vec![Badge::Top1, Badge::FastClimber]);
        assert_eq!(p6.change().to_string(), "▲ 5");

        let p5 = report.get("p5").unwrap();
        assert_eq!(p5.new_rank, 2);
        assert!(p5.badges.contains(&Badge::FastClimber));

        let p4 = report.get("p4").unwrap();
        assert_eq!(p4.delta, Some(-1));
        assert_eq!(p4.badges, vec![Badge::Top10]);

        assert_eq!(report.departed().len(), 1);
        assert_eq!(&*report.departed()[0].0, "p1");
    }

    #[test]
    fn consecutive_rounds_use_previous_baseline() {
        let mut board = Leaderboard::new();
        for (name, score) in [("a", 3), ("b", 2), ("c", 1)] {
            board.add_or_update(name, score).unwrap();
        }
        let first = board
            .apply_batch(|round| round.add_or_update("c", 10).map(|_| ()))
            .unwrap();
        assert_eq!(first.get("c").unwrap().delta, Some(2));

        let second = board.apply_batch(|_| Ok(())).unwrap();
        assert!(second.iter().all(|m| m.change() == RankChange::Unchanged));
        assert_eq!(board.get("c").unwrap().last_rank(), Some(1));
    }

    #[test]
    fn explicit_snapshot_diff_matches_batch() {
        let mut board = Leaderboard::new();
        for (name, score) in [("a", 3), ("b", 2), ("c", 1)] {
            board.add_or_update(name, score).unwrap();
        }
        let before = board.snapshot_all_ranks();
        board.add_or_update("c", 10).unwrap();
        let manual = board.movement_since(&before);
        assert_eq!(manual.get("c").unwrap().delta, Some(2));
        assert_eq!(manual.get("a").unwrap().delta, Some(-1));
        assert_eq!(manual.to_snapshot(), board.snapshot_all_ranks());
    }
}

// ==============================================
// Views
// ==============================================

mod views {
    use super::*;

    #[test]
    fn observe_reports_neighbors_and_history() {
        let mut board = Leaderboard::new();
        for (name, score) in [("Kiran", 120), ("Raghavan", 130), ("Ada", 60)] {
            board.add_or_update(name, score).unwrap();
        }
        let view = board.observe("Kiran").unwrap();
        assert_eq!(view.rank, 2);
        assert_eq!(view.neighbors.above, Some(Standing::new("Raghavan", 130)));
        assert_eq!(view.neighbors.below, Some(Standing::new("Ada", 60)));
        assert_eq!(view.change, RankChange::New);

        board.add_or_update("Ada", 200).unwrap();
        let view = board.observe("Kiran").unwrap();
        assert_eq!(view.change, RankChange::Down(1));
        assert_eq!(view.change.to_string(), "▼ 1");
    }

    #[test]
    fn stats_and_search() {
        let mut board = Leaderboard::new();
        for (name, score) in [("Kiran", 120), ("Raghavan", 130), ("Ada", 61)] {
            board.add_or_update(name, score).unwrap();
        }
        let stats = board.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total, 311);
        assert_eq!(stats.average, Some(104));
        assert_eq!((stats.min, stats.max), (Some(61), Some(130)));

        let hits = board.search("a");
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].0, 1);
        assert_eq!(board.search("RAG")[0].1, Standing::new("Raghavan", 130));
    }

    #[test]
    fn builder_settings_apply() {
        let mut board = LeaderboardBuilder::new()
            .default_top_k(2)
            .fast_climber_threshold(1)
            .build();
        for (name, score) in [("a", 3), ("b", 2), ("c", 1)] {
            board.add_or_update(name, score).unwrap();
        }
        assert_eq!(board.top_k_default().len(), 2);
        let report = board
            .apply_batch(|round| round.add_or_update("c", 3).map(|_| ()))
            .unwrap();
        assert!(report.get("c").unwrap().badges.contains(&Badge::FastClimber));
    }
}
