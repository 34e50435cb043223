#[cfg(test)]
mod tests {
    use std::path::Path;

    use float_cmp::approx_eq;
    use rand::prelude::SmallRng;
    use rand::{Rng, SeedableRng};
    use test_case::test_case;

    use ccbp::engine::{BinSelection, Feature, Heuristic, PackingEngine, StepOutcome};
    use ccbp::entities::{Bin, CCBPInstance, Item};
    use ccbp::io::export::{export, export_instance};
    use ccbp::io::ext_repr::ExtCCBPInstance;
    use ccbp::io::import::{import, parse_instance, read_instance};
    use ccbp::util::assertions::engine_is_consistent;

    fn instance(capacity: u64, max_colors: usize, items: &[(u64, u32)]) -> CCBPInstance {
        let items = items.iter().map(|&(s, c)| Item::new(s, c)).collect();
        CCBPInstance::new("test", capacity, max_colors, items)
    }

    fn random_instance(rng: &mut SmallRng, n_items: usize) -> CCBPInstance {
        let capacity = rng.random_range(20..120);
        let max_colors = rng.random_range(1..4);
        let items = (0..n_items)
            .map(|_| Item::new(rng.random_range(1..=capacity), rng.random_range(0..6)))
            .collect();
        CCBPInstance::new("random", capacity, max_colors, items)
    }

    #[test]
    fn bin_rejects_item_without_mutation() {
        let mut bin = Bin::new(0, 10, 1);
        assert!(bin.pack(Item::new(6, 0)));

        let too_large = Item::new(5, 0);
        let other_color = Item::new(1, 1);
        for item in [too_large, other_color] {
            assert!(!bin.can_pack(&item));
            assert!(!bin.pack(item));
            assert_eq!(bin.remaining_capacity(), 4);
            assert_eq!(bin.colors(), &[0]);
            assert_eq!(bin.items(), &[Item::new(6, 0)]);
        }
    }

    #[test]
    fn bin_pack_deducts_exact_size() {
        let mut bin = Bin::new(0, 10, 2);
        assert!(bin.pack(Item::new(3, 4)));
        assert_eq!(bin.remaining_capacity(), 7);
        assert!(bin.pack(Item::new(7, 5)));
        assert_eq!(bin.remaining_capacity(), 0);
        assert!(bin.is_full());
        assert_eq!(bin.colors(), &[4, 5]);
        //color budget exhausted, but an existing color is still accepted if it fits
        let mut bin = Bin::new(1, 10, 2);
        bin.pack(Item::new(1, 4));
        bin.pack(Item::new(1, 5));
        assert!(!bin.can_pack(&Item::new(1, 6)));
        assert!(bin.can_pack(&Item::new(1, 5)));
    }

    #[test]
    fn two_colors_one_allowed_opens_second_bin() {
        let instance = instance(10, 1, &[(6, 0), (5, 1)]);
        let mut engine = PackingEngine::new(&instance);

        assert!(matches!(
            engine.solve_one_step(Heuristic::FirstFit),
            StepOutcome::Packed { bin_id: 0, closed: false, .. }
        ));
        assert!(matches!(
            engine.solve_one_step(Heuristic::FirstFit),
            StepOutcome::Packed { bin_id: 1, closed: false, .. }
        ));
        assert_eq!(engine.solve_one_step(Heuristic::FirstFit), StepOutcome::Exhausted);

        assert_eq!(engine.open_bins().len(), 2);
        assert_eq!(engine.closed_bins().len(), 0);
        assert_eq!(engine.open_bins()[0].remaining_capacity(), 4);
        assert_eq!(engine.open_bins()[1].remaining_capacity(), 5);
        assert!(approx_eq!(f64, engine.feature(Feature::AvgW), 4.5, ulps = 2));
        assert!(engine_is_consistent(&engine, &instance));
    }

    #[test]
    fn full_bin_is_closed() {
        let instance = instance(10, 2, &[(4, 0), (4, 0), (2, 0)]);
        let mut engine = PackingEngine::new(&instance);

        engine.solve_one_step(Heuristic::FirstFit);
        engine.solve_one_step(Heuristic::FirstFit);
        assert_eq!(
            engine.solve_one_step(Heuristic::FirstFit),
            StepOutcome::Packed {
                item: Item::new(2, 0),
                bin_id: 0,
                closed: true
            }
        );

        assert_eq!(engine.closed_bins().len(), 1);
        assert_eq!(engine.open_bins().len(), 0);
        assert_eq!(engine.closed_bins()[0].remaining_capacity(), 0);
        assert!(approx_eq!(f64, engine.feature(Feature::OBins), 0.0, ulps = 2));
        assert!(engine_is_consistent(&engine, &instance));
    }

    #[test]
    fn solve_all_leaves_last_item() {
        let instance = instance(10, 2, &[(4, 0), (4, 0), (2, 0)]);
        let mut engine = PackingEngine::new(&instance);
        let solution = engine.solve_all(Heuristic::FirstFit);

        assert_eq!(solution.remaining_items, vec![Item::new(2, 0)]);
        assert_eq!(solution.n_packed_items(), 2);
        assert_eq!(solution.n_closed_bins, 0);
        assert_eq!(solution.open_bins()[0].remaining_capacity(), 2);
        assert!(engine_is_consistent(&engine, &instance));
    }

    #[test]
    fn total_item_size_saturates() {
        let regular = instance(10, 1, &[(4, 0), (3, 1)]);
        assert_eq!(regular.total_item_size(), 7);
        let huge = instance(10, 1, &[(u64::MAX, 0), (5, 0), (3, 1)]);
        assert_eq!(huge.total_item_size(), u64::MAX);
    }

    #[test]
    fn chooser_is_consulted_before_popping_every_item_including_oversized() {
        let instance = instance(10, 1, &[(3, 0), (11, 0), (4, 0), (2, 0)]);
        let mut engine = PackingEngine::new(&instance);

        let mut seen_remaining = vec![];
        let solution = engine.solve_all_by(|e| {
            seen_remaining.push(e.n_remaining_items());
            Heuristic::FirstFit
        });

        //the oversized item is still pending when the second call is made
        assert_eq!(seen_remaining, vec![4, 3, 2]);
        assert_eq!(solution.skipped_items, vec![Item::new(11, 0)]);
        assert!(engine_is_consistent(&engine, &instance));

        let wider = CCBPInstance::new("wider", 12, 1, instance.items.clone());
        assert!(!engine_is_consistent(&engine, &wider));
    }

    #[test]
    fn oversized_items_are_skipped() {
        let instance = instance(10, 1, &[(11, 0), (3, 0), (4, 0)]);
        let mut engine = PackingEngine::new(&instance);

        assert_eq!(
            engine.solve_one_step(Heuristic::BestFit),
            StepOutcome::Skipped(Item::new(11, 0))
        );
        let solution = engine.solve_all(Heuristic::BestFit);

        assert_eq!(solution.skipped_items, vec![Item::new(11, 0)]);
        assert_eq!(solution.n_packed_items(), 1);
        assert_eq!(solution.remaining_items.len(), 1);
        assert!(engine_is_consistent(&engine, &instance));
    }

    /// Open bins after setup (capacity 10, two colors per bin), probe item (2, 0):
    /// bin 0: empty, leftover 8
    /// bin 1: colors {0}, leftover 5
    /// bin 2: colors {1}, leftover 3
    /// bin 3: colors {2}, leftover 7
    #[test_case(Heuristic::FirstFit, 0)]
    #[test_case(Heuristic::FirstFitSc, 1)]
    #[test_case(Heuristic::FirstFitDc, 0)]
    #[test_case(Heuristic::BestFit, 2)]
    #[test_case(Heuristic::BestFitSc, 1)]
    #[test_case(Heuristic::BestFitDc, 2)]
    #[test_case(Heuristic::WorstFit, 0)]
    #[test_case(Heuristic::WorstFitSc, 1)]
    #[test_case(Heuristic::WorstFitDc, 0)]
    #[test_case(Heuristic::AlmostWorstFit, 3)]
    #[test_case(Heuristic::AlmostWorstFitSc, 1; "almost worst fit sc single candidate")]
    #[test_case(Heuristic::AlmostWorstFitDc, 3)]
    fn heuristic_selects_expected_bin(heuristic: Heuristic, expected_bin_id: usize) {
        let instance = instance(10, 2, &[(3, 0), (5, 1), (1, 2), (2, 0), (9, 9)]);
        let mut engine = PackingEngine::new(&instance);
        for _ in 0..3 {
            engine.solve_one_step(Heuristic::FirstFitSc);
        }
        assert_eq!(engine.open_bins().len(), 4);

        match engine.solve_one_step(heuristic) {
            StepOutcome::Packed { bin_id, .. } => assert_eq!(bin_id, expected_bin_id),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(engine.open_bins().len(), 4);
    }

    #[test]
    fn almost_worst_fit_prefers_later_tie_of_the_loosest() {
        //bins 0 and 1 both end up with leftover 5 for the probe item
        let instance = instance(10, 1, &[(3, 0), (3, 0), (2, 0), (9, 9)]);
        let mut engine = PackingEngine::new(&instance);
        engine.solve_one_step(Heuristic::FirstFit);
        engine.solve_one_step(Heuristic::FirstFitDc);
        assert_eq!(engine.open_bins().len(), 2);

        match engine.solve_one_step(Heuristic::AlmostWorstFit) {
            StepOutcome::Packed { bin_id, .. } => assert_eq!(bin_id, 1),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn no_candidate_opens_new_bin() {
        let instance = instance(10, 1, &[(3, 0), (3, 0), (9, 9)]);
        let mut engine = PackingEngine::new(&instance);
        engine.solve_one_step(Heuristic::FirstFit);

        //the only open bin already contains color 0
        match engine.solve_one_step(Heuristic::FirstFitDc) {
            StepOutcome::Packed { bin_id, .. } => assert_eq!(bin_id, 1),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(engine.n_bins(), 2);
    }

    #[test_case(Heuristic::FirstFit; "first fit")]
    #[test_case(Heuristic::BestFit; "best fit")]
    #[test_case(Heuristic::WorstFit; "worst fit")]
    fn selection_properties_hold_on_random_instances(heuristic: Heuristic) {
        let mut rng = SmallRng::seed_from_u64(0);
        for _ in 0..20 {
            let instance = random_instance(&mut rng, 60);
            let mut engine = PackingEngine::new(&instance);

            while engine.n_remaining_items() > 0 {
                let before = engine.clone();
                let item = *before.remaining_items().front().unwrap();
                let outcome = engine.solve_one_step(heuristic);
                assert!(engine_is_consistent(&engine, &instance));

                let StepOutcome::Packed { bin_id, .. } = outcome else {
                    continue;
                };
                let candidates = before
                    .open_bins()
                    .iter()
                    .filter(|b| b.can_pack(&item))
                    .map(|b| (b.id, b.remaining_capacity() - item.size))
                    .collect::<Vec<_>>();

                match candidates.iter().find(|(id, _)| *id == bin_id) {
                    None => assert!(candidates.is_empty(), "opened a bin while candidates existed"),
                    Some(&(_, chosen)) => match heuristic.decompose().0 {
                        BinSelection::FirstFit => assert_eq!(candidates[0].0, bin_id),
                        BinSelection::BestFit => {
                            assert!(candidates.iter().all(|&(_, l)| chosen <= l))
                        }
                        BinSelection::WorstFit => {
                            assert!(candidates.iter().all(|&(_, l)| chosen >= l))
                        }
                        BinSelection::AlmostWorstFit => unreachable!(),
                    },
                }
            }
        }
    }

    #[test]
    fn features_of_fresh_engine() {
        let instance = instance(100, 2, &[(10, 0), (20, 1), (60, 1), (80, 2)]);
        let engine = PackingEngine::new(&instance);

        let expected_stdl = (3275.0f64 / 3.0).sqrt() / 80.0;
        let expected = [
            (Feature::AvgL, 42.5 / 80.0),
            (Feature::StdL, expected_stdl),
            (Feature::Small, 0.5),
            (Feature::VSmall, 0.5),
            (Feature::Large, 0.5),
            (Feature::VLarge, 0.25),
            (Feature::ColorC, 2.0 / 3.0),
            (Feature::OBins, 1.0),
            (Feature::AvgW, 100.0),
            (Feature::ColorF, 0.0),
        ];
        for (feature, value) in expected {
            let actual = engine.feature(feature);
            assert!(
                approx_eq!(f64, actual, value, epsilon = 1e-12),
                "{feature}: expected {value}, got {actual}"
            );
        }
        assert_eq!(engine.feature_vector().len(), Feature::ALL.len());
        assert_eq!(engine.features(&[Feature::AvgW, Feature::OBins]), vec![100.0, 1.0]);
    }

    #[test]
    fn features_stay_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for heuristic in Heuristic::ALL {
            let instance = random_instance(&mut rng, 40);
            let mut engine = PackingEngine::new(&instance);
            while engine.n_remaining_items() > 1 {
                let [avgl, stdl, small, vsmall, large, vlarge, colorc, obins, avgw, colorf] =
                    engine.feature_vector();
                for fraction in [avgl, small, vsmall, large, vlarge, obins] {
                    assert!((0.0..=1.0).contains(&fraction), "{fraction} out of [0, 1]");
                }
                assert!(stdl >= 0.0);
                assert!(colorc > 0.0 && colorc <= 1.0);
                assert!(avgw >= 0.0 && avgw <= instance.capacity as f64);
                assert!(colorf >= 0.0 && colorf <= instance.max_colors as f64);
                engine.solve_one_step(heuristic);
            }
        }
    }

    #[test]
    fn simulated_step_leaves_engine_untouched() {
        let instance = instance(10, 2, &[(4, 0), (4, 1), (2, 0), (5, 3)]);
        let mut engine = PackingEngine::new(&instance);
        engine.solve_one_step(Heuristic::FirstFit);
        let features_before = engine.feature_vector();

        let probe = engine.simulate_step(Heuristic::WorstFit);

        assert_eq!(probe.n_remaining_items(), 2);
        assert_eq!(engine.n_remaining_items(), 3);
        assert_eq!(engine.open_bins()[0].items().len(), 1);
        assert_eq!(engine.feature_vector(), features_before);
    }

    #[test]
    fn heuristic_and_feature_names() {
        for heuristic in Heuristic::ALL {
            assert_eq!(heuristic.to_string().parse::<Heuristic>().unwrap(), heuristic);
        }
        for feature in Feature::ALL {
            assert_eq!(feature.to_string().parse::<Feature>().unwrap(), feature);
        }
        assert!("NEXT_FIT".parse::<Heuristic>().is_err());
        assert!("AVGX".parse::<Feature>().is_err());

        assert_eq!(
            serde_json::to_string(&Heuristic::AlmostWorstFitSc).unwrap(),
            "\"ALMOST_WORST_FIT_SC\""
        );
        assert_eq!(serde_json::to_string(&Feature::VSmall).unwrap(), "\"VSMALL\"");
        assert_eq!(
            serde_json::from_str::<Feature>("\"COLORF\"").unwrap(),
            Feature::ColorF
        );
    }

    #[test]
    fn parse_valid_instance() {
        let text = "3\n10.0\n2\n\n4 1\n6 2\n  3 1  \n";
        let instance = parse_instance("inline", text).unwrap();

        assert_eq!(instance.name, "inline");
        assert_eq!(instance.capacity, 10);
        assert_eq!(instance.max_colors, 2);
        assert_eq!(
            instance.items,
            vec![Item::new(4, 1), Item::new(6, 2), Item::new(3, 1)]
        );
    }

    #[test_case("2\n10\n"; "missing header")]
    #[test_case("3\n10\n2\n4 1\n6 2\n"; "truncated items")]
    #[test_case("1\n10\n2\n4\n"; "missing color")]
    #[test_case("1\n10\n2\nfour 1\n"; "invalid size")]
    #[test_case("1\n0\n2\n4 1\n"; "zero capacity")]
    #[test_case("1\n10\n0\n4 1\n"; "zero colors")]
    #[test_case("x\n10\n2\n4 1\n"; "invalid item count")]
    #[test_case("1e19\n10\n2\n4 1\n"; "absurd item count")]
    #[test_case("1000000000000\n10\n2\n4 1\n"; "huge item count")]
    fn parse_invalid_instance(text: &str) {
        assert!(parse_instance("invalid", text).is_err());
    }

    #[test_case("../assets/training/ccbp_train_01.txt", 40; "train_01")]
    #[test_case("../assets/training/ccbp_train_03.txt", 30; "train_03")]
    #[test_case("../assets/testing/ccbp_test_02.txt", 35; "test_02")]
    fn read_instance_from_file(path: &str, n_items: usize) {
        let path = Path::new(path);
        let instance = read_instance(path).unwrap();
        assert_eq!(instance.n_items(), n_items);
        assert_eq!(instance.name, path.file_name().unwrap().to_str().unwrap());

        for heuristic in Heuristic::ALL {
            let mut engine = PackingEngine::new(&instance);
            let solution = engine.solve_all(heuristic);
            assert_eq!(solution.remaining_items.len(), 1);
            assert_eq!(
                solution.skipped_items.len(),
                instance.oversized_items().count()
            );
            assert!(engine_is_consistent(&engine, &instance));
        }
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_instance(Path::new("../assets/does_not_exist.txt")).is_err());
    }

    #[test]
    fn export_solution() {
        let instance = instance(10, 2, &[(4, 0), (6, 1), (3, 0), (1, 1)]);
        let mut engine = PackingEngine::new(&instance);
        let solution = engine.solve_all(Heuristic::FirstFit);
        let ext = export(&solution, 0.0);

        assert_eq!(ext.bins.len(), 2);
        assert!(ext.bins[0].closed);
        assert_eq!(ext.bins[0].colors, vec![0, 1]);
        assert!(!ext.bins[1].closed);
        assert_eq!(ext.unpacked_items, vec![Item::new(1, 1)]);
        assert!(approx_eq!(f64, ext.avg_waste, 3.5, ulps = 2));

        let json = serde_json::to_string(&ext).unwrap();
        assert!(json.contains("\"remaining_capacity\":7"));
    }

    #[test]
    fn import_external_instance() {
        let original = instance(10, 2, &[(4, 0), (6, 1), (3, 0)]);
        let ext = export_instance(&original);
        let json = serde_json::to_string(&ext).unwrap();
        let parsed: ExtCCBPInstance = serde_json::from_str(&json).unwrap();

        let imported = import(&parsed).unwrap();
        assert_eq!(imported.name, "test");
        assert_eq!(imported.capacity, 10);
        assert_eq!(imported.max_colors, 2);
        assert_eq!(imported.items, original.items);
        assert_eq!(imported.total_item_size(), 13);

        let no_colors = ExtCCBPInstance {
            max_colors: 0,
            ..parsed
        };
        assert!(import(&no_colors).is_err());
    }
}
