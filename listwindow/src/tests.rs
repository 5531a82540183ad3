use crate::*;

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::format;
use std::sync::Mutex;
use std::vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Row {
    id: u32,
    text: String,
}

fn rows(n: u32) -> Vec<Row> {
    (0..n)
        .map(|id| Row {
            id,
            text: id.to_string(),
        })
        .collect()
}

struct Element {
    index: Option<&'static str>,
    height: u32,
}

impl MeasuredElement for Element {
    fn index_attribute(&self) -> Option<&str> {
        self.index
    }

    fn measured_height(&self) -> u32 {
        self.height
    }
}

fn fixed_engine(n: u32, item_height: u32, overscan: usize) -> EngineState<Row, u32> {
    let options = EngineOptions::new(|row: &Row| row.id)
        .with_item_height(item_height)
        .with_overscan(overscan);
    EngineState::new(rows(n), options).unwrap()
}

fn variable_engine(n: u32, estimate: u32, extent: u32) -> EngineState<Row, u32> {
    let options = EngineOptions::new(|row: &Row| row.id)
        .with_estimate_height(move |_| estimate)
        .with_initial_extent(Some(extent));
    EngineState::new(rows(n), options).unwrap()
}

fn indexes<K>(items: &[VirtualItem<K>]) -> Vec<usize> {
    items.iter().map(|it| it.index).collect()
}

#[test]
fn fixed_window_at_top_matches_demo_list() {
    let mut engine = fixed_engine(10_000, 40, 5);
    engine.on_resize(750);

    assert_eq!(engine.total_height(), 400_000);
    assert_eq!(engine.total_list_height(), 400_000);
    assert_eq!(engine.window().range(), WindowRange::new(0, 24));
    for item in engine.virtual_items() {
        assert_eq!(item.offset_top, item.index as u64 * 40);
        assert_eq!(item.height, 40);
        assert_eq!(item.key, item.index as u32);
    }
}

#[test]
fn fixed_window_at_bottom_clamps_to_last_item() {
    let mut engine = fixed_engine(10_000, 40, 5);
    engine.on_resize(750);
    engine.on_scroll(400_000 - 750, 0);

    let range = engine.window().range();
    assert_eq!(range.end_index - 1, 9_999);
    // floor(399250 / 40) = 9981, minus overscan.
    assert_eq!(range.start_index, 9_976);
    assert_eq!(engine.total_height(), 400_000);
}

#[test]
fn fixed_window_membership_matches_brute_force() {
    for n in [1usize, 2, 7, 30] {
        for h in [1u32, 3, 10] {
            for extent in [1u32, 5, 10, 25] {
                for overscan in [0usize, 1, 3] {
                    let total = n as u64 * h as u64;
                    for scroll in 0..total {
                        let visible: Vec<usize> = (0..n)
                            .filter(|&i| {
                                let top = i as u64 * h as u64;
                                top < scroll + extent as u64 && top + h as u64 > scroll
                            })
                            .collect();
                        let first = visible[0].saturating_sub(overscan);
                        let last = (visible[visible.len() - 1] + overscan).min(n - 1);
                        let expected: Vec<usize> = (first..=last).collect();

                        let result = fixed_window(n, h, scroll, extent, overscan, |i| i);
                        assert_eq!(
                            indexes(&result.virtual_items),
                            expected,
                            "n={n} h={h} extent={extent} overscan={overscan} scroll={scroll}"
                        );
                        assert_eq!(result.total_extent, total);
                    }
                }
            }
        }
    }
}

#[test]
fn empty_list_yields_empty_window() {
    let engine = fixed_engine(0, 40, 5);
    assert!(engine.virtual_items().is_empty());
    assert_eq!(engine.total_height(), 0);

    let result = compute_window(0, |_| 40, |i| i, 0, 750, 5);
    assert!(result.is_empty());
    assert_eq!(result.total_extent, 0);

    let engine = variable_engine(0, 40, 750);
    assert!(engine.virtual_items().is_empty());
    assert_eq!(engine.total_height(), 0);
    assert_eq!(engine.index_at_offset(0), None);
}

#[test]
fn boundary_items_are_included_before_overscan() {
    // Viewport [10, 30) over 10px rows: rows 1 and 2 exactly fill it.
    let fixed = fixed_window(10, 10, 10, 20, 0, |i| i);
    assert_eq!(indexes(&fixed.virtual_items), vec![1, 2]);

    let linear = compute_window(10, |_| 10, |i| i, 10, 20, 0);
    assert_eq!(indexes(&linear.virtual_items), vec![1, 2]);

    // Viewport [5, 25): row 0 and row 2 are partially visible.
    let linear = compute_window(10, |_| 10, |i| i, 5, 20, 0);
    assert_eq!(indexes(&linear.virtual_items), vec![0, 1, 2]);
    let fixed = fixed_window(10, 10, 5, 20, 0, |i| i);
    assert_eq!(indexes(&fixed.virtual_items), vec![0, 1, 2]);
}

#[test]
fn variable_window_uses_prefix_sums() {
    let heights = [10u32, 30, 5, 50, 20];
    let result = compute_window(heights.len(), |i| heights[i], |i| i, 35, 20, 0);

    // Offsets: 0, 10, 40, 45, 95. Viewport [35, 55) covers items 1..=3.
    assert_eq!(indexes(&result.virtual_items), vec![1, 2, 3]);
    let offsets: Vec<u64> = result.virtual_items.iter().map(|it| it.offset_top).collect();
    assert_eq!(offsets, vec![10, 40, 45]);
    assert_eq!(result.total_extent, 115);
}

#[test]
fn scroll_past_end_still_resolves_against_real_offsets() {
    let result = compute_window(5, |_| 10, |i| i, 1_000, 20, 0);
    assert_eq!(indexes(&result.virtual_items), vec![4]);
    assert_eq!(result.total_extent, 50);

    let mut engine = variable_engine(5, 10, 20);
    engine.on_scroll(1_000, 0);
    assert_eq!(indexes(engine.virtual_items()), vec![4]);
    assert_eq!(engine.scroll_position(), 1_000);
}

#[test]
fn offset_index_matches_linear_scan() {
    let mut rng = Lcg::new(0x5eed);
    for _case in 0..200 {
        let count = rng.gen_range_usize(1, 80);
        let heights: Vec<u32> = (0..count).map(|_| rng.gen_range_u32(1, 60)).collect();
        let index = OffsetIndex::from_heights(heights.clone());
        let total: u64 = heights.iter().map(|&h| h as u64).sum();
        assert_eq!(index.total(), total);

        for _q in 0..20 {
            let scroll = rng.gen_range_u64(0, total + 100);
            let extent = rng.gen_range_u32(0, 300);
            let overscan = rng.gen_range_usize(0, 4);

            let expected = compute_window(count, |i| heights[i], |i| i, scroll, extent, overscan);
            let actual = index.window(scroll, extent, overscan, |i| i);
            assert_eq!(
                actual, expected,
                "heights={heights:?} scroll={scroll} extent={extent} overscan={overscan}"
            );
        }
    }
}

#[test]
fn uniform_variable_window_matches_fixed_window() {
    let mut rng = Lcg::new(42);
    for _case in 0..300 {
        let count = rng.gen_range_usize(1, 200);
        let h = rng.gen_range_u32(1, 50);
        let total = count as u64 * h as u64;
        let scroll = rng.gen_range_u64(0, total + 1);
        let extent = rng.gen_range_u32(1, 500);
        let overscan = rng.gen_range_usize(0, 6);

        let fixed = fixed_window(count, h, scroll, extent, overscan, |i| i);
        let linear = compute_window(count, |_| h, |i| i, scroll, extent, overscan);
        assert_eq!(
            fixed, linear,
            "count={count} h={h} scroll={scroll} extent={extent} overscan={overscan}"
        );
    }
}

#[test]
fn offset_index_updates_after_set_height() {
    let mut index = OffsetIndex::from_heights(vec![10; 6]);
    assert_eq!(index.set_height(2, 25), 15);
    assert_eq!(index.set_height(2, 25), 0);
    assert_eq!(index.set_height(99, 25), 0);
    assert_eq!(index.total(), 75);
    assert_eq!(index.offset(3), Some(45));
    assert_eq!(index.offset(6), None);
    assert_eq!(index.index_at_offset(44), Some(2));
    assert_eq!(index.index_at_offset(45), Some(3));
    assert_eq!(index.index_at_offset(10_000), Some(5));
}

#[test]
fn total_height_is_sum_of_all_items_regardless_of_window() {
    let heights: Arc<[u32]> = Arc::from([12u32, 40, 7, 90, 33, 21]);
    let options = EngineOptions::new(|row: &Row| row.id).with_estimate_height({
        let heights = Arc::clone(&heights);
        move |i| heights[i]
    });
    let mut engine = EngineState::new(rows(6), options).unwrap();
    engine.on_resize(20);

    assert_eq!(engine.total_height(), 203);
    engine.on_scroll(150, 0);
    assert_eq!(engine.total_height(), 203);
    assert!(engine.virtual_items().len() < 6);
}

#[test]
fn recomputing_unchanged_inputs_is_idempotent() {
    let mut engine = variable_engine(1_000, 25, 300);
    engine.on_scroll(4_321, 0);
    let before = engine.window().clone();
    let revision = engine.revision();

    engine.on_resize(300);
    engine.on_scroll(4_321, 10);

    assert_eq!(engine.window(), &before);
    assert_eq!(engine.revision(), revision + 2);
}

#[test]
fn measurement_replaces_estimate() {
    let mut engine = variable_engine(10, 40, 100);
    assert_eq!(engine.item_height(3), Some(40));
    assert!(!engine.is_measured(3));

    assert_eq!(engine.record_measurement(3, 77), Ok(true));
    assert_eq!(engine.item_height(3), Some(77));
    assert!(engine.is_measured(3));
    assert_eq!(engine.height_cache().get(&3), Some(77));
    assert_eq!(engine.total_height(), 9 * 40 + 77);
}

#[test]
fn measuring_an_item_shifts_the_items_after_it() {
    let mut engine = variable_engine(3, 40, 750);
    let offset_of = |e: &EngineState<Row, u32>, index: usize| {
        e.virtual_items()
            .iter()
            .find(|it| it.index == index)
            .map(|it| it.offset_top)
    };
    assert_eq!(offset_of(&engine, 2), Some(80));

    let element = Element {
        index: Some("1"),
        height: 120,
    };
    assert_eq!(engine.measure_height_ref(Some(&element)), Ok(true));

    assert_eq!(offset_of(&engine, 1), Some(40));
    assert_eq!(offset_of(&engine, 2), Some(160));
    assert_eq!(engine.total_height(), 200);
}

#[test]
fn a_changed_measurement_recomputes_exactly_once() {
    let calls = Arc::new(Mutex::new(0usize));
    let options = EngineOptions::new(|row: &Row| row.id)
        .with_estimate_height(|_| 40)
        .with_initial_extent(Some(200))
        .with_on_change(Some({
            let calls = Arc::clone(&calls);
            move |_: &WindowResult<u32>, _: bool| *calls.lock().unwrap() += 1
        }));
    let mut engine = EngineState::new(rows(20), options).unwrap();
    let revision = engine.revision();
    *calls.lock().unwrap() = 0;

    assert_eq!(engine.record_measurement(4, 55), Ok(true));
    assert_eq!(engine.revision(), revision + 1);
    assert_eq!(*calls.lock().unwrap(), 1);

    // Same height again: nothing changed, nothing recomputed.
    assert_eq!(engine.record_measurement(4, 55), Ok(false));
    assert_eq!(engine.revision(), revision + 1);
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn index_keyed_cache_goes_stale_after_reverse() {
    let options = EngineOptions::new_index_keyed(|i| format!("item-{i}"))
        .with_estimate_height(|_| 40)
        .with_initial_extent(Some(750));
    let mut engine = EngineState::new(rows(3), options).unwrap();
    engine.record_measurement(0, 120).unwrap();

    engine.reverse_items();

    // Row 2 now sits at index 0 and inherits the height measured for row 0.
    assert_eq!(engine.items()[0].id, 2);
    assert_eq!(engine.items()[0].text, "2");
    assert_eq!(engine.item_height(0), Some(120));
    assert_eq!(engine.item_height(2), Some(40));
    assert_eq!(engine.height_cache().get(&"item-0".to_string()), Some(120));
}

#[test]
fn identity_keyed_cache_follows_items_after_reverse() {
    let mut engine = variable_engine(3, 40, 750);
    engine.record_measurement(0, 120).unwrap();

    engine.update_items(|mut items| {
        items.reverse();
        items
    });

    assert_eq!(engine.items()[2].id, 0);
    assert_eq!(engine.item_height(0), Some(40));
    assert_eq!(engine.item_height(2), Some(120));
    assert_eq!(engine.item_offset(2), Some(80));
}

#[test]
fn prune_policy_drops_measurements_of_removed_items() {
    let options = EngineOptions::new(|row: &Row| row.id)
        .with_estimate_height(|_| 10)
        .with_cache_policy(CachePolicy::PruneMissing);
    let mut engine = EngineState::new(rows(5), options).unwrap();
    engine.record_measurement(1, 30).unwrap();
    engine.record_measurement(4, 50).unwrap();
    assert_eq!(engine.height_cache().len(), 2);

    engine.update_items(|items| items.into_iter().filter(|row| row.id != 4).collect());

    assert_eq!(engine.height_cache().len(), 1);
    assert_eq!(engine.height_cache().get(&1), Some(30));
    assert_eq!(engine.height_cache().get(&4), None);
}

#[test]
fn retain_policy_keeps_measurements_of_removed_items() {
    let mut engine = variable_engine(5, 10, 100);
    engine.record_measurement(4, 50).unwrap();

    engine.set_items(rows(2));

    assert_eq!(engine.height_cache().get(&4), Some(50));
    assert_eq!(engine.total_height(), 20);
}

#[test]
fn variable_mode_without_estimate_is_a_configuration_error() {
    let options = EngineOptions::new(|row: &Row| row.id);
    let err = EngineState::new(rows(3), options).unwrap_err();
    assert_eq!(err, ConfigurationError::MissingEstimate);

    let options = EngineOptions::new(|row: &Row| row.id).with_item_height(0);
    let err = EngineState::new(rows(3), options).unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroItemHeight);

    let options = EngineOptions::new(|row: &Row| row.id)
        .with_item_height(10)
        .with_scrolling_delay_ms(0);
    let err = EngineState::new(rows(3), options).unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroScrollingDelay);
}

#[test]
fn measurement_applies_to_every_index_sharing_the_key() {
    let options = EngineOptions::new_index_keyed(|i| (i % 2) as u32)
        .with_estimate_height(|_| 40)
        .with_initial_extent(Some(200));
    let mut engine: EngineState<u32, u32> = EngineState::new(vec![10, 11, 12], options).unwrap();

    assert_eq!(engine.record_measurement(0, 120), Ok(true));
    assert_eq!(engine.item_height(1), Some(40));
    assert_eq!(engine.item_height(2), Some(120));
    assert_eq!(engine.item_offset(2), Some(160));
    assert_eq!(engine.total_height(), 280);

    // Replacing the items with the same sequence resolves to the same sizes.
    engine.set_items(vec![10, 11, 12]);
    assert_eq!(engine.item_height(2), Some(120));
    assert_eq!(engine.total_height(), 280);
}

#[test]
fn duplicate_identity_keys_share_one_measurement() {
    let options = EngineOptions::new(|v: &u32| *v)
        .with_estimate_height(|_| 40)
        .with_initial_extent(Some(200));
    let mut engine = EngineState::new(vec![5u32, 5, 5], options).unwrap();
    let revision = engine.revision();

    assert_eq!(engine.record_measurement(1, 120), Ok(true));
    assert_eq!(engine.revision(), revision + 1);
    let heights: Vec<_> = (0..3).map(|i| engine.item_height(i)).collect();
    assert_eq!(heights, vec![Some(120); 3]);
    assert_eq!(engine.total_height(), 360);
    let offsets: Vec<u64> = engine.virtual_items().iter().map(|it| it.offset_top).collect();
    assert_eq!(offsets, vec![0, 120, 240]);

    assert_eq!(engine.record_measurement(2, 120), Ok(false));
    assert_eq!(engine.revision(), revision + 1);
}

#[test]
fn zero_height_items_on_an_edge_are_skipped() {
    let heights = vec![10, 0, 0, 10];
    let index = OffsetIndex::from_heights(heights.clone());
    assert_eq!(index.index_at_offset(10), Some(3));
    assert_eq!(index.visible_range(10, 5), WindowRange::new(3, 4));

    let linear = compute_window(4, |i| heights[i], |i| i, 10, 5, 0);
    assert_eq!(linear.range(), WindowRange::new(3, 4));
}

#[test]
fn zero_extent_at_top_renders_the_first_item_in_both_modes() {
    let fixed = fixed_window(10, 10, 0, 0, 0, |i| i);
    let linear = compute_window(10, |_| 10, |i| i, 0, 0, 0);
    assert_eq!(fixed.range(), WindowRange::new(0, 1));
    assert_eq!(fixed, linear);

    let engine = fixed_engine(10, 10, 0);
    assert_eq!(indexes(engine.virtual_items()), vec![0]);
    let mut engine = variable_engine(10, 10, 0);
    engine.set_overscan(0);
    assert_eq!(indexes(engine.virtual_items()), vec![0]);

    // Scrolled away from the top with no extent, nothing is strictly visible.
    let index = OffsetIndex::from_heights(vec![10; 10]);
    assert_eq!(fixed_visible_range(10, 10, 50, 0), WindowRange::new(5, 5));
    assert_eq!(index.visible_range(50, 0), WindowRange::new(5, 5));
}

#[test]
fn rejected_options_leave_engine_unchanged() {
    let mut engine = fixed_engine(10, 10, 0);
    let err = engine.update_options(|o| o.item_height = None).unwrap_err();
    assert_eq!(err, ConfigurationError::MissingEstimate);
    assert!(engine.is_fixed());
    assert_eq!(engine.total_height(), 100);
}

#[test]
fn switching_to_variable_mode_rebuilds_offsets() {
    let mut engine = fixed_engine(10, 10, 0);
    engine
        .update_options(|o| {
            o.item_height = None;
            o.estimate_height = Some(Arc::new(|_: usize| 7));
        })
        .unwrap();
    assert!(!engine.is_fixed());
    assert_eq!(engine.total_height(), 70);
    assert_eq!(engine.item_offset(3), Some(21));
}

#[test]
fn measurement_without_resolvable_index_is_rejected() {
    let mut engine = variable_engine(5, 40, 200);
    let revision = engine.revision();

    let missing = Element {
        index: None,
        height: 10,
    };
    assert_eq!(
        engine.measure_height_ref(Some(&missing)),
        Err(ValidationError::MissingIndex)
    );

    for raw in ["", "abc", "-1", "1.5"] {
        let element = Element {
            index: Some(raw),
            height: 10,
        };
        assert_eq!(
            engine.measure_height_ref(Some(&element)),
            Err(ValidationError::InvalidIndex {
                value: raw.to_string()
            })
        );
    }

    let out_of_range = Element {
        index: Some("5"),
        height: 10,
    };
    assert_eq!(
        engine.measure_height_ref(Some(&out_of_range)),
        Err(ValidationError::IndexOutOfRange { index: 5, count: 5 })
    );

    let zero = Element {
        index: Some("2"),
        height: 0,
    };
    assert_eq!(
        engine.measure_height_ref(Some(&zero)),
        Err(ValidationError::ZeroHeight { index: 2 })
    );

    // Failures do not touch the cache or trigger recomputation, and the engine keeps working.
    assert!(engine.height_cache().is_empty());
    assert_eq!(engine.revision(), revision);
    assert_eq!(engine.measure_height_ref(None::<&Element>), Ok(false));
    let ok = Element {
        index: Some(" 2 "),
        height: 60,
    };
    assert_eq!(engine.measure_height_ref(Some(&ok)), Ok(true));
    assert_eq!(engine.item_height(2), Some(60));
}

#[test]
fn fixed_mode_ignores_measurements() {
    let mut engine = fixed_engine(10, 40, 0);
    let revision = engine.revision();
    assert_eq!(engine.record_measurement(2, 100), Ok(false));
    assert_eq!(engine.item_height(2), Some(40));
    assert_eq!(engine.revision(), revision);
}

#[test]
fn burst_of_scroll_events_debounces_to_one_transition_each_way() {
    let mut tracker = ScrollStateTracker::new(150);
    let mut started = 0;
    let mut stopped = 0;

    for now_ms in (0..100).step_by(10) {
        match tracker.on_scroll(now_ms) {
            Some(ScrollTransition::Started) => started += 1,
            Some(ScrollTransition::Stopped) => stopped += 1,
            None => {}
        }
        if tracker.tick(now_ms + 5).is_some() {
            stopped += 1;
        }
    }
    assert_eq!(started, 1);
    assert_eq!(stopped, 0);
    assert!(tracker.is_scrolling());
    // Last notification at 90ms.
    assert_eq!(tracker.idle_deadline_ms(), Some(240));

    assert_eq!(tracker.tick(239), None);
    assert_eq!(tracker.tick(240), Some(ScrollTransition::Stopped));
    assert_eq!(tracker.tick(1_000), None);
    assert_eq!(tracker.phase(), ScrollPhase::Idle);
}

#[test]
fn debounce_timer_keeps_a_single_slot() {
    let mut timer = DebounceTimer::new();
    timer.schedule(0, 100);
    timer.schedule(50, 100);
    assert_eq!(timer.deadline_ms(), Some(150));
    assert!(!timer.fire_if_due(100));
    assert!(timer.fire_if_due(150));
    assert!(!timer.is_pending());
    assert!(!timer.fire_if_due(1_000));

    timer.schedule(0, 10);
    timer.cancel();
    assert!(!timer.fire_if_due(1_000));
}

#[test]
fn engine_reports_scrolling_flag_through_on_change() {
    let flags = Arc::new(Mutex::new(Vec::new()));
    let options = EngineOptions::new(|row: &Row| row.id)
        .with_item_height(20)
        .with_scrolling_delay_ms(150)
        .with_on_change(Some({
            let flags = Arc::clone(&flags);
            move |_: &WindowResult<u32>, is_scrolling: bool| {
                flags.lock().unwrap().push(is_scrolling)
            }
        }));
    let mut engine = EngineState::new(rows(100), options).unwrap();
    engine.on_resize(100);
    flags.lock().unwrap().clear();

    engine.on_scroll(10, 0);
    engine.on_scroll(20, 50);
    assert!(engine.is_scrolling());
    assert_eq!(engine.tick(100), None);
    assert_eq!(engine.tick(200), Some(ScrollTransition::Stopped));
    assert!(!engine.is_scrolling());
    assert_eq!(
        engine.scroll_state(),
        ScrollState {
            scroll_position: 20,
            is_scrolling: false
        }
    );

    assert_eq!(*flags.lock().unwrap(), vec![true, true, false]);
}

#[test]
fn programmatic_positioning_does_not_mark_scrolling() {
    let mut engine = fixed_engine(100, 10, 0);
    engine.on_resize(30);
    let revision = engine.revision();
    engine.set_scroll_position(500);
    engine.set_scroll_position(500);
    assert!(!engine.is_scrolling());
    assert_eq!(engine.revision(), revision + 1);
    assert_eq!(engine.window().range(), WindowRange::new(50, 53));
}

#[test]
fn stop_scrolling_cancels_the_pending_timer() {
    let mut engine = fixed_engine(10, 10, 0);
    engine.on_scroll(5, 0);
    engine.stop_scrolling();
    assert!(!engine.is_scrolling());
    assert_eq!(engine.scroll_tracker().idle_deadline_ms(), None);
    assert_eq!(engine.tick(10_000), None);
}

#[test]
fn every_resize_recomputes() {
    let mut engine = fixed_engine(100, 10, 0);
    let revision = engine.revision();
    engine.on_resize(50);
    engine.on_resize(50);
    engine.on_resize(80);
    assert_eq!(engine.revision(), revision + 3);
    assert_eq!(engine.container_extent(), ContainerExtent { height: 80 });
    assert_eq!(engine.window().range(), WindowRange::new(0, 8));
}

#[test]
fn batch_update_coalesces_recomputation() {
    let calls = Arc::new(Mutex::new(0usize));
    let options = EngineOptions::new(|row: &Row| row.id)
        .with_estimate_height(|_| 10)
        .with_on_change(Some({
            let calls = Arc::clone(&calls);
            move |_: &WindowResult<u32>, _: bool| *calls.lock().unwrap() += 1
        }));
    let mut engine = EngineState::new(rows(100), options).unwrap();
    let revision = engine.revision();
    *calls.lock().unwrap() = 0;

    engine.batch_update(|e| {
        e.on_resize(50);
        e.on_scroll(200, 0);
        e.record_measurement(20, 30).unwrap();
        e.batch_update(|e| e.on_scroll(210, 5));
    });

    assert_eq!(engine.revision(), revision + 1);
    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(engine.scroll_position(), 210);
    assert!(engine.virtual_items().iter().any(|it| it.index == 20));
}

#[test]
fn apply_replays_events_in_order() {
    let mut engine = variable_engine(50, 10, 0);
    let events = [
        Event::Resize { height: 40 },
        Event::Scroll {
            position: 100,
            now_ms: 0,
        },
        Event::Measure {
            index: 10,
            height: 25,
        },
        Event::Tick { now_ms: 500 },
    ];
    for event in events {
        engine.apply(event).unwrap();
    }
    assert!(!engine.is_scrolling());
    assert_eq!(engine.item_height(10), Some(25));
    assert_eq!(engine.total_height(), 49 * 10 + 25);

    let err = engine
        .apply(Event::Measure {
            index: 50,
            height: 10,
        })
        .unwrap_err();
    assert_eq!(
        err,
        Error::Validation(ValidationError::IndexOutOfRange {
            index: 50,
            count: 50
        })
    );
}

#[test]
fn with_event_leaves_the_source_state_untouched() {
    let engine = fixed_engine(100, 10, 0);
    let next = engine
        .with_event(Event::Scroll {
            position: 300,
            now_ms: 0,
        })
        .unwrap();
    assert_eq!(engine.scroll_position(), 0);
    assert_eq!(next.scroll_position(), 300);
    assert!(next.is_scrolling());
    assert!(!engine.is_scrolling());
}

#[test]
fn measurements_survive_export_and_import() {
    let mut a = variable_engine(10, 10, 50);
    a.record_measurement(2, 30).unwrap();
    a.record_measurement(5, 42).unwrap();
    let snapshot = a.export_measurements();
    assert_eq!(snapshot.len(), 2);

    let mut b = variable_engine(10, 10, 50);
    b.import_measurements(snapshot);
    assert_eq!(b.item_height(2), Some(30));
    assert_eq!(b.item_height(5), Some(42));
    assert_eq!(b.total_height(), a.total_height());

    b.reset_measurements();
    assert!(b.height_cache().is_empty());
    assert_eq!(b.total_height(), 100);
}

#[test]
fn height_cache_record_reports_changes() {
    let mut cache = HeightCache::new();
    assert!(cache.record("a", 10));
    assert!(!cache.record("a", 10));
    assert!(cache.record("a", 12));
    assert!(cache.record("b", 3));
    assert_eq!(cache.get(&"a"), Some(12));
    assert_eq!(cache.iter().map(|(_, h)| h).sum::<u32>(), 15);
    assert_eq!(cache.retain(|k| *k == "b"), 1);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.remove(&"b"), Some(3));
    assert!(cache.is_empty());
}

#[test]
fn widen_clamps_to_list_bounds() {
    assert_eq!(WindowRange::new(3, 5).widen(2, 10), WindowRange::new(1, 7));
    assert_eq!(WindowRange::new(0, 2).widen(5, 4), WindowRange::new(0, 4));
    assert_eq!(WindowRange::new(10, 10).widen(0, 10), WindowRange::new(9, 10));
    assert_eq!(WindowRange::new(0, 0).widen(0, 10), WindowRange::EMPTY);
    assert_eq!(WindowRange::new(0, 3).widen(1, 0), WindowRange::EMPTY);
}

#[test]
fn parse_index_accepts_only_non_negative_integers() {
    assert_eq!(parse_index(Some("0")), Ok(0));
    assert_eq!(parse_index(Some("42")), Ok(42));
    assert_eq!(parse_index(None), Err(ValidationError::MissingIndex));
    assert!(matches!(
        parse_index(Some("NaN")),
        Err(ValidationError::InvalidIndex { .. })
    ));
}

#[test]
fn large_fixed_list_smoke() {
    let mut engine = fixed_engine(1_000_000, 1, 0);
    engine.batch_update(|e| {
        e.on_resize(10);
        e.on_scroll(123_456, 0);
    });
    assert_eq!(engine.window().range(), WindowRange::new(123_456, 123_466));
    assert_eq!(engine.index_at_offset(123_456), Some(123_456));
    assert_eq!(engine.index_at_offset(u64::MAX), Some(999_999));
}
