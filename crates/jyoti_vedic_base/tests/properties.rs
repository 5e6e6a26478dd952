//! Property tests for chart-independent invariants.

use approx::assert_abs_diff_eq;
use jyoti_vedic_base::dasha::{ALL_CYCLE_KINDS, DashaNode, schedule_from_moon};
use jyoti_vedic_base::{
    SUPPORTED_DIVISORS, house_distance, karana_from_elongation, normalize, normalize_360,
    nth_sign_from, panchang, resolve, score_signs, tithi_from_elongation, varga,
};
use proptest::prelude::*;

fn assert_tree(node: &DashaNode) {
    if node.children.is_empty() {
        return;
    }
    assert_abs_diff_eq!(node.children_total(), node.duration_years, epsilon = 1e-9);
    for child in &node.children {
        assert!(child.duration_years > 0.0);
        assert_eq!(child.depth, node.depth + 1);
        assert_tree(child);
    }
}

proptest! {
    #[test]
    fn normalize_ignores_whole_turns(lon in -1.0e6f64..1.0e6) {
        let a = normalize(lon);
        let b = normalize(normalize_360(lon));
        prop_assert_eq!(a, b);
        prop_assert!((0.0..360.0).contains(&a.longitude));
        prop_assert!((1..=12).contains(&a.sign.sign));
        prop_assert!((1..=27).contains(&a.nakshatra.number));
        prop_assert!((1..=4).contains(&a.nakshatra.pada));
        prop_assert!((0.0..1.0).contains(&a.nakshatra.elapsed_fraction));
    }

    #[test]
    fn whole_turn_shift_keeps_longitude(lon in 0.0f64..360.0, turns in -5i32..5) {
        let shifted = normalize(lon + 360.0 * turns as f64);
        prop_assert!((shifted.longitude - lon).abs() < 1e-9
            || (360.0 - (shifted.longitude - lon).abs()) < 1e-9);
    }

    #[test]
    fn house_distance_inverts_nth_sign(from in 1u8..=12, n in 1u8..=12) {
        let to = nth_sign_from(from, n);
        prop_assert_eq!(house_distance(from, to), n);
    }

    #[test]
    fn arudha_final_sign_in_range(h in 1u8..=12, l in 1u8..=12) {
        let r = resolve(h, l).unwrap();
        prop_assert!((1..=12).contains(&r.final_sign));
        let house = house_distance(h, r.final_sign);
        prop_assert!(house != 1 && house != 7);
        prop_assert_eq!(r, resolve(h, l).unwrap());
    }

    #[test]
    fn sav_total_is_337(signs in prop::array::uniform7(1u8..=12), asc in 1u8..=12) {
        let m = score_signs(&signs, asc).unwrap();
        prop_assert_eq!(m.sav_total(), 337);
        prop_assert!(m.bindus.iter().flatten().all(|&b| b <= 8));
    }

    #[test]
    fn varga_sign_in_range(lon in -720.0f64..720.0, idx in 0usize..SUPPORTED_DIVISORS.len()) {
        let s = varga(lon, SUPPORTED_DIVISORS[idx]).unwrap();
        prop_assert!((1..=12).contains(&s));
    }

    #[test]
    fn karana_is_half_tithi(elong in 0.0f64..360.0) {
        let t = tithi_from_elongation(elong).number;
        let k = karana_from_elongation(elong).number;
        prop_assert!(k == 2 * t - 1 || k == 2 * t);
    }

    #[test]
    fn panchang_ranges(sun in 0.0f64..360.0, moon in 0.0f64..360.0) {
        let d = panchang(sun, moon).unwrap();
        prop_assert!((1..=30).contains(&d.tithi.number));
        prop_assert!((1..=15).contains(&d.tithi.number_in_paksha));
        prop_assert!((1..=27).contains(&d.yoga.number));
        prop_assert!((1..=60).contains(&d.karana.number));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dasha_tree_sums(moon in 0.0f64..360.0, cycle in 0usize..3, depth in 1u8..=3) {
        let cycle = ALL_CYCLE_KINDS[cycle].cycle();
        let t = schedule_from_moon(moon, &cycle, depth).unwrap();
        prop_assert!((t.total_duration() - cycle.total_years).abs() < 1e-9);
        prop_assert!(t.mahadashas[0].start_offset.abs() < 1e-15);
        for w in t.mahadashas.windows(2) {
            prop_assert!((w[0].end_offset() - w[1].start_offset).abs() < 1e-9);
        }
        t.mahadashas.iter().for_each(assert_tree);
    }
}
