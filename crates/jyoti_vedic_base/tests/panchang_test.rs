//! Integration tests for panchang elements.

use approx::assert_abs_diff_eq;
use jyoti_vedic_base::{
    Karana, Nakshatra, Paksha, Tithi, Vaar, Yoga, karana_from_elongation, panchang,
    panchang_with_sunrise, tithi_from_elongation, vaar_from_jd, yoga_from_sum,
};

#[test]
fn shukla_ekadashi() {
    let d = panchang(10.0, 130.0).unwrap();
    assert_eq!(d.tithi.number, 11);
    assert_eq!(d.tithi.tithi.name(), "Shukla Ekadashi");
    assert_eq!(d.tithi.paksha, Paksha::Shukla);
    assert_eq!(d.tithi.number_in_paksha, 11);
    assert_abs_diff_eq!(d.elongation, 120.0, epsilon = 1e-10);
    assert_eq!(d.nakshatra.number, 10);
    assert_eq!(d.nakshatra.nakshatra, Nakshatra::Magha);
    assert_eq!(d.yoga.number, 11);
    assert_eq!(d.karana.number, 21);
}

#[test]
fn full_and_new_moon() {
    let full = panchang(100.0, 279.0).unwrap();
    assert_eq!(full.tithi.tithi, Tithi::Purnima);
    assert_eq!(full.tithi.number, 15);

    let new = panchang(100.0, 98.0).unwrap();
    assert_eq!(new.tithi.tithi, Tithi::Amavasya);
    assert_eq!(new.tithi.paksha, Paksha::Krishna);
    assert_eq!(new.tithi.number_in_paksha, 15);
}

#[test]
fn krishna_paksha_numbering() {
    for t in 16..=30u8 {
        let elong = (t - 1) as f64 * 12.0 + 6.0;
        let pos = tithi_from_elongation(elong);
        assert_eq!(pos.number, t);
        assert_eq!(pos.paksha, Paksha::Krishna);
        assert_eq!(pos.number_in_paksha, t - 15);
    }
}

#[test]
fn every_tithi_has_two_karanas() {
    for t in 0..30u8 {
        let first = karana_from_elongation(t as f64 * 12.0 + 3.0);
        let second = karana_from_elongation(t as f64 * 12.0 + 9.0);
        assert_eq!(first.number, 2 * t + 1);
        assert_eq!(second.number, 2 * t + 2);
    }
}

#[test]
fn karana_month_sequence() {
    let names: Vec<Karana> = (0..60)
        .map(|slot| karana_from_elongation(slot as f64 * 6.0 + 1.0).karana)
        .collect();
    assert_eq!(names[0], Karana::Kimstughna);
    assert_eq!(&names[1..8], &[
        Karana::Bava,
        Karana::Balava,
        Karana::Kaulava,
        Karana::Taitila,
        Karana::Garaja,
        Karana::Vanija,
        Karana::Vishti,
    ]);
    assert_eq!(names[56], Karana::Vishti);
    assert_eq!(&names[57..], &[Karana::Shakuni, Karana::Chatushpada, Karana::Naga]);
    assert_eq!(names.iter().filter(|k| **k == Karana::Vishti).count(), 8);
}

#[test]
fn yoga_sweep() {
    let span = 360.0 / 27.0;
    for i in 0..27u8 {
        let y = yoga_from_sum(i as f64 * span + span / 2.0);
        assert_eq!(y.number, i + 1);
    }
    assert_eq!(yoga_from_sum(0.5).yoga, Yoga::Vishkambha);
    assert_eq!(yoga_from_sum(-0.5).yoga, Yoga::Vaidhriti);
}

#[test]
fn sunrise_anchor_gives_weekday() {
    // 2024-01-01 06:30 local civil time was a Monday.
    let jd = 2_460_310.5 + 6.5 / 24.0;
    assert_eq!(vaar_from_jd(jd), Vaar::Somvaar);
    let d = panchang_with_sunrise(256.0, 160.0, jd).unwrap();
    assert_eq!(d.vaar, Some(Vaar::Somvaar));
    assert!(panchang(256.0, 160.0).unwrap().vaar.is_none());
}

#[test]
fn serializes_names() {
    let d = panchang_with_sunrise(10.0, 130.0, 2_451_545.0).unwrap();
    let json = serde_json::to_value(d).unwrap();
    assert_eq!(json["tithi"]["tithi"], "ShuklaEkadashi");
    assert_eq!(json["tithi"]["paksha"], "Shukla");
    assert_eq!(json["karana"]["karana"], "Vanija");
    assert_eq!(json["vaar"], "Shanivaar");
}
