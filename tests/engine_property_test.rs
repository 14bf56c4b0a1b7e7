// ==========================================
// 引擎性质测试
// ==========================================
// 性质:
// - 汇总总量 == 可用单元数量之和
// - 效期等级随剩余天数单调不增
// - 低库存集合与 is_low 一致
// - 可预约过滤恰好保留 eligible 献血者,保持顺序
// - 引擎函数幂等
// ==========================================

use blood_bank_console::domain::{BloodUnit, Donor};
use blood_bank_console::engine::time_math::{date_start, days_until, parse_time_of_day};
use blood_bank_console::engine::{
    DashboardSummarizer, EligibilityGate, ExpiryClassifier, StockAggregator,
    StockThresholdMonitor,
};
use blood_bank_console::{BloodType, DonorEligibility};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

// ── 生成器 ──────────────────────────────────────

fn blood_type() -> impl Strategy<Value = BloodType> {
    prop::sample::select(BloodType::ALL.to_vec())
}

fn eligibility() -> impl Strategy<Value = DonorEligibility> {
    prop_oneof![
        Just(DonorEligibility::Eligible),
        Just(DonorEligibility::TemporarilyIneligible),
        Just(DonorEligibility::PermanentlyIneligible),
    ]
}

fn unit() -> impl Strategy<Value = BloodUnit> {
    (
        blood_type(),
        0u32..=1_000,
        prop_oneof![Just("available"), Just("reserved"), Just("expired")],
        1i64..=60,
    )
        .prop_map(|(blood_type, quantity_ml, status, shelf_days)| {
            let collection_date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
            BloodUnit {
                id: format!("U-{}-{}", blood_type, quantity_ml),
                blood_type,
                quantity_ml,
                collection_date,
                expiry_date: collection_date + Duration::days(shelf_days),
                status: status.to_string(),
            }
        })
}

fn donor() -> impl Strategy<Value = Donor> {
    ("[a-z]{3,8}", blood_type(), eligibility()).prop_map(|(name, blood_type, eligibility)| Donor {
        id: format!("D-{}", name),
        full_name: name,
        blood_type,
        phone: "0800".to_string(),
        email: None,
        address: None,
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        last_donation_date: None,
        eligibility,
        medical_notes: None,
    })
}

// ── proptest! ──────────────────────────────────────

proptest! {
    #[test]
    fn prop_aggregate_preserves_available_total(units in prop::collection::vec(unit(), 0..40)) {
        let totals = StockAggregator::aggregate(&units);
        let expected: u64 = units
            .iter()
            .filter(|u| u.is_available())
            .map(|u| u64::from(u.quantity_ml))
            .sum();

        prop_assert_eq!(StockAggregator::total_ml(&totals), expected);
        for blood_type in totals.keys() {
            prop_assert!(units.iter().any(|u| u.is_available() && u.blood_type == *blood_type));
        }
        prop_assert_eq!(StockAggregator::aggregate(&units), totals);
    }

    #[test]
    fn prop_expiry_tier_monotone(days in -400i64..400) {
        let classifier = ExpiryClassifier::new();
        prop_assert!(classifier.tier_for_days(days) >= classifier.tier_for_days(days + 1));
    }

    #[test]
    fn prop_days_until_is_floor(offset_minutes in -100_000i64..100_000) {
        let reference = date_start(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        let target = reference + Duration::minutes(offset_minutes);
        prop_assert_eq!(days_until(target, reference), offset_minutes.div_euclid(24 * 60));
    }

    #[test]
    fn prop_low_stock_agrees_with_is_low(
        units in prop::collection::vec(unit(), 0..40),
        threshold in 1u64..5_000,
    ) {
        let monitor = StockThresholdMonitor::with_threshold(threshold);
        let totals = StockAggregator::aggregate(&units);
        let low = monitor.low_stock_types(&totals);

        for (blood_type, quantity) in &totals {
            prop_assert_eq!(low.contains(blood_type), monitor.is_low(*quantity));
        }
        let summary = DashboardSummarizer::new(monitor).summarize(&units, 0, 0);
        prop_assert_eq!(summary.low_stock_type_count, low.len());
        prop_assert_eq!(summary.total_liters_available, StockAggregator::total_ml(&totals) / 1_000);
    }

    #[test]
    fn prop_schedulable_is_exactly_eligible(donors in prop::collection::vec(donor(), 0..30)) {
        let schedulable: Vec<&Donor> = EligibilityGate::schedulable(&donors);
        let expected: Vec<&Donor> = donors
            .iter()
            .filter(|d| d.eligibility == DonorEligibility::Eligible)
            .collect();
        prop_assert_eq!(schedulable, expected);
    }

    #[test]
    fn prop_valid_times_parse(hour in 0u32..24, minute in 0u32..60) {
        let text = format!("{:02}:{:02}", hour, minute);
        let parsed = parse_time_of_day(&text).unwrap();
        prop_assert_eq!(parsed, chrono::NaiveTime::from_hms_opt(hour, minute, 0).unwrap());
    }

    #[test]
    fn prop_out_of_range_times_rejected(hour in 24u32..100, minute in 0u32..100) {
        let text = format!("{:02}:{:02}", hour, minute);
        prop_assert!(parse_time_of_day(&text).is_err());
    }
}
