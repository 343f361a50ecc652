//! Property tests for the cart store and its totals.

use donationcart::{
    CartStore, DonationItem, DonationType, Error, ItemId, Money, PaymentMethod, Totals,
};
use proptest::prelude::*;

// ═══════════════════════════════════════════════════════════════════════
// Strategies
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
enum Op {
    Add(String, u64),
    Remove(String),
}

fn arb_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("a"), Just("b"), Just("c"), Just("d")].prop_map(str::to_string)
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_id(), 1u64..1_000_000).prop_map(|(id, cents)| Op::Add(id, cents)),
        arb_id().prop_map(Op::Remove),
    ]
}

fn arb_amounts() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(1u64..10_000_000, 0..20)
}

fn store_with(amounts: &[u64]) -> CartStore {
    let mut store = CartStore::new();
    for (i, cents) in amounts.iter().enumerate() {
        store.add_item(
            DonationItem::new(format!("item-{i}"), DonationType::OneTime, Money::from_cents(*cents))
                .unwrap(),
        );
    }
    store
}

/// Reference fee: `subtotal * 0.029 + 0.30`, rounded half-up to the cent.
fn expected_fee(subtotal_cents: u64) -> u64 {
    (subtotal_cents * 29 + 500) / 1000 + 30
}

// ═══════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn length_is_adds_minus_successful_removes(ops in prop::collection::vec(arb_op(), 0..50)) {
        let mut store = CartStore::new();
        let mut adds = 0usize;
        let mut removes = 0usize;

        for op in ops {
            match op {
                Op::Add(id, cents) => {
                    store.add_item(
                        DonationItem::new(id, DonationType::OneTime, Money::from_cents(cents))
                            .unwrap(),
                    );
                    adds += 1;
                }
                Op::Remove(id) => {
                    if store.remove_item(&ItemId::from(id)).is_some() {
                        removes += 1;
                    }
                }
            }
        }

        prop_assert_eq!(store.len(), adds - removes);
    }

    #[test]
    fn subtotal_is_sum_of_amounts(amounts in arb_amounts()) {
        let store = store_with(&amounts);
        let expected: u64 = amounts.iter().sum();
        prop_assert_eq!(store.calculate_totals().unwrap().subtotal, Money::from_cents(expected));
    }

    #[test]
    fn fee_is_zero_unless_covered_by_card(
        amounts in arb_amounts(),
        cover_fees in any::<bool>(),
        zelle in any::<bool>()
    ) {
        let mut store = store_with(&amounts);
        store.set_cover_fees(cover_fees);
        store.set_payment_method(if zelle { PaymentMethod::Zelle } else { PaymentMethod::Card });

        let totals = store.calculate_totals().unwrap();
        if cover_fees && !zelle {
            prop_assert_eq!(
                totals.processing_fee,
                Money::from_cents(expected_fee(totals.subtotal.cents()))
            );
        } else {
            prop_assert_eq!(totals.processing_fee, Money::ZERO);
        }
    }

    #[test]
    fn total_is_subtotal_plus_fee(amounts in arb_amounts(), cover_fees in any::<bool>()) {
        let mut store = store_with(&amounts);
        store.set_cover_fees(cover_fees);

        let totals = store.calculate_totals().unwrap();
        prop_assert_eq!(
            totals.total.cents(),
            totals.subtotal.cents() + totals.processing_fee.cents()
        );
    }

    #[test]
    fn totals_never_wrap(
        amounts in prop::collection::vec(1u64..=u64::MAX, 1..4),
        cover_fees in any::<bool>()
    ) {
        let mut store = store_with(&amounts);
        store.set_cover_fees(cover_fees);

        let exact: u128 = amounts.iter().map(|a| u128::from(*a)).sum();
        match store.calculate_totals() {
            Ok(totals) => {
                prop_assert_eq!(u128::from(totals.subtotal.cents()), exact);
                prop_assert_eq!(
                    u128::from(totals.total.cents()),
                    exact + u128::from(totals.processing_fee.cents())
                );
            }
            Err(err) => prop_assert!(matches!(err, Error::AmountOverflow)),
        }
    }

    #[test]
    fn clear_zeroes_totals(amounts in arb_amounts()) {
        let mut store = store_with(&amounts);
        store.set_cover_fees(true);
        store.clear();
        prop_assert_eq!(store.calculate_totals().unwrap(), Totals::default());
    }
}
