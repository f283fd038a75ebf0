use proptest::prelude::*;

use lplock_types::TokenAmount;

proptest! {
    /// Decimal text of any u128 parses back to the same amount.
    #[test]
    fn token_amount_text_roundtrip(raw in any::<u128>()) {
        let amount = TokenAmount::from(raw);
        let parsed: TokenAmount = amount.to_string().parse().unwrap();
        prop_assert_eq!(parsed, amount);
    }

    /// TokenAmount ordering agrees with the primitive ordering it generalises.
    #[test]
    fn token_amount_ordering_matches_u128(a in any::<u128>(), b in any::<u128>()) {
        let ta = TokenAmount::from(a);
        let tb = TokenAmount::from(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Adding two u128 values never wraps.
    #[test]
    fn token_amount_addition_is_exact(a in any::<u128>(), b in any::<u128>()) {
        let sum = TokenAmount::from(a) + TokenAmount::from(b);
        let expected = a.checked_add(b).map(TokenAmount::from);
        if let Some(expected) = expected {
            prop_assert_eq!(sum.clone(), expected);
        }
        prop_assert!(sum >= TokenAmount::from(a.max(b)));
    }
}
