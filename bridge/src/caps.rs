//! Capacity ledger: dual sliding-window transfer limits
//!
//! Each token carries a short and a long cap, charged independently for
//! deposit-direction and withdraw-direction flow. Windows reset implicitly:
//! usage is keyed by stamp index `floor(now / duration)`, so a new stamp
//! starts from zero without any scheduled reset. Entries of past stamps stay
//! in storage and are permanently inert.

use cosmwasm_std::{StdError, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::Map;

use crate::error::ContractError;
use crate::state::{
    CapDirection, LONG_CAPS, LONG_CAP_DURATION, LONG_USAGE_DEPOSIT, LONG_USAGE_WITHDRAW,
    SHORT_CAPS, SHORT_CAP_DURATION, SHORT_USAGE_DEPOSIT, SHORT_USAGE_WITHDRAW,
};

/// Stamp index for a window duration. Duration zero collapses to a single
/// permanent window instead of dividing by zero.
pub fn current_stamp(now: Timestamp, duration: u64) -> u64 {
    now.seconds().checked_div(duration).unwrap_or(0)
}

fn usage_map<'a>(direction: CapDirection, short: bool) -> Map<'a, (&'a str, u64), Uint128> {
    match (direction, short) {
        (CapDirection::Deposit, true) => SHORT_USAGE_DEPOSIT,
        (CapDirection::Withdraw, true) => SHORT_USAGE_WITHDRAW,
        (CapDirection::Deposit, false) => LONG_USAGE_DEPOSIT,
        (CapDirection::Withdraw, false) => LONG_USAGE_WITHDRAW,
    }
}

/// Accumulated usage for (token, direction) in the current short stamp
pub fn short_usage(
    storage: &dyn Storage,
    token: &str,
    direction: CapDirection,
    now: Timestamp,
) -> StdResult<(u64, Uint128)> {
    let duration = SHORT_CAP_DURATION.load(storage)?;
    let stamp = current_stamp(now, duration);
    let used = usage_map(direction, true)
        .may_load(storage, (token, stamp))?
        .unwrap_or_default();
    Ok((stamp, used))
}

/// Accumulated usage for (token, direction) in the current long stamp
pub fn long_usage(
    storage: &dyn Storage,
    token: &str,
    direction: CapDirection,
    now: Timestamp,
) -> StdResult<(u64, Uint128)> {
    let duration = LONG_CAP_DURATION.load(storage)?;
    let stamp = current_stamp(now, duration);
    let used = usage_map(direction, false)
        .may_load(storage, (token, stamp))?
        .unwrap_or_default();
    Ok((stamp, used))
}

/// Charge `amount` against both capacity windows of (token, direction).
///
/// Both windows are checked before either is written, so a failed charge
/// leaves no partial accumulation. A zero-amount charge always passes and
/// still materializes the current stamp entries. A token with no configured
/// cap has cap zero, which rejects every nonzero charge.
pub fn charge(
    storage: &mut dyn Storage,
    token: &str,
    direction: CapDirection,
    amount: Uint128,
    now: Timestamp,
) -> Result<(), ContractError> {
    let short_cap = SHORT_CAPS.may_load(storage, token)?.unwrap_or_default();
    let long_cap = LONG_CAPS.may_load(storage, token)?.unwrap_or_default();

    let (short_stamp, short_used) = short_usage(storage, token, direction, now)?;
    let (long_stamp, long_used) = long_usage(storage, token, direction, now)?;

    let short_total = short_used.checked_add(amount).map_err(StdError::overflow)?;
    let long_total = long_used.checked_add(amount).map_err(StdError::overflow)?;

    if short_total > short_cap {
        return Err(ContractError::ShortCapExceeded {
            cap: short_cap,
            attempted: short_total,
        });
    }
    if long_total > long_cap {
        return Err(ContractError::LongCapExceeded {
            cap: long_cap,
            attempted: long_total,
        });
    }

    usage_map(direction, true).save(storage, (token, short_stamp), &short_total)?;
    usage_map(direction, false).save(storage, (token, long_stamp), &long_total)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DEFAULT_LONG_CAP_DURATION, DEFAULT_SHORT_CAP_DURATION};
    use cosmwasm_std::testing::MockStorage;

    fn setup(storage: &mut MockStorage, short_cap: u128, long_cap: u128) {
        SHORT_CAP_DURATION
            .save(storage, &DEFAULT_SHORT_CAP_DURATION)
            .unwrap();
        LONG_CAP_DURATION
            .save(storage, &DEFAULT_LONG_CAP_DURATION)
            .unwrap();
        SHORT_CAPS
            .save(storage, "token", &Uint128::new(short_cap))
            .unwrap();
        LONG_CAPS
            .save(storage, "token", &Uint128::new(long_cap))
            .unwrap();
    }

    #[test]
    fn stamp_arithmetic() {
        assert_eq!(current_stamp(Timestamp::from_seconds(0), 3600), 0);
        assert_eq!(current_stamp(Timestamp::from_seconds(3599), 3600), 0);
        assert_eq!(current_stamp(Timestamp::from_seconds(3600), 3600), 1);
        assert_eq!(current_stamp(Timestamp::from_seconds(86400), 86400), 1);
        // duration zero: one permanent window
        assert_eq!(current_stamp(Timestamp::from_seconds(987654), 0), 0);
    }

    #[test]
    fn charges_accumulate_within_a_stamp() {
        let mut storage = MockStorage::new();
        setup(&mut storage, 1000, 10_000);
        let now = Timestamp::from_seconds(100);

        charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(300), now).unwrap();
        charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(200), now).unwrap();

        let (_, used) = short_usage(&storage, "token", CapDirection::Deposit, now).unwrap();
        assert_eq!(used, Uint128::new(500));
    }

    #[test]
    fn directions_do_not_contend() {
        let mut storage = MockStorage::new();
        setup(&mut storage, 1000, 10_000);
        let now = Timestamp::from_seconds(100);

        charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(900), now).unwrap();
        // a separate 900 in the withdraw direction still fits
        charge(&mut storage, "token", CapDirection::Withdraw, Uint128::new(900), now).unwrap();

        let (_, deposit) = short_usage(&storage, "token", CapDirection::Deposit, now).unwrap();
        let (_, withdraw) = short_usage(&storage, "token", CapDirection::Withdraw, now).unwrap();
        assert_eq!(deposit, Uint128::new(900));
        assert_eq!(withdraw, Uint128::new(900));
    }

    #[test]
    fn short_cap_failure_reports_cap_and_total() {
        let mut storage = MockStorage::new();
        setup(&mut storage, 1000, 10_000);
        let now = Timestamp::from_seconds(100);

        charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(995), now).unwrap();
        let err = charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(10), now)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ShortCapExceeded {
                cap: Uint128::new(1000),
                attempted: Uint128::new(1005),
            }
        );
    }

    #[test]
    fn failed_charge_writes_nothing() {
        let mut storage = MockStorage::new();
        // long cap fails while short cap would pass
        setup(&mut storage, 1000, 50);
        let now = Timestamp::from_seconds(100);

        let err = charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(100), now)
            .unwrap_err();
        assert!(matches!(err, ContractError::LongCapExceeded { .. }));

        let (_, short) = short_usage(&storage, "token", CapDirection::Deposit, now).unwrap();
        let (_, long) = long_usage(&storage, "token", CapDirection::Deposit, now).unwrap();
        assert_eq!(short, Uint128::zero());
        assert_eq!(long, Uint128::zero());
    }

    #[test]
    fn new_stamp_starts_from_zero() {
        let mut storage = MockStorage::new();
        setup(&mut storage, 1000, 100_000);
        let now = Timestamp::from_seconds(100);

        charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(1000), now).unwrap();
        assert!(charge(&mut storage, "token", CapDirection::Deposit, Uint128::one(), now).is_err());

        // next short stamp: the short counter resets, the long one carries over
        let later = Timestamp::from_seconds(100 + DEFAULT_SHORT_CAP_DURATION);
        charge(&mut storage, "token", CapDirection::Deposit, Uint128::new(1000), later).unwrap();

        let (_, short) = short_usage(&storage, "token", CapDirection::Deposit, later).unwrap();
        let (_, long) = long_usage(&storage, "token", CapDirection::Deposit, later).unwrap();
        assert_eq!(short, Uint128::new(1000));
        assert_eq!(long, Uint128::new(2000));
    }

    #[test]
    fn zero_amount_always_passes_and_materializes_the_stamp() {
        let mut storage = MockStorage::new();
        SHORT_CAP_DURATION
            .save(&mut storage, &DEFAULT_SHORT_CAP_DURATION)
            .unwrap();
        LONG_CAP_DURATION
            .save(&mut storage, &DEFAULT_LONG_CAP_DURATION)
            .unwrap();
        // no caps configured at all
        let now = Timestamp::from_seconds(100);

        charge(&mut storage, "token", CapDirection::Deposit, Uint128::zero(), now).unwrap();
        assert!(SHORT_USAGE_DEPOSIT
            .may_load(&storage, ("token", 0))
            .unwrap()
            .is_some());
    }

    #[test]
    fn unconfigured_token_rejects_any_nonzero_charge() {
        let mut storage = MockStorage::new();
        SHORT_CAP_DURATION
            .save(&mut storage, &DEFAULT_SHORT_CAP_DURATION)
            .unwrap();
        LONG_CAP_DURATION
            .save(&mut storage, &DEFAULT_LONG_CAP_DURATION)
            .unwrap();
        let now = Timestamp::from_seconds(100);

        let err = charge(&mut storage, "token", CapDirection::Deposit, Uint128::one(), now)
            .unwrap_err();
        assert_eq!(
            err,
            ContractError::ShortCapExceeded {
                cap: Uint128::zero(),
                attempted: Uint128::one(),
            }
        );
    }
}
