//! Byte-level layout assertions that protect the zero-copy contract relied upon
//! by the on-chain program and any off-chain indexers.

use crate::components::twap_engine::safe_math::WideInt;
use crate::state::oracle_account::{
    price_from_words, price_to_words, wide_from_words, wide_to_words, OracleAccount, Version,
};
use crate::utils::constants::{ORACLE_VERSION_MAJOR, ORACLE_VERSION_MINOR, ORACLE_VERSION_PATCH};
use anchor_lang::ZeroCopy;
use bytemuck::{bytes_of, pod_read_unaligned, Pod, Zeroable};
use std::mem::{align_of, offset_of, size_of};

/// Any change here needs a migration and a rent recalculation.
#[test]
fn oracle_account_layout_contract() {
    const EXPECTED_SIZE: usize = 32 + 32 // authority, market
        + 16 * 3 // last_price, last_window_twap, initial_price
        + 32 * 2 // total and snapshot integrals
        + 8 * 5 // timestamps, window, cap, start
        + 4 + 1 + 3 // version, bump, padding
        + 64; // reserved

    assert_eq!(size_of::<OracleAccount>(), EXPECTED_SIZE);
    assert_eq!(size_of::<OracleAccount>(), 288);
    assert_eq!(
        align_of::<OracleAccount>(),
        8,
        "wide values are stored as u64 words to pin alignment at 8"
    );
    assert_eq!(OracleAccount::SPACE, 8 + 288);
    assert_eq!(size_of::<Version>(), 4);
}

#[test]
fn field_offsets_are_stable() {
    assert_eq!(offset_of!(OracleAccount, authority), 0);
    assert_eq!(offset_of!(OracleAccount, market), 32);
    assert_eq!(offset_of!(OracleAccount, last_price), 64);
    assert_eq!(offset_of!(OracleAccount, last_window_twap), 80);
    assert_eq!(offset_of!(OracleAccount, initial_price), 96);
    assert_eq!(offset_of!(OracleAccount, total_cumulative_price), 112);
    assert_eq!(offset_of!(OracleAccount, last_window_end_cumulative_price), 144);
    assert_eq!(offset_of!(OracleAccount, last_timestamp), 176);
    assert_eq!(offset_of!(OracleAccount, last_window_end), 184);
    assert_eq!(offset_of!(OracleAccount, window_size), 192);
    assert_eq!(offset_of!(OracleAccount, cap_step_ppm), 200);
    assert_eq!(offset_of!(OracleAccount, accumulation_start), 208);
    assert_eq!(offset_of!(OracleAccount, version), 216);
    assert_eq!(offset_of!(OracleAccount, bump), 220);
    assert_eq!(offset_of!(OracleAccount, reserved), 224);
}

#[test]
fn zero_copy_trait_contracts() {
    fn assert_pod<T: Pod>() {}
    fn assert_zeroable<T: Zeroable>() {}
    fn assert_zero_copy<T: ZeroCopy>() {}

    assert_pod::<OracleAccount>();
    assert_pod::<Version>();
    assert_zeroable::<OracleAccount>();
    assert_zero_copy::<OracleAccount>();
}

#[test]
fn current_version_matches_constants() {
    let version = Version::CURRENT;
    assert_eq!(version.major, ORACLE_VERSION_MAJOR);
    assert_eq!(version.minor, ORACLE_VERSION_MINOR);
    assert_eq!(version.patch, ORACLE_VERSION_PATCH);
    assert_eq!(version._padding, 0);
}

/// Words are little-endian: the low 64 bits come first.
#[test]
fn price_words_are_little_endian() {
    let value = (7u128 << 64) | 3;
    assert_eq!(price_to_words(value), [3, 7]);
    assert_eq!(price_from_words([3, 7]), value);

    for value in [0, 1, u64::MAX as u128, u64::MAX as u128 + 1, u128::MAX] {
        assert_eq!(price_from_words(price_to_words(value)), value);
    }
}

#[test]
fn wide_words_put_low_half_first() {
    let value = WideInt::from_words(0x0B_0000_0000_0000_000A, 0x02_0000_0000_0000_0001);
    assert_eq!(wide_to_words(value), [1, 2, 10, 11]);
    assert_eq!(wide_from_words([1, 2, 10, 11]), value);
    assert_eq!(wide_from_words(wide_to_words(WideInt::MAX)), WideInt::MAX);
}

#[test]
fn zeroed_account_is_uninitialized() {
    let account = OracleAccount::zeroed();
    assert!(!account.is_initialized());
    assert!(bytes_of(&account).iter().all(|byte| *byte == 0));
}

/// Off-chain readers decode from unaligned RPC buffers.
#[test]
fn account_image_survives_unaligned_reread() {
    let mut account = OracleAccount::zeroed();
    account.window_size = 60_000;
    account.last_timestamp = 1_700_000_000_000;
    account.total_cumulative_price = wide_to_words(WideInt::from_words(5, 9));
    account.version = Version::CURRENT;

    let mut buffer = vec![0u8; 1];
    buffer.extend_from_slice(bytes_of(&account));

    let reread: OracleAccount = pod_read_unaligned(&buffer[1..]);
    assert_eq!(bytes_of(&reread), bytes_of(&account));
    assert_eq!(reread.window_size, 60_000);
    assert_eq!(
        wide_from_words(reread.total_cumulative_price),
        WideInt::from_words(5, 9)
    );
}
