#![cfg(feature = "macros")]

use relay::{Selector, selector, selectors};

const INITIALIZE: Selector = selector!("initialize()");

#[test]
fn test_selector_macro_matches_runtime_hash() {
    assert_eq!(INITIALIZE, Selector::from_signature("initialize()"));
    assert_eq!(INITIALIZE.to_string(), "0x8129fc1c");
    assert_eq!(
        selector!("transfer(address,uint256)"),
        Selector::from_bytes([0xa9, 0x05, 0x9c, 0xbb])
    );
}

#[test]
fn test_selectors_macro_preserves_order() {
    let staking = selectors!["stake(uint256)", "unstake(uint256)", "getBalance(address)"];

    assert_eq!(staking.len(), 3);
    assert_eq!(staking[0].to_string(), "0xa694fc3a");
    assert_eq!(staking[1].to_string(), "0x2e17de78");
    assert_eq!(staking[2].to_string(), "0xf8b2cb4f");
}

#[test]
fn test_tuple_parameters_are_accepted() {
    assert_eq!(
        selector!("swap((address,uint256),bytes4)"),
        Selector::from_signature("swap((address,uint256),bytes4)")
    );
}
