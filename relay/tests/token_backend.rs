mod common;

use common::{TokenBackend, deploy, deploy_token, tokens};
use relay::{Call, DispatchError, Dispatcher};

async fn balance_of(dispatcher: &mut Dispatcher, holder: relay::Address) -> u128 {
    dispatcher
        .execute(Call::signature(holder, "balanceOf(address)").arg(holder))
        .await
        .unwrap()
        .as_u128()
        .unwrap()
}

#[tokio::test]
async fn test_initialize_records_caller_as_owner() {
    let (mut dispatcher, accounts, _) = deploy_token();

    dispatcher
        .execute(Call::signature(accounts.deployer, "initialize()"))
        .await
        .unwrap();

    for reader in [accounts.deployer, accounts.user] {
        let owner = dispatcher
            .execute(Call::signature(reader, "owner()"))
            .await
            .unwrap();
        assert_eq!(owner.as_address(), Some(accounts.deployer));
        assert_ne!(owner.as_address(), Some(dispatcher.address()));
    }
}

#[tokio::test]
async fn test_initialize_runs_once() {
    let (mut dispatcher, accounts, _) = deploy_token();

    dispatcher
        .execute(Call::signature(accounts.deployer, "initialize()"))
        .await
        .unwrap();
    let err = dispatcher
        .execute(Call::signature(accounts.user, "initialize()"))
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "Already initialized");
}

#[tokio::test]
async fn test_mint_scales_by_decimals() {
    // Only the two keys the scenario needs, plus the accessor.
    let (mut dispatcher, accounts) = deploy();
    let token = dispatcher.deploy_backend(TokenBackend);
    dispatcher
        .add_entries(
            accounts.moderator,
            &["initialize()", "mintToken(uint256)", "balanceOf(address)"],
            token,
        )
        .unwrap();

    dispatcher
        .execute(Call::signature(accounts.deployer, "initialize()"))
        .await
        .unwrap();
    dispatcher
        .execute(Call::signature(accounts.deployer, "mintToken(uint256)").arg(10_000u128))
        .await
        .unwrap();

    assert_eq!(balance_of(&mut dispatcher, accounts.deployer).await, tokens(10_000));
    assert_eq!(
        balance_of(&mut dispatcher, accounts.deployer).await,
        10_000_000_000_000_000_000_000
    );
    assert_eq!(balance_of(&mut dispatcher, accounts.user).await, 0);
    let own = dispatcher.address();
    assert_eq!(balance_of(&mut dispatcher, own).await, 0);
}

#[tokio::test]
async fn test_transfer_moves_balance() {
    let (mut dispatcher, accounts, _) = deploy_token();

    dispatcher
        .execute(Call::signature(accounts.deployer, "initialize()"))
        .await
        .unwrap();
    dispatcher
        .execute(Call::signature(accounts.deployer, "mintToken(uint256)").arg(10_000u128))
        .await
        .unwrap();
    dispatcher
        .execute(
            Call::signature(accounts.deployer, "transfer(address,uint256)")
                .arg(accounts.user)
                .arg(tokens(100)),
        )
        .await
        .unwrap();

    assert_eq!(balance_of(&mut dispatcher, accounts.deployer).await, tokens(9_900));
    assert_eq!(balance_of(&mut dispatcher, accounts.user).await, tokens(100));
}

#[tokio::test]
async fn test_overdrawn_transfer_reverts() {
    let (mut dispatcher, accounts, _) = deploy_token();

    let err = dispatcher
        .execute(
            Call::signature(accounts.user, "transfer(address,uint256)")
                .arg(accounts.other)
                .arg(1u128),
        )
        .await
        .unwrap_err();
    assert_eq!(err, DispatchError::Reverted(relay::Revert::new("Insufficient balance")));
    assert_eq!(balance_of(&mut dispatcher, accounts.other).await, 0);
}

#[tokio::test]
async fn test_only_owner_mints() {
    let (mut dispatcher, accounts, _) = deploy_token();

    dispatcher
        .execute(Call::signature(accounts.deployer, "initialize()"))
        .await
        .unwrap();
    let err = dispatcher
        .execute(Call::signature(accounts.user, "mintToken(uint256)").arg(1u128))
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "Only owner can mint");
}

#[tokio::test]
async fn test_transfer_overflow_reverts() {
    let (mut dispatcher, accounts) = deploy();
    let token = dispatcher.deploy_backend(TokenBackend);
    dispatcher
        .add_entries(accounts.moderator, &TokenBackend::SIGNATURES, token)
        .unwrap();
    dispatcher
        .execute(Call::signature(accounts.deployer, "initialize()"))
        .await
        .unwrap();

    // Two holders that together exceed the balance width.
    let largest_mint = u128::MAX / 10u128.pow(18);
    dispatcher
        .execute(Call::signature(accounts.deployer, "mintToken(uint256)").arg(largest_mint))
        .await
        .unwrap();
    let minted = balance_of(&mut dispatcher, accounts.deployer).await;
    dispatcher
        .execute(
            Call::signature(accounts.deployer, "transfer(address,uint256)")
                .arg(accounts.user)
                .arg(minted),
        )
        .await
        .unwrap();
    dispatcher
        .execute(Call::signature(accounts.deployer, "mintToken(uint256)").arg(largest_mint))
        .await
        .unwrap();

    let err = dispatcher
        .execute(
            Call::signature(accounts.deployer, "transfer(address,uint256)")
                .arg(accounts.user)
                .arg(minted),
        )
        .await
        .unwrap_err();
    assert_eq!(err.reason(), "Balance overflow");
    assert_eq!(balance_of(&mut dispatcher, accounts.user).await, minted);
    assert_eq!(balance_of(&mut dispatcher, accounts.deployer).await, minted);
}
