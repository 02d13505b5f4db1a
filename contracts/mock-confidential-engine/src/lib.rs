#![no_std]

//! Test double for the confidential value engine.
//!
//! Stores plaintexts in the clear behind opaque 32-byte handles and keeps an
//! access list per handle. `decrypt` honours the access list, which is enough
//! to observe who the game contract granted access to.

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, Address, Bytes, BytesN, Env,
};

const CIPHERTEXT_TTL_LEDGERS: u32 = 535_680; // ~30 days at 5s/ledger

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum EngineError {
    HandleNotFound = 1,
    AccessDenied = 2,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct Ciphertext {
    pub owner: Address,
    pub value: u32,
}

#[contracttype]
pub enum DataKey {
    Counter,
    Ciphertext(BytesN<32>),
    Access(BytesN<32>, Address),
}

#[contract]
pub struct MockConfidentialEngine;

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, CIPHERTEXT_TTL_LEDGERS, CIPHERTEXT_TTL_LEDGERS);
}

#[contractimpl]
impl MockConfidentialEngine {
    /// Wrap `value` into a fresh handle owned by `owner`.
    pub fn encrypt(env: Env, owner: Address, value: u32) -> BytesN<32> {
        let counter: u64 = env
            .storage()
            .instance()
            .get(&DataKey::Counter)
            .unwrap_or(0);
        env.storage().instance().set(&DataKey::Counter, &(counter + 1));

        let handle: BytesN<32> = env
            .crypto()
            .keccak256(&Bytes::from_array(&env, &counter.to_be_bytes()))
            .into();

        let key = DataKey::Ciphertext(handle.clone());
        env.storage()
            .persistent()
            .set(&key, &Ciphertext { owner: owner.clone(), value });
        bump(&env, &key);

        log!(&env, "mock encrypt: owner={}, handle={}", owner, handle.clone());
        handle
    }

    /// Additive only: there is no way to revoke a grant.
    pub fn grant_access(
        env: Env,
        handle: BytesN<32>,
        grantee: Address,
    ) -> Result<(), EngineError> {
        let ct: Ciphertext = env
            .storage()
            .persistent()
            .get(&DataKey::Ciphertext(handle.clone()))
            .ok_or(EngineError::HandleNotFound)?;
        ct.owner.require_auth();

        let key = DataKey::Access(handle.clone(), grantee.clone());
        env.storage().persistent().set(&key, &true);
        bump(&env, &key);

        log!(&env, "mock grant_access: handle={}, grantee={}", handle, grantee);
        Ok(())
    }

    pub fn is_allowed(env: Env, handle: BytesN<32>, address: Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Access(handle, address))
            .unwrap_or(false)
    }

    pub fn decrypt(
        env: Env,
        handle: BytesN<32>,
        requester: Address,
    ) -> Result<u32, EngineError> {
        let ct: Ciphertext = env
            .storage()
            .persistent()
            .get(&DataKey::Ciphertext(handle.clone()))
            .ok_or(EngineError::HandleNotFound)?;
        requester.require_auth();

        if !Self::is_allowed(env, handle, requester) {
            return Err(EngineError::AccessDenied);
        }
        Ok(ct.value)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use soroban_sdk::testutils::Address as _;

    fn setup() -> (Env, MockConfidentialEngineClient<'static>) {
        let env = Env::default();
        env.mock_all_auths();
        let id = env.register(MockConfidentialEngine, ());
        let client = MockConfidentialEngineClient::new(&env, &id);
        (env, client)
    }

    #[test]
    fn test_handles_are_distinct() {
        let (env, client) = setup();
        let owner = Address::generate(&env);

        let h1 = client.encrypt(&owner, &2u32);
        let h2 = client.encrypt(&owner, &2u32);
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_decrypt_requires_grant() {
        let (env, client) = setup();
        let owner = Address::generate(&env);
        let reader = Address::generate(&env);

        let handle = client.encrypt(&owner, &3u32);
        assert!(!client.is_allowed(&handle, &reader));
        let result = client.try_decrypt(&handle, &reader);
        assert_eq!(result.err().unwrap().unwrap(), EngineError::AccessDenied);

        client.grant_access(&handle, &reader);
        client.grant_access(&handle, &reader);
        assert!(client.is_allowed(&handle, &reader));
        assert_eq!(client.decrypt(&handle, &reader), 3);
    }

    #[test]
    fn test_unknown_handle() {
        let (env, client) = setup();
        let reader = Address::generate(&env);
        let bogus = BytesN::from_array(&env, &[7u8; 32]);

        let result = client.try_grant_access(&bogus, &reader);
        assert_eq!(result.err().unwrap().unwrap(), EngineError::HandleNotFound);
    }
}
