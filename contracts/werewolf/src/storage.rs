use soroban_sdk::{contracttype, Address, Env};

use crate::types::Game;

const GAME_TTL_LEDGERS: u32 = 535_680; // ~30 days at 5s/ledger
const INSTANCE_TTL_LEDGERS: u32 = 535_680;

#[contracttype]
pub enum DataKey {
    Engine,
    NextGameId,
    Game(u32),
    Seat(u32, Address),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_LEDGERS, INSTANCE_TTL_LEDGERS);
}

// --- Confidential value engine ---

pub fn get_engine(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Engine).unwrap()
}

pub fn set_engine(env: &Env, engine: &Address) {
    env.storage().instance().set(&DataKey::Engine, engine);
}

// --- Game id counter ---

pub fn get_next_game_id(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::NextGameId)
        .unwrap_or(0)
}

/// Hands out the current id and advances the counter. Ids are never reused.
pub fn allocate_game_id(env: &Env) -> u32 {
    let id = get_next_game_id(env);
    env.storage().instance().set(&DataKey::NextGameId, &(id + 1));
    id
}

// --- Games ---

pub fn get_game(env: &Env, game_id: u32) -> Option<Game> {
    env.storage().persistent().get(&DataKey::Game(game_id))
}

pub fn set_game(env: &Env, game_id: u32, game: &Game) {
    let key = DataKey::Game(game_id);
    env.storage().persistent().set(&key, game);
    env.storage()
        .persistent()
        .extend_ttl(&key, GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
}

// --- Player index ---

pub fn get_seat(env: &Env, game_id: u32, player: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::Seat(game_id, player.clone()))
}

pub fn set_seat(env: &Env, game_id: u32, player: &Address, seat: u32) {
    let key = DataKey::Seat(game_id, player.clone());
    env.storage().persistent().set(&key, &seat);
    env.storage()
        .persistent()
        .extend_ttl(&key, GAME_TTL_LEDGERS, GAME_TTL_LEDGERS);
}
