#![no_std]

mod events;
mod roles;
mod storage;
pub mod types;


use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, log, Address, BytesN, Env, Vec,
};

use types::{Game, GameDetails, Role, MAX_PLAYERS};

/// Confidential value engine interface. The `#[contractclient]` macro
/// generates `ConfidentialEngineClient` for cross-contract calls.
///
/// Grants are additive; the engine checks them itself at decrypt time.
#[contractclient(name = "ConfidentialEngineClient")]
pub trait ConfidentialEngine {
    fn encrypt(env: Env, owner: Address, value: u32) -> BytesN<32>;

    fn grant_access(env: Env, handle: BytesN<32>, grantee: Address);
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    GameNotFound = 1,
    GameFull = 2,
    PlayerAlreadyJoined = 3,
    PlayerNotInGame = 4,
    GameAlreadyStarted = 5,
    GameNotStarted = 6,
    GameNotReady = 7,
    PlayerAlreadyDead = 8,
    NotWerewolf = 9,
    CannotAttackSelf = 10,
}

#[contract]
pub struct WerewolfContract;

impl WerewolfContract {
    fn load_game(env: &Env, game_id: u32) -> Result<Game, Error> {
        storage::get_game(env, game_id).ok_or(Error::GameNotFound)
    }

    fn seat_of(env: &Env, game_id: u32, player: &Address) -> Result<u32, Error> {
        storage::get_seat(env, game_id, player).ok_or(Error::PlayerNotInGame)
    }

    fn is_alive(game: &Game, seat: u32) -> bool {
        game.alive.get(seat).unwrap_or(false)
    }

    /// Seat `player` at the next free position. Capacity and duplicate
    /// checks are the caller's job.
    fn add_player(env: &Env, game_id: u32, game: &mut Game, player: &Address) {
        let seat = game.player_count;
        game.players.set(seat, Some(player.clone()));
        game.alive.set(seat, true);
        game.player_count += 1;
        storage::set_seat(env, game_id, player, seat);
    }
}

#[contractimpl]
impl WerewolfContract {
    /// Deploy: store the confidential value engine address.
    pub fn __constructor(env: Env, engine: Address) {
        storage::set_engine(&env, &engine);
    }

    /// Open a new lobby with `creator` in seat 0. Returns the game id.
    pub fn create_game(env: Env, creator: Address) -> u32 {
        creator.require_auth();

        let game_id = storage::allocate_game_id(&env);

        let mut players = Vec::new(&env);
        let mut alive = Vec::new(&env);
        for _ in 0..MAX_PLAYERS {
            players.push_back(None);
            alive.push_back(false);
        }

        let mut game = Game {
            creator: creator.clone(),
            players,
            encrypted_roles: Vec::new(&env),
            roles: Vec::new(&env),
            alive,
            player_count: 0,
            started: false,
        };
        Self::add_player(&env, game_id, &mut game, &creator);

        storage::set_game(&env, game_id, &game);
        storage::bump_instance(&env);
        events::emit_game_created(&env, game_id, &creator);

        game_id
    }

    /// Take the next free seat in an unstarted game.
    pub fn join_game(env: Env, game_id: u32, player: Address) -> Result<(), Error> {
        let mut game = Self::load_game(&env, game_id)?;
        if game.started {
            return Err(Error::GameAlreadyStarted);
        }
        if game.player_count >= MAX_PLAYERS {
            return Err(Error::GameFull);
        }
        if storage::get_seat(&env, game_id, &player).is_some() {
            return Err(Error::PlayerAlreadyJoined);
        }

        player.require_auth();

        Self::add_player(&env, game_id, &mut game, &player);

        storage::set_game(&env, game_id, &game);
        storage::bump_instance(&env);
        events::emit_player_joined(&env, game_id, &player);

        Ok(())
    }

    /// Any seated player starts a full game. Roles are shuffled, encrypted
    /// per seat and made decryptable by this contract and the seat's owner
    /// only.
    pub fn start_game(env: Env, game_id: u32, player: Address) -> Result<(), Error> {
        let mut game = Self::load_game(&env, game_id)?;
        if game.started {
            return Err(Error::GameAlreadyStarted);
        }
        Self::seat_of(&env, game_id, &player)?;
        if game.player_count != MAX_PLAYERS {
            return Err(Error::GameNotReady);
        }

        player.require_auth();

        let seed = roles::derive_seed(&env, &player, game_id);
        let assigned = roles::shuffle_roles(&env, &seed);

        let engine = ConfidentialEngineClient::new(&env, &storage::get_engine(&env));
        let this = env.current_contract_address();

        // player_count == MAX_PLAYERS, so every seat is filled.
        for seat in 0..MAX_PLAYERS {
            let owner = game
                .players
                .get(seat)
                .flatten()
                .ok_or(Error::GameNotReady)?;
            let role = assigned[seat as usize];

            let handle = engine.encrypt(&this, &(role as u32));
            engine.grant_access(&handle, &this);
            engine.grant_access(&handle, &owner);

            game.roles.push_back(role);
            game.encrypted_roles.push_back(handle);
            game.alive.set(seat, true);
        }
        game.started = true;

        storage::set_game(&env, game_id, &game);
        storage::bump_instance(&env);
        events::emit_game_started(&env, game_id);
        log!(&env, "game started: game_id={}, started_by={}", game_id, player);

        Ok(())
    }

    /// A living Werewolf eliminates another living, seated player.
    pub fn attack(
        env: Env,
        game_id: u32,
        attacker: Address,
        target: Address,
    ) -> Result<(), Error> {
        let mut game = Self::load_game(&env, game_id)?;
        if !game.started {
            return Err(Error::GameNotStarted);
        }

        let attacker_seat = Self::seat_of(&env, game_id, &attacker)?;
        if !Self::is_alive(&game, attacker_seat) {
            return Err(Error::PlayerAlreadyDead);
        }
        if game.roles.get(attacker_seat) != Some(Role::Werewolf) {
            return Err(Error::NotWerewolf);
        }

        let target_seat = Self::seat_of(&env, game_id, &target)?;
        if !Self::is_alive(&game, target_seat) {
            return Err(Error::PlayerAlreadyDead);
        }
        if target_seat == attacker_seat {
            return Err(Error::CannotAttackSelf);
        }

        attacker.require_auth();

        game.alive.set(target_seat, false);

        storage::set_game(&env, game_id, &game);
        storage::bump_instance(&env);
        events::emit_player_attacked(&env, game_id, &attacker, &target);
        log!(&env, "attack: game_id={}, target_seat={}", game_id, target_seat);

        Ok(())
    }

    // --- Queries ---

    pub fn get_game_details(env: Env, game_id: u32) -> Result<GameDetails, Error> {
        let game = Self::load_game(&env, game_id)?;
        Ok(GameDetails {
            creator: game.creator,
            players: game.players,
            started: game.started,
            alive: game.alive,
            player_count: game.player_count,
        })
    }

    /// Handle of `player`'s encrypted role. Only the player (and this
    /// contract) can have it decrypted by the engine.
    pub fn get_player_encrypted_role(
        env: Env,
        game_id: u32,
        player: Address,
    ) -> Result<BytesN<32>, Error> {
        let game = Self::load_game(&env, game_id)?;
        if !game.started {
            return Err(Error::GameNotStarted);
        }
        let seat = Self::seat_of(&env, game_id, &player)?;
        // start_game pushes one handle per seat before setting `started`.
        game.encrypted_roles.get(seat).ok_or(Error::GameNotStarted)
    }

    pub fn get_next_game_id(env: Env) -> u32 {
        storage::get_next_game_id(&env)
    }

    /// Occupied seats that are still alive.
    pub fn get_alive_player_count(env: Env, game_id: u32) -> Result<u32, Error> {
        let game = Self::load_game(&env, game_id)?;
        let mut alive = 0u32;
        for seat in 0..MAX_PLAYERS {
            let occupied = matches!(game.players.get(seat), Some(Some(_)));
            if occupied && Self::is_alive(&game, seat) {
                alive += 1;
            }
        }
        Ok(alive)
    }

    pub fn get_player_status(env: Env, game_id: u32, player: Address) -> Result<bool, Error> {
        let game = Self::load_game(&env, game_id)?;
        let seat = Self::seat_of(&env, game_id, &player)?;
        Ok(Self::is_alive(&game, seat))
    }

    pub fn get_player_seat(env: Env, game_id: u32, player: Address) -> Result<u32, Error> {
        Self::load_game(&env, game_id)?;
        Self::seat_of(&env, game_id, &player)
    }

    pub fn get_engine(env: Env) -> Address {
        storage::get_engine(&env)
    }
}
