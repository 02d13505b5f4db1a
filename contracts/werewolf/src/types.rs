use soroban_sdk::{contracttype, Address, BytesN, Vec};

/// Seats per game. Capacity is checked against this, never implied by
/// the length of a stored vector.
pub const MAX_PLAYERS: u32 = 4;

/// Role codes are part of the public interface and must never be renumbered.
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Villager = 1,
    Werewolf = 2,
    Seer = 3,
}

/// Game state stored in persistent storage, one record per game id.
///
/// `players` and `alive` always hold `MAX_PLAYERS` entries; an empty seat is
/// `None`. `roles` and `encrypted_roles` stay empty until the game starts and
/// hold exactly one entry per seat afterwards.
#[contracttype]
#[derive(Clone, Debug)]
pub struct Game {
    pub creator: Address,
    pub players: Vec<Option<Address>>,
    pub encrypted_roles: Vec<BytesN<32>>,
    pub roles: Vec<Role>,
    pub alive: Vec<bool>,
    pub player_count: u32,
    pub started: bool,
}

/// Public projection of a game. Plaintext roles are deliberately absent.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameDetails {
    pub creator: Address,
    pub players: Vec<Option<Address>>,
    pub started: bool,
    pub alive: Vec<bool>,
    pub player_count: u32,
}
