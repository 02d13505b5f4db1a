use soroban_sdk::{contractevent, Address, Env};

#[contractevent]
pub struct GameCreated {
    pub game_id: u32,
    pub creator: Address,
}

#[contractevent]
pub struct PlayerJoined {
    pub game_id: u32,
    pub player: Address,
}

#[contractevent]
pub struct GameStarted {
    pub game_id: u32,
}

#[contractevent]
pub struct PlayerAttacked {
    pub game_id: u32,
    pub attacker: Address,
    pub target: Address,
}

pub fn emit_game_created(env: &Env, game_id: u32, creator: &Address) {
    GameCreated {
        game_id,
        creator: creator.clone(),
    }
    .publish(env);
}

pub fn emit_player_joined(env: &Env, game_id: u32, player: &Address) {
    PlayerJoined {
        game_id,
        player: player.clone(),
    }
    .publish(env);
}

pub fn emit_game_started(env: &Env, game_id: u32) {
    GameStarted { game_id }.publish(env);
}

pub fn emit_player_attacked(env: &Env, game_id: u32, attacker: &Address, target: &Address) {
    PlayerAttacked {
        game_id,
        attacker: attacker.clone(),
        target: target.clone(),
    }
    .publish(env);
}
