//! Wandering characters met on NPC tiles.

use super::types::{Direction, Sighting, WorldEvent, WorldMap};
use crate::character::Player;
use crate::core::constants::{
    SHAMAN_ATTACK_BLESSING, SHAMAN_DODGE_BLESSING, SHAMAN_HP_BLESSING, VAGRANT_GIFT_CHANCE,
};
use crate::core::dice::Dice;
use crate::core::error::GameError;
use crate::items::draw_basic;
use serde::Serialize;
use std::fmt;

const VAGRANT_STORY: &str = "\"Long ago this was a green land. Then the Fenrir came, \
and the sand swallowed everything. Remember, wanderer: not every oasis is what it seems.\"";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Npc {
    Trader,
    Shaman,
    Vagrant,
    Informant,
}

impl Npc {
    pub const ALL: [Npc; 4] = [Npc::Trader, Npc::Shaman, Npc::Vagrant, Npc::Informant];

    pub fn name(&self) -> &'static str {
        match self {
            Npc::Trader => "Wandering trader",
            Npc::Shaman => "Nomad shaman",
            Npc::Vagrant => "Old cyber-vagrant",
            Npc::Informant => "Fenrir informant",
        }
    }

    pub fn greeting(&self) -> &'static str {
        match self {
            Npc::Trader => "A wandering trader waves you over to a battered cart.",
            Npc::Shaman => "A nomad shaman raises her hands over you and chants softly.",
            Npc::Vagrant => "An old cyber-vagrant sits in the shade of a wrecked transport.",
            Npc::Informant => "A nervous Fenrir informant beckons you closer.",
        }
    }
}

/// Permanent stat gift from the shaman.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount")]
pub enum Blessing {
    Vitality(i32),
    Strength(i32),
    Agility(u32),
}

impl fmt::Display for Blessing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Blessing::Vitality(hp) => write!(f, "Blessing of vitality! +{hp} max HP."),
            Blessing::Strength(atk) => write!(f, "Blessing of strength! +{atk} damage."),
            Blessing::Agility(dodge) => write!(f, "Blessing of agility! +{dodge}% dodge."),
        }
    }
}

/// Result of meeting an NPC.
#[derive(Debug, Clone, PartialEq)]
pub enum Meeting {
    Done(Vec<WorldEvent>),
    /// The trader is waiting for an offer.
    TradeOpen(Vec<WorldEvent>),
}

/// Picks an archetype and runs its one-shot interaction.
pub fn meet(map: &mut WorldMap, player: &mut Player, dice: &mut impl Dice) -> Meeting {
    let npc = Npc::ALL[dice.pick(Npc::ALL.len())];
    tracing::debug!(npc = npc.name(), "npc met");
    let mut events = vec![WorldEvent::NpcMet { npc }];

    match npc {
        Npc::Trader => {
            if player.inventory.is_empty() {
                events.push(WorldEvent::TraderLeft);
            } else {
                events.push(WorldEvent::TradeOffered);
                return Meeting::TradeOpen(events);
            }
        }
        Npc::Shaman => {
            let blessing = bless(player, dice);
            events.push(WorldEvent::Blessed { blessing });
        }
        Npc::Vagrant => {
            if dice.chance(VAGRANT_GIFT_CHANCE) {
                let item = draw_basic(dice);
                player.add_item(item);
                events.push(WorldEvent::GiftReceived { item });
            } else {
                events.push(WorldEvent::StoryTold {
                    text: VAGRANT_STORY,
                });
            }
        }
        Npc::Informant => {
            let sighting = map
                .offset(map.position(), Direction::North)
                .and_then(|position| {
                    let tile = map.tile(position)?;
                    map.discover(position);
                    Some(Sighting { position, tile })
                });
            events.push(WorldEvent::HintGiven { sighting });
        }
    }

    Meeting::Done(events)
}

fn bless(player: &mut Player, dice: &mut impl Dice) -> Blessing {
    match dice.pick(3) {
        0 => {
            let hp = dice.roll_range(SHAMAN_HP_BLESSING.0, SHAMAN_HP_BLESSING.1);
            player.raise_max_hp(hp);
            Blessing::Vitality(hp)
        }
        1 => {
            player.raise_attack(SHAMAN_ATTACK_BLESSING);
            Blessing::Strength(SHAMAN_ATTACK_BLESSING)
        }
        _ => {
            let before = player.dodge_chance;
            player.raise_dodge(SHAMAN_DODGE_BLESSING);
            Blessing::Agility(player.dodge_chance - before)
        }
    }
}

/// Gives one unit of the named item to the trader for a basic-table item.
pub fn trade(player: &mut Player, offer: &str, dice: &mut impl Dice) -> Result<WorldEvent, GameError> {
    let given = player
        .inventory
        .find_by_name(offer)
        .ok_or_else(|| GameError::invalid_target("You don't have that item."))?;
    player.inventory.remove_one(given);
    let received = draw_basic(dice);
    player.add_item(received);
    tracing::debug!(?given, ?received, "trade completed");
    Ok(WorldEvent::Traded { given, received })
}
