//! Identifier newtypes and shared enums for the battle model.

use core::fmt;

/// The two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    /// Returns the opposing team.
    pub const fn opponent(self) -> Self {
        match self {
            Team::Player => Team::Enemy,
            Team::Enemy => Team::Player,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Team::Player => "player",
            Team::Enemy => "enemy",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }
    };
}

string_id! {
    /// Identifies one live combatant within a battle (e.g. `p1`, `e_a`).
    CombatantId
}

string_id! {
    /// Keys an action template in the content catalog.
    ActionId
}

string_id! {
    /// Keys a static unit template in the content catalog.
    PizzaId
}

string_id! {
    /// Identifies one consumable item instance in the battle stock.
    ItemInstanceId
}

/// Flavor classification of a unit template. Display-only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PizzaType {
    Normal,
    Spicy,
    Veggie,
    Fungi,
    Chill,
}

impl PizzaType {
    pub const fn as_str(self) -> &'static str {
        match self {
            PizzaType::Normal => "normal",
            PizzaType::Spicy => "spicy",
            PizzaType::Veggie => "veggie",
            PizzaType::Fungi => "fungi",
            PizzaType::Chill => "chill",
        }
    }
}
