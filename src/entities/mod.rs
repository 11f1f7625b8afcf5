pub mod giveaway_entries;

pub use giveaway_entries as giveaway_entry_entity;
pub use giveaway_entries::EntryStatus;

/// 存储层返回的参与记录
pub type GiveawayEntry = giveaway_entries::Model;
