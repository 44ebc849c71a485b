//! Built-in reference dataset for Mythic damage rankings.
//!
//! Substituted for the live table when the page cannot be parsed (the
//! statistics page renders most of its content client-side). Order is the
//! page's ranking order and must not be changed.

use crate::types::PerformanceRecord;

/// A static row of the reference dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackRow {
    pub class_name: &'static str,
    pub spec_name: &'static str,
    pub score: f64,
    pub parses: u64,
}

const fn row(class_name: &'static str, spec_name: &'static str, score: f64, parses: u64) -> FallbackRow {
    FallbackRow {
        class_name,
        spec_name,
        score,
        parses,
    }
}

/// Number of rows in the reference dataset.
pub const FALLBACK_LEN: usize = 39;

pub const FALLBACK_ROWS: [FallbackRow; FALLBACK_LEN] = [
    row("Evoker", "Devastation", 83.73, 28751),
    row("Hunter", "Marksmanship", 82.40, 28534),
    row("Warlock", "Destruction", 81.37, 32506),
    row("Hunter", "Survival", 81.21, 2191),
    row("Warlock", "Affliction", 80.33, 8577),
    row("Paladin", "Retribution", 79.66, 49741),
    row("Rogue", "Assassination", 79.62, 17404),
    row("Warrior", "Arms", 79.57, 14701),
    row("Demon Hunter", "Havoc", 79.50, 34445),
    row("Warrior", "Fury", 79.42, 24170),
    row("Priest", "Shadow", 79.08, 20619),
    row("Death Knight", "Frost", 78.93, 10014),
    row("Mage", "Arcane", 78.83, 29980),
    row("Monk", "Windwalker", 78.71, 16890),
    row("Death Knight", "Unholy", 78.57, 25489),
    row("Mage", "Fire", 78.17, 12253),
    row("Rogue", "Subtlety", 78.00, 4001),
    row("Druid", "Feral", 78.00, 6249),
    row("Hunter", "Beast Mastery", 77.99, 35219),
    row("Shaman", "Elemental", 77.42, 17662),
    row("Shaman", "Enhancement", 77.08, 12926),
    row("Evoker", "Augmentation", 77.02, 2273),
    row("Warlock", "Demonology", 76.32, 10455),
    row("Rogue", "Outlaw", 76.23, 5443),
    row("Druid", "Balance", 75.22, 38257),
    row("Mage", "Frost", 74.61, 14802),
    row("Warrior", "Protection", 46.17, 10985),
    row("Death Knight", "Blood", 42.74, 16267),
    row("Druid", "Guardian", 40.19, 5781),
    row("Monk", "Brewmaster", 40.00, 7066),
    row("Demon Hunter", "Vengeance", 39.90, 12959),
    row("Paladin", "Protection", 37.50, 18856),
    row("Monk", "Mistweaver", 12.55, 20444),
    row("Paladin", "Holy", 10.29, 13725),
    row("Priest", "Discipline", 7.35, 15497),
    row("Druid", "Restoration", 5.10, 17514),
    row("Shaman", "Restoration", 4.43, 30590),
    row("Evoker", "Preservation", 3.15, 5538),
    row("Priest", "Holy", 3.08, 24095),
];

impl FallbackRow {
    /// Materialize the row, stamped with the current time.
    pub fn to_record(&self) -> PerformanceRecord {
        PerformanceRecord::new(self.class_name, self.spec_name, self.score, self.parses)
    }
}

/// The full reference dataset, each record freshly timestamped.
pub fn fallback_records() -> Vec<PerformanceRecord> {
    FALLBACK_ROWS.iter().map(FallbackRow::to_record).collect()
}
