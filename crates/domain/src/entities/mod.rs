//! Domain entities - stateful objects mutated by spellcasting operations

mod spell_slots;

pub use spell_slots::{
    CastOption, CastRejection, PactSlots, SlotChoice, SlotSpend, SpellSlotPool, SpellSlots,
};
