//! Persisted slot fields on the character document.
//!
//! Standard slots live in two objects keyed `"1"`..`"9"`; pact magic uses
//! three scalar fields. Reads are lenient, writes always emit the full shape.

use grimoire_domain::{PactSlots, SpellSlotPool, SpellSlots, SPELL_LEVELS};
use serde_json::{Map, Value};

use super::{loose_int, CharacterRecord};

pub const SPELL_SLOTS_MAX: &str = "spell_slots_max";
pub const SPELL_SLOTS_CURRENT: &str = "spell_slots_current";
pub const PACT_SLOTS_MAX: &str = "pact_slots_max";
pub const PACT_SLOTS_CURRENT: &str = "pact_slots_current";
pub const PACT_SLOT_LEVEL: &str = "pact_slot_level";

/// Read stored slot state.
///
/// A missing maximum is zero. A missing current count means the pool is
/// full, and a stored current above its maximum is clamped. A document that
/// never had slot fields therefore reads as all-empty pools, which the
/// rescale rule tops up on the next recalculation.
pub fn read_slot_state(record: &CharacterRecord) -> SpellSlots {
    let max_by_level = record.get(SPELL_SLOTS_MAX).and_then(Value::as_object);
    let current_by_level = record.get(SPELL_SLOTS_CURRENT).and_then(Value::as_object);

    let mut standard = [SpellSlotPool::default(); SPELL_LEVELS];
    for (index, pool) in standard.iter_mut().enumerate() {
        let key = level_key(index);
        let max = max_by_level.and_then(|m| m.get(&key)).and_then(slot_count);
        let current = current_by_level.and_then(|m| m.get(&key)).and_then(slot_count);
        *pool = stored_pool(max, current);
    }

    let pact_pool = stored_pool(
        record.get(PACT_SLOTS_MAX).and_then(slot_count),
        record.get(PACT_SLOTS_CURRENT).and_then(slot_count),
    );
    let pact_level = record
        .get(PACT_SLOT_LEVEL)
        .and_then(slot_count)
        .unwrap_or(0);

    SpellSlots::from_parts(standard, PactSlots::new(pact_pool, pact_level))
}

/// Write every slot field, replacing whatever was stored.
pub fn write_slot_state(record: &mut CharacterRecord, slots: &SpellSlots) {
    let mut max_by_level = Map::new();
    let mut current_by_level = Map::new();
    for (index, pool) in slots.standard_pools().iter().enumerate() {
        max_by_level.insert(level_key(index), Value::from(pool.max()));
        current_by_level.insert(level_key(index), Value::from(pool.current()));
    }
    record.set(SPELL_SLOTS_MAX, Value::Object(max_by_level));
    record.set(SPELL_SLOTS_CURRENT, Value::Object(current_by_level));

    let pact = slots.pact();
    record.set(PACT_SLOTS_MAX, Value::from(pact.pool().max()));
    record.set(PACT_SLOTS_CURRENT, Value::from(pact.pool().current()));
    record.set(PACT_SLOT_LEVEL, Value::from(pact.slot_level()));
}

fn level_key(index: usize) -> String {
    (index + 1).to_string()
}

fn stored_pool(max: Option<u8>, current: Option<u8>) -> SpellSlotPool {
    let max = max.unwrap_or(0);
    SpellSlotPool::with_current(max, current.unwrap_or(max))
}

fn slot_count(value: &Value) -> Option<u8> {
    loose_int(value).map(|n| u8::try_from(n.clamp(0, i64::from(u8::MAX))).unwrap_or(u8::MAX))
}
