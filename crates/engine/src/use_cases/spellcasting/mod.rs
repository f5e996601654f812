//! Spellcasting use cases.
//!
//! Recalculates slot maxima from class data, spends slots on casts, and
//! restores them on rests. Every operation reads the character document,
//! works on validated domain types, and writes the slot fields back in place.
//! Persisting the document is the caller's job.

mod error;

pub use error::SpellcastingError;

use std::sync::Arc;

use grimoire_domain::{
    CastOption, ClassLevels, RestType, SlotChoice, SlotProgression, SlotSpend, SpellAccess,
    SpellSlots, SpellcastingSystem,
};
use serde::Serialize;

use crate::infrastructure::ports::ClassCatalog;
use crate::record::{read_slot_state, write_slot_state, CharacterRecord, ClassLevelAggregator};

// =============================================================================
// Result Types
// =============================================================================

/// Result of recalculating a character's slot fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculateResult {
    /// Normalized class levels the maxima were derived from.
    pub classes: ClassLevels,
    /// Freshly derived maxima.
    pub progression: SlotProgression,
    /// Slot state now stored on the document.
    pub slots: SpellSlots,
    /// Whether the derived maxima differ from the stored ones.
    pub maxima_changed: bool,
    /// Whether any stored count changed.
    pub changed: bool,
}

/// Result of a cast request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastOutcome {
    pub ok: bool,
    /// Short justification for display: the pool used, or why none was.
    pub detail: String,
    /// What was spent; `None` when the cast was rejected.
    pub spent: Option<SlotSpend>,
}

impl CastOutcome {
    fn spent(spend: SlotSpend) -> Self {
        Self {
            ok: true,
            detail: spend.to_string(),
            spent: Some(spend),
        }
    }

    fn rejected(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
            spent: None,
        }
    }
}

// =============================================================================
// Use Cases
// =============================================================================

/// Container for spellcasting use cases.
pub struct SpellcastingUseCases {
    system: Arc<dyn SpellcastingSystem>,
    catalog: Arc<dyn ClassCatalog>,
}

impl SpellcastingUseCases {
    pub fn new(system: Arc<dyn SpellcastingSystem>, catalog: Arc<dyn ClassCatalog>) -> Self {
        Self { system, catalog }
    }

    /// Normalized class levels for a document.
    pub fn class_levels(&self, record: &CharacterRecord) -> ClassLevels {
        ClassLevelAggregator::new(self.system.as_ref(), self.catalog.as_ref()).aggregate(record)
    }

    /// Rederive slot maxima from the document's classes and rescale the
    /// stored counts to them.
    ///
    /// Run whenever the document is loaded, saved, or its classes change.
    /// Running it twice in a row changes nothing the second time.
    pub fn recalculate(&self, record: &mut CharacterRecord) -> RecalculateResult {
        let classes = self.class_levels(record);
        let progression = self.system.slot_progression(&classes);

        let prior = read_slot_state(record);
        let maxima_changed = prior.maxima() != progression;
        let mut slots = prior;
        slots.recalculate(&progression);
        write_slot_state(record, &slots);

        let changed = slots != prior;
        tracing::debug!(
            system = self.system.system_id(),
            classes = classes.len(),
            total_level = classes.total_level(),
            maxima_changed,
            changed,
            "Recalculated spell slots"
        );

        RecalculateResult {
            classes,
            progression,
            slots,
            maxima_changed,
            changed,
        }
    }

    /// Spend a slot for a spell of `spell_level`.
    ///
    /// The document is only touched when the cast succeeds.
    pub fn cast(
        &self,
        record: &mut CharacterRecord,
        spell_level: u8,
        choice: Option<SlotChoice>,
    ) -> CastOutcome {
        let mut slots = read_slot_state(record);
        match slots.consume(spell_level, choice) {
            Ok(spend) => {
                if spend != SlotSpend::Cantrip {
                    write_slot_state(record, &slots);
                }
                tracing::info!(spell_level, spend = %spend, "Spell cast");
                CastOutcome::spent(spend)
            }
            Err(rejection) => {
                tracing::info!(
                    spell_level,
                    choice = ?choice,
                    reason = %rejection,
                    "Spell cast rejected"
                );
                CastOutcome::rejected(rejection.to_string())
            }
        }
    }

    /// [`Self::cast`] with the choice given as text (`"standard:2"`, `"pact"`).
    ///
    /// A blank choice means automatic selection; an unreadable one is a
    /// rejected cast.
    pub fn cast_with_choice_str(
        &self,
        record: &mut CharacterRecord,
        spell_level: u8,
        choice: Option<&str>,
    ) -> CastOutcome {
        let choice = match choice.map(str::trim).filter(|c| !c.is_empty()) {
            None => None,
            Some(raw) => match raw.parse::<SlotChoice>() {
                Ok(choice) => Some(choice),
                Err(e) => {
                    tracing::info!(spell_level, choice = raw, error = %e, "Spell cast rejected");
                    return CastOutcome::rejected(e.to_string());
                }
            },
        };
        self.cast(record, spell_level, choice)
    }

    /// Restore slots for a rest and return the resulting state.
    pub fn rest(&self, record: &mut CharacterRecord, rest: RestType) -> SpellSlots {
        let mut slots = read_slot_state(record);
        slots.rest(rest);
        write_slot_state(record, &slots);
        tracing::info!(rest = %rest, "Rest completed");
        slots
    }

    /// Manually change one pool's current count by `delta`, clamped to its
    /// maximum. Returns the new current count.
    pub fn adjust_slots(
        &self,
        record: &mut CharacterRecord,
        pool: SlotChoice,
        delta: i32,
    ) -> Result<u8, SpellcastingError> {
        let mut slots = read_slot_state(record);
        let current = match pool {
            SlotChoice::Standard(level) => slots.adjust_standard(level, delta)?,
            SlotChoice::Pact => slots.adjust_pact(delta),
        };
        write_slot_state(record, &slots);
        tracing::debug!(pool = %pool, delta, current, "Adjusted spell slots");
        Ok(current)
    }

    /// Every stored pool that could pay for a spell of `spell_level`,
    /// depleted ones included.
    pub fn cast_options(&self, record: &CharacterRecord, spell_level: u8) -> Vec<CastOption> {
        read_slot_state(record).cast_options(spell_level)
    }

    /// Whether any stored pool can pay for a spell of `spell_level` right now.
    pub fn can_cast(&self, record: &CharacterRecord, spell_level: u8) -> bool {
        read_slot_state(record).can_cast(spell_level)
    }

    /// Compendium filter for the document's classes.
    pub fn spell_access(&self, record: &CharacterRecord) -> SpellAccess {
        self.system.spell_access(&self.class_levels(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::class_catalog::InMemoryClassCatalog;
    use crate::infrastructure::ports::{CatalogError, MockClassCatalog};
    use crate::record::{PACT_SLOTS_CURRENT, SPELL_SLOTS_CURRENT, SPELL_SLOTS_MAX};
    use grimoire_domain::{ClassId, Dnd5eSystem};
    use serde_json::{json, Value};

    fn use_cases() -> SpellcastingUseCases {
        SpellcastingUseCases::new(
            Arc::new(Dnd5eSystem::new()),
            Arc::new(InMemoryClassCatalog::srd()),
        )
    }

    fn record(doc: Value) -> CharacterRecord {
        CharacterRecord::from_value(doc)
    }

    fn levels(map: &[(&str, u8)]) -> Value {
        let mut levels = serde_json::Map::new();
        for level in 1..=9u8 {
            let count = map
                .iter()
                .find(|(key, _)| *key == level.to_string())
                .map_or(0, |(_, n)| *n);
            levels.insert(level.to_string(), json!(count));
        }
        Value::Object(levels)
    }

    fn slot_doc(
        max: &[(&str, u8)],
        current: &[(&str, u8)],
        pact: (u8, u8, u8),
    ) -> CharacterRecord {
        let (pact_max, pact_current, pact_level) = pact;
        record(json!({
            "spell_slots_max": levels(max),
            "spell_slots_current": levels(current),
            "pact_slots_max": pact_max,
            "pact_slots_current": pact_current,
            "pact_slot_level": pact_level
        }))
    }

    fn current_at(record: &CharacterRecord, level: u8) -> i64 {
        record
            .get(SPELL_SLOTS_CURRENT)
            .and_then(|m| m.get(level.to_string()))
            .and_then(Value::as_i64)
            .unwrap_or(-1)
    }

    fn max_row(record: &CharacterRecord) -> Vec<i64> {
        (1..=9u8)
            .map(|level| {
                record
                    .get(SPELL_SLOTS_MAX)
                    .and_then(|m| m.get(level.to_string()))
                    .and_then(Value::as_i64)
                    .unwrap_or(-1)
            })
            .collect()
    }

    fn pact_current(record: &CharacterRecord) -> i64 {
        record
            .get(PACT_SLOTS_CURRENT)
            .and_then(Value::as_i64)
            .unwrap_or(-1)
    }

    fn assert_invariant(slots: &SpellSlots) {
        for pool in slots.standard_pools() {
            assert!(pool.current() <= pool.max());
        }
        assert!(slots.pact().pool().current() <= slots.pact().pool().max());
    }

    // -------------------------------------------------------------------------
    // Recalculation
    // -------------------------------------------------------------------------

    #[test]
    fn druid_3_from_entries() {
        let mut doc = record(json!({"classes": [{"code": "druid", "level": 3}]}));
        let result = use_cases().recalculate(&mut doc);

        assert_eq!(max_row(&doc), vec![4, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(current_at(&doc, 1), 4);
        assert_eq!(current_at(&doc, 2), 2);
        assert!(result.changed);
        assert!(result.maxima_changed);
        assert_eq!(result.classes.level_of("druid"), 3);
    }

    #[test]
    fn single_half_caster_uses_its_own_table() {
        let mut doc = record(json!({"classes": [{"code": "ranger", "level": 5}]}));
        use_cases().recalculate(&mut doc);
        assert_eq!(max_row(&doc), vec![4, 2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn half_caster_with_full_caster_uses_effective_level() {
        let mut doc = record(json!({
            "classes": [{"code": "ranger", "level": 5}, {"code": "cleric", "level": 1}]
        }));
        use_cases().recalculate(&mut doc);
        assert_eq!(max_row(&doc), vec![4, 2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn wizard_5_from_primary_class() {
        let mut doc = record(json!({"classe": "Mago", "level": 5}));
        use_cases().recalculate(&mut doc);
        assert_eq!(max_row(&doc), vec![4, 3, 2, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn warlock_pact_slots_are_independent() {
        let mut doc = record(json!({"classes": [{"code": "warlock", "level": 3}]}));
        let result = use_cases().recalculate(&mut doc);

        assert_eq!(max_row(&doc), vec![0; 9]);
        assert_eq!(doc.get("pact_slots_max"), Some(&json!(2)));
        assert_eq!(doc.get("pact_slot_level"), Some(&json!(2)));
        assert_eq!(pact_current(&doc), 2);
        assert_eq!(result.progression.pact.slot_count, 2);
    }

    #[test]
    fn unresolvable_class_gets_empty_pools() {
        let mut catalog = MockClassCatalog::new();
        catalog
            .expect_class_id_for_name()
            .withf(|name| name == "Cavaliere")
            .returning(|_| Ok(None));
        let use_cases = SpellcastingUseCases::new(Arc::new(Dnd5eSystem::new()), Arc::new(catalog));

        let mut doc = record(json!({"classe": "Cavaliere", "level": 7}));
        let result = use_cases.recalculate(&mut doc);

        assert!(result.classes.is_empty());
        assert!(result.progression.is_empty());
        assert_eq!(max_row(&doc), vec![0; 9]);
        assert_eq!(pact_current(&doc), 0);
    }

    #[test]
    fn catalog_resolves_unknown_display_names() {
        let mut catalog = MockClassCatalog::new();
        catalog
            .expect_class_id_for_name()
            .withf(|name| name == "Sciamano")
            .returning(|_| Ok(ClassId::new("druid").ok()));
        let use_cases = SpellcastingUseCases::new(Arc::new(Dnd5eSystem::new()), Arc::new(catalog));

        let mut doc = record(json!({"classe": "Sciamano", "level": 3}));
        use_cases.recalculate(&mut doc);
        assert_eq!(max_row(&doc), vec![4, 2, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn unavailable_catalog_is_not_fatal() {
        let mut catalog = MockClassCatalog::new();
        catalog
            .expect_class_id_for_name()
            .returning(|_| Err(CatalogError::unavailable("offline")));
        let use_cases = SpellcastingUseCases::new(Arc::new(Dnd5eSystem::new()), Arc::new(catalog));

        let mut doc = record(json!({"classe": "Sciamano", "level": 3}));
        let result = use_cases.recalculate(&mut doc);
        assert!(result.progression.is_empty());
    }

    #[test]
    fn recalculation_is_idempotent() {
        let use_cases = use_cases();
        let mut doc = record(json!({
            "classes": [{"code": "wizard", "level": 5}, {"code": "warlock", "level": 2}]
        }));
        use_cases.recalculate(&mut doc);
        assert!(use_cases.cast(&mut doc, 1, None).ok);
        assert!(use_cases.cast(&mut doc, 1, Some(SlotChoice::Pact)).ok);

        let first = use_cases.recalculate(&mut doc);
        let snapshot = doc.clone();
        let second = use_cases.recalculate(&mut doc);

        assert!(!second.changed);
        assert!(!second.maxima_changed);
        assert_eq!(first.slots, second.slots);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn level_up_tops_up_full_pools() {
        let use_cases = use_cases();
        let mut doc = record(json!({"classes": [{"code": "wizard", "level": 4}]}));
        use_cases.recalculate(&mut doc);

        doc.set("classes", json!([{"code": "wizard", "level": 5}]));
        use_cases.recalculate(&mut doc);

        assert_eq!(current_at(&doc, 2), 3);
        assert_eq!(current_at(&doc, 3), 2);
    }

    #[test]
    fn level_up_preserves_spent_slots() {
        let use_cases = use_cases();
        let mut doc = record(json!({"classes": [{"code": "wizard", "level": 3}]}));
        use_cases.recalculate(&mut doc);
        assert!(use_cases.cast(&mut doc, 2, None).ok);
        assert_eq!(current_at(&doc, 2), 1);

        doc.set("classes", json!([{"code": "wizard", "level": 4}]));
        use_cases.recalculate(&mut doc);

        // One of three level 2 slots is still spent.
        assert_eq!(current_at(&doc, 2), 2);
        assert_eq!(current_at(&doc, 1), 4);
    }

    #[test]
    fn level_down_clamps_to_new_max() {
        let use_cases = use_cases();
        let mut doc = record(json!({"classes": [{"code": "wizard", "level": 5}]}));
        use_cases.recalculate(&mut doc);
        assert!(use_cases.cast(&mut doc, 3, None).ok);

        doc.set("classes", json!([{"code": "wizard", "level": 3}]));
        use_cases.recalculate(&mut doc);

        assert_eq!(max_row(&doc), vec![4, 2, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(current_at(&doc, 3), 0);
    }

    // -------------------------------------------------------------------------
    // Casting
    // -------------------------------------------------------------------------

    #[test]
    fn auto_cast_spends_lowest_adequate_level() {
        let mut doc = slot_doc(&[("1", 4), ("2", 2)], &[("1", 1), ("2", 1)], (0, 0, 0));
        let outcome = use_cases().cast(&mut doc, 1, None);

        assert!(outcome.ok);
        assert_eq!(outcome.spent, Some(SlotSpend::Standard { level: 1 }));
        assert_eq!(outcome.detail, "Used a level 1 spell slot");
        assert_eq!(current_at(&doc, 1), 0);
        assert_eq!(current_at(&doc, 2), 1);
    }

    #[test]
    fn auto_cast_prefers_standard_over_pact() {
        let mut doc = slot_doc(&[("1", 4), ("2", 2)], &[("1", 1), ("2", 1)], (2, 2, 2));
        assert!(use_cases().cast(&mut doc, 2, None).ok);
        assert_eq!(current_at(&doc, 2), 0);
        assert_eq!(pact_current(&doc), 2);
    }

    #[test]
    fn auto_cast_falls_back_to_pact() {
        let mut doc = slot_doc(&[], &[], (2, 1, 3));
        let outcome = use_cases().cast(&mut doc, 2, None);

        assert!(outcome.ok);
        assert_eq!(outcome.spent, Some(SlotSpend::Pact { level: 3 }));
        assert_eq!(pact_current(&doc), 0);
    }

    #[test]
    fn rejection_leaves_document_untouched() {
        let mut doc = slot_doc(&[("1", 4), ("2", 3)], &[("1", 4), ("2", 3)], (2, 2, 2));
        let before = doc.clone();
        let outcome = use_cases().cast(&mut doc, 3, None);

        assert!(!outcome.ok);
        assert_eq!(outcome.spent, None);
        assert!(outcome.detail.contains("No slot available"));
        assert_eq!(doc, before);
    }

    #[test]
    fn cantrips_are_free() {
        let mut doc = slot_doc(&[], &[], (0, 0, 0));
        let before = doc.clone();
        let outcome = use_cases().cast(&mut doc, 0, None);

        assert!(outcome.ok);
        assert_eq!(outcome.spent, Some(SlotSpend::Cantrip));
        assert_eq!(doc, before);
    }

    #[test]
    fn explicit_standard_choice() {
        let mut doc = slot_doc(&[("2", 1)], &[("2", 1)], (2, 2, 2));
        let outcome = use_cases().cast_with_choice_str(&mut doc, 2, Some("standard:2"));

        assert!(outcome.ok);
        assert_eq!(current_at(&doc, 2), 0);
        assert_eq!(pact_current(&doc), 2);
    }

    #[test]
    fn explicit_choice_rejections() {
        let use_cases = use_cases();
        let mut doc = slot_doc(&[("1", 2), ("3", 1)], &[("1", 2), ("3", 0)], (1, 1, 1));

        let below = use_cases.cast(&mut doc, 2, Some(SlotChoice::Standard(1)));
        assert!(!below.ok);
        assert!(below.detail.starts_with("Invalid level"));

        let missing = use_cases.cast(&mut doc, 2, Some(SlotChoice::Standard(2)));
        assert!(missing.detail.starts_with("Not available"));

        let exhausted = use_cases.cast(&mut doc, 2, Some(SlotChoice::Standard(3)));
        assert!(exhausted.detail.starts_with("Exhausted"));

        let pact_too_low = use_cases.cast(&mut doc, 2, Some(SlotChoice::Pact));
        assert!(!pact_too_low.ok);
        assert_eq!(pact_current(&doc), 1);
    }

    #[test]
    fn blank_choice_is_automatic_and_garbage_is_rejected() {
        let use_cases = use_cases();
        let mut doc = slot_doc(&[("1", 2)], &[("1", 2)], (0, 0, 0));

        assert!(use_cases.cast_with_choice_str(&mut doc, 1, Some("  ")).ok);
        assert_eq!(current_at(&doc, 1), 1);

        let outcome = use_cases.cast_with_choice_str(&mut doc, 1, Some("ritual"));
        assert!(!outcome.ok);
        assert_eq!(current_at(&doc, 1), 1);
    }

    // -------------------------------------------------------------------------
    // Rests and manual adjustment
    // -------------------------------------------------------------------------

    #[test]
    fn long_rest_restores_everything() {
        let mut doc = slot_doc(&[("1", 4), ("2", 2)], &[("1", 1), ("2", 0)], (2, 0, 2));
        let slots = use_cases().rest(&mut doc, RestType::Long);

        assert_eq!(current_at(&doc, 1), 4);
        assert_eq!(current_at(&doc, 2), 2);
        assert_eq!(pact_current(&doc), 2);
        assert_eq!(slots.maxima(), read_slot_state(&doc).maxima());
    }

    #[test]
    fn short_rest_restores_pact_only() {
        let mut doc = slot_doc(&[("1", 4)], &[("1", 0)], (2, 0, 2));
        use_cases().rest(&mut doc, RestType::Short);

        assert_eq!(pact_current(&doc), 2);
        assert_eq!(current_at(&doc, 1), 0);
    }

    #[test]
    fn rest_with_nothing_to_restore_succeeds() {
        let mut doc = slot_doc(&[], &[], (0, 0, 0));
        let slots = use_cases().rest(&mut doc, RestType::Short);
        assert_eq!(slots, SpellSlots::default());
    }

    #[test]
    fn adjust_slots_clamps() {
        let use_cases = use_cases();
        let mut doc = slot_doc(&[("1", 4), ("2", 2)], &[("1", 4), ("2", 1)], (2, 1, 2));

        let current = use_cases
            .adjust_slots(&mut doc, SlotChoice::Standard(2), -1)
            .expect("valid level");
        assert_eq!(current, 0);
        assert_eq!(current_at(&doc, 2), 0);

        let current = use_cases
            .adjust_slots(&mut doc, SlotChoice::Standard(2), -3)
            .expect("valid level");
        assert_eq!(current, 0);

        let pact = use_cases
            .adjust_slots(&mut doc, SlotChoice::Pact, 5)
            .expect("pact");
        assert_eq!(pact, 2);
    }

    #[test]
    fn adjust_slots_tolerates_extreme_deltas() {
        let use_cases = use_cases();
        let mut doc = slot_doc(&[("1", 4)], &[("1", 2)], (2, 1, 2));

        let pact = use_cases
            .adjust_slots(&mut doc, SlotChoice::Pact, i32::MAX)
            .expect("pact");
        assert_eq!(pact, 2);
        let current = use_cases
            .adjust_slots(&mut doc, SlotChoice::Standard(1), i32::MIN)
            .expect("valid level");
        assert_eq!(current, 0);
        assert_eq!(current_at(&doc, 1), 0);
    }

    #[test]
    fn adjust_slots_rejects_bad_level() {
        let mut doc = slot_doc(&[], &[], (0, 0, 0));
        let result = use_cases().adjust_slots(&mut doc, SlotChoice::Standard(10), 1);
        assert!(matches!(result, Err(SpellcastingError::Domain(_))));
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    #[test]
    fn cast_options_include_depleted_levels() {
        let doc = slot_doc(&[("1", 4), ("2", 2)], &[("1", 0), ("2", 1)], (0, 0, 0));
        let options = use_cases().cast_options(&doc, 1);

        let remaining: Vec<(u8, u8)> = options.iter().map(|o| (o.level, o.remaining)).collect();
        assert_eq!(remaining, vec![(1, 0), (2, 1)]);
        assert!(options.iter().all(|o| o.recovers_on == RestType::Long));
        assert!(use_cases().can_cast(&doc, 1));
        assert!(use_cases().can_cast(&doc, 0));
        assert!(!use_cases().can_cast(&doc, 3));
    }

    #[test]
    fn cast_options_list_pact_last() {
        let doc = slot_doc(&[("1", 2)], &[("1", 2)], (2, 2, 2));
        let options = use_cases().cast_options(&doc, 1);

        let last = options.last().expect("pact option");
        assert_eq!(last.choice, SlotChoice::Pact);
        assert_eq!(last.recovers_on, RestType::Short);
        assert!(use_cases().cast_options(&doc, 3).is_empty());
    }

    #[test]
    fn spell_access_for_multiclass() {
        let doc = record(json!({
            "classes": [{"code": "paladin", "level": 5}, {"code": "rogue", "level": 2}]
        }));
        let access = use_cases().spell_access(&doc);

        assert_eq!(access.max_spell_level, Some(2));
        assert!(access.class_ids.iter().any(|id| id.as_str() == "paladin"));

        let nobody = use_cases().spell_access(&record(json!({})));
        assert_eq!(nobody.max_spell_level, None);
    }

    #[test]
    fn invariant_holds_across_operations() {
        let use_cases = use_cases();
        let mut doc = record(json!({
            "classes": [{"code": "cleric", "level": 3}, {"code": "warlock", "level": 5}]
        }));
        use_cases.recalculate(&mut doc);

        for level in [1, 1, 2, 3, 1, 1, 1, 1, 2, 2, 3] {
            use_cases.cast(&mut doc, level, None);
            assert_invariant(&read_slot_state(&doc));
        }
        use_cases.rest(&mut doc, RestType::Short);
        assert_invariant(&read_slot_state(&doc));

        doc.set("classes", json!([{"code": "cleric", "level": 1}]));
        use_cases.recalculate(&mut doc);
        assert_invariant(&read_slot_state(&doc));

        use_cases.rest(&mut doc, RestType::Long);
        let slots = read_slot_state(&doc);
        for pool in slots.standard_pools() {
            assert!(pool.is_full());
        }
        assert!(slots.pact().pool().is_full());
    }
}
