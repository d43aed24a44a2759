use crate::world::titles::{sanitize_mask, TitleDefinition, TitleRegistry};

/// Known titles and the currently worn one.
///
/// `selected_bit == 0` means no title is worn. Any other value is always a bit
/// set in `known_mask`; every primitive below restores that before returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerTitleState {
    known_mask: u64,
    selected_bit: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrantOutcome {
    pub newly_granted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevokeOutcome {
    pub was_known: bool,
    pub selection_cleared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOutcome {
    pub newly_granted: bool,
    pub previous_bit: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOverwrite {
    pub applied: u64,
    pub dropped: u64,
    pub selection_cleared: bool,
}

impl PlayerTitleState {
    pub fn known_mask(&self) -> u64 {
        self.known_mask
    }

    pub fn selected_bit(&self) -> u8 {
        self.selected_bit
    }

    pub fn has_bit(&self, bit_index: u8) -> bool {
        bit_index < 64 && (self.known_mask >> bit_index) & 1 == 1
    }

    pub fn has_title(&self, title: &TitleDefinition) -> bool {
        self.has_bit(title.bit_index)
    }

    pub fn grant(&mut self, title: &TitleDefinition) -> GrantOutcome {
        let newly_granted = !self.has_title(title);
        self.known_mask |= title.mask();
        GrantOutcome { newly_granted }
    }

    pub fn revoke(&mut self, title: &TitleDefinition) -> RevokeOutcome {
        let was_known = self.has_title(title);
        self.known_mask &= !title.mask();
        RevokeOutcome {
            was_known,
            selection_cleared: self.drop_stale_selection(),
        }
    }

    /// Selecting a title the player does not hold unlocks it first.
    pub fn select_current(&mut self, title: &TitleDefinition) -> SelectOutcome {
        let previous_bit = self.selected_bit;
        let GrantOutcome { newly_granted } = self.grant(title);
        self.selected_bit = title.bit_index;
        SelectOutcome {
            newly_granted,
            previous_bit,
        }
    }

    /// Replaces the whole mask with `raw` minus any bit the registry does not
    /// define.
    pub fn overwrite_mask(&mut self, raw: u64, registry: &TitleRegistry) -> MaskOverwrite {
        let applied = sanitize_mask(raw, registry.iter());
        self.known_mask = applied;
        MaskOverwrite {
            applied,
            dropped: raw & !applied,
            selection_cleared: self.drop_stale_selection(),
        }
    }

    fn drop_stale_selection(&mut self) -> bool {
        if self.selected_bit == 0 || self.has_bit(self.selected_bit) {
            return false;
        }
        self.selected_bit = 0;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::titles::TitleId;
    use proptest::prelude::*;

    fn registry() -> TitleRegistry {
        let mut registry = TitleRegistry::default();
        registry
            .insert(TitleDefinition::new(TitleId(1), 0, "Private %s"))
            .unwrap();
        registry
            .insert(TitleDefinition::new(TitleId(2), 1, "Corporal %s"))
            .unwrap();
        registry
            .insert(TitleDefinition::new(TitleId(3), 5, "Sergeant %s"))
            .unwrap();
        registry
            .insert(TitleDefinition::new(TitleId(4), 63, "%s the Patient"))
            .unwrap();
        registry
    }

    fn title(registry: &TitleRegistry, id: i64) -> &TitleDefinition {
        registry.lookup(id).expect("title")
    }

    #[test]
    fn new_state_is_zeroed() {
        let state = PlayerTitleState::default();
        assert_eq!(state.known_mask(), 0);
        assert_eq!(state.selected_bit(), 0);
    }

    #[test]
    fn grant_is_idempotent() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        assert!(state.grant(title(&registry, 3)).newly_granted);
        let once = state.known_mask();
        assert!(!state.grant(title(&registry, 3)).newly_granted);
        assert_eq!(state.known_mask(), once);
        assert_eq!(once, 1 << 5);
    }

    #[test]
    fn grant_leaves_selection_alone() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        state.select_current(title(&registry, 2));
        state.grant(title(&registry, 3));
        assert_eq!(state.selected_bit(), 1);
    }

    #[test]
    fn select_current_unlocks_title() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        let outcome = state.select_current(title(&registry, 4));
        assert!(outcome.newly_granted);
        assert_eq!(outcome.previous_bit, 0);
        assert!(state.has_bit(63));
        assert_eq!(state.selected_bit(), 63);

        let again = state.select_current(title(&registry, 4));
        assert!(!again.newly_granted);
        assert_eq!(again.previous_bit, 63);
    }

    #[test]
    fn revoke_clears_stale_selection() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        state.select_current(title(&registry, 3));
        let outcome = state.revoke(title(&registry, 3));
        assert!(outcome.was_known);
        assert!(outcome.selection_cleared);
        assert_eq!(state.selected_bit(), 0);
        assert_eq!(state.known_mask(), 0);
    }

    #[test]
    fn revoke_other_title_keeps_selection() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        state.grant(title(&registry, 2));
        state.select_current(title(&registry, 3));
        let outcome = state.revoke(title(&registry, 2));
        assert!(!outcome.selection_cleared);
        assert_eq!(state.selected_bit(), 5);
    }

    #[test]
    fn revoke_unknown_title_is_noop() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        let outcome = state.revoke(title(&registry, 2));
        assert!(!outcome.was_known);
        assert!(!outcome.selection_cleared);
        assert_eq!(state, PlayerTitleState::default());
    }

    #[test]
    fn selecting_bit_zero_title_reads_as_no_selection() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        state.select_current(title(&registry, 1));
        assert!(state.has_bit(0));
        assert_eq!(state.selected_bit(), 0);
        let outcome = state.revoke(title(&registry, 1));
        assert!(!outcome.selection_cleared);
    }

    #[test]
    fn overwrite_mask_drops_undefined_bits() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        let raw = 0b1110_0111 | (1u64 << 63);
        let outcome = state.overwrite_mask(raw, &registry);
        assert_eq!(outcome.applied, 0b10_0011 | (1u64 << 63));
        assert_eq!(outcome.dropped, 0b1100_0100);
        assert_eq!(state.known_mask(), outcome.applied);
    }

    #[test]
    fn overwrite_mask_replaces_instead_of_merging() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        state.grant(title(&registry, 4));
        state.overwrite_mask(0b10, &registry);
        assert_eq!(state.known_mask(), 0b10);
    }

    #[test]
    fn overwrite_mask_clears_selection_when_removed() {
        let registry = registry();
        let mut state = PlayerTitleState::default();
        state.select_current(title(&registry, 3));
        let kept = state.overwrite_mask(1 << 5, &registry);
        assert!(!kept.selection_cleared);
        assert_eq!(state.selected_bit(), 5);

        let cleared = state.overwrite_mask(0b11, &registry);
        assert!(cleared.selection_cleared);
        assert_eq!(state.selected_bit(), 0);
    }

    #[test]
    fn two_title_scenario() {
        let mut registry = TitleRegistry::default();
        registry
            .insert(TitleDefinition::new(TitleId(1), 0, "Private %s"))
            .unwrap();
        registry
            .insert(TitleDefinition::new(TitleId(2), 1, "Corporal %s"))
            .unwrap();
        let mut state = PlayerTitleState::default();

        state.select_current(title(&registry, 2));
        assert_eq!(state.known_mask(), 0b10);
        assert_eq!(state.selected_bit(), 1);

        let revoked = state.revoke(title(&registry, 2));
        assert_eq!(state.known_mask(), 0);
        assert_eq!(state.selected_bit(), 0);
        assert!(revoked.selection_cleared);

        let overwrite = state.overwrite_mask(0b111, &registry);
        assert_eq!(state.known_mask(), 0b011);
        assert_eq!(overwrite.dropped, 0b100);
    }

    #[derive(Debug, Clone)]
    enum TitleOp {
        Grant(i64),
        Revoke(i64),
        Select(i64),
        Overwrite(u64),
    }

    fn arb_title_op() -> impl Strategy<Value = TitleOp> {
        prop_oneof![
            (1i64..=4).prop_map(TitleOp::Grant),
            (1i64..=4).prop_map(TitleOp::Revoke),
            (1i64..=4).prop_map(TitleOp::Select),
            any::<u64>().prop_map(TitleOp::Overwrite),
        ]
    }

    proptest! {
        #[test]
        fn selection_stays_held_across_mixed_operations(
            ops in prop::collection::vec(arb_title_op(), 1..64),
            raw in any::<u64>(),
        ) {
            let registry = registry();
            let valid = registry.valid_mask();
            let mut state = PlayerTitleState::default();
            state.overwrite_mask(raw, &registry);
            for op in ops {
                match op {
                    TitleOp::Grant(id) => {
                        state.grant(title(&registry, id));
                    }
                    TitleOp::Revoke(id) => {
                        state.revoke(title(&registry, id));
                    }
                    TitleOp::Select(id) => {
                        let definition = title(&registry, id);
                        state.select_current(definition);
                        prop_assert!(state.has_title(definition));
                    }
                    TitleOp::Overwrite(mask) => {
                        let outcome = state.overwrite_mask(mask, &registry);
                        prop_assert_eq!(state.known_mask(), mask & valid);
                        prop_assert_eq!(outcome.applied | outcome.dropped, mask);
                    }
                }
                prop_assert!(
                    state.selected_bit() == 0 || state.has_bit(state.selected_bit()),
                    "selected bit {} not in mask {:#b}",
                    state.selected_bit(),
                    state.known_mask()
                );
                prop_assert_eq!(state.known_mask() & !valid, 0);
            }
        }

        #[test]
        fn overwrite_mask_intersects_with_defined_bits(raw in any::<u64>(), selected in 1i64..=4) {
            let registry = registry();
            let valid = registry.valid_mask();
            let mut state = PlayerTitleState::default();
            let definition = title(&registry, selected);
            state.select_current(definition);
            let before = state.selected_bit();

            let outcome = state.overwrite_mask(raw, &registry);
            prop_assert_eq!(state.known_mask(), raw & valid);
            prop_assert_eq!(outcome.applied, raw & valid);
            prop_assert_eq!(outcome.dropped, raw & !valid);
            prop_assert_eq!(outcome.applied | outcome.dropped, raw);
            prop_assert_eq!(
                outcome.selection_cleared,
                before != 0 && (raw >> before) & 1 == 0
            );
            prop_assert!(state.selected_bit() == 0 || state.has_bit(state.selected_bit()));
        }
    }
}
