//! Weapon condition: a weapon stack is broken once every unit is broken.

use super::item::{ItemKind, StoredItem};
use super::patch::{ItemFields, ItemPatch};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponCondition {
    pub broken: bool,
    pub broken_quantity: u32,
}

/// Condition a weapon should carry, or `None` for other item kinds.
pub fn weapon_condition(item: &StoredItem) -> Option<WeaponCondition> {
    if item.kind != ItemKind::Weapon {
        return None;
    }

    let broken = item.quantity > 0 && item.broken_quantity >= item.quantity;
    let broken_quantity = if broken {
        item.quantity
    } else {
        item.broken_quantity
    };

    Some(WeaponCondition {
        broken,
        broken_quantity,
    })
}

/// Patch for a weapon whose stored condition is stale.
pub fn condition_patch(item: &StoredItem) -> Option<ItemPatch> {
    let condition = weapon_condition(item)?;

    let mut changed = ItemFields::empty();
    if item.broken != Some(condition.broken) {
        changed |= ItemFields::BROKEN;
    }
    if item.broken_quantity != condition.broken_quantity {
        changed |= ItemFields::BROKEN_QUANTITY;
    }

    (!changed.is_empty()).then(|| ItemPatch::condition(item.id.clone(), condition, changed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword(quantity: u32, broken_quantity: u32) -> StoredItem {
        StoredItem::new("sword", quantity, 1.0)
            .with_kind(ItemKind::Weapon)
            .with_broken_quantity(broken_quantity)
    }

    #[test]
    fn fully_broken_stack_is_broken() {
        let patch = condition_patch(&sword(2, 5)).unwrap();
        let condition = patch.condition.unwrap();
        assert!(condition.broken);
        assert_eq!(condition.broken_quantity, 2);
        assert_eq!(
            patch.changed,
            ItemFields::BROKEN | ItemFields::BROKEN_QUANTITY
        );
    }

    #[test]
    fn partially_broken_stack_is_not_broken() {
        let mut item = sword(3, 1);
        let patch = condition_patch(&item).unwrap();
        assert_eq!(patch.changed, ItemFields::BROKEN);

        item.broken = Some(false);
        assert!(condition_patch(&item).is_none());
    }

    #[test]
    fn other_kinds_have_no_condition() {
        let item = StoredItem::new("rope", 1, 1.0).with_broken_quantity(4);
        assert!(weapon_condition(&item).is_none());
        assert!(condition_patch(&item).is_none());
    }
}
