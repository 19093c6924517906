//! Capacity solver.
//!
//! Given a budget and the current consumption, the solver either releases
//! held units until the record fits (deficit) or picks dropped units back up
//! while room remains (surplus). Items are visited in [`DropOrder`], one unit
//! at a time, so a partially dropped stack is possible.
//!
//! Arithmetic stays in `f64` for the whole solve; rounding of reported totals
//! happens afterwards and never feeds back into these decisions.

use std::cmp::Reverse;

use super::item::{ItemId, ItemState, StoredItem, normalize};

/// Visiting order for both solver modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DropOrder {
    /// Most recently modified first; the manual sort key stands in for a
    /// missing modification time.
    Recency,
    /// Manual sort order, ascending.
    Manual,
}

/// An item as the solver sees it: normalized split plus ordering keys.
#[derive(Clone, Debug, PartialEq)]
pub struct CarriedItem {
    pub id: ItemId,
    pub quantity: u32,
    pub unit_slots: f64,
    pub state: ItemState,
    pub modified_time: Option<u64>,
    pub sort: i64,
}

impl CarriedItem {
    pub fn from_stored(item: &StoredItem) -> Self {
        Self::with_state(item, normalize(item))
    }

    pub fn with_state(item: &StoredItem, state: ItemState) -> Self {
        Self {
            id: item.id.clone(),
            quantity: item.quantity,
            unit_slots: item.unit_slots(),
            state,
            modified_time: item.modified_time,
            sort: item.sort,
        }
    }

    /// Capacity consumed by the held units.
    pub fn load(&self) -> f64 {
        f64::from(self.state.held) * self.unit_slots
    }

    /// Items without units or without weight never change state.
    fn is_inert(&self) -> bool {
        self.quantity == 0 || self.unit_slots <= 0.0
    }

    fn recency_key(&self) -> i64 {
        self.modified_time
            .map(|time| i64::try_from(time).unwrap_or(i64::MAX))
            .unwrap_or(self.sort)
    }
}

/// Which way the solver had to move.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CapacityMode {
    /// Consumption matched the budget exactly.
    Balanced,
    /// Over budget by `remainder` before solving.
    Deficit { remainder: f64 },
    /// Under budget by `free` before solving.
    Surplus { free: f64 },
}

/// Reconciles held units against a capacity budget.
#[derive(Clone, Copy, Debug)]
pub struct CapacitySolver {
    order: DropOrder,
}

impl CapacitySolver {
    pub fn new(order: DropOrder) -> Self {
        Self { order }
    }

    pub fn order(&self) -> DropOrder {
        self.order
    }

    /// Sum of held loads.
    pub fn item_load(items: &[CarriedItem]) -> f64 {
        items.iter().map(CarriedItem::load).sum()
    }

    /// Solves in place. `consumption` covers items and non-item resources.
    ///
    /// A deficit solve usually releases more than it had to, since units are
    /// whole. The overshoot is offered back to the pickup pass so that a
    /// second solve over the result finds nothing left to do.
    pub fn solve(&self, items: &mut [CarriedItem], max: f64, consumption: f64) -> CapacityMode {
        let order = self.visit_order(items);

        if consumption > max {
            let remainder = consumption - max;
            let left = Self::release(items, &order, remainder);
            if left < 0.0 {
                Self::pick_up(items, &order, -left);
            }
            CapacityMode::Deficit { remainder }
        } else if consumption < max {
            let free = max - consumption;
            Self::pick_up(items, &order, free);
            CapacityMode::Surplus { free }
        } else {
            CapacityMode::Balanced
        }
    }

    /// Indices of `items` in visiting order. Sorting is stable.
    fn visit_order(&self, items: &[CarriedItem]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..items.len()).collect();
        match self.order {
            DropOrder::Recency => order.sort_by_key(|&i| Reverse(items[i].recency_key())),
            DropOrder::Manual => order.sort_by_key(|&i| items[i].sort),
        }
        order
    }

    /// Drops units until `remainder` is covered. Returns what is left of it,
    /// negative when the last unit overshot.
    fn release(items: &mut [CarriedItem], order: &[usize], mut remainder: f64) -> f64 {
        for &index in order {
            if remainder <= 0.0 {
                break;
            }
            let item = &mut items[index];
            if item.is_inert() {
                continue;
            }

            let mut held = item.state.held;
            while remainder > 0.0 && held > 0 {
                held -= 1;
                remainder -= item.unit_slots;
            }

            if held != item.state.held {
                item.state = ItemState::from_held(item.quantity, held);
            }
        }

        remainder
    }

    fn pick_up(items: &mut [CarriedItem], order: &[usize], mut free: f64) {
        for &index in order {
            if free <= 0.0 {
                break;
            }
            let item = &mut items[index];
            if item.is_inert() {
                continue;
            }

            let mut held = item.state.held;
            while held < item.quantity && free >= item.unit_slots {
                held += 1;
                free -= item.unit_slots;
            }

            if held != item.state.held {
                item.state = ItemState::from_held(item.quantity, held);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carried(id: &str, quantity: u32, held: u32, unit_slots: f64, time: u64) -> CarriedItem {
        CarriedItem {
            id: ItemId::new(id),
            quantity,
            unit_slots,
            state: ItemState::from_held(quantity, held),
            modified_time: Some(time),
            sort: 0,
        }
    }

    #[test]
    fn deficit_releases_most_recent_first() {
        let mut items = vec![
            carried("b", 1, 1, 3.0, 10),
            carried("a", 1, 1, 5.0, 20),
        ];
        let mode = CapacitySolver::new(DropOrder::Recency).solve(&mut items, 4.0, 8.0);

        assert_eq!(mode, CapacityMode::Deficit { remainder: 4.0 });
        assert!(items[1].state.dropped);
        assert_eq!(items[0].state.held, 1);
    }

    #[test]
    fn deficit_drops_units_one_at_a_time() {
        let mut items = vec![carried("arrows", 5, 5, 1.0, 1)];
        CapacitySolver::new(DropOrder::Recency).solve(&mut items, 3.0, 5.0);

        let state = items[0].state;
        assert_eq!(state.held, 3);
        assert_eq!(state.dropped_count, 2);
        assert_eq!(state.progress, 40.0);
        assert!(!state.dropped);
    }

    #[test]
    fn deficit_moves_on_when_a_stack_is_exhausted() {
        let mut items = vec![
            carried("old", 2, 2, 1.0, 1),
            carried("new", 1, 1, 1.0, 9),
        ];
        CapacitySolver::new(DropOrder::Recency).solve(&mut items, 0.0, 3.0);
        assert!(items.iter().all(|item| item.state.held == 0));
    }

    #[test]
    fn zero_budget_releases_everything_weighted() {
        let mut items = vec![
            carried("sword", 1, 1, 1.0, 1),
            carried("ring", 1, 1, 0.0, 2),
        ];
        let load = CapacitySolver::item_load(&items);
        CapacitySolver::new(DropOrder::Recency).solve(&mut items, 0.0, load);
        assert_eq!(items[0].state.held, 0);
        assert_eq!(items[1].state.held, 1);
    }

    #[test]
    fn surplus_picks_up_while_room_remains() {
        let mut items = vec![carried("javelins", 3, 1, 2.0, 1)];
        let mode = CapacitySolver::new(DropOrder::Recency).solve(&mut items, 7.0, 2.0);

        assert_eq!(mode, CapacityMode::Surplus { free: 5.0 });
        assert_eq!(items[0].state, ItemState::all_held(3));
    }

    #[test]
    fn surplus_stops_when_a_unit_does_not_fit() {
        let mut items = vec![carried("armor", 2, 0, 3.0, 1)];
        CapacitySolver::new(DropOrder::Recency).solve(&mut items, 5.0, 0.0);
        assert_eq!(items[0].state.held, 1);
        assert!(!items[0].state.dropped);
    }

    #[test]
    fn inert_items_never_change() {
        let mut items = vec![
            carried("feather", 4, 0, 0.0, 5),
            carried("empty", 0, 0, 2.0, 6),
        ];
        let before = items.clone();
        let solver = CapacitySolver::new(DropOrder::Recency);

        solver.solve(&mut items, 100.0, 0.0);
        assert_eq!(items, before);

        solver.solve(&mut items, 0.0, 100.0);
        assert_eq!(items, before);
    }

    #[test]
    fn manual_order_uses_sort_key() {
        let mut first = carried("first", 1, 1, 1.0, 100);
        first.sort = 1;
        let mut second = carried("second", 1, 1, 1.0, 1);
        second.sort = 2;
        let mut items = vec![second, first];

        CapacitySolver::new(DropOrder::Manual).solve(&mut items, 1.0, 2.0);
        assert_eq!(items[1].state.held, 0);
        assert_eq!(items[0].state.held, 1);
    }

    #[test]
    fn missing_time_falls_back_to_sort_key() {
        let mut untimed = carried("untimed", 1, 1, 1.0, 0);
        untimed.modified_time = None;
        untimed.sort = 50;
        let mut items = vec![carried("timed", 1, 1, 1.0, 10), untimed];

        CapacitySolver::new(DropOrder::Recency).solve(&mut items, 1.0, 2.0);
        assert_eq!(items[1].state.held, 0);
        assert_eq!(items[0].state.held, 1);
    }

    #[test]
    fn overshoot_is_offered_back() {
        let mut items = vec![
            carried("pebble", 1, 1, 1.0, 20),
            carried("anvil", 1, 1, 5.0, 10),
        ];
        let solver = CapacitySolver::new(DropOrder::Recency);
        solver.solve(&mut items, 3.0, 6.0);

        assert_eq!(items[0].state.held, 1);
        assert_eq!(items[1].state.held, 0);

        let solved = items.clone();
        let consumption = CapacitySolver::item_load(&items);
        solver.solve(&mut items, 3.0, consumption);
        assert_eq!(items, solved);
    }

    #[test]
    fn balanced_budget_changes_nothing() {
        let mut items = vec![carried("pack", 1, 1, 2.0, 1)];
        let before = items.clone();
        let mode = CapacitySolver::new(DropOrder::Recency).solve(&mut items, 2.0, 2.0);
        assert_eq!(mode, CapacityMode::Balanced);
        assert_eq!(items, before);
    }
}
