//! Capacity consumed by resources that are not inventory items.

use crate::config::SlotRates;
use crate::stats::Ammo;

/// Slots taken by coins and ammunition at the configured rates.
pub fn resource_load(coins: u32, ammo: Ammo, rates: SlotRates) -> f64 {
    SlotRates::slots_for(coins, rates.coins)
        + SlotRates::slots_for(ammo.arrow, rates.arrows)
        + SlotRates::slots_for(ammo.bullet, rates.bullets)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATES: SlotRates = SlotRates {
        coins: 100,
        arrows: 20,
        bullets: 20,
    };

    #[test]
    fn resources_add_up() {
        let ammo = Ammo {
            arrow: 30,
            bullet: 10,
        };
        assert_eq!(resource_load(250, ammo, RATES), 2.5 + 1.5 + 0.5);
    }

    #[test]
    fn disabled_rates_are_free() {
        let ammo = Ammo {
            arrow: 40,
            bullet: 40,
        };
        let rates = SlotRates {
            coins: 0,
            arrows: 0,
            ..RATES
        };
        assert_eq!(resource_load(10_000, ammo, rates), 2.0);
    }
}
