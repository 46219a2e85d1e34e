use crate::models::{FoodCombination, FoodSlot, MealTemplate, PortionChoice};

/// Lazy Cartesian product over the allowed portions of each food slot.
///
/// The first slot varies slowest, the last fastest. A template with no slots,
/// or any slot with no portions, yields nothing.
#[derive(Debug, Clone)]
pub struct PortionCombinations<'a> {
    slots: &'a [FoodSlot],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> PortionCombinations<'a> {
    pub fn new(slots: &'a [FoodSlot]) -> Self {
        let done = slots.is_empty() || slots.iter().any(|s| s.allowed_portions.is_empty());
        Self {
            slots,
            indices: vec![0; slots.len()],
            done,
        }
    }

    fn current(&self) -> FoodCombination {
        FoodCombination::new(
            self.slots
                .iter()
                .zip(&self.indices)
                .map(|(slot, &i)| PortionChoice {
                    food_id: slot.food_id.clone(),
                    grams: slot.allowed_portions[i],
                })
                .collect(),
        )
    }

    /// Odometer increment; returns false once every position has wrapped.
    fn advance(&mut self) -> bool {
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.slots[pos].allowed_portions.len() {
                return true;
            }
            self.indices[pos] = 0;
        }
        false
    }
}

impl Iterator for PortionCombinations<'_> {
    type Item = FoodCombination;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let combination = self.current();
        self.done = !self.advance();
        Some(combination)
    }
}

/// Every portion assignment of a template.
pub fn expand(template: &MealTemplate) -> PortionCombinations<'_> {
    PortionCombinations::new(&template.foods)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grams(combo: &FoodCombination) -> Vec<f64> {
        combo.iter().map(|p| p.grams).collect()
    }

    #[test]
    fn test_first_slot_varies_slowest() {
        let slots = vec![
            FoodSlot::new("a", &[1.0, 2.0]),
            FoodSlot::new("b", &[10.0, 20.0, 30.0]),
        ];
        let all: Vec<Vec<f64>> = PortionCombinations::new(&slots).map(|c| grams(&c)).collect();
        assert_eq!(
            all,
            vec![
                vec![1.0, 10.0],
                vec![1.0, 20.0],
                vec![1.0, 30.0],
                vec![2.0, 10.0],
                vec![2.0, 20.0],
                vec![2.0, 30.0],
            ]
        );
    }

    #[test]
    fn test_count_matches_product() {
        let slots = vec![
            FoodSlot::new("a", &[1.0, 2.0, 3.0]),
            FoodSlot::new("b", &[1.0, 2.0]),
            FoodSlot::new("c", &[1.0, 2.0, 3.0, 4.0]),
        ];
        assert_eq!(PortionCombinations::new(&slots).count(), 24);
    }

    #[test]
    fn test_single_slot() {
        let slots = vec![FoodSlot::new("a", &[100.0, 150.0, 200.0])];
        let all: Vec<FoodCombination> = PortionCombinations::new(&slots).collect();
        assert_eq!(all.len(), 3);
        assert!(all.iter().all(|c| c.len() == 1 && c.portions[0].food_id == "a"));
    }

    #[test]
    fn test_empty_inputs_yield_nothing() {
        assert_eq!(PortionCombinations::new(&[]).count(), 0);

        let slots = vec![FoodSlot::new("a", &[1.0]), FoodSlot::new("b", &[])];
        assert_eq!(PortionCombinations::new(&slots).count(), 0);
    }

    #[test]
    fn test_enumeration_is_reproducible() {
        let slots = vec![FoodSlot::new("a", &[1.0, 2.0]), FoodSlot::new("b", &[3.0, 4.0])];
        let first: Vec<FoodCombination> = PortionCombinations::new(&slots).collect();
        let second: Vec<FoodCombination> = PortionCombinations::new(&slots).collect();
        assert_eq!(first, second);
    }
}
