//! Nutrition estimate for a drink
//!
//! Whole-number figures only; every rule truncates per field.

use serde::{Deserialize, Serialize};

/// Estimated nutrition of a drink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionEstimate {
    pub calories: i64,
    pub carbs_grams: i64,
    pub protein_grams: i64,
    pub fat_grams: i64,
}

impl NutritionEstimate {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Milk at `volume_ml`: 0.5 kcal, 0.05 g carbs, 0.035 g protein and
    /// 0.02 g fat per ml, each truncated toward zero.
    pub fn milk(volume_ml: i64) -> Self {
        Self {
            calories: scale(volume_ml, 5, 10),
            carbs_grams: scale(volume_ml, 5, 100),
            protein_grams: scale(volume_ml, 35, 1000),
            fat_grams: scale(volume_ml, 2, 100),
        }
    }

    /// Field-wise sum, `None` if any field leaves the `i64` range
    pub fn checked_add(self, other: NutritionEstimate) -> Option<NutritionEstimate> {
        Some(NutritionEstimate {
            calories: self.calories.checked_add(other.calories)?,
            carbs_grams: self.carbs_grams.checked_add(other.carbs_grams)?,
            protein_grams: self.protein_grams.checked_add(other.protein_grams)?,
            fat_grams: self.fat_grams.checked_add(other.fat_grams)?,
        })
    }
}

/// `value * numerator / denominator`, truncated toward zero.
///
/// Widened to `i128` so the product cannot overflow. With
/// `numerator <= denominator` the result always fits back into `i64`.
pub(crate) fn scale(value: i64, numerator: i64, denominator: i64) -> i64 {
    debug_assert!(0 < numerator && numerator <= denominator);
    (i128::from(value) * i128::from(numerator) / i128::from(denominator)) as i64
}

/// Saturates at the `i64` bounds; use `checked_add` to detect overflow
impl std::ops::Add for NutritionEstimate {
    type Output = NutritionEstimate;

    fn add(self, other: NutritionEstimate) -> NutritionEstimate {
        NutritionEstimate {
            calories: self.calories.saturating_add(other.calories),
            carbs_grams: self.carbs_grams.saturating_add(other.carbs_grams),
            protein_grams: self.protein_grams.saturating_add(other.protein_grams),
            fat_grams: self.fat_grams.saturating_add(other.fat_grams),
        }
    }
}

impl std::ops::AddAssign for NutritionEstimate {
    fn add_assign(&mut self, other: NutritionEstimate) {
        *self = *self + other;
    }
}

impl std::iter::Sum for NutritionEstimate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(NutritionEstimate::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milk_formula_truncates_each_field() {
        assert_eq!(
            NutritionEstimate::milk(150),
            NutritionEstimate { calories: 75, carbs_grams: 7, protein_grams: 5, fat_grams: 3 }
        );
        assert_eq!(
            NutritionEstimate::milk(15),
            NutritionEstimate { calories: 7, carbs_grams: 0, protein_grams: 0, fat_grams: 0 }
        );
    }

    #[test]
    fn test_milk_formula_exact_multiples() {
        // 200 * 0.035 and 140 * 0.05 land on whole numbers; no float drift
        assert_eq!(NutritionEstimate::milk(200).protein_grams, 7);
        assert_eq!(NutritionEstimate::milk(140).carbs_grams, 7);
    }

    #[test]
    fn test_milk_formula_negative_volume_truncates_toward_zero() {
        assert_eq!(
            NutritionEstimate::milk(-15),
            NutritionEstimate { calories: -7, carbs_grams: 0, protein_grams: 0, fat_grams: 0 }
        );
    }

    #[test]
    fn test_milk_formula_at_extreme_volumes() {
        let max = NutritionEstimate::milk(i64::MAX);
        assert_eq!(max.calories, i64::MAX / 2);
        assert_eq!(max.protein_grams, 322_818_021_289_917_153);

        let min = NutritionEstimate::milk(i64::MIN);
        assert_eq!(min.calories, i64::MIN / 2);
    }

    #[test]
    fn test_checked_add_detects_overflow() {
        let big = NutritionEstimate { calories: i64::MAX, ..NutritionEstimate::zero() };
        let one = NutritionEstimate { calories: 1, ..NutritionEstimate::zero() };

        assert_eq!(big.checked_add(one), None);
        assert_eq!(one.checked_add(one).map(|n| n.calories), Some(2));
        assert_eq!((big + one).calories, i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: NutritionEstimate =
            vec![NutritionEstimate::milk(150), NutritionEstimate::milk(15)].into_iter().sum();
        assert_eq!(total.calories, 82);
        assert_eq!(total.carbs_grams, 7);

        let empty: NutritionEstimate = Vec::<NutritionEstimate>::new().into_iter().sum();
        assert_eq!(empty, NutritionEstimate::zero());
    }
}
