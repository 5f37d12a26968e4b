//! Drink type catalogue
//!
//! The closed set of base drinks the app knows about, plus a fallback for
//! free-form labels such as "oat latte" or "Green".

use std::fmt;

use serde::{Deserialize, Serialize};

/// A drink type.
///
/// Parsing is exact and case-sensitive on the canonical lowercase name.
/// Anything else is kept verbatim as `Custom` so the stored label round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DrinkType {
    Water,
    Juice,
    Tea,
    Coffee,
    Milk,
    Alcohol,
    SoftDrink,
    Sweet,
    Sports,
    Custom(String),
}

impl DrinkType {
    /// Every base type, in picker order.
    pub const BASE: [DrinkType; 9] = [
        DrinkType::Water,
        DrinkType::Juice,
        DrinkType::Tea,
        DrinkType::Coffee,
        DrinkType::Milk,
        DrinkType::Alcohol,
        DrinkType::SoftDrink,
        DrinkType::Sweet,
        DrinkType::Sports,
    ];

    pub fn parse(s: &str) -> Self {
        match s {
            "water" => DrinkType::Water,
            "juice" => DrinkType::Juice,
            "tea" => DrinkType::Tea,
            "coffee" => DrinkType::Coffee,
            "milk" => DrinkType::Milk,
            "alcohol" => DrinkType::Alcohol,
            "softdrink" => DrinkType::SoftDrink,
            "sweet" => DrinkType::Sweet,
            "sports" => DrinkType::Sports,
            other => DrinkType::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            DrinkType::Water => "water",
            DrinkType::Juice => "juice",
            DrinkType::Tea => "tea",
            DrinkType::Coffee => "coffee",
            DrinkType::Milk => "milk",
            DrinkType::Alcohol => "alcohol",
            DrinkType::SoftDrink => "softdrink",
            DrinkType::Sweet => "sweet",
            DrinkType::Sports => "sports",
            DrinkType::Custom(label) => label,
        }
    }

    /// Display label
    pub fn label(&self) -> &str {
        match self {
            DrinkType::Water => "Water",
            DrinkType::Juice => "Juice",
            DrinkType::Tea => "Tea",
            DrinkType::Coffee => "Coffee",
            DrinkType::Milk => "Milk",
            DrinkType::Alcohol => "Wine/Beer",
            DrinkType::SoftDrink => "Soft Drink",
            DrinkType::Sweet => "Sweet/Other",
            DrinkType::Sports => "Sports Drink",
            DrinkType::Custom(label) => label,
        }
    }

    /// Sub-type labels offered once a base type is picked
    pub fn sub_options(&self) -> &'static [&'static str] {
        match self {
            DrinkType::Water => &["Plain", "Sparkling", "Squash (Sugar Free)"],
            DrinkType::Tea => &["Herbal", "Matcha", "Green"],
            DrinkType::Coffee => &["Instant", "Filter", "Cafetière", "Latte", "Cappuccino"],
            DrinkType::Milk => &["Skimmed", "Semi-skimmed", "Full Fat", "Oat Milk", "Almond Milk"],
            DrinkType::Alcohol => &["Wine", "Beer", "Cider", "Tonic"],
            DrinkType::SoftDrink => &["Coke", "Lemonade", "Fanta"],
            DrinkType::Sweet => &["Hot Chocolate", "Milkshake", "Oat Milk"],
            DrinkType::Sports => &["Lucozade", "Isotonic", "Protein Water"],
            DrinkType::Juice | DrinkType::Custom(_) => &[],
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, DrinkType::Custom(_))
    }

    /// The base type this drink was picked under.
    ///
    /// A base type is its own base. A custom label that is one of the
    /// sub-options belongs to the first base offering it, so "Oat Milk"
    /// is milk rather than sweet. Free-form labels have no base.
    pub fn base_type(&self) -> Option<DrinkType> {
        match self {
            DrinkType::Custom(label) => DrinkType::BASE
                .iter()
                .find(|base| base.sub_options().contains(&label.as_str()))
                .cloned(),
            base => Some(base.clone()),
        }
    }
}

impl From<String> for DrinkType {
    fn from(s: String) -> Self {
        DrinkType::parse(&s)
    }
}

impl From<DrinkType> for String {
    fn from(t: DrinkType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How strongly a quick pick hydrates, used to colour the preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationGroup {
    /// Counts in full
    High,
    /// Counts at 80%
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Mild,
    Strong,
}

/// A one-tap preset with the badges shown on its button
#[derive(Debug, Clone, Serialize)]
pub struct QuickPick {
    pub drink_type: DrinkType,
    pub volume_ml: i64,
    pub group: HydrationGroup,
    pub has_sugar: bool,
    pub has_salt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength: Option<Strength>,
}

impl QuickPick {
    fn new(drink_type: DrinkType, volume_ml: i64, group: HydrationGroup) -> Self {
        Self {
            drink_type,
            volume_ml,
            group,
            has_sugar: false,
            has_salt: false,
            strength: None,
        }
    }
}

/// Presets shown above the picker
pub fn quick_picks() -> Vec<QuickPick> {
    vec![
        QuickPick::new(DrinkType::Water, 200, HydrationGroup::High),
        QuickPick {
            strength: Some(Strength::Mild),
            ..QuickPick::new(DrinkType::Tea, 150, HydrationGroup::Medium)
        },
        QuickPick {
            has_sugar: true,
            strength: Some(Strength::Strong),
            ..QuickPick::new(DrinkType::Coffee, 100, HydrationGroup::Medium)
        },
        QuickPick::new(DrinkType::Milk, 150, HydrationGroup::High),
    ]
}

/// Look up a quick pick by its drink type name
pub fn find_quick_pick(name: &str) -> Option<QuickPick> {
    let wanted = DrinkType::parse(name);
    quick_picks().into_iter().find(|p| p.drink_type == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_types() {
        for t in DrinkType::BASE.iter() {
            assert_eq!(&DrinkType::parse(t.as_str()), t);
            assert!(!t.is_custom());
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(DrinkType::parse("Tea"), DrinkType::Custom("Tea".to_string()));
        assert_eq!(DrinkType::parse("COFFEE"), DrinkType::Custom("COFFEE".to_string()));
    }

    #[test]
    fn test_custom_round_trips() {
        let t = DrinkType::parse("iced coffee");
        assert!(t.is_custom());
        assert_eq!(t.as_str(), "iced coffee");
        assert_eq!(t.label(), "iced coffee");
    }

    #[test]
    fn test_empty_type_is_custom() {
        assert_eq!(DrinkType::parse(""), DrinkType::Custom(String::new()));
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let json = serde_json::to_string(&DrinkType::SoftDrink).unwrap();
        assert_eq!(json, "\"softdrink\"");

        let back: DrinkType = serde_json::from_str("\"matcha\"").unwrap();
        assert_eq!(back, DrinkType::Custom("matcha".to_string()));
    }

    #[test]
    fn test_sub_options() {
        assert_eq!(DrinkType::Coffee.sub_options().len(), 5);
        assert!(DrinkType::Juice.sub_options().is_empty());
        assert!(DrinkType::Custom("x".into()).sub_options().is_empty());
    }

    #[test]
    fn test_quick_picks() {
        let coffee = find_quick_pick("coffee").unwrap();
        assert_eq!(coffee.volume_ml, 100);
        assert_eq!(find_quick_pick("water").unwrap().volume_ml, 200);
        assert!(find_quick_pick("juice").is_none());
    }

    #[test]
    fn test_quick_pick_badges() {
        let coffee = find_quick_pick("coffee").unwrap();
        assert_eq!(coffee.group, HydrationGroup::Medium);
        assert!(coffee.has_sugar);
        assert!(!coffee.has_salt);
        assert_eq!(coffee.strength, Some(Strength::Strong));

        let tea = find_quick_pick("tea").unwrap();
        assert!(!tea.has_sugar);
        assert_eq!(tea.strength, Some(Strength::Mild));

        let water = find_quick_pick("water").unwrap();
        assert_eq!(water.group, HydrationGroup::High);
        assert_eq!(water.strength, None);

        let json = serde_json::to_value(&coffee).unwrap();
        assert_eq!(json["group"], "medium");
        assert_eq!(json["strength"], "strong");
        assert_eq!(json["has_sugar"], true);
        assert!(serde_json::to_value(&water).unwrap().get("strength").is_none());
    }

    #[test]
    fn test_base_type() {
        assert_eq!(DrinkType::Tea.base_type(), Some(DrinkType::Tea));
        assert_eq!(DrinkType::parse("Latte").base_type(), Some(DrinkType::Coffee));
        assert_eq!(DrinkType::parse("Oat Milk").base_type(), Some(DrinkType::Milk));
        assert_eq!(DrinkType::parse("kombucha").base_type(), None);
        assert_eq!(DrinkType::parse("latte").base_type(), None);
    }
}
