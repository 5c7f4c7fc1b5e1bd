//! Medical inventory items.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ordering::{by_key, text_key, Direction};
use super::{field_contains, require, Entity, SortOption};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalInventory {
    #[serde(default)]
    pub id: i64,
    pub item_name: String,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub supplier: Option<String>,
}

impl MedicalInventory {
    pub fn new(item_name: impl Into<String>, quantity: Option<u32>) -> Self {
        Self {
            id: 0,
            item_name: item_name.into(),
            category: None,
            quantity,
            unit: None,
            expiry_date: None,
            supplier: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventorySort {
    NameAsc,
    NameDesc,
    QuantityAsc,
    QuantityDesc,
    ExpiryAsc,
    ExpiryDesc,
}

impl SortOption<MedicalInventory> for InventorySort {
    fn compare(&self, a: &MedicalInventory, b: &MedicalInventory) -> Ordering {
        let name = |i: &MedicalInventory| (text_key(&i.item_name), i.id);
        let quantity = |i: &MedicalInventory| (i.quantity, i.id);
        let expiry = |i: &MedicalInventory| (i.expiry_date, i.id);

        match self {
            InventorySort::NameAsc => by_key(name(a), name(b), Direction::Asc),
            InventorySort::NameDesc => by_key(name(a), name(b), Direction::Desc),
            InventorySort::QuantityAsc => by_key(quantity(a), quantity(b), Direction::Asc),
            InventorySort::QuantityDesc => by_key(quantity(a), quantity(b), Direction::Desc),
            InventorySort::ExpiryAsc => by_key(expiry(a), expiry(b), Direction::Asc),
            InventorySort::ExpiryDesc => by_key(expiry(a), expiry(b), Direction::Desc),
        }
    }
}

impl Entity for MedicalInventory {
    const KIND: &'static str = "MedicalInventory";
    type Sort = InventorySort;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn matches(&self, term: &str) -> bool {
        field_contains(Some(&self.item_name), term)
            || field_contains(self.category.as_deref(), term)
            || field_contains(self.supplier.as_deref(), term)
    }

    fn validate(&self) -> Option<String> {
        require("Item name", &self.item_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_and_expiry_sorts() {
        let mut rows = vec![
            MedicalInventory {
                id: 1,
                expiry_date: NaiveDate::from_ymd_opt(2025, 1, 1),
                ..MedicalInventory::new("Gauze", None)
            },
            MedicalInventory {
                id: 2,
                ..MedicalInventory::new("Syringe", Some(40))
            },
            MedicalInventory {
                id: 3,
                expiry_date: NaiveDate::from_ymd_opt(2024, 6, 1),
                ..MedicalInventory::new("Saline", Some(5))
            },
        ];

        rows.sort_by(|a, b| InventorySort::QuantityAsc.compare(a, b));
        assert_eq!(rows.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 2, 1]);

        rows.sort_by(|a, b| InventorySort::ExpiryAsc.compare(a, b));
        assert_eq!(rows.iter().map(|i| i.id).collect::<Vec<_>>(), vec![3, 1, 2]);

        rows.sort_by(|a, b| InventorySort::ExpiryDesc.compare(a, b));
        assert_eq!(rows.iter().map(|i| i.id).collect::<Vec<_>>(), vec![2, 1, 3]);
    }
}
