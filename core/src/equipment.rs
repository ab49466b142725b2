//! 裝備與背包

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// 物品參考資料；重量、價格可以留空，留空視為 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: Option<String>,
    pub weight_in_lb: Option<f64>,
    pub price_in_gp: Option<f64>,
}

impl Item {
    pub fn new(name: String) -> Self {
        Self {
            name,
            description: None,
            weight_in_lb: None,
            price_in_gp: None,
        }
    }
}

/// 背包中的一疊物品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item: Item,
    pub quantity: u32,
}

impl InventoryItem {
    pub fn stack_weight(&self) -> f64 {
        self.item.weight_in_lb.unwrap_or(0.0) * f64::from(self.quantity)
    }

    pub fn stack_value(&self) -> f64 {
        self.item.price_in_gp.unwrap_or(0.0) * f64::from(self.quantity)
    }
}

/// 背包
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub name: String,
    /// 負重上限（磅）
    pub capacity: f64,
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(InventoryItem::stack_weight).sum()
    }

    pub fn total_value(&self) -> f64 {
        self.items.iter().map(InventoryItem::stack_value).sum()
    }

    /// 剩餘負重，超重時為負值
    pub fn available_capacity(&self) -> f64 {
        self.capacity - self.total_weight()
    }
}

/// 護甲類型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
pub enum ArmorType {
    Light,
    Medium,
    Heavy,
    Shield,
}

impl ArmorType {
    /// 中甲與重甲會降低移動速度
    pub fn reduces_speed(self) -> bool {
        matches!(self, Self::Medium | Self::Heavy)
    }
}

/// 護甲；本身也是一件物品，可以放進背包
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub item: Item,
    pub armor_type: Option<ArmorType>,
    pub armor_bonus: Option<u32>,
    pub max_dex_bonus: Option<u32>,
    pub armor_check_penalty: Option<i32>,
    /// 奧術法術失敗率（%）
    pub spell_failure_chance: Option<i32>,
    pub is_masterwork: bool,
    pub enchantment_bonus: u32,
}

impl Armor {
    /// 穿著護甲後的速度
    ///
    /// 中甲、重甲：基礎速度的 3/4，取最接近的 5 尺倍數，恰好一半時取偶數倍
    /// （30 → 20、20 → 15、50 → 40）
    pub fn modified_speed(&self, base_speed: i32) -> i32 {
        if !self.armor_type.is_some_and(ArmorType::reduces_speed) {
            return base_speed;
        }

        // 以 1/4 尺為單位：base * 3/4 / 5 = base * 3 / 20
        let quarter_feet = i64::from(base_speed) * 3;
        let steps = quarter_feet.div_euclid(20);
        let remainder = quarter_feet.rem_euclid(20);
        let rounded = if remainder > 10 || (remainder == 10 && steps % 2 != 0) {
            steps + 1
        } else {
            steps
        };
        // |結果| 不超過 |base_speed|，一定落在 i32 範圍內
        i32::try_from(rounded * 5).unwrap_or(base_speed)
    }
}
