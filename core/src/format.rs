//! 數值顯示格式

/// 每次追加攻擊遞減的加值
const ITERATIVE_ATTACK_STEP: i32 = 5;

/// 將基礎攻擊加值轉成多重攻擊表示法
///
/// 加值 >= 1 時輸出 `+N`，每次減 5，以 `/` 串接：
/// 11 → `+11/+6/+1`；0 或負數 → 空字串
pub fn multiattack(total_bab: i32) -> String {
    let mut bonuses = Vec::new();
    let mut bab = total_bab;
    while bab >= 1 {
        bonuses.push(format!("+{}", bab));
        bab -= ITERATIVE_ATTACK_STEP;
    }
    bonuses.join("/")
}

/// 金幣的 k 表示法：未滿 1000 顯示 `250gp`，否則 `1.5k gp`
pub fn gold_k_notation(gold: f64) -> String {
    if gold < 1000.0 {
        return format!("{}gp", gold);
    }
    format!("{:.1}k gp", gold / 1000.0)
}

/// 金幣換算成白金/金/銀/銅幣表示法，省略為 0 的幣種
///
/// 1pp = 10gp = 100sp = 1000cp；銅幣數四捨五入
pub fn gold_coin_notation(gold: f64) -> String {
    let total_cp = (gold * 100.0).round() as i64;
    if total_cp <= 0 {
        return String::new();
    }

    let coins = [
        (total_cp / 1000, "pp"),
        ((total_cp % 1000) / 100, "gp"),
        ((total_cp % 100) / 10, "sp"),
        (total_cp % 10, "cp"),
    ];

    coins
        .iter()
        .filter(|(amount, _)| *amount > 0)
        .map(|(amount, unit)| format!("{}{}", amount, unit))
        .collect::<Vec<_>>()
        .join(" ")
}
