// ==========================================
// 库存补货决策系统 - 十进制数值工具
// ==========================================
// 引擎内部统一使用 Decimal 运算，对外以 f64 表示
// 舍入规则: 四舍五入（MidpointAwayFromZero），金额与百分比保留 2 位
// ==========================================

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 金额/百分比保留的小数位数
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// f64 → Decimal
///
/// 按 f64 的最短十进制表示转换（1.005 → 1.005，而不是 1.00499999…）。
/// 非有限值视为 0，调用方负责在边界处拒绝此类输入。
pub fn to_decimal(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&value.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(value))
        .unwrap_or(Decimal::ZERO)
}

/// Decimal → f64（取最接近的 f64）
pub fn to_f64(value: Decimal) -> f64 {
    value
        .normalize()
        .to_string()
        .parse::<f64>()
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or(0.0)
}

/// 四舍五入到指定小数位
pub fn round_half_up(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero)
}

/// f64 金额四舍五入到 2 位小数
pub fn round_money(value: f64) -> f64 {
    to_f64(round_half_up(to_decimal(value), MONEY_DECIMAL_PLACES))
}

/// 向下取整为非负整数，超出 u64 范围时饱和
pub fn floor_to_u64(value: Decimal) -> u64 {
    if value <= Decimal::ZERO {
        return 0;
    }
    value.floor().to_u64().unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_money_half_up_at_boundary() {
        // 二进制浮点下 1.005 * 100 = 100.49999…，直接 f64 舍入会得到 1.0
        assert_eq!(round_money(1.005), 1.01);
        assert_eq!(round_money(2.675), 2.68);
        assert_eq!(round_money(0.125), 0.13);
        assert_eq!(round_money(1.004), 1.0);
        assert_eq!(round_money(-1.005), -1.01);
    }

    #[test]
    fn test_to_decimal_shortest_representation() {
        assert_eq!(to_decimal(4.1).to_string(), "4.1");
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
        assert_eq!(to_decimal(f64::INFINITY), Decimal::ZERO);
    }

    #[test]
    fn test_floor_to_u64() {
        assert_eq!(floor_to_u64(Decimal::from_str("14.0625").unwrap()), 14);
        assert_eq!(floor_to_u64(Decimal::from_str("0.99").unwrap()), 0);
        assert_eq!(floor_to_u64(Decimal::from_str("-3.5").unwrap()), 0);
    }

    #[test]
    fn test_to_f64_roundtrip() {
        assert_eq!(to_f64(Decimal::from_str("1.01").unwrap()), 1.01);
        assert_eq!(to_f64(Decimal::from(238)), 238.0);
    }
}
