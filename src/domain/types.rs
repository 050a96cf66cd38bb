// ==========================================
// 库存补货决策系统 - 领域类型定义
// ==========================================
// 职责: 关键度等级、库存可用天数、库存消耗比例等值类型
// 红线: 不允许浮点无穷/NaN 进入比较与序列化
// ==========================================

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

// ==========================================
// 关键度 (Criticality)
// ==========================================
// 固定闭集: high > medium > low
// 序列化格式: 小写（与前端一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    High,   // 关键
    Medium, // 一般
    Low,    // 低
}

impl Criticality {
    /// 全部等级（按紧迫度从高到低）
    pub const ALL: [Criticality; 3] = [Criticality::High, Criticality::Medium, Criticality::Low];

    /// 紧迫度序号（越小越紧迫）
    ///
    /// 显式全序: high=0, medium=1, low=2
    pub fn priority(self) -> u8 {
        match self {
            Criticality::High => 0,
            Criticality::Medium => 1,
            Criticality::Low => 2,
        }
    }

    /// 按紧迫度比较，Ordering::Less 表示 self 更紧迫
    pub fn cmp_urgency(self, other: Criticality) -> Ordering {
        self.priority().cmp(&other.priority())
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(self) -> &'static str {
        match self {
            Criticality::High => "high",
            Criticality::Medium => "medium",
            Criticality::Low => "low",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}

impl FromStr for Criticality {
    type Err = String;

    /// 大小写不敏感解析，未知取值返回错误
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Criticality::High),
            "medium" => Ok(Criticality::Medium),
            "low" => Ok(Criticality::Low),
            other => Err(format!("未知关键度: {}", other)),
        }
    }
}

// ==========================================
// 库存可用天数 (Days Remaining)
// ==========================================
// 日均销量为 0 时为 Unlimited（不是浮点无穷）
// 顺序: 任意 Finite(n) < Unlimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DaysRemaining {
    Finite(u64),
    Unlimited,
}

/// Unlimited 的序列化标签
pub const UNLIMITED_TAG: &str = "unlimited";

impl DaysRemaining {
    pub fn is_unlimited(self) -> bool {
        matches!(self, DaysRemaining::Unlimited)
    }
}

impl fmt::Display for DaysRemaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysRemaining::Finite(days) => write!(f, "{}", days),
            DaysRemaining::Unlimited => f.write_str(UNLIMITED_TAG),
        }
    }
}

impl Serialize for DaysRemaining {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DaysRemaining::Finite(days) => serializer.serialize_u64(*days),
            DaysRemaining::Unlimited => serializer.serialize_str(UNLIMITED_TAG),
        }
    }
}

impl<'de> Deserialize<'de> for DaysRemaining {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Days(u64),
            Tag(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Days(days) => Ok(DaysRemaining::Finite(days)),
            Raw::Tag(tag) if tag == UNLIMITED_TAG => Ok(DaysRemaining::Unlimited),
            Raw::Tag(tag) => Err(D::Error::custom(format!("非法的库存天数标签: {}", tag))),
        }
    }
}

// ==========================================
// 库存消耗比例 (Stock Depletion)
// ==========================================
// 当前库存为 0 时无意义，显式标记为 NotApplicable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StockDepletion {
    Percent(f64),
    NotApplicable,
}

/// NotApplicable 的序列化标签
pub const NOT_APPLICABLE_TAG: &str = "not_applicable";


impl Serialize for StockDepletion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StockDepletion::Percent(pct) => serializer.serialize_f64(*pct),
            StockDepletion::NotApplicable => serializer.serialize_str(NOT_APPLICABLE_TAG),
        }
    }
}

impl<'de> Deserialize<'de> for StockDepletion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Percent(f64),
            Tag(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Percent(pct) => Ok(StockDepletion::Percent(pct)),
            Raw::Tag(tag) if tag == NOT_APPLICABLE_TAG => Ok(StockDepletion::NotApplicable),
            Raw::Tag(tag) => Err(D::Error::custom(format!("非法的消耗比例标签: {}", tag))),
        }
    }
}
