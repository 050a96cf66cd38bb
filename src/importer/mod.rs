// ==========================================
// 库存补货决策系统 - 导入层
// ==========================================
// 职责: CSV 批量导入产品记录
// 约束: 单行错误只记入报告，不中断整批
// ==========================================

pub mod csv_parser;
pub mod error;
pub mod field_mapper;
pub mod product_importer;

// 重导出核心类型
pub use csv_parser::{CsvParser, RawRow};
pub use error::{ImportError, ImportResult};
pub use field_mapper::ProductFieldMapper;
pub use product_importer::{ImportFailure, ImportReport, ProductCsvImporter};
